//! Prelude module - common imports for tally users
//!
//! ```rust
//! use tally::prelude::*;
//! ```

pub use crate::{
    // Session types
    Calculation,
    Calculator,
    CalculatorOptions,
    DisplayValue,

    // Error types
    EvalError,
    EvalResult,
    HistoryError,

    History,
    HistoryEntry,

    // Functions
    evaluate,
    format_number,
};
