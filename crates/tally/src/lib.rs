//! # tally
//!
//! A small calculator library.
//!
//! ## Features
//!
//! - Arithmetic expression evaluation (`+ - * / ^`, unary sign, parentheses)
//! - Display formatting of results
//! - Bounded calculation history with JSON persistence
//!
//! ## Example
//!
//! ```rust
//! use tally::prelude::*;
//!
//! // One-off evaluation
//! assert_eq!(evaluate("2^3^2").unwrap(), 512.0);
//!
//! // Interactive session
//! let mut calc = Calculator::new(CalculatorOptions::default());
//! let calculation = calc.calculate("1 ÷ 3");
//! assert_eq!(calculation.display.to_string(), "0.3333333333");
//! ```

pub mod calculator;
pub mod display;
pub mod history;
pub mod prelude;

#[cfg(test)]
mod test_support;

// Re-export session types
pub use calculator::{Calculation, Calculator, CalculatorOptions};

// Re-export display helpers
pub use display::{format_number, render, DisplayValue};

// Re-export history types
pub use history::{
    History, HistoryEntry, HistoryError, HistoryResult, DEFAULT_HISTORY_CAPACITY,
};

// Re-export evaluator types
pub use tally_expr::{evaluate, evaluate_normalized, normalize, EvalError, EvalResult};
