//! # tally-expr
//!
//! Arithmetic expression evaluator for tally.
//!
//! This crate provides:
//! - Input normalization (whitespace, `×`/`÷` glyphs)
//! - A recursive descent evaluator for `+ - * / ^`, unary sign and parentheses
//! - Typed evaluation errors
//!
//! ## Example
//!
//! ```rust
//! use tally_expr::evaluate;
//!
//! assert_eq!(evaluate("(2 + 3) × 4").unwrap(), 20.0);
//! assert_eq!(evaluate("8 - 3 - 2").unwrap(), 3.0);
//! ```

pub mod error;
pub mod evaluator;
pub mod normalize;

pub use error::{EvalError, EvalResult};
pub use evaluator::{evaluate, evaluate_normalized, MAX_DEPTH};
pub use normalize::normalize;
