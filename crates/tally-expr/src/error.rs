//! Evaluation error types

use thiserror::Error;

/// Result type for expression evaluation
pub type EvalResult<T> = std::result::Result<T, EvalError>;

/// Errors that can occur while evaluating an expression
///
/// Every `position` is a byte offset into the normalized expression (see
/// [`normalize`](crate::normalize::normalize)) at which the problem was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Neither `(` nor a well-formed number where an operand was expected,
    /// or input left over after a complete expression
    #[error("Invalid expression at offset {position}")]
    InvalidExpression { position: usize },

    /// An unclosed `(` or a stray `)`
    #[error("Mismatched parentheses at offset {position}")]
    MismatchedParentheses { position: usize },

    /// Right operand of `/` evaluated to exactly zero
    #[error("Division by zero at offset {position}")]
    DivisionByZero { position: usize },
}

impl EvalError {
    /// Byte offset into the normalized input where the error was detected
    pub fn position(&self) -> usize {
        match self {
            EvalError::InvalidExpression { position }
            | EvalError::MismatchedParentheses { position }
            | EvalError::DivisionByZero { position } => *position,
        }
    }

    /// Short, position-free name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            EvalError::InvalidExpression { .. } => "invalid expression",
            EvalError::MismatchedParentheses { .. } => "mismatched parentheses",
            EvalError::DivisionByZero { .. } => "division by zero",
        }
    }
}
