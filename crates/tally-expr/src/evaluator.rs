//! Expression evaluator
//!
//! A recursive descent evaluator with proper operator precedence. Values are
//! computed while parsing, so no syntax tree is built and the first error
//! encountered ends the evaluation.

use crate::error::{EvalError, EvalResult};
use crate::normalize::normalize;

/// Deepest nesting of parentheses and `^` chains accepted
pub const MAX_DEPTH: usize = 256;

/// Evaluate an arithmetic expression
///
/// The input is normalized first (whitespace removed, `×`/`÷` mapped to
/// `*`/`/`), then evaluated with [`evaluate_normalized`].
///
/// # Example
/// ```rust
/// use tally_expr::{evaluate, EvalError};
///
/// assert_eq!(evaluate("2 + 3 × 4").unwrap(), 14.0);
/// assert_eq!(evaluate("2^3^2").unwrap(), 512.0);
/// assert!(matches!(evaluate("1/0"), Err(EvalError::DivisionByZero { .. })));
/// ```
pub fn evaluate(expression: &str) -> EvalResult<f64> {
    let normalized = normalize(expression);
    evaluate_normalized(&normalized)
}

/// Evaluate an expression that is already in normalized ASCII form
///
/// Whitespace and the `×`/`÷` glyphs are not accepted here; they are
/// reported as [`EvalError::InvalidExpression`].
pub fn evaluate_normalized(expression: &str) -> EvalResult<f64> {
    let result = ExpressionParser::new(expression).parse();

    match &result {
        Ok(value) => tracing::debug!(expression, value, "evaluated expression"),
        Err(e) => tracing::debug!(expression, error = %e, "rejected expression"),
    }

    result
}

/// Parser context for a single evaluation
///
/// Owns the cursor for the duration of one call. The cursor only moves
/// forward; every decision is made on one character of lookahead.
struct ExpressionParser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> ExpressionParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    fn parse(mut self) -> EvalResult<f64> {
        let value = self.parse_additive()?;

        // Make sure we consumed all input
        match self.peek_char() {
            None => Ok(value),
            Some(')') => Err(EvalError::MismatchedParentheses { position: self.pos }),
            Some(_) => Err(EvalError::InvalidExpression { position: self.pos }),
        }
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn peek_digit(&self) -> bool {
        self.peek_char().map_or(false, |c| c.is_ascii_digit())
    }

    /// Run `f` one nesting level deeper, failing past [`MAX_DEPTH`]
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> EvalResult<T>) -> EvalResult<T> {
        if self.depth >= MAX_DEPTH {
            tracing::trace!(pos = self.pos, "nesting limit reached");
            return Err(EvalError::InvalidExpression { position: self.pos });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest):
    // 1. Addition/Subtraction: +, -
    // 2. Multiplication/Division: *, /
    // 3. Exponentiation: ^ (right associative)
    // 4. Unary: -, +
    // 5. Primary: numbers, parentheses

    fn parse_additive(&mut self) -> EvalResult<f64> {
        let mut left = self.parse_multiplicative()?;

        loop {
            match self.peek_char() {
                Some('+') => {
                    self.advance();
                    let right = self.parse_multiplicative()?;
                    tracing::trace!(left, right, "add");
                    left += right;
                }
                Some('-') => {
                    self.advance();
                    let right = self.parse_multiplicative()?;
                    tracing::trace!(left, right, "subtract");
                    left -= right;
                }
                _ => break,
            }
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> EvalResult<f64> {
        let mut left = self.parse_exponent()?;

        loop {
            match self.peek_char() {
                Some('*') => {
                    self.advance();
                    let right = self.parse_exponent()?;
                    tracing::trace!(left, right, "multiply");
                    left *= right;
                }
                Some('/') => {
                    let position = self.pos;
                    self.advance();
                    let right = self.parse_exponent()?;
                    // Exact comparison; tiny divisors are allowed through
                    if right == 0.0 {
                        return Err(EvalError::DivisionByZero { position });
                    }
                    tracing::trace!(left, right, "divide");
                    left /= right;
                }
                _ => break,
            }
        }

        Ok(left)
    }

    fn parse_exponent(&mut self) -> EvalResult<f64> {
        let base = self.parse_unary()?;

        if self.eat('^') {
            let exponent = self.nested(Self::parse_exponent)?; // Right associative
            tracing::trace!(base, exponent, "power");
            return Ok(base.powf(exponent));
        }

        Ok(base)
    }

    fn parse_unary(&mut self) -> EvalResult<f64> {
        // A sign chain folds to one negation, or none for an even count
        let mut negate = false;
        loop {
            match self.peek_char() {
                Some('-') => {
                    self.advance();
                    negate = !negate;
                }
                // Prefix plus (no-op)
                Some('+') => self.advance(),
                _ => break,
            }
        }

        let value = self.parse_primary()?;
        Ok(if negate { -value } else { value })
    }

    fn parse_primary(&mut self) -> EvalResult<f64> {
        match self.peek_char() {
            Some('(') => {
                self.advance();
                let value = self.nested(Self::parse_additive)?;
                if !self.eat(')') {
                    return Err(EvalError::MismatchedParentheses { position: self.pos });
                }
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() => self.parse_number(),
            _ => Err(EvalError::InvalidExpression { position: self.pos }),
        }
    }

    fn parse_number(&mut self) -> EvalResult<f64> {
        let start = self.pos;

        // Integer part
        while self.peek_digit() {
            self.advance();
        }

        // Decimal part needs at least one digit after the point
        if self.eat('.') && !self.peek_digit() {
            return Err(EvalError::InvalidExpression { position: self.pos });
        }
        while self.peek_digit() {
            self.advance();
        }

        let value = self.input[start..self.pos]
            .parse::<f64>()
            .map_err(|_| EvalError::InvalidExpression { position: start })?;
        tracing::trace!(value, start, "number");
        Ok(value)
    }
}
