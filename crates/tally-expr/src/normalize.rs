//! Input normalization
//!
//! Front ends hand over whatever the user typed. The parser only understands
//! the compact ASCII form, so whitespace is dropped and the display glyphs
//! for multiplication and division are mapped to `*` and `/`.

/// Multiplication sign as shown on calculator keypads
pub const MULTIPLY_GLYPH: char = '×';

/// Division sign as shown on calculator keypads
pub const DIVIDE_GLYPH: char = '÷';

/// Normalize an expression into the form the parser accepts
///
/// # Example
/// ```rust
/// use tally_expr::normalize;
///
/// assert_eq!(normalize(" 6 × 7 ÷ 2 "), "6*7/2");
/// ```
pub fn normalize(expression: &str) -> String {
    expression
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            MULTIPLY_GLYPH => '*',
            DIVIDE_GLYPH => '/',
            other => other,
        })
        .collect()
}
