//! Calculator session
//!
//! Ties evaluation, display formatting and history together the way an
//! interactive front end uses them: hand over the finished expression, show
//! the result (or a generic error state), remember successful calculations.
//!
//! # Example
//!
//! ```rust
//! use tally::{Calculator, CalculatorOptions};
//!
//! let mut calc = Calculator::new(CalculatorOptions::default());
//!
//! assert_eq!(calc.calculate("2 + 3 × 4").display.to_string(), "14");
//! assert_eq!(calc.calculate("4 ÷ 0").display.to_string(), "Error");
//! assert_eq!(calc.history().len(), 1);
//! ```

use crate::display::{render, DisplayValue};
use crate::history::{History, HistoryEntry, HistoryResult, DEFAULT_HISTORY_CAPACITY};
use std::path::PathBuf;
use tally_expr::{evaluate, EvalResult};

/// Options for a calculator session
#[derive(Debug, Clone)]
pub struct CalculatorOptions {
    /// Maximum number of history entries kept (default: 50)
    pub history_capacity: usize,
    /// Where history is persisted; `None` keeps it in memory only
    pub history_path: Option<PathBuf>,
}

impl Default for CalculatorOptions {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            history_path: None,
        }
    }
}

/// Outcome of one calculation
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    /// Expression as handed in, trimmed
    pub expression: String,
    /// Raw evaluation result
    pub result: EvalResult<f64>,
    /// What to show
    pub display: DisplayValue,
}

impl Calculation {
    pub fn is_error(&self) -> bool {
        self.display.is_error()
    }
}

/// An interactive calculator session
#[derive(Debug)]
pub struct Calculator {
    options: CalculatorOptions,
    history: History,
}

impl Calculator {
    /// Start a session with an empty history
    pub fn new(options: CalculatorOptions) -> Self {
        let history = History::new(options.history_capacity);
        Self { options, history }
    }

    /// Start a session, loading history from `history_path` when set
    pub fn open(options: CalculatorOptions) -> HistoryResult<Self> {
        let history = match &options.history_path {
            Some(path) => History::load(path, options.history_capacity)?,
            None => History::new(options.history_capacity),
        };
        Ok(Self { options, history })
    }

    pub fn options(&self) -> &CalculatorOptions {
        &self.options
    }

    /// Evaluate one expression
    ///
    /// Successful, finite results are recorded in history. Errors and
    /// non-finite results display as `Error` and are not recorded.
    pub fn calculate(&mut self, expression: &str) -> Calculation {
        let expression = expression.trim().to_string();
        let result = evaluate(&expression);
        let display = render(&result);

        match (&result, &display) {
            (Ok(value), DisplayValue::Number(text)) => {
                self.history
                    .push(HistoryEntry::new(expression.clone(), *value, text.clone()));
            }
            (Ok(value), DisplayValue::Error) => {
                tracing::debug!("{} produced non-finite value {}", expression, value);
            }
            (Err(e), _) => {
                tracing::debug!("{} failed: {}", expression, e);
            }
        }

        Calculation {
            expression,
            result,
            display,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Persist history to `history_path`; does nothing without one
    pub fn save(&self) -> HistoryResult<()> {
        match &self.options.history_path {
            Some(path) => self.history.save(path),
            None => Ok(()),
        }
    }
}
