//! Arithmetic expression front-end.
//!
//! A line-oriented calculator built on the table-driven engine: the packed
//! grammar in [`grammar`], the character lexer in [`lexer`], and a value
//! stack of doubles folded by the action routines. Standard precedence,
//! parentheses, unary minus; addition, subtraction, multiplication, and
//! division all associate to the left.
//!
//! ```
//! use flatgram::calc::Calculator;
//!
//! let calc = Calculator::new();
//! assert_eq!(calc.eval_line("2+3*4").unwrap(), 14.0);
//! ```

mod actions;
mod grammar;
mod lexer;

pub use actions::Evaluator;
pub use grammar::grammar;
pub use lexer::{LexError, Lexer};

use crate::engine::{Automaton, EngineConfig};
use crate::error::ParseError;
use thiserror::Error;

/// Failures from the calculator's public entry points.
#[derive(Debug, Error)]
#[cfg_attr(feature = "diagnostics", derive(miette::Diagnostic))]
pub enum CalcError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("input produced no value")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::calc::no_value)))]
    NoValue,
}

/// The arithmetic evaluator. Cheap to construct; holds only configuration,
/// so one instance can serve any number of sequential evaluations.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    config: EngineConfig,
    permissive: bool,
}

impl Calculator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip unrecognized input characters instead of reporting them.
    #[must_use]
    pub fn permissive_lexing(mut self, permissive: bool) -> Self {
        self.permissive = permissive;
        self
    }

    /// Override the engine configuration.
    #[must_use]
    pub fn engine_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Evaluate newline-terminated input, yielding one value per non-empty
    /// line. Empty input (or blank lines alone) yields no values.
    pub fn eval(&self, input: &str) -> Result<Vec<f64>, CalcError> {
        let mut lexer = if self.permissive {
            Lexer::permissive(input)
        } else {
            Lexer::new(input)
        };
        let mut evaluator = Evaluator::new();
        Automaton::with_config(grammar(), &self.config).run(&mut lexer, &mut evaluator)?;
        Ok(evaluator.into_results())
    }

    /// Evaluate a single expression, supplying the terminating newline if
    /// the caller left it off.
    pub fn eval_line(&self, line: &str) -> Result<f64, CalcError> {
        let mut owned;
        let line = if line.ends_with('\n') {
            line
        } else {
            owned = String::with_capacity(line.len() + 1);
            owned.push_str(line);
            owned.push('\n');
            &owned
        };
        self.eval(line)?.pop().ok_or(CalcError::NoValue)
    }
}
