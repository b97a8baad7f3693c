//! JSON front-end.
//!
//! A JSON reader built on the table-driven engine: the packed grammar in
//! [`grammar`], the character lexer in [`lexer`], and action routines that
//! fold a [`Value`] tree on a semantic stack. The serializer on [`Value`]
//! round-trips: its output parses back to a structurally equal value.
//!
//! ```
//! use flatgram::json::Value;
//!
//! let value: Value = r#"{"a":[1,2.5,true,null]}"#.parse().unwrap();
//! assert_eq!(value.get("a").and_then(|a| a.at(1)).and_then(Value::as_f64), Some(2.5));
//! ```

mod actions;
mod grammar;
mod lexer;
mod value;

pub use actions::Builder;
pub use grammar::grammar;
pub use lexer::{LexError, Lexer, TokenValue};
pub use value::Value;

use crate::engine::{Automaton, EngineConfig};
use crate::error::ParseError;
use thiserror::Error;

/// Failures from the JSON entry points.
#[derive(Debug, Error)]
#[cfg_attr(feature = "diagnostics", derive(miette::Diagnostic))]
pub enum JsonError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("input produced no value")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::json::no_value)))]
    NoValue,
}

/// Parse one JSON value from text.
pub fn from_str(input: &str) -> Result<Value, JsonError> {
    from_str_with(input, &EngineConfig::default())
}

/// Parse one JSON value with explicit engine configuration (deeply nested
/// inputs need a larger parse stack).
pub fn from_str_with(input: &str, config: &EngineConfig) -> Result<Value, JsonError> {
    let mut lexer = Lexer::new(input);
    let mut builder = Builder::new();
    Automaton::with_config(grammar(), config).run(&mut lexer, &mut builder)?;
    builder.finish().ok_or(JsonError::NoValue)
}

impl std::str::FromStr for Value {
    type Err = JsonError;

    fn from_str(input: &str) -> Result<Self, JsonError> {
        from_str(input)
    }
}
