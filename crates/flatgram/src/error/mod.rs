//! Structured error types for the parsing runtime.
//!
//! The automaton halts on the first error and returns one structured value;
//! rendering is the caller's business. Observed and expected symbols are
//! carried as [`SymbolRef`]s so callers can branch on ids while the
//! `Display` form reads like the classic "got X, expected Y" report.
//!
//! Lexical failures never cross the lexer boundary as panics or partial
//! state: a lexer returns an `Err` value and the automaton wraps it in
//! [`ParseError::Lexical`].

use crate::symbol::SymbolRef;
use compact_str::CompactString;
use thiserror::Error;

/// Why a parse halted.
#[derive(Debug, Error)]
#[cfg_attr(feature = "diagnostics", derive(miette::Diagnostic))]
pub enum ParseError {
    /// The top of the parse stack was a terminal and the lookahead differed.
    #[error("syntax error: got {got}, expected {expected}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::parse::unexpected_token)))]
    UnexpectedToken { got: SymbolRef, expected: SymbolRef },

    /// No table entry for the lookahead under the pending non-terminal.
    #[error("syntax error: got {got}, expected {expected}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::parse::no_production)))]
    NoProduction { got: SymbolRef, expected: SymbolRef },

    /// The stack emptied before the lookahead reached end-of-input.
    #[error("trailing input: got {got}, expected {expected}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::parse::trailing_input)))]
    TrailingInput { got: SymbolRef, expected: SymbolRef },

    /// A production expansion exceeded the configured stack bound.
    #[error("parse stack overflow at depth {depth}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::parse::stack_overflow)))]
    StackOverflow { depth: usize },

    /// The lexer reported a failure (invalid character, unterminated
    /// literal, over-long literal, ..).
    #[error("lexical error: {0}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::parse::lexical)))]
    Lexical(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// An action routine signalled a failure.
    #[error("action {action} failed: {source}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::parse::action)))]
    Action {
        action: SymbolRef,
        #[source]
        source: ActionError,
    },
}

/// Failures signalled by action routines. The engine never inspects the
/// semantic stack; keeping it within bounds is the routines' job, and these
/// are the values they signal with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(miette::Diagnostic))]
pub enum ActionError {
    #[error("semantic stack overflow")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::action::overflow)))]
    StackOverflow,

    #[error("semantic stack underflow")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::action::underflow)))]
    StackUnderflow,

    #[error("{0}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::action::failed)))]
    Failed(CompactString),
}

impl ActionError {
    /// A free-form action failure.
    #[must_use]
    pub fn failed(message: impl Into<CompactString>) -> Self {
        Self::Failed(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::SymbolRef;

    #[test]
    fn syntax_errors_render_got_expected() {
        let err = ParseError::UnexpectedToken {
            got: SymbolRef::new(3, "NUMBER"),
            expected: SymbolRef::new(1, "END"),
        };
        assert_eq!(err.to_string(), "syntax error: got NUMBER, expected END");
    }

    #[test]
    fn action_errors_render_with_context() {
        let err = ParseError::Action {
            action: SymbolRef::new(18, "@push"),
            source: ActionError::StackUnderflow,
        };
        assert_eq!(err.to_string(), "action @push failed: semantic stack underflow");
    }

    #[test]
    fn free_form_action_failure() {
        assert_eq!(ActionError::failed("no value").to_string(), "no value");
    }
}
