//! Character-level tokenizer for arithmetic input.

use super::grammar;
use crate::engine::{Token, TokenSource};
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

/// Lexical failures for arithmetic input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(miette::Diagnostic))]
pub enum LexError {
    #[error("unexpected character {0:?}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::calc::unexpected_char)))]
    UnexpectedChar(char),

    #[error("number literal too large")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::calc::number_overflow)))]
    NumberOverflow,
}

/// Tokenizer over a string slice. One character of lookahead (via `peek`)
/// decides where a number ends; the engine never sees that pushback.
///
/// Space and tab are always skipped. What happens on any *other*
/// unrecognized character is explicit: the default strict mode reports it,
/// while [`Lexer::permissive`] silently skips it.
#[derive(Debug)]
pub struct Lexer<'s> {
    chars: Peekable<Chars<'s>>,
    permissive: bool,
}

impl<'s> Lexer<'s> {
    /// Strict lexer: unrecognized characters are errors.
    #[must_use]
    pub fn new(input: &'s str) -> Self {
        Self {
            chars: input.chars().peekable(),
            permissive: false,
        }
    }

    /// Permissive lexer: unrecognized characters are skipped like
    /// whitespace.
    #[must_use]
    pub fn permissive(input: &'s str) -> Self {
        Self {
            chars: input.chars().peekable(),
            permissive: true,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn number(&mut self, first: char) -> Result<Token<f64>, LexError> {
        let mut value = i64::from(first.to_digit(10).unwrap_or(0));
        while let Some(digit) = self.chars.peek().and_then(|c| c.to_digit(10)) {
            self.chars.next();
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(digit)))
                .ok_or(LexError::NumberOverflow)?;
        }
        Ok(Token::with_value(grammar::NUMBER, value as f64))
    }
}

impl TokenSource<f64> for Lexer<'_> {
    type Error = LexError;

    fn next_token(&mut self) -> Result<Token<f64>, LexError> {
        loop {
            let Some(c) = self.chars.next() else {
                return Ok(Token::new(grammar::END));
            };
            return match c {
                '+' => Ok(Token::new(grammar::PLUS)),
                '-' => Ok(Token::new(grammar::MINUS)),
                '*' => Ok(Token::new(grammar::TIMES)),
                '/' => Ok(Token::new(grammar::DIVIDE)),
                '(' => Ok(Token::new(grammar::OP)),
                ')' => Ok(Token::new(grammar::CP)),
                '\n' => Ok(Token::new(grammar::NL)),
                ' ' | '\t' => continue,
                '0'..='9' => self.number(c),
                _ if self.permissive => continue,
                other => Err(LexError::UnexpectedChar(other)),
            };
        }
    }
}
