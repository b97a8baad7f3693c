//! Character-level tokenizer for JSON text.

use super::grammar;
use crate::engine::{Token, TokenSource};
use compact_str::CompactString;
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

/// Raw value attached to STRING and NUMBER tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Number(f64),
    Text(CompactString),
}

/// Lexical failures for JSON input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(miette::Diagnostic))]
pub enum LexError {
    #[error("unexpected character {0:?}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::json::unexpected_char)))]
    UnexpectedChar(char),

    #[error("unterminated string literal")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::json::unterminated_string)))]
    UnterminatedString,

    #[error("invalid number literal {0:?}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::json::invalid_number)))]
    InvalidNumber(CompactString),

    #[error("unrecognized literal {0:?}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::json::unknown_literal)))]
    UnknownLiteral(CompactString),
}

/// Tokenizer over JSON text, with one character of lookahead to decide
/// where numbers and barewords end.
#[derive(Debug)]
pub struct Lexer<'s> {
    chars: Peekable<Chars<'s>>,
}

impl<'s> Lexer<'s> {
    #[must_use]
    pub fn new(input: &'s str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    fn string(&mut self) -> Result<Token<TokenValue>, LexError> {
        let mut text = CompactString::default();
        loop {
            let Some(c) = self.chars.next() else {
                return Err(LexError::UnterminatedString);
            };
            match c {
                '"' => break,
                '\\' => {
                    let Some(escape) = self.chars.next() else {
                        return Err(LexError::UnterminatedString);
                    };
                    text.push(match escape {
                        'b' => '\u{8}',
                        'f' => '\u{c}',
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        // `\"`, `\\`, `\/`, and anything else stand for
                        // themselves.
                        other => other,
                    });
                }
                other => text.push(other),
            }
        }
        Ok(Token::with_value(grammar::STRING, TokenValue::Text(text)))
    }

    fn number(&mut self, first: char) -> Result<Token<TokenValue>, LexError> {
        let mut text = CompactString::default();
        text.push(first);
        if first == '-' && !self.peek_digit() {
            return Err(LexError::InvalidNumber(text));
        }
        self.digits(&mut text);
        if self.chars.peek() == Some(&'.') {
            text.push('.');
            self.chars.next();
            self.digits(&mut text);
        }
        if matches!(self.chars.peek(), Some('e' | 'E')) {
            text.push('e');
            self.chars.next();
            if let Some(&sign) = self.chars.peek() {
                if sign == '+' || sign == '-' {
                    text.push(sign);
                    self.chars.next();
                }
            }
            self.digits(&mut text);
        }
        match text.parse::<f64>() {
            Ok(number) => Ok(Token::with_value(
                grammar::NUMBER,
                TokenValue::Number(number),
            )),
            Err(_) => Err(LexError::InvalidNumber(text)),
        }
    }

    fn digits(&mut self, text: &mut CompactString) {
        while let Some(&c) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            text.push(c);
            self.chars.next();
        }
    }

    fn peek_digit(&mut self) -> bool {
        self.chars.peek().is_some_and(char::is_ascii_digit)
    }

    fn bareword(&mut self, first: char) -> Result<Token<TokenValue>, LexError> {
        let mut word = CompactString::default();
        word.push(first);
        while let Some(&c) = self.chars.peek() {
            if !c.is_ascii_lowercase() {
                break;
            }
            word.push(c);
            self.chars.next();
        }
        match word.as_str() {
            "true" => Ok(Token::new(grammar::TRUE)),
            "false" => Ok(Token::new(grammar::FALSE)),
            "null" => Ok(Token::new(grammar::NULL)),
            _ => Err(LexError::UnknownLiteral(word)),
        }
    }
}

impl TokenSource<TokenValue> for Lexer<'_> {
    type Error = LexError;

    fn next_token(&mut self) -> Result<Token<TokenValue>, LexError> {
        loop {
            let Some(c) = self.chars.next() else {
                return Ok(Token::new(grammar::END));
            };
            return match c {
                '{' => Ok(Token::new(grammar::OC)),
                '}' => Ok(Token::new(grammar::CC)),
                '[' => Ok(Token::new(grammar::OS)),
                ']' => Ok(Token::new(grammar::CS)),
                ',' => Ok(Token::new(grammar::COMMA)),
                ':' => Ok(Token::new(grammar::COLON)),
                ' ' | '\t' | '\n' => continue,
                '"' => self.string(),
                '0'..='9' | '-' => self.number(c),
                'a'..='z' => self.bareword(c),
                other => Err(LexError::UnexpectedChar(other)),
            };
        }
    }
}
