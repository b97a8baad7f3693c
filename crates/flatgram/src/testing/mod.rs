//! Test doubles for exercising the engine without a real lexer: a scripted
//! token source and a recording action handler.

use crate::engine::{ActionHandler, Token, TokenSource};
use crate::error::ActionError;
use crate::symbol::SymbolId;
use std::convert::Infallible;

/// A [`TokenSource`] that replays a fixed token sequence, then yields the
/// end-of-input terminal forever — the idempotent-at-end-of-stream behavior
/// the engine contract requires.
#[derive(Debug)]
pub struct ScriptedSource<V> {
    tokens: std::vec::IntoIter<Token<V>>,
    end_of_input: SymbolId,
}

impl<V> ScriptedSource<V> {
    pub fn new(tokens: impl IntoIterator<Item = Token<V>>, end_of_input: SymbolId) -> Self {
        Self {
            tokens: tokens.into_iter().collect::<Vec<_>>().into_iter(),
            end_of_input,
        }
    }
}

impl<V> TokenSource<V> for ScriptedSource<V> {
    type Error = Infallible;

    fn next_token(&mut self) -> Result<Token<V>, Infallible> {
        Ok(self
            .tokens
            .next()
            .unwrap_or(Token::new(self.end_of_input)))
    }
}

/// An [`ActionHandler`] that records every dispatched action id in order.
#[derive(Debug, Default)]
pub struct RecordingActions {
    pub log: Vec<SymbolId>,
}

impl RecordingActions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V> ActionHandler<V> for RecordingActions {
    fn apply(&mut self, action: SymbolId, _value: Option<&V>) -> Result<(), ActionError> {
        self.log.push(action);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_source_is_idempotent_at_end() {
        let mut source = ScriptedSource::<()>::new([Token::new(2)], 1);
        assert_eq!(source.next_token().unwrap().id, 2);
        assert_eq!(source.next_token().unwrap().id, 1);
        assert_eq!(source.next_token().unwrap().id, 1);
    }

    #[test]
    fn recording_actions_keeps_order() {
        let mut actions = RecordingActions::new();
        ActionHandler::<()>::apply(&mut actions, 7, None).unwrap();
        ActionHandler::<()>::apply(&mut actions, 5, None).unwrap();
        assert_eq!(actions.log, vec![7, 5]);
    }
}
