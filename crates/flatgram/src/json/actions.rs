//! Action routines for the JSON grammar: a value stack folded into one
//! [`Value`] tree.
//!
//! The stack discipline mirrors the grammar: `@begin-object`/`@begin-array`
//! push an empty container, `@member-name` parks the pending member name on
//! the stack, and the append actions pop the finished piece back into the
//! container beneath it.

use super::grammar;
use super::lexer::TokenValue;
use super::value::Value;
use crate::engine::{ActionHandler, ValueStack};
use crate::error::ActionError;
use crate::symbol::SymbolId;

/// Builds the value tree as the automaton recognizes JSON text.
#[derive(Debug)]
pub struct Builder {
    stack: ValueStack<Value>,
}

impl Builder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: ValueStack::new(),
        }
    }

    /// The finished value, if the parse left exactly one on the stack.
    #[must_use]
    pub fn finish(mut self) -> Option<Value> {
        let value = self.stack.pop().ok()?;
        self.stack.is_empty().then_some(value)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

fn text(value: Option<&TokenValue>) -> Result<&str, ActionError> {
    match value {
        Some(TokenValue::Text(s)) => Ok(s),
        _ => Err(ActionError::failed("token carried no text value")),
    }
}

fn number(value: Option<&TokenValue>) -> Result<f64, ActionError> {
    match value {
        Some(TokenValue::Number(n)) => Ok(*n),
        _ => Err(ActionError::failed("token carried no numeric value")),
    }
}

impl ActionHandler<TokenValue> for Builder {
    fn apply(&mut self, action: SymbolId, value: Option<&TokenValue>) -> Result<(), ActionError> {
        match action {
            grammar::BEGIN_OBJECT => self.stack.push(Value::Object(Vec::new())),
            grammar::BEGIN_ARRAY => self.stack.push(Value::Array(Vec::new())),
            grammar::MEMBER_NAME => {
                let name = text(value)?.into();
                self.stack.push(Value::String(name))
            }
            grammar::APPEND_MEMBER => {
                let member = self.stack.pop()?;
                let Value::String(name) = self.stack.pop()? else {
                    return Err(ActionError::failed("member name missing below value"));
                };
                let Value::Object(mut members) = self.stack.pop()? else {
                    return Err(ActionError::failed("no open object to append to"));
                };
                members.push((name, member));
                self.stack.push(Value::Object(members))
            }
            grammar::APPEND_ELEMENT => {
                let element = self.stack.pop()?;
                let Value::Array(mut values) = self.stack.pop()? else {
                    return Err(ActionError::failed("no open array to append to"));
                };
                values.push(element);
                self.stack.push(Value::Array(values))
            }
            grammar::LIT_STRING => {
                let s = text(value)?.into();
                self.stack.push(Value::String(s))
            }
            grammar::LIT_NUMBER => {
                let n = number(value)?;
                self.stack.push(Value::Number(n))
            }
            grammar::LIT_TRUE => self.stack.push(Value::Bool(true)),
            grammar::LIT_FALSE => self.stack.push(Value::Bool(false)),
            grammar::LIT_NULL => self.stack.push(Value::Null),
            other => Err(ActionError::failed(format!("unknown action id {other}"))),
        }
    }
}
