//! # Flatgram
//!
//! A table-driven parsing runtime: a small stack automaton that recognizes
//! sentences of any context-free grammar whose productions have been
//! pre-compiled into a packed, binary-searchable table, dispatching embedded
//! semantic actions as it goes.
//!
//! ## Overview
//!
//! The engine carries no grammar-specific knowledge. A grammar is a flat
//! array of sorted, sentinel-terminated entries ([`table`]), a pair of id
//! range boundaries that classify symbols ([`symbol`]), and a start symbol —
//! bundled as a [`Grammar`] that any number of concurrent [`Automaton`]
//! instances can share read-only. Input arrives one token at a time through
//! a [`TokenSource`]; semantic actions embedded in productions dispatch to
//! an [`ActionHandler`], which owns its own value stack and is the only
//! party that ever sees attribute values.
//!
//! Two complete front-ends demonstrate the split: an arithmetic evaluator
//! ([`calc`], feature `frontend-calc`) and a JSON reader ([`json`], feature
//! `frontend-json`), each supplying its own packed table, lexer, and action
//! routines on top of the same engine.
//!
//! ## Example
//!
//! Driving the engine with a one-production grammar and a scripted token
//! stream:
//!
//! ```
//! use flatgram::engine::ActionTable;
//! use flatgram::testing::ScriptedSource;
//! use flatgram::{Automaton, Grammar, SymbolSpace, Token, NONE};
//!
//! // Ids: END=1, NUMBER=2 (terminals); s=3 (non-terminal); @record=4 (action).
//! const NAMES: &[&str] = &["(none)", "END", "NUMBER", "s", "@record"];
//! // s -> @record NUMBER END
//! const CELLS: &[u16] = &[2, 3, 4, 2, 1, NONE];
//! static GRAMMAR: Grammar<'static> =
//!     Grammar::new(CELLS, SymbolSpace::new(3, 4), NAMES, 3, 1);
//!
//! let mut seen = None;
//! let mut actions = ActionTable::new().on(4, |value: Option<&i64>| {
//!     seen = value.copied();
//!     Ok(())
//! });
//! let mut lexer = ScriptedSource::new([Token::with_value(2, 7i64)], 1);
//! Automaton::new(&GRAMMAR).run(&mut lexer, &mut actions)?;
//! drop(actions);
//! assert_eq!(seen, Some(7));
//! # Ok::<(), flatgram::ParseError>(())
//! ```

pub mod engine;
pub mod error;
pub mod grammar;
pub mod symbol;
pub mod table;
pub mod testing;

#[cfg(feature = "frontend-calc")]
pub mod calc;
#[cfg(feature = "frontend-json")]
pub mod json;

pub use engine::{
    ActionHandler, ActionTable, Automaton, EngineConfig, ParseStack, Token, TokenSource,
    ValueStack,
};
pub use error::{ActionError, ParseError};
pub use grammar::{Grammar, GrammarError};
pub use symbol::{SymbolId, SymbolKind, SymbolRef, SymbolSpace, NONE};
pub use table::{Entries, Entry, GrammarTable, TableError};
