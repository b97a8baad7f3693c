//! The parse automaton: a stack machine that recognizes input against a
//! packed grammar table and dispatches embedded semantic actions.
//!
//! The automaton's entire state is its parse stack plus a one-token
//! lookahead cell; there is no enumerated state set. Each step pops one
//! symbol and acts on its category:
//!
//! - **action** — dispatch to the [`ActionHandler`]; the lookahead is not
//!   consumed, so the handler sees the raw value of the *current* lookahead
//!   token (grammars place a value-capturing action immediately before the
//!   terminal it captures).
//! - **terminal** — compare against the lookahead; on match the token is
//!   consumed, on mismatch the parse halts.
//! - **non-terminal** — resolve a production through the table and push it
//!   in reverse, leftmost symbol on top; the lookahead is not consumed.
//!
//! Acceptance is exactly: stack empty and lookahead at end-of-input. Every
//! failure halts immediately with one structured [`ParseError`]; there is no
//! recovery.
//!
//! One automaton instance owns one parse's mutable state. The [`Grammar`] it
//! borrows is read-only and freely shared between concurrent instances.

mod stack;

pub use stack::{ParseStack, ValueStack};

use crate::error::{ActionError, ParseError};
use crate::grammar::Grammar;
use crate::symbol::{SymbolId, SymbolKind};
use hashbrown::HashMap;

/// One token of input: a terminal id plus an optional raw value the engine
/// carries but never interprets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<V> {
    pub id: SymbolId,
    pub value: Option<V>,
}

impl<V> Token<V> {
    #[must_use]
    pub const fn new(id: SymbolId) -> Self {
        Self { id, value: None }
    }

    #[must_use]
    pub const fn with_value(id: SymbolId, value: V) -> Self {
        Self {
            id,
            value: Some(value),
        }
    }
}

/// Demand-driven token supplier.
///
/// Called whenever the lookahead cell is empty. Implementations must keep
/// yielding the end-of-input terminal once the underlying source is
/// exhausted, and must surface lexical failures as ordinary `Err` values —
/// never as partial tokens.
pub trait TokenSource<V> {
    type Error: std::error::Error + Send + Sync + 'static;

    fn next_token(&mut self) -> Result<Token<V>, Self::Error>;
}

/// Receiver for embedded semantic actions.
///
/// The engine guarantees actions fire in strict left-to-right production
/// order, interleaved with terminal matches exactly as they appear in the
/// production, and always passes the raw value of the current lookahead
/// token. Handlers own the semantic stack; the engine never sees it.
pub trait ActionHandler<V> {
    fn apply(&mut self, action: SymbolId, value: Option<&V>) -> Result<(), ActionError>;
}

type Handler<'h, V> = Box<dyn FnMut(Option<&V>) -> Result<(), ActionError> + 'h>;

/// A closure-per-action-id [`ActionHandler`], for grammars wired up at run
/// time rather than through a dedicated handler type.
///
/// ```
/// use flatgram::engine::ActionTable;
///
/// let mut log: Vec<&str> = Vec::new();
/// let actions: ActionTable<'_, ()> = ActionTable::new()
///     .on(7, |_value| {
///         log.push("seen");
///         Ok(())
///     });
/// # drop(actions);
/// assert!(log.is_empty());
/// ```
pub struct ActionTable<'h, V> {
    handlers: HashMap<SymbolId, Handler<'h, V>, ahash::RandomState>,
}

impl<V> Default for ActionTable<'_, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'h, V> ActionTable<'h, V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::with_hasher(ahash::RandomState::new()),
        }
    }

    /// Register the routine for an action id, replacing any previous one.
    #[must_use]
    pub fn on<F>(mut self, action: SymbolId, handler: F) -> Self
    where
        F: FnMut(Option<&V>) -> Result<(), ActionError> + 'h,
    {
        self.handlers.insert(action, Box::new(handler));
        self
    }
}

impl<V> ActionHandler<V> for ActionTable<'_, V> {
    fn apply(&mut self, action: SymbolId, value: Option<&V>) -> Result<(), ActionError> {
        match self.handlers.get_mut(&action) {
            Some(handler) => handler(value),
            None => Err(ActionError::failed(format!(
                "no handler registered for action {action}"
            ))),
        }
    }
}

/// Engine knobs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Parse stack capacity; expansion beyond it aborts the parse.
    pub max_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

/// The parse automaton. Holds one parse's mutable state (stack + lookahead)
/// and borrows the shared grammar.
#[derive(Debug)]
pub struct Automaton<'g, V> {
    grammar: &'g Grammar<'g>,
    stack: ParseStack,
    lookahead: Option<Token<V>>,
}

impl<'g, V> Automaton<'g, V> {
    #[must_use]
    pub fn new(grammar: &'g Grammar<'g>) -> Self {
        Self::with_config(grammar, &EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(grammar: &'g Grammar<'g>, config: &EngineConfig) -> Self {
        Self {
            grammar,
            stack: ParseStack::new(config.max_depth),
            lookahead: None,
        }
    }

    /// Run one parse to acceptance or the first error.
    ///
    /// Resets the automaton's state first, so an instance may be reused for
    /// sequential parses.
    pub fn run<L, A>(&mut self, lexer: &mut L, actions: &mut A) -> Result<(), ParseError>
    where
        L: TokenSource<V>,
        A: ActionHandler<V>,
    {
        let grammar = self.grammar;
        self.stack.clear();
        self.lookahead = None;
        self.stack.push(grammar.start())?;

        loop {
            let token = match self.lookahead.take() {
                Some(token) => token,
                None => lexer
                    .next_token()
                    .map_err(|e| ParseError::Lexical(Box::new(e)))?,
            };

            let Some(top) = self.stack.pop() else {
                if token.id == grammar.end_of_input() {
                    return Ok(());
                }
                return Err(ParseError::TrailingInput {
                    got: grammar.symbol(token.id),
                    expected: grammar.symbol(grammar.end_of_input()),
                });
            };

            match grammar.kind_of(top) {
                SymbolKind::Action => {
                    actions
                        .apply(top, token.value.as_ref())
                        .map_err(|source| ParseError::Action {
                            action: grammar.symbol(top),
                            source,
                        })?;
                    self.lookahead = Some(token);
                }
                SymbolKind::Terminal => {
                    if top != token.id {
                        return Err(ParseError::UnexpectedToken {
                            got: grammar.symbol(token.id),
                            expected: grammar.symbol(top),
                        });
                    }
                    // Consumed: the cell stays empty until the next pull.
                }
                SymbolKind::NonTerminal => {
                    let Some(production) = grammar.lookup(token.id, top) else {
                        return Err(ParseError::NoProduction {
                            got: grammar.symbol(token.id),
                            expected: grammar.symbol(top),
                        });
                    };
                    self.stack.push_production(production)?;
                    self.lookahead = Some(token);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{SymbolSpace, NONE};
    use crate::testing::ScriptedSource;

    // Terminals: END=1, X=2; non-terminal: s=3; action: @mark=4.
    const NAMES: &[&str] = &["(none)", "END", "X", "s", "@mark"];
    const SPACE: SymbolSpace = SymbolSpace::new(3, 4);

    fn grammar(cells: &'static [SymbolId]) -> Grammar<'static> {
        Grammar::new(cells, SPACE, NAMES, 3, 1)
    }

    #[test]
    fn accepts_empty_production_on_end() {
        let g = grammar(&[1, 3, NONE]);
        let mut lexer = ScriptedSource::<()>::new([], 1);
        let mut actions = ActionTable::new();
        assert!(Automaton::new(&g).run(&mut lexer, &mut actions).is_ok());
    }

    #[test]
    fn reports_unexpected_token() {
        // s -> X END, fed X X.
        let g = grammar(&[2, 3, 2, 1, NONE]);
        let mut lexer = ScriptedSource::<()>::new([Token::new(2), Token::new(2)], 1);
        let mut actions = ActionTable::new();
        let err = Automaton::new(&g).run(&mut lexer, &mut actions).unwrap_err();
        assert!(matches!(
            &err,
            ParseError::UnexpectedToken { got, expected }
                if got.name == "X" && expected.name == "END"
        ));
    }

    #[test]
    fn overflow_aborts_expansion() {
        // s -> X s s, growing the stack one symbol per X against a tiny bound.
        let g = grammar(&[2, 3, 2, 3, 3, NONE]);
        let mut lexer = ScriptedSource::<()>::new(vec![Token::new(2); 64], 1);
        let mut actions = ActionTable::new();
        let config = EngineConfig { max_depth: 4 };
        let err = Automaton::with_config(&g, &config)
            .run(&mut lexer, &mut actions)
            .unwrap_err();
        assert!(matches!(err, ParseError::StackOverflow { .. }));
    }

    #[test]
    fn action_sees_lookahead_value() {
        // s -> @mark X
        let g = grammar(&[2, 3, 4, 2, NONE]);
        let mut lexer = ScriptedSource::new([Token::with_value(2, 42u32)], 1);
        let mut seen = None;
        let mut actions = ActionTable::new().on(4, |value: Option<&u32>| {
            seen = value.copied();
            Ok(())
        });
        Automaton::new(&g).run(&mut lexer, &mut actions).unwrap();
        drop(actions);
        assert_eq!(seen, Some(42));
    }

    #[test]
    fn unregistered_action_fails_the_parse() {
        let g = grammar(&[2, 3, 4, 2, NONE]);
        let mut lexer = ScriptedSource::<()>::new([Token::new(2)], 1);
        let mut actions = ActionTable::new();
        let err = Automaton::new(&g).run(&mut lexer, &mut actions).unwrap_err();
        assert!(matches!(
            &err,
            ParseError::Action { action, source: ActionError::Failed(_) }
                if action.name == "@mark"
        ));
    }
}
