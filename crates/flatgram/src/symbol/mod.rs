//! Symbol identifiers and the range-based symbol classifier.
//!
//! Every grammar symbol — terminal, non-terminal, or action — is a bare
//! numeric id. The three categories occupy disjoint, contiguous, ascending
//! ranges, so classifying an id takes two comparisons and no allocation.

use compact_str::CompactString;

/// Numeric identifier for a grammar symbol.
pub type SymbolId = u16;

/// Reserved sentinel id: never a real symbol, terminates packed table
/// entries, and never compares equal to a lexed terminal.
pub const NONE: SymbolId = 0;

/// The category a symbol id falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Produced by the lexer and matched against input.
    Terminal,
    /// Expanded through the grammar table before matching.
    NonTerminal,
    /// Dispatched to a grammar-supplied action routine.
    Action,
}

/// The two boundaries that partition the id space.
///
/// Ids in `[0, first_non_terminal)` are terminals (with [`NONE`] reserved),
/// ids in `[first_non_terminal, first_action)` are non-terminals, and ids in
/// `[first_action, ..]` are actions. Classification is total: any id lands
/// in exactly one range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolSpace {
    first_non_terminal: SymbolId,
    first_action: SymbolId,
}

impl SymbolSpace {
    /// Create a symbol space from its two range boundaries.
    ///
    /// # Panics
    ///
    /// Panics if the boundaries are not ascending or leave no room for
    /// terminals besides the [`NONE`] sentinel.
    #[must_use]
    pub const fn new(first_non_terminal: SymbolId, first_action: SymbolId) -> Self {
        assert!(first_non_terminal > NONE + 1, "terminal range is empty");
        assert!(
            first_action >= first_non_terminal,
            "action range precedes non-terminal range"
        );
        Self {
            first_non_terminal,
            first_action,
        }
    }

    /// Classify an id by range.
    #[inline]
    #[must_use]
    pub const fn kind_of(self, id: SymbolId) -> SymbolKind {
        if id < self.first_non_terminal {
            SymbolKind::Terminal
        } else if id < self.first_action {
            SymbolKind::NonTerminal
        } else {
            SymbolKind::Action
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_terminal(self, id: SymbolId) -> bool {
        id < self.first_non_terminal
    }

    #[inline]
    #[must_use]
    pub const fn is_non_terminal(self, id: SymbolId) -> bool {
        self.first_non_terminal <= id && id < self.first_action
    }

    #[inline]
    #[must_use]
    pub const fn is_action(self, id: SymbolId) -> bool {
        id >= self.first_action
    }

    /// First non-terminal id (upper bound of the terminal range).
    #[must_use]
    pub const fn first_non_terminal(self) -> SymbolId {
        self.first_non_terminal
    }

    /// First action id (upper bound of the non-terminal range).
    #[must_use]
    pub const fn first_action(self) -> SymbolId {
        self.first_action
    }
}

/// A symbol id paired with its display name, as carried in error values.
///
/// Errors are structured (the id is preserved for programmatic handling)
/// but render as the human-readable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRef {
    pub id: SymbolId,
    pub name: CompactString,
}

impl SymbolRef {
    #[must_use]
    pub fn new(id: SymbolId, name: impl Into<CompactString>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl std::fmt::Display for SymbolRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
