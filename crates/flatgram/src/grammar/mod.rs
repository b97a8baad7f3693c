//! The grammar contract consumed by the automaton: packed table, symbol
//! space boundaries, display names, and the designated start and
//! end-of-input symbols, bundled as one shareable read-only value.

use crate::symbol::{SymbolId, SymbolKind, SymbolRef, SymbolSpace};
use crate::table::{Entries, GrammarTable, TableError};
use thiserror::Error;

/// A complete, immutable grammar. Constructed once (the table itself comes
/// from an external grammar compiler) and shared read-only across any number
/// of concurrent parses.
#[derive(Debug, Clone, Copy)]
pub struct Grammar<'g> {
    table: GrammarTable<'g>,
    space: SymbolSpace,
    names: &'g [&'g str],
    start: SymbolId,
    end_of_input: SymbolId,
}

/// Defects reported by [`Grammar::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(miette::Diagnostic))]
pub enum GrammarError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("start symbol {0} is not a non-terminal")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::grammar::bad_start)))]
    StartNotNonTerminal(SymbolId),

    #[error("end-of-input symbol {0} is not a terminal")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::grammar::bad_end)))]
    EndNotTerminal(SymbolId),

    #[error("symbol {0} has no display name")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::grammar::unnamed)))]
    Unnamed(SymbolId),
}

impl<'g> Grammar<'g> {
    /// Bundle a packed table with its symbol metadata.
    ///
    /// `names` is indexed by symbol id and used only for diagnostics; ids
    /// outside it render as `(unknown)`.
    #[must_use]
    pub const fn new(
        cells: &'g [SymbolId],
        space: SymbolSpace,
        names: &'g [&'g str],
        start: SymbolId,
        end_of_input: SymbolId,
    ) -> Self {
        Self {
            table: GrammarTable::new(cells),
            space,
            names,
            start,
            end_of_input,
        }
    }

    #[must_use]
    pub const fn table(&self) -> GrammarTable<'g> {
        self.table
    }

    #[must_use]
    pub const fn space(&self) -> SymbolSpace {
        self.space
    }

    #[must_use]
    pub const fn start(&self) -> SymbolId {
        self.start
    }

    #[must_use]
    pub const fn end_of_input(&self) -> SymbolId {
        self.end_of_input
    }

    /// Classify a symbol id.
    #[inline]
    #[must_use]
    pub const fn kind_of(&self, id: SymbolId) -> SymbolKind {
        self.space.kind_of(id)
    }

    /// Resolve a production for `(lookahead terminal, pending non-terminal)`.
    #[inline]
    #[must_use]
    pub fn lookup(&self, terminal: SymbolId, non_terminal: SymbolId) -> Option<&'g [SymbolId]> {
        self.table.lookup(terminal, non_terminal)
    }

    /// Iterate the table's entries in table order.
    #[must_use]
    pub fn entries(&self) -> Entries<'g> {
        self.table.entries()
    }

    /// Display name for a symbol id.
    #[must_use]
    pub fn name(&self, id: SymbolId) -> &'g str {
        self.names.get(id as usize).copied().unwrap_or("(unknown)")
    }

    /// A symbol id paired with its display name, for error values.
    #[must_use]
    pub fn symbol(&self, id: SymbolId) -> SymbolRef {
        SymbolRef::new(id, self.name(id))
    }

    /// One-time load check: table structure and sortedness, start/end symbol
    /// categories, and a display name for every symbol the table mentions.
    pub fn validate(&self) -> Result<(), GrammarError> {
        self.table.validate(self.space)?;
        if !self.space.is_non_terminal(self.start) {
            return Err(GrammarError::StartNotNonTerminal(self.start));
        }
        if !self.space.is_terminal(self.end_of_input) {
            return Err(GrammarError::EndNotTerminal(self.end_of_input));
        }
        for entry in self.entries() {
            for &id in [entry.terminal, entry.non_terminal]
                .iter()
                .chain(entry.production)
            {
                if self.names.get(id as usize).is_none() {
                    return Err(GrammarError::Unnamed(id));
                }
            }
        }
        Ok(())
    }
}
