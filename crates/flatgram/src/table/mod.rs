//! Packed grammar tables and the production matcher.
//!
//! A grammar table is one flat array of symbol ids with no auxiliary index.
//! Each entry is laid out as
//!
//! ```text
//! [terminal, non_terminal, p1, p2, .., pk, NONE]
//! ```
//!
//! — the lookup key, the right-hand-side production (which may interleave
//! action ids), and the terminating sentinel. Entries are sorted strictly
//! ascending by `(terminal, non_terminal)`. Because entries carry no length
//! header, the only way to find an entry boundary is the sentinel that ends
//! its predecessor; [`GrammarTable::lookup`] runs a binary search that walks
//! each probe back to the nearest boundary before comparing keys. The search
//! does a few extra comparisons per probe in exchange for zero per-entry
//! storage overhead.
//!
//! Lookups are bounds-checked and memory-safe on any input, but only return
//! *correct* results for well-formed tables. Call [`GrammarTable::validate`]
//! once at load time when the table comes from an untrusted source.

use crate::symbol::{SymbolId, SymbolSpace, NONE};
use thiserror::Error;

/// A read-only packed grammar table.
#[derive(Debug, Clone, Copy)]
pub struct GrammarTable<'t> {
    cells: &'t [SymbolId],
}

/// One decoded table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'t> {
    pub terminal: SymbolId,
    pub non_terminal: SymbolId,
    /// Right-hand side, sentinel excluded. May be empty (ε-production).
    pub production: &'t [SymbolId],
}

/// Structural defects detected by [`GrammarTable::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(miette::Diagnostic))]
pub enum TableError {
    #[error("entry {index} is truncated: no terminating sentinel")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::table::truncated)))]
    Truncated { index: usize },

    #[error("entry {index}: id {id} is not a terminal")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::table::bad_terminal)))]
    NotATerminal { index: usize, id: SymbolId },

    #[error("entry {index}: id {id} is not a non-terminal")]
    #[cfg_attr(
        feature = "diagnostics",
        diagnostic(code(flatgram::table::bad_non_terminal))
    )]
    NotANonTerminal { index: usize, id: SymbolId },

    #[error("entry {index}: key ({terminal}, {non_terminal}) is not strictly ascending")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(flatgram::table::unsorted)))]
    Unsorted {
        index: usize,
        terminal: SymbolId,
        non_terminal: SymbolId,
    },
}

impl<'t> GrammarTable<'t> {
    /// Wrap a packed cell array. No validation is performed here; see
    /// [`GrammarTable::validate`].
    #[must_use]
    pub const fn new(cells: &'t [SymbolId]) -> Self {
        Self { cells }
    }

    /// The raw cell array.
    #[must_use]
    pub const fn cells(&self) -> &'t [SymbolId] {
        self.cells
    }

    /// Resolve `(lookahead terminal, pending non-terminal)` to a production.
    ///
    /// Returns the right-hand-side slice (sentinel excluded, possibly empty)
    /// or `None` when the table has no entry for the pair — which the
    /// automaton reports as a syntax error, not a defect.
    #[must_use]
    pub fn lookup(&self, terminal: SymbolId, non_terminal: SymbolId) -> Option<&'t [SymbolId]> {
        let cells = self.cells;
        if cells.len() < 2 {
            return None;
        }

        let mut low: isize = 0;
        let mut high: isize = cells.len() as isize - 1;

        while low <= high {
            let mut mid = (low + high) >> 1;
            // The midpoint may land inside a production; retreat to the
            // nearest entry boundary, i.e. a cell whose predecessor is the
            // sentinel. `low` is always a boundary, so the walk stops there.
            while mid > low && cells[mid as usize - 1] != NONE {
                mid -= 1;
            }
            let t = cells[mid as usize];
            let Some(&nt) = cells.get(mid as usize + 1) else {
                // Only reachable on a malformed table.
                return None;
            };
            if t < terminal || (t == terminal && nt < non_terminal) {
                // Discard this entry and everything before it: skip the two
                // key cells, then advance to the next boundary.
                low = mid + 2;
                while (low as usize) < cells.len() && cells[low as usize - 1] != NONE {
                    low += 1;
                }
            } else {
                // Discard this entry and everything after it.
                high = mid - 2;
                while high > 0 && cells[high as usize - 1] != NONE {
                    high -= 1;
                }
            }
        }

        let at = low as usize;
        if at + 1 < cells.len() && cells[at] == terminal && cells[at + 1] == non_terminal {
            let body = &cells[at + 2..];
            let end = body.iter().position(|&s| s == NONE)?;
            Some(&body[..end])
        } else {
            None
        }
    }

    /// Iterate entries in table order.
    #[must_use]
    pub fn entries(&self) -> Entries<'t> {
        Entries {
            cells: self.cells,
            at: 0,
        }
    }

    /// Check structural well-formedness once at load time: every entry has a
    /// terminal-range key, a non-terminal-range key, and a sentinel, and the
    /// composite keys ascend strictly.
    pub fn validate(&self, space: SymbolSpace) -> Result<(), TableError> {
        let cells = self.cells;
        let mut at = 0;
        let mut index = 0;
        let mut prev: Option<(SymbolId, SymbolId)> = None;

        while at < cells.len() {
            if at + 2 > cells.len() {
                return Err(TableError::Truncated { index });
            }
            let terminal = cells[at];
            let non_terminal = cells[at + 1];
            if terminal == NONE || !space.is_terminal(terminal) {
                return Err(TableError::NotATerminal {
                    index,
                    id: terminal,
                });
            }
            if !space.is_non_terminal(non_terminal) {
                return Err(TableError::NotANonTerminal {
                    index,
                    id: non_terminal,
                });
            }
            if let Some(p) = prev {
                if p >= (terminal, non_terminal) {
                    return Err(TableError::Unsorted {
                        index,
                        terminal,
                        non_terminal,
                    });
                }
            }
            prev = Some((terminal, non_terminal));

            let body = &cells[at + 2..];
            let Some(len) = body.iter().position(|&s| s == NONE) else {
                return Err(TableError::Truncated { index });
            };
            at += 2 + len + 1;
            index += 1;
        }
        Ok(())
    }
}

/// Iterator over table entries, produced by [`GrammarTable::entries`].
///
/// Assumes a well-formed table; on a truncated final entry the remaining
/// cells are yielded as that entry's production.
#[derive(Debug, Clone)]
pub struct Entries<'t> {
    cells: &'t [SymbolId],
    at: usize,
}

impl<'t> Iterator for Entries<'t> {
    type Item = Entry<'t>;

    fn next(&mut self) -> Option<Entry<'t>> {
        if self.at + 2 > self.cells.len() {
            return None;
        }
        let terminal = self.cells[self.at];
        let non_terminal = self.cells[self.at + 1];
        let body = &self.cells[self.at + 2..];
        let len = body.iter().position(|&s| s == NONE).unwrap_or(body.len());
        self.at += 2 + len + 1;
        Some(Entry {
            terminal,
            non_terminal,
            production: &body[..len],
        })
    }
}
