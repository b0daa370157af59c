//! String interning for generated text fragments.
//!
//! One [`Interner`] lives for exactly one output file's generation and
//! deduplicates the type names, identifiers and formatted snippets the
//! emitters produce, so repeated renderings of the same type share one
//! owned copy.

use std::collections::HashMap;

/// A lightweight handle to an interned string.
///
/// Comparing two symbols is O(1) integer comparison; equal text interned
/// through the same interner always yields the same symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Raw index, for diagnostics.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

/// Deduplicating owner of generated text fragments.
///
/// The table only grows; entries live until the interner is dropped at
/// the end of the file's generation.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    /// Map from text to symbol for deduplication.
    map: HashMap<String, Symbol>,
    /// Storage for interned text, indexed by symbol.
    strings: Vec<String>,
}

impl Interner {
    /// Creates an empty interner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a string, returning its symbol.
    ///
    /// If equal text was already interned, the existing symbol is
    /// returned and no allocation happens.
    pub fn intern(&mut self, text: &str) -> Symbol {
        if let Some(&sym) = self.map.get(text) {
            return sym;
        }

        let sym = Symbol(self.strings.len() as u32);
        self.strings.push(text.to_owned());
        self.map.insert(text.to_owned(), sym);
        sym
    }

    /// Interns an owned string, avoiding a copy when it is new.
    pub fn intern_owned(&mut self, text: String) -> Symbol {
        if let Some(&sym) = self.map.get(&text) {
            return sym;
        }

        let sym = Symbol(self.strings.len() as u32);
        self.strings.push(text.clone());
        self.map.insert(text, sym);
        sym
    }

    /// Resolves a symbol back to its text.
    ///
    /// # Panics
    /// Panics if the symbol was not created by this interner.
    #[inline]
    #[must_use]
    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.strings[sym.0 as usize]
    }

    /// Number of distinct interned strings.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the interner is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
