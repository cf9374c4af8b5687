//! Lookup operands accepted by the "either direction" queries.
//!
//! `index_of`, `key_of` and friends take anything convertible into a
//! [`SymbolRef`], so callers that do not know whether they hold a key or a
//! code can pass it through unchanged:
//!
//!   table.index_of("vertical")  -> 1
//!   table.index_of(1)           -> 1

use std::fmt;

/// Integer code paired with a symbolic key.
pub type Code = i64;

/// Either half of a table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolRef<'a> {
    Key(&'a str),
    Code(Code),
}

impl<'a> From<&'a str> for SymbolRef<'a> {
    fn from(key: &'a str) -> Self {
        SymbolRef::Key(key)
    }
}

impl<'a> From<&'a String> for SymbolRef<'a> {
    fn from(key: &'a String) -> Self {
        SymbolRef::Key(key.as_str())
    }
}

impl From<Code> for SymbolRef<'_> {
    fn from(code: Code) -> Self {
        SymbolRef::Code(code)
    }
}

impl fmt::Display for SymbolRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolRef::Key(key) => write!(f, "{key:?}"),
            SymbolRef::Code(code) => write!(f, "{code}"),
        }
    }
}
