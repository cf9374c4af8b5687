//! Errors raised while building or querying symbol tables.

use thiserror::Error;

use crate::lookup::Code;

/// Every failure a table can report. All of them are raised at the point of
/// the offending call; nothing is retried and no partial table is ever left
/// behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Construction was attempted with zero entries.
    #[error("symbol tables cannot be empty")]
    Empty,
    /// A key is absent from the table, or is not acceptable as a key.
    #[error("invalid symbol key: {0:?}")]
    InvalidKey(String),
    /// A code is absent from the table.
    #[error("invalid symbol code: {0}")]
    InvalidIndex(Code),
    /// Any attempt to add, remove or reassign an entry.
    #[error("symbol table does not allow modification of {0}")]
    Immutable(String),
    /// Two keys of a mapping share one code.
    #[error("symbol code {0} is assigned to more than one key")]
    DuplicateCode(Code),
    /// The table config forbids gaps and the mapping has one.
    #[error("symbol codes must be contiguous: expected {expected}, found {found}")]
    GapInCodes { expected: Code, found: Code },
}
