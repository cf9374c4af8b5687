//! Shared storage behind [`SymbolTable`](crate::SymbolTable) and
//! [`EnumDict`](crate::EnumDict): entries sorted by code plus hash indexes
//! in both directions.

use hashbrown::{HashMap, HashSet};

use crate::config::TableConfig;
use crate::error::TableError;
use crate::lookup::{Code, SymbolRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    pub key: String,
    pub code: Code,
    pub doc: Option<String>,
}

impl Entry {
    pub fn new(key: impl Into<String>, code: Code, doc: Option<String>) -> Self {
        Self {
            key: key.into(),
            code,
            doc,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EntryIndex {
    /// Ascending by code.
    entries: Vec<Entry>,
    by_key: HashMap<String, usize>,
    by_code: HashMap<Code, usize>,
}

impl EntryIndex {
    /// Validate and index `raw`. Keys are checked in input order so the first
    /// repeated key is the one reported.
    pub fn build(mut raw: Vec<Entry>, config: &TableConfig) -> Result<Self, TableError> {
        if raw.is_empty() {
            return Err(TableError::Empty);
        }
        {
            let mut seen: HashSet<&str> = HashSet::with_capacity(raw.len());
            for entry in &raw {
                config.key_policy.check(&entry.key)?;
                if !seen.insert(entry.key.as_str()) {
                    return Err(TableError::InvalidKey(entry.key.clone()));
                }
            }
        }

        raw.sort_by_key(|e| e.code);
        for pair in raw.windows(2) {
            let (prev, next) = (pair[0].code, pair[1].code);
            if prev == next {
                return Err(TableError::DuplicateCode(next));
            }
            if !config.allow_code_gaps && next != prev + 1 {
                return Err(TableError::GapInCodes {
                    expected: prev + 1,
                    found: next,
                });
            }
        }
        Ok(Self::from_sorted(raw))
    }

    /// Index entries already known to be non-empty, unique and ascending.
    pub fn from_sorted(entries: Vec<Entry>) -> Self {
        debug_assert!(!entries.is_empty());
        debug_assert!(entries.windows(2).all(|w| w[0].code < w[1].code));
        let mut by_key = HashMap::with_capacity(entries.len());
        let mut by_code = HashMap::with_capacity(entries.len());
        for (pos, entry) in entries.iter().enumerate() {
            by_key.insert(entry.key.clone(), pos);
            by_code.insert(entry.code, pos);
        }
        Self {
            entries,
            by_key,
            by_code,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[inline]
    pub fn entry(&self, pos: usize) -> &Entry {
        &self.entries[pos]
    }

    #[inline]
    pub fn position_of_key(&self, key: &str) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    #[inline]
    pub fn position_of_code(&self, code: Code) -> Option<usize> {
        self.by_code.get(&code).copied()
    }

    /// Resolve either kind of reference to an entry position, reporting the
    /// matching error kind when absent.
    pub fn resolve(&self, target: SymbolRef<'_>) -> Result<usize, TableError> {
        match target {
            SymbolRef::Key(key) => self
                .position_of_key(key)
                .ok_or_else(|| TableError::InvalidKey(key.to_string())),
            SymbolRef::Code(code) => self
                .position_of_code(code)
                .ok_or(TableError::InvalidIndex(code)),
        }
    }

    pub fn has_docs(&self) -> bool {
        self.entries.iter().any(|e| e.doc.is_some())
    }
}

impl PartialEq for EntryIndex {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for EntryIndex {}
