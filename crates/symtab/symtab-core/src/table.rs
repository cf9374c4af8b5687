//! SymbolTable: an immutable, bidirectional, order-preserving mapping between
//! symbolic keys and integer codes.
//!
//! A table is built once, either from an ordered list of names (codes
//! `0..N-1` in list order) or from an existing key -> code mapping (codes kept
//! as given, gaps included, iteration by ascending code). Afterwards it can
//! only be queried. `SymbolTable` is a cheap handle: clones share the same
//! underlying table and compare as the same table identity.
//!
//!   let orientation = SymbolTable::from_names("Orientation", ["horizontal", "vertical"])?;
//!   orientation.index_of("vertical")?   -> 1
//!   orientation.key_of(0)?              -> "horizontal"

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};

use crate::config::TableConfig;
use crate::error::TableError;
use crate::index::{Entry, EntryIndex};
use crate::lookup::{Code, SymbolRef};
use crate::value::{Operand, SymbolValue};

/// One item of an ordered name list: a key with an optional description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolDef {
    pub key: String,
    pub doc: Option<String>,
}

impl SymbolDef {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            doc: None,
        }
    }

    pub fn documented(key: impl Into<String>, doc: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            doc: Some(doc.into()),
        }
    }
}

impl From<&str> for SymbolDef {
    fn from(key: &str) -> Self {
        SymbolDef::new(key)
    }
}

impl From<String> for SymbolDef {
    fn from(key: String) -> Self {
        SymbolDef::new(key)
    }
}

impl From<(&str, &str)> for SymbolDef {
    fn from((key, doc): (&str, &str)) -> Self {
        SymbolDef::documented(key, doc)
    }
}

impl From<(String, String)> for SymbolDef {
    fn from((key, doc): (String, String)) -> Self {
        SymbolDef::documented(key, doc)
    }
}

pub(crate) struct TableInner {
    pub name: Option<String>,
    pub index: EntryIndex,
}

#[derive(Clone)]
pub struct SymbolTable {
    inner: Arc<TableInner>,
}

impl SymbolTable {
    /// Build from an ordered list of names, assigning codes `0..N-1`.
    pub fn from_names<I, T>(name: impl Into<String>, names: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = T>,
        T: Into<SymbolDef>,
    {
        Self::from_names_with(name, names, &TableConfig::default())
    }

    pub fn from_names_with<I, T>(
        name: impl Into<String>,
        names: I,
        config: &TableConfig,
    ) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = T>,
        T: Into<SymbolDef>,
    {
        let entries = names
            .into_iter()
            .map(Into::<SymbolDef>::into)
            .zip(0..)
            .map(|(def, code)| Entry::new(def.key, code, def.doc))
            .collect();
        Self::from_entries(Some(name.into()), entries, config)
    }

    /// Build from an existing key -> code mapping. Codes are kept as given;
    /// iteration follows ascending code.
    pub fn from_mapping<I, K>(name: impl Into<String>, mapping: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (K, Code)>,
        K: Into<String>,
    {
        Self::from_mapping_with(name, mapping, &TableConfig::default())
    }

    pub fn from_mapping_with<I, K>(
        name: impl Into<String>,
        mapping: I,
        config: &TableConfig,
    ) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (K, Code)>,
        K: Into<String>,
    {
        let entries = mapping
            .into_iter()
            .map(|(key, code)| Entry::new(key, code, None))
            .collect();
        Self::from_entries(Some(name.into()), entries, config)
    }

    pub(crate) fn from_entries(
        name: Option<String>,
        entries: Vec<Entry>,
        config: &TableConfig,
    ) -> Result<Self, TableError> {
        let index = EntryIndex::build(entries, config)?;
        debug!(
            "symbol table {:?}: built {} entries (codes {}..={})",
            name.as_deref().unwrap_or("<unnamed>"),
            index.len(),
            index.entry(0).code,
            index.entry(index.len() - 1).code,
        );
        Ok(Self::from_index(name, index))
    }

    pub(crate) fn from_index(name: Option<String>, index: EntryIndex) -> Self {
        Self {
            inner: Arc::new(TableInner { name, index }),
        }
    }

    /// Optional label given at construction.
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.index.len()
    }

    /// Always false: empty tables cannot be constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Code for a key. A code that is already present is returned unchanged,
    /// so callers holding either form always end up with a code.
    pub fn index_of<'r>(&self, target: impl Into<SymbolRef<'r>>) -> Result<Code, TableError> {
        let pos = self.inner.index.resolve(target.into())?;
        Ok(self.inner.index.entry(pos).code)
    }

    /// Key for a code. A key that is already present is returned unchanged.
    pub fn key_of<'r>(&self, target: impl Into<SymbolRef<'r>>) -> Result<&str, TableError> {
        let pos = self.inner.index.resolve(target.into())?;
        Ok(self.inner.index.entry(pos).key.as_str())
    }

    /// Canonical accessor by key.
    pub fn get(&self, key: &str) -> Option<SymbolValue> {
        self.inner
            .index
            .position_of_key(key)
            .map(|pos| self.value_at(pos))
    }

    /// Accessor sugar over [`get`](Self::get): `table.attr("red")` plays the
    /// part of a `table.red` member, failing with `InvalidKey` when absent.
    pub fn attr(&self, key: &str) -> Result<SymbolValue, TableError> {
        self.get(key)
            .ok_or_else(|| TableError::InvalidKey(key.to_string()))
    }

    /// Value at an integer code.
    pub fn at(&self, code: Code) -> Result<SymbolValue, TableError> {
        self.inner
            .index
            .position_of_code(code)
            .map(|pos| self.value_at(pos))
            .ok_or(TableError::InvalidIndex(code))
    }

    /// Value for either a key or a code.
    pub fn resolve<'r>(&self, target: impl Into<SymbolRef<'r>>) -> Result<SymbolValue, TableError> {
        let pos = self.inner.index.resolve(target.into())?;
        Ok(self.value_at(pos))
    }

    /// Description attached to an entry, if any.
    pub fn doc_of<'r>(&self, target: impl Into<SymbolRef<'r>>) -> Result<Option<&str>, TableError> {
        let pos = self.inner.index.resolve(target.into())?;
        Ok(self.inner.index.entry(pos).doc.as_deref())
    }

    /// Every documented entry as `(code, doc)`, ascending by code.
    pub fn docs(&self) -> impl Iterator<Item = (Code, &str)> {
        self.inner
            .index
            .entries()
            .iter()
            .filter_map(|e| e.doc.as_deref().map(|doc| (e.code, doc)))
    }

    /// All values, ascending by code.
    pub fn values(&self) -> Vec<SymbolValue> {
        self.iter().collect()
    }

    /// All keys, ascending by code.
    pub fn keys(&self) -> Vec<&str> {
        self.inner
            .index
            .entries()
            .iter()
            .map(|e| e.key.as_str())
            .collect()
    }

    /// All codes, ascending.
    pub fn codes(&self) -> Vec<Code> {
        self.inner.index.entries().iter().map(|e| e.code).collect()
    }

    pub fn iter(&self) -> Iter {
        Iter {
            inner: Arc::clone(&self.inner),
            front: 0,
            back: self.len(),
        }
    }

    /// Membership test for a key, a code, or a value of this table. Values
    /// from another table are never members.
    pub fn contains<'a>(&self, candidate: impl Into<Operand<'a>>) -> bool {
        match candidate.into() {
            Operand::Key(key) => self.inner.index.position_of_key(key).is_some(),
            Operand::Code(code) => self.inner.index.position_of_code(code).is_some(),
            Operand::Symbol(value) => value.belongs_to(self),
        }
    }

    /// True when both handles refer to the same table.
    #[inline]
    pub fn same_table(&self, other: &SymbolTable) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Tables are write-once; this always fails with `Immutable`.
    pub fn try_insert(&self, key: &str, code: Code) -> Result<(), TableError> {
        self.reject_mutation(format!("entry {key:?} = {code}"))
    }

    /// Tables are write-once; this always fails with `Immutable`.
    pub fn try_remove<'r>(&self, target: impl Into<SymbolRef<'r>>) -> Result<(), TableError> {
        self.reject_mutation(format!("entry {}", target.into()))
    }

    /// Tables are write-once; this always fails with `Immutable`.
    pub fn try_assign<'r>(
        &self,
        target: impl Into<SymbolRef<'r>>,
        replacement: &str,
    ) -> Result<(), TableError> {
        self.reject_mutation(format!("entry {} -> {replacement:?}", target.into()))
    }

    fn reject_mutation(&self, what: String) -> Result<(), TableError> {
        warn!(
            "symbol table {:?}: rejected modification of {}",
            self.name().unwrap_or("<unnamed>"),
            what
        );
        Err(TableError::Immutable(what))
    }

    fn value_at(&self, pos: usize) -> SymbolValue {
        SymbolValue::new(Arc::clone(&self.inner), pos)
    }

    pub(crate) fn index(&self) -> &EntryIndex {
        &self.inner.index
    }

    pub(crate) fn inner(&self) -> &Arc<TableInner> {
        &self.inner
    }

    pub(crate) fn from_shared(inner: Arc<TableInner>) -> Self {
        Self { inner }
    }
}

/// Iterator over the values of a table, ascending by code.
pub struct Iter {
    inner: Arc<TableInner>,
    front: usize,
    back: usize,
}

impl Iterator for Iter {
    type Item = SymbolValue;

    fn next(&mut self) -> Option<SymbolValue> {
        if self.front == self.back {
            return None;
        }
        let pos = self.front;
        self.front += 1;
        Some(SymbolValue::new(Arc::clone(&self.inner), pos))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Iter {
    fn next_back(&mut self) -> Option<SymbolValue> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(SymbolValue::new(Arc::clone(&self.inner), self.back))
    }
}

impl ExactSizeIterator for Iter {}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = SymbolValue;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

/// Structural equality: same name and same entries (docs included).
/// Values from two equal-but-distinct tables still never compare equal.
impl PartialEq for SymbolTable {
    fn eq(&self, other: &Self) -> bool {
        self.same_table(other)
            || (self.inner.name == other.inner.name && self.inner.index == other.inner.index)
    }
}

impl Eq for SymbolTable {}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("SymbolTable"))?;
        f.debug_list().entries(self.keys()).finish()
    }
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolTable")
            .field("name", &self.inner.name)
            .field("values", &self.values())
            .finish()
    }
}
