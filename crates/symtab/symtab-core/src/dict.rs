//! EnumDict: a plain bidirectional key <-> code dictionary.
//!
//! Lighter than [`SymbolTable`]: no table name, no docs, no value handles.
//! Retrieval works in either direction and the result is always a plain
//! `&str` or [`Code`].

use std::fmt;

use crate::config::TableConfig;
use crate::error::TableError;
use crate::index::{Entry, EntryIndex};
use crate::lookup::{Code, SymbolRef};
use crate::table::SymbolTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDict {
    index: EntryIndex,
}

impl EnumDict {
    /// Codes `0..N-1` in list order.
    pub fn from_names<I, K>(names: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let entries = names
            .into_iter()
            .zip(0..)
            .map(|(key, code)| Entry::new(key, code, None))
            .collect();
        Self::from_entries(entries)
    }

    /// From a key -> code mapping.
    pub fn from_mapping<I, K>(mapping: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (K, Code)>,
        K: Into<String>,
    {
        let entries = mapping
            .into_iter()
            .map(|(key, code)| Entry::new(key, code, None))
            .collect();
        Self::from_entries(entries)
    }

    /// From a code -> key mapping.
    pub fn from_code_mapping<I, K>(mapping: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (Code, K)>,
        K: Into<String>,
    {
        Self::from_mapping(mapping.into_iter().map(|(code, key)| (key, code)))
    }

    fn from_entries(entries: Vec<Entry>) -> Result<Self, TableError> {
        let index = EntryIndex::build(entries, &TableConfig::default())?;
        Ok(Self { index })
    }

    /// Code for a key; a present code is returned unchanged.
    pub fn value<'r>(&self, target: impl Into<SymbolRef<'r>>) -> Result<Code, TableError> {
        let pos = self.index.resolve(target.into())?;
        Ok(self.index.entry(pos).code)
    }

    /// Key for a code; a present key is returned unchanged.
    pub fn key<'r>(&self, target: impl Into<SymbolRef<'r>>) -> Result<&str, TableError> {
        let pos = self.index.resolve(target.into())?;
        Ok(self.index.entry(pos).key.as_str())
    }

    pub fn get_code(&self, key: &str) -> Option<Code> {
        self.index
            .position_of_key(key)
            .map(|pos| self.index.entry(pos).code)
    }

    pub fn get_key(&self, code: Code) -> Option<&str> {
        self.index
            .position_of_code(code)
            .map(|pos| self.index.entry(pos).key.as_str())
    }

    /// Codes in ascending order.
    pub fn values(&self) -> Vec<Code> {
        self.index.entries().iter().map(|e| e.code).collect()
    }

    /// Keys ordered by their code.
    pub fn keys(&self) -> Vec<&str> {
        self.index.entries().iter().map(|e| e.key.as_str()).collect()
    }

    /// `(key, code)` pairs ordered by code.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Code)> {
        self.index.entries().iter().map(|e| (e.key.as_str(), e.code))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.position_of_key(key).is_some()
    }

    pub fn contains_code(&self, code: Code) -> bool {
        self.index.position_of_code(code).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Always false: empty dictionaries cannot be constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl From<&SymbolTable> for EnumDict {
    fn from(table: &SymbolTable) -> Self {
        let entries = table
            .index()
            .entries()
            .iter()
            .map(|e| Entry::new(e.key.clone(), e.code, None))
            .collect();
        Self {
            index: EntryIndex::from_sorted(entries),
        }
    }
}

impl fmt::Display for EnumDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EnumDict({")?;
        for (i, (key, code)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{key}': {code}")?;
        }
        f.write_str("})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekdays() -> EnumDict {
        EnumDict::from_names(["mon", "tue", "wed", "thu", "fri", "sat", "sun"]).unwrap()
    }

    #[test]
    fn retrieval_works_in_both_directions() {
        let days = weekdays();
        assert_eq!(days.get_key(4), Some("fri"));
        assert_eq!(days.get_code("fri"), Some(4));
        assert_eq!(days.get_key(7), None);
        assert_eq!(days.get_code("funday"), None);
    }

    #[test]
    fn value_and_key_accept_either_form() {
        let days = weekdays();
        assert_eq!(days.value(3).unwrap(), 3);
        assert_eq!(days.value("thu").unwrap(), 3);
        assert_eq!(days.key(2).unwrap(), "wed");
        assert_eq!(days.key("wed").unwrap(), "wed");
        assert_eq!(days.value(10), Err(TableError::InvalidIndex(10)));
        assert_eq!(
            days.key("hectares"),
            Err(TableError::InvalidKey("hectares".to_string()))
        );
    }

    #[test]
    fn mapping_in_either_direction() {
        let numbers = EnumDict::from_mapping([
            ("thousand", 1000),
            ("one", 1),
            ("hundred", 100),
            ("two", 2),
        ])
        .unwrap();
        assert_eq!(numbers.values(), vec![1, 2, 100, 1000]);
        assert_eq!(numbers.keys(), vec!["one", "two", "hundred", "thousand"]);

        let reversed = EnumDict::from_code_mapping([(2, "two"), (1, "one")]).unwrap();
        assert_eq!(reversed.keys(), vec!["one", "two"]);
        assert!(reversed.contains_key("two"));
        assert!(reversed.contains_code(1));
        assert!(!reversed.contains_code(3));
    }

    #[test]
    fn empty_is_rejected() {
        let none: Vec<String> = Vec::new();
        assert_eq!(EnumDict::from_names(none).unwrap_err(), TableError::Empty);
    }

    #[test]
    fn built_from_table() {
        let table = SymbolTable::from_mapping("Levels", [("INFO", 20), ("DEBUG", 10)]).unwrap();
        let dict = EnumDict::from(&table);
        assert_eq!(dict.keys(), vec!["DEBUG", "INFO"]);
        assert_eq!(dict, EnumDict::from_mapping([("DEBUG", 10), ("INFO", 20)]).unwrap());
    }

    #[test]
    fn display_orders_by_code() {
        let dict = EnumDict::from_names(["red", "blue"]).unwrap();
        assert_eq!(dict.to_string(), "EnumDict({'red': 0, 'blue': 1})");
        assert_eq!(dict.len(), 2);
    }
}
