//! SymbolValue: one entry of a table, handed out by lookups and iteration.
//!
//! Comparison policy, in one place ([`SymbolValue::compare`]):
//! - another value of the *same* table: by code
//! - a raw string: by key (lexicographic)
//! - a raw integer: by code
//! - a value of a different table: unequal and unordered, never an error
//!
//! Every `PartialEq` / `PartialOrd` impl below delegates to `compare`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::lookup::Code;
use crate::table::{SymbolTable, TableInner};

/// Right-hand side of a comparison or membership test.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Symbol(&'a SymbolValue),
    Key(&'a str),
    Code(Code),
}

impl<'a> From<&'a SymbolValue> for Operand<'a> {
    fn from(value: &'a SymbolValue) -> Self {
        Operand::Symbol(value)
    }
}

impl<'a> From<&'a str> for Operand<'a> {
    fn from(key: &'a str) -> Self {
        Operand::Key(key)
    }
}

impl<'a> From<&'a String> for Operand<'a> {
    fn from(key: &'a String) -> Self {
        Operand::Key(key.as_str())
    }
}

impl From<Code> for Operand<'_> {
    fn from(code: Code) -> Self {
        Operand::Code(code)
    }
}

#[derive(Clone)]
pub struct SymbolValue {
    table: Arc<TableInner>,
    pos: usize,
}

impl SymbolValue {
    pub(crate) fn new(table: Arc<TableInner>, pos: usize) -> Self {
        Self { table, pos }
    }

    #[inline]
    pub fn code(&self) -> Code {
        self.table.index.entry(self.pos).code
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.table.index.entry(self.pos).key
    }

    #[inline]
    pub fn doc(&self) -> Option<&str> {
        self.table.index.entry(self.pos).doc.as_deref()
    }

    /// Name of the owning table.
    pub fn table_name(&self) -> Option<&str> {
        self.table.name.as_deref()
    }

    /// Handle to the owning table.
    pub fn table(&self) -> SymbolTable {
        SymbolTable::from_shared(Arc::clone(&self.table))
    }

    pub fn belongs_to(&self, table: &SymbolTable) -> bool {
        Arc::ptr_eq(&self.table, table.inner())
    }

    pub fn same_table(&self, other: &SymbolValue) -> bool {
        Arc::ptr_eq(&self.table, &other.table)
    }

    pub fn compare<'a>(&self, other: impl Into<Operand<'a>>) -> Option<Ordering> {
        match other.into() {
            Operand::Symbol(other) if self.same_table(other) => Some(self.code().cmp(&other.code())),
            Operand::Symbol(_) => None,
            Operand::Key(key) => Some(self.key().cmp(key)),
            Operand::Code(code) => Some(self.code().cmp(&code)),
        }
    }
}

impl PartialEq for SymbolValue {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

// Same-table equality is code equality; cross-table is always unequal.
impl Eq for SymbolValue {}

impl PartialOrd for SymbolValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other)
    }
}

impl Hash for SymbolValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl PartialEq<str> for SymbolValue {
    fn eq(&self, other: &str) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl PartialEq<&str> for SymbolValue {
    fn eq(&self, other: &&str) -> bool {
        self.compare(*other) == Some(Ordering::Equal)
    }
}

impl PartialEq<String> for SymbolValue {
    fn eq(&self, other: &String) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl PartialEq<Code> for SymbolValue {
    fn eq(&self, other: &Code) -> bool {
        self.compare(*other) == Some(Ordering::Equal)
    }
}

impl PartialEq<SymbolValue> for str {
    fn eq(&self, other: &SymbolValue) -> bool {
        other == self
    }
}

impl PartialEq<SymbolValue> for &str {
    fn eq(&self, other: &SymbolValue) -> bool {
        other == *self
    }
}

impl PartialOrd<str> for SymbolValue {
    fn partial_cmp(&self, other: &str) -> Option<Ordering> {
        self.compare(other)
    }
}

impl PartialOrd<&str> for SymbolValue {
    fn partial_cmp(&self, other: &&str) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl PartialOrd<String> for SymbolValue {
    fn partial_cmp(&self, other: &String) -> Option<Ordering> {
        self.compare(other)
    }
}

impl PartialOrd<Code> for SymbolValue {
    fn partial_cmp(&self, other: &Code) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl From<&SymbolValue> for Code {
    fn from(value: &SymbolValue) -> Self {
        value.code()
    }
}

impl From<SymbolValue> for Code {
    fn from(value: SymbolValue) -> Self {
        value.code()
    }
}

impl fmt::Display for SymbolValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Debug for SymbolValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut t = f.debug_tuple("SymbolValue");
        t.field(&self.table_name().unwrap_or("<unnamed>"))
            .field(&self.code())
            .field(&self.key());
        if let Some(doc) = self.doc() {
            t.field(&doc);
        }
        t.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn colours() -> SymbolTable {
        SymbolTable::from_names("Colours", ["red", "blue", "green"]).unwrap()
    }

    #[test]
    fn same_table_orders_by_code() {
        let t = colours();
        let red = t.attr("red").unwrap();
        let green = t.attr("green").unwrap();
        assert!(green > red);
        assert_eq!(red.compare(&green), Some(Ordering::Less));
        assert_eq!(t.at(2).unwrap(), green);
    }

    #[test]
    fn raw_strings_compare_by_key() {
        let t = colours();
        let blue = t.attr("blue").unwrap();
        assert_eq!(blue, "blue");
        assert_eq!("blue", blue);
        assert_eq!(blue, String::from("blue"));
        assert_ne!(blue, "red");
        // Lexicographic, not by code: "blue" < "green" < "red".
        assert!(blue < "green");
        assert!(blue > "azure");
    }

    #[test]
    fn raw_integers_compare_by_code() {
        let t = colours();
        let first = t.at(0).unwrap();
        assert_eq!(first, 0);
        assert_ne!(first, 5);
        assert!(first < 1);
        assert_eq!(Code::from(&first), 0);
    }

    #[test]
    fn other_tables_are_unequal_and_unordered() {
        let a = colours();
        let b = colours();
        let red_a = a.attr("red").unwrap();
        let red_b = b.attr("red").unwrap();
        assert_ne!(red_a, red_b);
        assert_eq!(red_a.partial_cmp(&red_b), None);
        assert!(!(red_a < red_b) && !(red_a > red_b));
        assert!(!a.contains(&red_b));
        assert!(b.contains(&red_b));
    }

    #[test]
    fn hash_follows_code() {
        let t = colours();
        let set: HashSet<SymbolValue> = t.iter().chain(t.iter()).collect();
        assert_eq!(set.len(), 3);
        assert!(set.contains(&t.attr("blue").unwrap()));
    }

    #[test]
    fn formatting() {
        let t = colours();
        let green = t.attr("green").unwrap();
        assert_eq!(green.to_string(), "green");
        assert_eq!(format!("{green:?}"), r#"SymbolValue("Colours", 2, "green")"#);
        assert_eq!(green.table_name(), Some("Colours"));
        assert!(green.table().same_table(&t));
    }
}
