//! JSON support for symbol tables.
//!
//! Canonical table form (what `Serialize` emits):
//!   { "name": "Levels", "mapping": { "DEBUG": 10, "INFO": 20 }, "docs": { "10": "chatty" } }
//!
//! Also accepted on input:
//!   { "name": "Orientation", "names": ["horizontal", ["vertical", "stacked"]] }
//!   optional "config": { "key_policy": "identifier", "allow_code_gaps": false }
//!
//! Shorthand accepted by [`normalize_table_json`] / [`parse_table_value`]:
//!   ["horizontal", "vertical"]          -> { "names": [...] }
//!   { "DEBUG": 10, "INFO": 20 }         -> { "mapping": {...} }
//!
//! Everything funnels through the validating constructors, so a malformed
//! table surfaces as a serde error carrying the [`TableError`] message.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use thiserror::Error;

use crate::config::TableConfig;
use crate::dict::EnumDict;
use crate::error::TableError;
use crate::index::Entry;
use crate::lookup::Code;
use crate::table::SymbolTable;

/// Errors produced by the string-level helpers in this module.
#[derive(Debug, Error)]
pub enum JsonError {
    #[error("symbol table json parse error: {0}")]
    Parse(String),
    #[error("serialize symbol table: {0}")]
    Serialize(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NameItem {
    Bare(String),
    Documented(String, String),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TableRepr {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    names: Option<Vec<NameItem>>,
    #[serde(default)]
    mapping: Option<HashMap<String, Code>>,
    #[serde(default)]
    docs: Option<BTreeMap<Code, String>>,
    #[serde(default)]
    config: Option<TableConfig>,
}

impl TableRepr {
    fn into_table(self) -> Result<SymbolTable, String> {
        let config = self.config.unwrap_or_default();
        let entries = match (self.names, self.mapping) {
            (Some(names), None) => {
                if self.docs.is_some() {
                    return Err(
                        "'docs' is only allowed with 'mapping'; document names inline".to_string(),
                    );
                }
                names
                    .into_iter()
                    .zip(0..)
                    .map(|(item, code)| match item {
                        NameItem::Bare(key) => Entry::new(key, code, None),
                        NameItem::Documented(key, doc) => Entry::new(key, code, Some(doc)),
                    })
                    .collect()
            }
            (None, Some(mapping)) => {
                let mut docs = self.docs.unwrap_or_default();
                let entries: Vec<Entry> = mapping
                    .into_iter()
                    .map(|(key, code)| {
                        let doc = docs.remove(&code);
                        Entry::new(key, code, doc)
                    })
                    .collect();
                if let Some(code) = docs.keys().next() {
                    return Err(TableError::InvalidIndex(*code).to_string());
                }
                entries
            }
            _ => return Err("expected exactly one of 'names' or 'mapping'".to_string()),
        };
        SymbolTable::from_entries(self.name, entries, &config).map_err(|e| e.to_string())
    }
}

/// Entries serialized as a JSON object in code order.
struct OrderedMapping<'a>(&'a [Entry]);

impl Serialize for OrderedMapping<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in self.0 {
            map.serialize_entry(&entry.key, &entry.code)?;
        }
        map.end()
    }
}

struct OrderedDocs<'a>(&'a [Entry]);

impl Serialize for OrderedDocs<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let documented: Vec<(Code, &str)> = self
            .0
            .iter()
            .filter_map(|e| e.doc.as_deref().map(|doc| (e.code, doc)))
            .collect();
        let mut map = serializer.serialize_map(Some(documented.len()))?;
        for (code, doc) in documented {
            map.serialize_entry(&code, doc)?;
        }
        map.end()
    }
}

impl Serialize for SymbolTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let index = self.index();
        let has_docs = index.has_docs();
        let len = 1 + usize::from(self.name().is_some()) + usize::from(has_docs);
        let mut state = serializer.serialize_struct("SymbolTable", len)?;
        if let Some(name) = self.name() {
            state.serialize_field("name", name)?;
        }
        state.serialize_field("mapping", &OrderedMapping(index.entries()))?;
        if has_docs {
            state.serialize_field("docs", &OrderedDocs(index.entries()))?;
        }
        state.end()
    }
}

impl<'de> Deserialize<'de> for SymbolTable {
    fn deserialize<D>(deserializer: D) -> Result<SymbolTable, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = TableRepr::deserialize(deserializer)?;
        repr.into_table().map_err(de::Error::custom)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DictRepr {
    Names(Vec<String>),
    Mapping(HashMap<String, Code>),
}

impl Serialize for EnumDict {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, code) in self.iter() {
            map.serialize_entry(key, &code)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EnumDict {
    fn deserialize<D>(deserializer: D) -> Result<EnumDict, D::Error>
    where
        D: Deserializer<'de>,
    {
        let built = match DictRepr::deserialize(deserializer)? {
            DictRepr::Names(names) => EnumDict::from_names(names),
            DictRepr::Mapping(mapping) => EnumDict::from_mapping(mapping),
        };
        built.map_err(de::Error::custom)
    }
}

/// Expand shorthand table JSON into the object form. Objects that already
/// carry `names` or `mapping` pass through untouched.
pub fn normalize_table_json(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Array(items) => json!({ "names": items }),
        JsonValue::Object(obj) => {
            if obj.contains_key("names") || obj.contains_key("mapping") {
                return JsonValue::Object(obj);
            }
            if !obj.is_empty() && obj.values().all(JsonValue::is_i64) {
                return json!({ "mapping": obj });
            }
            JsonValue::Object(obj)
        }
        other => other,
    }
}

/// Parse a table from a JSON value, accepting shorthand forms.
pub fn parse_table_value(value: JsonValue) -> Result<SymbolTable, serde_json::Error> {
    serde_json::from_value(normalize_table_json(value))
}

/// Parse a table from JSON text, accepting shorthand forms.
pub fn parse_table_json(text: &str) -> Result<SymbolTable, JsonError> {
    let value: JsonValue =
        serde_json::from_str(text).map_err(|e| JsonError::Parse(e.to_string()))?;
    parse_table_value(value).map_err(|e| JsonError::Parse(e.to_string()))
}

/// Serialize a table to its canonical JSON text.
pub fn table_to_json(table: &SymbolTable) -> Result<String, JsonError> {
    serde_json::to_string(table).map_err(|e| JsonError::Serialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_form_assigns_sequential_codes() {
        let t: SymbolTable = serde_json::from_str(
            r#"{ "name": "Orientation", "names": ["horizontal", ["vertical", "stacked"]] }"#,
        )
        .unwrap();
        assert_eq!(t.name(), Some("Orientation"));
        assert_eq!(t.keys(), vec!["horizontal", "vertical"]);
        assert_eq!(t.doc_of("vertical").unwrap(), Some("stacked"));
    }

    #[test]
    fn mapping_form_orders_by_code_and_attaches_docs() {
        let t: SymbolTable = serde_json::from_str(
            r#"{ "name": "Levels", "mapping": { "WARNING": 30, "DEBUG": 10, "INFO": 20 },
                 "docs": { "10": "chatty" } }"#,
        )
        .unwrap();
        assert_eq!(t.keys(), vec!["DEBUG", "INFO", "WARNING"]);
        assert_eq!(t.doc_of(10).unwrap(), Some("chatty"));
        assert_eq!(t.key_of(20).unwrap(), "INFO");
    }

    #[test]
    fn serialized_form_is_ordered_and_reparses() {
        let t = SymbolTable::from_mapping("Levels", [("INFO", 20), ("DEBUG", 10)]).unwrap();
        let s = table_to_json(&t).unwrap();
        assert_eq!(s, r#"{"name":"Levels","mapping":{"DEBUG":10,"INFO":20}}"#);
        let back = parse_table_json(&s).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn docs_survive_serialization() {
        let t: SymbolTable =
            serde_json::from_str(r#"{ "names": [["a", "first"], "b"] }"#).unwrap();
        assert_eq!(t.name(), None);
        let s = serde_json::to_string(&t).unwrap();
        assert_eq!(s, r#"{"mapping":{"a":0,"b":1},"docs":{"0":"first"}}"#);
        let back: SymbolTable = serde_json::from_str(&s).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn invalid_tables_are_rejected() {
        let empty = serde_json::from_str::<SymbolTable>(r#"{ "names": [] }"#).unwrap_err();
        assert!(empty.to_string().contains("cannot be empty"));

        let both =
            serde_json::from_str::<SymbolTable>(r#"{ "names": ["a"], "mapping": { "a": 0 } }"#)
                .unwrap_err();
        assert!(both.to_string().contains("exactly one"));

        let dup = serde_json::from_str::<SymbolTable>(r#"{ "mapping": { "a": 1, "b": 1 } }"#)
            .unwrap_err();
        assert!(dup.to_string().contains("more than one key"));

        let stray_doc = serde_json::from_str::<SymbolTable>(
            r#"{ "mapping": { "a": 1 }, "docs": { "2": "nobody" } }"#,
        )
        .unwrap_err();
        assert!(stray_doc.to_string().contains("invalid symbol code: 2"));
    }

    #[test]
    fn embedded_config_is_honoured() {
        let err = serde_json::from_str::<SymbolTable>(
            r#"{ "names": ["ok", "not ok"], "config": { "key_policy": "identifier" } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("not ok"));
    }

    #[test]
    fn shorthand_forms() {
        let t = parse_table_value(json!(["horizontal", "vertical"])).unwrap();
        assert_eq!(t.keys(), vec!["horizontal", "vertical"]);
        let t = parse_table_json(r#"{ "one": 1, "hundred": 100, "two": 2 }"#).unwrap();
        assert_eq!(t.codes(), vec![1, 2, 100]);
        assert!(matches!(
            parse_table_json("not json"),
            Err(JsonError::Parse(_))
        ));
    }

    #[test]
    fn enum_dict_json() {
        let d: EnumDict = serde_json::from_str(r#"["mon", "tue"]"#).unwrap();
        assert_eq!(d.get_code("tue"), Some(1));
        let d: EnumDict = serde_json::from_str(r#"{ "two": 2, "one": 1 }"#).unwrap();
        assert_eq!(serde_json::to_string(&d).unwrap(), r#"{"one":1,"two":2}"#);
        assert!(serde_json::from_str::<EnumDict>("[]").is_err());
    }
}
