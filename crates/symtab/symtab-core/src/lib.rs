//! symtab-core: immutable, ordered, bidirectional symbol tables
//! (enumerations) for fixed option sets such as layout orientations or
//! logging severities.

pub mod config;
pub mod dict;
pub mod error;
mod index;
pub mod json;
pub mod levels;
pub mod lookup;
pub mod table;
pub mod value;

pub use config::{KeyPolicy, TableConfig};
pub use dict::EnumDict;
pub use error::TableError;
pub use json::{parse_table_json, table_to_json, JsonError};
pub use lookup::{Code, SymbolRef};
pub use table::{SymbolDef, SymbolTable};
pub use value::{Operand, SymbolValue};
