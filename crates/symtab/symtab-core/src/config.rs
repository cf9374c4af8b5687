//! Construction-time configuration for symbol tables.

use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Which strings are accepted as symbol keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyPolicy {
    /// Every string, including `""` and whitespace-padded keys.
    #[default]
    Any,
    /// Non-empty strings without leading or trailing whitespace.
    Trimmed,
    /// ASCII identifiers only: a letter or `_`, then letters, digits or `_`.
    /// This is the shape a key needs to double as an accessor name in
    /// scripting hosts.
    Identifier,
}

impl KeyPolicy {
    pub fn accepts(self, key: &str) -> bool {
        match self {
            KeyPolicy::Any => true,
            KeyPolicy::Trimmed => !key.is_empty() && key.trim() == key,
            KeyPolicy::Identifier => {
                let mut chars = key.chars();
                let head_ok = chars
                    .next()
                    .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
                head_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
        }
    }

    pub fn check(self, key: &str) -> Result<(), TableError> {
        if self.accepts(key) {
            Ok(())
        } else {
            Err(TableError::InvalidKey(key.to_string()))
        }
    }
}

/// Options applied while a table is built. Tables never consult the config
/// again once constructed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub key_policy: KeyPolicy,
    /// Mapping-built tables may skip codes (e.g. `10, 20, 30`). When false,
    /// codes must run contiguously from the smallest one.
    pub allow_code_gaps: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            key_policy: KeyPolicy::Any,
            allow_code_gaps: true,
        }
    }
}

impl TableConfig {
    /// Identifier keys and contiguous codes.
    pub fn strict() -> Self {
        Self {
            key_policy: KeyPolicy::Identifier,
            allow_code_gaps: false,
        }
    }

    pub fn with_key_policy(mut self, key_policy: KeyPolicy) -> Self {
        self.key_policy = key_policy;
        self
    }

    pub fn with_code_gaps(mut self, allow: bool) -> Self {
        self.allow_code_gaps = allow;
        self
    }
}
