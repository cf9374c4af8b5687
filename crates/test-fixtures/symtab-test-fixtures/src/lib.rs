use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Result<Manifest, String>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../../../fixtures/manifest.json"))
        .map_err(|e| format!("fixtures manifest does not parse: {e}"))
});

#[derive(Debug, Deserialize)]
struct Manifest {
    tables: HashMap<String, String>,
    invalid: HashMap<String, RejectedTable>,
}

#[derive(Debug, Deserialize)]
struct RejectedTable {
    path: String,
    error: String,
}

fn manifest() -> Result<&'static Manifest> {
    MANIFEST.as_ref().map_err(|e| anyhow!("{e}"))
}

/// The two fixture families listed in `fixtures/manifest.json`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Family {
    Tables,
    Invalid,
}

impl Family {
    fn label(self) -> &'static str {
        match self {
            Family::Tables => "table",
            Family::Invalid => "invalid table",
        }
    }

    fn names(self) -> Result<Vec<String>> {
        let manifest = manifest()?;
        let mut names: Vec<String> = match self {
            Family::Tables => manifest.tables.keys().cloned().collect(),
            Family::Invalid => manifest.invalid.keys().cloned().collect(),
        };
        names.sort();
        Ok(names)
    }
}

/// One manifest entry: where the JSON lives and, for rejected tables, the
/// substring its error message must contain.
struct Fixture {
    name: &'static str,
    rel: &'static str,
    error: Option<&'static str>,
}

fn fixture(family: Family, name: &str) -> Result<Fixture> {
    let manifest = manifest()?;
    let found = match family {
        Family::Tables => manifest
            .tables
            .get_key_value(name)
            .map(|(k, rel)| (k, rel, None)),
        Family::Invalid => manifest
            .invalid
            .get_key_value(name)
            .map(|(k, e)| (k, &e.path, Some(e.error.as_str()))),
    };
    let (name, rel, error) =
        found.ok_or_else(|| anyhow!("unknown {} fixture '{name}'", family.label()))?;
    Ok(Fixture {
        name: name.as_str(),
        rel: rel.as_str(),
        error,
    })
}

impl Fixture {
    fn path(&self) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(self.rel)
    }

    fn text(&self) -> Result<String> {
        let path = self.path();
        fs::read_to_string(&path).with_context(|| {
            format!("failed to read fixture '{}' at {}", self.name, path.display())
        })
    }

    fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.text()?)
            .with_context(|| format!("failed to parse fixture '{}' ({})", self.name, self.rel))
    }
}

/// Well-formed tables.
pub mod tables {
    use super::*;

    pub fn keys() -> Vec<String> {
        Family::Tables.names().unwrap_or_default()
    }

    pub fn json(name: &str) -> Result<String> {
        fixture(Family::Tables, name)?.text()
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        fixture(Family::Tables, name)?.parse()
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Ok(fixture(Family::Tables, name)?.path())
    }
}

/// Tables that must be rejected, each paired with a substring of the
/// expected error message.
pub mod invalid {
    use super::*;

    pub fn keys() -> Vec<String> {
        Family::Invalid.names().unwrap_or_default()
    }

    pub fn json(name: &str) -> Result<String> {
        fixture(Family::Invalid, name)?.text()
    }

    pub fn expected_error(name: &str) -> Result<&'static str> {
        let entry = fixture(Family::Invalid, name)?;
        entry
            .error
            .ok_or_else(|| anyhow!("fixture '{}' has no expected error", entry.name))
    }
}
