//! Shorthand codes and the projects they stand for.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// Target of a shorthand code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Mapping {
    #[serde(deserialize_with = "string_or_number")]
    pub project_nr: String,
    #[serde(deserialize_with = "string_or_number")]
    pub package_nr: String,
    /// Default comment used when an entry does not provide one.
    #[serde(default)]
    pub comment: Option<String>,
}

impl Mapping {
    /// Package identifier in `{project}-{package}` form.
    pub fn package_id(&self) -> String {
        format!("{}-{}", self.project_nr, self.package_nr)
    }
}

/// User-defined table of shorthand codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct MappingTable(HashMap<String, Mapping>);

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a shorthand code. Codes are case-sensitive.
    pub fn resolve(&self, shorthand: &str) -> Option<&Mapping> {
        self.0.get(shorthand)
    }

    pub fn insert(&mut self, shorthand: impl Into<String>, mapping: Mapping) {
        self.0.insert(shorthand.into(), mapping);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Mapping)> for MappingTable {
    fn from_iter<I: IntoIterator<Item = (String, Mapping)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// Project and package numbers are often written as bare JSON numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Int(n) => n.to_string(),
    })
}
