//! Node-type handle catalog
//!
//! Maps a node-type key to the handles a node of that type exposes when its
//! own data carries none. Keys are case-insensitive; the reserved `default`
//! entry covers unknown types. Catalogs are plain values: load one from TOML,
//! use [`HandleCatalog::builtin`], or build one in code and pass it to the
//! layout resolver.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::handle::HandleId;

/// Key of the fallback entry
pub const DEFAULT_TYPE: &str = "default";

/// Raw configured handle lists for one node type, as written in the catalog
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CatalogEntry {
    #[serde(default, rename = "in")]
    pub inputs: Vec<String>,
    #[serde(default, rename = "out")]
    pub outputs: Vec<String>,
}

impl CatalogEntry {
    pub fn new<I, O>(inputs: I, outputs: O) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            outputs: outputs.into_iter().map(Into::into).collect(),
        }
    }
}

/// Deduplicated, grammar-valid handle inventory for a node type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HandleSet {
    #[serde(rename = "in")]
    pub inputs: Vec<HandleId>,
    #[serde(rename = "out")]
    pub outputs: Vec<HandleId>,
}

impl HandleSet {
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty()
    }
}

/// A read-only table of handle inventories keyed by lower-cased node type
#[derive(Debug, Clone, Default)]
pub struct HandleCatalog {
    /// Optional name for the catalog
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    entries: HashMap<String, CatalogEntry>,
}

/// TOML structure for deserializing catalogs
#[derive(Deserialize)]
struct TomlCatalog {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    types: HashMap<String, CatalogEntry>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Handle inventories for the channel editor's node types.
///
/// At most four handles per side.
const BUILTIN_CATALOG: &str = r#"
[metadata]
name = "channel-editor"
description = "Default handle layout for channel topology nodes"

[types.default]
in = ["in-left-1"]
out = ["out-right-1"]

# Signal origin, no inputs
[types.camera]
out = ["out-right-1"]

[types.encoder]
in = ["in-left-1", "in-left-2"]
out = ["out-right-1"]

[types.decoder]
in = ["in-left-1"]
out = ["out-right-1", "out-right-2"]

[types.router]
in = ["in-left-1", "in-left-2", "in-left-3", "in-left-4"]
out = ["out-right-1", "out-right-2", "out-right-3", "out-right-4"]

[types.switch]
in = ["in-left-1", "in-left-2", "in-top-1"]
out = ["out-right-1", "out-right-2", "out-bottom-1"]

[types.splitter]
in = ["in-left-1"]
out = ["out-right-1", "out-right-2", "out-right-3"]

# Uplink and downlink share the dish side
[types.satellite]
in = ["in-bottom-1"]
out = ["out-bottom-2"]

[types.monitor]
in = ["in-left-1", "in-top-1"]
"#;

impl HandleCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog shipped with the editor
    pub fn builtin() -> Self {
        Self::from_str(BUILTIN_CATALOG).expect("Builtin catalog should be valid TOML")
    }

    /// Load catalog from TOML file
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load catalog from TOML string
    pub fn from_str(content: &str) -> Result<Self, CatalogError> {
        let parsed: TomlCatalog = toml::from_str(content)?;

        let mut catalog = HandleCatalog {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            entries: HashMap::new(),
        };
        for (key, entry) in parsed.types {
            catalog.insert(&key, entry);
        }
        Ok(catalog)
    }

    /// Add or replace the entry for a node type
    pub fn with_entry(mut self, node_type: &str, entry: CatalogEntry) -> Self {
        self.insert(node_type, entry);
        self
    }

    fn insert(&mut self, node_type: &str, entry: CatalogEntry) {
        self.entries.insert(node_type.to_lowercase(), entry);
    }

    /// Configured node-type keys, sorted
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Raw configured entry for an exact (lower-cased) key, without fallback
    pub fn entry(&self, node_type: &str) -> Option<&CatalogEntry> {
        self.entries.get(&node_type.to_lowercase())
    }

    /// Resolve the handle inventory for a node type.
    ///
    /// Fallback order:
    /// 1. Entry for the lower-cased type
    /// 2. The `default` entry (unknown or absent type)
    /// 3. An empty set (catalog without a `default` entry)
    ///
    /// Each list is deduplicated keeping first occurrences, and entries that
    /// are not valid handle text are dropped.
    pub fn lookup<'a>(&self, node_type: impl Into<Option<&'a str>>) -> HandleSet {
        let node_type = node_type.into();
        let entry = node_type
            .and_then(|t| self.entry(t))
            .or_else(|| {
                tracing::debug!(node_type, "no catalog entry, using default handles");
                self.entries.get(DEFAULT_TYPE)
            });

        match entry {
            Some(entry) => HandleSet {
                inputs: sanitize(&entry.inputs),
                outputs: sanitize(&entry.outputs),
            },
            None => HandleSet::default(),
        }
    }

    /// Iterate over every configured entry
    pub fn entries(&self) -> impl Iterator<Item = (&str, &CatalogEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn sanitize(ids: &[String]) -> Vec<HandleId> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .filter_map(|id| HandleId::parse(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[HandleId]) -> Vec<String> {
        list.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = HandleCatalog::builtin();
        assert_eq!(catalog.name, Some("channel-editor".to_string()));
        assert!(catalog.types().contains(&"default"));
        assert!(catalog.types().contains(&"router"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = HandleCatalog::builtin();
        assert_eq!(catalog.lookup("Encoder"), catalog.lookup("encoder"));
        assert_eq!(ids(&catalog.lookup("ENCODER").inputs), vec!["in-left-1", "in-left-2"]);
    }

    #[test]
    fn test_unknown_and_absent_types_use_default() {
        let catalog = HandleCatalog::builtin();
        let default = catalog.lookup("default");
        assert_eq!(catalog.lookup("totally-unknown-type"), default);
        assert_eq!(catalog.lookup(None), default);
    }

    #[test]
    fn test_lookup_dedups_and_drops_invalid() {
        let catalog = HandleCatalog::new().with_entry(
            "mixer",
            CatalogEntry::new(
                ["in-left-2", "in-left-1", "in-left-2", "in-left-01", "garbage"],
                ["out-right-1", "out-right-1"],
            ),
        );
        let set = catalog.lookup("mixer");
        assert_eq!(ids(&set.inputs), vec!["in-left-2", "in-left-1"]);
        assert_eq!(ids(&set.outputs), vec!["out-right-1"]);
    }

    #[test]
    fn test_missing_default_yields_empty_set() {
        let catalog = HandleCatalog::new();
        assert!(catalog.lookup("anything").is_empty());
    }

    #[test]
    fn test_keys_lowercased_on_load() {
        let catalog = HandleCatalog::from_str(
            r#"
[types.Mixer]
in = ["in-top-1"]
"#,
        )
        .expect("Should parse");
        assert_eq!(catalog.types(), vec!["mixer"]);
        assert_eq!(ids(&catalog.lookup("MIXER").inputs), vec!["in-top-1"]);
        assert!(catalog.lookup("mixer").outputs.is_empty());
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = HandleCatalog::from_str("this is not valid toml {{{{");
        assert!(matches!(result, Err(CatalogError::ParseError(_))));
    }

    #[test]
    fn test_missing_file_error() {
        let result = HandleCatalog::from_file(Path::new("/nonexistent/catalog.toml"));
        assert!(matches!(result, Err(CatalogError::IoError(_))));
    }
}
