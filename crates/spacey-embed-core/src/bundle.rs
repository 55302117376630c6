// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Serialized form of a packed program
//!
//! A bundle carries the entry script plus the two registry tables. It is
//! read fully into memory before any module is resolved.

use crate::error::{EmbedError, Result};
use crate::registry::ModuleRegistry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Current bundle format version
pub const BUNDLE_VERSION: u32 = 1;

/// The entry script of a bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryScript {
    /// File name the entry was packed from
    pub name: String,
    /// Source text, evaluated as a global script
    pub source: String,
}

/// A packed program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    /// Format version
    pub version: u32,
    /// Entry script
    pub entry: EntryScript,
    /// File id -> source text
    #[serde(default)]
    pub modules: BTreeMap<String, String>,
    /// Directory id -> index file id
    #[serde(default)]
    pub indexes: BTreeMap<String, String>,
}

impl Bundle {
    /// Create an empty bundle around an entry script
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            version: BUNDLE_VERSION,
            entry: EntryScript {
                name: name.into(),
                source: source.into(),
            },
            modules: BTreeMap::new(),
            indexes: BTreeMap::new(),
        }
    }

    /// Parse a bundle from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let bundle: Bundle = serde_json::from_str(json)?;
        bundle.check_version()?;
        Ok(bundle)
    }

    /// Serialize the bundle to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a bundle file
    pub fn read_from(path: &Path) -> Result<Self> {
        debug!("Reading bundle {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Write the bundle to a file
    pub fn write_to(&self, path: &Path) -> Result<()> {
        debug!(
            "Writing bundle {} ({} modules, {} indexes)",
            path.display(),
            self.modules.len(),
            self.indexes.len()
        );
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Freeze the tables into a registry, returning it with the entry script
    pub fn into_registry(self) -> Result<(ModuleRegistry, EntryScript)> {
        self.check_version()?;
        let registry = ModuleRegistry::builder()
            .modules(self.modules)
            .indexes(self.indexes)
            .build();
        Ok((registry, self.entry))
    }

    fn check_version(&self) -> Result<()> {
        if self.version == BUNDLE_VERSION {
            Ok(())
        } else {
            Err(EmbedError::invalid_bundle(format!(
                "unsupported format version {} (expected {})",
                self.version, BUNDLE_VERSION
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Bundle {
        let mut bundle = Bundle::new("main.js", "require('./lib');");
        bundle
            .modules
            .insert("lib/index.js".into(), "module.exports = 42;".into());
        bundle.indexes.insert("lib".into(), "lib/index.js".into());
        bundle
    }

    #[test]
    fn test_json_keeps_tables() {
        let json = sample().to_json().unwrap();
        let parsed = Bundle::from_json(&json).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_missing_tables_default_to_empty() {
        let bundle =
            Bundle::from_json(r#"{"version":1,"entry":{"name":"a.js","source":"1"}}"#).unwrap();
        assert!(bundle.modules.is_empty());
        assert!(bundle.indexes.is_empty());
    }

    #[test]
    fn test_unsupported_version() {
        let err = Bundle::from_json(r#"{"version":7,"entry":{"name":"a.js","source":""}}"#)
            .unwrap_err();
        assert!(matches!(err, EmbedError::InvalidBundle(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = Bundle::from_json("{").unwrap_err();
        assert!(matches!(err, EmbedError::Json(_)));
    }

    #[test]
    fn test_into_registry() {
        let (registry, entry) = sample().into_registry().unwrap();
        assert_eq!(entry.name, "main.js");
        assert_eq!(registry.resolve_path("./lib"), "lib/index.js");
        assert_eq!(registry.source("lib/index.js"), Some("module.exports = 42;"));
    }
}
