// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! In-memory module registry
//!
//! Holds the two tables a bundled program is resolved against:
//! - sources: canonical file id -> source text
//! - indexes: directory-like id -> file id of its entry point
//!
//! A registry is assembled once through [`RegistryBuilder`] and is read-only
//! afterwards, so it can be shared behind an `Arc` without locking.

use crate::path;
use std::collections::HashMap;

/// Immutable module tables
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    sources: HashMap<String, String>,
    indexes: HashMap<String, String>,
}

impl ModuleRegistry {
    /// Start assembling a registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Source text registered under a canonical file id
    pub fn source(&self, id: &str) -> Option<&str> {
        self.sources.get(id).map(String::as_str)
    }

    /// Entry point file id of a directory-like id
    pub fn index(&self, id: &str) -> Option<&str> {
        self.indexes.get(id).map(String::as_str)
    }

    /// Check whether a canonical file id has source registered
    pub fn contains(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    /// Canonicalize a resolved id and apply the directory index fallback
    ///
    /// Ids ending in `.js` are explicit file references and are never
    /// substituted. Other ids are replaced by their index file when one is
    /// registered and returned unchanged otherwise.
    pub fn resolve_path(&self, id: &str) -> String {
        let normalized = path::normalize(id);
        if path::is_explicit_file(&normalized) {
            return normalized;
        }
        match self.index(&normalized) {
            Some(index) => index.to_string(),
            None => normalized,
        }
    }

    /// Registered file ids
    pub fn module_ids(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    /// Number of registered source entries
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if no sources are registered
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Builder for [`ModuleRegistry`]
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    sources: HashMap<String, String>,
    indexes: HashMap<String, String>,
}

impl RegistryBuilder {
    /// Register source text under a file id
    pub fn module(mut self, id: impl Into<String>, source: impl Into<String>) -> Self {
        self.sources.insert(id.into(), source.into());
        self
    }

    /// Register the entry point file id of a directory-like id
    pub fn index(mut self, dir: impl Into<String>, file: impl Into<String>) -> Self {
        self.indexes.insert(dir.into(), file.into());
        self
    }

    /// Register many sources at once
    pub fn modules<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.sources
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Register many index entries at once
    pub fn indexes<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.indexes
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Freeze the tables
    pub fn build(self) -> ModuleRegistry {
        ModuleRegistry {
            sources: self.sources,
            indexes: self.indexes,
        }
    }
}
