// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Module loader - canonicalizes resolved ids and fetches source text

use crate::error::{EmbedError, Result};
use crate::registry::ModuleRegistry;
use std::sync::Arc;
use tracing::{debug, trace};

/// Module loader backed by a shared registry
#[derive(Debug, Clone)]
pub struct ModuleLoader {
    registry: Arc<ModuleRegistry>,
}

impl ModuleLoader {
    /// Create a loader over `registry`
    pub fn new(registry: Arc<ModuleRegistry>) -> Self {
        Self { registry }
    }

    /// Canonical id a resolved id will be looked up under
    pub fn canonical_id(&self, resolved: &str) -> String {
        self.registry.resolve_path(resolved)
    }

    /// Load the source text of a resolved id
    ///
    /// The source is returned untouched. A miss reports the canonical id
    /// that was looked up, not the id that was passed in.
    pub fn load(&self, resolved: &str) -> Result<&str> {
        let canonical = self.canonical_id(resolved);
        match self.registry.source(&canonical) {
            Some(source) => {
                trace!(resolved, canonical = %canonical, bytes = source.len(), "loaded module");
                Ok(source)
            }
            None => {
                debug!(resolved, canonical = %canonical, "module not in registry");
                Err(EmbedError::ModuleNotFound(canonical))
            }
        }
    }
}
