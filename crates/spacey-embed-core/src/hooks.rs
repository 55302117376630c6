// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! The resolve/load interface an interpreter's module system depends on

use crate::error::Result;
use crate::loader::ModuleLoader;
use crate::registry::ModuleRegistry;
use crate::resolver::ModuleResolver;
use std::sync::Arc;

/// Callbacks invoked by an interpreter when a module is required
///
/// `resolve` runs first and must always produce an id. The interpreter
/// hands that id back unchanged to `load`, which is the only place a
/// missing module is reported.
pub trait ModuleHooks {
    /// Resolve `requested` as required from the module `parent`
    fn resolve(&self, requested: &str, parent: &str) -> String;

    /// Source text for a resolved id
    fn load(&self, resolved: &str) -> Result<&str>;

    /// Identity a resolved id is cached under by the interpreter
    fn canonical_id(&self, resolved: &str) -> String {
        resolved.to_string()
    }
}

/// Resolver and loader pair over a bundled registry
#[derive(Debug, Clone)]
pub struct EmbeddedModules {
    resolver: ModuleResolver,
    loader: ModuleLoader,
}

impl EmbeddedModules {
    /// Create hooks over `registry`
    pub fn new(registry: Arc<ModuleRegistry>) -> Self {
        Self {
            resolver: ModuleResolver::new(),
            loader: ModuleLoader::new(registry),
        }
    }
}

impl ModuleHooks for EmbeddedModules {
    fn resolve(&self, requested: &str, parent: &str) -> String {
        self.resolver.resolve(requested, parent)
    }

    fn load(&self, resolved: &str) -> Result<&str> {
        self.loader.load(resolved)
    }

    fn canonical_id(&self, resolved: &str) -> String {
        self.loader.canonical_id(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hooks() -> EmbeddedModules {
        let registry = ModuleRegistry::builder()
            .module("lib/index.js", "module.exports = 42;")
            .module("lib/util.js", "exports.x = 1;")
            .index("lib", "lib/index.js")
            .build();
        EmbeddedModules::new(Arc::new(registry))
    }

    #[test]
    fn test_require_directory_from_entry() {
        let hooks = hooks();
        let resolved = hooks.resolve("./lib", "");
        assert_eq!(resolved, "./lib");
        assert_eq!(hooks.canonical_id(&resolved), "lib/index.js");
        assert_eq!(hooks.load(&resolved).unwrap(), "module.exports = 42;");
    }

    #[test]
    fn test_require_sibling_from_directory_index() {
        let hooks = hooks();
        let parent = hooks.canonical_id(&hooks.resolve("./lib", ""));
        let resolved = hooks.resolve("./util.js", &parent);
        assert_eq!(hooks.canonical_id(&resolved), "lib/util.js");
        assert_eq!(hooks.load(&resolved).unwrap(), "exports.x = 1;");
    }

    #[test]
    fn test_require_missing_from_entry() {
        let hooks = hooks();
        let resolved = hooks.resolve("./missing", "");
        let err = hooks.load(&resolved).unwrap_err();
        assert_eq!(err.to_string(), "Cannot find module 'missing'");
    }

    #[test]
    fn test_hooks_as_trait_object() {
        let hooks: Box<dyn ModuleHooks> = Box::new(hooks());
        assert_eq!(hooks.resolve("pkg", ""), "node_modules/pkg");
        assert!(hooks.load("node_modules/pkg").is_err());
    }
}
