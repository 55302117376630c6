// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Specifier resolution
//!
//! Turns a `require()` specifier and the id of the requiring module into a
//! resolved id. Resolution is pure string manipulation and never fails; the
//! result is canonicalized and looked up only when it is loaded.

use crate::path::{NODE_MODULES, is_local_path, node_path, parent_path};
use tracing::trace;

/// Module resolver for bundled programs
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleResolver;

impl ModuleResolver {
    /// Create a new module resolver
    pub fn new() -> Self {
        Self
    }

    /// Resolve `requested` as required from the module `parent`
    ///
    /// `parent` is empty for the entry script. Local specifiers (`./x`,
    /// `../x`) are joined onto the parent's directory; everything else is
    /// looked up under `node_modules/`.
    ///
    /// `parent` may be a canonical id such as `lib/index.js`. A join that
    /// lands outside `node_modules/` is anchored at the package root with
    /// `./` so it stays local.
    pub fn resolve(&self, requested: &str, parent: &str) -> String {
        let resolved = if is_local_path(requested) {
            let dir = parent_path(parent);
            let joined = if dir.is_empty() {
                requested.to_string()
            } else {
                format!("{dir}/{requested}")
            };
            if is_local_path(&joined) || joined.starts_with(NODE_MODULES) {
                joined
            } else {
                format!("./{joined}")
            }
        } else {
            node_path(requested).into_owned()
        };

        trace!(requested, parent, resolved = %resolved, "resolved module specifier");
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_local_from_package() {
        let resolver = ModuleResolver::new();
        assert_eq!(
            resolver.resolve("./b", "node_modules/a/index.js"),
            "node_modules/a/./b"
        );
        assert_eq!(
            resolver.resolve("../c", "node_modules/a/lib/x.js"),
            "node_modules/a/lib/../c"
        );
    }

    #[test]
    fn test_resolve_local_from_entry() {
        let resolver = ModuleResolver::new();
        assert_eq!(resolver.resolve("./lib", ""), "./lib");
        assert_eq!(resolver.resolve("../up", ""), "../up");
    }

    #[test]
    fn test_resolve_local_from_top_level_module() {
        let resolver = ModuleResolver::new();
        assert_eq!(resolver.resolve("./other", "util.js"), "./other");
    }

    #[test]
    fn test_resolve_local_from_directory_module() {
        let resolver = ModuleResolver::new();
        assert_eq!(resolver.resolve("./util", "lib/index.js"), "./lib/./util");
        assert_eq!(resolver.resolve("../up", "lib/x.js"), "./lib/../up");
        assert_eq!(resolver.resolve("./b", "a/b/c.js"), "./a/b/./b");
    }

    #[test]
    fn test_resolve_local_from_raw_parent_id() {
        let resolver = ModuleResolver::new();
        assert_eq!(resolver.resolve("./util", "./lib/index"), "./lib/./util");
        assert_eq!(resolver.resolve("./x", "../up/y.js"), "../up/./x");
    }

    #[test]
    fn test_resolve_bare_specifier() {
        let resolver = ModuleResolver::new();
        assert_eq!(resolver.resolve("lodash", ""), "node_modules/lodash");
        assert_eq!(
            resolver.resolve("lodash/get", "lib/index.js"),
            "node_modules/lodash/get"
        );
        assert_eq!(
            resolver.resolve("node_modules/a", "lib/index.js"),
            "node_modules/a"
        );
    }

    #[test]
    fn test_resolve_never_fails() {
        let resolver = ModuleResolver::new();
        assert_eq!(resolver.resolve("/abs", ""), "node_modules//abs");
        assert_eq!(resolver.resolve(".", "a/b.js"), "node_modules/.");
    }
}
