// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Module id path utilities
//!
//! Module ids are always `/`-separated strings, independent of the host
//! platform. Nothing here touches the file system.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Prefix under which bare package specifiers are looked up
pub const NODE_MODULES: &str = "node_modules/";

static LOCAL_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.{1,2}/.+$").expect("valid local path pattern"));

static NODE_MODULES_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^node_modules/.+$").expect("valid node_modules pattern"));

/// Whether `path` is relative to the requiring module (`./x` or `../x`)
pub fn is_local_path(path: &str) -> bool {
    LOCAL_PATH.is_match(path)
}

/// Namespace a non-local specifier under `node_modules/`
///
/// Local paths and paths already under `node_modules/` are returned as-is.
pub fn node_path(path: &str) -> Cow<'_, str> {
    if is_local_path(path) || NODE_MODULES_PATH.is_match(path) {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("{NODE_MODULES}{path}"))
    }
}

/// Drop the last path component; a path without `/` has an empty parent
pub fn parent_path(path: &str) -> &str {
    path.rsplit_once('/').map(|(parent, _)| parent).unwrap_or("")
}

/// Collapse `segment/../` pairs and drop `./` no-op segments
///
/// Collapsing runs to a fixed point, so `a/b/../../c` becomes `c`. Only
/// segments followed by a `/` are rewritten: a trailing `.` or `..` is kept
/// verbatim, as is a `..` with nothing left to pop.
pub fn normalize(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    let last = segments.len() - 1;
    let mut out: Vec<&str> = Vec::with_capacity(segments.len());

    for (i, segment) in segments.iter().copied().enumerate() {
        if i == last {
            out.push(segment);
            break;
        }
        match segment {
            "." => {}
            ".." => match out.last() {
                Some(prev) if !prev.is_empty() && *prev != ".." => {
                    out.pop();
                }
                _ => out.push(segment),
            },
            _ => out.push(segment),
        }
    }

    out.join("/")
}

/// Whether `path` names a file explicitly rather than a directory-like id
pub fn is_explicit_file(path: &str) -> bool {
    path.len() > ".js".len() && path.ends_with(".js")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_local_path() {
        assert!(is_local_path("./a"));
        assert!(is_local_path("../a"));
        assert!(is_local_path("./a/b.js"));
        assert!(!is_local_path("node_modules/x"));
        assert!(!is_local_path("x"));
        assert!(!is_local_path("/x"));
        assert!(!is_local_path("."));
        assert!(!is_local_path(".."));
        assert!(!is_local_path("./"));
        assert!(!is_local_path(".../x"));
    }

    #[test]
    fn test_node_path() {
        assert_eq!(node_path("./a"), "./a");
        assert_eq!(node_path("../a"), "../a");
        assert_eq!(node_path("node_modules/a"), "node_modules/a");
        assert_eq!(node_path("a"), "node_modules/a");
        assert_eq!(node_path("@scope/pkg/lib"), "node_modules/@scope/pkg/lib");
        assert!(matches!(node_path("./a"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_parent_path() {
        assert_eq!(parent_path("a/b/c"), "a/b");
        assert_eq!(parent_path("node_modules/a/index.js"), "node_modules/a");
        assert_eq!(parent_path("a"), "");
        assert_eq!(parent_path(""), "");
    }

    #[test]
    fn test_normalize_current_dir() {
        assert_eq!(normalize("node_modules/a/./b"), "node_modules/a/b");
        assert_eq!(normalize("./lib"), "lib");
        assert_eq!(normalize("././x"), "x");
        assert_eq!(normalize("a/."), "a/.");
    }

    #[test]
    fn test_normalize_parent_dir() {
        assert_eq!(normalize("a/b/../c"), "a/c");
        assert_eq!(normalize("lib/./../util.js"), "util.js");
        assert_eq!(normalize("a/b/.."), "a/b/..");
    }

    #[test]
    fn test_normalize_multiple_parent_refs_reach_fixed_point() {
        assert_eq!(normalize("a/b/../../c"), "c");
        assert_eq!(normalize("a/b/c/../../../d/e"), "d/e");
        assert_eq!(normalize(&normalize("a/b/../../c")), "c");
    }

    #[test]
    fn test_normalize_unpoppable_parent_dir() {
        assert_eq!(normalize("../x"), "../x");
        assert_eq!(normalize("a/../../x"), "../x");
        assert_eq!(normalize("../../x"), "../../x");
    }

    #[test]
    fn test_is_explicit_file() {
        assert!(is_explicit_file("lib/index.js"));
        assert!(is_explicit_file("a.js"));
        assert!(!is_explicit_file(".js"));
        assert!(!is_explicit_file("lib"));
        assert!(!is_explicit_file("lib/data.json"));
    }
}
