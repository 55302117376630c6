// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Packs a program directory into a [`Bundle`]
//!
//! The package root is the directory containing the entry script. Every
//! `.js` file below it becomes a module, registered both with and without
//! its extension, and every sub-directory with a resolvable entry point gets
//! an index entry. This is the only place `package.json` is consulted.

use crate::bundle::Bundle;
use crate::config::PackConfig;
use crate::error::{EmbedError, Result};
use crate::path::normalize;
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Extension of packable module files
const MODULE_EXTENSION: &str = "js";

/// Directory packer
#[derive(Debug, Clone, Default)]
pub struct Packer {
    config: PackConfig,
}

impl Packer {
    /// Create a packer with the given configuration
    pub fn new(config: PackConfig) -> Self {
        Self { config }
    }

    /// Pack the program whose entry script is `entry`
    pub fn pack(&self, entry: &Path) -> Result<Bundle> {
        self.pack_with_progress(entry, |_| {})
    }

    /// Pack, calling `on_module` after each module file has been read
    pub fn pack_with_progress<F>(&self, entry: &Path, mut on_module: F) -> Result<Bundle>
    where
        F: FnMut(&Path),
    {
        if !entry.is_file() {
            return Err(EmbedError::EntryNotFound(entry.to_path_buf()));
        }
        let file_name = entry
            .file_name()
            .ok_or_else(|| EmbedError::EntryNotFound(entry.to_path_buf()))?;
        let root = match entry.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let entry_path = root.join(file_name);

        let source = std::fs::read_to_string(entry)?;
        let mut bundle = Bundle::new(file_name.to_string_lossy(), source);

        let walker = WalkDir::new(&root)
            .min_depth(1)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .follow_links(self.config.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.skip_dir(e));

        for item in walker {
            let item = item?;
            let path = item.path();

            if item.file_type().is_dir() {
                if let Some(index) = directory_index(path) {
                    match (module_id(&root, path), module_id(&root, &index)) {
                        (Some(dir_id), Some(index_id)) => {
                            debug!("Index {} -> {}", dir_id, index_id);
                            bundle.indexes.insert(dir_id, index_id);
                        }
                        _ => warn!(
                            "Skipping index {} of {}: outside package root",
                            index.display(),
                            path.display()
                        ),
                    }
                }
                continue;
            }

            if path == entry_path || !is_module_file(path) {
                continue;
            }
            let Some(id) = module_id(&root, path) else {
                continue;
            };

            let source = std::fs::read_to_string(path)?;
            on_module(path);
            if let Some(stem) = id.strip_suffix(".js") {
                bundle.modules.insert(stem.to_string(), source.clone());
            }
            bundle.modules.insert(id, source);
        }

        info!(
            "Packed {} with {} module entries and {} indexes",
            entry.display(),
            bundle.modules.len(),
            bundle.indexes.len()
        );
        Ok(bundle)
    }

    fn skip_dir(&self, entry: &DirEntry) -> bool {
        entry.file_type().is_dir() && self.config.is_ignored(&entry.file_name().to_string_lossy())
    }
}

fn is_module_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(MODULE_EXTENSION)
}

/// Root-relative, `/`-separated id of `path`
fn module_id(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let segments: Vec<String> = relative
        .components()
        .map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Option<_>>()?;
    let id = normalize(&segments.join("/"));
    if id.is_empty() || id == ".." || id.starts_with("../") {
        None
    } else {
        Some(id)
    }
}

/// Entry point of a directory: `package.json` main, then `index.js`
fn directory_index(dir: &Path) -> Option<PathBuf> {
    let package_json_path = dir.join("package.json");
    if package_json_path.is_file() {
        match read_main(&package_json_path) {
            Ok(Some(main)) => {
                let main_path = dir.join(&main);
                let candidates = [
                    main_path.clone(),
                    dir.join(format!("{main}.{MODULE_EXTENSION}")),
                    main_path.join("index.js"),
                ];
                if let Some(found) = candidates.into_iter().find(|c| c.is_file()) {
                    return Some(found);
                }
                debug!("main '{}' of {} does not exist", main, package_json_path.display());
            }
            Ok(None) => {}
            Err(e) => warn!("Ignoring {}: {}", package_json_path.display(), e),
        }
    }

    let index = dir.join("index.js");
    index.is_file().then_some(index)
}

/// Minimal package.json structure for entry point lookup
#[derive(Debug, Deserialize)]
struct PackageJson {
    main: Option<String>,
}

fn read_main(path: &Path) -> Result<Option<String>> {
    let content = std::fs::read_to_string(path)?;
    let pkg: PackageJson = serde_json::from_str(&content)?;
    Ok(pkg.main.filter(|m| !m.trim().is_empty()))
}
