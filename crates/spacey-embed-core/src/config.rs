// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Packer configuration
//!
//! Resolved from, in order: built-in defaults, `spacey-embed.toml` in the
//! package root, `SPACEY_EMBED_*` environment variables. Command line flags
//! are applied on top by the caller.

use crate::error::{EmbedError, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::Path;
use tracing::{debug, warn};

/// Name of the per-package configuration file
pub const CONFIG_FILE: &str = "spacey-embed.toml";

/// Prefix of configuration environment variables
const ENV_PREFIX: &str = "SPACEY_EMBED_";

/// Configuration for packing a program directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackConfig {
    /// Directory names skipped while walking
    pub ignore: Vec<String>,

    /// Whether symbolic links are followed
    pub follow_links: bool,

    /// Maximum walk depth below the package root
    pub max_depth: Option<usize>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            ignore: vec![".git".to_string()],
            follow_links: false,
            max_depth: None,
        }
    }
}

impl PackConfig {
    /// Load configuration for the package rooted at `root`
    pub fn load(root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let file = root.join(CONFIG_FILE);
        if file.is_file() {
            config = Self::from_file(&file)?;
        }

        config.apply_env(unicode_vars(std::env::vars_os()));
        Ok(config)
    }

    /// Parse a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| EmbedError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Apply `SPACEY_EMBED_*` variables from `vars`
    pub fn apply_env<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            if let Some(key) = key.strip_prefix(ENV_PREFIX) {
                self.set(&key.to_lowercase().replace('_', "-"), &value);
            }
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) {
        match key {
            "ignore" => {
                self.ignore = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
            }
            "follow-links" => self.follow_links = value == "true" || value == "1",
            "max-depth" => match value.parse() {
                Ok(depth) => self.max_depth = Some(depth),
                Err(_) => warn!("Ignoring invalid max-depth '{}'", value),
            },
            _ => debug!("Ignoring unknown configuration key '{}'", key),
        }
    }

    /// Whether a directory with this name is skipped
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore.iter().any(|ignored| ignored == name)
    }
}

/// Keep only variables whose name and value are valid UTF-8
fn unicode_vars<I>(vars: I) -> impl Iterator<Item = (String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = PackConfig::default();
        assert!(config.is_ignored(".git"));
        assert!(!config.is_ignored("node_modules"));
        assert!(!config.follow_links);
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn test_apply_env() {
        let mut config = PackConfig::default();
        config.apply_env(vars(&[
            ("SPACEY_EMBED_IGNORE", "target, dist,,"),
            ("SPACEY_EMBED_FOLLOW_LINKS", "true"),
            ("SPACEY_EMBED_MAX_DEPTH", "4"),
            ("PATH", "/usr/bin"),
        ]));
        assert_eq!(config.ignore, vec!["target", "dist"]);
        assert!(config.follow_links);
        assert_eq!(config.max_depth, Some(4));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_env_is_skipped() {
        use std::os::unix::ffi::OsStringExt;

        let vars = vec![
            (OsString::from("GARBAGE"), OsString::from_vec(vec![0xff, 0xfe])),
            (OsString::from_vec(vec![0xff]), OsString::from("x")),
            (OsString::from("SPACEY_EMBED_MAX_DEPTH"), OsString::from("2")),
        ];
        let mut config = PackConfig::default();
        config.apply_env(unicode_vars(vars));
        assert_eq!(config.max_depth, Some(2));
    }

    #[test]
    fn test_load_without_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = PackConfig::load(dir.path()).unwrap();
        assert!(config.is_ignored(".git"));
    }

    #[test]
    fn test_invalid_depth_is_ignored() {
        let mut config = PackConfig::default();
        config.set("max-depth", "deep");
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn test_partial_toml() {
        let config: PackConfig = toml::from_str("follow_links = true").unwrap();
        assert!(config.follow_links);
        assert_eq!(config.ignore, vec![".git"]);
    }
}
