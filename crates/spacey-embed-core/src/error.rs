// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for module registry, loading and packing

use std::path::PathBuf;
use thiserror::Error;

/// Result type for registry and packer operations
pub type Result<T> = std::result::Result<T, EmbedError>;

/// Errors that can occur while packing, loading or resolving modules
#[derive(Debug, Error)]
pub enum EmbedError {
    /// No source registered under the canonical module id
    #[error("Cannot find module '{0}'")]
    ModuleNotFound(String),

    /// Entry script passed to the packer does not exist
    #[error("Entry script not found: {}", .0.display())]
    EntryNotFound(PathBuf),

    /// Bundle is structurally unusable
    #[error("Invalid bundle: {0}")]
    InvalidBundle(String),

    /// Configuration file could not be parsed
    #[error("Invalid configuration in {}: {reason}", .path.display())]
    Config {
        /// Configuration file
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// File system error
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk error
    #[error("File system error: {0}")]
    Walk(#[from] walkdir::Error),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EmbedError {
    /// Create a module not found error
    pub fn module_not_found(id: impl Into<String>) -> Self {
        Self::ModuleNotFound(id.into())
    }

    /// Create an invalid bundle error
    pub fn invalid_bundle(reason: impl Into<String>) -> Self {
        Self::InvalidBundle(reason.into())
    }

    /// The canonical id carried by a [`EmbedError::ModuleNotFound`]
    pub fn missing_module(&self) -> Option<&str> {
        match self {
            Self::ModuleNotFound(id) => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_not_found_message() {
        let err = EmbedError::module_not_found("lib/missing.js");
        assert_eq!(err.to_string(), "Cannot find module 'lib/missing.js'");
        assert_eq!(err.missing_module(), Some("lib/missing.js"));
    }

    #[test]
    fn test_other_errors_carry_no_module() {
        let err = EmbedError::invalid_bundle("unsupported version 9");
        assert_eq!(err.missing_module(), None);
        assert_eq!(err.to_string(), "Invalid bundle: unsupported version 9");
    }
}
