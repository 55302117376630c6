// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for the host adapter

use spacey_embed_core::EmbedError;
use thiserror::Error;

/// Result type for host operations
pub type Result<T> = std::result::Result<T, HostError>;

/// Errors raised while setting up the interpreter or preparing a bundle
///
/// Script failures are not errors at this level; they are reported as
/// [`crate::RunOutcome::Failed`].
#[derive(Debug, Error)]
pub enum HostError {
    /// Interpreter could not be created or initialized
    #[error("Interpreter error: {0}")]
    Engine(String),

    /// Bundle or registry error
    #[error(transparent)]
    Embed(#[from] EmbedError),
}

impl From<rquickjs::Error> for HostError {
    fn from(err: rquickjs::Error) -> Self {
        Self::Engine(err.to_string())
    }
}
