// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # spacey-embed-host
//!
//! Runs a bundled CommonJS program on an embedded QuickJS interpreter.
//!
//! The host wires [`spacey_embed_core::ModuleHooks`] into a global
//! `require()`, exposes a `console`, evaluates the entry script and reports
//! any uncaught error instead of propagating it.
//!
//! ```rust,ignore
//! use spacey_embed_core::Bundle;
//! use spacey_embed_host::{run_bundle, StdConsole};
//! use std::rc::Rc;
//!
//! let bundle = Bundle::read_from(Path::new("app.bundle.json"))?;
//! let outcome = run_bundle(bundle, Rc::new(StdConsole))?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod console;
pub mod error;
pub mod host;
pub mod module_system;

// Re-exports
pub use console::{CapturedConsole, ConsoleSink, Level, StdConsole};
pub use error::{HostError, Result};
pub use host::{EmbedHost, RunOutcome};

use spacey_embed_core::{Bundle, EmbeddedModules};
use std::rc::Rc;
use std::sync::Arc;

/// Load `bundle` into memory and run its entry script once
pub fn run_bundle(bundle: Bundle, console: Rc<dyn ConsoleSink>) -> Result<RunOutcome> {
    let (registry, entry) = bundle.into_registry()?;
    tracing::debug!(
        entry = %entry.name,
        modules = registry.len(),
        "running bundle"
    );
    let hooks = Rc::new(EmbeddedModules::new(Arc::new(registry)));
    let host = EmbedHost::new(hooks, console)?;
    Ok(host.run(&entry.source))
}
