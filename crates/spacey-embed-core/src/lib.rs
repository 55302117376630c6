// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # spacey-embed-core
//!
//! CommonJS module resolution against an in-memory registry.
//!
//! A bundled program never touches the file system once it starts: every
//! module source and every directory index is loaded up front into a
//! [`ModuleRegistry`]. An interpreter's module system then drives two
//! callbacks, exposed as [`ModuleHooks`]:
//!
//! - `resolve(specifier, parent_id)` joins local specifiers onto the
//!   parent's directory and namespaces everything else under
//!   `node_modules/`. It never fails.
//! - `load(resolved_id)` canonicalizes the id (collapsing `./` and `../`,
//!   applying directory indexes) and returns the registered source, or
//!   fails with `Cannot find module '<canonical id>'`.
//!
//! ## Quick Start
//!
//! ```rust
//! use spacey_embed_core::{EmbeddedModules, ModuleHooks, ModuleRegistry};
//! use std::sync::Arc;
//!
//! let registry = ModuleRegistry::builder()
//!     .module("lib/index.js", "module.exports = 42;")
//!     .index("lib", "lib/index.js")
//!     .build();
//! let hooks = EmbeddedModules::new(Arc::new(registry));
//!
//! let resolved = hooks.resolve("./lib", "");
//! assert_eq!(hooks.load(&resolved).unwrap(), "module.exports = 42;");
//! ```
//!
//! Registries are usually produced by the [`Packer`] and shipped as a
//! [`Bundle`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bundle;
pub mod config;
pub mod error;
pub mod hooks;
pub mod loader;
pub mod packer;
pub mod path;
pub mod registry;
pub mod resolver;

// Re-exports
pub use bundle::{Bundle, EntryScript, BUNDLE_VERSION};
pub use config::PackConfig;
pub use error::{EmbedError, Result};
pub use hooks::{EmbeddedModules, ModuleHooks};
pub use loader::ModuleLoader;
pub use packer::Packer;
pub use registry::{ModuleRegistry, RegistryBuilder};
pub use resolver::ModuleResolver;
