// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Interpreter lifecycle
//!
//! An [`EmbedHost`] owns one QuickJS runtime and context. Creating it
//! installs the console and the module system; [`EmbedHost::run`] consumes
//! it, evaluates the entry script once and tears the interpreter down on
//! return, whether the script succeeded or not.

use crate::console::{self, ConsoleSink};
use crate::error::Result;
use crate::module_system;
use rquickjs::convert::Coerced;
use rquickjs::{CatchResultExt, CaughtError, Context, Ctx, FromJs, Runtime, Value};
use spacey_embed_core::ModuleHooks;
use std::rc::Rc;
use tracing::debug;

/// Result of evaluating the entry script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Entry script and everything it required ran to completion
    Completed,
    /// An uncaught error escaped the entry script; holds its string form
    Failed(String),
}

impl RunOutcome {
    /// Whether the run completed without an uncaught error
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Completed)
    }
}

/// A ready-to-run interpreter with console and `require()` installed
pub struct EmbedHost {
    // Dropped before the runtime that owns its heap
    context: Context,
    _runtime: Runtime,
    console: Rc<dyn ConsoleSink>,
}

impl EmbedHost {
    /// Create the interpreter and install the console and module system
    pub fn new(hooks: Rc<dyn ModuleHooks>, console: Rc<dyn ConsoleSink>) -> Result<Self> {
        let runtime = Runtime::new()?;
        let context = Context::full(&runtime)?;

        context.with(|ctx| -> rquickjs::Result<()> {
            console::install(&ctx, Rc::clone(&console))?;
            module_system::install(&ctx, hooks)?;
            Ok(())
        })?;
        debug!("interpreter ready");

        Ok(Self {
            context,
            _runtime: runtime,
            console,
        })
    }

    /// Evaluate the entry script
    ///
    /// An uncaught error is converted to a string, reported through the
    /// console sink and returned as [`RunOutcome::Failed`].
    pub fn run(self, entry: &str) -> RunOutcome {
        debug!(bytes = entry.len(), "evaluating entry script");
        let outcome = self.context.with(|ctx| {
            match ctx.eval::<Value, _>(entry).catch(&ctx) {
                Ok(_) => RunOutcome::Completed,
                Err(err) => RunOutcome::Failed(describe_error(&ctx, err)),
            }
        });

        match &outcome {
            RunOutcome::Completed => debug!("entry script completed"),
            RunOutcome::Failed(message) => {
                debug!(%message, "entry script failed");
                self.console.report(message);
            }
        }
        outcome
    }
}

impl Drop for EmbedHost {
    fn drop(&mut self) {
        debug!("tearing down interpreter");
    }
}

/// String form of an uncaught error, as the script's `String(err)` would give
fn describe_error<'js>(ctx: &Ctx<'js>, err: CaughtError<'js>) -> String {
    let value = match err {
        CaughtError::Error(err) => return err.to_string(),
        CaughtError::Exception(exception) => exception.into_object().into_value(),
        CaughtError::Value(value) => value,
    };
    match Coerced::<String>::from_js(ctx, value) {
        Ok(Coerced(message)) => message,
        Err(err) => err.to_string(),
    }
}
