// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! CommonJS `require()` on top of [`ModuleHooks`]
//!
//! The bookkeeping half (module records, the cache, per-module `require`
//! functions) lives in a small script so module objects stay ordinary
//! JavaScript values. The native half marshals strings into the hooks and
//! turns load failures into catchable `Error`s.
//!
//! Modules are cached under their canonical id, which is also what they see
//! as `module.id` and what their own relative requires resolve against.

use rquickjs::{Ctx, Exception, Function, Object};
use spacey_embed_core::ModuleHooks;
use spacey_embed_core::path::parent_path;
use std::rc::Rc;
use tracing::trace;

/// Installs the global `require` given the global object and the natives
const BOOTSTRAP: &str = r#"
(function (global, native) {
    'use strict';

    var cache = Object.create(null);

    function createRequire(parentId) {
        function require(id) {
            if (typeof id !== 'string') {
                throw new TypeError('The "id" argument must be of type string. Received ' + typeof id);
            }

            var resolved = native.resolve(id, parentId);
            var canonical = native.canonicalize(resolved);
            var cached = cache[canonical];
            if (cached !== undefined) {
                return cached.exports;
            }

            var module = {
                id: canonical,
                filename: canonical,
                exports: {},
                loaded: false
            };
            module.require = createRequire(canonical);
            cache[canonical] = module;

            try {
                var fn = native.compile(native.load(resolved));
                fn.call(module.exports, module.exports, module.require, module,
                    canonical, native.dirname(canonical));
            } catch (err) {
                delete cache[canonical];
                throw err;
            }

            module.loaded = true;
            return module.exports;
        }

        require.cache = cache;
        require.resolve = function (id) {
            return native.canonicalize(native.resolve(String(id), parentId));
        };
        return require;
    }

    global.require = createRequire('');
})
"#;

/// Wrap module source in the CommonJS function wrapper
fn wrap_module(source: &str) -> String {
    format!(
        "(function (exports, require, module, __filename, __dirname) {{\n{}\n}})",
        source
    )
}

/// Install the module system, routing resolution and loading through `hooks`
pub fn install<'js>(ctx: &Ctx<'js>, hooks: Rc<dyn ModuleHooks>) -> rquickjs::Result<()> {
    let native = Object::new(ctx.clone())?;

    let h = Rc::clone(&hooks);
    native.set(
        "resolve",
        Function::new(ctx.clone(), move |requested: String, parent: String| {
            h.resolve(&requested, &parent)
        })?,
    )?;

    let h = Rc::clone(&hooks);
    native.set(
        "canonicalize",
        Function::new(ctx.clone(), move |resolved: String| h.canonical_id(&resolved))?,
    )?;

    let h = Rc::clone(&hooks);
    native.set(
        "load",
        Function::new(
            ctx.clone(),
            move |ctx: Ctx<'js>, resolved: String| -> rquickjs::Result<String> {
                match h.load(&resolved) {
                    Ok(source) => Ok(source.to_string()),
                    Err(err) => Err(Exception::throw_message(&ctx, &err.to_string())),
                }
            },
        )?,
    )?;

    native.set(
        "compile",
        Function::new(
            ctx.clone(),
            |ctx: Ctx<'js>, source: String| -> rquickjs::Result<Function<'js>> {
                ctx.eval(wrap_module(&source))
            },
        )?,
    )?;

    native.set(
        "dirname",
        Function::new(ctx.clone(), |id: String| parent_path(&id).to_string())?,
    )?;

    let bootstrap: Function = ctx.eval(BOOTSTRAP)?;
    bootstrap.call::<_, ()>((ctx.globals(), native))?;
    trace!("module system installed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_module() {
        let wrapped = wrap_module("module.exports = 1;");
        assert!(wrapped.starts_with("(function (exports, require, module, __filename, __dirname) {"));
        assert!(wrapped.contains("\nmodule.exports = 1;\n"));
        assert!(wrapped.ends_with("})"));
    }

    #[test]
    fn test_wrap_module_keeps_trailing_line_comment_closed() {
        let wrapped = wrap_module("module.exports = 1; // done");
        assert!(wrapped.ends_with("// done\n})"));
    }
}
