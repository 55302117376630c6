// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Console object exposed to bundled scripts

use rquickjs::convert::Coerced;
use rquickjs::function::{Opt, Rest};
use rquickjs::{Ctx, Function, Object};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Instant;

/// Severity of a console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// `console.log`
    Log,
    /// `console.info`
    Info,
    /// `console.debug`
    Debug,
    /// `console.warn`
    Warn,
    /// `console.error`
    Error,
    /// `console.trace`
    Trace,
}

impl Level {
    /// Whether the line belongs on stderr
    pub fn is_diagnostic(self) -> bool {
        matches!(self, Level::Warn | Level::Error | Level::Trace)
    }
}

/// Destination of console output
pub trait ConsoleSink {
    /// Write one formatted line
    fn write(&self, level: Level, line: &str);

    /// Report an uncaught script error
    fn report(&self, message: &str) {
        self.write(Level::Log, message);
    }
}

/// Console writing to the process stdout/stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl ConsoleSink for StdConsole {
    fn write(&self, level: Level, line: &str) {
        if level.is_diagnostic() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

/// Console that keeps every line in memory
#[derive(Debug, Default)]
pub struct CapturedConsole {
    lines: RefCell<Vec<(Level, String)>>,
}

impl CapturedConsole {
    /// Create an empty capture
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured lines with their level
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.lines.borrow().clone()
    }

    /// Captured line text, in order
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().iter().map(|(_, l)| l.clone()).collect()
    }
}

impl ConsoleSink for CapturedConsole {
    fn write(&self, level: Level, line: &str) {
        self.lines.borrow_mut().push((level, line.to_string()));
    }
}

/// Per-context console bookkeeping
#[derive(Default)]
struct ConsoleState {
    timers: HashMap<String, Instant>,
    counters: HashMap<String, u64>,
    group_level: usize,
}

struct Console {
    sink: Rc<dyn ConsoleSink>,
    state: RefCell<ConsoleState>,
}

impl Console {
    fn emit(&self, level: Level, line: &str) {
        let indent = "  ".repeat(self.state.borrow().group_level);
        self.sink.write(level, &format!("{}{}", indent, line));
    }
}

const DEFAULT_LABEL: &str = "default";

fn join(args: Rest<Coerced<String>>) -> String {
    args.0
        .into_iter()
        .map(|arg| arg.0)
        .collect::<Vec<_>>()
        .join(" ")
}

fn label(arg: Opt<Coerced<String>>) -> String {
    arg.0
        .map(|l| l.0)
        .unwrap_or_else(|| DEFAULT_LABEL.to_string())
}

/// Install `console` on the global object
pub fn install(ctx: &Ctx<'_>, sink: Rc<dyn ConsoleSink>) -> rquickjs::Result<()> {
    let console = Rc::new(Console {
        sink,
        state: RefCell::new(ConsoleState::default()),
    });
    let object = Object::new(ctx.clone())?;

    for (name, level) in [
        ("log", Level::Log),
        ("info", Level::Info),
        ("debug", Level::Debug),
        ("warn", Level::Warn),
        ("error", Level::Error),
    ] {
        let console = Rc::clone(&console);
        let func = Function::new(ctx.clone(), move |args: Rest<Coerced<String>>| {
            console.emit(level, &join(args));
        })?;
        object.set(name, func)?;
    }

    let c = Rc::clone(&console);
    object.set(
        "trace",
        Function::new(ctx.clone(), move |args: Rest<Coerced<String>>| {
            let message = join(args);
            if message.is_empty() {
                c.emit(Level::Trace, "Trace");
            } else {
                c.emit(Level::Trace, &format!("Trace: {}", message));
            }
        })?,
    )?;

    let c = Rc::clone(&console);
    object.set(
        "assert",
        Function::new(
            ctx.clone(),
            move |condition: Opt<Coerced<bool>>, args: Rest<Coerced<String>>| {
                if !condition.0.map(|v| v.0).unwrap_or(false) {
                    let message = join(args);
                    if message.is_empty() {
                        c.emit(Level::Error, "Assertion failed");
                    } else {
                        c.emit(Level::Error, &format!("Assertion failed: {}", message));
                    }
                }
            },
        )?,
    )?;

    let c = Rc::clone(&console);
    object.set(
        "count",
        Function::new(ctx.clone(), move |arg: Opt<Coerced<String>>| {
            let label = label(arg);
            let count = {
                let mut state = c.state.borrow_mut();
                let count = state.counters.entry(label.clone()).or_insert(0);
                *count += 1;
                *count
            };
            c.emit(Level::Log, &format!("{}: {}", label, count));
        })?,
    )?;

    let c = Rc::clone(&console);
    object.set(
        "countReset",
        Function::new(ctx.clone(), move |arg: Opt<Coerced<String>>| {
            c.state.borrow_mut().counters.remove(&label(arg));
        })?,
    )?;

    let c = Rc::clone(&console);
    object.set(
        "time",
        Function::new(ctx.clone(), move |arg: Opt<Coerced<String>>| {
            c.state.borrow_mut().timers.insert(label(arg), Instant::now());
        })?,
    )?;

    let c = Rc::clone(&console);
    object.set(
        "timeEnd",
        Function::new(ctx.clone(), move |arg: Opt<Coerced<String>>| {
            let label = label(arg);
            let start = c.state.borrow_mut().timers.remove(&label);
            match start {
                Some(start) => {
                    let elapsed = start.elapsed().as_secs_f64() * 1000.0;
                    c.emit(Level::Log, &format!("{}: {:.3}ms", label, elapsed));
                }
                None => c.emit(Level::Warn, &format!("Timer '{}' does not exist", label)),
            }
        })?,
    )?;

    let c = Rc::clone(&console);
    object.set(
        "group",
        Function::new(ctx.clone(), move |args: Rest<Coerced<String>>| {
            let message = join(args);
            if !message.is_empty() {
                c.emit(Level::Log, &message);
            }
            c.state.borrow_mut().group_level += 1;
        })?,
    )?;

    let c = Rc::clone(&console);
    object.set(
        "groupEnd",
        Function::new(ctx.clone(), move || {
            let mut state = c.state.borrow_mut();
            state.group_level = state.group_level.saturating_sub(1);
        })?,
    )?;

    ctx.globals().set("console", object)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_levels() {
        assert!(Level::Warn.is_diagnostic());
        assert!(Level::Error.is_diagnostic());
        assert!(Level::Trace.is_diagnostic());
        assert!(!Level::Log.is_diagnostic());
        assert!(!Level::Info.is_diagnostic());
    }

    #[test]
    fn test_captured_console_report() {
        let console = CapturedConsole::new();
        console.write(Level::Warn, "careful");
        console.report("Error: boom");
        assert_eq!(
            console.entries(),
            vec![
                (Level::Warn, "careful".to_string()),
                (Level::Log, "Error: boom".to_string())
            ]
        );
    }
}
