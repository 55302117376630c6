// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! spacey-embed - run CommonJS programs from an in-memory module bundle
//!
//! ## Commands
//!
//! - `pack <ENTRY> <OUTPUT>` packs an entry script and every module next to
//!   it into a bundle file
//! - `run <BUNDLE>` loads a bundle and evaluates its entry script
//! - `exec <ENTRY>` packs in memory and runs straight away
//!
//! A script that throws is reported on stdout; the process still exits
//! successfully. Only failures before the interpreter starts are fatal.

mod cli;

use anyhow::Context as _;
use clap::Parser;
use cli::{Cli, Commands, ExecArgs, PackArgs, RunArgs, WalkArgs};
use owo_colors::OwoColorize;
use spacey_embed_core::{Bundle, PackConfig, Packer};
use spacey_embed_host::{run_bundle, StdConsole};
use std::path::Path;
use std::process::ExitCode;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Pack(args) => pack(args),
        Commands::Run(args) => run(args),
        Commands::Exec(args) => exec(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Install the tracing subscriber; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default = if verbose {
        "spacey_embed=debug,spacey_embed_core=debug,spacey_embed_host=debug"
    } else {
        "spacey_embed=warn,spacey_embed_core=warn,spacey_embed_host=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn pack_config(entry: &Path, walk: &WalkArgs) -> anyhow::Result<PackConfig> {
    let root = match entry.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut config = PackConfig::load(root)?;
    walk.apply(&mut config);
    Ok(config)
}

fn build_bundle(entry: &Path, walk: &WalkArgs) -> anyhow::Result<Bundle> {
    let packer = Packer::new(pack_config(entry, walk)?);
    let bundle = packer
        .pack_with_progress(entry, |path| {
            println!("Building {} {}", path.display().bold(), "OK".bright_green());
        })
        .with_context(|| format!("failed to pack {}", entry.display()))?;
    Ok(bundle)
}

fn pack(args: &PackArgs) -> anyhow::Result<()> {
    let bundle = build_bundle(&args.entry, &args.walk)?;
    bundle
        .write_to(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!(
        "Packed {} into {}",
        args.entry.display().bold(),
        args.output.display().cyan()
    );
    Ok(())
}

fn run(args: &RunArgs) -> anyhow::Result<()> {
    let bundle = Bundle::read_from(&args.bundle)
        .with_context(|| format!("failed to read bundle {}", args.bundle.display()))?;
    execute(bundle)
}

fn exec(args: &ExecArgs) -> anyhow::Result<()> {
    let bundle = build_bundle(&args.entry, &args.walk)?;
    execute(bundle)
}

/// Evaluate the bundle; script failures are reported, not returned
fn execute(bundle: Bundle) -> anyhow::Result<()> {
    let outcome = run_bundle(bundle, Rc::new(StdConsole))?;
    tracing::debug!(success = outcome.is_success(), "program finished");
    Ok(())
}
