// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Command line interface for spacey-embed

use clap::{Args, Parser, Subcommand};
use spacey_embed_core::PackConfig;
use std::path::PathBuf;

/// spacey-embed - pack CommonJS programs into bundles and run them
#[derive(Parser, Debug)]
#[command(name = "spacey-embed")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pack an entry script and its directory into a bundle file
    Pack(PackArgs),

    /// Run a bundle file
    Run(RunArgs),

    /// Pack in memory and run immediately
    Exec(ExecArgs),
}

/// Options shared by commands that walk a program directory
#[derive(Args, Debug, Default)]
pub struct WalkArgs {
    /// Directory name to skip (repeatable)
    #[arg(long = "ignore", value_name = "DIR")]
    pub ignore: Vec<String>,

    /// Follow symbolic links while walking
    #[arg(long)]
    pub follow_links: bool,
}

impl WalkArgs {
    /// Layer the flags over a loaded configuration
    pub fn apply(&self, config: &mut PackConfig) {
        config.ignore.extend(self.ignore.iter().cloned());
        if self.follow_links {
            config.follow_links = true;
        }
    }
}

#[derive(Args, Debug)]
pub struct PackArgs {
    /// Entry script
    pub entry: PathBuf,

    /// Bundle file to write
    pub output: PathBuf,

    #[command(flatten)]
    pub walk: WalkArgs,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Bundle file to run
    pub bundle: PathBuf,
}

#[derive(Args, Debug)]
pub struct ExecArgs {
    /// Entry script
    pub entry: PathBuf,

    #[command(flatten)]
    pub walk: WalkArgs,
}
