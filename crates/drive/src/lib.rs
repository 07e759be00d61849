//! Headless interaction layer for the drive tree
//!
//! Turns drop payloads and typed commands into selection changes and moves,
//! and renders the drive as text.

pub mod cli;
pub mod command;
pub mod payload;
pub mod render;

use anyhow::{Context, Result};
use drive_tree::prelude::*;
use log::info;
use std::fs::File;
use std::io::{self, BufReader, Write};

pub use cli::Args;

/// Seed a drive from the options and run the command loop
pub fn run(args: &Args) -> Result<()> {
    let mut drive = Drive::generate(args.count, args.seed);
    if args.multi {
        drive.toggle_multi_select_mode(true);
    }

    let stdout = io::stdout();
    let mut output = stdout.lock();
    writeln!(output, "{}", render::render(&drive).trim_end())?;

    match &args.script {
        Some(path) => {
            info!("Reading commands from {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            command::run(&mut drive, BufReader::new(file), output)
        }
        None => command::run(&mut drive, io::stdin().lock(), output),
    }
}
