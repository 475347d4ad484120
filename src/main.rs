//! sitescrub - strip website-builder markup and assets from exported pages.

#![allow(dead_code)]

mod cli;
mod companion;
mod config;
mod embed;
mod logger;
mod rewrite;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::Cli;
use config::CleanConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = CleanConfig::load(&cli)?;
    cli::clean::run(&config, cli.yes)
}
