//! Command-line interface definitions.

use crate::config::MenuMode;
use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Strip website-builder markup and assets from exported HTML pages
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: search upward for sitescrub.toml)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Directory holding the exported pages
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// Directory receiving the cleaned pages
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// How to replace the vendor mobile menu
    #[arg(short, long, value_enum)]
    pub menu: Option<MenuMode>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,

    /// Pages to clean instead of the configured list
    #[arg(value_name = "DOCUMENT")]
    pub documents: Vec<String>,
}
