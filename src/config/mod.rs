//! Cleanup configuration from `sitescrub.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   └── menu       # [menu]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # CleanConfig (this file)
//! ```
//!
//! # Layering
//!
//! Defaults, then the optional config file (searched upward from the current
//! directory), then CLI flags. Paths from the file are relative to the file's
//! directory; paths from the CLI are relative to the current directory.
//!
//! ```toml
//! source = "."
//! output = "cleaned_html"
//! documents = ["index.html", "about.html"]
//!
//! [menu]
//! mode = "companion"
//! dir = "files"
//! ```

pub mod section;
pub mod types;
mod util;

use util::{find_config_file, is_bare_file_name, resolve_against};

pub use section::{MenuConfig, MenuMode};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{cli::Cli, log};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    collections::HashSet,
    fs,
    io,
    path::{Path, PathBuf},
};

/// Config file looked up when `--config` is not given.
pub const CONFIG_FILE: &str = "sitescrub.toml";

/// Pages of the exported site, processed in this order.
pub const DEFAULT_DOCUMENTS: [&str; 27] = [
    "index.html",
    "about.html",
    "blue-yonder.html",
    "bugaroo.html",
    "bugpods.html",
    "cellular.html",
    "city-lights.html",
    "crowned.html",
    "extricate.html",
    "formations.html",
    "gallery.html",
    "homage-to-miro.html",
    "inner-workings.html",
    "insectoid.html",
    "jumbled.html",
    "milking-strawberries.html",
    "new-work.html",
    "night-sky.html",
    "out-the-window.html",
    "red-rain.html",
    "rolling.html",
    "sketchbook.html",
    "string-theory.html",
    "sunshine-thoughts.html",
    "the-secret-garden.html",
    "wop-10.html",
    "wop-9.html",
];

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing sitescrub.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    /// Config file in use, if any (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Base for relative paths from the file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Directory holding the documents
    pub source: PathBuf,

    /// Destination directory, created if absent
    pub output: PathBuf,

    /// File names to clean, in order
    pub documents: Vec<String>,

    /// Mobile menu replacement
    pub menu: MenuConfig,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            root: PathBuf::new(),
            source: PathBuf::from("."),
            output: PathBuf::from("cleaned_html"),
            documents: DEFAULT_DOCUMENTS.iter().map(|s| (*s).to_owned()).collect(),
            menu: MenuConfig::default(),
        }
    }
}

impl CleanConfig {
    pub const DOCUMENTS: FieldPath = FieldPath::new("documents");

    /// Load configuration for the current working directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        Self::load_from(cli, &cwd)
    }

    /// Load configuration as if run from `cwd`.
    pub fn load_from(cli: &Cli, cwd: &Path) -> Result<Self> {
        let config_path = match &cli.config {
            Some(path) => {
                let path = resolve_against(cwd, path);
                if !path.is_file() {
                    let err = io::Error::new(io::ErrorKind::NotFound, "config file not found");
                    return Err(ConfigError::Io(path, err).into());
                }
                Some(path)
            }
            None => find_config_file(cwd, Path::new(CONFIG_FILE)),
        };

        let mut config = match &config_path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };

        let root = config_path
            .as_deref()
            .and_then(Path::parent)
            .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
        config.config_path = config_path;
        config.set_root(&root);
        config.apply_cli(cli, cwd);
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Set the base directory and resolve file-relative paths against it.
    pub fn set_root(&mut self, root: &Path) {
        self.root = root.to_path_buf();
        self.source = resolve_against(root, &self.source);
        self.output = resolve_against(root, &self.output);
    }

    /// Apply CLI overrides. CLI paths are relative to `cwd`.
    fn apply_cli(&mut self, cli: &Cli, cwd: &Path) {
        if let Some(source) = &cli.source {
            self.source = resolve_against(cwd, source);
        }
        if let Some(output) = &cli.output {
            self.output = resolve_against(cwd, output);
        }
        if let Some(mode) = cli.menu {
            self.menu.mode = mode;
        }
        if !cli.documents.is_empty() {
            self.documents = cli.documents.clone();
        }
    }

    /// Validate the merged configuration, reporting every problem at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        if self.documents.is_empty() {
            diag.error(Self::DOCUMENTS, "must list at least one document");
        }

        let mut seen = HashSet::new();
        for name in &self.documents {
            if !is_bare_file_name(name) {
                diag.error_with_hint(
                    Self::DOCUMENTS,
                    format!("`{name}` is not a plain file name"),
                    "documents are looked up directly inside `source`",
                );
            } else if !seen.insert(name.as_str()) {
                diag.error(Self::DOCUMENTS, format!("`{name}` is listed twice"));
            }
        }

        self.menu.validate(&mut diag);
        diag.into_result()
    }

    /// Path of a document in the source directory.
    pub fn source_path(&self, name: &str) -> PathBuf {
        self.source.join(name)
    }

    /// Path of a cleaned document in the output directory.
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output.join(name)
    }
}

// ============================================================================
// tests
// ============================================================================
