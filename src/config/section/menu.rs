//! `[menu]` section configuration.
//!
//! Controls what replaces the vendor mobile navigation script once it has
//! been commented out.
//!
//! # Example
//!
//! ```toml
//! [menu]
//! mode = "companion"   # companion | inline | off
//! dir = "files"        # companion directory, relative to the output
//! ```

use crate::config::{ConfigDiagnostics, FieldPath, util::is_contained_relative};
use serde::Deserialize;

/// How the mobile menu behaviour is restored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MenuMode {
    /// Write `mobile-menu.css`/`mobile-menu.js` and reference them.
    #[default]
    Companion,
    /// Inline a small toggle script before `</body>`.
    Inline,
    /// Leave the navigation alone.
    Off,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub mode: MenuMode,
    /// Companion directory relative to the output directory.
    pub dir: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            mode: MenuMode::default(),
            dir: "files".into(),
        }
    }
}

impl MenuConfig {
    pub const DIR: FieldPath = FieldPath::new("menu.dir");

    /// Whether companion files must be written before documents.
    pub fn uses_companions(&self) -> bool {
        self.mode == MenuMode::Companion
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !is_contained_relative(&self.dir) {
            diag.error_with_hint(
                Self::DIR,
                format!("`{}` must stay inside the output directory", self.dir),
                "use a relative path such as \"files\"",
            );
        }
    }
}
