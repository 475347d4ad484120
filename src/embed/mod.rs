//! Embedded companion assets.
//!
//! Static files compiled into the binary and written next to the cleaned
//! documents, replacing the behaviour of the vendor theme scripts that the
//! rewrite rules comment out.
//!
//! # Usage
//!
//! ```ignore
//! use embed::{COMPANIONS, MOBILE_MENU_JS};
//!
//! let path = output.join("files").join(MOBILE_MENU_JS.name);
//! std::fs::write(path, MOBILE_MENU_JS.content)?;
//! ```

/// A static file with a fixed name and content.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedAsset {
    /// File name under the companion directory.
    pub name: &'static str,
    pub content: &'static str,
}

impl EmbeddedAsset {
    pub const fn new(name: &'static str, content: &'static str) -> Self {
        Self { name, content }
    }
}

/// Slide-in drawer styles for the mobile navigation.
pub const MOBILE_MENU_CSS: EmbeddedAsset =
    EmbeddedAsset::new("mobile-menu.css", include_str!("mobile-menu.css"));

/// Hamburger toggle and outside-click handling for the mobile navigation.
pub const MOBILE_MENU_JS: EmbeddedAsset =
    EmbeddedAsset::new("mobile-menu.js", include_str!("mobile-menu.js"));

/// Companions written once per batch in companion mode.
pub const COMPANIONS: [EmbeddedAsset; 2] = [MOBILE_MENU_CSS, MOBILE_MENU_JS];
