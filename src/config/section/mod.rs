//! Configuration section definitions.
//!
//! | Module | TOML Section | Purpose                          |
//! |--------|--------------|----------------------------------|
//! | `menu` | `[menu]`     | Mobile navigation replacement    |

mod menu;

pub use menu::{MenuConfig, MenuMode};
