//! Companion asset creation.
//!
//! Companions are written once per batch, before any document is cleaned, so
//! every injected reference points at a file that exists. Existing files are
//! never overwritten: a hand-edited `mobile-menu.css` survives reruns.

use crate::embed::EmbeddedAsset;
use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

/// Which companion files were written and which were already there.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CompanionReport {
    pub created: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Write each asset under `output_root/dir` unless it already exists.
///
/// `create_new` makes the existence check and the write a single step.
pub fn ensure_companions(
    output_root: &Path,
    dir: &str,
    assets: &[EmbeddedAsset],
) -> Result<CompanionReport> {
    let target_dir = output_root.join(dir);
    fs::create_dir_all(&target_dir).with_context(|| {
        format!("failed to create companion directory `{}`", target_dir.display())
    })?;

    let mut report = CompanionReport::default();
    for asset in assets {
        let path = target_dir.join(asset.name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(asset.content.as_bytes())
                    .with_context(|| format!("failed to write `{}`", path.display()))?;
                report.created.push(path);
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => report.skipped.push(path),
            Err(err) => {
                return Err(err).with_context(|| format!("failed to create `{}`", path.display()));
            }
        }
    }
    Ok(report)
}
