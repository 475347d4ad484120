//! Batch cleanup orchestration.
//!
//! Phases:
//! - **Init** - create the output directory (fatal on failure)
//! - **Companions** - write mobile menu assets once, before any document
//! - **Documents** - read, rewrite, write; failures stay per document
//! - **Summary** - processed and skipped counts

use crate::{
    companion::{CompanionReport, ensure_companions},
    config::CleanConfig,
    debug,
    embed::COMPANIONS,
    log,
    logger::{ProgressLine, error_mark, ok_mark, skip_mark},
    rewrite::RuleSet,
    utils::plural_count,
};
use anyhow::{Context, Result};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

// ============================================================================
// Outcomes
// ============================================================================

/// Per-document I/O failure.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("cannot read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What happened to one listed document.
#[derive(Debug)]
pub enum FileOutcome {
    /// Written to the output; carries the names of the rules that fired.
    Processed(Vec<&'static str>),
    /// Not present in the source directory.
    Missing,
    Failed(DocumentError),
}

#[derive(Debug)]
pub struct DocumentReport {
    pub name: String,
    pub outcome: FileOutcome,
}

/// Result of a whole batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub output: PathBuf,
    pub companions: Option<CompanionReport>,
    pub documents: Vec<DocumentReport>,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Processed(_)))
    }

    pub fn missing(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Missing))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed(_)))
    }

    /// Missing plus failed.
    pub fn skipped(&self) -> usize {
        self.missing() + self.failed()
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.documents.iter().filter(|d| pred(&d.outcome)).count()
    }
}

// ============================================================================
// Batch
// ============================================================================

/// Clean every configured document.
///
/// Only environment failures (output directory, companion files) return
/// `Err`; anything scoped to one document is recorded in the report.
pub fn clean_site(config: &CleanConfig) -> Result<BatchReport> {
    fs::create_dir_all(&config.output).with_context(|| {
        format!(
            "failed to create output directory `{}`",
            config.output.display()
        )
    })?;

    let companions = if config.menu.uses_companions() {
        let report = ensure_companions(&config.output, &config.menu.dir, &COMPANIONS)?;
        log_companions(&report);
        Some(report)
    } else {
        None
    };

    let rules = RuleSet::standard(config.menu.mode, &config.menu.dir);
    debug!("clean"; "{} loaded", plural_count(rules.len(), "rule"));

    let progress = ProgressLine::new("clean", &[("documents", config.documents.len())]);
    let mut documents = Vec::with_capacity(config.documents.len());
    for name in &config.documents {
        let outcome = clean_document(
            &rules,
            &config.source_path(name),
            &config.output_path(name),
        );
        log_outcome(name, &outcome);
        progress.inc("documents");
        documents.push(DocumentReport {
            name: name.clone(),
            outcome,
        });
    }
    progress.finish();

    Ok(BatchReport {
        output: config.output.clone(),
        companions,
        documents,
    })
}

/// Read, rewrite and write a single document.
pub fn clean_document(rules: &RuleSet, input: &Path, output: &Path) -> FileOutcome {
    if !input.exists() {
        return FileOutcome::Missing;
    }

    let content = match fs::read_to_string(input) {
        Ok(content) => content,
        Err(source) => {
            return FileOutcome::Failed(DocumentError::Read {
                path: input.to_path_buf(),
                source,
            });
        }
    };

    let rewrite = rules.apply(&content);

    match fs::write(output, &rewrite.text) {
        Ok(()) => FileOutcome::Processed(rewrite.fired),
        Err(source) => FileOutcome::Failed(DocumentError::Write {
            path: output.to_path_buf(),
            source,
        }),
    }
}

fn log_companions(report: &CompanionReport) {
    for path in &report.created {
        debug!("clean"; "created {}", path.display());
    }
    for path in &report.skipped {
        debug!("clean"; "kept existing {}", path.display());
    }
}

fn log_outcome(name: &str, outcome: &FileOutcome) {
    match outcome {
        FileOutcome::Processed(fired) => {
            log!("clean"; "{} {}", ok_mark(), name);
            if !fired.is_empty() {
                debug!("clean"; "  {}", fired.join(", "));
            }
        }
        FileOutcome::Missing => log!("skip"; "{} {} (file not found)", skip_mark(), name),
        FileOutcome::Failed(err) => log!("error"; "{} {} - {}", error_mark(), name, err),
    }
}

// ============================================================================
// Command
// ============================================================================

/// Run the cleanup command: confirm, clean, summarize.
pub fn run(config: &CleanConfig, assume_yes: bool) -> Result<()> {
    log!("clean"; "source: {}", config.source.display());
    log!("clean"; "output: {}", config.output.display());
    if let Some(path) = &config.config_path {
        debug!("clean"; "config: {}", path.display());
    }

    if !assume_yes && !prompt_continue()? {
        log!("clean"; "cancelled");
        return Ok(());
    }

    let report = clean_site(config)?;
    print_summary(&report);
    Ok(())
}

fn print_summary(report: &BatchReport) {
    log!("done"; "processed {}", plural_count(report.processed(), "file"));
    if report.skipped() > 0 {
        log!(
            "skip"; "skipped {} ({} missing, {} failed)",
            plural_count(report.skipped(), "file"),
            report.missing(),
            report.failed()
        );
    }
    log!("done"; "cleaned files saved to {}", report.output.display());
}

/// Prompt user to continue. Returns true only if user explicitly confirms.
fn prompt_continue() -> Result<bool> {
    use std::io::Write;

    eprint!("Continue? [y/N] ");
    io::stderr().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let input = input.trim().to_lowercase();
    // Default no (empty input), explicit "y" or "yes" to continue
    Ok(input == "y" || input == "yes")
}

// ============================================================================
// Tests
// ============================================================================
