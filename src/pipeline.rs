//! Pipeline driver.
//!
//! Sequences the full cachebust run that a build-completion hook invokes:
//!
//! ```text
//! 1. Stamp      scan output_dir, hash, rename    → manifest
//! 2. Rewrite    HTML + extra files               → stamped references
//! 3. Persist    manifest                         → asset-manifest.json
//! 4. Emit       cache-control directives         → .htaccess (optional)
//! ```
//!
//! Strictly sequential, one file at a time: the manifest must be fully
//! populated before rewriting begins, and nothing downstream benefits from
//! pipelining. The driver assumes exclusive access to the output directory
//! for the duration of a run.
//!
//! When the manifest comes back empty (no eligible assets), steps 2–4 are
//! skipped entirely — no manifest file is written for a run that renamed
//! nothing. When `production` is off the whole run is a no-op; the pipeline
//! only earns its keep on published builds, and unstamped filenames are far
//! friendlier during development.
//!
//! Errors from any step abort the remainder of the run and propagate to the
//! caller. Filesystem changes already made are not rolled back; the CLI is
//! the single boundary that turns an error into a logged message and a
//! non-zero exit, so a fingerprinting failure never has to sink the
//! surrounding site build.

use crate::cache_control;
use crate::config::{ConfigError, PipelineConfig};
use crate::rewrite::{self, RewriteError, RewriteReport};
use crate::stamp::{self, Manifest, StampError};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the persisted manifest within the output directory.
pub const MANIFEST_FILENAME: &str = "asset-manifest.json";

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Stamp error: {0}")]
    Stamp(#[from] StampError),
    #[error("Rewrite error: {0}")]
    Rewrite(#[from] RewriteError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// How a run ended (the failure terminal state is `Err` at the API boundary).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Production mode off — nothing was done.
    SkippedNonProduction,
    /// No eligible assets found — nothing was renamed or written.
    NoAssets,
    /// Assets stamped, references rewritten, artifacts persisted.
    Completed,
}

/// Result of one pipeline run, consumed by the CLI output layer.
#[derive(Debug)]
pub struct PipelineReport {
    pub outcome: Outcome,
    pub manifest: Manifest,
    pub rewrite: Option<RewriteReport>,
    pub manifest_path: Option<PathBuf>,
    pub cache_control_path: Option<PathBuf>,
}

impl PipelineReport {
    fn skipped(outcome: Outcome) -> Self {
        Self {
            outcome,
            manifest: Manifest::default(),
            rewrite: None,
            manifest_path: None,
            cache_control_path: None,
        }
    }
}

/// The configured exclusions plus the pipeline's own persisted manifest,
/// which is a `.json` under the output root and must never be fingerprinted
/// on a re-run.
pub fn effective_excluded(config: &PipelineConfig) -> Vec<String> {
    let mut excluded = config.excluded.clone();
    excluded.push(MANIFEST_FILENAME.to_string());
    excluded
}

/// Run the full pipeline with the given (already validated) configuration.
pub fn run(config: &PipelineConfig) -> Result<PipelineReport, PipelineError> {
    if !config.production {
        return Ok(PipelineReport::skipped(Outcome::SkippedNonProduction));
    }

    let output_dir = Path::new(&config.output_dir);

    let manifest = stamp::stamp_assets(output_dir, &config.extensions, &effective_excluded(config))?;
    if manifest.is_empty() {
        return Ok(PipelineReport::skipped(Outcome::NoAssets));
    }

    let rewrite_report = rewrite::update_references(
        &manifest,
        output_dir,
        &config.rewrite.extensions,
        &config.rewrite.extra_files,
    )?;

    let manifest_path = output_dir.join(MANIFEST_FILENAME);
    manifest.save(&manifest_path, config.manifest.pretty)?;

    let cache_control_path = if config.cache_control.emit {
        Some(cache_control::write(output_dir, &config.extensions)?)
    } else {
        None
    };

    Ok(PipelineReport {
        outcome: Outcome::Completed,
        manifest,
        rewrite: Some(rewrite_report),
        manifest_path: Some(manifest_path),
        cache_control_path,
    })
}
