//! Fingerprinting engine.
//!
//! Stage 2 of the cachebust pipeline. Consumes the scanner's asset list and,
//! for each asset in scan order: hashes its current bytes, splices the
//! fingerprint into the filename, and renames the file in place. The original
//! name ceases to exist; only the stamped name remains. Each rename is
//! recorded in a [`Manifest`], which stage 3 uses to rewrite references and
//! the driver persists as the run's audit record.
//!
//! ## Not transactional
//!
//! Renames mutate the output directory one file at a time. If the process is
//! interrupted mid-run, some assets are renamed and others are not, and no
//! manifest is written. The scanner's stamped-file detection makes the next
//! run pick up cleanly: already-renamed files are skipped, the rest get
//! stamped then.

use crate::{fingerprint, naming, scan};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StampError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scan error: {0}")]
    Scan(#[from] scan::ScanError),
}

/// Run-scoped mapping from original relative path to stamped relative path.
///
/// Built fresh each run, never merged with a prior run's manifest. Keys are
/// unique by construction (the scanner returns each path once). Backed by a
/// `BTreeMap` so map order matches the scanner's lexicographic order and the
/// serialized JSON is byte-stable across runs over unchanged input.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: BTreeMap<String, String>,
}

impl Manifest {
    pub fn insert(&mut self, original: String, stamped: String) {
        self.entries.insert(original, stamped);
    }

    pub fn get(&self, original: &str) -> Option<&String> {
        self.entries.get(original)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }

    /// Write the manifest as JSON, compact or indented per `pretty`.
    pub fn save(&self, path: &Path, pretty: bool) -> io::Result<()> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        fs::write(path, json)
    }

    /// Load a previously persisted manifest (the split `rewrite` command).
    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Fingerprint and rename every eligible asset under `output_dir`.
///
/// An empty `extensions` list short-circuits to an empty manifest without
/// touching the filesystem. Errors propagate immediately; renames already
/// performed stay in place (see the module docs on interruption).
pub fn stamp_assets(
    output_dir: &Path,
    extensions: &[String],
    excluded: &[String],
) -> Result<Manifest, StampError> {
    let mut manifest = Manifest::default();
    if extensions.is_empty() {
        return Ok(manifest);
    }

    for rel in scan::scan(output_dir, extensions, excluded)? {
        let original_path = output_dir.join(&rel);
        let hash = fingerprint::hash_file(&original_path)?;

        // Last path segment is the filename; the fingerprint goes there.
        let (dir_part, file_name) = match rel.rsplit_once('/') {
            Some((dir, name)) => (Some(dir), name),
            None => (None, rel.as_str()),
        };
        let stamped = naming::stamped_name(file_name, &hash);
        let stamped_rel = match dir_part {
            Some(dir) => format!("{dir}/{stamped}"),
            None => stamped,
        };

        fs::rename(&original_path, output_dir.join(&stamped_rel))?;
        manifest.insert(rel, stamped_rel);
    }

    Ok(manifest)
}
