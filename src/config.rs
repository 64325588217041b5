//! Pipeline configuration.
//!
//! Handles loading and validating `cachebust.toml`. Every option has a
//! default matching a typical static-site layout, so a config file is only
//! needed to override something. Unknown keys are rejected to catch typos
//! early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional except output_dir — defaults shown below
//!
//! output_dir = "dist"                       # Build output root (required)
//! extensions = [".js", ".json", ".css"]     # Assets to fingerprint
//! excluded = ["site.webmanifest.json"]      # Never fingerprinted (exact
//!                                           # relative path or basename)
//! production = false                        # Pipeline is a no-op unless true
//!
//! [rewrite]
//! extensions = [".html"]                    # Referencing files to rewrite
//! extra_files = [".htaccess"]               # Extra files outside the walk
//!
//! [manifest]
//! pretty = true                             # Indent the persisted JSON
//!
//! [cache_control]
//! emit = true                               # Write the generated .htaccess
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full pipeline configuration.
///
/// The excluded-files default exists because a web manifest is referenced
/// by its exact, unhashed name from a static `<link rel="manifest">` and
/// must keep that name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Build output root. The one required value — validation fails when empty.
    pub output_dir: String,
    /// Extensions eligible for fingerprinting, leading dot optional.
    pub extensions: Vec<String>,
    /// Files never fingerprinted: exact relative path or bare basename.
    pub excluded: Vec<String>,
    /// Fingerprinting only runs in production builds.
    pub production: bool,
    /// Reference rewriting settings.
    pub rewrite: RewriteConfig,
    /// Manifest persistence settings.
    pub manifest: ManifestConfig,
    /// Generated cache-control file settings.
    pub cache_control: CacheControlConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: String::new(),
            extensions: vec![".js".into(), ".json".into(), ".css".into()],
            excluded: vec!["site.webmanifest.json".into()],
            production: false,
            rewrite: RewriteConfig::default(),
            manifest: ManifestConfig::default(),
            cache_control: CacheControlConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Validate required values and normalize extension spellings.
    ///
    /// Extensions may be written with or without a leading dot; matching is
    /// always against the dotted form, so `"js"` becomes `".js"` here.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.output_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output_dir is required (set it in cachebust.toml or pass --output)".into(),
            ));
        }
        normalize_extensions(&mut self.extensions);
        normalize_extensions(&mut self.rewrite.extensions);
        Ok(())
    }
}

fn normalize_extensions(extensions: &mut [String]) {
    for ext in extensions.iter_mut() {
        if !ext.starts_with('.') {
            *ext = format!(".{ext}");
        }
    }
}

/// Reference rewriting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RewriteConfig {
    /// Extensions of referencing files to walk under the output root.
    pub extensions: Vec<String>,
    /// Extra referencing files outside the extension walk, relative to the
    /// output root. Missing files are skipped.
    pub extra_files: Vec<String>,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            extensions: vec![".html".into()],
            extra_files: vec![".htaccess".into()],
        }
    }
}

/// Manifest persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// Indent the persisted JSON for human inspection.
    pub pretty: bool,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Generated cache-control file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheControlConfig {
    /// Write the generated `.htaccess` after a successful run.
    pub emit: bool,
}

impl Default for CacheControlConfig {
    fn default() -> Self {
        Self { emit: true }
    }
}

/// Load configuration from a TOML file, falling back to defaults when the
/// file does not exist.
pub fn load_config(path: &Path) -> Result<PipelineConfig, ConfigError> {
    if !path.exists() {
        return Ok(PipelineConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: PipelineConfig = toml::from_str(&content)?;
    Ok(config)
}

/// A fully documented stock config, printed by `cachebust gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# cachebust configuration
# All options are optional except output_dir — values shown are the defaults.

# Build output root to fingerprint. Required.
output_dir = "dist"

# Asset extensions eligible for fingerprinting (leading dot optional).
extensions = [".js", ".json", ".css"]

# Files never fingerprinted, by exact relative path or bare basename.
# The web manifest is referenced by its exact unhashed name from a static
# <link rel="manifest"> and must keep that name.
excluded = ["site.webmanifest.json"]

# Fingerprinting only runs in production builds; otherwise the pipeline
# is a no-op. Can also be enabled per-invocation with `run --production`.
production = false

[rewrite]
# Referencing files to rewrite, walked recursively under output_dir.
extensions = [".html"]
# Extra referencing files outside the extension walk, relative to
# output_dir. Missing files are skipped.
extra_files = [".htaccess"]

[manifest]
# Indent the persisted asset-manifest.json for human inspection.
pretty = true

[cache_control]
# Write a generated .htaccess encoding cache lifetimes per asset class.
emit = true
"##
}
