//! CLI output formatting for all pipeline stages.
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ```text
//! Fingerprinting 2 assets:
//!     js/app.js -> js/app.1a2b3c4d.js
//!     style.css -> style.99aabbcc.css
//! Rewrote 3 of 7 referencing files
//! Manifest: dist/asset-manifest.json
//! Cache control: dist/.htaccess
//! ```

use crate::pipeline::{Outcome, PipelineReport};
use crate::rewrite::RewriteReport;
use crate::stamp::Manifest;

/// Format the asset list from a dry scan.
pub fn format_scan_output(assets: &[String]) -> Vec<String> {
    if assets.is_empty() {
        return vec!["No eligible assets found".to_string()];
    }
    let mut lines = vec![format!("{} eligible asset(s):", assets.len())];
    for asset in assets {
        lines.push(format!("    {}", asset));
    }
    lines
}

/// Format the rename listing from a stamping run.
pub fn format_stamp_output(manifest: &Manifest) -> Vec<String> {
    if manifest.is_empty() {
        return vec!["No assets to fingerprint".to_string()];
    }
    let mut lines = vec![format!("Fingerprinting {} asset(s):", manifest.len())];
    for (original, stamped) in manifest.iter() {
        lines.push(format!("    {} -> {}", original, stamped));
    }
    lines
}

/// Format the rewrite summary.
pub fn format_rewrite_output(report: &RewriteReport) -> Vec<String> {
    vec![format!(
        "Rewrote {} of {} referencing file(s)",
        report.files_rewritten, report.files_scanned
    )]
}

/// Format the full pipeline summary.
pub fn format_pipeline_output(report: &PipelineReport) -> Vec<String> {
    match report.outcome {
        Outcome::SkippedNonProduction => {
            vec!["Production mode off — fingerprinting skipped".to_string()]
        }
        Outcome::NoAssets => vec!["No eligible assets found — nothing to do".to_string()],
        Outcome::Completed => {
            let mut lines = format_stamp_output(&report.manifest);
            if let Some(ref rewrite) = report.rewrite {
                lines.extend(format_rewrite_output(rewrite));
            }
            if let Some(ref path) = report.manifest_path {
                lines.push(format!("Manifest: {}", path.display()));
            }
            if let Some(ref path) = report.cache_control_path {
                lines.push(format!("Cache control: {}", path.display()));
            }
            lines
        }
    }
}

pub fn print_scan_output(assets: &[String]) {
    for line in format_scan_output(assets) {
        println!("{}", line);
    }
}

pub fn print_stamp_output(manifest: &Manifest) {
    for line in format_stamp_output(manifest) {
        println!("{}", line);
    }
}

pub fn print_rewrite_output(report: &RewriteReport) {
    for line in format_rewrite_output(report) {
        println!("{}", line);
    }
}

pub fn print_pipeline_output(report: &PipelineReport) {
    for line in format_pipeline_output(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest_of(pairs: &[(&str, &str)]) -> Manifest {
        let mut m = Manifest::default();
        for (k, v) in pairs {
            m.insert(k.to_string(), v.to_string());
        }
        m
    }

    #[test]
    fn scan_output_lists_assets() {
        let lines = format_scan_output(&["app.js".to_string(), "js/lib.js".to_string()]);
        assert_eq!(lines[0], "2 eligible asset(s):");
        assert_eq!(lines[1], "    app.js");
        assert_eq!(lines[2], "    js/lib.js");
    }

    #[test]
    fn scan_output_empty_notice() {
        let lines = format_scan_output(&[]);
        assert_eq!(lines, vec!["No eligible assets found"]);
    }

    #[test]
    fn stamp_output_shows_renames() {
        let m = manifest_of(&[("app.js", "app.1a2b3c4d.js")]);
        let lines = format_stamp_output(&m);
        assert_eq!(lines[0], "Fingerprinting 1 asset(s):");
        assert_eq!(lines[1], "    app.js -> app.1a2b3c4d.js");
    }

    #[test]
    fn stamp_output_empty_notice() {
        let lines = format_stamp_output(&Manifest::default());
        assert_eq!(lines, vec!["No assets to fingerprint"]);
    }

    #[test]
    fn rewrite_output_counts() {
        let report = RewriteReport {
            files_scanned: 7,
            files_rewritten: 3,
        };
        assert_eq!(
            format_rewrite_output(&report),
            vec!["Rewrote 3 of 7 referencing file(s)"]
        );
    }

    #[test]
    fn pipeline_output_skipped_non_production() {
        let report = PipelineReport {
            outcome: Outcome::SkippedNonProduction,
            manifest: Manifest::default(),
            rewrite: None,
            manifest_path: None,
            cache_control_path: None,
        };
        let lines = format_pipeline_output(&report);
        assert_eq!(lines, vec!["Production mode off — fingerprinting skipped"]);
    }

    #[test]
    fn pipeline_output_completed_mentions_artifacts() {
        let report = PipelineReport {
            outcome: Outcome::Completed,
            manifest: manifest_of(&[("app.js", "app.1a2b3c4d.js")]),
            rewrite: Some(RewriteReport {
                files_scanned: 2,
                files_rewritten: 1,
            }),
            manifest_path: Some("dist/asset-manifest.json".into()),
            cache_control_path: Some("dist/.htaccess".into()),
        };
        let lines = format_pipeline_output(&report);
        assert!(lines.iter().any(|l| l.contains("asset-manifest.json")));
        assert!(lines.iter().any(|l| l.contains(".htaccess")));
        assert!(lines.iter().any(|l| l.contains("Rewrote 1 of 2")));
    }
}
