//! Manifest-driven reference rewriting.
//!
//! Stage 3 of the cachebust pipeline. Walks the output directory for
//! referencing files (HTML by default), plus any explicitly listed extra
//! files, and replaces every textual occurrence of each original asset name
//! with its stamped name.
//!
//! ## Substitution policy
//!
//! Replacement is blind literal substring substitution — the rewriter does
//! not parse HTML or JSON, so a reference is any occurrence of a manifest
//! key. To keep one key from corrupting another's replacement, keys are
//! applied **longest first**: with both `js/app.js` and `app.js` in the
//! manifest, the longer path is substituted before the bare name can match
//! inside it. An occurrence of a key inside an unrelated, unmapped string
//! still gets replaced; that is the accepted limit of textual rewriting.
//!
//! Files whose content does not change are not written back, so their
//! modification timestamps are preserved.

use crate::scan;
use crate::stamp::Manifest;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scan error: {0}")]
    Scan(#[from] scan::ScanError),
}

/// Counts from one rewriting pass, for CLI output.
#[derive(Debug, Default, Clone)]
pub struct RewriteReport {
    /// Files read and checked for references.
    pub files_scanned: usize,
    /// Files whose content changed and was written back.
    pub files_rewritten: usize,
}

/// Rewrite references to stamped assets in every matching file.
///
/// `extra_files` are paths relative to `output_dir` that fall outside the
/// extension walk (e.g. an `.htaccess` carried over from the source tree);
/// missing extra files are skipped silently. An empty manifest is a no-op.
pub fn update_references(
    manifest: &Manifest,
    output_dir: &Path,
    extensions: &[String],
    extra_files: &[String],
) -> Result<RewriteReport, RewriteError> {
    let mut report = RewriteReport::default();
    if manifest.is_empty() {
        return Ok(report);
    }

    // Longest key first, ties broken lexicographically for determinism.
    let mut substitutions: Vec<(&String, &String)> = manifest.iter().collect();
    substitutions.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));

    let mut targets = scan::scan_all(output_dir, extensions)?;
    for extra in extra_files {
        if output_dir.join(extra).exists() && !targets.contains(extra) {
            targets.push(extra.clone());
        }
    }

    for rel in &targets {
        let path = output_dir.join(rel);
        let content = fs::read_to_string(&path)?;
        report.files_scanned += 1;

        let mut updated = content.clone();
        for (original, stamped) in &substitutions {
            updated = updated.replace(original.as_str(), stamped.as_str());
        }

        if updated != content {
            fs::write(&path, updated)?;
            report.files_rewritten += 1;
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn html_exts() -> Vec<String> {
        vec![".html".to_string()]
    }

    fn manifest_of(pairs: &[(&str, &str)]) -> Manifest {
        let mut m = Manifest::default();
        for (k, v) in pairs {
            m.insert(k.to_string(), v.to_string());
        }
        m
    }

    #[test]
    fn rewrites_references_in_html() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("index.html"),
            r#"<script src="/js/app.js"></script>"#,
        )
        .unwrap();

        let m = manifest_of(&[("js/app.js", "js/app.1a2b3c4d.js")]);
        let report = update_references(&m, tmp.path(), &html_exts(), &[]).unwrap();

        let content = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert_eq!(content, r#"<script src="/js/app.1a2b3c4d.js"></script>"#);
        assert_eq!(report.files_rewritten, 1);
    }

    #[test]
    fn rewrites_every_occurrence() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("page.html"),
            "app.js here, app.js there, app.js everywhere",
        )
        .unwrap();

        let m = manifest_of(&[("app.js", "app.deadbeef.js")]);
        update_references(&m, tmp.path(), &html_exts(), &[]).unwrap();

        let content = fs::read_to_string(tmp.path().join("page.html")).unwrap();
        assert_eq!(content.matches("app.deadbeef.js").count(), 3);
        assert!(!content.contains("app.js here"));
    }

    #[test]
    fn longer_keys_substituted_first() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("index.html"),
            r#"<script src="/js/app.js"></script><script src="/app.js"></script>"#,
        )
        .unwrap();

        // "app.js" is a substring of "js/app.js"; longest-first keeps the
        // nested reference intact.
        let m = manifest_of(&[
            ("app.js", "app.aaaaaaaa.js"),
            ("js/app.js", "js/app.bbbbbbbb.js"),
        ]);
        update_references(&m, tmp.path(), &html_exts(), &[]).unwrap();

        let content = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert!(content.contains(r#"src="/js/app.bbbbbbbb.js""#));
        assert!(content.contains(r#"src="/app.aaaaaaaa.js""#));
    }

    #[test]
    fn untouched_file_keeps_mtime() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("plain.html");
        fs::write(&path, "<p>no asset references at all</p>").unwrap();
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        std::thread::sleep(std::time::Duration::from_millis(20));
        let m = manifest_of(&[("app.js", "app.1a2b3c4d.js")]);
        let report = update_references(&m, tmp.path(), &html_exts(), &[]).unwrap();

        let after = fs::metadata(&path).unwrap().modified().unwrap();
        assert_eq!(before, after);
        assert_eq!(report.files_scanned, 1);
        assert_eq!(report.files_rewritten, 0);
    }

    #[test]
    fn empty_manifest_is_noop() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("index.html"), "content").unwrap();

        let report =
            update_references(&Manifest::default(), tmp.path(), &html_exts(), &[]).unwrap();
        assert_eq!(report.files_scanned, 0);
        assert_eq!(report.files_rewritten, 0);
    }

    #[test]
    fn extra_files_rewritten() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(".htaccess"),
            "RewriteRule ^old$ /js/app.js [L]",
        )
        .unwrap();

        let m = manifest_of(&[("js/app.js", "js/app.1a2b3c4d.js")]);
        let report =
            update_references(&m, tmp.path(), &html_exts(), &[".htaccess".to_string()]).unwrap();

        let content = fs::read_to_string(tmp.path().join(".htaccess")).unwrap();
        assert!(content.contains("js/app.1a2b3c4d.js"));
        assert_eq!(report.files_rewritten, 1);
    }

    #[test]
    fn missing_extra_file_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("index.html"), "app.js").unwrap();

        let m = manifest_of(&[("app.js", "app.1a2b3c4d.js")]);
        let report =
            update_references(&m, tmp.path(), &html_exts(), &[".htaccess".to_string()]).unwrap();
        assert_eq!(report.files_scanned, 1);
    }

    #[test]
    fn nested_html_is_walked() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("pages/deep")).unwrap();
        fs::write(tmp.path().join("pages/deep/page.html"), "see app.js").unwrap();

        let m = manifest_of(&[("app.js", "app.1a2b3c4d.js")]);
        update_references(&m, tmp.path(), &html_exts(), &[]).unwrap();

        let content = fs::read_to_string(tmp.path().join("pages/deep/page.html")).unwrap();
        assert_eq!(content, "see app.1a2b3c4d.js");
    }

    #[test]
    fn unmapped_references_left_dangling() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("index.html"), "app.js and excluded.json").unwrap();

        let m = manifest_of(&[("app.js", "app.1a2b3c4d.js")]);
        update_references(&m, tmp.path(), &html_exts(), &[]).unwrap();

        // References to files outside the manifest stay as-is
        let content = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert!(content.contains("excluded.json"));
    }
}
