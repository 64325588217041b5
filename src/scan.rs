//! Asset discovery.
//!
//! Stage 1 of the cachebust pipeline. Walks the build output directory and
//! returns the relative paths of every file eligible for fingerprinting.
//!
//! A file is eligible iff:
//! - its name ends with one of the configured extensions
//! - it is not already fingerprinted ([`crate::naming::is_stamped`])
//! - its relative path is not excluded (exact match, or match on a trailing
//!   path segment so a bare basename excludes the file anywhere in the tree)
//!
//! Results come back in lexicographic order of relative path, so repeated
//! runs over unchanged input produce an identical manifest. A missing root
//! directory yields an empty list rather than an error — fingerprinting is
//! optional and may run before any output of a given kind exists.

use crate::naming;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Recursively collect eligible asset paths under `root`.
///
/// Returned paths are relative to `root` and use `/` separators regardless
/// of platform, since they double as manifest keys matched against URL-ish
/// references in HTML.
pub fn scan(
    root: &Path,
    extensions: &[String],
    excluded: &[String],
) -> Result<Vec<String>, ScanError> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let mut assets = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !has_extension(&name, extensions) || naming::is_stamped(&name) {
            continue;
        }
        // strip_prefix cannot fail: every entry lives under root
        let rel = relative_key(entry.path().strip_prefix(root).unwrap());
        if is_excluded(&rel, excluded) {
            continue;
        }
        assets.push(rel);
    }

    assets.sort();
    Ok(assets)
}

/// Walk `root` for files matching `extensions`, without the stamped-file
/// exclusion. Used by the rewriter, which must visit every referencing file
/// including ones it already rewrote in an earlier run.
pub fn scan_all(root: &Path, extensions: &[String]) -> Result<Vec<String>, ScanError> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !has_extension(&name, extensions) {
            continue;
        }
        files.push(relative_key(entry.path().strip_prefix(root).unwrap()));
    }

    files.sort();
    Ok(files)
}

fn has_extension(name: &str, extensions: &[String]) -> bool {
    extensions.iter().any(|ext| name.ends_with(ext.as_str()))
}

/// Exclusion matches either the full relative path or a trailing segment.
///
/// - `"site.webmanifest.json"` excludes `site.webmanifest.json` at the root
///   *and* `data/site.webmanifest.json`
/// - `"data/config.json"` excludes only that path (and deeper suffixes at a
///   `/` boundary, e.g. `v2/data/config.json`)
fn is_excluded(rel: &str, excluded: &[String]) -> bool {
    excluded
        .iter()
        .any(|ex| rel == ex || rel.ends_with(&format!("/{ex}")))
}

/// Render a relative path with `/` separators on every platform.
fn relative_key(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn exts(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn finds_matching_files_recursively() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("js/vendor")).unwrap();
        fs::write(tmp.path().join("js/app.js"), "a").unwrap();
        fs::write(tmp.path().join("js/vendor/lib.js"), "b").unwrap();
        fs::write(tmp.path().join("index.html"), "c").unwrap();

        let found = scan(tmp.path(), &exts(&[".js"]), &[]).unwrap();
        assert_eq!(found, vec!["js/app.js", "js/vendor/lib.js"]);
    }

    #[test]
    fn order_is_lexicographic_and_stable() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("zeta.js"), "z").unwrap();
        fs::write(tmp.path().join("alpha.js"), "a").unwrap();
        fs::write(tmp.path().join("mid.js"), "m").unwrap();

        let first = scan(tmp.path(), &exts(&[".js"]), &[]).unwrap();
        let second = scan(tmp.path(), &exts(&[".js"]), &[]).unwrap();
        assert_eq!(first, vec!["alpha.js", "mid.js", "zeta.js"]);
        assert_eq!(first, second);
    }

    #[test]
    fn multiple_extensions() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("app.js"), "a").unwrap();
        fs::write(tmp.path().join("style.css"), "b").unwrap();
        fs::write(tmp.path().join("data.json"), "c").unwrap();
        fs::write(tmp.path().join("page.html"), "d").unwrap();

        let found = scan(tmp.path(), &exts(&[".js", ".json", ".css"]), &[]).unwrap();
        assert_eq!(found, vec!["app.js", "data.json", "style.css"]);
    }

    #[test]
    fn stamped_files_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("app.1a2b3c4d.js"), "a").unwrap();
        fs::write(tmp.path().join("fresh.js"), "b").unwrap();

        let found = scan(tmp.path(), &exts(&[".js"]), &[]).unwrap();
        assert_eq!(found, vec!["fresh.js"]);
    }

    #[test]
    fn excluded_by_basename_anywhere() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("data")).unwrap();
        fs::write(tmp.path().join("site.webmanifest.json"), "a").unwrap();
        fs::write(tmp.path().join("data/site.webmanifest.json"), "b").unwrap();
        fs::write(tmp.path().join("data/icons.json"), "c").unwrap();

        let found = scan(
            tmp.path(),
            &exts(&[".json"]),
            &["site.webmanifest.json".to_string()],
        )
        .unwrap();
        assert_eq!(found, vec!["data/icons.json"]);
    }

    #[test]
    fn exclusion_respects_segment_boundary() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("app.js"), "a").unwrap();
        fs::write(tmp.path().join("my-app.js"), "b").unwrap();

        let found = scan(tmp.path(), &exts(&[".js"]), &["app.js".to_string()]).unwrap();
        // "my-app.js" merely ends with the excluded string; it is kept
        assert_eq!(found, vec!["my-app.js"]);
    }

    #[test]
    fn excluded_by_relative_path() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("js")).unwrap();
        fs::write(tmp.path().join("js/app.js"), "a").unwrap();
        fs::write(tmp.path().join("js/keep.js"), "b").unwrap();

        let found = scan(tmp.path(), &exts(&[".js"]), &["js/app.js".to_string()]).unwrap();
        assert_eq!(found, vec!["js/keep.js"]);
    }

    #[test]
    fn missing_root_is_empty_not_error() {
        let tmp = TempDir::new().unwrap();
        let found = scan(&tmp.path().join("nonexistent"), &exts(&[".js"]), &[]).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn scan_all_includes_stamped_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("index.html"), "a").unwrap();
        fs::write(tmp.path().join("old.1a2b3c4d.html"), "b").unwrap();

        let found = scan_all(tmp.path(), &exts(&[".html"])).unwrap();
        assert_eq!(found, vec!["index.html", "old.1a2b3c4d.html"]);
    }

    #[test]
    fn scan_all_missing_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        let found = scan_all(&tmp.path().join("gone"), &exts(&[".html"])).unwrap();
        assert!(found.is_empty());
    }
}
