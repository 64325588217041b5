//! Centralized filename handling for the fingerprint-suffix convention.
//!
//! Fingerprinted files carry their content hash spliced in immediately before
//! the final extension:
//!
//! ```text
//! app.js        →  app.1a2b3c4d.js
//! data.min.js   →  data.min.1a2b3c4d.js
//! styles.css    →  styles.1a2b3c4d.css
//! ```
//!
//! The pattern is detectable without any bookkeeping: exactly 8 lowercase hex
//! characters bounded by dots, directly before the extension. Detection is
//! what keeps re-runs idempotent — an already-stamped file never matches the
//! scanner's filters a second time.

use crate::fingerprint::FINGERPRINT_LEN;

/// Splice a fingerprint into a filename before its final extension.
///
/// - `"app.js"` + `"1a2b3c4d"` → `"app.1a2b3c4d.js"`
/// - `"data.min.js"` + `"1a2b3c4d"` → `"data.min.1a2b3c4d.js"`
/// - A name without any extension gets the fingerprint appended:
///   `"LICENSE"` → `"LICENSE.1a2b3c4d"` (such files never pass the
///   extension filter, so this is a degenerate case in practice)
pub fn stamped_name(file_name: &str, fingerprint: &str) -> String {
    match file_name.rfind('.') {
        Some(dot) => format!(
            "{}.{}{}",
            &file_name[..dot],
            fingerprint,
            &file_name[dot..]
        ),
        None => format!("{}.{}", file_name, fingerprint),
    }
}

/// Whether a filename already carries a fingerprint suffix.
///
/// Matches exactly 8 lowercase hex characters between two dots immediately
/// preceding the extension — the shape [`stamped_name`] produces. A name
/// needs at least three dot-separated segments to match, so `deadbeef.js`
/// (hex but not dot-bounded on the left) is not considered stamped.
pub fn is_stamped(file_name: &str) -> bool {
    let segments: Vec<&str> = file_name.split('.').collect();
    if segments.len() < 3 {
        return false;
    }
    is_hex8(segments[segments.len() - 2])
}

fn is_hex8(segment: &str) -> bool {
    segment.len() == FINGERPRINT_LEN
        && segment
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
