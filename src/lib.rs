//! # cachebust
//!
//! Post-build asset fingerprinting and cache-busting for static sites.
//! Point it at a build output directory after your site generator finishes,
//! and every eligible asset gets its content hash spliced into its filename,
//! every page referencing it gets rewritten, and browsers can cache the
//! result forever.
//!
//! # Architecture: Four-Step Pipeline
//!
//! One run processes the output directory through four strictly sequential
//! steps, driven by [`pipeline::run`]:
//!
//! ```text
//! 1. Stamp      dist/**/*.{js,json,css}  →  renamed in place + manifest
//! 2. Rewrite    dist/**/*.html + extras  →  references point at stamped names
//! 3. Persist    manifest                 →  dist/asset-manifest.json
//! 4. Emit       cache lifetimes          →  dist/.htaccess (optional)
//! ```
//!
//! The manifest doubles as the run's audit record and the rewriter's
//! cross-reference table, so step 1 must finish before step 2 begins.
//! There is no parallelism anywhere: one build, one directory, one file at
//! a time. Correctness comes from ordering, not coordination.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`fingerprint`] | Content hashing — file bytes to an 8-char hex digest |
//! | [`naming`] | The `name.<hash8>.ext` filename convention: splicing and detection |
//! | [`scan`] | Recursive asset discovery with extension and exclusion filters |
//! | [`stamp`] | Step 1 — hash, rename in place, build the [`stamp::Manifest`] |
//! | [`rewrite`] | Step 2 — manifest-driven substring rewriting of referencing files |
//! | [`cache_control`] | Step 4 — generated Apache `.htaccess` cache directives |
//! | [`config`] | `cachebust.toml` loading, defaults, validation |
//! | [`pipeline`] | The driver sequencing steps 1–4 |
//! | [`output`] | CLI output formatting — pure `format_*` functions |
//!
//! # Design Decisions
//!
//! ## Rename, Don't Copy
//!
//! Stamping renames the original file rather than writing a hashed copy
//! beside it. The output directory ends a run with exactly one file per
//! asset, and a page that slipped past the rewriter fails loudly with a 404
//! instead of silently serving a stale unhashed copy for a day.
//!
//! ## Detection Over Bookkeeping
//!
//! Idempotence doesn't need state: a stamped filename is self-describing
//! (8 hex chars between dots before the extension), so a re-run simply
//! skips anything matching the pattern. No sidecar database, no marker
//! files, no merge logic between runs.
//!
//! ## Blind Substring Rewriting
//!
//! The rewriter does not parse HTML or JSON — it replaces literal
//! occurrences of manifest keys, longest key first. Parsing every grammar
//! that can reference an asset (HTML attributes, inline scripts, JSON
//! config, Apache directives) buys little over textual substitution with a
//! deterministic ordering policy, and the failure mode of a missed parse is
//! worse than the failure mode of an over-eager replace.
//!
//! ## Best-Effort, Not Transactional
//!
//! A multi-file rename sequence cannot be atomic on a plain filesystem and
//! this tool does not pretend otherwise. An interrupted run leaves some
//! files stamped and no manifest; the next run picks up the remainder. The
//! CLI catches every error at the top so a fingerprinting failure can be
//! logged without sinking the surrounding site build.

pub mod cache_control;
pub mod config;
pub mod fingerprint;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod rewrite;
pub mod scan;
pub mod stamp;
