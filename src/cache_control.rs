//! Generated cache-control configuration.
//!
//! Renders an Apache `.htaccess` file encoding cache lifetimes per asset
//! class. Fingerprinted files are immutable by construction — their URL
//! changes whenever their content does — so they get a year-long immutable
//! lifetime. The same extensions without a fingerprint get a one-day
//! lifetime. Images and fonts are served cacheable for a year regardless
//! of fingerprinting, since they are not part of the stamping pipeline.

use std::io;
use std::path::{Path, PathBuf};

/// One year, the lifetime for content-addressed and media files.
const MAX_AGE_IMMUTABLE: u32 = 31_536_000;
/// One day, the fallback lifetime for unstamped assets.
const MAX_AGE_DEFAULT: u32 = 86_400;

const IMAGE_EXTENSIONS: &[&str] = &["ico", "png", "jpg", "jpeg", "gif", "svg", "webp"];
const FONT_EXTENSIONS: &[&str] = &["woff", "woff2", "ttf", "eot"];

/// Name of the generated file within the output directory.
pub const CACHE_CONTROL_FILENAME: &str = ".htaccess";

/// Render the `.htaccess` directives for the given fingerprintable
/// extensions (with or without leading dots).
pub fn render(extensions: &[String]) -> String {
    let mut out = String::from("# Generated by cachebust — cache lifetimes per asset class\n");

    for ext in extensions {
        let bare = ext.trim_start_matches('.');
        out.push_str(&format!(
            "\n<FilesMatch \"\\.({bare})$\">\n\
             \x20   # Fingerprinted (8 hex chars before the extension): immutable\n\
             \x20   <If \"%{{REQUEST_URI}} =~ m/\\.[a-f0-9]{{8}}\\.{bare}$/\">\n\
             \x20       Header set Cache-Control \"public, max-age={MAX_AGE_IMMUTABLE}, immutable\"\n\
             \x20   </If>\n\
             \x20   <Else>\n\
             \x20       Header set Cache-Control \"public, max-age={MAX_AGE_DEFAULT}\"\n\
             \x20   </Else>\n\
             </FilesMatch>\n"
        ));
    }

    out.push_str(&media_block(IMAGE_EXTENSIONS, "Images"));
    out.push_str(&media_block(FONT_EXTENSIONS, "Fonts"));
    out
}

fn media_block(extensions: &[&str], label: &str) -> String {
    format!(
        "\n# {label}: long-lived regardless of fingerprinting\n\
         <FilesMatch \"\\.({})$\">\n\
         \x20   Header set Cache-Control \"public, max-age={MAX_AGE_IMMUTABLE}\"\n\
         </FilesMatch>\n",
        extensions.join("|")
    )
}

/// Write the generated file to the output root, returning its path.
pub fn write(output_dir: &Path, extensions: &[String]) -> io::Result<PathBuf> {
    let path = output_dir.join(CACHE_CONTROL_FILENAME);
    std::fs::write(&path, render(extensions))?;
    Ok(path)
}
