//! Hub node image, inlined as a data URI.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::{info, warn};

/// Shown when the configured image cannot be read.
pub const FALLBACK_SVG: &str = r##"<svg width="100" height="100" xmlns="http://www.w3.org/2000/svg">
    <circle cx="50" cy="50" r="40" fill="#ff6b6b" stroke="#333" stroke-width="2"/>
    <text x="50" y="55" text-anchor="middle" fill="white" font-size="14" font-weight="bold">R</text>
</svg>"##;

pub fn load_hub_image(path: &Path) -> String {
    match std::fs::read(path) {
        Ok(bytes) => {
            info!("Loaded hub image {} ({} bytes)", path.display(), bytes.len());
            data_uri(mime_for(path), &bytes)
        }
        Err(err) => {
            warn!("Hub image {} unavailable ({err}), using fallback", path.display());
            fallback_image()
        }
    }
}

pub fn fallback_image() -> String {
    data_uri("image/svg+xml", FALLBACK_SVG.as_bytes())
}

/// By extension; anything unrecognised is served as JPEG.
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
