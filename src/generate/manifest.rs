//! `manifest.webmanifest` content.
//!
//! The document is fixed; serializing from constant data keeps the
//! output byte-identical across runs.

use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Manifest {
    icons: &'static [ManifestIcon],
}

#[derive(Debug, Serialize)]
struct ManifestIcon {
    src: &'static str,
    #[serde(rename = "type")]
    mime: &'static str,
    sizes: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    purpose: Option<&'static str>,
}

const MANIFEST: Manifest = Manifest {
    icons: &[
        ManifestIcon {
            src: "/icon-192.png",
            mime: "image/png",
            sizes: "192x192",
            purpose: None,
        },
        ManifestIcon {
            src: "/icon-512.png",
            mime: "image/png",
            sizes: "512x512",
            purpose: None,
        },
        ManifestIcon {
            src: "/icon-mask.png",
            mime: "image/png",
            sizes: "512x512",
            purpose: Some("maskable"),
        },
    ],
};

/// Pretty-printed manifest JSON with a trailing newline.
pub fn render_manifest() -> Result<Vec<u8>> {
    let mut json = serde_json::to_vec_pretty(&MANIFEST).context("Failed to serialize manifest")?;
    json.push(b'\n');
    Ok(json)
}
