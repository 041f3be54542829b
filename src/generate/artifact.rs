//! The fixed set of generated artifacts.

/// How an artifact is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// `.ico` container around a `size`×`size` PNG.
    LegacyIcon { size: u32 },
    /// Transparent `size`×`size` PNG.
    Png { size: u32 },
    /// `inner`×`inner` render centered on an opaque `canvas`×`canvas` background.
    PaddedPng { inner: u32, canvas: u32 },
    /// Web app manifest listing the PNG icons.
    Manifest,
}

impl ArtifactKind {
    /// Whether producing this artifact rasterizes the source SVG.
    pub const fn needs_source(&self) -> bool {
        !matches!(self, Self::Manifest)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactSpec {
    /// File name, written next to the source SVG.
    pub name: &'static str,
    pub kind: ArtifactKind,
}

/// Every artifact one run produces.
///
/// Padded ratios follow the platform safe zones: 160 on 180 for the iOS
/// home screen, 409 on 512 (80%) for Android maskable icons.
pub const ARTIFACTS: [ArtifactSpec; 6] = [
    ArtifactSpec {
        name: "favicon.ico",
        kind: ArtifactKind::LegacyIcon { size: 32 },
    },
    ArtifactSpec {
        name: "icon-192.png",
        kind: ArtifactKind::Png { size: 192 },
    },
    ArtifactSpec {
        name: "icon-512.png",
        kind: ArtifactKind::Png { size: 512 },
    },
    ArtifactSpec {
        name: "icon-mask.png",
        kind: ArtifactKind::PaddedPng {
            inner: 409,
            canvas: 512,
        },
    },
    ArtifactSpec {
        name: "apple-touch-icon.png",
        kind: ArtifactKind::PaddedPng {
            inner: 160,
            canvas: 180,
        },
    },
    ArtifactSpec {
        name: "manifest.webmanifest",
        kind: ArtifactKind::Manifest,
    },
];
