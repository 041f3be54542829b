//! SVG rasterization backends.
//!
//! Two interchangeable renderers satisfy the same contract:
//!
//! - [`builtin`]: in-process rendering with `usvg` + `resvg` (feature `builtin`)
//! - [`magick`]: ImageMagick as an external process
//!
//! [`probe`] decides which one is usable on this host. The chosen
//! [`Backend`] is passed to the generator; no other code cares which one
//! it is.
//!
//! # Contract
//!
//! ```text
//! render_square(svg, n)            ──► n×n RGBA, transparent background
//! render_padded(svg, i, c, color)  ──► c×c opaque RGBA, svg fit into i×i at the center
//! write_png(image, path)           ──► new PNG file, never overwrites
//! ```

#[cfg(feature = "builtin")]
pub mod builtin;
pub mod magick;
pub mod probe;

#[cfg(feature = "builtin")]
pub use builtin::BuiltinRenderer;
pub use magick::MagickRenderer;
pub use probe::{BackendChoice, Probe};

use std::path::Path;

use anyhow::Result;
use image::RgbaImage;

use crate::error::GenerateError;
use crate::image::{Rgb, encode_png};
use crate::utils::fs::{Written, write_new};

/// Default rasterization density (DPI) for the process backend.
pub const DEFAULT_DENSITY: u32 = 1000;

/// Backend construction settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// DPI ImageMagick rasterizes the SVG at before resizing.
    pub density: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            density: DEFAULT_DENSITY,
        }
    }
}

/// A selected rendering backend.
///
/// Stateless apart from its construction settings; the source path is
/// passed on every call so one backend serves any number of requests.
#[derive(Debug, Clone)]
pub enum Backend {
    #[cfg(feature = "builtin")]
    Builtin(BuiltinRenderer),
    Magick(MagickRenderer),
}

impl Backend {
    /// Human-readable backend name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            #[cfg(feature = "builtin")]
            Self::Builtin(_) => "builtin",
            Self::Magick(m) => m.name(),
        }
    }

    /// Check that `source` can be rasterized at all.
    pub fn check_source(&self, source: &Path) -> Result<()> {
        match self {
            #[cfg(feature = "builtin")]
            Self::Builtin(r) => r.check_source(source),
            Self::Magick(r) => r.check_source(source),
        }
    }

    /// Fit `source` into a transparent `size`×`size` square.
    pub fn render_square(&self, source: &Path, size: u32) -> Result<RgbaImage> {
        match self {
            #[cfg(feature = "builtin")]
            Self::Builtin(r) => r.render_square(source, size),
            Self::Magick(r) => r.render_square(source, size),
        }
    }

    /// Fit `source` into `inner`×`inner`, centered on an opaque
    /// `canvas`×`canvas` square of `background`.
    pub fn render_padded(
        &self,
        source: &Path,
        inner: u32,
        canvas: u32,
        background: Rgb,
    ) -> Result<RgbaImage> {
        match self {
            #[cfg(feature = "builtin")]
            Self::Builtin(r) => r.render_padded(source, inner, canvas, background),
            Self::Magick(r) => r.render_padded(source, inner, canvas, background),
        }
    }
}

/// Encode `img` as PNG and write it to a new file at `path`.
pub fn write_png(img: &RgbaImage, path: &Path) -> Result<Written, GenerateError> {
    let png = encode_png(img).map_err(|err| GenerateError::Encode {
        path: path.to_path_buf(),
        reason: format!("{err:#}"),
    })?;
    write_new(path, &png)
}
