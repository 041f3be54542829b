//! ImageMagick renderer.
//!
//! Rasterizes at an explicit density, then resizes and extends to the
//! target geometry. Output is streamed back as `png32:-` and decoded.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use image::RgbaImage;

use super::RenderOptions;
use crate::image::Rgb;
use crate::utils::exec::Cmd;

/// Density used only to check that the source parses.
const CHECK_DENSITY: u32 = 72;

/// Which ImageMagick entry point was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagickVersion {
    /// `magick` (v7)
    V7,
    /// `convert` (v6)
    V6,
}

#[derive(Debug, Clone)]
pub struct MagickRenderer {
    program: PathBuf,
    version: MagickVersion,
    density: u32,
}

impl MagickRenderer {
    pub fn new(program: PathBuf, version: MagickVersion, options: &RenderOptions) -> Self {
        Self {
            program,
            version,
            density: options.density,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self.version {
            MagickVersion::V7 => "magick",
            MagickVersion::V6 => "convert",
        }
    }

    pub const fn version(&self) -> MagickVersion {
        self.version
    }

    pub fn check_source(&self, source: &Path) -> Result<()> {
        let args = square_args(source, 1, CHECK_DENSITY);
        Cmd::new(&self.program)
            .args(args)
            .run()
            .context("ImageMagick could not read the SVG")
            .map(drop)
    }

    pub fn render_square(&self, source: &Path, size: u32) -> Result<RgbaImage> {
        let args = square_args(source, size, self.density);
        self.run(args, size)
    }

    pub fn render_padded(
        &self,
        source: &Path,
        inner: u32,
        canvas: u32,
        background: Rgb,
    ) -> Result<RgbaImage> {
        let args = padded_args(source, inner, canvas, background, self.density);
        self.run(args, canvas)
    }

    /// Run ImageMagick and decode its PNG output, checking the geometry.
    fn run(&self, args: Vec<OsString>, size: u32) -> Result<RgbaImage> {
        let output = Cmd::new(&self.program)
            .args(args)
            .run()
            .context("ImageMagick conversion failed")?;

        let img = image::load_from_memory(&output.stdout)
            .context("ImageMagick produced unreadable PNG output")?
            .to_rgba8();

        if img.dimensions() != (size, size) {
            bail!(
                "ImageMagick produced {}x{} instead of {size}x{size}",
                img.width(),
                img.height()
            );
        }
        Ok(img)
    }
}

/// Arguments to fit the SVG into a transparent `size`×`size` square.
fn square_args(source: &Path, size: u32, density: u32) -> Vec<OsString> {
    let geometry = format!("{size}x{size}");
    let mut args = read_args(source, density);
    args.extend(
        [
            "-resize",
            geometry.as_str(),
            "-gravity",
            "center",
            "-extent",
            geometry.as_str(),
            "png32:-",
        ]
        .map(OsString::from),
    );
    args
}

/// Arguments to fit the SVG into `inner`×`inner` centered on an opaque canvas.
fn padded_args(source: &Path, inner: u32, canvas: u32, background: Rgb, density: u32) -> Vec<OsString> {
    let inner = format!("{inner}x{inner}");
    let canvas = format!("{canvas}x{canvas}");
    let color = background.to_string();
    let mut args = read_args(source, density);
    args.extend(
        [
            "-resize",
            inner.as_str(),
            "-background",
            color.as_str(),
            "-gravity",
            "center",
            "-extent",
            canvas.as_str(),
            "-alpha",
            "remove",
            "png32:-",
        ]
        .map(OsString::from),
    );
    args
}

/// Density and transparent background must precede the input file.
fn read_args(source: &Path, density: u32) -> Vec<OsString> {
    vec![
        "-density".into(),
        density.to_string().into(),
        "-background".into(),
        "none".into(),
        input_arg(source),
    ]
}

/// Keep paths starting with `-` from being read as options.
fn input_arg(source: &Path) -> OsString {
    if source.as_os_str().to_string_lossy().starts_with('-') {
        Path::new(".").join(source).into_os_string()
    } else {
        source.as_os_str().to_owned()
    }
}
