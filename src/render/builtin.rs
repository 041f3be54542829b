//! In-process renderer built on `usvg` and `resvg`.
//!
//! The SVG is scaled straight to the target size, so unlike the process
//! backend there is no intermediate density.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Color, Pixmap, Transform};

use crate::debug;
use crate::image::Rgb;

#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinRenderer;

impl BuiltinRenderer {
    pub fn check_source(&self, source: &Path) -> Result<()> {
        load_tree(source).map(drop)
    }

    pub fn render_square(&self, source: &Path, size: u32) -> Result<RgbaImage> {
        let tree = load_tree(source)?;
        rasterize(&tree, size, size, None)
    }

    /// The canvas is filled with `background` first, so resvg composites
    /// the icon source-over onto it.
    pub fn render_padded(
        &self,
        source: &Path,
        inner: u32,
        canvas: u32,
        background: Rgb,
    ) -> Result<RgbaImage> {
        if inner > canvas {
            bail!("inner size {inner} does not fit on a {canvas}x{canvas} canvas");
        }
        let tree = load_tree(source)?;
        rasterize(&tree, inner, canvas, Some(background))
    }
}

/// Read and parse an SVG file, resolving relative references next to it.
fn load_tree(source: &Path) -> Result<usvg::Tree> {
    let data = fs::read(source).with_context(|| format!("Failed to read {}", source.display()))?;

    let options = usvg::Options {
        resources_dir: source.parent().map(Path::to_path_buf),
        ..Default::default()
    };

    usvg::Tree::from_data(&data, &options).context("Failed to parse SVG")
}

/// Render `tree` fit into `inner`×`inner` at the center of a
/// `canvas`×`canvas` image, transparent unless `background` is given.
#[allow(clippy::cast_precision_loss)] // icon sizes are far below f32 precision limits
fn rasterize(tree: &usvg::Tree, inner: u32, canvas: u32, background: Option<Rgb>) -> Result<RgbaImage> {
    let tree_size = tree.size();
    let (width, height) = (tree_size.width(), tree_size.height());
    if !(width > 0.0 && height > 0.0) {
        bail!("Invalid SVG dimensions: {width}x{height}");
    }

    let target = inner as f32;
    let margin = ((canvas - inner) / 2) as f32;
    let scale = target / width.max(height);
    let dx = margin + (target - width * scale) / 2.0;
    let dy = margin + (target - height * scale) / 2.0;
    debug!("render"; "{width}x{height} -> {inner}x{inner} on {canvas}x{canvas} (scale {scale:.3})");

    let mut pixmap = Pixmap::new(canvas, canvas)
        .with_context(|| format!("Failed to allocate {canvas}x{canvas} pixmap"))?;
    if let Some(bg) = background {
        pixmap.fill(Color::from_rgba8(bg.r, bg.g, bg.b, 0xff));
    }
    let transform = Transform::from_scale(scale, scale).post_translate(dx, dy);
    resvg::render(tree, transform, &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha; image expects straight alpha
    let mut img = RgbaImage::new(canvas, canvas);
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(img)
}
