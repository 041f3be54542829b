//! Pixel-level utilities shared by every rendering backend.
//!
//! # Modules
//!
//! - [`color`]: Background color parsing
//! - [`ico`]: Legacy `.ico` container encoding

pub mod color;
pub mod ico;

pub use color::{Rgb, parse_hex_color};
pub use ico::encode_legacy_icon;

use std::io::Cursor;

use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};

/// Encode an RGBA buffer as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .context("Failed to encode PNG")?;
    Ok(buf)
}
