//! Legacy `favicon.ico` container.
//!
//! Layout of a single-image icon with an embedded PNG payload
//! (all multi-byte fields little-endian):
//!
//! ```text
//! offset  size  field
//! 0       2     reserved (0)
//! 2       2     type (1 = icon)
//! 4       2     image count (1)
//! 6       1     width  (0 means 256)
//! 7       1     height (0 means 256)
//! 8       1     palette size (0)
//! 9       1     reserved (0)
//! 10      2     color planes (1)
//! 12      2     bits per pixel (32)
//! 14      4     payload length
//! 18      4     payload offset (22)
//! 22      ..    PNG bytes
//! ```

use anyhow::{Result, bail};

const HEADER_LEN: usize = 6;
const ENTRY_LEN: usize = 16;
/// Offset of the payload in a single-image container.
pub const PAYLOAD_OFFSET: u32 = (HEADER_LEN + ENTRY_LEN) as u32;

const ICON_TYPE: u16 = 1;
const COLOR_PLANES: u16 = 1;
const BITS_PER_PIXEL: u16 = 32;

/// Wrap a PNG-encoded image of `width`×`height` in an icon container.
///
/// Output is a pure function of the inputs. Dimensions must be 1..=256.
pub fn encode_legacy_icon(png: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let width = dimension_byte(width)?;
    let height = dimension_byte(height)?;
    let Ok(len) = u32::try_from(png.len()) else {
        bail!("icon payload of {} bytes is too large", png.len());
    };

    let mut ico = Vec::with_capacity(HEADER_LEN + ENTRY_LEN + png.len());

    // header
    ico.extend_from_slice(&0u16.to_le_bytes());
    ico.extend_from_slice(&ICON_TYPE.to_le_bytes());
    ico.extend_from_slice(&1u16.to_le_bytes());

    // directory entry
    ico.extend_from_slice(&[width, height, 0, 0]);
    ico.extend_from_slice(&COLOR_PLANES.to_le_bytes());
    ico.extend_from_slice(&BITS_PER_PIXEL.to_le_bytes());
    ico.extend_from_slice(&len.to_le_bytes());
    ico.extend_from_slice(&PAYLOAD_OFFSET.to_le_bytes());

    ico.extend_from_slice(png);
    Ok(ico)
}

/// One-byte dimension field, where 256 is stored as 0.
fn dimension_byte(value: u32) -> Result<u8> {
    match value {
        256 => Ok(0),
        1..=255 => Ok(value as u8),
        _ => bail!("icon dimension {value} is outside 1..=256"),
    }
}
