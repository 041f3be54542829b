//! Background color parsing.

use std::fmt;

use crate::error::GenerateError;

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Lowercase `#rrggbb`, the form ImageMagick accepts on the command line.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parse `#rrggbb` or `rrggbb` (case-insensitive) into an [`Rgb`].
///
/// Shorthand (`#fff`), named colors and alpha channels are rejected.
pub fn parse_hex_color(input: &str) -> Result<Rgb, GenerateError> {
    let invalid = || GenerateError::InvalidColor(input.to_string());

    let hex = input.strip_prefix('#').unwrap_or(input);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color_valid() {
        assert_eq!(parse_hex_color("#0099ff").unwrap(), Rgb::new(0, 153, 255));
        assert_eq!(parse_hex_color("0099ff").unwrap(), Rgb::new(0, 153, 255));
        assert_eq!(parse_hex_color("#FFFFFF").unwrap(), Rgb::WHITE);
        assert_eq!(parse_hex_color("#aBcDeF").unwrap(), Rgb::new(0xab, 0xcd, 0xef));
    }

    #[test]
    fn test_parse_hex_color_every_byte() {
        for v in [0u8, 1, 15, 16, 127, 128, 254, 255] {
            let input = format!("#{v:02x}{v:02X}{v:02x}");
            assert_eq!(parse_hex_color(&input).unwrap(), Rgb::new(v, v, v), "{input}");
        }
    }

    #[test]
    fn test_parse_hex_color_invalid() {
        for input in [
            "", "#", "blue", "#fff", "fff", "#0099f", "#0099ff0", "##0099ff", "#0099fg",
            "#ff 0000", "+f0000", "#0099ff\n", "#ééé", "#00ff00ff",
        ] {
            match parse_hex_color(input) {
                Err(GenerateError::InvalidColor(s)) => assert_eq!(s, input),
                other => panic!("expected InvalidColor for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_display_round_trips() {
        let color = parse_hex_color("#0099FF").unwrap();
        assert_eq!(color.to_string(), "#0099ff");
        assert_eq!(parse_hex_color(&color.to_string()).unwrap(), color);
    }
}
