use crate::{MapError, Result};
use rgb::RGBA8;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An 8-bit RGBA color.
///
/// Colors are written in configuration as CSS hex strings: `#rgb`,
/// `#rrggbb` or `#rrggbbaa`. Opaque colors serialize back as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(RGBA8);

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(RGBA8 { r, g, b, a: 255 })
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(RGBA8 { r, g, b, a })
    }

    /// Parses a `#`-prefixed hex color.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| invalid_color(hex, "missing leading '#'"))?;

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid_color(hex, "non-hex digit"));
        }

        let channel = |range: std::ops::Range<usize>| -> Result<u8> {
            u8::from_str_radix(&digits[range], 16).map_err(|e| invalid_color(hex, &e.to_string()))
        };

        match digits.len() {
            3 => {
                // #abc expands to #aabbcc
                let short = |i: usize| channel(i..i + 1).map(|v| v * 17);
                Ok(Self::rgb(short(0)?, short(1)?, short(2)?))
            }
            6 => Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Self::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(invalid_color(hex, "expected 3, 6 or 8 hex digits")),
        }
    }

    pub fn to_hex(&self) -> String {
        let RGBA8 { r, g, b, a } = self.0;
        if a == 255 {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }

    pub fn components(&self) -> RGBA8 {
        self.0
    }

    pub fn alpha(&self) -> u8 {
        self.0.a
    }

    pub fn is_opaque(&self) -> bool {
        self.0.a == 255
    }
}

fn invalid_color(input: &str, reason: &str) -> MapError {
    MapError::ParseError(format!("Invalid color '{}': {}", input, reason))
}

impl From<RGBA8> for Color {
    fn from(rgba: RGBA8) -> Self {
        Self(rgba)
    }
}

impl FromStr for Color {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s.trim())
    }
}

impl TryFrom<String> for Color {
    type Error = MapError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
