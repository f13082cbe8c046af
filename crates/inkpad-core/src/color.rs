//! Pen colors and their canonical string token.
//!
//! Tokens are written as `#AARRGGBB` in uppercase hex. On the way in the
//! shorter `#RGB`, `#ARGB` and `#RRGGBB` forms and a table of named colors are
//! accepted as well, so hand-edited text files keep loading.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while parsing a color token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("empty color token")]
    Empty,
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
    #[error("unknown color name: {0}")]
    UnknownName(String),
}

/// An immutable RGBA8 color, copied by value into every shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const AQUA: Color = Color::new(0, 255, 255, 255);
    pub const DARK_GRAY: Color = Color::new(169, 169, 169, 255);
    pub const TRANSPARENT: Color = Color::new(255, 255, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from a packed `0xAARRGGBB` value.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Packed `0xAARRGGBB` value.
    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Canonical token written to both file formats.
    pub fn to_token(self) -> String {
        format!("#{:08X}", self.to_argb())
    }

    /// Parse a token produced by [`Color::to_token`], a short hex form, or a
    /// color name.
    pub fn parse_token(token: &str) -> Result<Self, ColorParseError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ColorParseError::Empty);
        }
        match token.strip_prefix('#') {
            Some(hex) => parse_hex(hex).ok_or_else(|| ColorParseError::InvalidHex(token.to_string())),
            None => named_color(token).ok_or_else(|| ColorParseError::UnknownName(token.to_string())),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::AQUA
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.to_argb())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_token(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_token(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_token()
    }
}

impl From<peniko::Color> for Color {
    fn from(color: peniko::Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Color> for peniko::Color {
    fn from(color: Color) -> Self {
        peniko::Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    // Short forms repeat each nibble: #F80 == #FF8800.
    let widen = |nibble: u32| ((nibble & 0xF) * 0x11) as u8;
    match hex.len() {
        3 => Some(Color::new(widen(value >> 8), widen(value >> 4), widen(value), 255)),
        4 => Some(Color::new(
            widen(value >> 8),
            widen(value >> 4),
            widen(value),
            widen(value >> 12),
        )),
        6 => Some(Color::from_argb(0xFF00_0000 | value)),
        8 => Some(Color::from_argb(value)),
        _ => None,
    }
}

/// Named colors recognised when loading, as `0xAARRGGBB`.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("aqua", 0xFF00FFFF),
    ("black", 0xFF000000),
    ("blue", 0xFF0000FF),
    ("brown", 0xFFA52A2A),
    ("coral", 0xFFFF7F50),
    ("crimson", 0xFFDC143C),
    ("cyan", 0xFF00FFFF),
    ("darkblue", 0xFF00008B),
    ("darkgray", 0xFFA9A9A9),
    ("darkgreen", 0xFF006400),
    ("darkorange", 0xFFFF8C00),
    ("darkred", 0xFF8B0000),
    ("fuchsia", 0xFFFF00FF),
    ("gold", 0xFFFFD700),
    ("gray", 0xFF808080),
    ("green", 0xFF008000),
    ("indigo", 0xFF4B0082),
    ("ivory", 0xFFFFFFF0),
    ("lightblue", 0xFFADD8E6),
    ("lightgray", 0xFFD3D3D3),
    ("lightgreen", 0xFF90EE90),
    ("lime", 0xFF00FF00),
    ("magenta", 0xFFFF00FF),
    ("maroon", 0xFF800000),
    ("navy", 0xFF000080),
    ("olive", 0xFF808000),
    ("orange", 0xFFFFA500),
    ("pink", 0xFFFFC0CB),
    ("purple", 0xFF800080),
    ("red", 0xFFFF0000),
    ("silver", 0xFFC0C0C0),
    ("skyblue", 0xFF87CEEB),
    ("teal", 0xFF008080),
    ("transparent", 0x00FFFFFF),
    ("violet", 0xFFEE82EE),
    ("white", 0xFFFFFFFF),
    ("yellow", 0xFFFFFF00),
];

fn named_color(name: &str) -> Option<Color> {
    NAMED_COLORS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|&(_, argb)| Color::from_argb(argb))
}
