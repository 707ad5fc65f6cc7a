// src/color.rs

use std::fmt;
use std::str::FromStr;

use crate::error::{PolygonError, Result};

/// Opaque sRGB color with byte channels.
///
/// Shapes are always drawn fully opaque; `alpha()` exists so the color can be
/// handed to shaders as RGBA without special cases.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

const PALETTE: &[(&str, Color)] = &[
    ("black", Color::BLACK),
    ("white", Color::WHITE),
    ("red", Color::RED),
    ("lime", Color::rgb(0, 255, 0)),
    ("green", Color::rgb(0, 128, 0)),
    ("blue", Color::BLUE),
    ("yellow", Color::rgb(255, 255, 0)),
    ("cyan", Color::rgb(0, 255, 255)),
    ("aqua", Color::rgb(0, 255, 255)),
    ("magenta", Color::rgb(255, 0, 255)),
    ("fuchsia", Color::rgb(255, 0, 255)),
    ("gray", Color::rgb(128, 128, 128)),
    ("grey", Color::rgb(128, 128, 128)),
    ("silver", Color::rgb(192, 192, 192)),
    ("maroon", Color::rgb(128, 0, 0)),
    ("olive", Color::rgb(128, 128, 0)),
    ("navy", Color::rgb(0, 0, 128)),
    ("purple", Color::rgb(128, 0, 128)),
    ("teal", Color::rgb(0, 128, 128)),
    ("orange", Color::rgb(255, 165, 0)),
    ("gold", Color::rgb(255, 215, 0)),
];

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Resolves a palette name (case-insensitive) or a `#rrggbb` literal.
    pub fn named(name: &str) -> Result<Self> {
        let name = name.trim();
        if let Some(hex) = name.strip_prefix('#') {
            return Self::from_hex(hex)
                .ok_or_else(|| PolygonError::invalid(format!("malformed hex color `{name}`")));
        }
        PALETTE
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, color)| *color)
            .ok_or_else(|| PolygonError::invalid(format!("unknown color name `{name}`")))
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    #[inline]
    pub const fn channels(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    #[inline]
    pub fn red(self) -> f32 {
        self.r as f32 / 255.0
    }

    #[inline]
    pub fn green(self) -> f32 {
        self.g as f32 / 255.0
    }

    #[inline]
    pub fn blue(self) -> f32 {
        self.b as f32 / 255.0
    }

    #[inline]
    pub fn alpha(self) -> f32 {
        1.0
    }

    /// Normalized `[r, g, b, a]`, the layout of the `color` uniform.
    #[inline]
    pub fn to_rgba(self) -> [f32; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }
}

impl FromStr for Color {
    type Err = PolygonError;

    fn from_str(s: &str) -> Result<Self> {
        Self::named(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Color> for wgpu::Color {
    fn from(c: Color) -> Self {
        wgpu::Color {
            r: c.red() as f64,
            g: c.green() as f64,
            b: c.blue() as f64,
            a: 1.0,
        }
    }
}
