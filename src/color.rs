//! 32-bit ARGB colors parsed from hex literals

use std::fmt;
use std::str::FromStr;

use crate::defaults;
use crate::errors::ColorError;

/// A color packed as `0xAARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const fn from_argb(argb: u32) -> Self {
        Color(argb)
    }

    /// Parse `#RGB`, `#RRGGBB` or `#AARRGGBB` (the `#` or `0x` prefix is optional).
    ///
    /// Missing alpha means opaque; `RGB` expands every nibble (`abc` -> `aabbcc`).
    pub fn parse_hex(text: &str) -> Result<Self, ColorError> {
        let hex = strip_prefix_ignore_case(text, "#");
        let hex = strip_prefix_ignore_case(hex, "0x");

        let invalid = || ColorError::InvalidColorLiteral {
            literal: text.to_string(),
        };

        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let normalized = match hex.len() {
            3 => {
                let mut expanded = String::from("FF");
                for c in hex.chars() {
                    expanded.push(c);
                    expanded.push(c);
                }
                expanded
            }
            6 => format!("FF{hex}"),
            8 => hex.to_string(),
            _ => return Err(invalid()),
        };

        u32::from_str_radix(&normalized, 16)
            .map(Color)
            .map_err(|_| invalid())
    }

    /// Like [`Color::parse_hex`], but falls back to opaque black.
    pub fn from_hex(text: &str) -> Self {
        Self::parse_hex(text).unwrap_or(defaults::COLOR)
    }

    pub fn argb(self) -> u32 {
        self.0
    }

    pub fn alpha(self) -> u8 {
        self.channel(0)
    }

    pub fn red(self) -> u8 {
        self.channel(1)
    }

    pub fn green(self) -> u8 {
        self.channel(2)
    }

    pub fn blue(self) -> u8 {
        self.channel(3)
    }

    pub fn is_transparent(self) -> bool {
        self.alpha() == 0
    }

    /// `#AARRGGBB`, uppercase
    pub fn to_hex_color(self) -> String {
        format!("#{:08X}", self.0)
    }

    /// `0xAARRGGBB`, uppercase digits
    pub fn to_hex_literal(self) -> String {
        format!("0x{:08X}", self.0)
    }

    fn channel(self, index: u32) -> u8 {
        (self.0 >> ((3 - index) * 8)) as u8
    }
}

impl Default for Color {
    fn default() -> Self {
        defaults::COLOR
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> &'a str {
    match text.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => &text[prefix.len()..],
        _ => text,
    }
}
