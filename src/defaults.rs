//! Values used when an optional attribute is absent or unparseable

use crate::color::Color;

pub const FILL_ALPHA: f64 = 1.0;
pub const STROKE_ALPHA: f64 = 1.0;
pub const STROKE_WIDTH: f64 = 0.0;
pub const STROKE_MITER_LIMIT: f64 = 4.0;

pub const ROTATION: f64 = 0.0;
pub const PIVOT: f64 = 0.0;
pub const SCALE: f64 = 1.0;
pub const TRANSLATION: f64 = 0.0;

pub const SIZE: f64 = 0.0;
pub const VIEWPORT: f64 = 0.0;
pub const AUTO_MIRRORED: bool = false;

pub const GRADIENT_COORDINATE: f64 = 0.0;
pub const STOP_OFFSET: f64 = 0.0;

/// Substituted for any color literal that cannot be parsed
pub const COLOR: Color = Color::from_argb(0xFF00_0000);

/// Unit suffixes stripped from width/height before parsing
pub const LENGTH_UNITS: [&str; 3] = ["dp", "px", "%"];
