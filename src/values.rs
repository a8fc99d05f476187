//! Attribute value parsing.
//!
//! Every optional attribute goes through one parser per type returning
//! `Option<T>`, and callers resolve absence with a constant from
//! [`defaults`](crate::defaults). Nothing here fails.

use crate::color::Color;
use crate::defaults;
use crate::errors::ColorError;

/// Parse a plain float, `None` when absent or unparseable.
pub fn float(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse().ok()
}

pub fn float_or(raw: Option<&str>, default: f64) -> f64 {
    float(raw).unwrap_or(default)
}

/// Strict boolean: exactly `true` or `false`.
pub fn boolean(raw: Option<&str>) -> Option<bool> {
    match raw? {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

pub fn boolean_or(raw: Option<&str>, default: bool) -> bool {
    boolean(raw).unwrap_or(default)
}

/// A dimension such as `24dp`, `24px` or `24`, with one unit suffix stripped.
pub fn length(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    let number = defaults::LENGTH_UNITS
        .iter()
        .find_map(|unit| raw.strip_suffix(unit))
        .unwrap_or(raw);
    number.trim_end().parse().ok()
}

pub fn length_or(raw: Option<&str>, default: f64) -> f64 {
    length(raw).unwrap_or(default)
}

/// Parse a color literal; an unparseable literal yields the default color
/// together with the error so the caller can report it.
pub fn color(raw: Option<&str>) -> Option<(Color, Option<ColorError>)> {
    let raw = raw?;
    Some(match Color::parse_hex(raw) {
        Ok(color) => (color, None),
        Err(err) => (defaults::COLOR, Some(err)),
    })
}

/// `viewBox="minX minY width height"` contributes its width and height.
pub fn view_box_size(raw: Option<&str>) -> Option<(f64, f64)> {
    let numbers: Vec<f64> = raw?
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(|part| part.parse().ok())
        .collect::<Option<_>>()?;

    match numbers.as_slice() {
        [_, _, width, height, ..] => Some((*width, *height)),
        _ => None,
    }
}

/// Split an inline `style` attribute into `(property, value)` declarations.
///
/// Declarations that do not hold exactly one `:` are skipped.
pub fn style_declarations(raw: &str) -> Vec<(&str, &str)> {
    raw.split(';')
        .filter_map(|declaration| {
            let mut parts = declaration.split(':');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(value), None) => Some((key.trim(), value.trim())),
                _ => None,
            }
        })
        .collect()
}

/// The id inside a `url(#id)` reference.
pub fn url_reference(raw: &str) -> Option<&str> {
    let inner = raw.trim().strip_prefix("url(")?.strip_suffix(')')?;
    let inner = inner.trim().trim_matches(|c| c == '\'' || c == '"');
    inner.strip_prefix('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats() {
        assert_eq!(float(Some("1.5")), Some(1.5));
        assert_eq!(float(Some(" -2e1 ")), Some(-20.0));
        assert_eq!(float(Some("abc")), None);
        assert_eq!(float(None), None);
        assert_eq!(float_or(Some("oops"), 4.0), 4.0);
    }

    #[test]
    fn booleans_are_strict() {
        assert_eq!(boolean(Some("true")), Some(true));
        assert_eq!(boolean(Some("false")), Some(false));
        assert_eq!(boolean(Some("TRUE")), None);
        assert_eq!(boolean(Some("1")), None);
        assert!(!boolean_or(None, false));
    }

    #[test]
    fn lengths_strip_one_unit() {
        assert_eq!(length(Some("24dp")), Some(24.0));
        assert_eq!(length(Some("24px")), Some(24.0));
        assert_eq!(length(Some("50%")), Some(50.0));
        assert_eq!(length(Some("12.5")), Some(12.5));
        assert_eq!(length(Some("24em")), None);
        assert_eq!(length_or(None, 0.0), 0.0);
    }

    #[test]
    fn colors_report_fallbacks() {
        let (color, err) = color(Some("#F00")).unwrap();
        assert_eq!(color.to_hex_color(), "#FFFF0000");
        assert!(err.is_none());

        let (color, err) = super::color(Some("tomato")).unwrap();
        assert_eq!(color, defaults::COLOR);
        assert!(err.is_some());

        assert!(super::color(None).is_none());
    }

    #[test]
    fn view_box() {
        assert_eq!(view_box_size(Some("0 0 24 48")), Some((24.0, 48.0)));
        assert_eq!(view_box_size(Some("0,0,  24,48")), Some((24.0, 48.0)));
        assert_eq!(view_box_size(Some("0 0 24")), None);
        assert_eq!(view_box_size(Some("0 0 a b")), None);
    }

    #[test]
    fn inline_style() {
        let declarations = style_declarations(" stroke:none;fill-rule:nonzero;fill:url(#linear0);");
        assert_eq!(
            declarations,
            vec![("stroke", "none"), ("fill-rule", "nonzero"), ("fill", "url(#linear0)")]
        );
    }

    #[test]
    fn url_references() {
        assert_eq!(url_reference("url(#clip0)"), Some("clip0"));
        assert_eq!(url_reference(" url('#clip1') "), Some("clip1"));
        assert_eq!(url_reference("#clip0"), None);
    }
}
