//! The dialect-neutral icon tree produced by a parse.

use glam::DVec2;

use crate::color::Color;
use crate::defaults;
use crate::path_data::PathNode;
use crate::transform::DecomposedTransform;

/// A parsed icon: root sizing plus the ordered top-level nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageVector {
    pub default_width: f64,
    pub default_height: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub auto_mirror: bool,
    pub nodes: Vec<VectorNode>,
}

impl ImageVector {
    /// Every path in document order, including those owned by groups.
    pub fn paths(&self) -> impl Iterator<Item = &VectorPath> {
        self.nodes.iter().flat_map(|node| match node {
            VectorNode::Path(path) => std::slice::from_ref(path).iter(),
            VectorNode::Group(group) => group.paths.iter(),
        })
    }
}

impl Default for ImageVector {
    fn default() -> Self {
        ImageVector {
            default_width: defaults::SIZE,
            default_height: defaults::SIZE,
            viewport_width: defaults::VIEWPORT,
            viewport_height: defaults::VIEWPORT,
            auto_mirror: defaults::AUTO_MIRRORED,
            nodes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum VectorNode {
    Path(VectorPath),
    Group(VectorGroup),
}

impl VectorNode {
    pub fn as_path(&self) -> Option<&VectorPath> {
        match self {
            VectorNode::Path(path) => Some(path),
            VectorNode::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&VectorGroup> {
        match self {
            VectorNode::Group(group) => Some(group),
            VectorNode::Path(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VectorPath {
    pub name: String,
    pub fill: Option<Fill>,
    pub stroke: Option<Stroke>,
    pub fill_alpha: f64,
    pub stroke_alpha: f64,
    pub stroke_width: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f64,
    pub fill_rule: FillRule,
    pub nodes: Vec<PathNode>,
}

impl Default for VectorPath {
    fn default() -> Self {
        VectorPath {
            name: String::new(),
            fill: None,
            stroke: None,
            fill_alpha: defaults::FILL_ALPHA,
            stroke_alpha: defaults::STROKE_ALPHA,
            stroke_width: defaults::STROKE_WIDTH,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            miter_limit: defaults::STROKE_MITER_LIMIT,
            fill_rule: FillRule::default(),
            nodes: Vec::new(),
        }
    }
}

/// A group owns its paths outright; clip data is copied in, never shared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorGroup {
    pub name: String,
    pub transform: DecomposedTransform,
    pub paths: Vec<VectorPath>,
    pub clip_path_data: Vec<PathNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Color),
    LinearGradient(LinearGradient),
    RadialGradient(RadialGradient),
}

impl Fill {
    /// Stops of a gradient fill, `None` for a solid color.
    pub fn color_stops_mut(&mut self) -> Option<&mut Vec<ColorStop>> {
        match self {
            Fill::Solid(_) => None,
            Fill::LinearGradient(gradient) => Some(&mut gradient.color_stops),
            Fill::RadialGradient(gradient) => Some(&mut gradient.color_stops),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: DVec2,
    pub end: DVec2,
    pub color_stops: Vec<ColorStop>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: DVec2,
    pub radius: f64,
    pub color_stops: Vec<ColorStop>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    Color(Color),
}

macro_rules! attribute_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub enum $name {
            #[default]
            $($variant),+
        }

        impl $name {
            /// Case-insensitive match against the attribute keyword.
            pub fn from_attr(value: &str) -> Option<Self> {
                let value = value.trim();
                $(
                    if value.eq_ignore_ascii_case($text) {
                        return Some($name::$variant);
                    }
                )+
                None
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }
    };
}

attribute_enum!(
    /// Stroke end cap
    LineCap { Butt => "butt", Round => "round", Square => "square" }
);

attribute_enum!(
    /// Stroke corner join
    LineJoin { Miter => "miter", Round => "round", Bevel => "bevel" }
);

attribute_enum!(
    FillRule { NonZero => "nonzero", EvenOdd => "evenodd" }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_keywords_ignore_case() {
        assert_eq!(LineCap::from_attr("ROUND"), Some(LineCap::Round));
        assert_eq!(LineJoin::from_attr("bevel"), Some(LineJoin::Bevel));
        assert_eq!(FillRule::from_attr("evenOdd"), Some(FillRule::EvenOdd));
        assert_eq!(FillRule::from_attr("winding"), None);
        assert_eq!(LineCap::default(), LineCap::Butt);
        assert_eq!(LineJoin::default().as_str(), "miter");
        assert_eq!(FillRule::default(), FillRule::NonZero);
    }

    #[test]
    fn path_defaults() {
        let path = VectorPath::default();
        assert_eq!(path.fill_alpha, 1.0);
        assert_eq!(path.stroke_alpha, 1.0);
        assert_eq!(path.stroke_width, 0.0);
        assert_eq!(path.miter_limit, 4.0);
        assert!(path.fill.is_none() && path.stroke.is_none());
    }

    #[test]
    fn solid_fills_have_no_stops() {
        let mut solid = Fill::Solid(Color::default());
        assert!(solid.color_stops_mut().is_none());

        let mut radial = Fill::RadialGradient(RadialGradient {
            center: DVec2::ZERO,
            radius: 2.0,
            color_stops: Vec::new(),
        });
        radial.color_stops_mut().unwrap().push(ColorStop {
            offset: 0.5,
            color: Color::from_argb(0xFFFF_FFFF),
        });
        let Fill::RadialGradient(gradient) = radial else {
            unreachable!()
        };
        assert_eq!(gradient.color_stops.len(), 1);
    }
}
