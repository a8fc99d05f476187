//! Markup dialect tables.
//!
//! A dialect maps the walker's logical [`Field`]s to attribute names and tag
//! names to [`TagKind`]s. It is chosen once from the root tag; everything
//! else in the walk is dialect-neutral.

use enum_dispatch::enum_dispatch;

/// Logical attribute read by the walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Width,
    Height,
    ViewBox,
    ViewportWidth,
    ViewportHeight,
    AutoMirrored,
    Name,
    Id,
    PathData,
    FillColor,
    FillAlpha,
    FillRule,
    StrokeColor,
    StrokeAlpha,
    StrokeWidth,
    StrokeLineCap,
    StrokeLineJoin,
    StrokeMiterLimit,
    Style,
    Transform,
    Rotation,
    PivotX,
    PivotY,
    ScaleX,
    ScaleY,
    TranslateX,
    TranslateY,
    ClipPath,
    GradientType,
    StartX,
    StartY,
    EndX,
    EndY,
    CenterX,
    CenterY,
    GradientRadius,
    StopOffset,
    StopColor,
}

/// What a child tag contributes to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Path,
    Group,
    /// `<clipPath id>`: a named clip registered for later `url(#id)` lookup
    ClipPathDefinition,
    /// `<clip-path pathData>`: clip data for the current group
    ClipPathData,
    Gradient,
    GradientStop,
}

/// Where a group's transform comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformSource {
    /// One `transform` attribute in transform-list syntax
    Syntax,
    /// Already-split numeric attributes (rotation, pivot, scale, translation)
    Attributes,
}

#[enum_dispatch]
pub trait DialectTable {
    fn root_tag(&self) -> &'static str;

    fn attribute_name(&self, field: Field) -> Option<&'static str>;

    fn tag_kind(&self, tag: &str) -> Option<TagKind>;

    fn transform_source(&self) -> TransformSource;

    /// Whether presentation fields may also come from an inline `style`.
    fn uses_inline_style(&self) -> bool {
        false
    }

    /// Paint values that mean "no paint" rather than a color.
    fn is_paint_none(&self, _value: &str) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SvgDialect;

impl DialectTable for SvgDialect {
    fn root_tag(&self) -> &'static str {
        "svg"
    }

    fn attribute_name(&self, field: Field) -> Option<&'static str> {
        Some(match field {
            Field::Width => "width",
            Field::Height => "height",
            Field::ViewBox => "viewBox",
            Field::Name | Field::Id => "id",
            Field::PathData => "d",
            Field::FillColor => "fill",
            Field::FillAlpha => "fill-opacity",
            Field::FillRule => "fill-rule",
            Field::StrokeColor => "stroke",
            Field::StrokeAlpha => "stroke-opacity",
            Field::StrokeWidth => "stroke-width",
            Field::StrokeLineCap => "stroke-linecap",
            Field::StrokeLineJoin => "stroke-linejoin",
            Field::StrokeMiterLimit => "stroke-miterlimit",
            Field::Style => "style",
            Field::Transform => "transform",
            Field::ClipPath => "clip-path",
            _ => return None,
        })
    }

    fn tag_kind(&self, tag: &str) -> Option<TagKind> {
        match tag {
            "path" => Some(TagKind::Path),
            "g" => Some(TagKind::Group),
            "clipPath" => Some(TagKind::ClipPathDefinition),
            _ => None,
        }
    }

    fn transform_source(&self) -> TransformSource {
        TransformSource::Syntax
    }

    fn uses_inline_style(&self) -> bool {
        true
    }

    fn is_paint_none(&self, value: &str) -> bool {
        let value = value.trim();
        value == "none" || value.starts_with("url(")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VectorDrawableDialect;

impl DialectTable for VectorDrawableDialect {
    fn root_tag(&self) -> &'static str {
        "vector"
    }

    fn attribute_name(&self, field: Field) -> Option<&'static str> {
        Some(match field {
            Field::Width => "android:width",
            Field::Height => "android:height",
            Field::ViewportWidth => "android:viewportWidth",
            Field::ViewportHeight => "android:viewportHeight",
            Field::AutoMirrored => "android:autoMirrored",
            Field::Name => "android:name",
            Field::PathData => "android:pathData",
            Field::FillColor => "android:fillColor",
            Field::FillAlpha => "android:fillAlpha",
            Field::FillRule => "android:fillType",
            Field::StrokeColor => "android:strokeColor",
            Field::StrokeAlpha => "android:strokeAlpha",
            Field::StrokeWidth => "android:strokeWidth",
            Field::StrokeLineCap => "android:strokeLineCap",
            Field::StrokeLineJoin => "android:strokeLineJoin",
            Field::StrokeMiterLimit => "android:strokeMiterLimit",
            Field::Rotation => "android:rotation",
            Field::PivotX => "android:pivotX",
            Field::PivotY => "android:pivotY",
            Field::ScaleX => "android:scaleX",
            Field::ScaleY => "android:scaleY",
            Field::TranslateX => "android:translateX",
            Field::TranslateY => "android:translateY",
            Field::GradientType => "android:type",
            Field::StartX => "android:startX",
            Field::StartY => "android:startY",
            Field::EndX => "android:endX",
            Field::EndY => "android:endY",
            Field::CenterX => "android:centerX",
            Field::CenterY => "android:centerY",
            Field::GradientRadius => "android:gradientRadius",
            Field::StopOffset => "android:offset",
            Field::StopColor => "android:color",
            _ => return None,
        })
    }

    fn tag_kind(&self, tag: &str) -> Option<TagKind> {
        match tag {
            "path" => Some(TagKind::Path),
            "group" => Some(TagKind::Group),
            "clip-path" => Some(TagKind::ClipPathData),
            "gradient" => Some(TagKind::Gradient),
            "item" => Some(TagKind::GradientStop),
            _ => None,
        }
    }

    fn transform_source(&self) -> TransformSource {
        TransformSource::Attributes
    }
}

#[enum_dispatch(DialectTable)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Svg(SvgDialect),
    VectorDrawable(VectorDrawableDialect),
}

impl Dialect {
    pub fn from_root_tag(tag: &str) -> Option<Self> {
        match tag {
            "svg" => Some(SvgDialect.into()),
            "vector" => Some(VectorDrawableDialect.into()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_tags_select_the_dialect() {
        assert_eq!(Dialect::from_root_tag("svg"), Some(Dialect::Svg(SvgDialect)));
        assert_eq!(
            Dialect::from_root_tag("vector"),
            Some(Dialect::VectorDrawable(VectorDrawableDialect))
        );
        assert_eq!(Dialect::from_root_tag("html"), None);

        for dialect in [Dialect::from(SvgDialect), Dialect::from(VectorDrawableDialect)] {
            assert_eq!(Dialect::from_root_tag(dialect.root_tag()), Some(dialect));
        }
    }

    #[test]
    fn same_field_different_names() {
        let svg = Dialect::from(SvgDialect);
        let xml = Dialect::from(VectorDrawableDialect);
        assert_eq!(svg.attribute_name(Field::PathData), Some("d"));
        assert_eq!(xml.attribute_name(Field::PathData), Some("android:pathData"));
        assert_eq!(svg.attribute_name(Field::Rotation), None);
        assert_eq!(xml.attribute_name(Field::Transform), None);
        assert_eq!(xml.attribute_name(Field::FillRule), Some("android:fillType"));
    }

    #[test]
    fn tag_dispatch() {
        let svg = Dialect::from(SvgDialect);
        let xml = Dialect::from(VectorDrawableDialect);
        assert_eq!(svg.tag_kind("g"), Some(TagKind::Group));
        assert_eq!(svg.tag_kind("group"), None);
        assert_eq!(svg.tag_kind("clipPath"), Some(TagKind::ClipPathDefinition));
        assert_eq!(xml.tag_kind("clip-path"), Some(TagKind::ClipPathData));
        assert_eq!(xml.tag_kind("item"), Some(TagKind::GradientStop));
        assert_eq!(svg.transform_source(), TransformSource::Syntax);
        assert_eq!(xml.transform_source(), TransformSource::Attributes);
    }

    #[test]
    fn svg_paint_keywords() {
        let svg = Dialect::from(SvgDialect);
        assert!(svg.is_paint_none("none"));
        assert!(svg.is_paint_none("url(#linear0)"));
        assert!(!svg.is_paint_none("#fff"));
        assert!(!Dialect::from(VectorDrawableDialect).is_paint_none("none"));
    }
}
