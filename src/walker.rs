//! Document walker: tokenizer events in, [`ImageVector`] out.
//!
//! The walk is a single forward pass. The root tag picks the [`Dialect`];
//! after that every start tag is classified through the dialect table and
//! handed to a [`TreeBuilder`], which owns the node list and the two cursors
//! the walk needs: the current group and the open gradient fill.

use std::collections::HashMap;

use glam::dvec2;

use crate::color::Color;
use crate::defaults;
use crate::dialect::{Dialect, DialectTable, Field, TagKind, TransformSource};
use crate::errors::{ParseError, ParseWarning};
use crate::ir::{
    ColorStop, Fill, FillRule, ImageVector, LineCap, LineJoin, LinearGradient, RadialGradient,
    Stroke, VectorGroup, VectorNode, VectorPath,
};
use crate::options::{GroupNesting, ParseOptions};
use crate::path_data::{PathNode, parse_path_data};
use crate::tokenizer::{Event, Tokenizer};
use crate::transform::{DecomposedTransform, parse_transform};
use crate::values;

/// Result of walking one document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub dialect: Dialect,
    pub image_vector: ImageVector,
    pub warnings: Vec<ParseWarning>,
}

/// Walks a tokenizer positioned anywhere before the root start tag.
#[derive(Debug, Clone, Default)]
pub struct DocumentWalker {
    options: ParseOptions,
    expected: Option<Dialect>,
}

impl DocumentWalker {
    pub fn new(options: ParseOptions) -> Self {
        DocumentWalker {
            options,
            expected: None,
        }
    }

    /// Reject documents whose root tag belongs to another dialect.
    pub fn expecting(mut self, dialect: impl Into<Dialect>) -> Self {
        self.expected = Some(dialect.into());
        self
    }

    pub fn parse_document<T: Tokenizer + ?Sized>(
        &self,
        tokenizer: &mut T,
    ) -> Result<ParsedDocument, ParseError> {
        tokenizer.seek_to_start_tag()?;
        let dialect = self.select_dialect(tokenizer.tag_name())?;
        crate::log::debug!(?dialect, "selected dialect");

        let mut builder = TreeBuilder::new(dialect, self.options.group_nesting);
        builder.read_root(&Attributes::new(&*tokenizer, dialect));

        tokenizer.advance()?;
        while !tokenizer.is_at_document_end() {
            match tokenizer.event() {
                Event::StartTag => builder.start_tag(&*tokenizer)?,
                Event::EndTag => builder.end_tag(tokenizer.depth()),
                _ => {}
            }
            tokenizer.advance()?;
        }

        Ok(builder.finish())
    }

    fn select_dialect(&self, root: &str) -> Result<Dialect, ParseError> {
        match self.expected {
            Some(expected) if expected.root_tag() == root => Ok(expected),
            Some(expected) => Err(ParseError::malformed_document(format!(
                "the start tag must be <{}>",
                expected.root_tag()
            ))),
            None => Dialect::from_root_tag(root).ok_or_else(|| {
                ParseError::malformed_document(format!("unknown root tag <{root}>"))
            }),
        }
    }
}

/// Walk a document with default options, discarding warnings.
pub fn parse_document<T: Tokenizer + ?Sized>(tokenizer: &mut T) -> Result<ImageVector, ParseError> {
    DocumentWalker::default()
        .parse_document(tokenizer)
        .map(|parsed| parsed.image_vector)
}

/// Attribute lookup for the current start tag through the dialect table.
struct Attributes<'t, T: ?Sized> {
    tokenizer: &'t T,
    dialect: Dialect,
    style: Vec<(&'t str, &'t str)>,
}

impl<'t, T: Tokenizer + ?Sized> Attributes<'t, T> {
    fn new(tokenizer: &'t T, dialect: Dialect) -> Self {
        let style = match dialect.attribute_name(Field::Style) {
            Some(name) if dialect.uses_inline_style() => tokenizer
                .attribute(name)
                .map(values::style_declarations)
                .unwrap_or_default(),
            _ => Vec::new(),
        };
        Attributes {
            tokenizer,
            dialect,
            style,
        }
    }

    fn get(&self, field: Field) -> Option<&'t str> {
        let name = self.dialect.attribute_name(field)?;
        self.tokenizer.attribute(name)
    }

    /// Like `get`, but an inline style declaration takes precedence.
    fn presentation(&self, field: Field) -> Option<&'t str> {
        let name = self.dialect.attribute_name(field)?;
        self.style
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .or_else(|| self.tokenizer.attribute(name))
    }

    fn float_or(&self, field: Field, default: f64) -> f64 {
        values::float_or(self.get(field), default)
    }
}

/// Where a path lives in the tree under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathSlot {
    Root(usize),
    Group { group: usize, path: usize },
}

/// An SVG `<clipPath>` being read; its paths feed the definition table.
struct ClipScope {
    id: Option<String>,
    depth: usize,
}

struct TreeBuilder {
    dialect: Dialect,
    nesting: GroupNesting,
    image_vector: ImageVector,
    /// Index into `image_vector.nodes` of the group receiving paths
    current_group: Option<usize>,
    /// Open groups as `(depth, node index)`, used by `GroupNesting::Stack`
    group_stack: Vec<(usize, usize)>,
    open_fill: Option<PathSlot>,
    clip_paths: HashMap<String, Vec<PathNode>>,
    open_clip: Option<ClipScope>,
    warnings: Vec<ParseWarning>,
}

impl TreeBuilder {
    fn new(dialect: Dialect, nesting: GroupNesting) -> Self {
        TreeBuilder {
            dialect,
            nesting,
            image_vector: ImageVector::default(),
            current_group: None,
            group_stack: Vec::new(),
            open_fill: None,
            clip_paths: HashMap::new(),
            open_clip: None,
            warnings: Vec::new(),
        }
    }

    fn finish(self) -> ParsedDocument {
        ParsedDocument {
            dialect: self.dialect,
            image_vector: self.image_vector,
            warnings: self.warnings,
        }
    }

    fn record(&mut self, warning: ParseWarning) {
        crate::log::recovered(&warning);
        self.warnings.push(warning);
    }

    fn read_root<T: Tokenizer + ?Sized>(&mut self, attrs: &Attributes<'_, T>) {
        let root = &mut self.image_vector;
        root.default_width = values::length_or(attrs.get(Field::Width), defaults::SIZE);
        root.default_height = values::length_or(attrs.get(Field::Height), defaults::SIZE);

        let viewport = match attrs.get(Field::ViewBox) {
            Some(view_box) => values::view_box_size(Some(view_box))
                .unwrap_or((defaults::VIEWPORT, defaults::VIEWPORT)),
            None => (
                attrs.float_or(Field::ViewportWidth, defaults::VIEWPORT),
                attrs.float_or(Field::ViewportHeight, defaults::VIEWPORT),
            ),
        };
        (root.viewport_width, root.viewport_height) = viewport;
        root.auto_mirror = values::boolean_or(attrs.get(Field::AutoMirrored), defaults::AUTO_MIRRORED);
    }

    fn start_tag<T: Tokenizer + ?Sized>(&mut self, tokenizer: &T) -> Result<(), ParseError> {
        let kind = self.dialect.tag_kind(tokenizer.tag_name());
        if kind != Some(TagKind::GradientStop) {
            self.open_fill = None;
        }
        let attrs = Attributes::new(tokenizer, self.dialect);

        if let Some(scope) = &self.open_clip {
            if kind == Some(TagKind::Path) {
                let nodes = path_nodes(&attrs)?;
                if let Some(id) = &scope.id {
                    self.clip_paths.entry(id.clone()).or_default().extend(nodes);
                }
            }
            return Ok(());
        }

        match kind {
            Some(TagKind::Path) => {
                let path = self.read_path(&attrs)?;
                self.push_path(path);
            }
            Some(TagKind::Group) => {
                let group = self.read_group(&attrs);
                self.open_group(group, tokenizer.depth());
            }
            Some(TagKind::ClipPathDefinition) => {
                let id = attrs.get(Field::Id).map(str::to_string);
                crate::log::debug!(?id, "clip path definition");
                if let Some(id) = &id {
                    self.clip_paths.entry(id.clone()).or_default();
                }
                self.open_clip = Some(ClipScope {
                    id,
                    depth: tokenizer.depth(),
                });
            }
            Some(TagKind::ClipPathData) => {
                let nodes = path_nodes(&attrs)?;
                match self.current_group.and_then(|index| self.group_mut(index)) {
                    Some(group) => group.clip_path_data.extend(nodes),
                    None => {
                        crate::log::debug!("clip-path outside of a group ignored");
                    }
                }
            }
            Some(TagKind::Gradient) => self.open_gradient(&attrs),
            Some(TagKind::GradientStop) => self.add_color_stop(&attrs),
            None => {}
        }
        Ok(())
    }

    fn end_tag(&mut self, depth: usize) {
        if self.open_clip.as_ref().is_some_and(|scope| scope.depth == depth) {
            self.open_clip = None;
            return;
        }

        if self.nesting == GroupNesting::Stack
            && self.group_stack.last().is_some_and(|&(open, _)| open == depth)
        {
            self.group_stack.pop();
            self.current_group = self.group_stack.last().map(|&(_, index)| index);
            crate::log::debug!(current = ?self.current_group, "group closed");
        }
    }

    fn read_path<T: Tokenizer + ?Sized>(
        &mut self,
        attrs: &Attributes<'_, T>,
    ) -> Result<VectorPath, ParseError> {
        let fill = self.paint(attrs.presentation(Field::FillColor)).map(Fill::Solid);
        let stroke = self.paint(attrs.presentation(Field::StrokeColor)).map(Stroke::Color);
        let float = |field, default| values::float_or(attrs.presentation(field), default);

        Ok(VectorPath {
            name: attrs.get(Field::Name).unwrap_or_default().to_string(),
            fill,
            stroke,
            fill_alpha: float(Field::FillAlpha, defaults::FILL_ALPHA),
            stroke_alpha: float(Field::StrokeAlpha, defaults::STROKE_ALPHA),
            stroke_width: float(Field::StrokeWidth, defaults::STROKE_WIDTH),
            line_cap: attrs
                .presentation(Field::StrokeLineCap)
                .and_then(LineCap::from_attr)
                .unwrap_or_default(),
            line_join: attrs
                .presentation(Field::StrokeLineJoin)
                .and_then(LineJoin::from_attr)
                .unwrap_or_default(),
            miter_limit: float(Field::StrokeMiterLimit, defaults::STROKE_MITER_LIMIT),
            fill_rule: attrs
                .presentation(Field::FillRule)
                .and_then(FillRule::from_attr)
                .unwrap_or_default(),
            nodes: path_nodes(attrs)?,
        })
    }

    /// Resolve a fill or stroke value. Fully transparent paints are dropped.
    fn paint(&mut self, raw: Option<&str>) -> Option<Color> {
        let raw = raw?;
        if self.dialect.is_paint_none(raw) {
            return None;
        }
        let (color, error) = values::color(Some(raw))?;
        if let Some(error) = error {
            self.record(ParseWarning::InvalidColorLiteral(error));
        }
        (!color.is_transparent()).then_some(color)
    }

    fn read_group<T: Tokenizer + ?Sized>(&mut self, attrs: &Attributes<'_, T>) -> VectorGroup {
        let name = attrs.get(Field::Name).unwrap_or_default().to_string();

        let transform = match self.dialect.transform_source() {
            TransformSource::Syntax => match attrs.get(Field::Transform) {
                Some(text) => parse_transform(text).unwrap_or_else(|source| {
                    self.record(ParseWarning::IgnoredTransform {
                        group: name.clone(),
                        source,
                    });
                    DecomposedTransform::default()
                }),
                None => DecomposedTransform::default(),
            },
            TransformSource::Attributes => DecomposedTransform {
                translation: dvec2(
                    attrs.float_or(Field::TranslateX, defaults::TRANSLATION),
                    attrs.float_or(Field::TranslateY, defaults::TRANSLATION),
                ),
                scale: dvec2(
                    attrs.float_or(Field::ScaleX, defaults::SCALE),
                    attrs.float_or(Field::ScaleY, defaults::SCALE),
                ),
                rotation: attrs.float_or(Field::Rotation, defaults::ROTATION),
                pivot: dvec2(
                    attrs.float_or(Field::PivotX, defaults::PIVOT),
                    attrs.float_or(Field::PivotY, defaults::PIVOT),
                ),
            },
        };

        let clip_path_data = match attrs.get(Field::ClipPath) {
            Some(reference) => {
                let id = values::url_reference(reference).unwrap_or(reference.trim());
                match self.clip_paths.get(id) {
                    Some(nodes) => nodes.clone(),
                    None => {
                        self.record(ParseWarning::UnresolvedClipPathReference { id: id.to_string() });
                        Vec::new()
                    }
                }
            }
            None => Vec::new(),
        };

        VectorGroup {
            name,
            transform,
            paths: Vec::new(),
            clip_path_data,
        }
    }

    fn push_path(&mut self, path: VectorPath) {
        match self.current_group.and_then(|index| self.group_mut(index)) {
            Some(group) => group.paths.push(path),
            None => self.image_vector.nodes.push(VectorNode::Path(path)),
        }
    }

    fn open_group(&mut self, group: VectorGroup, depth: usize) {
        crate::log::debug!(name = %group.name, depth, "group opened");
        let index = self.image_vector.nodes.len();
        self.image_vector.nodes.push(VectorNode::Group(group));
        self.current_group = Some(index);
        if self.nesting == GroupNesting::Stack {
            self.group_stack.push((depth, index));
        }
    }

    fn open_gradient<T: Tokenizer + ?Sized>(&mut self, attrs: &Attributes<'_, T>) {
        let coordinate = |field| attrs.float_or(field, defaults::GRADIENT_COORDINATE);
        let gradient_type = attrs.get(Field::GradientType).map(str::trim);
        let fill = match gradient_type {
            None | Some("linear") => Fill::LinearGradient(LinearGradient {
                start: dvec2(coordinate(Field::StartX), coordinate(Field::StartY)),
                end: dvec2(coordinate(Field::EndX), coordinate(Field::EndY)),
                color_stops: Vec::new(),
            }),
            Some("radial") => Fill::RadialGradient(RadialGradient {
                center: dvec2(coordinate(Field::CenterX), coordinate(Field::CenterY)),
                radius: coordinate(Field::GradientRadius),
                color_stops: Vec::new(),
            }),
            Some(_) => {
                crate::log::debug!(?gradient_type, "unsupported gradient type");
                return;
            }
        };

        let Some(slot) = self.last_path_slot() else {
            crate::log::debug!("gradient without a preceding path");
            return;
        };
        let Some(path) = self.path_mut(slot) else {
            return;
        };
        if path.fill.is_some() {
            crate::log::debug!(?slot, "gradient ignored, path already filled");
            return;
        }
        path.fill = Some(fill);
        self.open_fill = Some(slot);
        crate::log::debug!(?slot, "gradient attached");
    }

    fn add_color_stop<T: Tokenizer + ?Sized>(&mut self, attrs: &Attributes<'_, T>) {
        let Some(slot) = self.open_fill else {
            return;
        };
        let Some((color, error)) = values::color(attrs.get(Field::StopColor)) else {
            return;
        };
        if let Some(error) = error {
            self.record(ParseWarning::InvalidColorLiteral(error));
        }
        let stop = ColorStop {
            offset: attrs.float_or(Field::StopOffset, defaults::STOP_OFFSET),
            color,
        };
        if let Some(stops) = self
            .path_mut(slot)
            .and_then(|path| path.fill.as_mut())
            .and_then(Fill::color_stops_mut)
        {
            stops.push(stop);
        }
    }

    /// The most recently emitted path: the last path of the current group,
    /// or else the last root node when it is a path.
    fn last_path_slot(&self) -> Option<PathSlot> {
        let in_group = self.current_group.and_then(|group| {
            let VectorNode::Group(g) = self.image_vector.nodes.get(group)? else {
                return None;
            };
            g.paths.len().checked_sub(1).map(|path| PathSlot::Group { group, path })
        });
        in_group.or_else(|| {
            let last = self.image_vector.nodes.len().checked_sub(1)?;
            matches!(self.image_vector.nodes[last], VectorNode::Path(_)).then_some(PathSlot::Root(last))
        })
    }

    fn path_mut(&mut self, slot: PathSlot) -> Option<&mut VectorPath> {
        match slot {
            PathSlot::Root(index) => match self.image_vector.nodes.get_mut(index)? {
                VectorNode::Path(path) => Some(path),
                VectorNode::Group(_) => None,
            },
            PathSlot::Group { group, path } => self.group_mut(group)?.paths.get_mut(path),
        }
    }

    fn group_mut(&mut self, index: usize) -> Option<&mut VectorGroup> {
        match self.image_vector.nodes.get_mut(index)? {
            VectorNode::Group(group) => Some(group),
            VectorNode::Path(_) => None,
        }
    }
}

fn path_nodes<T: Tokenizer + ?Sized>(attrs: &Attributes<'_, T>) -> Result<Vec<PathNode>, ParseError> {
    match attrs.get(Field::PathData) {
        Some(text) => parse_path_data(text),
        None => Ok(Vec::new()),
    }
}
