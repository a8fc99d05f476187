//! Parse SVG and Android vector-drawable icons into one vector IR.
//!
//! ```
//! let svg = r##"<svg width="24" height="24" viewBox="0 0 24 24">
//!     <path fill="#FF0000" d="M0 0L10 0L10 10Z"/>
//! </svg>"##;
//!
//! let output = icon_ir::parse_icon(svg, "Triangle", &Default::default()).unwrap();
//! assert_eq!(output.icon_type, icon_ir::IconType::Svg);
//! assert_eq!(output.image_vector.nodes.len(), 1);
//! ```

use std::path::Path;

use pest_derive::Parser;

pub mod color;
pub mod defaults;
pub mod dialect;
pub mod errors;
pub mod ir;
mod log;
pub mod options;
pub mod path_data;
pub mod tokenizer;
pub mod transform;
pub mod values;
pub mod walker;

pub use color::Color;
pub use dialect::{Dialect, SvgDialect, VectorDrawableDialect};
pub use errors::{ColorError, ParseError, ParseWarning, TransformError};
pub use ir::{
    ColorStop, Fill, FillRule, ImageVector, LineCap, LineJoin, LinearGradient, RadialGradient,
    Stroke, VectorGroup, VectorNode, VectorPath,
};
pub use options::{GroupNesting, ParseOptions};
pub use path_data::{PathNode, parse_path_data};
pub use tokenizer::{Tokenizer, XmlTokenizer};
pub use transform::{
    AffineTransform, DecomposedTransform, TransformOp, fold_transforms, parse_transform_list,
};
pub use walker::{DocumentWalker, ParsedDocument, parse_document};

#[derive(Parser)]
#[grammar = "vector.pest"]
pub struct VectorParser;

/// Source dialect of an icon file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconType {
    Svg,
    Xml,
}

impl IconType {
    /// Classify by extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("svg") {
            Some(IconType::Svg)
        } else if extension.eq_ignore_ascii_case("xml") {
            Some(IconType::Xml)
        } else {
            None
        }
    }

    pub fn dialect(self) -> Dialect {
        match self {
            IconType::Svg => SvgDialect.into(),
            IconType::Xml => VectorDrawableDialect.into(),
        }
    }

    fn from_dialect(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Svg(_) => IconType::Svg,
            Dialect::VectorDrawable(_) => IconType::Xml,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IconParserOutput {
    pub icon_type: IconType,
    pub image_vector: ImageVector,
    pub icon_name: String,
    /// Every default substituted for invalid markup, in document order
    pub warnings: Vec<ParseWarning>,
}

/// Parse an icon document, picking the dialect from its root tag.
pub fn parse_icon(
    text: &str,
    icon_name: impl Into<String>,
    options: &ParseOptions,
) -> Result<IconParserOutput, ParseError> {
    let walker = DocumentWalker::new(options.clone());
    let parsed = walker.parse_document(&mut XmlTokenizer::new(text))?;
    Ok(output(parsed, icon_name.into()))
}

/// Parse an `.svg` or `.xml` file; the file stem becomes the icon name.
///
/// The root tag must agree with the extension.
pub fn parse_file(path: impl AsRef<Path>, options: &ParseOptions) -> Result<IconParserOutput, ParseError> {
    let path = path.as_ref();
    let icon_type = IconType::from_path(path).ok_or_else(|| ParseError::UnsupportedIconType {
        path: path.to_path_buf(),
    })?;
    let text = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let icon_name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let walker = DocumentWalker::new(options.clone()).expecting(icon_type.dialect());
    let parsed = walker.parse_document(&mut XmlTokenizer::new(&text))?;
    Ok(output(parsed, icon_name))
}

/// Parse a document that must have an `<svg>` root.
pub fn parse_svg(text: &str) -> Result<ImageVector, ParseError> {
    parse_as(text, SvgDialect)
}

/// Parse a document that must have a `<vector>` root.
pub fn parse_vector_drawable(text: &str) -> Result<ImageVector, ParseError> {
    parse_as(text, VectorDrawableDialect)
}

fn parse_as(text: &str, dialect: impl Into<Dialect>) -> Result<ImageVector, ParseError> {
    DocumentWalker::default()
        .expecting(dialect)
        .parse_document(&mut XmlTokenizer::new(text))
        .map(|parsed| parsed.image_vector)
}

fn output(parsed: ParsedDocument, icon_name: String) -> IconParserOutput {
    IconParserOutput {
        icon_type: IconType::from_dialect(parsed.dialect),
        image_vector: parsed.image_vector,
        icon_name,
        warnings: parsed.warnings,
    }
}
