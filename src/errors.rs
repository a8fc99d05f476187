//! Error types with rich diagnostics using miette
//!
//! Only [`ParseError`] terminates a parse. Everything else degrades to a
//! documented default and is reported back as a [`ParseWarning`].

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::Rule;

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors that abort the parse of a whole document
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("malformed document: {reason}")]
    #[diagnostic(code(icon_ir::document::malformed))]
    MalformedDocument { reason: String },

    #[error("malformed path data")]
    #[diagnostic(
        code(icon_ir::path_data::malformed),
        help("path data is a sequence of M/L/H/V/C/S/Q/T/A/Z commands, each followed by complete operand groups")
    )]
    MalformedPathData {
        #[source_code]
        src: NamedSource<String>,
        #[label("{expected}")]
        span: SourceSpan,
        expected: String,
    },

    #[error("unsupported icon type: {}", path.display())]
    #[diagnostic(
        code(icon_ir::input::unsupported_type),
        help("only .svg and .xml files can be parsed")
    )]
    UnsupportedIconType { path: PathBuf },

    #[error("failed to read {}", path.display())]
    #[diagnostic(code(icon_ir::input::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    pub(crate) fn malformed_document(reason: impl Into<String>) -> Self {
        ParseError::MalformedDocument {
            reason: reason.into(),
        }
    }

    /// Build a path data error from a pest failure, pointing at the offending byte.
    pub(crate) fn from_pest(text: &str, err: &pest::error::Error<Rule>) -> Self {
        let span = match err.location {
            pest::error::InputLocation::Pos(pos) => SourceSpan::new(pos.into(), 0),
            pest::error::InputLocation::Span((start, end)) => {
                SourceSpan::new(start.into(), end - start)
            }
        };
        ParseError::MalformedPathData {
            src: NamedSource::new("path data", text.to_string()),
            span,
            expected: err.variant.message().into_owned(),
        }
    }

    /// Build a path data error for an operand the grammar accepted but `f64` rejected.
    pub(crate) fn invalid_operand(text: &str, offset: usize, len: usize) -> Self {
        ParseError::MalformedPathData {
            src: NamedSource::new("path data", text.to_string()),
            span: SourceSpan::new(offset.into(), len),
            expected: "invalid number".to_string(),
        }
    }
}

// ============================================================================
// Transform Errors
// ============================================================================

/// Errors from the transform list of a single group.
///
/// These are never fatal: the group keeps an identity transform.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("unsupported transform: {name}")]
    #[diagnostic(
        code(icon_ir::transform::unsupported),
        help("only translate, rotate and scale are supported")
    )]
    UnsupportedTransform { name: String },

    #[error("{name}() does not accept {count} argument(s)")]
    #[diagnostic(code(icon_ir::transform::invalid_arguments))]
    InvalidArguments { name: String, count: usize },

    #[error("invalid transform syntax: {message}")]
    #[diagnostic(code(icon_ir::transform::syntax))]
    Syntax { message: String },
}

// ============================================================================
// Color Errors
// ============================================================================

/// A color attribute that is not a 3, 6 or 8 digit hex literal
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid color literal `{literal}`")]
    #[diagnostic(
        code(icon_ir::color::invalid_literal),
        help("expected #RGB, #RRGGBB or #AARRGGBB")
    )]
    InvalidColorLiteral { literal: String },
}

// ============================================================================
// Warnings
// ============================================================================

/// A recoverable problem met while walking a document.
///
/// Each warning names the default that was used instead.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ParseWarning {
    #[error("transform of group `{group}` ignored, identity used instead")]
    #[diagnostic(code(icon_ir::warning::ignored_transform))]
    IgnoredTransform {
        group: String,
        #[source]
        source: TransformError,
    },

    #[error("unresolved clip-path reference `{id}`, empty clip used instead")]
    #[diagnostic(code(icon_ir::warning::unresolved_clip_path))]
    UnresolvedClipPathReference { id: String },

    #[error("opaque black used in place of an unparseable color")]
    #[diagnostic(code(icon_ir::warning::invalid_color))]
    InvalidColorLiteral(#[source] ColorError),
}
