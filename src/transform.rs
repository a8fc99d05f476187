//! Affine transform algebra and the transform-list parser.
//!
//! A transform list such as `translate(12 12) rotate(45) translate(-12 -12)`
//! is parsed into [`TransformOp`]s, folded into one [`AffineTransform`] and
//! decomposed into the rotate/scale/translate/pivot record groups carry.

use std::ops::Mul;

use glam::{DVec2, dvec2};
use pest::Parser;
use pest::iterators::Pair;

use crate::errors::TransformError;
use crate::{Rule, VectorParser};

/// The matrix `[[a, b, c], [d, e, f], [0, 0, 1]]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0);

    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn translation(offset: DVec2) -> Self {
        Self::new(1.0, 0.0, offset.x, 0.0, 1.0, offset.y)
    }

    pub fn scaling(factors: DVec2) -> Self {
        Self::new(factors.x, 0.0, 0.0, 0.0, factors.y, 0.0)
    }

    /// Counter-clockwise rotation about the origin, in degrees.
    pub fn rotation(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(cos, -sin, 0.0, sin, cos, 0.0)
    }

    pub fn pre_translate(self, offset: DVec2) -> Self {
        Self::translation(offset) * self
    }

    /// Rotate about `pivot`: translate(-pivot), rotate, translate(pivot), each pre-applied.
    pub fn pre_rotate(self, degrees: f64, pivot: DVec2) -> Self {
        let centered = self.pre_translate(-pivot);
        (Self::rotation(degrees) * centered).pre_translate(pivot)
    }

    pub fn pre_scale(self, factors: DVec2) -> Self {
        Self::scaling(factors) * self
    }

    pub fn map_point(&self, point: DVec2) -> DVec2 {
        dvec2(
            self.a * point.x + self.b * point.y + self.c,
            self.d * point.x + self.e * point.y + self.f,
        )
    }

    /// Translation is `(c, f)`, scale the lengths of the two columns and
    /// rotation the angle of the first column. The pivot is always the origin.
    pub fn decompose(&self) -> DecomposedTransform {
        DecomposedTransform {
            translation: dvec2(self.c, self.f),
            scale: dvec2(dvec2(self.a, self.d).length(), dvec2(self.b, self.e).length()),
            rotation: self.d.atan2(self.a).to_degrees(),
            pivot: DVec2::ZERO,
        }
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for AffineTransform {
    type Output = AffineTransform;

    fn mul(self, rhs: AffineTransform) -> AffineTransform {
        AffineTransform::new(
            self.a * rhs.a + self.b * rhs.d,
            self.a * rhs.b + self.b * rhs.e,
            self.a * rhs.c + self.b * rhs.f + self.c,
            self.d * rhs.a + self.e * rhs.d,
            self.d * rhs.b + self.e * rhs.e,
            self.d * rhs.c + self.e * rhs.f + self.f,
        )
    }
}

/// Human-meaningful transform parameters, as carried by a group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecomposedTransform {
    pub translation: DVec2,
    pub scale: DVec2,
    /// Degrees
    pub rotation: f64,
    pub pivot: DVec2,
}

impl Default for DecomposedTransform {
    fn default() -> Self {
        Self {
            translation: DVec2::ZERO,
            scale: DVec2::ONE,
            rotation: 0.0,
            pivot: DVec2::ZERO,
        }
    }
}

/// One function of a transform list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    Translate(DVec2),
    Rotate { degrees: f64, pivot: DVec2 },
    Scale(DVec2),
}

impl TransformOp {
    fn pre_apply(self, matrix: AffineTransform) -> AffineTransform {
        match self {
            TransformOp::Translate(offset) => matrix.pre_translate(offset),
            TransformOp::Rotate { degrees, pivot } => matrix.pre_rotate(degrees, pivot),
            TransformOp::Scale(factors) => matrix.pre_scale(factors),
        }
    }
}

/// Parse a transform attribute into its operations, in source order.
pub fn parse_transform_list(text: &str) -> Result<Vec<TransformOp>, TransformError> {
    let pairs = VectorParser::parse(Rule::transform_list, text).map_err(|e| {
        TransformError::Syntax {
            message: e.variant.message().into_owned(),
        }
    })?;

    let mut ops = Vec::new();
    for pair in pairs.flatten() {
        if pair.as_rule() == Rule::transform_function {
            ops.push(parse_transform_function(pair)?);
        }
    }
    Ok(ops)
}

fn parse_transform_function(pair: Pair<Rule>) -> Result<TransformOp, TransformError> {
    let mut name = "";
    let mut args = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::function_name => name = inner.as_str(),
            Rule::number => args.push(inner.as_str().parse::<f64>().map_err(|_| {
                TransformError::Syntax {
                    message: format!("invalid number `{}`", inner.as_str()),
                }
            })?),
            _ => {}
        }
    }

    let invalid = || TransformError::InvalidArguments {
        name: name.to_string(),
        count: args.len(),
    };

    match name {
        "translate" => match args[..] {
            [tx] => Ok(TransformOp::Translate(dvec2(tx, 0.0))),
            [tx, ty] => Ok(TransformOp::Translate(dvec2(tx, ty))),
            _ => Err(invalid()),
        },
        "rotate" => match args[..] {
            [degrees] => Ok(TransformOp::Rotate {
                degrees,
                pivot: DVec2::ZERO,
            }),
            [degrees, cx, cy] => Ok(TransformOp::Rotate {
                degrees,
                pivot: dvec2(cx, cy),
            }),
            _ => Err(invalid()),
        },
        "scale" => match args[..] {
            [s] => Ok(TransformOp::Scale(dvec2(s, s))),
            [sx, sy] => Ok(TransformOp::Scale(dvec2(sx, sy))),
            _ => Err(invalid()),
        },
        other => Err(TransformError::UnsupportedTransform {
            name: other.to_string(),
        }),
    }
}

/// Fold a transform list into one decomposed transform.
///
/// A `translate(p) X translate(-p)` triple marks `p` as the pivot. When `X` is
/// a rotate or scale its own parameters are returned directly with that
/// pivot, since decomposing the composed matrix cannot tell pivot and
/// translation apart. The first matching triple wins.
pub fn fold_transforms(ops: &[TransformOp]) -> DecomposedTransform {
    let mut pivot = None;

    for window in ops.windows(3) {
        let [TransformOp::Translate(before), middle, TransformOp::Translate(after)] = window else {
            continue;
        };
        if *before != -*after {
            continue;
        }
        match *middle {
            TransformOp::Rotate { degrees, .. } => {
                return DecomposedTransform {
                    rotation: degrees,
                    pivot: *before,
                    ..DecomposedTransform::default()
                };
            }
            TransformOp::Scale(factors) => {
                return DecomposedTransform {
                    scale: factors,
                    pivot: *before,
                    ..DecomposedTransform::default()
                };
            }
            TransformOp::Translate(_) => {
                pivot.get_or_insert(*before);
            }
        }
    }

    let matrix = ops
        .iter()
        .fold(AffineTransform::IDENTITY, |matrix, op| op.pre_apply(matrix));

    let mut decomposed = matrix.decompose();
    if let Some(pivot) = pivot {
        decomposed.pivot = pivot;
    }
    decomposed
}

/// Parse and fold in one step.
pub fn parse_transform(text: &str) -> Result<DecomposedTransform, TransformError> {
    parse_transform_list(text).map(|ops| fold_transforms(&ops))
}
