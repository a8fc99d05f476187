//! Path data parsing: `M0 24L12 11L24 24Z` into typed [`PathNode`]s.
//!
//! The grammar in `vector.pest` does the scanning (dense numbers, one-digit
//! arc flags, comma/whitespace separators); this module walks the pairs and
//! expands implicit command repetition.

use std::fmt;

use glam::{DVec2, dvec2};
use pest::Parser;
use pest::iterators::{Pair, Pairs};

use crate::errors::ParseError;
use crate::{Rule, VectorParser};

/// One drawing command. `relative` is set for lowercase command letters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathNode {
    Close {
        relative: bool,
    },
    MoveTo {
        relative: bool,
        to: DVec2,
    },
    LineTo {
        relative: bool,
        to: DVec2,
    },
    HorizontalLineTo {
        relative: bool,
        x: f64,
    },
    VerticalLineTo {
        relative: bool,
        y: f64,
    },
    CurveTo {
        relative: bool,
        control1: DVec2,
        control2: DVec2,
        to: DVec2,
    },
    /// First control point is the reflection of the previous curve's second one
    SmoothCurveTo {
        relative: bool,
        control2: DVec2,
        to: DVec2,
    },
    QuadTo {
        relative: bool,
        control: DVec2,
        to: DVec2,
    },
    SmoothQuadTo {
        relative: bool,
        to: DVec2,
    },
    ArcTo {
        relative: bool,
        radii: DVec2,
        /// Degrees
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: DVec2,
    },
}

impl PathNode {
    pub fn is_relative(&self) -> bool {
        match *self {
            PathNode::Close { relative }
            | PathNode::MoveTo { relative, .. }
            | PathNode::LineTo { relative, .. }
            | PathNode::HorizontalLineTo { relative, .. }
            | PathNode::VerticalLineTo { relative, .. }
            | PathNode::CurveTo { relative, .. }
            | PathNode::SmoothCurveTo { relative, .. }
            | PathNode::QuadTo { relative, .. }
            | PathNode::SmoothQuadTo { relative, .. }
            | PathNode::ArcTo { relative, .. } => relative,
        }
    }

    /// The path-data letter for this node, lowercase when relative.
    pub fn command_letter(&self) -> char {
        let letter = match self {
            PathNode::Close { .. } => 'Z',
            PathNode::MoveTo { .. } => 'M',
            PathNode::LineTo { .. } => 'L',
            PathNode::HorizontalLineTo { .. } => 'H',
            PathNode::VerticalLineTo { .. } => 'V',
            PathNode::CurveTo { .. } => 'C',
            PathNode::SmoothCurveTo { .. } => 'S',
            PathNode::QuadTo { .. } => 'Q',
            PathNode::SmoothQuadTo { .. } => 'T',
            PathNode::ArcTo { .. } => 'A',
        };
        if self.is_relative() {
            letter.to_ascii_lowercase()
        } else {
            letter
        }
    }
}

impl fmt::Display for PathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command_letter())?;
        match *self {
            PathNode::Close { .. } => Ok(()),
            PathNode::MoveTo { to, .. }
            | PathNode::LineTo { to, .. }
            | PathNode::SmoothQuadTo { to, .. } => write!(f, "{} {}", to.x, to.y),
            PathNode::HorizontalLineTo { x, .. } => write!(f, "{x}"),
            PathNode::VerticalLineTo { y, .. } => write!(f, "{y}"),
            PathNode::CurveTo {
                control1,
                control2,
                to,
                ..
            } => write!(
                f,
                "{} {} {} {} {} {}",
                control1.x, control1.y, control2.x, control2.y, to.x, to.y
            ),
            PathNode::SmoothCurveTo { control2, to, .. } => {
                write!(f, "{} {} {} {}", control2.x, control2.y, to.x, to.y)
            }
            PathNode::QuadTo { control, to, .. } => {
                write!(f, "{} {} {} {}", control.x, control.y, to.x, to.y)
            }
            PathNode::ArcTo {
                radii,
                x_axis_rotation,
                large_arc,
                sweep,
                to,
                ..
            } => write!(
                f,
                "{} {} {} {} {} {} {}",
                radii.x,
                radii.y,
                x_axis_rotation,
                u8::from(large_arc),
                u8::from(sweep),
                to.x,
                to.y
            ),
        }
    }
}

/// Render nodes back into compact path data.
pub fn to_path_string(nodes: &[PathNode]) -> String {
    nodes.iter().map(ToString::to_string).collect()
}

/// Parse a path data string.
///
/// A command letter may be followed by several operand groups; each extra
/// group repeats the command, except that a move repeats as a line.
/// An unknown letter, or a command without one complete operand group, fails
/// the whole string. A trailing partial group after complete ones is dropped.
pub fn parse_path_data(text: &str) -> Result<Vec<PathNode>, ParseError> {
    let pairs = VectorParser::parse(Rule::path_data, text)
        .map_err(|e| ParseError::from_pest(text, &e))?;

    let mut nodes = Vec::new();
    for pair in pairs {
        if pair.as_rule() != Rule::path_data {
            continue;
        }
        for command in pair.into_inner() {
            if command.as_rule() != Rule::EOI {
                parse_command(text, command, &mut nodes)?;
            }
        }
    }
    Ok(nodes)
}

fn parse_command<'i>(
    text: &'i str,
    pair: Pair<'i, Rule>,
    nodes: &mut Vec<PathNode>,
) -> Result<(), ParseError> {
    let rule = pair.as_rule();
    let mut inner = pair.into_inner();
    let relative = inner
        .next()
        .is_some_and(|letter| letter.as_str().starts_with(|c: char| c.is_ascii_lowercase()));
    let mut operands = Operands { text, pairs: inner };

    match rule {
        Rule::close_path => nodes.push(PathNode::Close { relative }),
        Rule::move_to => {
            let mut first = true;
            while let Some(group) = operands.next_group() {
                let to = coordinate_pair(text, group)?;
                nodes.push(if first {
                    PathNode::MoveTo { relative, to }
                } else {
                    PathNode::LineTo { relative, to }
                });
                first = false;
            }
        }
        Rule::line_to => {
            while let Some(group) = operands.next_group() {
                let to = coordinate_pair(text, group)?;
                nodes.push(PathNode::LineTo { relative, to });
            }
        }
        Rule::horizontal_line_to => {
            while let Some(number) = operands.next_group() {
                let x = parse_number(text, &number)?;
                nodes.push(PathNode::HorizontalLineTo { relative, x });
            }
        }
        Rule::vertical_line_to => {
            while let Some(number) = operands.next_group() {
                let y = parse_number(text, &number)?;
                nodes.push(PathNode::VerticalLineTo { relative, y });
            }
        }
        Rule::curve_to => {
            while let Some(group) = operands.next_group() {
                let mut args = Operands::of(text, group);
                nodes.push(PathNode::CurveTo {
                    relative,
                    control1: args.point()?,
                    control2: args.point()?,
                    to: args.point()?,
                });
            }
        }
        Rule::smooth_curve_to => {
            while let Some(group) = operands.next_group() {
                let mut args = Operands::of(text, group);
                nodes.push(PathNode::SmoothCurveTo {
                    relative,
                    control2: args.point()?,
                    to: args.point()?,
                });
            }
        }
        Rule::quad_to => {
            while let Some(group) = operands.next_group() {
                let mut args = Operands::of(text, group);
                nodes.push(PathNode::QuadTo {
                    relative,
                    control: args.point()?,
                    to: args.point()?,
                });
            }
        }
        Rule::smooth_quad_to => {
            while let Some(group) = operands.next_group() {
                let to = coordinate_pair(text, group)?;
                nodes.push(PathNode::SmoothQuadTo { relative, to });
            }
        }
        Rule::arc_to => {
            while let Some(group) = operands.next_group() {
                let mut args = Operands::of(text, group);
                nodes.push(PathNode::ArcTo {
                    relative,
                    radii: dvec2(args.number()?, args.number()?),
                    x_axis_rotation: args.number()?,
                    large_arc: args.flag()?,
                    sweep: args.flag()?,
                    to: args.point()?,
                });
            }
        }
        _ => {}
    }
    Ok(())
}

/// Sequential access to the operand pairs of one command or group.
///
/// The grammar guarantees arity, so running out of pairs is reported as a
/// malformed string rather than a panic.
struct Operands<'i> {
    text: &'i str,
    pairs: Pairs<'i, Rule>,
}

impl<'i> Operands<'i> {
    fn of(text: &'i str, group: Pair<'i, Rule>) -> Self {
        Operands {
            text,
            pairs: group.into_inner(),
        }
    }

    /// Next complete operand group; a trailing partial group is skipped.
    fn next_group(&mut self) -> Option<Pair<'i, Rule>> {
        self.pairs.find(|pair| pair.as_rule() != Rule::trailing_operands)
    }

    fn next_pair(&mut self) -> Result<Pair<'i, Rule>, ParseError> {
        self.pairs
            .next()
            .ok_or_else(|| ParseError::invalid_operand(self.text, self.text.len(), 0))
    }

    fn number(&mut self) -> Result<f64, ParseError> {
        let pair = self.next_pair()?;
        parse_number(self.text, &pair)
    }

    fn point(&mut self) -> Result<DVec2, ParseError> {
        let pair = self.next_pair()?;
        coordinate_pair(self.text, pair)
    }

    fn flag(&mut self) -> Result<bool, ParseError> {
        let pair = self.next_pair()?;
        Ok(pair.as_str() == "1")
    }
}

/// Read the two numbers of a `coordinate_pair`.
fn coordinate_pair<'i>(text: &'i str, group: Pair<'i, Rule>) -> Result<DVec2, ParseError> {
    let mut coordinates = Operands::of(text, group);
    Ok(dvec2(coordinates.number()?, coordinates.number()?))
}

fn parse_number(text: &str, pair: &Pair<Rule>) -> Result<f64, ParseError> {
    let span = pair.as_span();
    pair.as_str()
        .parse()
        .map_err(|_| ParseError::invalid_operand(text, span.start(), span.end() - span.start()))
}
