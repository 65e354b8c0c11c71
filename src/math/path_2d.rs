//! SVG path data decoding and the reductions built on it.
//!
//! Exported diagrams draw simple shapes as raw paths, so recognising a
//! rectangle or circle starts here: commands are decoded once, then reduced
//! to a vertex list or matched against the circle pattern.

use std::fmt;

use svgtypes::{NumberListParser, PathParser, PathSegment};

use super::{Point2, Vector2, TOLERANCE};
use crate::error::{GeometryError, NestError, Result};

/// Path command kinds, independent of absolute/relative addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    MoveTo,
    LineTo,
    HorizontalTo,
    VerticalTo,
    CurveTo,
    SmoothCurveTo,
    QuadTo,
    SmoothQuadTo,
    ArcTo,
    ClosePath,
}

impl Opcode {
    /// Decodes a command letter into its opcode and relative flag.
    #[must_use]
    pub fn from_letter(c: char) -> Option<(Self, bool)> {
        let op = match c.to_ascii_uppercase() {
            'M' => Self::MoveTo,
            'L' => Self::LineTo,
            'H' => Self::HorizontalTo,
            'V' => Self::VerticalTo,
            'C' => Self::CurveTo,
            'S' => Self::SmoothCurveTo,
            'Q' => Self::QuadTo,
            'T' => Self::SmoothQuadTo,
            'A' => Self::ArcTo,
            'Z' => Self::ClosePath,
            _ => return None,
        };
        Some((op, c.is_ascii_lowercase()))
    }

    /// The absolute (upper-case) command letter.
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Self::MoveTo => 'M',
            Self::LineTo => 'L',
            Self::HorizontalTo => 'H',
            Self::VerticalTo => 'V',
            Self::CurveTo => 'C',
            Self::SmoothCurveTo => 'S',
            Self::QuadTo => 'Q',
            Self::SmoothQuadTo => 'T',
            Self::ArcTo => 'A',
            Self::ClosePath => 'Z',
        }
    }

    /// Whether this command draws curvature.
    #[must_use]
    pub fn is_curve(self) -> bool {
        matches!(
            self,
            Self::CurveTo | Self::SmoothCurveTo | Self::QuadTo | Self::SmoothQuadTo | Self::ArcTo
        )
    }
}

/// One decoded path segment.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCommand {
    pub opcode: Opcode,
    pub relative: bool,
    pub args: Vec<f64>,
}

impl PathCommand {
    /// Creates a command from an opcode and its raw operands.
    #[must_use]
    pub fn new(opcode: Opcode, relative: bool, args: Vec<f64>) -> Self {
        Self {
            opcode,
            relative,
            args,
        }
    }

    /// The command letter as it would appear in path data.
    #[must_use]
    pub fn letter(&self) -> char {
        let c = self.opcode.letter();
        if self.relative {
            c.to_ascii_lowercase()
        } else {
            c
        }
    }

    /// Operands paired up as points.
    ///
    /// Meaningful for commands whose operands are coordinate pairs; a
    /// trailing unpaired value is dropped.
    #[must_use]
    pub fn points(&self) -> Vec<Point2> {
        self.args
            .chunks_exact(2)
            .map(|c| Point2::new(c[0], c[1]))
            .collect()
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())?;
        for (i, a) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{a}")?;
        }
        Ok(())
    }
}

impl From<PathSegment> for PathCommand {
    fn from(segment: PathSegment) -> Self {
        match segment {
            PathSegment::MoveTo { abs, x, y } => Self::new(Opcode::MoveTo, !abs, vec![x, y]),
            PathSegment::LineTo { abs, x, y } => Self::new(Opcode::LineTo, !abs, vec![x, y]),
            PathSegment::HorizontalLineTo { abs, x } => {
                Self::new(Opcode::HorizontalTo, !abs, vec![x])
            }
            PathSegment::VerticalLineTo { abs, y } => Self::new(Opcode::VerticalTo, !abs, vec![y]),
            PathSegment::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => Self::new(Opcode::CurveTo, !abs, vec![x1, y1, x2, y2, x, y]),
            PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                Self::new(Opcode::SmoothCurveTo, !abs, vec![x2, y2, x, y])
            }
            PathSegment::Quadratic { abs, x1, y1, x, y } => {
                Self::new(Opcode::QuadTo, !abs, vec![x1, y1, x, y])
            }
            PathSegment::SmoothQuadratic { abs, x, y } => {
                Self::new(Opcode::SmoothQuadTo, !abs, vec![x, y])
            }
            PathSegment::EllipticalArc {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => Self::new(
                Opcode::ArcTo,
                !abs,
                vec![
                    rx,
                    ry,
                    x_axis_rotation,
                    f64::from(u8::from(large_arc)),
                    f64::from(u8::from(sweep)),
                    x,
                    y,
                ],
            ),
            PathSegment::ClosePath { abs } => Self::new(Opcode::ClosePath, !abs, Vec::new()),
        }
    }
}

/// Decodes SVG path data into commands, one per segment.
///
/// Implicit repetitions are split out, so `M0,0 1,1 2,2` decodes as
/// `M`, `L`, `L`.
///
/// # Errors
///
/// Returns `GeometryError::MalformedPath` naming the first segment that
/// could not be decoded.
pub fn parse_path(d: &str) -> Result<Vec<PathCommand>> {
    PathParser::from(d)
        .enumerate()
        .map(|(segment, parsed)| {
            parsed.map(PathCommand::from).map_err(|err| {
                NestError::from(GeometryError::MalformedPath {
                    segment,
                    reason: err.to_string(),
                })
            })
        })
        .collect()
}

/// The concatenated absolute/relative command letters, e.g. `"MCCCCZ"`.
#[must_use]
pub fn opcode_string(cmds: &[PathCommand]) -> String {
    cmds.iter().map(PathCommand::letter).collect()
}

/// Whether raw path data ends with a close command.
#[must_use]
pub fn is_closed(d: &str) -> bool {
    d.trim_end().ends_with(['Z', 'z'])
}

/// Whether raw path data contains any curve or arc command.
///
/// A degenerate curve that happens to be straight still counts as curved.
#[must_use]
pub fn is_curved(d: &str) -> bool {
    d.chars()
        .filter_map(Opcode::from_letter)
        .any(|(op, _)| op.is_curve())
}

/// Reduces straight-line commands to a vertex list.
///
/// A single pen position is tracked. A move repositions the current vertex
/// (so a leading move sets the first vertex); each line appends one vertex.
/// A closing command drops a
/// final vertex that repeats the first.
///
/// # Errors
///
/// Returns `GeometryError::MalformedGeometry` if any curve or arc command is
/// present; curvature must be classified before reaching this point.
pub fn polygon_from_commands(cmds: &[PathCommand]) -> Result<Vec<Point2>> {
    let mut vertices = vec![Point2::origin()];

    for cmd in cmds {
        if cmd.opcode.is_curve() {
            return Err(GeometryError::MalformedGeometry(format!(
                "curve command `{}` in straight-line path",
                cmd.letter()
            ))
            .into());
        }
        let pen = *vertices.last().unwrap_or(&Point2::origin());
        match cmd.opcode {
            Opcode::MoveTo => {
                let mut pts = cmd.points().into_iter();
                if let Some(first) = pts.next() {
                    let moved = if cmd.relative { pen + first.coords } else { first };
                    if let Some(last) = vertices.last_mut() {
                        *last = moved;
                    }
                }
                for p in pts {
                    push_line(&mut vertices, p, cmd.relative);
                }
            }
            Opcode::LineTo | Opcode::SmoothQuadTo => {
                for p in cmd.points() {
                    push_line(&mut vertices, p, cmd.relative);
                }
            }
            Opcode::HorizontalTo | Opcode::VerticalTo => {
                for &v in &cmd.args {
                    let cur = *vertices.last().unwrap_or(&Point2::origin());
                    let next = match (cmd.opcode, cmd.relative) {
                        (Opcode::HorizontalTo, false) => Point2::new(v, cur.y),
                        (Opcode::HorizontalTo, true) => Point2::new(cur.x + v, cur.y),
                        (_, false) => Point2::new(cur.x, v),
                        (_, true) => Point2::new(cur.x, cur.y + v),
                    };
                    vertices.push(next);
                }
            }
            Opcode::ClosePath => {
                if vertices.len() > 1 {
                    let first = vertices[0];
                    if let Some(&last) = vertices.last() {
                        if (last - first).norm() < TOLERANCE {
                            vertices.pop();
                        }
                    }
                }
            }
            _ => {}
        }
    }
    Ok(vertices)
}

fn push_line(vertices: &mut Vec<Point2>, p: Point2, relative: bool) {
    let cur = *vertices.last().unwrap_or(&Point2::origin());
    vertices.push(if relative { cur + p.coords } else { p });
}

/// Every end point and control point, resolved to absolute coordinates.
///
/// The hull of these bounds any path; arcs contribute only their end point,
/// so a bulging arc may stick out.
#[must_use]
pub fn control_points(cmds: &[PathCommand]) -> Vec<Point2> {
    let mut out = Vec::new();
    let mut pen = Point2::origin();
    let mut start = pen;
    for cmd in cmds {
        let base = if cmd.relative { pen.coords } else { Vector2::zeros() };
        let resolve = |p: Point2| p + base;
        match cmd.opcode {
            Opcode::ClosePath => {
                pen = start;
                continue;
            }
            Opcode::HorizontalTo | Opcode::VerticalTo => {
                let Some(&v) = cmd.args.first() else { continue };
                pen = match (cmd.opcode, cmd.relative) {
                    (Opcode::HorizontalTo, false) => Point2::new(v, pen.y),
                    (Opcode::HorizontalTo, true) => Point2::new(pen.x + v, pen.y),
                    (_, false) => Point2::new(pen.x, v),
                    (_, true) => Point2::new(pen.x, pen.y + v),
                };
                out.push(pen);
                continue;
            }
            Opcode::ArcTo => {
                if let [.., x, y] = cmd.args.as_slice() {
                    let end = resolve(Point2::new(*x, *y));
                    out.push(end);
                    pen = end;
                }
                continue;
            }
            _ => {}
        }
        let pts: Vec<Point2> = cmd.points().into_iter().map(resolve).collect();
        out.extend(&pts);
        if let Some(&end) = pts.last() {
            pen = end;
            if cmd.opcode == Opcode::MoveTo {
                start = end;
            }
        }
    }
    out
}

/// Decodes a `points` attribute (`"x,y x,y ..."`).
///
/// # Errors
///
/// Returns `GeometryError::MalformedGeometry` for unparsable numbers or an
/// odd number of coordinates.
pub fn parse_points(points: &str) -> Result<Vec<Point2>> {
    let nums = NumberListParser::from(points)
        .collect::<std::result::Result<Vec<f64>, svgtypes::Error>>()
        .map_err(|e| GeometryError::MalformedGeometry(format!("bad points list: {e}")))?;
    if nums.len() % 2 != 0 {
        return Err(GeometryError::MalformedGeometry(format!(
            "odd coordinate count {} in points",
            nums.len()
        ))
        .into());
    }
    Ok(nums.chunks_exact(2).map(|c| Point2::new(c[0], c[1])).collect())
}

/// Encodes vertices as a `points` attribute.
#[must_use]
pub fn format_points(vertices: &[Point2]) -> String {
    vertices
        .iter()
        .map(|v| format!("{},{}", v.x, v.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Circle parameters recovered from a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleParams {
    pub center: Point2,
    pub radius: f64,
}

/// Recognises the four-Bézier circle an exporter emits.
///
/// The opcodes must be exactly `MCCCCZ`. The move point sits on the
/// horizontal diameter (giving `cy`) and the first curve ends at the top of
/// the circle (giving `cx` and the top `y`), so `r = cy - top_y`. Returns
/// `None` when the pattern does not match or the radius is not positive.
#[must_use]
pub fn extract_circle(cmds: &[PathCommand]) -> Option<CircleParams> {
    if opcode_string(cmds) != "MCCCCZ" {
        return None;
    }
    let start = cmds[0].points().first().copied()?;
    let first_curve = cmds[1].points();
    if first_curve.len() != 3 {
        return None;
    }
    let top = first_curve[2];
    let radius = start.y - top.y;
    if !radius.is_finite() || radius <= 0.0 {
        return None;
    }
    Some(CircleParams {
        center: Point2::new(top.x, start.y),
        radius,
    })
}
