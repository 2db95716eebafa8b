//! Typed path geometry in canvas pixel space
//!
//! Overlay builders emit ordered segments instead of raw strings. `Display`
//! renders SVG path syntax; `FromStr` reads absolute M/L/Q/Z strings back.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

lazy_static! {
    /// One command letter or one number
    static ref RE_PATH_TOKEN: Regex = Regex::new(
        r"[A-Za-z]|[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?"
    ).unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Mirror across the vertical line `x = axis`
    pub fn mirrored(&self, axis: f64) -> Self {
        Self::new(2.0 * axis - self.x, self.y)
    }

    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { control: Point, to: Point },
    Close,
}

impl PathSegment {
    /// Every point the segment references, controls included
    pub fn points(&self) -> Vec<Point> {
        match self {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => vec![*p],
            PathSegment::QuadTo { control, to } => vec![*control, *to],
            PathSegment::Close => Vec::new(),
        }
    }
}

/// Ordered segments; several independent sub-paths may share one path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathData {
    segments: Vec<PathSegment>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.segments.push(PathSegment::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.segments.push(PathSegment::LineTo(Point::new(x, y)));
        self
    }

    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) -> &mut Self {
        self.segments.push(PathSegment::QuadTo {
            control: Point::new(cx, cy),
            to: Point::new(x, y),
        });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.segments.push(PathSegment::Close);
        self
    }

    /// Append another path's segments after this one
    pub fn append(&mut self, other: PathData) -> &mut Self {
        self.segments.extend(other.segments);
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Number of sub-paths (one per MoveTo)
    pub fn subpath_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, PathSegment::MoveTo(_)))
            .count()
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.segments.last(), Some(PathSegment::Close))
    }

    pub fn points(&self) -> Vec<Point> {
        self.segments.iter().flat_map(|s| s.points()).collect()
    }

    /// True if every referenced point has a mirror image across `axis`
    pub fn is_mirror_symmetric(&self, axis: f64, tolerance: f64) -> bool {
        let points = self.points();
        points.iter().all(|p| {
            let m = p.mirrored(axis);
            points.iter().any(|q| q.approx_eq(&m, tolerance))
        })
    }
}

impl From<Vec<PathSegment>> for PathData {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

/// Compact number form: at most 3 decimals, no trailing zeros
fn fmt_num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::MoveTo(p) => write!(f, "M {} {}", fmt_num(p.x), fmt_num(p.y)),
            PathSegment::LineTo(p) => write!(f, "L {} {}", fmt_num(p.x), fmt_num(p.y)),
            PathSegment::QuadTo { control, to } => write!(
                f,
                "Q {} {} {} {}",
                fmt_num(control.x),
                fmt_num(control.y),
                fmt_num(to.x),
                fmt_num(to.y)
            ),
            PathSegment::Close => write!(f, "Z"),
        }
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.segments.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", parts.join(" "))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathParseError {
    #[error("unsupported path command '{0}' (absolute M, L, Q, Z only)")]
    UnsupportedCommand(char),
    #[error("number {0} appears before any command")]
    MissingCommand(String),
    #[error("unexpected text '{0}' in path")]
    UnexpectedText(String),
    #[error("'{command}' segment is missing coordinates")]
    IncompleteSegment { command: char },
}

impl FromStr for PathData {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut path = PathData::new();
        let mut command: Option<char> = None;
        let mut args: Vec<f64> = Vec::with_capacity(4);
        let mut last_end = 0;

        for m in RE_PATH_TOKEN.find_iter(s) {
            let gap = &s[last_end..m.start()];
            if gap.chars().any(|c| !c.is_whitespace() && c != ',') {
                return Err(PathParseError::UnexpectedText(gap.trim().to_string()));
            }
            last_end = m.end();

            let token = m.as_str();
            let first = token.chars().next().unwrap_or(' ');
            if first.is_ascii_alphabetic() {
                if let Some(c) = command {
                    if !args.is_empty() {
                        return Err(PathParseError::IncompleteSegment { command: c });
                    }
                }
                match first {
                    'M' | 'L' | 'Q' => command = Some(first),
                    'Z' => {
                        path.close();
                        command = None;
                    }
                    other => return Err(PathParseError::UnsupportedCommand(other)),
                }
                continue;
            }

            let c = command.ok_or_else(|| PathParseError::MissingCommand(token.to_string()))?;
            let value: f64 = token
                .parse()
                .map_err(|_| PathParseError::UnexpectedText(token.to_string()))?;
            args.push(value);

            match (c, args.len()) {
                ('M', 2) => {
                    path.move_to(args[0], args[1]);
                    // extra pairs after a moveto are implicit linetos
                    command = Some('L');
                    args.clear();
                }
                ('L', 2) => {
                    path.line_to(args[0], args[1]);
                    args.clear();
                }
                ('Q', 4) => {
                    path.quad_to(args[0], args[1], args[2], args[3]);
                    args.clear();
                }
                _ => {}
            }
        }

        if s[last_end..].chars().any(|c| !c.is_whitespace() && c != ',') {
            return Err(PathParseError::UnexpectedText(s[last_end..].trim().to_string()));
        }
        if let Some(c) = command {
            if !args.is_empty() {
                return Err(PathParseError::IncompleteSegment { command: c });
            }
        }

        Ok(path)
    }
}
