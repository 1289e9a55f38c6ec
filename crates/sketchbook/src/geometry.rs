//! Point-in-shape queries.
//!
//! Shapes are parsed from SVG path data once, flattened into polygons, and
//! then queried as often as needed. Each polygon keeps its bounding box so
//! most misses cost four comparisons.

use kinema::Vec2;

use crate::error::{Error, Result};

/// Segments used per curve when flattening, unless told otherwise.
pub const DEFAULT_CURVE_SEGMENTS: usize = 16;

/// Rule deciding which regions of overlapping outlines are inside.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FillRule {
    /// Inside when the outline winds around the point a non-zero number of
    /// times. This is the canvas default.
    #[default]
    NonZero,
    /// Inside when a ray from the point crosses the outline an odd number
    /// of times.
    EvenOdd,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner.
    pub min: Vec2,
    /// Bottom-right corner.
    pub max: Vec2,
}

impl Rect {
    /// Whether `point` lies inside or on the edge.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// A closed polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Vec2>,
    bounds: Option<Rect>,
}

impl Polygon {
    /// Builds a polygon; the last point connects back to the first.
    pub fn new(points: Vec<Vec2>) -> Self {
        let bounds = points.split_first().map(|(first, rest)| {
            rest.iter().fold(Rect { min: *first, max: *first }, |rect, p| Rect {
                min: Vec2::new(rect.min.x.min(p.x), rect.min.y.min(p.y)),
                max: Vec2::new(rect.max.x.max(p.x), rect.max.y.max(p.y)),
            })
        });
        Self { points, bounds }
    }

    /// Vertices in order.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Bounding box, if the polygon has any points.
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Winding number of the outline around `point`.
    ///
    /// Positive for clockwise outlines in canvas coordinates (y down).
    pub fn winding(&self, point: Vec2) -> i32 {
        if self.points.len() < 3 {
            return 0;
        }
        match self.bounds {
            Some(bounds) if bounds.contains(point) => {}
            _ => return 0,
        }

        let mut winding = 0;
        let n = self.points.len();
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            let side = (b.x - a.x) * (point.y - a.y) - (point.x - a.x) * (b.y - a.y);
            if a.y <= point.y {
                if b.y > point.y && side > 0.0 {
                    winding += 1;
                }
            } else if b.y <= point.y && side < 0.0 {
                winding -= 1;
            }
        }
        winding
    }

    /// Whether `point` is inside. A single outline gives the same answer
    /// under either fill rule unless it crosses itself.
    pub fn contains(&self, point: Vec2) -> bool {
        self.winding(point) != 0
    }
}

/// One or more polygons queried together, e.g. an outline with holes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    polygons: Vec<Polygon>,
    fill_rule: FillRule,
}

impl Shape {
    /// A shape from already built polygons.
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self {
            polygons,
            fill_rule: FillRule::default(),
        }
    }

    /// Parses SVG path data, flattening curves with `curve_segments` lines each.
    ///
    /// Supports `M L H V C Q Z` in absolute and relative form; any other
    /// command is rejected.
    ///
    /// ```rust
    /// use kinema::Vec2;
    /// use sketchbook::Shape;
    ///
    /// // a 10×10 square with a 4×4 hole
    /// let shape = Shape::from_svg_path("M0 0H10V10H0Z M3 3v4h4v-4z", 8)?;
    /// assert!(shape.contains(Vec2::new(1.0, 1.0)));
    /// assert!(!shape.contains(Vec2::new(5.0, 5.0)));
    /// # Ok::<(), sketchbook::Error>(())
    /// ```
    pub fn from_svg_path(data: &str, curve_segments: usize) -> Result<Self> {
        Ok(Self::new(PathParser::new(data, curve_segments.max(1)).parse()?))
    }

    /// Selects the fill rule.
    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }

    /// The polygons making up the shape.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Whether `point` is inside according to the fill rule.
    pub fn contains(&self, point: Vec2) -> bool {
        let winding: i32 = self.polygons.iter().map(|polygon| polygon.winding(point)).sum();
        match self.fill_rule {
            FillRule::NonZero => winding != 0,
            FillRule::EvenOdd => winding % 2 != 0,
        }
    }
}

/// Uniform scale plus offset between canvas space and a shape's own space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2 {
    /// Canvas units per shape unit.
    pub scale: f64,
    /// Canvas position of the shape's origin.
    pub offset: Vec2,
}

impl Transform2 {
    /// Creates a transform.
    pub fn new(scale: f64, offset: Vec2) -> Self {
        Self { scale, offset }
    }

    /// Centres a square shape of side `shape_size` on a canvas, drawn at
    /// `drawn_size` canvas units.
    pub fn centered(shape_size: f64, drawn_size: f64, canvas: Vec2) -> Self {
        Self {
            scale: drawn_size / shape_size,
            offset: Vec2::new(canvas.x / 2.0 - drawn_size / 2.0, canvas.y / 2.0 - drawn_size / 2.0),
        }
    }

    /// Maps a canvas point into shape space.
    pub fn to_local(&self, point: Vec2) -> Vec2 {
        (point - self.offset) * (1.0 / self.scale)
    }

    /// Maps a shape-space point onto the canvas.
    pub fn to_canvas(&self, point: Vec2) -> Vec2 {
        point * self.scale + self.offset
    }
}

struct PathParser<'a> {
    src: &'a [u8],
    pos: usize,
    curve_segments: usize,
    polygons: Vec<Polygon>,
    current: Vec<Vec2>,
    cursor: Vec2,
    start: Vec2,
}

impl<'a> PathParser<'a> {
    fn new(data: &'a str, curve_segments: usize) -> Self {
        Self {
            src: data.as_bytes(),
            pos: 0,
            curve_segments,
            polygons: Vec::new(),
            current: Vec::new(),
            cursor: Vec2::ZERO,
            start: Vec2::ZERO,
        }
    }

    fn parse(mut self) -> Result<Vec<Polygon>> {
        let mut command: Option<u8> = None;
        loop {
            self.skip_separators();
            let Some(&byte) = self.src.get(self.pos) else {
                break;
            };
            if byte.is_ascii_alphabetic() {
                self.pos += 1;
                command = Some(byte);
                if byte.eq_ignore_ascii_case(&b'z') {
                    self.close();
                    continue;
                }
            }
            let Some(cmd) = command else {
                return Err(self.error("path must start with a command"));
            };
            self.command(cmd)?;
            // Coordinates after a moveto are implicit linetos
            command = match cmd {
                b'M' => Some(b'L'),
                b'm' => Some(b'l'),
                b'z' | b'Z' => None,
                other => Some(other),
            };
        }
        self.flush();
        Ok(self.polygons)
    }

    fn command(&mut self, cmd: u8) -> Result<()> {
        let relative = cmd.is_ascii_lowercase();
        let origin = if relative { self.cursor } else { Vec2::ZERO };
        match cmd.to_ascii_uppercase() {
            b'M' => {
                self.flush();
                let p = origin + self.point()?;
                self.cursor = p;
                self.start = p;
                self.current.push(p);
            }
            b'L' => {
                let p = origin + self.point()?;
                self.line_to(p);
            }
            b'H' => {
                let x = self.number()? + if relative { self.cursor.x } else { 0.0 };
                self.line_to(Vec2::new(x, self.cursor.y));
            }
            b'V' => {
                let y = self.number()? + if relative { self.cursor.y } else { 0.0 };
                self.line_to(Vec2::new(self.cursor.x, y));
            }
            b'C' => {
                let c1 = origin + self.point()?;
                let c2 = origin + self.point()?;
                let end = origin + self.point()?;
                let p0 = self.cursor;
                self.flatten(|t| cubic(p0, c1, c2, end, t));
            }
            b'Q' => {
                let c = origin + self.point()?;
                let end = origin + self.point()?;
                let p0 = self.cursor;
                self.flatten(|t| quadratic(p0, c, end, t));
            }
            _ => {
                return Err(self.error(format!("unsupported command {:?}", cmd as char)));
            }
        }
        Ok(())
    }

    fn line_to(&mut self, p: Vec2) {
        if self.current.is_empty() {
            self.current.push(self.cursor);
        }
        self.current.push(p);
        self.cursor = p;
    }

    fn flatten(&mut self, curve: impl Fn(f64) -> Vec2) {
        for i in 1..=self.curve_segments {
            let t = i as f64 / self.curve_segments as f64;
            self.line_to(curve(t));
        }
    }

    fn close(&mut self) {
        self.flush();
        self.cursor = self.start;
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.polygons.push(Polygon::new(std::mem::take(&mut self.current)));
        }
    }

    fn point(&mut self) -> Result<Vec2> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(Vec2::new(x, y))
    }

    fn number(&mut self) -> Result<f64> {
        self.skip_separators();
        let start = self.pos;
        let bytes = self.src;

        if matches!(bytes.get(self.pos), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        let mut seen_digit = false;
        let mut seen_dot = false;
        while let Some(&b) = bytes.get(self.pos) {
            match b {
                b'0'..=b'9' => seen_digit = true,
                b'.' if !seen_dot => seen_dot = true,
                _ => break,
            }
            self.pos += 1;
        }
        if !seen_digit {
            self.pos = start;
            return Err(self.error("expected a number"));
        }
        if matches!(bytes.get(self.pos), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(bytes.get(self.pos), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if matches!(bytes.get(self.pos), Some(b'0'..=b'9')) {
                while matches!(bytes.get(self.pos), Some(b'0'..=b'9')) {
                    self.pos += 1;
                }
            } else {
                self.pos = mark;
            }
        }

        // The slice only holds ASCII digits, signs, dots and exponents
        std::str::from_utf8(&bytes[start..self.pos])
            .ok()
            .and_then(|text| text.parse().ok())
            .ok_or_else(|| Error::PathParse {
                position: start,
                reason: "malformed number".to_string(),
            })
    }

    fn skip_separators(&mut self) {
        while matches!(self.src.get(self.pos), Some(b) if b.is_ascii_whitespace() || *b == b',') {
            self.pos += 1;
        }
    }

    fn error(&self, reason: impl Into<String>) -> Error {
        Error::PathParse {
            position: self.pos,
            reason: reason.into(),
        }
    }
}

fn cubic(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f64) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

fn quadratic(p0: Vec2, p1: Vec2, p2: Vec2, t: f64) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ])
    }

    #[test]
    fn polygon_contains() {
        let square = square();
        assert!(square.contains(Vec2::new(5.0, 5.0)));
        assert!(!square.contains(Vec2::new(15.0, 5.0)));
        assert!(!square.contains(Vec2::new(5.0, -0.1)));
        assert_eq!(square.bounds().unwrap().max, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn degenerate_polygons_contain_nothing() {
        assert!(!Polygon::new(vec![]).contains(Vec2::ZERO));
        assert!(!Polygon::new(vec![Vec2::ZERO, Vec2::new(1.0, 1.0)]).contains(Vec2::new(0.5, 0.5)));
    }

    #[test]
    fn concave_polygon() {
        // A "U" shape opening upward
        let u = Polygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(3.0, 6.0),
            Vec2::new(7.0, 6.0),
            Vec2::new(7.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ]);
        assert!(u.contains(Vec2::new(1.0, 1.0)));
        assert!(!u.contains(Vec2::new(5.0, 3.0)));
        assert!(u.contains(Vec2::new(5.0, 8.0)));
    }

    #[test]
    fn parses_relative_and_absolute() {
        let shape = Shape::from_svg_path("m 10,10 l 10 0 0 10 -10 0 z", 4).unwrap();
        let polygon = &shape.polygons()[0];
        assert_eq!(polygon.points().len(), 4);
        assert_eq!(polygon.points()[2], Vec2::new(20.0, 20.0));
        assert!(shape.contains(Vec2::new(15.0, 15.0)));
        assert!(!shape.contains(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn parses_compact_numbers() {
        let shape = Shape::from_svg_path("M0-1L1.5.5-2e1,3E-1Z", 4).unwrap();
        let points = shape.polygons()[0].points();
        assert_eq!(points[0], Vec2::new(0.0, -1.0));
        assert_eq!(points[1], Vec2::new(1.5, 0.5));
        assert_eq!(points[2], Vec2::new(-20.0, 0.3));
    }

    #[test]
    fn flattens_curves() {
        let shape = Shape::from_svg_path("M0 0 C0 -10 10 -10 10 0 Z", 8).unwrap();
        let points = shape.polygons()[0].points();
        assert_eq!(points.len(), 9);
        assert_eq!(*points.last().unwrap(), Vec2::new(10.0, 0.0));
        assert!(shape.contains(Vec2::new(5.0, -3.0)));
        assert!(!shape.contains(Vec2::new(5.0, 1.0)));

        let quad = Shape::from_svg_path("M0 0 q5 -10 10 0 z", 4).unwrap();
        assert_eq!(quad.polygons()[0].points().len(), 5);
    }

    #[test]
    fn holes_under_both_fill_rules() {
        // Hole drawn in the opposite direction: a hole under both rules
        let opposite = Shape::from_svg_path("M0 0H10V10H0Z M3 3V7H7V3Z", 4).unwrap();
        assert!(!opposite.contains(Vec2::new(5.0, 5.0)));

        // Hole drawn in the same direction: only even-odd cuts it out
        let same = "M0 0H10V10H0Z M3 3H7V7H3Z";
        let nonzero = Shape::from_svg_path(same, 4).unwrap();
        let evenodd = Shape::from_svg_path(same, 4).unwrap().with_fill_rule(FillRule::EvenOdd);
        assert!(nonzero.contains(Vec2::new(5.0, 5.0)));
        assert!(!evenodd.contains(Vec2::new(5.0, 5.0)));
        assert!(evenodd.contains(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn rejects_bad_paths() {
        assert!(matches!(
            Shape::from_svg_path("10 10", 4),
            Err(Error::PathParse { position: 0, .. })
        ));
        assert!(matches!(
            Shape::from_svg_path("M0 0 A 5 5 0 0 1 10 10", 4),
            Err(Error::PathParse { .. })
        ));
        let err = Shape::from_svg_path("M0 0 L 5", 4).unwrap_err();
        assert!(err.to_string().contains("expected a number"));
    }

    #[test]
    fn transform_round_trip() {
        let transform = Transform2::centered(500.0, 250.0, Vec2::new(1000.0, 800.0));
        assert_eq!(transform.scale, 0.5);
        assert_eq!(transform.offset, Vec2::new(375.0, 275.0));
        assert_eq!(transform.to_local(Vec2::new(375.0, 275.0)), Vec2::ZERO);
        assert_eq!(transform.to_local(Vec2::new(500.0, 400.0)), Vec2::new(250.0, 250.0));
        assert_eq!(transform.to_canvas(Vec2::new(250.0, 250.0)), Vec2::new(500.0, 400.0));
    }
}
