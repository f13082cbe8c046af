//! Shape definitions for the sketch editor.

mod circle;
mod line;
mod rectangle;
mod scribble;

pub use circle::Circle;
pub use line::Line;
pub use rectangle::Rectangle;
pub use scribble::Scribble;

use crate::color::Color;
use kurbo::{Point, Rect};
use std::fmt;

/// Stroke thickness given to every new shape.
pub const DEFAULT_THICKNESS: f64 = 2.0;

/// Style captured by value when a shape is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width, always positive.
    pub thickness: f64,
}

impl ShapeStyle {
    /// Style with the given color and the default thickness.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            thickness: DEFAULT_THICKNESS,
        }
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::new(Color::default())
    }
}

/// Variant tag identifying which kind of shape a record holds.
///
/// The discriminants are the binary format's `kind` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShapeKind {
    #[default]
    Scribble = 0,
    Line = 1,
    Rectangle = 2,
    Circle = 3,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Scribble,
        ShapeKind::Line,
        ShapeKind::Rectangle,
        ShapeKind::Circle,
    ];

    /// Tag line used by the text format.
    pub fn tag(self) -> &'static str {
        match self {
            ShapeKind::Scribble => "SCRIBBLE",
            ShapeKind::Line => "LINE",
            ShapeKind::Rectangle => "RECTANGLE",
            ShapeKind::Circle => "CIRCLE",
        }
    }

    /// Look up a text-format tag. Tags are matched exactly.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Tag written by the binary format.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Look up a binary-format tag.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The primitive a shape draws.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Nothing to draw (a scribble with fewer than two points).
    Empty,
    Segment(kurbo::Line),
    Rect(Rect),
    Circle(kurbo::Circle),
    /// Connected segments through the points, in order. Always two or more points.
    Polyline(Vec<Point>),
}

impl Geometry {
    /// Straight segments making up this primitive. Rectangles and circles
    /// are not segment based and yield nothing.
    pub fn segments(&self) -> Vec<kurbo::Line> {
        match self {
            Geometry::Segment(line) => vec![*line],
            Geometry::Polyline(points) => points
                .windows(2)
                .map(|w| kurbo::Line::new(w[0], w[1]))
                .collect(),
            Geometry::Empty | Geometry::Rect(_) | Geometry::Circle(_) => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Geometry::Empty)
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Variant tag.
    fn kind(&self) -> ShapeKind;

    /// Point where the gesture started.
    fn start(&self) -> Point;

    /// Point where the gesture ended (or currently is).
    fn end(&self) -> Point;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Primitive to draw.
    fn geometry(&self) -> Geometry;

    /// Bounding box of the drawn geometry.
    fn bounds(&self) -> Rect;
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Scribble(Scribble),
    Line(Line),
    Rectangle(Rectangle),
    Circle(Circle),
}

impl Shape {
    /// Start a new shape of the given kind at `point`, as a gesture does.
    ///
    /// Scribbles are seeded with `point` as their first point; the other
    /// kinds start out degenerate with `end == start`.
    pub fn begin(kind: ShapeKind, point: Point, color: Color) -> Self {
        match kind {
            ShapeKind::Scribble => Shape::Scribble(Scribble::new(point, color)),
            ShapeKind::Line => Shape::Line(Line::new(point, point, color)),
            ShapeKind::Rectangle => Shape::Rectangle(Rectangle::new(point, point, color)),
            ShapeKind::Circle => Shape::Circle(Circle::new(point, point, color)),
        }
    }

    /// Rebuild a shape from the common record fields. Scribbles come back
    /// with no points; the caller appends them.
    pub(crate) fn from_record(kind: ShapeKind, start: Point, end: Point, style: ShapeStyle) -> Self {
        match kind {
            ShapeKind::Scribble => Shape::Scribble(Scribble::reconstruct(start, end, style, Vec::new())),
            ShapeKind::Line => Shape::Line(Line::reconstruct(start, end, style)),
            ShapeKind::Rectangle => Shape::Rectangle(Rectangle::reconstruct(start, end, style)),
            ShapeKind::Circle => Shape::Circle(Circle::reconstruct(start, end, style)),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Scribble(s) => s.kind(),
            Shape::Line(s) => s.kind(),
            Shape::Rectangle(s) => s.kind(),
            Shape::Circle(s) => s.kind(),
        }
    }

    pub fn start(&self) -> Point {
        match self {
            Shape::Scribble(s) => s.start(),
            Shape::Line(s) => s.start(),
            Shape::Rectangle(s) => s.start(),
            Shape::Circle(s) => s.start(),
        }
    }

    pub fn end(&self) -> Point {
        match self {
            Shape::Scribble(s) => s.end(),
            Shape::Line(s) => s.end(),
            Shape::Rectangle(s) => s.end(),
            Shape::Circle(s) => s.end(),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Scribble(s) => s.style(),
            Shape::Line(s) => s.style(),
            Shape::Rectangle(s) => s.style(),
            Shape::Circle(s) => s.style(),
        }
    }

    pub fn color(&self) -> Color {
        self.style().color
    }

    pub fn thickness(&self) -> f64 {
        self.style().thickness
    }

    pub fn geometry(&self) -> Geometry {
        match self {
            Shape::Scribble(s) => s.geometry(),
            Shape::Line(s) => s.geometry(),
            Shape::Rectangle(s) => s.geometry(),
            Shape::Circle(s) => s.geometry(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Scribble(s) => s.bounds(),
            Shape::Line(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
        }
    }

    /// Scribble points; empty for every other kind.
    pub fn points(&self) -> &[Point] {
        match self {
            Shape::Scribble(s) => s.points(),
            _ => &[],
        }
    }

    /// Move the gesture end to `point`. Scribbles also record the point.
    pub(crate) fn extend_to(&mut self, point: Point) {
        match self {
            Shape::Scribble(s) => s.add_point(point),
            Shape::Line(s) => s.end = point,
            Shape::Rectangle(s) => s.end = point,
            Shape::Circle(s) => s.end = point,
        }
    }

    /// Get the scribble if this shape is a scribble.
    pub fn as_scribble(&self) -> Option<&Scribble> {
        match self {
            Shape::Scribble(s) => Some(s),
            _ => None,
        }
    }

    pub(crate) fn as_scribble_mut(&mut self) -> Option<&mut Scribble> {
        match self {
            Shape::Scribble(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_tag(kind.tag()), Some(kind));
            assert_eq!(ShapeKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(ShapeKind::from_tag("line"), None);
        assert_eq!(ShapeKind::from_tag("NULL"), None);
        assert_eq!(ShapeKind::from_code(4), None);
        assert_eq!(ShapeKind::from_code(-1), None);
    }

    #[test]
    fn test_binary_codes_are_stable() {
        assert_eq!(ShapeKind::Scribble.code(), 0);
        assert_eq!(ShapeKind::Line.code(), 1);
        assert_eq!(ShapeKind::Rectangle.code(), 2);
        assert_eq!(ShapeKind::Circle.code(), 3);
    }

    #[test]
    fn test_begin_uses_default_thickness() {
        for kind in ShapeKind::ALL {
            let shape = Shape::begin(kind, Point::new(1.0, 2.0), Color::BLACK);
            assert_eq!(shape.kind(), kind);
            assert_eq!(shape.thickness(), DEFAULT_THICKNESS);
            assert_eq!(shape.color(), Color::BLACK);
            assert_eq!(shape.start(), Point::new(1.0, 2.0));
            assert_eq!(shape.end(), Point::new(1.0, 2.0));
        }
    }

    #[test]
    fn test_only_scribble_has_points() {
        let scribble = Shape::begin(ShapeKind::Scribble, Point::ZERO, Color::BLACK);
        assert_eq!(scribble.points().len(), 1);

        let mut line = Shape::begin(ShapeKind::Line, Point::ZERO, Color::BLACK);
        line.extend_to(Point::new(5.0, 5.0));
        assert!(line.points().is_empty());
        assert_eq!(line.end(), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_style_is_copied_not_shared() {
        let mut style = ShapeStyle::new(Color::BLACK);
        let shape = Shape::from_record(ShapeKind::Line, Point::ZERO, Point::ZERO, style);
        style.color = Color::WHITE;
        assert_eq!(shape.color(), Color::BLACK);
    }

    #[test]
    fn test_polyline_segments() {
        let geometry = Geometry::Polyline(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ]);
        let segments = geometry.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1], kurbo::Line::new((1.0, 0.0), (1.0, 1.0)));
    }

    #[test]
    fn test_empty_geometry_has_no_segments() {
        assert!(Geometry::Empty.is_empty());
        assert!(Geometry::Empty.segments().is_empty());
    }
}
