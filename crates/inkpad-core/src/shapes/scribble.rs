//! Freehand scribble shape.

use super::{Geometry, ShapeKind, ShapeStyle, ShapeTrait};
use crate::color::Color;
use kurbo::{Point, Rect};

/// A freehand stroke (series of points).
///
/// `start` and `end` track the first and last recorded point so the common
/// record fields stay meaningful, but only `points` determines what is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Scribble {
    /// Point where the stroke began.
    pub start: Point,
    /// Most recently recorded point.
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
    points: Vec<Point>,
}

impl Scribble {
    /// Start a stroke at `point`.
    pub fn new(point: Point, color: Color) -> Self {
        Self {
            start: point,
            end: point,
            style: ShapeStyle::new(color),
            points: vec![point],
        }
    }

    /// Reconstruct a scribble with stored fields (for file loading).
    pub(crate) fn reconstruct(start: Point, end: Point, style: ShapeStyle, points: Vec<Point>) -> Self {
        Self {
            start,
            end,
            style,
            points,
        }
    }

    /// Record another point of the stroke.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
        self.end = point;
    }

    /// Append a decoded point without touching the stored endpoints.
    pub(crate) fn push_decoded(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Recorded points, in drawing order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ShapeTrait for Scribble {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Scribble
    }

    fn start(&self) -> Point {
        self.start
    }

    fn end(&self) -> Point {
        self.end
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn geometry(&self) -> Geometry {
        if self.points.len() < 2 {
            Geometry::Empty
        } else {
            Geometry::Polyline(self.points.clone())
        }
    }

    fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Rect::new(min_x, min_y, max_x, max_y)
    }
}
