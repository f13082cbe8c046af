//! Editing session: the document plus the gesture currently being drawn.

use crate::color::Color;
use crate::document::{DrawingDocument, ShapeRef};
use crate::shapes::{Shape, ShapeKind};
use kurbo::Point;

/// Pointer events delivered by the host toolkit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Pointer pressed.
    Start(Point),
    /// Pointer moved while pressed.
    Extend(Point),
    /// Pointer released.
    End(Point),
    /// Gesture cancelled (e.g. focus lost).
    Abort,
}

/// The shape being built between pointer-down and pointer-up.
///
/// It is the only mutable shape in the system; finishing it hands an
/// immutable shape to the document.
#[derive(Debug, Clone)]
pub struct ActiveGesture {
    shape: Shape,
}

impl ActiveGesture {
    fn begin(kind: ShapeKind, point: Point, color: Color) -> Self {
        Self {
            shape: Shape::begin(kind, point, color),
        }
    }

    fn extend(&mut self, point: Point) {
        self.shape.extend_to(point);
    }

    fn finish(mut self, point: Point) -> Shape {
        self.shape.extend_to(point);
        self.shape
    }

    /// Shape as drawn so far.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// Owns the document, the selected tool and pen color, and at most one
/// active gesture.
#[derive(Debug, Default)]
pub struct Session {
    document: DrawingDocument,
    tool: ShapeKind,
    color: Color,
    active: Option<ActiveGesture>,
}

impl Session {
    /// Create a session with an empty document.
    pub fn new(color: Color) -> Self {
        Self::with_document(DrawingDocument::new(), color)
    }

    /// Create a session around an existing document.
    pub fn with_document(document: DrawingDocument, color: Color) -> Self {
        Self {
            document,
            tool: ShapeKind::default(),
            color,
            active: None,
        }
    }

    pub fn document(&self) -> &DrawingDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut DrawingDocument {
        &mut self.document
    }

    pub fn into_document(self) -> DrawingDocument {
        self.document
    }

    pub fn tool(&self) -> ShapeKind {
        self.tool
    }

    /// Select the kind of shape new gestures create. Cancels an active gesture.
    pub fn set_tool(&mut self, tool: ShapeKind) {
        self.cancel();
        self.tool = tool;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Set the pen color for shapes started from now on.
    ///
    /// Shapes already drawn, including an active gesture, keep their color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Begin a gesture at `point`.
    ///
    /// A second start while a gesture is active is ignored; returns false in
    /// that case.
    pub fn begin(&mut self, point: Point) -> bool {
        if self.active.is_some() {
            log::debug!("ignoring gesture start at {point:?}: a gesture is already active");
            return false;
        }
        self.active = Some(ActiveGesture::begin(self.tool, point, self.color));
        true
    }

    /// Move the active gesture to `point`. Returns false if nothing is active.
    pub fn extend(&mut self, point: Point) -> bool {
        match &mut self.active {
            Some(gesture) => {
                gesture.extend(point);
                true
            }
            None => false,
        }
    }

    /// Finish the active gesture at `point` and add the shape to the document.
    pub fn end(&mut self, point: Point) -> Option<ShapeRef> {
        let gesture = self.active.take()?;
        let shape = gesture.finish(point);
        log::debug!("finished {} gesture", shape.kind());
        Some(self.document.add_shape(shape))
    }

    /// Drop the active gesture without touching the document.
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Check if a gesture is active.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The shape being drawn, for live rendering.
    pub fn preview(&self) -> Option<&Shape> {
        self.active.as_ref().map(ActiveGesture::shape)
    }

    /// Dispatch a pointer event. Returns the shape added to the document, if any.
    pub fn handle(&mut self, event: GestureEvent) -> Option<ShapeRef> {
        match event {
            GestureEvent::Start(point) => {
                self.begin(point);
                None
            }
            GestureEvent::Extend(point) => {
                self.extend(point);
                None
            }
            GestureEvent::End(point) => self.end(point),
            GestureEvent::Abort => {
                self.cancel();
                None
            }
        }
    }

    pub fn undo(&mut self) -> bool {
        self.document.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.document.redo()
    }

    /// Start over with an empty document and no active gesture.
    pub fn clear(&mut self) {
        self.cancel();
        self.document.clear();
    }
}
