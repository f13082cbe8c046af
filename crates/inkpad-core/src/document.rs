//! Drawing document and its undo/redo history.

use crate::codec::{CodecResult, DecodeStop, ShapeCodec};
use crate::shapes::Shape;
use kurbo::Rect;
use std::io::{BufRead, Write};
use std::rc::Rc;

/// Shared handle to a finished shape.
///
/// The document and both history stacks hold handles to the same shapes, so
/// an undo followed by a redo brings back the very same object.
pub type ShapeRef = Rc<Shape>;

/// Summary of a [`DrawingDocument::load`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    /// Number of shapes appended to the document.
    pub loaded: usize,
    /// Why decoding stopped.
    pub stop: DecodeStop,
}

/// An ordered collection of shapes (back to front) with linear undo history.
#[derive(Debug, Default)]
pub struct DrawingDocument {
    shapes: Vec<ShapeRef>,
    undo_stack: Vec<ShapeRef>,
    redo_stack: Vec<ShapeRef>,
}

impl DrawingDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished shape and record it for undo.
    ///
    /// Any pending redo history is discarded.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeRef {
        let shape = Rc::new(shape);
        self.shapes.push(Rc::clone(&shape));
        self.undo_stack.push(Rc::clone(&shape));
        if !self.redo_stack.is_empty() {
            log::debug!("discarding {} redo entries", self.redo_stack.len());
            self.redo_stack.clear();
        }
        shape
    }

    /// Undo the last change.
    ///
    /// Only acts when both the document and the undo stack are non-empty;
    /// otherwise nothing happens. Returns true if undo was performed.
    pub fn undo(&mut self) -> bool {
        if self.shapes.is_empty() || self.undo_stack.is_empty() {
            return false;
        }
        self.undo_stack.pop();
        if let Some(removed) = self.shapes.pop() {
            self.redo_stack.push(removed);
        }
        true
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(shape) = self.redo_stack.pop() else {
            return false;
        };
        self.shapes.push(Rc::clone(&shape));
        self.undo_stack.push(shape);
        true
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.shapes.is_empty() && !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Remove every shape and forget all history.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Shapes in z-order (back to front).
    pub fn shapes(&self) -> &[ShapeRef] {
        &self.shapes
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Get the bounding box of all shapes.
    ///
    /// Scribbles without points have no position and are left out.
    pub fn bounds(&self) -> Option<Rect> {
        self.shapes
            .iter()
            .filter(|shape| shape.as_scribble().is_none_or(|scribble| !scribble.is_empty()))
            .map(|shape| shape.bounds())
            .reduce(|acc, bounds| acc.union(bounds))
    }

    /// Write every shape, in order, through `codec`.
    pub fn save(&self, codec: &dyn ShapeCodec, sink: &mut dyn Write) -> CodecResult<()> {
        codec.encode(&mut self.shapes.iter().map(|shape| &**shape), sink)?;
        log::debug!("saved {} shapes as {}", self.shapes.len(), codec.name());
        Ok(())
    }

    /// Decode shapes through `codec` and append them to this document.
    ///
    /// The document is not cleared first, so repeated loads accumulate.
    /// Loaded shapes are not added to the undo history. Every shape is
    /// appended as soon as its record is complete, so shapes read before a
    /// damaged record or an I/O failure stay in the document; the report
    /// says where decoding stopped.
    pub fn load(&mut self, codec: &dyn ShapeCodec, source: &mut dyn BufRead) -> CodecResult<LoadReport> {
        let before = self.shapes.len();
        let shapes = &mut self.shapes;
        let result = codec.decode_each(source, &mut |shape| shapes.push(Rc::new(shape)));
        let loaded = self.shapes.len() - before;
        match result {
            Ok(stop) => {
                log::info!("loaded {loaded} shapes from {} data ({stop})", codec.name());
                Ok(LoadReport { loaded, stop })
            }
            Err(err) => {
                log::error!("{} load failed after {loaded} shapes: {err}", codec.name());
                Err(err)
            }
        }
    }
}
