//! Render surface abstraction and the frame drawing order.

use crate::grid::{GRID_LINE_WIDTH, GRID_SPACING, GridPrimitive, grid_color, grid_primitives};
use inkpad_core::{DrawingDocument, Geometry, Session, Shape};
use kurbo::{Rect, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Background image not found: {}", .0.display())]
    BackgroundNotFound(PathBuf),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Grid display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridStyle {
    /// No grid.
    #[default]
    None,
    /// A dot at every grid intersection.
    Dots,
    /// Full grid lines.
    Lines,
}

impl GridStyle {
    pub const ALL: [GridStyle; 3] = [GridStyle::None, GridStyle::Dots, GridStyle::Lines];

    /// Get display name for this grid style.
    pub fn name(self) -> &'static str {
        match self {
            GridStyle::None => "none",
            GridStyle::Dots => "dots",
            GridStyle::Lines => "lines",
        }
    }
}

impl fmt::Display for GridStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GridStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GridStyle::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown grid style {s:?} (expected none, dots or lines)"))
    }
}

/// Context for a single render frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// The document to render.
    pub document: &'a DrawingDocument,
    /// Shape of the gesture in progress, drawn on top of everything.
    pub preview: Option<&'a Shape>,
    /// Drawing area size.
    pub size: Size,
    /// Grid display style.
    pub grid_style: GridStyle,
    /// Distance between grid lines.
    pub grid_spacing: f64,
    /// Image stretched over the drawing area before anything else.
    pub background_image: Option<&'a Path>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(document: &'a DrawingDocument, size: Size) -> Self {
        Self {
            document,
            preview: None,
            size,
            grid_style: GridStyle::None,
            grid_spacing: GRID_SPACING,
            background_image: None,
        }
    }

    /// Context for a live session, including its gesture preview.
    pub fn for_session(session: &'a Session, size: Size) -> Self {
        Self::new(session.document(), size).with_preview(session.preview())
    }

    pub fn with_preview(mut self, preview: Option<&'a Shape>) -> Self {
        self.preview = preview;
        self
    }

    /// Set the grid style.
    pub fn with_grid(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }

    pub fn with_grid_spacing(mut self, spacing: f64) -> Self {
        self.grid_spacing = spacing;
        self
    }

    /// Set the background image.
    pub fn with_background_image(mut self, path: Option<&'a Path>) -> Self {
        self.background_image = path;
        self
    }

    /// The whole drawing area.
    pub fn area(&self) -> Rect {
        Rect::from_origin_size(kurbo::Point::ZERO, self.size)
    }
}

/// Something shapes can be drawn on.
///
/// Implementations decide how primitives are rasterized or serialized; the
/// frame order is fixed by [`render`].
pub trait RenderSurface {
    /// Stroke the outline of `geometry`. Rectangles and circles are not filled.
    fn stroke(&mut self, geometry: &Geometry, color: Color, thickness: f64);

    /// Fill a circle. Used for grid dots.
    fn fill_circle(&mut self, circle: kurbo::Circle, color: Color);

    /// Stretch the image at `path` over `area`.
    fn draw_background_image(&mut self, path: &Path, area: Rect) -> RenderResult<()>;
}

/// Draw one frame: background image, grid, document shapes in z-order, then
/// the gesture preview.
pub fn render(surface: &mut dyn RenderSurface, ctx: &RenderContext<'_>) -> RenderResult<()> {
    if let Some(path) = ctx.background_image {
        surface.draw_background_image(path, ctx.area())?;
    }

    let color = grid_color();
    for primitive in grid_primitives(ctx.grid_style, ctx.size, ctx.grid_spacing) {
        match primitive {
            GridPrimitive::Line(line) => surface.stroke(&Geometry::Segment(line), color, GRID_LINE_WIDTH),
            GridPrimitive::Dot(dot) => surface.fill_circle(dot, color),
        }
    }

    for shape in ctx.document.shapes() {
        draw_shape(surface, shape);
    }

    if let Some(preview) = ctx.preview {
        draw_shape(surface, preview);
    }
    Ok(())
}

fn draw_shape(surface: &mut dyn RenderSurface, shape: &Shape) {
    let geometry = shape.geometry();
    if geometry.is_empty() {
        return;
    }
    surface.stroke(&geometry, shape.color().into(), shape.thickness());
}
