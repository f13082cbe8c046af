//! InkPad Render Library
//!
//! Drawing-surface abstraction for InkPad documents, the grid overlay, and a
//! plain SVG surface used for export.

mod grid;
mod renderer;
mod svg;

pub use grid::{
    DOT_RADIUS, GRID_LINE_WIDTH, GRID_SPACING, GridPrimitive, MAX_GRID_PRIMITIVES, grid_cell_count, grid_color,
    grid_primitives,
};
pub use renderer::{GridStyle, RenderContext, RenderResult, RenderSurface, RendererError, render};
pub use svg::SvgSurface;
