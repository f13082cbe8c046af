//! Grid overlay geometry.

use crate::renderer::GridStyle;
use kurbo::{Circle, Line, Point, Size};
use peniko::Color;

/// Default distance between grid lines.
pub const GRID_SPACING: f64 = 50.0;

/// Stroke width of grid lines.
pub const GRID_LINE_WIDTH: f64 = 0.5;

/// Radius of a grid dot.
pub const DOT_RADIUS: f64 = 1.0;

/// Upper bound on the primitives a single grid may produce.
pub const MAX_GRID_PRIMITIVES: usize = 100_000;

/// Grid color (dark gray).
pub fn grid_color() -> Color {
    inkpad_core::Color::DARK_GRAY.into()
}

/// One element of the grid overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridPrimitive {
    /// Stroked with [`GRID_LINE_WIDTH`].
    Line(Line),
    /// Filled.
    Dot(Circle),
}

/// Primitives covering a drawing area of `size`, starting at the origin.
///
/// Lines run the full width (horizontal) or height (vertical) at every
/// multiple of `spacing` below the area's extent. Dots sit on the same
/// intersections.
pub fn grid_primitives(style: GridStyle, size: Size, spacing: f64) -> Vec<GridPrimitive> {
    if style == GridStyle::None {
        return Vec::new();
    }
    if !spacing.is_finite() || spacing <= 0.0 {
        log::warn!("grid spacing {spacing} is not positive, skipping grid");
        return Vec::new();
    }

    let rows = step_count(size.height, spacing);
    let cols = step_count(size.width, spacing);
    let total = match style {
        GridStyle::Dots => rows * cols,
        _ => rows + cols,
    };
    if total > MAX_GRID_PRIMITIVES as f64 {
        log::warn!(
            "grid spacing {spacing} is too fine for a {}x{} area, skipping grid",
            size.width,
            size.height
        );
        return Vec::new();
    }

    let rows = steps(rows, size.height, spacing);
    let cols = steps(cols, size.width, spacing);

    match style {
        GridStyle::None => Vec::new(),
        GridStyle::Lines => {
            let horizontal = rows
                .iter()
                .map(|&y| GridPrimitive::Line(Line::new((0.0, y), (size.width, y))));
            let vertical = cols
                .iter()
                .map(|&x| GridPrimitive::Line(Line::new((x, 0.0), (x, size.height))));
            horizontal.chain(vertical).collect()
        }
        GridStyle::Dots => rows
            .iter()
            .flat_map(|&y| {
                cols.iter()
                    .map(move |&x| GridPrimitive::Dot(Circle::new(Point::new(x, y), DOT_RADIUS)))
            })
            .collect(),
    }
}

/// Number of grid intersections (rows times columns) for an area.
///
/// Returned as `f64` so that absurd ratios compare against
/// [`MAX_GRID_PRIMITIVES`] without overflowing.
pub fn grid_cell_count(size: Size, spacing: f64) -> f64 {
    step_count(size.height, spacing) * step_count(size.width, spacing)
}

/// How many multiples of `spacing` lie strictly below `extent`.
fn step_count(extent: f64, spacing: f64) -> f64 {
    if extent > 0.0 {
        (extent / spacing).ceil()
    } else {
        0.0
    }
}

/// Offsets `0, spacing, 2 * spacing, ...` strictly below `extent`.
fn steps(count: f64, extent: f64, spacing: f64) -> Vec<f64> {
    (0..count as usize)
        .map(|i| i as f64 * spacing)
        .filter(|&offset| offset < extent)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_grid() {
        assert!(grid_primitives(GridStyle::None, Size::new(500.0, 500.0), GRID_SPACING).is_empty());
    }

    #[test]
    fn test_lines_cover_area() {
        let primitives = grid_primitives(GridStyle::Lines, Size::new(120.0, 60.0), GRID_SPACING);
        // Rows at y = 0, 50; columns at x = 0, 50, 100.
        assert_eq!(primitives.len(), 5);
        assert_eq!(
            primitives[1],
            GridPrimitive::Line(Line::new((0.0, 50.0), (120.0, 50.0)))
        );
        assert_eq!(
            primitives[4],
            GridPrimitive::Line(Line::new((100.0, 0.0), (100.0, 60.0)))
        );
    }

    #[test]
    fn test_extent_is_exclusive() {
        let primitives = grid_primitives(GridStyle::Lines, Size::new(100.0, 100.0), GRID_SPACING);
        assert_eq!(primitives.len(), 4);
    }

    #[test]
    fn test_dots_at_intersections() {
        let primitives = grid_primitives(GridStyle::Dots, Size::new(101.0, 51.0), GRID_SPACING);
        assert_eq!(primitives.len(), 6);
        assert!(primitives.contains(&GridPrimitive::Dot(Circle::new((100.0, 50.0), DOT_RADIUS))));
    }

    #[test]
    fn test_bad_spacing_draws_nothing() {
        assert!(grid_primitives(GridStyle::Dots, Size::new(100.0, 100.0), 0.0).is_empty());
        assert!(grid_primitives(GridStyle::Lines, Size::new(100.0, 100.0), -5.0).is_empty());
    }

    #[test]
    fn test_grid_color_is_dark_gray() {
        assert_eq!(inkpad_core::Color::from(grid_color()), inkpad_core::Color::from_argb(0xFFA9A9A9));
    }

    #[test]
    fn test_too_fine_spacing_draws_nothing() {
        let canvas = Size::new(800.0, 600.0);
        assert!(grid_primitives(GridStyle::Dots, canvas, 1e-9).is_empty());
        assert!(grid_primitives(GridStyle::Lines, canvas, 1e-9).is_empty());
        assert!(grid_cell_count(canvas, 1e-9) > MAX_GRID_PRIMITIVES as f64);
    }

    #[test]
    fn test_huge_extent_terminates() {
        // Adding 1 to offsets this large no longer changes them.
        let area = Size::new(1e17, 1.0);
        assert!(grid_primitives(GridStyle::Lines, area, 1.0).is_empty());
        assert!(grid_primitives(GridStyle::Dots, Size::new(f64::INFINITY, 10.0), 1.0).is_empty());
    }

    #[test]
    fn test_dot_limit_applies_to_the_product() {
        // 400 rows and 400 columns stay under the limit as lines, not as dots.
        let area = Size::new(400.0, 400.0);
        assert_eq!(grid_primitives(GridStyle::Lines, area, 1.0).len(), 800);
        assert!(grid_primitives(GridStyle::Dots, area, 1.0).is_empty());
        assert_eq!(grid_cell_count(Size::new(800.0, 600.0), GRID_SPACING), 192.0);
    }

    #[test]
    fn test_offsets_are_multiples_of_spacing() {
        let primitives = grid_primitives(GridStyle::Lines, Size::new(1.0, 0.0), 0.1);
        assert_eq!(primitives.len(), 10);
        assert_eq!(
            primitives[9],
            GridPrimitive::Line(Line::new((9.0 * 0.1, 0.0), (9.0 * 0.1, 0.0)))
        );
    }
}
