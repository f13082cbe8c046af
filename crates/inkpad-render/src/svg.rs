//! SVG output surface.

use crate::renderer::{RenderResult, RenderSurface, RendererError};
use inkpad_core::Geometry;
use kurbo::{Rect, Size};
use peniko::Color;
use std::fmt::Write as _;
use std::io;
use std::path::Path;

/// Collects drawing calls as SVG elements.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    size: Size,
    body: String,
}

impl SvgSurface {
    /// Create an empty surface of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            body: String::new(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Complete SVG document.
    pub fn finish(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.size.width,
            h = self.size.height
        );
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }

    /// Write the complete SVG document to `sink`.
    pub fn write_to(&self, sink: &mut dyn io::Write) -> io::Result<()> {
        sink.write_all(self.finish().as_bytes())
    }

    fn element(&mut self, element: std::fmt::Arguments<'_>) {
        let _ = writeln!(self.body, "  {element}");
    }
}

impl RenderSurface for SvgSurface {
    fn stroke(&mut self, geometry: &Geometry, color: Color, thickness: f64) {
        let paint = stroke_attrs(color, thickness);
        match geometry {
            Geometry::Empty => {}
            Geometry::Segment(line) => self.element(format_args!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {paint}/>"#,
                line.p0.x, line.p0.y, line.p1.x, line.p1.y
            )),
            Geometry::Rect(rect) => self.element(format_args!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" {paint}/>"#,
                rect.x0,
                rect.y0,
                rect.width(),
                rect.height()
            )),
            Geometry::Circle(circle) => self.element(format_args!(
                r#"<circle cx="{}" cy="{}" r="{}" fill="none" {paint}/>"#,
                circle.center.x, circle.center.y, circle.radius
            )),
            Geometry::Polyline(points) => {
                let coords: Vec<String> = points.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
                self.element(format_args!(
                    r#"<polyline points="{}" fill="none" stroke-linejoin="round" stroke-linecap="round" {paint}/>"#,
                    coords.join(" ")
                ));
            }
        }
    }

    fn fill_circle(&mut self, circle: kurbo::Circle, color: Color) {
        let (hex, opacity) = svg_color(color);
        self.element(format_args!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="{hex}" fill-opacity="{opacity}"/>"#,
            circle.center.x, circle.center.y, circle.radius
        ));
    }

    fn draw_background_image(&mut self, path: &Path, area: Rect) -> RenderResult<()> {
        if !path.is_file() {
            return Err(RendererError::BackgroundNotFound(path.to_path_buf()));
        }
        let href = escape_attr(&path.to_string_lossy());
        self.element(format_args!(
            r#"<image xlink:href="{href}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="none"/>"#,
            area.x0,
            area.y0,
            area.width(),
            area.height()
        ));
        Ok(())
    }
}

fn stroke_attrs(color: Color, thickness: f64) -> String {
    let (hex, opacity) = svg_color(color);
    format!(r#"stroke="{hex}" stroke-opacity="{opacity}" stroke-width="{thickness}""#)
}

/// `#RRGGBB` plus a separate opacity, since SVG 1.1 has no alpha in hex colors.
fn svg_color(color: Color) -> (String, f64) {
    let rgba = color.to_rgba8();
    let hex = format!("#{:02X}{:02X}{:02X}", rgba.r, rgba.g, rgba.b);
    let opacity = (f64::from(rgba.a) / 255.0 * 1000.0).round() / 1000.0;
    (hex, opacity)
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
