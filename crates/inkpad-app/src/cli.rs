//! Command-line interface definition.

use clap::{Parser, Subcommand};
use inkpad_core::{Color, ShapeKind};
use inkpad_render::GridStyle;
use kurbo::Point;
use std::path::PathBuf;

/// Inspect, convert and render InkPad drawings.
#[derive(Debug, Parser)]
#[command(name = "inkpad", version, about)]
pub struct Cli {
    /// Configuration file (overrides $INKPAD_CONFIG and the user config).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the shapes stored in a drawing file.
    Info {
        /// Drawing file (.txt or .bin).
        file: PathBuf,
    },

    /// Load one or more drawings and save them as a single file.
    ///
    /// The output format follows the output file's extension.
    Convert {
        /// Input drawings, loaded in order.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Output drawing (.txt or .bin).
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Render a drawing to SVG.
    Render {
        /// Drawing file (.txt or .bin).
        input: PathBuf,
        /// SVG file to write.
        #[arg(short, long)]
        output: PathBuf,
        /// Grid overlay: none, dots or lines.
        #[arg(long)]
        grid: Option<GridStyle>,
        /// Canvas width.
        #[arg(long)]
        width: Option<f64>,
        /// Canvas height.
        #[arg(long)]
        height: Option<f64>,
        /// Image stretched behind the drawing.
        #[arg(long, value_name = "IMAGE")]
        background: Option<PathBuf>,
    },

    /// Draw one shape through a pointer gesture and append it to a drawing.
    ///
    /// The first point presses the pointer, the last releases it, and any
    /// points between are moves.
    Draw {
        /// Drawing to append to; created if missing.
        file: PathBuf,
        /// Shape kind: scribble, line, rectangle or circle.
        #[arg(long, value_parser = parse_kind, default_value = "scribble")]
        tool: ShapeKind,
        /// Pen color (#AARRGGBB, #RRGGBB or a color name).
        #[arg(long)]
        color: Option<Color>,
        /// Gesture points as `x,y`.
        #[arg(required = true, value_parser = parse_point, allow_hyphen_values = true)]
        points: Vec<Point>,
    },
}

fn parse_kind(value: &str) -> Result<ShapeKind, String> {
    ShapeKind::ALL
        .into_iter()
        .find(|kind| kind.tag().eq_ignore_ascii_case(value))
        .ok_or_else(|| format!("unknown shape kind {value:?}"))
}

fn parse_point(value: &str) -> Result<Point, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {value:?}"))?;
    let x: f64 = x.trim().parse().map_err(|_| format!("bad x coordinate in {value:?}"))?;
    let y: f64 = y.trim().parse().map_err(|_| format!("bad y coordinate in {value:?}"))?;
    Ok(Point::new(x, y))
}
