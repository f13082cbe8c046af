//! Command implementations.

use crate::cli::Command;
use crate::config::AppConfig;
use inkpad_core::{
    Color, DrawingDocument, FileFormat, GestureEvent, Session, ShapeKind, StorageError, load_from_path,
    save_to_path,
};
use inkpad_render::{
    GridStyle, MAX_GRID_PRIMITIVES, RenderContext, RendererError, SvgSurface, grid_cell_count, render,
};
use kurbo::{Point, Size};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Output error: {0}")]
    Output(#[from] io::Error),
    #[error("{0}")]
    InvalidArgument(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Run one command, writing user-facing output to `out`.
pub fn run(command: Command, config: &AppConfig, out: &mut dyn Write) -> AppResult<()> {
    match command {
        Command::Info { file } => info(&file, out),
        Command::Convert { inputs, output } => convert(&inputs, &output, out),
        Command::Render {
            input,
            output,
            grid,
            width,
            height,
            background,
        } => {
            let options = RenderOptions {
                size: Size::new(
                    width.unwrap_or(config.canvas.width),
                    height.unwrap_or(config.canvas.height),
                ),
                grid: grid.unwrap_or(config.canvas.grid),
                grid_spacing: config.canvas.grid_spacing,
                background,
            };
            render_svg(&input, &output, &options, out)
        }
        Command::Draw {
            file,
            tool,
            color,
            points,
        } => draw(&file, tool, color.unwrap_or(config.canvas.pen_color), &points, out),
    }
}

fn info(path: &Path, out: &mut dyn Write) -> AppResult<()> {
    let format = FileFormat::from_path(path)?;
    let mut document = DrawingDocument::new();
    let report = load_from_path(&mut document, path)?;

    writeln!(
        out,
        "{}: {} shapes ({})",
        path.display(),
        report.loaded,
        format.codec().name()
    )?;
    for (index, shape) in document.shapes().iter().enumerate() {
        let (start, end) = (shape.start(), shape.end());
        write!(
            out,
            "{index:>4}  {:<9}  ({}, {}) -> ({}, {})  {}  {}",
            shape.kind().tag(),
            start.x,
            start.y,
            end.x,
            end.y,
            shape.color(),
            shape.thickness()
        )?;
        if shape.kind() == ShapeKind::Scribble {
            write!(out, "  {} points", shape.points().len())?;
        }
        writeln!(out)?;
    }
    if let Some(bounds) = document.bounds() {
        writeln!(
            out,
            "bounds: ({}, {}) - ({}, {})",
            bounds.x0, bounds.y0, bounds.x1, bounds.y1
        )?;
    }
    writeln!(out, "stopped at: {}", report.stop)?;
    Ok(())
}

fn convert(inputs: &[PathBuf], output: &Path, out: &mut dyn Write) -> AppResult<()> {
    // Reject an unusable output before doing any work.
    FileFormat::from_path(output)?;

    let mut document = DrawingDocument::new();
    for input in inputs {
        let report = load_from_path(&mut document, input)?;
        log::info!("{}: {} shapes", input.display(), report.loaded);
    }
    save_to_path(&document, output)?;
    writeln!(out, "wrote {} shapes to {}", document.len(), output.display())?;
    Ok(())
}

struct RenderOptions {
    size: Size,
    grid: GridStyle,
    grid_spacing: f64,
    background: Option<PathBuf>,
}

fn render_svg(input: &Path, output: &Path, options: &RenderOptions, out: &mut dyn Write) -> AppResult<()> {
    let Size { width, height } = options.size;
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(AppError::InvalidArgument(format!(
            "canvas size must be positive, got {width}x{height}"
        )));
    }
    let cells = grid_cell_count(options.size, options.grid_spacing);
    if options.grid != GridStyle::None && cells > MAX_GRID_PRIMITIVES as f64 {
        return Err(AppError::InvalidArgument(format!(
            "a {width}x{height} canvas is too large for grid spacing {}",
            options.grid_spacing
        )));
    }

    let mut document = DrawingDocument::new();
    load_from_path(&mut document, input)?;

    let ctx = RenderContext::new(&document, options.size)
        .with_grid(options.grid)
        .with_grid_spacing(options.grid_spacing)
        .with_background_image(options.background.as_deref());
    let mut surface = SvgSurface::new(options.size);
    render(&mut surface, &ctx)?;

    let write_err = |source: io::Error| AppError::Write {
        path: output.to_path_buf(),
        source,
    };
    let file = File::create(output).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    surface.write_to(&mut writer).map_err(write_err)?;
    writer.flush().map_err(write_err)?;

    log::debug!("rendered {} shapes at {width}x{height}", document.len());
    writeln!(out, "rendered {} shapes to {}", document.len(), output.display())?;
    Ok(())
}

fn draw(path: &Path, tool: ShapeKind, color: Color, points: &[Point], out: &mut dyn Write) -> AppResult<()> {
    let Some((&first, rest)) = points.split_first() else {
        return Err(AppError::InvalidArgument("a gesture needs at least one point".to_string()));
    };
    FileFormat::from_path(path)?;

    let mut document = DrawingDocument::new();
    if path.exists() {
        let report = load_from_path(&mut document, path)?;
        if !report.stop.is_end_of_data() {
            return Err(AppError::InvalidArgument(format!(
                "{} could not be read completely ({}); not overwriting it",
                path.display(),
                report.stop
            )));
        }
    }

    let mut session = Session::with_document(document, color);
    session.set_tool(tool);
    session.handle(GestureEvent::Start(first));
    let (last, moves) = match rest.split_last() {
        Some((&last, moves)) => (last, moves),
        None => (first, &[][..]),
    };
    for &point in moves {
        session.handle(GestureEvent::Extend(point));
    }
    let shape = session
        .handle(GestureEvent::End(last))
        .ok_or_else(|| AppError::InvalidArgument("gesture did not produce a shape".to_string()))?;

    save_to_path(session.document(), path)?;
    writeln!(
        out,
        "added {} to {} ({} shapes)",
        shape.kind().tag(),
        path.display(),
        session.document().len()
    )?;
    Ok(())
}
