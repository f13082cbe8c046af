//! Text and binary encodings of a shape sequence.
//!
//! Both formats share one failure policy: decoding stops at the first record
//! that cannot be read and hands back every shape decoded before it. Running
//! into an unknown tag or a damaged record is reported in [`DecodeStop`], not
//! as an error. Only I/O failures of the underlying stream are errors, and
//! shapes handed to the sink before such a failure stay delivered.

mod binary;
mod text;

pub use binary::BinaryCodec;
pub use text::TextCodec;

use crate::color::Color;
use crate::shapes::{Shape, ShapeStyle};
use std::fmt;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Codec errors. Only genuine I/O failures end up here.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// A record that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record {record} is malformed: {reason}")]
pub struct MalformedRecord {
    /// Zero-based index of the failing record.
    pub record: usize,
    /// What was wrong with it.
    pub reason: String,
}

/// Why a decode loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeStop {
    /// The stream ended at a record boundary (or, for text, at a blank line).
    EndOfData,
    /// A tag that names no known shape kind.
    UnknownTag(String),
    /// A record was damaged part way through.
    Malformed(MalformedRecord),
}

impl DecodeStop {
    /// True when decoding ran to a natural end.
    pub fn is_end_of_data(&self) -> bool {
        matches!(self, DecodeStop::EndOfData)
    }
}

impl fmt::Display for DecodeStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeStop::EndOfData => f.write_str("end of data"),
            DecodeStop::UnknownTag(tag) => write!(f, "unknown shape tag {tag:?}"),
            DecodeStop::Malformed(malformed) => malformed.fmt(f),
        }
    }
}

/// Shapes recovered from a stream, plus the reason decoding stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub shapes: Vec<Shape>,
    pub stop: DecodeStop,
}

/// A paired encoder/decoder for one on-disk representation.
pub trait ShapeCodec {
    /// Short human-readable name of the format.
    fn name(&self) -> &'static str;

    /// Append one shape record to `sink`.
    fn encode_shape(&self, shape: &Shape, sink: &mut dyn Write) -> CodecResult<()>;

    /// Decode records until the stream ends or a record cannot be read,
    /// passing each shape to `sink` as soon as it is complete.
    fn decode_each(&self, source: &mut dyn BufRead, sink: &mut dyn FnMut(Shape)) -> CodecResult<DecodeStop>;

    /// Decode records into a vector.
    ///
    /// An I/O failure discards the collected shapes; use [`decode_each`]
    /// to keep them.
    ///
    /// [`decode_each`]: ShapeCodec::decode_each
    fn decode(&self, source: &mut dyn BufRead) -> CodecResult<Decoded> {
        let mut shapes = Vec::new();
        let stop = self.decode_each(source, &mut |shape| shapes.push(shape))?;
        Ok(Decoded { shapes, stop })
    }

    /// Encode every shape, in order.
    fn encode<'a>(
        &self,
        shapes: &mut dyn Iterator<Item = &'a Shape>,
        sink: &mut dyn Write,
    ) -> CodecResult<()> {
        for shape in shapes {
            self.encode_shape(shape, sink)?;
        }
        Ok(())
    }
}

/// Outcome of decoding a single record.
pub(crate) enum Record {
    Shape(Shape),
    End,
    UnknownTag(String),
}

/// Failure while decoding a single record.
pub(crate) enum RecordError {
    Malformed(String),
    Io(io::Error),
}

impl From<io::Error> for RecordError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => RecordError::Malformed("stream ends mid-record".to_string()),
            io::ErrorKind::InvalidData => RecordError::Malformed(err.to_string()),
            _ => RecordError::Io(err),
        }
    }
}

/// Drive a record decoder until it stops, applying the shared failure policy.
pub(crate) fn decode_records(
    format: &str,
    mut next_record: impl FnMut() -> Result<Record, RecordError>,
    sink: &mut dyn FnMut(Shape),
) -> CodecResult<DecodeStop> {
    let mut decoded = 0;
    let stop = loop {
        match next_record() {
            Ok(Record::Shape(shape)) => {
                sink(shape);
                decoded += 1;
            }
            Ok(Record::End) => break DecodeStop::EndOfData,
            Ok(Record::UnknownTag(tag)) => {
                log::debug!("{format} decode stopped at unknown tag {tag:?}");
                break DecodeStop::UnknownTag(tag);
            }
            Err(RecordError::Malformed(reason)) => {
                let malformed = MalformedRecord {
                    record: decoded,
                    reason,
                };
                log::warn!("{format} decode stopped: {malformed}");
                break DecodeStop::Malformed(malformed);
            }
            Err(RecordError::Io(err)) => {
                log::warn!("{format} decode failed after {decoded} shapes: {err}");
                return Err(CodecError::Io(err));
            }
        }
    };
    log::debug!("{format} decode recovered {decoded} shapes");
    Ok(stop)
}

/// Build the stored style, rejecting values no constructor can produce.
pub(crate) fn decode_style(thickness: f64, token: &str) -> Result<ShapeStyle, RecordError> {
    if thickness.is_nan() || thickness <= 0.0 {
        return Err(RecordError::Malformed(format!("thickness must be positive, got {thickness}")));
    }
    let color = Color::parse_token(token).map_err(|e| RecordError::Malformed(e.to_string()))?;
    Ok(ShapeStyle { color, thickness })
}
