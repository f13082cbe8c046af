//! InkPad Core Library
//!
//! Shape model, text and binary file codecs, and undo/redo history for the
//! InkPad sketch editor. Everything here is single-threaded: documents share
//! shapes through `Rc` and are owned by one editing context.

pub mod codec;
pub mod color;
pub mod document;
pub mod session;
pub mod shapes;
pub mod storage;

pub use codec::{BinaryCodec, CodecError, DecodeStop, Decoded, MalformedRecord, ShapeCodec, TextCodec};
pub use color::{Color, ColorParseError};
pub use document::{DrawingDocument, LoadReport, ShapeRef};
pub use session::{ActiveGesture, GestureEvent, Session};
pub use shapes::{Geometry, Shape, ShapeKind, ShapeStyle, DEFAULT_THICKNESS};
pub use storage::{FileFormat, StorageError, load_from_path, save_to_path};
