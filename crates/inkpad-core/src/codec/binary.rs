//! Compact binary format.
//!
//! Every record is laid out little-endian as
//!
//! ```text
//! i32    kind          (0 = scribble, 1 = line, 2 = rectangle, 3 = circle)
//! f64    start.x, start.y, end.x, end.y
//! f64    thickness
//! string color token   (7-bit encoded length, then UTF-8 bytes)
//! ```
//!
//! Scribbles follow with `(f64 x, f64 y)` pairs terminated by a single NaN.
//! There is no point count, so a scribble point whose x is NaN cannot be
//! stored: it would end the point list early.

use super::{CodecResult, DecodeStop, Record, RecordError, ShapeCodec, decode_records, decode_style};
use crate::shapes::{Shape, ShapeKind};
use kurbo::Point;
use std::io::{self, BufRead, Read, Write};

/// Bit pattern written after the last scribble point.
const SCRIBBLE_TERMINATOR: u64 = 0xFFF8_0000_0000_0000;

/// A 7-bit encoded `u32` never needs more than this many bytes.
const MAX_LENGTH_PREFIX_BYTES: usize = 5;

/// Encoder/decoder for the binary format.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCodec;

impl ShapeCodec for BinaryCodec {
    fn name(&self) -> &'static str {
        "binary"
    }

    fn encode_shape(&self, shape: &Shape, sink: &mut dyn Write) -> CodecResult<()> {
        let (start, end) = (shape.start(), shape.end());
        sink.write_all(&shape.kind().code().to_le_bytes())?;
        for value in [start.x, start.y, end.x, end.y, shape.thickness()] {
            write_f64(sink, value)?;
        }
        write_string(sink, &shape.color().to_token())?;

        if let Some(scribble) = shape.as_scribble() {
            for point in scribble.points() {
                if point.x.is_nan() {
                    log::warn!("scribble point with NaN x will truncate the point list on load");
                }
                write_f64(sink, point.x)?;
                write_f64(sink, point.y)?;
            }
            write_f64(sink, f64::from_bits(SCRIBBLE_TERMINATOR))?;
        }
        Ok(())
    }

    fn decode_each(&self, source: &mut dyn BufRead, sink: &mut dyn FnMut(Shape)) -> CodecResult<DecodeStop> {
        decode_records(self.name(), || decode_record(source), sink)
    }
}

fn decode_record(source: &mut dyn BufRead) -> Result<Record, RecordError> {
    let Some(code) = read_kind(source)? else {
        return Ok(Record::End);
    };
    let Some(kind) = ShapeKind::from_code(code) else {
        return Ok(Record::UnknownTag(code.to_string()));
    };

    let start = Point::new(read_f64(source)?, read_f64(source)?);
    let end = Point::new(read_f64(source)?, read_f64(source)?);
    let thickness = read_f64(source)?;
    let token = read_string(source)?;
    let style = decode_style(thickness, &token)?;
    let mut shape = Shape::from_record(kind, start, end, style);

    if let Some(scribble) = shape.as_scribble_mut() {
        loop {
            let x = read_f64(source)?;
            if x.is_nan() {
                break;
            }
            let y = read_f64(source)?;
            scribble.push_decoded(Point::new(x, y));
        }
    }
    Ok(Record::Shape(shape))
}

/// Read the record tag, telling a clean end of stream apart from a cut-off tag.
fn read_kind(source: &mut dyn BufRead) -> Result<Option<i32>, RecordError> {
    let mut buf = [0u8; 4];
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    match filled {
        0 => Ok(None),
        4 => Ok(Some(i32::from_le_bytes(buf))),
        n => Err(RecordError::Malformed(format!("kind tag cut off after {n} bytes"))),
    }
}

fn read_f64(source: &mut dyn BufRead) -> Result<f64, RecordError> {
    let mut buf = [0u8; 8];
    source.read_exact(&mut buf)?;
    Ok(f64::from_le_bytes(buf))
}

fn write_f64(sink: &mut dyn Write, value: f64) -> io::Result<()> {
    sink.write_all(&value.to_le_bytes())
}

fn write_string(sink: &mut dyn Write, value: &str) -> io::Result<()> {
    let bytes = value.as_bytes();
    let mut len = bytes.len() as u32;
    loop {
        let low = (len & 0x7F) as u8;
        len >>= 7;
        if len == 0 {
            sink.write_all(&[low])?;
            break;
        }
        sink.write_all(&[low | 0x80])?;
    }
    sink.write_all(bytes)
}

fn read_string(source: &mut dyn BufRead) -> Result<String, RecordError> {
    let mut len: u32 = 0;
    let mut terminated = false;
    for i in 0..MAX_LENGTH_PREFIX_BYTES {
        let mut byte = [0u8; 1];
        source.read_exact(&mut byte)?;
        len |= u32::from(byte[0] & 0x7F) << (7 * i);
        if byte[0] & 0x80 == 0 {
            terminated = true;
            break;
        }
    }
    if !terminated || len > i32::MAX as u32 {
        return Err(RecordError::Malformed("bad string length prefix".to_string()));
    }

    let mut bytes = Vec::new();
    (&mut *source).take(u64::from(len)).read_to_end(&mut bytes)?;
    if bytes.len() != len as usize {
        return Err(RecordError::Malformed("stream ends inside a string".to_string()));
    }
    String::from_utf8(bytes).map_err(|e| RecordError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::test_support::FailingReader;
    use crate::codec::{CodecError, Decoded};
    use crate::color::Color;
    use crate::shapes::{Circle, Line, Scribble};

    fn encode(shapes: &[Shape]) -> Vec<u8> {
        let mut out = Vec::new();
        BinaryCodec.encode(&mut shapes.iter(), &mut out).unwrap();
        out
    }

    fn decode(bytes: &[u8]) -> Decoded {
        BinaryCodec.decode(&mut &bytes[..]).unwrap()
    }

    #[test]
    fn test_line_layout() {
        let line = Shape::Line(Line::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0), Color::BLACK));
        let bytes = encode(&[line]);

        let mut expected = Vec::new();
        expected.extend_from_slice(&1i32.to_le_bytes());
        for v in [0.0f64, 0.0, 10.0, 10.0, 2.0] {
            expected.extend_from_slice(&v.to_le_bytes());
        }
        expected.push(9);
        expected.extend_from_slice(b"#FF000000");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_scribble_ends_with_nan_sentinel() {
        let mut scribble = Scribble::new(Point::new(1.0, 2.0), Color::BLACK);
        scribble.add_point(Point::new(3.0, 4.0));
        let bytes = encode(&[Shape::Scribble(scribble)]);

        // header (4 + 5*8 + 1 + 9) + two points (32) + sentinel (8)
        assert_eq!(bytes.len(), 54 + 32 + 8);
        let tail: [u8; 8] = bytes[bytes.len() - 8..].try_into().unwrap();
        assert_eq!(u64::from_le_bytes(tail), SCRIBBLE_TERMINATOR);
    }

    #[test]
    fn test_round_trip_is_exact() {
        let mut scribble = Scribble::new(Point::new(0.1, 0.2), Color::new(9, 8, 7, 6));
        scribble.add_point(Point::new(1.0 / 3.0, -2.0 / 7.0));
        let shapes = vec![
            Shape::Scribble(scribble),
            Shape::Circle(Circle::new(Point::new(0.0, 0.0), Point::new(4.0, 10.0), Color::AQUA)),
            Shape::Line(Line::new(Point::new(-1.5, 2.25), Point::new(1e300, -1e-300), Color::WHITE)),
        ];
        let decoded = decode(&encode(&shapes));
        assert_eq!(decoded.stop, DecodeStop::EndOfData);
        assert_eq!(decoded.shapes, shapes);
    }

    #[test]
    fn test_empty_scribble_round_trip() {
        let empty = Shape::from_record(
            ShapeKind::Scribble,
            Point::ZERO,
            Point::ZERO,
            crate::shapes::ShapeStyle::new(Color::BLACK),
        );
        let decoded = decode(&encode(std::slice::from_ref(&empty)));
        assert_eq!(decoded.shapes, vec![empty]);
        assert!(decoded.shapes[0].points().is_empty());
    }

    #[test]
    fn test_unknown_kind_stops_decoding() {
        let line = Shape::Line(Line::new(Point::ZERO, Point::new(1.0, 1.0), Color::BLACK));
        let mut bytes = encode(&[line.clone()]);
        bytes.extend_from_slice(&4i32.to_le_bytes());
        bytes.extend_from_slice(&encode(&[line]));

        let decoded = decode(&bytes);
        assert_eq!(decoded.shapes.len(), 1);
        assert_eq!(decoded.stop, DecodeStop::UnknownTag("4".to_string()));
    }

    #[test]
    fn test_truncated_record_keeps_earlier_shapes() {
        let line = Shape::Line(Line::new(Point::ZERO, Point::new(1.0, 1.0), Color::BLACK));
        let mut bytes = encode(&[line.clone(), line]);
        bytes.truncate(bytes.len() - 3);

        let decoded = decode(&bytes);
        assert_eq!(decoded.shapes.len(), 1);
        match decoded.stop {
            DecodeStop::Malformed(malformed) => assert_eq!(malformed.record, 1),
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn test_truncated_kind_tag() {
        let decoded = decode(&[1, 0]);
        assert!(decoded.shapes.is_empty());
        assert!(matches!(decoded.stop, DecodeStop::Malformed(_)));
    }

    #[test]
    fn test_empty_stream() {
        let decoded = decode(&[]);
        assert!(decoded.shapes.is_empty());
        assert!(decoded.stop.is_end_of_data());
    }

    #[test]
    fn test_string_length_prefix() {
        let long = "x".repeat(300);
        let mut out = Vec::new();
        write_string(&mut out, &long).unwrap();
        assert_eq!(&out[..2], &[0xAC, 0x02]);
        assert_eq!(read_string(&mut &out[..]).ok(), Some(long));
    }

    #[test]
    fn test_bad_color_token_is_malformed() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1i32.to_le_bytes());
        for v in [0.0f64, 0.0, 1.0, 1.0, 2.0] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        bytes.push(3);
        bytes.extend_from_slice(b"???");

        let decoded = decode(&bytes);
        assert!(decoded.shapes.is_empty());
        assert!(matches!(decoded.stop, DecodeStop::Malformed(_)));
    }

    fn two_point_scribble() -> Shape {
        let mut scribble = Scribble::new(Point::new(1.0, 2.0), Color::BLACK);
        scribble.add_point(Point::new(3.0, 4.0));
        Shape::Scribble(scribble)
    }

    #[test]
    fn test_scribble_cut_before_sentinel() {
        let line = Shape::Line(Line::new(Point::ZERO, Point::new(1.0, 1.0), Color::BLACK));
        let mut bytes = encode(&[line.clone(), two_point_scribble()]);
        bytes.truncate(bytes.len() - 8);

        let decoded = decode(&bytes);
        assert_eq!(decoded.shapes, vec![line]);
        match decoded.stop {
            DecodeStop::Malformed(malformed) => assert_eq!(malformed.record, 1),
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn test_scribble_cut_inside_point() {
        let mut bytes = encode(&[two_point_scribble()]);
        // Drop the sentinel and half of the last y coordinate.
        bytes.truncate(bytes.len() - 12);

        let decoded = decode(&bytes);
        assert!(decoded.shapes.is_empty());
        assert!(matches!(decoded.stop, DecodeStop::Malformed(ref m) if m.record == 0));
    }

    #[test]
    fn test_reader_failure_is_io_error() {
        let line = Shape::Line(Line::new(Point::ZERO, Point::new(1.0, 1.0), Color::BLACK));
        let bytes = encode(&[line.clone(), line.clone()]);

        let mut reader = FailingReader::new(bytes.clone());
        assert!(matches!(BinaryCodec.decode(&mut reader), Err(CodecError::Io(_))));

        let mut delivered = Vec::new();
        let mut reader = FailingReader::new(bytes);
        let result = BinaryCodec.decode_each(&mut reader, &mut |shape| delivered.push(shape));
        assert!(matches!(result, Err(CodecError::Io(_))));
        assert_eq!(delivered, vec![line.clone(), line]);
    }
}
