//! Line-oriented text format.
//!
//! ```text
//! SCRIBBLE
//! 0,0,0,0,2,#FF00FFFF
//! 1,1
//! 2,3
//! LINE
//! 0,0,10,10,2,#FF000000
//! ```
//!
//! Numbers are written in their shortest round-trip form, so reading a file
//! back yields bit-identical coordinates.

use super::{CodecResult, DecodeStop, Record, RecordError, ShapeCodec, decode_records, decode_style};
use crate::shapes::{Shape, ShapeKind};
use kurbo::Point;
use std::io::{self, BufRead, Write};

/// Encoder/decoder for the human-readable format.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl ShapeCodec for TextCodec {
    fn name(&self) -> &'static str {
        "text"
    }

    fn encode_shape(&self, shape: &Shape, sink: &mut dyn Write) -> CodecResult<()> {
        let (start, end) = (shape.start(), shape.end());
        writeln!(sink, "{}", shape.kind().tag())?;
        writeln!(
            sink,
            "{},{},{},{},{},{}",
            start.x,
            start.y,
            end.x,
            end.y,
            shape.thickness(),
            shape.color().to_token()
        )?;
        for point in shape.points() {
            writeln!(sink, "{},{}", point.x, point.y)?;
        }
        Ok(())
    }

    fn decode_each(&self, source: &mut dyn BufRead, sink: &mut dyn FnMut(Shape)) -> CodecResult<DecodeStop> {
        let mut reader = LineReader::new(source);
        decode_records(self.name(), || decode_record(&mut reader), sink)
    }
}

fn decode_record(reader: &mut LineReader<'_>) -> Result<Record, RecordError> {
    let Some(tag_line) = reader.next_line()? else {
        return Ok(Record::End);
    };
    let tag = tag_line.trim();
    if tag.is_empty() {
        return Ok(Record::End);
    }
    let Some(kind) = ShapeKind::from_tag(tag) else {
        return Ok(Record::UnknownTag(tag.to_string()));
    };

    let Some(fields) = reader.next_line()? else {
        return Err(RecordError::Malformed(format!("{kind} tag has no field line")));
    };
    let mut shape = parse_common(kind, &fields)?;

    if let Some(scribble) = shape.as_scribble_mut() {
        // The first line that is not a point belongs to the next record.
        loop {
            let point = match reader.peek()? {
                Some(line) => parse_point(line),
                None => None,
            };
            let Some(point) = point else { break };
            reader.consume();
            scribble.push_decoded(point);
        }
    }
    Ok(Record::Shape(shape))
}

/// Parse `start.x,start.y,end.x,end.y,thickness,color`.
fn parse_common(kind: ShapeKind, line: &str) -> Result<Shape, RecordError> {
    let parts: Vec<&str> = line.splitn(6, ',').collect();
    if parts.len() != 6 {
        return Err(RecordError::Malformed(format!(
            "expected 6 comma-separated fields, found {}",
            parts.len()
        )));
    }
    let mut numbers = [0.0; 5];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse::<f64>()
            .map_err(|_| RecordError::Malformed(format!("{part:?} is not a number")))?;
    }
    let [sx, sy, ex, ey, thickness] = numbers;
    let style = decode_style(thickness, parts[5])?;
    Ok(Shape::from_record(kind, Point::new(sx, sy), Point::new(ex, ey), style))
}

/// Parse an `x,y` point line. Anything else is not a point.
fn parse_point(line: &str) -> Option<Point> {
    let (x, y) = line.split_once(',')?;
    if y.contains(',') {
        return None;
    }
    Some(Point::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

/// Reads lines with one line of lookahead.
struct LineReader<'a> {
    source: &'a mut dyn BufRead,
    peeked: Option<String>,
}

impl<'a> LineReader<'a> {
    fn new(source: &'a mut dyn BufRead) -> Self {
        Self { source, peeked: None }
    }

    /// Look at the next line without consuming it.
    fn peek(&mut self) -> io::Result<Option<&str>> {
        if self.peeked.is_none() {
            self.peeked = self.read_line()?;
        }
        Ok(self.peeked.as_deref())
    }

    /// Drop the peeked line.
    fn consume(&mut self) {
        self.peeked = None;
    }

    fn next_line(&mut self) -> io::Result<Option<String>> {
        match self.peeked.take() {
            Some(line) => Ok(Some(line)),
            None => self.read_line(),
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.source.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::test_support::FailingReader;
    use crate::codec::{CodecError, Decoded};
    use crate::color::Color;
    use crate::shapes::{Line, Rectangle, Scribble};

    fn encode(shapes: &[Shape]) -> String {
        let mut out = Vec::new();
        TextCodec.encode(&mut shapes.iter(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn decode(text: &str) -> Decoded {
        TextCodec.decode(&mut text.as_bytes()).unwrap()
    }

    #[test]
    fn test_encode_line_and_rectangle() {
        let shapes = vec![
            Shape::Line(Line::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0), Color::BLACK)),
            Shape::Rectangle(Rectangle::new(
                Point::new(5.0, 5.0),
                Point::new(15.0, 20.0),
                Color::new(0, 255, 0, 255),
            )),
        ];
        assert_eq!(
            encode(&shapes),
            "LINE\n0,0,10,10,2,#FF000000\nRECTANGLE\n5,5,15,20,2,#FF00FF00\n"
        );
    }

    #[test]
    fn test_scribble_points_follow_record() {
        let mut scribble = Scribble::new(Point::new(1.0, 2.0), Color::AQUA);
        scribble.add_point(Point::new(3.5, -4.0));
        let text = encode(&[Shape::Scribble(scribble)]);
        assert_eq!(text, "SCRIBBLE\n1,2,3.5,-4,2,#FF00FFFF\n1,2\n3.5,-4\n");
    }

    #[test]
    fn test_point_loop_leaves_next_tag() {
        let text = "SCRIBBLE\n0,0,2,2,2,#FF000000\n0,0\n1,1\n2,2\nCIRCLE\n0,0,4,10,2,#FFFF0000\n";
        let decoded = decode(text);
        assert_eq!(decoded.stop, DecodeStop::EndOfData);
        assert_eq!(decoded.shapes.len(), 2);
        assert_eq!(decoded.shapes[0].points().len(), 3);
        assert_eq!(decoded.shapes[1].kind(), ShapeKind::Circle);
    }

    #[test]
    fn test_scribble_without_points() {
        let decoded = decode("SCRIBBLE\n0,0,0,0,2,#FF000000\nLINE\n0,0,1,1,2,#FF000000\n");
        assert_eq!(decoded.shapes.len(), 2);
        assert!(decoded.shapes[0].points().is_empty());
    }

    #[test]
    fn test_point_line_needs_exactly_two_numbers() {
        assert_eq!(parse_point("1,2"), Some(Point::new(1.0, 2.0)));
        assert_eq!(parse_point(" 1.5 , -2 "), Some(Point::new(1.5, -2.0)));
        assert_eq!(parse_point("1,2,3"), None);
        assert_eq!(parse_point("LINE"), None);
        assert_eq!(parse_point(""), None);
        assert_eq!(parse_point("1,x"), None);
    }

    #[test]
    fn test_unknown_tag_stops_decoding() {
        let decoded = decode("LINE\n0,0,1,1,2,#FF000000\nTRIANGLE\n0,0,1,1,2,#FF000000\n");
        assert_eq!(decoded.shapes.len(), 1);
        assert_eq!(decoded.stop, DecodeStop::UnknownTag("TRIANGLE".to_string()));
    }

    #[test]
    fn test_blank_line_ends_decoding() {
        let decoded = decode("LINE\n0,0,1,1,2,#FF000000\n\nLINE\n0,0,1,1,2,#FF000000\n");
        assert_eq!(decoded.shapes.len(), 1);
        assert_eq!(decoded.stop, DecodeStop::EndOfData);
    }

    #[test]
    fn test_malformed_number_keeps_earlier_shapes() {
        let decoded = decode("LINE\n0,0,1,1,2,#FF000000\nLINE\n0,zero,1,1,2,#FF000000\n");
        assert_eq!(decoded.shapes.len(), 1);
        match decoded.stop {
            DecodeStop::Malformed(malformed) => assert_eq!(malformed.record, 1),
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_color_is_malformed() {
        let decoded = decode("LINE\n0,0,1,1,2,#XYZ\n");
        assert!(decoded.shapes.is_empty());
        assert!(matches!(decoded.stop, DecodeStop::Malformed(_)));
    }

    #[test]
    fn test_non_positive_thickness_is_malformed() {
        let decoded = decode("LINE\n0,0,1,1,0,#FF000000\n");
        assert!(matches!(decoded.stop, DecodeStop::Malformed(_)));
    }

    #[test]
    fn test_missing_field_line_is_malformed() {
        let decoded = decode("RECTANGLE\n");
        assert!(decoded.shapes.is_empty());
        assert!(matches!(decoded.stop, DecodeStop::Malformed(_)));
    }

    #[test]
    fn test_crlf_and_named_colors() {
        let decoded = decode("CIRCLE\r\n0,0,4,10,2,Aqua\r\n");
        assert_eq!(decoded.shapes.len(), 1);
        assert_eq!(decoded.shapes[0].color(), Color::AQUA);
    }

    #[test]
    fn test_fractional_round_trip_is_exact() {
        let mut scribble = Scribble::new(Point::new(0.1, 1.0 / 3.0), Color::new(1, 2, 3, 4));
        scribble.add_point(Point::new(123456.789, -0.000001));
        scribble.add_point(Point::new(1e21, 2.5e-8));
        let shape = Shape::Scribble(scribble);
        let decoded = decode(&encode(std::slice::from_ref(&shape)));
        assert_eq!(decoded.shapes, vec![shape]);
    }

    #[test]
    fn test_reader_failure_is_io_error() {
        let text = "LINE\n0,0,1,1,2,#FF000000\nLINE\n0,0,2,2,2,#FF000000\n";
        assert!(matches!(
            TextCodec.decode(&mut FailingReader::new(text)),
            Err(CodecError::Io(_))
        ));

        let mut delivered = Vec::new();
        let result = TextCodec.decode_each(&mut FailingReader::new(text), &mut |shape| delivered.push(shape));
        assert!(matches!(result, Err(CodecError::Io(_))));
        assert_eq!(delivered.len(), 2);
        assert_eq!(delivered[1].end(), Point::new(2.0, 2.0));
    }

    #[test]
    fn test_reader_failure_inside_scribble_points() {
        let text = "SCRIBBLE\n0,0,1,1,2,#FF000000\n0,0\n1,1\n";
        let mut delivered = Vec::new();
        let result = TextCodec.decode_each(&mut FailingReader::new(text), &mut |shape| delivered.push(shape));
        assert!(matches!(result, Err(CodecError::Io(_))));
        assert!(delivered.is_empty());
    }
}
