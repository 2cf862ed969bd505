//! PitchTier text ingest.
//!
//! Praat writes the same logical content in two layouts:
//!
//! - **short**: every numeric line is a bare literal (`0.5`)
//! - **long**: numeric lines are labeled (`xmin = 0.5`) and every point is
//!   preceded by an index line (`points [1]:`)
//!
//! Detection is done per group of lines rather than per file: once for the
//! `xmin`/`xmax`/`count` triple (all-or-nothing), then again for every point.
//! In the long layout only the last whitespace-separated token of a line is
//! numeric.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::domain::{ControlPoint, PitchTier};
use crate::error::TierError;

pub const FILE_TYPE_LINE: &str = "File type = \"ooTextFile\"";
pub const OBJECT_CLASS_LINE: &str = "Object class = \"PitchTier\"";

/// Which layout a group of numeric lines was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberLayout {
    /// Bare literals, one per line.
    Short,
    /// `label = value` lines (plus an index line before each point).
    Long,
}

/// Parsed `xmin` / `xmax` / `count` block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierHeader {
    pub xmin: f64,
    pub xmax: f64,
    pub count: usize,
    pub layout: NumberLayout,
}

/// Result of ingesting one PitchTier stream.
#[derive(Debug, Clone)]
pub struct IngestedTier {
    pub tier: PitchTier,
    pub header: TierHeader,
    /// Non-blank lines found after the last stated point.
    pub ignored_lines: usize,
}

/// Line source that tracks 1-based line numbers for error messages.
struct LineSource<R> {
    reader: R,
    line_no: usize,
}

impl<R: BufRead> LineSource<R> {
    fn new(reader: R) -> Self {
        Self { reader, line_no: 0 }
    }

    /// Next line without its terminator, or `UnexpectedEof` naming what was
    /// being read.
    fn next_line(&mut self, expected: impl FnOnce() -> String) -> Result<(usize, String), TierError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(TierError::UnexpectedEof {
                line: self.line_no + 1,
                expected: expected(),
            });
        }
        self.line_no += 1;
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok((self.line_no, line))
    }

    /// Count the non-blank lines left in the stream.
    ///
    /// Works on raw bytes: whatever follows the stated points is never
    /// decoded, so it does not have to be valid UTF-8.
    fn count_remaining(&mut self) -> Result<usize, TierError> {
        let mut n = 0;
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if self.reader.read_until(b'\n', &mut buf)? == 0 {
                return Ok(n);
            }
            if buf.iter().any(|b| !b.is_ascii_whitespace()) {
                n += 1;
            }
        }
    }
}

impl PitchTier {
    /// Parse a tier from any reader (short or long layout).
    pub fn from_reader<R: Read>(input: R) -> Result<Self, TierError> {
        read_pitch_tier(input)
    }

    /// Parse a tier from a file.
    pub fn from_path(path: &Path) -> Result<Self, TierError> {
        read_pitch_tier_path(path)
    }
}

impl FromStr for PitchTier {
    type Err = TierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        read_pitch_tier(s.as_bytes())
    }
}

/// Open and parse a PitchTier file.
pub fn read_pitch_tier_path(path: &Path) -> Result<PitchTier, TierError> {
    let file = File::open(path)?;
    read_pitch_tier(file)
}

/// Parse a PitchTier from text.
///
/// The stated count decides how many points are read. Running out of lines
/// first is an error; lines left over afterwards are ignored with a warning.
pub fn read_pitch_tier<R: Read>(input: R) -> Result<PitchTier, TierError> {
    ingest_pitch_tier(input).map(|ingested| ingested.tier)
}

/// Like [`read_pitch_tier`], but also reports the header as read and how many
/// trailing lines were skipped.
pub fn ingest_pitch_tier<R: Read>(input: R) -> Result<IngestedTier, TierError> {
    let mut src = LineSource::new(BufReader::new(input));

    let (line, file_type) = src.next_line(|| "file type line".to_string())?;
    // Windows exports may carry a UTF-8 BOM on the very first line.
    expect_literal(line, file_type.trim_start_matches('\u{feff}'), FILE_TYPE_LINE)?;
    let (line, object_class) = src.next_line(|| "object class line".to_string())?;
    expect_literal(line, &object_class, OBJECT_CLASS_LINE)?;
    src.next_line(|| "blank line after header".to_string())?;

    let header = read_header(&mut src)?;
    debug!(
        xmin = header.xmin,
        xmax = header.xmax,
        count = header.count,
        layout = ?header.layout,
        "parsed PitchTier header"
    );

    let mut points = Vec::with_capacity(header.count.min(1 << 16));
    for idx in 0..header.count {
        let (point, layout) = read_point(&mut src, idx, header.count)?;
        if layout != header.layout {
            debug!(point = idx + 1, ?layout, "point layout differs from header layout");
        }
        points.push(point);
    }

    let leftover = src.count_remaining()?;
    if leftover > 0 {
        warn!(
            stated = header.count,
            ignored_lines = leftover,
            "PitchTier has trailing lines after the stated point count; ignoring them"
        );
    }

    Ok(IngestedTier {
        tier: PitchTier::new(header.xmin, header.xmax, points),
        header,
        ignored_lines: leftover,
    })
}

fn expect_literal(line: usize, actual: &str, expected: &'static str) -> Result<(), TierError> {
    if actual == expected {
        Ok(())
    } else {
        Err(TierError::Header {
            line,
            expected,
            actual: actual.to_string(),
        })
    }
}

fn read_header<R: BufRead>(src: &mut LineSource<R>) -> Result<TierHeader, TierError> {
    let xmin_line = src.next_line(|| "xmin".to_string())?;
    let xmax_line = src.next_line(|| "xmax".to_string())?;
    let count_line = src.next_line(|| "point count".to_string())?;

    let bare = (
        bare_literal(&xmin_line.1).parse::<f64>(),
        bare_literal(&xmax_line.1).parse::<f64>(),
        bare_literal(&count_line.1).parse::<usize>(),
    );
    if let (Ok(xmin), Ok(xmax), Ok(count)) = bare {
        return Ok(TierHeader {
            xmin,
            xmax,
            count,
            layout: NumberLayout::Short,
        });
    }

    Ok(TierHeader {
        xmin: parse_last_token(&xmin_line)?,
        xmax: parse_last_token(&xmax_line)?,
        count: parse_last_token(&count_line)?,
        layout: NumberLayout::Long,
    })
}

fn read_point<R: BufRead>(
    src: &mut LineSource<R>,
    idx: usize,
    count: usize,
) -> Result<(ControlPoint, NumberLayout), TierError> {
    let what = |field: &str| format!("{field} of point {} of {count}", idx + 1);

    let first = src.next_line(|| what("time"))?;
    let second = src.next_line(|| what("frequency"))?;

    if let (Ok(time), Ok(frequency)) = (
        bare_literal(&first.1).parse::<f64>(),
        bare_literal(&second.1).parse::<f64>(),
    ) {
        return Ok((ControlPoint::new(time, frequency), NumberLayout::Short));
    }

    // Long layout: `first` was the index line, so `second` holds the time.
    let third = src.next_line(|| what("frequency"))?;
    let time = parse_last_token(&second)?;
    let frequency = parse_last_token(&third)?;
    Ok((ControlPoint::new(time, frequency), NumberLayout::Long))
}

fn bare_literal(line: &str) -> &str {
    line.trim()
}

fn last_token(line: &str) -> &str {
    line.split_whitespace().last().unwrap_or("")
}

fn parse_last_token<T: FromStr>((line_no, line): &(usize, String)) -> Result<T, TierError> {
    last_token(line).parse::<T>().map_err(|_| TierError::Number {
        line: *line_no,
        content: line.clone(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SHORT: &str = "File type = \"ooTextFile\"\n\
Object class = \"PitchTier\"\n\
\n\
0.0\n\
1.0\n\
2\n\
0.0\n\
100.0\n\
1.0\n\
200.0\n";

    const LONG: &str = "File type = \"ooTextFile\"\n\
Object class = \"PitchTier\"\n\
\n\
xmin = 0 \n\
xmax = 1 \n\
points: size = 2 \n\
points [1]:\n    number = 0 \n    value = 100 \n\
points [2]:\n    number = 1 \n    value = 200 \n";

    #[test]
    fn parses_short_layout() {
        let tier: PitchTier = SHORT.parse().unwrap();
        assert_eq!(tier.xmin(), 0.0);
        assert_eq!(tier.xmax(), 1.0);
        assert_eq!(tier.count(), 2);
        assert_eq!(tier.points(), &[ControlPoint::new(0.0, 100.0), ControlPoint::new(1.0, 200.0)]);
    }

    #[test]
    fn long_layout_matches_short_layout() {
        let short: PitchTier = SHORT.parse().unwrap();
        let long: PitchTier = LONG.parse().unwrap();
        assert_eq!(short, long);
    }

    #[test]
    fn parse_equals_direct_construction() {
        let parsed: PitchTier = SHORT.parse().unwrap();
        let direct = PitchTier::new(0.0, 1.0, vec![ControlPoint::new(0.0, 100.0), ControlPoint::new(1.0, 200.0)]);
        assert_eq!(parsed, direct);
    }

    #[test]
    fn header_detection_is_all_or_nothing() {
        // Two bare lines plus one labeled line: all three go through token extraction.
        let text = "File type = \"ooTextFile\"\nObject class = \"PitchTier\"\n\n0.25\n1.5\ncount = 0\n";
        let tier: PitchTier = text.parse().unwrap();
        assert_eq!(tier.xmin(), 0.25);
        assert_eq!(tier.xmax(), 1.5);
        assert_eq!(tier.count(), 0);
    }

    #[test]
    fn header_layouts_agree() {
        let short = "File type = \"ooTextFile\"\nObject class = \"PitchTier\"\n\n0.0\n1.0\n2\n0.2\n110\n0.8\n120\n";
        let long = "File type = \"ooTextFile\"\nObject class = \"PitchTier\"\n\nxmin = 0.0\nxmax = 1.0\ncount = 2\n0.2\n110\n0.8\n120\n";
        let a: PitchTier = short.parse().unwrap();
        let b: PitchTier = long.parse().unwrap();
        assert_eq!((a.xmin(), a.xmax(), a.count()), (b.xmin(), b.xmax(), b.count()));
        assert_eq!(a, b);
    }

    #[test]
    fn point_layout_detected_per_record() {
        let text = "File type = \"ooTextFile\"\nObject class = \"PitchTier\"\n\n0\n2\n3\n\
0.5\n150\n\
points [2]:\n  number = 1.0\n  value = 160.5\n\
1.5\n170\n";
        let tier: PitchTier = text.parse().unwrap();
        assert_eq!(
            tier.points(),
            &[
                ControlPoint::new(0.5, 150.0),
                ControlPoint::new(1.0, 160.5),
                ControlPoint::new(1.5, 170.0),
            ]
        );
    }

    #[test]
    fn wrong_file_type_names_expected_and_actual() {
        let text = SHORT.replacen("ooTextFile", "ooBinaryFile", 1);
        let err = text.parse::<PitchTier>().unwrap_err();
        match err {
            TierError::Header { line, expected, actual } => {
                assert_eq!(line, 1);
                assert_eq!(expected, FILE_TYPE_LINE);
                assert_eq!(actual, "File type = \"ooBinaryFile\"");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn object_class_is_case_sensitive() {
        let text = SHORT.replacen("PitchTier", "pitchtier", 1);
        let err = text.parse::<PitchTier>().unwrap_err();
        assert!(matches!(err, TierError::Header { line: 2, .. }));
    }

    #[test]
    fn accepts_bom_and_crlf() {
        let text = format!("\u{feff}{}", SHORT.replace('\n', "\r\n"));
        let tier: PitchTier = text.parse().unwrap();
        assert_eq!(tier.count(), 2);
        assert_eq!(tier.points()[1], ControlPoint::new(1.0, 200.0));
    }

    #[test]
    fn unparsable_number_is_fatal() {
        let text = "File type = \"ooTextFile\"\nObject class = \"PitchTier\"\n\n0\n1\n1\n0.5\nvalue = loud\n\n";
        let err = text.parse::<PitchTier>().unwrap_err();
        assert!(err.is_format());
        assert!(matches!(err, TierError::Number { .. }), "got {err}");
    }

    #[test]
    fn bad_header_number_is_fatal() {
        let text = "File type = \"ooTextFile\"\nObject class = \"PitchTier\"\n\nxmin = zero\nxmax = 1\ncount = 0\n";
        let err = text.parse::<PitchTier>().unwrap_err();
        match err {
            TierError::Number { line, content } => {
                assert_eq!(line, 4);
                assert_eq!(content, "xmin = zero");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negative_count_is_rejected() {
        let text = "File type = \"ooTextFile\"\nObject class = \"PitchTier\"\n\n0\n1\n-1\n";
        let err = text.parse::<PitchTier>().unwrap_err();
        assert!(matches!(err, TierError::Number { line: 6, .. }));
    }

    #[test]
    fn missing_points_is_unexpected_eof() {
        let text = "File type = \"ooTextFile\"\nObject class = \"PitchTier\"\n\n0\n1\n3\n0.1\n100\n0.2\n";
        let err = text.parse::<PitchTier>().unwrap_err();
        match err {
            TierError::UnexpectedEof { line, expected } => {
                assert_eq!(line, 10);
                assert!(expected.contains("point 2 of 3"), "{expected}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn truncated_header_is_unexpected_eof() {
        let err = "File type = \"ooTextFile\"\n".parse::<PitchTier>().unwrap_err();
        assert!(matches!(err, TierError::UnexpectedEof { line: 2, .. }));
        let err = "".parse::<PitchTier>().unwrap_err();
        assert!(matches!(err, TierError::UnexpectedEof { line: 1, .. }));
    }

    #[test]
    fn trailing_lines_are_ignored() {
        let text = format!("{SHORT}2.0\n300.0\n\n");
        let tier: PitchTier = text.parse().unwrap();
        assert_eq!(tier.count(), 2);
        assert_eq!(tier, SHORT.parse::<PitchTier>().unwrap());
    }

    #[test]
    fn trailing_line_count_is_reported() {
        let ingested = ingest_pitch_tier(format!("{SHORT}2.0\n300.0\n\n").as_bytes()).unwrap();
        assert_eq!(ingested.ignored_lines, 2);
        assert_eq!(ingested.header.count, 2);
        assert_eq!(ingested.header.layout, NumberLayout::Short);

        let clean = ingest_pitch_tier(SHORT.as_bytes()).unwrap();
        assert_eq!(clean.ignored_lines, 0);
        assert_eq!(clean.tier, ingested.tier);
    }

    #[test]
    fn non_utf8_trailing_bytes_are_ignored() {
        let mut bytes = b"File type = \"ooTextFile\"\nObject class = \"PitchTier\"\n\n0\n1\n1\n0.5\n120\n".to_vec();
        bytes.extend_from_slice(b"\xff\xfe garbage\n");
        let ingested = ingest_pitch_tier(bytes.as_slice()).unwrap();
        assert_eq!(ingested.tier.points(), &[ControlPoint::new(0.5, 120.0)]);
        assert_eq!(ingested.ignored_lines, 1);
        assert_eq!(PitchTier::from_reader(bytes.as_slice()).unwrap(), ingested.tier);
    }

    #[test]
    fn reads_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LONG.as_bytes()).unwrap();
        let tier = PitchTier::from_path(file.path()).unwrap();
        assert_eq!(tier.count(), 2);

        let missing = read_pitch_tier_path(Path::new("/definitely/not/here.PitchTier")).unwrap_err();
        assert!(matches!(missing, TierError::Io(_)));
    }
}
