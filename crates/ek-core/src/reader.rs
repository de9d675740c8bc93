//! Mapping Source Reader: canonical index lines → `(position, codepoint)` pairs.

use std::io::{self, BufRead};

use crate::error::TableError;

/// First non-blank character of a comment line.
pub const COMMENT_MARKER: char = '#';
/// Prefix of the code-point field.
const HEX_PREFIX: &str = "0x";

/// One `(position, codepoint)` pair of the canonical mapping.
///
/// `position` is kept signed: a negative value is a range error for the
/// builder, not a parse error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MappingEntry {
    /// Linear EUC-KR position.
    pub position: i64,
    /// Unicode scalar in the BMP.
    pub codepoint: u16,
}

/// Parse one line of the canonical index.
///
/// Blank and comment lines yield `Ok(None)`. Anything after the two fields
/// must itself be a comment.
///
/// # Errors
/// Returns [`TableError::MalformedEntry`] carrying the trimmed line if it is
/// not of the form `<decimal> 0x<hex>`.
///
/// # Example
/// ```
/// use ek_core::reader::{parse_line, MappingEntry};
/// let entry = parse_line("  52 0xAC02 ").unwrap();
/// assert_eq!(entry, Some(MappingEntry { position: 52, codepoint: 0xac02 }));
/// assert_eq!(parse_line("# index-euc-kr").unwrap(), None);
/// assert!(parse_line("not a valid line").is_err());
/// ```
pub fn parse_line(line: &str) -> Result<Option<MappingEntry>, TableError> {
    let s = line.trim();
    if s.is_empty() || s.starts_with(COMMENT_MARKER) {
        return Ok(None);
    }
    let malformed = || TableError::MalformedEntry(s.to_owned());

    let mut fields = s.split_whitespace();
    let (Some(position), Some(codepoint)) = (fields.next(), fields.next()) else {
        return Err(malformed());
    };
    if fields.next().is_some_and(|rest| !rest.starts_with(COMMENT_MARKER)) {
        return Err(malformed());
    }

    let position = parse_decimal(position).ok_or_else(malformed)?;
    let codepoint = codepoint
        .strip_prefix(HEX_PREFIX)
        .and_then(parse_hex)
        .ok_or_else(malformed)?;

    Ok(Some(MappingEntry {
        position,
        codepoint,
    }))
}

fn parse_decimal(field: &str) -> Option<i64> {
    let digits = field.strip_prefix('-').unwrap_or(field);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn parse_hex(field: &str) -> Option<u16> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(field, 16).ok()
}

/// Line counters kept by [`MappingReader`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReadStats {
    /// Lines pulled from the source.
    pub lines: usize,
    /// Blank or comment lines.
    pub skipped: usize,
}

/// Lazy adapter from a line sequence to mapping entries.
///
/// Stops pulling lines after the first error it yields.
///
/// # Example
/// ```
/// use ek_core::reader::MappingReader;
/// let text = "# header\n\n0 0x3000\n1 0x3001\n";
/// let entries: Vec<_> = MappingReader::from_reader(text.as_bytes())
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(entries.len(), 2);
/// ```
pub struct MappingReader<I> {
    lines: I,
    stats: ReadStats,
    failed: bool,
}

impl<I> MappingReader<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    /// Wrap a sequence of lines in file order.
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            stats: ReadStats::default(),
            failed: false,
        }
    }

    /// Counters so far.
    #[must_use]
    pub fn stats(&self) -> ReadStats {
        self.stats
    }
}

impl<R: BufRead> MappingReader<io::Lines<R>> {
    /// Read lines from any buffered reader.
    pub fn from_reader(reader: R) -> Self {
        Self::new(reader.lines())
    }
}

impl<I> Iterator for MappingReader<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<MappingEntry, TableError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e.into()));
                }
            };
            self.stats.lines += 1;
            match parse_line(&line) {
                Ok(Some(entry)) => return Some(Ok(entry)),
                Ok(None) => self.stats.skipped += 1,
                Err(e) => {
                    log::debug!("Ligne {} rejetée : {line:?}", self.stats.lines);
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
