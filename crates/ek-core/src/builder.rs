//! Table Builder: folds mapping entries into the decode and encode tables.

use std::io::{self, BufRead};

use serde::Serialize;

use crate::error::TableError;
use crate::layout::{POSITION_COUNT, decompose};
use crate::reader::{MappingEntry, MappingReader};
use crate::table::{DecodeTable, EncodeTable, Tables, UNMAPPED};
use crate::traits::LineSource;

/// Counters collected during one build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Lines read from the source (0 when building from entries directly).
    pub lines: usize,
    /// Blank or comment lines.
    pub skipped: usize,
    /// Entries folded into the tables.
    pub entries: usize,
    /// Positions re-mapped to a different code point.
    pub forward_overwrites: usize,
    /// Entries whose code point already had a canonical byte pair.
    pub reverse_shadowed: usize,
}

/// Owns both tables for the duration of one build.
///
/// An entry that fails validation leaves the builder untouched; the build
/// functions drop the builder on the first error so no half-built tables
/// escape.
///
/// # Example
/// ```
/// use ek_core::builder::TableBuilder;
/// use ek_core::layout::decompose;
/// use ek_core::reader::MappingEntry;
///
/// let mut builder = TableBuilder::new();
/// builder.insert(MappingEntry { position: 5, codepoint: 0x41 }).unwrap();
/// builder.insert(MappingEntry { position: 9, codepoint: 0x41 }).unwrap();
/// let (tables, stats) = builder.finish();
/// assert_eq!(tables.encode().get(0x41), Some(decompose(5)));
/// assert_eq!(tables.decode().get(9), Some(0x41));
/// assert_eq!(stats.reverse_shadowed, 1);
/// ```
pub struct TableBuilder {
    decode: DecodeTable,
    encode: EncodeTable,
    stats: BuildStats,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder {
    /// Start from fully empty tables.
    #[must_use]
    pub fn new() -> Self {
        Self {
            decode: DecodeTable::empty(),
            encode: EncodeTable::empty(),
            stats: BuildStats::default(),
        }
    }

    /// Fold one entry in.
    ///
    /// The forward slot is last-writer-wins; the reverse slot keeps the byte
    /// pair of the first position seen for each code point.
    ///
    /// # Errors
    /// [`TableError::PositionOutOfRange`] if the position is negative or
    /// `>= POSITION_COUNT`, [`TableError::ReservedCodepoint`] for U+0000.
    pub fn insert(&mut self, entry: MappingEntry) -> Result<(), TableError> {
        let position = u16::try_from(entry.position)
            .ok()
            .filter(|&p| usize::from(p) < POSITION_COUNT)
            .ok_or(TableError::PositionOutOfRange(entry.position))?;
        if entry.codepoint == UNMAPPED {
            return Err(TableError::ReservedCodepoint { position });
        }
        self.stats.entries += 1;

        let forward = self.decode.slot_mut(usize::from(position));
        if *forward != UNMAPPED && *forward != entry.codepoint {
            log::debug!(
                "Position {position} remappée : U+{:04X} -> U+{:04X}",
                *forward,
                entry.codepoint
            );
            self.stats.forward_overwrites += 1;
        }
        *forward = entry.codepoint;

        let reverse = self.encode.slot_mut(usize::from(entry.codepoint));
        if *reverse == UNMAPPED {
            *reverse = decompose(position).packed();
        } else {
            log::trace!(
                "U+{:04X} déjà encodé en 0x{:04X}, position {position} ignorée",
                entry.codepoint,
                *reverse
            );
            self.stats.reverse_shadowed += 1;
        }
        Ok(())
    }

    /// Counters so far.
    #[must_use]
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Hand over the finished tables.
    #[must_use]
    pub fn finish(self) -> (Tables, BuildStats) {
        (Tables::new(self.decode, self.encode), self.stats)
    }
}

/// Build both tables from entries in source order.
///
/// # Errors
/// Fails on the first entry rejected by [`TableBuilder::insert`].
///
/// # Example
/// ```
/// use ek_core::builder::build;
/// use ek_core::reader::MappingEntry;
/// let tables = build([MappingEntry { position: 0, codepoint: 0xac02 }]).unwrap();
/// assert_eq!(tables.encode().get(0xac02).map(|p| p.packed()), Some(0x8141));
/// ```
pub fn build<I>(entries: I) -> Result<Tables, TableError>
where
    I: IntoIterator<Item = MappingEntry>,
{
    build_from_entries(entries.into_iter().map(Ok)).map(|(tables, _)| tables)
}

/// Build from a fallible entry stream, stopping at the first error.
///
/// # Errors
/// Propagates the first error of the stream, or of [`TableBuilder::insert`].
pub fn build_from_entries<I>(entries: I) -> Result<(Tables, BuildStats), TableError>
where
    I: IntoIterator<Item = Result<MappingEntry, TableError>>,
{
    let mut builder = TableBuilder::new();
    for entry in entries {
        builder.insert(entry?)?;
    }
    Ok(builder.finish())
}

/// Parse and build from raw lines in file order.
///
/// # Errors
/// Any [`TableError`] raised by the reader or the builder.
///
/// # Example
/// ```
/// use ek_core::builder::build_from_lines;
/// let text = "# index\n0 0xAC02\n1 0xAC03\n";
/// let (tables, stats) = build_from_lines(text.lines().map(|l| Ok(l.to_owned()))).unwrap();
/// assert_eq!(tables.decode().mapped_count(), 2);
/// assert_eq!(stats.skipped, 1);
/// ```
pub fn build_from_lines<I>(lines: I) -> Result<(Tables, BuildStats), TableError>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut reader = MappingReader::new(lines);
    let (tables, mut stats) = build_from_entries(&mut reader)?;
    let read = reader.stats();
    stats.lines = read.lines;
    stats.skipped = read.skipped;
    Ok((tables, stats))
}

/// Open a line source and build from it.
///
/// # Errors
/// I/O failures of the source surface as [`TableError::Io`].
pub fn build_from_source(source: &mut dyn LineSource) -> Result<(Tables, BuildStats), TableError> {
    log::info!("Lecture du mapping depuis {}", source.describe());
    let reader = source.open()?;
    let (tables, stats) = build_from_lines(reader.lines())?;
    log::info!(
        "Tables construites : {} positions, {} code points ({} lignes ignorées)",
        tables.decode().mapped_count(),
        tables.encode().mapped_count(),
        stats.skipped
    );
    Ok((tables, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BytePair, ZONE1_SIZE};

    fn entry(position: i64, codepoint: u16) -> MappingEntry {
        MappingEntry {
            position,
            codepoint,
        }
    }

    fn text_lines(text: &str) -> impl Iterator<Item = io::Result<String>> + '_ {
        text.lines().map(|l| Ok(l.to_owned()))
    }

    #[test]
    fn first_writer_wins_in_reverse() {
        let tables = build([entry(5, 0x41), entry(9, 0x41)]).unwrap();
        assert_eq!(tables.encode().get(0x41), Some(decompose(5)));
        assert_ne!(tables.encode().get(0x41), Some(decompose(9)));
        assert_eq!(tables.decode().get(5), Some(0x41));
        assert_eq!(tables.decode().get(9), Some(0x41));
    }

    #[test]
    fn last_writer_wins_in_forward() {
        let mut builder = TableBuilder::new();
        builder.insert(entry(7, 0x41)).unwrap();
        builder.insert(entry(7, 0x42)).unwrap();
        builder.insert(entry(7, 0x42)).unwrap();
        let (tables, stats) = builder.finish();
        assert_eq!(tables.decode().get(7), Some(0x42));
        assert_eq!(stats.forward_overwrites, 1);
        assert_eq!(stats.reverse_shadowed, 1);
        assert_eq!(stats.entries, 3);
    }

    #[test]
    fn out_of_range_fails_the_build() {
        let n = POSITION_COUNT as i64;
        let err = build([entry(0, 0x41), entry(n, 0x42)]).unwrap_err();
        assert!(matches!(err, TableError::PositionOutOfRange(p) if p == n));
        let err = build([entry(-1, 0x41)]).unwrap_err();
        assert!(matches!(err, TableError::PositionOutOfRange(-1)));
        let err = build([entry(i64::from(u16::MAX) + 1, 0x41)]).unwrap_err();
        assert!(matches!(err, TableError::PositionOutOfRange(65536)));
    }

    #[test]
    fn last_valid_position_is_accepted() {
        let last = POSITION_COUNT as i64 - 1;
        let tables = build([entry(last, 0xffe6)]).unwrap();
        assert_eq!(
            tables.encode().get(0xffe6),
            Some(BytePair { lead: 0xfd, trail: 0xfe })
        );
    }

    #[test]
    fn rejected_insert_leaves_builder_untouched() {
        let mut builder = TableBuilder::new();
        assert!(builder.insert(entry(POSITION_COUNT as i64, 0x41)).is_err());
        assert!(matches!(
            builder.insert(entry(3, 0)),
            Err(TableError::ReservedCodepoint { position: 3 })
        ));
        assert_eq!(builder.stats(), BuildStats::default());
        let (tables, _) = builder.finish();
        assert_eq!(tables.decode().mapped_count(), 0);
        assert_eq!(tables.encode().mapped_count(), 0);
    }

    #[test]
    fn zone_two_pairs() {
        let tables = build([entry(ZONE1_SIZE as i64 + 95, 0x3131)]).unwrap();
        assert_eq!(
            tables.encode().get(0x3131),
            Some(BytePair { lead: 0xc8, trail: 0xa2 })
        );
    }

    #[test]
    fn comments_only_builds_empty_tables() {
        let (tables, stats) = build_from_lines(text_lines("# a\n\n   \n# b\n")).unwrap();
        assert_eq!(tables.decode().mapped_count(), 0);
        assert_eq!(tables.encode().mapped_count(), 0);
        assert_eq!(stats.lines, 4);
        assert_eq!(stats.skipped, 4);
        assert_eq!(stats.entries, 0);
    }

    #[test]
    fn malformed_line_aborts_without_reading_further() {
        let mut pulled = 0;
        let lines = ["0 0x41", "not a valid line", "1 0x42"]
            .into_iter()
            .inspect(|_| pulled += 1)
            .map(|l| Ok(l.to_owned()));
        let err = build_from_lines(lines).unwrap_err();
        assert!(matches!(err, TableError::MalformedEntry(ref l) if l == "not a valid line"));
        assert_eq!(pulled, 2);
    }

    #[test]
    fn stats_from_lines() {
        let text = "# header\n0 0x41\n1 0x41\n\n2 0x42\n";
        let (tables, stats) = build_from_lines(text_lines(text)).unwrap();
        assert_eq!(tables.decode().mapped_count(), 3);
        assert_eq!(tables.encode().mapped_count(), 2);
        assert_eq!(
            stats,
            BuildStats {
                lines: 5,
                skipped: 2,
                entries: 3,
                forward_overwrites: 0,
                reverse_shadowed: 1,
            }
        );
    }
}
