use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::layout::{BytePair, CODEPOINT_COUNT, POSITION_COUNT, compose};

/// Sentinel stored in empty slots of both tables.
pub const UNMAPPED: u16 = 0;

/// Shared storage and accessors for the two fixed-size tables.
macro_rules! fixed_table {
    ($name:ident, $len:expr) => {
        impl $name {
            /// Number of slots.
            pub const LEN: usize = $len;

            pub(crate) fn empty() -> Self {
                Self {
                    slots: vec![UNMAPPED; $len].into_boxed_slice(),
                }
            }

            pub(crate) fn slot_mut(&mut self, index: usize) -> &mut u16 {
                &mut self.slots[index]
            }

            /// Raw slots, `0` meaning empty.
            #[must_use]
            pub fn as_slice(&self) -> &[u16] {
                &self.slots
            }

            /// Non-empty slots as `(index, value)`, in index order.
            pub fn iter_mapped(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
                self.slots
                    .iter()
                    .enumerate()
                    .filter(|&(_, &v)| v != UNMAPPED)
                    .map(|(i, &v)| (i as u16, v))
            }

            /// Count of non-empty slots.
            #[must_use]
            pub fn mapped_count(&self) -> usize {
                self.slots.iter().filter(|&&v| v != UNMAPPED).count()
            }
        }

        impl TryFrom<Vec<u16>> for $name {
            type Error = TableError;

            fn try_from(slots: Vec<u16>) -> Result<Self, Self::Error> {
                if slots.len() != $len {
                    return Err(TableError::TableSize {
                        expected: $len,
                        actual: slots.len(),
                    });
                }
                Ok(Self {
                    slots: slots.into_boxed_slice(),
                })
            }
        }

        impl From<$name> for Vec<u16> {
            fn from(table: $name) -> Self {
                table.slots.into_vec()
            }
        }
    };
}

/// Forward table: position → code point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u16>", into = "Vec<u16>")]
pub struct DecodeTable {
    slots: Box<[u16]>,
}

fixed_table!(DecodeTable, POSITION_COUNT);

impl DecodeTable {
    /// Code point at `position`, `None` if unmapped or out of range.
    ///
    /// # Example
    /// ```
    /// use ek_core::builder::build;
    /// use ek_core::reader::MappingEntry;
    /// let tables = build([MappingEntry { position: 0, codepoint: 0xac02 }]).unwrap();
    /// assert_eq!(tables.decode().get(0), Some(0xac02));
    /// assert_eq!(tables.decode().get(1), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn get(&self, position: usize) -> Option<u16> {
        self.slots.get(position).copied().filter(|&v| v != UNMAPPED)
    }
}

/// Reverse table: code point → packed canonical byte pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u16>", into = "Vec<u16>")]
pub struct EncodeTable {
    slots: Box<[u16]>,
}

fixed_table!(EncodeTable, CODEPOINT_COUNT);

impl EncodeTable {
    /// Canonical byte pair for `codepoint`, if it is encodable.
    #[inline]
    #[must_use]
    pub fn get(&self, codepoint: u16) -> Option<BytePair> {
        let packed = self.slots[usize::from(codepoint)];
        (packed != UNMAPPED).then(|| BytePair::from_packed(packed))
    }
}

/// The pair of tables produced by one build. Read-only once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tables {
    decode: DecodeTable,
    encode: EncodeTable,
}

impl Tables {
    pub(crate) fn new(decode: DecodeTable, encode: EncodeTable) -> Self {
        Self { decode, encode }
    }

    /// Forward table.
    #[must_use]
    pub fn decode(&self) -> &DecodeTable {
        &self.decode
    }

    /// Reverse table.
    #[must_use]
    pub fn encode(&self) -> &EncodeTable {
        &self.encode
    }

    /// Look up a byte pair through the forward table.
    #[must_use]
    pub fn decode_pair(&self, pair: BytePair) -> Option<u16> {
        compose(pair).and_then(|p| self.decode.get(usize::from(p)))
    }

    /// Check that both tables agree with each other.
    ///
    /// Every reverse entry must decode back to its code point, and every
    /// mapped code point must have a reverse entry. Data that maps one
    /// position twice to different code points fails the first check.
    ///
    /// # Errors
    /// Returns [`TableError::Inconsistent`] for the first code point that
    /// does not round-trip.
    pub fn verify(&self) -> Result<(), TableError> {
        for (codepoint, packed) in self.encode.iter_mapped() {
            if self.decode_pair(BytePair::from_packed(packed)) != Some(codepoint) {
                return Err(TableError::Inconsistent { codepoint });
            }
        }
        for (_, codepoint) in self.decode.iter_mapped() {
            if self.encode.get(codepoint).is_none() {
                return Err(TableError::Inconsistent { codepoint });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use crate::layout::decompose;
    use crate::reader::MappingEntry;

    fn entry(position: i64, codepoint: u16) -> MappingEntry {
        MappingEntry {
            position,
            codepoint,
        }
    }

    #[test]
    fn empty_tables_are_all_unmapped() {
        let tables = build(Vec::<MappingEntry>::new()).unwrap();
        assert_eq!(tables.decode().as_slice().len(), POSITION_COUNT);
        assert_eq!(tables.encode().as_slice().len(), CODEPOINT_COUNT);
        assert_eq!(tables.decode().mapped_count(), 0);
        assert_eq!(tables.encode().mapped_count(), 0);
        assert!(tables.verify().is_ok());
    }

    #[test]
    fn decode_pair_follows_layout() {
        let tables = build([entry(12460, 0xac00)]).unwrap();
        let pair = BytePair { lead: 0xc7, trail: 0xa1 };
        assert_eq!(tables.decode_pair(pair), Some(0xac00));
        assert_eq!(tables.encode().get(0xac00), Some(pair));
        assert_eq!(tables.decode_pair(BytePair { lead: 0x81, trail: 0x5b }), None);
    }

    #[test]
    fn verify_accepts_shadowed_duplicates() {
        let tables = build([entry(5, 0x41), entry(9, 0x41)]).unwrap();
        assert!(tables.verify().is_ok());
    }

    #[test]
    fn verify_flags_overwritten_position() {
        let tables = build([entry(5, 0x41), entry(5, 0x42)]).unwrap();
        assert_eq!(tables.encode().get(0x41), Some(decompose(5)));
        assert!(matches!(
            tables.verify(),
            Err(TableError::Inconsistent { codepoint: 0x41 })
        ));
    }

    #[test]
    fn size_is_checked_on_conversion() {
        let err = DecodeTable::try_from(vec![0u16; 3]).unwrap_err();
        assert!(matches!(
            err,
            TableError::TableSize {
                expected: POSITION_COUNT,
                actual: 3
            }
        ));
        assert!(EncodeTable::try_from(vec![0u16; CODEPOINT_COUNT]).is_ok());
    }

    #[test]
    fn iter_mapped_is_index_ordered() {
        let tables = build([entry(40, 0x30), entry(3, 0x31), entry(7, 0x32)]).unwrap();
        let decoded: Vec<_> = tables.decode().iter_mapped().collect();
        assert_eq!(decoded, vec![(3, 0x31), (7, 0x32), (40, 0x30)]);
        let encoded: Vec<_> = tables.encode().iter_mapped().map(|(c, _)| c).collect();
        assert_eq!(encoded, vec![0x30, 0x31, 0x32]);
    }
}
