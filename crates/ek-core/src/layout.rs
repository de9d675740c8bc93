//! Two-zone byte layout of EUC-KR positions.
//!
//! Zone 1 covers lead bytes `0x81..0xC7` with 178 trail bytes per row, taken
//! from three sub-alphabets (`0x41-0x5A`, `0x61-0x7A`, `0x81-0xFE`). Zone 2
//! covers lead bytes `0xC7..0xFE` with the 94 trail bytes `0xA1-0xFE`.

/// First lead byte of zone 1.
pub const LEAD_MIN: u8 = 0x81;
/// First lead byte of zone 2 (one past the last zone-1 lead).
pub const ZONE2_LEAD: u8 = 0xc7;
/// One past the last zone-2 lead byte.
pub const LEAD_END: u8 = 0xfe;
/// First trail byte in zone 2.
pub const ZONE2_TRAIL: u8 = 0xa1;

/// Lead-byte rows in zone 1.
pub const ZONE1_ROWS: usize = (ZONE2_LEAD - LEAD_MIN) as usize;
/// Logical columns per zone-1 row.
pub const ZONE1_COLS: usize = 178;
/// Lead-byte rows in zone 2.
pub const ZONE2_ROWS: usize = (LEAD_END - ZONE2_LEAD) as usize;
/// Logical columns per zone-2 row.
pub const ZONE2_COLS: usize = 94;

/// Number of positions in zone 1.
pub const ZONE1_SIZE: usize = ZONE1_ROWS * ZONE1_COLS;
/// Total count of valid positions (`N`).
pub const POSITION_COUNT: usize = ZONE1_SIZE + ZONE2_ROWS * ZONE2_COLS;
/// One slot per 16-bit code point.
pub const CODEPOINT_COUNT: usize = 1 << 16;

/// Width of each of the two lower trail sub-alphabets in zone 1.
const SUB_ALPHABET: usize = 26;
/// Offsets that land the three zone-1 column ranges on the legacy trail bytes.
const TRAIL_UPPER: u8 = 0x41;
const TRAIL_LOWER: u8 = 0x47;
const TRAIL_HIGH: u8 = 0x4d;

/// Which arithmetic a position uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    /// Lead `0x81..0xC7`, 178 columns.
    One,
    /// Lead `0xC7..0xFE`, 94 columns.
    Two,
}

/// Zone a valid position belongs to.
///
/// # Example
/// ```
/// use ek_core::layout::{zone_of, Zone, ZONE1_SIZE};
/// assert_eq!(zone_of(0), Zone::One);
/// assert_eq!(zone_of(ZONE1_SIZE as u16), Zone::Two);
/// ```
#[inline]
#[must_use]
pub fn zone_of(position: u16) -> Zone {
    if usize::from(position) < ZONE1_SIZE {
        Zone::One
    } else {
        Zone::Two
    }
}

/// A double-byte EUC-KR sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BytePair {
    /// First byte.
    pub lead: u8,
    /// Second byte.
    pub trail: u8,
}

impl BytePair {
    /// `lead << 8 | trail`, the form stored in the encode table.
    ///
    /// # Example
    /// ```
    /// use ek_core::layout::BytePair;
    /// assert_eq!(BytePair { lead: 0xb0, trail: 0xa1 }.packed(), 0xb0a1);
    /// ```
    #[inline]
    #[must_use]
    pub fn packed(self) -> u16 {
        (u16::from(self.lead) << 8) | u16::from(self.trail)
    }

    /// Split a packed value back into its bytes.
    #[inline]
    #[must_use]
    pub fn from_packed(packed: u16) -> Self {
        let [lead, trail] = packed.to_be_bytes();
        Self { lead, trail }
    }
}

/// Map a linear position to its byte pair.
///
/// The caller guarantees `position < POSITION_COUNT`; the builder checks this
/// before calling.
///
/// # Example
/// ```
/// use ek_core::layout::{decompose, BytePair};
/// assert_eq!(decompose(0), BytePair { lead: 0x81, trail: 0x41 });
/// assert_eq!(decompose(26), BytePair { lead: 0x81, trail: 0x61 });
/// ```
#[must_use]
pub fn decompose(position: u16) -> BytePair {
    debug_assert!(usize::from(position) < POSITION_COUNT);
    let position = usize::from(position);

    if position < ZONE1_SIZE {
        let lead = (position / ZONE1_COLS) as u8 + LEAD_MIN;
        let col = position % ZONE1_COLS;
        let offset = match col / SUB_ALPHABET {
            0 => TRAIL_UPPER,
            1 => TRAIL_LOWER,
            _ => TRAIL_HIGH,
        };
        BytePair {
            lead,
            trail: col as u8 + offset,
        }
    } else {
        let p2 = position - ZONE1_SIZE;
        BytePair {
            lead: (p2 / ZONE2_COLS) as u8 + ZONE2_LEAD,
            trail: (p2 % ZONE2_COLS) as u8 + ZONE2_TRAIL,
        }
    }
}

/// Inverse of [`decompose`]: position of a byte pair, if it is in the layout.
///
/// # Example
/// ```
/// use ek_core::layout::{compose, decompose};
/// assert_eq!(compose(decompose(4000)), Some(4000));
/// assert_eq!(compose(ek_core::layout::BytePair { lead: 0x81, trail: 0x5b }), None);
/// ```
#[must_use]
pub fn compose(pair: BytePair) -> Option<u16> {
    let BytePair { lead, trail } = pair;
    if (LEAD_MIN..ZONE2_LEAD).contains(&lead) {
        let col = match trail {
            0x41..=0x5a => trail - TRAIL_UPPER,
            0x61..=0x7a => trail - TRAIL_LOWER,
            0x81..=0xfe => trail - TRAIL_HIGH,
            _ => return None,
        };
        let row = usize::from(lead - LEAD_MIN);
        Some((row * ZONE1_COLS + usize::from(col)) as u16)
    } else if (ZONE2_LEAD..LEAD_END).contains(&lead) && (ZONE2_TRAIL..=0xfe).contains(&trail) {
        let row = usize::from(lead - ZONE2_LEAD);
        let col = usize::from(trail - ZONE2_TRAIL);
        Some((ZONE1_SIZE + row * ZONE2_COLS + col) as u16)
    } else {
        None
    }
}
