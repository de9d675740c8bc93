use thiserror::Error;

/// Errors raised while reading the canonical mapping or building the tables.
///
/// Every variant is fatal to the build that produced it: no partial tables
/// are ever handed back alongside one of these.
#[derive(Error, Debug)]
pub enum TableError {
    /// A non-blank, non-comment line is not of the form `<position> 0x<codepoint>`.
    #[error("Ligne de mapping invalide : {0:?}")]
    MalformedEntry(String),

    /// A parsed position falls outside `[0, POSITION_COUNT)`.
    #[error("Position EUC-KR hors domaine : {0}")]
    PositionOutOfRange(i64),

    /// The data maps a position to U+0000, which is the empty-slot sentinel.
    #[error("Code point réservé 0x0000 à la position {position}")]
    ReservedCodepoint {
        /// Position carrying the reserved value.
        position: u16,
    },

    /// The line source failed while producing lines.
    #[error("Erreur de lecture de la source : {0}")]
    Io(#[from] std::io::Error),

    /// A reverse-table slot does not round-trip through the forward table.
    #[error("Tables incohérentes pour U+{codepoint:04X}")]
    Inconsistent {
        /// Code point whose reverse entry is wrong.
        codepoint: u16,
    },

    /// A deserialized table does not have the expected number of slots.
    #[error("Taille de table invalide : {actual} au lieu de {expected}")]
    TableSize {
        /// Slots the table must have.
        expected: usize,
        /// Slots found.
        actual: usize,
    },
}
