use std::io::{Read, Write};

use anyhow::{Context, Result};
use ek_core::table::Tables;
use ek_core::traits::TableEmitter;

/// Dense `bincode` dump of both tables.
pub struct BincodeEmitter;

impl TableEmitter for BincodeEmitter {
    fn emit(&self, tables: &Tables, out: &mut dyn Write) -> Result<()> {
        bincode::serialize_into(out, tables).context("Sérialisation bincode impossible")
    }

    fn name(&self) -> &'static str {
        "bincode"
    }
}

/// Load tables written by [`BincodeEmitter`].
///
/// Table sizes are checked while decoding.
///
/// # Errors
/// Returns an error if the stream is truncated or a table has the wrong size.
///
/// # Example
/// ```
/// use ek_core::builder::build;
/// use ek_core::reader::MappingEntry;
/// use ek_core::traits::TableEmitter;
/// use ek_export::binary::{BincodeEmitter, read_bincode};
///
/// let tables = build([MappingEntry { position: 3, codepoint: 0x3000 }]).unwrap();
/// let mut out = Vec::new();
/// BincodeEmitter.emit(&tables, &mut out).unwrap();
/// assert_eq!(read_bincode(out.as_slice()).unwrap(), tables);
/// ```
pub fn read_bincode(reader: impl Read) -> Result<Tables> {
    bincode::deserialize_from(reader).context("Lecture bincode impossible")
}
