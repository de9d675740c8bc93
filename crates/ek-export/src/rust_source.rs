use std::io::Write;

use anyhow::Result;
use ek_core::table::Tables;
use ek_core::traits::TableEmitter;

/// Valeurs par ligne dans les tableaux générés.
const PER_LINE: usize = 8;

/// Generates a Rust module with the two tables as dense `pub static` arrays.
///
/// # Example
/// ```
/// use ek_core::builder::build;
/// use ek_core::reader::MappingEntry;
/// use ek_core::traits::TableEmitter;
/// use ek_export::rust_source::RustEmitter;
///
/// let tables = build([MappingEntry { position: 0, codepoint: 0xac02 }]).unwrap();
/// let mut out = Vec::new();
/// RustEmitter::new("DECODE", "ENCODE", "fixture").emit(&tables, &mut out).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.contains("pub static DECODE: [u16; 17630] = ["));
/// assert!(text.contains("    0xAC02, 0x0000,"));
/// ```
pub struct RustEmitter {
    decode_name: String,
    encode_name: String,
    source: String,
}

impl RustEmitter {
    /// Emitter naming the arrays `decode_name` and `encode_name`.
    pub fn new(decode_name: &str, encode_name: &str, source: &str) -> Self {
        Self {
            decode_name: decode_name.to_string(),
            encode_name: encode_name.to_string(),
            source: source.to_string(),
        }
    }
}

fn write_array(out: &mut dyn Write, name: &str, slots: &[u16]) -> Result<()> {
    writeln!(out, "#[rustfmt::skip]")?;
    writeln!(out, "pub static {name}: [u16; {}] = [", slots.len())?;
    for chunk in slots.chunks(PER_LINE) {
        write!(out, "   ")?;
        for v in chunk {
            write!(out, " 0x{v:04X},")?;
        }
        writeln!(out)?;
    }
    writeln!(out, "];")?;
    Ok(())
}

impl TableEmitter for RustEmitter {
    fn emit(&self, tables: &Tables, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "// generated by euckr-maketables; DO NOT EDIT")?;
        writeln!(out, "// source: {}", self.source)?;
        writeln!(out)?;

        writeln!(
            out,
            "/// Decoding table from EUC-KR position to Unicode (`0` = unmapped)."
        )?;
        write_array(out, &self.decode_name, tables.decode().as_slice())?;
        writeln!(out)?;

        writeln!(
            out,
            "/// Encoding table from Unicode to the EUC-KR byte pair `lead << 8 | trail` (`0` = unmapped)."
        )?;
        write_array(out, &self.encode_name, tables.encode().as_slice())?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "rust"
    }
}
