use std::io::{self, BufRead, Write};

use crate::table::Tables;

/// Yields the canonical mapping as text lines, in file order.
///
/// Implemented by : `FileSource`, `TextSource`, `HttpSource`.
///
/// # Example
/// ```
/// use ek_core::traits::LineSource;
/// use std::io::BufRead;
///
/// struct Empty;
/// impl LineSource for Empty {
///     fn open(&mut self) -> std::io::Result<Box<dyn BufRead + '_>> {
///         Ok(Box::new(std::io::empty()))
///     }
///     fn describe(&self) -> String { "empty".into() }
/// }
/// ```
pub trait LineSource {
    /// Open the source. Fetching or opening happens here, before any line
    /// is parsed.
    ///
    /// # Errors
    /// Any failure of the underlying medium.
    fn open(&mut self) -> io::Result<Box<dyn BufRead + '_>>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// Writes built tables in some persisted form.
///
/// Emitters dump values exactly; they never re-order the reverse table.
///
/// # Example
/// ```
/// use ek_core::traits::TableEmitter;
/// use ek_core::table::Tables;
///
/// struct Count;
/// impl TableEmitter for Count {
///     fn emit(&self, tables: &Tables, out: &mut dyn std::io::Write) -> anyhow::Result<()> {
///         writeln!(out, "{}", tables.decode().mapped_count())?;
///         Ok(())
///     }
///     fn name(&self) -> &'static str { "count" }
/// }
/// ```
pub trait TableEmitter {
    /// Serialize both tables into `out`.
    ///
    /// # Errors
    /// Write or serialization failures.
    fn emit(&self, tables: &Tables, out: &mut dyn Write) -> anyhow::Result<()>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
