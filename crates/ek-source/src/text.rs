use std::io::{self, BufRead, Cursor};

use ek_core::traits::LineSource;

/// Index held in memory (embedded constant, test fixture, already-fetched body).
///
/// # Example
/// ```
/// use ek_core::build_from_source;
/// use ek_source::text::TextSource;
/// let mut source = TextSource::new("0 0xAC02\n");
/// let (tables, _) = build_from_source(&mut source).unwrap();
/// assert_eq!(tables.decode().get(0), Some(0xac02));
/// ```
pub struct TextSource {
    label: String,
    text: String,
}

impl TextSource {
    /// Wrap `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            label: "<mémoire>".to_string(),
            text: text.into(),
        }
    }

    /// Name shown in logs.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl LineSource for TextSource {
    fn open(&mut self) -> io::Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(Cursor::new(self.text.as_bytes())))
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}
