use std::io::{self, BufRead, Cursor};
use std::time::Duration;

use ek_core::traits::LineSource;

/// Délai maximal du téléchargement de l'index.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote index, downloaded in full when opened.
///
/// # Example
/// ```no_run
/// use ek_core::build_from_source;
/// use ek_source::http::HttpSource;
/// let mut source = HttpSource::new("https://encoding.spec.whatwg.org/index-euc-kr.txt");
/// let (tables, _) = build_from_source(&mut source).unwrap();
/// ```
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    /// Source fetching `url` when opened.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    fn fetch(&self) -> reqwest::Result<Vec<u8>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()?;
        let body = client.get(&self.url).send()?.error_for_status()?.bytes()?;
        Ok(body.to_vec())
    }
}

impl LineSource for HttpSource {
    fn open(&mut self) -> io::Result<Box<dyn BufRead + '_>> {
        log::info!("Téléchargement de {}...", self.url);
        let body = self
            .fetch()
            .map_err(|e| io::Error::other(format!("{} : {e}", self.url)))?;
        log::debug!("{} octets reçus", body.len());
        Ok(Box::new(Cursor::new(body)))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
