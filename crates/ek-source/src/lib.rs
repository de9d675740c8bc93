/// Line sources for the canonical EUC-KR index (file, text, HTTP).

pub mod file;
pub mod text;

#[cfg(feature = "fetch")]
pub mod http;

use ek_core::config::GenConfig;
use ek_core::traits::LineSource;

/// Pick the source described by the config: a local path wins over the URL.
///
/// # Errors
/// Returns an error if only a URL is configured and the `fetch` feature is off.
///
/// # Example
/// ```
/// use ek_core::config::GenConfig;
/// use ek_core::traits::LineSource;
/// use ek_source::open_source;
/// let config = GenConfig { source_path: Some("index-euc-kr.txt".into()), ..GenConfig::default() };
/// let source = open_source(&config).unwrap();
/// assert!(source.describe().contains("index-euc-kr.txt"));
/// ```
pub fn open_source(config: &GenConfig) -> anyhow::Result<Box<dyn LineSource>> {
    if let Some(path) = &config.source_path {
        return Ok(Box::new(file::FileSource::new(path)));
    }
    open_url(&config.source_url)
}

#[cfg(feature = "fetch")]
fn open_url(url: &str) -> anyhow::Result<Box<dyn LineSource>> {
    Ok(Box::new(http::HttpSource::new(url)))
}

#[cfg(not(feature = "fetch"))]
fn open_url(url: &str) -> anyhow::Result<Box<dyn LineSource>> {
    anyhow::bail!(
        "Source distante {url} non supportée : recompiler avec --features fetch, ou fournir un fichier local."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_path_wins() {
        let config = GenConfig {
            source_path: Some("local.txt".into()),
            ..GenConfig::default()
        };
        let source = open_source(&config).unwrap();
        assert!(source.describe().contains("local.txt"));
    }

    #[cfg(not(feature = "fetch"))]
    #[test]
    fn url_without_fetch_is_an_error() {
        let err = open_source(&GenConfig::default()).err().unwrap();
        assert!(err.to_string().contains("fetch"));
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn url_with_fetch_is_http() {
        let source = open_source(&GenConfig::default()).unwrap();
        assert!(source.describe().starts_with("https://"));
    }
}
