use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Canonical WHATWG index for EUC-KR.
pub const DEFAULT_URL: &str = "https://encoding.spec.whatwg.org/index-euc-kr.txt";

/// Output encoding of the generated tables.
///
/// # Example
/// ```
/// use ek_core::config::OutputFormat;
/// assert!(matches!(OutputFormat::default(), OutputFormat::Rust));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum OutputFormat {
    /// Two `pub static` arrays in Rust source.
    #[default]
    Rust,
    /// `bincode` dump of the tables.
    Bincode,
    /// Sparse JSON pairs.
    Json,
}

/// Generator configuration, loaded from TOML.
///
/// # Example
/// ```
/// use ek_core::config::GenConfig;
/// let config = GenConfig::default();
/// assert_eq!(config.decode_name, "EUC_KR_DECODE");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct GenConfig {
    // === Source ===
    /// Local index file. Takes priority over `source_url`.
    pub source_path: Option<PathBuf>,
    /// Remote index, fetched when no local path is given.
    pub source_url: String,

    // === Sortie ===
    /// Output file. `None` = stdout.
    pub output_path: Option<PathBuf>,
    /// Output encoding.
    pub format: OutputFormat,
    /// Identifier of the decode array in Rust output.
    pub decode_name: String,
    /// Identifier of the encode array in Rust output.
    pub encode_name: String,
    /// Round-trip check of the tables before writing.
    pub verify: bool,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            source_path: None,
            source_url: DEFAULT_URL.to_string(),
            output_path: None,
            format: OutputFormat::Rust,
            decode_name: "EUC_KR_DECODE".to_string(),
            encode_name: "EUC_KR_ENCODE".to_string(),
            verify: false,
        }
    }
}

impl GenConfig {
    /// Reject table names that cannot be Rust identifiers.
    ///
    /// # Errors
    /// Returns an error naming the offending field.
    pub fn validate(&self) -> Result<()> {
        for (field, name) in [
            ("decode_name", &self.decode_name),
            ("encode_name", &self.encode_name),
        ] {
            if !is_identifier(name) {
                anyhow::bail!("{field} invalide : {name:?} n'est pas un identifiant");
            }
        }
        if self.decode_name == self.encode_name {
            anyhow::bail!("decode_name et encode_name doivent différer");
        }
        if self.source_path.is_none() && self.source_url.trim().is_empty() {
            anyhow::bail!("Aucune source : ni source.path ni source.url");
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && name != "_"
}

/// Structure TOML intermédiaire, toutes les sections optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    source: Option<SourceSection>,
    output: Option<OutputSection>,
}

#[derive(Deserialize)]
struct SourceSection {
    path: Option<PathBuf>,
    url: Option<String>,
}

#[derive(Deserialize)]
struct OutputSection {
    path: Option<PathBuf>,
    format: Option<OutputFormat>,
    decode_name: Option<String>,
    encode_name: Option<String>,
    verify: Option<bool>,
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the text is not valid for the config schema.
///
/// # Example
/// ```
/// use ek_core::config::{parse_config, OutputFormat};
/// let config = parse_config("[output]\nformat = \"Json\"\n").unwrap();
/// assert_eq!(config.format, OutputFormat::Json);
/// ```
pub fn parse_config(content: &str) -> Result<GenConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;
    let mut config = GenConfig::default();

    if let Some(s) = file.source {
        if let Some(v) = s.path {
            config.source_path = Some(v);
        }
        if let Some(v) = s.url {
            config.source_url = v;
        }
    }
    if let Some(o) = file.output {
        if let Some(v) = o.path {
            config.output_path = Some(v);
        }
        if let Some(v) = o.format {
            config.format = v;
        }
        if let Some(v) = o.decode_name {
            config.decode_name = v;
        }
        if let Some(v) = o.encode_name {
            config.encode_name = v;
        }
        if let Some(v) = o.verify {
            config.verify = v;
        }
    }
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use ek_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("maketables.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<GenConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Configuration invalide dans {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), GenConfig::default());
    }

    #[test]
    fn sections_override_defaults() {
        let config = parse_config(
            r#"
[source]
path = "data/index-euc-kr.txt"

[output]
path = "src/tables.rs"
format = "Bincode"
decode_name = "DECODE"
verify = true
"#,
        )
        .unwrap();
        assert_eq!(
            config.source_path.as_deref(),
            Some(Path::new("data/index-euc-kr.txt"))
        );
        assert_eq!(config.source_url, DEFAULT_URL);
        assert_eq!(config.format, OutputFormat::Bincode);
        assert_eq!(config.decode_name, "DECODE");
        assert_eq!(config.encode_name, "EUC_KR_ENCODE");
        assert!(config.verify);
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(parse_config("[output]\nformat = \"Yaml\"\n").is_err());
    }

    #[test]
    fn validate_checks_identifiers() {
        let mut config = GenConfig::default();
        for bad in ["", "1ABC", "A-B", "_", "A B"] {
            config.decode_name = bad.to_string();
            assert!(config.validate().is_err(), "{bad:?}");
        }
        config.decode_name = "_DECODE2".to_string();
        assert!(config.validate().is_ok());
        config.encode_name = "_DECODE2".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_requires_a_source() {
        let config = GenConfig {
            source_url: "  ".to_string(),
            ..GenConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maketables.toml");
        std::fs::write(&path, "[source]\nurl = \"http://localhost/index.txt\"\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.source_url, "http://localhost/index.txt");
    }
}
