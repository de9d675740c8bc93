use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use ek_core::config::{GenConfig, OutputFormat};

/// euckr-maketables — generate the EUC-KR decode/encode tables.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Local copy of index-euc-kr.txt (takes priority over --url).
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Remote index URL. Requires --features fetch.
    #[arg(long)]
    pub url: Option<String>,

    /// Output file. Défaut : stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Check that both tables round-trip before writing.
    #[arg(long, default_value_t = false)]
    pub verify: bool,

    /// Build (and verify) only, write nothing.
    #[arg(long, default_value_t = false)]
    pub check: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// CLI spelling of [`OutputFormat`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Rust source with two static arrays.
    Rust,
    /// bincode dump.
    Bincode,
    /// Sparse JSON.
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Rust => Self::Rust,
            FormatArg::Bincode => Self::Bincode,
            FormatArg::Json => Self::Json,
        }
    }
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    ///
    /// # Example
    /// ```
    /// use clap::Parser;
    /// use ek_app::cli::Cli;
    /// use ek_core::config::GenConfig;
    /// let cli = Cli::parse_from(["euckr-maketables", "--input", "index.txt", "--verify"]);
    /// let mut config = GenConfig::default();
    /// cli.apply_overrides(&mut config);
    /// assert!(config.verify);
    /// ```
    pub fn apply_overrides(&self, config: &mut GenConfig) {
        if let Some(ref url) = self.url {
            config.source_url.clone_from(url);
            config.source_path = None;
        }
        if let Some(ref input) = self.input {
            config.source_path = Some(input.clone());
        }
        if let Some(ref output) = self.output {
            config.output_path = Some(output.clone());
        }
        if let Some(format) = self.format {
            config.format = format.into();
        }
        if self.verify {
            config.verify = true;
        }
    }
}
