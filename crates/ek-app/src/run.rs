use std::path::Path;

use anyhow::{Context, Result};
use ek_core::builder::{BuildStats, build_from_source};
use ek_core::config::{GenConfig, load_config};

use crate::cli::Cli;

/// Resolve config: --config if present, defaults otherwise, then CLI overrides.
///
/// # Errors
/// Returns an error if the config file exists but is invalid, or the merged
/// config fails validation.
pub fn resolve_config(cli: &Cli) -> Result<GenConfig> {
    let mut config = if cli.config.exists() {
        load_config(&cli.config)?
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        GenConfig::default()
    };
    cli.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

/// Build the tables described by `config` and write them unless `check_only`.
///
/// # Errors
/// Any source, build, verification or output failure. Nothing is written
/// when the build or the verification fails.
pub fn generate(config: &GenConfig, check_only: bool) -> Result<BuildStats> {
    let mut source = ek_source::open_source(config)?;
    let label = source.describe();

    let (tables, stats) = build_from_source(source.as_mut())
        .with_context(|| format!("Construction des tables depuis {label} échouée"))?;
    if stats.forward_overwrites > 0 {
        log::warn!(
            "{} position(s) définie(s) plusieurs fois, la dernière valeur est conservée",
            stats.forward_overwrites
        );
    }
    log::info!(
        "{} entrées, {} code points partagés (premier gardé)",
        stats.entries,
        stats.reverse_shadowed
    );

    if config.verify {
        tables.verify().context("Vérification aller-retour échouée")?;
        log::info!("Vérification aller-retour OK");
    }

    if check_only {
        log::info!("--check : aucune sortie écrite");
        return Ok(stats);
    }

    let emitter = ek_export::emitter_for(config, &label);
    ek_export::write_tables(&tables, emitter.as_ref(), config.output_path.as_deref())?;
    Ok(stats)
}

/// Entry point shared by `main` and the tests.
///
/// # Errors
/// See [`resolve_config`] and [`generate`].
pub fn run(cli: &Cli) -> Result<BuildStats> {
    let config = resolve_config(cli)?;
    if !cli.check {
        log::debug!("Sortie : {}", display_or_stdout(config.output_path.as_deref()));
    }
    generate(&config, cli.check)
}

fn display_or_stdout(path: Option<&Path>) -> String {
    path.map_or_else(|| "<stdout>".to_string(), |p| p.display().to_string())
}
