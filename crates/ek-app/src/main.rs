use anyhow::Result;
use clap::Parser;
use ek_app::{cli, run};

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Construire et écrire
    let stats = run::run(&cli)?;
    log::info!(
        "Terminé : {} lignes lues, {} entrées, {} ignorées",
        stats.lines,
        stats.entries,
        stats.skipped
    );
    Ok(())
}
