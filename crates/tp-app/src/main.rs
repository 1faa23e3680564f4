use anyhow::Result;
use clap::Parser;
use tp_core::config::MosaicConfig;

pub mod cli;
pub mod pipeline;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .init();

    // 3. Valider les arguments
    cli.validate()?;

    // 4. Charger la config, puis appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config)?;
    log::debug!("config effective : {config:?}");

    // 5. Rendu
    pipeline::run(&cli, &config)
}

/// Config file if present, defaults otherwise.
fn resolve_config(cli: &cli::Cli) -> Result<MosaicConfig> {
    if cli.config.exists() {
        tp_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(MosaicConfig::default())
    }
}
