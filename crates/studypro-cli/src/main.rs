use clap::Parser;
use eyre::Result;

use studypro_cli::cli::{Cli, Commands};
use studypro_cli::commands;
use studypro_cli::config::{default_config_path, default_data_path, load_config};
use studypro_cli::state::AppState;

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = load_config(&config_path)?;

    if let Commands::Config(command) = &cli.command {
        return commands::config(command, &config_path, &config);
    }

    let data_path = match cli.data {
        Some(path) => path,
        None => default_data_path()?,
    };
    let mut state = AppState::open(config, &data_path)?;

    commands::run(&mut state, cli.command)
}
