//! Daily Motivation desktop client.

use clap::Parser;
use daily_motivation::{App, ClientConfig, ClientSession, app_dirs, headless, logging, tui};
use std::path::PathBuf;
use tracing::info;

/// Shows a daily quote and a personalized greeting, refreshed every hour.
#[derive(Parser)]
#[command(name = "daily-motivation", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Name used in the personalized greeting.
    #[arg(long)]
    name: Option<String>,

    /// Base URL of the motivation backend.
    #[arg(long)]
    backend_url: Option<String>,

    /// Fetch once, print to stdout and exit.
    #[arg(long)]
    once: bool,

    /// Print the effective configuration and exit.
    #[arg(long)]
    print_config: bool,

    /// Write the effective configuration to the config file and exit.
    #[arg(long, conflicts_with = "print_config")]
    write_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(ClientConfig::default_config_path);
    let config = if cli.config.is_some() && !cli.write_config {
        ClientConfig::from_file(&config_path)?
    } else {
        ClientConfig::load_or_default(&config_path)?
    }
    .with_overrides(cli.name, cli.backend_url);
    config.validate()?;

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    if cli.write_config {
        config.save_to_file(&config_path)?;
        println!("wrote {}", config_path.display());
        return Ok(());
    }

    let session = ClientSession::from_config(&config);

    if cli.once {
        logging::init_stderr()?;
        let content = headless::fetch_once(&config, &session).await?;
        print!("{}", headless::format_content(&content));
        return Ok(());
    }

    let _log_guard = logging::init_file(&app_dirs::logs_dir())?;
    info!("daily-motivation v{}", env!("CARGO_PKG_VERSION"));

    let mut terminal = tui::init()?;
    let result = App::new(config, session).run(&mut terminal).await;
    tui::restore()?;
    result?;

    Ok(())
}
