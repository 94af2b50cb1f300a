//! # LibRoster — volunteer shift scheduling for a community library
//!
//! Volunteers propose dates, managers approve or assign them, and the roster
//! lives in a Google spreadsheet (or in memory during development).
//!
//! Usage:
//!   libroster                     # Start the API server (default port 3000)
//!   libroster --port 8080         # Custom port
//!   libroster --config ./dev.toml # Custom config file

use anyhow::Result;
use clap::Parser;
use libroster_core::RosterConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "libroster",
    version,
    about = "📚 LibRoster — volunteer shift scheduling for a community library"
)]
struct Cli {
    /// Path to config file (default: ~/.libroster/config.toml)
    #[arg(long)]
    config: Option<String>,

    /// Bind host override
    #[arg(long)]
    host: Option<String>,

    /// Bind port override
    #[arg(short, long)]
    port: Option<u16>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "libroster=debug,libroster_gateway=debug,libroster_store=debug,tower_http=debug"
    } else {
        "libroster=info,libroster_gateway=info,libroster_store=info,libroster_notify=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            let path = shellexpand::tilde(path).to_string();
            RosterConfig::load_from(std::path::Path::new(&path))?
        }
        None => RosterConfig::load()?,
    };

    if let Some(host) = cli.host {
        config.gateway.host = host;
    }
    if let Some(port) = cli.port {
        config.gateway.port = port;
    }

    // Secrets may come from the environment instead of the config file.
    if let Ok(token) = std::env::var("LIBROSTER_SHEETS_TOKEN") {
        config.sheets.api_token = token;
    }
    if let Ok(secret) = std::env::var("LIBROSTER_CRON_SECRET") {
        config.gateway.cron_secret = secret;
    }
    if let Ok(password) = std::env::var("LIBROSTER_SMTP_PASSWORD") {
        config.smtp.password = password;
    }

    println!("📚 LibRoster v{}", env!("CARGO_PKG_VERSION"));
    println!(
        "   🌐 API:     http://{}:{}",
        config.gateway.host, config.gateway.port
    );
    println!(
        "   🗂️ Backend: {}",
        if config.sheets.is_configured() {
            "Google Sheets"
        } else {
            "in-memory (development)"
        }
    );
    println!(
        "   📧 SMTP:    {}",
        if config.smtp.enabled { "enabled" } else { "disabled" }
    );
    println!();

    libroster_gateway::start(&config).await
}
