#![cfg(not(tarpaulin_include))]

use clap::Parser;
use recipe_browser::app;
use recipe_browser::config::{Config, ConfigArgs};

/// Recipe browser web server
#[derive(Parser)]
#[command(name = "website")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
}

/// Main entry point for the web application
///
/// Loads the recipe sheet in the background and serves the browser page
/// at the configured address (`127.0.0.1:3000` by default).
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::resolve(&cli.config);
    log::debug!("configuration: {}", serde_json::to_string(&config)?);

    app::run(config).await
}
