mod api;
mod app;
mod config;
mod listing;
mod models;
mod navigation;
mod session;

use anyhow::Context;
use api::HttpApiClient;
use app::{Command, Marketplace, Shell};
use config::Config;
use session::SessionStore;
use std::io::Write;
use std::ops::ControlFlow;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    // RUST_LOG overrides the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    for warning in &config.warnings {
        warn!("{}", warning);
    }

    info!("🏠 Kwathu Homes");
    info!("API: {}", config.api_url);

    let api = HttpApiClient::new(&config)?;
    let session = match &config.session_path {
        Some(path) => SessionStore::open(path),
        None => SessionStore::new(),
    };

    let mut app = Marketplace::new(api, session);
    if !app.refresh().await {
        warn!("Initial fetch was superseded");
    }
    info!("Loaded {} properties", app.store().properties().len());

    let mut shell = Shell::new(app);
    println!("{}", shell.render());
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(hint) => {
                println!("{}", hint);
                continue;
            }
        };

        match shell.handle(command).await {
            ControlFlow::Continue(output) => print!("{}", output),
            ControlFlow::Break(()) => break,
        }
    }

    if let Some(user) = shell.app().session().current_user() {
        info!("Still signed in as {}", user.email);
    }
    info!("Goodbye");
    Ok(())
}
