use std::net::SocketAddr;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::{info, warn};

use lancenotas_server::AppState;

use crate::app::App;

pub async fn run(app: &App, bind: Option<String>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| app.config().server.bind_addr.clone());
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("Invalid bind address '{}'", bind))?;

    let directory = app
        .accounts()
        .load_directory()
        .context("Failed to load accounts")?;
    if directory.is_empty() {
        warn!("No accounts stored; every login will be rejected");
    } else {
        info!(accounts = directory.len(), "Loaded accounts");
    }

    println!("{}", format!("🚀 Lancenotas API em http://{}", addr).green());
    lancenotas_server::run(addr, AppState::new(directory)).await?;
    Ok(())
}
