mod bootstrap;
mod cli;

use anyhow::Result;
use clap::Parser;
use cs_app::App;
use cs_infra::fs::AppDataPaths;
use tracing::{debug, info};

use crate::bootstrap::{default_config_path, load_config, wire_dependencies};
use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = load_config(&config_path)?;
    let paths = AppDataPaths::resolve(config.data_dir.as_deref())?;

    let logs_dir = config.log.file.then(|| paths.logs_dir());
    bootstrap::tracing::init_tracing_subscriber(logs_dir.as_deref())?;
    debug!(config = %config_path.display(), "Configuration loaded");

    let deps = wire_dependencies(&config, &paths)?;
    let app = App::start(deps).await?;

    let purged = app.purge_expired_entries().execute().await;
    info!(
        purged = purged.len(),
        entries = app.history.entries().await.len(),
        "Clipshelf started"
    );

    cli::run(&app, cli.command, config.poll_interval()).await
}
