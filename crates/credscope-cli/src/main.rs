mod cli;
mod clipboard;
mod commands;
mod config;
mod error;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use clipboard::SystemClipboard;
use credscope_client::HttpRecordsApi;
use credscope_core::{NoticeBuffer, Session};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::CliConfig::load();

    // Configure logging: always write to file (stderr belongs to the TUI)
    let log_dir = dirs::data_dir()
        .context("could not resolve the platform data directory")?
        .join("credscope")
        .join("logs");
    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "credscope.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    let server_url = config.server_url(cli.server.as_deref());
    let api = match HttpRecordsApi::new(&server_url) {
        Ok(api) => Arc::new(api),
        Err(err) => error::handle_error(err.into()),
    };

    if let Some(Commands::Upload(args)) = &cli.command {
        if let Err(err) = commands::upload::execute(api.as_ref(), args).await {
            error::handle_error(err);
        }
        return Ok(());
    }

    let notices = NoticeBuffer::new();
    let session = Session::new(
        api,
        Arc::new(notices.clone()),
        Box::new(SystemClipboard),
        config.page_size(),
    );
    tui::run(session, notices, server_url).await
}
