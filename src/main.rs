use anyhow::Result;
use chrono::Local;
use clap::Parser;
use env_logger::{Builder, Env};
use ftpsink::config::Config;
use ftpsink::core_cli::Cli;
use ftpsink::receiver::LogReceiver;
use ftpsink::server;
use log::info;
use std::io::Write;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Cli::parse();

    // Initialize the logger with a custom format
    let default_filter = if args.verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => {
            info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    // Override listen port from CLI if provided
    if let Some(listen_port) = args.listen_port {
        config.server.listen_port = listen_port;
    }

    server::run(config, Arc::new(LogReceiver)).await
}
