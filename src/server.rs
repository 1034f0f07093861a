use crate::config::Config;
use crate::core_network::network;
use crate::helpers::log_config;
use crate::receiver::DataReceiver;
use anyhow::Result;
use log::{error, info};
use std::sync::Arc;

/// Runs the FTP server with the provided configuration.
///
/// Every upload ends up in `receiver`. Only returns on a startup failure.
pub async fn run(config: Config, receiver: Arc<dyn DataReceiver>) -> Result<()> {
    info!("Starting server with config:");
    log_config(&config);

    if let Err(e) = network::start_server(Arc::new(config), receiver).await {
        error!("Failed to start server: {:#}", e);
        return Err(e);
    }

    Ok(())
}
