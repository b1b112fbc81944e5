use std::sync::Arc;

use anyhow::{Context, Result};
use zipcast_client::BackendClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    zipcast_core::init()?;

    let (config, _validation) = zipcast_core::Config::load_validated()?;
    let client = BackendClient::new(&config.backend.base_url)
        .context("Failed to create backend client")?;
    tracing::info!("Using prediction backend at {}", client.base_url());

    zipcast_ui::run(Arc::new(client)).await?;

    tracing::info!("Zipcast shut down");
    Ok(())
}
