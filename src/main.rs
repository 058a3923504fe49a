use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use pitchbook_api::{ApiState, config::ApiConfig};
use pitchbook_store::MemoryStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Load pitch data
    let store = MemoryStore::load_from_file(&config.data_file).await?;
    let state = Arc::new(ApiState::new(Arc::new(store)));

    // Start API server
    pitchbook_api::start_server(config, state).await?;

    Ok(())
}
