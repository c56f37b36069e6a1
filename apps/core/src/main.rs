// MindWise Backend Entry Point

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use mindwise_core::config::Config;
use mindwise_core::fs_manager::DataDirs;
use mindwise_core::server::{self, AppState, RouterOptions};
use mindwise_core::storage::SqliteStore;
use mindwise_core::telemetry::{self, LogFormat};
use mindwise_core::transcription::WhisperClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real environment variables win.
    dotenv::dotenv().ok();
    telemetry::init(LogFormat::from_env());

    info!("--- MINDWISE STARTUP ---");

    let config = Config::from_env().context("Failed to load configuration")?;

    let dirs = DataDirs::new(config.data_dir.clone());
    dirs.init().context("Failed to create data directories")?;

    let store = SqliteStore::open(&dirs.db_path())
        .await
        .context("Failed to open database")?;

    let whisper = WhisperClient::new(
        config.openai_base_url.clone(),
        config.openai_api_key.clone(),
        config.whisper_model.clone(),
    );

    let state = AppState::new(Arc::new(store), Arc::new(whisper), dirs.uploads_dir());
    let app = server::router(state, RouterOptions::from(&config));

    server::serve(&config.bind_address(), app).await?;
    Ok(())
}
