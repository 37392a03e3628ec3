use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};

use filedepot::file::{LocalBlobStore, ThumbnailWorker};
use filedepot::{cache, AppState, Config, Database, WebServer};

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let mut config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };
    config.apply_env_overrides();

    // Initialize logging
    if let Err(e) = filedepot::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        filedepot::logging::init_console_only(&config.logging.level);
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> filedepot::Result<()> {
    config.validate()?;

    info!("filedepot - multi-user file storage API");

    let db = Arc::new(Database::open(&config.database.path).await?);
    let cache = cache::connect(&config.cache)?;
    if !cache.is_alive().await {
        error!("Cache backend is not reachable, sessions will fail until it is");
    }

    let store = LocalBlobStore::new(&config.storage.folder_path);
    info!("Blob storage at {}", config.storage.folder_path);

    let mut state = AppState::new(db.clone(), cache, store.clone());
    if config.storage.thumbnails {
        let (worker, sender) = ThumbnailWorker::new(db, store);
        tokio::spawn(worker.run());
        state = state.with_thumbnails(sender);
    }

    let server = WebServer::new(&config.server, state, config.web.cors_origins.clone())?;
    server.run().await?;

    Ok(())
}
