use std::{error::Error, path::Path, sync::Arc};

use bloglist_db::{
    bloglist_engine::{config::Config, storage_core::BlogListStorage, types::StoreError},
    bloglist_gateway::gateway::BlogListGateway,
};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn Error>> {
    // a missing .env file is not an error
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer().compact())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env()?,
        )
        .try_init()?;

    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded environment file");
    }

    let config = load_config()?;
    info!(?config, "Starting blog list service");

    let storage = BlogListStorage::new(&config.db_path, &config)?;
    let gateway = BlogListGateway::new(&config.address(), Arc::new(storage), config);
    gateway.run()
}

/// Reads `config.bloglist.json` from the working directory if present, then
/// applies `BLOGLIST_*` environment overrides.
fn load_config() -> Result<Config, StoreError> {
    match Config::from_file(Path::new(Config::CONFIG_FILE_NAME)) {
        Ok(config) => {
            info!(file = Config::CONFIG_FILE_NAME, "Loaded config file");
            Ok(config.overlay(|key| std::env::var(key).ok()))
        }
        Err(StoreError::ConfigFileNotFound) => {
            info!("No config file found, using defaults");
            Ok(Config::from_env())
        }
        Err(e) => Err(e),
    }
}
