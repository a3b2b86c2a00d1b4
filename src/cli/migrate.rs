use crate::{Config, Database};
use anyhow::Result;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::open_with_pool_size(&config.database.path, config.database.pool_size)?;

    db.migrate()?;
    tracing::info!("Database is up to date");

    Ok(())
}
