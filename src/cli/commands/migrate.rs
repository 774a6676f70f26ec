use anyhow::{Context, Result};

use crate::database::manager::DatabaseManager;

pub async fn run() -> Result<()> {
    DatabaseManager::migrate().await.context("failed to apply migrations")?;
    println!("Migrations applied");
    Ok(())
}
