use anyhow::Context;

use crate::config::AppConfig;
use crate::database::DatabaseManager;

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    let db = DatabaseManager::connect(&config.database)
        .await
        .context("connecting to PostgreSQL")?;
    db.migrate().await.context("running migrations")?;
    db.close().await;

    println!("Migrations applied");
    Ok(())
}
