mod draft_repository;
pub mod table;

pub use draft_repository::*;

use mealsub_shared::Result;
use sqlx::SqlitePool;

/// Apply the schema migrations.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(anyhow::Error::from)?;
    Ok(())
}
