use async_trait::async_trait;
use mealsub_shared::Result;
use mealsub_wizard::{DraftRecord, DraftRepository};
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;

use crate::table::Draft;

/// Durable draft storage: one JSON record per storage key in SQLite. The
/// `saved_at` column mirrors the record's own timestamp so the table can be
/// inspected without decoding the document.
pub struct SqliteDraftRepository {
    pool: SqlitePool,
    storage_key: String,
}

impl SqliteDraftRepository {
    pub fn new(pool: SqlitePool, storage_key: impl Into<String>) -> Self {
        Self {
            pool,
            storage_key: storage_key.into(),
        }
    }
}

#[async_trait]
impl DraftRepository for SqliteDraftRepository {
    async fn load(&self) -> Result<Option<DraftRecord>> {
        let statement = Query::select()
            .column(Draft::Record)
            .from(Draft::Table)
            .and_where(Expr::col(Draft::StorageKey).eq(self.storage_key.clone()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        let Some((record,)) = row else {
            return Ok(None);
        };

        // A record this build cannot decode is useless; drop it rather
        // than fail the wizard mount.
        match serde_json::from_str(&record) {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                tracing::warn!(error = %err, "persisted draft did not decode, discarding");
                Ok(None)
            }
        }
    }

    async fn save(&self, record: &DraftRecord) -> Result<()> {
        let document = serde_json::to_string(record)?;

        let statement = Query::insert()
            .into_table(Draft::Table)
            .columns([Draft::StorageKey, Draft::Record, Draft::SavedAt])
            .values_panic([
                self.storage_key.clone().into(),
                document.into(),
                record.timestamp.to_rfc3339().into(),
            ])
            .on_conflict(
                OnConflict::column(Draft::StorageKey)
                    .update_columns([Draft::Record, Draft::SavedAt])
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let statement = Query::delete()
            .from_table(Draft::Table)
            .and_where(Expr::col(Draft::StorageKey).eq(self.storage_key.clone()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(())
    }
}
