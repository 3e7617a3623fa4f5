//! Flat key-value storage on top of the `kv_store` table.
//!
//! Each call is a single statement and is durable once it returns. Callers that
//! read, modify and write back the same key must provide their own exclusion.

use crate::{
    entities::{KvEntry, kv_entry},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{Set, prelude::*, sea_query::OnConflict};
use tracing::{debug, instrument};

/// Retrieves the value stored under `key`.
///
/// # Returns
/// * `Ok(Some(value))` - The key exists
/// * `Ok(None)` - The key has never been written
#[instrument(skip(db))]
pub async fn get_value<C>(db: &C, key: &str) -> Result<Option<String>>
where
    C: ConnectionTrait,
{
    let entry = KvEntry::find_by_id(key.to_string()).one(db).await?;
    debug!(found = entry.is_some(), "Read key '{key}'");
    Ok(entry.map(|e| e.value))
}

/// Stores `value` under `key`, replacing any previous value.
///
/// # Errors
/// Returns `Error::Database` if the write is rejected.
#[instrument(skip(db, value), fields(bytes = value.len()))]
pub async fn set_value<C>(db: &C, key: &str, value: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    let entry = kv_entry::ActiveModel {
        key: Set(key.to_string()),
        value: Set(value.to_string()),
        updated_at: Set(Utc::now().naive_utc()),
    };

    KvEntry::insert(entry)
        .on_conflict(
            OnConflict::column(kv_entry::Column::Key)
                .update_columns([kv_entry::Column::Value, kv_entry::Column::UpdatedAt])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    debug!("Wrote key '{key}'");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_set_and_get_new_key() -> Result<()> {
        let db = setup_test_db().await?;

        set_value(&db, "settings", "{\"a\":1}").await?;

        assert_eq!(
            get_value(&db, "settings").await?,
            Some("{\"a\":1}".to_string()),
            "Retrieved value should match the written value"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_set_overwrites_existing_key() -> Result<()> {
        let db = setup_test_db().await?;

        set_value(&db, "invoices", "[]").await?;
        set_value(&db, "invoices", "[1]").await?;

        assert_eq!(get_value(&db, "invoices").await?, Some("[1]".to_string()));
        assert_eq!(KvEntry::find().all(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_key() -> Result<()> {
        let db = setup_test_db().await?;

        assert!(get_value(&db, "never_written").await?.is_none());
        Ok(())
    }
}
