//! Persistence of the settings record and the invoice collection.
//!
//! Both live as JSON documents in the key-value table:
//!
//! * `"settings"` - one [`AppSettings`] object, absent until first saved
//! * `"invoices"` - one array of [`Invoice`], in insertion order
//!
//! Invoice writes are read-modify-write over the whole array. Within one process
//! they are serialized by a lock on the collection; separate processes sharing a
//! database file can still overwrite each other (last write wins).

use crate::{
    core::{
        invoice::find_by_reference,
        kv,
        model::{AppSettings, Invoice},
    },
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Storage key of the settings record
pub const SETTINGS_KEY: &str = "settings";
/// Storage key of the invoice collection
pub const INVOICES_KEY: &str = "invoices";

/// Owner of the persisted settings and invoices.
#[derive(Debug)]
pub struct InvoiceStore {
    db: DatabaseConnection,
    invoices_lock: Mutex<()>,
}

impl InvoiceStore {
    /// Wraps a connection whose schema has already been created.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            invoices_lock: Mutex::new(()),
        }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Loads the settings record, or the built-in defaults if none was saved.
    ///
    /// The defaults are not written back.
    ///
    /// # Errors
    /// Returns [`Error::CorruptedState`] if a stored record cannot be decoded.
    #[instrument(skip(self))]
    pub async fn get_settings(&self) -> Result<AppSettings> {
        Ok(self.read_json(SETTINGS_KEY).await?.unwrap_or_default())
    }

    /// Replaces the stored settings record.
    #[instrument(skip(self, settings))]
    pub async fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        self.write_json(SETTINGS_KEY, settings).await?;
        info!(business = %settings.business_name, "Saved settings");
        Ok(())
    }

    /// Loads every invoice in stored order; empty if none was ever saved.
    ///
    /// # Errors
    /// Returns [`Error::CorruptedState`] if the stored collection cannot be decoded.
    #[instrument(skip(self))]
    pub async fn get_invoices(&self) -> Result<Vec<Invoice>> {
        let invoices: Vec<Invoice> = self.read_json(INVOICES_KEY).await?.unwrap_or_default();
        debug!(count = invoices.len(), "Loaded invoices");
        Ok(invoices)
    }

    /// Looks up one invoice by id.
    pub async fn get_invoice(&self, id: &str) -> Result<Option<Invoice>> {
        Ok(self
            .get_invoices()
            .await?
            .into_iter()
            .find(|invoice| invoice.id == id))
    }

    /// Resolves an id or a unique invoice number to a working copy.
    ///
    /// # Errors
    /// Returns [`Error::InvoiceNotFound`] when nothing (or more than one invoice
    /// sharing the number) matches.
    pub async fn find_invoice(&self, reference: &str) -> Result<Invoice> {
        let invoices = self.get_invoices().await?;
        find_by_reference(&invoices, reference)
            .cloned()
            .ok_or_else(|| Error::InvoiceNotFound {
                id: reference.trim().to_string(),
            })
    }

    /// Inserts the invoice, or replaces the stored one with the same id in place.
    #[instrument(skip(self, invoice), fields(id = %invoice.id))]
    pub async fn save_invoice(&self, invoice: &Invoice) -> Result<()> {
        let _guard = self.invoices_lock.lock().await;

        let mut invoices = self.get_invoices().await?;
        if let Some(existing) = invoices.iter_mut().find(|inv| inv.id == invoice.id) {
            existing.clone_from(invoice);
            info!(number = %invoice.invoice_number, "Updated invoice");
        } else {
            invoices.push(invoice.clone());
            info!(number = %invoice.invoice_number, "Added invoice");
        }

        self.write_json(INVOICES_KEY, &invoices).await
    }

    /// Removes the invoice with `id`. Unknown ids are ignored.
    #[instrument(skip(self))]
    pub async fn delete_invoice(&self, id: &str) -> Result<()> {
        let _guard = self.invoices_lock.lock().await;

        let mut invoices = self.get_invoices().await?;
        let before = invoices.len();
        invoices.retain(|invoice| invoice.id != id);

        if invoices.len() == before {
            debug!("No invoice with id {id}, nothing deleted");
        } else {
            info!("Deleted invoice {id}");
        }

        self.write_json(INVOICES_KEY, &invoices).await
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = kv::get_value(&self.db, key).await? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| {
                warn!("Stored value under '{key}' is corrupted: {source}");
                Error::CorruptedState {
                    key: key.to_string(),
                    source,
                }
            })
    }

    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let encoded = serde_json::to_string(value).map_err(Error::Encode)?;
        kv::set_value(&self.db, key, &encoded).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{
        invoice::{add_item, set_tax_rate},
        model::InvoiceStatus,
    };
    use crate::test_utils::{create_test_invoice, setup_test_store};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr};

    #[tokio::test]
    async fn test_empty_store_defaults() -> Result<()> {
        let store = setup_test_store().await?;

        assert!(store.get_invoices().await?.is_empty());
        assert_eq!(store.get_settings().await?, AppSettings::default());
        assert!(
            kv::get_value(store.connection(), SETTINGS_KEY).await?.is_none(),
            "Defaults must not be written back"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_save_settings_replaces_record() -> Result<()> {
        let store = setup_test_store().await?;

        let settings = AppSettings {
            business_name: "Atelier".to_string(),
            currency: "€".to_string(),
            tax_rate: 20.0,
            ..AppSettings::default()
        };
        store.save_settings(&settings).await?;
        assert_eq!(store.get_settings().await?, settings);

        let replaced = AppSettings {
            business_phone: String::new(),
            ..settings.clone()
        };
        store.save_settings(&replaced).await?;
        assert_eq!(store.get_settings().await?, replaced);
        Ok(())
    }

    #[tokio::test]
    async fn test_round_trip() -> Result<()> {
        let store = setup_test_store().await?;
        let mut invoice = create_test_invoice("Acme");
        add_item(&mut invoice, "Gown", 1.0, 250.0);
        invoice.notes = Some("Thank you!".to_string());

        store.save_invoice(&invoice).await?;

        let stored = store.get_invoices().await?;
        assert_eq!(stored, vec![invoice]);
        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent() -> Result<()> {
        let store = setup_test_store().await?;
        let mut invoice = create_test_invoice("Acme");

        store.save_invoice(&invoice).await?;
        set_tax_rate(&mut invoice, 0.0);
        invoice.status = InvoiceStatus::Pending;
        store.save_invoice(&invoice).await?;
        store.save_invoice(&invoice).await?;

        let stored = store.get_invoices().await?;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0], invoice);
        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_preserves_others_and_position() -> Result<()> {
        let store = setup_test_store().await?;
        let a = create_test_invoice("A");
        let mut b = create_test_invoice("B");
        let c = create_test_invoice("C");
        for invoice in [&a, &b, &c] {
            store.save_invoice(invoice).await?;
        }

        add_item(&mut b, "Extra", 2.0, 3.0);
        store.save_invoice(&b).await?;

        let stored = store.get_invoices().await?;
        assert_eq!(stored, vec![a, b, c]);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_removes_only_target() -> Result<()> {
        let store = setup_test_store().await?;
        let a = create_test_invoice("A");
        let b = create_test_invoice("B");
        let c = create_test_invoice("C");
        for invoice in [&a, &b, &c] {
            store.save_invoice(invoice).await?;
        }

        store.delete_invoice(&b.id).await?;

        let stored = store.get_invoices().await?;
        assert!(stored.iter().all(|invoice| invoice.id != b.id));
        assert_eq!(stored, vec![a, c]);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() -> Result<()> {
        let store = setup_test_store().await?;
        let a = create_test_invoice("A");
        store.save_invoice(&a).await?;

        store.delete_invoice("does-not-exist").await?;

        assert_eq!(store.get_invoices().await?, vec![a]);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_invoice_by_id() -> Result<()> {
        let store = setup_test_store().await?;
        let a = create_test_invoice("A");
        store.save_invoice(&a).await?;

        assert_eq!(store.get_invoice(&a.id).await?, Some(a));
        assert_eq!(store.get_invoice("nope").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_invoice_by_number() -> Result<()> {
        let store = setup_test_store().await?;
        let mut a = create_test_invoice("A");
        a.invoice_number = "ZR-7".to_string();
        store.save_invoice(&a).await?;

        assert_eq!(store.find_invoice("zr-7").await?, a);
        assert_eq!(store.find_invoice(&a.id).await?, a);

        let missing = store.find_invoice("ZR-8").await;
        assert!(matches!(missing, Err(Error::InvoiceNotFound { ref id }) if id == "ZR-8"));
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupted_invoices_are_reported() -> Result<()> {
        let store = setup_test_store().await?;
        kv::set_value(store.connection(), INVOICES_KEY, "[{\"id\": 1").await?;

        let result = store.get_invoices().await;
        assert!(
            matches!(result, Err(Error::CorruptedState { ref key, .. }) if key == INVOICES_KEY)
        );

        let save = store.save_invoice(&create_test_invoice("A")).await;
        assert!(
            matches!(save, Err(Error::CorruptedState { .. })),
            "A corrupted collection must not be silently overwritten"
        );
        assert_eq!(
            kv::get_value(store.connection(), INVOICES_KEY).await?,
            Some("[{\"id\": 1".to_string())
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupted_settings_are_reported() -> Result<()> {
        let store = setup_test_store().await?;
        kv::set_value(store.connection(), SETTINGS_KEY, "{\"businessName\": 5}").await?;

        let result = store.get_settings().await;
        assert!(
            matches!(result, Err(Error::CorruptedState { ref key, .. }) if key == SETTINGS_KEY)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_write_is_propagated() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_errors([DbErr::Exec(RuntimeErr::Internal(
                "database or disk is full".to_string(),
            ))])
            .into_connection();
        let store = InvoiceStore::new(db);

        let result = store.save_settings(&AppSettings::default()).await;
        assert!(matches!(result, Err(Error::Database(_))));
    }

    #[tokio::test]
    async fn test_concurrent_saves_do_not_lose_updates() -> Result<()> {
        let store = setup_test_store().await?;
        let a = create_test_invoice("A");
        let b = create_test_invoice("B");
        let c = create_test_invoice("C");
        let d = create_test_invoice("D");

        let (ra, rb, rc, rd) = tokio::join!(
            store.save_invoice(&a),
            store.save_invoice(&b),
            store.save_invoice(&c),
            store.save_invoice(&d),
        );
        ra?;
        rb?;
        rc?;
        rd?;

        let stored = store.get_invoices().await?;
        assert_eq!(stored.len(), 4);
        for invoice in [&a, &b, &c, &d] {
            assert!(stored.contains(invoice));
        }
        Ok(())
    }
}
