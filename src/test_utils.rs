//! Shared test utilities for `InvoiceBuddy`.
//!
//! This module provides helpers for setting up an in-memory store and building
//! invoices with sensible defaults.

use crate::{
    config::InvoiceDefaults,
    core::{
        invoice,
        model::{AppSettings, Client, Invoice, InvoiceStatus},
        store::InvoiceStore,
    },
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates an empty store backed by an in-memory database.
pub async fn setup_test_store() -> Result<InvoiceStore> {
    Ok(InvoiceStore::new(setup_test_db().await?))
}

/// Fixed "today" used by tests that need a date.
#[allow(clippy::expect_used)]
#[must_use]
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).expect("constant date is valid")
}

/// Creates a draft invoice for `client_name` with default settings.
///
/// # Defaults
/// * date: 2024-03-15, due 14 days later
/// * tax rate: 8.875 (the settings default)
/// * no items
#[must_use]
pub fn create_test_invoice(client_name: &str) -> Invoice {
    let mut draft = invoice::new_invoice(
        &AppSettings::default(),
        &InvoiceDefaults::default(),
        test_today(),
    );
    draft.client = Client {
        name: client_name.to_string(),
        email: format!("{}@example.test", client_name.to_lowercase().replace(' ', ".")),
        address: "1 Test Street".to_string(),
    };
    draft
}

/// Creates an invoice whose stored figures are exactly `total`, with the given
/// status and issue date. Uses one item at the given price and no tax.
#[must_use]
pub fn create_custom_invoice(status: InvoiceStatus, total: f64, date: NaiveDate) -> Invoice {
    let mut draft = create_test_invoice("Custom");
    invoice::set_tax_rate(&mut draft, 0.0);
    invoice::add_item(&mut draft, "Item", 1.0, total);
    draft.status = status;
    draft.date = date;
    draft
}
