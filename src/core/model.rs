//! Domain model - the records kept in the store.
//!
//! Field names serialize in camelCase so the persisted JSON keeps the layout
//! `{"invoiceNumber": ..., "dueDate": ..., "taxRate": ...}`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The person or company an invoice is addressed to. Embedded by value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Display name, also used for searching
    pub name: String,
    /// Contact email, may be empty
    #[serde(default)]
    pub email: String,
    /// Free-form postal address, may span several lines
    #[serde(default)]
    pub address: String,
}

/// One billable line on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    /// Opaque id assigned at creation
    pub id: String,
    /// What was sold
    pub description: String,
    /// Number of units, fractional allowed
    pub quantity: f64,
    /// Unit price in currency units
    pub price: f64,
}

/// Lifecycle status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceStatus {
    /// Being prepared, not sent yet
    Draft,
    /// Sent and awaiting payment
    Pending,
    /// Settled
    Paid,
    /// Past its due date without payment
    Overdue,
}

impl InvoiceStatus {
    /// Every status, in lifecycle order
    pub const ALL: [Self; 4] = [Self::Draft, Self::Pending, Self::Paid, Self::Overdue];

    /// The persisted name of the status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::Overdue => "Overdue",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown invoice status '{wanted}'"))
    }
}

/// A billing document for one client.
///
/// `subtotal`, `tax_amount` and `total` are derived from `items` and `tax_rate`
/// but persisted, so a stored invoice is self-describing and keeps the figures
/// it was issued with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Primary key within the invoice collection
    pub id: String,
    /// User-facing label, not guaranteed unique
    pub invoice_number: String,
    /// Issue date
    pub date: NaiveDate,
    /// Payment due date
    pub due_date: NaiveDate,
    /// Billed party
    pub client: Client,
    /// Line items in insertion order
    pub items: Vec<InvoiceItem>,
    /// Lifecycle status
    pub status: InvoiceStatus,
    /// Optional free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Σ quantity × price
    pub subtotal: f64,
    /// Tax percentage (0-100) captured when the invoice was created
    pub tax_rate: f64,
    /// subtotal × `tax_rate` / 100
    pub tax_amount: f64,
    /// subtotal + `tax_amount`
    pub total: f64,
}

/// Business-wide settings: branding, contact details and defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Name printed on invoices
    pub business_name: String,
    /// Postal address printed on invoices
    pub business_address: String,
    /// Contact email
    pub business_email: String,
    /// Contact phone
    pub business_phone: String,
    /// Logo image location
    pub logo_url: String,
    /// Accent color as a hex string (e.g., `"#a855f7"`)
    pub primary_color: String,
    /// Currency symbol used as an amount prefix
    pub currency: String,
    /// Tax percentage copied onto new invoices
    pub tax_rate: f64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            business_name: "Zia's Royalle".to_string(),
            business_address: "123 Fashion Ave, New York, NY 10012".to_string(),
            business_email: "contact@ziasroyalle.com".to_string(),
            business_phone: "+1 (555) 012-3456".to_string(),
            logo_url: "https://i.imgur.com/G5qWJ4p.jpeg".to_string(),
            primary_color: "#a855f7".to_string(),
            currency: "$".to_string(),
            tax_rate: 8.875,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn sample_invoice() -> Invoice {
        Invoice {
            id: "abc123xyz".to_string(),
            invoice_number: "INV-42".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 3, 19).unwrap(),
            client: Client {
                name: "Acme".to_string(),
                email: "billing@acme.test".to_string(),
                address: "1 Road\nTown".to_string(),
            },
            items: vec![InvoiceItem {
                id: "item00001".to_string(),
                description: "Tailoring".to_string(),
                quantity: 2.0,
                price: 10.0,
            }],
            status: InvoiceStatus::Pending,
            notes: None,
            subtotal: 20.0,
            tax_rate: 10.0,
            tax_amount: 2.0,
            total: 22.0,
        }
    }

    #[test]
    fn test_invoice_json_layout() {
        let value = serde_json::to_value(sample_invoice()).unwrap();

        assert_eq!(value["invoiceNumber"], "INV-42");
        assert_eq!(value["date"], "2024-03-05");
        assert_eq!(value["dueDate"], "2024-03-19");
        assert_eq!(value["status"], "Pending");
        assert_eq!(value["taxRate"], 10.0);
        assert_eq!(value["taxAmount"], 2.0);
        assert!(value.get("notes").is_none());
    }

    #[test]
    fn test_invoice_decodes_without_notes_or_email() {
        let json = r#"{
            "id": "x1", "invoiceNumber": "INV-1", "date": "2024-01-02",
            "dueDate": "2024-01-16", "client": {"name": "Bo"}, "items": [],
            "status": "Draft", "subtotal": 0, "taxRate": 8.875,
            "taxAmount": 0, "total": 0
        }"#;

        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.client.email, "");
        assert_eq!(invoice.notes, None);
        assert_eq!(invoice.status, InvoiceStatus::Draft);
    }

    #[test]
    fn test_settings_json_layout() {
        let value = serde_json::to_value(AppSettings::default()).unwrap();
        assert_eq!(value["businessName"], "Zia's Royalle");
        assert_eq!(value["primaryColor"], "#a855f7");
        assert_eq!(value["taxRate"], 8.875);
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("paid".parse::<InvoiceStatus>(), Ok(InvoiceStatus::Paid));
        assert_eq!(" OVERDUE ".parse::<InvoiceStatus>(), Ok(InvoiceStatus::Overdue));
        assert!("void".parse::<InvoiceStatus>().is_err());
    }

    #[test]
    fn test_status_display_matches_serialized_form() {
        for status in InvoiceStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }
}
