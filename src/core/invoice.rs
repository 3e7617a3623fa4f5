//! Invoice lifecycle - creation and line-item editing on a working copy.
//!
//! Every operation that touches `items` or `tax_rate` recalculates the derived
//! totals before returning, so the working copy is always consistent and can be
//! saved as-is. Nothing here is persisted until the caller saves through
//! [`crate::core::store::InvoiceStore`].

use crate::{
    config::InvoiceDefaults,
    core::{
        id::{generate_id, generate_invoice_number},
        model::{AppSettings, Client, Invoice, InvoiceItem, InvoiceStatus},
    },
    errors::{Error, Result},
};
use chrono::{Days, NaiveDate};

/// Partial update of a line item; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemUpdate {
    /// New description
    pub description: Option<String>,
    /// New quantity
    pub quantity: Option<f64>,
    /// New unit price
    pub price: Option<f64>,
}

impl ItemUpdate {
    /// True when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.description.is_none() && self.quantity.is_none() && self.price.is_none()
    }
}

/// Creates a blank draft invoice dated `today`.
///
/// The tax rate is copied from `settings` so later settings changes never alter
/// this invoice.
#[must_use]
pub fn new_invoice(settings: &AppSettings, defaults: &InvoiceDefaults, today: NaiveDate) -> Invoice {
    let due_date = today
        .checked_add_days(Days::new(u64::from(defaults.payment_terms_days)))
        .unwrap_or(NaiveDate::MAX);

    let mut invoice = Invoice {
        id: generate_id(),
        invoice_number: generate_invoice_number(&defaults.number_prefix),
        date: today,
        due_date,
        client: Client::default(),
        items: Vec::new(),
        status: InvoiceStatus::Draft,
        notes: None,
        subtotal: 0.0,
        tax_rate: settings.tax_rate,
        tax_amount: 0.0,
        total: 0.0,
    };
    invoice.recalculate();
    invoice
}

/// Appends a new line item and returns it.
pub fn add_item(
    invoice: &mut Invoice,
    description: impl Into<String>,
    quantity: f64,
    price: f64,
) -> InvoiceItem {
    let item = InvoiceItem {
        id: generate_id(),
        description: description.into(),
        quantity,
        price,
    };
    invoice.items.push(item.clone());
    invoice.recalculate();
    item
}

/// Removes the line item with `item_id`, keeping the order of the rest.
///
/// # Errors
/// Returns [`Error::ItemNotFound`] if no item has that id.
pub fn remove_item(invoice: &mut Invoice, item_id: &str) -> Result<InvoiceItem> {
    let index = invoice
        .items
        .iter()
        .position(|item| item.id == item_id)
        .ok_or_else(|| Error::ItemNotFound {
            id: item_id.to_string(),
        })?;

    let removed = invoice.items.remove(index);
    invoice.recalculate();
    Ok(removed)
}

/// Applies `update` to the line item with `item_id`.
///
/// # Errors
/// Returns [`Error::ItemNotFound`] if no item has that id.
pub fn update_item<'a>(
    invoice: &'a mut Invoice,
    item_id: &str,
    update: ItemUpdate,
) -> Result<&'a InvoiceItem> {
    let index = invoice
        .items
        .iter()
        .position(|item| item.id == item_id)
        .ok_or_else(|| Error::ItemNotFound {
            id: item_id.to_string(),
        })?;

    let item = &mut invoice.items[index];
    if let Some(description) = update.description {
        item.description = description;
    }
    if let Some(quantity) = update.quantity {
        item.quantity = quantity;
    }
    if let Some(price) = update.price {
        item.price = price;
    }

    invoice.recalculate();
    Ok(&invoice.items[index])
}

/// Changes the tax percentage of this invoice only.
pub fn set_tax_rate(invoice: &mut Invoice, tax_rate: f64) {
    invoice.tax_rate = tax_rate;
    invoice.recalculate();
}

/// Whether the due date has passed on an invoice that is still awaiting payment.
///
/// Drafts and paid invoices are never past due. This is a display hint; the
/// stored status is not changed.
#[must_use]
pub fn is_past_due(invoice: &Invoice, today: NaiveDate) -> bool {
    matches!(
        invoice.status,
        InvoiceStatus::Pending | InvoiceStatus::Overdue
    ) && invoice.due_date < today
}

/// Finds an invoice by id, or by invoice number when exactly one invoice carries it.
///
/// Invoice numbers are not unique, so an ambiguous number yields `None`.
#[must_use]
pub fn find_by_reference<'a>(invoices: &'a [Invoice], reference: &str) -> Option<&'a Invoice> {
    let reference = reference.trim();
    if let Some(invoice) = invoices.iter().find(|invoice| invoice.id == reference) {
        return Some(invoice);
    }

    let mut by_number = invoices
        .iter()
        .filter(|invoice| invoice.invoice_number.eq_ignore_ascii_case(reference));
    match (by_number.next(), by_number.next()) {
        (Some(invoice), None) => Some(invoice),
        _ => None,
    }
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
/// Returns [`Error::InvalidDate`] for any other format.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| Error::InvalidDate {
        value: value.to_string(),
    })
}

/// Checks that a quantity, price or rate is finite and not negative.
///
/// The calculator accepts anything; this is for user input.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] otherwise.
pub fn validate_amount(amount: f64) -> Result<f64> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(amount)
    } else {
        Err(Error::InvalidAmount { amount })
    }
}
