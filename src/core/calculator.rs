//! Invoice arithmetic.
//!
//! Pure functions: no validation, no caching. Negative quantities or prices are
//! computed as given; constraining inputs is the caller's job.

use crate::core::model::{Invoice, InvoiceItem};

/// Derived monetary figures of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InvoiceTotals {
    /// Σ quantity × price
    pub subtotal: f64,
    /// subtotal × rate / 100
    pub tax_amount: f64,
    /// subtotal + tax
    pub total: f64,
}

/// Amount billed for a single line.
#[must_use]
pub fn line_total(item: &InvoiceItem) -> f64 {
    item.quantity * item.price
}

/// Computes subtotal, tax and total for the given items and tax percentage.
///
/// # Examples
/// Two units at 10 plus one at 5 with 10% tax give 25 / 2.5 / 27.5.
#[must_use]
pub fn calculate_totals(items: &[InvoiceItem], tax_rate: f64) -> InvoiceTotals {
    let subtotal: f64 = items.iter().map(line_total).sum();
    let tax_amount = subtotal * tax_rate / 100.0;

    InvoiceTotals {
        subtotal,
        tax_amount,
        total: subtotal + tax_amount,
    }
}

/// Rounds to two decimal places, half away from zero. Display only.
#[must_use]
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats an amount with the configured currency symbol, e.g. `"$27.50"`.
#[must_use]
pub fn format_money(currency: &str, amount: f64) -> String {
    let rounded = round_currency(amount);
    if rounded < 0.0 {
        format!("-{currency}{:.2}", rounded.abs())
    } else {
        format!("{currency}{rounded:.2}")
    }
}

impl Invoice {
    /// Current derived figures, recomputed from `items` and `tax_rate`.
    #[must_use]
    pub fn totals(&self) -> InvoiceTotals {
        calculate_totals(&self.items, self.tax_rate)
    }

    /// Re-derives `subtotal`, `tax_amount` and `total` and stores them.
    pub fn recalculate(&mut self) {
        let totals = self.totals();
        self.subtotal = totals.subtotal;
        self.tax_amount = totals.tax_amount;
        self.total = totals.total;
    }
}
