//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggests invoice references and statuses as the user types, so commands can be
//! driven without remembering generated ids.

use crate::{
    bot::BotData,
    core::model::InvoiceStatus,
    errors::Error,
};

/// Discord autocomplete limit
const MAX_SUGGESTIONS: usize = 25;

/// Provides autocomplete suggestions for invoice references.
///
/// Matches the partial input against invoice numbers, ids and client names
/// (case-insensitive) and suggests the invoice id, which is always unambiguous.
///
/// # Arguments
/// * `ctx` - The poise context containing the store
/// * `partial` - The partial string the user has typed so far
pub async fn autocomplete_invoice(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(invoices) = ctx.data().store.get_invoices().await else {
        return Vec::new();
    };

    let partial_lower = partial.to_lowercase();

    invoices
        .into_iter()
        .rev()
        .filter(|invoice| {
            invoice.invoice_number.to_lowercase().contains(&partial_lower)
                || invoice.id.contains(&partial_lower)
                || invoice.client.name.to_lowercase().contains(&partial_lower)
        })
        .map(|invoice| invoice.id)
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Provides autocomplete suggestions for invoice statuses.
///
/// # Arguments
/// * `_ctx` - The poise context (unused, but required by poise signature)
/// * `partial` - The partial string the user has typed so far
pub async fn autocomplete_status(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching_statuses(partial)
}

/// Status names containing `partial`, case-insensitive, in lifecycle order.
fn matching_statuses(partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();

    InvoiceStatus::ALL
        .into_iter()
        .map(InvoiceStatus::as_str)
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_statuses() {
        assert_eq!(
            matching_statuses(""),
            vec!["Draft", "Pending", "Paid", "Overdue"]
        );
        assert_eq!(matching_statuses("PA"), vec!["Paid"]);
        assert_eq!(matching_statuses("d"), vec!["Draft", "Pending", "Paid", "Overdue"]);
        assert!(matching_statuses("void").is_empty());
    }
}
