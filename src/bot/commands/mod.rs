//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Dashboard command
pub mod dashboard;

/// General utility commands
pub mod general;

/// Invoice management commands
pub mod invoice;

/// Line item commands
pub mod item;

/// Business settings commands
pub mod settings;

// Export commands
pub use dashboard::*;
pub use general::*;
pub use invoice::*;
pub use item::*;
pub use settings::*;

use crate::{
    bot::Context,
    core::model::Invoice,
    errors::{Error, Result},
};

/// Loads the invoice named by `reference` (id or unique number).
///
/// Replies to the user and returns `None` when nothing matches.
pub(crate) async fn load_invoice(ctx: Context<'_>, reference: &str) -> Result<Option<Invoice>> {
    match ctx.data().store.find_invoice(reference).await {
        Ok(invoice) => Ok(Some(invoice)),
        Err(Error::InvoiceNotFound { id }) => {
            ctx.say(format!(
                "❌ Invoice '{id}' not found, or its number is shared by several invoices. \
                 Use `/invoice list` to see invoice ids.",
            ))
            .await?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Today's date in local time.
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
