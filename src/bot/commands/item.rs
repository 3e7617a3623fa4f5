//! Line item Discord commands - the `/item` group.
//! Item ids are listed by `/invoice show`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::{load_invoice, today},
            format,
            handlers::autocomplete,
        },
        core::{
            calculator::{format_money, line_total},
            invoice::{self as invoice_ops, ItemUpdate},
        },
        errors::{Error, Result},
    };

    /// Parent command for editing the lines of an invoice.
    #[poise::command(slash_command, subcommands("item_add", "item_update", "item_remove"))]
    pub async fn item(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Line item command. Available subcommands:\n\
            `/item add` - Add a line to an invoice\n\
            `/item update` - Change a line's description, quantity or price\n\
            `/item remove` - Remove a line";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a line item and recalculates the invoice totals.
    #[poise::command(slash_command, rename = "add")]
    pub async fn item_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Invoice id or number"]
        #[autocomplete = "autocomplete::autocomplete_invoice"]
        invoice: String,
        #[description = "What was sold"] description: String,
        #[description = "Quantity"] quantity: f64,
        #[description = "Unit price"] price: f64,
    ) -> Result<()> {
        if let Err(e) = invoice_ops::validate_amount(quantity)
            .and_then(|_| invoice_ops::validate_amount(price))
        {
            ctx.say(format!("❌ {e}")).await?;
            return Ok(());
        }

        let Some(mut working) = load_invoice(ctx, &invoice).await? else {
            return Ok(());
        };

        let added = invoice_ops::add_item(&mut working, description.trim(), quantity, price);
        ctx.data().store.save_invoice(&working).await?;

        let currency = ctx.data().store.get_settings().await?.currency;
        ctx.say(format!(
            "✅ Added `{}` {} × {} to **{}** (line total {}). New total: {}",
            added.id,
            added.quantity,
            added.description,
            working.invoice_number,
            format_money(&currency, line_total(&added)),
            format_money(&currency, working.total),
        ))
        .await?;
        Ok(())
    }

    /// Updates one line item; omitted fields keep their value.
    #[poise::command(slash_command, rename = "update")]
    pub async fn item_update(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Invoice id or number"]
        #[autocomplete = "autocomplete::autocomplete_invoice"]
        invoice: String,
        #[description = "Item id (see /invoice show)"] item: String,
        #[description = "New description"] description: Option<String>,
        #[description = "New quantity"] quantity: Option<f64>,
        #[description = "New unit price"] price: Option<f64>,
    ) -> Result<()> {
        let update = ItemUpdate {
            description: description.map(|d| d.trim().to_string()),
            quantity,
            price,
        };
        if update.is_empty() {
            ctx.say("❌ Please specify at least one field to update (description, quantity, or price).")
                .await?;
            return Ok(());
        }
        for amount in [quantity, price].into_iter().flatten() {
            if let Err(e) = invoice_ops::validate_amount(amount) {
                ctx.say(format!("❌ {e}")).await?;
                return Ok(());
            }
        }

        let Some(mut working) = load_invoice(ctx, &invoice).await? else {
            return Ok(());
        };

        let summary = match invoice_ops::update_item(&mut working, item.trim(), update) {
            Ok(updated) => format!("{} × {}", updated.quantity, updated.description),
            Err(e @ Error::ItemNotFound { .. }) => {
                ctx.say(format!("❌ {e} on invoice **{}**.", working.invoice_number))
                    .await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        ctx.data().store.save_invoice(&working).await?;

        let currency = ctx.data().store.get_settings().await?.currency;
        ctx.say(format!(
            "✅ Updated line on **{}**: {summary}. New total: {}",
            working.invoice_number,
            format_money(&currency, working.total),
        ))
        .await?;
        Ok(())
    }

    /// Removes one line item.
    #[poise::command(slash_command, rename = "remove")]
    pub async fn item_remove(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Invoice id or number"]
        #[autocomplete = "autocomplete::autocomplete_invoice"]
        invoice: String,
        #[description = "Item id (see /invoice show)"] item: String,
    ) -> Result<()> {
        let Some(mut working) = load_invoice(ctx, &invoice).await? else {
            return Ok(());
        };

        let removed = match invoice_ops::remove_item(&mut working, item.trim()) {
            Ok(removed) => removed,
            Err(e @ Error::ItemNotFound { .. }) => {
                ctx.say(format!("❌ {e} on invoice **{}**.", working.invoice_number))
                    .await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        ctx.data().store.save_invoice(&working).await?;

        let settings = ctx.data().store.get_settings().await?;
        ctx.say(format!(
            "🗑️ Removed \"{}\" from **{}**.\n{}",
            removed.description,
            working.invoice_number,
            format::format_invoice_line(&working, &settings.currency, today()),
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
