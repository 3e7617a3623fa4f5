//! Invoice Discord commands - the `/invoice` group.
//!
//! Each subcommand loads the collection, edits a working copy through the core
//! invoice operations and saves the whole invoice back.

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
            calculator::format_money,
            invoice as invoice_ops,
            model::{Client, InvoiceStatus},
        },
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Parent command for creating, editing and browsing invoices.
    #[poise::command(
        slash_command,
        subcommands(
            "invoice_new",
            "invoice_list",
            "invoice_show",
            "invoice_client",
            "invoice_details",
            "invoice_status",
            "invoice_delete"
        )
    )]
    pub async fn invoice(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Invoice command. Available subcommands:\n\
            `/invoice new` - Create a draft invoice\n\
            `/invoice list` - List invoices\n\
            `/invoice show` - Preview an invoice\n\
            `/invoice client` - Edit the billed client\n\
            `/invoice details` - Edit number, dates, notes or tax rate\n\
            `/invoice status` - Change the status\n\
            `/invoice delete` - Delete an invoice";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Creates a new draft invoice.
    ///
    /// The tax rate defaults to the business settings; dates default to today and
    /// today plus the configured payment terms.
    #[poise::command(slash_command, rename = "new")]
    pub async fn invoice_new(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Client name"] client_name: String,
        #[description = "Client email"] client_email: Option<String>,
        #[description = "Client address (use \\n for new lines)"] client_address: Option<String>,
        #[description = "Invoice number (generated if omitted)"] number: Option<String>,
        #[description = "Tax rate in percent (defaults to settings)"] tax_rate: Option<f64>,
        #[description = "Notes printed on the invoice"] notes: Option<String>,
    ) -> Result<()> {
        if client_name.trim().is_empty() {
            ctx.say("❌ Client name cannot be empty.").await?;
            return Ok(());
        }
        if let Some(rate) = tax_rate {
            if !is_valid_tax_rate(rate) {
                ctx.say("❌ Tax rate must be between 0 and 100.").await?;
                return Ok(());
            }
        }

        let data = ctx.data();
        let settings = data.store.get_settings().await?;
        let mut draft = invoice_ops::new_invoice(&settings, &data.config.invoice, today());

        draft.client = Client {
            name: client_name.trim().to_string(),
            email: client_email.unwrap_or_default(),
            address: client_address.map(|a| a.replace("\\n", "\n")).unwrap_or_default(),
        };
        if let Some(number) = number.filter(|n| !n.trim().is_empty()) {
            draft.invoice_number = number.trim().to_string();
        }
        if let Some(rate) = tax_rate {
            invoice_ops::set_tax_rate(&mut draft, rate);
        }
        draft.notes = notes.filter(|n| !n.trim().is_empty());

        data.store.save_invoice(&draft).await?;

        ctx.say(format!(
            "✅ Created draft invoice **{}** for {} (id `{}`), due {}.\nAdd lines with `/item add`.",
            draft.invoice_number,
            draft.client.name,
            draft.id,
            draft.due_date.format("%Y-%m-%d"),
        ))
        .await?;
        Ok(())
    }

    /// Lists invoices in stored order, optionally filtered by status.
    #[poise::command(slash_command, rename = "list")]
    pub async fn invoice_list(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only show invoices with this status"]
        #[autocomplete = "autocomplete::autocomplete_status"]
        status: Option<String>,
    ) -> Result<()> {
        let filter = match status.as_deref().map(str::parse::<InvoiceStatus>) {
            Some(Ok(s)) => Some(s),
            Some(Err(e)) => {
                ctx.say(format!("❌ {e}. Use Draft, Pending, Paid or Overdue."))
                    .await?;
                return Ok(());
            }
            None => None,
        };

        let data = ctx.data();
        let settings = data.store.get_settings().await?;
        let invoices = data.store.get_invoices().await?;
        let today = today();

        let shown: Vec<_> = invoices
            .iter()
            .filter(|inv| filter.is_none_or(|s| inv.status == s))
            .collect();

        if shown.is_empty() {
            ctx.say("📂 No invoices found. Create one with `/invoice new` to get started!")
                .await?;
            return Ok(());
        }

        let mut response = String::from("📂 **Invoices**\n\n");
        for (index, inv) in shown.iter().enumerate() {
            let line = format::format_invoice_line(inv, &settings.currency, today);
            if response.chars().count() + line.chars().count() + 40 > format::MESSAGE_LIMIT {
                writeln!(&mut response, "… and {} more", shown.len() - index)?;
                break;
            }
            writeln!(&mut response, "{line}")?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Shows the printable layout of an invoice.
    #[poise::command(slash_command, rename = "show")]
    pub async fn invoice_show(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Invoice id or number"]
        #[autocomplete = "autocomplete::autocomplete_invoice"]
        invoice: String,
    ) -> Result<()> {
        let Some(found) = load_invoice(ctx, &invoice).await? else {
            return Ok(());
        };

        let settings = ctx.data().store.get_settings().await?;
        let preview = format::format_invoice_preview(&found, &settings, today())?;

        ctx.say(preview).await?;
        Ok(())
    }

    /// Edits the client an invoice is addressed to.
    #[poise::command(slash_command, rename = "client")]
    pub async fn invoice_client(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Invoice id or number"]
        #[autocomplete = "autocomplete::autocomplete_invoice"]
        invoice: String,
        #[description = "New client name"] name: Option<String>,
        #[description = "New client email"] email: Option<String>,
        #[description = "New client address (use \\n for new lines)"] address: Option<String>,
    ) -> Result<()> {
        if name.is_none() && email.is_none() && address.is_none() {
            ctx.say("❌ Please specify at least one field to update (name, email, or address).")
                .await?;
            return Ok(());
        }
        if name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            ctx.say("❌ Client name cannot be empty.").await?;
            return Ok(());
        }

        let Some(mut working) = load_invoice(ctx, &invoice).await? else {
            return Ok(());
        };

        if let Some(name) = name {
            working.client.name = name.trim().to_string();
        }
        if let Some(email) = email {
            working.client.email = email;
        }
        if let Some(address) = address {
            working.client.address = address.replace("\\n", "\n");
        }

        ctx.data().store.save_invoice(&working).await?;
        ctx.say(format!(
            "✅ Updated client on invoice **{}**: {}",
            working.invoice_number, working.client.name
        ))
        .await?;
        Ok(())
    }

    /// Edits the number, dates, notes or tax rate of an invoice.
    #[poise::command(slash_command, rename = "details")]
    pub async fn invoice_details(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Invoice id or number"]
        #[autocomplete = "autocomplete::autocomplete_invoice"]
        invoice: String,
        #[description = "New invoice number"] number: Option<String>,
        #[description = "Issue date (YYYY-MM-DD)"] date: Option<String>,
        #[description = "Due date (YYYY-MM-DD)"] due_date: Option<String>,
        #[description = "Tax rate in percent"] tax_rate: Option<f64>,
        #[description = "Notes (empty text clears them)"] notes: Option<String>,
    ) -> Result<()> {
        if number.is_none()
            && date.is_none()
            && due_date.is_none()
            && tax_rate.is_none()
            && notes.is_none()
        {
            ctx.say("❌ Please specify at least one field to update.")
                .await?;
            return Ok(());
        }
        if let Some(rate) = tax_rate {
            if !is_valid_tax_rate(rate) {
                ctx.say("❌ Tax rate must be between 0 and 100.").await?;
                return Ok(());
            }
        }

        let parsed_date = match date.as_deref().map(invoice_ops::parse_date).transpose() {
            Ok(d) => d,
            Err(e) => {
                ctx.say(format!("❌ {e}")).await?;
                return Ok(());
            }
        };
        let parsed_due = match due_date.as_deref().map(invoice_ops::parse_date).transpose() {
            Ok(d) => d,
            Err(e) => {
                ctx.say(format!("❌ {e}")).await?;
                return Ok(());
            }
        };

        let Some(mut working) = load_invoice(ctx, &invoice).await? else {
            return Ok(());
        };

        if let Some(number) = number.filter(|n| !n.trim().is_empty()) {
            working.invoice_number = number.trim().to_string();
        }
        if let Some(d) = parsed_date {
            working.date = d;
        }
        if let Some(d) = parsed_due {
            working.due_date = d;
        }
        if let Some(rate) = tax_rate {
            invoice_ops::set_tax_rate(&mut working, rate);
        }
        if let Some(notes) = notes {
            working.notes = Some(notes).filter(|n| !n.trim().is_empty());
        }

        ctx.data().store.save_invoice(&working).await?;

        let currency = ctx.data().store.get_settings().await?.currency;
        ctx.say(format!(
            "✅ Updated invoice **{}** · total {}",
            working.invoice_number,
            format_money(&currency, working.total)
        ))
        .await?;
        Ok(())
    }

    /// Changes the status of an invoice.
    #[poise::command(slash_command, rename = "status")]
    pub async fn invoice_status(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Invoice id or number"]
        #[autocomplete = "autocomplete::autocomplete_invoice"]
        invoice: String,
        #[description = "New status"]
        #[autocomplete = "autocomplete::autocomplete_status"]
        status: String,
    ) -> Result<()> {
        let new_status = match status.parse::<InvoiceStatus>() {
            Ok(s) => s,
            Err(e) => {
                ctx.say(format!("❌ {e}. Use Draft, Pending, Paid or Overdue."))
                    .await?;
                return Ok(());
            }
        };

        let Some(mut working) = load_invoice(ctx, &invoice).await? else {
            return Ok(());
        };

        let old_status = working.status;
        working.status = new_status;
        ctx.data().store.save_invoice(&working).await?;

        ctx.say(format!(
            "{} Invoice **{}** is now {new_status} (was {old_status}).",
            format::status_emoji(new_status),
            working.invoice_number,
        ))
        .await?;
        Ok(())
    }

    /// Deletes an invoice permanently.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn invoice_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Invoice id or number"]
        #[autocomplete = "autocomplete::autocomplete_invoice"]
        invoice: String,
    ) -> Result<()> {
        let Some(found) = load_invoice(ctx, &invoice).await? else {
            return Ok(());
        };

        ctx.data().store.delete_invoice(&found.id).await?;

        ctx.say(format!(
            "🗑️ Deleted invoice **{}** for {}.",
            found.invoice_number, found.client.name
        ))
        .await?;
        Ok(())
    }

    fn is_valid_tax_rate(rate: f64) -> bool {
        invoice_ops::validate_amount(rate).is_ok_and(|r| r <= 100.0)
    }
}

// Re-export all commands
pub use inner::*;
