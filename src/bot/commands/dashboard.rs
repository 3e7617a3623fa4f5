//! Dashboard Discord command - revenue summary as an embed.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::today, format},
        core::{calculator::format_money, model::InvoiceStatus, report},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;

    /// Embed color used when the configured color cannot be parsed
    const FALLBACK_COLOR: u32 = 0x00A8_55F7;

    /// Shows revenue, pending amount, invoice counts and monthly totals.
    #[poise::command(slash_command)]
    pub async fn dashboard(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let settings = data.store.get_settings().await?;
        let invoices = data.store.get_invoices().await?;
        let stats = report::dashboard_stats(&invoices);
        let currency = settings.currency.as_str();

        let mut status_field = String::new();
        for status in InvoiceStatus::ALL {
            writeln!(
                &mut status_field,
                "{} {status}: {}",
                format::status_emoji(status),
                stats.status_counts.get(status)
            )?;
        }

        let embed = serenity::CreateEmbed::default()
            .title(format!("📊 {} Dashboard", settings.business_name))
            .description(format!("As of {}", today().format("%Y-%m-%d")))
            .color(format::parse_hex_color(&settings.primary_color).unwrap_or(FALLBACK_COLOR))
            .field("Total Revenue", format_money(currency, stats.total_revenue), true)
            .field("Pending", format_money(currency, stats.pending_amount), true)
            .field("Total Invoices", stats.total_invoices.to_string(), true)
            .field("Paid Invoices", stats.paid_invoices().to_string(), true)
            .field("By Status", status_field, false)
            .field(
                "Monthly Totals",
                format::format_monthly_series(&stats.monthly_totals, currency)?,
                false,
            )
            .footer(serenity::CreateEmbedFooter::new(format!(
                "InvoiceBuddy v{} | {} invoice{}",
                env!("CARGO_PKG_VERSION"),
                stats.total_invoices,
                if stats.total_invoices == 1 { "" } else { "s" }
            )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
