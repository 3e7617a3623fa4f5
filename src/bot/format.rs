//! Chat rendering of invoices, settings and the dashboard series.
//!
//! Pure string builders so they can be tested without a Discord connection.

use crate::{
    core::{
        calculator::{format_money, line_total},
        invoice::is_past_due,
        model::{AppSettings, Invoice, InvoiceStatus},
        report::{MonthlyTotal, format_share_bar},
    },
    errors::Result,
};
use chrono::NaiveDate;
use std::fmt::Write;

/// Maximum characters Discord accepts in one message
pub const MESSAGE_LIMIT: usize = 2000;

/// Room kept for the "… and N more lines" tail
const TRUNCATION_RESERVE: usize = 32;

/// Notes longer than this are cut in previews
const NOTES_PREVIEW_LIMIT: usize = 500;

fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Emoji shown next to a status.
#[must_use]
pub const fn status_emoji(status: InvoiceStatus) -> &'static str {
    match status {
        InvoiceStatus::Draft => "📝",
        InvoiceStatus::Pending => "⏳",
        InvoiceStatus::Paid => "✅",
        InvoiceStatus::Overdue => "🔴",
    }
}

/// One-line summary used in invoice lists.
#[must_use]
pub fn format_invoice_line(invoice: &Invoice, currency: &str, today: NaiveDate) -> String {
    let client = if invoice.client.name.is_empty() {
        "(no client)"
    } else {
        invoice.client.name.as_str()
    };
    let past_due = if is_past_due(invoice, today) {
        " ⚠️ past due"
    } else {
        ""
    };

    format!(
        "{} **{}** · {client} · {} · {} · {}{past_due} · `{}`",
        status_emoji(invoice.status),
        invoice.invoice_number,
        invoice.date.format("%Y-%m-%d"),
        format_money(currency, invoice.total),
        invoice.status,
        invoice.id,
    )
}

/// Printable layout of a whole invoice.
///
/// Item lines that would push the message past [`MESSAGE_LIMIT`] are replaced by
/// a count of the lines left out; the totals are always shown.
pub fn format_invoice_preview(
    invoice: &Invoice,
    settings: &AppSettings,
    today: NaiveDate,
) -> Result<String> {
    let currency = settings.currency.as_str();
    let mut out = String::new();

    writeln!(&mut out, "**{}**", settings.business_name)?;
    writeln!(&mut out, "{}", settings.business_address)?;
    writeln!(
        &mut out,
        "{} · {}\n",
        settings.business_email, settings.business_phone
    )?;

    writeln!(
        &mut out,
        "🧾 **Invoice {}** {} {}",
        invoice.invoice_number,
        status_emoji(invoice.status),
        invoice.status
    )?;
    writeln!(&mut out, "Issued: {}", invoice.date.format("%Y-%m-%d"))?;
    write!(&mut out, "Due: {}", invoice.due_date.format("%Y-%m-%d"))?;
    if is_past_due(invoice, today) {
        out.push_str(" ⚠️ past due");
    }
    out.push_str("\n\n");

    writeln!(&mut out, "**Bill to:** {}", invoice.client.name)?;
    if !invoice.client.email.is_empty() {
        writeln!(&mut out, "{}", invoice.client.email)?;
    }
    if !invoice.client.address.is_empty() {
        writeln!(&mut out, "{}", invoice.client.address)?;
    }
    out.push('\n');

    let mut totals = String::from("\n");
    writeln!(&mut totals, "Subtotal: {}", format_money(currency, invoice.subtotal))?;
    writeln!(
        &mut totals,
        "Tax ({}%): {}",
        invoice.tax_rate,
        format_money(currency, invoice.tax_amount)
    )?;
    writeln!(&mut totals, "**Total: {}**", format_money(currency, invoice.total))?;

    if let Some(notes) = invoice.notes.as_deref().filter(|n| !n.is_empty()) {
        let mut shown: String = notes.chars().take(NOTES_PREVIEW_LIMIT).collect();
        if shown.len() < notes.len() {
            shown.push('…');
        }
        writeln!(&mut totals, "\n**Notes:** {shown}")?;
    }

    if invoice.items.is_empty() {
        out.push_str("_No line items_\n");
    } else {
        out.push_str("**Items:**\n");
        let budget = MESSAGE_LIMIT
            .saturating_sub(char_count(&out) + char_count(&totals) + TRUNCATION_RESERVE);
        let mut used = 0;
        for (index, item) in invoice.items.iter().enumerate() {
            let line = format!(
                "• {} · {} × {} = **{}** `{}`\n",
                item.description,
                item.quantity,
                format_money(currency, item.price),
                format_money(currency, line_total(item)),
                item.id,
            );
            used += char_count(&line);
            if used > budget {
                writeln!(&mut out, "… and {} more lines", invoice.items.len() - index)?;
                break;
            }
            out.push_str(&line);
        }
    }
    out.push_str(&totals);

    Ok(out)
}

/// Settings record as a chat message.
pub fn format_settings(settings: &AppSettings) -> Result<String> {
    let mut out = String::from("⚙️ **Business Settings**\n\n");
    writeln!(&mut out, "**Name:** {}", settings.business_name)?;
    writeln!(&mut out, "**Address:** {}", settings.business_address)?;
    writeln!(&mut out, "**Email:** {}", settings.business_email)?;
    writeln!(&mut out, "**Phone:** {}", settings.business_phone)?;
    writeln!(&mut out, "**Logo:** {}", settings.logo_url)?;
    writeln!(&mut out, "**Primary color:** {}", settings.primary_color)?;
    writeln!(&mut out, "**Currency:** {}", settings.currency)?;
    writeln!(&mut out, "**Default tax rate:** {}%", settings.tax_rate)?;
    Ok(out)
}

/// Monthly revenue series with bars scaled to the largest month.
pub fn format_monthly_series(months: &[MonthlyTotal], currency: &str) -> Result<String> {
    if months.is_empty() {
        return Ok("_No invoices yet_".to_string());
    }

    let max = months.iter().map(|m| m.amount).fold(0.0_f64, f64::max);
    let mut out = String::new();
    for month in months {
        writeln!(
            &mut out,
            "`{}` {} {}",
            month.month,
            format_share_bar(month.amount, max, Some(10)),
            format_money(currency, month.amount)
        )?;
    }
    Ok(out)
}

/// Parses a `#RRGGBB` color into an embed color value.
#[must_use]
pub fn parse_hex_color(value: &str) -> Option<u32> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}
