//! Business settings Discord commands - the `/settings` group.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, format},
        core::invoice::validate_amount,
        errors::{Error, Result},
    };

    /// Parent command for the business details printed on invoices.
    #[poise::command(slash_command, subcommands("settings_show", "settings_update"))]
    pub async fn settings(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Settings command. Available subcommands:\n\
            `/settings show` - Show the current business settings\n\
            `/settings update` - Change one or more settings";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Shows the current business settings.
    #[poise::command(slash_command, rename = "show")]
    pub async fn settings_show(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let settings = ctx.data().store.get_settings().await?;
        ctx.say(format::format_settings(&settings)?).await?;
        Ok(())
    }

    /// Updates business settings; omitted fields keep their value.
    ///
    /// The default tax rate only applies to invoices created afterwards.
    #[poise::command(slash_command, rename = "update")]
    #[allow(clippy::too_many_arguments)]
    pub async fn settings_update(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Business name"] name: Option<String>,
        #[description = "Business address (use \\n for new lines)"] address: Option<String>,
        #[description = "Contact email"] email: Option<String>,
        #[description = "Contact phone"] phone: Option<String>,
        #[description = "Logo image URL"] logo_url: Option<String>,
        #[description = "Accent color, e.g. #a855f7"] primary_color: Option<String>,
        #[description = "Currency symbol, e.g. $"] currency: Option<String>,
        #[description = "Default tax rate in percent"] tax_rate: Option<f64>,
    ) -> Result<()> {
        if [&name, &address, &email, &phone, &logo_url, &primary_color, &currency]
            .iter()
            .all(|field| field.is_none())
            && tax_rate.is_none()
        {
            ctx.say("❌ Please specify at least one setting to update.")
                .await?;
            return Ok(());
        }
        if let Some(color) = primary_color.as_deref() {
            if format::parse_hex_color(color).is_none() {
                ctx.say(format!("❌ '{color}' is not a color. Use the #RRGGBB form."))
                    .await?;
                return Ok(());
            }
        }
        if let Some(rate) = tax_rate {
            if !validate_amount(rate).is_ok_and(|r| r <= 100.0) {
                ctx.say("❌ Tax rate must be between 0 and 100.").await?;
                return Ok(());
            }
        }

        let store = &ctx.data().store;
        let mut settings = store.get_settings().await?;

        if let Some(name) = name {
            settings.business_name = name;
        }
        if let Some(address) = address {
            settings.business_address = address.replace("\\n", "\n");
        }
        if let Some(email) = email {
            settings.business_email = email;
        }
        if let Some(phone) = phone {
            settings.business_phone = phone;
        }
        if let Some(logo_url) = logo_url {
            settings.logo_url = logo_url;
        }
        if let Some(color) = primary_color {
            settings.primary_color = color.trim().to_string();
        }
        if let Some(currency) = currency {
            settings.currency = currency;
        }
        if let Some(rate) = tax_rate {
            settings.tax_rate = rate;
        }

        store.save_settings(&settings).await?;

        ctx.say(format!(
            "✅ Settings saved.\n\n{}",
            format::format_settings(&settings)?
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
