//! General Discord commands - ping and help.
//! These commands never touch the store.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**InvoiceBuddy Help**\n\
        Invoices are referenced by id or by number; autocomplete suggests both.\n\n\
        **Invoices**\n\
        • `/invoice new <client> [email] [address] [number] [tax_rate] [notes]` - Creates a draft invoice.\n\
        • `/invoice list [status]` - Lists invoices.\n\
        • `/invoice show <invoice>` - Shows the invoice preview with totals.\n\
        • `/invoice client|details|status|delete <invoice> ...` - Edits or removes an invoice.\n\n\
        **Line Items**\n\
        • `/item add <invoice> <description> <quantity> <price>` - Adds a line.\n\
        • `/item update <invoice> <item> [description] [quantity] [price]` - Edits a line.\n\
        • `/item remove <invoice> <item>` - Removes a line.\n\n\
        **Business**\n\
        • `/settings show` / `/settings update ...` - Business details printed on invoices.\n\
        • `/dashboard` - Revenue, pending amount and monthly totals.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
