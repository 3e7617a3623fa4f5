//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for `InvoiceBuddy`: slash commands
//! for invoices, line items, settings and the dashboard. Commands load a working
//! copy from the store, edit it through `core`, and save it back explicitly.

/// Discord command implementations (invoice, item, settings, dashboard, general)
pub mod commands;
/// Text rendering of invoices and reports for chat messages
pub mod format;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{config::AppConfig, core::store::InvoiceStore, errors::Error};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
pub struct BotData {
    /// Persistence for settings and invoices
    pub store: InvoiceStore,
    /// Defaults for new invoices
    pub config: Arc<AppConfig>,
}

impl BotData {
    /// Creates a new `BotData` instance from the store and configuration.
    #[must_use]
    pub const fn new(store: InvoiceStore, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }
}

/// Poise context used by every command
pub type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {error:?}", ctx.command().name);
            if let Err(e) = ctx.say(format!("❌ An error occurred: {error}")).await {
                error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Every command registered with Discord.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::ping(),
        commands::help(),
        commands::invoice(),
        commands::item(),
        commands::settings(),
        commands::dashboard(),
    ]
}

/// Connects to Discord and serves commands until the client stops.
#[instrument(skip(token, config, store))]
pub async fn run_bot(token: String, config: Arc<AppConfig>, store: InvoiceStore) -> Result<(), Error> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Registered {} commands globally", framework.options().commands.len());
                Ok(BotData::new(store, config))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {e:?}"))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {e:?}"))?;

    Ok(())
}
