//! Unified error type for `InvoiceBuddy`.
//!
//! Storage failures are propagated unchanged as [`Error::Database`]. A stored
//! record that exists but cannot be decoded is reported as
//! [`Error::CorruptedState`] so it is never confused with an absent key.

use thiserror::Error;

/// All errors produced by the core, the configuration layer and the bot.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or user-supplied setting is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// The underlying storage rejected a read or write
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A known key holds JSON that does not decode into the expected record
    #[error("Corrupted state under key '{key}': {source}")]
    CorruptedState {
        /// Storage key whose value failed to decode
        key: String,
        /// Underlying decode failure
        #[source]
        source: serde_json::Error,
    },

    /// A record could not be encoded for storage
    #[error("Encoding error: {0}")]
    Encode(#[source] serde_json::Error),

    /// No invoice with the given id exists in the collection
    #[error("Invoice not found: {id}")]
    InvoiceNotFound {
        /// Invoice id that was looked up
        id: String,
    },

    /// No line item with the given id exists on the invoice
    #[error("Line item not found: {id}")]
    ItemNotFound {
        /// Item id that was looked up
        id: String,
    },

    /// A monetary or quantity input is not a finite, non-negative number
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected value
        amount: f64,
    },

    /// A date input is not in `YYYY-MM-DD` form
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input
        value: String,
    },

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Failure while building a text response
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
