//! Core business logic - framework-agnostic invoice arithmetic, persistence and reporting.

/// Totals derivation and money formatting
pub mod calculator;
/// Random identifiers and invoice numbers
pub mod id;
/// Invoice creation and line-item editing
pub mod invoice;
/// Key-value access to the storage table
pub mod kv;
/// Domain records: clients, items, invoices, settings
pub mod model;
/// Revenue and status aggregation
pub mod report;
/// Settings and invoice collection persistence
pub mod store;
