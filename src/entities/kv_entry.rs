//! Key-value entity - the flat storage medium behind the invoice store.
//!
//! Each row maps one logical collection key (`"settings"`, `"invoices"`) to a
//! JSON document stored as text.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Key-value database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "kv_store")]
pub struct Model {
    /// Storage key, unique per logical collection
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Encoded document
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When this key was last written
    pub updated_at: DateTime,
}

/// `KvEntry` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
