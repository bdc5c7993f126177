//! Product entity - Represents a product tracked in the inventory ledger.
//!
//! A product carries its immutable id, a unique name, and the beginning
//! balance recorded at creation. The current balance is never stored; it is
//! derived on demand from the beginning balance plus the product's
//! transaction history (see [`crate::core::ledger`]).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product, assigned at creation
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the product (e.g., "Laptop Dell XPS 13"), unique across all products
    #[sea_orm(unique)]
    pub name: String,
    /// Initial stock count recorded at product creation, before any transactions
    pub beginning_balance: Decimal,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product owns many transactions
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transaction,
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
