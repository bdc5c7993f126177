//! Transaction entity - Represents a single stock movement in the ledger.
//!
//! Each transaction has a `product_id` foreign key, a strictly positive
//! quantity, a kind (In or Out, stored as the single-character tags `"I"` and
//! `"O"`), a timestamp, and optional notes. Transactions hold no live
//! back-reference to their product; "a product's transactions" is always a
//! query on `product_id`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Direction of a stock movement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum TransactionKind {
    /// Stock increase - contributes `+quantity` to the balance
    #[sea_orm(string_value = "I")]
    In,
    /// Stock decrease - contributes `-quantity` to the balance
    #[sea_orm(string_value = "O")]
    Out,
}

impl TransactionKind {
    /// Human-readable label used in reports ("In" / "Out").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::In => "In",
            Self::Out => "Out",
        }
    }
}

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the product this transaction moves stock for
    pub product_id: i64,
    /// Quantity moved, always positive; direction comes from `kind`
    pub quantity: Decimal,
    /// Whether the movement is into or out of stock
    pub kind: TransactionKind,
    /// When the movement occurred
    pub date: DateTimeUtc,
    /// Optional free-form notes
    pub notes: Option<String>,
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
