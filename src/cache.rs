//! Caller-owned read-through cache over the product and transaction tables.
//!
//! An explicit snapshot struct rather than an implicit shared binding list:
//! the caller owns it, refreshes it only via [`reload`], and derives
//! balances and report lookups from the snapshot without going back to the
//! store. The core operations themselves stay stateless.
//!
//! [`reload`]: InventoryCache::reload

use std::collections::HashMap;

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing::{debug, info};

use crate::{
    core::{ledger, product, transaction},
    entities::{product as product_entity, transaction as transaction_entity},
    errors::Result,
};

/// Snapshot of all products and transactions, refreshed on demand.
#[derive(Debug, Default)]
pub struct InventoryCache {
    products: Vec<product_entity::Model>,
    transactions: Vec<transaction_entity::Model>,
}

impl InventoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces both snapshots with fresh reads from the store.
    ///
    /// # Errors
    /// Returns an error if either load fails; on failure the previous
    /// snapshot is left untouched.
    pub async fn reload(&mut self, db: &DatabaseConnection) -> Result<()> {
        info!("Refreshing inventory cache...");
        let products = product::get_all_products(db).await?;
        let transactions = transaction::get_all_transactions(db).await?;

        self.products = products;
        self.transactions = transactions;
        info!(
            "Inventory cache refreshed: {} products, {} transactions.",
            self.products.len(),
            self.transactions.len()
        );
        debug!("Cached products: {:?}", self.products);
        Ok(())
    }

    /// All cached products, ordered by name.
    #[must_use]
    pub fn products(&self) -> &[product_entity::Model] {
        &self.products
    }

    /// All cached transactions, ordered by date then id.
    #[must_use]
    pub fn transactions(&self) -> &[transaction_entity::Model] {
        &self.transactions
    }

    /// Builds the product-id to name map consumed by the report builder.
    #[must_use]
    pub fn name_lookup(&self) -> HashMap<i64, String> {
        self.products
            .iter()
            .map(|p| (p.id, p.name.clone()))
            .collect()
    }

    /// Computes a product's current balance from the cached snapshot.
    ///
    /// Returns None when the product is not in the snapshot.
    #[must_use]
    pub fn current_balance(&self, product_id: i64) -> Option<Decimal> {
        let product = self.products.iter().find(|p| p.id == product_id)?;
        let history: Vec<transaction_entity::Model> = self
            .transactions
            .iter()
            .filter(|t| t.product_id == product_id)
            .cloned()
            .collect();
        Some(ledger::current_balance(product.beginning_balance, &history))
    }
}
