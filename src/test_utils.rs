//! Shared test utilities for `stockbook`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

use crate::{
    core::{
        product::{self, NameCollation},
        transaction,
    },
    entities::{self, TransactionKind},
    errors::Result,
};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test product with a beginning balance of 10.00.
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::product::Model> {
    product::create_product(
        db,
        name.to_string(),
        Decimal::from(10),
        NameCollation::CaseSensitive,
    )
    .await
}

/// Creates a test product with a custom beginning balance.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    beginning_balance: Decimal,
) -> Result<entities::product::Model> {
    product::create_product(
        db,
        name.to_string(),
        beginning_balance,
        NameCollation::CaseSensitive,
    )
    .await
}

/// Records a test transaction dated now, with no notes.
pub async fn create_test_transaction(
    db: &DatabaseConnection,
    product_id: i64,
    quantity: Decimal,
    kind: TransactionKind,
) -> Result<entities::transaction::Model> {
    transaction::record_transaction(db, product_id, quantity, kind, None, None).await
}

/// Records an In transaction at a specific timestamp, for date-filter tests.
pub async fn create_dated_transaction(
    db: &DatabaseConnection,
    product_id: i64,
    quantity: Decimal,
    date: DateTime<Utc>,
) -> Result<entities::transaction::Model> {
    transaction::record_transaction(
        db,
        product_id,
        quantity,
        TransactionKind::In,
        Some(date),
        None,
    )
    .await
}

/// Sets up a complete test environment with one product.
/// Returns (db, product) for common test scenarios.
pub async fn setup_with_product() -> Result<(DatabaseConnection, entities::product::Model)> {
    let db = setup_test_db().await?;
    let product = create_test_product(&db, "Test Product").await?;
    Ok((db, product))
}
