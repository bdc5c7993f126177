//! Product business logic - Handles all product-related operations.
//!
//! This module provides functions for creating, retrieving, updating, and
//! deleting products in the inventory ledger. Creation and update validate
//! their inputs before any write is attempted and enforce name uniqueness
//! with a pre-check against the store; deletion cascades to the product's
//! transactions inside a single database transaction so no orphans survive.

use rust_decimal::Decimal;
use sea_orm::{
    QueryOrder, Set, TransactionTrait,
    prelude::*,
    sea_query::{Expr, Func},
};
use serde::Deserialize;

use crate::{
    entities::{Product, Transaction, product, transaction},
    errors::{Error, Result},
};

/// Maximum product name length, matching the stored column width.
pub const NAME_MAX_LEN: usize = 100;

/// How product names are compared for the uniqueness check.
///
/// The uniqueness policy is an explicit configuration choice rather than an
/// accident of index collation. The default is exact-match (case-sensitive),
/// so "Widget" and "widget" may coexist.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameCollation {
    /// Exact-match comparison; "Widget" and "widget" are distinct names.
    #[default]
    CaseSensitive,
    /// Case-folded comparison; "Widget" and "widget" collide.
    CaseInsensitive,
}

/// Validates and normalizes a product name, returning the trimmed form.
///
/// # Errors
/// Returns [`Error::EmptyName`] for blank/whitespace-only names and
/// [`Error::NameTooLong`] past the column limit.
pub fn validate_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyName);
    }
    if trimmed.chars().count() > NAME_MAX_LEN {
        return Err(Error::NameTooLong {
            len: trimmed.chars().count(),
            max: NAME_MAX_LEN,
        });
    }
    Ok(trimmed)
}

fn validate_beginning_balance(balance: Decimal) -> Result<Decimal> {
    if balance < Decimal::ZERO {
        return Err(Error::NegativeBalance { balance });
    }
    // Stored with two fractional digits, like the ledger's quantities.
    Ok(balance.round_dp(2))
}

/// Retrieves all products, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a product by name under the given collation, returning None if no
/// product matches.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_name(
    db: &DatabaseConnection,
    name: &str,
    collation: NameCollation,
) -> Result<Option<product::Model>> {
    let query = match collation {
        NameCollation::CaseSensitive => {
            Product::find().filter(product::Column::Name.eq(name))
        }
        NameCollation::CaseInsensitive => Product::find().filter(
            Expr::expr(Func::lower(Expr::col(product::Column::Name)))
                .eq(name.to_lowercase()),
        ),
    };
    query.one(db).await.map_err(Into::into)
}

/// Creates a new product with the specified name and beginning balance.
///
/// The name is trimmed and checked for uniqueness against the store before
/// the insert. The check-then-insert pair is not atomic against concurrent
/// external writers; this is acceptable under the single-user desktop
/// assumption, and the unique index on `name` backstops it.
///
/// # Errors
/// Returns an error if:
/// - The name is empty, whitespace-only, or too long
/// - The beginning balance is negative
/// - A product with the same name (under `collation`) already exists
/// - The database insert fails
pub async fn create_product(
    db: &DatabaseConnection,
    name: String,
    beginning_balance: Decimal,
    collation: NameCollation,
) -> Result<product::Model> {
    let trimmed = validate_name(&name)?.to_string();
    let beginning_balance = validate_beginning_balance(beginning_balance)?;

    if get_product_by_name(db, &trimmed, collation).await?.is_some() {
        return Err(Error::DuplicateName { name: trimmed });
    }

    let product = product::ActiveModel {
        name: Set(trimmed),
        beginning_balance: Set(beginning_balance),
        ..Default::default()
    };
    product.insert(db).await.map_err(Into::into)
}

/// Replaces an existing product's name and beginning balance.
///
/// Mutation is full-record replacement; there are no partial-patch
/// semantics. The duplicate check excludes the product being updated, so
/// saving a product under its own current name succeeds.
///
/// # Errors
/// Returns an error if:
/// - The name or balance fails validation
/// - The product does not exist
/// - Another product already holds the new name
/// - The database update fails
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    new_name: String,
    new_beginning_balance: Decimal,
    collation: NameCollation,
) -> Result<product::Model> {
    let trimmed = validate_name(&new_name)?.to_string();
    let new_beginning_balance = validate_beginning_balance(new_beginning_balance)?;

    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?
        .into();

    if let Some(other) = get_product_by_name(db, &trimmed, collation).await? {
        if other.id != product_id {
            return Err(Error::DuplicateName { name: trimmed });
        }
    }

    product.name = Set(trimmed);
    product.beginning_balance = Set(new_beginning_balance);

    product.update(db).await.map_err(Into::into)
}

/// Deletes a product and every transaction that references it.
///
/// Both deletes run inside one database transaction, so either the product
/// and all its transactions disappear together or nothing changes.
///
/// # Errors
/// Returns [`Error::ProductNotFound`] if the product does not exist, or a
/// database error if any step fails.
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let product = Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    Transaction::delete_many()
        .filter(transaction::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?;

    product.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::TransactionKind;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_product_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        // Empty name
        let result =
            create_product(&db, String::new(), dec!(10), NameCollation::CaseSensitive).await;
        assert!(matches!(result.unwrap_err(), Error::EmptyName));

        // Whitespace-only name
        let result =
            create_product(&db, "   ".to_string(), dec!(10), NameCollation::CaseSensitive).await;
        assert!(matches!(result.unwrap_err(), Error::EmptyName));

        // Name over the column limit
        let long_name = "x".repeat(NAME_MAX_LEN + 1);
        let result =
            create_product(&db, long_name, dec!(10), NameCollation::CaseSensitive).await;
        assert!(matches!(result.unwrap_err(), Error::NameTooLong { .. }));

        // Negative beginning balance
        let result = create_product(
            &db,
            "Widget".to_string(),
            dec!(-1),
            NameCollation::CaseSensitive,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::NegativeBalance { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let product = create_product(
            &db,
            "  Laptop Dell XPS 13  ".to_string(),
            dec!(10),
            NameCollation::CaseSensitive,
        )
        .await?;

        // Name is trimmed, balance rounded to two fractional digits
        assert_eq!(product.name, "Laptop Dell XPS 13");
        assert_eq!(product.beginning_balance, dec!(10.00));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_duplicate_name() -> Result<()> {
        let db = setup_test_db().await?;

        create_product(
            &db,
            "Widget".to_string(),
            dec!(5),
            NameCollation::CaseSensitive,
        )
        .await?;

        let result = create_product(
            &db,
            "Widget".to_string(),
            dec!(7),
            NameCollation::CaseSensitive,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::DuplicateName { name } if name == "Widget"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_different_case_succeeds_by_default() -> Result<()> {
        let db = setup_test_db().await?;

        create_product(
            &db,
            "Widget".to_string(),
            dec!(5),
            NameCollation::CaseSensitive,
        )
        .await?;

        // Exact-match uniqueness: different case is a different name
        let lower = create_product(
            &db,
            "widget".to_string(),
            dec!(5),
            NameCollation::CaseSensitive,
        )
        .await?;
        assert_eq!(lower.name, "widget");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_case_insensitive_collation() -> Result<()> {
        let db = setup_test_db().await?;

        create_product(
            &db,
            "Widget".to_string(),
            dec!(5),
            NameCollation::CaseInsensitive,
        )
        .await?;

        let result = create_product(
            &db,
            "widget".to_string(),
            dec!(5),
            NameCollation::CaseInsensitive,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::DuplicateName { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_integration() -> Result<()> {
        let (db, product) = setup_with_product().await?;

        let updated = update_product(
            &db,
            product.id,
            "Renamed".to_string(),
            dec!(25.50),
            NameCollation::CaseSensitive,
        )
        .await?;

        assert_eq!(updated.id, product.id);
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.beginning_balance, dec!(25.50));

        // Verify the replacement persisted
        let retrieved = get_product_by_id(&db, product.id).await?.unwrap();
        assert_eq!(retrieved.name, "Renamed");
        assert_eq!(retrieved.beginning_balance, dec!(25.50));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_keeps_own_name() -> Result<()> {
        let (db, product) = setup_with_product().await?;

        // Saving under the product's current name is not a duplicate
        let updated = update_product(
            &db,
            product.id,
            product.name.clone(),
            dec!(99),
            NameCollation::CaseSensitive,
        )
        .await?;
        assert_eq!(updated.name, product.name);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_duplicate_of_other() -> Result<()> {
        let db = setup_test_db().await?;

        create_product(&db, "A".to_string(), dec!(1), NameCollation::CaseSensitive).await?;
        let b = create_product(&db, "B".to_string(), dec!(1), NameCollation::CaseSensitive)
            .await?;

        let result = update_product(
            &db,
            b.id,
            "A".to_string(),
            dec!(1),
            NameCollation::CaseSensitive,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::DuplicateName { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_product(
            &db,
            999,
            "Ghost".to_string(),
            dec!(1),
            NameCollation::CaseSensitive,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ProductNotFound { id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product_cascades_transactions() -> Result<()> {
        let db = setup_test_db().await?;

        let keep = create_test_product(&db, "Keep").await?;
        let doomed = create_test_product(&db, "Doomed").await?;

        create_test_transaction(&db, keep.id, dec!(1), TransactionKind::In).await?;
        create_test_transaction(&db, doomed.id, dec!(2), TransactionKind::In).await?;
        create_test_transaction(&db, doomed.id, dec!(3), TransactionKind::Out).await?;

        delete_product(&db, doomed.id).await?;

        // The product row is gone
        assert!(get_product_by_id(&db, doomed.id).await?.is_none());

        // No transaction referencing it survives; the other product's remain
        let remaining = crate::core::transaction::get_all_transactions(&db).await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].product_id, keep.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = delete_product(&db, 999).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ProductNotFound { id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_products_ordered_by_name() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_product(&db, "Zebra Cable").await?;
        create_test_product(&db, "Anvil").await?;

        let products = get_all_products(&db).await?;
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Anvil");
        assert_eq!(products[1].name, "Zebra Cable");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_product_by_name() -> Result<()> {
        let (db, product) = setup_with_product().await?;

        let found = get_product_by_name(&db, &product.name, NameCollation::CaseSensitive).await?;
        assert_eq!(found.unwrap().id, product.id);

        let missing =
            get_product_by_name(&db, "No Such Thing", NameCollation::CaseSensitive).await?;
        assert!(missing.is_none());

        Ok(())
    }
}
