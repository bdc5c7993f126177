//! Ledger arithmetic - derives current balances from transaction history.
//!
//! The current balance of a product is never stored. It is always computed as
//! `beginning_balance + sum(signed quantity)` over the product's
//! transactions, in exact decimal arithmetic, so the stored data can never
//! drift from the derived figure.

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

use crate::{
    core::{product, transaction},
    entities::{TransactionKind, transaction as txn},
    errors::{Error, Result},
};

/// Signed contribution of a single transaction: `+quantity` for In,
/// `-quantity` for Out.
#[must_use]
pub fn signed_quantity(transaction: &txn::Model) -> Decimal {
    match transaction.kind {
        TransactionKind::In => transaction.quantity,
        TransactionKind::Out => -transaction.quantity,
    }
}

/// Computes a current balance from a beginning balance and a transaction
/// history. Pure and O(n); an empty history yields the beginning balance.
///
/// The caller is responsible for passing only transactions that belong to
/// the product in question.
#[must_use]
pub fn current_balance(beginning_balance: Decimal, transactions: &[txn::Model]) -> Decimal {
    transactions
        .iter()
        .fold(beginning_balance, |acc, t| acc + signed_quantity(t))
}

/// Reads a product and its transactions from the store and computes the
/// current balance.
///
/// Note that an Out transaction can drive the result below zero; recording
/// does not guard against overdraw, so callers must expect negative balances.
///
/// # Errors
/// Returns [`Error::ProductNotFound`] if the product does not exist, or a
/// database error if either query fails.
pub async fn product_balance(db: &DatabaseConnection, product_id: i64) -> Result<Decimal> {
    let found = product::get_product_by_id(db, product_id)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    let transactions = transaction::get_transactions_for_product(db, product_id).await?;
    Ok(current_balance(found.beginning_balance, &transactions))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn txn_model(id: i64, quantity: Decimal, kind: TransactionKind) -> txn::Model {
        txn::Model {
            id,
            product_id: 1,
            quantity,
            kind,
            date: Utc::now(),
            notes: None,
        }
    }

    #[test]
    fn test_empty_history_yields_beginning_balance() {
        assert_eq!(current_balance(dec!(10.00), &[]), dec!(10.00));
    }

    #[test]
    fn test_in_and_out_transactions_combine() {
        // Laptop scenario: begin 10, +5 In, -2 Out => 13
        let history = vec![
            txn_model(1, dec!(5), TransactionKind::In),
            txn_model(2, dec!(2), TransactionKind::Out),
        ];
        assert_eq!(current_balance(dec!(10), &history), dec!(13));
    }

    #[test]
    fn test_balance_can_go_negative() {
        let history = vec![txn_model(1, dec!(100), TransactionKind::Out)];
        assert_eq!(current_balance(dec!(5), &history), dec!(-95));
    }

    #[test]
    fn test_signed_quantity() {
        assert_eq!(
            signed_quantity(&txn_model(1, dec!(4.25), TransactionKind::In)),
            dec!(4.25)
        );
        assert_eq!(
            signed_quantity(&txn_model(2, dec!(4.25), TransactionKind::Out)),
            dec!(-4.25)
        );
    }

    #[test]
    fn test_many_small_movements_stay_exact() {
        // 0.10 added a thousand times must equal exactly 100.00
        let history: Vec<txn::Model> = (0..1000)
            .map(|i| txn_model(i, dec!(0.10), TransactionKind::In))
            .collect();
        assert_eq!(current_balance(dec!(0), &history), dec!(100.00));
    }

    #[tokio::test]
    async fn test_product_balance_integration() -> crate::errors::Result<()> {
        let (db, product) = setup_with_product().await?;

        create_test_transaction(&db, product.id, dec!(5), TransactionKind::In).await?;
        create_test_transaction(&db, product.id, dec!(2), TransactionKind::Out).await?;

        // Beginning balance of the test product is 10.00
        let balance = product_balance(&db, product.id).await?;
        assert_eq!(balance, dec!(13.00));

        Ok(())
    }

    #[tokio::test]
    async fn test_product_balance_unknown_product() -> crate::errors::Result<()> {
        let db = setup_test_db().await?;

        let result = product_balance(&db, 999).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ProductNotFound { id: 999 }
        ));

        Ok(())
    }
}
