//! Transaction business logic - recording, querying, and filtering stock
//! movements.
//!
//! Recording validates the quantity, notes, and product reference before any
//! write. There is deliberately no overdraw guard: an Out transaction may
//! drive the derived balance negative, and the ledger reports it as such.
//! The filtering functions implement the report query: optional product
//! filter plus an inclusive date range whose upper bound is treated as
//! end-of-day, ordered ascending by date with id as the tie-break.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};

use crate::{
    entities::{Transaction, TransactionKind, transaction},
    errors::{Error, Result},
};

/// Maximum notes length, matching the stored column width.
pub const NOTES_MAX_LEN: usize = 500;

fn validate_quantity(quantity: Decimal) -> Result<Decimal> {
    // Round to the stored precision first: a sub-cent quantity that rounds
    // to 0.00 must be rejected, never persisted as a zero movement.
    let rounded = quantity.round_dp(2);
    if rounded <= Decimal::ZERO {
        return Err(Error::NonPositiveQuantity { quantity });
    }
    Ok(rounded)
}

fn validate_notes(notes: Option<String>) -> Result<Option<String>> {
    if let Some(ref text) = notes {
        let len = text.chars().count();
        if len > NOTES_MAX_LEN {
            return Err(Error::NotesTooLong {
                len,
                max: NOTES_MAX_LEN,
            });
        }
    }
    Ok(notes)
}

/// Records a stock movement against an existing product.
///
/// The quantity must be strictly positive; direction comes from `kind`. The
/// date defaults to the current time when the caller passes `None` and is
/// always caller-overridable (backdated entries are allowed). The product
/// reference is resolved before the insert so no transaction is ever
/// persisted against a missing product.
///
/// # Errors
/// Returns an error if:
/// - The quantity is zero or negative
/// - The notes exceed the column limit
/// - The product does not exist
/// - The database insert fails
pub async fn record_transaction(
    db: &DatabaseConnection,
    product_id: i64,
    quantity: Decimal,
    kind: TransactionKind,
    date: Option<DateTime<Utc>>,
    notes: Option<String>,
) -> Result<transaction::Model> {
    let quantity = validate_quantity(quantity)?;
    let notes = validate_notes(notes)?;

    crate::core::product::get_product_by_id(db, product_id)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    let transaction = transaction::ActiveModel {
        product_id: Set(product_id),
        quantity: Set(quantity),
        kind: Set(kind),
        date: Set(date.unwrap_or_else(Utc::now)),
        notes: Set(notes),
        ..Default::default()
    };
    transaction.insert(db).await.map_err(Into::into)
}

/// Retrieves a specific transaction by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_transaction_by_id(
    db: &DatabaseConnection,
    transaction_id: i64,
) -> Result<Option<transaction::Model>> {
    Transaction::find_by_id(transaction_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all transactions, ordered ascending by date then id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_transactions(db: &DatabaseConnection) -> Result<Vec<transaction::Model>> {
    Transaction::find()
        .order_by_asc(transaction::Column::Date)
        .order_by_asc(transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every transaction for one product, ordered ascending by date
/// then id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_transactions_for_product(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Vec<transaction::Model>> {
    Transaction::find()
        .filter(transaction::Column::ProductId.eq(product_id))
        .order_by_asc(transaction::Column::Date)
        .order_by_asc(transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Selects transactions for a report: optional product filter plus an
/// inclusive date range `[from, to]` where `to` covers the whole day.
///
/// Implemented as `date >= from 00:00` and `date < to + 1 day 00:00`.
/// Results are ordered ascending by date, with id as the deterministic
/// tie-break for equal timestamps. An empty result is valid, and
/// `from > to` simply matches nothing rather than erroring.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn filter_transactions(
    db: &DatabaseConnection,
    product_id: Option<i64>,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<transaction::Model>> {
    let lower = from.and_time(NaiveTime::MIN).and_utc();
    let upper = to
        .succ_opt()
        .map_or(DateTime::<Utc>::MAX_UTC, |next| {
            next.and_time(NaiveTime::MIN).and_utc()
        });

    let mut query = Transaction::find()
        .filter(transaction::Column::Date.gte(lower))
        .filter(transaction::Column::Date.lt(upper));

    if let Some(product_id) = product_id {
        query = query.filter(transaction::Column::ProductId.eq(product_id));
    }

    query
        .order_by_asc(transaction::Column::Date)
        .order_by_asc(transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a single transaction.
///
/// Not exposed in the application surface, but part of the storage
/// contract; the derived balance adjusts automatically since nothing stored
/// depends on the deleted row.
///
/// # Errors
/// Returns [`Error::TransactionNotFound`] if the transaction does not exist,
/// or a database error if the delete fails.
pub async fn delete_transaction(db: &DatabaseConnection, transaction_id: i64) -> Result<()> {
    let transaction = Transaction::find_by_id(transaction_id)
        .one(db)
        .await?
        .ok_or(Error::TransactionNotFound { id: transaction_id })?;

    transaction.delete(db).await?;
    Ok(())
}
