//! Unified error types and result handling.
//!
//! Domain failures (validation, duplicates, missing records) get their own
//! variants so callers can match on them and present a human-readable reason;
//! storage failures pass through from `SeaORM` unmodified. No operation in
//! this crate is fatal: a rejected create/edit/delete leaves prior state
//! unchanged and control returns to the caller.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Product name is empty or whitespace-only.
    #[error("product name cannot be empty")]
    EmptyName,

    /// Product name exceeds the 100-character limit.
    #[error("product name is too long: {len} characters (max {max})")]
    NameTooLong { len: usize, max: usize },

    /// Beginning balance below zero.
    #[error("beginning balance cannot be negative: {balance}")]
    NegativeBalance { balance: Decimal },

    /// Transaction quantity must be strictly positive.
    #[error("transaction quantity must be greater than zero: {quantity}")]
    NonPositiveQuantity { quantity: Decimal },

    /// Transaction notes exceed the 500-character limit.
    #[error("notes are too long: {len} characters (max {max})")]
    NotesTooLong { len: usize, max: usize },

    /// A product with this name already exists.
    #[error("a product named '{name}' already exists")]
    DuplicateName { name: String },

    /// No product with the given id.
    #[error("product not found: {id}")]
    ProductNotFound { id: i64 },

    /// No transaction with the given id.
    #[error("transaction not found: {id}")]
    TransactionNotFound { id: i64 },

    /// Configuration loading or parsing failure.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Opaque storage failure, surfaced to the caller unmodified.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem failure while reading or writing config/settings files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings document could not be parsed or serialized.
    #[error("settings error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience `Result` type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
