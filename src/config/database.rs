//! Database connection and schema creation using `SeaORM`.
//!
//! The schema is generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the tables always match the Rust
//! structs without hand-written SQL. The default store is a local `SQLite`
//! file; `DATABASE_URL` (or `database_url` in `config.toml`) points the
//! crate at any other `SQLite` location, including `sqlite::memory:`.

use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait, Schema};

use crate::core::{product, transaction};
use crate::entities::{Product, Transaction, TransactionKind};
use crate::errors::Result;

/// Resolves the database URL: explicit override, then `DATABASE_URL`, then
/// the default local file.
#[must_use]
pub fn resolve_database_url(override_url: Option<&str>) -> String {
    override_url.map_or_else(
        || {
            std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data/stockbook.sqlite?mode=rwc".to_string())
        },
        ToString::to_string,
    )
}

/// Establishes a connection to the database.
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection(override_url: Option<&str>) -> Result<DatabaseConnection> {
    let database_url = resolve_database_url(override_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the product and transaction tables from the entity definitions.
///
/// # Errors
/// Returns an error if a table statement fails to execute.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let product_table = schema
        .create_table_from_entity(Product)
        .if_not_exists()
        .to_owned();
    let transaction_table = schema
        .create_table_from_entity(Transaction)
        .if_not_exists()
        .to_owned();

    db.execute(builder.build(&product_table)).await?;
    db.execute(builder.build(&transaction_table)).await?;

    Ok(())
}

/// Seeds the demo catalog on first run: two products with opening stock and
/// three historical movements. Does nothing once any product exists.
///
/// # Errors
/// Returns an error if any insert fails.
pub async fn seed_initial_products(db: &DatabaseConnection) -> Result<()> {
    use crate::core::product::NameCollation;

    if Product::find().count(db).await? > 0 {
        return Ok(());
    }

    let laptop = product::create_product(
        db,
        "Laptop Dell XPS 13".to_string(),
        Decimal::from(10),
        NameCollation::CaseSensitive,
    )
    .await?;
    let surface = product::create_product(
        db,
        "Microsoft Surface Pro".to_string(),
        Decimal::from(15),
        NameCollation::CaseSensitive,
    )
    .await?;

    transaction::record_transaction(
        db,
        laptop.id,
        Decimal::from(5),
        TransactionKind::In,
        None,
        Some("Initial stock".to_string()),
    )
    .await?;
    transaction::record_transaction(
        db,
        surface.id,
        Decimal::from(8),
        TransactionKind::In,
        None,
        Some("Initial stock".to_string()),
    )
    .await?;
    transaction::record_transaction(
        db,
        laptop.id,
        Decimal::from(2),
        TransactionKind::Out,
        None,
        Some("First order".to_string()),
    )
    .await?;

    tracing::info!("Seeded initial product catalog.");
    Ok(())
}
