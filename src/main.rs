//! Headless entry point: initializes the store, refreshes the local cache,
//! and prints a stock summary plus the current month's movement report.

use chrono::{Datelike, Utc};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use stockbook::cache::InventoryCache;
use stockbook::config::{self, database, settings::Settings};
use stockbook::core::report::{self, ReportExporter, ReportHeader, TextExporter};
use stockbook::core::transaction;
use stockbook::errors::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars may also be set externally
    dotenv().ok();

    // 3. Load application configuration and settings
    let app_config = config::load_config("config.toml")
        .inspect_err(|e| error!("Failed to load application configuration: {e}"))?;
    let settings = Settings::load("settings.json")
        .inspect_err(|e| error!("Failed to load settings: {e}"))?;

    // 4. Initialize the database
    let db = database::create_connection(app_config.database_url.as_deref())
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db).await?;
    database::seed_initial_products(&db).await?;
    info!("Database initialized successfully.");

    // 5. Refresh the local cache and print current balances
    let mut cache = InventoryCache::new();
    cache.reload(&db).await?;

    println!("Current stock:");
    for product in cache.products() {
        let balance = cache.current_balance(product.id).unwrap_or_default();
        println!("  {:<30}  {balance:>10.2}", product.name);
    }
    println!();

    // 6. Print this month's movement report
    let today = Utc::now().date_naive();
    let month_start = today.with_day(1).unwrap_or(today);

    let transactions = transaction::filter_transactions(&db, None, month_start, today).await?;
    let rows = report::build_report(&transactions, &cache.name_lookup());
    let header = ReportHeader {
        title: "Inventory Movement Report".to_string(),
        company_name: settings.company_name,
        from: month_start,
        to: today,
        generated_at: Utc::now(),
    };

    let mut exporter = TextExporter::new(std::io::stdout().lock());
    exporter.export(&header, &rows)?;

    Ok(())
}
