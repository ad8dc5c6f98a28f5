//! Parlor Billing Fixture Seeder
//!
//! Populates the development database with realms and remote servers in
//! every billing state the billing pages deal with, then prints the
//! generated remote server credentials.

use std::time::Duration;

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use parlor_billing::{PgDatastore, RedisCache, StripeClient, StripePaymentProvider};
use parlor_seeder::{report, SeedOptions, Seeder};

/// Populate the development database with billing fixtures
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Options {
    /// Only recreate remote server registrations, skipping realm profiles
    #[arg(long)]
    only_remote_server: bool,
}

/// Create a database connection pool
async fn create_db_pool() -> anyhow::Result<sqlx::PgPool> {
    #[allow(clippy::expect_used)] // Fail-fast on startup if required config is missing
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await?;

    info!("Database pool created");
    Ok(pool)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let options = Options::parse();

    info!("Starting Parlor billing fixture seeder");

    let pool = create_db_pool().await?;
    let store = PgDatastore::new(pool);

    let stripe = StripeClient::from_env()?;
    let payments = StripePaymentProvider::new(stripe);

    let redis_url =
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
    let cache = RedisCache::connect(&redis_url).await?;

    let seeder = Seeder::new(store, payments, cache);
    let credentials = seeder
        .run(&SeedOptions {
            only_remote_server: options.only_remote_server,
        })
        .await?;

    print!("{}", report::render(&credentials));

    info!("Billing fixtures seeded");

    Ok(())
}
