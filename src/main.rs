//! Purr Cache - diagnostic entry point
//!
//! Builds a cache manager from the environment, logs the policy table and
//! prints per-category statistics as JSON.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use purr_cache::{CacheManager, Category, Config};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache manager and its category pools
/// 4. Print statistics for every pool
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "purr_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!("Configuration loaded: max_entries={}", config.max_entries);

    let manager = CacheManager::from_config(&config);

    for category in Category::ALL {
        let policy = category.policy();
        info!(
            "Pool '{}': ttl={}ms strategy={} transform={}",
            category,
            policy.ttl_ms,
            policy.strategy.as_str(),
            policy.transform_on_store
        );
    }

    println!("{}", serde_json::to_string_pretty(&manager.all_stats())?);
    Ok(())
}
