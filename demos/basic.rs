//! Stores a value with a two second TTL and reads it before and after expiry.
//!
//! Run with `cargo run --example basic`.

use std::thread::sleep;
use std::time::Duration;

use recycle_cache::Cache;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "basic=info,recycle_cache=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cache: Cache<&str, &str> = Cache::new();
    cache.set_with_expiration("key", "value", Duration::from_secs(2));
    info!("get before expiry: {:?}", cache.get("key"));

    let value = cache.get("key")?;
    info!("value: {}", value);

    sleep(Duration::from_secs(2));
    info!("get after expiry: {:?}", cache.get("key"));
    info!("stats: {:?}", cache.stats());

    Ok(())
}
