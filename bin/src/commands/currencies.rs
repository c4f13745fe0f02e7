//! Currencies command implementation.
//!
//! This module lists the supported currencies, from the built-in list or
//! from the upstream rate source.

use anyhow::Result;
use ratelens_lib::{ClientConfig, CurrencyRegistry, RatesClient};

/// List currencies with an optional search pattern.
pub(crate) async fn list_currencies(
    search: Option<&str>,
    online: bool,
    upstream_url: Option<&str>,
) -> Result<()> {
    let registry = if online {
        fetch_registry(upstream_url).await?
    } else {
        CurrencyRegistry::fallback().clone()
    };

    let currencies: Vec<_> = match search {
        Some(pattern) => registry.search(pattern),
        None => registry.all().collect(),
    };

    if currencies.is_empty() {
        println!("No currencies found.");
        return Ok(());
    }

    println!("{:<8} {:<30}", "CODE", "NAME");
    println!("{}", "-".repeat(38));

    for currency in &currencies {
        println!("{:<8} {:<30}", currency.code(), currency.name());
    }

    println!("\nTotal: {} currencies", currencies.len());
    Ok(())
}

/// Fetches the upstream listing, falling back to the built-in list.
async fn fetch_registry(upstream_url: Option<&str>) -> Result<CurrencyRegistry> {
    let config = match upstream_url {
        Some(url) => ClientConfig::default().with_base_url(url),
        None => ClientConfig::default(),
    };
    let client = RatesClient::new(config)?;

    let registry = match client.fetch_currencies().await {
        Ok(listing) => CurrencyRegistry::from_upstream(listing),
        Err(e) => {
            tracing::warn!(error = %e, "Currency listing unavailable, using built-in list");
            CurrencyRegistry::default()
        }
    };

    if registry.is_empty() {
        return Ok(CurrencyRegistry::fallback().clone());
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_upstream_falls_back() {
        let registry = fetch_registry(Some("http://127.0.0.1:9")).await.unwrap();
        assert_eq!(&registry, CurrencyRegistry::fallback());
    }
}
