//! Currency registry for the ratelens exchange-rate service.
//!
//! The registry maps currency codes to display names. A fixed list of common
//! currencies is embedded at compile time and serves whenever the upstream
//! listing cannot be obtained.
//!
//! # Example
//!
//! ```
//! use ratelens_currencies::CurrencyRegistry;
//!
//! let registry = CurrencyRegistry::fallback();
//!
//! if let Some(currency) = registry.get("eur") {
//!     println!("{currency}");
//! }
//! ```

#![doc(issue_tracker_base_url = "https://github.com/ratelens/ratelens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use ratelens_types::{BASE_CURRENCY, Currency, normalize_code};

/// The fallback currency list embedded at compile time.
const CURRENCIES_JSON: &str = include_str!("../data/currencies.json");

/// Fallback registry instance.
static FALLBACK: OnceLock<CurrencyRegistry> = OnceLock::new();

/// Registry of currencies keyed by upper-case code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyRegistry {
    currencies: BTreeMap<String, Currency>,
}

impl CurrencyRegistry {
    /// Returns the fixed fallback registry.
    ///
    /// The registry is initialized lazily on first access.
    #[must_use]
    pub fn fallback() -> &'static Self {
        FALLBACK.get_or_init(Self::load)
    }

    /// Loads currencies from the embedded JSON data.
    fn load() -> Self {
        let names: HashMap<String, String> =
            serde_json::from_str(CURRENCIES_JSON).expect("Invalid currencies.json");
        Self::from_upstream(names)
    }

    /// Builds a registry from a `code -> name` listing.
    ///
    /// The pivot base currency is excluded since rates are quoted against it.
    pub fn from_upstream<I, K, V>(listing: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let currencies = listing
            .into_iter()
            .map(|(code, name)| Currency::new(code, name))
            .filter(|currency| !currency.is_base() && !currency.code().is_empty())
            .map(|currency| (currency.code().to_string(), currency))
            .collect();
        Self { currencies }
    }

    /// Looks up a currency by code (case-insensitive).
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Currency> {
        self.currencies.get(&normalize_code(code))
    }

    /// Returns true if the code is known (case-insensitive).
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Returns all currencies ordered by code.
    pub fn all(&self) -> impl Iterator<Item = &Currency> {
        self.currencies.values()
    }

    /// Returns the total number of currencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    /// Searches currencies by code or name pattern (case-insensitive).
    pub fn search(&self, pattern: &str) -> Vec<&Currency> {
        let pattern = pattern.to_lowercase();
        self.currencies
            .values()
            .filter(|c| {
                c.code().to_lowercase().contains(&pattern)
                    || c.name().to_lowercase().contains(&pattern)
            })
            .collect()
    }

    /// Returns all currency codes sorted alphabetically.
    pub fn codes(&self) -> Vec<&str> {
        self.currencies.keys().map(String::as_str).collect()
    }

    /// Returns the `code -> name` mapping served to clients.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.currencies
            .iter()
            .map(|(code, currency)| (code.clone(), currency.name().to_string()))
            .collect()
    }
}

/// Returns true if `code` names the pivot base currency.
#[must_use]
pub fn is_base_code(code: &str) -> bool {
    normalize_code(code) == BASE_CURRENCY
}
