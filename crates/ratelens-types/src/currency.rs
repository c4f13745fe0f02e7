//! Currency definitions.

use serde::{Deserialize, Serialize};

use crate::normalize_code;

/// Pivot base all fetched rates are expressed against.
pub const BASE_CURRENCY: &str = "USD";

/// A currency supported by the rate source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency {
    /// ISO 4217 code (e.g., "EUR").
    code: String,
    /// Human-readable name (e.g., "Euro").
    name: String,
}

impl Currency {
    /// Creates a new currency, normalizing the code.
    #[must_use]
    pub fn new(code: impl AsRef<str>, name: impl Into<String>) -> Self {
        Self {
            code: normalize_code(code.as_ref()),
            name: name.into(),
        }
    }

    /// Returns the currency code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if this is the pivot base currency.
    #[must_use]
    pub fn is_base(&self) -> bool {
        self.code == BASE_CURRENCY
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_creation() {
        let currency = Currency::new("eur", "Euro");

        assert_eq!(currency.code(), "EUR");
        assert_eq!(currency.name(), "Euro");
        assert!(!currency.is_base());
        assert_eq!(currency.to_string(), "Euro (EUR)");
    }

    #[test]
    fn test_base_currency() {
        assert!(Currency::new("USD", "United States Dollar").is_base());
    }
}
