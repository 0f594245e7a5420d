//! Set of currency pairs the provider currently quotes.

use std::collections::BTreeMap;

use super::currency::{CurrencyPair, pair_key};

/// Pair key (`BASE-TARGET`) to human-readable description.
///
/// Built once from the provider's catalog document and never mutated
/// afterwards, so it can be shared behind an `Arc` and read concurrently
/// without locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairCatalog {
    entries: BTreeMap<String, String>,
}

impl PairCatalog {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    /// Membership check on raw query values; no case folding or trimming.
    pub fn allows(&self, base: &str, target: &str) -> bool {
        self.entries.contains_key(&pair_key(base, target))
    }

    pub fn contains(&self, pair: &CurrencyPair) -> bool {
        self.entries.contains_key(&pair.key())
    }

    pub fn description(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn into_entries(self) -> BTreeMap<String, String> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PairCatalog {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> PairCatalog {
        [
            ("USD-BRL", "Dólar Americano/Real Brasileiro"),
            ("EUR-BRL", "Euro/Real Brasileiro"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_allows_is_exact_and_ordered() {
        let catalog = catalog();
        assert!(catalog.allows("USD", "BRL"));
        assert!(!catalog.allows("BRL", "USD"));
        assert!(!catalog.allows("usd", "BRL"));
        assert!(!catalog.allows("USD", "EUR"));
    }

    #[test]
    fn test_contains_pair() {
        let catalog = catalog();
        let pair = CurrencyPair::new("EUR".parse().unwrap(), "BRL".parse().unwrap());
        assert!(catalog.contains(&pair));
        assert_eq!(
            catalog.description(&pair.key()),
            Some("Euro/Real Brasileiro")
        );
    }

    #[test]
    fn test_empty_catalog_allows_nothing() {
        let catalog = PairCatalog::default();
        assert!(catalog.is_empty());
        assert!(!catalog.allows("USD", "BRL"));
    }
}
