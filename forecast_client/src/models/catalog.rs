//! Selectable instruments, as listed by the catalog endpoint.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Canonical spelling of a ticker symbol: trimmed and upper-cased.
pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: String,
    pub name: String,
}

/// Instruments in service order, keyed by normalized symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    instruments: IndexMap<String, Instrument>,
}

impl Catalog {
    /// Builds a catalog, normalizing symbols.
    ///
    /// Blank symbols are dropped and the first occurrence of a duplicate wins,
    /// so the order the service chose is preserved.
    pub fn from_instruments(items: impl IntoIterator<Item = Instrument>) -> Self {
        let mut instruments = IndexMap::new();
        for mut item in items {
            item.symbol = normalize_symbol(&item.symbol);
            item.name = item.name.trim().to_string();
            if item.symbol.is_empty() || instruments.contains_key(&item.symbol) {
                continue;
            }
            instruments.insert(item.symbol.clone(), item);
        }
        Self { instruments }
    }

    pub fn get(&self, symbol: &str) -> Option<&Instrument> {
        self.instruments.get(&normalize_symbol(symbol))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.values()
    }

    pub fn first(&self) -> Option<&Instrument> {
        self.instruments.first().map(|(_, item)| item)
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}
