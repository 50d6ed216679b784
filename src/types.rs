use std::collections::HashMap;
use std::hash::Hash;

use crate::auction::ItemId;

/// A sparse map with an explicit default value.
///
/// Lookups for absent keys return the default instead of failing, which makes
/// the map total over its key type. Bidder utilities use this so that an item
/// a bidder never listed still has a well-defined (usually zero) value.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultMap<K: Eq + Hash, V> {
    entries: HashMap<K, V>,
    default: V,
}

impl<K: Eq + Hash, V> DefaultMap<K, V> {
    pub fn new(default: V) -> Self {
        Self {
            entries: HashMap::new(),
            default,
        }
    }

    pub fn from_entries<I>(default: V, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            entries: entries.into_iter().collect(),
            default,
        }
    }

    /// Returns the stored value for `key`, or the default when absent.
    pub fn get(&self, key: &K) -> &V {
        self.entries.get(key).unwrap_or(&self.default)
    }

    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    pub fn default_value(&self) -> &V {
        &self.default
    }

    /// Number of explicitly stored entries (the map itself is total).
    pub fn stored_len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }
}

/// Per-bidder valuation of items; total over all `ItemId`s via the default.
pub type UtilityMap = DefaultMap<ItemId, f64>;

/// A bid mapping produced by a strategy: item -> non-negative bid.
pub type BidMap = HashMap<ItemId, f64>;
