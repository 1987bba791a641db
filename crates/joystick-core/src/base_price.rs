use std::collections::HashMap;

/// Per-session map from product id to its reconstructed base price.
///
/// Seeded lazily, once, the first time a product is observed. Entries are
/// never overwritten afterwards — repeated discount toggles always compute
/// from the same stored base, so rounding error cannot compound. The only
/// way an entry leaves the cache is [`BasePriceCache::remove`] after a
/// delete.
#[derive(Debug, Default)]
pub struct BasePriceCache {
    inner: HashMap<i64, f64>,
}

impl BasePriceCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `base` for `id` if no entry exists yet, and returns the
    /// stored value either way. An existing entry always wins.
    pub fn upsert_if_absent(&mut self, id: i64, base: f64) -> f64 {
        *self.inner.entry(id).or_insert(base)
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<f64> {
        self.inner.get(&id).copied()
    }

    /// Drops the entry for a deleted product so stale ids do not linger.
    pub fn remove(&mut self, id: i64) {
        self.inner.remove(&id);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
