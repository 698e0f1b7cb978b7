//! Single-entry memoization keyed on the inputs of a derivation.

/// Caches one derived value together with the key it was computed from.
///
/// The value is recomputed, never patched, whenever a different key is
/// requested.
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    entry: Option<(K, V)>,
    computations: usize,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            entry: None,
            computations: 0,
        }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the cached value was computed from `key`.
    pub fn is_current(&self, key: &K) -> bool {
        matches!(&self.entry, Some((cached, _)) if cached == key)
    }

    /// Returns the cached value for `key`, computing it first if the cache is
    /// empty or holds a different key.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        if !self.is_current(&key) {
            self.entry = None;
        }
        let computations = &mut self.computations;
        let (_, value) = self.entry.get_or_insert_with(|| {
            *computations += 1;
            (key, compute())
        });
        value
    }

    /// Cached value, regardless of key.
    pub fn value(&self) -> Option<&V> {
        self.entry.as_ref().map(|(_, value)| value)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Number of times the value has been computed.
    pub fn computations(&self) -> usize {
        self.computations
    }
}
