use crate::{Error, OrderedContainer, Result};

/// Vector of entries kept sorted by key.
///
/// Lookups binary-search in `O(log n)`; insert and erase shift the tail.
#[derive(Clone)]
pub struct BinarySearchMap<K: Ord, V> {
    data: Vec<(K, V)>,
}

impl<K: Ord, V> BinarySearchMap<K, V> {
    fn search(&self, key: &K) -> std::result::Result<usize, usize> {
        self.data.binary_search_by(|(k, _)| k.cmp(key))
    }

    /// Index of the first entry with key `>= key`.
    fn lower_bound(&self, key: &K) -> usize {
        self.data.partition_point(|(k, _)| k < key)
    }

    /// Index of the first entry with key `> key`.
    fn upper_bound(&self, key: &K) -> usize {
        self.data.partition_point(|(k, _)| k <= key)
    }
}

impl<K: Ord, V> Default for BinarySearchMap<K, V> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<K: Ord + Clone, V> OrderedContainer for BinarySearchMap<K, V> {
    type Key = K;
    type Value = V;

    fn new() -> Self {
        Self::default()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn get(&self, key: &Self::Key) -> Result<&Self::Value> {
        let idx = self.search(key).map_err(|_| Error::KeyNotFound)?;
        Ok(&self.data[idx].1)
    }

    fn get_mut(&mut self, key: &Self::Key) -> Result<&mut Self::Value> {
        let idx = self.search(key).map_err(|_| Error::KeyNotFound)?;
        Ok(&mut self.data[idx].1)
    }

    fn insert(&mut self, key: Self::Key, value: Self::Value) -> Option<Self::Value> {
        match self.search(&key) {
            Ok(idx) => Some(std::mem::replace(&mut self.data[idx].1, value)),
            Err(idx) => {
                self.data.insert(idx, (key, value));
                None
            }
        }
    }

    fn erase(&mut self, key: &Self::Key) -> Result<Self::Value> {
        let idx = self.search(key).map_err(|_| Error::KeyNotFound)?;
        Ok(self.data.remove(idx).1)
    }

    fn contains(&self, key: &Self::Key) -> bool {
        self.search(key).is_ok()
    }

    fn find_keys(&self, k1: &Self::Key, k2: &Self::Key) -> Vec<Self::Key> {
        if k1 > k2 {
            return Vec::new();
        }
        let start = self.lower_bound(k1);
        let end = self.upper_bound(k2);
        self.data[start..end].iter().map(|(k, _)| k.clone()).collect()
    }

    fn sorted_keys(&self) -> Vec<Self::Key> {
        self.data.iter().map(|(k, _)| k.clone()).collect()
    }

    fn next_key(&self, key: &Self::Key) -> Option<Self::Key> {
        let idx = self.upper_bound(key);
        self.data.get(idx).map(|(k, _)| k.clone())
    }

    fn prev_key(&self, key: &Self::Key) -> Option<Self::Key> {
        let idx = self.lower_bound(key);
        idx.checked_sub(1)
            .and_then(|i| self.data.get(i))
            .map(|(k, _)| k.clone())
    }

    fn clear(&mut self) {
        self.data.clear();
    }
}

impl<K: Ord + Clone, V> FromIterator<(K, V)> for BinarySearchMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        OrderedContainer::extend(&mut map, iter);
        map
    }
}
