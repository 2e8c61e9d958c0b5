use crate::{Error, OrderedContainer, Result};

/// Unsorted vector of entries. Every keyed operation is a linear scan.
#[derive(Clone)]
pub struct ArrayMap<K: Ord, V> {
    data: Vec<(K, V)>,
}

impl<K: Ord, V> ArrayMap<K, V> {
    fn position(&self, key: &K) -> Option<usize> {
        self.data.iter().position(|(k, _)| k == key)
    }
}

impl<K: Ord, V> Default for ArrayMap<K, V> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<K: Ord + Clone, V> OrderedContainer for ArrayMap<K, V> {
    type Key = K;
    type Value = V;

    fn new() -> Self {
        Self::default()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn get(&self, key: &Self::Key) -> Result<&Self::Value> {
        self.data
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .ok_or(Error::KeyNotFound)
    }

    fn get_mut(&mut self, key: &Self::Key) -> Result<&mut Self::Value> {
        self.data
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .ok_or(Error::KeyNotFound)
    }

    fn insert(&mut self, key: Self::Key, value: Self::Value) -> Option<Self::Value> {
        match self.position(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.data[idx].1, value)),
            None => {
                self.data.push((key, value));
                None
            }
        }
    }

    fn erase(&mut self, key: &Self::Key) -> Result<Self::Value> {
        let idx = self.position(key).ok_or(Error::KeyNotFound)?;
        // Entry order carries no meaning here.
        Ok(self.data.swap_remove(idx).1)
    }

    fn contains(&self, key: &Self::Key) -> bool {
        self.position(key).is_some()
    }

    fn find_keys(&self, k1: &Self::Key, k2: &Self::Key) -> Vec<Self::Key> {
        let mut out: Vec<K> = self
            .data
            .iter()
            .filter(|(k, _)| k1 <= k && k <= k2)
            .map(|(k, _)| k.clone())
            .collect();
        out.sort_unstable();
        out
    }

    fn sorted_keys(&self) -> Vec<Self::Key> {
        let mut out: Vec<K> = self.data.iter().map(|(k, _)| k.clone()).collect();
        out.sort_unstable();
        out
    }

    fn next_key(&self, key: &Self::Key) -> Option<Self::Key> {
        self.data
            .iter()
            .map(|(k, _)| k)
            .filter(|k| *k > key)
            .min()
            .cloned()
    }

    fn prev_key(&self, key: &Self::Key) -> Option<Self::Key> {
        self.data
            .iter()
            .map(|(k, _)| k)
            .filter(|k| *k < key)
            .max()
            .cloned()
    }

    fn clear(&mut self) {
        self.data.clear();
    }
}

impl<K: Ord + Clone, V> FromIterator<(K, V)> for ArrayMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        OrderedContainer::extend(&mut map, iter);
        map
    }
}
