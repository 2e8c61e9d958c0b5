use std::hash::{BuildHasher, Hash};

use tracing::{debug, trace};

use super::hasher::DefaultHashBuilder;
use crate::{Error, OrderedContainer, Result};

pub const DEFAULT_CAPACITY: usize = 16;
const MAX_LOAD_NUM: usize = 3;
const MAX_LOAD_DEN: usize = 4;

/// Separate-chaining hash table.
///
/// Each bucket is one chain; a key lives in bucket `hash(key) % capacity`.
/// Before a new key goes in, the table doubles its capacity and rehashes every
/// entry if the load factor after the insertion would exceed 3/4. Buckets carry
/// no key order, so the order queries scan the whole table.
#[derive(Clone)]
pub struct HashTableMap<K, V, S = DefaultHashBuilder> {
    buckets: Vec<Vec<(K, V)>>,
    len: usize,
    hash_builder: S,
}

impl<K, V> HashTableMap<K, V, DefaultHashBuilder> {
    /// Table with `capacity` buckets (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V, S> HashTableMap<K, V, S> {
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hash_builder)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            buckets: Self::empty_buckets(capacity.max(1)),
            len: 0,
            hash_builder,
        }
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Shortest non-empty chain; 0 when the table is empty.
    pub fn min_chain_length(&self) -> usize {
        self.chain_lengths().min().unwrap_or(0)
    }

    /// Longest chain; 0 when the table is empty.
    pub fn max_chain_length(&self) -> usize {
        self.chain_lengths().max().unwrap_or(0)
    }

    /// Mean length over non-empty chains; 0.0 when the table is empty.
    pub fn avg_chain_length(&self) -> f64 {
        let chains = self.chain_lengths().count();
        if chains == 0 {
            return 0.0;
        }
        self.len as f64 / chains as f64
    }

    fn chain_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.iter().map(Vec::len).filter(|&n| n > 0)
    }

    fn empty_buckets(capacity: usize) -> Vec<Vec<(K, V)>> {
        std::iter::repeat_with(Vec::new).take(capacity).collect()
    }

    fn entries(&self) -> impl Iterator<Item = &(K, V)> + '_ {
        self.buckets.iter().flatten()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> HashTableMap<K, V, S> {
    fn bucket_index(&self, key: &K) -> usize {
        (self.hash_builder.hash_one(key) % self.buckets.len() as u64) as usize
    }

    fn chain(&self, key: &K) -> &[(K, V)] {
        &self.buckets[self.bucket_index(key)]
    }

    fn would_overload(&self) -> bool {
        (self.len + 1) * MAX_LOAD_DEN > self.buckets.len() * MAX_LOAD_NUM
    }

    fn grow(&mut self) {
        let old_capacity = self.buckets.len();
        let new_capacity = old_capacity * 2;
        let old = std::mem::replace(&mut self.buckets, Self::empty_buckets(new_capacity));
        for (key, value) in old.into_iter().flatten() {
            let idx = self.bucket_index(&key);
            self.buckets[idx].push((key, value));
        }
        debug!(old_capacity, new_capacity, len = self.len, "hash table grew");
    }
}

impl<K, V, S: Default> Default for HashTableMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> OrderedContainer for HashTableMap<K, V, S>
where
    K: Ord + Clone + Hash,
    S: BuildHasher + Default,
{
    type Key = K;
    type Value = V;

    fn new() -> Self {
        Self::default()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, key: &Self::Key) -> Result<&Self::Value> {
        self.chain(key)
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .ok_or(Error::KeyNotFound)
    }

    fn get_mut(&mut self, key: &Self::Key) -> Result<&mut Self::Value> {
        let idx = self.bucket_index(key);
        self.buckets[idx]
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .ok_or(Error::KeyNotFound)
    }

    fn insert(&mut self, key: Self::Key, value: Self::Value) -> Option<Self::Value> {
        let idx = self.bucket_index(&key);
        if let Some((_, slot)) = self.buckets[idx].iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(slot, value));
        }

        let idx = if self.would_overload() {
            self.grow();
            self.bucket_index(&key)
        } else {
            idx
        };
        self.buckets[idx].push((key, value));
        self.len += 1;
        None
    }

    fn erase(&mut self, key: &Self::Key) -> Result<Self::Value> {
        let idx = self.bucket_index(key);
        let chain = &mut self.buckets[idx];
        let pos = chain
            .iter()
            .position(|(k, _)| k == key)
            .ok_or(Error::KeyNotFound)?;
        let (_, value) = chain.swap_remove(pos);
        self.len -= 1;
        Ok(value)
    }

    fn contains(&self, key: &Self::Key) -> bool {
        self.chain(key).iter().any(|(k, _)| k == key)
    }

    fn find_keys(&self, k1: &Self::Key, k2: &Self::Key) -> Vec<Self::Key> {
        let mut out: Vec<K> = self
            .entries()
            .filter(|(k, _)| k1 <= k && k <= k2)
            .map(|(k, _)| k.clone())
            .collect();
        out.sort_unstable();
        out
    }

    fn sorted_keys(&self) -> Vec<Self::Key> {
        let mut out: Vec<K> = self.entries().map(|(k, _)| k.clone()).collect();
        out.sort_unstable();
        out
    }

    fn next_key(&self, key: &Self::Key) -> Option<Self::Key> {
        self.entries()
            .map(|(k, _)| k)
            .filter(|k| *k > key)
            .min()
            .cloned()
    }

    fn prev_key(&self, key: &Self::Key) -> Option<Self::Key> {
        self.entries()
            .map(|(k, _)| k)
            .filter(|k| *k < key)
            .max()
            .cloned()
    }

    /// Drops every entry but keeps the current capacity.
    fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
        trace!(capacity = self.buckets.len(), "hash table cleared");
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashTableMap<K, V, S>
where
    K: Ord + Clone + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        OrderedContainer::extend(&mut map, iter);
        map
    }
}
