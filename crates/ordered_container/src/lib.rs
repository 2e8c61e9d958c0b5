mod error;

pub mod impls;

pub use error::{Error, Result};

/// Ordered map interface shared by every backing variant.
///
/// - Keys are unique.
/// - `insert` overwrites the value of an existing key and returns the old one;
///   the structure and `len` are unchanged in that case.
/// - `get`, `get_mut` and `erase` fail with [`Error::KeyNotFound`] and leave the
///   map untouched when the key is absent.
/// - Key sequences are returned in ascending order regardless of the backing.
pub trait OrderedContainer: Default {
    type Key: Ord + Clone;
    type Value;

    fn new() -> Self;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, key: &Self::Key) -> Result<&Self::Value>;

    fn get_mut(&mut self, key: &Self::Key) -> Result<&mut Self::Value>;

    fn insert(&mut self, key: Self::Key, value: Self::Value) -> Option<Self::Value>;

    fn erase(&mut self, key: &Self::Key) -> Result<Self::Value>;

    fn contains(&self, key: &Self::Key) -> bool;

    /// Keys `k` with `k1 <= k <= k2`, ascending. Empty when `k1 > k2`.
    fn find_keys(&self, k1: &Self::Key, k2: &Self::Key) -> Vec<Self::Key>;

    fn sorted_keys(&self) -> Vec<Self::Key>;

    /// Smallest stored key strictly greater than `key`. `key` need not be stored.
    fn next_key(&self, key: &Self::Key) -> Option<Self::Key>;

    /// Largest stored key strictly less than `key`. `key` need not be stored.
    fn prev_key(&self, key: &Self::Key) -> Option<Self::Key>;

    fn clear(&mut self);

    fn extend<I: IntoIterator<Item = (Self::Key, Self::Value)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

pub use impls::{
    ArrayMap, AvlTreeMap, BinarySearchMap, BstMap, ChainHasher, DefaultHashBuilder, HashTableMap,
};
