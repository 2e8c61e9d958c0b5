use std::cmp::Ordering;
use std::fmt::Display;

use super::render::{self, RenderNode};
use crate::{Error, OrderedContainer, Result};

/// Plain binary search tree map, never rebalanced.
///
/// Same node layout as [`AvlTreeMap`](super::AvlTreeMap) without the height
/// bookkeeping, so sorted insertion degrades it to a linked list. Since the
/// depth can reach `len`, nothing here recurses per level: mutations follow a
/// `&mut Link` cursor, traversals keep an explicit stack and `Drop` unlinks
/// nodes onto a worklist.
pub struct BstMap<K: Ord, V> {
    root: Link<K, V>,
    len: usize,
}

type Link<K, V> = Option<Box<Node<K, V>>>;

struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }
}

impl<K: Display, V> RenderNode for Node<K, V> {
    type Key = K;

    fn key(&self) -> &K {
        &self.key
    }

    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}

impl<K: Ord, V> BstMap<K, V> {
    /// Longest root-to-leaf path in nodes; 0 when empty. Walks the whole tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node<K, V>, usize)> =
            self.root.as_deref().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        height
    }

    pub fn render(&self) -> String
    where
        K: Display,
    {
        render::render(self.root.as_deref())
    }

    /// Detaches the leftmost node under `link`, splicing its right child into
    /// its place.
    fn take_min(mut link: &mut Link<K, V>) -> Link<K, V> {
        while link.as_ref().is_some_and(|node| node.left.is_some()) {
            link = &mut link.as_mut().unwrap().left;
        }
        let mut min = link.take()?;
        *link = min.right.take();
        Some(min)
    }

    /// In-order keys within the optional bounds. The descent skips every left
    /// subtree that lies entirely below `lo` and stops at the first key above
    /// `hi`.
    fn collect_keys(&self, lo: Option<&K>, hi: Option<&K>) -> Vec<K>
    where
        K: Clone,
    {
        let below = |key: &K| lo.is_some_and(|lo| key < lo);
        let above = |key: &K| hi.is_some_and(|hi| key > hi);

        let mut out = Vec::new();
        let mut stack = Vec::new();
        let mut cur = self.root.as_deref();
        loop {
            while let Some(node) = cur {
                if below(&node.key) {
                    cur = node.right.as_deref();
                } else {
                    stack.push(node);
                    cur = node.left.as_deref();
                }
            }
            let Some(node) = stack.pop() else {
                break;
            };
            if above(&node.key) {
                break;
            }
            out.push(node.key.clone());
            cur = node.right.as_deref();
        }
        out
    }

    fn drop_nodes(root: Link<K, V>) {
        let mut pending: Vec<Box<Node<K, V>>> = root.into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<K: Ord, V> Default for BstMap<K, V> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K: Ord, V> Drop for BstMap<K, V> {
    fn drop(&mut self) {
        Self::drop_nodes(self.root.take());
    }
}

impl<K: Ord + Clone, V: Clone> Clone for BstMap<K, V> {
    /// Pre-order copy; each stack entry pairs a source node with the empty
    /// link its copy goes into.
    fn clone(&self) -> Self {
        let mut root = None;
        let mut stack = Vec::new();
        if let Some(src) = self.root.as_deref() {
            stack.push((src, &mut root));
        }
        while let Some((src, dest)) = stack.pop() {
            let node = dest.insert(Box::new(Node::new(src.key.clone(), src.value.clone())));
            if let Some(right) = src.right.as_deref() {
                stack.push((right, &mut node.right));
            }
            if let Some(left) = src.left.as_deref() {
                stack.push((left, &mut node.left));
            }
        }
        Self {
            root,
            len: self.len,
        }
    }
}

impl<K: Ord + Clone, V> OrderedContainer for BstMap<K, V> {
    type Key = K;
    type Value = V;

    fn new() -> Self {
        Self::default()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, key: &Self::Key) -> Result<&Self::Value> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match key.cmp(&node.key) {
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Greater => cur = node.right.as_deref(),
                Ordering::Equal => return Ok(&node.value),
            }
        }
        Err(Error::KeyNotFound)
    }

    fn get_mut(&mut self, key: &Self::Key) -> Result<&mut Self::Value> {
        let mut cur = self.root.as_deref_mut();
        while let Some(node) = cur {
            match key.cmp(&node.key) {
                Ordering::Less => cur = node.left.as_deref_mut(),
                Ordering::Greater => cur = node.right.as_deref_mut(),
                Ordering::Equal => return Ok(&mut node.value),
            }
        }
        Err(Error::KeyNotFound)
    }

    fn insert(&mut self, key: Self::Key, value: Self::Value) -> Option<Self::Value> {
        let mut link = &mut self.root;
        while let Some(node) = link {
            match key.cmp(&node.key) {
                Ordering::Less => link = &mut node.left,
                Ordering::Greater => link = &mut node.right,
                Ordering::Equal => return Some(std::mem::replace(&mut node.value, value)),
            }
        }
        *link = Some(Box::new(Node::new(key, value)));
        self.len += 1;
        None
    }

    fn erase(&mut self, key: &Self::Key) -> Result<Self::Value> {
        let mut link = &mut self.root;
        loop {
            let ord = match link.as_ref() {
                Some(node) => key.cmp(&node.key),
                None => break,
            };
            match ord {
                Ordering::Less => link = &mut link.as_mut().unwrap().left,
                Ordering::Greater => link = &mut link.as_mut().unwrap().right,
                Ordering::Equal => break,
            }
        }
        let mut node = link.take().ok_or(Error::KeyNotFound)?;
        *link = match (node.left.take(), node.right.take()) {
            (None, child) | (child, None) => child,
            // The in-order successor takes the erased node's place.
            (left, mut right) => Self::take_min(&mut right).map(|mut succ| {
                succ.left = left;
                succ.right = right;
                succ
            }),
        };
        self.len -= 1;
        Ok(node.value)
    }

    fn contains(&self, key: &Self::Key) -> bool {
        self.get(key).is_ok()
    }

    fn find_keys(&self, k1: &Self::Key, k2: &Self::Key) -> Vec<Self::Key> {
        if k1 > k2 {
            return Vec::new();
        }
        self.collect_keys(Some(k1), Some(k2))
    }

    fn sorted_keys(&self) -> Vec<Self::Key> {
        self.collect_keys(None, None)
    }

    fn next_key(&self, key: &Self::Key) -> Option<Self::Key> {
        let mut cur = self.root.as_deref();
        let mut candidate = None;
        while let Some(node) = cur {
            if node.key > *key {
                candidate = Some(&node.key);
                cur = node.left.as_deref();
            } else {
                cur = node.right.as_deref();
            }
        }
        candidate.cloned()
    }

    fn prev_key(&self, key: &Self::Key) -> Option<Self::Key> {
        let mut cur = self.root.as_deref();
        let mut candidate = None;
        while let Some(node) = cur {
            if node.key < *key {
                candidate = Some(&node.key);
                cur = node.right.as_deref();
            } else {
                cur = node.left.as_deref();
            }
        }
        candidate.cloned()
    }

    fn clear(&mut self) {
        Self::drop_nodes(self.root.take());
        self.len = 0;
    }
}

impl<K: Ord + Clone, V> FromIterator<(K, V)> for BstMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        OrderedContainer::extend(&mut map, iter);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::{BstMap, Node};
    use crate::{Error, OrderedContainer};
    use pretty_assertions::assert_eq;

    /// `0..n` linked as a right spine, built in linear time.
    fn right_spine(n: u64) -> BstMap<u64, u64> {
        let mut map = BstMap::new();
        let mut link = &mut map.root;
        for k in 0..n {
            link = &mut link.insert(Box::new(Node::new(k, k))).right;
        }
        map.len = n as usize;
        map
    }

    #[test]
    fn shape_follows_insertion_order() {
        let map: BstMap<u64, ()> = [4, 2, 6, 1, 3].into_iter().map(|k| (k, ())).collect();
        assert_eq!(map.height(), 3);
        assert_eq!(map.render(), "4\n L: 2\n  L: 1\n  R: 3\n R: 6\n");
    }

    #[test]
    fn sorted_insertion_degenerates() {
        let map: BstMap<u64, u64> = (0..200).map(|k| (k, k)).collect();
        assert_eq!(map.height(), 200);
        assert_eq!(map.next_key(&150), Some(151));
        assert_eq!(map.prev_key(&0), None);
    }

    #[test]
    fn erase_with_two_children_promotes_successor() {
        let mut map: BstMap<u64, u64> = [5, 3, 8, 7, 9, 6].into_iter().map(|k| (k, k)).collect();
        assert_eq!(map.erase(&5), Ok(5));
        assert_eq!(map.render(), "6\n L: 3\n R: 8\n  L: 7\n  R: 9\n");
        assert_eq!(map.len(), 5);
        assert_eq!(map.erase(&5), Err(Error::KeyNotFound));
    }

    #[test]
    fn erase_leaf_and_single_child() {
        let mut map: BstMap<u64, u64> = [5, 3, 8, 9].into_iter().map(|k| (k, k)).collect();
        assert_eq!(map.erase(&3), Ok(3));
        assert_eq!(map.erase(&8), Ok(8));
        assert_eq!(map.render(), "5\n R: 9\n");
        assert_eq!(map.height(), 2);
    }

    #[test]
    fn empty_height_is_zero() {
        let mut map = BstMap::<u64, u64>::new();
        assert_eq!(map.height(), 0);
        map.insert(1, 1);
        map.clear();
        assert_eq!(map.height(), 0);
        assert_eq!(map.render(), "");
    }

    #[test]
    fn erase_two_children_with_deeper_successor() {
        let mut map: BstMap<u64, u64> = [2, 1, 6, 4, 7, 3, 5].into_iter().map(|k| (k, k)).collect();
        assert_eq!(map.erase(&2), Ok(2));
        assert_eq!(map.render(), "3\n L: 1\n R: 6\n  L: 4\n   R: 5\n  R: 7\n");
        assert_eq!(map.erase(&3), Ok(3));
        assert_eq!(map.render(), "4\n L: 1\n R: 6\n  L: 5\n  R: 7\n");
        assert_eq!(map.len(), 5);
    }

    #[test]
    fn deep_tree_survives_every_operation() {
        const N: u64 = 100_000;
        let mut map = right_spine(N);
        assert_eq!(map.height(), N as usize);
        assert_eq!(map.sorted_keys(), (0..N).collect::<Vec<_>>());
        assert_eq!(map.find_keys(&(N - 3), &(N + 5)), vec![N - 3, N - 2, N - 1]);
        assert_eq!(map.next_key(&(N - 2)), Some(N - 1));

        let copy = map.clone();
        assert_eq!(map.erase(&(N - 1)), Ok(N - 1));
        assert_eq!(map.insert(N, N), None);
        assert_eq!(map.insert(0, 7), Some(0));
        assert_eq!(copy.len(), N as usize);
        assert_eq!(copy.height(), N as usize);
        assert_eq!(copy.get(&(N - 1)).copied(), Ok(N - 1));
        assert!(!copy.contains(&N));

        map.clear();
        assert!(map.is_empty());
        drop(copy);
    }

    #[test]
    fn ascending_inserts_build_a_list() {
        const N: u64 = 30_000;
        let mut map: BstMap<u64, u64> = (0..N).map(|k| (k, k)).collect();
        assert_eq!(map.height(), N as usize);
        assert_eq!(map.prev_key(&N), Some(N - 1));
        for k in (0..N).step_by(3) {
            assert_eq!(map.erase(&k), Ok(k));
        }
        assert_eq!(map.len(), 20_000);
        assert_eq!(map.sorted_keys().first(), Some(&1));
    }
}
