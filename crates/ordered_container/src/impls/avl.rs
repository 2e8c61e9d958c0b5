use std::cmp::Ordering;
use std::fmt::Display;

use tracing::trace;

use super::render::{self, RenderNode};
use crate::{Error, OrderedContainer, Result};

/// Height-balanced (AVL) binary search tree map.
///
/// After every `insert`/`erase` each node satisfies
/// `|height(left) - height(right)| <= 1`, so every keyed operation walks
/// `O(log n)` nodes. Mutations descend recursively and rebuild the path on the
/// way back up, recomputing heights and rotating where a node went out of
/// balance. Nodes own their children; there are no parent links.
#[derive(Clone)]
pub struct AvlTreeMap<K: Ord, V> {
    root: Link<K, V>,
    len: usize,
}

type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    height: u8,
    left: Link<K, V>,
    right: Link<K, V>,
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

fn height_of<K, V>(link: &Link<K, V>) -> u8 {
    link.as_ref().map_or(0, |n| n.height)
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            height: 1,
            left: None,
            right: None,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Link<K, V> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    fn update_height(&mut self) {
        self.height = 1 + height_of(&self.left).max(height_of(&self.right));
    }

    /// Positive when the left side is taller. Children must carry fresh heights.
    fn balance_factor(&self) -> i32 {
        i32::from(height_of(&self.left)) - i32::from(height_of(&self.right))
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

    fn annotation(&self) -> Option<usize> {
        Some(usize::from(self.height))
    }
}

impl<K: Ord, V> AvlTreeMap<K, V> {
    /// Number of nodes on the longest root-to-leaf path; 0 when empty.
    pub fn height(&self) -> usize {
        usize::from(height_of(&self.root))
    }

    /// Indented pre-order dump with node heights, for debugging.
    pub fn render(&self) -> String
    where
        K: Display,
    {
        render::render(self.root.as_deref())
    }

    /// Lifts the child on `side` above `root`. The child's inner subtree moves
    /// across to `root`, which is re-measured first since it ends up below.
    fn rotate(mut root: Box<Node<K, V>>, side: Side) -> Box<Node<K, V>> {
        let Some(mut pivot) = root.child_mut(side).take() else {
            return root;
        };
        *root.child_mut(side) = pivot.child_mut(side.opposite()).take();
        root.update_height();
        *pivot.child_mut(side.opposite()) = Some(root);
        pivot.update_height();
        pivot
    }

    fn rebalance(mut root: Box<Node<K, V>>) -> Box<Node<K, V>> {
        root.update_height();
        let heavy = match root.balance_factor() {
            2.. => Side::Left,
            ..=-2 => Side::Right,
            _ => return root,
        };
        if let Some(child) = root.child_mut(heavy).take() {
            // A child leaning the other way needs its own rotation first.
            let zigzag = match heavy {
                Side::Left => child.balance_factor() < 0,
                Side::Right => child.balance_factor() > 0,
            };
            *root.child_mut(heavy) = Some(if zigzag {
                let case = match heavy {
                    Side::Left => "left-right",
                    Side::Right => "right-left",
                };
                trace!(case, "avl double rotation");
                Self::rotate(child, heavy.opposite())
            } else {
                child
            });
        }
        Self::rotate(root, heavy)
    }

    /// Detaches the leftmost node of `node`, rebalancing every level of the
    /// path it was removed from.
    fn pop_min(mut node: Box<Node<K, V>>) -> (Link<K, V>, Box<Node<K, V>>) {
        let Some(left) = node.left.take() else {
            let right = node.right.take();
            return (right, node);
        };
        let (new_left, min_node) = Self::pop_min(left);
        node.left = new_left;
        (Some(Self::rebalance(node)), min_node)
    }

    fn insert_node(root: Link<K, V>, key: K, value: V) -> (Box<Node<K, V>>, Option<V>) {
        let Some(mut node) = root else {
            return (Box::new(Node::leaf(key, value)), None);
        };

        match key.cmp(&node.key) {
            Ordering::Less => {
                let (left, old) = Self::insert_node(node.left.take(), key, value);
                node.left = Some(left);
                (Self::rebalance(node), old)
            }
            Ordering::Greater => {
                let (right, old) = Self::insert_node(node.right.take(), key, value);
                node.right = Some(right);
                (Self::rebalance(node), old)
            }
            Ordering::Equal => {
                let old = std::mem::replace(&mut node.value, value);
                (node, Some(old))
            }
        }
    }

    fn remove_node(root: Link<K, V>, key: &K) -> (Link<K, V>, Option<V>) {
        let Some(mut node) = root else {
            return (None, None);
        };

        match key.cmp(&node.key) {
            Ordering::Less => {
                let (left, removed) = Self::remove_node(node.left.take(), key);
                node.left = left;
                (Some(Self::rebalance(node)), removed)
            }
            Ordering::Greater => {
                let (right, removed) = Self::remove_node(node.right.take(), key);
                node.right = right;
                (Some(Self::rebalance(node)), removed)
            }
            Ordering::Equal => {
                let Node {
                    value, left, right, ..
                } = *node;
                match (left, right) {
                    (None, child) | (child, None) => (child, Some(value)),
                    (Some(left), Some(right)) => {
                        let (new_right, mut succ) = Self::pop_min(right);
                        succ.left = Some(left);
                        succ.right = new_right;
                        (Some(Self::rebalance(succ)), Some(value))
                    }
                }
            }
        }
    }

    fn collect_sorted(node: &Link<K, V>, out: &mut Vec<K>)
    where
        K: Clone,
    {
        if let Some(node) = node {
            Self::collect_sorted(&node.left, out);
            out.push(node.key.clone());
            Self::collect_sorted(&node.right, out);
        }
    }

    fn collect_range(node: &Link<K, V>, k1: &K, k2: &K, out: &mut Vec<K>)
    where
        K: Clone,
    {
        let Some(node) = node else {
            return;
        };
        if node.key < *k1 {
            Self::collect_range(&node.right, k1, k2, out);
        } else if node.key > *k2 {
            Self::collect_range(&node.left, k1, k2, out);
        } else {
            Self::collect_range(&node.left, k1, k2, out);
            out.push(node.key.clone());
            Self::collect_range(&node.right, k1, k2, out);
        }
    }
}

impl<K: Ord, V> Default for AvlTreeMap<K, V> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K: Ord + Clone, V> OrderedContainer for AvlTreeMap<K, V> {
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
        let (root, old) = Self::insert_node(self.root.take(), key, value);
        self.root = Some(root);
        if old.is_none() {
            self.len += 1;
        }
        old
    }

    fn erase(&mut self, key: &Self::Key) -> Result<Self::Value> {
        // A miss rebuilds the search path unchanged: every node on it was
        // already balanced, so `rebalance` only refreshes equal heights.
        let (root, removed) = Self::remove_node(self.root.take(), key);
        self.root = root;
        let value = removed.ok_or(Error::KeyNotFound)?;
        self.len -= 1;
        Ok(value)
    }

    fn contains(&self, key: &Self::Key) -> bool {
        self.get(key).is_ok()
    }

    fn find_keys(&self, k1: &Self::Key, k2: &Self::Key) -> Vec<Self::Key> {
        let mut out = Vec::new();
        if k1 <= k2 {
            Self::collect_range(&self.root, k1, k2, &mut out);
        }
        out
    }

    fn sorted_keys(&self) -> Vec<Self::Key> {
        let mut out = Vec::with_capacity(self.len);
        Self::collect_sorted(&self.root, &mut out);
        out
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
        self.root = None;
        self.len = 0;
    }
}

impl<K: Ord + Clone, V> FromIterator<(K, V)> for AvlTreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        OrderedContainer::extend(&mut map, iter);
        map
    }
}
