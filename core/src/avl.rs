//! Height-balanced (AVL) ordered map.
//!
//! Every node owns its two subtrees outright, so the tree is a plain
//! `Option<Box<Node>>` structure with no parent pointers. After each insertion
//! the nodes on the insertion path are rebalanced on the way back up, which
//! keeps the height within ~1.44·log2(n+2) and every `get`/`put` at O(log n).
//!
//! Ordering is supplied by a [`Comparator`] rather than being baked into the
//! node type. [`NaturalOrder`] (the default) defers to `Ord`, and any
//! `Fn(&K, &K) -> Ordering` closure works as well.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::mem;

/// Largest height difference tolerated between the two subtrees of a node.
const ALLOWED_IMBALANCE: i32 = 1;

/// Total order over keys of type `K`.
pub trait Comparator<K: ?Sized> {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Orders keys by their `Ord` implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

type Link<K, V> = Option<Box<Node<K, V>>>;

struct Node<K, V> {
    key: K,
    value: V,
    height: i32,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Node { key, value, height: 0, left: None, right: None })
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    fn balance_factor(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }
}

/// Height of a possibly absent subtree; an empty subtree is -1.
fn height<K, V>(link: &Link<K, V>) -> i32 {
    link.as_ref().map_or(-1, |n| n.height)
}

/// An ordered map backed by an AVL tree.
pub struct OrderedMap<K, V, C = NaturalOrder> {
    root: Link<K, V>,
    len: usize,
    comparator: C,
}

impl<K: Ord, V> OrderedMap<K, V, NaturalOrder> {
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K: Ord, V> Default for OrderedMap<K, V, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparator<K>> OrderedMap<K, V, C> {
    /// Creates an empty map ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        OrderedMap { root: None, len: 0, comparator }
    }

    /// Number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the root node, or -1 for an empty map.
    pub fn height(&self) -> i32 {
        height(&self.root)
    }

    /// Returns the value stored under `key`, or `None` if the key was never inserted.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match self.comparator.compare(key, node.key.borrow()) {
                Ordering::Equal => return Some(&node.value),
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Greater => cur = node.right.as_deref(),
            }
        }
        None
    }

    /// Mutable access to the value under `key`. The tree shape is untouched.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let comparator = &self.comparator;
        let mut cur = self.root.as_deref_mut();
        while let Some(node) = cur {
            match comparator.compare(key, node.key.borrow()) {
                Ordering::Equal => return Some(&mut node.value),
                Ordering::Less => cur = node.left.as_deref_mut(),
                Ordering::Greater => cur = node.right.as_deref_mut(),
            }
        }
        None
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.get(key).is_some()
    }

    /// Associates `value` with `key`.
    ///
    /// An existing key keeps its node and only has its value replaced; the
    /// previous value is returned. A new key is added as a leaf and the
    /// insertion path is rebalanced.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let mut replaced = None;
        let root = self.root.take();
        self.root = Some(put_into(&self.comparator, root, key, value, &mut replaced));
        if replaced.is_none() {
            self.len += 1;
        }
        replaced
    }

    /// Keys in preorder: node, then left subtree, then right subtree.
    pub fn preorder_keys(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node<K, V>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            keys.push(&node.key);
            if let Some(right) = node.right.as_deref() {
                stack.push(right);
            }
            if let Some(left) = node.left.as_deref() {
                stack.push(left);
            }
        }
        keys
    }

    /// Ascending in-order iteration over the entries.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter { stack: Vec::new(), remaining: self.len };
        iter.push_left(self.root.as_deref());
        iter
    }

    /// Walks the whole tree and reports the first broken invariant: key order,
    /// the stored height of a node, or a balance factor outside [-1, 1]. O(n).
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut count = 0usize;
        self.check_node(self.root.as_deref(), None, None, &mut count)?;
        if count != self.len {
            return Err(format!("len is {} but tree holds {} nodes", self.len, count));
        }
        Ok(())
    }

    fn check_node(
        &self,
        node: Option<&Node<K, V>>,
        lower: Option<&K>,
        upper: Option<&K>,
        count: &mut usize,
    ) -> Result<i32, String> {
        let node = match node {
            Some(node) => node,
            None => return Ok(-1),
        };
        *count += 1;
        if let Some(lower) = lower {
            if self.comparator.compare(&node.key, lower) != Ordering::Greater {
                return Err("key not greater than an ancestor on its left".into());
            }
        }
        if let Some(upper) = upper {
            if self.comparator.compare(&node.key, upper) != Ordering::Less {
                return Err("key not less than an ancestor on its right".into());
            }
        }
        let left = self.check_node(node.left.as_deref(), lower, Some(&node.key), count)?;
        let right = self.check_node(node.right.as_deref(), Some(&node.key), upper, count)?;
        if (left - right).abs() > ALLOWED_IMBALANCE {
            return Err(format!("balance factor {} out of range", left - right));
        }
        let expected = 1 + left.max(right);
        if node.height != expected {
            return Err(format!("stored height {} but subtree height is {}", node.height, expected));
        }
        Ok(expected)
    }
}

fn put_into<K, V, C: Comparator<K>>(
    comparator: &C,
    link: Link<K, V>,
    key: K,
    value: V,
    replaced: &mut Option<V>,
) -> Box<Node<K, V>> {
    let mut node = match link {
        Some(node) => node,
        None => return Node::leaf(key, value),
    };
    match comparator.compare(&key, &node.key) {
        Ordering::Equal => {
            *replaced = Some(mem::replace(&mut node.value, value));
            return node;
        }
        Ordering::Less => {
            let left = node.left.take();
            node.left = Some(put_into(comparator, left, key, value, replaced));
        }
        Ordering::Greater => {
            let right = node.right.take();
            node.right = Some(put_into(comparator, right, key, value, replaced));
        }
    }
    rebalance(node)
}

fn rebalance<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let balance = node.balance_factor();
    if balance > ALLOWED_IMBALANCE {
        let outer_heavy = node
            .left
            .as_deref()
            .map_or(true, |left| height(&left.left) >= height(&left.right));
        node = if outer_heavy { rotate_with_left_child(node) } else { double_with_left_child(node) };
    } else if balance < -ALLOWED_IMBALANCE {
        let outer_heavy = node
            .right
            .as_deref()
            .map_or(true, |right| height(&right.right) >= height(&right.left));
        node = if outer_heavy { rotate_with_right_child(node) } else { double_with_right_child(node) };
    }
    node.update_height();
    node
}

/// Promotes the left child of `k2` into its place.
fn rotate_with_left_child<K, V>(mut k2: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let mut k1 = match k2.left.take() {
        Some(k1) => k1,
        None => return k2,
    };
    k2.left = k1.right.take();
    k2.update_height();
    k1.right = Some(k2);
    k1.update_height();
    k1
}

/// Promotes the right child of `k2` into its place.
fn rotate_with_right_child<K, V>(mut k2: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let mut k1 = match k2.right.take() {
        Some(k1) => k1,
        None => return k2,
    };
    k2.right = k1.left.take();
    k2.update_height();
    k1.left = Some(k2);
    k1.update_height();
    k1
}

fn double_with_left_child<K, V>(mut k3: Box<Node<K, V>>) -> Box<Node<K, V>> {
    k3.left = k3.left.take().map(rotate_with_right_child);
    rotate_with_left_child(k3)
}

fn double_with_right_child<K, V>(mut k3: Box<Node<K, V>>) -> Box<Node<K, V>> {
    k3.right = k3.right.take().map(rotate_with_left_child);
    rotate_with_right_child(k3)
}

/// In-order iterator returned by [`OrderedMap::iter`].
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, C: Comparator<K>> IntoIterator for &'a OrderedMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C: Comparator<K>> fmt::Debug for OrderedMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
