//! # Splay Tree Ordered Cache
//!
//! Self-adjusting binary search tree over totally-ordered keys. Every insert
//! and every successful search moves the touched node to the root through a
//! sequence of rotations, so repeated or skewed access patterns amortize to
//! near the front of the tree. This is the ordered primitive backing the
//! splay-memo strategy of [`Fibonacci`](crate::fib::Fibonacci).
//!
//! ## Node Storage
//!
//! Nodes live in a [`SlotArena`] and reference each other through stable
//! [`SlotId`] handles: two owning-in-spirit child links plus a parent
//! backlink used only for rotation bookkeeping. Rotations are handle
//! reassignments, never pointer surgery, so the child→parent cycle costs
//! nothing in ownership terms.
//!
//! ## Splay Cases
//!
//! ```text
//!   Zig (parent is root)          Zig-Zig (same side twice)
//!
//!        p                x                 g                   x
//!       / \              / \               / \                   \
//!      x   C    ──►     A   p             p   D    rotate g,      p
//!     / \                  / \           / \       then p    ──►   \
//!    A   B                B   C         x   C                       g
//!                                      / \
//!                                     A   B
//!
//!   Zig-Zag (opposite sides): rotate parent toward making x and g
//!   siblings, then rotate g the other way — x ends up between them.
//! ```
//!
//! ## Contract
//!
//! | Operation        | Effect                                                |
//! |------------------|-------------------------------------------------------|
//! | `insert(k, v)`   | BST attach (`< left`, `>= right`), then splay `k`     |
//! | `search(&k)`     | Hit: splay found node, return value. Miss: no change  |
//! | `root_key()`     | Key at the root (equals last touched key)             |
//! | `iter_in_order()`| Non-recursive in-order traversal                      |
//! | `clear()`        | Drop all nodes                                        |
//!
//! Ties on insert go **right**: a duplicate key is physically attached in
//! the right subtree of the existing equal key, and because descents stop at
//! the first equal key, the duplicate is permanently shadowed from `search`
//! and from the post-insert splay. Callers that need strict no-duplicate
//! semantics should check with `search` before inserting.
//!
//! There is no delete operation: the tree is unbounded and grows with every
//! novel key. Unsuccessful searches never alter the tree shape (no
//! splay-to-last-visited on a miss).

use std::fmt;

use crate::ds::{SlotArena, SlotId};
use crate::error::InvariantError;
use crate::traits::OrderedCache;

struct Node<K, V> {
    key: K,
    value: V,
    parent: Option<SlotId>,
    left: Option<SlotId>,
    right: Option<SlotId>,
}

/// Self-adjusting ordered cache.
///
/// Amortized O(log n) insert/search, with recently touched keys near the
/// root. Not thread-safe; single-threaded use only.
pub struct SplayCache<K, V>
where
    K: Ord,
{
    arena: SlotArena<Node<K, V>>,
    root: Option<SlotId>,
}

impl<K, V> SplayCache<K, V>
where
    K: Ord,
{
    /// Creates an empty splay cache.
    ///
    /// # Example
    /// ```
    /// use memokit::policy::splay::SplayCache;
    /// use memokit::traits::OrderedCache;
    ///
    /// let mut cache: SplayCache<u64, &str> = SplayCache::new();
    /// assert!(cache.is_empty());
    /// cache.insert(3, "three");
    /// assert_eq!(cache.root_key(), Some(&3));
    /// ```
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            root: None,
        }
    }

    /// Creates an empty splay cache with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the key at the root of the tree.
    ///
    /// After an `insert(k, _)` or a successful `search(&k)`, this is `k`.
    pub fn root_key(&self) -> Option<&K> {
        self.root.map(|id| &self.arena[id].key)
    }

    /// In-order traversal over `(key, value)` pairs.
    ///
    /// Yields keys in non-decreasing order (duplicates included). Uses an
    /// explicit stack, so deep trees cannot exhaust the call stack.
    pub fn iter_in_order(&self) -> InOrderIter<'_, K, V> {
        let mut iter = InOrderIter {
            cache: self,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Verifies the BST ordering property, parent backlinks, and node
    /// reachability.
    ///
    /// Intended for tests and debugging; O(n).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let root = match self.root {
            Some(root) => root,
            None => {
                if self.arena.is_empty() {
                    return Ok(());
                }
                return Err(InvariantError::new("empty root with live nodes in arena"));
            }
        };

        if self.arena[root].parent.is_some() {
            return Err(InvariantError::new("root has a parent link"));
        }

        // Walk every reachable node, checking child backlinks as we go.
        let mut reachable = 0usize;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            reachable += 1;
            if reachable > self.arena.len() {
                return Err(InvariantError::new("cycle detected in tree links"));
            }
            let node = &self.arena[id];
            for child in [node.left, node.right].into_iter().flatten() {
                if self.arena[child].parent != Some(id) {
                    return Err(InvariantError::new("child parent link mismatch"));
                }
                stack.push(child);
            }
        }
        if reachable != self.arena.len() {
            return Err(InvariantError::new("unreachable nodes in arena"));
        }

        // In-order keys must be non-decreasing.
        let mut prev: Option<&K> = None;
        for (key, _) in self.iter_in_order() {
            if let Some(prev) = prev {
                if prev > key {
                    return Err(InvariantError::new("in-order keys decrease"));
                }
            }
            prev = Some(key);
        }

        Ok(())
    }

    /// First-match descent: stops at the first node whose key equals `key`.
    fn find_node(&self, key: &K) -> Option<SlotId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.arena[id];
            current = match key.cmp(&node.key) {
                std::cmp::Ordering::Less => node.left,
                std::cmp::Ordering::Greater => node.right,
                std::cmp::Ordering::Equal => return Some(id),
            };
        }
        None
    }

    fn is_left_child(&self, node: SlotId, parent: SlotId) -> bool {
        self.arena[parent].left == Some(node)
    }

    /// Left rotation around `x`: its right child takes its place.
    ///
    /// Repoints the former parent's child link (or the root) to the new
    /// subtree root. No-op if `x` has no right child.
    fn rotate_left(&mut self, x: SlotId) {
        let y = match self.arena[x].right {
            Some(y) => y,
            None => return,
        };

        let y_left = self.arena[y].left;
        self.arena[x].right = y_left;
        if let Some(l) = y_left {
            self.arena[l].parent = Some(x);
        }

        let x_parent = self.arena[x].parent;
        self.arena[y].parent = x_parent;
        match x_parent {
            None => self.root = Some(y),
            Some(p) => {
                if self.is_left_child(x, p) {
                    self.arena[p].left = Some(y);
                } else {
                    self.arena[p].right = Some(y);
                }
            }
        }

        self.arena[y].left = Some(x);
        self.arena[x].parent = Some(y);
    }

    /// Right rotation around `x`: its left child takes its place.
    fn rotate_right(&mut self, x: SlotId) {
        let y = match self.arena[x].left {
            Some(y) => y,
            None => return,
        };

        let y_right = self.arena[y].right;
        self.arena[x].left = y_right;
        if let Some(r) = y_right {
            self.arena[r].parent = Some(x);
        }

        let x_parent = self.arena[x].parent;
        self.arena[y].parent = x_parent;
        match x_parent {
            None => self.root = Some(y),
            Some(p) => {
                if self.is_left_child(x, p) {
                    self.arena[p].left = Some(y);
                } else {
                    self.arena[p].right = Some(y);
                }
            }
        }

        self.arena[y].right = Some(x);
        self.arena[x].parent = Some(y);
    }

    /// Moves `node` to the root via zig / zig-zig / zig-zag steps.
    ///
    /// SlotIds are stable across rotations, so the grandparent-then-parent
    /// rotation order of the zig-zig case needs no re-lookup in between.
    fn splay(&mut self, node: SlotId) {
        while let Some(parent) = self.arena[node].parent {
            match self.arena[parent].parent {
                None => {
                    // Zig: parent is the root
                    if self.is_left_child(node, parent) {
                        self.rotate_right(parent);
                    } else {
                        self.rotate_left(parent);
                    }
                }
                Some(grandparent) => {
                    let node_is_left = self.is_left_child(node, parent);
                    let parent_is_left = self.is_left_child(parent, grandparent);
                    match (node_is_left, parent_is_left) {
                        // Zig-Zig: same direction twice, top-down
                        (true, true) => {
                            self.rotate_right(grandparent);
                            self.rotate_right(parent);
                        }
                        (false, false) => {
                            self.rotate_left(grandparent);
                            self.rotate_left(parent);
                        }
                        // Zig-Zag: fold the bend, then lift over the grandparent
                        (true, false) => {
                            self.rotate_right(parent);
                            self.rotate_left(grandparent);
                        }
                        (false, true) => {
                            self.rotate_left(parent);
                            self.rotate_right(grandparent);
                        }
                    }
                }
            }
        }
    }
}

impl<K, V> OrderedCache<K, V> for SplayCache<K, V>
where
    K: Ord,
{
    /// Attach at the BST leaf position (`< left`, `>= right`), then splay.
    ///
    /// The splay target is found by re-descending for the key, so when the
    /// key already exists the **existing** node is splayed and the fresh
    /// duplicate stays shadowed in its right subtree.
    fn insert(&mut self, key: K, value: V) {
        let new_id = match self.root {
            None => {
                let id = self.arena.insert(Node {
                    key,
                    value,
                    parent: None,
                    left: None,
                    right: None,
                });
                self.root = Some(id);
                id
            }
            Some(root) => {
                let mut current = root;
                loop {
                    if key < self.arena[current].key {
                        match self.arena[current].left {
                            Some(left) => current = left,
                            None => {
                                let id = self.arena.insert(Node {
                                    key,
                                    value,
                                    parent: Some(current),
                                    left: None,
                                    right: None,
                                });
                                self.arena[current].left = Some(id);
                                break id;
                            }
                        }
                    } else {
                        match self.arena[current].right {
                            Some(right) => current = right,
                            None => {
                                let id = self.arena.insert(Node {
                                    key,
                                    value,
                                    parent: Some(current),
                                    left: None,
                                    right: None,
                                });
                                self.arena[current].right = Some(id);
                                break id;
                            }
                        }
                    }
                }
            }
        };

        let target = self.find_node(&self.arena[new_id].key);
        if let Some(target) = target {
            self.splay(target);
        }
    }

    /// A hit splays the found node to the root and returns its value; a
    /// miss leaves the tree structurally unchanged.
    fn search(&mut self, key: &K) -> Option<&V> {
        let found = self.find_node(key)?;
        self.splay(found);
        Some(&self.arena[found].value)
    }

    fn len(&self) -> usize {
        self.arena.len()
    }

    fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }
}

impl<K, V> Default for SplayCache<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for SplayCache<K, V>
where
    K: Ord + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplayCache")
            .field("len", &self.len())
            .field("root_key", &self.root_key())
            .finish_non_exhaustive()
    }
}

/// Iterator returned by [`SplayCache::iter_in_order`].
pub struct InOrderIter<'a, K, V>
where
    K: Ord,
{
    cache: &'a SplayCache<K, V>,
    stack: Vec<SlotId>,
}

impl<'a, K, V> InOrderIter<'a, K, V>
where
    K: Ord,
{
    fn push_left_spine(&mut self, mut current: Option<SlotId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.cache.arena[id].left;
        }
    }
}

impl<'a, K, V> Iterator for InOrderIter<'a, K, V>
where
    K: Ord,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.cache.arena[id];
        self.push_left_spine(node.right);
        Some((&node.key, &node.value))
    }
}
