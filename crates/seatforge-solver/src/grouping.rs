//! Union-find over guest identifiers.
//!
//! Keys are interned into a dense arena on first sight; `parent` and `rank`
//! are plain vectors indexed by slot. Union by rank plus path compression
//! gives near-constant amortized cost per operation.

use std::collections::HashMap;
use std::hash::Hash;

/// Disjoint-set forest keyed by `K`.
///
/// A fresh instance is built per call; nothing is shared across runs.
///
/// # Example
///
/// ```
/// use seatforge_solver::grouping::UnionFind;
///
/// let mut uf = UnionFind::new();
/// uf.union(&"a", &"b");
/// uf.union(&"c", &"d");
///
/// assert!(uf.connected(&"a", &"b"));
/// assert!(!uf.connected(&"b", &"c"));
/// assert_eq!(uf.groups().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct UnionFind<K> {
    index: HashMap<K, usize>,
    keys: Vec<K>,
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl<K: Hash + Eq + Clone> Default for UnionFind<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone> UnionFind<K> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            keys: Vec::with_capacity(capacity),
            parent: Vec::with_capacity(capacity),
            rank: Vec::with_capacity(capacity),
        }
    }

    /// Number of keys seen so far.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Registers `key` as a singleton if unseen and returns its slot.
    pub fn insert(&mut self, key: &K) -> usize {
        if let Some(&slot) = self.index.get(key) {
            return slot;
        }
        let slot = self.keys.len();
        self.index.insert(key.clone(), slot);
        self.keys.push(key.clone());
        self.parent.push(slot);
        self.rank.push(0);
        slot
    }

    /// Returns the representative of `key`'s group.
    pub fn find(&mut self, key: &K) -> &K {
        let slot = self.insert(key);
        let root = self.root(slot);
        &self.keys[root]
    }

    /// Merges the groups of `a` and `b`. Returns `false` when they were
    /// already together.
    pub fn union(&mut self, a: &K, b: &K) -> bool {
        let a = self.insert(a);
        let b = self.insert(b);
        let ra = self.root(a);
        let rb = self.root(b);
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }

    pub fn connected(&mut self, a: &K, b: &K) -> bool {
        let a = self.insert(a);
        let b = self.insert(b);
        self.root(a) == self.root(b)
    }

    /// All groups, each listing its keys in insertion order. Groups are
    /// ordered by their first-inserted member.
    pub fn groups(&mut self) -> Vec<Vec<K>> {
        let mut by_root: HashMap<usize, usize> = HashMap::new();
        let mut groups: Vec<Vec<K>> = Vec::new();
        for slot in 0..self.keys.len() {
            let root = self.root(slot);
            let group = *by_root.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[group].push(self.keys[slot].clone());
        }
        groups
    }

    // Two-pass: locate the root, then point every node on the path at it.
    fn root(&mut self, slot: usize) -> usize {
        let mut root = slot;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = slot;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }
}
