//! Region index over item geometry, used by systems for proximity queries.
//!
//! The tree does not know item geometry itself. Every placement and lookup
//! goes through an externally supplied comparator `(region, item) -> bool`,
//! so the same structure serves point-in-box and box-overlap tests.

mod aabb;

pub use aabb::Aabb2;

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use log::trace;

/// An item stored in a [`Quadtree`]. Items are cloned into every leaf their
/// geometry overlaps, so they should be cheap to clone.
pub trait QuadtreeItem: Clone {
    type Id: Copy + Eq + Hash;

    fn id(&self) -> Self::Id;
}

#[derive(Clone, Copy, Debug)]
pub struct QuadtreeConfig {
    /// A leaf holding more than this many items splits into four quadrants
    pub max_items: usize,
    /// Area covered by the root node
    pub aabb: Aabb2,
}

enum NodeKind<T> {
    Leaf(Vec<T>),
    Branch([usize; 4]),
}

struct Node<T> {
    aabb: Aabb2,
    kind: NodeKind<T>,
}

impl<T> Node<T> {
    fn leaf(aabb: Aabb2) -> Self {
        Self {
            aabb,
            kind: NodeKind::Leaf(Vec::new()),
        }
    }
}

pub struct Quadtree<T: QuadtreeItem, F: Fn(&Aabb2, &T) -> bool> {
    max_items: usize,
    // node 0 is the root; children are appended and never freed
    nodes: Vec<Node<T>>,
    id_map: HashMap<T::Id, Vec<usize>>,
    comparator: F,
}

impl<T: QuadtreeItem, F: Fn(&Aabb2, &T) -> bool> Quadtree<T, F> {
    pub fn new(config: QuadtreeConfig, comparator: F) -> Self {
        Self {
            max_items: config.max_items,
            nodes: vec![Node::leaf(config.aabb)],
            id_map: HashMap::new(),
            comparator,
        }
    }

    pub fn aabb(&self) -> Aabb2 {
        self.nodes[0].aabb
    }

    /// Number of distinct ids currently indexed
    pub fn len(&self) -> usize {
        self.id_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_map.is_empty()
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.id_map.contains_key(id)
    }

    /// Indexes `item`, replacing any previous entry with the same id. Items
    /// the comparator places entirely outside the root area are not indexed.
    pub fn insert(&mut self, item: T) {
        let id = item.id();
        if self.id_map.contains_key(&id) {
            self.remove(&id);
        }

        if !(self.comparator)(&self.nodes[0].aabb, &item) {
            trace!("quadtree: item lies outside of the indexed area, skipping");
            return;
        }

        self.id_map.insert(id, Vec::new());
        self.node_insert(0, item);
    }

    /// Removes every node reference for `id`. No-op if `id` is not indexed.
    pub fn remove(&mut self, id: &T::Id) {
        let Some(node_indices) = self.id_map.remove(id) else {
            return;
        };

        for index in node_indices {
            if let NodeKind::Leaf(items) = &mut self.nodes[index].kind {
                items.retain(|item| item.id() != *id);
            }
        }
    }

    /// Returns every indexed item the comparator places inside `region`,
    /// each exactly once. Nodes are pruned with min-bias overlap.
    pub fn query(&self, region: &Aabb2) -> Vec<&T> {
        let mut seen = HashSet::new();
        let mut results = Vec::new();
        self.node_query(0, region, &mut seen, &mut results);
        results
    }

    /// Depth of the deepest leaf. A tree that never split has depth 1.
    pub fn depth(&self) -> usize {
        self.node_depth(0)
    }

    // Private

    fn node_insert(&mut self, index: usize, item: T) {
        match &mut self.nodes[index].kind {
            NodeKind::Leaf(items) => {
                let id = item.id();
                items.push(item);
                let overflowing = items.len() > self.max_items;

                if let Some(node_indices) = self.id_map.get_mut(&id) {
                    node_indices.push(index);
                }

                if overflowing && self.split_separates(index) {
                    self.split(index);
                }
            }
            NodeKind::Branch(children) => {
                let children = *children;
                for child in children {
                    if (self.comparator)(&self.nodes[child].aabb, &item) {
                        self.node_insert(child, item.clone());
                    }
                }
            }
        }
    }

    /// Splitting only helps if some item would stay out of some quadrant.
    /// Items covering the whole node would otherwise be copied into every
    /// descendant forever.
    fn split_separates(&self, index: usize) -> bool {
        let node = &self.nodes[index];
        if !node.aabb.is_divisible() {
            return false;
        }

        let NodeKind::Leaf(items) = &node.kind else {
            return false;
        };

        let quadrants = node.aabb.quadrants();
        items.iter().any(|item| {
            quadrants
                .iter()
                .any(|quadrant| !(self.comparator)(quadrant, item))
        })
    }

    fn split(&mut self, index: usize) {
        let first_child = self.nodes.len();
        let children = [first_child, first_child + 1, first_child + 2, first_child + 3];

        let items = match &mut self.nodes[index].kind {
            NodeKind::Leaf(items) => std::mem::take(items),
            NodeKind::Branch(_) => return,
        };

        for quadrant in self.nodes[index].aabb.quadrants() {
            self.nodes.push(Node::leaf(quadrant));
        }
        self.nodes[index].kind = NodeKind::Branch(children);

        for item in items {
            if let Some(node_indices) = self.id_map.get_mut(&item.id()) {
                node_indices.retain(|node_index| *node_index != index);
            }

            for child in children {
                if (self.comparator)(&self.nodes[child].aabb, &item) {
                    self.node_insert(child, item.clone());
                }
            }
        }
    }

    fn node_query<'a>(
        &'a self,
        index: usize,
        region: &Aabb2,
        seen: &mut HashSet<T::Id>,
        results: &mut Vec<&'a T>,
    ) {
        let node = &self.nodes[index];
        if !node.aabb.min_bias_overlaps(region) {
            return;
        }

        match &node.kind {
            NodeKind::Leaf(items) => {
                for item in items {
                    if (self.comparator)(region, item) && seen.insert(item.id()) {
                        results.push(item);
                    }
                }
            }
            NodeKind::Branch(children) => {
                for child in children {
                    self.node_query(*child, region, seen, results);
                }
            }
        }
    }

    fn node_depth(&self, index: usize) -> usize {
        match &self.nodes[index].kind {
            NodeKind::Leaf(_) => 1,
            NodeKind::Branch(children) => {
                1 + children
                    .iter()
                    .map(|child| self.node_depth(*child))
                    .max()
                    .unwrap_or(0)
            }
        }
    }
}
