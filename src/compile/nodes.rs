//! Node table: one labelled node per distinct grid point

use std::collections::HashMap;

use log::debug;

use crate::elements::Node;
use crate::geometry::PointKey;

/// Nodes labelled 1..=N in ascending (y, z, x) order
#[derive(Debug, Clone, Default)]
pub struct NodeSet {
    nodes: Vec<Node>,
    index: HashMap<PointKey, usize>,
}

impl NodeSet {
    /// Create the node table from a set of points; duplicates collapse
    pub fn build(points: impl IntoIterator<Item = PointKey>) -> Self {
        let mut keys: Vec<PointKey> = points.into_iter().collect();
        keys.sort();
        keys.dedup();

        let index = keys.iter().enumerate().map(|(i, k)| (*k, i + 1)).collect();
        let nodes = keys.iter().map(|k| Node::at(*k)).collect();
        debug!("Node table built with {} nodes", keys.len());
        Self { nodes, index }
    }

    /// Append points not yet present. Existing labels are untouched; the new
    /// points are labelled after them in ascending (y, z, x) order.
    pub fn extend(&mut self, points: impl IntoIterator<Item = PointKey>) -> usize {
        let mut fresh: Vec<PointKey> = points
            .into_iter()
            .filter(|k| !self.index.contains_key(k))
            .collect();
        fresh.sort();
        fresh.dedup();

        for key in &fresh {
            self.nodes.push(Node::at(*key));
            self.index.insert(*key, self.nodes.len());
        }
        fresh.len()
    }

    /// 1-based label of the node at `key`
    pub fn label(&self, key: &PointKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn node(&self, label: usize) -> Option<&Node> {
        label.checked_sub(1).and_then(|i| self.nodes.get(i))
    }

    pub fn node_mut(&mut self, label: usize) -> Option<&mut Node> {
        label.checked_sub(1).and_then(move |i| self.nodes.get_mut(i))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes with their labels, in label order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i + 1, n))
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}
