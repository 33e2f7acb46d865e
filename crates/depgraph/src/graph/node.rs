//! Registry entries: one record per node identifier.

use super::key::NodeKey;
use std::collections::HashSet;

/// Whether a node was inserted by the caller or only named as a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeState {
    /// Explicitly inserted, carrying its own parent set.
    Declared,
    /// Exists only because another node listed it as a parent.
    Placeholder,
}

/// A node in the dependency graph.
///
/// Edges are stored as identifier sets on both ends; the graph keeps
/// `parents` and `children` mutually consistent.
#[derive(Debug, Clone)]
pub struct NodeRecord<K: NodeKey> {
    state: NodeState,
    /// Nodes this node depends on.
    parents: HashSet<K>,
    /// Nodes that depend on this node.
    children: HashSet<K>,
}

impl<K: NodeKey> NodeRecord<K> {
    /// A declared node with the given parents.
    pub(crate) fn declared(parents: HashSet<K>) -> Self {
        Self {
            state: NodeState::Declared,
            parents,
            children: HashSet::new(),
        }
    }

    /// A placeholder with no edges yet.
    pub(crate) fn placeholder() -> Self {
        Self {
            state: NodeState::Placeholder,
            parents: HashSet::new(),
            children: HashSet::new(),
        }
    }

    /// Get the node's state.
    pub fn state(&self) -> NodeState {
        self.state
    }

    /// Whether the node has been explicitly inserted.
    pub fn is_declared(&self) -> bool {
        self.state == NodeState::Declared
    }

    /// Whether the node is a declared node without dependencies.
    pub fn is_root(&self) -> bool {
        self.is_declared() && self.parents.is_empty()
    }

    /// A placeholder nobody depends on any more.
    pub(crate) fn is_orphaned_placeholder(&self) -> bool {
        !self.is_declared() && self.children.is_empty()
    }

    /// Get all parents.
    pub fn parents(&self) -> &HashSet<K> {
        &self.parents
    }

    /// Get all children.
    pub fn children(&self) -> &HashSet<K> {
        &self.children
    }

    /// Promote a placeholder in place, keeping the children it accumulated.
    pub(crate) fn promote(&mut self, parents: HashSet<K>) {
        self.state = NodeState::Declared;
        self.parents = parents;
    }

    pub(crate) fn add_parent(&mut self, id: K) {
        self.parents.insert(id);
    }

    pub(crate) fn remove_parent(&mut self, id: &K) {
        self.parents.remove(id);
    }

    pub(crate) fn add_child(&mut self, id: K) {
        self.children.insert(id);
    }

    pub(crate) fn remove_child(&mut self, id: &K) {
        self.children.remove(id);
    }
}
