//! Main DependencyGraph interface for graph operations.

use super::algorithms::{self, Direction};
use super::key::NodeKey;
use super::node::NodeRecord;
use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use log::{debug, trace};
use std::any::Any;
use std::collections::{HashMap, HashSet};

/// How [`DependencyGraph::remove`] treats the removed node's neighbours.
///
/// The two flags are independent. `reattach_to_parents` only matters in
/// direct mode, since cascade mode deletes every child anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RemovalPolicy {
    /// Delete every node reachable along child edges as well.
    pub cascade_children: bool,
    /// Hand the removed node's parents down to its children.
    pub reattach_to_parents: bool,
}

impl RemovalPolicy {
    /// Remove the node and everything that depends on it.
    pub fn cascade() -> Self {
        Self {
            cascade_children: true,
            reattach_to_parents: true,
        }
    }

    /// Remove only the node; its children inherit its parents.
    pub fn reattach() -> Self {
        Self {
            cascade_children: false,
            reattach_to_parents: true,
        }
    }

    /// Remove only the node; its children just lose the edge.
    pub fn detach() -> Self {
        Self {
            cascade_children: false,
            reattach_to_parents: false,
        }
    }
}

impl Default for RemovalPolicy {
    fn default() -> Self {
        Self::reattach()
    }
}

/// A directed dependency graph that tolerates missing nodes and cycles.
///
/// Nodes named as parents before they are inserted exist as placeholders
/// until promoted by an explicit [`insert`](Self::insert). Placeholders that
/// nothing depends on any more are deleted automatically.
///
/// # Example
///
/// ```
/// use depgraph::{DependencyGraph, RemovalPolicy};
/// use std::collections::HashSet;
///
/// # fn example() -> depgraph::Result<()> {
/// let mut graph = DependencyGraph::new();
/// graph.insert("foo", [])?;
/// graph.insert("bar", ["foo", "baz"])?;
///
/// // baz was only named as a dependency, so it is not a root
/// assert_eq!(graph.roots(), HashSet::from(["foo"]));
/// assert!(graph.is_ancestor(&"bar", &"baz")?);
///
/// let removed = graph.remove(&"bar", RemovalPolicy::default())?;
/// assert_eq!(removed, HashSet::from(["bar", "baz"]));
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DependencyGraph<K: NodeKey> {
    config: GraphConfig,
    nodes: HashMap<K, NodeRecord<K>>,
}

impl<K: NodeKey> DependencyGraph<K> {
    /// Create an empty graph that accepts cycles.
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Create an empty graph that rejects insertions closing a cycle.
    pub fn acyclic() -> Self {
        Self::with_config(GraphConfig { acyclic: true })
    }

    /// Create an empty graph with the given configuration.
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            config,
            nodes: HashMap::new(),
        }
    }

    /// Whether insertions that would create a cycle are rejected.
    pub fn is_acyclic(&self) -> bool {
        self.config.acyclic
    }

    // ===== Registry =====

    /// Whether a node (declared or placeholder) exists.
    pub fn contains(&self, id: &K) -> bool {
        self.nodes.contains_key(id)
    }

    /// Get the total number of nodes, placeholders included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Snapshot of every node identifier.
    pub fn nodes(&self) -> HashSet<K> {
        self.nodes.keys().cloned().collect()
    }

    /// Snapshot of the identifiers that are only placeholders.
    pub fn placeholders(&self) -> HashSet<K> {
        self.records()
            .filter(|(_, node)| !node.is_declared())
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Declared nodes without parents.
    ///
    /// Derived on every call; placeholders are never roots.
    pub fn roots(&self) -> HashSet<K> {
        self.records()
            .filter(|(_, node)| node.is_root())
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Get a node record by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if the node doesn't exist.
    pub fn get_node(&self, id: &K) -> Result<&NodeRecord<K>> {
        self.nodes.get(id).ok_or_else(|| GraphError::not_found(id))
    }

    /// Whether the node was explicitly inserted.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if the node doesn't exist.
    pub fn is_declared(&self, id: &K) -> Result<bool> {
        Ok(self.get_node(id)?.is_declared())
    }

    /// Snapshot of the nodes `id` depends on.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if the node doesn't exist.
    pub fn get_parents(&self, id: &K) -> Result<HashSet<K>> {
        Ok(self.get_node(id)?.parents().clone())
    }

    /// Snapshot of the nodes that depend on `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if the node doesn't exist.
    pub fn get_children(&self, id: &K) -> Result<HashSet<K>> {
        Ok(self.get_node(id)?.children().clone())
    }

    pub(crate) fn record(&self, id: &K) -> Option<&NodeRecord<K>> {
        self.nodes.get(id)
    }

    pub(crate) fn records(&self) -> impl Iterator<Item = (&K, &NodeRecord<K>)> {
        self.nodes.iter()
    }

    // ===== Queries =====

    /// Whether `ancestor` is reachable from `id` by following one or more
    /// parent edges.
    ///
    /// A node is its own ancestor only if it lies on a cycle.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if either node doesn't exist.
    pub fn is_ancestor(&self, id: &K, ancestor: &K) -> Result<bool> {
        self.get_node(id)?;
        self.get_node(ancestor)?;
        Ok(algorithms::is_reachable(
            self,
            id,
            ancestor,
            Direction::Parents,
        ))
    }

    /// Every node reachable from `id` along parent edges.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if the node doesn't exist.
    pub fn ancestors(&self, id: &K) -> Result<HashSet<K>> {
        self.get_node(id)?;
        Ok(algorithms::reachable(self, id, Direction::Parents))
    }

    /// Every node reachable from `id` along child edges.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if the node doesn't exist.
    pub fn descendants(&self, id: &K) -> Result<HashSet<K>> {
        self.get_node(id)?;
        Ok(algorithms::reachable(self, id, Direction::Children))
    }

    // ===== Mutation =====

    /// Declare a node and the nodes it depends on.
    ///
    /// Parents that are not in the graph yet are created as placeholders. If
    /// `name` already exists as a placeholder it is promoted in place and
    /// keeps its children.
    ///
    /// # Errors
    ///
    /// - [`GraphError::InvalidKey`] if `name` or a parent is not a valid key
    /// - [`GraphError::AlreadyExists`] if `name` is already declared
    /// - [`GraphError::CycleRejected`] if the graph is acyclic and `name`
    ///   would become its own ancestor
    ///
    /// The graph is unchanged when an error is returned.
    pub fn insert(&mut self, name: K, parents: impl IntoIterator<Item = K>) -> Result<()> {
        let parents: HashSet<K> = parents.into_iter().collect();

        if !name.is_valid_key() {
            return Err(GraphError::invalid_key(&name));
        }
        if let Some(invalid) = parents.iter().find(|p| !p.is_valid_key()) {
            return Err(GraphError::invalid_key(invalid));
        }

        if self.nodes.get(&name).is_some_and(NodeRecord::is_declared) {
            return Err(GraphError::already_exists(&name));
        }

        if self.config.acyclic && self.would_close_cycle(&name, &parents) {
            return Err(GraphError::cycle_rejected(&name));
        }

        debug!("Inserting node: id={name:?}, parents={}", parents.len());

        for parent in &parents {
            let entry = self.nodes.entry(parent.clone()).or_insert_with(|| {
                trace!("Creating placeholder {parent:?}");
                NodeRecord::placeholder()
            });
            entry.add_child(name.clone());
        }

        // A self-loop registered `name` as a placeholder above; promote covers it.
        match self.nodes.get_mut(&name) {
            Some(node) => node.promote(parents),
            None => {
                self.nodes.insert(name, NodeRecord::declared(parents));
            }
        }

        Ok(())
    }

    /// Remove a node according to `policy`.
    ///
    /// Returns every identifier deleted, including placeholders collected
    /// because nothing depends on them any more.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if the node doesn't exist.
    pub fn remove(&mut self, name: &K, policy: RemovalPolicy) -> Result<HashSet<K>> {
        self.get_node(name)?;
        debug!("Removing node: id={name:?}, policy={policy:?}");

        let removed = if policy.cascade_children {
            let doomed = algorithms::closure_from(self, [name], Direction::Children);
            self.delete_all(doomed)
        } else {
            self.delete_reconciled(name, policy.reattach_to_parents)
        };

        trace!("Removed {} nodes", removed.len());
        Ok(removed)
    }

    /// Remove every node whose dependency chain ends only in placeholders.
    ///
    /// A declared node is pruned when its ancestor closure contains a
    /// placeholder and no root. Closed cycles of declared nodes are kept.
    /// Returns every identifier deleted, including the placeholders left
    /// without children afterwards.
    pub fn prune(&mut self) -> HashSet<K> {
        let doomed = algorithms::prunable(self);
        debug!("Pruning {} nodes", doomed.len());
        self.delete_all(doomed)
    }

    // ===== Comparison =====

    /// Structural equality against a value of any type.
    ///
    /// Returns `false` when `other` is not a `DependencyGraph<K>`.
    pub fn eq_any(&self, other: &dyn Any) -> bool
    where
        K: 'static,
    {
        other
            .downcast_ref::<Self>()
            .is_some_and(|other| self == other)
    }

    // Private helper methods

    /// Whether `name -> parents` would make `name` its own ancestor.
    fn would_close_cycle(&self, name: &K, parents: &HashSet<K>) -> bool {
        parents.contains(name)
            || parents.iter().any(|parent| {
                algorithms::is_reachable(self, parent, name, Direction::Parents)
            })
    }

    /// Direct removal: only `name` is targeted, its neighbours are patched up.
    fn delete_reconciled(&mut self, name: &K, reattach: bool) -> HashSet<K> {
        let Some(node) = self.nodes.remove(name) else {
            return HashSet::new();
        };

        // A self-loop is never handed down.
        let inherited: Vec<K> = node
            .parents()
            .iter()
            .filter(|parent| *parent != name)
            .cloned()
            .collect();

        for child in node.children().iter().filter(|child| *child != name) {
            let Some(record) = self.nodes.get_mut(child) else {
                continue;
            };
            record.remove_parent(name);
            if !reattach {
                continue;
            }
            for parent in &inherited {
                record.add_parent(parent.clone());
            }
            for parent in &inherited {
                trace!("Reattaching {child:?} to {parent:?}");
                if let Some(parent_record) = self.nodes.get_mut(parent) {
                    parent_record.add_child(child.clone());
                }
            }
        }

        for parent in &inherited {
            if let Some(record) = self.nodes.get_mut(parent) {
                record.remove_child(name);
            }
        }

        let mut removed = HashSet::from([name.clone()]);
        removed.extend(self.collect_placeholders(inherited));
        removed
    }

    /// Delete a set of nodes at once, then collect the placeholders they
    /// leave without children.
    fn delete_all(&mut self, doomed: HashSet<K>) -> HashSet<K> {
        let mut survivors_touched = Vec::new();

        for id in &doomed {
            let Some(node) = self.nodes.remove(id) else {
                continue;
            };
            for parent in node.parents() {
                if let Some(record) = self.nodes.get_mut(parent) {
                    record.remove_child(id);
                    survivors_touched.push(parent.clone());
                }
            }
            for child in node.children() {
                if let Some(record) = self.nodes.get_mut(child) {
                    record.remove_parent(id);
                }
            }
        }

        let mut removed = doomed;
        removed.extend(self.collect_placeholders(survivors_touched));
        removed
    }

    /// Delete orphaned placeholders among `candidates`, following their
    /// parents in case the deletion orphans further placeholders.
    fn collect_placeholders(&mut self, candidates: Vec<K>) -> HashSet<K> {
        let mut collected = HashSet::new();
        let mut stack = candidates;

        while let Some(id) = stack.pop() {
            if !self
                .nodes
                .get(&id)
                .is_some_and(NodeRecord::is_orphaned_placeholder)
            {
                continue;
            }
            let Some(node) = self.nodes.remove(&id) else {
                continue;
            };
            trace!("Collecting orphaned placeholder {id:?}");

            for parent in node.parents() {
                if let Some(record) = self.nodes.get_mut(parent) {
                    record.remove_child(&id);
                    stack.push(parent.clone());
                }
            }
            collected.insert(id);
        }

        collected
    }
}

impl<K: NodeKey> Default for DependencyGraph<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Same identifiers, same declared flags, same parent sets.
///
/// Children follow from the parents, and the acyclic mode is not compared.
impl<K: NodeKey> PartialEq for DependencyGraph<K> {
    fn eq(&self, other: &Self) -> bool {
        self.nodes.len() == other.nodes.len()
            && self.nodes.iter().all(|(id, node)| {
                other.nodes.get(id).is_some_and(|theirs| {
                    node.is_declared() == theirs.is_declared() && node.parents() == theirs.parents()
                })
            })
    }
}

impl<K: NodeKey> Eq for DependencyGraph<K> {}
