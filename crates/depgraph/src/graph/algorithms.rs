//! Graph traversal algorithms.
//!
//! Every walk is an iterative worklist with a visited set, so cycles and
//! self-loops terminate and long chains cannot overflow the stack.

use super::key::NodeKey;
use super::DependencyGraph;
use std::collections::HashSet;

/// Which edges a traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Follow edges towards dependencies
    Parents,
    /// Follow edges towards dependents
    Children,
}

fn neighbors<'a, K: NodeKey>(
    graph: &'a DependencyGraph<K>,
    id: &K,
    direction: Direction,
) -> impl Iterator<Item = &'a K> {
    graph
        .record(id)
        .into_iter()
        .flat_map(move |node| match direction {
            Direction::Parents => node.parents().iter(),
            Direction::Children => node.children().iter(),
        })
}

/// All nodes reachable from `start` in one or more hops.
///
/// `start` itself is part of the result only if it lies on a cycle.
pub fn reachable<K: NodeKey>(
    graph: &DependencyGraph<K>,
    start: &K,
    direction: Direction,
) -> HashSet<K> {
    let mut visited = HashSet::new();
    let mut stack: Vec<&K> = neighbors(graph, start, direction).collect();

    while let Some(current) = stack.pop() {
        if visited.insert(current.clone()) {
            stack.extend(neighbors(graph, current, direction));
        }
    }

    visited
}

/// Whether `target` can be reached from `start` in one or more hops.
///
/// Stops as soon as `target` is found.
pub fn is_reachable<K: NodeKey>(
    graph: &DependencyGraph<K>,
    start: &K,
    target: &K,
    direction: Direction,
) -> bool {
    let mut visited: HashSet<&K> = HashSet::new();
    let mut stack: Vec<&K> = neighbors(graph, start, direction).collect();

    while let Some(current) = stack.pop() {
        if current == target {
            return true;
        }
        if visited.insert(current) {
            stack.extend(neighbors(graph, current, direction));
        }
    }

    false
}

/// The seeds plus everything reachable from them.
pub fn closure_from<'a, K: NodeKey + 'a>(
    graph: &DependencyGraph<K>,
    seeds: impl IntoIterator<Item = &'a K>,
    direction: Direction,
) -> HashSet<K> {
    let mut visited = HashSet::new();
    let mut stack: Vec<K> = seeds.into_iter().cloned().collect();

    while let Some(current) = stack.pop() {
        if visited.contains(&current) {
            continue;
        }
        stack.extend(neighbors(graph, &current, direction).cloned());
        visited.insert(current);
    }

    visited
}

/// Declared nodes whose ancestor closure contains a placeholder but no root.
///
/// A declared node has a root among its ancestors exactly when it is
/// reachable from a root along child edges, and likewise for placeholders, so
/// two multi-source walks classify the whole graph at once. Roots seed the
/// first walk and are therefore never prunable.
pub fn prunable<K: NodeKey>(graph: &DependencyGraph<K>) -> HashSet<K> {
    let roots: Vec<&K> = graph
        .records()
        .filter(|(_, node)| node.is_root())
        .map(|(id, _)| id)
        .collect();
    let placeholders: Vec<&K> = graph
        .records()
        .filter(|(_, node)| !node.is_declared())
        .map(|(id, _)| id)
        .collect();

    let anchored = closure_from(graph, roots, Direction::Children);
    let incomplete = closure_from(graph, placeholders, Direction::Children);

    incomplete
        .into_iter()
        .filter(|id| !anchored.contains(id))
        .filter(|id| graph.record(id).is_some_and(|node| node.is_declared()))
        .collect()
}
