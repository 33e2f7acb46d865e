//! Integration test for large graphs: long chains and rings must not
//! overflow the stack and must stay fast enough for tooling.

use depgraph::{DependencyGraph, RemovalPolicy};
use std::collections::HashSet;
use std::time::Instant;

const CHAIN_LEN: u64 = 50_000;

fn create_chain(len: u64) -> DependencyGraph<u64> {
    let mut graph = DependencyGraph::new();
    graph.insert(0, []).unwrap();
    for i in 1..len {
        graph.insert(i, [i - 1]).unwrap();
    }
    graph
}

#[test]
fn test_long_chain_ancestry() {
    let start = Instant::now();
    let graph = create_chain(CHAIN_LEN);

    assert_eq!(graph.len(), CHAIN_LEN as usize);
    assert_eq!(graph.roots(), HashSet::from([0]));
    assert!(graph.is_ancestor(&(CHAIN_LEN - 1), &0).unwrap());
    assert!(!graph.is_ancestor(&0, &(CHAIN_LEN - 1)).unwrap());
    assert_eq!(
        graph.ancestors(&(CHAIN_LEN - 1)).unwrap().len(),
        CHAIN_LEN as usize - 1
    );

    let elapsed = start.elapsed();
    println!("Built and queried {CHAIN_LEN}-node chain in {elapsed:?}");
}

#[test]
fn test_long_chain_cascade_removal() {
    let mut graph = create_chain(CHAIN_LEN);

    let removed = graph.remove(&0, RemovalPolicy::cascade()).unwrap();

    assert_eq!(removed.len(), CHAIN_LEN as usize);
    assert!(graph.is_empty());
}

#[test]
fn test_long_ring_cascade_removal() {
    let mut graph = DependencyGraph::new();
    for i in 0..CHAIN_LEN {
        graph.insert(i, [(i + 1) % CHAIN_LEN]).unwrap();
    }

    assert!(graph.is_ancestor(&0, &0).unwrap());
    assert!(graph.roots().is_empty());
    assert!(graph.prune().is_empty());

    let removed = graph.remove(&(CHAIN_LEN / 2), RemovalPolicy::cascade()).unwrap();
    assert_eq!(removed.len(), CHAIN_LEN as usize);
    assert!(graph.is_empty());
}

#[test]
fn test_long_placeholder_anchored_chain_is_pruned() {
    let mut graph = DependencyGraph::new();
    for i in 1..CHAIN_LEN {
        graph.insert(i, [i - 1]).unwrap();
    }
    assert_eq!(graph.placeholders(), HashSet::from([0]));

    let removed = graph.prune();

    assert_eq!(removed.len(), CHAIN_LEN as usize);
    assert!(graph.is_empty());
}

#[test]
fn test_acyclic_rejection_on_long_chain() {
    let mut graph = DependencyGraph::acyclic();
    for i in 1..10_000u64 {
        graph.insert(i, [i - 1]).unwrap();
    }

    assert!(graph.insert(0, [9_999]).is_err());
    graph.insert(0, []).unwrap();
    assert_eq!(graph.roots(), HashSet::from([0]));
}
