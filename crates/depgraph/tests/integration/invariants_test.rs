//! Integration test: long mixed sequences of operations, re-checking the
//! graph's structural invariants after every step.

use depgraph::{DependencyGraph, RemovalPolicy};
use std::collections::HashSet;

const UNIVERSE: u32 = 16;
const STEPS: usize = 4_000;

/// Small deterministic sequence so failures are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    fn below(&mut self, bound: u32) -> u32 {
        self.next() % bound
    }
}

fn check_invariants(graph: &DependencyGraph<u32>) {
    for id in graph.nodes() {
        let node = graph.get_node(&id).unwrap();

        for parent in node.parents() {
            let parent_node = graph
                .get_node(parent)
                .unwrap_or_else(|_| panic!("{id} has dangling parent {parent}"));
            assert!(
                parent_node.children().contains(&id),
                "{parent} does not list {id} as a child"
            );
        }
        for child in node.children() {
            let child_node = graph
                .get_node(child)
                .unwrap_or_else(|_| panic!("{id} has dangling child {child}"));
            assert!(
                child_node.parents().contains(&id),
                "{child} does not list {id} as a parent"
            );
        }

        if !node.is_declared() {
            assert!(node.parents().is_empty(), "placeholder {id} has parents");
            assert!(!node.children().is_empty(), "placeholder {id} is orphaned");
        }

        assert_eq!(
            graph.roots().contains(&id),
            node.is_declared() && node.parents().is_empty()
        );

        if graph.is_acyclic() {
            assert!(!graph.is_ancestor(&id, &id).unwrap(), "{id} is on a cycle");
        }
    }
}

fn random_policy(rng: &mut Lcg) -> RemovalPolicy {
    RemovalPolicy {
        cascade_children: rng.below(4) == 0,
        reattach_to_parents: rng.below(2) == 0,
    }
}

fn run_mixed_operations(mut graph: DependencyGraph<u32>, seed: u64) {
    let mut rng = Lcg(seed);

    for _ in 0..STEPS {
        let before = graph.clone();

        match rng.below(10) {
            0..=5 => {
                let name = rng.below(UNIVERSE);
                let parents: HashSet<u32> =
                    (0..rng.below(4)).map(|_| rng.below(UNIVERSE)).collect();
                let declared_before = graph.is_declared(&name).unwrap_or(false);

                match graph.insert(name, parents.clone()) {
                    Ok(()) => {
                        assert!(!declared_before);
                        assert!(graph.is_declared(&name).unwrap());
                        assert_eq!(graph.get_parents(&name).unwrap(), parents);
                        if before.contains(&name) {
                            // promotion keeps earlier dependents
                            let kept = before.get_children(&name).unwrap();
                            assert!(kept.is_subset(&graph.get_children(&name).unwrap()));
                        }
                    }
                    Err(_) => assert!(graph == before, "failed insert changed the graph"),
                }
            }
            6..=8 => {
                let name = rng.below(UNIVERSE);
                let policy = random_policy(&mut rng);

                match graph.remove(&name, policy) {
                    Ok(removed) => {
                        assert!(removed.contains(&name));
                        for id in &removed {
                            assert!(before.contains(id));
                            assert!(!graph.contains(id));
                        }
                        assert_eq!(before.len(), graph.len() + removed.len());
                    }
                    Err(_) => {
                        assert!(!before.contains(&name));
                        assert!(graph == before);
                    }
                }
            }
            _ => {
                let removed = graph.prune();
                assert_eq!(before.len(), graph.len() + removed.len());
                assert!(graph.prune().is_empty(), "prune is not a fixpoint");
            }
        }

        check_invariants(&graph);
    }
}

#[test]
fn test_invariants_hold_in_cyclic_graph() {
    for seed in [1, 7, 42] {
        run_mixed_operations(DependencyGraph::new(), seed);
    }
}

#[test]
fn test_invariants_hold_in_acyclic_graph() {
    for seed in [3, 11, 99] {
        run_mixed_operations(DependencyGraph::acyclic(), seed);
    }
}

#[test]
fn test_cascade_removes_each_reachable_node_once() {
    let mut graph = DependencyGraph::new();
    for i in 0..UNIVERSE {
        graph.insert(i, [(i + 1) % UNIVERSE, (i + 5) % UNIVERSE]).unwrap();
    }

    let expected = graph.descendants(&0).unwrap();
    let removed = graph.remove(&0, RemovalPolicy::cascade()).unwrap();

    assert!(expected.contains(&0));
    assert_eq!(removed, expected);
    assert!(graph.is_empty());
}
