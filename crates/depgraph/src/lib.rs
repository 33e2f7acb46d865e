//! # depgraph
//!
//! A dependency graph for task and build orchestrators.
//!
//! ## Core Principles
//!
//! - **Incomplete Information**: A node may depend on something not yet declared;
//!   the dependency lives on as a placeholder until it is
//! - **Cycles Are Legal**: Every traversal is cycle-safe, and rejecting cycles is opt-in
//! - **Consistent Removal**: Removing a node never leaves dangling edges or orphaned
//!   placeholders behind
//! - **Atomic Failure**: A failed operation leaves the graph exactly as it was
//!
//! ## Architecture
//!
//! ```text
//! Orchestrator (scheduling, execution)
//!     ↓
//! DependencyGraph (insert, remove, prune, queries)
//!     ↓
//! Algorithms (cycle-safe worklist traversals)
//!     ↓
//! Node Registry (declared / placeholder records keyed by identifier)
//! ```
//!
//! ## Example
//!
//! ```
//! use depgraph::{DependencyGraph, RemovalPolicy};
//! use std::collections::HashSet;
//!
//! let mut graph = DependencyGraph::new();
//! graph.insert("compile", ["fetch"]).unwrap();
//! graph.insert("test", ["compile"]).unwrap();
//!
//! // "fetch" was never declared, so the chain is anchored only by a placeholder
//! assert!(graph.roots().is_empty());
//!
//! let pruned = graph.prune();
//! assert_eq!(pruned, HashSet::from(["fetch", "compile", "test"]));
//! assert!(graph.is_empty());
//! ```
//!
//! The graph does no internal locking. Callers that share one instance across
//! threads wrap it in a single lock.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod export;
pub mod graph;

// Re-export main types
pub use config::GraphConfig;
pub use error::{GraphError, Result};
pub use graph::{
    DependencyGraph, Direction, Name, NodeKey, NodeRecord, NodeState, RemovalPolicy,
};
