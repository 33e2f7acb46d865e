//! Core graph types and operations.
//!
//! This module defines the fundamental building blocks:
//! - [`NodeKey`] and [`Name`]: identifiers usable as node names
//! - [`NodeRecord`]: a node's declared flag and its edge sets
//! - [`DependencyGraph`]: the graph itself, with insertion, removal,
//!   ancestry queries and pruning

mod dependency_graph;
mod key;
mod node;
pub mod algorithms;

pub use algorithms::Direction;
pub use dependency_graph::{DependencyGraph, RemovalPolicy};
pub use key::{Name, NodeKey};
pub use node::{NodeRecord, NodeState};
