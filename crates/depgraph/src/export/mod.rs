//! Export module for inspecting graphs in external tools.
//!
//! - **DOT**: Graphviz visualization, placeholders drawn dashed

pub mod dot;

pub use dot::{export_dot, export_dot_styled, DotOptions};
