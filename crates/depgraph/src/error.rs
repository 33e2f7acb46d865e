//! Error types for depgraph operations.
//!
//! Every failure is a distinct [`GraphError`] variant so callers can decide
//! how to react. A failed mutation never leaves partial state behind.

use thiserror::Error;

/// Result type alias for depgraph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Error type for all graph operations.
///
/// Identifiers are rendered with `{:?}` so the error type stays independent
/// of the graph's key type.
#[derive(Error, Debug)]
pub enum GraphError {
    /// An identifier cannot be used as a node key (e.g. a mutable composite)
    #[error("Invalid key: {key}")]
    InvalidKey {
        /// Debug rendering of the rejected identifier
        key: String,
    },

    /// A declared node with this identifier is already in the graph
    #[error("Node already exists: {node_id}")]
    AlreadyExists {
        /// Identifier of the existing node
        node_id: String,
    },

    /// Inserting the node would make it its own ancestor in an acyclic graph
    #[error("Cycle rejected: inserting {node_id} would make it its own ancestor")]
    CycleRejected {
        /// Identifier of the node whose insertion was rejected
        node_id: String,
    },

    /// Node not found in the graph
    #[error("Node not found: {node_id}")]
    NodeNotFound {
        /// Identifier of the missing node
        node_id: String,
    },

    /// Graph configuration could not be parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Error details
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl GraphError {
    pub(crate) fn invalid_key(key: &impl std::fmt::Debug) -> Self {
        Self::InvalidKey {
            key: format!("{key:?}"),
        }
    }

    pub(crate) fn already_exists(node_id: &impl std::fmt::Debug) -> Self {
        Self::AlreadyExists {
            node_id: format!("{node_id:?}"),
        }
    }

    pub(crate) fn cycle_rejected(node_id: &impl std::fmt::Debug) -> Self {
        Self::CycleRejected {
            node_id: format!("{node_id:?}"),
        }
    }

    pub(crate) fn not_found(node_id: &impl std::fmt::Debug) -> Self {
        Self::NodeNotFound {
            node_id: format!("{node_id:?}"),
        }
    }

    /// Create a configuration error from a message and optional source.
    pub fn config<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }
}
