//! Graph configuration.

use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};

/// Options fixed for the lifetime of a [`DependencyGraph`](crate::DependencyGraph).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    /// Reject insertions that would make a node its own ancestor.
    pub acyclic: bool,
}

impl GraphConfig {
    /// Parse a configuration from JSON.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Config`] if the input is not a valid configuration.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input)
            .map_err(|e| GraphError::config("Failed to parse graph config", Some(e)))
    }
}
