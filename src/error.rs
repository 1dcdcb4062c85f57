//! Error types for the simulation core

use thiserror::Error;

/// Errors surfaced by the simulation core
#[derive(Debug, Error)]
pub enum SimError {
    /// Two bodies share the same center, so no contact normal exists
    #[error("cannot resolve collision between bodies with coincident centers")]
    CoincidentCenters,

    /// Separation loop hit its iteration cap without clearing the overlap
    #[error("overlap still unresolved after {iterations} separation steps")]
    OverlapUnresolved { iterations: u32 },

    /// Loose action input did not carry exactly three channels
    #[error("action must have 3 channels, got {len}")]
    ActionLength { len: usize },

    /// Discrete action index outside the action table
    #[error("discrete action {0} is out of range (expected 0..6)")]
    DiscreteAction(usize),

    /// Physics configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SimError>;
