//! Error types for graph and GA configuration.
//!
//! All variants are fail-fast configuration errors: they are reported
//! once at construction time and never retried. Invalid candidate tours
//! are not errors — they are an expected, frequent outcome and are
//! silently discarded by the engine.

/// Errors raised while constructing a [`Graph`](crate::graph::Graph) or
/// validating a [`GaConfig`](crate::ga::GaConfig).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GaError {
    /// The graph must contain at least one vertex.
    #[error("graph must have at least one vertex")]
    EmptyGraph,

    /// The initial vertex must name an existing vertex.
    #[error("initial vertex {0} is out of range for {1} vertices")]
    InitialVertexOutOfRange(usize, usize),

    /// The population must hold at least one individual.
    #[error("population size must be at least 1, got {0}")]
    InvalidPopulationSize(usize),

    /// The mutation rate is a percentage in `[0, 100]`.
    #[error("mutation rate must be within 0..=100, got {0}")]
    MutationRateOutOfRange(u8),
}
