use thiserror::Error;

/// Top-level error type for the autodim drafting engine.
#[derive(Debug, Error)]
pub enum AutodimError {
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Errors related to building and resolving the cut-plane graph.
///
/// Malformed geometry during derivation degrades to fewer emitted
/// dimensions and a `warn` log; error paths exist only for graph
/// construction and arena lookups.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("invalid edge: {0}")]
    InvalidEdge(String),
}

/// Convenience type alias for results using [`AutodimError`].
pub type Result<T> = std::result::Result<T, AutodimError>;
