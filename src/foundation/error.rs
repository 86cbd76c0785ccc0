/// Convenience result alias used across the crate.
pub type StratusResult<T> = Result<T, StratusError>;

/// Error type for scene loading, validation, and sink failures.
///
/// Runtime degradations (missing anchors, degenerate spans, invalid layer
/// numerics) are recovered in place and surfaced only as `tracing` warnings;
/// they never appear here.
#[derive(thiserror::Error, Debug)]
pub enum StratusError {
    /// Scene document failed structural validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Geometry state was unusable in a way that cannot be defaulted.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Per-frame evaluation failed.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Scene JSON could not be parsed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, typically from a host-provided sink.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StratusError {
    /// Build a [`StratusError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StratusError::Geometry`].
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`StratusError::Evaluation`].
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`StratusError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
