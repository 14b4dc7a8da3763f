use thiserror::Error;

/// Errors produced while mapping obstacles into the ST graph.
///
/// Any error is fatal to the whole boundary-construction call; the
/// planning cycle that invoked it decides whether to fall back to a
/// previous safe plan or abort. Nothing is retried internally.
#[derive(Debug, Error)]
pub enum MappingError {
    /// A planning input failed validation.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// Mapping one obstacle's boundaries failed.
    #[error("failed to map obstacle {id}: {reason}")]
    ObstacleMappingFailure {
        /// Identity of the offending obstacle.
        id: String,
        /// What went wrong while mapping it.
        reason: String,
    },
}
