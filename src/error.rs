// src/error.rs

/// Failure reported by a graphics backend while managing vertex data.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("vertex buffer allocation failed: {0}")]
    Allocation(String),

    #[error("refusing to allocate an empty vertex buffer")]
    EmptyBuffer,
}

/// Recoverable errors surfaced by shape generation and polygon construction.
///
/// Misuse of a polygon (rendering or destroying it after `destroy`, rendering
/// without its program bound) is a programmer error and panics instead.
#[derive(Debug, thiserror::Error)]
pub enum PolygonError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl PolygonError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, PolygonError>;
