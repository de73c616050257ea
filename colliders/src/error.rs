use quadtree::QuadtreeError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderError {
    UnknownCollider { id: u32 },
    Index(QuadtreeError),
    QueueFull,
    QueueDisconnected,
}

pub type ColliderResult<T> = Result<T, ColliderError>;

impl fmt::Display for ColliderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColliderError::UnknownCollider { id } => {
                write!(f, "no collider registered under id {}", id)
            }
            ColliderError::Index(err) => {
                write!(f, "spatial index rejected the bounding box: {}", err)
            }
            ColliderError::QueueFull => {
                write!(f, "ingestion queue stayed full for the whole retry budget")
            }
            ColliderError::QueueDisconnected => {
                write!(f, "ingestion queue consumer is gone")
            }
        }
    }
}

impl std::error::Error for ColliderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ColliderError::Index(err) => Some(err),
            _ => None,
        }
    }
}

impl From<QuadtreeError> for ColliderError {
    fn from(err: QuadtreeError) -> Self {
        ColliderError::Index(err)
    }
}
