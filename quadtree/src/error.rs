use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadtreeError {
    InvalidAabb {
        min_x: f32,
        min_y: f32,
        max_x: f32,
        max_y: f32,
    },
    OutOfBounds {
        min_x: f32,
        min_y: f32,
        max_x: f32,
        max_y: f32,
        bounds_min_x: f32,
        bounds_min_y: f32,
        bounds_max_x: f32,
        bounds_max_y: f32,
    },
}

pub type QuadtreeResult<T> = Result<T, QuadtreeError>;

impl fmt::Display for QuadtreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadtreeError::InvalidAabb {
                min_x,
                min_y,
                max_x,
                max_y,
            } => {
                write!(
                    f,
                    "bounding box must be finite with min <= max (min_x: {}, min_y: {}, max_x: {}, max_y: {})",
                    min_x, min_y, max_x, max_y
                )
            }
            QuadtreeError::OutOfBounds {
                min_x,
                min_y,
                max_x,
                max_y,
                bounds_min_x,
                bounds_min_y,
                bounds_max_x,
                bounds_max_y,
            } => {
                write!(
                    f,
                    "bounding box must lie strictly within the tree bounds (min_x: {}, min_y: {}, max_x: {}, max_y: {}, bounds_min_x: {}, bounds_min_y: {}, bounds_max_x: {}, bounds_max_y: {})",
                    min_x,
                    min_y,
                    max_x,
                    max_y,
                    bounds_min_x,
                    bounds_min_y,
                    bounds_max_x,
                    bounds_max_y
                )
            }
        }
    }
}

impl std::error::Error for QuadtreeError {}
