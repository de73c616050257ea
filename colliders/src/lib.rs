pub mod error;
pub mod manager;
pub mod queue;

pub use error::{ColliderError, ColliderResult};
pub use manager::ColliderManager;
pub use queue::ShapeSender;
