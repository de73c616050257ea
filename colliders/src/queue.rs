use crate::error::{ColliderError, ColliderResult};
use common::shapes::ShapeEnum;
use crossbeam_channel::{Sender, TrySendError};

/// Retries before a push against a full queue gives up. Keeps the
/// back-pressure spin bounded instead of waiting forever on a stalled
/// consumer.
const SPIN_LIMIT: usize = 1024;

/// Producer handle for the bounded shape-ingestion channel.
///
/// Clonable and sendable across threads; every shape pushed here is
/// registered by the tick thread at the start of its next tick. No
/// ordering is guaranteed between producers.
#[derive(Clone)]
pub struct ShapeSender {
    tx: Sender<ShapeEnum>,
}

impl ShapeSender {
    pub(crate) fn new(tx: Sender<ShapeEnum>) -> Self {
        Self { tx }
    }

    /// Enqueues a shape for registration, spinning briefly while the
    /// queue is full. Returns [`ColliderError::QueueFull`] once the retry
    /// budget is spent so producers always see back-pressure explicitly.
    pub fn push(&self, shape: ShapeEnum) -> ColliderResult<()> {
        let mut shape = shape;
        for _ in 0..SPIN_LIMIT {
            match self.tx.try_send(shape) {
                Ok(()) => return Ok(()),
                Err(TrySendError::Full(returned)) => {
                    shape = returned;
                    std::hint::spin_loop();
                }
                Err(TrySendError::Disconnected(_)) => {
                    return Err(ColliderError::QueueDisconnected);
                }
            }
        }
        Err(ColliderError::QueueFull)
    }
}
