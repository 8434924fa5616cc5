use thiserror::Error;

use crate::types::ParticipantId;

/// Creation-time argument errors. These fail fast from `SyncManager::create`
/// rather than silently producing a request that can never resolve.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    /// A sync request must carry at least one byte
    #[error("payload is empty; a sync request must carry at least one byte")]
    EmptyPayload,

    /// Timeouts are non-negative; zero disables the timeout check
    #[error("timeout of {seconds} seconds is negative; use 0.0 to disable the timeout")]
    NegativeTimeout { seconds: f32 },

    /// Payload cannot span more fragments than a u16 chunk index addresses
    #[error("payload of {size} bytes exceeds the {max}-byte sync limit")]
    PayloadTooLarge { size: usize, max: usize },

    /// Originator must be in the session roster, or no subscription exists
    /// for its broadcasts and the request could never complete
    #[error("originator {originator} is not in the session roster")]
    UnknownOriginator { originator: ParticipantId },
}
