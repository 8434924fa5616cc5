use crate::types::ParticipantId;

/// The host engine's broadcast primitive, as thin as the engine makes it:
/// one short text frame per send, tagged with a one-character prefix, fanned
/// out to every client that subscribed to the (sender, prefix) pair.
///
/// Sends are fire-and-forget; the boolean only reports whether the engine
/// accepted the frame (false on hard failure, e.g. the send queue is full).
/// Inbound frames are delivered by the host's event hook calling
/// [`crate::SyncManager::receive_broadcast`].
pub trait BroadcastTransport {
    fn send(&mut self, prefix: char, frame: &str) -> bool;

    /// Registers interest in frames broadcast by `sender` under `prefix`.
    /// The engine's event model requires the listening side to register per
    /// potential sender; the manager does this once, at construction, for
    /// every roster participant.
    fn subscribe(&mut self, sender: ParticipantId, prefix: char);
}
