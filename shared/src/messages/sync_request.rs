use log::warn;

use crate::{
    connection::packet::Packet,
    types::{GameTime, ParticipantId, RequestId},
};

/// Where a request stands. `Syncing` is the sole initial state; the other
/// three are terminal and no transition ever leaves them.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SyncStatus {
    /// Waiting for fragments (or for the timeout to expire).
    Syncing,
    /// All fragments arrived and the payload was reassembled.
    Success,
    /// The deadline passed before the payload completed.
    Timeout,
    /// The transport reported a hard send failure at creation time.
    NetworkError,
}

/// A request's relationship to the payload, fixed at construction: the one
/// participant whose identity matches the originator transmits, everyone
/// else only listens. No runtime identity check hides inside the send path.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SyncRole {
    Sender,
    Receiver,
}

/// What a resolved request hands to its callback.
#[derive(Clone, Debug, PartialEq)]
pub struct SyncResponse {
    /// The reassembled payload. Empty for error resolutions.
    pub data: Vec<u8>,
    pub status: SyncStatus,
    /// Seconds elapsed between creation and resolution.
    pub time: GameTime,
}

pub(crate) type SyncCallback = Box<dyn FnOnce(&SyncResponse)>;

/// One logical message exchange: fragment slots filled in as broadcasts
/// arrive, resolved exactly once to Success, Timeout, or NetworkError.
///
/// Owned by the manager's registry; resolution results are buffered here so
/// a callback registered after resolution still fires (promise semantics).
pub struct SyncRequest {
    id: RequestId,
    originator: ParticipantId,
    role: SyncRole,
    /// Fragment slots, indexed by chunk index. Allocated when the first
    /// packet reveals the fragment total; sparse until reassembly completes.
    chunks: Vec<Option<Vec<u8>>>,
    received_count: usize,
    status: SyncStatus,
    start_time: GameTime,
    deadline: Option<GameTime>,
    on_response: Option<SyncCallback>,
    on_error: Option<SyncCallback>,
    /// Buffered resolution, cleared once a callback claims it.
    resolution: Option<SyncResponse>,
    /// Set when a terminal request survives a tick unclaimed; the next tick
    /// sweeps it so the registry stays bounded.
    sweep_armed: bool,
}

impl SyncRequest {
    pub(crate) fn new(
        id: RequestId,
        originator: ParticipantId,
        role: SyncRole,
        start_time: GameTime,
        deadline: Option<GameTime>,
    ) -> Self {
        Self {
            id,
            originator,
            role,
            chunks: Vec::new(),
            received_count: 0,
            status: SyncStatus::Syncing,
            start_time,
            deadline,
            on_response: None,
            on_error: None,
            resolution: None,
            sweep_armed: false,
        }
    }

    pub fn originator(&self) -> ParticipantId {
        self.originator
    }

    pub fn role(&self) -> SyncRole {
        self.role
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    /// Stores one arriving fragment. Returns true when this fragment
    /// completed the payload and the request resolved to Success.
    ///
    /// Anything that cannot be stored safely (a packet after resolution, a
    /// fragment total that contradicts earlier packets, an out-of-range
    /// index, a duplicate) is discarded. The count of received fragments
    /// only ever increases, and only by first arrivals, so resolution fires
    /// exactly once.
    pub(crate) fn receive(&mut self, packet: &Packet, now: GameTime) -> bool {
        if self.status != SyncStatus::Syncing {
            return false;
        }

        let fragment_total = packet.fragment_total();
        if self.chunks.is_empty() {
            self.chunks = vec![None; fragment_total];
        } else if self.chunks.len() != fragment_total {
            warn!(
                "request {}: packet announces {} fragments but earlier packets announced {}; discarding",
                self.id,
                fragment_total,
                self.chunks.len()
            );
            return false;
        }

        let index = packet.chunk_index as usize;
        let Some(slot) = self.chunks.get_mut(index) else {
            warn!(
                "request {}: chunk index {} out of range for {} fragments; discarding",
                self.id, index, fragment_total
            );
            return false;
        };
        if slot.is_some() {
            warn!(
                "request {}: duplicate fragment {}; discarding",
                self.id, index
            );
            return false;
        }

        *slot = Some(packet.payload.clone());
        self.received_count += 1;
        if self.received_count < fragment_total {
            return false;
        }

        // all fragments present; join them in index order
        let mut data = Vec::new();
        for slot in self.chunks.drain(..) {
            // every slot was filled exactly once before the count completed
            if let Some(fragment) = slot {
                data.extend_from_slice(&fragment);
            }
        }
        self.resolve(SyncStatus::Success, data, now);
        true
    }

    /// Transitions to Timeout if the deadline has passed. Returns true when
    /// the transition happened on this call.
    pub(crate) fn expire(&mut self, now: GameTime) -> bool {
        if self.status != SyncStatus::Syncing {
            return false;
        }
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }
        self.resolve(SyncStatus::Timeout, Vec::new(), now);
        true
    }

    /// Marks the request failed because the transport rejected a send.
    /// The manager dispatches the error callback on a later tick, never
    /// synchronously inside `create`.
    pub(crate) fn fail_network(&mut self, now: GameTime) {
        if self.status != SyncStatus::Syncing {
            return;
        }
        self.resolve(SyncStatus::NetworkError, Vec::new(), now);
    }

    fn resolve(&mut self, status: SyncStatus, data: Vec<u8>, now: GameTime) {
        self.status = status;
        self.resolution = Some(SyncResponse {
            data,
            status,
            time: now - self.start_time,
        });
    }

    pub(crate) fn set_on_response(&mut self, callback: SyncCallback) {
        self.on_response = Some(callback);
    }

    pub(crate) fn set_on_error(&mut self, callback: SyncCallback) {
        self.on_error = Some(callback);
    }

    /// Hands out the callback/response pair to invoke, if this request has
    /// resolved and the matching callback is registered. Both are consumed,
    /// so over a request's lifetime at most one callback fires, at most
    /// once: success or error, never both.
    pub(crate) fn claim_dispatch(&mut self) -> Option<(SyncCallback, SyncResponse)> {
        let callback = match self.status {
            SyncStatus::Syncing => return None,
            SyncStatus::Success => self.on_response.take()?,
            SyncStatus::Timeout | SyncStatus::NetworkError => self.on_error.take()?,
        };
        let Some(response) = self.resolution.take() else {
            // a previous dispatch already claimed the result
            return None;
        };
        Some((callback, response))
    }

    pub(crate) fn sweep_armed(&self) -> bool {
        self.sweep_armed
    }

    pub(crate) fn arm_sweep(&mut self) {
        self.sweep_armed = true;
    }
}
