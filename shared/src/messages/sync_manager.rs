use std::collections::HashMap;

use log::{info, trace, warn};

use crate::{
    connection::{
        decoder::decode_packet,
        encoder::{encode_chunk_packet, encode_single_packet},
        packet_type::{CHUNK_PREFIX, SINGLE_PREFIX},
    },
    constants::{MAX_SYNC_PAYLOAD, SINGLE_PAYLOAD_LIMIT},
    key_generator::KeyGenerator,
    messages::{
        chunker::{fragment_count, fragments},
        error::SyncError,
        sync_request::{SyncRequest, SyncResponse, SyncRole, SyncStatus},
    },
    transport::BroadcastTransport,
    types::{GameTime, ParticipantId, RequestId},
};

/// Session roster. Every client constructs its manager with the same
/// participant list; only `local` differs from machine to machine.
#[derive(Clone, Debug)]
pub struct SyncConfig {
    pub local: ParticipantId,
    pub participants: Vec<ParticipantId>,
}

/// Per-request options.
#[derive(Clone, Copy, Debug)]
pub struct SyncOptions {
    /// Seconds until the request times out. 0 disables the check entirely:
    /// a request whose frames are silently dropped then stays `Syncing`
    /// forever.
    pub timeout: f32,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self { timeout: 0.0 }
    }
}

/// Owns every in-flight sync exchange on this client.
///
/// Every client in the session runs identical code against its own manager:
/// `create` is called everywhere with the same arguments (lockstep keeps the
/// id allocators in step), the one client whose identity matches the
/// originator transmits, and the broadcast comes back to everyone, sender
/// included, through [`SyncManager::receive_broadcast`].
///
/// The host wires up two entry points:
/// - its inbound-broadcast event hook calls `receive_broadcast`,
/// - its periodic timer calls `tick`, which expires deadlines and sweeps
///   resolved requests out of the registry.
pub struct SyncManager<T: BroadcastTransport> {
    config: SyncConfig,
    transport: T,
    key_generator: KeyGenerator,
    requests: HashMap<RequestId, SyncRequest>,
}

impl<T: BroadcastTransport> SyncManager<T> {
    /// Builds the manager and registers its channel subscriptions: one per
    /// roster participant per prefix tag. Construction is the one-time
    /// initialization point, so subscriptions cannot double-register.
    pub fn new(config: SyncConfig, mut transport: T) -> Self {
        for &participant in &config.participants {
            transport.subscribe(participant, SINGLE_PREFIX);
            transport.subscribe(participant, CHUNK_PREFIX);
        }
        Self {
            config,
            transport,
            key_generator: KeyGenerator::new(),
            requests: HashMap::new(),
        }
    }

    pub fn local_participant(&self) -> ParticipantId {
        self.config.local
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Number of requests currently registered (live or awaiting sweep).
    pub fn live_requests(&self) -> usize {
        self.requests.len()
    }

    pub fn status(&self, id: RequestId) -> Option<SyncStatus> {
        self.requests.get(&id).map(|request| request.status())
    }

    pub fn role(&self, id: RequestId) -> Option<SyncRole> {
        self.requests.get(&id).map(|request| request.role())
    }

    /// Starts one sync exchange and returns its id.
    ///
    /// Call this on every client with the same arguments. The payload is
    /// transmitted only where `originator` matches the local participant;
    /// everywhere else it is ignored and the request just listens for the
    /// originator's broadcasts.
    pub fn create(
        &mut self,
        originator: ParticipantId,
        payload: &[u8],
        options: SyncOptions,
        now: GameTime,
    ) -> Result<RequestId, SyncError> {
        if payload.is_empty() {
            return Err(SyncError::EmptyPayload);
        }
        if options.timeout < 0.0 {
            return Err(SyncError::NegativeTimeout {
                seconds: options.timeout,
            });
        }
        if payload.len() > MAX_SYNC_PAYLOAD {
            return Err(SyncError::PayloadTooLarge {
                size: payload.len(),
                max: MAX_SYNC_PAYLOAD,
            });
        }
        if !self.config.participants.contains(&originator) {
            return Err(SyncError::UnknownOriginator { originator });
        }

        let id = self.key_generator.generate();
        let role = if originator == self.config.local {
            SyncRole::Sender
        } else {
            SyncRole::Receiver
        };
        let deadline = (options.timeout > 0.0).then(|| now + options.timeout);
        let mut request = SyncRequest::new(id, originator, role, now, deadline);

        if role == SyncRole::Sender && !self.transmit(id, payload) {
            // error callback fires on a later tick (or at registration),
            // never synchronously inside create
            request.fail_network(now);
        }

        debug_assert!(!self.requests.contains_key(&id));
        self.requests.insert(id, request);
        trace!("request {} created, role {:?}", id, role);
        Ok(id)
    }

    fn transmit(&mut self, id: RequestId, payload: &[u8]) -> bool {
        if payload.len() <= SINGLE_PAYLOAD_LIMIT {
            let frame = match encode_single_packet(id, payload) {
                Ok(frame) => frame,
                Err(e) => {
                    warn!("request {}: failed to encode frame: {}", id, e);
                    return false;
                }
            };
            return self.transport.send(SINGLE_PREFIX, &frame);
        }

        let chunk_count = (fragment_count(payload.len()) - 1) as u16;
        for (index, fragment) in fragments(payload).enumerate() {
            let frame = match encode_chunk_packet(id, chunk_count, index as u16, fragment) {
                Ok(frame) => frame,
                Err(e) => {
                    warn!("request {}: failed to encode fragment {}: {}", id, index, e);
                    return false;
                }
            };
            if !self.transport.send(CHUNK_PREFIX, &frame) {
                warn!(
                    "request {}: transport rejected fragment {} of {}",
                    id,
                    index,
                    chunk_count as usize + 1
                );
                return false;
            }
        }
        true
    }

    /// Registers the success callback. May be called before or after the
    /// payload arrives: if the request already resolved, the callback fires
    /// immediately and the request is cleaned up here.
    pub fn on_response(&mut self, id: RequestId, callback: impl FnOnce(&SyncResponse) + 'static) {
        let Some(request) = self.requests.get_mut(&id) else {
            warn!("on_response for unknown request {}; ignoring", id);
            return;
        };
        request.set_on_response(Box::new(callback));
        self.dispatch(id);
    }

    /// Registers the failure callback (Timeout or NetworkError). Optional:
    /// callers who skip it silently lose failure notifications.
    pub fn on_error(&mut self, id: RequestId, callback: impl FnOnce(&SyncResponse) + 'static) {
        let Some(request) = self.requests.get_mut(&id) else {
            warn!("on_error for unknown request {}; ignoring", id);
            return;
        };
        request.set_on_error(Box::new(callback));
        self.dispatch(id);
    }

    /// The dispatch trigger: the host's inbound-broadcast event hook feeds
    /// every frame on the sync channel through here.
    ///
    /// Malformed frames and frames addressed to ids with no live request are
    /// discarded, the latter silently: every client receives every
    /// broadcast, and most are not for a request this client is tracking.
    pub fn receive_broadcast(
        &mut self,
        sender: ParticipantId,
        prefix: char,
        frame: &str,
        now: GameTime,
    ) {
        let packet = match decode_packet(prefix, frame) {
            Ok(packet) => packet,
            Err(e) => {
                warn!("discarding frame from participant {}: {}", sender, e);
                return;
            }
        };

        let id = packet.request_id;
        let Some(request) = self.requests.get_mut(&id) else {
            trace!("no live request {} on this client; discarding", id);
            return;
        };
        if sender != request.originator() {
            warn!(
                "request {}: frame from participant {} but originator is {}; discarding",
                id,
                sender,
                request.originator()
            );
            return;
        }

        if request.receive(&packet, now) {
            info!("request {} completed", id);
            self.dispatch(id);
        }
    }

    /// The host's periodic timer hook. Expires overdue requests and sweeps
    /// resolved ones out of the registry so its size stays bounded by the
    /// number of genuinely in-flight exchanges.
    pub fn tick(&mut self, now: GameTime) {
        let ids: Vec<RequestId> = self.requests.keys().copied().collect();
        for id in ids {
            let Some(request) = self.requests.get_mut(&id) else {
                continue;
            };

            if request.expire(now) {
                info!("request {} timed out", id);
            }
            if request.status() == SyncStatus::Syncing {
                continue;
            }

            if let Some((callback, response)) = request.claim_dispatch() {
                self.remove(id);
                callback(&response);
            } else if request.sweep_armed() {
                // terminal for a full tick with nobody claiming the result
                self.remove(id);
            } else {
                request.arm_sweep();
            }
        }
    }

    /// Fires the resolved request's callback if one is registered, then
    /// recycles the id. A request whose callback has not been registered yet
    /// stays in the registry with its result buffered until `tick` sweeps it.
    fn dispatch(&mut self, id: RequestId) {
        let Some(request) = self.requests.get_mut(&id) else {
            return;
        };
        let Some((callback, response)) = request.claim_dispatch() else {
            return;
        };
        // remove and recycle first, so the exchange is fully settled by the
        // time the callback observes it
        self.remove(id);
        callback(&response);
    }

    fn remove(&mut self, id: RequestId) {
        self.requests.remove(&id);
        if let Err(e) = self.key_generator.try_recycle(id) {
            warn!("request {}: {}", id, e);
        }
    }
}
