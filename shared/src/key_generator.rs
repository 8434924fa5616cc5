use thiserror::Error;

use crate::types::RequestId;

/// Errors that can occur during id allocation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyGeneratorError {
    /// Id is already in the free list; recycling it twice would let two
    /// future requests share it
    #[error("request id {id} recycled twice; it is already in the free list")]
    DoubleRecycle { id: RequestId },
}

/// Hands out request ids: a monotonically increasing counter, with a
/// free-list of recycled ids consulted first.
///
/// Recently freed ids are reused before the counter grows, which keeps
/// header-encoded ids small, in practice bounded by the number of
/// concurrently in-flight requests. The caller (the manager's registry)
/// defines liveness: an id must only be recycled when its request has left
/// the registry, so `generate` can never return an id a live request holds.
pub struct KeyGenerator {
    next_id: RequestId,
    free_list: Vec<RequestId>,
}

impl KeyGenerator {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            free_list: Vec::new(),
        }
    }

    /// Returns the most recently freed id, or a fresh one from the counter.
    pub fn generate(&mut self) -> RequestId {
        if let Some(id) = self.free_list.pop() {
            return id;
        }
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Returns a resolved request's id to the pool.
    pub fn try_recycle(&mut self, id: RequestId) -> Result<(), KeyGeneratorError> {
        if self.free_list.contains(&id) {
            return Err(KeyGeneratorError::DoubleRecycle { id });
        }
        self.free_list.push(id);
        Ok(())
    }

    /// Returns a resolved request's id to the pool.
    ///
    /// # Panics
    /// Panics if the id is already in the free list. For the non-panicking
    /// version, use `try_recycle`.
    pub fn recycle(&mut self, id: RequestId) {
        self.try_recycle(id)
            .expect("request id recycled twice")
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}
