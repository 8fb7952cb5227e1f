//! Lazy memory barrier insertion.

use crate::backend::{CommandSink, StateCommand};
use crate::resources::Texture;
use crate::types::MemoryBarrierFlags;

/// Tracks barriers owed by one context.
///
/// Writers record barrier bits both on the context (through
/// [`set_pending`](Self::set_pending)) and on the written texture. A barrier
/// is issued only when a reader asks for bits that are pending on both.
///
/// Barriers are resolved per bind, not per write: a barrier issued for one
/// texture also satisfies another texture with the same pending bits, yet that
/// texture keeps its own bits until it is bound. This can cost one redundant
/// barrier later and never skips a needed one.
#[derive(Debug, Default)]
pub struct MemoryBarrierTracker {
    pending: MemoryBarrierFlags,
}

impl MemoryBarrierTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Barriers recorded but not yet issued.
    pub fn pending(&self) -> MemoryBarrierFlags {
        self.pending
    }

    /// OR `barriers` into the pending mask.
    pub fn set_pending(&mut self, barriers: MemoryBarrierFlags) {
        self.pending |= barriers;
    }

    /// Drop every pending barrier without issuing it.
    pub fn clear(&mut self) {
        self.pending = MemoryBarrierFlags::empty();
    }

    /// Issue the barriers in `required` that are still owed.
    ///
    /// With a `resource`, only bits pending on that resource are candidates,
    /// and afterwards the resource keeps the bits the context still owes it.
    /// Returns the bits of the issued barrier, empty if none was issued.
    pub fn ensure(
        &mut self,
        required: MemoryBarrierFlags,
        resource: Option<&Texture>,
        sink: &mut impl CommandSink,
    ) -> MemoryBarrierFlags {
        let resource_pending = resource.map(Texture::pending_memory_barriers);

        let mut barriers = required;
        if let Some(resource_pending) = resource_pending {
            barriers &= resource_pending;
        }
        barriers &= self.pending;

        if !barriers.is_empty() {
            sink.submit(StateCommand::MemoryBarrier(barriers));
            self.pending.remove(barriers);
        }

        if let (Some(resource), Some(resource_pending)) = (resource, resource_pending) {
            resource.reset_pending_memory_barriers(self.pending & resource_pending);
        }

        barriers
    }
}
