/*!
 * Callback Slots
 * Arena slots with generational ids and claim counts
 */

/// Generational address of a ring slot.
///
/// The generation stamp is bumped every time the underlying slot is
/// recycled, so a handle minted for an earlier occupant can never act on a
/// later one, including handles minted by a different registry whose arena
/// happens to use the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SlotId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

/// One ring node: neighbor links, claim count, and the callback payload.
///
/// `prev`/`next` are arena indices, not pointers. After an unlink they go
/// stale on purpose: a cursor still standing on this slot follows them to
/// step back into the ring. Stale links always lead to a slot that was
/// linked at the moment this one was removed, so chains of removed slots
/// terminate at the sentinel.
#[derive(Debug)]
pub(crate) struct Slot<T> {
    pub(crate) prev: u32,
    pub(crate) next: u32,
    pub(crate) generation: u32,
    pub(crate) claims: u32,
    pub(crate) enabled: bool,
    pub(crate) linked: bool,
    pub(crate) callback: Option<T>,
}

impl<T> Slot<T> {
    /// Fresh occupancy: one claim for ring membership, enabled, links unset.
    pub(crate) fn new(generation: u32, callback: Option<T>) -> Self {
        Self {
            prev: 0,
            next: 0,
            generation,
            claims: 1,
            enabled: true,
            linked: true,
            callback,
        }
    }

    /// Retired slots are unlinked and unclaimed; their storage may be
    /// recycled once no emission is in flight.
    pub(crate) fn is_retired(&self) -> bool {
        !self.linked && self.claims == 0
    }
}
