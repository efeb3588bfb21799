/*!
 * Ring Arena
 * Claim-counted circular slot storage with deferred reuse
 */

use log::debug;
use std::cell::RefCell;

use super::slot::{Slot, SlotId};
use crate::traits::SlotControl;

/// Arena index of the sentinel slot. The sentinel anchors the ring, never
/// carries a callback, and is never handed out as a connection.
pub(crate) const SENTINEL: u32 = 0;

/// Circular doubly-linked callback storage.
///
/// The list is threaded through `prev`/`next` arena indices. Every linked
/// slot holds one claim for its ring membership, and each traversal cursor
/// holds one claim on the slot it is standing on. A slot whose claim count
/// returns to zero is retired; its storage is recycled only between
/// emissions, so stale neighbor links held by in-flight cursors never alias
/// a new registration.
pub(crate) struct Ring<T> {
    slots: Vec<Slot<T>>,
    /// Indices whose claims hit zero, pending reuse. Entries are validated
    /// at pop time: a slot resurrected by a passing cursor re-queues itself
    /// on its next release, leaving the older entry stale.
    retired: Vec<u32>,
    /// Cursors currently walking the ring.
    walks: u32,
}

impl<T> Ring<T> {
    /// Materialize the ring: sentinel only, linked to itself, claimed twice
    /// by the registry (once as ring anchor, once as a floor so the sentinel
    /// outlives every other slot).
    pub(crate) fn new() -> Self {
        let mut sentinel = Slot::new(0, None);
        sentinel.claims = 2;
        Self {
            slots: vec![sentinel],
            retired: Vec::new(),
            walks: 0,
        }
    }

    fn slot(&self, index: u32) -> &Slot<T> {
        &self.slots[index as usize]
    }

    fn slot_mut(&mut self, index: u32) -> &mut Slot<T> {
        &mut self.slots[index as usize]
    }

    /// Splice a new callback slot immediately before the sentinel, i.e. at
    /// the tail of registration order. O(1) amortized.
    pub(crate) fn attach(&mut self, callback: T) -> SlotId {
        let index = self.alloc(callback);
        let tail = self.slot(SENTINEL).prev;
        self.slot_mut(index).prev = tail;
        self.slot_mut(index).next = SENTINEL;
        self.slot_mut(tail).next = index;
        self.slot_mut(SENTINEL).prev = index;
        SlotId {
            index,
            generation: self.slot(index).generation,
        }
    }

    fn alloc(&mut self, callback: T) -> u32 {
        // Reuse is deferred while any cursor is live: an unlinked slot's
        // stale neighbor links must keep pointing at the occupant they were
        // recorded against until every walk has moved on.
        if self.walks == 0 {
            while let Some(index) = self.retired.pop() {
                if !self.slot(index).is_retired() {
                    continue;
                }
                let generation = self.slot(index).generation.wrapping_add(1);
                *self.slot_mut(index) = Slot::new(generation, Some(callback));
                return index;
            }
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot::new(0, Some(callback)));
        index
    }

    /// Detach a slot from the ring: clear the callback, bridge the neighbors
    /// over it, release its membership claim. The slot's own `prev`/`next`
    /// stay untouched for any cursor still standing on it.
    pub(crate) fn unlink(&mut self, index: u32) {
        debug_assert_ne!(index, SENTINEL, "sentinel cannot be unlinked");
        let (prev, next) = {
            let slot = self.slot_mut(index);
            debug_assert!(slot.linked, "unlinking a slot twice");
            slot.callback = None;
            slot.linked = false;
            (slot.prev, slot.next)
        };
        self.slot_mut(prev).next = next;
        self.slot_mut(next).prev = prev;
        self.release(index);
    }

    pub(crate) fn claim(&mut self, index: u32) {
        self.slot_mut(index).claims += 1;
    }

    pub(crate) fn release(&mut self, index: u32) {
        let slot = self.slot_mut(index);
        assert!(slot.claims > 0, "slot {index} claim count underflow");
        slot.claims -= 1;
        if slot.claims == 0 {
            debug_assert!(!slot.linked, "linked slot dropped to zero claims");
            slot.callback = None;
            self.retired.push(index);
        }
    }

    /// A handle id is current while its generation matches and the slot is
    /// still part of the ring. This subsumes a ring-membership search and
    /// rejects ids minted against an earlier occupant of a recycled slot.
    fn live(&self, id: SlotId) -> bool {
        id.index != SENTINEL && (id.index as usize) < self.slots.len() && {
            let slot = self.slot(id.index);
            slot.generation == id.generation && slot.linked
        }
    }

    /// Open a traversal: claim the sentinel and defer slot reuse until the
    /// matching `end_walk`.
    pub(crate) fn begin_walk(&mut self) {
        self.walks += 1;
        self.claim(SENTINEL);
    }

    /// Close a traversal, releasing the claim on the slot it stopped at.
    pub(crate) fn end_walk(&mut self, at: u32) {
        self.release(at);
        debug_assert!(self.walks > 0);
        self.walks -= 1;
    }

    /// Step a cursor one slot forward, moving its claim. Claiming the next
    /// slot before releasing the current one keeps both alive across the
    /// hand-over.
    pub(crate) fn advance(&mut self, from: u32) -> u32 {
        let next = self.slot(from).next;
        self.claim(next);
        self.release(from);
        next
    }

    /// The callback to run at this position, if any. The sentinel and
    /// disabled or unlinked slots yield nothing.
    pub(crate) fn callback_at(&self, index: u32) -> Option<T>
    where
        T: Clone,
    {
        let slot = self.slot(index);
        if slot.enabled {
            slot.callback.clone()
        } else {
            None
        }
    }

    /// Unlink every remaining slot, then release the sentinel's two claims.
    /// No callback is invoked. A sentinel claim count above two here means a
    /// cursor is still alive, which the single-threaded contract rules out.
    pub(crate) fn clear(&mut self) {
        while self.slot(SENTINEL).next != SENTINEL {
            let doomed = self.slot(SENTINEL).next;
            self.unlink(doomed);
        }
        let sentinel = self.slot_mut(SENTINEL);
        assert!(
            sentinel.claims == 2,
            "ring dropped while an emission is active"
        );
        sentinel.linked = false;
        self.release(SENTINEL);
        self.release(SENTINEL);
    }
}

impl<T: 'static> SlotControl for RefCell<Ring<T>> {
    fn disconnect(&self, id: SlotId) -> bool {
        let mut ring = self.borrow_mut();
        if !ring.live(id) {
            return false;
        }
        ring.unlink(id.index);
        debug!("Disconnected callback slot {}", id.index);
        true
    }

    fn set_enabled(&self, id: SlotId, enabled: bool) {
        let mut ring = self.borrow_mut();
        if ring.live(id) {
            ring.slot_mut(id.index).enabled = enabled;
        }
    }

    fn is_enabled(&self, id: SlotId) -> bool {
        let ring = self.borrow();
        ring.live(id) && ring.slot(id.index).enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Walk the linked ring from the sentinel, collecting slot indices.
    fn ring_order<T>(ring: &Ring<T>) -> Vec<u32> {
        let mut order = Vec::new();
        let mut at = ring.slot(SENTINEL).next;
        while at != SENTINEL {
            order.push(at);
            at = ring.slot(at).next;
        }
        order
    }

    #[test]
    fn test_attach_preserves_connection_order() {
        let mut ring = Ring::new();
        let a = ring.attach("a");
        let b = ring.attach("b");
        let c = ring.attach("c");
        assert_eq!(ring_order(&ring), vec![a.index, b.index, c.index]);
        assert_eq!(ring.slot(SENTINEL).prev, c.index);
    }

    #[test]
    fn test_unlink_bridges_neighbors_and_keeps_stale_links() {
        let mut ring = Ring::new();
        let a = ring.attach("a");
        let b = ring.attach("b");
        let c = ring.attach("c");
        ring.claim(b.index); // simulated cursor standing on b
        ring.unlink(b.index);
        assert_eq!(ring_order(&ring), vec![a.index, c.index]);
        // b still points at its old neighbors for the cursor to step off
        assert_eq!(ring.slot(b.index).prev, a.index);
        assert_eq!(ring.slot(b.index).next, c.index);
        assert!(ring.slot(b.index).callback.is_none());
    }

    #[test]
    fn test_slot_retires_once_claims_reach_zero() {
        let mut ring = Ring::new();
        let a = ring.attach("a");
        ring.claim(a.index);
        ring.unlink(a.index);
        assert!(!ring.slot(a.index).is_retired());
        ring.release(a.index);
        assert!(ring.slot(a.index).is_retired());
    }

    #[test]
    fn test_reuse_bumps_generation() {
        let mut ring = Ring::new();
        let a = ring.attach("a");
        ring.unlink(a.index);
        let b = ring.attach("b");
        assert_eq!(b.index, a.index);
        assert_eq!(b.generation, a.generation + 1);
        assert!(!ring.live(a));
        assert!(ring.live(b));
    }

    #[test]
    fn test_reuse_deferred_while_walk_active() {
        let mut ring = Ring::new();
        let a = ring.attach("a");
        ring.begin_walk();
        ring.unlink(a.index);
        let b = ring.attach("b");
        assert_ne!(b.index, a.index);
        ring.end_walk(SENTINEL);
        let c = ring.attach("c");
        assert_eq!(c.index, a.index);
    }

    #[test]
    fn test_live_rejects_stale_and_sentinel_ids() {
        let mut ring = Ring::new();
        let a = ring.attach("a");
        assert!(ring.live(a));
        ring.unlink(a.index);
        assert!(!ring.live(a));
        assert!(!ring.live(SlotId {
            index: SENTINEL,
            generation: 0
        }));
        assert!(!ring.live(SlotId {
            index: 99,
            generation: 0
        }));
    }

    #[test]
    fn test_advance_moves_claim() {
        let mut ring = Ring::new();
        let a = ring.attach("a");
        ring.begin_walk();
        let at = ring.advance(SENTINEL);
        assert_eq!(at, a.index);
        assert_eq!(ring.slot(a.index).claims, 2); // membership + cursor
        assert_eq!(ring.slot(SENTINEL).claims, 2); // anchor + floor
        ring.end_walk(at);
        assert_eq!(ring.slot(a.index).claims, 1);
    }

    #[test]
    fn test_clear_unlinks_everything() {
        let mut ring = Ring::new();
        ring.attach("a");
        ring.attach("b");
        ring.clear();
        assert_eq!(ring.slot(SENTINEL).claims, 0);
        assert_eq!(ring.slot(SENTINEL).next, SENTINEL);
    }

    #[test]
    #[should_panic(expected = "claim count underflow")]
    fn test_release_underflow_aborts() {
        let mut ring = Ring::new();
        let a = ring.attach("a");
        ring.claim(a.index);
        ring.unlink(a.index);
        ring.release(a.index); // slot retires here
        ring.release(a.index); // underflow
    }
}
