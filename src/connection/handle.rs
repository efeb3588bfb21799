/*!
 * Connection Handles
 * Generational back-references to ring slots
 */

use std::fmt;
use std::ptr;
use std::rc::Weak;

use crate::ring::SlotId;
use crate::traits::SlotControl;

/// Caller-held reference to one registration.
///
/// The handle owns nothing: it pairs the slot's generational id with a weak
/// reference to the ring, and every operation first proves the registration
/// is still current. A handle whose slot was disconnected or recycled, or
/// whose signal has been dropped, degrades to a no-op.
///
/// Handles are cheap to clone; all clones address the same registration, and
/// only the first disconnect through any of them reports success.
#[derive(Clone)]
pub struct Connection {
    control: Weak<dyn SlotControl>,
    id: SlotId,
}

impl Connection {
    pub(crate) fn new(control: Weak<dyn SlotControl>, id: SlotId) -> Self {
        Self { control, id }
    }

    /// Unlink this registration from its ring.
    ///
    /// Idempotent: only the call that actually removes the slot returns
    /// true. Repeated, stale, and outlived disconnects return false without
    /// touching the ring.
    pub fn disconnect(&self) -> bool {
        match self.control.upgrade() {
            Some(control) => control.disconnect(self.id),
            None => false,
        }
    }

    /// Resume invocation of this registration during emission.
    pub fn enable(&self) {
        self.set_enabled(true);
    }

    /// Keep the registration connected but skip it during emission.
    pub fn disable(&self) {
        self.set_enabled(false);
    }

    pub fn set_enabled(&self, enabled: bool) {
        if let Some(control) = self.control.upgrade() {
            control.set_enabled(self.id, enabled);
        }
    }

    /// Whether this registration is still connected and enabled. Stale and
    /// outlived handles report false.
    pub fn is_enabled(&self) -> bool {
        self.control
            .upgrade()
            .map_or(false, |control| control.is_enabled(self.id))
    }
}

impl PartialEq for Connection {
    /// Two handles are equal when they address the same registration: same
    /// ring allocation, same slot, same generation.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && ptr::addr_eq(self.control.as_ptr(), other.control.as_ptr())
    }
}

impl Eq for Connection {}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("slot", &self.id)
            .field("attached", &self.control.upgrade().is_some())
            .finish()
    }
}
