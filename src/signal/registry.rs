/*!
 * Signal Registry
 * Typed multicast callback dispatch with pluggable result collection
 */

use log::{debug, trace};
use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use crate::collector::Discard;
use crate::connection::Connection;
use crate::ring::{Cursor, Ring};
use crate::traits::{Collector, SlotControl};

/// Callback storage: reference-counted so invocation runs on a clone with no
/// borrow held on the ring.
type Callback<A, C> = Rc<dyn Fn(&A) -> <C as Collector>::Input>;

/// A typed multicast callback registry for one call signature.
///
/// `A` is the argument bundle handed to every callback by reference; `C` is
/// the collector policy deciding what [`emit`] returns and whether it stops
/// early. With the default [`Discard`] collector, `Signal<A>` is a plain
/// notification signal for callbacks returning nothing.
///
/// Callbacks may freely connect, disconnect, toggle, and re-enter [`emit`]
/// on the very signal that is invoking them; every in-flight traversal
/// holds its own claim on the slot it stands on and stays valid across the
/// mutation. The registry is single-threaded and move-only: moving it keeps
/// all live connections valid, and it cannot be cloned.
///
/// An unconnected signal costs one lazily-filled pointer; the ring is
/// materialized on the first connection.
///
/// [`emit`]: Signal::emit
pub struct Signal<A: 'static, C: Collector + 'static = Discard> {
    ring: OnceCell<Rc<RefCell<Ring<Callback<A, C>>>>>,
}

impl<A: 'static, C: Collector + 'static> Signal<A, C> {
    /// An empty signal. Allocates nothing until the first connection.
    pub fn new() -> Self {
        Self {
            ring: OnceCell::new(),
        }
    }

    /// Construct with one pre-connected callback. The registration stays
    /// live until the signal is dropped; connect normally instead to keep a
    /// handle for it.
    pub fn with_default(callback: impl Fn(&A) -> C::Input + 'static) -> Self {
        let signal = Self::new();
        signal.connect(callback);
        signal
    }

    fn ring(&self) -> &Rc<RefCell<Ring<Callback<A, C>>>> {
        self.ring.get_or_init(|| {
            trace!("Materializing callback ring");
            Rc::new(RefCell::new(Ring::new()))
        })
    }

    /// Register a callback at the tail of the invocation order. O(1)
    /// amortized. The handle can disconnect or toggle the registration;
    /// dropping it leaves the registration in place.
    pub fn connect(&self, callback: impl Fn(&A) -> C::Input + 'static) -> Connection {
        let ring = self.ring();
        let id = ring.borrow_mut().attach(Rc::new(callback));
        debug!("Connected callback slot {:?}", id);
        let control: Rc<dyn SlotControl> = ring.clone();
        Connection::new(Rc::downgrade(&control), id)
    }

    /// Register a method on a shared receiver.
    ///
    /// The receiver is captured strongly, so it lives at least as long as
    /// the registration; disconnect (or drop the signal) to let it go.
    pub fn connect_method<T: 'static>(
        &self,
        receiver: &Rc<RefCell<T>>,
        method: impl Fn(&mut T, &A) -> C::Input + 'static,
    ) -> Connection {
        let receiver = Rc::clone(receiver);
        self.connect(move |args| method(&mut receiver.borrow_mut(), args))
    }

    /// Remove a registration through its handle. Delegates to the handle:
    /// false when it is stale, already disconnected, or outlived its signal.
    pub fn disconnect(&self, conn: &Connection) -> bool {
        conn.disconnect()
    }

    pub fn set_enabled(&self, conn: &Connection, enabled: bool) {
        conn.set_enabled(enabled);
    }

    pub fn is_enabled(&self, conn: &Connection) -> bool {
        conn.is_enabled()
    }

    /// Invoke every enabled callback in connection order, folding the
    /// results through a fresh collector.
    ///
    /// Callbacks connected during the walk are spliced in before the
    /// sentinel and therefore visited in this same pass; callbacks
    /// disconnected during the walk are skipped. A collector veto stops the
    /// pass immediately without touching later callbacks.
    pub fn emit(&self, args: &A) -> C::Output {
        let mut collector = C::default();
        let Some(ring) = self.ring.get() else {
            // Nothing was ever connected.
            return collector.finish();
        };
        let mut cursor = Cursor::new(Rc::clone(ring));
        while let Some(callback) = cursor.next() {
            if !collector.collect(callback(args)) {
                trace!("Emission halted by collector");
                break;
            }
        }
        collector.finish()
    }
}

impl<A: 'static, C: Collector + 'static> Default for Signal<A, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: 'static, C: Collector + 'static> Drop for Signal<A, C> {
    /// Unlink every remaining registration, then release the sentinel's two
    /// claims. No callback is invoked; handles that survive the signal
    /// degrade to no-ops through their weak ring reference.
    fn drop(&mut self) {
        if let Some(ring) = self.ring.get() {
            ring.borrow_mut().clear();
        }
    }
}
