/*!
 * sigring
 * In-process multicast callback dispatch over a claim-counted ring
 *
 * A [`Signal`] holds any number of callbacks sharing one call signature and
 * invokes them in connection order on [`Signal::emit`]. Callbacks may
 * connect, disconnect, and re-enter emission from inside a running
 * callback; a pluggable [`Collector`] decides what an emission returns and
 * whether it stops early. Single-threaded by design: no locks, no `Send`.
 */

pub mod collector;
pub mod connection;
mod ring;
pub mod signal;
pub mod traits;

// Re-exports
pub use collector::{Discard, Gather, Last, StopOnFalse, StopOnTrue};
pub use connection::{Connection, ConnectionScope, ScopedConnection};
pub use signal::Signal;
pub use traits::Collector;
