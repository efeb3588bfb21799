/*!
 * Signals
 * The multicast registry facade
 */

mod registry;

pub use registry::Signal;
