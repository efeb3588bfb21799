/*!
 * Connections
 * Handle lifecycle for individual registrations
 */

mod handle;
mod scope;

pub use handle::Connection;
pub use scope::{ConnectionScope, ScopedConnection};
