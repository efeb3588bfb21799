/*!
 * Scoped Connections
 * RAII wrappers that disconnect on drop
 */

use std::mem;

use super::handle::Connection;

/// Move-only wrapper that disconnects its registration when dropped.
///
/// Cloning is deliberately unavailable: exactly one owner may tear the
/// registration down, so scope exit cannot race another holder of the same
/// handle.
#[derive(Debug)]
pub struct ScopedConnection {
    conn: Connection,
}

impl ScopedConnection {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// The underlying handle, for enable/disable without giving up RAII
    /// ownership.
    pub fn handle(&self) -> &Connection {
        &self.conn
    }

    /// Dissolve the RAII ownership, handing the raw handle back without
    /// disconnecting it.
    pub fn release(self) -> Connection {
        let conn = self.conn.clone();
        mem::forget(self);
        conn
    }
}

impl From<Connection> for ScopedConnection {
    fn from(conn: Connection) -> Self {
        Self::new(conn)
    }
}

impl Drop for ScopedConnection {
    fn drop(&mut self) {
        self.conn.disconnect();
    }
}

/// Ordered collection of scoped connections, all torn down together.
///
/// Dropping the scope disconnects every held registration in insertion
/// order, giving a group "detach everything" operation for an object that
/// registered itself in several signals.
#[derive(Debug, Default)]
pub struct ConnectionScope {
    connections: Vec<ScopedConnection>,
}

impl ConnectionScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a connection; it stays registered until the scope
    /// is dropped or cleared.
    pub fn add(&mut self, conn: impl Into<ScopedConnection>) -> &Connection {
        let index = self.connections.len();
        self.connections.push(conn.into());
        self.connections[index].handle()
    }

    /// Hand one connection back out of the scope without disconnecting it.
    /// Returns `None` when no held connection addresses the same
    /// registration.
    pub fn release(&mut self, conn: &Connection) -> Option<Connection> {
        let position = self
            .connections
            .iter()
            .position(|scoped| scoped.handle() == conn)?;
        Some(self.connections.remove(position).release())
    }

    /// Disconnect everything held by the scope now, in insertion order.
    pub fn clear(&mut self) {
        self.connections.clear();
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
