/*!
 * Callback Ring
 * Arena-backed circular slot storage and claim-counted traversal
 */

mod arena;
mod cursor;
mod slot;

pub(crate) use arena::Ring;
pub(crate) use cursor::Cursor;
pub(crate) use slot::SlotId;
