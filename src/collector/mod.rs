/*!
 * Collectors
 * Pluggable result-aggregation policies for emission
 */

mod policies;

pub use policies::{Discard, Gather, Last, StopOnFalse, StopOnTrue};
