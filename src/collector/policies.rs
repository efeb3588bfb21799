/*!
 * Collector Policies
 * Aggregation strategies for emission results
 */

use crate::traits::Collector;

/// Drops every callback result; `emit` returns `()`.
///
/// The policy for signals whose callbacks return nothing. This is the
/// default collector, so `Signal<A>` reads as a plain notification signal.
#[derive(Debug, Default)]
pub struct Discard;

impl Collector for Discard {
    type Input = ();
    type Output = ();

    fn collect(&mut self, _value: ()) -> bool {
        true
    }

    fn finish(self) {}
}

/// Keeps only the most recent callback result.
///
/// `emit` returns the last handler's value, or `None` when no enabled
/// handler ran.
#[derive(Debug)]
pub struct Last<R> {
    last: Option<R>,
}

impl<R> Default for Last<R> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<R> Collector for Last<R> {
    type Input = R;
    type Output = Option<R>;

    fn collect(&mut self, value: R) -> bool {
        self.last = Some(value);
        true
    }

    fn finish(self) -> Option<R> {
        self.last
    }
}

/// Keeps the emission going while handlers return true; the first false
/// return halts it. `emit` yields the last value seen (false when no
/// handler ran).
#[derive(Debug, Default)]
pub struct StopOnFalse {
    result: bool,
}

impl Collector for StopOnFalse {
    type Input = bool;
    type Output = bool;

    fn collect(&mut self, value: bool) -> bool {
        self.result = value;
        self.result
    }

    fn finish(self) -> bool {
        self.result
    }
}

/// Keeps the emission going while handlers return false; the first true
/// return halts it. `emit` yields the last value seen (false when no
/// handler ran).
#[derive(Debug, Default)]
pub struct StopOnTrue {
    result: bool,
}

impl Collector for StopOnTrue {
    type Input = bool;
    type Output = bool;

    fn collect(&mut self, value: bool) -> bool {
        self.result = value;
        !self.result
    }

    fn finish(self) -> bool {
        self.result
    }
}

/// Appends every callback result; `emit` returns them in invocation order.
#[derive(Debug)]
pub struct Gather<R> {
    results: Vec<R>,
}

impl<R> Default for Gather<R> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
        }
    }
}

impl<R> Collector for Gather<R> {
    type Input = R;
    type Output = Vec<R>;

    fn collect(&mut self, value: R) -> bool {
        self.results.push(value);
        true
    }

    fn finish(self) -> Vec<R> {
        self.results
    }
}
