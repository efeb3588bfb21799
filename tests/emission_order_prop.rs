/*!
 * Emission Order Property
 * Model-based check: emission always matches the surviving registrations
 */

use proptest::prelude::*;
use sigring::{Connection, Gather, Signal};

#[derive(Debug, Clone)]
enum Op {
    Connect,
    Disconnect(usize),
    Toggle(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Connect),
        1 => (0usize..64).prop_map(Op::Disconnect),
        1 => (0usize..64).prop_map(Op::Toggle),
    ]
}

proptest! {
    /// Reference model: an ordered list of (token, enabled) pairs. After any
    /// interleaving of connect/disconnect/toggle, emission must yield exactly
    /// the enabled tokens in connection order.
    #[test]
    fn emission_matches_model(ops in prop::collection::vec(op_strategy(), 0..48)) {
        let signal: Signal<(), Gather<u64>> = Signal::new();
        let mut model: Vec<(u64, bool)> = Vec::new();
        let mut handles: Vec<(u64, Connection)> = Vec::new();
        let mut next_token = 0u64;

        for op in ops {
            match op {
                Op::Connect => {
                    let token = next_token;
                    next_token += 1;
                    let conn = signal.connect(move |_: &()| token);
                    model.push((token, true));
                    handles.push((token, conn));
                }
                Op::Disconnect(raw) => {
                    if handles.is_empty() {
                        continue;
                    }
                    let index = raw % handles.len();
                    let (token, conn) = handles.remove(index);
                    prop_assert!(conn.disconnect());
                    prop_assert!(!conn.disconnect());
                    model.retain(|entry| entry.0 != token);
                }
                Op::Toggle(raw) => {
                    if handles.is_empty() {
                        continue;
                    }
                    let index = raw % handles.len();
                    let (token, ref conn) = handles[index];
                    let enabled = !conn.is_enabled();
                    conn.set_enabled(enabled);
                    if let Some(entry) = model.iter_mut().find(|entry| entry.0 == token) {
                        entry.1 = enabled;
                    }
                }
            }

            let expected: Vec<u64> = model
                .iter()
                .filter(|entry| entry.1)
                .map(|entry| entry.0)
                .collect();
            prop_assert_eq!(signal.emit(&()), expected);
        }
    }
}
