//! Benchmark utilities for rusty_listeners.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p rusty_bench
//!
//! # Run specific benchmark group
//! cargo bench -p rusty_bench -- fire
//! ```
//!
//! Results are written to `target/criterion/` with HTML reports for visualization.

use std::{cell::Cell, rc::Rc};

use rusty_listeners::{Error, ListenerGroup, ListenerId, SharedGroup, listener::Declared};

/// Builds a group of `arity`-argument listeners, each adding its first argument (if any) to
/// `sink`. Zero-arity listeners add one. Returns the group and the ids in insertion order.
pub fn populated_group(
    arity: usize,
    listeners: usize,
    sink: &Rc<Cell<u64>>,
) -> Result<(ListenerGroup<u64>, Vec<ListenerId>), Error> {
    let mut group = ListenerGroup::<u64>::with_capacity(arity, listeners);
    let ids = (0..listeners)
        .map(|_| {
            let sink = Rc::clone(sink);
            match arity {
                0 => group.add(move || sink.set(sink.get() + 1)),
                1 => group.add(move |a: &u64| sink.set(sink.get() + a)),
                _ => group.add(Declared::new(arity, move |args: &[u64]| {
                    sink.set(sink.get() + args[0])
                })),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok((group, ids))
}

/// Same as [`populated_group`], behind a [`SharedGroup`].
pub fn populated_shared_group(
    arity: usize,
    listeners: usize,
    sink: &Rc<Cell<u64>>,
) -> Result<SharedGroup<u64>, Error> {
    let (group, _) = populated_group(arity, listeners, sink)?;
    Ok(SharedGroup::from(group))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn populated_group_fires_every_listener() {
        let sink = Rc::new(Cell::new(0));
        let (group, ids) = populated_group(1, 10, &sink).unwrap();

        group.fire(&[2]).unwrap();

        assert_eq!(ids.len(), 10);
        assert_eq!(sink.get(), 20);
    }

    #[test]
    fn populated_group_supports_wide_arity() {
        let sink = Rc::new(Cell::new(0));
        let (group, _) = populated_group(3, 4, &sink).unwrap();

        group.fire(&[5, 0, 0]).unwrap();

        assert_eq!(sink.get(), 20);
    }

    #[test]
    fn populated_shared_group_counts_zero_arity_calls() {
        let sink = Rc::new(Cell::new(0));
        let group = populated_shared_group(0, 3, &sink).unwrap();

        group.fire(&[]).unwrap();

        assert_eq!(sink.get(), 3);
    }
}
