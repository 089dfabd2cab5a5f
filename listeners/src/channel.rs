//! Listener that forwards fired events into a channel.

use crossbeam::channel::{Receiver, Sender, TrySendError, unbounded};
use log::debug;

use crate::listener::Listener;

/// A listener that sends a copy of every argument set it is fired with.
///
/// The receiving end may live on another thread. Events that cannot be delivered, because the
/// receiver is gone or a bounded channel is full, are dropped.
///
/// ```rust
/// use rusty_listeners::{ListenerGroup, channel::Forwarder};
///
/// let (forwarder, events) = Forwarder::<&str>::with_receiver(2);
/// let mut group = ListenerGroup::<&str>::new(2);
/// group.add(forwarder).unwrap();
///
/// group.fire(&["key", "down"]).unwrap();
/// assert_eq!(events.try_recv(), Ok(vec!["key", "down"]));
/// ```
pub struct Forwarder<V> {
    arity: usize,
    sender: Sender<Vec<V>>,
}

impl<V> Forwarder<V> {
    /// Creates a forwarder of the given arity sending into `sender`.
    pub fn new(arity: usize, sender: Sender<Vec<V>>) -> Self {
        Self { arity, sender }
    }

    /// Creates a forwarder and the receiving end of a new unbounded channel.
    pub fn with_receiver(arity: usize) -> (Self, Receiver<Vec<V>>) {
        let (sender, receiver) = unbounded();
        (Self::new(arity, sender), receiver)
    }
}

impl<V: Clone, E> Listener<V, E> for Forwarder<V> {
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(&self, args: &[V]) -> Result<(), E> {
        match self.sender.try_send(args.to_vec()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => debug!("forwarder channel full, dropping event"),
            Err(TrySendError::Disconnected(_)) => {
                debug!("forwarder receiver disconnected, dropping event")
            }
        }
        Ok(())
    }
}
