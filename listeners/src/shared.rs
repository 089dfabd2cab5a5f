//! Shared, re-entrant handle to a listener group.
//!
//! [`SharedGroup`] wraps a [`ListenerGroup`] in `Rc<RefCell<_>>` so every operation takes `&self`.
//! This lets a listener hold a handle to the group it belongs to and add or remove listeners while
//! the group is firing.
//!
//! # Snapshot Semantics
//!
//! [`fire()`](SharedGroup::fire) copies the listener sequence before invoking anyone and releases
//! the borrow for the duration of the broadcast:
//!
//! - Listeners added during a fire are first invoked by the next fire
//! - Listeners removed during a fire are still invoked by the current one if they were in the
//!   snapshot
//!
//! Hold a [`WeakGroup`] inside listeners to avoid a reference cycle between the group and its
//! listeners.

use std::{
    cell::RefCell,
    convert::Infallible,
    fmt,
    rc::{Rc, Weak},
};

use log::trace;

use crate::{
    error::{Error, FireResult},
    group::{self, ListenerGroup, ListenerId},
    listener::{IntoListener, Listener},
};

/// A cloneable handle to a [`ListenerGroup`] whose listeners may modify it while it fires.
///
/// Clones refer to the same group.
///
/// # Example
///
/// ```rust
/// use std::{cell::Cell, rc::Rc};
///
/// use rusty_listeners::SharedGroup;
///
/// let group = SharedGroup::<i32>::new(1);
/// let calls = Rc::new(Cell::new(0));
///
/// // A listener that unregisters itself the first time it runs.
/// let handle = group.downgrade();
/// let counter = Rc::clone(&calls);
/// let slot = Rc::new(Cell::new(None));
/// let own_id = Rc::clone(&slot);
/// let id = group
///     .add(move |_: &i32| {
///         counter.set(counter.get() + 1);
///         if let (Some(group), Some(id)) = (handle.upgrade(), own_id.get()) {
///             group.remove(id).unwrap();
///         }
///     })
///     .unwrap();
/// slot.set(Some(id));
///
/// group.fire(&[1]).unwrap();
/// group.fire(&[2]).unwrap();
/// assert_eq!(calls.get(), 1);
/// ```
pub struct SharedGroup<V, E = Infallible> {
    inner: Rc<RefCell<ListenerGroup<V, E>>>,
}

impl<V: 'static, E: 'static> SharedGroup<V, E> {
    /// Creates an empty shared group whose listeners take `arity` arguments.
    pub fn new(arity: usize) -> Self {
        Self::from(ListenerGroup::new(arity))
    }

    /// The number of arguments listeners of this group accept.
    pub fn arity(&self) -> usize {
        self.inner.borrow().arity()
    }

    /// The number of registered listeners.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns `true` if no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Returns `true` if the registration `id` is in the group.
    pub fn contains(&self, id: ListenerId) -> bool {
        self.inner.borrow().contains(id)
    }

    /// Ids of the registered listeners, in insertion order.
    pub fn ids(&self) -> Vec<ListenerId> {
        self.inner.borrow().ids().collect()
    }

    /// See [`ListenerGroup::add`].
    pub fn add<M>(&self, listener: impl IntoListener<V, E, M>) -> Result<ListenerId, Error> {
        let listener = listener.into_listener();
        self.inner.borrow_mut().add_shared(&listener)
    }

    /// See [`ListenerGroup::add_shared`].
    pub fn add_shared(&self, listener: &Rc<dyn Listener<V, E>>) -> Result<ListenerId, Error> {
        self.inner.borrow_mut().add_shared(listener)
    }

    /// See [`ListenerGroup::remove`].
    pub fn remove(&self, id: ListenerId) -> Result<(), Error> {
        self.inner.borrow_mut().remove(id)
    }

    /// See [`ListenerGroup::remove_shared`].
    pub fn remove_shared(&self, listener: &Rc<dyn Listener<V, E>>) -> Result<ListenerId, Error> {
        self.inner.borrow_mut().remove_shared(listener)
    }

    /// See [`ListenerGroup::clear`].
    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    /// Invokes every listener registered when the call starts, in insertion order, with `args`.
    ///
    /// Listeners may call any method of this group, including `fire`.
    ///
    /// # Errors
    ///
    /// As [`ListenerGroup::fire`].
    pub fn fire(&self, args: &[V]) -> FireResult<E> {
        let snapshot = {
            let group = self.inner.borrow();
            group.check_arguments(args)?;
            group.snapshot()
        };
        trace!("firing {} listeners from snapshot", snapshot.len());
        group::dispatch(&snapshot, args)
    }

    /// Creates a handle that does not keep the group alive.
    pub fn downgrade(&self) -> WeakGroup<V, E> {
        WeakGroup {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl<V, E> Clone for SharedGroup<V, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<V: 'static, E: 'static> Default for SharedGroup<V, E> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<V, E> From<ListenerGroup<V, E>> for SharedGroup<V, E> {
    fn from(group: ListenerGroup<V, E>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(group)),
        }
    }
}

impl<V, E> fmt::Debug for SharedGroup<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(group) => f.debug_tuple("SharedGroup").field(&*group).finish(),
            Err(_) => f.write_str("SharedGroup(<borrowed>)"),
        }
    }
}

/// A non-owning handle to a [`SharedGroup`].
pub struct WeakGroup<V, E = Infallible> {
    inner: Weak<RefCell<ListenerGroup<V, E>>>,
}

impl<V, E> WeakGroup<V, E> {
    /// Returns the group if it is still alive.
    pub fn upgrade(&self) -> Option<SharedGroup<V, E>> {
        self.inner.upgrade().map(|inner| SharedGroup { inner })
    }
}

impl<V, E> Clone for WeakGroup<V, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::{error::FireError, listener};

    // ==================== Basics ====================

    #[test]
    fn clones_share_one_group() {
        // Given
        let group = SharedGroup::<i32>::new(1);
        let other = group.clone();

        // When
        let id = other.add(|_: &i32| {}).unwrap();

        // Then
        assert!(group.contains(id));
        assert_eq!(group.len(), 1);
        assert_eq!(group.arity(), 1);
    }

    #[test]
    fn from_group_keeps_its_listeners() {
        let mut plain = ListenerGroup::<i32>::new(0);
        let id = plain.add(|| {}).unwrap();

        let group = SharedGroup::from(plain);

        assert_eq!(group.ids(), vec![id]);
    }

    #[test]
    fn weak_handle_does_not_keep_group_alive() {
        let group = SharedGroup::<i32>::default();
        let weak = group.downgrade();
        assert!(weak.upgrade().is_some());

        drop(group);

        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn errors_match_plain_group() {
        // Given
        let group = SharedGroup::<i32>::new(1);
        let stranger = listener::shared(|_: &i32| {});

        // Then
        assert_eq!(
            group.add(|| {}),
            Err(Error::ArityMismatch {
                expected: 1,
                found: 0
            })
        );
        assert!(group.remove_shared(&stranger).is_err());
        assert!(matches!(
            group.fire(&[]),
            Err(FireError::Group(Error::ArityMismatch {
                expected: 1,
                found: 0
            }))
        ));
    }

    // ==================== Re-entrancy ====================

    #[test]
    fn listener_added_during_fire_runs_next_time() {
        // Given
        let group = SharedGroup::<i32>::new(1);
        let log = Rc::new(RefCell::new(Vec::new()));
        let handle = group.downgrade();
        let spawner_log = Rc::clone(&log);
        group
            .add(move |v: &i32| {
                spawner_log.borrow_mut().push(format!("spawner:{v}"));
                if let Some(group) = handle.upgrade() {
                    let log = Rc::clone(&spawner_log);
                    group
                        .add(move |v: &i32| log.borrow_mut().push(format!("spawned:{v}")))
                        .unwrap();
                }
            })
            .unwrap();

        // When
        group.fire(&[1]).unwrap();

        // Then - the new listener was not part of the first snapshot
        assert_eq!(*log.borrow(), vec!["spawner:1"]);
        assert_eq!(group.len(), 2);

        // When
        group.fire(&[2]).unwrap();

        // Then
        assert_eq!(*log.borrow(), vec!["spawner:1", "spawner:2", "spawned:2"]);
    }

    #[test]
    fn listener_removed_during_fire_still_runs_this_time() {
        // Given
        let group = SharedGroup::<i32>::new(1);
        let victim_calls = Rc::new(Cell::new(0));
        let victim_id = Rc::new(Cell::new(None));

        let handle = group.downgrade();
        let target = Rc::clone(&victim_id);
        group
            .add(move |_: &i32| {
                if let (Some(group), Some(id)) = (handle.upgrade(), target.get()) {
                    // The second fire finds it already gone.
                    let _ = group.remove(id);
                }
            })
            .unwrap();
        let counter = Rc::clone(&victim_calls);
        let id = group
            .add(move |_: &i32| counter.set(counter.get() + 1))
            .unwrap();
        victim_id.set(Some(id));

        // When
        group.fire(&[1]).unwrap();
        group.fire(&[2]).unwrap();

        // Then
        assert_eq!(victim_calls.get(), 1);
        assert!(!group.contains(id));
    }

    #[test]
    fn nested_fire_is_allowed() {
        // Given
        let group = SharedGroup::<u32>::new(1);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let handle = group.downgrade();
        let sink = Rc::clone(&seen);
        group
            .add(move |depth: &u32| {
                sink.borrow_mut().push(*depth);
                if *depth < 3 {
                    if let Some(group) = handle.upgrade() {
                        group.fire(&[depth + 1]).unwrap();
                    }
                }
            })
            .unwrap();

        // When
        group.fire(&[0]).unwrap();

        // Then
        assert_eq!(*seen.borrow(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn debug_shows_inner_group() {
        let group = SharedGroup::<i32>::new(2);

        assert_eq!(
            format!("{group:?}"),
            "SharedGroup(ListenerGroup { arity: 2, listeners: [] })"
        );
    }
}
