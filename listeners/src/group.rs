//! Ordered group of listeners sharing one arity.
//!
//! This module provides [`ListenerGroup`], which owns an ordered sequence of listeners and
//! broadcasts events to all of them.
//!
//! # Overview
//!
//! - **Registration**: [`add()`](ListenerGroup::add) checks the listener's arity against the
//!   group's and appends it, returning a [`ListenerId`]
//! - **Removal**: by id with [`remove()`](ListenerGroup::remove), or by reference identity with
//!   [`remove_shared()`](ListenerGroup::remove_shared)
//! - **Broadcast**: [`fire()`](ListenerGroup::fire) checks the argument count and invokes every
//!   listener in insertion order
//!
//! # Example
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//!
//! use rusty_listeners::ListenerGroup;
//!
//! let results = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&results);
//!
//! let mut group = ListenerGroup::<i32>::new(2);
//! group
//!     .add(move |a: &i32, b: &i32| sink.borrow_mut().push(a + b))
//!     .unwrap();
//!
//! group.fire(&[3, 4]).unwrap();
//! assert_eq!(*results.borrow(), vec![7]);
//! ```
//!
//! # Failure
//!
//! A failing listener stops the broadcast. Its error is returned from `fire` inside
//! [`FireError::Listener`] and the listeners after it are not invoked.

use std::{convert::Infallible, fmt, rc::Rc};

use log::trace;

use crate::{
    error::{Error, FireError, FireResult, Missing},
    listener::{IntoListener, Listener},
};

/// Identifies one registration in a [`ListenerGroup`].
///
/// Ids are unique within a group and increase in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Constructs a `ListenerId` from its raw value.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw value of this id.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// A registered listener and its id.
pub(crate) struct Entry<V, E> {
    pub(crate) id: ListenerId,
    pub(crate) listener: Rc<dyn Listener<V, E>>,
}

impl<V, E> Clone for Entry<V, E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            listener: Rc::clone(&self.listener),
        }
    }
}

/// Invoke each entry with `args`, stopping at the first failure.
pub(crate) fn dispatch<V, E>(entries: &[Entry<V, E>], args: &[V]) -> FireResult<E> {
    for entry in entries {
        entry
            .listener
            .call(args)
            .map_err(|source| FireError::Listener {
                id: entry.id,
                source,
            })?;
    }
    Ok(())
}

/// An ordered group of listeners that all accept the same number of arguments.
///
/// `V` is the type of every argument and `E` the error a listener may fail with.
///
/// # Identity
///
/// Every successful [`add()`](Self::add) returns a fresh [`ListenerId`], so adding the same
/// listener twice yields two independent registrations. For removal by reference, register an
/// `Rc` with [`add_shared()`](Self::add_shared); [`remove_shared()`](Self::remove_shared) then
/// removes the first registration of that same allocation.
///
/// # Thread Safety
///
/// `ListenerGroup` holds `Rc`s and is neither `Send` nor `Sync`. `fire` takes `&self` and `add`
/// takes `&mut self`, so a listener cannot modify the group it is being fired from. Use
/// [`SharedGroup`](crate::SharedGroup) when listeners need to do that.
pub struct ListenerGroup<V, E = Infallible> {
    /// Number of arguments every listener accepts and every fire call supplies.
    arity: usize,

    /// Raw value of the next id to hand out.
    next_id: u64,

    /// Registered listeners in insertion order. Ids are strictly increasing.
    entries: Vec<Entry<V, E>>,
}

impl<V: 'static, E: 'static> ListenerGroup<V, E> {
    /// Creates an empty group whose listeners take `arity` arguments.
    pub fn new(arity: usize) -> Self {
        Self::with_capacity(arity, 0)
    }

    /// Creates an empty group with room for `capacity` listeners before reallocating.
    pub fn with_capacity(arity: usize, capacity: usize) -> Self {
        Self {
            arity,
            next_id: 0,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// The number of arguments listeners of this group accept.
    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// The number of registered listeners, counting duplicates.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no listener is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the registration `id` is in the group.
    pub fn contains(&self, id: ListenerId) -> bool {
        self.position(id).is_some()
    }

    /// Ids of the registered listeners, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = ListenerId> + '_ {
        self.entries.iter().map(|entry| entry.id)
    }

    /// Adds a listener at the end of the group.
    ///
    /// Accepts closures over `&V` (see [`listener`](crate::listener)) and any type implementing
    /// [`Listener`].
    ///
    /// # Errors
    ///
    /// [`Error::ArityMismatch`] if the listener's arity is not the group's. The group is left
    /// unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rusty_listeners::{Error, ListenerGroup};
    ///
    /// let mut group = ListenerGroup::<i32>::new(1);
    ///
    /// assert!(group.add(|_: &i32| {}).is_ok());
    /// assert_eq!(
    ///     group.add(|_: &i32, _: &i32| {}),
    ///     Err(Error::ArityMismatch { expected: 1, found: 2 })
    /// );
    /// assert_eq!(group.len(), 1);
    /// ```
    pub fn add<M>(&mut self, listener: impl IntoListener<V, E, M>) -> Result<ListenerId, Error> {
        self.insert(listener.into_listener())
    }

    /// Adds a clone of `listener` at the end of the group.
    ///
    /// The group keeps the allocation alive until the registration is removed, and
    /// [`remove_shared()`](Self::remove_shared) can find it by reference.
    ///
    /// # Errors
    ///
    /// [`Error::ArityMismatch`] if the listener's arity is not the group's.
    pub fn add_shared(&mut self, listener: &Rc<dyn Listener<V, E>>) -> Result<ListenerId, Error> {
        self.insert(Rc::clone(listener))
    }

    /// Removes the registration `id`, keeping the order of the others.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if `id` is not registered in this group.
    pub fn remove(&mut self, id: ListenerId) -> Result<(), Error> {
        let index = self.position(id).ok_or(Error::NotFound(Missing::Id(id)))?;
        self.entries.remove(index);
        trace!("removed {id}, {} listeners left", self.entries.len());
        Ok(())
    }

    /// Removes the first registration of `listener`, compared by reference, keeping the order of
    /// the others. Later registrations of the same `Rc` stay in the group.
    ///
    /// Returns the id of the removed registration.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no registration points at the same allocation as `listener`.
    pub fn remove_shared(&mut self, listener: &Rc<dyn Listener<V, E>>) -> Result<ListenerId, Error> {
        let index = self
            .entries
            .iter()
            .position(|entry| std::ptr::addr_eq(Rc::as_ptr(&entry.listener), Rc::as_ptr(listener)))
            .ok_or(Error::NotFound(Missing::Reference))?;
        let entry = self.entries.remove(index);
        trace!("removed {}, {} listeners left", entry.id, self.entries.len());
        Ok(entry.id)
    }

    /// Removes every listener. Ids handed out before stay retired.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Invokes every listener, in insertion order, with `args`.
    ///
    /// # Errors
    ///
    /// - [`FireError::Group`] with [`Error::ArityMismatch`] if `args.len()` is not the group's
    ///   arity. No listener is invoked.
    /// - [`FireError::Listener`] with the error of the first listener that failed. The listeners
    ///   after it are not invoked.
    pub fn fire(&self, args: &[V]) -> FireResult<E> {
        self.check_arguments(args)?;
        trace!("firing {} listeners", self.entries.len());
        dispatch(&self.entries, args)
    }

    /// Check that `args` matches the group's arity.
    pub(crate) fn check_arguments(&self, args: &[V]) -> Result<(), Error> {
        if args.len() != self.arity {
            return Err(Error::ArityMismatch {
                expected: self.arity,
                found: args.len(),
            });
        }
        Ok(())
    }

    /// A copy of the current listener sequence.
    pub(crate) fn snapshot(&self) -> Vec<Entry<V, E>> {
        self.entries.clone()
    }

    fn insert(&mut self, listener: Rc<dyn Listener<V, E>>) -> Result<ListenerId, Error> {
        let found = listener.arity();
        if found != self.arity {
            return Err(Error::ArityMismatch {
                expected: self.arity,
                found,
            });
        }

        let id = ListenerId::new(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, listener });
        trace!("added {id}, {} listeners registered", self.entries.len());
        Ok(id)
    }

    /// Entries are sorted by id, since ids only grow and removal keeps order.
    fn position(&self, id: ListenerId) -> Option<usize> {
        self.entries.binary_search_by_key(&id, |entry| entry.id).ok()
    }
}

impl<V: 'static, E: 'static> Default for ListenerGroup<V, E> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<V, E> fmt::Debug for ListenerGroup<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ListenerGroup")
            .field("arity", &self.arity)
            .field(
                "listeners",
                &self.entries.iter().map(|entry| entry.id).collect::<Vec<_>>(),
            )
            .finish()
    }
}
