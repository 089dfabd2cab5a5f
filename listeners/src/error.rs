//! Error types returned by listener groups.

use std::fmt;

use thiserror::Error;

use crate::group::ListenerId;

/// Misuse of a [`ListenerGroup`](crate::ListenerGroup): wrong arity or a missing listener.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A listener, or the arguments of a fire call, did not match the group's arity.
    #[error("number of arguments must match the group arity: expected {expected}, found {found}")]
    ArityMismatch {
        /// The arity the group was constructed with.
        expected: usize,
        /// The listener's declared arity, or the number of arguments passed to `fire`.
        found: usize,
    },

    /// The listener to remove is not in the group.
    #[error("cannot remove {0}: it is not in the group")]
    NotFound(Missing),
}

/// Identifies the listener a failed removal was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    /// Removal by [`ListenerId`].
    Id(ListenerId),
    /// Removal by reference identity.
    Reference,
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Missing::Id(id) => write!(f, "{id}"),
            Missing::Reference => write!(f, "listener reference"),
        }
    }
}

/// Failure of a fire call.
///
/// A listener failure carries the listener's own error value unchanged. Listeners registered
/// after the failing one were not invoked.
#[derive(Error, Debug)]
pub enum FireError<E> {
    /// The fire call itself was malformed; no listener was invoked.
    #[error(transparent)]
    Group(#[from] Error),

    /// A listener failed.
    #[error("{id} failed")]
    Listener {
        /// The listener that failed.
        id: ListenerId,
        /// The error the listener returned.
        #[source]
        source: E,
    },
}

impl<E> FireError<E> {
    /// Returns the listener's error, if a listener failed.
    pub fn into_listener_error(self) -> Option<E> {
        match self {
            FireError::Listener { source, .. } => Some(source),
            FireError::Group(_) => None,
        }
    }

    /// Returns the group misuse error, if the fire call was malformed.
    pub fn group_error(&self) -> Option<&Error> {
        match self {
            FireError::Group(err) => Some(err),
            FireError::Listener { .. } => None,
        }
    }
}

/// Result of [`fire`](crate::ListenerGroup::fire).
pub type FireResult<E> = Result<(), FireError<E>>;
