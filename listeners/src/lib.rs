//! Groups of listeners with a fixed arity.
//!
//! A [`ListenerGroup`] holds callbacks that all accept the same number of arguments and fires an
//! event at every one of them, synchronously and in insertion order.
//!
//! ```rust
//! use rusty_listeners::ListenerGroup;
//!
//! let mut clicked = ListenerGroup::<(i32, i32)>::new(1);
//! clicked
//!     .add(|at: &(i32, i32)| println!("clicked at {at:?}"))
//!     .unwrap();
//! clicked.fire(&[(10, 20)]).unwrap();
//! ```
//!
//! - [`listener`]: the [`Listener`] capability and closure adaptation
//! - [`group`]: [`ListenerGroup`] itself
//! - [`shared`]: [`SharedGroup`], for listeners that modify their group while it fires
//! - [`channel`]: [`Forwarder`](channel::Forwarder), which hands events to a channel
//!
//! Nothing here is thread-safe; groups hold `Rc`s. Listeners run on the thread that fires.

pub mod channel;
pub mod error;
pub mod group;
pub mod listener;
pub mod shared;
pub(crate) mod util;

pub use error::{Error, FireError, FireResult, Missing};
pub use group::{ListenerGroup, ListenerId};
pub use listener::{IntoListener, Listener};
pub use shared::{SharedGroup, WeakGroup};
