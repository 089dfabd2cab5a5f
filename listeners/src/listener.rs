//! Listener capability and closure adaptation.
//!
//! This module provides [`Listener`], the single-method capability every member of a
//! [`ListenerGroup`](crate::ListenerGroup) implements, and [`IntoListener`], which turns regular
//! closures into listeners.
//!
//! # Arity
//!
//! A listener's arity is the exact number of positional arguments it accepts. For closures it is
//! read off the signature at compile time:
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use rusty_listeners::listener::{self, Listener};
//!
//! let sum: Rc<dyn Listener<i32>> = listener::shared(|a: &i32, b: &i32| println!("{}", a + b));
//! assert_eq!(sum.arity(), 2);
//! ```
//!
//! Closures take every argument as `&V`, where `V` is the value type of the group. They may return
//! `()` or `Result<(), E>`; anything else does not implement [`Outcome`].
//!
//! Callbacks that want the raw argument slice declare their arity explicitly with [`Declared`].
//!
//! # Markers
//!
//! Like functions with different parameter counts, the closure and the trait-object
//! implementations of [`IntoListener`] are told apart by a marker type parameter. Callers never
//! name it; it is inferred at the call to [`ListenerGroup::add`](crate::ListenerGroup::add). The
//! one requirement is that closure parameters carry type annotations, since the parameter count is
//! what selects the implementation.

use std::{convert::Infallible, marker::PhantomData, rc::Rc};

use crate::all_arities;

/// A callback that can be registered with a [`ListenerGroup`](crate::ListenerGroup).
///
/// The group only calls [`call`](Self::call) with exactly [`arity`](Self::arity) arguments.
///
/// # Example
///
/// ```rust
/// use rusty_listeners::{Listener, ListenerGroup};
///
/// struct Threshold(i32);
///
/// impl Listener<i32, String> for Threshold {
///     fn arity(&self) -> usize {
///         1
///     }
///
///     fn call(&self, args: &[i32]) -> Result<(), String> {
///         if args[0] > self.0 {
///             return Err(format!("{} is over {}", args[0], self.0));
///         }
///         Ok(())
///     }
/// }
///
/// let mut group = ListenerGroup::<i32, String>::new(1);
/// group.add(Threshold(10)).unwrap();
/// assert!(group.fire(&[5]).is_ok());
/// assert!(group.fire(&[50]).is_err());
/// ```
pub trait Listener<V, E = Infallible> {
    /// The number of arguments this listener accepts.
    fn arity(&self) -> usize;

    /// Invoke the listener with `args`, where `args.len() == self.arity()`.
    fn call(&self, args: &[V]) -> Result<(), E>;
}

/// The return value of a listener closure.
///
/// Implemented for `()` (the listener cannot fail) and `Result<(), E>`.
pub trait Outcome<E> {
    /// Convert into the listener result.
    fn into_result(self) -> Result<(), E>;
}

impl<E> Outcome<E> for () {
    #[inline]
    fn into_result(self) -> Result<(), E> {
        Ok(())
    }
}

impl<E> Outcome<E> for Result<(), E> {
    #[inline]
    fn into_result(self) -> Result<(), E> {
        self
    }
}

/// Trait enabling closures to be called with an argument slice.
///
/// Implemented by macros for closures taking 0 to 16 `&V` parameters. `Marker` is the closure
/// signature as a function pointer type, which keeps the implementations for different parameter
/// counts apart.
///
/// You don't implement this trait manually.
pub trait ListenerFn<V, E, Marker>: 'static {
    /// The parameter count of the closure signature.
    const ARITY: usize;

    /// Destructure `args` into positional parameters and call the closure.
    ///
    /// # Panics
    ///
    /// Panics if `args.len() != Self::ARITY`.
    fn invoke(&self, args: &[V]) -> Result<(), E>;
}

/// Implementation for closures with zero parameters.
impl<Func, V, E, R> ListenerFn<V, E, fn() -> R> for Func
where
    Func: Fn() -> R + 'static,
    R: Outcome<E>,
{
    const ARITY: usize = 0;

    fn invoke(&self, args: &[V]) -> Result<(), E> {
        assert!(
            args.is_empty(),
            "listener of arity 0 called with {} arguments",
            args.len()
        );
        self().into_result()
    }
}

/// Macro implementing [`ListenerFn`] for closures with N parameters.
///
/// For example, `listener_fn!(A, B)` implements `ListenerFn<V, E, fn(&V, &V) -> R>` for any
/// `Fn(&V, &V) -> R`. The identifiers only drive the repetition; every parameter is `&V`.
macro_rules! listener_fn {
    ($($param:ident),*) => {
        impl<Func, V, E, R> ListenerFn<V, E, fn($($crate::same_type!($param, &V)),*) -> R> for Func
        where
            Func: Fn($($crate::same_type!($param, &V)),*) -> R + 'static,
            R: Outcome<E>,
        {
            const ARITY: usize = $crate::count_idents!($($param),*);

            fn invoke(&self, args: &[V]) -> Result<(), E> {
                #[allow(non_snake_case)]
                let [$($param),*] = args else {
                    panic!(
                        "listener of arity {} called with {} arguments",
                        Self::ARITY,
                        args.len()
                    );
                };
                self($($param),*).into_result()
            }
        }
    };
}

all_arities!(listener_fn);

/// A closure adapted into a [`Listener`].
pub struct FnListener<F, M> {
    func: F,
    _marker: PhantomData<fn() -> M>,
}

impl<F, M> FnListener<F, M> {
    /// Wrap `func`.
    pub const fn new(func: F) -> Self {
        Self {
            func,
            _marker: PhantomData,
        }
    }
}

impl<F, M, V, E> Listener<V, E> for FnListener<F, M>
where
    F: ListenerFn<V, E, M>,
{
    #[inline]
    fn arity(&self) -> usize {
        F::ARITY
    }

    #[inline]
    fn call(&self, args: &[V]) -> Result<(), E> {
        self.func.invoke(args)
    }
}

/// A callback over the raw argument slice, with an arity supplied by the caller.
///
/// ```rust
/// use rusty_listeners::{ListenerGroup, listener::Declared};
///
/// let mut group = ListenerGroup::<u8>::new(3);
/// group
///     .add(Declared::new(3, |args: &[u8]| println!("{args:?}")))
///     .unwrap();
/// ```
pub struct Declared<F, R = ()> {
    arity: usize,
    func: F,
    _result: PhantomData<fn() -> R>,
}

impl<F, R> Declared<F, R> {
    /// Wrap `func`, declaring that it accepts `arity` arguments.
    pub fn new<V>(arity: usize, func: F) -> Self
    where
        F: Fn(&[V]) -> R,
    {
        Self {
            arity,
            func,
            _result: PhantomData,
        }
    }
}

impl<F, R, V, E> Listener<V, E> for Declared<F, R>
where
    F: Fn(&[V]) -> R,
    R: Outcome<E>,
{
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(&self, args: &[V]) -> Result<(), E> {
        (self.func)(args).into_result()
    }
}

/// Marker for [`IntoListener`] on closures.
pub struct FnMarker;

/// Marker for [`IntoListener`] on types that implement [`Listener`] themselves.
pub struct ListenerMarker;

/// Conversion into a shareable listener.
///
/// Implemented for closures (see [`ListenerFn`]) and for every `'static` [`Listener`].
pub trait IntoListener<V, E, Marker> {
    /// Convert into a reference-counted listener.
    fn into_listener(self) -> Rc<dyn Listener<V, E>>;
}

impl<F, M, V, E> IntoListener<V, E, (FnMarker, M)> for F
where
    F: ListenerFn<V, E, M>,
    M: 'static,
    V: 'static,
    E: 'static,
{
    fn into_listener(self) -> Rc<dyn Listener<V, E>> {
        Rc::new(FnListener::<F, M>::new(self))
    }
}

impl<L, V, E> IntoListener<V, E, ListenerMarker> for L
where
    L: Listener<V, E> + 'static,
    V: 'static,
    E: 'static,
{
    fn into_listener(self) -> Rc<dyn Listener<V, E>> {
        Rc::new(self)
    }
}

/// Convert `listener` into an `Rc` that can be added to a group with
/// [`add_shared`](crate::ListenerGroup::add_shared) and later removed by reference with
/// [`remove_shared`](crate::ListenerGroup::remove_shared).
pub fn shared<V, E, M>(listener: impl IntoListener<V, E, M>) -> Rc<dyn Listener<V, E>> {
    listener.into_listener()
}
