/// Implement another macro for every arity from the full identifier list down to one.
#[macro_export]
macro_rules! for_every_arity {
    ($m:ident !! $head_ty:ident) => {
        $m!($head_ty);
    };
    ($m:ident !! $head_ty:ident, $($tail_ty:ident),*) => (
        $m!($head_ty, $( $tail_ty ),*);
        $crate::for_every_arity!($m !! $( $tail_ty ),*);
    );
}

/// Apply a macro to all arities from 1 (A) to 16 (A..P).
#[macro_export]
macro_rules! all_arities {
    ($m:ident) => {
        $crate::for_every_arity!($m !! A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P);
    };
}

/// Expand to the given type, ignoring the identifier. Lets an arity macro repeat one type once
/// per identifier.
#[doc(hidden)]
#[macro_export]
macro_rules! same_type {
    ($_name:ident, $ty:ty) => {
        $ty
    };
}

/// Count the identifiers passed in.
#[doc(hidden)]
#[macro_export]
macro_rules! count_idents {
    () => { 0usize };
    ($head:ident $(, $tail:ident)*) => { 1usize + $crate::count_idents!($($tail),*) };
}
