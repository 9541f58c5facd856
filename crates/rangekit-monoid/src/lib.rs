//! Monoid and monoid-action traits for the rangekit segment trees.
//!
//! The segment trees never inspect the structure of the values they
//! aggregate; callers describe the algebra through these traits. The trees
//! trust the algebraic laws (associativity, identity, distribution of an
//! action over composition) and produce unspecified but memory-safe results
//! if a supplied implementation violates them.

use std::marker::PhantomData;
use std::ops::{Add, BitXor};

/// An associative binary operation with an identity element.
///
/// Laws the implementation must uphold:
/// - `op(op(a, b), c) == op(a, op(b, c))`
/// - `op(identity(), a) == op(a, identity()) == a`
///
/// `op` does not have to be commutative; the trees fix a left-to-right
/// combination order everywhere.
pub trait Monoid {
    type Value: Clone;

    fn op(lhs: Self::Value, rhs: Self::Value) -> Self::Value;
    fn identity() -> Self::Value;
}

/// A monoid of maps `F` acting on the values of monoid `M`.
///
/// Composition convention: `compose(f, g)` is "f after g", so the newest
/// action always ends up on the outside:
///
/// - `apply(identity_map(), v) == v`
/// - `apply(compose(f, g), v) == apply(f, apply(g, v))`
pub trait MonoidAction {
    type M: Monoid;
    type F: Clone;

    fn identity_map() -> Self::F;
    fn compose(f: Self::F, g: Self::F) -> Self::F;
    fn apply(f: Self::F, value: <Self::M as Monoid>::Value) -> <Self::M as Monoid>::Value;

    /// Delegate to the value monoid's operation.
    fn op(
        lhs: <Self::M as Monoid>::Value,
        rhs: <Self::M as Monoid>::Value,
    ) -> <Self::M as Monoid>::Value {
        <Self::M as Monoid>::op(lhs, rhs)
    }

    /// Delegate to the value monoid's identity.
    fn identity() -> <Self::M as Monoid>::Value {
        <Self::M as Monoid>::identity()
    }
}

/// Addition monoid with `T::default()` as zero.
#[derive(Debug, Clone, Copy)]
pub struct Additive<T>(PhantomData<fn() -> T>);

impl<T: Copy + Default + Add<Output = T>> Monoid for Additive<T> {
    type Value = T;

    fn op(lhs: T, rhs: T) -> T {
        lhs + rhs
    }

    fn identity() -> T {
        T::default()
    }
}

/// Bitwise-XOR monoid with `T::default()` as zero.
#[derive(Debug, Clone, Copy)]
pub struct BitwiseXor<T>(PhantomData<fn() -> T>);

impl<T: Copy + Default + BitXor<Output = T>> Monoid for BitwiseXor<T> {
    type Value = T;

    fn op(lhs: T, rhs: T) -> T {
        lhs ^ rhs
    }

    fn identity() -> T {
        T::default()
    }
}
