//! The [`AtomicStorage`] family of traits and their native implementations
//!
//! These traits describe what a hardware atomic can do. They still take raw
//! [`Ordering`] arguments; the containers in this crate are the only callers
//! and pick those orderings from [`crate::ordering`].
pub use core::sync::atomic::Ordering;

#[cfg(not(feature = "loom"))]
use core::sync::atomic as native;
#[cfg(feature = "loom")]
use loom::sync::atomic as native;

#[cfg(target_has_atomic = "8")]
pub use native::{AtomicBool, AtomicI8, AtomicU8};
#[cfg(target_has_atomic = "16")]
pub use native::{AtomicI16, AtomicU16};
#[cfg(target_has_atomic = "32")]
pub use native::{AtomicI32, AtomicU32};
#[cfg(target_has_atomic = "64")]
pub use native::{AtomicI64, AtomicU64};
#[cfg(target_has_atomic = "ptr")]
pub use native::{AtomicIsize, AtomicPtr, AtomicUsize};

mod sealed {
    pub trait Sealed {}
}

/// A native atomic type which can be safely shared between threads.
///
/// This trait is sealed: only the `core::sync::atomic` types implement it
/// (or `loom::sync::atomic` with the `loom` feature), so every container in
/// this crate is backed by real atomic instructions and never by a lock.
pub trait AtomicStorage: Sized + Send + Sync + sealed::Sealed {
    /// The underlying non-atomic type. This has the same in-memory
    /// representation as `Self`.
    type Underlying: Copy + PartialEq;

    /// Creates a new atomic with the value `v`.
    fn new(v: Self::Underlying) -> Self;

    /// Consumes the atomic and returns the contained value.
    ///
    /// This is safe because passing `self` by value guarantees that no other threads are
    /// concurrently accessing the atomic data.
    fn into_inner(self) -> Self::Underlying;

    /// Returns a mutable reference to the underlying [`AtomicStorage::Underlying`].
    ///
    /// This is safe because the mutable reference guarantees that no other
    /// threads are concurrently accessing the atomic data.
    #[cfg(not(feature = "loom"))]
    fn get_mut(&mut self) -> &mut Self::Underlying;

    /// Loads a value from the atomic.
    ///
    /// # Panics
    ///
    /// Panics if `order` is [`Ordering::Release`] or [`Ordering::AcqRel`].
    fn load(&self, order: Ordering) -> Self::Underlying;

    /// Stores a value into the atomic.
    ///
    /// # Panics
    ///
    /// Panics if `order` is [`Ordering::Acquire`] or [`Ordering::AcqRel`].
    fn store(&self, val: Self::Underlying, order: Ordering);

    /// Stores a value into the atomic, returning the previous value.
    fn swap(&self, val: Self::Underlying, order: Ordering) -> Self::Underlying;

    /// Stores `new` if the current value is bitwise equal to `current`.
    ///
    /// `Ok` holds the previous value (equal to `current`), `Err` holds the
    /// value observed instead.
    fn compare_exchange(
        &self,
        current: Self::Underlying,
        new: Self::Underlying,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self::Underlying, Self::Underlying>;

    /// Like [`AtomicStorage::compare_exchange`], but allowed to fail
    /// spuriously even when the comparison succeeds.
    fn compare_exchange_weak(
        &self,
        current: Self::Underlying,
        new: Self::Underlying,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self::Underlying, Self::Underlying>;
}

/// Storage supporting atomic bitwise read-modify-write.
pub trait AtomicBitwise: AtomicStorage {
    /// Bitwise "and" with `val`, returning the previous value.
    fn fetch_and(&self, val: Self::Underlying, order: Ordering) -> Self::Underlying;
    /// Bitwise "or" with `val`, returning the previous value.
    fn fetch_or(&self, val: Self::Underlying, order: Ordering) -> Self::Underlying;
    /// Bitwise "xor" with `val`, returning the previous value.
    fn fetch_xor(&self, val: Self::Underlying, order: Ordering) -> Self::Underlying;
}

/// Storage supporting atomic wrapping arithmetic.
pub trait AtomicArithmetic: AtomicBitwise {
    /// Wrapping add of `val`, returning the previous value.
    fn fetch_add(&self, val: Self::Underlying, order: Ordering) -> Self::Underlying;
    /// Wrapping subtract of `val`, returning the previous value.
    fn fetch_sub(&self, val: Self::Underlying, order: Ordering) -> Self::Underlying;
}

/// A wrapper around [`AtomicStorage::compare_exchange`] and [`AtomicStorage::compare_exchange_weak`]
pub(crate) fn compare_exchange<A: AtomicStorage, const WEAK: bool>(
    a: &A,
    current: A::Underlying,
    new: A::Underlying,
    success: Ordering,
    failure: Ordering,
) -> Result<A::Underlying, A::Underlying> {
    if WEAK {
        a.compare_exchange_weak(current, new, success, failure)
    } else {
        a.compare_exchange(current, new, success, failure)
    }
}

macro_rules! impl_storage {
    (<$($g:ident)?> $t1:ty, $t2:ty) => {
impl $(<$g>)? sealed::Sealed for $t1 {}

impl $(<$g>)? AtomicStorage for $t1 {
    type Underlying = $t2;

    #[inline]
    fn new(val: Self::Underlying) -> Self {
        <$t1>::new(val)
    }

    #[cfg(not(feature = "loom"))]
    #[inline]
    fn into_inner(self) -> Self::Underlying {
        <$t1>::into_inner(self)
    }

    #[cfg(feature = "loom")]
    #[inline]
    fn into_inner(mut self) -> Self::Underlying {
        self.with_mut(|v| *v)
    }

    #[cfg(not(feature = "loom"))]
    #[inline]
    fn get_mut(&mut self) -> &mut Self::Underlying {
        <$t1>::get_mut(self)
    }

    #[inline]
    fn load(&self, order: Ordering) -> Self::Underlying {
        <$t1>::load(self, order)
    }

    #[inline]
    fn store(&self, val: Self::Underlying, order: Ordering) {
        <$t1>::store(self, val, order)
    }

    #[inline]
    fn swap(&self, val: Self::Underlying, order: Ordering) -> Self::Underlying {
        <$t1>::swap(self, val, order)
    }

    #[inline]
    fn compare_exchange(
        &self,
        current: Self::Underlying,
        new: Self::Underlying,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self::Underlying, Self::Underlying> {
        <$t1>::compare_exchange(self, current, new, success, failure)
    }

    #[inline]
    fn compare_exchange_weak(
        &self,
        current: Self::Underlying,
        new: Self::Underlying,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self::Underlying, Self::Underlying> {
        <$t1>::compare_exchange_weak(self, current, new, success, failure)
    }
}
    };
    ($t1:ty, $t2:ty) => { impl_storage!{<> $t1, $t2} };
}

macro_rules! impl_bitwise {
    ($t1:ty) => {
impl AtomicBitwise for $t1 {
    #[inline]
    fn fetch_and(&self, val: Self::Underlying, order: Ordering) -> Self::Underlying {
        <$t1>::fetch_and(self, val, order)
    }

    #[inline]
    fn fetch_or(&self, val: Self::Underlying, order: Ordering) -> Self::Underlying {
        <$t1>::fetch_or(self, val, order)
    }

    #[inline]
    fn fetch_xor(&self, val: Self::Underlying, order: Ordering) -> Self::Underlying {
        <$t1>::fetch_xor(self, val, order)
    }
}
    };
}

macro_rules! impl_integer {
    ($t1:ty, $t2:ty) => {
impl_storage! {$t1, $t2}
impl_bitwise! {$t1}

impl AtomicArithmetic for $t1 {
    #[inline]
    fn fetch_add(&self, val: Self::Underlying, order: Ordering) -> Self::Underlying {
        <$t1>::fetch_add(self, val, order)
    }

    #[inline]
    fn fetch_sub(&self, val: Self::Underlying, order: Ordering) -> Self::Underlying {
        <$t1>::fetch_sub(self, val, order)
    }
}
    };
}

#[cfg(target_has_atomic = "ptr")]
impl_storage! {<T> AtomicPtr<T>, *mut T}
#[cfg(target_has_atomic = "ptr")]
impl_integer! {AtomicUsize, usize}
#[cfg(target_has_atomic = "ptr")]
impl_integer! {AtomicIsize, isize}
#[cfg(target_has_atomic = "64")]
impl_integer! {AtomicU64, u64}
#[cfg(target_has_atomic = "64")]
impl_integer! {AtomicI64, i64}
#[cfg(target_has_atomic = "32")]
impl_integer! {AtomicU32, u32}
#[cfg(target_has_atomic = "32")]
impl_integer! {AtomicI32, i32}
#[cfg(target_has_atomic = "16")]
impl_integer! {AtomicU16, u16}
#[cfg(target_has_atomic = "16")]
impl_integer! {AtomicI16, i16}
#[cfg(target_has_atomic = "8")]
impl_integer! {AtomicU8, u8}
#[cfg(target_has_atomic = "8")]
impl_integer! {AtomicI8, i8}
#[cfg(target_has_atomic = "8")]
impl_storage! {AtomicBool, bool}
#[cfg(target_has_atomic = "8")]
impl_bitwise! {AtomicBool}
