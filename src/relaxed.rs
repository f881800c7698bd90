use core::{fmt, marker::PhantomData};

use crate::{
    atomic::{compare_exchange, AtomicArithmetic, AtomicBitwise, AtomicStorage, Ordering},
    ordering::RELAXED,
    value::{AtomicValue, Raw},
};

/// An atomic value whose operations guarantee atomicity and nothing else.
///
/// Every method ends in `_relaxed`: no memory access around the call is
/// ordered by it, so a `RelaxedAtomic` cannot publish other data to another
/// thread. It suits counters, statistics, and ids, or values whose
/// happens-before relationship is already established some other way. Use
/// [`AcqRelAtomic`] when one thread's write must carry its prior writes along.
///
/// [`AcqRelAtomic`]: crate::AcqRelAtomic
///
/// # Examples
///
/// ```
/// use ordered_atomic::RelaxedAtomic;
/// use std::thread;
///
/// let hits = RelaxedAtomic::new(0u64);
/// thread::scope(|s| {
///     for _ in 0..4 {
///         s.spawn(|| {
///             for _ in 0..100 {
///                 hits.fetch_add_relaxed(1);
///             }
///         });
///     }
/// });
/// assert_eq!(hits.load_relaxed(), 400);
/// ```
#[repr(transparent)]
pub struct RelaxedAtomic<T: AtomicValue> {
    storage: T::Storage,
    _marker: PhantomData<T>,
}

// `AtomicValue` requires `T` to be shareable by copy.
unsafe impl<T: AtomicValue> Send for RelaxedAtomic<T> {}
unsafe impl<T: AtomicValue> Sync for RelaxedAtomic<T> {}

impl<T: AtomicValue> RelaxedAtomic<T> {
    /// `true` if `T::Storage` can hold a `T`.
    pub const SUPPORTED: bool = Raw::<T>::SIZE_MATCHES;

    /// `true` if additionally [`RelaxedAtomic::get_mut`] can hand out a `&mut T`.
    pub const REF_SUPPORTED: bool = Raw::<T>::ALIGN_MATCHES;

    maybe_const! {
        /// Creates a new atomic initialized with `val`.
        ///
        /// # Examples
        ///
        /// ```
        /// use ordered_atomic::RelaxedAtomic;
        ///
        /// static HITS: RelaxedAtomic<u32> = RelaxedAtomic::new(7);
        /// assert_eq!(HITS.load_relaxed(), 7);
        /// ```
        #[inline]
        pub const fn new(val: T) -> Self {
            Self {
                storage: Raw::<T>::into_storage(val),
                _marker: PhantomData,
            }
        }
    }

    /// Consumes the atomic and returns the contained value.
    #[inline]
    pub fn into_inner(self) -> T {
        let raw = self.storage.into_inner();
        // The storage only ever holds values converted from `T`.
        unsafe { Raw::<T>::from_raw(raw) }
    }

    /// Returns a mutable reference to the contained value.
    ///
    /// This is safe because the mutable reference guarantees that no other
    /// threads are concurrently accessing the atomic data.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_atomic::RelaxedAtomic;
    ///
    /// let mut a = RelaxedAtomic::new(7i16);
    /// *a.get_mut() += 5;
    /// assert_eq!(a.load_relaxed(), 12);
    /// ```
    #[cfg(not(feature = "loom"))]
    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        Raw::<T>::from_mut(self.storage.get_mut())
    }

    /// Atomically replaces the value.
    #[inline]
    pub fn store_relaxed(&self, val: T) {
        self.storage.store(Raw::<T>::into_raw(val), RELAXED);
    }

    /// Atomically reads the value.
    #[inline]
    pub fn load_relaxed(&self) -> T {
        let raw = self.storage.load(RELAXED);
        // The storage only ever holds values converted from `T`.
        unsafe { Raw::<T>::from_raw(raw) }
    }

    /// Stores `desired` if the value is bitwise equal to `*expected`.
    ///
    /// Returns `true` if the value was replaced. Otherwise `*expected` is
    /// refreshed to the value observed. This may fail spuriously, even when
    /// the value did equal `*expected`, so call it in a loop.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_atomic::RelaxedAtomic;
    ///
    /// let a = RelaxedAtomic::new(3u8);
    /// let mut expected = a.load_relaxed();
    /// loop {
    ///     let desired = expected * 2;
    ///     if a.cas_weak_relaxed(&mut expected, desired) {
    ///         break;
    ///     }
    /// }
    /// assert_eq!(a.load_relaxed(), 6);
    /// ```
    #[inline]
    pub fn cas_weak_relaxed(&self, expected: &mut T, desired: T) -> bool {
        self.cas::<true>(expected, desired, RELAXED, RELAXED)
    }

    /// Stores `desired` if and only if the value is bitwise equal to
    /// `*expected`.
    ///
    /// Returns `true` if the value was replaced. Otherwise `*expected` is
    /// refreshed to the value observed. Never fails spuriously.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_atomic::RelaxedAtomic;
    ///
    /// let a = RelaxedAtomic::new(7u32);
    /// let mut expected = 5;
    /// assert!(!a.cas_strong_relaxed(&mut expected, 10));
    /// assert_eq!(expected, 7);
    /// assert!(a.cas_strong_relaxed(&mut expected, 10));
    /// assert_eq!(a.load_relaxed(), 10);
    /// ```
    #[inline]
    pub fn cas_strong_relaxed(&self, expected: &mut T, desired: T) -> bool {
        self.cas::<false>(expected, desired, RELAXED, RELAXED)
    }

    /// Atomically stores `desired`, returning the previous value.
    #[inline]
    pub fn exchange_relaxed(&self, desired: T) -> T {
        self.swap(desired, RELAXED)
    }

    /// Applies `f` to the value until its result is stored, returning
    /// `Ok(previous)`. Returns `Err(current)` as soon as `f` returns `None`.
    ///
    /// `f` may run several times when other threads change the value in the
    /// meantime, but only one of its results is stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_atomic::RelaxedAtomic;
    ///
    /// let a = RelaxedAtomic::new(7u32);
    /// assert_eq!(a.fetch_update_relaxed(|_| None), Err(7));
    /// assert_eq!(a.fetch_update_relaxed(|v| Some(v + 1)), Ok(7));
    /// assert_eq!(a.load_relaxed(), 8);
    /// ```
    #[inline]
    pub fn fetch_update_relaxed<F>(&self, f: F) -> Result<T, T>
    where
        F: FnMut(T) -> Option<T>,
    {
        self.update(f, RELAXED, RELAXED)
    }

    pub(crate) fn storage(&self) -> &T::Storage {
        &self.storage
    }

    pub(crate) fn swap(&self, val: T, order: Ordering) -> T {
        let raw = self.storage.swap(Raw::<T>::into_raw(val), order);
        // The storage only ever holds values converted from `T`.
        unsafe { Raw::<T>::from_raw(raw) }
    }

    pub(crate) fn cas<const WEAK: bool>(
        &self,
        expected: &mut T,
        desired: T,
        success: Ordering,
        failure: Ordering,
    ) -> bool {
        match compare_exchange::<T::Storage, WEAK>(
            &self.storage,
            Raw::<T>::into_raw(*expected),
            Raw::<T>::into_raw(desired),
            success,
            failure,
        ) {
            Ok(_) => true,
            Err(observed) => {
                // The storage only ever holds values converted from `T`.
                *expected = unsafe { Raw::<T>::from_raw(observed) };
                false
            }
        }
    }

    pub(crate) fn update<F>(&self, mut f: F, success: Ordering, failure: Ordering) -> Result<T, T>
    where
        F: FnMut(T) -> Option<T>,
    {
        let raw = self.storage.load(failure);
        // The storage only ever holds values converted from `T`.
        let mut curr = unsafe { Raw::<T>::from_raw(raw) };
        while let Some(new) = f(curr) {
            let prev = curr;
            if self.cas::<true>(&mut curr, new, success, failure) {
                return Ok(prev);
            }
        }
        Err(curr)
    }
}

impl<T: AtomicValue> RelaxedAtomic<T>
where
    T::Storage: AtomicBitwise<Underlying = T>,
{
    /// Bitwise "and" with `operand`, returning the previous value.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_atomic::RelaxedAtomic;
    ///
    /// let a = RelaxedAtomic::new(0b0110u8);
    /// assert_eq!(a.fetch_and_relaxed(0b0100), 0b0110);
    /// assert_eq!(a.load_relaxed(), 0b0100);
    /// ```
    #[inline]
    pub fn fetch_and_relaxed(&self, operand: T) -> T {
        self.storage.fetch_and(operand, RELAXED)
    }

    /// Bitwise "or" with `operand`, returning the previous value.
    #[inline]
    pub fn fetch_or_relaxed(&self, operand: T) -> T {
        self.storage.fetch_or(operand, RELAXED)
    }

    /// Bitwise "xor" with `operand`, returning the previous value.
    #[inline]
    pub fn fetch_xor_relaxed(&self, operand: T) -> T {
        self.storage.fetch_xor(operand, RELAXED)
    }
}

impl<T: AtomicValue> RelaxedAtomic<T>
where
    T::Storage: AtomicArithmetic<Underlying = T>,
{
    /// Adds `operand`, wrapping on overflow, and returns the previous value.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_atomic::RelaxedAtomic;
    ///
    /// let a = RelaxedAtomic::new(u8::MAX);
    /// assert_eq!(a.fetch_add_relaxed(2), u8::MAX);
    /// assert_eq!(a.load_relaxed(), 1);
    /// ```
    #[inline]
    pub fn fetch_add_relaxed(&self, operand: T) -> T {
        self.storage.fetch_add(operand, RELAXED)
    }

    /// Subtracts `operand`, wrapping on underflow, and returns the previous
    /// value.
    #[inline]
    pub fn fetch_sub_relaxed(&self, operand: T) -> T {
        self.storage.fetch_sub(operand, RELAXED)
    }
}

impl<T: AtomicValue + Default> Default for RelaxedAtomic<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: AtomicValue> From<T> for RelaxedAtomic<T> {
    fn from(val: T) -> Self {
        Self::new(val)
    }
}

impl<T: AtomicValue + fmt::Debug> fmt::Debug for RelaxedAtomic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.load_relaxed().fmt(f)
    }
}
