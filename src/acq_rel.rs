use core::{fmt, ops::Deref};

use crate::{
    atomic::{AtomicArithmetic, AtomicBitwise, AtomicStorage},
    ordering::{ACQUIRE, ACQ_REL, RELEASE},
    value::{AtomicValue, Raw},
    RelaxedAtomic,
};

/// An atomic value for publishing data between threads.
///
/// [`AcqRelAtomic::store`] is a release: every write the storing thread made
/// before it is visible to a thread whose [`AcqRelAtomic::load`] (an acquire)
/// observes the stored value. Read-modify-write operations are both. The
/// relaxed operation set of [`RelaxedAtomic`] is available through `Deref`
/// for accesses that need no ordering.
///
/// # Examples
///
/// ```
/// use ordered_atomic::{AcqRelAtomic, RelaxedAtomic};
/// use std::thread;
///
/// let payload = RelaxedAtomic::new(0u32);
/// let ready = AcqRelAtomic::new(false);
///
/// thread::scope(|s| {
///     s.spawn(|| {
///         payload.store_relaxed(42);
///         ready.store(true);
///     });
///     s.spawn(|| {
///         while !ready.load() {
///             std::hint::spin_loop();
///         }
///         assert_eq!(payload.load_relaxed(), 42);
///     });
/// });
/// ```
#[repr(transparent)]
pub struct AcqRelAtomic<T: AtomicValue> {
    relaxed: RelaxedAtomic<T>,
}

impl<T: AtomicValue> AcqRelAtomic<T> {
    /// `true` if `T::Storage` can hold a `T`.
    pub const SUPPORTED: bool = RelaxedAtomic::<T>::SUPPORTED;

    /// `true` if additionally [`AcqRelAtomic::get_mut`] can hand out a `&mut T`.
    pub const REF_SUPPORTED: bool = RelaxedAtomic::<T>::REF_SUPPORTED;

    maybe_const! {
        /// Creates a new atomic initialized with `val`.
        #[inline]
        pub const fn new(val: T) -> Self {
            Self {
                relaxed: RelaxedAtomic::new(val),
            }
        }
    }

    /// Consumes the atomic and returns the contained value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.relaxed.into_inner()
    }

    /// Returns a mutable reference to the contained value.
    #[cfg(not(feature = "loom"))]
    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        self.relaxed.get_mut()
    }

    /// The relaxed operation set on the same value.
    #[inline]
    pub fn as_relaxed(&self) -> &RelaxedAtomic<T> {
        &self.relaxed
    }

    /// Stores `val` with release ordering.
    ///
    /// No write this thread made before the call may become visible after it
    /// to a thread that acquires the stored value.
    #[inline]
    pub fn store(&self, val: T) {
        self.relaxed
            .storage()
            .store(Raw::<T>::into_raw(val), RELEASE);
    }

    /// Loads the value with acquire ordering.
    ///
    /// No read this thread makes after the call may observe memory older than
    /// what the releasing writer of the loaded value had written.
    #[inline]
    pub fn load(&self) -> T {
        let raw = self.relaxed.storage().load(ACQUIRE);
        // The storage only ever holds values converted from `T`.
        unsafe { Raw::<T>::from_raw(raw) }
    }

    /// Acquire-release [`RelaxedAtomic::cas_weak_relaxed`]: may fail
    /// spuriously, refreshing `*expected` with acquire ordering on failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_atomic::AcqRelAtomic;
    ///
    /// let generation = AcqRelAtomic::new(4u64);
    /// let mut expected = generation.load();
    /// while !generation.cas_weak(&mut expected, 9) {}
    /// assert_eq!(generation.load(), 9);
    /// ```
    #[inline]
    pub fn cas_weak(&self, expected: &mut T, desired: T) -> bool {
        self.relaxed.cas::<true>(expected, desired, ACQ_REL, ACQUIRE)
    }

    /// Acquire-release [`RelaxedAtomic::cas_strong_relaxed`]: succeeds if and
    /// only if the value is bitwise equal to `*expected`.
    #[inline]
    pub fn cas_strong(&self, expected: &mut T, desired: T) -> bool {
        self.relaxed.cas::<false>(expected, desired, ACQ_REL, ACQUIRE)
    }

    /// Stores `desired` with acquire-release ordering, returning the previous
    /// value.
    #[inline]
    pub fn exchange(&self, desired: T) -> T {
        self.relaxed.swap(desired, ACQ_REL)
    }

    /// Acquire-release [`RelaxedAtomic::fetch_update_relaxed`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_atomic::AcqRelAtomic;
    ///
    /// let refs = AcqRelAtomic::new(1usize);
    /// assert_eq!(refs.fetch_update(|n| n.checked_sub(1)), Ok(1));
    /// assert_eq!(refs.fetch_update(|n| n.checked_sub(1)), Err(0));
    /// ```
    #[inline]
    pub fn fetch_update<F>(&self, f: F) -> Result<T, T>
    where
        F: FnMut(T) -> Option<T>,
    {
        self.relaxed.update(f, ACQ_REL, ACQUIRE)
    }
}

impl<T: AtomicValue> AcqRelAtomic<T>
where
    T::Storage: AtomicBitwise<Underlying = T>,
{
    /// Bitwise "and" with acquire-release ordering, returning the previous
    /// value.
    #[inline]
    pub fn fetch_and(&self, operand: T) -> T {
        self.relaxed.storage().fetch_and(operand, ACQ_REL)
    }

    /// Bitwise "or" with acquire-release ordering, returning the previous
    /// value.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_atomic::AcqRelAtomic;
    ///
    /// let flags = AcqRelAtomic::new(0b0001u32);
    /// assert_eq!(flags.fetch_or(0b0100), 0b0001);
    /// assert_eq!(flags.load(), 0b0101);
    /// ```
    #[inline]
    pub fn fetch_or(&self, operand: T) -> T {
        self.relaxed.storage().fetch_or(operand, ACQ_REL)
    }

    /// Bitwise "xor" with acquire-release ordering, returning the previous
    /// value.
    #[inline]
    pub fn fetch_xor(&self, operand: T) -> T {
        self.relaxed.storage().fetch_xor(operand, ACQ_REL)
    }
}

impl<T: AtomicValue> AcqRelAtomic<T>
where
    T::Storage: AtomicArithmetic<Underlying = T>,
{
    /// Wrapping add with acquire-release ordering, returning the previous
    /// value.
    #[inline]
    pub fn fetch_add(&self, operand: T) -> T {
        self.relaxed.storage().fetch_add(operand, ACQ_REL)
    }

    /// Wrapping subtract with acquire-release ordering, returning the
    /// previous value.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_atomic::AcqRelAtomic;
    ///
    /// let refs = AcqRelAtomic::new(2i32);
    /// assert_eq!(refs.fetch_sub(1), 2);
    /// assert_eq!(refs.fetch_sub(1), 1);
    /// assert_eq!(refs.load(), 0);
    /// ```
    #[inline]
    pub fn fetch_sub(&self, operand: T) -> T {
        self.relaxed.storage().fetch_sub(operand, ACQ_REL)
    }
}

impl<T: AtomicValue> Deref for AcqRelAtomic<T> {
    type Target = RelaxedAtomic<T>;

    #[inline]
    fn deref(&self) -> &RelaxedAtomic<T> {
        &self.relaxed
    }
}

impl<T: AtomicValue + Default> Default for AcqRelAtomic<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: AtomicValue> From<T> for AcqRelAtomic<T> {
    fn from(val: T) -> Self {
        Self::new(val)
    }
}

impl<T: AtomicValue> From<RelaxedAtomic<T>> for AcqRelAtomic<T> {
    fn from(relaxed: RelaxedAtomic<T>) -> Self {
        Self { relaxed }
    }
}

impl<T: AtomicValue + fmt::Debug> fmt::Debug for AcqRelAtomic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.load().fmt(f)
    }
}
