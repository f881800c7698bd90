//! The [`AtomicValue`] bound and the bit-level conversion to storage
use core::{
    marker::PhantomData,
    mem::{align_of, size_of, ManuallyDrop},
    num::{
        NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI8, NonZeroIsize, NonZeroU16, NonZeroU32,
        NonZeroU64, NonZeroU8, NonZeroUsize,
    },
};

use const_panic::concat_assert;

use crate::atomic::*;

/// The plain value type held by `T`'s storage.
pub type Underlying<T> = <<T as AtomicValue>::Storage as AtomicStorage>::Underlying;

/// A value which can live in a [`RelaxedAtomic`] or [`AcqRelAtomic`].
///
/// `Storage` selects the native atomic the value is kept in. A `#[repr(u8)]`
/// enum can use [`AtomicU8`], a pair of `u16`s can use [`AtomicU32`], and so
/// on. A `Storage` whose size differs from `T` is rejected when the container
/// is first used, at compile time:
///
/// ```compile_fail
/// use ordered_atomic::{atomic::AtomicU32, AtomicValue, RelaxedAtomic};
///
/// #[derive(Clone, Copy)]
/// struct Wide(u64);
/// unsafe impl AtomicValue for Wide {
///     type Storage = AtomicU32;
/// }
///
/// let _ = RelaxedAtomic::new(Wide(1));
/// ```
///
/// # Safety
///
/// Implementors guarantee that:
/// - `T` has no padding bytes, so every byte of a `T` is initialized and
///   compare-and-swap may compare values bit for bit.
/// - Copies of a `T` may be handed to other threads (the containers are
///   always `Send` and `Sync`).
///
/// Bit patterns only ever come from real `T` values, so `T` may have
/// invalid bit patterns, like enums and `char`.
///
/// [`RelaxedAtomic`]: crate::RelaxedAtomic
/// [`AcqRelAtomic`]: crate::AcqRelAtomic
pub unsafe trait AtomicValue: Copy {
    /// The native atomic holding this value.
    type Storage: AtomicStorage;
}

macro_rules! impl_value {
    ($($t:ty => $a:ty),* $(,)?) => {
        $(
            unsafe impl AtomicValue for $t {
                type Storage = $a;
            }
        )*
    };
}

#[cfg(target_has_atomic = "8")]
impl_value! {
    bool => AtomicBool,
    u8 => AtomicU8,
    i8 => AtomicI8,
    Option<NonZeroU8> => AtomicU8,
    Option<NonZeroI8> => AtomicI8,
}

#[cfg(target_has_atomic = "16")]
impl_value! {
    u16 => AtomicU16,
    i16 => AtomicI16,
    Option<NonZeroU16> => AtomicU16,
    Option<NonZeroI16> => AtomicI16,
}

#[cfg(target_has_atomic = "32")]
impl_value! {
    u32 => AtomicU32,
    i32 => AtomicI32,
    char => AtomicU32,
    Option<NonZeroU32> => AtomicU32,
    Option<NonZeroI32> => AtomicI32,
}

#[cfg(target_has_atomic = "64")]
impl_value! {
    u64 => AtomicU64,
    i64 => AtomicI64,
    Option<NonZeroU64> => AtomicU64,
    Option<NonZeroI64> => AtomicI64,
}

#[cfg(target_has_atomic = "ptr")]
impl_value! {
    usize => AtomicUsize,
    isize => AtomicIsize,
    Option<NonZeroUsize> => AtomicUsize,
    Option<NonZeroIsize> => AtomicIsize,
}

#[cfg(target_has_atomic = "ptr")]
unsafe impl<P> AtomicValue for *mut P {
    type Storage = AtomicPtr<P>;
}

#[cfg(target_has_atomic = "ptr")]
unsafe impl<P> AtomicValue for *const P {
    type Storage = AtomicPtr<P>;
}

union Transmute<T: AtomicValue> {
    value: ManuallyDrop<T>,
    raw: Underlying<T>,
}

#[cfg(not(feature = "loom"))]
union Cast<T: AtomicValue> {
    value: ManuallyDrop<T>,
    storage: ManuallyDrop<T::Storage>,
}

/// Conversions between `T` and its storage's underlying type.
pub(crate) struct Raw<T>(PhantomData<T>);

impl<T: AtomicValue> Raw<T> {
    const SIZE: usize = size_of::<T>();
    const RAW_SIZE: usize = size_of::<Underlying<T>>();
    pub(crate) const SIZE_MATCHES: bool = Self::SIZE == Self::RAW_SIZE;

    const ALIGN: usize = align_of::<T>();
    const RAW_ALIGN: usize = align_of::<Underlying<T>>();
    /// A properly aligned `&mut Underlying<T>` is also a properly aligned `&mut T`.
    pub(crate) const ALIGN_MATCHES: bool =
        Self::SIZE_MATCHES && Self::RAW_ALIGN % Self::ALIGN == 0;

    /// Referenced by every container operation, so an unsupported `T` fails
    /// to compile instead of reaching a transmute.
    pub(crate) const ASSERT_SIZE: () = {
        concat_assert!(
            Self::SIZE_MATCHES,
            "atomic value (size=",
            Self::SIZE,
            ") does not fit its storage (size=",
            Self::RAW_SIZE,
            ")",
        );
    };

    #[cfg(not(feature = "loom"))]
    const ASSERT_STORAGE: () = {
        let () = Self::ASSERT_SIZE;
        concat_assert!(
            size_of::<T::Storage>() == Self::RAW_SIZE,
            "atomic storage (size=",
            size_of::<T::Storage>(),
            ") differs from its underlying type (size=",
            Self::RAW_SIZE,
            ")",
        );
    };

    #[cfg(not(feature = "loom"))]
    pub(crate) const ASSERT_ALIGN: () = {
        let () = Self::ASSERT_SIZE;
        concat_assert!(
            Self::ALIGN_MATCHES,
            "atomic value (align=",
            Self::ALIGN,
            ") is more strictly aligned than its storage (align=",
            Self::RAW_ALIGN,
            ")",
        );
    };

    #[inline]
    pub(crate) fn into_raw(value: T) -> Underlying<T> {
        let () = Self::ASSERT_SIZE;
        let v = Transmute {
            value: ManuallyDrop::new(value),
        };
        // Sizes match and `T` has no padding, so every byte of `raw` is
        // initialized.
        unsafe { v.raw }
    }

    /// Builds the storage holding `value`, usable in `const` and `static`
    /// initializers.
    #[cfg(not(feature = "loom"))]
    #[inline]
    pub(crate) const fn into_storage(value: T) -> T::Storage {
        let () = Self::ASSERT_STORAGE;
        let v = Cast {
            value: ManuallyDrop::new(value),
        };
        // Native atomics have the same in-memory representation as their
        // underlying type, whose size was checked above.
        ManuallyDrop::into_inner(unsafe { v.storage })
    }

    #[cfg(feature = "loom")]
    #[inline]
    pub(crate) fn into_storage(value: T) -> T::Storage {
        <T::Storage as AtomicStorage>::new(Self::into_raw(value))
    }

    /// `raw` must have come from [`Raw::into_raw`].
    #[inline]
    pub(crate) unsafe fn from_raw(raw: Underlying<T>) -> T {
        let () = Self::ASSERT_SIZE;
        let v = Transmute::<T> { raw };
        ManuallyDrop::into_inner(unsafe { v.value })
    }

    #[cfg(not(feature = "loom"))]
    #[inline]
    pub(crate) fn from_mut(raw: &mut Underlying<T>) -> &mut T {
        let () = Self::ASSERT_ALIGN;
        // The storage only ever holds bit patterns of real `T` values, and
        // size and alignment were checked above.
        unsafe { &mut *(raw as *mut Underlying<T> as *mut T) }
    }
}
