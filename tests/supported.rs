#![cfg(not(feature = "loom"))]

use std::mem;
use std::num::{NonZeroU32, NonZeroU8};

use ordered_atomic::{atomic::*, AcqRelAtomic, AtomicValue, RelaxedAtomic};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
enum Phase {
    Idle = 0,
    Running = 1,
    Done = 2,
}

unsafe impl AtomicValue for Phase {
    type Storage = AtomicU8;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(C)]
struct Pair {
    lo: u16,
    hi: u16,
}

unsafe impl AtomicValue for Pair {
    type Storage = AtomicU32;
}

#[allow(dead_code)]
#[derive(Clone, Copy)]
#[repr(C)]
struct Wide {
    lo: u32,
    hi: u32,
}

unsafe impl AtomicValue for Wide {
    type Storage = AtomicU32;
}

#[allow(dead_code)]
#[derive(Clone, Copy)]
#[repr(C, align(8))]
struct OverAligned(u32, u32);

unsafe impl AtomicValue for OverAligned {
    type Storage = AtomicU64;
}

#[test]
fn supported() {
    assert!(RelaxedAtomic::<usize>::SUPPORTED);
    assert!(RelaxedAtomic::<isize>::SUPPORTED);
    assert!(RelaxedAtomic::<bool>::SUPPORTED);
    assert!(RelaxedAtomic::<u8>::SUPPORTED);
    assert!(RelaxedAtomic::<i8>::SUPPORTED);
    assert!(RelaxedAtomic::<u16>::SUPPORTED);
    assert!(RelaxedAtomic::<i16>::SUPPORTED);
    assert!(RelaxedAtomic::<u32>::SUPPORTED);
    assert!(RelaxedAtomic::<i32>::SUPPORTED);
    assert!(RelaxedAtomic::<u64>::SUPPORTED);
    assert!(RelaxedAtomic::<i64>::SUPPORTED);
    assert!(RelaxedAtomic::<char>::SUPPORTED);
    assert!(RelaxedAtomic::<*mut String>::SUPPORTED);
    assert!(RelaxedAtomic::<*const String>::SUPPORTED);
    assert!(RelaxedAtomic::<Option<NonZeroU32>>::SUPPORTED);
    assert!(RelaxedAtomic::<Phase>::SUPPORTED);
    assert!(RelaxedAtomic::<Pair>::SUPPORTED);
    assert!(AcqRelAtomic::<Pair>::SUPPORTED);

    assert!(!RelaxedAtomic::<Wide>::SUPPORTED);
    assert!(!AcqRelAtomic::<Wide>::SUPPORTED);
    assert!(!RelaxedAtomic::<Wide>::REF_SUPPORTED);
}

#[test]
fn ref_supported() {
    assert!(RelaxedAtomic::<Pair>::REF_SUPPORTED);
    assert!(RelaxedAtomic::<Phase>::REF_SUPPORTED);
    assert!(RelaxedAtomic::<u64>::REF_SUPPORTED);

    assert_eq!(mem::size_of::<OverAligned>(), 8);
    assert!(RelaxedAtomic::<OverAligned>::SUPPORTED);
    // `u64` is only 4-aligned on some 32-bit targets.
    assert_eq!(
        RelaxedAtomic::<OverAligned>::REF_SUPPORTED,
        mem::align_of::<u64>() % 8 == 0
    );
}

#[test]
fn send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<RelaxedAtomic<u64>>();
    assert_send_sync::<AcqRelAtomic<u64>>();
    assert_send_sync::<RelaxedAtomic<*mut u8>>();
    assert_send_sync::<AcqRelAtomic<Phase>>();
}

#[test]
fn same_size_as_storage() {
    assert_eq!(mem::size_of::<RelaxedAtomic<u8>>(), mem::size_of::<AtomicU8>());
    assert_eq!(mem::size_of::<AcqRelAtomic<u64>>(), mem::size_of::<AtomicU64>());
    assert_eq!(mem::size_of::<AcqRelAtomic<Pair>>(), mem::size_of::<AtomicU32>());
    assert_eq!(
        mem::size_of::<AcqRelAtomic<Option<NonZeroU8>>>(),
        mem::size_of::<AtomicU8>()
    );
}

#[test]
fn enum_values() {
    let phase = AcqRelAtomic::new(Phase::Idle);

    let mut expected = Phase::Running;
    assert!(!phase.cas_strong(&mut expected, Phase::Done));
    assert_eq!(expected, Phase::Idle);

    assert!(phase.cas_strong(&mut expected, Phase::Running));
    assert_eq!(phase.load(), Phase::Running);
    assert_eq!(phase.exchange(Phase::Done), Phase::Running);
    assert_eq!(phase.load_relaxed(), Phase::Done);
    assert_eq!(phase.into_inner(), Phase::Done);
}

#[test]
fn aggregate_values() {
    let mut pair = RelaxedAtomic::new(Pair { lo: 1, hi: 2 });
    assert_eq!(pair.load_relaxed(), Pair { lo: 1, hi: 2 });

    pair.get_mut().hi = 9;
    assert_eq!(pair.load_relaxed(), Pair { lo: 1, hi: 9 });

    assert_eq!(
        pair.fetch_update_relaxed(|p| Some(Pair { lo: p.hi, hi: p.lo })),
        Ok(Pair { lo: 1, hi: 9 })
    );
    assert_eq!(pair.load_relaxed(), Pair { lo: 9, hi: 1 });
    assert_eq!(RelaxedAtomic::<Pair>::default().into_inner(), Pair::default());
}

#[test]
fn char_and_niche_values() {
    let c = RelaxedAtomic::new('a');
    assert_eq!(c.exchange_relaxed('€'), 'a');
    assert_eq!(c.load_relaxed(), '€');

    let n = AcqRelAtomic::new(NonZeroU32::new(5));
    assert_eq!(n.exchange(None), NonZeroU32::new(5));
    let mut expected = None;
    assert!(n.cas_strong(&mut expected, NonZeroU32::new(12)));
    assert_eq!(n.load(), NonZeroU32::new(12));
}

#[test]
fn pointer_values() {
    let first = Box::into_raw(Box::new(String::from("first")));
    let second = Box::into_raw(Box::new(String::from("second")));

    let slot = AcqRelAtomic::new(first);
    let mut expected = first;
    assert!(slot.cas_strong(&mut expected, second));
    assert_eq!(slot.load(), second);

    let taken = slot.exchange(std::ptr::null_mut());
    assert!(slot.load().is_null());

    unsafe {
        assert_eq!(*taken, "second");
        drop(Box::from_raw(first));
        drop(Box::from_raw(taken));
    }
}
