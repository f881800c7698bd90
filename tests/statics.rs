#![cfg(not(feature = "loom"))]

use std::hint;
use std::num::NonZeroU32;
use std::thread;

use ordered_atomic::{atomic::AtomicU8, AcqRelAtomic, AtomicValue, RelaxedAtomic};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
enum Stage {
    Booting = 0,
    Serving = 1,
}

unsafe impl AtomicValue for Stage {
    type Storage = AtomicU8;
}

static HITS: RelaxedAtomic<u64> = RelaxedAtomic::new(0);
static READY: AcqRelAtomic<bool> = AcqRelAtomic::new(false);
static STAGE: AcqRelAtomic<Stage> = AcqRelAtomic::new(Stage::Booting);
static LAST: RelaxedAtomic<Option<NonZeroU32>> = RelaxedAtomic::new(None);
static OFFSET: RelaxedAtomic<i32> = RelaxedAtomic::new(-5);

#[test]
fn statics_start_with_their_initializers() {
    assert_eq!(LAST.load_relaxed(), None);
    assert_eq!(OFFSET.load_relaxed(), -5);
    assert_eq!(OFFSET.fetch_add_relaxed(5), -5);
    assert_eq!(OFFSET.load_relaxed(), 0);
}

#[test]
fn statics_are_shared_between_threads() {
    const THREADS: u64 = 4;
    const PER_THREAD: u64 = 1_000;

    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                while !READY.load() {
                    hint::spin_loop();
                }
                assert_eq!(STAGE.load(), Stage::Serving);
                for _ in 0..PER_THREAD {
                    HITS.fetch_add_relaxed(1);
                }
            });
        }
        STAGE.store(Stage::Serving);
        READY.store(true);
    });

    assert_eq!(HITS.load_relaxed(), THREADS * PER_THREAD);
}
