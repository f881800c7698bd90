//! The orderings behind the two disciplines.
//!
//! Every atomic instruction issued by this crate uses one of these constants.
//! With the `seq-cst` feature all of them become [`Ordering::SeqCst`], which
//! matches builds that promoted every access to sequential consistency. The
//! method names, and the contracts callers may rely on, do not change.

use core::sync::atomic::Ordering;

/// `true` when the `seq-cst` feature promotes every ordering to `SeqCst`.
pub const SEQ_CST_PROMOTED: bool = cfg!(feature = "seq-cst");

const fn promote(order: Ordering) -> Ordering {
    if SEQ_CST_PROMOTED {
        Ordering::SeqCst
    } else {
        order
    }
}

/// Atomicity only.
pub(crate) const RELAXED: Ordering = promote(Ordering::Relaxed);

/// Loads in the acquire/release discipline, and failed CAS reads.
pub(crate) const ACQUIRE: Ordering = promote(Ordering::Acquire);

/// Stores in the acquire/release discipline.
pub(crate) const RELEASE: Ordering = promote(Ordering::Release);

/// Read-modify-write in the acquire/release discipline.
pub(crate) const ACQ_REL: Ordering = promote(Ordering::AcqRel);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promotion_follows_feature() {
        if SEQ_CST_PROMOTED {
            for order in [RELAXED, ACQUIRE, RELEASE, ACQ_REL] {
                assert_eq!(order, Ordering::SeqCst);
            }
        } else {
            assert_eq!(RELAXED, Ordering::Relaxed);
            assert_eq!(ACQUIRE, Ordering::Acquire);
            assert_eq!(RELEASE, Ordering::Release);
            assert_eq!(ACQ_REL, Ordering::AcqRel);
        }
    }
}
