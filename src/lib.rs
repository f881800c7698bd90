//! This crate provides atomic values restricted to two memory ordering
//! disciplines: [`RelaxedAtomic`] and [`AcqRelAtomic`].
//!
//! The native atomics take an [`Ordering`] on every call. That makes it easy
//! to mix sequentially consistent and acquire/release reasoning by accident,
//! or to pick combinations that make no sense (an acquire store, a release
//! failure ordering). Here the ordering is part of the method name instead:
//!
//! - [`RelaxedAtomic`] only offers `*_relaxed` operations. They are atomic and
//!   order nothing else.
//! - [`AcqRelAtomic`] offers `load` (acquire), `store` (release), and
//!   read-modify-write operations (acquire-release), and still exposes the
//!   relaxed set for accesses that need no ordering.
//!
//! # How it Works
//!
//! A value type implements [`AtomicValue`], naming the native atomic
//! ([`AtomicStorage`]) it is kept in. Integers, `bool`, `char`, raw pointers,
//! and `Option<NonZero*>` are supported out of the box; a `#[repr(u8)]` enum
//! or a small aggregate can opt in. Values are converted to the storage's
//! bit pattern, and sizes are checked at compile time, so a type that does
//! not fit is a build error rather than a hidden lock.
//!
//! # Features
//!
//! - `seq-cst`: issue every operation with [`Ordering::SeqCst`]. Callers keep
//!   the same API and may still only rely on the named discipline.
//! - `loom`: back every container with [`loom`]'s atomics so concurrent tests
//!   can be model checked with `cargo test --features loom --test loom`.
//!   Constructors are no longer `const` and `get_mut` is unavailable, and the
//!   containers may only be used inside `loom::model`.
//!
//! [`loom`]: https://docs.rs/loom
//! [`Ordering`]: core::sync::atomic::Ordering
//! [`Ordering::SeqCst`]: core::sync::atomic::Ordering::SeqCst
//! [`AtomicStorage`]: atomic::AtomicStorage
#![no_std]

#[macro_use]
mod utils;

mod acq_rel;
pub mod atomic;
mod ordering;
mod relaxed;
mod value;

pub use acq_rel::AcqRelAtomic;
pub use ordering::SEQ_CST_PROMOTED;
pub use relaxed::RelaxedAtomic;
pub use value::{AtomicValue, Underlying};
