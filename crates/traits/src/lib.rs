//! Core hashing traits for rsxxh.
//!
//! This crate provides the foundational traits that every rsxxh hash conforms
//! to. It is `no_std` compatible and has zero dependencies.
//!
//! # Trait Hierarchy
//!
//! | Trait | Purpose | Examples |
//! |-------|---------|----------|
//! | [`FastHash`] | One-shot seeded hashing | XXH32, XXH64, XXH3-64, XXH3-128 |
//! | [`StreamingHash`] | Incremental update/digest/reset | `Xxh3_64`, `Xxh32` hashers |
//!
//! # Error Types
//!
//! - [`StateError`] - Misuse of a reusable hash state handle
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod error;
mod fast_hash;
pub mod io;
mod streaming;

pub use error::StateError;
pub use fast_hash::FastHash;
pub use streaming::StreamingHash;
