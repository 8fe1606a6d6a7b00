//! xxHash (**NOT CRYPTO**): XXH32, XXH64, XXH3-64 and XXH3-128.
//!
//! This crate is `no_std` compatible and has zero library dependencies outside
//! the rsxxh workspace. Dev-only dependencies are used for oracle testing and
//! benchmarking.
//!
//! # Modules
//!
//! - [`xxh3`] - XXH3-64/128: single-shot, streaming, per-ISA variants, secrets.
//! - [`xxh64`] - XXH64.
//! - [`xxh32`] - XXH32.
//!
//! # Quick Start
//!
//! ```
//! use xxh::{Canonical, Hash128, xxh3};
//!
//! let h: Hash128 = xxh3::hash128(b"hello", 0);
//! let bytes = h.to_canonical();
//! assert_eq!(Hash128::from_canonical(bytes), h);
//!
//! let mut s = xxh::Xxh32::with_seed(1);
//! s.update(b"hello");
//! assert_eq!(s.digest(), xxh::xxh32::xxh32(b"hello", 1));
//! ```
//!
//! For a state whose family is chosen at runtime, see [`HashState`]
//! (feature `alloc`).
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod canonical;
mod hash128;
#[cfg(feature = "alloc")]
mod state;
mod util;
pub mod xxh3;
pub mod xxh32;
pub mod xxh64;

pub use canonical::Canonical;
pub use hash128::Hash128;
#[cfg(feature = "alloc")]
pub use state::HashState;
pub use traits::{FastHash, StateError, StreamingHash};
pub use xxh3::{Xxh3_64, Xxh3_128};
pub use xxh32::Xxh32;
pub use xxh64::Xxh64;

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// xxHash release whose digests this crate reproduces, as (major, minor, patch).
pub const XXHASH_VERSION: (u32, u32, u32) = (0, 8, 3);

/// SSE2 variant compiled in (x86_64).
pub const HAVE_SSE2: bool = cfg!(target_arch = "x86_64");
/// AVX2 variant compiled in (x86_64).
pub const HAVE_AVX2: bool = cfg!(target_arch = "x86_64");
/// AVX-512 variant compiled in (x86_64).
pub const HAVE_AVX512: bool = cfg!(target_arch = "x86_64");
/// NEON variant compiled in (little-endian aarch64).
pub const HAVE_NEON: bool = cfg!(all(target_arch = "aarch64", target_endian = "little"));

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn have_flags_match_compiled_variants() {
    assert_eq!(HAVE_SSE2, xxh3::Variant::Sse2.is_compiled());
    assert_eq!(HAVE_AVX2, xxh3::Variant::Avx2.is_compiled());
    assert_eq!(HAVE_AVX512, xxh3::Variant::Avx512.is_compiled());
    assert_eq!(HAVE_NEON, xxh3::Variant::Neon.is_compiled());
  }

  #[test]
  fn version_is_set() {
    assert!(!VERSION.is_empty());
    assert_eq!(XXHASH_VERSION.0, 0);
  }
}
