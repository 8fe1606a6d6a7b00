//! xxHash for Rust: XXH32, XXH64, XXH3-64 and XXH3-128.
//!
//! `rsxxh` re-exports the `xxh` hashing core and, with `std`, adds an
//! automatic dispatcher that picks the fastest XXH3 variant the running CPU
//! supports. Zero dependencies outside the workspace, `no_std` compatible.
//!
//! # Quick Start
//!
//! ```
//! use rsxxh::{Xxh3_64, xxh3};
//!
//! // One-shot computation
//! let h = xxh3::hash64(b"hello world", 0);
//!
//! // Streaming computation
//! let mut hasher = Xxh3_64::new();
//! hasher.update(b"hello ");
//! hasher.update(b"world");
//! assert_eq!(hasher.digest(), h);
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std` | Yes | Runtime CPU detection and the [`auto`] dispatcher |
//! | `alloc` | Yes | [`HashState`] and custom-secret streaming (implied by `std`) |
//!
//! ## `no_std` Usage
//!
//! ```toml
//! [dependencies]
//! rsxxh = { version = "0.1", default-features = false }
//! ```
//!
//! Without `std`, XXH3 uses the best variant enabled at compile time
//! ([`xxh3::Variant::DEFAULT`]).
#![cfg_attr(not(feature = "std"), no_std)]

// =============================================================================
// Core
// =============================================================================

#[cfg(feature = "alloc")]
pub use xxh::HashState;
pub use xxh::{
  Canonical, HAVE_AVX2, HAVE_AVX512, HAVE_NEON, HAVE_SSE2, Hash128, VERSION, XXHASH_VERSION, Xxh3_64, Xxh3_128, Xxh32,
  Xxh64, xxh3, xxh32, xxh64,
};

// =============================================================================
// Traits and errors
// =============================================================================

pub use traits::{FastHash, StateError, StreamingHash};
#[cfg(feature = "std")]
pub use traits::io::{HashReader, HashWriter};

// =============================================================================
// Platform
// =============================================================================

pub use platform::{Arch, Caps};

#[cfg(feature = "std")]
pub mod auto;

#[cfg(feature = "std")]
pub use auto::DispatchInfo;
