//! CPU capabilities and detection for the xxh workspace.
//!
//! # Core Types
//!
//! - [`Caps`]: what instructions can run on this machine
//! - [`Arch`]: the compilation target's architecture
//!
//! # Entry Points
//!
//! - [`caps_static`]: compile-time capabilities, usable in `const` context
//! - [`caps`]: runtime capabilities (feature `std`), cached after first use
//! - [`caps_detected`]: runtime capabilities with any override ignored
//!
//! The hashing core only ever consults [`caps_static`]; runtime detection is
//! for callers that choose a kernel per process, and for tests that must skip
//! kernels the host cannot run.
//!
//! ```
//! use platform::caps::x86;
//!
//! let c = platform::caps();
//! if c.has(x86::AVX2_READY) {
//!   // AVX2 kernels are legal here.
//! }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
mod detect;

pub use caps::{Arch, Caps};
#[cfg(feature = "std")]
pub use detect::{has_override, set_caps_override};
pub use detect::{caps, caps_detected, caps_static};
