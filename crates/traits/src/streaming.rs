//! Incremental hashing trait.
//!
//! Shaped like the one-shot [`FastHash`](crate::FastHash): the same output
//! type, but bytes arrive over any number of `update` calls.

use core::fmt::Debug;

/// A hash state that absorbs input incrementally.
///
/// # Implementor Requirements
///
/// - Chunk invariance: any partition of the input across `update` calls
///   (including empty chunks) produces the same digest as a single call.
/// - `digest()` is a pure read: calling it repeatedly without an intervening
///   `update` returns the same value, and updates may continue afterwards.
/// - `reset()` restores the state that construction produced (same seed or
///   secret), discarding all absorbed bytes.
/// - `Clone` is a deep copy: clones evolve independently.
pub trait StreamingHash: Clone {
  /// Output size in bytes.
  const OUTPUT_SIZE: usize;

  /// Digest type.
  type Output: Copy + Eq + Debug + Default;

  /// Append `data` to the absorbed stream.
  fn update(&mut self, data: &[u8]);

  /// Append several non-contiguous buffers, in order.
  #[inline]
  fn update_vectored(&mut self, bufs: &[&[u8]]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Append `std::io::IoSlice` buffers, in order.
  #[cfg(feature = "std")]
  #[inline]
  fn update_io_slices(&mut self, bufs: &[std::io::IoSlice<'_>]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Digest of everything absorbed since construction or the last reset.
  #[must_use]
  fn digest(&self) -> Self::Output;

  /// Discard absorbed input, keeping the seed/secret configuration.
  fn reset(&mut self);
}
