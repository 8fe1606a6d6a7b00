//! Bounds-checked little-endian loads.
//!
//! Every read in the hashing core goes through these helpers, so a buffer
//! that is too short (for example an undersized secret) panics instead of
//! reading out of range.

#[cold]
#[inline(never)]
#[track_caller]
fn out_of_range(end: usize, len: usize) -> ! {
  panic!("read ending at byte {end} of a {len}-byte buffer")
}

/// Borrow `N` bytes of `bytes` starting at `offset`.
#[inline(always)]
#[track_caller]
pub(crate) fn array_at<const N: usize>(bytes: &[u8], offset: usize) -> &[u8; N] {
  match bytes.get(offset..).and_then(|tail| tail.first_chunk::<N>()) {
    Some(chunk) => chunk,
    None => out_of_range(offset.saturating_add(N), bytes.len()),
  }
}

#[inline(always)]
#[track_caller]
pub(crate) fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
  u32::from_le_bytes(*array_at::<4>(bytes, offset))
}

#[inline(always)]
#[track_caller]
pub(crate) fn read_u64_le(bytes: &[u8], offset: usize) -> u64 {
  u64::from_le_bytes(*array_at::<8>(bytes, offset))
}
