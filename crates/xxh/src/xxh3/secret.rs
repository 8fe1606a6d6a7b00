//! Secret derivation from a seed.

use super::{DEFAULT_SECRET, DEFAULT_SECRET_SIZE, short};
use crate::{Canonical, Hash128, util::read_u64_le};

/// The default secret with `seed` added to the even 64-bit words and
/// subtracted from the odd ones.
#[inline(always)]
pub(super) fn custom_default_secret(seed: u64) -> [u8; DEFAULT_SECRET_SIZE] {
  if seed == 0 {
    return DEFAULT_SECRET;
  }

  let mut result = [0u8; DEFAULT_SECRET_SIZE];
  let (pairs, _) = result.as_chunks_mut::<16>();
  for (idx, pair) in pairs.iter_mut().enumerate() {
    let lo = read_u64_le(&DEFAULT_SECRET, idx * 16).wrapping_add(seed);
    let hi = read_u64_le(&DEFAULT_SECRET, idx * 16 + 8).wrapping_sub(seed);
    pair[..8].copy_from_slice(&lo.to_le_bytes());
    pair[8..].copy_from_slice(&hi.to_le_bytes());
  }
  result
}

/// The 192-byte secret that seeded hashing uses internally for inputs longer
/// than 240 bytes.
///
/// Hashing such an input with this secret gives the same digest as hashing it
/// with `seed`. Seed 0 yields [`DEFAULT_SECRET`].
///
/// ```
/// use xxh::xxh3;
///
/// let data = [7u8; 1000];
/// let secret = xxh3::generate_secret_from_seed(42);
/// assert_eq!(xxh3::hash64_with_secret(&data, &secret), xxh3::hash64(&data, 42));
/// ```
#[must_use]
pub fn generate_secret_from_seed(seed: u64) -> [u8; DEFAULT_SECRET_SIZE] {
  custom_default_secret(seed)
}

/// Fill `out` with secret material derived from `seed`.
///
/// Byte `i` is byte `i % 8` of the little-endian seed, XORed with the low
/// byte of `i * 131`. Any length is accepted; an empty `out` is left
/// untouched. Outputs of at least [`SECRET_SIZE_MIN`](super::SECRET_SIZE_MIN)
/// bytes are usable as secrets.
///
/// The scheme is cheap and reproducible, not a mixing function: secrets from
/// nearby seeds share most of their bytes. Use [`generate_secret_scrambled`]
/// for material where every byte depends on the whole seed.
///
/// ```
/// use xxh::xxh3;
///
/// let mut a = [0u8; 136];
/// let mut b = [0u8; 136];
/// xxh3::generate_secret(&mut a, 1);
/// xxh3::generate_secret(&mut b, 2);
/// assert_ne!(a, b);
/// let _ = xxh3::hash64_with_secret(b"data", &a);
/// ```
pub fn generate_secret(out: &mut [u8], seed: u64) {
  let material = seed.to_le_bytes();
  for ((i, byte), seed_byte) in out.iter_mut().enumerate().zip(material.iter().cycle()) {
    *byte = seed_byte ^ (i as u8).wrapping_mul(131);
  }
}

/// XOR `h` into a 16-byte segment: low half into bytes 0..8, high half into
/// bytes 8..16, both little-endian.
#[inline]
fn combine16(segment: &mut [u8; 16], h: Hash128) {
  *segment = (u128::from_le_bytes(*segment) ^ h.as_u128()).to_le_bytes();
}

/// Fill `out` with secret material scrambled through XXH3-128.
///
/// The seed's 8 little-endian bytes are tiled across `out`, then every
/// 16-byte segment `n` is XORed with `XXH3-128(scrambler, n)`, where the
/// scrambler is the canonical `XXH3-128` of those 8 bytes. When `out` is at
/// least 16 bytes its last 16 bytes are additionally XORed with the scrambler
/// hash itself. Any length is accepted; an empty `out` is left untouched.
///
/// ```
/// use xxh::xxh3;
///
/// let mut a = [0u8; 136];
/// let mut b = [0u8; 136];
/// xxh3::generate_secret_scrambled(&mut a, 1);
/// xxh3::generate_secret(&mut b, 1);
/// assert_ne!(a, b);
/// ```
pub fn generate_secret_scrambled(out: &mut [u8], seed: u64) {
  let material = seed.to_le_bytes();
  for chunk in out.chunks_mut(material.len()) {
    chunk.copy_from_slice(&material[..chunk.len()]);
  }

  let scrambler_hash = short::hash128(&material, 0, &DEFAULT_SECRET);
  let scrambler = scrambler_hash.to_canonical();

  let (segments, _) = out.as_chunks_mut::<16>();
  for (n, segment) in segments.iter_mut().enumerate() {
    combine16(segment, short::hash128(&scrambler, n as u64, &DEFAULT_SECRET));
  }

  if let Some(last) = out.last_chunk_mut::<16>() {
    combine16(last, scrambler_hash);
  }
}
