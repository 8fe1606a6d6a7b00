//! Streaming XXH3.
//!
//! Input is buffered in a 256-byte block (four stripes). Stripes are only
//! mixed once at least one more byte is known to follow, so the last stripe
//! is always available to the digest untouched. The digest runs on a copy of
//! the accumulators, leaving the hasher free to absorb more input.

#[cfg(feature = "alloc")]
use alloc::boxed::Box;
use core::hash::BuildHasher;

use traits::{FastHash, StreamingHash};

#[cfg(feature = "alloc")]
use super::Secret;
use super::{
  Acc, DEFAULT_SECRET, DEFAULT_SECRET_SIZE, INITIAL_ACC, MID_SIZE_MAX, STRIPE_LEN, dispatch,
  dispatch::DEFAULT_KERNEL,
  kernels::{Kernel, Variant, kernel},
  long, secret, short,
};
use crate::{Hash128, util::array_at};

const BUFFER_SIZE: usize = 256;

/// How a hasher is keyed.
#[derive(Clone)]
enum Keying {
  Default,
  Seeded {
    seed: u64,
    secret: [u8; DEFAULT_SECRET_SIZE],
  },
  #[cfg(feature = "alloc")]
  Custom(Box<[u8]>),
  #[cfg(feature = "alloc")]
  CustomWithSeed { secret: Box<[u8]>, seed: u64 },
}

impl Keying {
  fn seeded(seed: u64) -> Self {
    if seed == 0 {
      Self::Default
    } else {
      Self::Seeded {
        seed,
        secret: secret::custom_default_secret(seed),
      }
    }
  }

  /// Secret for the stripe loop.
  #[inline]
  fn long_secret(&self) -> &[u8] {
    match self {
      Self::Default => &DEFAULT_SECRET,
      Self::Seeded { secret, .. } => secret,
      #[cfg(feature = "alloc")]
      Self::Custom(secret) | Self::CustomWithSeed { secret, .. } => secret,
    }
  }

  /// Secret and seed for inputs of at most 240 bytes.
  #[inline]
  fn short_keying(&self) -> (&[u8], u64) {
    match self {
      Self::Default => (&DEFAULT_SECRET, 0),
      Self::Seeded { seed, .. } => (&DEFAULT_SECRET, *seed),
      #[cfg(feature = "alloc")]
      Self::Custom(secret) => (secret, 0),
      #[cfg(feature = "alloc")]
      Self::CustomWithSeed { seed, .. } => (&DEFAULT_SECRET, *seed),
    }
  }

  fn seed(&self) -> u64 {
    match self {
      Self::Default => 0,
      Self::Seeded { seed, .. } => *seed,
      #[cfg(feature = "alloc")]
      Self::Custom(_) => 0,
      #[cfg(feature = "alloc")]
      Self::CustomWithSeed { seed, .. } => *seed,
    }
  }
}

/// Width-independent streaming state.
#[derive(Clone)]
struct Xxh3Core {
  acc: Acc,
  buffer: [u8; BUFFER_SIZE],
  buffered: usize,
  stripes_so_far: usize,
  stripes_per_block: usize,
  total_len: u64,
  keying: Keying,
  kernel: Kernel,
}

impl Xxh3Core {
  fn new(keying: Keying) -> Self {
    let stripes_per_block = long::stripes_per_block(keying.long_secret().len());
    Self {
      acc: INITIAL_ACC,
      buffer: [0; BUFFER_SIZE],
      buffered: 0,
      stripes_so_far: 0,
      stripes_per_block,
      total_len: 0,
      keying,
      kernel: DEFAULT_KERNEL,
    }
  }

  #[inline]
  fn variant(&self) -> Variant {
    self.kernel.variant
  }

  /// # Safety
  ///
  /// The CPU must support `variant`'s [`required_caps`](Variant::required_caps).
  #[inline]
  unsafe fn set_variant(&mut self, variant: Variant) {
    self.kernel = kernel(variant);
  }

  fn reset(&mut self) {
    self.acc = INITIAL_ACC;
    self.buffered = 0;
    self.stripes_so_far = 0;
    self.total_len = 0;
  }

  #[inline]
  fn total_len(&self) -> u64 {
    self.total_len
  }

  fn update(&mut self, mut input: &[u8]) {
    self.total_len = self.total_len.wrapping_add(input.len() as u64);

    let free = BUFFER_SIZE - self.buffered;
    if input.len() <= free {
      self.buffer[self.buffered..self.buffered + input.len()].copy_from_slice(input);
      self.buffered += input.len();
      return;
    }

    let secret = self.keying.long_secret();
    let consume = self.kernel.consume_stripes;

    if self.buffered > 0 {
      let (head, rest) = input.split_at(free);
      self.buffer[self.buffered..].copy_from_slice(head);
      // SAFETY: the kernel's CPU requirements were vouched for when it was
      // selected.
      unsafe {
        consume(
          &mut self.acc,
          &mut self.stripes_so_far,
          self.stripes_per_block,
          &self.buffer,
          secret,
        );
      }
      self.buffered = 0;
      input = rest;
    }

    if input.len() > BUFFER_SIZE {
      let nb_stripes = (input.len() - 1) / STRIPE_LEN;
      let (stripes, rest) = input.split_at(nb_stripes * STRIPE_LEN);
      // SAFETY: as above.
      unsafe {
        consume(
          &mut self.acc,
          &mut self.stripes_so_far,
          self.stripes_per_block,
          stripes,
          secret,
        );
      }
      // Keep the last mixed stripe: a short tail borrows from it at digest.
      self.buffer[BUFFER_SIZE - STRIPE_LEN..].copy_from_slice(&stripes[stripes.len() - STRIPE_LEN..]);
      input = rest;
    }

    self.buffer[..input.len()].copy_from_slice(input);
    self.buffered = input.len();
  }

  fn digest_long(&self, secret: &[u8]) -> Acc {
    let mut acc = self.acc;
    let mut last_stripe = [0u8; STRIPE_LEN];

    let last: &[u8; STRIPE_LEN] = if self.buffered >= STRIPE_LEN {
      let nb_stripes = (self.buffered - 1) / STRIPE_LEN;
      let mut stripes_so_far = self.stripes_so_far;
      // SAFETY: the kernel's CPU requirements were vouched for when it was
      // selected.
      unsafe {
        (self.kernel.consume_stripes)(
          &mut acc,
          &mut stripes_so_far,
          self.stripes_per_block,
          &self.buffer[..nb_stripes * STRIPE_LEN],
          secret,
        );
      }
      array_at(&self.buffer, self.buffered - STRIPE_LEN)
    } else {
      let catch_up = STRIPE_LEN - self.buffered;
      last_stripe[..catch_up].copy_from_slice(&self.buffer[BUFFER_SIZE - catch_up..]);
      last_stripe[catch_up..].copy_from_slice(&self.buffer[..self.buffered]);
      &last_stripe
    };

    // SAFETY: as above.
    unsafe { (self.kernel.accumulate_512)(&mut acc, last, long::last_stripe_key(secret)) };
    acc
  }

  fn digest64(&self) -> u64 {
    if self.total_len > MID_SIZE_MAX as u64 {
      let secret = self.keying.long_secret();
      long::finalize64(&self.digest_long(secret), secret, self.total_len)
    } else {
      let (secret, seed) = self.keying.short_keying();
      short::hash64(&self.buffer[..self.buffered], seed, secret)
    }
  }

  fn digest128(&self) -> Hash128 {
    if self.total_len > MID_SIZE_MAX as u64 {
      let secret = self.keying.long_secret();
      long::finalize128(&self.digest_long(secret), secret, self.total_len)
    } else {
      let (secret, seed) = self.keying.short_keying();
      short::hash128(&self.buffer[..self.buffered], seed, secret)
    }
  }
}

// ─── Typed hashers ──────────────────────────────────────────────────────────

macro_rules! typed_hasher {
  (
    $(#[$meta:meta])*
    $name:ident, $output:ty, $digest:ident, $oneshot:path
  ) => {
    $(#[$meta])*
    #[derive(Clone)]
    pub struct $name {
      core: Xxh3Core,
    }

    impl $name {
      /// Unseeded hasher.
      #[must_use]
      pub fn new() -> Self {
        Self { core: Xxh3Core::new(Keying::Default) }
      }

      #[must_use]
      pub fn with_seed(seed: u64) -> Self {
        Self { core: Xxh3Core::new(Keying::seeded(seed)) }
      }

      /// Hasher keyed by a copy of `secret`.
      #[cfg(feature = "alloc")]
      #[must_use]
      pub fn with_secret(secret: Secret<'_>) -> Self {
        Self { core: Xxh3Core::new(Keying::Custom(Box::from(secret.as_bytes()))) }
      }

      /// Hasher keyed by `seed` for totals up to 240 bytes and by a copy of
      /// `secret` beyond.
      #[cfg(feature = "alloc")]
      #[must_use]
      pub fn with_secret_and_seed(secret: Secret<'_>, seed: u64) -> Self {
        Self {
          core: Xxh3Core::new(Keying::CustomWithSeed {
            secret: Box::from(secret.as_bytes()),
            seed,
          }),
        }
      }

      /// Mix through `variant` from now on.
      ///
      /// Variants are bit-identical, so this may be called at any point
      /// without changing the digest. Variants not compiled for this target
      /// fall back to scalar.
      ///
      /// # Safety
      ///
      /// The CPU must support `variant`'s
      /// [`required_caps`](Variant::required_caps).
      #[inline]
      pub unsafe fn set_variant(&mut self, variant: Variant) {
        // SAFETY: forwarded to the caller.
        unsafe { self.core.set_variant(variant) }
      }

      #[inline]
      #[must_use]
      pub fn variant(&self) -> Variant {
        self.core.variant()
      }

      /// Bytes absorbed since construction or the last reset.
      #[inline]
      #[must_use]
      pub fn total_len(&self) -> u64 {
        self.core.total_len()
      }

      #[inline]
      pub fn update(&mut self, data: &[u8]) {
        self.core.update(data);
      }

      #[must_use]
      pub fn digest(&self) -> $output {
        self.core.$digest()
      }

      /// Forget absorbed input, keeping the seed, secret and variant.
      #[inline]
      pub fn reset(&mut self) {
        self.core.reset();
      }
    }

    impl Default for $name {
      #[inline]
      fn default() -> Self {
        Self::new()
      }
    }

    impl core::fmt::Debug for $name {
      fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct(stringify!($name))
          .field("variant", &self.core.variant())
          .field("seed", &self.core.keying.seed())
          .field("total_len", &self.core.total_len)
          .finish_non_exhaustive()
      }
    }

    impl StreamingHash for $name {
      const OUTPUT_SIZE: usize = core::mem::size_of::<$output>();
      type Output = $output;

      #[inline]
      fn update(&mut self, data: &[u8]) {
        $name::update(self, data);
      }

      #[inline]
      fn digest(&self) -> $output {
        $name::digest(self)
      }

      #[inline]
      fn reset(&mut self) {
        $name::reset(self);
      }
    }

    impl FastHash for $name {
      const OUTPUT_SIZE: usize = core::mem::size_of::<$output>();
      type Output = $output;
      type Seed = u64;

      #[inline]
      fn hash_with_seed(seed: u64, data: &[u8]) -> $output {
        $oneshot(data, seed)
      }
    }
  };
}

typed_hasher! {
  /// Streaming XXH3-64.
  ///
  /// # Examples
  ///
  /// ```
  /// use xxh::xxh3::Xxh3_64;
  ///
  /// let mut h = Xxh3_64::new();
  /// for chunk in b"chunked input of any shape".chunks(5) {
  ///   h.update(chunk);
  /// }
  /// assert_eq!(h.digest(), xxh::xxh3::hash64_unseeded(b"chunked input of any shape"));
  /// ```
  Xxh3_64, u64, digest64, dispatch::hash64
}

typed_hasher! {
  /// Streaming XXH3-128.
  ///
  /// # Examples
  ///
  /// ```
  /// use xxh::xxh3::Xxh3_128;
  ///
  /// let mut h = Xxh3_128::with_seed(3);
  /// h.update(b"one");
  /// h.update(b"two");
  /// assert_eq!(h.digest(), xxh::xxh3::hash128(b"onetwo", 3));
  /// ```
  Xxh3_128, Hash128, digest128, dispatch::hash128
}

impl core::hash::Hasher for Xxh3_64 {
  #[inline]
  fn write(&mut self, bytes: &[u8]) {
    self.update(bytes);
  }

  #[inline]
  fn finish(&self) -> u64 {
    self.digest()
  }
}

/// [`BuildHasher`] producing seeded [`Xxh3_64`] hashers, for hash maps.
///
/// ```
/// use std::collections::HashMap;
///
/// use xxh::xxh3::Xxh3Builder;
///
/// let mut map: HashMap<&str, u32, Xxh3Builder> = HashMap::with_hasher(Xxh3Builder::with_seed(1));
/// map.insert("a", 1);
/// assert_eq!(map.get("a"), Some(&1));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Xxh3Builder {
  seed: u64,
}

impl Xxh3Builder {
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self { seed: 0 }
  }

  #[inline]
  #[must_use]
  pub const fn with_seed(seed: u64) -> Self {
    Self { seed }
  }

  #[inline]
  #[must_use]
  pub const fn seed(&self) -> u64 {
    self.seed
  }
}

impl BuildHasher for Xxh3Builder {
  type Hasher = Xxh3_64;

  #[inline]
  fn build_hasher(&self) -> Xxh3_64 {
    Xxh3_64::with_seed(self.seed)
  }
}
