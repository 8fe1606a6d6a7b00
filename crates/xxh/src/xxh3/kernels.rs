use core::fmt;

use platform::{Caps, caps::aarch64, caps::x86};

use super::{Acc, STRIPE_LEN, variants};
use crate::Hash128;

/// Block-mixing primitives for the long-input loop.
///
/// Implementors are zero-sized tokens. Holding one proves the CPU supports
/// the instructions its methods use, so the methods themselves are safe.
pub(crate) trait Lanes: Copy {
  /// Mix one 64-byte stripe into the eight accumulators.
  fn accumulate_512(self, acc: &mut Acc, stripe: &[u8; STRIPE_LEN], secret: &[u8; STRIPE_LEN]);

  /// Scramble the accumulators at the end of a block.
  fn scramble(self, acc: &mut Acc, secret: &[u8; STRIPE_LEN]);
}

/// An XXH3 block-mixing implementation.
///
/// All variants exist on every target so names round-trip everywhere; only
/// [`Variant::COMPILED`] ones have code behind them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Variant {
  Scalar,
  Sse2,
  Avx2,
  Avx512,
  Neon,
}

impl Variant {
  pub const ALL: &'static [Self] = &[Self::Scalar, Self::Sse2, Self::Avx2, Self::Avx512, Self::Neon];

  #[cfg(target_arch = "x86_64")]
  pub const COMPILED: &'static [Self] = &[Self::Scalar, Self::Sse2, Self::Avx2, Self::Avx512];
  #[cfg(all(target_arch = "aarch64", target_endian = "little"))]
  pub const COMPILED: &'static [Self] = &[Self::Scalar, Self::Neon];
  #[cfg(not(any(target_arch = "x86_64", all(target_arch = "aarch64", target_endian = "little"))))]
  pub const COMPILED: &'static [Self] = &[Self::Scalar];

  /// Best variant the compile-time target features guarantee.
  pub const DEFAULT: Self = if cfg!(all(target_arch = "x86_64", target_feature = "avx512f")) {
    Self::Avx512
  } else if cfg!(all(target_arch = "x86_64", target_feature = "avx2")) {
    Self::Avx2
  } else if cfg!(target_arch = "x86_64") {
    Self::Sse2
  } else if cfg!(all(target_arch = "aarch64", target_endian = "little")) {
    Self::Neon
  } else {
    Self::Scalar
  };

  #[inline]
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Scalar => "scalar",
      Self::Sse2 => "sse2",
      Self::Avx2 => "avx2",
      Self::Avx512 => "avx512",
      Self::Neon => "neon",
    }
  }

  /// Parse a variant name. `portable` is accepted for [`Variant::Scalar`].
  #[must_use]
  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "scalar" | "portable" => Some(Self::Scalar),
      "sse2" => Some(Self::Sse2),
      "avx2" => Some(Self::Avx2),
      "avx512" => Some(Self::Avx512),
      "neon" => Some(Self::Neon),
      _ => None,
    }
  }

  /// CPU features the variant's instructions need.
  #[inline]
  #[must_use]
  pub const fn required_caps(self) -> Caps {
    match self {
      Self::Scalar => Caps::NONE,
      Self::Sse2 => x86::SSE2,
      Self::Avx2 => x86::AVX2_READY,
      Self::Avx512 => x86::AVX512_READY,
      Self::Neon => aarch64::NEON,
    }
  }

  /// Whether this build contains code for the variant.
  #[inline]
  #[must_use]
  pub const fn is_compiled(self) -> bool {
    match self {
      Self::Scalar => true,
      Self::Sse2 | Self::Avx2 | Self::Avx512 => cfg!(target_arch = "x86_64"),
      Self::Neon => cfg!(all(target_arch = "aarch64", target_endian = "little")),
    }
  }

  /// Compiled, and usable without any runtime check on this target.
  #[inline]
  #[must_use]
  pub const fn is_baseline(self) -> bool {
    self.is_compiled() && platform::caps_static().has(self.required_caps())
  }
}

impl Default for Variant {
  #[inline]
  fn default() -> Self {
    Self::DEFAULT
  }
}

impl fmt::Display for Variant {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Function tables ────────────────────────────────────────────────────────

pub type Hash64Fn = unsafe fn(&[u8], u64) -> u64;
pub type Hash128Fn = unsafe fn(&[u8], u64) -> Hash128;
pub type Hash64SecretFn = unsafe fn(&[u8], &[u8]) -> u64;
pub type Hash128SecretFn = unsafe fn(&[u8], &[u8]) -> Hash128;
pub type Hash64SecretSeedFn = unsafe fn(&[u8], &[u8], u64) -> u64;
pub type Hash128SecretSeedFn = unsafe fn(&[u8], &[u8], u64) -> Hash128;

pub(crate) type ConsumeFn = unsafe fn(&mut Acc, &mut usize, usize, &[u8], &[u8]);
pub(crate) type StripeFn = unsafe fn(&mut Acc, &[u8; STRIPE_LEN], &[u8; STRIPE_LEN]);

/// Entry points of one compiled variant.
///
/// Every pointer is `unsafe` to call: the caller asserts that the CPU has
/// [`Variant::required_caps`] for [`Kernel::variant`]. The scalar kernel has
/// no requirement.
#[derive(Clone, Copy)]
pub struct Kernel {
  pub variant: Variant,
  pub hash64: Hash64Fn,
  pub hash128: Hash128Fn,
  pub hash64_with_secret: Hash64SecretFn,
  pub hash128_with_secret: Hash128SecretFn,
  pub hash64_with_secret_and_seed: Hash64SecretSeedFn,
  pub hash128_with_secret_and_seed: Hash128SecretSeedFn,
  pub(crate) consume_stripes: ConsumeFn,
  pub(crate) accumulate_512: StripeFn,
}

impl Kernel {
  #[inline]
  #[must_use]
  pub const fn name(&self) -> &'static str {
    self.variant.as_str()
  }
}

impl fmt::Debug for Kernel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Kernel").field("variant", &self.variant).finish_non_exhaustive()
  }
}

macro_rules! kernel_table {
  ($variant:expr, $module:ident) => {
    Kernel {
      variant: $variant,
      hash64: variants::$module::hash64,
      hash128: variants::$module::hash128,
      hash64_with_secret: variants::$module::hash64_with_secret,
      hash128_with_secret: variants::$module::hash128_with_secret,
      hash64_with_secret_and_seed: variants::$module::hash64_with_secret_and_seed,
      hash128_with_secret_and_seed: variants::$module::hash128_with_secret_and_seed,
      consume_stripes: variants::$module::consume_stripes,
      accumulate_512: variants::$module::accumulate_512,
    }
  };
}

/// Function table for `variant`.
///
/// Variants without code on this target resolve to the scalar kernel, which
/// computes the same digests.
#[must_use]
pub const fn kernel(variant: Variant) -> Kernel {
  match variant {
    #[cfg(target_arch = "x86_64")]
    Variant::Sse2 => kernel_table!(Variant::Sse2, sse2),
    #[cfg(target_arch = "x86_64")]
    Variant::Avx2 => kernel_table!(Variant::Avx2, avx2),
    #[cfg(target_arch = "x86_64")]
    Variant::Avx512 => kernel_table!(Variant::Avx512, avx512),
    #[cfg(all(target_arch = "aarch64", target_endian = "little"))]
    Variant::Neon => kernel_table!(Variant::Neon, neon),
    _ => kernel_table!(Variant::Scalar, scalar),
  }
}
