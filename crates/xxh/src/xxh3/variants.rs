//! Per-variant entry points.
//!
//! Every module generated here has the same functions with the same
//! signatures. Modules for instruction sets outside the target baseline mark
//! them `unsafe` and compile them with the matching `target_feature`.

macro_rules! variant_module {
  (
    $(#[$module_meta:meta])*
    pub mod $name:ident {
      lanes: $lanes:expr,
      qualifiers: [$($qual:tt)*],
      $(#[$fn_meta:meta])*
    }
  ) => {
    $(#[$module_meta])*
    pub mod $name {
      use crate::{
        Hash128,
        xxh3::{Acc, STRIPE_LEN, long},
      };

      /// XXH3-64 of `data` with `seed`.
      $(#[$fn_meta])*
      #[inline]
      #[must_use]
      pub $($qual)* fn hash64(data: &[u8], seed: u64) -> u64 {
        crate::xxh3::hash64_seeded($lanes, data, seed)
      }

      /// XXH3-64 of `data` with seed 0.
      $(#[$fn_meta])*
      #[inline]
      #[must_use]
      pub $($qual)* fn hash64_unseeded(data: &[u8]) -> u64 {
        crate::xxh3::hash64_seeded($lanes, data, 0)
      }

      /// XXH3-128 of `data` with `seed`.
      $(#[$fn_meta])*
      #[inline]
      #[must_use]
      pub $($qual)* fn hash128(data: &[u8], seed: u64) -> Hash128 {
        crate::xxh3::hash128_seeded($lanes, data, seed)
      }

      /// XXH3-128 of `data` with seed 0.
      $(#[$fn_meta])*
      #[inline]
      #[must_use]
      pub $($qual)* fn hash128_unseeded(data: &[u8]) -> Hash128 {
        crate::xxh3::hash128_seeded($lanes, data, 0)
      }

      /// XXH3-64 of `data` keyed by `secret`.
      ///
      /// # Panics
      ///
      /// If `secret` is shorter than [`SECRET_SIZE_MIN`](crate::xxh3::SECRET_SIZE_MIN).
      $(#[$fn_meta])*
      #[inline]
      #[must_use]
      pub $($qual)* fn hash64_with_secret(data: &[u8], secret: &[u8]) -> u64 {
        crate::xxh3::hash64_with_custom_secret($lanes, data, secret)
      }

      /// XXH3-128 of `data` keyed by `secret`.
      ///
      /// # Panics
      ///
      /// If `secret` is shorter than [`SECRET_SIZE_MIN`](crate::xxh3::SECRET_SIZE_MIN).
      $(#[$fn_meta])*
      #[inline]
      #[must_use]
      pub $($qual)* fn hash128_with_secret(data: &[u8], secret: &[u8]) -> Hash128 {
        crate::xxh3::hash128_with_custom_secret($lanes, data, secret)
      }

      /// XXH3-64 keyed by `seed` up to 240 bytes and by `secret` beyond.
      ///
      /// # Panics
      ///
      /// If `secret` is shorter than [`SECRET_SIZE_MIN`](crate::xxh3::SECRET_SIZE_MIN).
      $(#[$fn_meta])*
      #[inline]
      #[must_use]
      pub $($qual)* fn hash64_with_secret_and_seed(data: &[u8], secret: &[u8], seed: u64) -> u64 {
        crate::xxh3::hash64_with_custom_secret_and_seed($lanes, data, secret, seed)
      }

      /// XXH3-128 keyed by `seed` up to 240 bytes and by `secret` beyond.
      ///
      /// # Panics
      ///
      /// If `secret` is shorter than [`SECRET_SIZE_MIN`](crate::xxh3::SECRET_SIZE_MIN).
      $(#[$fn_meta])*
      #[inline]
      #[must_use]
      pub $($qual)* fn hash128_with_secret_and_seed(data: &[u8], secret: &[u8], seed: u64) -> Hash128 {
        crate::xxh3::hash128_with_custom_secret_and_seed($lanes, data, secret, seed)
      }

      $(#[$fn_meta])*
      #[inline]
      pub(crate) $($qual)* fn consume_stripes(
        acc: &mut Acc,
        stripes_so_far: &mut usize,
        stripes_per_block: usize,
        input: &[u8],
        secret: &[u8],
      ) {
        long::consume_stripes($lanes, acc, stripes_so_far, stripes_per_block, input, secret);
      }

      $(#[$fn_meta])*
      #[inline]
      pub(crate) $($qual)* fn accumulate_512(acc: &mut Acc, stripe: &[u8; STRIPE_LEN], secret: &[u8; STRIPE_LEN]) {
        crate::xxh3::kernels::Lanes::accumulate_512($lanes, acc, stripe, secret);
      }
    }
  };
}

variant_module! {
  /// Portable scalar implementation. Safe on every target.
  pub mod scalar {
    lanes: crate::xxh3::portable::Scalar,
    qualifiers: [],
  }
}

variant_module! {
  /// SSE2 implementation. SSE2 is part of the x86_64 baseline.
  #[cfg(target_arch = "x86_64")]
  pub mod sse2 {
    lanes: crate::xxh3::x86_64::Sse2::new(),
    qualifiers: [],
  }
}

variant_module! {
  /// AVX2 implementation.
  #[cfg(target_arch = "x86_64")]
  pub mod avx2 {
    // SAFETY: every generated function is `unsafe` and requires AVX2.
    lanes: unsafe { crate::xxh3::x86_64::Avx2::new_unchecked() },
    qualifiers: [unsafe],
    #[doc = ""]
    #[doc = "# Safety"]
    #[doc = ""]
    #[doc = "The CPU must support AVX2."]
    #[target_feature(enable = "avx2")]
  }
}

variant_module! {
  /// AVX-512 implementation (AVX-512F only).
  #[cfg(target_arch = "x86_64")]
  pub mod avx512 {
    // SAFETY: every generated function is `unsafe` and requires AVX-512F.
    lanes: unsafe { crate::xxh3::x86_64::Avx512::new_unchecked() },
    qualifiers: [unsafe],
    #[doc = ""]
    #[doc = "# Safety"]
    #[doc = ""]
    #[doc = "The CPU must support AVX-512F."]
    #[target_feature(enable = "avx512f")]
  }
}

variant_module! {
  /// NEON implementation. NEON is part of the AArch64 baseline.
  #[cfg(all(target_arch = "aarch64", target_endian = "little"))]
  pub mod neon {
    lanes: crate::xxh3::aarch64::Neon::new(),
    qualifiers: [],
  }
}
