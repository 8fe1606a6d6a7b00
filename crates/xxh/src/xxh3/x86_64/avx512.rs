//! AVX-512F block mixing: the whole stripe in one register.
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - The `Avx512` token may only exist once AVX-512F support is established.

#![allow(unsafe_code)]

use core::arch::x86_64::{
  _mm512_add_epi64, _mm512_loadu_si512, _mm512_mul_epu32, _mm512_permutexvar_epi64, _mm512_set_epi64,
  _mm512_set1_epi32, _mm512_slli_epi64, _mm512_srli_epi64, _mm512_storeu_si512, _mm512_xor_si512,
};

use super::super::{Acc, PRIME32_1, STRIPE_LEN, kernels::Lanes};

#[derive(Clone, Copy, Debug)]
pub(crate) struct Avx512(());

impl Avx512 {
  /// # Safety
  ///
  /// The CPU must support AVX-512F.
  #[inline(always)]
  pub(crate) const unsafe fn new_unchecked() -> Self {
    Self(())
  }
}

impl Lanes for Avx512 {
  #[inline(always)]
  fn accumulate_512(self, acc: &mut Acc, stripe: &[u8; STRIPE_LEN], secret: &[u8; STRIPE_LEN]) {
    // SAFETY: constructing `Avx512` required AVX-512F support.
    unsafe { accumulate_512(acc, stripe, secret) }
  }

  #[inline(always)]
  fn scramble(self, acc: &mut Acc, secret: &[u8; STRIPE_LEN]) {
    // SAFETY: constructing `Avx512` required AVX-512F support.
    unsafe { scramble(acc, secret) }
  }
}

#[inline]
#[target_feature(enable = "avx512f")]
unsafe fn accumulate_512(acc: &mut Acc, stripe: &[u8; STRIPE_LEN], secret: &[u8; STRIPE_LEN]) {
  // SAFETY: each buffer is exactly one 64-byte vector; loads and stores are
  // unaligned.
  unsafe {
    let data_vec = _mm512_loadu_si512(stripe.as_ptr().cast());
    let key_vec = _mm512_loadu_si512(secret.as_ptr().cast());
    let data_key = _mm512_xor_si512(data_vec, key_vec);
    let data_key_hi = _mm512_srli_epi64(data_key, 32);
    let product = _mm512_mul_epu32(data_key, data_key_hi);

    // Lane i receives data lane i ^ 1.
    let swap = _mm512_set_epi64(6, 7, 4, 5, 2, 3, 0, 1);
    let data_swap = _mm512_permutexvar_epi64(swap, data_vec);
    let sum = _mm512_add_epi64(_mm512_loadu_si512(acc.as_ptr().cast()), data_swap);
    _mm512_storeu_si512(acc.as_mut_ptr().cast(), _mm512_add_epi64(product, sum));
  }
}

#[inline]
#[target_feature(enable = "avx512f")]
unsafe fn scramble(acc: &mut Acc, secret: &[u8; STRIPE_LEN]) {
  // SAFETY: see `accumulate_512`.
  unsafe {
    let acc_vec = _mm512_loadu_si512(acc.as_ptr().cast());
    let key_vec = _mm512_loadu_si512(secret.as_ptr().cast());
    let shifted = _mm512_srli_epi64(acc_vec, 47);
    let data_key = _mm512_xor_si512(_mm512_xor_si512(acc_vec, shifted), key_vec);

    let prime32 = _mm512_set1_epi32(PRIME32_1 as i32);
    let data_key_hi = _mm512_srli_epi64(data_key, 32);
    let prod_lo = _mm512_mul_epu32(data_key, prime32);
    let prod_hi = _mm512_mul_epu32(data_key_hi, prime32);
    _mm512_storeu_si512(acc.as_mut_ptr().cast(), _mm512_add_epi64(prod_lo, _mm512_slli_epi64(prod_hi, 32)));
  }
}
