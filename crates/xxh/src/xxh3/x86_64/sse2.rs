//! SSE2 block mixing, two lanes per register.
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - SSE2 is part of the x86_64 baseline, so the token is free to construct.

#![allow(unsafe_code)]

use core::arch::x86_64::{
  __m128i, _mm_add_epi64, _mm_loadu_si128, _mm_mul_epu32, _mm_set1_epi32, _mm_shuffle_epi32, _mm_slli_epi64,
  _mm_srli_epi64, _mm_storeu_si128, _mm_xor_si128,
};

use super::super::{Acc, PRIME32_1, STRIPE_LEN, kernels::Lanes};

/// `_MM_SHUFFLE(0, 3, 0, 1)`: high half of each 64-bit lane into the low half.
const HI_TO_LO: i32 = 0b00_11_00_01;
/// `_MM_SHUFFLE(1, 0, 3, 2)`: swap the two 64-bit lanes.
const SWAP_LANES: i32 = 0b01_00_11_10;

const VECTORS: usize = STRIPE_LEN / 16;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Sse2(());

impl Sse2 {
  #[inline(always)]
  pub(crate) const fn new() -> Self {
    Self(())
  }
}

impl Lanes for Sse2 {
  #[inline(always)]
  fn accumulate_512(self, acc: &mut Acc, stripe: &[u8; STRIPE_LEN], secret: &[u8; STRIPE_LEN]) {
    // SAFETY: SSE2 is always available on x86_64.
    unsafe { accumulate_512(acc, stripe, secret) }
  }

  #[inline(always)]
  fn scramble(self, acc: &mut Acc, secret: &[u8; STRIPE_LEN]) {
    // SAFETY: SSE2 is always available on x86_64.
    unsafe { scramble(acc, secret) }
  }
}

#[inline(always)]
unsafe fn accumulate_512(acc: &mut Acc, stripe: &[u8; STRIPE_LEN], secret: &[u8; STRIPE_LEN]) {
  let xacc = acc.as_mut_ptr().cast::<__m128i>();
  let xinput = stripe.as_ptr().cast::<__m128i>();
  let xsecret = secret.as_ptr().cast::<__m128i>();

  // SAFETY: all three buffers are 64 bytes, so `VECTORS` unaligned 16-byte
  // loads and stores stay in bounds.
  unsafe {
    for i in 0..VECTORS {
      let data_vec = _mm_loadu_si128(xinput.add(i));
      let key_vec = _mm_loadu_si128(xsecret.add(i));
      let data_key = _mm_xor_si128(data_vec, key_vec);
      let data_key_hi = _mm_shuffle_epi32(data_key, HI_TO_LO);
      let product = _mm_mul_epu32(data_key, data_key_hi);

      let data_swap = _mm_shuffle_epi32(data_vec, SWAP_LANES);
      let sum = _mm_add_epi64(_mm_loadu_si128(xacc.add(i)), data_swap);
      _mm_storeu_si128(xacc.add(i), _mm_add_epi64(product, sum));
    }
  }
}

#[inline(always)]
unsafe fn scramble(acc: &mut Acc, secret: &[u8; STRIPE_LEN]) {
  let xacc = acc.as_mut_ptr().cast::<__m128i>();
  let xsecret = secret.as_ptr().cast::<__m128i>();

  // SAFETY: both buffers are 64 bytes; see `accumulate_512`.
  unsafe {
    let prime32 = _mm_set1_epi32(PRIME32_1 as i32);
    for i in 0..VECTORS {
      let acc_vec = _mm_loadu_si128(xacc.add(i));
      let shifted = _mm_srli_epi64(acc_vec, 47);
      let data_vec = _mm_xor_si128(acc_vec, shifted);

      let key_vec = _mm_loadu_si128(xsecret.add(i));
      let data_key = _mm_xor_si128(data_vec, key_vec);

      let data_key_hi = _mm_shuffle_epi32(data_key, HI_TO_LO);
      let prod_lo = _mm_mul_epu32(data_key, prime32);
      let prod_hi = _mm_mul_epu32(data_key_hi, prime32);
      _mm_storeu_si128(xacc.add(i), _mm_add_epi64(prod_lo, _mm_slli_epi64(prod_hi, 32)));
    }
  }
}
