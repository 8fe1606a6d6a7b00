//! AVX2 block mixing, four lanes per register.
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - The `Avx2` token may only exist once AVX2 support is established.

#![allow(unsafe_code)]

use core::arch::x86_64::{
  __m256i, _mm256_add_epi64, _mm256_loadu_si256, _mm256_mul_epu32, _mm256_set1_epi32, _mm256_shuffle_epi32,
  _mm256_slli_epi64, _mm256_srli_epi64, _mm256_storeu_si256, _mm256_xor_si256,
};

use super::super::{Acc, PRIME32_1, STRIPE_LEN, kernels::Lanes};

const HI_TO_LO: i32 = 0b00_11_00_01;
const SWAP_LANES: i32 = 0b01_00_11_10;

const VECTORS: usize = STRIPE_LEN / 32;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Avx2(());

impl Avx2 {
  /// # Safety
  ///
  /// The CPU must support AVX2.
  #[inline(always)]
  pub(crate) const unsafe fn new_unchecked() -> Self {
    Self(())
  }
}

impl Lanes for Avx2 {
  #[inline(always)]
  fn accumulate_512(self, acc: &mut Acc, stripe: &[u8; STRIPE_LEN], secret: &[u8; STRIPE_LEN]) {
    // SAFETY: constructing `Avx2` required AVX2 support.
    unsafe { accumulate_512(acc, stripe, secret) }
  }

  #[inline(always)]
  fn scramble(self, acc: &mut Acc, secret: &[u8; STRIPE_LEN]) {
    // SAFETY: constructing `Avx2` required AVX2 support.
    unsafe { scramble(acc, secret) }
  }
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn accumulate_512(acc: &mut Acc, stripe: &[u8; STRIPE_LEN], secret: &[u8; STRIPE_LEN]) {
  let xacc = acc.as_mut_ptr().cast::<__m256i>();
  let xinput = stripe.as_ptr().cast::<__m256i>();
  let xsecret = secret.as_ptr().cast::<__m256i>();

  // SAFETY: all three buffers are 64 bytes, so `VECTORS` unaligned 32-byte
  // loads and stores stay in bounds.
  unsafe {
    for i in 0..VECTORS {
      let data_vec = _mm256_loadu_si256(xinput.add(i));
      let key_vec = _mm256_loadu_si256(xsecret.add(i));
      let data_key = _mm256_xor_si256(data_vec, key_vec);
      let data_key_hi = _mm256_shuffle_epi32(data_key, HI_TO_LO);
      let product = _mm256_mul_epu32(data_key, data_key_hi);

      let data_swap = _mm256_shuffle_epi32(data_vec, SWAP_LANES);
      let sum = _mm256_add_epi64(_mm256_loadu_si256(xacc.add(i)), data_swap);
      _mm256_storeu_si256(xacc.add(i), _mm256_add_epi64(product, sum));
    }
  }
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn scramble(acc: &mut Acc, secret: &[u8; STRIPE_LEN]) {
  let xacc = acc.as_mut_ptr().cast::<__m256i>();
  let xsecret = secret.as_ptr().cast::<__m256i>();

  // SAFETY: both buffers are 64 bytes; see `accumulate_512`.
  unsafe {
    let prime32 = _mm256_set1_epi32(PRIME32_1 as i32);
    for i in 0..VECTORS {
      let acc_vec = _mm256_loadu_si256(xacc.add(i));
      let shifted = _mm256_srli_epi64(acc_vec, 47);
      let data_vec = _mm256_xor_si256(acc_vec, shifted);

      let key_vec = _mm256_loadu_si256(xsecret.add(i));
      let data_key = _mm256_xor_si256(data_vec, key_vec);

      let data_key_hi = _mm256_shuffle_epi32(data_key, HI_TO_LO);
      let prod_lo = _mm256_mul_epu32(data_key, prime32);
      let prod_hi = _mm256_mul_epu32(data_key_hi, prime32);
      _mm256_storeu_si256(xacc.add(i), _mm256_add_epi64(prod_lo, _mm256_slli_epi64(prod_hi, 32)));
    }
  }
}
