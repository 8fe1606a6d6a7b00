//! NEON block mixing, two lanes per register.
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - NEON is part of the AArch64 baseline, so the token is free to construct.
//! - Lane loads assume a little-endian target.

#![allow(unsafe_code)]

use core::arch::aarch64::{
  vaddq_u64, vcombine_u64, vdup_n_u32, vdupq_n_s64, veorq_u64, vget_high_u64, vget_low_u64, vld1q_u8, vld1q_u64,
  vmlal_u32, vmovn_u64, vmull_u32, vreinterpretq_u64_u8, vshlq_u64, vst1q_u64,
};

use super::{Acc, PRIME32_1, STRIPE_LEN, kernels::Lanes};

const VECTORS: usize = STRIPE_LEN / 16;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Neon(());

impl Neon {
  #[inline(always)]
  pub(crate) const fn new() -> Self {
    Self(())
  }
}

impl Lanes for Neon {
  #[inline(always)]
  fn accumulate_512(self, acc: &mut Acc, stripe: &[u8; STRIPE_LEN], secret: &[u8; STRIPE_LEN]) {
    // SAFETY: NEON is always available on AArch64.
    unsafe { accumulate_512(acc, stripe, secret) }
  }

  #[inline(always)]
  fn scramble(self, acc: &mut Acc, secret: &[u8; STRIPE_LEN]) {
    // SAFETY: NEON is always available on AArch64.
    unsafe { scramble(acc, secret) }
  }
}

#[inline(always)]
unsafe fn accumulate_512(acc: &mut Acc, stripe: &[u8; STRIPE_LEN], secret: &[u8; STRIPE_LEN]) {
  // SAFETY: all three buffers are 64 bytes, so `VECTORS` 16-byte loads and
  // stores stay in bounds.
  unsafe {
    for i in 0..VECTORS {
      let acc_ptr = acc.as_mut_ptr().add(2 * i);
      let data_vec = vreinterpretq_u64_u8(vld1q_u8(stripe.as_ptr().add(16 * i)));
      let key_vec = vreinterpretq_u64_u8(vld1q_u8(secret.as_ptr().add(16 * i)));
      let data_key = veorq_u64(data_vec, key_vec);

      let data_swap = vcombine_u64(vget_high_u64(data_vec), vget_low_u64(data_vec));
      let sum = vaddq_u64(vld1q_u64(acc_ptr), data_swap);

      let key_lo = vmovn_u64(data_key);
      let key_hi = vmovn_u64(vshlq_u64(data_key, vdupq_n_s64(-32)));
      vst1q_u64(acc_ptr, vmlal_u32(sum, key_lo, key_hi));
    }
  }
}

#[inline(always)]
unsafe fn scramble(acc: &mut Acc, secret: &[u8; STRIPE_LEN]) {
  // SAFETY: both buffers are 64 bytes; see `accumulate_512`.
  unsafe {
    let prime32 = vdup_n_u32(PRIME32_1);
    for i in 0..VECTORS {
      let acc_ptr = acc.as_mut_ptr().add(2 * i);
      let mut acc_vec = vld1q_u64(acc_ptr);
      acc_vec = veorq_u64(acc_vec, vshlq_u64(acc_vec, vdupq_n_s64(-47)));
      acc_vec = veorq_u64(acc_vec, vreinterpretq_u64_u8(vld1q_u8(secret.as_ptr().add(16 * i))));

      let lo = vmovn_u64(acc_vec);
      let hi = vmovn_u64(vshlq_u64(acc_vec, vdupq_n_s64(-32)));
      let prod_hi = vshlq_u64(vmull_u32(hi, prime32), vdupq_n_s64(32));
      vst1q_u64(acc_ptr, vmlal_u32(prod_hi, lo, prime32));
    }
  }
}
