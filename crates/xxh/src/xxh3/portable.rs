//! Scalar block mixing. Runs everywhere and defines the reference result.

use super::{ACC_NB, Acc, PRIME32_1, STRIPE_LEN, kernels::Lanes, mult32_to64, xorshift64};

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Scalar;

impl Lanes for Scalar {
  #[inline(always)]
  fn accumulate_512(self, acc: &mut Acc, stripe: &[u8; STRIPE_LEN], secret: &[u8; STRIPE_LEN]) {
    let (data_words, _) = stripe.as_chunks::<8>();
    let (key_words, _) = secret.as_chunks::<8>();

    for idx in 0..ACC_NB {
      let data_val = u64::from_le_bytes(data_words[idx]);
      let data_key = data_val ^ u64::from_le_bytes(key_words[idx]);

      acc[idx ^ 1] = acc[idx ^ 1].wrapping_add(data_val);
      acc[idx] = acc[idx].wrapping_add(mult32_to64(data_key as u32, (data_key >> 32) as u32));
    }
  }

  #[inline(always)]
  fn scramble(self, acc: &mut Acc, secret: &[u8; STRIPE_LEN]) {
    let (key_words, _) = secret.as_chunks::<8>();

    for (lane, key) in acc.iter_mut().zip(key_words) {
      let mixed = xorshift64(*lane, 47) ^ u64::from_le_bytes(*key);
      *lane = mixed.wrapping_mul(u64::from(PRIME32_1));
    }
  }
}
