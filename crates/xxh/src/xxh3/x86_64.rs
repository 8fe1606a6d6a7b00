//! x86_64 block mixing: SSE2 (baseline), AVX2 and AVX-512F.

mod avx2;
mod avx512;
mod sse2;

pub(crate) use avx2::Avx2;
pub(crate) use avx512::Avx512;
pub(crate) use sse2::Sse2;

#[cfg(test)]
mod tests {
  use super::{
    super::{INITIAL_ACC, STRIPE_LEN, kernels::Lanes, portable::Scalar},
    *,
  };

  fn stripe(seed: u8) -> [u8; STRIPE_LEN] {
    core::array::from_fn(|i| (i as u8).wrapping_mul(37).wrapping_add(seed))
  }

  fn check<L: Lanes>(lanes: L) {
    for round in 0u8..8 {
      let data = stripe(round);
      let key = stripe(round.wrapping_add(101));

      let mut expected = INITIAL_ACC;
      let mut actual = INITIAL_ACC;
      for _ in 0..3 {
        Scalar.accumulate_512(&mut expected, &data, &key);
        lanes.accumulate_512(&mut actual, &data, &key);
      }
      assert_eq!(actual, expected, "accumulate round={round}");

      Scalar.scramble(&mut expected, &key);
      lanes.scramble(&mut actual, &key);
      assert_eq!(actual, expected, "scramble round={round}");
    }
  }

  #[test]
  fn sse2_matches_scalar() {
    check(Sse2::new());
  }

  #[test]
  fn avx2_matches_scalar() {
    if !platform::caps().has(platform::caps::x86::AVX2_READY) {
      return;
    }
    // SAFETY: AVX2 support was just detected.
    check(unsafe { Avx2::new_unchecked() });
  }

  #[test]
  fn avx512_matches_scalar() {
    if !platform::caps().has(platform::caps::x86::AVX512_READY) {
      return;
    }
    // SAFETY: AVX-512F support was just detected.
    check(unsafe { Avx512::new_unchecked() });
  }
}
