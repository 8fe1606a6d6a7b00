//! Fuzz target for the runtime-family state handle.
//!
//! Random sequences of resets, updates, copies and digests must never panic
//! and must track a typed hasher driven by the same operations.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use xxh::{HashState, StateError, xxh3::Xxh3_64};

#[derive(Arbitrary, Debug)]
enum Op {
  Reset { seed: u64 },
  ResetOther { seed: u32 },
  Update(Vec<u8>),
  CopyToSpare,
  SwapWithSpare,
  Digest,
}

fuzz_target!(|ops: Vec<Op>| {
  let mut state = HashState::new();
  let mut spare = HashState::new();
  let mut model: Option<Xxh3_64> = None;
  let mut spare_model: Option<Xxh3_64> = None;

  for op in ops {
    match op {
      Op::Reset { seed } => {
        state.reset_xxh3_64(seed);
        model = Some(Xxh3_64::with_seed(seed));
      }
      Op::ResetOther { seed } => {
        state.reset_xxh32(seed);
        model = None;
      }
      Op::Update(data) => {
        let was_reset = state.is_reset();
        match state.update(&data) {
          Ok(()) => assert!(was_reset),
          Err(e) => assert_eq!(e, StateError::NotReset),
        }
        if let Some(m) = model.as_mut() {
          m.update(&data);
        }
      }
      Op::CopyToSpare => {
        if spare.copy_from(&state).is_ok() {
          spare_model = model.clone();
        }
      }
      Op::SwapWithSpare => {
        core::mem::swap(&mut state, &mut spare);
        core::mem::swap(&mut model, &mut spare_model);
      }
      Op::Digest => match (&model, state.digest64()) {
        (Some(m), Ok(d)) => assert_eq!(d, m.digest()),
        (Some(_), Err(e)) => panic!("xxh3-64 state failed to digest: {e}"),
        (None, _) => {}
      },
    }
  }
});
