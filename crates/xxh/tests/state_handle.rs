use proptest::prelude::*;
use xxh::{
  HashState, StateError,
  xxh3::{self, SECRET_SIZE_MIN, Variant},
};

#[test]
fn lifecycle_across_families() {
  let mut state = HashState::new();
  assert_eq!(state.update(b"too early"), Err(StateError::NotReset));

  state.reset_xxh32(7);
  state.update(b"abc").unwrap();
  assert_eq!(state.family(), Some("xxh32"));
  assert_eq!(state.digest32().unwrap(), xxhash_rust::xxh32::xxh32(b"abc", 7));

  state.reset_xxh64(7);
  state.update(b"abc").unwrap();
  assert_eq!(state.digest64().unwrap(), xxhash_rust::xxh64::xxh64(b"abc", 7));

  state.reset_xxh3_64_unseeded();
  state.update(b"abc").unwrap();
  assert_eq!(state.digest64().unwrap(), xxhash_rust::xxh3::xxh3_64(b"abc"));

  state.reset_xxh3_128(7);
  state.update(b"abc").unwrap();
  assert_eq!(
    state.digest128().unwrap().as_u128(),
    xxhash_rust::xxh3::xxh3_128_with_seed(b"abc", 7)
  );
}

#[test]
fn wrong_family_digest_is_an_error() {
  let mut state = HashState::new();
  state.reset_xxh64(0);
  let err = state.digest32().unwrap_err();
  assert_eq!(
    err,
    StateError::FamilyMismatch {
      expected: "xxh32",
      found: "xxh64"
    }
  );
  // The state is still usable after a mismatched request.
  state.update(b"x").unwrap();
  assert_eq!(state.digest64().unwrap(), xxh::xxh64::xxh64(b"x", 0));
}

#[test]
fn copy_state_branches() {
  let mut a = HashState::new();
  a.reset_xxh3_128(0);
  a.update(b"xxhash-wrapper").unwrap();

  let mut b = HashState::new();
  b.reset_xxh32(1);
  b.copy_from(&a).unwrap();
  assert_eq!(b.family(), Some("xxh3-128"));

  a.update(b"A").unwrap();
  a.update(b"B").unwrap();
  b.update(b"AB").unwrap();
  assert_eq!(a.digest128().unwrap(), b.digest128().unwrap());
}

#[test]
fn undersized_secret_is_rejected() {
  let short = [0u8; SECRET_SIZE_MIN - 1];
  let mut state = HashState::new();
  assert!(matches!(
    state.reset_xxh3_64_with_secret(&short),
    Err(StateError::SecretTooShort { .. })
  ));
  assert!(!state.is_reset());

  let ok = [0x11u8; SECRET_SIZE_MIN];
  state.reset_xxh3_64_with_secret(&ok).unwrap();
  state.update(&[1u8; 500]).unwrap();
  assert_eq!(
    state.digest64().unwrap(),
    xxhash_rust::xxh3::xxh3_64_with_secret(&[1u8; 500], &ok)
  );
}

#[test]
fn variant_choice_does_not_change_digests() {
  let data = vec![0x42u8; 4096];
  let caps = platform::caps();
  for &variant in Variant::COMPILED {
    if !caps.has(variant.required_caps()) {
      continue;
    }
    let mut state = HashState::new();
    state.reset_xxh3_64(3);
    // SAFETY: checked against runtime caps above.
    unsafe { state.set_variant(variant) };
    state.update(&data).unwrap();
    assert_eq!(state.digest64().unwrap(), xxh3::hash64(&data, 3), "variant={variant}");
  }
}

#[test]
fn error_display_is_informative() {
  let msg = StateError::SecretTooShort { len: 10, min: 136 }.to_string();
  assert!(msg.contains("10"));
  assert!(msg.contains("136"));
}

proptest! {
  #[test]
  fn handle_matches_typed_hashers(
    seed in any::<u64>(),
    data in proptest::collection::vec(any::<u8>(), 0..1500),
    split in 0usize..1500,
  ) {
    let split = split.min(data.len());
    let mut state = HashState::new();
    state.reset_xxh3_64(seed);
    state.update(&data[..split]).unwrap();
    state.update(&data[split..]).unwrap();
    prop_assert_eq!(state.digest64().unwrap(), xxh3::hash64(&data, seed));

    state.reset_xxh3_128(seed);
    state.update(&data).unwrap();
    prop_assert_eq!(state.digest128().unwrap(), xxh3::hash128(&data, seed));
  }
}
