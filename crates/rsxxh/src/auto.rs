//! Runtime-dispatched XXH3.
//!
//! The first call detects the CPU, reads `RSXXH_XXH3_FORCE`, and caches the
//! chosen [`Variant`] for the life of the process. Every variant produces the
//! same digests, so the choice only affects speed.
//!
//! | `RSXXH_XXH3_FORCE` | Effect |
//! |--------------------|--------|
//! | unset, empty, `auto` | best variant the CPU supports |
//! | `scalar`, `portable` | scalar |
//! | `sse2`, `avx2`, `avx512`, `neon` | that variant, if compiled and supported; else `auto` |
//!
//! ```
//! let data = b"dispatched";
//! assert_eq!(rsxxh::auto::hash64(data, 0), rsxxh::xxh3::hash64(data, 0));
//! println!("{}", rsxxh::auto::DispatchInfo::current());
//! ```

use core::fmt;
use std::sync::OnceLock;

use platform::Caps;
use xxh::{
  Hash128, Xxh3_64, Xxh3_128,
  xxh3::{self, Kernel, Secret, Variant},
};

/// Environment variable that overrides automatic variant selection.
pub const FORCE_ENV: &str = "RSXXH_XXH3_FORCE";

/// Requested XXH3 variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Xxh3Force {
  /// Use the best variant the CPU supports.
  #[default]
  Auto,
  /// Force the scalar implementation.
  Scalar,
  Sse2,
  Avx2,
  Avx512,
  Neon,
}

impl Xxh3Force {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Scalar => "scalar",
      Self::Sse2 => "sse2",
      Self::Avx2 => "avx2",
      Self::Avx512 => "avx512",
      Self::Neon => "neon",
    }
  }

  /// Parse an override value, ignoring case and surrounding whitespace.
  ///
  /// Empty input means [`Xxh3Force::Auto`]; unknown names yield `None`.
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("auto") {
      return Some(Self::Auto);
    }
    let forced = [
      ("scalar", Self::Scalar),
      ("portable", Self::Scalar),
      ("sse2", Self::Sse2),
      ("avx2", Self::Avx2),
      ("avx512", Self::Avx512),
      ("avx512f", Self::Avx512),
      ("neon", Self::Neon),
    ];
    forced
      .into_iter()
      .find(|(name, _)| value.eq_ignore_ascii_case(name))
      .map(|(_, force)| force)
  }

  /// The variant this force names, or `None` for [`Xxh3Force::Auto`].
  #[must_use]
  pub const fn variant(self) -> Option<Variant> {
    match self {
      Self::Auto => None,
      Self::Scalar => Some(Variant::Scalar),
      Self::Sse2 => Some(Variant::Sse2),
      Self::Avx2 => Some(Variant::Avx2),
      Self::Avx512 => Some(Variant::Avx512),
      Self::Neon => Some(Variant::Neon),
    }
  }
}

impl fmt::Display for Xxh3Force {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Full XXH3 runtime configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Xxh3Config {
  /// Requested force mode (env).
  pub requested_force: Xxh3Force,
  /// Force mode clamped to compiled variants and detected CPU capabilities.
  pub effective_force: Xxh3Force,
  /// Variant used for inputs longer than 240 bytes.
  pub variant: Variant,
}

impl Xxh3Config {
  /// Resolve `requested` against `caps` without reading the environment.
  #[must_use]
  pub fn resolve(requested: Xxh3Force, caps: Caps) -> Self {
    let effective_force = clamp_force_to_caps(requested, caps);
    let variant = effective_force.variant().unwrap_or_else(|| best_variant(caps));
    Self {
      requested_force: requested,
      effective_force,
      variant,
    }
  }
}

fn runnable(variant: Variant, caps: Caps) -> bool {
  variant.is_compiled() && caps.has(variant.required_caps())
}

#[inline]
#[must_use]
fn clamp_force_to_caps(requested: Xxh3Force, caps: Caps) -> Xxh3Force {
  match requested.variant() {
    Some(v) if runnable(v, caps) => requested,
    _ => Xxh3Force::Auto,
  }
}

fn best_variant(caps: Caps) -> Variant {
  Variant::COMPILED
    .iter()
    .rev()
    .copied()
    .find(|&v| runnable(v, caps))
    .unwrap_or(Variant::Scalar)
}

fn read_env_force() -> Xxh3Force {
  std::env::var(FORCE_ENV)
    .ok()
    .and_then(|value| Xxh3Force::parse(&value))
    .unwrap_or_default()
}

/// Effective configuration for this process, computed on first use.
#[must_use]
pub fn config() -> Xxh3Config {
  static CONFIG: OnceLock<Xxh3Config> = OnceLock::new();
  *CONFIG.get_or_init(|| Xxh3Config::resolve(read_env_force(), platform::caps()))
}

fn active() -> Kernel {
  static KERNEL: OnceLock<Kernel> = OnceLock::new();
  *KERNEL.get_or_init(|| xxh3::kernel(config().variant))
}

/// Name of the variant [`hash64`]/[`hash128`] use for a `len`-byte input.
#[must_use]
pub fn kernel_name_for_len(len: usize) -> &'static str {
  if len <= 240 { Variant::Scalar.as_str() } else { config().variant.as_str() }
}

// ─── Single-shot ────────────────────────────────────────────────────────────

#[inline]
#[must_use]
pub fn hash64(data: &[u8], seed: u64) -> u64 {
  // SAFETY: `config()` only selects variants in `platform::caps()`, which never exceeds detection.
  unsafe { (active().hash64)(data, seed) }
}

#[inline]
#[must_use]
pub fn hash128(data: &[u8], seed: u64) -> Hash128 {
  // SAFETY: `config()` only selects variants in `platform::caps()`, which never exceeds detection.
  unsafe { (active().hash128)(data, seed) }
}

#[inline]
#[must_use]
pub fn hash64_with_secret(data: &[u8], secret: Secret<'_>) -> u64 {
  // SAFETY: `config()` only selects variants in `platform::caps()`, which never exceeds detection.
  unsafe { (active().hash64_with_secret)(data, secret.as_bytes()) }
}

#[inline]
#[must_use]
pub fn hash128_with_secret(data: &[u8], secret: Secret<'_>) -> Hash128 {
  // SAFETY: `config()` only selects variants in `platform::caps()`, which never exceeds detection.
  unsafe { (active().hash128_with_secret)(data, secret.as_bytes()) }
}

#[inline]
#[must_use]
pub fn hash64_with_secret_and_seed(data: &[u8], secret: Secret<'_>, seed: u64) -> u64 {
  // SAFETY: `config()` only selects variants in `platform::caps()`, which never exceeds detection.
  unsafe { (active().hash64_with_secret_and_seed)(data, secret.as_bytes(), seed) }
}

#[inline]
#[must_use]
pub fn hash128_with_secret_and_seed(data: &[u8], secret: Secret<'_>, seed: u64) -> Hash128 {
  // SAFETY: `config()` only selects variants in `platform::caps()`, which never exceeds detection.
  unsafe { (active().hash128_with_secret_and_seed)(data, secret.as_bytes(), seed) }
}

// ─── Streaming ──────────────────────────────────────────────────────────────

fn dispatched<H>(mut hasher: H, set: unsafe fn(&mut H, Variant)) -> H {
  // SAFETY: `config()` only selects variants in `platform::caps()`, which never exceeds detection.
  unsafe { set(&mut hasher, config().variant) };
  hasher
}

/// Seeded [`Xxh3_64`] mixing through the dispatched variant.
#[must_use]
pub fn xxh3_64(seed: u64) -> Xxh3_64 {
  dispatched(Xxh3_64::with_seed(seed), Xxh3_64::set_variant)
}

/// Seeded [`Xxh3_128`] mixing through the dispatched variant.
#[must_use]
pub fn xxh3_128(seed: u64) -> Xxh3_128 {
  dispatched(Xxh3_128::with_seed(seed), Xxh3_128::set_variant)
}

#[must_use]
pub fn xxh3_64_with_secret(secret: Secret<'_>) -> Xxh3_64 {
  dispatched(Xxh3_64::with_secret(secret), Xxh3_64::set_variant)
}

#[must_use]
pub fn xxh3_128_with_secret(secret: Secret<'_>) -> Xxh3_128 {
  dispatched(Xxh3_128::with_secret(secret), Xxh3_128::set_variant)
}

/// Secret + seed [`Xxh3_64`]: seeded default-secret digest up to 240 bytes,
/// custom-secret digest beyond.
#[must_use]
pub fn xxh3_64_with_secret_and_seed(secret: Secret<'_>, seed: u64) -> Xxh3_64 {
  dispatched(Xxh3_64::with_secret_and_seed(secret, seed), Xxh3_64::set_variant)
}

#[must_use]
pub fn xxh3_128_with_secret_and_seed(secret: Secret<'_>, seed: u64) -> Xxh3_128 {
  dispatched(Xxh3_128::with_secret_and_seed(secret, seed), Xxh3_128::set_variant)
}

// ─── Introspection ──────────────────────────────────────────────────────────

/// Detected capabilities plus the XXH3 selection made from them.
///
/// ```
/// use rsxxh::DispatchInfo;
///
/// let info = DispatchInfo::current();
/// println!("{info}");
/// // Example output: "Caps(x86_64, [SSE2, ...]); xxh3=avx2 (requested auto)"
/// ```
#[derive(Clone, Copy)]
pub struct DispatchInfo {
  caps: Caps,
  config: Xxh3Config,
}

impl DispatchInfo {
  #[inline]
  #[must_use]
  pub fn current() -> Self {
    Self {
      caps: platform::caps(),
      config: config(),
    }
  }

  #[inline]
  #[must_use]
  pub fn caps(&self) -> Caps {
    self.caps
  }

  #[inline]
  #[must_use]
  pub fn config(&self) -> Xxh3Config {
    self.config
  }
}

impl fmt::Display for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}; xxh3={} (requested {})",
      self.caps, self.config.variant, self.config.requested_force
    )
  }
}

impl fmt::Debug for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DispatchInfo")
      .field("caps", &format_args!("{}", self.caps))
      .field("config", &self.config)
      .finish()
  }
}
