//! Compile-time and runtime capability detection.
//!
//! [`caps_static`] is a `const fn` over `cfg!(target_feature)` and never
//! touches the CPU. [`caps`] adds runtime detection (feature `std`), cached in
//! a `OnceLock` after the first call. Under Miri, runtime detection reports
//! only the compile-time baseline.

use crate::caps::Caps;

// ─────────────────────────────────────────────────────────────────────────────
// Compile-Time Static Detection
// ─────────────────────────────────────────────────────────────────────────────

/// Capabilities known at compile time.
///
/// Reflects `-C target-feature=...` / `-C target-cpu=...`. The value is a
/// constant; the compiler eliminates every branch.
///
/// ```
/// use platform::caps_static;
///
/// const CAPS: platform::Caps = caps_static();
///
/// #[cfg(target_arch = "x86_64")]
/// assert!(CAPS.has(platform::caps::x86::SSE2));
/// #[cfg(target_arch = "aarch64")]
/// assert!(CAPS.has(platform::caps::aarch64::NEON));
/// ```
#[inline(always)]
#[must_use]
pub const fn caps_static() -> Caps {
  #[allow(unused_macros)]
  macro_rules! detect {
    ($caps:ident; $($feature:literal => $cap:expr),+ $(,)?) => {
      $(if cfg!(target_feature = $feature) { $caps = $caps.union($cap); })+
    };
  }

  #[allow(unused_mut)]
  let mut result = Caps::NONE;

  #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
  {
    use crate::caps::x86;

    detect!(result;
      "sse2" => x86::SSE2,
      "avx" => x86::AVX,
      "avx2" => x86::AVX2,
      "avx512f" => x86::AVX512F,
    );
  }

  #[cfg(target_arch = "aarch64")]
  {
    use crate::caps::aarch64;

    // NEON is part of the AArch64 baseline.
    result = result.union(aarch64::NEON);
  }

  result
}

// ─────────────────────────────────────────────────────────────────────────────
// Runtime Detection
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(all(feature = "std", not(miri)))]
#[cold]
fn detect_runtime() -> Caps {
  #[allow(unused_mut)]
  let mut caps = caps_static();

  #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
  {
    use crate::caps::x86;

    macro_rules! runtime {
      ($($feature:tt => $cap:expr),+ $(,)?) => {
        $(if std::arch::is_x86_feature_detected!($feature) { caps |= $cap; })+
      };
    }

    // std's detection already gates AVX/AVX-512 on OS XSAVE support.
    runtime!(
      "sse2" => x86::SSE2,
      "avx" => x86::AVX,
      "avx2" => x86::AVX2,
      "avx512f" => x86::AVX512F,
    );
  }

  caps
}

#[cfg(all(feature = "std", miri))]
fn detect_runtime() -> Caps {
  caps_static()
}

// ─────────────────────────────────────────────────────────────────────────────
// Cache + Override
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "std")]
static CACHE: std::sync::OnceLock<Caps> = std::sync::OnceLock::new();

#[cfg(feature = "std")]
static OVERRIDE: std::sync::RwLock<Option<Caps>> = std::sync::RwLock::new(None);

/// Capabilities of the running CPU.
///
/// With `std`, runtime detection runs once and is cached. An active
/// [`set_caps_override`] value can only narrow the result: it is intersected
/// with [`caps_detected`]. Without `std` this is [`caps_static`].
#[inline]
#[must_use]
pub fn caps() -> Caps {
  #[cfg(feature = "std")]
  {
    let detected = caps_detected();
    if let Ok(guard) = OVERRIDE.read()
      && let Some(ov) = *guard
    {
      return ov.intersection(detected);
    }
    detected
  }

  #[cfg(not(feature = "std"))]
  {
    caps_static()
  }
}

/// Capabilities the hardware reports, ignoring any override.
#[inline]
#[must_use]
pub fn caps_detected() -> Caps {
  #[cfg(feature = "std")]
  {
    *CACHE.get_or_init(detect_runtime)
  }

  #[cfg(not(feature = "std"))]
  {
    caps_static()
  }
}

/// Set or clear a capability override.
///
/// Later [`caps`] calls return `value` intersected with the detected
/// capabilities until it is cleared with `None`. Bits the CPU lacks are
/// dropped, so an override can disable kernels but never enable one the
/// hardware cannot run. Used to pin a kernel in tests and benchmarks. Callers that cache their own dispatch decision only observe the
/// override if it is set before that decision is made.
#[cfg(feature = "std")]
#[cold]
pub fn set_caps_override(value: Option<Caps>) {
  match OVERRIDE.write() {
    Ok(mut guard) => *guard = value,
    Err(poisoned) => *poisoned.into_inner() = value,
  }
}

/// Whether an override is currently active.
#[cfg(feature = "std")]
#[inline]
#[must_use]
pub fn has_override() -> bool {
  OVERRIDE.read().map(|g| g.is_some()).unwrap_or(false)
}
