//! I/O adapters that hash bytes as they pass through.
//!
//! [`HashReader`] and [`HashWriter`] wrap any [`StreamingHash`](crate::StreamingHash)
//! so a file or socket can be fingerprinted while it is copied, without a
//! second pass over the data.
//!
//! # Example
//!
//! ```rust
//! # use traits::StreamingHash;
//! # #[derive(Clone, Default)]
//! # struct Sum(u32);
//! # impl StreamingHash for Sum {
//! #   const OUTPUT_SIZE: usize = 4;
//! #   type Output = u32;
//! #   fn update(&mut self, data: &[u8]) {
//! #     self.0 = data.iter().fold(self.0, |acc, &b| acc.wrapping_add(u32::from(b)));
//! #   }
//! #   fn digest(&self) -> Self::Output { self.0 }
//! #   fn reset(&mut self) { self.0 = 0; }
//! # }
//! use std::io::Cursor;
//! use traits::io::HashReader;
//!
//! let mut reader = HashReader::new(Cursor::new(b"abc".to_vec()), Sum::default());
//! std::io::copy(&mut reader, &mut std::io::sink())?;
//! assert_eq!(reader.digest(), u32::from(b'a') + u32::from(b'b') + u32::from(b'c'));
//! # Ok::<(), std::io::Error>(())
//! ```

#[cfg(feature = "std")]
use crate::StreamingHash;

#[cfg(feature = "std")]
#[inline]
fn read_and_update<R>(inner: &mut R, buf: &mut [u8], mut on_data: impl FnMut(&[u8])) -> std::io::Result<usize>
where
  R: std::io::Read,
{
  let n = inner.read(buf)?;
  if let Some(data) = buf.get(..n) {
    on_data(data);
  }
  Ok(n)
}

#[cfg(feature = "std")]
#[inline]
fn read_vectored_and_update<R>(
  inner: &mut R,
  bufs: &mut [std::io::IoSliceMut<'_>],
  mut on_data: impl FnMut(&[u8]),
) -> std::io::Result<usize>
where
  R: std::io::Read,
{
  let n = inner.read_vectored(bufs)?;
  let mut remaining = n;
  for buf in bufs {
    let to_hash = remaining.min(buf.len());
    if to_hash == 0 {
      break;
    }
    if let Some(data) = buf.get(..to_hash) {
      on_data(data);
    }
    remaining -= to_hash;
  }
  Ok(n)
}

/// Wraps a [`Read`](std::io::Read) and hashes every byte actually read.
///
/// Short reads are handled: only the `n` bytes returned by the inner reader are
/// absorbed.
#[cfg(feature = "std")]
#[derive(Clone)]
pub struct HashReader<R, H: StreamingHash> {
  inner: R,
  hasher: H,
}

#[cfg(feature = "std")]
impl<R, H: StreamingHash> HashReader<R, H> {
  /// Wrap `inner`, absorbing into `hasher` (which may already hold a prefix).
  #[inline]
  #[must_use]
  pub fn new(inner: R, hasher: H) -> Self {
    Self { inner, hasher }
  }

  /// Digest of the bytes read so far. Further reads keep updating it.
  #[inline]
  #[must_use]
  pub fn digest(&self) -> H::Output {
    self.hasher.digest()
  }

  /// Mutable access to the hasher.
  #[inline]
  pub fn hasher_mut(&mut self) -> &mut H {
    &mut self.hasher
  }

  /// Unwrap into the inner reader and the final digest.
  #[inline]
  pub fn into_parts(self) -> (R, H::Output) {
    let digest = self.hasher.digest();
    (self.inner, digest)
  }

  /// Unwrap into the inner reader, discarding the digest.
  #[inline]
  pub fn into_inner(self) -> R {
    self.inner
  }
}

#[cfg(feature = "std")]
impl<R: std::io::Read, H: StreamingHash> std::io::Read for HashReader<R, H> {
  #[inline]
  fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
    read_and_update(&mut self.inner, buf, |data| self.hasher.update(data))
  }

  #[inline]
  fn read_vectored(&mut self, bufs: &mut [std::io::IoSliceMut<'_>]) -> std::io::Result<usize> {
    read_vectored_and_update(&mut self.inner, bufs, |data| self.hasher.update(data))
  }
}

/// Wraps a [`Write`](std::io::Write) and hashes the bytes the inner writer accepted.
///
/// Only the prefix reported by the inner `write` is absorbed, so a short write
/// followed by a retry of the remainder hashes every byte exactly once.
#[cfg(feature = "std")]
#[derive(Clone)]
pub struct HashWriter<W, H: StreamingHash> {
  inner: W,
  hasher: H,
}

#[cfg(feature = "std")]
impl<W, H: StreamingHash> HashWriter<W, H> {
  /// Wrap `inner`, absorbing into `hasher`.
  #[inline]
  #[must_use]
  pub fn new(inner: W, hasher: H) -> Self {
    Self { inner, hasher }
  }

  /// Digest of the bytes written so far.
  #[inline]
  #[must_use]
  pub fn digest(&self) -> H::Output {
    self.hasher.digest()
  }

  /// Unwrap into the inner writer and the final digest.
  #[inline]
  pub fn into_parts(self) -> (W, H::Output) {
    let digest = self.hasher.digest();
    (self.inner, digest)
  }

  /// Unwrap into the inner writer, discarding the digest.
  #[inline]
  pub fn into_inner(self) -> W {
    self.inner
  }
}

#[cfg(feature = "std")]
impl<W: std::io::Write, H: StreamingHash> std::io::Write for HashWriter<W, H> {
  #[inline]
  fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
    let n = self.inner.write(buf)?;
    if let Some(written) = buf.get(..n) {
      self.hasher.update(written);
    }
    Ok(n)
  }

  #[inline]
  fn flush(&mut self) -> std::io::Result<()> {
    self.inner.flush()
  }
}

#[cfg(all(test, feature = "std"))]
mod tests {
  use std::{
    io::{Cursor, Read, Write},
    vec::Vec,
  };

  use super::*;

  #[derive(Clone, Default)]
  struct Sum(u64);

  impl StreamingHash for Sum {
    const OUTPUT_SIZE: usize = 8;
    type Output = u64;

    fn update(&mut self, data: &[u8]) {
      for &b in data {
        self.0 = self.0.wrapping_mul(31).wrapping_add(u64::from(b));
      }
    }

    fn digest(&self) -> u64 {
      self.0
    }

    fn reset(&mut self) {
      self.0 = 0;
    }
  }

  fn sum_of(data: &[u8]) -> u64 {
    let mut s = Sum::default();
    s.update(data);
    s.digest()
  }

  struct OneByteWriter(Vec<u8>);

  impl Write for OneByteWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
      match buf.first() {
        Some(&b) => {
          self.0.push(b);
          Ok(1)
        }
        None => Ok(0),
      }
    }

    fn flush(&mut self) -> std::io::Result<()> {
      Ok(())
    }
  }

  #[test]
  fn reader_hashes_exactly_what_was_read() {
    let data: Vec<u8> = (0..1000u32).map(|i| (i % 251) as u8).collect();
    let mut reader = HashReader::new(Cursor::new(data.clone()), Sum::default());
    let mut buf = [0u8; 7];
    let mut out = Vec::new();
    loop {
      let n = reader.read(&mut buf).unwrap();
      if n == 0 {
        break;
      }
      out.extend_from_slice(&buf[..n]);
    }
    assert_eq!(out, data);
    assert_eq!(reader.digest(), sum_of(&data));
  }

  #[test]
  fn writer_hashes_only_accepted_prefix() {
    let data = b"short writes must not double count";
    let mut writer = HashWriter::new(OneByteWriter(Vec::new()), Sum::default());
    writer.write_all(data).unwrap();
    let (inner, digest) = writer.into_parts();
    assert_eq!(inner.0, data.to_vec());
    assert_eq!(digest, sum_of(data));
  }
}
