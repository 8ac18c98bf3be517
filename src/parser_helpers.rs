#![forbid(unsafe_code)]

//! Shorthands for pulling fixed-size fields out of a byte stream.

use std::io::{ErrorKind, Read};

/// Reads into `buf` until it's full or the source hits end of input.
///
/// Returns how many bytes were actually placed in `buf`. Unlike
/// `read_exact`, a short count is not an error, so the caller can tell a
/// clean end of input (0) from a cut-off field.
pub(crate) fn read_up_to<R: Read + ?Sized>(
  source: &mut R, buf: &mut [u8],
) -> std::io::Result<usize> {
  let mut filled = 0;
  while filled < buf.len() {
    match source.read(&mut buf[filled..]) {
      Ok(0) => break,
      Ok(n) => filled += n,
      Err(e) if e.kind() == ErrorKind::Interrupted => continue,
      Err(e) => return Err(e),
    }
  }
  Ok(filled)
}

/// Pulls an `N` byte array, also giving how many bytes were really read.
///
/// Any bytes past the count are left as zero.
pub(crate) fn try_pull_byte_array<const N: usize, R: Read + ?Sized>(
  source: &mut R,
) -> std::io::Result<([u8; N], usize)> {
  let mut a = [0_u8; N];
  let count = read_up_to(source, &mut a)?;
  Ok((a, count))
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Hands out one byte per `read` call, and throws in an `Interrupted` first.
  struct Trickle<'b> {
    bytes: &'b [u8],
    interrupted: bool,
  }
  impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
      if !self.interrupted {
        self.interrupted = true;
        return Err(ErrorKind::Interrupted.into());
      }
      match (self.bytes, buf) {
        ([b, rest @ ..], [out, ..]) => {
          *out = *b;
          self.bytes = rest;
          Ok(1)
        }
        _ => Ok(0),
      }
    }
  }

  #[test]
  fn test_pull_across_short_reads() {
    let mut src = Trickle { bytes: &[1, 2, 3, 4, 5], interrupted: false };
    assert_eq!(try_pull_byte_array::<4, _>(&mut src).unwrap(), ([1, 2, 3, 4], 4));
    assert_eq!(try_pull_byte_array::<4, _>(&mut src).unwrap(), ([5, 0, 0, 0], 1));
    assert_eq!(try_pull_byte_array::<4, _>(&mut src).unwrap(), ([0, 0, 0, 0], 0));
  }
}
