//! Re-encoding a document with only some of its chunks.

use std::io::{Read, Write};

use log::debug;

use super::*;

/// Decides which chunks survive a strip.
///
/// By default only the critical chunks are kept, which is all a decoder needs
/// to get the pixels back. Other kinds can be kept too, for example
/// [`Transparency`](ChunkKind::Transparency) if you'd like to keep the alpha
/// of a paletted image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stripper {
  keep: Vec<ChunkKind>,
}
impl Default for Stripper {
  #[inline]
  fn default() -> Self {
    Self { keep: ChunkKind::CRITICAL.to_vec() }
  }
}
impl Stripper {
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Also keep chunks of this kind.
  #[inline]
  #[must_use]
  pub fn keep(mut self, kind: ChunkKind) -> Self {
    if !self.keep.contains(&kind) {
      self.keep.push(kind);
    }
    self
  }

  #[inline]
  #[must_use]
  pub fn keeps(&self, kind: ChunkKind) -> bool {
    self.keep.contains(&kind)
  }

  /// A reader that produces the stripped PNG bytes on demand.
  #[inline]
  #[must_use]
  pub fn reader<'d>(&self, doc: &'d PngDocument) -> StripReader<'d> {
    StripReader {
      keep: self.keep.clone(),
      remaining: doc.chunks().iter(),
      head: PNG_SIGNATURE,
      part: Part::Head { pos: 0, chunk: None },
    }
  }

  /// Writes the stripped PNG to `dest`, giving the number of bytes written.
  ///
  /// ## Failure
  /// * [`PngError::Io`] if `dest` fails. Whatever was written before the
  ///   failure stays written, so you probably want to throw `dest` away.
  pub fn write_to<W: Write>(&self, doc: &PngDocument, mut dest: W) -> PngResult<u64> {
    let total = std::io::copy(&mut self.reader(doc), &mut dest)?;
    dest.flush()?;
    Ok(total)
  }
}

/// Strips all ancillary and unknown chunks, see [`Stripper`].
#[inline]
#[must_use]
pub fn strip(doc: &PngDocument) -> StripReader<'_> {
  Stripper::default().reader(doc)
}

/// Pushes the output of [`strip`] into `dest`.
#[inline]
pub fn strip_to<W: Write>(doc: &PngDocument, dest: W) -> PngResult<u64> {
  Stripper::default().write_to(doc, dest)
}

/// Which part of the output is being handed out next.
#[derive(Debug, Clone, Copy)]
enum Part<'d> {
  /// The staged `head` bytes. With no chunk that's the signature, otherwise
  /// it's the chunk's length and type code.
  Head { pos: usize, chunk: Option<&'d Chunk> },
  Data { pos: usize, chunk: &'d Chunk },
  Crc { pos: usize, chunk: &'d Chunk },
  /// Between chunks.
  Next,
  Done,
}

/// The bytes of a stripped PNG, made as they're read.
///
/// The signature comes first, then each kept chunk as length, type code,
/// data, and CRC. The type code written is the standard code for the chunk's
/// kind, and the CRC is copied from the source unchanged. Chunk data is
/// copied straight out of the document, so there's never a second copy of a
/// big `IDAT` in memory.
///
/// Once it has given `Ok(0)` it stays done: there's no way to rewind it.
#[derive(Debug, Clone)]
pub struct StripReader<'d> {
  keep: Vec<ChunkKind>,
  remaining: core::slice::Iter<'d, Chunk>,
  head: [u8; 8],
  part: Part<'d>,
}
impl<'d> StripReader<'d> {
  fn next_kept(&mut self) -> Option<&'d Chunk> {
    for chunk in self.remaining.by_ref() {
      if self.keep.contains(&chunk.kind()) {
        debug!("keeping {} ({} bytes)", chunk.code(), chunk.length());
        return Some(chunk);
      }
      debug!("dropping {} ({} bytes)", chunk.code(), chunk.length());
    }
    None
  }
}
impl Read for StripReader<'_> {
  fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
    if buf.is_empty() {
      return Ok(0);
    }
    loop {
      match self.part {
        Part::Head { pos, chunk } => {
          if pos < self.head.len() {
            let n = copy_some(&self.head[pos..], buf);
            self.part = Part::Head { pos: pos + n, chunk };
            return Ok(n);
          }
          self.part = match chunk {
            Some(chunk) => Part::Data { pos: 0, chunk },
            None => Part::Next,
          };
        }
        Part::Data { pos, chunk } => {
          if pos < chunk.data().len() {
            let n = copy_some(&chunk.data()[pos..], buf);
            self.part = Part::Data { pos: pos + n, chunk };
            return Ok(n);
          }
          self.part = Part::Crc { pos: 0, chunk };
        }
        Part::Crc { pos, chunk } => {
          let crc = chunk.crc();
          if pos < crc.len() {
            let n = copy_some(&crc[pos..], buf);
            self.part = Part::Crc { pos: pos + n, chunk };
            return Ok(n);
          }
          self.part = Part::Next;
        }
        Part::Next => {
          self.part = match self.next_kept() {
            Some(chunk) => {
              let code = chunk.kind().canonical_code().unwrap_or(chunk.code());
              self.head[..4].copy_from_slice(&chunk.length().to_be_bytes());
              self.head[4..].copy_from_slice(code.as_bytes());
              Part::Head { pos: 0, chunk: Some(chunk) }
            }
            None => Part::Done,
          };
        }
        Part::Done => return Ok(0),
      }
    }
  }
}

#[inline]
fn copy_some(src: &[u8], dest: &mut [u8]) -> usize {
  let n = src.len().min(dest.len());
  dest[..n].copy_from_slice(&src[..n]);
  n
}
