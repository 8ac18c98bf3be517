use std::io::{Chain, Cursor, ErrorKind, Read};

use log::{debug, trace, warn};

use crate::parser_helpers::try_pull_byte_array;

use super::*;

/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// The largest data length PNG allows a chunk to declare (2^31 - 1).
///
/// Not enforced by default, set it as [`ParseOptions::max_chunk_len`] to get
/// that check.
pub const PNG_MAX_CHUNK_LEN: u32 = (1 << 31) - 1;

/// What to do when the input ends partway through a chunk's data or CRC.
///
/// Running out of input right where a chunk *would* start is always just
/// the end of the stream, and running out in the middle of a length or type
/// code is always [`PngError::TruncatedChunk`]. This only covers the data and
/// CRC fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TruncationPolicy {
  /// End the chunk sequence without an error. The partial chunk is kept
  /// aside as the document's [truncated tail](PngDocument::truncated_tail).
  #[default]
  Lenient,
  /// Fail with [`PngError::TruncatedChunk`].
  Strict,
}

/// Knobs for the chunk reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseOptions {
  /// What a chunk cut off partway through its data or CRC means.
  pub truncation: TruncationPolicy,
  /// Chunks declaring more data than this fail with
  /// [`PngError::ChunkTooLarge`] before any of their data is read.
  ///
  /// Defaults to `u32::MAX`, so no length is refused. The data buffer only
  /// grows as bytes actually arrive, so a huge declared length on a short
  /// input just ends up as a truncated chunk.
  pub max_chunk_len: u32,
}
impl Default for ParseOptions {
  #[inline]
  fn default() -> Self {
    Self { truncation: TruncationPolicy::Lenient, max_chunk_len: u32::MAX }
  }
}

/// Reads PNG chunks from any sequential byte source.
///
/// The source is only ever read forward. For efficiency you'll usually want
/// to give this a [`BufReader`](std::io::BufReader) rather than a bare file,
/// since fields are pulled a few bytes at a time.
#[derive(Debug)]
pub struct PngReader<R> {
  source: R,
  /// The bytes peeked by `check_signature`, and how many of them are real.
  peeked: Option<([u8; 8], usize)>,
  options: ParseOptions,
}
impl<R: Read> PngReader<R> {
  #[inline]
  #[must_use]
  pub fn new(source: R) -> Self {
    Self::with_options(source, ParseOptions::default())
  }

  #[inline]
  #[must_use]
  pub fn with_options(source: R, options: ParseOptions) -> Self {
    Self { source, peeked: None, options }
  }

  #[inline]
  #[must_use]
  pub const fn options(&self) -> &ParseOptions {
    &self.options
  }

  /// Checks if the input starts with [`PNG_SIGNATURE`].
  ///
  /// The first call reads 8 bytes and holds on to them, so this doesn't move
  /// the reader along: calling it again gives the same answer, and
  /// [`parse`](Self::parse) still sees the whole input.
  ///
  /// ## Failure
  /// * [`PngError::Io`] if the source fails, or an `UnexpectedEof` one if it
  ///   has fewer than 8 bytes. Whatever bytes did arrive are still held, and
  ///   [`into_inner`](Self::into_inner) gives them back.
  pub fn check_signature(&mut self) -> PngResult<bool> {
    let found = self.peek_signature()?;
    trace!("signature bytes: {found:02X?}");
    Ok(found == PNG_SIGNATURE)
  }

  fn peek_signature(&mut self) -> PngResult<[u8; 8]> {
    let (found, count) = match self.peeked {
      Some(peeked) => peeked,
      None => {
        let peeked = try_pull_byte_array::<8, _>(&mut self.source)?;
        self.peeked = Some(peeked);
        peeked
      }
    };
    if count < found.len() {
      return Err(
        std::io::Error::new(
          ErrorKind::UnexpectedEof,
          format!("only {count} bytes, too short for a PNG signature"),
        )
        .into(),
      );
    }
    Ok(found)
  }

  /// Gives back everything not yet consumed as chunks, including any
  /// signature bytes held by [`check_signature`](Self::check_signature).
  #[must_use]
  pub fn into_inner(self) -> Chain<Cursor<Vec<u8>>, R> {
    let held = self.peeked.map(|(bytes, count)| bytes[..count].to_vec()).unwrap_or_default();
    Cursor::new(held).chain(self.source)
  }

  /// Consumes the signature and gives an iterator over the chunks after it.
  ///
  /// ## Failure
  /// * [`PngError::NotAPng`] if the signature is wrong. No chunk data is read.
  /// * [`PngError::Io`] if the signature couldn't be read.
  pub fn chunks(mut self) -> PngResult<ChunkIter<R>> {
    let found = self.peek_signature()?;
    if found != PNG_SIGNATURE {
      return Err(PngError::NotAPng { found });
    }
    Ok(ChunkIter {
      source: self.source,
      options: self.options,
      index: 0,
      done: false,
      truncated_tail: None,
    })
  }

  /// Reads the whole stream into a [`PngDocument`].
  ///
  /// Stops at the first error, see [`ChunkIter`] for the details.
  pub fn parse(self) -> PngResult<PngDocument> {
    let mut it = self.chunks()?;
    let chunks = it.by_ref().collect::<PngResult<Vec<Chunk>>>()?;
    debug!("parsed {} chunks", chunks.len());
    Ok(PngDocument::from_parts(chunks, it.into_truncated_tail()))
  }
}

/// Reads a PNG document out of `source` with the default options.
#[inline]
pub fn parse<R: Read>(source: R) -> PngResult<PngDocument> {
  PngReader::new(source).parse()
}

/// An iterator over the chunks of a PNG stream, one chunk at a time.
///
/// Each chunk is read as:
/// 1) a 4 byte big-endian length. If the input ends before any of it, the
///    iterator just ends.
/// 2) a 4 byte type code.
/// 3) `length` bytes of data.
/// 4) a 4 byte CRC, which is never checked.
///
/// Any error is yielded once and then the iterator is done. What happens when
/// the data or CRC is cut short depends on the [`TruncationPolicy`].
#[derive(Debug)]
pub struct ChunkIter<R> {
  source: R,
  options: ParseOptions,
  index: usize,
  done: bool,
  truncated_tail: Option<Chunk>,
}
impl<R: Read> ChunkIter<R> {
  /// The partial chunk that ended the stream, if a lenient read stopped early.
  #[inline]
  #[must_use]
  pub fn truncated_tail(&self) -> Option<&Chunk> {
    self.truncated_tail.as_ref()
  }

  #[inline]
  #[must_use]
  pub fn into_truncated_tail(self) -> Option<Chunk> {
    self.truncated_tail
  }

  fn next_chunk(&mut self) -> PngResult<Option<Chunk>> {
    let index = self.index;
    let (length_bytes, count) = try_pull_byte_array::<4, _>(&mut self.source)?;
    match count {
      0 => return Ok(None),
      4 => (),
      _ => return Err(PngError::TruncatedChunk { index, field: ChunkField::Length }),
    }
    let length = u32::from_be_bytes(length_bytes);

    let (code_bytes, count) = try_pull_byte_array::<4, _>(&mut self.source)?;
    if count != 4 {
      return Err(PngError::TruncatedChunk { index, field: ChunkField::Type });
    }
    let code = ChunkTypeCode(code_bytes);

    if length > self.options.max_chunk_len {
      return Err(PngError::ChunkTooLarge { index, length, limit: self.options.max_chunk_len });
    }
    // don't size the allocation from `length`, it hasn't been checked yet.
    let mut data = Vec::new();
    let count = self.source.by_ref().take(u64::from(length)).read_to_end(&mut data)?;
    if count < length as usize {
      let partial = Chunk::from_parts(length, code, data, [0; 4]);
      return self.stop_early(index, partial, ChunkField::Data);
    }

    let (crc, count) = try_pull_byte_array::<4, _>(&mut self.source)?;
    if count != 4 {
      return self.stop_early(index, Chunk::from_parts(length, code, data, crc), ChunkField::Crc);
    }

    self.index += 1;
    let chunk = Chunk::from_parts(length, code, data, crc);
    debug!("chunk {index}: {code} ({:?}), {length} bytes", chunk.kind());
    Ok(Some(chunk))
  }

  fn stop_early(
    &mut self, index: usize, partial: Chunk, field: ChunkField,
  ) -> PngResult<Option<Chunk>> {
    match self.options.truncation {
      TruncationPolicy::Strict => Err(PngError::TruncatedChunk { index, field }),
      TruncationPolicy::Lenient => {
        warn!(
          "chunk {index} ({}) ended in its {field} field after {} of {} data bytes, stopping",
          partial.code(),
          partial.data().len(),
          partial.length()
        );
        self.truncated_tail = Some(partial);
        Ok(None)
      }
    }
  }
}
impl<R: Read> Iterator for ChunkIter<R> {
  type Item = PngResult<Chunk>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.done {
      return None;
    }
    match self.next_chunk() {
      Ok(Some(chunk)) => Some(Ok(chunk)),
      Ok(None) => {
        self.done = true;
        None
      }
      Err(e) => {
        self.done = true;
        Some(Err(e))
      }
    }
  }
}
impl<R: Read> core::iter::FusedIterator for ChunkIter<R> {}
