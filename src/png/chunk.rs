use std::io::Write;

use super::*;

/// One chunk record from a PNG stream.
///
/// The chunk owns its data. The CRC trailer is kept as the raw bytes from the
/// stream and is never checked or recomputed.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Chunk {
  length: u32,
  code: ChunkTypeCode,
  kind: ChunkKind,
  data: Vec<u8>,
  crc: [u8; 4],
}
impl core::fmt::Debug for Chunk {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Chunk")
      .field("length", &self.length)
      .field("code", &self.code)
      .field("kind", &self.kind)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("crc", &self.crc)
      .finish()
  }
}
impl Chunk {
  /// Builds a chunk, classifying `code` and taking the declared length from
  /// `data`.
  ///
  /// ## Panics
  /// * If `data` is longer than `u32::MAX` bytes.
  #[must_use]
  pub fn new(code: ChunkTypeCode, data: Vec<u8>, crc: [u8; 4]) -> Self {
    let length = u32::try_from(data.len()).expect("chunk data longer than u32::MAX");
    Self::from_parts(length, code, data, crc)
  }

  /// The declared length might not match `data.len()`. The reader only does
  /// that for the truncated tail of a lenient parse.
  #[inline]
  pub(crate) fn from_parts(length: u32, code: ChunkTypeCode, data: Vec<u8>, crc: [u8; 4]) -> Self {
    Self { length, code, kind: classify(code), data, crc }
  }

  /// The data length declared in the stream.
  #[inline]
  #[must_use]
  pub const fn length(&self) -> u32 {
    self.length
  }
  #[inline]
  #[must_use]
  pub const fn code(&self) -> ChunkTypeCode {
    self.code
  }
  #[inline]
  #[must_use]
  pub const fn kind(&self) -> ChunkKind {
    self.kind
  }
  #[inline]
  #[must_use]
  pub fn data(&self) -> &[u8] {
    &self.data
  }
  /// The CRC trailer, exactly as read.
  #[inline]
  #[must_use]
  pub const fn crc(&self) -> [u8; 4] {
    self.crc
  }
  /// The CRC trailer read as a big-endian `u32`.
  #[inline]
  #[must_use]
  pub const fn declared_crc(&self) -> u32 {
    u32::from_be_bytes(self.crc)
  }

  /// If all of the declared data is actually present.
  #[inline]
  #[must_use]
  pub fn is_complete(&self) -> bool {
    self.data.len() == self.length as usize
  }

  /// Decodes the data as an `IHDR`, regardless of this chunk's kind.
  #[inline]
  pub fn to_ihdr(&self) -> PngResult<IHDR> {
    IHDR::try_from(self.data())
  }

  /// Views the data as `RGB8` palette entries.
  ///
  /// Gives `None` unless the data length is a multiple of 3.
  #[inline]
  #[must_use]
  pub fn palette_entries(&self) -> Option<&[[u8; 3]]> {
    bytemuck::try_cast_slice::<u8, [u8; 3]>(&self.data).ok()
  }

  /// Number of bytes this chunk takes up when written.
  #[inline]
  #[must_use]
  pub fn encoded_len(&self) -> u64 {
    12 + self.data.len() as u64
  }

  /// Writes the chunk exactly as it was read: length, type code, data, CRC.
  pub fn write_to<W: Write>(&self, mut dest: W) -> PngResult<()> {
    dest.write_all(&self.length.to_be_bytes())?;
    dest.write_all(self.code.as_bytes())?;
    dest.write_all(&self.data)?;
    dest.write_all(&self.crc)?;
    Ok(())
  }
}
