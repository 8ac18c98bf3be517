use core::fmt;

use crate::png::ChunkTypeCode;

/// Result alias used throughout the crate.
pub type PngResult<T> = Result<T, PngError>;

/// Which field of a chunk record was being read when the input ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChunkField {
  /// The 4-byte big-endian data length.
  Length,
  /// The 4-byte type code.
  Type,
  /// The chunk's data bytes.
  Data,
  /// The 4-byte CRC trailer.
  Crc,
}
impl fmt::Display for ChunkField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Length => "length",
      Self::Type => "type",
      Self::Data => "data",
      Self::Crc => "crc",
    })
  }
}

/// An error from the `pngstrip` crate.
#[derive(Debug, thiserror::Error)]
pub enum PngError {
  /// The first eight bytes are not the PNG signature.
  #[error("input is not a PNG (signature was {found:02X?})")]
  NotAPng {
    /// The eight bytes actually found.
    found: [u8; 8],
  },

  /// The underlying source or destination failed.
  #[error("i/o failure: {0}")]
  Io(#[from] std::io::Error),

  /// The input ended partway through a chunk record.
  ///
  /// `index` counts chunks from zero, after the signature.
  #[error("chunk {index} was truncated in its {field} field")]
  TruncatedChunk {
    /// Position of the broken chunk within the stream.
    index: usize,
    /// The field that was cut short.
    field: ChunkField,
  },

  /// A chunk declared more data than the configured limit allows.
  #[error("chunk {index} declares {length} bytes of data (limit is {limit})")]
  ChunkTooLarge {
    /// Position of the chunk within the stream.
    index: usize,
    /// The declared length.
    length: u32,
    /// The limit in effect.
    limit: u32,
  },

  /// An `IHDR` payload was not exactly 13 bytes.
  #[error("IHDR data must be 13 bytes, found {len}")]
  HeaderDecode {
    /// The actual payload length.
    len: usize,
  },

  /// A text chunk's payload didn't have the expected layout.
  #[error("malformed {code} chunk: {reason}")]
  TextDecode {
    /// The chunk's type code.
    code: ChunkTypeCode,
    /// What was wrong with it.
    reason: &'static str,
  },
}
