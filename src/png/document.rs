use std::io::Write;

use log::warn;

use super::*;

/// All the chunks of one PNG, in file order.
///
/// Order matters: a PNG decoder expects `IHDR`, then maybe `PLTE`, then the
/// `IDAT` chunks, then `IEND`. This type doesn't enforce any of that, it just
/// keeps whatever order the stream had.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PngDocument {
  chunks: Vec<Chunk>,
  truncated_tail: Option<Chunk>,
}
impl PngDocument {
  #[inline]
  pub(crate) fn from_parts(chunks: Vec<Chunk>, truncated_tail: Option<Chunk>) -> Self {
    Self { chunks, truncated_tail }
  }

  #[inline]
  #[must_use]
  pub fn chunks(&self) -> &[Chunk] {
    &self.chunks
  }
  #[inline]
  #[must_use]
  pub fn into_chunks(self) -> Vec<Chunk> {
    self.chunks
  }
  #[inline]
  pub fn iter(&self) -> core::slice::Iter<'_, Chunk> {
    self.chunks.iter()
  }
  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.chunks.len()
  }
  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.chunks.is_empty()
  }

  /// The partial last chunk, when a lenient parse ran out of input partway
  /// through a chunk's data or CRC.
  ///
  /// This chunk is *not* part of [`chunks`](Self::chunks), and nothing that
  /// writes the document out will include it.
  #[inline]
  #[must_use]
  pub fn truncated_tail(&self) -> Option<&Chunk> {
    self.truncated_tail.as_ref()
  }

  /// All chunks that aren't critical, including `Unknown` ones.
  pub fn ancillary(&self) -> impl Iterator<Item = &Chunk> + '_ {
    self.chunks.iter().filter(|c| !c.kind().is_critical())
  }

  /// Decodes the first `IHDR` chunk, if there is one.
  #[must_use]
  pub fn header(&self) -> Option<PngResult<IHDR>> {
    self.chunks.iter().find(|c| c.kind() == ChunkKind::Header).map(Chunk::to_ihdr)
  }

  /// Decodes every text chunk.
  ///
  /// Text chunks with a broken layout are skipped (with a log warning)
  /// rather than failing the whole list.
  #[must_use]
  pub fn text_entries(&self) -> Vec<TextEntry> {
    self
      .chunks
      .iter()
      .filter_map(|chunk| match TextEntry::decode(chunk) {
        Ok(entry) => entry,
        Err(e) => {
          warn!("skipping text chunk: {e}");
          None
        }
      })
      .collect()
  }

  /// Writes the signature and every chunk, byte for byte as they were read.
  ///
  /// For a document parsed from a well formed PNG this reproduces the input.
  pub fn write_to<W: Write>(&self, mut dest: W) -> PngResult<u64> {
    dest.write_all(&PNG_SIGNATURE)?;
    let mut total = PNG_SIGNATURE.len() as u64;
    for chunk in &self.chunks {
      chunk.write_to(&mut dest)?;
      total += chunk.encoded_len();
    }
    Ok(total)
  }
}
impl From<Vec<Chunk>> for PngDocument {
  #[inline]
  fn from(chunks: Vec<Chunk>) -> Self {
    Self { chunks, truncated_tail: None }
  }
}
impl FromIterator<Chunk> for PngDocument {
  #[inline]
  fn from_iter<I: IntoIterator<Item = Chunk>>(iter: I) -> Self {
    Self::from(iter.into_iter().collect::<Vec<_>>())
  }
}
impl<'d> IntoIterator for &'d PngDocument {
  type Item = &'d Chunk;
  type IntoIter = core::slice::Iter<'d, Chunk>;
  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.chunks.iter()
  }
}
impl IntoIterator for PngDocument {
  type Item = Chunk;
  type IntoIter = std::vec::IntoIter<Chunk>;
  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.chunks.into_iter()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn doc() -> PngDocument {
    PngDocument::from(vec![
      Chunk::new(ChunkTypeCode::IHDR, vec![0, 0, 0, 1, 0, 0, 0, 2, 8, 0, 0, 0, 0], [1; 4]),
      Chunk::new(ChunkTypeCode::tEXt, b"Title\0Hi".to_vec(), [2; 4]),
      Chunk::new(ChunkTypeCode(*b"prVt"), vec![9], [3; 4]),
      Chunk::new(ChunkTypeCode::IDAT, vec![1, 2, 3], [4; 4]),
      Chunk::new(ChunkTypeCode::IEND, vec![], [5; 4]),
    ])
  }

  #[test]
  fn test_ancillary() {
    let doc = doc();
    let codes: Vec<_> = doc.ancillary().map(Chunk::code).collect();
    assert_eq!(codes, [ChunkTypeCode::tEXt, ChunkTypeCode(*b"prVt")]);
  }

  #[test]
  fn test_header() {
    let ihdr = doc().header().unwrap().unwrap();
    assert_eq!((ihdr.width, ihdr.height, ihdr.bit_depth), (1, 2, 8));
    assert!(PngDocument::default().header().is_none());
  }

  #[test]
  fn test_write_to_round_trips() {
    let doc = doc();
    let mut out = Vec::new();
    let written = doc.write_to(&mut out).unwrap();
    assert_eq!(written, out.len() as u64);
    assert_eq!(parse(&out[..]).unwrap(), doc);
  }

  #[test]
  fn test_early_exit_walk() {
    let doc = doc();
    let mut seen = Vec::new();
    for chunk in &doc {
      if chunk.kind() == ChunkKind::ImageData {
        break;
      }
      seen.push(chunk.code());
    }
    assert_eq!(seen.len(), 3);
  }
}
