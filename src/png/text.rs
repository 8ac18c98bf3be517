use super::*;

/// A decoded `tEXt`, `zTXt`, or `iTXt` chunk.
///
/// * `tEXt` and `zTXt` hold Latin-1 text. Each byte is turned into the `char`
///   with the same value, which is exactly what Latin-1 means.
/// * `iTXt` holds UTF-8. Invalid sequences are replaced rather than failing.
///
/// Compressed text is inflated when the `miniz_oxide` feature is on. Without
/// it, `compressed` is set and `text` is left empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextEntry {
  pub kind: ChunkKind,
  /// Normally 1-79 bytes.
  pub keyword: String,
  pub text: String,
  pub compressed: bool,
  /// `iTXt` only: the language tag, such as `en-US`. Often empty.
  pub language: Option<String>,
  /// `iTXt` only: the keyword, translated into `language`.
  pub translated_keyword: Option<String>,
}
impl TextEntry {
  /// Decodes the chunk if it's one of the three text chunk kinds.
  ///
  /// Other kinds of chunk give `Ok(None)`.
  ///
  /// ## Failure
  /// * [`PngError::TextDecode`] if a separator or the compression method is
  ///   missing, the compression method isn't zlib (0), or the zlib data is
  ///   broken.
  pub fn decode(chunk: &Chunk) -> PngResult<Option<Self>> {
    let code = chunk.code();
    let fail = |reason: &'static str| PngError::TextDecode { code, reason };
    let kind = chunk.kind();
    Ok(Some(match kind {
      ChunkKind::Text => {
        let (keyword, text) = split_nul(chunk.data()).ok_or_else(|| fail("no keyword separator"))?;
        Self {
          kind,
          keyword: latin1(keyword),
          text: latin1(text),
          compressed: false,
          language: None,
          translated_keyword: None,
        }
      }
      ChunkKind::CompressedText => {
        let (keyword, rest) = split_nul(chunk.data()).ok_or_else(|| fail("no keyword separator"))?;
        let zlib_data = match rest {
          [0, zlib_data @ ..] => zlib_data,
          [_, ..] => return Err(fail("unknown compression method")),
          [] => return Err(fail("no compression method")),
        };
        let text = inflate(zlib_data).map_err(fail)?;
        Self {
          kind,
          keyword: latin1(keyword),
          text: text.as_deref().map(latin1).unwrap_or_default(),
          compressed: true,
          language: None,
          translated_keyword: None,
        }
      }
      ChunkKind::InternationalText => {
        let (keyword, rest) = split_nul(chunk.data()).ok_or_else(|| fail("no keyword separator"))?;
        // flag is 0 or 1, method should always be 0
        let (compressed, rest) = match rest {
          [0, _, rest @ ..] => (false, rest),
          [1, 0, rest @ ..] => (true, rest),
          [1, _, ..] => return Err(fail("unknown compression method")),
          [_, _, ..] => return Err(fail("bad compression flag")),
          _ => return Err(fail("no compression flag")),
        };
        let (language, rest) = split_nul(rest).ok_or_else(|| fail("no language separator"))?;
        let (translated, text) =
          split_nul(rest).ok_or_else(|| fail("no translated keyword separator"))?;
        let text = if compressed {
          inflate(text).map_err(fail)?.map(|t| String::from_utf8_lossy(&t).into_owned())
        } else {
          Some(String::from_utf8_lossy(text).into_owned())
        };
        Self {
          kind,
          keyword: latin1(keyword),
          text: text.unwrap_or_default(),
          compressed,
          language: Some(latin1(language)),
          translated_keyword: Some(String::from_utf8_lossy(translated).into_owned()),
        }
      }
      _ => return Ok(None),
    }))
  }
}
impl core::fmt::Display for TextEntry {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "{}: {}", self.keyword, self.text)
  }
}

/// Splits at the first null byte, dropping the null.
#[inline]
fn split_nul(bytes: &[u8]) -> Option<(&[u8], &[u8])> {
  let mut it = bytes.splitn(2, |u| u == &0_u8);
  let head = it.next()?;
  let tail = it.next()?;
  Some((head, tail))
}

#[inline]
fn latin1(bytes: &[u8]) -> String {
  bytes.iter().copied().map(char::from).collect()
}

#[cfg(feature = "miniz_oxide")]
fn inflate(zlib_data: &[u8]) -> Result<Option<Vec<u8>>, &'static str> {
  miniz_oxide::inflate::decompress_to_vec_zlib(zlib_data).map(Some).map_err(|_| "bad zlib data")
}

#[cfg(not(feature = "miniz_oxide"))]
fn inflate(_zlib_data: &[u8]) -> Result<Option<Vec<u8>>, &'static str> {
  Ok(None)
}
