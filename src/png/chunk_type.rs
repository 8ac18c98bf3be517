use core::fmt::{self, Debug, Display, Write};

/// The four byte type code of a chunk, exactly as it appeared in the stream.
///
/// The bytes are *supposed* to be ASCII letters, but nothing enforces that.
/// The `Debug` and `Display` impls just `as` cast each byte into a `char`,
/// which is fine for real chunk codes and still safe for garbage.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ChunkTypeCode(pub [u8; 4]);
#[allow(nonstandard_style)]
impl ChunkTypeCode {
  pub const IHDR: Self = Self(*b"IHDR");
  pub const PLTE: Self = Self(*b"PLTE");
  pub const IDAT: Self = Self(*b"IDAT");
  pub const IEND: Self = Self(*b"IEND");
  pub const bKGD: Self = Self(*b"bKGD");
  pub const cHRM: Self = Self(*b"cHRM");
  pub const dSIG: Self = Self(*b"dSIG");
  pub const eXIf: Self = Self(*b"eXIf");
  pub const gAMA: Self = Self(*b"gAMA");
  pub const hIST: Self = Self(*b"hIST");
  pub const iCCP: Self = Self(*b"iCCP");
  pub const iTXt: Self = Self(*b"iTXt");
  pub const pHYs: Self = Self(*b"pHYs");
  pub const sBIT: Self = Self(*b"sBIT");
  pub const sPLT: Self = Self(*b"sPLT");
  pub const sRGB: Self = Self(*b"sRGB");
  pub const sTER: Self = Self(*b"sTER");
  pub const tEXt: Self = Self(*b"tEXt");
  pub const tIME: Self = Self(*b"tIME");
  pub const tRNS: Self = Self(*b"tRNS");
  pub const zTXt: Self = Self(*b"zTXt");

  /// The raw bytes.
  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &[u8; 4] {
    &self.0
  }

  /// Looks up this code in the chunk type table.
  #[inline]
  #[must_use]
  pub fn kind(self) -> ChunkKind {
    classify(self)
  }

  /// If the "ancillary" property bit (bit 5 of the first byte) is set.
  ///
  /// This is how a PNG decoder decides if it can safely skip a chunk code that
  /// it doesn't recognize. The registry doesn't use it, but it's handy when
  /// reporting on `Unknown` chunks.
  #[inline]
  #[must_use]
  pub const fn is_ancillary(self) -> bool {
    (self.0[0] & 0b0010_0000) != 0
  }
}
impl Debug for ChunkTypeCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_char('\"')?;
    Display::fmt(self, f)?;
    f.write_char('\"')
  }
}
impl Display for ChunkTypeCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}
impl From<[u8; 4]> for ChunkTypeCode {
  #[inline]
  fn from(array: [u8; 4]) -> Self {
    Self(array)
  }
}

/// What a chunk is for, as far as this crate is concerned.
///
/// The first four variants are the "critical" chunks, which are all that's
/// needed to reconstruct the image's pixels. Everything else is ancillary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChunkKind {
  /// `IHDR`
  Header,
  /// `PLTE`
  Palette,
  /// `IDAT`
  ImageData,
  /// `IEND`
  End,
  /// `bKGD`
  Background,
  /// `cHRM`
  Chromaticity,
  /// `dSIG`
  DigitalSignature,
  /// `eXIf`
  Exif,
  /// `gAMA`
  Gamma,
  /// `hIST`
  Histogram,
  /// `iCCP`
  IccProfile,
  /// `iTXt`
  InternationalText,
  /// `pHYs`
  PhysicalDimensions,
  /// `sBIT`
  SignificantBits,
  /// `sPLT`
  SuggestedPalette,
  /// `sRGB`
  Srgb,
  /// `sTER`
  Stereo,
  /// `tEXt`
  Text,
  /// `tIME`
  ModificationTime,
  /// `tRNS`
  Transparency,
  /// `zTXt`
  CompressedText,
  /// Any code not in the table.
  Unknown,
}
impl ChunkKind {
  /// The kinds that [`strip`](crate::png::strip()) keeps.
  pub const CRITICAL: [ChunkKind; 4] = [Self::Header, Self::Palette, Self::ImageData, Self::End];

  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    matches!(self, Self::Header | Self::Palette | Self::ImageData | Self::End)
  }

  /// The type code the table associates with this kind.
  ///
  /// `Unknown` has no code of its own.
  #[must_use]
  pub fn canonical_code(self) -> Option<ChunkTypeCode> {
    CHUNK_TABLE.iter().find(|(_, kind)| *kind == self).map(|(code, _)| *code)
  }

  /// A short human label.
  #[must_use]
  pub const fn description(self) -> &'static str {
    match self {
      Self::Header => "Header",
      Self::Palette => "Palette",
      Self::ImageData => "Image Data",
      Self::End => "Image End",
      Self::Background => "Default Background Color",
      Self::Chromaticity => "Chromaticity",
      Self::DigitalSignature => "Digital Signature",
      Self::Exif => "Exif",
      Self::Gamma => "Gamma",
      Self::Histogram => "Color Histogram",
      Self::IccProfile => "ICC Color Profile",
      Self::InternationalText => "UTF-8 Text",
      Self::PhysicalDimensions => "Intended Pixel Size",
      Self::SignificantBits => "Significant Bits",
      Self::SuggestedPalette => "Suggested Palette",
      Self::Srgb => "sRGB Color Space",
      Self::Stereo => "Stereo Image Indicator",
      Self::Text => "Latin-1 Text",
      Self::ModificationTime => "Last Modified Time",
      Self::Transparency => "Transparency",
      Self::CompressedText => "Compressed Text",
      Self::Unknown => "Unknown",
    }
  }
}
impl Display for ChunkKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.canonical_code() {
      Some(code) => write!(f, "{code} ({})", self.description()),
      None => f.write_str(self.description()),
    }
  }
}

static CHUNK_TABLE: [(ChunkTypeCode, ChunkKind); 21] = [
  (ChunkTypeCode::IHDR, ChunkKind::Header),
  (ChunkTypeCode::PLTE, ChunkKind::Palette),
  (ChunkTypeCode::IDAT, ChunkKind::ImageData),
  (ChunkTypeCode::IEND, ChunkKind::End),
  (ChunkTypeCode::bKGD, ChunkKind::Background),
  (ChunkTypeCode::cHRM, ChunkKind::Chromaticity),
  (ChunkTypeCode::dSIG, ChunkKind::DigitalSignature),
  (ChunkTypeCode::eXIf, ChunkKind::Exif),
  (ChunkTypeCode::gAMA, ChunkKind::Gamma),
  (ChunkTypeCode::hIST, ChunkKind::Histogram),
  (ChunkTypeCode::iCCP, ChunkKind::IccProfile),
  (ChunkTypeCode::iTXt, ChunkKind::InternationalText),
  (ChunkTypeCode::pHYs, ChunkKind::PhysicalDimensions),
  (ChunkTypeCode::sBIT, ChunkKind::SignificantBits),
  (ChunkTypeCode::sPLT, ChunkKind::SuggestedPalette),
  (ChunkTypeCode::sRGB, ChunkKind::Srgb),
  (ChunkTypeCode::sTER, ChunkKind::Stereo),
  (ChunkTypeCode::tEXt, ChunkKind::Text),
  (ChunkTypeCode::tIME, ChunkKind::ModificationTime),
  (ChunkTypeCode::tRNS, ChunkKind::Transparency),
  (ChunkTypeCode::zTXt, ChunkKind::CompressedText),
];

/// Classifies a type code. Codes that aren't in the table are `Unknown`.
///
/// Matching is exact, so `ihdr` or `IHDr` are `Unknown` too.
#[must_use]
pub fn classify(code: ChunkTypeCode) -> ChunkKind {
  CHUNK_TABLE.iter().find(|(c, _)| *c == code).map(|(_, kind)| *kind).unwrap_or(ChunkKind::Unknown)
}
