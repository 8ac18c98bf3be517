use super::*;

/// `IHDR`: Image header
///
/// The decoded form of a header chunk's 13 data bytes. The values are kept
/// as-is, without checking that they describe a sensible image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IHDR {
  pub width: u32,
  pub height: u32,
  pub bit_depth: u8,
  pub color_type: u8,
  pub compression_method: u8,
  pub filter_method: u8,
  pub interlace_method: u8,
}
impl IHDR {
  /// The color type, if it's one of the values PNG defines.
  #[inline]
  #[must_use]
  pub fn color_type(&self) -> Option<PngColorType> {
    PngColorType::try_from(self.color_type).ok()
  }

  #[inline]
  #[must_use]
  pub const fn is_interlaced(&self) -> bool {
    self.interlace_method == 1
  }
}
impl TryFrom<&[u8]> for IHDR {
  type Error = PngError;
  #[inline]
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    match *data {
      [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, compression, filter, interlace] => {
        Ok(Self {
          width: u32::from_be_bytes([w0, w1, w2, w3]),
          height: u32::from_be_bytes([h0, h1, h2, h3]),
          bit_depth,
          color_type,
          compression_method: compression,
          filter_method: filter,
          interlace_method: interlace,
        })
      }
      _ => Err(PngError::HeaderDecode { len: data.len() }),
    }
  }
}

/// The types of color that PNG supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngColorType {
  /// Greyscale
  Y = 0,
  /// Red, Green, Blue
  RGB = 2,
  /// Index into a palette.
  Index = 3,
  /// Greyscale + Alpha
  YA = 4,
  /// Red, Green, Blue, Alpha
  RGBA = 6,
}
impl TryFrom<u8> for PngColorType {
  type Error = ();
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => PngColorType::Y,
      2 => PngColorType::RGB,
      3 => PngColorType::Index,
      4 => PngColorType::YA,
      6 => PngColorType::RGBA,
      _ => return Err(()),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_ihdr_decode() {
    let data = [0_u8, 0, 0, 16, 0, 0, 0, 32, 8, 6, 0, 0, 0];
    let ihdr = IHDR::try_from(&data[..]).unwrap();
    assert_eq!(ihdr.width, 16);
    assert_eq!(ihdr.height, 32);
    assert_eq!(ihdr.bit_depth, 8);
    assert_eq!(ihdr.color_type, 6);
    assert_eq!(ihdr.compression_method, 0);
    assert_eq!(ihdr.filter_method, 0);
    assert_eq!(ihdr.interlace_method, 0);
    assert_eq!(ihdr.color_type(), Some(PngColorType::RGBA));
    assert!(!ihdr.is_interlaced());
  }

  #[test]
  fn test_ihdr_wrong_length() {
    assert!(matches!(IHDR::try_from(&[0_u8; 12][..]), Err(PngError::HeaderDecode { len: 12 })));
    assert!(matches!(IHDR::try_from(&[0_u8; 14][..]), Err(PngError::HeaderDecode { len: 14 })));
    assert!(matches!(IHDR::try_from(&[0_u8; 0][..]), Err(PngError::HeaderDecode { len: 0 })));
  }

  #[test]
  fn test_unknown_color_type() {
    let data = [0_u8, 0, 0, 1, 0, 0, 0, 1, 8, 5, 0, 0, 1];
    let ihdr = IHDR::try_from(&data[..]).unwrap();
    assert_eq!(ihdr.color_type(), None);
    assert!(ihdr.is_interlaced());
  }
}
