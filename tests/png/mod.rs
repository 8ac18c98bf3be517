use std::io::Read;

use pngstrip::{
  png::{
    classify, parse, strip, strip_to, Chunk, ChunkKind, ChunkTypeCode, ParseOptions, PngDocument,
    PngReader, Stripper, TruncationPolicy, PNG_SIGNATURE,
  },
  ChunkField, PngError,
};

use super::{
  rand_bytes, TAGGED_IDAT, TAGGED_IEND, TAGGED_IHDR, TAGGED_LEN, TAGGED_PNG, TAGGED_TEXT,
  TAGGED_TIME,
};

fn stripped(doc: &PngDocument) -> Vec<u8> {
  let mut out = Vec::new();
  strip(doc).read_to_end(&mut out).unwrap();
  out
}

#[test]
fn test_tagged_png_layout() {
  assert_eq!(TAGGED_PNG.len(), TAGGED_LEN);
  let doc = parse(TAGGED_PNG).unwrap();
  let summary: Vec<_> = doc.iter().map(|c| (c.code(), c.kind(), c.length())).collect();
  assert_eq!(
    summary,
    [
      (ChunkTypeCode::IHDR, ChunkKind::Header, 13),
      (ChunkTypeCode::tEXt, ChunkKind::Text, 13),
      (ChunkTypeCode::tIME, ChunkKind::ModificationTime, 7),
      (ChunkTypeCode::IDAT, ChunkKind::ImageData, 18),
      (ChunkTypeCode::IEND, ChunkKind::End, 0),
    ]
  );
  assert_eq!(doc.chunks()[0].crc(), [114, 182, 13, 36]);
  assert_eq!(&doc.chunks()[3].data()[..2], &[120, 218]);
  assert!(doc.truncated_tail().is_none());
}

#[test]
fn test_round_trip_is_identity() {
  let doc = parse(TAGGED_PNG).unwrap();
  let mut out = Vec::new();
  doc.write_to(&mut out).unwrap();
  assert_eq!(out, TAGGED_PNG);

  let mut manual = PNG_SIGNATURE.to_vec();
  for chunk in &doc {
    chunk.write_to(&mut manual).unwrap();
  }
  assert_eq!(manual, TAGGED_PNG);
}

#[test]
fn test_strip_drops_text_and_time() {
  let doc = parse(TAGGED_PNG).unwrap();
  let out = stripped(&doc);
  let mut expected = TAGGED_PNG[..TAGGED_TEXT].to_vec();
  expected.extend_from_slice(&TAGGED_PNG[TAGGED_IDAT..]);
  assert_eq!(out, expected);
  // the text payload is gone entirely
  assert!(!out.windows(5).any(|w| w == b"hello"));
  assert!(!out.windows(4).any(|w| w == b"tEXt"));
  // and what's left still parses, with CRCs untouched
  let again = parse(&out[..]).unwrap();
  assert_eq!(again.len(), 3);
  assert_eq!(again.chunks()[0], doc.chunks()[0]);
  assert_eq!(again.chunks()[1], doc.chunks()[3]);
  assert_eq!(again.chunks()[2], doc.chunks()[4]);
}

#[test]
fn test_strip_is_idempotent() {
  let once = stripped(&parse(TAGGED_PNG).unwrap());
  let twice = stripped(&parse(&once[..]).unwrap());
  assert_eq!(once, twice);
}

#[test]
fn test_strip_built_document() {
  // IHDR, a bare "hello" tEXt, IDAT, IEND
  let doc = PngDocument::from(vec![
    Chunk::new(ChunkTypeCode::IHDR, TAGGED_PNG[TAGGED_IHDR + 8..TAGGED_TEXT - 4].to_vec(), [1; 4]),
    Chunk::new(ChunkTypeCode::tEXt, b"hello".to_vec(), [2; 4]),
    Chunk::new(ChunkTypeCode::IDAT, vec![0xAB; 300], [3; 4]),
    Chunk::new(ChunkTypeCode::IEND, vec![], [4; 4]),
  ]);
  let mut out = Vec::new();
  let written = strip_to(&doc, &mut out).unwrap();
  assert_eq!(written as usize, out.len());
  assert_eq!(out.len(), 8 + (12 + 13) + (12 + 300) + 12);
  let again = parse(&out[..]).unwrap();
  let kinds: Vec<_> = again.iter().map(Chunk::kind).collect();
  assert_eq!(kinds, [ChunkKind::Header, ChunkKind::ImageData, ChunkKind::End]);
  assert_eq!(again.chunks()[1].crc(), [3; 4]);
  assert_eq!(again.chunks()[1].data(), &[0xAB; 300][..]);
}

#[test]
fn test_text_entries() {
  let doc = parse(TAGGED_PNG).unwrap();
  let entries = doc.text_entries();
  assert_eq!(entries.len(), 1);
  assert_eq!(entries[0].keyword, "Comment");
  assert_eq!(entries[0].text, "hello");
  let ancillary: Vec<_> = doc.ancillary().map(Chunk::kind).collect();
  assert_eq!(ancillary, [ChunkKind::Text, ChunkKind::ModificationTime]);
}

#[test]
fn test_header_fields() {
  let ihdr = parse(TAGGED_PNG).unwrap().header().unwrap().unwrap();
  assert_eq!((ihdr.width, ihdr.height), (2, 2));
  assert_eq!((ihdr.bit_depth, ihdr.color_type), (8, 6));
  assert_eq!((ihdr.compression_method, ihdr.filter_method, ihdr.interlace_method), (0, 0, 0));
}

#[test]
fn test_signature_check_then_parse() {
  let mut reader = PngReader::new(TAGGED_PNG);
  assert!(reader.check_signature().unwrap());
  assert!(reader.check_signature().unwrap());
  let doc = reader.parse().unwrap();
  assert_eq!(doc.len(), 5);
}

#[test]
fn test_text_file_is_not_a_png() {
  let text = b"This is a plain text file.\nIt has no chunks.\n";
  let mut reader = PngReader::new(&text[..]);
  assert!(!reader.check_signature().unwrap());
  match reader.parse() {
    Err(PngError::NotAPng { found }) => assert_eq!(&found, b"This is "),
    other => panic!("expected NotAPng, got {other:?}"),
  }
}

#[test]
fn test_lenient_truncation_keeps_whole_chunks() {
  for cut in [TAGGED_IDAT + 8 + 5, TAGGED_IEND - 2] {
    let doc = parse(&TAGGED_PNG[..cut]).unwrap();
    assert_eq!(doc.len(), 3, "cut at {cut}");
    let tail = doc.truncated_tail().unwrap();
    assert_eq!(tail.code(), ChunkTypeCode::IDAT);
    assert_eq!(tail.length(), 18);
  }
  // cutting exactly between chunks is just a shorter file
  let doc = parse(&TAGGED_PNG[..TAGGED_TIME]).unwrap();
  assert_eq!(doc.len(), 2);
  assert!(doc.truncated_tail().is_none());
}

#[test]
fn test_strict_truncation_is_an_error() {
  let strict = ParseOptions { truncation: TruncationPolicy::Strict, ..Default::default() };
  let cut = &TAGGED_PNG[..TAGGED_IDAT + 8 + 5];
  assert!(matches!(
    PngReader::with_options(cut, strict).parse(),
    Err(PngError::TruncatedChunk { index: 3, field: ChunkField::Data })
  ));
  let cut = &TAGGED_PNG[..TAGGED_IDAT + 6];
  assert!(matches!(
    parse(cut),
    Err(PngError::TruncatedChunk { index: 3, field: ChunkField::Type })
  ));
}

#[test]
fn test_keep_transparency() {
  let mut bytes = TAGGED_PNG[..TAGGED_TEXT].to_vec();
  bytes.extend_from_slice(&[0, 0, 0, 1, b't', b'R', b'N', b'S', 0, 1, 2, 3, 4]);
  bytes.extend_from_slice(&TAGGED_PNG[TAGGED_TEXT..]);
  let doc = parse(&bytes[..]).unwrap();
  let mut out = Vec::new();
  Stripper::new().keep(ChunkKind::Transparency).write_to(&doc, &mut out).unwrap();
  let kinds: Vec<_> = parse(&out[..]).unwrap().iter().map(Chunk::kind).collect();
  assert_eq!(
    kinds,
    [ChunkKind::Header, ChunkKind::Transparency, ChunkKind::ImageData, ChunkKind::End]
  );
}

#[test]
fn test_classify_is_total() {
  for _ in 0..10 {
    for code in rand_bytes(4 * 256).chunks_exact(4) {
      let code = ChunkTypeCode(code.try_into().unwrap());
      let kind = classify(code);
      assert_eq!(kind, classify(code));
      match kind.canonical_code() {
        Some(canonical) => assert_eq!(canonical, code),
        None => assert_eq!(kind, ChunkKind::Unknown),
      }
    }
  }
}

#[test]
fn test_parse_no_panics() {
  // random junk behind a real signature should never panic the reader, it
  // just ends up as some error or some chunks.
  for _ in 0..50 {
    let mut v = PNG_SIGNATURE.to_vec();
    v.extend_from_slice(&rand_bytes(1024));
    let opts = ParseOptions { max_chunk_len: 1 << 16, ..Default::default() };
    let _ = PngReader::with_options(&v[..], opts).parse();
    if let Ok(doc) = parse(&v[..]) {
      let _ = doc.text_entries();
      let _ = stripped(&doc);
    }
  }
  // and the same for every prefix of a real file.
  for cut in 0..TAGGED_PNG.len() {
    let _ = parse(&TAGGED_PNG[..cut]);
  }
}
