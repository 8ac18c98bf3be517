#![forbid(unsafe_code)]

//! Reading PNG chunk streams, and writing them back out without the metadata.
//!
//! * [Portable Network Graphics Specification (Third Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/png/
//!
//! A PNG is an 8 byte signature followed by a series of "chunks". Each chunk
//! is a 4 byte big-endian length, a 4 byte type code, that many bytes of data,
//! and a 4 byte CRC. There's four "critical" chunk types:
//! * **Header** (`IHDR`) - The image's dimensions and pixel format.
//! * **Palette** (`PLTE`) - Only for indexed color images.
//! * **Image Data** (`IDAT`) - One or more chunks that together form a single
//!   zlib stream of the filtered pixels.
//! * **End** (`IEND`) - The last chunk, so you know nothing was cut off.
//!
//! Every other chunk is "ancillary": text, timestamps, Exif, ICC profiles, and
//! so on. That's the stuff you might want to look at, or get rid of before
//! you post an image somewhere.
//!
//! ## Reading
//!
//! Wrap any [`Read`](std::io::Read) in a [`PngReader`]. You can call
//! [`check_signature`](PngReader::check_signature) first if you want to know
//! if you even have a PNG (it doesn't use up any input), then either
//! [`parse`](PngReader::parse) the whole thing into a [`PngDocument`] or walk
//! the [`chunks`](PngReader::chunks) one at a time.
//!
//! ```no_run
//! use pngstrip::png::*;
//! # fn main() -> pngstrip::PngResult<()> {
//! let file = std::io::BufReader::new(std::fs::File::open("photo.png")?);
//! let doc = PngReader::new(file).parse()?;
//! for chunk in doc.ancillary() {
//!   println!("{}", chunk.kind());
//! }
//! for entry in doc.text_entries() {
//!   println!("{entry}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Stripping
//!
//! [`strip`] gives a [`Read`](std::io::Read) that produces a new PNG with
//! only the critical chunks, or use [`Stripper`] to keep a few more kinds.
//!
//! ```no_run
//! # use pngstrip::png::*;
//! # fn main() -> pngstrip::PngResult<()> {
//! # let doc = PngDocument::default();
//! let mut out = std::fs::File::create("photo-cleaned.png")?;
//! strip_to(&doc, &mut out)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Things This Doesn't Do
//!
//! * No pixel decoding. `IDAT` is just bytes.
//! * No CRC checks. The CRC of each chunk is carried along as-is, even into the
//!   stripped output.
//! * No chunk ordering rules. If the input has its chunks in a weird order, or
//!   no `IHDR` at all, you get that same weirdness back.

use crate::error::{ChunkField, PngError, PngResult};

mod chunk_type;
pub use chunk_type::*;

mod chunk;
pub use chunk::*;

mod ihdr;
pub use ihdr::*;

mod text;
pub use text::*;

mod document;
pub use document::*;

mod reader;
pub use reader::*;

mod strip;
pub use strip::*;
