#![cfg_attr(docs_rs, feature(doc_cfg))]
//#![warn(missing_docs)]

//! A crate for looking at the metadata inside PNG files, and getting rid of
//! it.
//!
//! This works purely at the level of PNG "chunks". Pixel data is never
//! decoded, so stripping a file is just a matter of copying the chunks you
//! want to keep.
//!
//! See the [`png`] module to get started.

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod parser_helpers;

mod error;
pub use error::*;

pub mod png;
