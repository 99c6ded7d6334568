//! # libbmp
//!
//!
//! This library provides datatypes and i/o functionality for uncompressed, 32-bit Windows
//! bitmap (BMP) files.
//!
//! It aims to provide a minimal, low-level API to build upon: read a bitmap into a flat RGBA
//! buffer, transform the buffer, and write it back out behind a freshly synthesized header.
//!
//! ### The format
//!
//! All multi-byte values in a BMP file are little-endian. A file starts with a 14 byte *file
//! header* (magic `BM`, file size, two reserved fields, offset of the pixel data), followed by a
//! *DIB header* whose first field is its own length. This crate reads any DIB header of at least
//! 40 bytes (`BITMAPINFOHEADER` and the larger V4/V5 variants) and always writes the 40 byte
//! `BITMAPINFOHEADER`.
//!
//! Pixels are stored on disk as `[b, g, r, a]` quartets. In memory, [`BmpImage`] keeps them in
//! `[r, g, b, a]` order. A positive height means the scanlines are stored bottom-up, a negative
//! height means top-down.
//!
//! ### Limitations
//!
//! Only 32 bits per pixel are supported. Palette images, RLE/JPEG/PNG compression and the
//! OS/2 12 byte core header are rejected.
//!
//! ### Usage
//!
//! ```rust
//! use libbmp::BmpImage;
//!
//! fn main() -> anyhow::Result<()> {
//!     // a 2x1 image: one red and one green pixel
//!     let img = BmpImage::new(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255], false)?;
//!
//!     let mut encoded = Vec::new();
//!     libbmp::encode(&mut encoded, &libbmp::invert(img))?;
//!     assert_eq!(encoded.len(), libbmp::HEADER_LEN + 8);
//!
//!     let decoded = libbmp::decode(encoded.as_slice())?;
//!     assert_eq!(decoded.pixels(), &[0, 255, 255, 0, 255, 0, 255, 0]);
//!     Ok(())
//! }
//! ```
//!
//! #### Row order
//!
//! Decoding never reorders scanlines: row `0` of the buffer is the first row stored in the file.
//! Encoding always writes a bottom-up file, so a [`BmpImage`] whose [`BmpImage::top_down`] flag is
//! set has its rows reversed on the way out. Decoding that output again yields the rows in
//! reverse order compared to the original buffer.
//!

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]

mod error;
/// Module containing types for BMP image files
pub mod image;

pub use error::Error;
pub use crate::image::bitmap::PixelBuffer;
pub use crate::image::header::{read_metadata, BmpHeader, Metadata};
pub use crate::image::{decode, encode, invert, BmpImage};

/// Magic identifier at the start of every BMP file
pub const MAGIC: [u8; 2] = *b"BM";
/// Length of the BMP file header
pub const FILE_HEADER_LEN: usize = 14;
/// Length of the `BITMAPINFOHEADER` DIB header
pub const INFO_HEADER_LEN: usize = 40;
/// Length of both headers as written by this crate
pub const HEADER_LEN: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;
/// The only bit depth this crate reads and writes
pub const BITS_PER_PIXEL: u16 = 32;
/// Bytes per pixel for [`BITS_PER_PIXEL`]
pub const BYTES_PER_PIXEL: usize = 4;
