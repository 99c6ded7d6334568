#![allow(clippy::module_name_repetitions)]

pub(crate) mod bitmap;
pub(crate) mod decode;
pub(crate) mod encode;
pub(crate) mod header;

use crate::{
    image::{
        bitmap::PixelBuffer,
        decode::{decode_scanlines, skip_gap},
        encode::encode_scanlines,
        header::{read_metadata, BmpHeader},
    },
    Error,
};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};
use tracing::{debug, info};

/// A decoded 32 bits per pixel BMP image
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BmpImage {
    bitmap: PixelBuffer,
    top_down: bool,
}

/// Reads a [`BmpImage`] from `r`
///
/// # Errors
///
/// See [`BmpImage::from_reader`]
pub fn decode(r: impl Read) -> Result<BmpImage, Error> {
    BmpImage::from_reader(r)
}

/// Writes `img` to `w` as a BMP file
///
/// # Errors
///
/// See [`BmpImage::write_to`]
pub fn encode(w: impl Write, img: &BmpImage) -> Result<(), Error> {
    img.write_to(w)
}

/// Inverts every byte of `img`, alpha included
#[must_use]
pub fn invert(img: BmpImage) -> BmpImage {
    img.invert()
}

impl BmpImage {
    /// Creates a new [`BmpImage`] from pixels in `[r, g, b, a]` order
    ///
    /// # Errors
    /// This function errors if `pixels` is not exactly `width * height * 4` bytes long
    ///
    pub fn new(width: u32, height: u32, pixels: Vec<u8>, top_down: bool) -> Result<Self, Error> {
        Ok(Self {
            bitmap: PixelBuffer::new(width, height, pixels)?,
            top_down,
        })
    }

    /// Tries to read a [`Self`] from a stream positioned at the start of a BMP file
    ///
    /// # Errors
    ///
    /// This function will error if the underlying stream is invalid data for any reason:
    /// - the headers are truncated or the DIB header is too short
    /// - the image is not 32 bits per pixel
    /// - the stream ends before every scanline was read
    /// - reading from the stream fails
    pub fn from_reader(mut r: impl Read) -> Result<Self, Error> {
        let metadata = read_metadata(&mut r)?;
        debug!(
            "Bitmap width, height: {:?}, top down: {}",
            (metadata.width, metadata.height),
            metadata.top_down
        );

        let gap = u64::from(metadata.pixel_offset).saturating_sub(u64::from(metadata.header_len));
        if gap > 0 {
            skip_gap(&mut r, gap, metadata.height)?;
        }

        let bitmap = decode_scanlines(&mut r, metadata.width, metadata.height)?;

        Ok(Self {
            bitmap,
            top_down: metadata.top_down,
        })
    }

    /// Tries to read [`Self`] from a provided file path
    ///
    /// # Errors
    ///
    /// This function will error if the file cannot be opened or if the file contains invalid data.
    /// See [`Self::from_reader`] for potential errors
    pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<Self, Error> {
        let file = File::open(filename)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Writes a fresh 54 byte header followed by the pixel data to `w`
    ///
    /// The file is always bottom-up; see the [crate docs](crate#row-order) for what that means
    /// for [`Self::top_down`] images.
    ///
    /// # Errors
    ///
    /// This function errors if the image is too large for a BMP file or if writing fails
    pub fn write_to(&self, mut w: impl Write) -> Result<(), Error> {
        let header = BmpHeader::for_image(self.width(), self.height())?;
        header.write_to(&mut w)?;
        encode_scanlines(&mut w, &self.bitmap, self.top_down)
    }

    /// Attempts to serialize and save [`Self`] as a file at the provided path
    ///
    /// # Errors
    ///
    /// This will error if unable to open and/or write to the provided filename
    ///
    pub fn into_file(self, filename: impl AsRef<Path>) -> Result<(), Error> {
        let f = File::options()
            .create(true)
            .write(true)
            .truncate(true)
            .open(filename)?;
        let mut f = BufWriter::new(f);
        self.write_to(&mut f)?;
        f.flush()?;
        info!("Finished writing to file");
        Ok(())
    }

    /// Inverts every byte of the image, alpha included
    #[must_use]
    pub fn invert(mut self) -> Self {
        self.invert_in_place();
        self
    }

    /// Inverts every byte of the image in place, alpha included
    pub fn invert_in_place(&mut self) {
        self.bitmap
            .pixels_mut()
            .iter_mut()
            .for_each(|b| *b = u8::MAX - *b);
    }

    /// Converts the image into an [`image::RgbaImage`](::image::RgbaImage)
    ///
    /// Bottom-up images are flipped so that row 0 of the result is the top of the picture.
    ///
    /// # Errors
    ///
    /// This function errors if the dimensions cannot be represented by the `image` crate
    pub fn into_rgba_image(self) -> Result<::image::RgbaImage, Error> {
        let (width, height) = (self.width(), self.height());
        let pixel_len = self.pixels().len();
        let top_down = self.top_down;
        let mut img = ::image::RgbaImage::from_raw(width, height, self.bitmap.into_pixels())
            .ok_or(Error::MismatchDimensions {
                width,
                height,
                pixel_len,
            })?;
        if !top_down {
            ::image::imageops::flip_vertical_in_place(&mut img);
        }
        Ok(img)
    }

    /// Returns the image width
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.bitmap.width()
    }

    /// Returns the image height
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.bitmap.height()
    }

    /// Returns `true` if row 0 of the pixel data is the top of the picture
    #[must_use]
    pub const fn top_down(&self) -> bool {
        self.top_down
    }

    /// Returns the pixels in `[r, g, b, a]` order, row after row
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        self.bitmap.pixels()
    }

    /// Returns the length of one row in bytes
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.bitmap.stride()
    }

    /// Returns row `y` of the pixel data, if it exists
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        self.bitmap.row(y)
    }

    /// Returns a reference to the underlying [`PixelBuffer`]
    #[must_use]
    pub const fn bitmap(&self) -> &PixelBuffer {
        &self.bitmap
    }
}
