use std::slice::ChunksExact;

use crate::{Error, BYTES_PER_PIXEL};

/// Decoded pixels of a BMP image
///
/// Pixels are stored row after row, four bytes each, in `[r, g, b, a]` order.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct PixelBuffer {
    /// The width of the image
    width: u32,
    /// The height of the image
    height: u32,
    /// Length of one row in bytes
    stride: usize,
    /// Image pixels
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a new [`PixelBuffer`] from existing pixel data
    ///
    /// # Errors
    ///
    /// This function errors if `pixels` is not exactly `width * height * 4` bytes long
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, Error> {
        let (stride, len) = Self::geometry(width, height)?;
        if pixels.len() != len {
            return Err(Error::MismatchDimensions {
                width,
                height,
                pixel_len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            stride,
            pixels,
        })
    }

    // stride and total length in bytes
    pub(crate) fn geometry(width: u32, height: u32) -> Result<(usize, usize), Error> {
        let too_large = || Error::ImageTooLarge { width, height };
        let stride = usize::try_from(width)
            .ok()
            .and_then(|w| w.checked_mul(BYTES_PER_PIXEL))
            .ok_or_else(too_large)?;
        let len = usize::try_from(height)
            .ok()
            .and_then(|h| h.checked_mul(stride))
            .ok_or_else(too_large)?;
        Ok((stride, len))
    }

    /// Returns the width of the image
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the length of one row in bytes
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the pixels of the image
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub(crate) fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Returns row `y` of the image, if it exists
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y < self.height {
            let start_index = usize::try_from(y).ok()? * self.stride;
            Some(&self.pixels[start_index..start_index + self.stride])
        } else {
            None
        }
    }

    // a zero width image has no bytes to hand out, so it yields no rows at all
    pub(crate) fn rows(&self) -> ChunksExact<'_, u8> {
        self.pixels.chunks_exact(self.stride.max(1))
    }
}

/// Swaps the first and third byte of every pixel in `pixels`
///
/// Converts between the on-disk `[b, g, r, a]` and the in-memory `[r, g, b, a]` order, both ways.
pub(crate) fn swap_red_blue(pixels: &mut [u8]) {
    pixels.chunks_exact_mut(BYTES_PER_PIXEL)
        .for_each(|pixel| pixel.swap(0, 2));
}
