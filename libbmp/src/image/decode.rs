use std::io::{self, Read};

use tracing::trace;

use crate::{
    image::bitmap::{swap_red_blue, PixelBuffer},
    Error,
};

/// Reads `height` scanlines of `width` pixels from `r`
///
/// Rows land at the index they are stored at in the file; no reordering happens here. The buffer
/// grows with the bytes actually read, so a header claiming a huge image costs nothing until the
/// pixel data shows up.
pub(crate) fn decode_scanlines(
    r: &mut impl Read,
    width: u32,
    height: u32,
) -> Result<PixelBuffer, Error> {
    let (stride, len) = PixelBuffer::geometry(width, height)?;
    let limit = u64::try_from(len).map_err(|_| Error::ImageTooLarge { width, height })?;

    let mut pixels = Vec::new();
    let read = r.by_ref().take(limit).read_to_end(&mut pixels)?;
    if read < len {
        // `len > 0` here, so `stride > 0`
        let rows_read = u32::try_from(read / stride).unwrap_or(height);
        return Err(Error::TruncatedPixelData { rows_read, height });
    }

    swap_red_blue(&mut pixels);
    trace!("Decoded {height} scanlines");
    PixelBuffer::new(width, height, pixels)
}

/// Reads and discards the bytes between the end of the headers and the pixel data
pub(crate) fn skip_gap(r: &mut impl Read, gap: u64, height: u32) -> Result<(), Error> {
    let skipped = io::copy(&mut r.by_ref().take(gap), &mut io::sink())?;
    if skipped < gap {
        return Err(Error::TruncatedPixelData {
            rows_read: 0,
            height,
        });
    }
    trace!("Skipped {skipped} bytes before pixel data");
    Ok(())
}
