use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
/// Possible `libbmp` errors
pub enum Error {
    /// Error returned if the bitmap is not 32 bits per pixel
    #[error("bits per pixel must be 32, found {bits_per_pixel}")]
    UnsupportedBitDepth {
        /// bits per pixel declared by the header
        bits_per_pixel: u16,
    },
    /// Error returned if the DIB header is too short to hold a `BITMAPINFOHEADER`
    #[error("unsupported DIB header of {size} bytes")]
    UnsupportedDibHeader {
        /// DIB header size declared by the file
        size: u16,
    },
    /// Error returned if the stream ends inside the file or DIB header
    #[error("stream ended before the end of the header")]
    TruncatedHeader,
    /// Error returned if the stream ends before every scanline was read
    #[error("stream ended after {rows_read} of {height} scanlines")]
    TruncatedPixelData {
        /// complete scanlines read before the end of the stream
        rows_read: u32,
        /// scanlines declared by the header
        height: u32,
    },
    /// Error returned if width/height do not match the length of the pixel data
    #[error("width/height ({width}, {height}) does not match pixel data of {pixel_len} bytes")]
    MismatchDimensions {
        /// image width
        width: u32,
        /// image height
        height: u32,
        /// length of the provided pixel data
        pixel_len: usize,
    },
    /// Error returned if the image is too large to be addressed or stored in a BMP file
    #[error("image of ({width}, {height}) pixels is too large")]
    ImageTooLarge {
        /// image width
        width: u32,
        /// image height
        height: u32,
    },
    /// Error returned if the underlying stream fails
    #[error("i/o error")]
    Io(#[from] std::io::Error),
}
