use std::io::{self, Read, Write};

use bon::Builder;
use tracing::{debug, trace, warn};

use crate::{Error, BITS_PER_PIXEL, FILE_HEADER_LEN, HEADER_LEN, INFO_HEADER_LEN, MAGIC};

const HEADER_LEN_U32: u32 = HEADER_LEN as u32;
const INFO_HEADER_LEN_U32: u32 = INFO_HEADER_LEN as u32;

/// File header plus `BITMAPINFOHEADER`, as written in front of the pixel data
///
/// ## Note
///
/// The defaults describe an empty, uncompressed, single plane, 32 bits per pixel image without a
/// color table. Use [`BmpHeader::for_image`] to get a header matching an image's dimensions; the
/// builder lets callers override single fields, in which case keeping the record consistent is
/// on them.
///
/// Every field is written little-endian, in declaration order, for a total of
/// [`HEADER_LEN`](crate::HEADER_LEN) bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Builder)]
#[non_exhaustive]
pub struct BmpHeader {
    /// Magic identifier, `BM`
    #[builder(default = MAGIC)]
    pub id: [u8; 2],

    /// Size of the whole file in bytes
    #[builder(default = HEADER_LEN_U32)]
    pub file_size: u32,

    /// Reserved, always 0
    #[builder(default)]
    pub reserved1: u16,

    /// Reserved, always 0
    #[builder(default)]
    pub reserved2: u16,

    /// Offset of the pixel data from the start of the file
    #[builder(default = HEADER_LEN_U32)]
    pub offset: u32,

    /// Size of the DIB header
    #[builder(default = INFO_HEADER_LEN_U32)]
    pub header_size: u32,

    /// Image width in pixels
    #[builder(default)]
    pub width: u32,

    /// Image height in pixels
    ///
    /// Always written as a positive magnitude, i.e. the file is bottom-up
    #[builder(default)]
    pub height: u32,

    /// Number of color planes, always 1
    #[builder(default = 1)]
    pub color_planes: u16,

    /// Bits per pixel
    #[builder(default = BITS_PER_PIXEL)]
    pub bits_per_pixel: u16,

    /// Compression method, 0 (`BI_RGB`)
    #[builder(default)]
    pub compression: u32,

    /// Size of the pixel data in bytes
    #[builder(default)]
    pub image_size: u32,

    /// Horizontal pixels per meter
    #[builder(default)]
    pub x_pixels_per_meter: u32,

    /// Vertical pixels per meter
    #[builder(default)]
    pub y_pixels_per_meter: u32,

    /// Number of colors in the color table
    #[builder(default)]
    pub colors_used: u32,

    /// Number of important colors
    #[builder(default)]
    pub colors_important: u32,
}

impl Default for BmpHeader {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl BmpHeader {
    /// Creates the header for a `width` x `height`, 32 bits per pixel image
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImageTooLarge`] if the pixel data or file size do not fit in 32 bits
    pub fn for_image(width: u32, height: u32) -> Result<Self, Error> {
        let too_large = || Error::ImageTooLarge { width, height };
        let image_size = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(u32::from(BITS_PER_PIXEL / 8)))
            .ok_or_else(too_large)?;
        let file_size = image_size
            .checked_add(HEADER_LEN_U32)
            .ok_or_else(too_large)?;

        Ok(Self::builder()
            .width(width)
            .height(height)
            .image_size(image_size)
            .file_size(file_size)
            .build())
    }

    /// Serializes the header into its little-endian on-disk layout
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0; HEADER_LEN];
        out[0..2].copy_from_slice(&self.id);
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        out[6..8].copy_from_slice(&self.reserved1.to_le_bytes());
        out[8..10].copy_from_slice(&self.reserved2.to_le_bytes());
        out[10..14].copy_from_slice(&self.offset.to_le_bytes());
        out[14..18].copy_from_slice(&self.header_size.to_le_bytes());
        out[18..22].copy_from_slice(&self.width.to_le_bytes());
        out[22..26].copy_from_slice(&self.height.to_le_bytes());
        out[26..28].copy_from_slice(&self.color_planes.to_le_bytes());
        out[28..30].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        out[30..34].copy_from_slice(&self.compression.to_le_bytes());
        out[34..38].copy_from_slice(&self.image_size.to_le_bytes());
        out[38..42].copy_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        out[42..46].copy_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        out[46..50].copy_from_slice(&self.colors_used.to_le_bytes());
        out[50..54].copy_from_slice(&self.colors_important.to_le_bytes());
        out
    }

    /// Writes the header to `w`
    ///
    /// # Errors
    ///
    /// This function errors if writing to `w` fails
    pub fn write_to(&self, w: &mut impl Write) -> io::Result<()> {
        w.write_all(&self.to_bytes())
    }
}

/// Geometry and pixel format read from the headers of a BMP file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct Metadata {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels, always positive
    pub height: u32,
    /// Bits per pixel
    pub bits_per_pixel: u16,
    /// `true` if the file stores its scanlines top to bottom (negative height)
    pub top_down: bool,
    /// Offset of the pixel data from the start of the file, as declared by the file header
    pub pixel_offset: u32,
    /// Bytes consumed from the stream: file header plus DIB header
    pub header_len: u32,
}

/// Reads the file header and DIB header from `r`
///
/// Exactly `14 + dib header size` bytes are consumed, leaving `r` at the first byte after the
/// DIB header.
///
/// # Errors
///
/// This function will error if:
/// - the stream ends inside the headers ([`Error::TruncatedHeader`])
/// - the DIB header is shorter than a `BITMAPINFOHEADER` ([`Error::UnsupportedDibHeader`])
/// - the image is not 32 bits per pixel ([`Error::UnsupportedBitDepth`])
pub fn read_metadata(r: &mut impl Read) -> Result<Metadata, Error> {
    // file header and the start of the DIB header, which holds its length
    let mut head = vec![0; FILE_HEADER_LEN + 4];
    read_header_bytes(r, &mut head)?;

    let dib_size = u16_le(&head, FILE_HEADER_LEN);
    debug!("DIB header size: {dib_size}");
    if usize::from(dib_size) < INFO_HEADER_LEN {
        return Err(Error::UnsupportedDibHeader { size: dib_size });
    }
    head.resize(FILE_HEADER_LEN + usize::from(dib_size), 0);
    read_header_bytes(r, &mut head[FILE_HEADER_LEN + 4..])?;

    if head[0..2] != MAGIC {
        warn!("Unexpected magic {:?}, reading as a bitmap anyway", &head[0..2]);
    }
    let compression = u32_le(&head, 30);
    if compression != 0 {
        warn!("Ignoring compression method {compression}");
    }

    let raw_width = i32_le(&head, 18);
    let raw_height = i32_le(&head, 22);
    let bits_per_pixel = u16_le(&head, 28);
    trace!(raw_width, raw_height, bits_per_pixel, "Read BMP header");

    if bits_per_pixel != BITS_PER_PIXEL {
        return Err(Error::UnsupportedBitDepth { bits_per_pixel });
    }

    Ok(Metadata {
        width: raw_width.unsigned_abs(),
        height: raw_height.unsigned_abs(),
        bits_per_pixel,
        top_down: raw_height < 0,
        pixel_offset: u32_le(&head, 10),
        header_len: u32::from(dib_size) + FILE_HEADER_LEN as u32,
    })
}

fn read_header_bytes(r: &mut impl Read, buf: &mut [u8]) -> Result<(), Error> {
    r.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => Error::TruncatedHeader,
        _ => Error::Io(e),
    })
}

fn u16_le(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn u32_le(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn i32_le(bytes: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}
