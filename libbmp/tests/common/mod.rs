#![allow(dead_code)]

use std::io::{self, Read, Write};

/// Raw header values for hand-built test bitmaps
pub struct RawBmp<'a> {
    pub width: i32,
    pub height: i32,
    pub bits_per_pixel: u16,
    pub dib_size: u32,
    /// bytes between the headers and the pixel data
    pub gap: usize,
    /// pixel data exactly as stored on disk
    pub data: &'a [u8],
}

impl Default for RawBmp<'_> {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            bits_per_pixel: 32,
            dib_size: 40,
            gap: 0,
            data: &[],
        }
    }
}

impl RawBmp<'_> {
    pub fn to_bytes(&self) -> Vec<u8> {
        let offset = 14 + self.dib_size + self.gap as u32;
        let file_size = offset + self.data.len() as u32;

        let mut out = Vec::new();
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&file_size.to_le_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&offset.to_le_bytes());

        out.extend_from_slice(&self.dib_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&(self.data.len() as u32).to_le_bytes());
        // densities, color counts
        out.extend_from_slice(&[0; 16]);
        // remaining bytes of larger DIB headers
        out.resize(14 + self.dib_size as usize, 0);

        out.resize(out.len() + self.gap, 0xEE);
        out.extend_from_slice(self.data);
        out
    }
}

/// A 2x2 image in on-disk order, rows stored as [bottom, top]
pub const BGRA_2X2: [u8; 16] = [
    10, 20, 30, 40, 11, 21, 31, 41, // first stored row
    12, 22, 32, 42, 13, 23, 33, 43, // second stored row
];

/// [`BGRA_2X2`] in `[r, g, b, a]` order
pub const RGBA_2X2: [u8; 16] = [
    30, 20, 10, 40, 31, 21, 11, 41, //
    32, 22, 12, 42, 33, 23, 13, 43, //
];

/// Serves `data`, then fails every further read with [`io::ErrorKind::Other`]
pub struct FailingReader<'a> {
    pub data: &'a [u8],
}

impl Read for FailingReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::new(io::ErrorKind::Other, "device unplugged"));
        }
        self.data.read(buf)
    }
}

/// Fails every write with [`io::ErrorKind::Other`]
pub struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
