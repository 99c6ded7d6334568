use std::io::Cursor;

mod common;
use common::{FailingReader, RawBmp, BGRA_2X2, RGBA_2X2};
use libbmp::{read_metadata, BmpImage, Error};

#[test]
fn decode_swaps_blue_and_red() -> anyhow::Result<()> {
    let bytes = RawBmp {
        width: 2,
        height: 2,
        data: &BGRA_2X2,
        ..Default::default()
    }
    .to_bytes();

    let img = libbmp::decode(bytes.as_slice())?;
    assert_eq!((img.width(), img.height()), (2, 2));
    assert!(!img.top_down());
    assert_eq!(img.pixels(), &RGBA_2X2);
    assert_eq!(img.stride(), 8);
    assert_eq!(img.row(1), Some(&RGBA_2X2[8..]));
    assert_eq!(img.row(2), None);
    Ok(())
}

#[test]
fn negative_height_is_top_down() -> anyhow::Result<()> {
    let data: Vec<u8> = (0..3 * 10 * 4).map(|i| i as u8).collect();
    let bytes = RawBmp {
        width: 3,
        height: -10,
        data: &data,
        ..Default::default()
    }
    .to_bytes();

    let img = BmpImage::from_reader(bytes.as_slice())?;
    assert_eq!((img.width(), img.height()), (3, 10));
    assert!(img.top_down());
    // rows keep their stored position
    assert_eq!(img.row(0), Some(&[2, 1, 0, 3, 6, 5, 4, 7, 10, 9, 8, 11][..]));
    Ok(())
}

#[test]
fn negative_width_uses_magnitude() -> anyhow::Result<()> {
    let bytes = RawBmp {
        width: -2,
        height: 2,
        data: &BGRA_2X2,
        ..Default::default()
    }
    .to_bytes();

    let img = libbmp::decode(bytes.as_slice())?;
    assert_eq!((img.width(), img.height()), (2, 2));
    assert_eq!(img.pixels(), &RGBA_2X2);
    Ok(())
}

#[test]
fn metadata_consumes_only_headers() -> anyhow::Result<()> {
    let bytes = RawBmp {
        width: 2,
        height: -2,
        data: &BGRA_2X2,
        ..Default::default()
    }
    .to_bytes();

    let mut cursor = Cursor::new(bytes);
    let metadata = read_metadata(&mut cursor)?;
    assert_eq!(cursor.position(), 54);
    assert_eq!(metadata.width, 2);
    assert_eq!(metadata.height, 2);
    assert_eq!(metadata.bits_per_pixel, 32);
    assert!(metadata.top_down);
    assert_eq!(metadata.pixel_offset, 54);
    assert_eq!(metadata.header_len, 54);
    Ok(())
}

#[test]
fn rejects_24_bits_per_pixel() {
    let bytes = RawBmp {
        width: 2,
        height: 2,
        bits_per_pixel: 24,
        data: &BGRA_2X2,
        ..Default::default()
    }
    .to_bytes();

    let err = libbmp::decode(bytes.as_slice()).unwrap_err();
    assert!(
        matches!(err, Error::UnsupportedBitDepth { bits_per_pixel: 24 }),
        "{err:?}"
    );
}

#[test]
fn rejects_core_header() {
    let bytes = RawBmp {
        dib_size: 12,
        ..Default::default()
    }
    .to_bytes();

    let err = libbmp::decode(bytes.as_slice()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedDibHeader { size: 12 }), "{err:?}");
}

#[test]
fn truncated_header() {
    let bytes = RawBmp {
        width: 2,
        height: 2,
        data: &BGRA_2X2,
        ..Default::default()
    }
    .to_bytes();

    // inside the first 18 bytes, and inside the rest of the DIB header
    for len in [0, 10, 17, 30, 53] {
        let err = libbmp::decode(&bytes[..len]).unwrap_err();
        assert!(matches!(err, Error::TruncatedHeader), "{len}: {err:?}");
    }
}

#[test]
fn truncated_pixel_data() {
    let bytes = RawBmp {
        width: 2,
        height: 2,
        data: &BGRA_2X2[..12],
        ..Default::default()
    }
    .to_bytes();

    let err = libbmp::decode(bytes.as_slice()).unwrap_err();
    assert!(
        matches!(
            err,
            Error::TruncatedPixelData {
                rows_read: 1,
                height: 2
            }
        ),
        "{err:?}"
    );
}

#[test]
fn reads_v5_header() -> anyhow::Result<()> {
    let bytes = RawBmp {
        width: 2,
        height: 2,
        dib_size: 124,
        data: &BGRA_2X2,
        ..Default::default()
    }
    .to_bytes();

    let mut cursor = Cursor::new(bytes.as_slice());
    let metadata = read_metadata(&mut cursor)?;
    assert_eq!(cursor.position(), 14 + 124);
    assert_eq!(metadata.header_len, 14 + 124);

    let img = libbmp::decode(bytes.as_slice())?;
    assert_eq!(img.pixels(), &RGBA_2X2);
    Ok(())
}

#[test]
fn skips_to_pixel_offset() -> anyhow::Result<()> {
    let bytes = RawBmp {
        width: 2,
        height: 2,
        gap: 12,
        data: &BGRA_2X2,
        ..Default::default()
    }
    .to_bytes();

    let img = libbmp::decode(bytes.as_slice())?;
    assert_eq!(img.pixels(), &RGBA_2X2);
    Ok(())
}

#[test]
fn truncated_gap() {
    let bytes = RawBmp {
        width: 2,
        height: 2,
        gap: 12,
        ..Default::default()
    }
    .to_bytes();

    let err = libbmp::decode(&bytes[..60]).unwrap_err();
    assert!(
        matches!(
            err,
            Error::TruncatedPixelData {
                rows_read: 0,
                height: 2
            }
        ),
        "{err:?}"
    );
}

#[test]
fn empty_image() -> anyhow::Result<()> {
    for (width, height) in [(0, 0), (0, 5), (5, 0)] {
        let bytes = RawBmp {
            width,
            height,
            ..Default::default()
        }
        .to_bytes();

        let img = libbmp::decode(bytes.as_slice())?;
        assert_eq!((img.width(), img.height()), (width as u32, height as u32));
        assert!(img.pixels().is_empty());
    }
    Ok(())
}

#[test]
fn huge_dimensions_without_data() {
    let bytes = RawBmp {
        width: 1_000_000,
        height: 1_000_000,
        ..Default::default()
    }
    .to_bytes();
    assert_eq!(bytes.len(), 54);

    let err = libbmp::decode(bytes.as_slice()).unwrap_err();
    assert!(
        matches!(
            err,
            Error::TruncatedPixelData {
                rows_read: 0,
                height: 1_000_000
            }
        ),
        "{err:?}"
    );
}

#[test]
fn read_error_inside_header() {
    let bytes = RawBmp {
        width: 2,
        height: 2,
        data: &BGRA_2X2,
        ..Default::default()
    }
    .to_bytes();

    for len in [0, 30] {
        let err = libbmp::decode(FailingReader { data: &bytes[..len] }).unwrap_err();
        assert!(matches!(err, Error::Io(_)), "{len}: {err:?}");
    }
}

#[test]
fn read_error_inside_pixel_data() {
    let bytes = RawBmp {
        width: 2,
        height: 2,
        data: &BGRA_2X2,
        ..Default::default()
    }
    .to_bytes();

    let err = libbmp::decode(FailingReader { data: &bytes[..66] }).unwrap_err();
    assert!(matches!(err, Error::Io(_)), "{err:?}");
}
