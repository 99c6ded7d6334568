/// Demonstrates how to create an inverted png file from a [`BmpImage`]
/// using the [`image`] crate
///
use anyhow::Context;
use image::{codecs::png::PngEncoder, ImageEncoder};
use libbmp::BmpImage;
use std::fs::File;

fn main() -> anyhow::Result<()> {
    let input = std::env::args()
        .nth(1)
        .context("usage: bmp_to_png <file.bmp>")?;
    let bmp = BmpImage::from_file(&input)?.invert();

    let (width, height) = (bmp.width(), bmp.height());
    let rgba = bmp.into_rgba_image()?;

    let output = File::options()
        .create(true)
        .write(true)
        .truncate(true)
        .open("bmp_to_png_example.png")?;

    let encoder = PngEncoder::new(output);
    encoder.write_image(&rgba, width, height, image::ExtendedColorType::Rgba8)?;
    Ok(())
}
