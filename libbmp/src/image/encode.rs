use std::io::Write;

use tracing::trace;

use crate::{
    image::bitmap::{swap_red_blue, PixelBuffer},
    Error,
};

/// Writes every row of `bitmap` to `w` in on-disk `[b, g, r, a]` order
///
/// The output is always bottom-up: a `top_down` buffer is written starting from its last row.
pub(crate) fn encode_scanlines(
    w: &mut impl Write,
    bitmap: &PixelBuffer,
    top_down: bool,
) -> Result<(), Error> {
    let mut row_buf = Vec::with_capacity(bitmap.stride());
    let mut write_row = |row: &[u8]| {
        row_buf.clear();
        row_buf.extend_from_slice(row);
        swap_red_blue(&mut row_buf);
        w.write_all(&row_buf)
    };

    if top_down {
        bitmap.rows().rev().try_for_each(&mut write_row)?;
    } else {
        bitmap.rows().try_for_each(&mut write_row)?;
    }
    trace!(top_down, "Encoded {} scanlines", bitmap.height());
    Ok(())
}
