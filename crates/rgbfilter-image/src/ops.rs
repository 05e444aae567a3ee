use crate::{Grid, ImageError, ImageSize, Rgb};

/// Build a grid from an interleaved 8-bit RGB buffer.
///
/// Channel values keep their 0-255 magnitude as floating point.
///
/// # Arguments
///
/// * `size` - The size of the image in pixels.
/// * `data` - Interleaved `r, g, b` bytes, row after row.
///
/// # Errors
///
/// If the buffer length is not `3 * width * height`, an error is returned.
///
/// # Examples
///
/// ```
/// use rgbfilter_image::{ops, Rgb};
///
/// let grid = ops::from_rgb8([2, 1].into(), &[0, 128, 255, 1, 2, 3]).unwrap();
/// assert_eq!(grid[(0, 1)], Rgb::new(1.0, 2.0, 3.0));
/// ```
pub fn from_rgb8(size: ImageSize, data: &[u8]) -> Result<Grid, ImageError> {
    if data.len() != size.area() * 3 {
        return Err(ImageError::InvalidChannelShape(data.len(), size.area() * 3));
    }

    let samples = data
        .chunks_exact(3)
        .map(|px| Rgb::new(px[0] as f32, px[1] as f32, px[2] as f32))
        .collect();

    Grid::new(size, samples)
}

/// Quantize a grid into an interleaved 8-bit RGB buffer.
///
/// Every channel is rounded to the nearest integer and saturated to `[0, 255]`.
/// NaN channels become 0.
///
/// # Examples
///
/// ```
/// use rgbfilter_image::{ops, Grid, Rgb};
///
/// let grid = Grid::from_rows(vec![vec![Rgb::new(-4.0, 127.6, 300.0)]]).unwrap();
/// assert_eq!(ops::to_rgb8(&grid), vec![0, 128, 255]);
/// ```
pub fn to_rgb8(grid: &Grid) -> Vec<u8> {
    grid.as_slice()
        .iter()
        .flat_map(|px| [quantize(px.r), quantize(px.g), quantize(px.b)])
        .collect()
}

fn quantize(x: f32) -> u8 {
    // float to int `as` casts saturate and map NaN to 0
    x.round().clamp(0.0, 255.0) as u8
}
