//! # Image Flattening and Band Packing
//!
//! Prepares a decoded image for the `ESC X` bit image command: scale it to the
//! print size, drop transparency against white paper, and pack the dithered
//! dots into 24-row column bands.

use image::{DynamicImage, RgbImage, imageops::FilterType};

use crate::protocol::graphics::BAND_HEIGHT;

/// Scale `source` to exactly `width` x `height` and composite it on white.
///
/// Transparent pixels become paper, so a PNG logo with an alpha channel
/// prints only its opaque parts.
pub fn flatten(source: &DynamicImage, width: u32, height: u32) -> RgbImage {
    let resized = if source.width() == width && source.height() == height {
        source.to_rgba8()
    } else {
        source
            .resize_exact(width, height, FilterType::Lanczos3)
            .to_rgba8()
    };

    let mut out = RgbImage::new(width, height);
    for (x, y, pixel) in resized.enumerate_pixels() {
        let alpha = pixel[3] as f32 / 255.0;
        let blend = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        out.put_pixel(x, y, image::Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])]));
    }
    out
}

/// Pack a row-major dot map into 24-row bands.
///
/// Each band holds `width * 3` bytes: for every column, rows 0-7, 8-15 and
/// 16-23 of the band, MSB = top row. A band that runs past the last row is
/// padded with white.
///
/// ## Example
///
/// ```
/// use starline::render::raster::column_bands;
///
/// let mut dots = vec![false; 8 * 24];
/// dots[0] = true; // top left
/// let bands = column_bands(&dots, 8, 24);
/// assert_eq!(bands.len(), 1);
/// assert_eq!(&bands[0][..3], &[0x80, 0x00, 0x00]);
/// ```
pub fn column_bands(dots: &[bool], width: usize, height: usize) -> Vec<Vec<u8>> {
    debug_assert_eq!(dots.len(), width * height);

    (0..height.div_ceil(BAND_HEIGHT))
        .map(|band| {
            let top = band * BAND_HEIGHT;
            let mut data = vec![0u8; width * 3];
            for x in 0..width {
                for row in 0..BAND_HEIGHT {
                    let y = top + row;
                    if y < height && dots[y * width + x] {
                        data[x * 3 + row / 8] |= 0x80 >> (row % 8);
                    }
                }
            }
            data
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_flatten_transparent_is_white() {
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 24, Rgba([0, 0, 0, 0])));
        let flat = flatten(&source, 8, 24);
        assert!(flat.pixels().all(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn test_flatten_opaque_is_kept() {
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 24, Rgba([10, 20, 30, 255])));
        let flat = flatten(&source, 8, 24);
        assert!(flat.pixels().all(|p| p.0 == [10, 20, 30]));
    }

    #[test]
    fn test_flatten_resizes() {
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255])));
        let flat = flatten(&source, 16, 48);
        assert_eq!(flat.dimensions(), (16, 48));
    }

    #[test]
    fn test_column_bands_layout() {
        let width = 2;
        let mut dots = vec![false; width * 48];
        dots[7 * width] = true; // column 0, row 7
        dots[8 * width + 1] = true; // column 1, row 8
        dots[23 * width] = true; // column 0, row 23
        dots[24 * width + 1] = true; // column 1, row 0 of band 2

        let bands = column_bands(&dots, width, 48);
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0], vec![0x01, 0x00, 0x01, 0x00, 0x80, 0x00]);
        assert_eq!(bands[1], vec![0x00, 0x00, 0x00, 0x80, 0x00, 0x00]);
    }

    #[test]
    fn test_column_bands_pads_short_band() {
        let dots = vec![true; 8 * 10];
        let bands = column_bands(&dots, 8, 10);
        assert_eq!(bands.len(), 1);
        assert_eq!(&bands[0][..3], &[0xFF, 0xC0, 0x00]);
    }
}
