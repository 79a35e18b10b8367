// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Enhancement: adaptive local-mean thresholding over an integral image,
// producing the high-contrast grayscale variant used for OCR-oriented
// output.

use image::{DynamicImage, GrayImage, Luma};
use scanwarp_core::config::ScanConfig;
use tracing::{debug, instrument, warn};

use crate::raster::RasterImage;

/// Derive the high-contrast enhancement variant of a rectified image.
///
/// The image is converted to grayscale, contrast-boosted by
/// `config.contrast_factor`, then binarized with an adaptive local
/// threshold: each pixel is compared against the mean intensity of its
/// `config.threshold_block_radius` neighbourhood minus
/// `config.threshold_offset`.
///
/// Returns `None` when the filter cannot process the buffer (an image with
/// no pixels). This is a soft failure: the scan proceeds without an
/// enhanced variant rather than aborting.
#[instrument(skip(image, config), fields(width = image.width(), height = image.height()))]
pub fn enhance(image: &RasterImage, config: &ScanConfig) -> Option<RasterImage> {
    if image.width() == 0 || image.height() == 0 {
        warn!("Enhancement filter cannot process an empty buffer; skipping");
        return None;
    }

    let gray = boost_contrast(&image.as_pixels().to_luma8(), config.contrast_factor);
    let (width, height) = gray.dimensions();

    let integral = integral_image(&gray);
    let radius = config.threshold_block_radius;

    let mut output = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let mean = local_mean(&integral, width, height, x, y, radius);
            let threshold = (mean as i32 - config.threshold_offset).clamp(0, 255) as u8;
            let value = if gray.get_pixel(x, y).0[0] < threshold {
                0u8
            } else {
                255u8
            };
            output.put_pixel(x, y, Luma([value]));
        }
    }

    debug!("Adaptive thresholding complete");
    Some(RasterImage::from_pixels(DynamicImage::ImageLuma8(output)))
}

/// Stretch grayscale values away from mid-gray by `factor` (1.0 is a no-op).
fn boost_contrast(gray: &GrayImage, factor: f32) -> GrayImage {
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let v = gray.get_pixel(x, y).0[0] as f32;
        Luma([(factor * (v - 128.0) + 128.0).clamp(0.0, 255.0) as u8])
    })
}

/// Summed-area table with a zero-padded border: entry `(x, y)` in the
/// `(width+1) x (height+1)` table holds the sum of all pixels in the
/// half-open rectangle [0, x) x [0, y).
fn integral_image(gray: &GrayImage) -> Vec<u64> {
    let (w, h) = gray.dimensions();
    let stride = (w + 1) as usize;
    let mut table = vec![0u64; stride * (h + 1) as usize];

    for y in 0..h {
        let mut row_sum = 0u64;
        for x in 0..w {
            row_sum += gray.get_pixel(x, y).0[0] as u64;
            let idx = (y + 1) as usize * stride + (x + 1) as usize;
            table[idx] = row_sum + table[idx - stride];
        }
    }

    table
}

/// Mean intensity of the square neighbourhood centred on `(cx, cy)`,
/// clamped to image bounds.
fn local_mean(integral: &[u64], width: u32, height: u32, cx: u32, cy: u32, radius: u32) -> f64 {
    let stride = (width + 1) as usize;

    let x1 = cx.saturating_sub(radius) as usize;
    let y1 = cy.saturating_sub(radius) as usize;
    let x2 = ((cx + radius + 1) as usize).min(width as usize);
    let y2 = ((cy + radius + 1) as usize).min(height as usize);

    let area = ((x2 - x1) * (y2 - y1)) as f64;
    if area == 0.0 {
        return 128.0;
    }

    let sum = integral[y2 * stride + x2] as f64 - integral[y1 * stride + x2] as f64
        - integral[y2 * stride + x1] as f64
        + integral[y1 * stride + x1] as f64;
    sum / area
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_like_image() -> RasterImage {
        // Light page with dark horizontal strokes.
        let mut img = GrayImage::from_pixel(120, 80, Luma([220u8]));
        for line in 0..4u32 {
            let y0 = 12 + line * 18;
            for y in y0..y0 + 3 {
                for x in 10..110 {
                    img.put_pixel(x, y, Luma([40u8]));
                }
            }
        }
        RasterImage::from_pixels(DynamicImage::ImageLuma8(img))
    }

    #[test]
    fn output_is_binary_grayscale() {
        let image = text_like_image();
        let enhanced = enhance(&image, &ScanConfig::default()).expect("enhance");

        assert_eq!((enhanced.width(), enhanced.height()), (120, 80));
        let gray = enhanced.as_pixels().to_luma8();
        assert!(gray.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn dark_strokes_stay_dark_and_page_stays_light() {
        let image = text_like_image();
        let enhanced = enhance(&image, &ScanConfig::default()).expect("enhance");
        let gray = enhanced.as_pixels().to_luma8();

        // Middle of the first stroke.
        assert_eq!(gray.get_pixel(60, 13).0[0], 0);
        // Page background well away from any stroke.
        assert_eq!(gray.get_pixel(60, 78).0[0], 255);
    }

    #[test]
    fn empty_buffer_is_a_soft_failure() {
        let image = RasterImage::from_pixels(DynamicImage::new_luma8(0, 0));
        assert!(enhance(&image, &ScanConfig::default()).is_none());
    }

    #[test]
    fn integral_image_sums_match_brute_force() {
        let mut img = GrayImage::new(5, 4);
        for y in 0..4 {
            for x in 0..5 {
                img.put_pixel(x, y, Luma([(x + y * 5) as u8]));
            }
        }
        let table = integral_image(&img);
        let stride = 6usize;

        // Full-image sum.
        let total: u64 = img.pixels().map(|p| p.0[0] as u64).sum();
        assert_eq!(table[4 * stride + 5], total);

        // 2x2 block at (1, 1): values 6, 7, 11, 12.
        let sum =
            table[3 * stride + 3] - table[stride + 3] - table[3 * stride + 1] + table[stride + 1];
        assert_eq!(sum, 36);
    }
}
