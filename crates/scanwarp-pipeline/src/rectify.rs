// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perspective rectification: warp the document-boundary quadrilateral to an
// axis-aligned rectangle via a four-point-correspondence projective
// transform.

use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use scanwarp_core::error::{Result, ScanError};
use scanwarp_geometry::{CartesianSpace, PixelSpace, Point, Quadrilateral};
use tracing::{debug, info, instrument, warn};

use crate::raster::RasterImage;

/// Rectify (deskew and crop) the region of `image` bounded by `quad`.
///
/// `quad` must be expressed in `image`'s own pixel space. The corners are
/// flipped into the bottom-up Cartesian frame and canonicalized there; after
/// the flip the canonical "top" pair is the display-space bottom pair, so
/// the warp's source corners are read from the opposite Cartesian labels
/// (`bottom_left`/`bottom_right`/`top_left`/`top_right` feed the warp's
/// top-left/top-right/bottom-left/bottom-right respectively). Getting that
/// mapping backward vertically mirrors the output.
///
/// Output dimensions are deterministic: width is the longer of the top and
/// bottom edge lengths, height the longer of the left and right, each
/// rounded with a 1 px floor.
///
/// A source image with no pixels is fatal ([`ScanError::ImageDecoding`]).
/// A quad too degenerate to define a projective transform (collinear or
/// coincident corners) is a caller-validation concern: the warp is skipped
/// with a warning and the source pixels are returned unchanged, with no
/// attempt at geometry repair.
#[instrument(skip(image, quad), fields(width = image.width(), height = image.height()))]
pub fn rectify(image: &RasterImage, quad: &Quadrilateral<PixelSpace>) -> Result<RasterImage> {
    if image.width() == 0 || image.height() == 0 {
        return Err(ScanError::ImageDecoding(
            "source image has no pixels".into(),
        ));
    }

    let height = image.height() as f32;
    let cartesian = quad.to_cartesian(height).reorganize();

    // Opposite-corner correspondence after the vertical flip.
    let src_top_left = warp_coords(cartesian.bottom_left, height);
    let src_top_right = warp_coords(cartesian.bottom_right, height);
    let src_bottom_left = warp_coords(cartesian.top_left, height);
    let src_bottom_right = warp_coords(cartesian.top_right, height);

    let out_w = edge(src_top_left, src_top_right)
        .max(edge(src_bottom_left, src_bottom_right))
        .round()
        .max(1.0) as u32;
    let out_h = edge(src_top_left, src_bottom_left)
        .max(edge(src_top_right, src_bottom_right))
        .round()
        .max(1.0) as u32;

    debug!(out_w, out_h, "Rectified output size computed from edge lengths");

    let src = [
        src_top_left,
        src_top_right,
        src_bottom_right,
        src_bottom_left,
    ];
    let dst: [(f32, f32); 4] = [
        (0.0, 0.0),
        (out_w as f32, 0.0),
        (out_w as f32, out_h as f32),
        (0.0, out_h as f32),
    ];

    let projection = match Projection::from_control_points(src, dst) {
        Some(p) => p,
        None => {
            warn!(
                quad_area = quad.area(),
                "Quad corners do not define a projective transform; returning source unchanged"
            );
            return Ok(RasterImage::from_pixels(image.as_pixels().clone()));
        }
    };

    let rgba_input = image.as_pixels().to_rgba8();
    let fill = Rgba([255u8, 255, 255, 255]);
    let mut output = RgbaImage::new(out_w, out_h);
    warp_into(
        &rgba_input,
        &projection,
        Interpolation::Bilinear,
        fill,
        &mut output,
    );

    info!(out_w, out_h, "Perspective rectification applied");
    Ok(RasterImage::from_pixels(DynamicImage::ImageRgba8(output)))
}

/// Convert a bottom-up Cartesian corner back into the top-down pixel
/// coordinates the warp primitive samples in.
fn warp_coords(p: Point<CartesianSpace>, reference_height: f32) -> (f32, f32) {
    (p.x, reference_height - p.y)
}

fn edge(a: (f32, f32), b: (f32, f32)) -> f32 {
    ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt()
}
