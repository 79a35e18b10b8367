// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The scan result record handed to external collaborators.

use scanwarp_geometry::{PixelSpace, Quadrilateral};

use crate::raster::RasterImage;

/// Everything produced by a completed edit session.
///
/// Constructed once per scan and immutable afterwards, except for the
/// `prefer_enhanced` flag which downstream UI may flip before final
/// hand-off. The enhanced image may be absent when the enhancement filter
/// could not process the rectified buffer; the rectified image is always
/// present.
#[derive(Debug, Clone)]
pub struct ScanResult {
    original: RasterImage,
    rectified: RasterImage,
    enhanced: Option<RasterImage>,
    prefer_enhanced: bool,
    detected_quad: Quadrilateral<PixelSpace>,
}

impl ScanResult {
    pub fn new(
        original: RasterImage,
        rectified: RasterImage,
        enhanced: Option<RasterImage>,
        detected_quad: Quadrilateral<PixelSpace>,
        prefer_enhanced: bool,
    ) -> Self {
        Self {
            original,
            rectified,
            enhanced,
            prefer_enhanced,
            detected_quad,
        }
    }

    /// The source image as captured, prior to any cropping.
    pub fn original(&self) -> &RasterImage {
        &self.original
    }

    /// The deskewed, cropped image, without any filters.
    pub fn rectified(&self) -> &RasterImage {
        &self.rectified
    }

    /// The adaptive-threshold variant for OCR-style use, when available.
    pub fn enhanced(&self) -> Option<&RasterImage> {
        self.enhanced.as_ref()
    }

    /// The detected quadrilateral the rectified image was produced from, in
    /// the original image's pixel space.
    pub fn detected_quad(&self) -> &Quadrilateral<PixelSpace> {
        &self.detected_quad
    }

    /// Whether the user wants the enhanced image. The enhanced image may
    /// still be available even when not preferred.
    pub fn prefers_enhanced(&self) -> bool {
        self.prefer_enhanced
    }

    pub fn set_prefer_enhanced(&mut self, prefer: bool) {
        self.prefer_enhanced = prefer;
    }
}
