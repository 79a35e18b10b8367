// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster images with explicit orientation metadata, and the orientation
// normalization step applied to every image leaving the pipeline.

use std::io::Cursor;

use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader};
use scanwarp_core::error::{Result, ScanError};
use scanwarp_geometry::Size;
use tracing::{debug, info, instrument};

/// An in-memory pixel buffer paired with its orientation metadata.
///
/// Filter stages (rectification, enhancement) produce buffers whose
/// orientation tag is defaulted, so every image is passed through
/// [`RasterImage::fix_orientation`] before leaving the pipeline.
///
/// Derivations always allocate new buffers; a `RasterImage` is never
/// mutated in place by the pipeline.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pixels: DynamicImage,
    orientation: Orientation,
}

impl RasterImage {
    /// Wrap a decoded pixel buffer with an explicit orientation tag.
    pub fn new(pixels: DynamicImage, orientation: Orientation) -> Self {
        Self {
            pixels,
            orientation,
        }
    }

    /// Wrap a decoded pixel buffer that is already upright.
    pub fn from_pixels(pixels: DynamicImage) -> Self {
        Self::new(pixels, Orientation::NoTransforms)
    }

    /// Decode an image from raw encoded bytes (JPEG, PNG, TIFF, etc.),
    /// carrying over the EXIF orientation tag where the format provides one.
    ///
    /// Undecodable input is fatal to the scan attempt and surfaces as
    /// [`ScanError::ImageDecoding`].
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|err| ScanError::ImageDecoding(format!("unrecognized image data: {err}")))?;
        let mut decoder = reader
            .into_decoder()
            .map_err(|err| ScanError::ImageDecoding(format!("failed to decode image: {err}")))?;
        let orientation = decoder
            .orientation()
            .unwrap_or(Orientation::NoTransforms);
        let pixels = DynamicImage::from_decoder(decoder)
            .map_err(|err| ScanError::ImageDecoding(format!("failed to decode image: {err}")))?;

        info!(
            width = pixels.width(),
            height = pixels.height(),
            ?orientation,
            "Source image decoded"
        );
        Ok(Self {
            pixels,
            orientation,
        })
    }

    /// Decode an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(&data)
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Pixel dimensions as a geometry [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.pixels.width() as f32, self.pixels.height() as f32)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Borrow the underlying pixel buffer.
    pub fn as_pixels(&self) -> &DynamicImage {
        &self.pixels
    }

    /// Consume the image and return the underlying pixel buffer.
    pub fn into_pixels(self) -> DynamicImage {
        self.pixels
    }

    // -- Orientation normalization ---------------------------------------------

    /// Bake the orientation tag into the pixel data so the stored tag is the
    /// canonical upright value. Idempotent: once the tag is
    /// `Orientation::NoTransforms`, reapplying changes nothing.
    #[instrument(skip(self), fields(orientation = ?self.orientation))]
    pub fn fix_orientation(mut self) -> Self {
        if self.orientation != Orientation::NoTransforms {
            debug!("Baking orientation into pixel data");
            self.pixels.apply_orientation(self.orientation);
            self.orientation = Orientation::NoTransforms;
        }
        self
    }
}
