// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The end-to-end pipeline entry point (scale → rectify → enhance →
// fix-orientation → assemble) and the edit-session wrapper that notifies an
// injected completion listener.

use scanwarp_core::config::ScanConfig;
use scanwarp_core::error::{Result, ScanError};
use scanwarp_geometry::{PixelSpace, Quadrilateral, Size, ViewSpace};
use tracing::{info, instrument};

use crate::enhance::enhance;
use crate::raster::RasterImage;
use crate::rectify::rectify;
use crate::result::ScanResult;

/// The synchronous scanning pipeline. Holds only configuration; every call
/// is a pure function over its inputs and no state outlives a call.
#[derive(Debug, Clone, Default)]
pub struct ScanPipeline {
    config: ScanConfig,
}

impl ScanPipeline {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// The default quad to seed an edit session with when no auto-detected
    /// boundary is available: centered, a third of the image in from each
    /// edge.
    pub fn initial_quad(image_size: Size) -> Quadrilateral<PixelSpace> {
        Quadrilateral::centered_third(image_size)
    }

    /// Run the whole pipeline on a confirmed edit: rescale the edited quad
    /// from preview coordinates into the source image's pixel space, rectify,
    /// derive the enhancement variant, normalize orientation on both
    /// outputs, and assemble the result.
    ///
    /// `view_size` is the size of the preview the quad was edited in; the
    /// caller is responsible for having aligned preview space with the image
    /// via aspect-fit letterboxing.
    #[instrument(skip(self, image, quad), fields(view_w = view_size.width, view_h = view_size.height))]
    pub fn build_scan_result(
        &self,
        image: RasterImage,
        quad: &Quadrilateral<ViewSpace>,
        view_size: Size,
    ) -> Result<ScanResult> {
        let detected: Quadrilateral<PixelSpace> = quad.scale(view_size, image.size());
        self.assemble(image, detected)
    }

    /// Like [`ScanPipeline::build_scan_result`], for callers whose quad is
    /// already in the source image's pixel space (e.g. straight from a
    /// rectangle detector).
    #[instrument(skip(self, image, quad))]
    pub fn build_scan_result_in_pixel_space(
        &self,
        image: RasterImage,
        quad: Quadrilateral<PixelSpace>,
    ) -> Result<ScanResult> {
        self.assemble(image, quad)
    }

    /// Decode the source from raw encoded bytes and run the whole pipeline.
    /// Malformed input surfaces [`ScanError::ImageDecoding`] and produces no
    /// result.
    #[instrument(skip(self, data, quad), fields(data_len = data.len()))]
    pub fn build_scan_result_from_bytes(
        &self,
        data: &[u8],
        quad: &Quadrilateral<ViewSpace>,
        view_size: Size,
    ) -> Result<ScanResult> {
        let image = RasterImage::from_bytes(data)?;
        self.build_scan_result(image, quad, view_size)
    }

    fn assemble(
        &self,
        image: RasterImage,
        detected: Quadrilateral<PixelSpace>,
    ) -> Result<ScanResult> {
        let rectified = rectify(&image, &detected)?.fix_orientation();
        let enhanced = enhance(&rectified, &self.config).map(RasterImage::fix_orientation);

        info!(
            rectified_w = rectified.width(),
            rectified_h = rectified.height(),
            enhanced = enhanced.is_some(),
            "Scan result assembled"
        );
        Ok(ScanResult::new(
            image,
            rectified,
            enhanced,
            detected,
            self.config.prefer_enhanced_default,
        ))
    }
}

/// Completion listener for an edit session, injected at construction.
/// Exactly one of the callbacks fires per session, depending on how the
/// session ends.
pub trait ScanCompletion {
    fn scan_finished(&mut self, result: ScanResult);
    fn scan_failed(&mut self, error: ScanError);
    fn scan_cancelled(&mut self) {}
}

/// A single-shot edit session: holds the source image and the preview size
/// while the external UI edits the quad, then runs the pipeline on confirm
/// and notifies the injected listener. Cancelling short-circuits before any
/// pipeline work.
pub struct EditSession<L: ScanCompletion> {
    pipeline: ScanPipeline,
    image: RasterImage,
    view_size: Size,
    listener: L,
}

impl<L: ScanCompletion> EditSession<L> {
    pub fn new(pipeline: ScanPipeline, image: RasterImage, view_size: Size, listener: L) -> Self {
        Self {
            pipeline,
            image,
            view_size,
            listener,
        }
    }

    /// The quad to seed the editor with when no detector result exists.
    pub fn initial_quad(&self) -> Quadrilateral<PixelSpace> {
        ScanPipeline::initial_quad(self.image.size())
    }

    /// Confirm the edit with the final quad in preview coordinates. Consumes
    /// the session and notifies the listener with either the result or the
    /// error.
    pub fn confirm(mut self, quad: &Quadrilateral<ViewSpace>) {
        match self
            .pipeline
            .build_scan_result(self.image, quad, self.view_size)
        {
            Ok(result) => self.listener.scan_finished(result),
            Err(err) => self.listener.scan_failed(err),
        }
    }

    /// Abandon the session without running the pipeline.
    pub fn cancel(mut self) {
        self.listener.scan_cancelled();
    }
}
