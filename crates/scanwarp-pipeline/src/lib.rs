// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scanwarp-pipeline — Perspective rectification for scanned documents.
//
// Takes a source raster image and a document-boundary quadrilateral in that
// image's pixel space, warps the region to an axis-aligned rectangle,
// derives an adaptive-threshold enhancement variant, normalizes orientation
// metadata, and assembles the final scan result.

pub mod enhance;
pub mod pipeline;
pub mod raster;
pub mod rectify;
pub mod result;

pub use enhance::enhance;
pub use pipeline::{EditSession, ScanCompletion, ScanPipeline};
pub use raster::RasterImage;
pub use rectify::rectify;
pub use result::ScanResult;
