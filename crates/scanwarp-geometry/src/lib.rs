// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scanwarp-geometry — Quadrilateral geometry for document scanning.
//
// Provides space-tagged points (preview-display, source-image pixel, and
// bottom-up Cartesian coordinates), composable affine transforms with
// aspect-fit/aspect-fill helpers, and the `Quadrilateral` value type with
// corner canonicalization, per-axis rescaling, and vertical-axis conversion.

pub mod quad;
pub mod space;
pub mod transform;

pub use quad::Quadrilateral;
pub use space::{CartesianSpace, CoordSpace, PixelSpace, Point, Size, ViewSpace};
pub use transform::AffineTransform;
