// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Composable 2D affine transforms (scale and translate) with the
// aspect-fit/aspect-fill helpers used to line overlay geometry up with a
// letterboxed image preview.

use serde::{Deserialize, Serialize};

use crate::space::{CoordSpace, Point, Size};

/// A 2D affine map applied to points as row vectors:
///
/// ```text
/// x' = a * x + c * y + tx
/// y' = b * x + d * y + ty
/// ```
///
/// Transforms compose left-to-right via [`AffineTransform::then`]: in
/// `first.then(&second)`, `first` is applied to the point before `second`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl AffineTransform {
    pub fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// A transform scaling x by `sx` and y by `sy` about the origin.
    pub fn scaling(sx: f32, sy: f32) -> Self {
        Self {
            a: sx,
            b: 0.0,
            c: 0.0,
            d: sy,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// A pure translation by `(tx, ty)`.
    pub fn translation(tx: f32, ty: f32) -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            tx,
            ty,
        }
    }

    /// Compose with another transform, applying `self` first.
    pub fn then(&self, next: &AffineTransform) -> AffineTransform {
        AffineTransform {
            a: self.a * next.a + self.b * next.c,
            b: self.a * next.b + self.b * next.d,
            c: self.c * next.a + self.d * next.c,
            d: self.c * next.b + self.d * next.d,
            tx: self.tx * next.a + self.ty * next.c + next.tx,
            ty: self.tx * next.b + self.ty * next.d + next.ty,
        }
    }

    /// Apply the transform to a point. The point stays in its coordinate
    /// space: cross-space conversion goes through the dedicated quadrilateral
    /// operations, not through ad-hoc transforms.
    pub fn apply<S: CoordSpace>(&self, p: Point<S>) -> Point<S> {
        Point::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    /// The inverse transform, or `None` if the linear part is singular.
    pub fn inverse(&self) -> Option<AffineTransform> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() < 1e-12 {
            return None;
        }
        Some(AffineTransform {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            tx: (self.c * self.ty - self.d * self.tx) / det,
            ty: (self.b * self.tx - self.a * self.ty) / det,
        })
    }

    /// The transform mapping `source`-space points into a centered,
    /// aspect-preserving rendition of `source` fitted inside `container`
    /// (letterboxed if the aspect ratios differ).
    ///
    /// Degenerate (zero-size) inputs yield the identity transform.
    pub fn aspect_fit(source: Size, container: Size) -> AffineTransform {
        Self::aspect_scale(source, container, false)
    }

    /// Like [`AffineTransform::aspect_fit`], but scales so `source` covers
    /// all of `container` (cropped if the aspect ratios differ). This is the
    /// mapping used when drawing the quad overlay over a preview image.
    pub fn aspect_fill(source: Size, container: Size) -> AffineTransform {
        Self::aspect_scale(source, container, true)
    }

    fn aspect_scale(source: Size, container: Size, fill: bool) -> AffineTransform {
        if source.is_degenerate() || container.is_degenerate() {
            return Self::identity();
        }
        let rx = container.width / source.width;
        let ry = container.height / source.height;
        let s = if fill { rx.max(ry) } else { rx.min(ry) };
        let tx = (container.width - source.width * s) / 2.0;
        let ty = (container.height - source.height * s) / 2.0;
        Self::scaling(s, s).then(&Self::translation(tx, ty))
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}
