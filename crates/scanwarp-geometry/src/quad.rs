// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The four-corner document boundary: corner canonicalization, per-axis
// rescaling between coordinate spaces, transform chains, and the vertical
// flip into the bottom-up frame the rectifier works in.

use serde::{Deserialize, Serialize};

use crate::space::{CartesianSpace, CoordSpace, PixelSpace, Point, Size};
use crate::transform::AffineTransform;

/// A quadrilateral approximating a document boundary, with four corners in
/// fixed semantic roles. All four points live in the same coordinate space
/// `S` — an instance never mixes spaces.
///
/// A `Quadrilateral` is immutable value data: every operation returns a new
/// instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quadrilateral<S: CoordSpace> {
    pub top_left: Point<S>,
    pub top_right: Point<S>,
    pub bottom_right: Point<S>,
    pub bottom_left: Point<S>,
}

impl<S: CoordSpace> Quadrilateral<S> {
    pub fn new(
        top_left: Point<S>,
        top_right: Point<S>,
        bottom_right: Point<S>,
        bottom_left: Point<S>,
    ) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// The corners in `[top_left, top_right, bottom_right, bottom_left]`
    /// order (clockwise in a y-down space).
    pub fn points(&self) -> [Point<S>; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Reassign the four corner labels by geometric position, ignoring the
    /// labels the corners arrived with. Interactive dragging can move a
    /// corner past its neighbours, leaving e.g. the point labelled
    /// `top_left` geometrically below the one labelled `bottom_left`.
    ///
    /// Under this space's y-down convention, the two points with the
    /// smallest y become the top pair and each pair is ordered by x.
    /// Idempotent. The point set itself is never altered — near-degenerate
    /// slivers pass through with relabelled corners only, and validity
    /// checking stays with the caller.
    pub fn reorganize(&self) -> Self {
        let mut pts = self.points();
        pts.sort_by(|a, b| a.y.total_cmp(&b.y));

        let (top_left, top_right) = ordered_by_x(pts[0], pts[1]);
        let (bottom_left, bottom_right) = ordered_by_x(pts[2], pts[3]);

        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Apply a chain of affine transforms to all four corners, in
    /// construction order. Used to map the quad through the chain of spaces
    /// needed for overlay rendering.
    pub fn apply_transforms(&self, transforms: &[AffineTransform]) -> Self {
        transforms.iter().fold(*self, |quad, t| Self {
            top_left: t.apply(quad.top_left),
            top_right: t.apply(quad.top_right),
            bottom_right: t.apply(quad.bottom_right),
            bottom_left: t.apply(quad.bottom_left),
        })
    }

    /// Rescale every corner from `from`-sized coordinates into `to`-sized
    /// coordinates, entering the target space `T`.
    ///
    /// The x and y axes scale independently: when converting preview-space
    /// to full-resolution pixel space the two sizes are pre-aligned by the
    /// caller's aspect-fit letterboxing, so a non-uniform scale is the
    /// correct mapping, not a distortion.
    ///
    /// Zero `from` dimensions map with ratio 1 instead of dividing by zero.
    pub fn scale<T: CoordSpace>(&self, from: Size, to: Size) -> Quadrilateral<T> {
        let rx = if from.width > 0.0 {
            to.width / from.width
        } else {
            1.0
        };
        let ry = if from.height > 0.0 {
            to.height / from.height
        } else {
            1.0
        };

        let map = |p: Point<S>| Point::<T>::new(p.x * rx, p.y * ry);
        Quadrilateral {
            top_left: map(self.top_left),
            top_right: map(self.top_right),
            bottom_right: map(self.bottom_right),
            bottom_left: map(self.bottom_left),
        }
    }

    /// Area via the shoelace formula, taking the corners in stored order.
    pub fn area(&self) -> f32 {
        let pts = self.points();
        let mut area = 0.0f32;
        for i in 0..pts.len() {
            let j = (i + 1) % pts.len();
            area += pts[i].x * pts[j].y;
            area -= pts[j].x * pts[i].y;
        }
        area.abs() / 2.0
    }
}

impl Quadrilateral<PixelSpace> {
    /// The default starting quad when no auto-detected boundary exists: a
    /// centered rectangle from (W/3, H/3) to (2W/3, 2H/3), guaranteed
    /// non-degenerate for any non-degenerate image size.
    pub fn centered_third(image_size: Size) -> Self {
        let (w, h) = (image_size.width, image_size.height);
        Self {
            top_left: Point::new(w / 3.0, h / 3.0),
            top_right: Point::new(2.0 * w / 3.0, h / 3.0),
            bottom_right: Point::new(2.0 * w / 3.0, 2.0 * h / 3.0),
            bottom_left: Point::new(w / 3.0, 2.0 * h / 3.0),
        }
    }

    /// A quad covering the full image bounds, used to seed a crop-only edit
    /// session.
    pub fn full_frame(image_size: Size) -> Self {
        let (w, h) = (image_size.width, image_size.height);
        Self {
            top_left: Point::new(0.0, 0.0),
            top_right: Point::new(w, 0.0),
            bottom_right: Point::new(w, h),
            bottom_left: Point::new(0.0, h),
        }
    }

    /// Flip the vertical axis into the bottom-up Cartesian frame required
    /// by the rectification step: each y becomes `reference_height - y`.
    /// Inverse of [`Quadrilateral::<CartesianSpace>::to_pixel`] with the
    /// same height.
    pub fn to_cartesian(&self, reference_height: f32) -> Quadrilateral<CartesianSpace> {
        flip_vertical(self, reference_height)
    }
}

impl Quadrilateral<CartesianSpace> {
    /// Flip back from the bottom-up Cartesian frame into top-down pixel
    /// coordinates. Inverse of [`Quadrilateral::<PixelSpace>::to_cartesian`]
    /// with the same height.
    pub fn to_pixel(&self, reference_height: f32) -> Quadrilateral<PixelSpace> {
        flip_vertical(self, reference_height)
    }
}

fn flip_vertical<S: CoordSpace, T: CoordSpace>(
    quad: &Quadrilateral<S>,
    reference_height: f32,
) -> Quadrilateral<T> {
    let flip = |p: Point<S>| Point::<T>::new(p.x, reference_height - p.y);
    Quadrilateral {
        top_left: flip(quad.top_left),
        top_right: flip(quad.top_right),
        bottom_right: flip(quad.bottom_right),
        bottom_left: flip(quad.bottom_left),
    }
}

fn ordered_by_x<S: CoordSpace>(a: Point<S>, b: Point<S>) -> (Point<S>, Point<S>) {
    if a.x <= b.x { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::ViewSpace;

    fn pt(x: f32, y: f32) -> Point<PixelSpace> {
        Point::new(x, y)
    }

    fn assert_pt_near<S: CoordSpace>(p: Point<S>, x: f32, y: f32) {
        assert!(
            (p.x - x).abs() < 1e-4 && (p.y - y).abs() < 1e-4,
            "expected ({x}, {y}), got ({}, {})",
            p.x,
            p.y
        );
    }

    #[test]
    fn reorganize_relabels_scrambled_corners() {
        // Corner positions of a 100x100 square, but with every label wrong.
        let scrambled = Quadrilateral::new(
            pt(100.0, 100.0), // labelled top_left, actually bottom_right
            pt(0.0, 100.0),   // labelled top_right, actually bottom_left
            pt(0.0, 0.0),     // labelled bottom_right, actually top_left
            pt(100.0, 0.0),   // labelled bottom_left, actually top_right
        );

        let fixed = scrambled.reorganize();
        assert_pt_near(fixed.top_left, 0.0, 0.0);
        assert_pt_near(fixed.top_right, 100.0, 0.0);
        assert_pt_near(fixed.bottom_right, 100.0, 100.0);
        assert_pt_near(fixed.bottom_left, 0.0, 100.0);
    }

    #[test]
    fn reorganize_is_idempotent() {
        let quad = Quadrilateral::new(
            pt(30.0, 80.0),
            pt(5.0, 12.0),
            pt(90.0, 10.0),
            pt(85.0, 95.0),
        );
        let once = quad.reorganize();
        let twice = once.reorganize();
        assert_eq!(once, twice);
    }

    #[test]
    fn reorganize_yields_canonical_order() {
        let quad = Quadrilateral::new(
            pt(72.0, 11.0),
            pt(8.0, 90.0),
            pt(10.0, 14.0),
            pt(77.0, 88.0),
        )
        .reorganize();

        assert!(quad.top_left.y <= quad.bottom_left.y);
        assert!(quad.top_right.y <= quad.bottom_right.y);
        assert!(quad.top_left.x <= quad.top_right.x);
        assert!(quad.bottom_left.x <= quad.bottom_right.x);
    }

    #[test]
    fn reorganize_preserves_thin_slivers() {
        // A near-degenerate sliver: labels get reassigned but no point is
        // moved or merged.
        let sliver = Quadrilateral::new(
            pt(0.0, 0.0),
            pt(100.0, 0.1),
            pt(100.0, 0.2),
            pt(0.0, 0.3),
        );
        let out = sliver.reorganize();

        let mut expected: Vec<(f32, f32)> =
            sliver.points().iter().map(|p| (p.x, p.y)).collect();
        let mut got: Vec<(f32, f32)> = out.points().iter().map(|p| (p.x, p.y)).collect();
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        got.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(expected, got);
    }

    #[test]
    fn cartesian_flip_is_an_involution() {
        let quad = Quadrilateral::new(
            pt(10.0, 20.0),
            pt(90.0, 25.0),
            pt(95.0, 180.0),
            pt(5.0, 175.0),
        );
        let back = quad.to_cartesian(200.0).to_pixel(200.0);

        for (a, b) in quad.points().iter().zip(back.points().iter()) {
            assert!((a.x - b.x).abs() < 1e-4);
            assert!((a.y - b.y).abs() < 1e-4);
        }
    }

    #[test]
    fn scale_round_trips() {
        let view_size = Size::new(375.0, 667.0);
        let image_size = Size::new(3024.0, 4032.0);
        let quad: Quadrilateral<ViewSpace> = Quadrilateral::new(
            Point::new(40.0, 100.0),
            Point::new(330.0, 110.0),
            Point::new(320.0, 560.0),
            Point::new(50.0, 550.0),
        );

        let scaled: Quadrilateral<PixelSpace> = quad.scale(view_size, image_size);
        let back: Quadrilateral<ViewSpace> = scaled.scale(image_size, view_size);

        for (a, b) in quad.points().iter().zip(back.points().iter()) {
            assert!((a.x - b.x).abs() < 1e-2);
            assert!((a.y - b.y).abs() < 1e-2);
        }
    }

    #[test]
    fn scale_is_per_axis() {
        let quad = Quadrilateral::<PixelSpace>::full_frame(Size::new(100.0, 100.0));
        let scaled: Quadrilateral<PixelSpace> =
            quad.scale(Size::new(100.0, 100.0), Size::new(200.0, 50.0));
        assert_pt_near(scaled.bottom_right, 200.0, 50.0);
    }

    #[test]
    fn scale_from_degenerate_size_does_not_divide_by_zero() {
        let quad = Quadrilateral::<PixelSpace>::full_frame(Size::new(10.0, 10.0));
        let scaled: Quadrilateral<PixelSpace> =
            quad.scale(Size::new(0.0, 0.0), Size::new(100.0, 100.0));
        assert!(scaled.points().iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn centered_third_sits_at_image_thirds() {
        let quad = Quadrilateral::centered_third(Size::new(300.0, 600.0));
        assert_pt_near(quad.top_left, 100.0, 200.0);
        assert_pt_near(quad.top_right, 200.0, 200.0);
        assert_pt_near(quad.bottom_right, 200.0, 400.0);
        assert_pt_near(quad.bottom_left, 100.0, 400.0);
    }

    #[test]
    fn full_frame_covers_the_image() {
        let quad = Quadrilateral::full_frame(Size::new(300.0, 600.0));
        assert_pt_near(quad.top_left, 0.0, 0.0);
        assert_pt_near(quad.bottom_right, 300.0, 600.0);
        assert!((quad.area() - 180_000.0).abs() < 1.0);
    }

    #[test]
    fn apply_transforms_runs_in_construction_order() {
        let quad = Quadrilateral::<PixelSpace>::full_frame(Size::new(10.0, 10.0));
        let transforms = [
            AffineTransform::scaling(2.0, 2.0),
            AffineTransform::translation(5.0, 5.0),
        ];
        let out = quad.apply_transforms(&transforms);
        assert_pt_near(out.top_left, 5.0, 5.0);
        assert_pt_near(out.bottom_right, 25.0, 25.0);
    }

    #[test]
    fn area_of_a_rectangle() {
        let quad = Quadrilateral::<PixelSpace>::full_frame(Size::new(10.0, 5.0));
        assert!((quad.area() - 50.0).abs() < 1e-3);
    }
}
