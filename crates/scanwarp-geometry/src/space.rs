// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Coordinate spaces and space-tagged points.
//
// A document scan moves geometry through three disjoint coordinate spaces:
// the on-screen preview, the full-resolution source image, and the bottom-up
// Cartesian frame the rectification step works in. Mixing them up is the
// classic failure mode of this kind of code, so each point carries its space
// as a zero-sized type parameter and a mismatch is a compile error rather
// than a silently wrong warp.

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

/// Marker trait for coordinate spaces.
pub trait CoordSpace: Copy + Clone + std::fmt::Debug + PartialEq {}

/// On-screen preview coordinates. Origin top-left, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSpace;
impl CoordSpace for ViewSpace {}

/// Full-resolution source-image pixel coordinates. Origin top-left,
/// y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSpace;
impl CoordSpace for PixelSpace {}

/// Bottom-up coordinates required by the rectification step. Origin
/// bottom-left, y grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartesianSpace;
impl CoordSpace for CartesianSpace {}

/// A 2D point tagged with the coordinate space it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point<S: CoordSpace> {
    pub x: f32,
    pub y: f32,
    #[serde(skip)]
    _space: PhantomData<S>,
}

impl<S: CoordSpace> Point<S> {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            _space: PhantomData,
        }
    }

    /// Euclidean distance to another point in the same space.
    pub fn distance_to(&self, other: Point<S>) -> f32 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

/// Width and height of a rectangular extent. Not space-tagged: a size is
/// meaningful in whichever space the surrounding call uses it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True if either dimension is zero or negative.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a: Point<PixelSpace> = Point::new(0.0, 0.0);
        let b: Point<PixelSpace> = Point::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_sizes() {
        assert!(Size::new(0.0, 10.0).is_degenerate());
        assert!(Size::new(10.0, -1.0).is_degenerate());
        assert!(!Size::new(10.0, 10.0).is_degenerate());
    }
}
