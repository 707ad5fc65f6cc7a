// src/geometry.rs

use bytemuck::{Pod, Zeroable};
use std::ops::{Add, Mul, Sub};

/// Golden ratio, `(1 + √5) / 2`. Every shape in this crate is cut from
/// regular-pentagon geometry, so it shows up everywhere.
pub const PHI: f32 = 1.618_034;

/// One fifth of a half turn (36°), the acute half-angle of pentagon shapes.
pub const PI_5: f32 = std::f32::consts::PI / 5.0;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable, PartialEq)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const ORIGIN: Point2 = Point2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point at `distance` from `self` along `angle` (radians, CCW from +X).
    pub fn polar_offset(&self, distance: f32, angle: f32) -> Point2 {
        let (sin, cos) = angle.sin_cos();
        Point2::new(self.x + distance * cos, self.y + distance * sin)
    }

    pub fn dot(&self, other: &Point2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn distance(&self, other: &Point2) -> f32 {
        (*other - *self).length()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point2 {
    type Output = Point2;
    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;
    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point2 {
    type Output = Point2;
    fn mul(self, rhs: f32) -> Point2 {
        Point2::new(self.x * rhs, self.y * rhs)
    }
}

impl From<glam::Vec2> for Point2 {
    fn from(v: glam::Vec2) -> Self {
        Point2::new(v.x, v.y)
    }
}

impl From<Point2> for glam::Vec2 {
    fn from(p: Point2) -> Self {
        glam::Vec2::new(p.x, p.y)
    }
}

/// Flattens points into the `x, y, x, y, ...` layout uploaded to vertex buffers.
pub fn flatten(points: &[Point2]) -> Vec<f32> {
    bytemuck::cast_slice::<Point2, f32>(points).to_vec()
}

/// Unsigned shoelace area. Zero for fewer than three points.
pub fn polygon_area(points: &[Point2]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area.abs() / 2.0
}

/// Sum of the areas of the triangles a fan over `points` would rasterize,
/// pivoting on the first vertex. Equals [`polygon_area`] when the outline is
/// star-shaped with respect to its first vertex.
pub fn fan_area(points: &[Point2]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let pivot = points[0];
    points[1..]
        .windows(2)
        .map(|pair| polygon_area(&[pivot, pair[0], pair[1]]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phi_matches_closed_form() {
        let exact = (1.0 + 5.0f32.sqrt()) / 2.0;
        assert!((PHI - exact).abs() < 1e-6);
    }

    #[test]
    fn flatten_interleaves_coordinates() {
        let pts = [Point2::new(1.0, 2.0), Point2::new(3.0, 4.0)];
        assert_eq!(flatten(&pts), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn unit_square_area() {
        let square = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        assert!((polygon_area(&square) - 1.0).abs() < 1e-6);
        assert!((fan_area(&square) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_area_is_zero() {
        assert_eq!(polygon_area(&[Point2::ORIGIN, Point2::new(1.0, 1.0)]), 0.0);
        assert_eq!(fan_area(&[]), 0.0);
    }

    #[test]
    fn polar_offset_quarter_turn() {
        let p = Point2::new(1.0, 1.0).polar_offset(2.0, std::f32::consts::FRAC_PI_2);
        assert!((p.x - 1.0).abs() < 1e-6);
        assert!((p.y - 3.0).abs() < 1e-6);
    }
}
