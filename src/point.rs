use std::ops::{ Add, Sub, Mul };

use crate::feq;

/// A point (or offset) on the drawing plane.
///
/// Coordinates are in canvas pixels. The origin is the top-left corner of the
/// canvas and `y` grows downward, matching raster image conventions.
#[derive(Debug, Default, Copy, Clone, PartialOrd)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl PartialEq for Point2D {
    fn eq(&self, other: &Point2D) -> bool {
        feq(self.x, other.x) && feq(self.y, other.y)
    }
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x, y }
    }

    pub fn magnitude(&self) -> f64 {
        f64::sqrt(self.x.powi(2) + self.y.powi(2))
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        (*other - *self).magnitude()
    }

    /// Direction of this offset, as returned by `atan2(y, x)`.
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Linearly interpolates from `self` (at `t == 0`) to `other` (at
    /// `t == 1`).
    pub fn lerp(&self, other: &Point2D, t: f64) -> Point2D {
        *self + (*other - *self) * t
    }

    /// Shortest distance from this point to the segment `a -> b`.
    ///
    /// Degenerate segments (`a == b`) collapse to the distance from `a`.
    pub fn distance_to_segment(&self, a: &Point2D, b: &Point2D) -> f64 {
        let ab = *b - *a;
        let len_sq = ab.x * ab.x + ab.y * ab.y;
        if len_sq == 0.0 {
            return self.distance(a);
        }

        let ap = *self - *a;
        let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
        self.distance(&a.lerp(b, t))
    }
}

impl Add for Point2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self { x: self.x + other.x, y: self.y + other.y }
    }
}

impl Sub for Point2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self { x: self.x - other.x, y: self.y - other.y }
    }
}

impl Mul<f64> for Point2D {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self { x: self.x * other, y: self.y * other }
    }
}

#[test]
fn point_arithmetic() {
    let a = Point2D::new(3.0, -2.0);
    let b = Point2D::new(5.0, 6.0);

    assert_eq!(a + b, Point2D::new(8.0, 4.0));
    assert_eq!(b - a, Point2D::new(2.0, 8.0));
    assert_eq!(a * 2.0, Point2D::new(6.0, -4.0));
}

#[test]
fn point_lerp_endpoints_and_midpoint() {
    let a = Point2D::new(256.0, 256.0);
    let b = Point2D::new(346.5, 512.0);

    assert_eq!(a.lerp(&b, 0.0), a);
    assert_eq!(a.lerp(&b, 1.0), b);
    assert_eq!(a.lerp(&b, 0.5), Point2D::new(301.25, 384.0));
}

#[test]
fn point_distance_to_segment() {
    let a = Point2D::new(0.0, 0.0);
    let b = Point2D::new(10.0, 0.0);

    assert!(crate::feq(Point2D::new(5.0, 3.0).distance_to_segment(&a, &b), 3.0));
    assert!(crate::feq(Point2D::new(-4.0, 3.0).distance_to_segment(&a, &b), 5.0));
    assert!(crate::feq(Point2D::new(1.0, 1.0).distance_to_segment(&a, &a),
        2.0f64.sqrt()));
}
