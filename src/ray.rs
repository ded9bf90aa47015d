use crate::point::Point2D;

/// A directed line segment on the canvas.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Segment {
    pub start: Point2D,
    pub end: Point2D,
}

impl Segment {
    pub fn new(start: Point2D, end: Point2D) -> Segment {
        Segment { start, end }
    }

    /// The point a fraction `t` of the way from `start` to `end`.
    pub fn position(&self, t: f64) -> Point2D {
        self.start.lerp(&self.end, t)
    }

    /// The same segment, shortened to the fraction `t` of its length while
    /// keeping its direction.
    pub fn truncate(&self, t: f64) -> Segment {
        Segment { start: self.start, end: self.position(t) }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }
}

/// The incident ray, ending at the point of incidence `center`.
///
/// The ray starts `margin` pixels below the canvas top, offset to the left so
/// that it makes `theta` radians with the vertical normal. Positive angles
/// therefore arrive from the upper left.
pub fn incident_segment(center: Point2D, theta: f64, margin: f64) -> Segment {
    let start = Point2D::new(center.x - (center.y - margin) * theta.tan(), margin);

    Segment::new(start, center)
}

/// Where a ray leaving `origin` first crosses the canvas boundary.
///
/// `theta` is measured from the downward normal, positive to the right. The
/// bottom edge is tried first, then the right edge, then the left edge. At
/// `theta == 0` the tangent vanishes and the ray resolves to the bottom edge
/// directly beneath `origin`.
pub fn clip_to_boundary(origin: Point2D, theta: f64, width: f64, height: f64)
    -> Point2D {
    let tan = theta.tan();
    let x_at_bottom = origin.x + (height - origin.y) * tan;

    if x_at_bottom >= 0.0 && x_at_bottom <= width {
        Point2D::new(x_at_bottom, height)
    } else if x_at_bottom > width {
        Point2D::new(width, origin.y + (width - origin.x) / tan)
    } else {
        Point2D::new(0.0, origin.y + origin.x / tan.abs())
    }
}

#[cfg(test)]
fn on_edge(p: &Point2D, width: f64, height: f64) -> bool {
    let eps = 1e-9;
    let within = p.x >= -eps && p.x <= width + eps
        && p.y >= -eps && p.y <= height + eps;
    let edge = p.x.abs() < eps || (p.x - width).abs() < eps
        || p.y.abs() < eps || (p.y - height).abs() < eps;

    within && edge
}

#[test]
fn segment_position() {
    let s = Segment::new(Point2D::new(2.0, 3.0), Point2D::new(4.0, 7.0));

    assert_eq!(s.position(0.0), Point2D::new(2.0, 3.0));
    assert_eq!(s.position(1.0), Point2D::new(4.0, 7.0));
    assert_eq!(s.position(0.25), Point2D::new(2.5, 4.0));
    assert_eq!(s.truncate(0.5).end, Point2D::new(3.0, 5.0));
}

#[test]
fn incident_segment_makes_angle_with_normal() {
    let center = Point2D::new(256.0, 256.0);
    let theta = 30f64.to_radians();
    let s = incident_segment(center, theta, 50.0);

    assert_eq!(s.end, center);
    assert!(crate::feq(s.start.y, 50.0));
    assert!(s.start.x < center.x);

    let d = s.end - s.start;
    assert!((d.x.atan2(d.y) - theta).abs() < 1e-9);
}

#[test]
fn clip_normal_incidence_hits_bottom() {
    let p = clip_to_boundary(Point2D::new(256.0, 256.0), 0.0, 512.0, 512.0);
    assert_eq!(p, Point2D::new(256.0, 512.0));
}

#[test]
fn clip_worked_example() {
    let theta = (0.5f64 / 1.5).asin();
    let origin = Point2D::new(256.0, 256.0);
    let p = clip_to_boundary(origin, theta, 512.0, 512.0);

    // tan(19.47 deg) * 256 ~ 90.5, so the ray leaves through the bottom
    assert!(crate::feq(p.y, 512.0));
    assert!((p.x - (256.0 + 256.0 * theta.tan())).abs() < 1e-9);
    assert!(on_edge(&p, 512.0, 512.0));
}

#[test]
fn clip_steep_ray_hits_right_edge() {
    let origin = Point2D::new(256.0, 256.0);
    let theta = 60f64.to_radians();
    let p = clip_to_boundary(origin, theta, 512.0, 512.0);

    assert!(crate::feq(p.x, 512.0));
    assert!((p.y - (256.0 + 256.0 / theta.tan())).abs() < 1e-9);
    assert!(p.y < 512.0);
}

#[test]
fn clip_leftward_ray_hits_left_edge_below_origin() {
    let origin = Point2D::new(100.0, 256.0);
    let theta = -70f64.to_radians();
    let p = clip_to_boundary(origin, theta, 512.0, 512.0);

    assert!(crate::feq(p.x, 0.0));
    assert!(p.y > origin.y && p.y < 512.0);
}

#[test]
fn clip_always_lands_on_an_edge_along_the_ray() {
    let (width, height) = (640.0, 480.0);
    let origin = Point2D::new(320.0, 240.0);

    let steps = 2000;
    for i in 0..steps {
        let theta = (i as f64 / steps as f64) * std::f64::consts::FRAC_PI_2;
        let p = clip_to_boundary(origin, theta, width, height);

        assert!(on_edge(&p, width, height), "theta {} gave {:?}", theta, p);

        // The exit point lies on the ray: same direction from the normal
        let d = p - origin;
        assert!(d.y > 0.0);
        assert!((d.x.atan2(d.y) - theta).abs() < 1e-9);

        // No edge is crossed earlier: every interior point stays inside
        for k in 1..10 {
            let q = origin.lerp(&p, k as f64 / 10.0);
            assert!(q.x > 0.0 && q.x < width && q.y > 0.0 && q.y < height);
        }
    }
}
