use crate::point::Point2D;
use crate::ray::{ Segment, incident_segment, clip_to_boundary };
use crate::consts::{ HATCH_SPACING, HATCH_LENGTH, HATCH_ANGLE_DEG, HATCH_OFFSET,
    NORMAL_HALF_LENGTH, RAY_TOP_MARGIN, ANGLE_ARC_RADIUS, LABEL_GAP };

/// Geometry of the refraction scene for one canvas size.
///
/// Everything here is derived from the canvas width and height alone. The
/// interface runs horizontally through the vertical center of the canvas, air
/// above and glass below, and rays meet it at the canvas center.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SceneLayout {
    pub width: usize,
    pub height: usize,

    /// The point of incidence.
    pub center: Point2D,

    /// Vertical position of the air/glass interface.
    pub interface_y: f64,
}

impl SceneLayout {
    pub fn new(width: usize, height: usize) -> SceneLayout {
        let center = Point2D::new((width / 2) as f64, (height / 2) as f64);

        SceneLayout { width, height, center, interface_y: center.y }
    }

    /// The interface line, spanning the full canvas width.
    pub fn interface_line(&self) -> Segment {
        Segment::new(
            Point2D::new(0.0, self.interface_y),
            Point2D::new(self.width as f64, self.interface_y)
        )
    }

    /// Diagonal ticks marking the glass side of the interface.
    ///
    /// One tick starts every `HATCH_SPACING` pixels, slightly below the
    /// interface, and runs down and to the right at 45 degrees.
    pub fn hatch_ticks(&self) -> Vec<Segment> {
        let angle = HATCH_ANGLE_DEG.to_radians();
        let offset = Point2D::new(HATCH_LENGTH * angle.cos(),
            HATCH_LENGTH * angle.sin());

        (0..self.width / HATCH_SPACING)
            .map(|i| {
                let start = Point2D::new((i * HATCH_SPACING) as f64,
                    self.interface_y + HATCH_OFFSET);
                Segment::new(start, start + offset)
            })
            .collect()
    }

    /// The normal at the point of incidence.
    pub fn normal_segment(&self) -> Segment {
        Segment::new(
            Point2D::new(self.center.x, self.interface_y - NORMAL_HALF_LENGTH),
            Point2D::new(self.center.x, self.interface_y + NORMAL_HALF_LENGTH)
        )
    }

    /// The incident ray for an angle of `theta` radians from the normal.
    pub fn incident_ray(&self, theta: f64) -> Segment {
        incident_segment(self.center, theta, RAY_TOP_MARGIN)
    }

    /// The refracted ray at `theta` radians, extended to the canvas edge.
    pub fn refracted_ray(&self, theta: f64) -> Segment {
        let end = clip_to_boundary(self.center, theta, self.width as f64,
            self.height as f64);

        Segment::new(self.center, end)
    }

    /// Start and end angles (degrees, clockwise from 3 o'clock) of the arc
    /// between the upward normal and an incident ray at `theta_deg`.
    pub fn angle_arc(&self, theta_deg: f64) -> (f64, f64) {
        (-90.0 - theta_deg, -90.0)
    }

    /// Top-left corner of the incident angle label, to the right of the arc.
    pub fn label_position(&self) -> Point2D {
        Point2D::new(self.center.x + ANGLE_ARC_RADIUS + LABEL_GAP,
            self.interface_y - ANGLE_ARC_RADIUS)
    }
}

#[test]
fn layout_centers_on_canvas() {
    let l = SceneLayout::new(512, 512);
    assert_eq!(l.center, Point2D::new(256.0, 256.0));
    assert!(crate::feq(l.interface_y, 256.0));

    // Odd sizes round the center down to whole pixels
    let l = SceneLayout::new(641, 481);
    assert_eq!(l.center, Point2D::new(320.0, 240.0));
}

#[test]
fn interface_spans_canvas() {
    let l = SceneLayout::new(400, 300);
    let line = l.interface_line();

    assert_eq!(line.start, Point2D::new(0.0, 150.0));
    assert_eq!(line.end, Point2D::new(400.0, 150.0));
}

#[test]
fn hatch_ticks_are_periodic_diagonals() {
    let l = SceneLayout::new(512, 512);
    let ticks = l.hatch_ticks();

    assert_eq!(ticks.len(), 64);
    for (i, t) in ticks.iter().enumerate() {
        assert!(crate::feq(t.start.x, (i * 8) as f64));
        assert!(crate::feq(t.start.y, 261.0));

        let d = t.end - t.start;
        assert!(crate::feq(d.x, d.y));
        assert!(crate::feq(t.length(), 15.0));
    }
}

#[test]
fn normal_is_vertical_through_center() {
    let l = SceneLayout::new(512, 512);
    let n = l.normal_segment();

    assert_eq!(n.start, Point2D::new(256.0, 226.0));
    assert_eq!(n.end, Point2D::new(256.0, 286.0));
}

#[test]
fn rays_meet_at_center() {
    let l = SceneLayout::new(512, 512);
    let theta = 30f64.to_radians();

    assert_eq!(l.incident_ray(theta).end, l.center);
    assert_eq!(l.refracted_ray(theta).start, l.center);
    assert!(crate::feq(l.refracted_ray(theta).end.y, 512.0));
}

#[test]
fn arc_spans_incident_angle() {
    let l = SceneLayout::new(512, 512);
    let (start, end) = l.angle_arc(30.0);

    assert!(crate::feq(start, -120.0));
    assert!(crate::feq(end, -90.0));
    assert_eq!(l.label_position(), Point2D::new(306.0, 216.0));
}
