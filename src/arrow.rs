use crate::color::Color;
use crate::point::Point2D;
use crate::surface::CanvasSurface;
use crate::consts::{ ARROWHEAD_LENGTH, ARROWHEAD_ANGLE };

/// Far ends of the two arrowhead strokes for the segment `start -> end`.
///
/// Both strokes start at `end`, are `ARROWHEAD_LENGTH` long and sit
/// `ARROWHEAD_ANGLE` either side of the reversed segment direction. A
/// zero-length segment points along +x.
pub fn arrowhead(start: Point2D, end: Point2D) -> [Point2D; 2] {
    let angle = (end - start).angle();

    let barb = |offset: f64| Point2D::new(
        end.x - ARROWHEAD_LENGTH * (angle + offset).cos(),
        end.y - ARROWHEAD_LENGTH * (angle + offset).sin()
    );

    [barb(-ARROWHEAD_ANGLE), barb(ARROWHEAD_ANGLE)]
}

/// Draws the segment `start -> end` with an arrowhead at `end`.
pub fn draw_arrow<S: CanvasSurface>(surface: &mut S, start: Point2D,
    end: Point2D, color: Color, width: f64) {
    surface.draw_line(start, end, color, width);

    for tip in arrowhead(start, end).iter() {
        surface.draw_line(end, *tip, color, width);
    }
}

#[cfg(test)]
fn angle_between(a: Point2D, b: Point2D) -> f64 {
    let dot = a.x * b.x + a.y * b.y;
    (dot / (a.magnitude() * b.magnitude())).clamp(-1.0, 1.0).acos()
}

#[test]
fn arrowhead_strokes_are_fixed_length_at_thirty_degrees() {
    let cases = [
        (Point2D::new(0.0, 0.0), Point2D::new(100.0, 0.0)),
        (Point2D::new(116.2, 50.0), Point2D::new(256.0, 256.0)),
        (Point2D::new(256.0, 256.0), Point2D::new(266.0, 258.0)),
        (Point2D::new(10.0, 400.0), Point2D::new(-300.0, -20.0)),
    ];

    for (start, end) in cases.iter() {
        let reversed = *start - *end;

        for tip in arrowhead(*start, *end).iter() {
            let stroke = *tip - *end;
            assert!(crate::feq(stroke.magnitude(), 15.0));
            assert!((angle_between(stroke, reversed) - 30f64.to_radians()).abs()
                < 1e-9);
        }
    }
}

#[test]
fn arrowhead_strokes_sit_either_side() {
    let [a, b] = arrowhead(Point2D::new(0.0, 0.0), Point2D::new(100.0, 0.0));

    assert!(a.x < 100.0 && b.x < 100.0);
    assert!(crate::feq(a.y, -b.y));
    assert!(a.y != 0.0);
}

#[test]
fn draw_arrow_paints_shaft_and_head() {
    use crate::canvas::Canvas;

    let mut c = Canvas::blank(120, 40, Color::white());
    draw_arrow(&mut c, Point2D::new(10.0, 20.0), Point2D::new(100.0, 20.0),
        Color::blue(), 1.0);

    // Shaft
    assert_eq!(c.read_pixel(50, 19).unwrap(), Color::blue());
    // Head: the barbs reach back and out about 13 x 7.5 pixels
    let [a, _] = arrowhead(Point2D::new(10.0, 20.0), Point2D::new(100.0, 20.0));
    let mid = Point2D::new(100.0, 20.0).lerp(&a, 0.5);
    assert_eq!(c.read_pixel(mid.x as usize, mid.y as usize).unwrap(),
        Color::blue());
    // Beyond the tip stays clear
    assert_eq!(c.read_pixel(110, 20).unwrap(), Color::white());
}
