use crate::color::Color;
use crate::point::Point2D;

/// The drawing operations the frame renderers need.
///
/// Scene composition only talks to this trait, so geometry can be exercised
/// without a raster backend. `Canvas` is the raster implementation.
pub trait CanvasSurface {
    /// Creates a surface of the given size filled with `background`.
    fn blank(width: usize, height: usize, background: Color) -> Self
    where
        Self: Sized;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Draws a straight line `width` pixels wide.
    fn draw_line(&mut self, start: Point2D, end: Point2D, color: Color,
        width: f64);

    /// Draws a circular arc around `center`.
    ///
    /// Angles are in degrees, measured from 3 o'clock and increasing
    /// clockwise. The arc runs from `start_deg` to `end_deg`.
    fn draw_arc(&mut self, center: Point2D, radius: f64, start_deg: f64,
        end_deg: f64, color: Color, width: f64);

    /// Draws `text` with its top-left corner at `position`.
    fn draw_text(&mut self, position: Point2D, text: &str, color: Color,
        size: f64);
}
