use std::path::Path;

use image::{ ImageResult, Rgb, RgbImage, RgbaImage };

use crate::color::Color;
use crate::point::Point2D;
use crate::surface::CanvasSurface;
use crate::font;

/// A canvas for drawing pixels.
///
/// Frames are drawn onto a `Canvas` through the `CanvasSurface` operations.
/// Once a frame is complete, the canvas can be converted into an `image`
/// buffer or saved directly to a file.
///
/// Strokes are drawn solid, without anti-aliasing; only text coverage is
/// blended.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored as a flattened vector.
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a new black canvas with specified width and height.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas::filled(width, height, Color::black())
    }

    /// Creates a canvas with every pixel set to `color`.
    pub fn filled(width: usize, height: usize, color: Color) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![color; width * height]
        }
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// Out-of-bounds pixels are ignored. Pixels are specified in row-column
    /// order, where `y` is the row of the pixel, and `x` is the column. Rows
    /// and columns are zero-indexed.
    ///
    /// # Examples
    ///
    /// Writing a pixel to the fourth column, second row on an 8-by-8 canvas:
    ///
    /// ```
    /// # use glass_refraction::color::Color;
    /// # use glass_refraction::canvas::Canvas;
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, &purple);
    /// assert_eq!(canvas.read_pixel(4, 2).unwrap(), purple);
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: &Color) {
        // Silently ignore out-of-bounds pixels
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[(y * self.width) + x] = *pixel;
    }

    /// Reads a color from a location on the `Canvas`.
    ///
    /// If the specified pixel location is out-of-bounds, `None` is returned.
    pub fn read_pixel(&self, x: usize, y: usize) -> Option<Color> {
        // Return nothing if pixel is out-of-bounds
        if x >= self.width || y >= self.height {
            return None
        }

        Some(self.pixels[(y * self.width) + x])
    }

    /// Like `write_pixel`, but accepts signed coordinates.
    fn plot(&mut self, x: i64, y: i64, pixel: &Color) {
        if x < 0 || y < 0 {
            return;
        }

        self.write_pixel(x as usize, y as usize, pixel);
    }

    /// Paints every pixel whose center lies within the box spanned by
    /// `min`/`max` and satisfies `inside`.
    fn fill_where<F>(&mut self, min: Point2D, max: Point2D, color: &Color,
        inside: F)
    where
        F: Fn(Point2D) -> bool,
    {
        let x0 = min.x.floor().max(0.0) as usize;
        let y0 = min.y.floor().max(0.0) as usize;
        let x1 = (max.x.ceil().max(0.0) as usize).min(self.width);
        let y1 = (max.y.ceil().max(0.0) as usize).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                if inside(Point2D::new(x as f64 + 0.5, y as f64 + 0.5)) {
                    self.pixels[(y * self.width) + x] = *color;
                }
            }
        }
    }

    /// Converts the canvas to an 8-bit RGB image.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let c = self.pixels[(y as usize * self.width) + x as usize];
            Rgb(c.to_rgb8())
        })
    }

    /// Converts the canvas to an opaque 8-bit RGBA image.
    pub fn to_rgba_image(&self) -> RgbaImage {
        image::DynamicImage::ImageRgb8(self.to_rgb_image()).to_rgba8()
    }

    /// Saves the canvas to an image file.
    ///
    /// The format is chosen from the file extension (e.g. `.png`, `.ppm`).
    pub fn save(&self, path: &Path) -> ImageResult<()> {
        self.to_rgb_image().save(path)
    }
}

impl CanvasSurface for Canvas {
    fn blank(width: usize, height: usize, background: Color) -> Canvas {
        Canvas::filled(width, height, background)
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn draw_line(&mut self, start: Point2D, end: Point2D, color: Color,
        width: f64) {
        let half = (width / 2.0).max(0.5);
        let min = Point2D::new(start.x.min(end.x) - half,
            start.y.min(end.y) - half);
        let max = Point2D::new(start.x.max(end.x) + half,
            start.y.max(end.y) + half);

        self.fill_where(min, max, &color,
            |p| p.distance_to_segment(&start, &end) <= half);
    }

    fn draw_arc(&mut self, center: Point2D, radius: f64, start_deg: f64,
        end_deg: f64, color: Color, width: f64) {
        let inner = (radius - width.max(1.0)).max(0.0);
        let span = end_deg - start_deg;
        let sweep = span.rem_euclid(360.0);
        let full_circle = span >= 360.0;

        let min = Point2D::new(center.x - radius - 1.0, center.y - radius - 1.0);
        let max = Point2D::new(center.x + radius + 1.0, center.y + radius + 1.0);

        self.fill_where(min, max, &color, |p| {
            let d = p - center;
            let r = d.magnitude();
            if r < inner || r > radius {
                return false;
            }

            // Clockwise from 3 o'clock, since y grows downward
            let angle = d.angle().to_degrees();
            full_circle || (angle - start_deg).rem_euclid(360.0) <= sweep
        });
    }

    fn draw_text(&mut self, position: Point2D, text: &str, color: Color,
        size: f64) {
        let font = font::resolve();

        font.rasterize(position.x, position.y, text, size, |x, y, coverage| {
            if x < 0 || y < 0 {
                return;
            }

            if let Some(under) = self.read_pixel(x as usize, y as usize) {
                let blended = under.blend(&color, coverage);
                self.plot(x, y, &blended);
            }
        });
    }
}

#[test]
fn blank_canvas_is_uniform() {
    let c = Canvas::blank(10, 20, Color::white());

    assert_eq!(c.width(), 10);
    assert_eq!(c.height(), 20);
    for y in 0..20 {
        for x in 0..10 {
            assert_eq!(c.read_pixel(x, y).unwrap(), Color::white());
        }
    }
    assert_eq!(c.read_pixel(10, 0), None);
}

#[test]
fn horizontal_line_has_requested_thickness() {
    let mut c = Canvas::blank(20, 20, Color::white());
    c.draw_line(Point2D::new(0.0, 10.0), Point2D::new(20.0, 10.0),
        Color::black(), 4.0);

    // Rows 8..12 have centers within 2px of y = 10
    for y in 0..20 {
        let expected = if y >= 8 && y < 12 { Color::black() } else { Color::white() };
        assert_eq!(c.read_pixel(5, y).unwrap(), expected, "row {}", y);
    }
}

#[test]
fn diagonal_line_covers_its_pixels() {
    let mut c = Canvas::blank(10, 10, Color::white());
    c.draw_line(Point2D::new(0.0, 0.0), Point2D::new(10.0, 10.0),
        Color::red(), 1.0);

    for i in 0..10 {
        assert_eq!(c.read_pixel(i, i).unwrap(), Color::red());
    }
    assert_eq!(c.read_pixel(9, 0).unwrap(), Color::white());
}

#[test]
fn line_clipped_to_canvas() {
    let mut c = Canvas::blank(10, 10, Color::white());
    c.draw_line(Point2D::new(-50.0, 5.0), Point2D::new(50.0, 5.0),
        Color::blue(), 1.0);

    assert_eq!(c.read_pixel(0, 5).unwrap(), Color::blue());
    assert_eq!(c.read_pixel(9, 5).unwrap(), Color::blue());
}

#[test]
fn arc_only_covers_its_sweep() {
    let mut c = Canvas::blank(100, 100, Color::white());
    let center = Point2D::new(50.0, 50.0);

    // From 12 o'clock back to 10:30 or so, i.e. upper left quadrant only
    c.draw_arc(center, 40.0, -120.0, -90.0, Color::black(), 2.0);

    // Just left of 12 o'clock, on the ring
    assert_eq!(c.read_pixel(49, 11).unwrap(), Color::black());
    // 105 degrees counterclockwise from 3 o'clock, on the ring
    let a = (-105f64).to_radians();
    let x = (50.0 + 39.0 * a.cos()) as usize;
    let y = (50.0 + 39.0 * a.sin()) as usize;
    assert_eq!(c.read_pixel(x, y).unwrap(), Color::black());
    // Upper right and lower half stay blank
    assert_eq!(c.read_pixel(78, 22).unwrap(), Color::white());
    assert_eq!(c.read_pixel(50, 89).unwrap(), Color::white());
    // Inside the ring
    assert_eq!(c.read_pixel(45, 30).unwrap(), Color::white());
}

#[test]
fn text_marks_pixels() {
    let mut c = Canvas::blank(200, 60, Color::white());
    c.draw_text(Point2D::new(10.0, 10.0), "θ = 30°", Color::black(), 20.0);

    let mut marked = 0;
    for y in 0..60 {
        for x in 0..200 {
            if c.read_pixel(x, y).unwrap() != Color::white() {
                marked += 1;
            }
        }
    }
    assert!(marked > 0);
}

#[test]
fn converts_to_image_buffer() {
    let mut c = Canvas::blank(4, 3, Color::white());
    c.write_pixel(1, 2, &Color::red());
    let img = c.to_rgb_image();

    assert_eq!(img.dimensions(), (4, 3));
    assert_eq!(img.get_pixel(1, 2), &Rgb([255, 0, 0]));
    assert_eq!(img.get_pixel(0, 0), &Rgb([255, 255, 255]));
}
