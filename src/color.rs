use std::ops::{ Add, Mul };

use crate::feq;

/// A color.
///
/// Represented conventionally with red-green-blue (RGB) values. Each value
/// ranges from 0.0 to 1.0 inclusive.
///
/// # Examples
///
/// Construct the color red:
///
/// ```
/// # use glass_refraction::color::Color;
/// let red = Color::red();
/// assert_eq!(red, Color::rgb(1.0, 0.0, 0.0));
/// ```
///
/// Colors can also be built from 8-bit channels:
///
/// ```
/// # use glass_refraction::color::Color;
/// assert_eq!(Color::rgb8(0, 0, 255), Color::blue());
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Partial equality on two colors.
///
/// Colors are compared component-wise, accounting for possible floating point
/// error in comparisons.
impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        feq(self.r, other.r) &&
            feq(self.g, other.g) &&
            feq(self.b, other.b)
    }
}

impl Color {
    /// Creates a color with red, green and blue values.
    pub fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    /// Creates a color from 8-bit red, green and blue channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Color {
        Color {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// The color black.
    pub fn black() -> Color {
        Color { r: 0.0, g: 0.0, b: 0.0 }
    }

    /// The color white.
    pub fn white() -> Color {
        Color { r: 1.0, g: 1.0, b: 1.0 }
    }

    /// The color red. Used for the refracted ray.
    pub fn red() -> Color {
        Color { r: 1.0, g: 0.0, b: 0.0 }
    }

    /// The color blue. Used for the incident ray.
    pub fn blue() -> Color {
        Color { r: 0.0, g: 0.0, b: 1.0 }
    }

    /// Dark gray used for the glass hatching.
    pub fn hatch_gray() -> Color {
        Color::rgb8(100, 100, 100)
    }

    /// Light gray used for the normal line.
    pub fn normal_gray() -> Color {
        Color::rgb8(150, 150, 150)
    }

    /// Blends `self` towards `other` by `t`, where `t == 0` is `self` and
    /// `t == 1` is `other`.
    pub fn blend(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        *self * (1.0 - t) + *other * t
    }

    /// Converts the color to 8-bit channels, clamping out-of-range values.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let scale = |c: f64| (c * 255.0).clamp(0.0, 255.0).round() as u8;
        [scale(self.r), scale(self.g), scale(self.b)]
    }
}

/// Adds two colors together.
///
/// Components are added together individually.
impl Add<Color> for Color {
    type Output = Color;

    fn add(self, other: Color) -> Self::Output {
        Color {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }
}

/// Multiplies a color by a scalar.
///
/// Each component is multiplied by the scalar.
impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, other: f64) -> Self::Output {
        Color {
            r: self.r * other,
            g: self.g * other,
            b: self.b * other,
        }
    }
}

#[test]
fn add_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);
    let c3 = Color { r: 1.6, g: 0.7, b: 1.0 };

    assert_eq!(c1 + c2, c3);
}

#[test]
fn multiply_colors() {
    let c1 = Color::rgb(0.2, 0.3, 0.4);
    let c2 = Color { r: 0.4, g: 0.6, b: 0.8 };

    assert_eq!(c1 * 2.0, c2);
}

#[test]
fn blend_colors() {
    let half = Color::white().blend(&Color::black(), 0.5);
    assert_eq!(half, Color::rgb(0.5, 0.5, 0.5));
    assert_eq!(Color::white().blend(&Color::red(), 2.0), Color::red());
}

#[test]
fn byte_conversion() {
    assert_eq!(Color::hatch_gray().to_rgb8(), [100, 100, 100]);
    assert_eq!(Color::rgb(1.5, -0.2, 0.5).to_rgb8(), [255, 0, 128]);
}
