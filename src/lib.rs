pub mod consts;

pub mod point;
pub mod color;

pub mod refraction;
pub mod ray;
pub mod layout;

pub mod surface;
pub mod canvas;
pub mod font;
pub mod arrow;
pub mod frames;

pub mod prompts;
pub mod config;
pub mod error;
pub mod video;
pub mod generator;

use consts::FEQ_EPSILON;

pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < FEQ_EPSILON
}
