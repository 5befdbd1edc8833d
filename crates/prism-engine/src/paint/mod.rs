//! Color types used for clear colors and shader constants.

mod color;

pub use color::Color;
