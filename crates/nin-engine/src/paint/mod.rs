//! Color values shared between the geometry builder and renderers.

pub mod color;

pub use color::Color;
