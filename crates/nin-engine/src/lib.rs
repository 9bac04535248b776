//! nin engine crate.
//!
//! Platform + GPU runtime pieces and the two-pass stencil outline technique
//! used by the demo binary.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod geometry;
pub mod render;
pub mod paint;
