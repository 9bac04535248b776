//! Time subsystem.
//!
//! Frame timing utilities decoupled from the runtime:
//! - `FrameClock::tick()` once per presented frame yields `FrameTime`
//! - `FrameStats` turns frame timestamps into periodic frame-rate reports

mod frame_clock;
mod stats;

pub use frame_clock::{FrameClock, FrameTime};
pub use stats::{FrameReport, FrameStats};
