//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! the application: the `App` trait, the init/frame contexts and the `Driver`
//! that owns the app lifecycle.

mod app;
mod ctx;
mod driver;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, InitCtx};
pub use driver::{Driver, Lifecycle};
