//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code translates platform events into `InputEvent`s and feeds them to
//! [`InputState`]. Nothing reacts to input; queues are drained each update.

pub(crate) mod platform;
mod queue;
mod state;
mod types;

pub use queue::{EventQueue, DEFAULT_QUEUE_CAPACITY};
pub use state::{Discarded, InputState};
pub use types::{InputEvent, KeyEvent, KeyState, MouseButton, PointerEvent, PointerEventKind};
