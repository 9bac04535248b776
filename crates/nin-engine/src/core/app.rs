use crate::input::InputState;
use crate::time::FrameTime;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by the runtime.
///
/// Each redraw calls [`App::update`] then [`App::render`], in that order, on the
/// event-loop thread.
pub trait App {
    /// Consumes pending input. The default discards every queued event.
    fn update(&mut self, input: &mut InputState, time: FrameTime) -> AppControl {
        let dropped = input.discard_pending();
        if dropped.total() > 0 {
            log::trace!("frame {}: discarded {dropped:?}", time.frame_index);
        }
        AppControl::Continue
    }

    /// Records and presents one frame.
    fn render(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
