use ::winit::event::{ElementState, Ime, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use ::winit::keyboard::PhysicalKey;

use crate::input::{
    InputEvent, InputState, KeyEvent, KeyState, MouseButton, PointerEvent, PointerEventKind,
};

/// Approximate pixel height of one wheel line, for high-precision wheels.
const PIXELS_PER_LINE: f32 = 40.0;

/// Feeds a winit `WindowEvent` into `state`.
///
/// Events not represented by the input subsystem are ignored. A key press that
/// produces text yields a key event followed by one char event per character.
pub(crate) fn feed_window_event(state: &mut InputState, event: &WindowEvent) {
    match event {
        WindowEvent::Focused(f) => state.apply_event(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => {
            let (x, y) = state.pointer_or_origin();
            state.apply_event(pointer(PointerEventKind::Left, x, y));
        }

        WindowEvent::CursorMoved { position, .. } => {
            state.apply_event(pointer(
                PointerEventKind::Moved,
                position.x as f32,
                position.y as f32,
            ));
        }

        WindowEvent::MouseInput {
            state: st, button, ..
        } => {
            let (x, y) = state.pointer_or_origin();
            let kind = PointerEventKind::Button {
                button: map_mouse_button(*button),
                state: map_state(*st),
            };
            state.apply_event(pointer(kind, x, y));
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let (dx, dy) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                MouseScrollDelta::PixelDelta(p) => {
                    (p.x as f32 / PIXELS_PER_LINE, p.y as f32 / PIXELS_PER_LINE)
                }
            };
            let (x, y) = state.pointer_or_origin();
            state.apply_event(pointer(PointerEventKind::Wheel { dx, dy }, x, y));
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let code = match event.physical_key {
                PhysicalKey::Code(code) => code as u32,
                PhysicalKey::Unidentified(_) => 0,
            };

            state.apply_event(InputEvent::Key(KeyEvent {
                code,
                state: map_state(event.state),
                repeat: event.repeat,
            }));

            if event.state == ElementState::Pressed {
                if let Some(text) = &event.text {
                    for c in text.chars() {
                        state.apply_event(InputEvent::Char(c));
                    }
                }
            }
        }

        WindowEvent::Ime(Ime::Commit(text)) => {
            for c in text.chars() {
                state.apply_event(InputEvent::Char(c));
            }
        }

        _ => {}
    }
}

#[inline]
fn pointer(kind: PointerEventKind, x: f32, y: f32) -> InputEvent {
    InputEvent::Pointer(PointerEvent { kind, x, y })
}

fn map_state(s: ElementState) -> KeyState {
    match s {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}
