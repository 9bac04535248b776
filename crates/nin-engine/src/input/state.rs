use std::collections::HashSet;

use super::queue::EventQueue;
use super::types::{InputEvent, KeyEvent, KeyState, MouseButton, PointerEvent, PointerEventKind};

/// Number of events removed by [`InputState::discard_pending`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Discarded {
    pub keys: usize,
    pub chars: usize,
    pub pointer: usize,
}

impl Discarded {
    pub fn total(&self) -> usize {
        self.keys + self.chars + self.pointer
    }
}

/// Input state for the window.
///
/// Key transitions, committed characters and pointer events go into separate
/// queues in arrival order. Held keys/buttons and the pointer position are
/// tracked alongside.
#[derive(Debug, Default)]
pub struct InputState {
    pub keys: EventQueue<KeyEvent>,
    pub chars: EventQueue<char>,
    pub pointer: EventQueue<PointerEvent>,

    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in physical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    keys_down: HashSet<u32>,
    buttons_down: HashSet<MouseButton>,
}

impl InputState {
    pub fn apply_event(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::Key(key) => {
                match key.state {
                    KeyState::Pressed => self.keys_down.insert(key.code),
                    KeyState::Released => self.keys_down.remove(&key.code),
                };
                self.keys.push(key);
            }

            InputEvent::Char(c) => {
                self.chars.push(c);
            }

            InputEvent::Pointer(p) => {
                match p.kind {
                    PointerEventKind::Moved => self.pointer_pos = Some((p.x, p.y)),
                    PointerEventKind::Left => self.pointer_pos = None,
                    PointerEventKind::Button { button, state } => {
                        match state {
                            KeyState::Pressed => self.buttons_down.insert(button),
                            KeyState::Released => self.buttons_down.remove(&button),
                        };
                    }
                    PointerEventKind::Wheel { .. } => {}
                }
                self.pointer.push(p);
            }

            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // Avoid stuck keys/buttons when focus changes mid-press.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }
        }
    }

    /// Empties every queue without acting on the events.
    pub fn discard_pending(&mut self) -> Discarded {
        let out = Discarded {
            keys: self.keys.len(),
            chars: self.chars.len(),
            pointer: self.pointer.len(),
        };
        self.keys.clear();
        self.chars.clear();
        self.pointer.clear();
        out
    }

    /// Pointer position for events that carry none, (0, 0) if unknown.
    pub fn pointer_or_origin(&self) -> (f32, f32) {
        self.pointer_pos.unwrap_or((0.0, 0.0))
    }

    pub fn key_down(&self, code: u32) -> bool {
        self.keys_down.contains(&code)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: u32, state: KeyState) -> InputEvent {
        InputEvent::Key(KeyEvent {
            code,
            state,
            repeat: false,
        })
    }

    fn pointer(kind: PointerEventKind, x: f32, y: f32) -> InputEvent {
        InputEvent::Pointer(PointerEvent { kind, x, y })
    }

    #[test]
    fn events_land_in_their_own_queue() {
        let mut s = InputState::default();
        s.apply_event(key(30, KeyState::Pressed));
        s.apply_event(InputEvent::Char('a'));
        s.apply_event(pointer(PointerEventKind::Moved, 4.0, 5.0));
        s.apply_event(key(30, KeyState::Released));

        assert_eq!(s.keys.len(), 2);
        assert_eq!(s.chars.iter().copied().collect::<Vec<_>>(), vec!['a']);
        assert_eq!(s.pointer.len(), 1);
        assert_eq!(s.pointer_pos, Some((4.0, 5.0)));

        let states: Vec<_> = s.keys.drain().map(|k| k.state).collect();
        assert_eq!(states, vec![KeyState::Pressed, KeyState::Released]);
    }

    #[test]
    fn discard_empties_all_queues() {
        let mut s = InputState::default();
        s.apply_event(key(1, KeyState::Pressed));
        s.apply_event(InputEvent::Char('x'));
        s.apply_event(InputEvent::Char('y'));
        s.apply_event(pointer(PointerEventKind::Wheel { dx: 0.0, dy: 1.0 }, 0.0, 0.0));

        let d = s.discard_pending();
        assert_eq!(
            d,
            Discarded {
                keys: 1,
                chars: 2,
                pointer: 1
            }
        );
        assert_eq!(d.total(), 4);
        assert!(s.keys.is_empty() && s.chars.is_empty() && s.pointer.is_empty());
        assert_eq!(s.discard_pending().total(), 0);
    }

    #[test]
    fn held_state_is_tracked_and_cleared_on_focus_loss() {
        let mut s = InputState::default();
        s.apply_event(key(7, KeyState::Pressed));
        s.apply_event(pointer(
            PointerEventKind::Button {
                button: MouseButton::Left,
                state: KeyState::Pressed,
            },
            1.0,
            1.0,
        ));
        assert!(s.key_down(7));
        assert!(s.button_down(MouseButton::Left));

        s.apply_event(InputEvent::Focused(false));
        assert!(!s.key_down(7));
        assert!(!s.button_down(MouseButton::Left));
        // Queued events survive focus changes until discarded.
        assert_eq!(s.keys.len(), 1);
    }

    #[test]
    fn pointer_left_forgets_position() {
        let mut s = InputState::default();
        s.apply_event(pointer(PointerEventKind::Moved, 10.0, 20.0));
        s.apply_event(pointer(PointerEventKind::Left, 10.0, 20.0));
        assert_eq!(s.pointer_pos, None);
        assert_eq!(s.pointer_or_origin(), (0.0, 0.0));
    }
}
