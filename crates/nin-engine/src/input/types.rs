/// Pressed/released transition of a key or button.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Key transition, identified by the platform's physical key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyEvent {
    /// Stable platform code; 0 when the platform reports an unidentified key.
    pub code: u32,
    pub state: KeyState,
    /// True when event is a key-repeat.
    pub repeat: bool,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerEventKind {
    Moved,
    Button { button: MouseButton, state: KeyState },
    /// Wheel delta in lines.
    Wheel { dx: f32, dy: f32 },
    /// Pointer left the window surface.
    Left,
}

/// Pointer event in physical pixels, top-left origin.
///
/// `x`/`y` carry the last known pointer position for events that do not report one.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f32,
    pub y: f32,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Committed character (after keyboard layout and IME).
    Char(char),
    Pointer(PointerEvent),
    /// Window focus change.
    Focused(bool),
}
