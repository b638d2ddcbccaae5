//! Per-frame input snapshot for widget updates
//!
//! Widgets never query macroquad directly. The host polls once per frame
//! through [`InputTracker`] and hands the resulting [`FrameInput`] to
//! `Gui::update`. Every widget reads the same immutable snapshot, so all of
//! them observe identical same-frame edges.

use macroquad::prelude::*;
use super::Rect;

/// Mouse button state
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    /// Pointer movement since the previous frame
    pub dx: f32,
    pub dy: f32,
    pub left_down: bool,
    pub left_pressed: bool,  // Just pressed this frame
    pub left_released: bool, // Just released this frame
    pub right_down: bool,
    pub right_pressed: bool,
    pub right_released: bool,
    pub middle_down: bool,
    pub middle_pressed: bool,
    pub middle_released: bool,
    pub scroll: f32, // Scroll wheel delta, in notches
}

impl MouseState {
    /// Check if mouse is inside a rect
    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    /// Check if mouse just clicked inside a rect
    pub fn clicked(&self, rect: &Rect) -> bool {
        self.left_pressed && rect.contains(self.x, self.y)
    }

    /// Secondary or middle button went down this frame
    pub fn grab_pressed(&self) -> bool {
        self.right_pressed || self.middle_pressed
    }

    /// Secondary or middle button went up this frame
    pub fn grab_released(&self) -> bool {
        self.right_released || self.middle_released
    }
}

/// Everything a widget may read during one update pass
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub mouse: MouseState,
    /// Printable characters typed this frame, in order
    pub chars: Vec<char>,
    pub keys_pressed: Vec<KeyCode>,
    pub keys_down: Vec<KeyCode>,
}

impl FrameInput {
    /// Snapshot with the pointer resting at (x, y) and nothing pressed
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            mouse: MouseState { x, y, ..Default::default() },
            ..Default::default()
        }
    }

    pub fn with_left_pressed(mut self) -> Self {
        self.mouse.left_pressed = true;
        self.mouse.left_down = true;
        self
    }

    pub fn with_left_down(mut self) -> Self {
        self.mouse.left_down = true;
        self
    }

    pub fn with_right_pressed(mut self) -> Self {
        self.mouse.right_pressed = true;
        self.mouse.right_down = true;
        self
    }

    pub fn with_right_down(mut self) -> Self {
        self.mouse.right_down = true;
        self
    }

    pub fn with_right_released(mut self) -> Self {
        self.mouse.right_released = true;
        self.mouse.right_down = false;
        self
    }

    pub fn with_delta(mut self, dx: f32, dy: f32) -> Self {
        self.mouse.dx = dx;
        self.mouse.dy = dy;
        self
    }

    pub fn with_scroll(mut self, scroll: f32) -> Self {
        self.mouse.scroll = scroll;
        self
    }

    pub fn with_chars(mut self, text: &str) -> Self {
        self.chars.extend(text.chars());
        self
    }

    pub fn with_key(mut self, key: KeyCode) -> Self {
        self.keys_pressed.push(key);
        self.keys_down.push(key);
        self
    }

    pub fn with_key_down(mut self, key: KeyCode) -> Self {
        self.keys_down.push(key);
        self
    }

    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Universal "abort editing / release capture" signal
    pub fn escape(&self) -> bool {
        self.key_pressed(KeyCode::Escape)
    }

    pub fn enter(&self) -> bool {
        self.key_pressed(KeyCode::Enter) || self.key_pressed(KeyCode::KpEnter)
    }

    pub fn backspace(&self) -> bool {
        self.key_pressed(KeyCode::Backspace)
    }
}

/// Builds a [`FrameInput`] from macroquad once per frame
///
/// Keeps the previous pointer position so pointer deltas are measured in
/// screen pixels between consecutive polls.
pub struct InputTracker {
    last_mouse: Option<(f32, f32)>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self { last_mouse: None }
    }

    /// Sample macroquad's input state. Drains the character queue.
    pub fn poll(&mut self) -> FrameInput {
        let (x, y) = mouse_position();
        let (dx, dy) = match self.last_mouse {
            Some((lx, ly)) => (x - lx, y - ly),
            None => (0.0, 0.0),
        };
        self.last_mouse = Some((x, y));

        let scroll = wheel_notches(mouse_wheel().1, WHEEL_UNITS_PER_NOTCH);

        let mouse = MouseState {
            x,
            y,
            dx,
            dy,
            left_down: is_mouse_button_down(MouseButton::Left),
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            left_released: is_mouse_button_released(MouseButton::Left),
            right_down: is_mouse_button_down(MouseButton::Right),
            right_pressed: is_mouse_button_pressed(MouseButton::Right),
            right_released: is_mouse_button_released(MouseButton::Right),
            middle_down: is_mouse_button_down(MouseButton::Middle),
            middle_pressed: is_mouse_button_pressed(MouseButton::Middle),
            middle_released: is_mouse_button_released(MouseButton::Middle),
            scroll,
        };

        let mut chars = Vec::new();
        while let Some(ch) = get_char_pressed() {
            // Filter control characters
            if ch >= ' ' && ch != '\u{7f}' {
                chars.push(ch);
            }
        }

        FrameInput {
            mouse,
            chars,
            keys_pressed: get_keys_pressed().into_iter().collect(),
            keys_down: get_keys_down().into_iter().collect(),
        }
    }
}

/// Raw wheel units macroquad reports for one notch. Browsers report pixels.
#[cfg(target_arch = "wasm32")]
const WHEEL_UNITS_PER_NOTCH: f32 = 100.0;
#[cfg(not(target_arch = "wasm32"))]
const WHEEL_UNITS_PER_NOTCH: f32 = 1.0;

/// Whole wheel notches in a raw wheel delta. Any movement counts as at least one.
pub fn wheel_notches(raw: f32, units_per_notch: f32) -> f32 {
    if !raw.is_finite() || raw.abs() < 0.1 {
        return 0.0;
    }
    let notches = (raw / units_per_notch.max(f32::EPSILON)).round();
    if notches == 0.0 {
        raw.signum()
    } else {
        notches
    }
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clicked_requires_press_inside() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(FrameInput::at(5.0, 5.0).with_left_pressed().mouse.clicked(&rect));
        assert!(!FrameInput::at(5.0, 5.0).with_left_down().mouse.clicked(&rect));
        assert!(!FrameInput::at(50.0, 5.0).with_left_pressed().mouse.clicked(&rect));
    }

    #[test]
    fn test_wheel_keeps_notch_count() {
        assert_eq!(wheel_notches(3.0, 1.0), 3.0);
        assert_eq!(wheel_notches(-1.0, 1.0), -1.0);
        assert_eq!(wheel_notches(-240.0, 100.0), -2.0);
        // Touchpad nudges still count as one notch
        assert_eq!(wheel_notches(30.0, 100.0), 1.0);
        assert_eq!(wheel_notches(0.05, 1.0), 0.0);
        assert_eq!(wheel_notches(f32::NAN, 1.0), 0.0);
    }

    #[test]
    fn test_enter_accepts_keypad() {
        assert!(FrameInput::default().with_key(KeyCode::KpEnter).enter());
        assert!(!FrameInput::default().with_key_down(KeyCode::Enter).enter());
    }
}
