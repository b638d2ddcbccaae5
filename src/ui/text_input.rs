//! Free text entry bound to a caller-owned `String`

use macroquad::prelude::*;

use super::widgets::body_color;
use super::{draw_label, Bound, Canvas, ElementBase, FrameInput, Rect, Theme};

/// Edit buffer with a byte-index cursor
#[derive(Debug, Clone, Default)]
pub struct TextEntry {
    pub text: String,
    /// Cursor position (byte index)
    pub cursor: usize,
}

impl TextEntry {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    /// Move cursor left one character
    pub fn move_left(&mut self) {
        if let Some((i, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.cursor = i;
        }
    }

    /// Move cursor right one character
    pub fn move_right(&mut self) {
        if let Some(ch) = self.text[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Insert a character at cursor
    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Delete character before cursor (backspace)
    pub fn backspace(&mut self) {
        if let Some((prev, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    /// Delete character after cursor (delete key)
    pub fn delete(&mut self) {
        if let Some(ch) = self.text[self.cursor..].chars().next() {
            let next = self.cursor + ch.len_utf8();
            self.text.drain(self.cursor..next);
        }
    }

    /// Apply this frame's keys and typed characters, returns true if the text changed
    pub fn apply(&mut self, input: &FrameInput, max_len: usize) -> bool {
        let mut changed = false;

        if input.key_pressed(KeyCode::Left) {
            self.move_left();
        }
        if input.key_pressed(KeyCode::Right) {
            self.move_right();
        }
        if input.key_pressed(KeyCode::Home) {
            self.move_home();
        }
        if input.key_pressed(KeyCode::End) {
            self.move_end();
        }
        if input.backspace() && self.cursor > 0 {
            self.backspace();
            changed = true;
        }
        if input.key_pressed(KeyCode::Delete) && self.cursor < self.text.len() {
            self.delete();
            changed = true;
        }

        for &ch in &input.chars {
            if self.text.chars().count() >= max_len {
                break;
            }
            self.insert_char(ch);
            changed = true;
        }

        changed
    }
}

/// Single-line text field
pub struct InputBox {
    pub base: ElementBase,
    value: Bound<String>,
    entry: TextEntry,
    editing: bool,
    hovered: bool,
    pub max_len: usize,
    blink_frames: u32,
}

impl InputBox {
    pub const DEFAULT_MAX_LEN: usize = 64;

    pub fn new(label: impl Into<String>, value: Bound<String>) -> Self {
        Self {
            base: ElementBase::new(label),
            value,
            entry: TextEntry::default(),
            editing: false,
            hovered: false,
            max_len: Self::DEFAULT_MAX_LEN,
            blink_frames: 0,
        }
    }

    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn update(&mut self, input: &FrameInput) {
        let Some(current) = self.value.get() else {
            self.editing = false;
            return;
        };
        self.hovered = input.mouse.inside(&self.base.rect);

        if input.mouse.left_pressed {
            if self.hovered && !self.editing {
                self.editing = true;
                self.entry = TextEntry::new(current);
                self.blink_frames = 0;
            } else if !self.hovered {
                self.editing = false;
            }
        }

        if !self.editing {
            return;
        }

        if self.entry.apply(input, self.max_len) {
            let text = self.entry.text.clone();
            self.value.with(|v| *v = text);
            self.blink_frames = 0;
        }

        if input.enter() || input.escape() {
            self.editing = false;
        }
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas, theme: &Theme) {
        let rect = self.base.rect;
        let font = self.base.font.as_ref();
        canvas.fill_rounded_rect(rect, theme.corner_radius, body_color(theme, self.hovered, false));
        draw_label(canvas, &self.base.label, rect, theme.padding, font, theme.font_size, theme.text.to_color());

        // Field occupies the right half of the row
        let label_w = canvas.measure_text(&self.base.label, font, theme.font_size) + theme.padding * 2.0;
        let field_x = (rect.x + label_w).max(rect.center_x());
        let field = Rect::new(field_x, rect.y + 2.0, (rect.right() - field_x - 2.0).max(0.0), rect.h - 4.0);
        canvas.fill_rect(field, theme.panel_bg.to_color());

        let text = if self.editing {
            self.entry.text.clone()
        } else {
            self.value.get().unwrap_or_default()
        };
        draw_label(canvas, &text, field, 3.0, font, theme.font_size, theme.text_light.to_color());

        if self.editing {
            canvas.stroke_rect(field, 1.0, theme.accent.to_color());
            self.blink_frames = self.blink_frames.wrapping_add(1);
            if (self.blink_frames / 30) % 2 == 0 {
                let before = &self.entry.text[..self.entry.cursor];
                let cursor_x = field.x + 3.0 + canvas.measure_text(before, font, theme.font_size);
                canvas.fill_rect(Rect::new(cursor_x, field.y + 2.0, 1.0, field.h - 4.0), theme.text_light.to_color());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::shared;

    fn field(value: &crate::ui::Shared<String>) -> InputBox {
        let mut b = InputBox::new("Name", Bound::new(value)).max_len(8);
        b.base.rect = Rect::new(0.0, 0.0, 200.0, 18.0);
        b
    }

    #[test]
    fn test_typing_writes_through() {
        let value = shared(String::from("cube"));
        let mut b = field(&value);
        b.update(&FrameInput::at(20.0, 9.0).with_left_pressed());
        b.update(&FrameInput::at(20.0, 9.0).with_chars("_01"));
        assert_eq!(value.borrow().as_str(), "cube_01");
        b.update(&FrameInput::at(20.0, 9.0).with_key(KeyCode::Backspace));
        assert_eq!(value.borrow().as_str(), "cube_0");
    }

    #[test]
    fn test_max_len_caps_input() {
        let value = shared(String::new());
        let mut b = field(&value);
        b.update(&FrameInput::at(20.0, 9.0).with_left_pressed());
        b.update(&FrameInput::at(20.0, 9.0).with_chars("abcdefghijkl"));
        assert_eq!(value.borrow().as_str(), "abcdefgh");
    }

    #[test]
    fn test_keys_ignored_when_not_editing() {
        let value = shared(String::from("x"));
        let mut b = field(&value);
        b.update(&FrameInput::at(20.0, 9.0).with_chars("yz"));
        assert_eq!(value.borrow().as_str(), "x");

        b.update(&FrameInput::at(20.0, 9.0).with_left_pressed());
        b.update(&FrameInput::at(20.0, 9.0).with_key(KeyCode::Enter));
        assert!(!b.is_editing());
    }

    #[test]
    fn test_click_outside_or_escape_ends_editing() {
        let value = shared(String::from("cube"));
        let mut b = field(&value);

        b.update(&FrameInput::at(20.0, 9.0).with_left_pressed());
        assert!(b.is_editing());
        b.update(&FrameInput::at(20.0, 90.0).with_left_pressed());
        assert!(!b.is_editing());
        b.update(&FrameInput::at(20.0, 90.0).with_chars("zz"));
        assert_eq!(value.borrow().as_str(), "cube");

        b.update(&FrameInput::at(20.0, 9.0).with_left_pressed());
        assert!(b.is_editing());
        b.update(&FrameInput::at(20.0, 9.0).with_key(KeyCode::Escape));
        assert!(!b.is_editing());
        b.update(&FrameInput::at(20.0, 9.0).with_chars("zz"));
        assert_eq!(value.borrow().as_str(), "cube");
    }

    #[test]
    fn test_cursor_editing_mid_string() {
        let mut entry = TextEntry::new("héllo");
        entry.move_home();
        entry.move_right();
        entry.move_right();
        entry.backspace();
        assert_eq!(entry.text, "hllo");
        entry.delete();
        assert_eq!(entry.text, "hlo");
        entry.move_end();
        entry.insert_char('!');
        assert_eq!(entry.text, "hlo!");
    }
}
