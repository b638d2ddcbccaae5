//! Numeric entry widgets: integer and float sliders
//!
//! Both sliders share [`NumericField`], a small state machine that handles
//! click-to-edit, drag scrubbing, wheel stepping and typed entry. The color
//! picker reuses it for its channel rows.
//!
//! ```text
//!   Idle --(click inside)--> Editing --(click outside | Esc | Enter)--> Idle
//! ```
//!
//! Whatever state the field is in, the bound value is clamped to
//! `[min, max]` at the end of every tick.

use std::fmt::Display;
use std::str::FromStr;

use macroquad::prelude::*;

use super::widgets::body_color;
use super::{draw_label, draw_label_right, Bound, Canvas, ElementBase, FrameInput, Rect, Theme};

/// Number types a [`NumericField`] can edit
pub trait Numeric: Copy + PartialOrd + Display + FromStr {
    /// Whether a '.' may be typed
    const DECIMAL: bool;

    fn to_f32(self) -> f32;

    /// Add `amount`, carrying whatever can't be represented to the next call
    fn offset(self, amount: f32, carry: &mut f32) -> Self;

    fn negate(self) -> Self;

    /// Text shown in the edit buffer and the value readout
    fn format(self) -> String;

    /// Values no range comparison can place (float NaN)
    fn is_unordered(self) -> bool {
        false
    }
}

impl Numeric for i32 {
    const DECIMAL: bool = false;

    fn to_f32(self) -> f32 {
        self as f32
    }

    fn offset(self, amount: f32, carry: &mut f32) -> Self {
        let total = amount + *carry;
        let whole = total.trunc();
        *carry = total - whole;
        self.saturating_add(whole as i32)
    }

    fn negate(self) -> Self {
        self.saturating_neg()
    }

    fn format(self) -> String {
        self.to_string()
    }
}

impl Numeric for f32 {
    const DECIMAL: bool = true;

    fn to_f32(self) -> f32 {
        self
    }

    fn offset(self, amount: f32, _carry: &mut f32) -> Self {
        self + amount
    }

    fn negate(self) -> Self {
        -self
    }

    fn is_unordered(self) -> bool {
        self.is_nan()
    }

    fn format(self) -> String {
        let text = format!("{:.3}", self);
        let text = text.trim_end_matches('0').trim_end_matches('.');
        match text {
            "" | "-" | "-0" => "0".to_string(),
            _ => text.to_string(),
        }
    }
}

/// Click-to-edit numeric entry state
#[derive(Debug, Clone)]
pub struct NumericField<T: Numeric> {
    pub step: T,
    pub min: T,
    pub max: T,
    editing: bool,
    buffer: String,
    max_len: usize,
    /// '+' / '-' negate the value instead of being typed
    sign_flip: bool,
    carry: f32,
}

impl<T: Numeric> NumericField<T> {
    pub fn new(step: T, min: T, max: T, max_len: usize) -> Self {
        Self {
            step,
            min,
            max,
            editing: false,
            buffer: String::from("0"),
            max_len: max_len.max(1),
            sign_flip: false,
            carry: 0.0,
        }
    }

    pub fn with_sign_flip(mut self, sign_flip: bool) -> Self {
        self.sign_flip = sign_flip;
        self
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn clamp(&self, value: T) -> T {
        if value.is_unordered() || value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    fn begin(&mut self, value: T) {
        self.editing = true;
        self.carry = 0.0;
        self.buffer = value.format();
    }

    /// Leave editing mode, resyncing the buffer with the value
    pub fn end(&mut self, value: T) {
        self.editing = false;
        self.buffer = self.clamp(value).format();
    }

    fn try_commit(&self, value: &mut T) {
        // Unparseable or out-of-range text stays in the buffer uncommitted
        if let Ok(parsed) = self.buffer.parse::<T>() {
            if parsed >= self.min && parsed <= self.max {
                *value = parsed;
            }
        }
    }

    fn buffer_is_blank(&self) -> bool {
        self.buffer.is_empty() || self.buffer == "0"
    }

    fn push_char(&mut self, ch: char) {
        if self.buffer == "0" && ch != '.' {
            self.buffer.clear();
        }
        if self.buffer.chars().count() < self.max_len {
            self.buffer.push(ch);
        }
    }

    fn type_char(&mut self, ch: char, value: &mut T) {
        if ch.is_ascii_digit() {
            self.push_char(ch);
        } else if self.sign_flip && (ch == '+' || ch == '-') {
            *value = value.negate();
            self.buffer = value.format();
            return;
        } else if T::DECIMAL && ch == '.' && !self.buffer.contains('.') {
            self.push_char(ch);
        } else if T::DECIMAL && ch == '-' && self.buffer_is_blank() {
            self.buffer = String::from("-");
        } else {
            return;
        }
        self.try_commit(value);
    }

    fn backspace(&mut self, value: &mut T) {
        self.buffer.pop();
        if self.buffer.is_empty() || self.buffer == "-" {
            self.buffer = String::from("0");
        }
        self.try_commit(value);
    }

    /// Run one frame of the state machine against `value`, hovering `rect`
    pub fn tick(&mut self, value: &mut T, rect: Rect, input: &FrameInput) {
        let mouse = &input.mouse;
        let hovered = mouse.inside(&rect);

        if mouse.left_pressed {
            if hovered && !self.editing {
                self.begin(*value);
            } else if !hovered && self.editing {
                self.end(*value);
            }
        }

        if self.editing {
            let before = value.to_f32();
            if mouse.left_down {
                *value = value.offset(mouse.dx * self.step.to_f32(), &mut self.carry);
            } else if hovered && mouse.scroll != 0.0 {
                *value = value.offset(mouse.scroll * self.step.to_f32(), &mut self.carry);
            }
            if value.to_f32() != before {
                *value = self.clamp(*value);
                self.buffer = value.format();
            }

            for &ch in &input.chars {
                self.type_char(ch, value);
            }
            if input.backspace() {
                self.backspace(value);
            }

            if input.enter() {
                self.try_commit(value);
                self.end(*value);
            } else if input.escape() {
                self.end(*value);
            }
        }

        *value = self.clamp(*value);
    }
}

fn draw_numeric_row<T: Numeric>(
    canvas: &mut dyn Canvas,
    theme: &Theme,
    base: &ElementBase,
    field: &NumericField<T>,
    value: Option<T>,
    hovered: bool,
) {
    let rect = base.rect;
    let font = base.font.as_ref();
    canvas.fill_rounded_rect(rect, theme.corner_radius, body_color(theme, hovered, false));

    // Position of the value within its range
    if let Some(v) = value {
        let span = field.max.to_f32() - field.min.to_f32();
        if span > 0.0 {
            let t = ((v.to_f32() - field.min.to_f32()) / span).clamp(0.0, 1.0);
            canvas.fill_rect(Rect::new(rect.x, rect.bottom() - 2.0, rect.w * t, 2.0), theme.accent.to_color());
        }
    }

    draw_label(canvas, &base.label, rect, theme.padding, font, theme.font_size, theme.text.to_color());
    let readout = if field.is_editing() {
        field.buffer().to_string()
    } else {
        value.map(Numeric::format).unwrap_or_else(|| String::from("-"))
    };
    let color = if field.is_editing() { theme.text_light } else { theme.text };
    draw_label_right(canvas, &readout, rect, theme.padding, font, theme.font_size, color.to_color());

    if field.is_editing() {
        canvas.stroke_rect(rect, 1.0, theme.accent.to_color());
    }
}

/// Integer slider bound to a caller-owned `i32`
pub struct Slider {
    pub base: ElementBase,
    value: Bound<i32>,
    pub field: NumericField<i32>,
    hovered: bool,
}

impl Slider {
    pub const DEFAULT_MIN: i32 = 0;
    pub const DEFAULT_MAX: i32 = 100_000;

    pub fn new(label: impl Into<String>, value: Bound<i32>, step: i32) -> Self {
        Self {
            base: ElementBase::new(label),
            value,
            field: NumericField::new(step, Self::DEFAULT_MIN, Self::DEFAULT_MAX, 10).with_sign_flip(true),
            hovered: false,
        }
    }

    pub fn range(mut self, min: i32, max: i32) -> Self {
        self.field.min = min.min(max);
        self.field.max = max.max(min);
        self
    }

    pub fn is_editing(&self) -> bool {
        self.field.is_editing()
    }

    pub fn update(&mut self, input: &FrameInput) {
        let rect = self.base.rect;
        self.hovered = input.mouse.inside(&rect);
        let field = &mut self.field;
        self.value.with(|v| field.tick(v, rect, input));
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas, theme: &Theme) {
        draw_numeric_row(canvas, theme, &self.base, &self.field, self.value.get(), self.hovered);
    }
}

/// Floating point slider bound to a caller-owned `f32`
pub struct SliderF {
    pub base: ElementBase,
    value: Bound<f32>,
    pub field: NumericField<f32>,
    hovered: bool,
}

impl SliderF {
    pub const DEFAULT_MIN: f32 = -1.0e6;
    pub const DEFAULT_MAX: f32 = 1.0e6;

    pub fn new(label: impl Into<String>, value: Bound<f32>, step: f32) -> Self {
        Self {
            base: ElementBase::new(label),
            value,
            field: NumericField::new(step, Self::DEFAULT_MIN, Self::DEFAULT_MAX, 12),
            hovered: false,
        }
    }

    pub fn range(mut self, min: f32, max: f32) -> Self {
        self.field.min = min.min(max);
        self.field.max = max.max(min);
        self
    }

    pub fn is_editing(&self) -> bool {
        self.field.is_editing()
    }

    pub fn update(&mut self, input: &FrameInput) {
        let rect = self.base.rect;
        self.hovered = input.mouse.inside(&rect);
        let field = &mut self.field;
        self.value.with(|v| field.tick(v, rect, input));
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas, theme: &Theme) {
        draw_numeric_row(canvas, theme, &self.base, &self.field, self.value.get(), self.hovered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::shared;

    fn slider(value: &crate::ui::Shared<i32>) -> Slider {
        let mut s = Slider::new("Force", Bound::new(value), 1).range(0, 100);
        s.base.rect = Rect::new(0.0, 0.0, 200.0, 18.0);
        s
    }

    fn inside() -> FrameInput {
        FrameInput::at(50.0, 9.0)
    }

    #[test]
    fn test_wheel_then_out_of_range_typing() {
        let value = shared(50);
        let mut s = slider(&value);

        s.update(&inside().with_left_pressed());
        assert!(s.is_editing());

        s.update(&inside().with_scroll(-3.0));
        assert_eq!(*value.borrow(), 47);

        s.update(&inside().with_chars("99"));
        assert_eq!(s.field.buffer(), "4799");
        assert_eq!(*value.borrow(), 47);

        s.update(&inside().with_key(KeyCode::Enter));
        assert!(!s.is_editing());
        assert_eq!(*value.borrow(), 47);
    }

    #[test]
    fn test_typed_value_in_range_commits() {
        let value = shared(7);
        let mut s = slider(&value);
        s.update(&inside().with_left_pressed());
        s.update(&inside().with_key(KeyCode::Backspace));
        assert_eq!(s.field.buffer(), "0");
        s.update(&inside().with_chars("42"));
        assert_eq!(*value.borrow(), 42);
    }

    #[test]
    fn test_wheel_ignored_when_idle() {
        let value = shared(50);
        let mut s = slider(&value);
        s.update(&inside().with_scroll(-3.0));
        assert_eq!(*value.borrow(), 50);
    }

    #[test]
    fn test_scrub_while_held() {
        let value = shared(10);
        let mut s = slider(&value);
        s.update(&inside().with_left_pressed());
        s.update(&FrameInput::at(250.0, 9.0).with_left_down().with_delta(12.0, 0.0));
        assert_eq!(*value.borrow(), 22);
        // Half steps accumulate
        s.update(&FrameInput::at(250.0, 9.0).with_left_down().with_delta(0.5, 0.0));
        s.update(&FrameInput::at(250.0, 9.0).with_left_down().with_delta(0.5, 0.0));
        assert_eq!(*value.borrow(), 23);
    }

    #[test]
    fn test_click_outside_and_escape_leave_editing() {
        let value = shared(5);
        let mut s = slider(&value);
        s.update(&inside().with_left_pressed());
        s.update(&FrameInput::at(500.0, 500.0).with_left_pressed());
        assert!(!s.is_editing());

        s.update(&inside().with_left_pressed());
        s.update(&inside().with_key(KeyCode::Escape));
        assert!(!s.is_editing());
    }

    #[test]
    fn test_sign_flip_then_clamp() {
        let value = shared(30);
        let mut s = Slider::new("Force", Bound::new(&value), 1).range(-100, 100);
        s.base.rect = Rect::new(0.0, 0.0, 200.0, 18.0);
        s.update(&inside().with_left_pressed());
        s.update(&inside().with_chars("-"));
        assert_eq!(*value.borrow(), -30);

        let clamped = shared(30);
        let mut s = slider(&clamped);
        s.update(&inside().with_left_pressed());
        s.update(&inside().with_chars("-"));
        assert_eq!(*clamped.borrow(), 0);
    }

    #[test]
    fn test_clamp_holds_every_tick() {
        let value = shared(500);
        let mut s = slider(&value);
        s.update(&FrameInput::default());
        assert_eq!(*value.borrow(), 100);

        let frames = [
            inside().with_left_pressed(),
            inside().with_scroll(40.0),
            inside().with_scroll(40.0),
            inside().with_left_down().with_delta(-300.0, 0.0),
            inside().with_chars("-"),
            inside().with_scroll(-7.0),
            inside().with_chars("1234"),
        ];
        for frame in &frames {
            s.update(frame);
            let v = *value.borrow();
            assert!((0..=100).contains(&v), "value {} escaped range", v);
        }
    }

    #[test]
    fn test_float_clamp_holds_every_tick() {
        let value = shared(5.0f32);
        let mut s = SliderF::new("Bias", Bound::new(&value), 0.5).range(-1.0, 1.0);
        s.base.rect = Rect::new(0.0, 0.0, 200.0, 18.0);
        s.update(&FrameInput::default());
        assert_eq!(*value.borrow(), 1.0);

        let frames = [
            inside().with_left_pressed(),
            inside().with_scroll(30.0),
            inside().with_left_down().with_delta(-400.0, 0.0),
            inside().with_scroll(-9.0),
            inside().with_key(KeyCode::Backspace),
            inside().with_chars("-"),
            inside().with_chars("75.5"),
            inside().with_left_down().with_delta(1.0e9, 0.0),
        ];
        for frame in &frames {
            s.update(frame);
            let v = *value.borrow();
            assert!((-1.0..=1.0).contains(&v), "value {} escaped range", v);
        }
    }

    #[test]
    fn test_nan_written_externally_is_clamped() {
        let value = shared(0.0f32);
        let mut s = SliderF::new("Bias", Bound::new(&value), 0.5).range(-1.0, 1.0);
        s.base.rect = Rect::new(0.0, 0.0, 200.0, 18.0);
        *value.borrow_mut() = f32::NAN;
        s.update(&FrameInput::default());
        assert_eq!(*value.borrow(), -1.0);

        *value.borrow_mut() = f32::INFINITY;
        s.update(&FrameInput::default());
        assert_eq!(*value.borrow(), 1.0);
    }

    #[test]
    fn test_missing_binding_no_ops() {
        let mut s = Slider::new("Orphan", Bound::detached(), 1);
        s.base.rect = Rect::new(0.0, 0.0, 200.0, 18.0);
        s.update(&inside().with_left_pressed());
        assert!(!s.is_editing());
    }

    #[test]
    fn test_float_entry() {
        let value = shared(0.0f32);
        let mut s = SliderF::new("Gravity", Bound::new(&value), 0.1).range(-10.0, 10.0);
        s.base.rect = Rect::new(0.0, 0.0, 200.0, 18.0);
        s.update(&inside().with_left_pressed());
        assert_eq!(s.field.buffer(), "0");

        s.update(&inside().with_chars("-"));
        assert_eq!(s.field.buffer(), "-");
        s.update(&inside().with_chars("2.5.0"));
        assert_eq!(s.field.buffer(), "-2.50");
        assert!((*value.borrow() + 2.5).abs() < 1e-6);

        s.update(&inside().with_key(KeyCode::Backspace));
        s.update(&inside().with_key(KeyCode::Backspace));
        s.update(&inside().with_key(KeyCode::Backspace));
        s.update(&inside().with_key(KeyCode::Backspace));
        assert_eq!(s.field.buffer(), "0");
        assert!(value.borrow().abs() < 1e-6);
    }

    #[test]
    fn test_float_wheel_steps() {
        let value = shared(1.0f32);
        let mut s = SliderF::new("Drag", Bound::new(&value), 0.25);
        s.base.rect = Rect::new(0.0, 0.0, 200.0, 18.0);
        s.update(&inside().with_left_pressed());
        s.update(&inside().with_scroll(2.0));
        assert!((*value.borrow() - 1.5).abs() < 1e-6);
        assert_eq!(s.field.buffer(), "1.5");
    }

    #[test]
    fn test_float_format() {
        assert_eq!(Numeric::format(2.0f32), "2");
        assert_eq!(Numeric::format(-0.0f32), "0");
        assert_eq!(Numeric::format(0.125f32), "0.125");
    }
}
