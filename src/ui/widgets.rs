//! Basic UI widgets: buttons, checkboxes and static comments

use macroquad::prelude::*;

use super::{draw_label, draw_label_centered, Bound, Canvas, ElementBase, FrameInput, Rect, Theme};

/// Fill color for a clickable body given its interaction state
pub(crate) fn body_color(theme: &Theme, hovered: bool, pressed: bool) -> Color {
    if pressed {
        theme.element_click.to_color()
    } else if hovered {
        theme.element_hover.to_color()
    } else {
        theme.element.to_color()
    }
}

/// A push button that runs a callback on click
pub struct Button {
    pub base: ElementBase,
    on_click: Box<dyn FnMut()>,
    /// Accent buttons are drawn in the theme's accent color ("SAVE" style)
    pub accent: bool,
    hovered: bool,
    pressed: bool,
}

impl Button {
    pub fn new(label: impl Into<String>, on_click: impl FnMut() + 'static) -> Self {
        Self {
            base: ElementBase::new(label),
            on_click: Box::new(on_click),
            accent: false,
            hovered: false,
            pressed: false,
        }
    }

    pub fn accent(mut self, accent: bool) -> Self {
        self.accent = accent;
        self
    }

    pub fn update(&mut self, input: &FrameInput) {
        self.hovered = input.mouse.inside(&self.base.rect);
        self.pressed = self.hovered && input.mouse.left_down;
        if self.hovered && input.mouse.left_pressed {
            (self.on_click)();
        }
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas, theme: &Theme) {
        let rect = self.base.rect;
        let (fill, text) = if self.accent && !self.pressed {
            let fill = if self.hovered { theme.text_light } else { theme.accent };
            (fill.to_color(), theme.panel_bg.to_color())
        } else {
            (body_color(theme, self.hovered, self.pressed), theme.text.to_color())
        };
        canvas.fill_rounded_rect(rect, theme.corner_radius, fill);
        draw_label_centered(canvas, &self.base.label, rect, self.base.font.as_ref(), theme.font_size, text);
    }
}

/// A labelled toggle bound to a caller-owned `bool`
pub struct CheckBox {
    pub base: ElementBase,
    value: Bound<bool>,
    hovered: bool,
}

impl CheckBox {
    pub fn new(label: impl Into<String>, value: Bound<bool>) -> Self {
        Self {
            base: ElementBase::new(label),
            value,
            hovered: false,
        }
    }

    pub fn update(&mut self, input: &FrameInput) {
        self.hovered = input.mouse.inside(&self.base.rect);
        if self.hovered && input.mouse.left_pressed {
            self.value.with(|v| *v = !*v);
        }
    }

    fn mark_rect(&self) -> Rect {
        let rect = self.base.rect;
        let size = (rect.h - 6.0).max(4.0);
        Rect::new(rect.right() - size - 3.0, rect.center_y() - size * 0.5, size, size)
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas, theme: &Theme) {
        let rect = self.base.rect;
        canvas.fill_rounded_rect(rect, theme.corner_radius, body_color(theme, self.hovered, false));
        draw_label(canvas, &self.base.label, rect, theme.padding, self.base.font.as_ref(), theme.font_size, theme.text.to_color());

        let mark = self.mark_rect();
        canvas.fill_rect(mark, theme.element_click.to_color());
        if self.value.get().unwrap_or(false) {
            canvas.fill_rect(mark.pad(2.0), theme.accent.to_color());
        }
    }
}

/// Static label row
pub struct Comment {
    pub base: ElementBase,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { base: ElementBase::new(text) }
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas, theme: &Theme) {
        draw_label(
            canvas,
            &self.base.label,
            self.base.rect,
            0.0,
            self.base.font.as_ref(),
            theme.font_size,
            theme.text_dim.to_color(),
        );
    }
}
