//! Four-channel color editor bound to a caller-owned [`Rgba`]
//!
//! Layout is five rows: the label with a swatch, then R, G, B and A. Each
//! channel row is a [`NumericField`] limited to 0..=255. Because a field
//! leaves editing when a click lands outside it, clicking one row
//! deactivates the others and clicking elsewhere deactivates all of them.

use macroquad::prelude::*;

use super::widgets::body_color;
use super::{
    draw_label, draw_label_right, Bound, Canvas, ElementBase, FrameInput, Gradient, NumericField, Rect, Rgba,
    Theme,
};

const CHANNEL_NAMES: [&str; 4] = ["R", "G", "B", "A"];

/// Rows a color picker occupies in its panel
pub const COLOR_PICKER_ROWS: usize = 5;

pub struct ColorPicker {
    pub base: ElementBase,
    color: Bound<Rgba>,
    channels: [i32; 4],
    fields: [NumericField<i32>; 4],
    hovered: Option<usize>,
}

impl ColorPicker {
    pub fn new(label: impl Into<String>, color: Bound<Rgba>) -> Self {
        let channels = color.get().unwrap_or_default().channels().map(i32::from);
        Self {
            base: ElementBase::new(label),
            color,
            channels,
            fields: std::array::from_fn(|_| NumericField::new(1, 0, 255, 3)),
            hovered: None,
        }
    }

    /// Channel currently being edited, if any
    pub fn active_channel(&self) -> Option<usize> {
        self.fields.iter().position(NumericField::is_editing)
    }

    pub fn channels(&self) -> [i32; 4] {
        self.channels
    }

    fn row_height(&self) -> f32 {
        self.base.rect.h / COLOR_PICKER_ROWS as f32
    }

    /// Hit rectangle of channel row `index` (0 = R .. 3 = A)
    pub fn channel_rect(&self, index: usize) -> Rect {
        let row_h = self.row_height();
        let rect = self.base.rect;
        // 1px gap so neighbouring rows never share an edge
        Rect::new(rect.x, rect.y + row_h * (index + 1) as f32, rect.w, row_h - 1.0)
    }

    pub fn update(&mut self, input: &FrameInput) {
        let Some(color) = self.color.get() else {
            return;
        };

        // Mirror external changes into rows that aren't being typed into
        let current = color.channels();
        for (i, field) in self.fields.iter().enumerate() {
            if !field.is_editing() {
                self.channels[i] = i32::from(current[i]);
            }
        }

        self.hovered = None;
        for i in 0..4 {
            let row = self.channel_rect(i);
            if input.mouse.inside(&row) {
                self.hovered = Some(i);
            }
            self.fields[i].tick(&mut self.channels[i], row, input);
        }

        let written = Rgba::from_channels(self.channels.map(|c| c.clamp(0, 255) as u8));
        self.color.with(|c| *c = written);
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas, theme: &Theme) {
        let rect = self.base.rect;
        let font = self.base.font.as_ref();
        let color = Rgba::from_channels(self.channels.map(|c| c.clamp(0, 255) as u8));

        // Label row with brightness ramp and solid swatch
        let label_row = rect.slice_top(self.row_height());
        canvas.fill_rounded_rect(label_row, theme.corner_radius, theme.element.to_color());
        draw_label(canvas, &self.base.label, label_row, theme.padding, font, theme.font_size, theme.text.to_color());
        let swatch = label_row.slice_right(label_row.w * 0.45).pad(2.0);
        let (ramp, solid) = (swatch.slice_left(swatch.w * 0.6), swatch.slice_right(swatch.w * 0.4));
        canvas.gradient_rect(ramp, Gradient::Horizontal, BLACK, color.to_color());
        canvas.fill_rect(solid, color.to_color());

        for i in 0..4 {
            let row = self.channel_rect(i).pad(1.0);
            let field = &self.fields[i];
            canvas.fill_rect(row, body_color(theme, self.hovered == Some(i), false));

            // Ramp of this channel from 0 to 255 with the others held
            let bar = Rect::new(row.x + 16.0, row.y + 2.0, (row.w * 0.55 - 16.0).max(0.0), row.h - 4.0);
            let mut low = color.channels();
            let mut high = low;
            low[i] = 0;
            high[i] = 255;
            if i < 3 {
                low[3] = 255;
                high[3] = 255;
            }
            canvas.gradient_rect(bar, Gradient::Horizontal, Rgba::from_channels(low).to_color(), Rgba::from_channels(high).to_color());
            let marker_x = bar.x + bar.w * (self.channels[i].clamp(0, 255) as f32 / 255.0);
            canvas.fill_rect(Rect::new(marker_x - 1.0, bar.y, 2.0, bar.h), theme.text_light.to_color());

            draw_label(canvas, CHANNEL_NAMES[i], row, 3.0, font, theme.font_size, theme.text.to_color());
            let readout = if field.is_editing() {
                field.buffer().to_string()
            } else {
                self.channels[i].to_string()
            };
            draw_label_right(canvas, &readout, row, theme.padding, font, theme.font_size, theme.text_light.to_color());

            if field.is_editing() {
                canvas.stroke_rect(row, 1.0, theme.accent.to_color());
            }
        }
    }
}
