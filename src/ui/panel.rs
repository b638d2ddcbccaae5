//! Draggable, minimizable, scrollable panels
//!
//! A panel lays its children out top to bottom in one or more equal-width
//! sections, assigned round robin in insertion order. Geometry is fixed at
//! insertion; afterwards only translation happens (dragging, scrolling).
//!
//! Scrolling hides the first visible child of every section and lifts the
//! rest of that section by the hidden child's height, so the hidden
//! children of a section are always a prefix of it. Scrolling back reveals
//! the last hidden child and shifts the section down again.

use std::cell::RefCell;
use std::rc::Rc;

use macroquad::prelude::*;

use super::{draw_label, draw_label_right, Canvas, Element, ElementBase, ElementId, FrameInput, Rect, SizeRule, Theme};

/// Shared handle the application keeps to reach a panel registered with `Gui`
pub type PanelHandle = Rc<RefCell<Panel>>;

/// Round `value` to the nearest multiple of `grid_size`
pub fn snap_value(value: f32, grid_size: f32) -> f32 {
    if grid_size <= 0.0 {
        return value;
    }
    (value / grid_size).round() * grid_size
}

struct Slot {
    element: Element,
    section: usize,
}

pub struct Panel {
    pub base: ElementBase,
    theme: Theme,
    sections: usize,
    has_header: bool,
    minimized: bool,
    dragging: bool,
    header_hovered: bool,
    next_section: usize,
    slots: Vec<Slot>,
}

impl Panel {
    /// Panel placed on the layout grid; position and size are in grid cells
    pub fn new(label: impl Into<String>, cell: (i32, i32), cells: (i32, i32), theme: Theme) -> Self {
        let grid = theme.grid_size;
        let rect = Rect::new(
            cell.0 as f32 * grid,
            cell.1 as f32 * grid,
            cells.0 as f32 * grid,
            cells.1 as f32 * grid,
        );
        Self::with_rect(label, rect, theme).header(true)
    }

    /// Headerless panel at an explicit pixel rectangle
    pub fn with_rect(label: impl Into<String>, rect: Rect, theme: Theme) -> Self {
        let mut base = ElementBase::new(label);
        base.rect = rect;
        Self {
            base,
            theme,
            sections: 1,
            has_header: false,
            minimized: false,
            dragging: false,
            header_hovered: false,
            next_section: 0,
            slots: Vec::new(),
        }
    }

    /// Number of columns; only takes effect before children are added
    pub fn sections(mut self, sections: usize) -> Self {
        if self.slots.is_empty() {
            self.sections = sections.max(1);
        } else {
            tracing::warn!(label = %self.base.label, "section count changed after children were added, ignoring");
        }
        self
    }

    pub fn header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Font bound to every child added from now on
    pub fn font(mut self, font: Option<Font>) -> Self {
        self.base.font = font;
        self
    }

    pub fn into_handle(self) -> PanelHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn rect(&self) -> Rect {
        self.base.rect
    }

    pub fn label(&self) -> &str {
        &self.base.label
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn section_count(&self) -> usize {
        self.sections
    }

    pub fn has_header(&self) -> bool {
        self.has_header
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Only panels with a header can be minimized
    pub fn set_minimized(&mut self, minimized: bool) {
        self.minimized = minimized && self.has_header;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.slots.get(id.0).map(|s| &s.element)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.slots.get_mut(id.0).map(|s| &mut s.element)
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.slots.iter().map(|s| &s.element)
    }

    pub fn section_of(&self, id: ElementId) -> Option<usize> {
        self.slots.get(id.0).map(|s| s.section)
    }

    pub fn header_rect(&self) -> Rect {
        let rect = self.base.rect;
        Rect::new(rect.x, rect.y, rect.w, self.theme.header_height)
    }

    /// Insert a child at the bottom of the next section and size it by kind
    pub fn add_element(&mut self, element: impl Into<Element>) -> ElementId {
        let mut element = element.into();
        let theme = &self.theme;
        let rect = self.base.rect;
        let section = self.next_section;
        self.next_section = (self.next_section + 1) % self.sections;

        let column_w = rect.w / self.sections as f32;
        let x = rect.x + theme.padding + section as f32 * column_w;
        let w = (column_w - 4.0 * theme.padding).max(0.0);
        let y = rect.y
            + theme.header_offset(self.has_header)
            + self
                .slots
                .iter()
                .filter(|s| s.section == section)
                .map(|s| s.element.rect().h + theme.padding)
                .sum::<f32>();

        match element.size_rule() {
            SizeRule::Keep => element.set_position(x, y),
            rule => {
                let h = match rule {
                    SizeRule::Lines(n) => n as f32 * theme.line_height,
                    SizeRule::Thumbnail => 2.0 * theme.line_height + theme.padding,
                    SizeRule::Square => w,
                    SizeRule::Fill => (rect.bottom() - y - theme.padding).max(0.0),
                    SizeRule::Keep => element.rect().h,
                };
                element.base_mut().rect = Rect::new(x, y, w, h);
            }
        }
        element.set_font(self.base.font.clone());
        element.on_placed(theme);

        tracing::trace!(panel = %self.base.label, kind = element.kind(), section, x, y, "element placed");
        let id = ElementId(self.slots.len());
        self.slots.push(Slot { element, section });
        id
    }

    /// Remove a child and close the gap it leaves in its section.
    ///
    /// Ids of children added after `id` shift down by one.
    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        if id.0 >= self.slots.len() {
            return None;
        }
        let Slot { element, section } = self.slots.remove(id.0);
        // A hidden child's space was already scrolled away
        if element.is_visible() {
            let shift = element.rect().h + self.theme.padding;
            for slot in self.slots[id.0..].iter_mut().filter(|s| s.section == section) {
                slot.element.translate(0.0, -shift);
            }
        }
        tracing::debug!(panel = %self.base.label, kind = element.kind(), section, "element removed");
        Some(element)
    }

    /// Move the panel and everything in it
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.base.rect = self.base.rect.translated(dx, dy);
        self.translate_children(dx, dy);
    }

    fn translate_children(&mut self, dx: f32, dy: f32) {
        for slot in &mut self.slots {
            slot.element.translate(dx, dy);
        }
    }

    /// Whether the panel or any child is holding the pointer/keyboard
    pub fn captures_input(&self) -> bool {
        self.dragging || self.slots.iter().any(|s| s.element.captures_input())
    }

    /// Whether a child has grabbed the pointer (a captured camera view)
    pub fn holds_pointer(&self) -> bool {
        self.slots.iter().any(|s| s.element.holds_pointer())
    }

    /// Hide the first visible child of every section and lift the rest
    pub fn scroll_down(&mut self) {
        let padding = self.theme.padding;
        for section in 0..self.sections {
            let Some(first) = self
                .slots
                .iter()
                .position(|s| s.section == section && s.element.is_visible())
            else {
                continue;
            };
            let shift = self.slots[first].element.rect().h + padding;
            self.slots[first].element.set_visible(false);
            for (i, slot) in self.slots.iter_mut().enumerate() {
                if slot.section == section && (i == first || slot.element.is_visible()) {
                    slot.element.translate(0.0, -shift);
                }
            }
        }
    }

    /// Reveal the last hidden child of every section and push the rest down
    pub fn scroll_up(&mut self) {
        let padding = self.theme.padding;
        for section in 0..self.sections {
            let Some(last) = self
                .slots
                .iter()
                .rposition(|s| s.section == section && !s.element.is_visible())
            else {
                continue;
            };
            let shift = self.slots[last].element.rect().h + padding;
            self.slots[last].element.set_visible(true);
            for slot in &mut self.slots {
                if slot.section == section && slot.element.is_visible() {
                    slot.element.translate(0.0, shift);
                }
            }
        }
    }

    fn begin_drag(&mut self) {
        self.dragging = true;
        tracing::debug!(panel = %self.base.label, "drag started");
    }

    /// Stop dragging and snap the top-left corner onto the grid
    fn end_drag(&mut self) {
        self.dragging = false;
        let grid = self.theme.grid_size;
        let rect = self.base.rect;
        let (x, y) = (snap_value(rect.x, grid), snap_value(rect.y, grid));
        self.translate_children(x - rect.x, y - rect.y);
        // Assigned directly so the corner lands on an exact multiple
        self.base.rect.x = x;
        self.base.rect.y = y;
        tracing::debug!(panel = %self.base.label, x, y, "drag ended");
    }

    /// Whether a child should receive input and be drawn
    fn in_view(&self, element: &Element) -> bool {
        let rect = self.base.rect;
        let r = element.rect();
        element.is_visible() && r.bottom() < rect.bottom() && r.y > rect.y
    }

    pub fn update(&mut self, input: &FrameInput) {
        if !self.base.visible {
            return;
        }
        let mouse = &input.mouse;

        // A grabbed pointer belongs to its holder alone
        if let Some(i) = self.slots.iter().position(|s| s.element.holds_pointer()) {
            self.slots[i].element.update(input);
            return;
        }

        if self.dragging {
            if mouse.grab_released() || input.escape() {
                self.end_drag();
            } else if mouse.dx != 0.0 || mouse.dy != 0.0 {
                self.translate(mouse.dx, mouse.dy);
            }
            return;
        }

        if self.has_header {
            self.header_hovered = mouse.inside(&self.header_rect());
            if self.header_hovered && mouse.grab_pressed() {
                self.begin_drag();
                return;
            }
            if self.header_hovered && mouse.left_pressed {
                self.minimized = !self.minimized;
                return;
            }
        }

        if self.minimized {
            return;
        }

        if mouse.scroll != 0.0 && mouse.inside(&self.base.rect) && !self.captures_input() {
            let steps = mouse.scroll.abs().round().max(1.0) as usize;
            for _ in 0..steps {
                if mouse.scroll < 0.0 {
                    self.scroll_down();
                } else {
                    self.scroll_up();
                }
            }
        }

        // An open popup gets the pointer exclusively while it is under it
        if let Some(i) = self.slots.iter().position(|s| s.element.overlay_contains(mouse.x, mouse.y)) {
            self.slots[i].element.update(input);
            return;
        }

        for i in 0..self.slots.len() {
            if self.in_view(&self.slots[i].element) {
                self.slots[i].element.update(input);
            }
        }
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        if !self.base.visible {
            return;
        }
        let theme = &self.theme;
        let rect = self.base.rect;
        let font = self.base.font.as_ref();

        if !self.minimized {
            canvas.fill_rounded_rect(rect, theme.corner_radius, theme.panel_bg.to_color());
            canvas.stroke_rect(rect, 1.0, theme.panel_border.to_color());
        }

        if self.has_header {
            let header = self.header_rect();
            let color = if self.header_hovered || self.dragging { theme.header_hover } else { theme.header };
            canvas.fill_rounded_rect(header, theme.corner_radius, color.to_color());
            draw_label(canvas, &self.base.label, header, theme.padding, font, theme.font_size, theme.text_light.to_color());
            let marker = if self.minimized { "+" } else { "-" };
            draw_label_right(canvas, marker, header, theme.padding, font, theme.font_size, theme.text_dim.to_color());
        }

        if self.minimized {
            return;
        }

        for i in 0..self.slots.len() {
            if self.in_view(&self.slots[i].element) {
                self.slots[i].element.draw(canvas, &self.theme);
            }
        }
        for i in 0..self.slots.len() {
            if self.in_view(&self.slots[i].element) {
                self.slots[i].element.draw_overlay(canvas);
            }
        }
    }
}
