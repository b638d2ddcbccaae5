//! Collapsible list of elements hosted in a nested panel
//!
//! A dropdown is built before it has geometry, so its children wait in a
//! pending list. Once the owning panel places the control row it calls
//! [`DropDown::attach`], which creates the nested panel directly below the
//! control and moves the pending children into it. The open list is drawn
//! in the panel's overlay pass so it sits above later siblings.

use super::widgets::body_color;
use super::{draw_label, draw_label_right, Canvas, Element, ElementBase, ElementId, FrameInput, Panel, Rect, Theme};

pub struct DropDown {
    pub base: ElementBase,
    item_count: usize,
    pending: Vec<Element>,
    panel: Option<Box<Panel>>,
    open: bool,
    hovered: bool,
    /// Set once the unattached warning has been logged
    warned: bool,
}

impl DropDown {
    /// `item_count` sizes the list; children are added with [`DropDown::with`]
    pub fn new(label: impl Into<String>, item_count: usize) -> Self {
        Self {
            base: ElementBase::new(label),
            item_count,
            pending: Vec::new(),
            panel: None,
            open: false,
            hovered: false,
            warned: false,
        }
    }

    pub fn with(mut self, element: impl Into<Element>) -> Self {
        self.add_element(element);
        self
    }

    /// Add a child. Returns its id once the list panel exists, `None` while pending.
    pub fn add_element(&mut self, element: impl Into<Element>) -> Option<ElementId> {
        match self.panel.as_mut() {
            Some(panel) => Some(panel.add_element(element)),
            None => {
                self.pending.push(element.into());
                None
            }
        }
    }

    pub fn is_attached(&self) -> bool {
        self.panel.is_some()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open && self.panel.is_some();
    }

    pub fn panel(&self) -> Option<&Panel> {
        self.panel.as_deref()
    }

    pub fn panel_mut(&mut self) -> Option<&mut Panel> {
        self.panel.as_deref_mut()
    }

    /// Create the list panel under the control row and move pending children in
    pub fn attach(&mut self, theme: &Theme) {
        if self.panel.is_some() {
            return;
        }
        let control = self.base.rect;
        let height = theme.padding + self.item_count as f32 * (theme.line_height + theme.padding);
        let rect = Rect::new(control.x, control.bottom(), control.w, height);
        let mut panel = Panel::with_rect(self.base.label.clone(), rect, theme.clone()).font(self.base.font.clone());
        for element in self.pending.drain(..) {
            panel.add_element(element);
        }
        tracing::debug!(label = %self.base.label, items = panel.len(), "dropdown attached");
        self.panel = Some(Box::new(panel));
    }

    pub(crate) fn popup_contains(&self, x: f32, y: f32) -> bool {
        self.open && self.panel.as_ref().is_some_and(|p| p.rect().contains(x, y))
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.base.rect = self.base.rect.translated(dx, dy);
        if let Some(panel) = self.panel.as_mut() {
            panel.translate(dx, dy);
        }
    }

    fn warn_unattached(&mut self) {
        if !self.warned {
            tracing::warn!(label = %self.base.label, "dropdown used before it was placed in a panel");
            self.warned = true;
        }
    }

    pub fn update(&mut self, input: &FrameInput) {
        if self.panel.is_none() {
            self.warn_unattached();
            return;
        }
        let Some(panel) = self.panel.as_mut() else {
            return;
        };

        self.hovered = input.mouse.inside(&self.base.rect);
        if input.mouse.left_pressed {
            if self.hovered {
                self.open = !self.open;
                return;
            }
            if self.open && !input.mouse.inside(&panel.rect()) {
                self.open = false;
            }
        }

        if self.open {
            panel.update(input);
        }
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas, theme: &Theme) {
        if self.panel.is_none() {
            self.warn_unattached();
            return;
        }
        let rect = self.base.rect;
        let font = self.base.font.as_ref();
        canvas.fill_rounded_rect(rect, theme.corner_radius, body_color(theme, self.hovered, self.open));
        draw_label(canvas, &self.base.label, rect, theme.padding, font, theme.font_size, theme.text.to_color());
        let arrow = if self.open { "^" } else { "v" };
        draw_label_right(canvas, arrow, rect, theme.padding, font, theme.font_size, theme.text_dim.to_color());
    }

    pub fn draw_overlay(&mut self, canvas: &mut dyn Canvas) {
        if !self.open {
            return;
        }
        if let Some(panel) = self.panel.as_mut() {
            panel.draw(canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::canvas::recording::RecordingCanvas;
    use crate::ui::{shared, Bound, CheckBox, Comment};

    fn placed(theme: &Theme) -> DropDown {
        let mut d = DropDown::new("Options", 2)
            .with(Comment::new("first"))
            .with(Comment::new("second"));
        d.base.rect = Rect::new(10.0, 40.0, 120.0, theme.line_height);
        d.attach(theme);
        d
    }

    #[test]
    fn test_attach_moves_pending_children() {
        let theme = Theme::default();
        let d = placed(&theme);
        let panel = d.panel().unwrap();
        assert_eq!(panel.len(), 2);
        assert_eq!(panel.rect().y, 40.0 + theme.line_height);
        assert_eq!(panel.rect().w, 120.0);
        assert_eq!(panel.rect().h, theme.padding + 2.0 * (theme.line_height + theme.padding));
    }

    #[test]
    fn test_unattached_is_noop() {
        let mut d = DropDown::new("Late", 1);
        d.update(&FrameInput::at(0.0, 0.0).with_left_pressed());
        assert!(!d.is_open());
        let mut canvas = RecordingCanvas::default();
        d.draw(&mut canvas, &Theme::default());
        assert!(canvas.commands.is_empty());
    }

    #[test]
    fn test_toggle_and_forward() {
        let theme = Theme::default();
        let flag = shared(false);
        let mut d = DropDown::new("Flags", 1).with(CheckBox::new("on", Bound::new(&flag)));
        d.base.rect = Rect::new(0.0, 0.0, 200.0, theme.line_height);
        d.attach(&theme);

        d.update(&FrameInput::at(50.0, 5.0).with_left_pressed());
        assert!(d.is_open());

        let item = d.panel().unwrap().element(ElementId(0)).unwrap().rect();
        d.update(&FrameInput::at(item.center_x(), item.center_y()).with_left_pressed());
        assert!(*flag.borrow());
        assert!(d.is_open());

        // Click away closes without forwarding
        d.update(&FrameInput::at(500.0, 500.0).with_left_pressed());
        assert!(!d.is_open());
    }

    #[test]
    fn test_overlay_drawn_only_when_open() {
        let theme = Theme::default();
        let mut d = placed(&theme);
        let mut canvas = RecordingCanvas::default();
        d.draw_overlay(&mut canvas);
        assert!(canvas.commands.is_empty());

        d.set_open(true);
        d.draw_overlay(&mut canvas);
        assert!(canvas.drew_text("first"));
    }

    #[test]
    fn test_translate_moves_list() {
        let theme = Theme::default();
        let mut d = placed(&theme);
        let before = d.panel().unwrap().rect();
        d.translate(5.0, -10.0);
        assert_eq!(d.panel().unwrap().rect(), before.translated(5.0, -10.0));
    }
}
