//! Top-level registry of panels, driven once per frame by the host

use std::rc::Rc;

use super::{Canvas, FrameInput, PanelHandle};

/// Ordered set of panels. Later panels draw on top of earlier ones.
#[derive(Default)]
pub struct Gui {
    panels: Vec<PanelHandle>,
}

impl Gui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a panel; returns false if it was already registered
    pub fn add_panel(&mut self, panel: &PanelHandle) -> bool {
        if self.contains(panel) {
            return false;
        }
        if let Ok(p) = panel.try_borrow() {
            tracing::debug!(panel = %p.label(), "panel added");
        }
        self.panels.push(Rc::clone(panel));
        true
    }

    pub fn remove_panel(&mut self, panel: &PanelHandle) -> bool {
        let before = self.panels.len();
        self.panels.retain(|p| !Rc::ptr_eq(p, panel));
        before != self.panels.len()
    }

    pub fn contains(&self, panel: &PanelHandle) -> bool {
        self.panels.iter().any(|p| Rc::ptr_eq(p, panel))
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Run one input pass over every panel in registration order
    pub fn update(&mut self, input: &FrameInput) {
        // A panel whose child grabbed the pointer is the only one updated
        let holder = self
            .panels
            .iter()
            .find(|p| p.try_borrow().is_ok_and(|p| p.holds_pointer()));
        if let Some(panel) = holder {
            if let Ok(mut p) = panel.try_borrow_mut() {
                p.update(input);
            }
            return;
        }

        for panel in &self.panels {
            match panel.try_borrow_mut() {
                Ok(mut p) => p.update(input),
                Err(_) => tracing::warn!("panel is borrowed elsewhere, skipping update"),
            }
        }
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        for panel in &self.panels {
            match panel.try_borrow_mut() {
                Ok(mut p) => p.draw(canvas),
                Err(_) => tracing::warn!("panel is borrowed elsewhere, skipping draw"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::canvas::recording::RecordingCanvas;
    use crate::ui::{shared, Bound, CheckBox, Panel, Theme};

    #[test]
    fn test_add_panel_is_idempotent() {
        let mut gui = Gui::new();
        let panel = Panel::new("One", (0, 0), (5, 5), Theme::default()).into_handle();
        assert!(gui.add_panel(&panel));
        assert!(!gui.add_panel(&panel));
        assert_eq!(gui.len(), 1);

        let other = Panel::new("One", (0, 0), (5, 5), Theme::default()).into_handle();
        assert!(gui.add_panel(&other));
        assert_eq!(gui.len(), 2);

        assert!(gui.remove_panel(&panel));
        assert!(!gui.remove_panel(&panel));
        assert_eq!(gui.len(), 1);
    }

    #[test]
    fn test_update_and_draw_reach_children() {
        let flag = shared(false);
        let panel = Panel::new("Debug", (0, 0), (10, 10), Theme::default()).into_handle();
        let id = panel.borrow_mut().add_element(CheckBox::new("Wireframe", Bound::new(&flag)));
        let mut gui = Gui::new();
        gui.add_panel(&panel);

        let r = panel.borrow().element(id).unwrap().rect();
        gui.update(&FrameInput::at(r.center_x(), r.center_y()).with_left_pressed());
        assert!(*flag.borrow());

        let mut canvas = RecordingCanvas::default();
        gui.draw(&mut canvas);
        assert!(canvas.drew_text("Debug"));
        assert!(canvas.drew_text("Wireframe"));
    }

    #[test]
    fn test_borrowed_panel_is_skipped() {
        let panel = Panel::new("Busy", (0, 0), (5, 5), Theme::default()).into_handle();
        let mut gui = Gui::new();
        gui.add_panel(&panel);
        let _held = panel.borrow_mut();
        let mut canvas = RecordingCanvas::default();
        gui.draw(&mut canvas);
        assert!(canvas.commands.is_empty());
    }
}
