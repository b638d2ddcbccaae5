//! The closed set of things a panel can hold
//!
//! Panels only need update/draw plus geometry, so every widget kind is a
//! variant of [`Element`] and dispatch is a `match`.

use macroquad::prelude::*;

use super::{
    Billboard, Button, CameraView, Canvas, CheckBox, ColorPicker, Comment, DropDown, FrameInput, InputBox, Panel,
    Rect, Slider, SliderF, Theme, Thumbnail, ViewportFit, COLOR_PICKER_ROWS,
};

/// State every element carries regardless of kind
#[derive(Clone)]
pub struct ElementBase {
    pub rect: Rect,
    pub label: String,
    pub visible: bool,
    /// Font bound by the owning panel; `None` draws with macroquad's default
    pub font: Option<Font>,
}

impl ElementBase {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            rect: Rect::default(),
            label: label.into(),
            visible: true,
            font: None,
        }
    }
}

/// How a panel sizes an element vertically when it is inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeRule {
    /// `n` text rows
    Lines(u32),
    /// Two text rows plus padding
    Thumbnail,
    /// As tall as the column is wide
    Square,
    /// All remaining space below the insertion point
    Fill,
    /// Keep the size the element already has
    Keep,
}

/// Index of an element within its panel, in insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub usize);

pub enum Element {
    Button(Button),
    CheckBox(CheckBox),
    Slider(Slider),
    SliderF(SliderF),
    InputBox(InputBox),
    Comment(Comment),
    Thumbnail(Thumbnail),
    Billboard(Billboard),
    CameraView(CameraView),
    ColorPicker(ColorPicker),
    DropDown(DropDown),
    Panel(Box<Panel>),
}

macro_rules! with_base {
    ($element:expr, $w:ident => $body:expr) => {
        match $element {
            Element::Button($w) => $body,
            Element::CheckBox($w) => $body,
            Element::Slider($w) => $body,
            Element::SliderF($w) => $body,
            Element::InputBox($w) => $body,
            Element::Comment($w) => $body,
            Element::Thumbnail($w) => $body,
            Element::Billboard($w) => $body,
            Element::CameraView($w) => $body,
            Element::ColorPicker($w) => $body,
            Element::DropDown($w) => $body,
            Element::Panel($w) => $body,
        }
    };
}

impl Element {
    pub fn base(&self) -> &ElementBase {
        with_base!(self, w => &w.base)
    }

    pub fn base_mut(&mut self) -> &mut ElementBase {
        with_base!(self, w => &mut w.base)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Element::Button(_) => "Button",
            Element::CheckBox(_) => "CheckBox",
            Element::Slider(_) => "Slider",
            Element::SliderF(_) => "SliderF",
            Element::InputBox(_) => "InputBox",
            Element::Comment(_) => "Comment",
            Element::Thumbnail(t) if t.image.is_animated() => "ThumbnailGif",
            Element::Thumbnail(_) => "Thumbnail",
            Element::Billboard(b) if b.image.is_animated() => "BillboardGif",
            Element::Billboard(_) => "Billboard",
            Element::CameraView(c) => match c.fit {
                ViewportFit::Square => "CameraView3D",
                ViewportFit::Fill => "CameraView3DFill",
                ViewportFit::FillBorder => "CameraView3DFillBorder",
            },
            Element::ColorPicker(_) => "ColorPicker",
            Element::DropDown(_) => "DropDown",
            Element::Panel(_) => "Panel",
        }
    }

    pub fn size_rule(&self) -> SizeRule {
        match self {
            Element::Thumbnail(_) => SizeRule::Thumbnail,
            Element::Billboard(_) => SizeRule::Square,
            Element::CameraView(c) if c.fit == ViewportFit::Square => SizeRule::Square,
            Element::CameraView(_) => SizeRule::Fill,
            Element::ColorPicker(_) => SizeRule::Lines(COLOR_PICKER_ROWS as u32),
            Element::Panel(_) => SizeRule::Keep,
            _ => SizeRule::Lines(1),
        }
    }

    pub fn rect(&self) -> Rect {
        self.base().rect
    }

    pub fn label(&self) -> &str {
        &self.base().label
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        let r = self.rect();
        self.translate(x - r.x, y - r.y);
    }

    pub fn set_size(&mut self, w: f32, h: f32) {
        let base = self.base_mut();
        base.rect.w = w;
        base.rect.h = h;
    }

    pub fn set_font(&mut self, font: Option<Font>) {
        self.base_mut().font = font;
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.rect().contains(x, y)
    }

    pub fn is_visible(&self) -> bool {
        self.base().visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.base_mut().visible = visible;
    }

    /// Move the element and anything it owns
    pub fn translate(&mut self, dx: f32, dy: f32) {
        match self {
            Element::DropDown(d) => d.translate(dx, dy),
            Element::Panel(p) => p.translate(dx, dy),
            _ => {
                let base = self.base_mut();
                base.rect = base.rect.translated(dx, dy);
            }
        }
    }

    /// Called once the owning panel has assigned geometry
    pub(crate) fn on_placed(&mut self, theme: &Theme) {
        if let Element::DropDown(d) = self {
            d.attach(theme);
        }
    }

    /// Whether the element currently owns the pointer/keyboard
    /// (editing, capturing, open or dragging)
    pub fn captures_input(&self) -> bool {
        match self {
            Element::Slider(s) => s.is_editing(),
            Element::SliderF(s) => s.is_editing(),
            Element::InputBox(b) => b.is_editing(),
            Element::ColorPicker(c) => c.active_channel().is_some(),
            Element::DropDown(d) => d.is_open(),
            Element::CameraView(c) => c.is_captured(),
            Element::Panel(p) => p.captures_input(),
            _ => false,
        }
    }

    /// Whether the element has grabbed the pointer, so nothing else may see input
    pub fn holds_pointer(&self) -> bool {
        match self {
            Element::CameraView(c) => c.is_captured(),
            Element::Panel(p) => p.holds_pointer(),
            _ => false,
        }
    }

    /// Whether (x, y) hits a popup drawn above the element's siblings
    pub fn overlay_contains(&self, x: f32, y: f32) -> bool {
        match self {
            Element::DropDown(d) => d.popup_contains(x, y),
            _ => false,
        }
    }

    pub fn update(&mut self, input: &FrameInput) {
        match self {
            Element::Button(w) => w.update(input),
            Element::CheckBox(w) => w.update(input),
            Element::Slider(w) => w.update(input),
            Element::SliderF(w) => w.update(input),
            Element::InputBox(w) => w.update(input),
            Element::Thumbnail(w) => w.update(input),
            Element::CameraView(w) => w.update(input),
            Element::ColorPicker(w) => w.update(input),
            Element::DropDown(w) => w.update(input),
            Element::Panel(w) => w.update(input),
            Element::Comment(_) | Element::Billboard(_) => {}
        }
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas, theme: &Theme) {
        match self {
            Element::Button(w) => w.draw(canvas, theme),
            Element::CheckBox(w) => w.draw(canvas, theme),
            Element::Slider(w) => w.draw(canvas, theme),
            Element::SliderF(w) => w.draw(canvas, theme),
            Element::InputBox(w) => w.draw(canvas, theme),
            Element::Comment(w) => w.draw(canvas, theme),
            Element::Thumbnail(w) => w.draw(canvas, theme),
            Element::Billboard(w) => w.draw(canvas, theme),
            Element::CameraView(w) => w.draw(canvas, theme),
            Element::ColorPicker(w) => w.draw(canvas, theme),
            Element::DropDown(w) => w.draw(canvas, theme),
            // Nested panels draw with their own theme
            Element::Panel(w) => w.draw(canvas),
        }
    }

    /// Second pass, after all siblings have drawn
    pub fn draw_overlay(&mut self, canvas: &mut dyn Canvas) {
        if let Element::DropDown(d) = self {
            d.draw_overlay(canvas);
        }
    }

    pub fn as_dropdown_mut(&mut self) -> Option<&mut DropDown> {
        match self {
            Element::DropDown(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_panel_mut(&mut self) -> Option<&mut Panel> {
        match self {
            Element::Panel(p) => Some(p.as_mut()),
            _ => None,
        }
    }
}

macro_rules! impl_into_element {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Element {
                fn from(value: $ty) -> Self {
                    Element::$ty(value)
                }
            }
        )*
    };
}

impl_into_element!(
    Button, CheckBox, Slider, SliderF, InputBox, Comment, Thumbnail, Billboard, CameraView, ColorPicker, DropDown
);

impl From<Panel> for Element {
    fn from(value: Panel) -> Self {
        Element::Panel(Box::new(value))
    }
}
