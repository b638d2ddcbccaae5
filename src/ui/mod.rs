//! Retained-mode panel toolkit
//!
//! - Panels on a snapping grid, draggable by the header, minimizable
//! - Children stacked in equal-width sections, scrolled with the wheel
//! - Widgets bound to application-owned values through [`Bound`]
//!
//! Frame loop: poll an [`InputTracker`], pass the snapshot to
//! [`Gui::update`], then [`Gui::draw`] into a [`Canvas`].

mod rect;
mod input;
mod theme;
mod bound;
pub(crate) mod canvas;
mod widgets;
mod numeric;
mod text_input;
mod image;
mod camera_view;
mod color_picker;
mod dropdown;
mod element;
mod panel;
mod gui;

pub use rect::*;
pub use input::*;
pub use theme::*;
pub use bound::*;
pub use canvas::{draw_label, draw_label_centered, draw_label_right, Canvas, Gradient, MacroquadCanvas};
pub use widgets::{Button, CheckBox, Comment};
pub use numeric::{Numeric, NumericField, Slider, SliderF};
pub use text_input::{InputBox, TextEntry};
pub use image::{AnimatedImage, Billboard, ImageSource, Thumbnail};
pub use camera_view::{CameraView, ViewportFit, ViewportState};
pub use color_picker::{ColorPicker, COLOR_PICKER_ROWS};
pub use dropdown::DropDown;
pub use element::{Element, ElementBase, ElementId, SizeRule};
pub use panel::{snap_value, Panel, PanelHandle};
pub use gui::Gui;
