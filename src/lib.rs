//! panelkit: draggable inspector panels and stateful widgets for macroquad
//!
//! Panels snap to a grid, stack their children in sections, scroll by
//! hiding rows, and bind widgets to application-owned values:
//! - buttons, checkboxes, comments, text fields
//! - integer and float sliders with typed entry
//! - RGBA color pickers
//! - static and animated image thumbnails/billboards
//! - embedded free-look 3D views
//! - dropdowns hosting nested panels

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod ui;

pub use error::{GuiError, GuiResult};
