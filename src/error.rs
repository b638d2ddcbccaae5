//! Error types for theme and asset loading
//!
//! Widget update/draw never fail. Everything here happens before a widget
//! is constructed, and the host decides what to do about it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuiError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("animated image has no frames")]
    EmptyAnimation,

    #[error("frame {index} has {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    FrameSize {
        index: usize,
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("theme parse error: {0}")]
    Theme(#[from] ron::error::SpannedError),

    #[error("theme serialization error: {0}")]
    ThemeSerialize(#[from] ron::Error),
}

pub type GuiResult<T> = Result<T, GuiError>;
