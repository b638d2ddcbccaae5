//! Image-backed widgets: thumbnails and billboards, static or animated
//!
//! Animated sources hold decoded RGBA frames on the CPU and re-upload the
//! current frame into a single texture. The texture is created lazily on
//! first draw, so widgets can be built before a GPU context exists.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::AnimationDecoder;
use macroquad::prelude::*;

use super::{draw_label, draw_label_centered, Canvas, ElementBase, FrameInput, Rect, Theme};
use crate::error::{GuiError, GuiResult};

/// Decoded animation frames plus playback state
pub struct AnimatedImage {
    width: u16,
    height: u16,
    frames: Vec<Vec<u8>>,
    /// Draw calls each frame stays on screen
    frame_delay: u32,
    counter: u32,
    current: usize,
    uploaded: Option<usize>,
    texture: Option<Texture2D>,
}

impl AnimatedImage {
    /// Build from raw RGBA buffers, one per frame
    pub fn from_frames(width: u16, height: u16, frames: Vec<Vec<u8>>, frame_delay: u32) -> GuiResult<Self> {
        if frames.is_empty() {
            return Err(GuiError::EmptyAnimation);
        }
        let expected = width as usize * height as usize * 4;
        if let Some((index, frame)) = frames.iter().enumerate().find(|(_, f)| f.len() != expected) {
            return Err(GuiError::FrameSize {
                index,
                width: width as u32,
                height: height as u32,
                expected,
                actual: frame.len(),
            });
        }
        Ok(Self {
            width,
            height,
            frames,
            frame_delay: frame_delay.max(1),
            counter: 0,
            current: 0,
            uploaded: None,
            texture: None,
        })
    }

    /// Decode every frame of a GIF file
    pub fn load(path: &Path, frame_delay: u32) -> GuiResult<Self> {
        let decoder = GifDecoder::new(BufReader::new(File::open(path)?))?;
        let frames = decoder.into_frames().collect_frames()?;
        let Some(first) = frames.first() else {
            return Err(GuiError::EmptyAnimation);
        };
        let (width, height) = first.buffer().dimensions();
        let buffers = frames.into_iter().map(|f| f.into_buffer().into_raw()).collect();
        let image = Self::from_frames(width as u16, height as u16, buffers, frame_delay)?;
        tracing::debug!(path = %path.display(), frames = image.frame_count(), "decoded animation");
        Ok(image)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn current_frame(&self) -> usize {
        self.current
    }

    /// RGBA bytes of frame `index`
    pub fn frame(&self, index: usize) -> Option<&[u8]> {
        self.frames.get(index).map(Vec::as_slice)
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Count one draw and move to the next frame once the delay elapses
    pub fn advance(&mut self) {
        self.counter += 1;
        if self.counter >= self.frame_delay {
            self.counter = 0;
            self.current = (self.current + 1) % self.frames.len();
        }
    }

    /// Texture showing the current frame, uploading if it changed
    fn texture(&mut self, canvas: &mut dyn Canvas) -> &Texture2D {
        let frame = &self.frames[self.current];
        let texture = match self.texture.take() {
            Some(texture) => {
                if self.uploaded != Some(self.current) {
                    canvas.update_texture(&texture, self.width, self.height, frame);
                }
                texture
            }
            None => canvas.create_texture(self.width, self.height, frame),
        };
        self.uploaded = Some(self.current);
        self.texture.insert(texture)
    }
}

/// Pixels shown by a thumbnail or billboard
pub enum ImageSource {
    Static(Texture2D),
    Animated(AnimatedImage),
}

impl ImageSource {
    pub fn is_animated(&self) -> bool {
        matches!(self, ImageSource::Animated(_))
    }

    /// Draw into `rect` and advance animated sources by one draw
    fn draw(&mut self, canvas: &mut dyn Canvas, rect: Rect) {
        match self {
            ImageSource::Static(texture) => canvas.draw_texture(texture, rect, false),
            ImageSource::Animated(anim) => {
                let texture = anim.texture(canvas).clone();
                canvas.draw_texture(&texture, rect, false);
                anim.advance();
            }
        }
    }
}

impl From<Texture2D> for ImageSource {
    fn from(texture: Texture2D) -> Self {
        ImageSource::Static(texture)
    }
}

impl From<AnimatedImage> for ImageSource {
    fn from(image: AnimatedImage) -> Self {
        ImageSource::Animated(image)
    }
}

/// Image, caption and an action button on one double-height row
pub struct Thumbnail {
    pub base: ElementBase,
    pub image: ImageSource,
    action_label: String,
    on_action: Box<dyn FnMut()>,
    action_hovered: bool,
    action_pressed: bool,
}

impl Thumbnail {
    pub fn new(
        label: impl Into<String>,
        image: impl Into<ImageSource>,
        action_label: impl Into<String>,
        on_action: impl FnMut() + 'static,
    ) -> Self {
        Self {
            base: ElementBase::new(label),
            image: image.into(),
            action_label: action_label.into(),
            on_action: Box::new(on_action),
            action_hovered: false,
            action_pressed: false,
        }
    }

    fn image_rect(&self) -> Rect {
        let rect = self.base.rect;
        rect.slice_left(rect.h).pad(2.0)
    }

    fn action_rect(&self) -> Rect {
        let rect = self.base.rect;
        let w = (rect.w * 0.35).min(90.0);
        rect.slice_right(w).pad(4.0)
    }

    pub fn update(&mut self, input: &FrameInput) {
        let action = self.action_rect();
        self.action_hovered = input.mouse.inside(&action);
        self.action_pressed = self.action_hovered && input.mouse.left_down;
        if input.mouse.clicked(&action) {
            (self.on_action)();
        }
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas, theme: &Theme) {
        let rect = self.base.rect;
        let font = self.base.font.as_ref();
        canvas.fill_rounded_rect(rect, theme.corner_radius, theme.element.to_color());

        let image_rect = self.image_rect();
        self.image.draw(canvas, image_rect);

        let caption = Rect::new(image_rect.right(), rect.y, rect.w - image_rect.w, rect.h);
        draw_label(canvas, &self.base.label, caption, theme.padding * 2.0, font, theme.font_size, theme.text.to_color());

        let action = self.action_rect();
        let fill = if self.action_pressed {
            theme.element_click
        } else if self.action_hovered {
            theme.accent
        } else {
            theme.element_hover
        };
        canvas.fill_rounded_rect(action, theme.corner_radius, fill.to_color());
        draw_label_centered(canvas, &self.action_label, action, font, theme.font_size, theme.text.to_color());
    }
}

/// Full-bleed square image
pub struct Billboard {
    pub base: ElementBase,
    pub image: ImageSource,
}

impl Billboard {
    pub fn new(image: impl Into<ImageSource>) -> Self {
        Self {
            base: ElementBase::new(""),
            image: image.into(),
        }
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas, _theme: &Theme) {
        self.image.draw(canvas, self.base.rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn two_frames() -> AnimatedImage {
        AnimatedImage::from_frames(2, 1, vec![vec![0; 8], vec![255; 8]], 3).unwrap()
    }

    #[test]
    fn test_rejects_bad_frames() {
        assert!(matches!(
            AnimatedImage::from_frames(2, 2, vec![], 1),
            Err(GuiError::EmptyAnimation)
        ));
        let err = AnimatedImage::from_frames(2, 2, vec![vec![0; 16], vec![0; 15]], 1);
        assert!(matches!(err, Err(GuiError::FrameSize { index: 1, expected: 16, actual: 15, .. })));
    }

    #[test]
    fn test_advance_honours_delay() {
        let mut anim = two_frames();
        anim.advance();
        anim.advance();
        assert_eq!(anim.current_frame(), 0);
        anim.advance();
        assert_eq!(anim.current_frame(), 1);
        for _ in 0..3 {
            anim.advance();
        }
        assert_eq!(anim.current_frame(), 0);
        assert_eq!(anim.frame(1), Some(&[255u8; 8][..]));
    }

    #[test]
    fn test_load_missing_gif() {
        let result = AnimatedImage::load(Path::new("/nonexistent/a.gif"), 6);
        assert!(matches!(result, Err(GuiError::Io(_))));
    }

    #[test]
    fn test_load_garbage_gif() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"definitely not a gif").unwrap();
        let result = AnimatedImage::load(file.path(), 6);
        assert!(matches!(result, Err(GuiError::Image(_))));
    }

    #[test]
    fn test_thumbnail_action_button() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let mut thumb = Thumbnail::new("Red", two_frames(), "Select", move || counter.set(counter.get() + 1));
        thumb.base.rect = Rect::new(0.0, 0.0, 200.0, 41.0);

        // Caption area does nothing
        thumb.update(&FrameInput::at(60.0, 20.0).with_left_pressed());
        assert_eq!(hits.get(), 0);

        let action = thumb.action_rect();
        thumb.update(&FrameInput::at(action.center_x(), action.center_y()).with_left_pressed());
        assert_eq!(hits.get(), 1);
    }
}
