//! Drawing surface used by every element's `draw`
//!
//! Widgets describe what to draw through [`Canvas`]; [`MacroquadCanvas`]
//! turns that into macroquad calls. Keeping the surface behind a trait lets
//! panels and widgets run headless in tests.

use macroquad::models::{draw_mesh, Mesh, Vertex};
use macroquad::prelude::*;

use super::Rect;

/// Direction of a two-color gradient fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gradient {
    /// `from` on the left edge, `to` on the right edge
    Horizontal,
    /// `from` on the top edge, `to` on the bottom edge
    Vertical,
}

/// Host drawing surface
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn fill_rounded_rect(&mut self, rect: Rect, _radius: f32, color: Color) {
        self.fill_rect(rect, color);
    }

    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color);

    fn gradient_rect(&mut self, rect: Rect, direction: Gradient, from: Color, to: Color);

    /// Textured quad stretched over `rect`
    fn draw_texture(&mut self, texture: &Texture2D, rect: Rect, flip_y: bool);

    /// Width of `text` in pixels
    fn measure_text(&mut self, text: &str, font: Option<&Font>, size: f32) -> f32;

    /// Draw text with its top-left corner at (x, y)
    fn draw_text(&mut self, text: &str, x: f32, y: f32, font: Option<&Font>, size: f32, color: Color);

    fn create_texture(&mut self, width: u16, height: u16, rgba: &[u8]) -> Texture2D;

    fn update_texture(&mut self, texture: &Texture2D, width: u16, height: u16, rgba: &[u8]);

    fn create_render_target(&mut self, width: u32, height: u32) -> RenderTarget;

    /// Redirect drawing into `target` through a 3D camera
    fn begin_scene(&mut self, target: &RenderTarget, camera: &Camera3D);

    /// Return to screen-space drawing
    fn end_scene(&mut self);

    /// Hide and lock the system cursor, or release it
    fn set_cursor_captured(&mut self, captured: bool);
}

/// Text drawn vertically centered inside a row, left aligned
pub fn draw_label(canvas: &mut dyn Canvas, text: &str, rect: Rect, inset: f32, font: Option<&Font>, size: f32, color: Color) {
    let y = (rect.center_y() - size * 0.5).round();
    canvas.draw_text(text, (rect.x + inset).round(), y, font, size, color);
}

/// Text centered in a rect
pub fn draw_label_centered(canvas: &mut dyn Canvas, text: &str, rect: Rect, font: Option<&Font>, size: f32, color: Color) {
    let width = canvas.measure_text(text, font, size);
    let x = (rect.center_x() - width * 0.5).round();
    let y = (rect.center_y() - size * 0.5).round();
    canvas.draw_text(text, x, y, font, size, color);
}

/// Text right aligned inside a row
pub fn draw_label_right(canvas: &mut dyn Canvas, text: &str, rect: Rect, inset: f32, font: Option<&Font>, size: f32, color: Color) {
    let width = canvas.measure_text(text, font, size);
    let x = (rect.right() - inset - width).round();
    let y = (rect.center_y() - size * 0.5).round();
    canvas.draw_text(text, x, y, font, size, color);
}

// =============================================================================
// Macroquad implementation
// =============================================================================

/// Draws straight to macroquad's current frame
#[derive(Debug, Default)]
pub struct MacroquadCanvas {
    cursor_captured: bool,
}

impl MacroquadCanvas {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Canvas for MacroquadCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, color);
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        let r = radius.min(rect.w * 0.5).min(rect.h * 0.5);
        if r <= 0.5 {
            self.fill_rect(rect, color);
            return;
        }
        let Rect { x, y, w, h } = rect;
        // Main body
        draw_rectangle(x + r, y, w - r * 2.0, h, color);
        draw_rectangle(x, y + r, w, h - r * 2.0, color);
        // Corners (circles)
        draw_circle(x + r, y + r, r, color);
        draw_circle(x + w - r, y + r, r, color);
        draw_circle(x + r, y + h - r, r, color);
        draw_circle(x + w - r, y + h - r, r, color);
    }

    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color) {
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, thickness, color);
    }

    fn gradient_rect(&mut self, rect: Rect, direction: Gradient, from: Color, to: Color) {
        let (tl, tr, br, bl) = match direction {
            Gradient::Horizontal => (from, to, to, from),
            Gradient::Vertical => (from, from, to, to),
        };
        let mesh = Mesh {
            vertices: vec![
                Vertex::new(rect.x, rect.y, 0.0, 0.0, 0.0, tl),
                Vertex::new(rect.right(), rect.y, 0.0, 1.0, 0.0, tr),
                Vertex::new(rect.right(), rect.bottom(), 0.0, 1.0, 1.0, br),
                Vertex::new(rect.x, rect.bottom(), 0.0, 0.0, 1.0, bl),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
            texture: None,
        };
        draw_mesh(&mesh);
    }

    fn draw_texture(&mut self, texture: &Texture2D, rect: Rect, flip_y: bool) {
        draw_texture_ex(
            texture,
            rect.x,
            rect.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(rect.w, rect.h)),
                flip_y,
                ..Default::default()
            },
        );
    }

    fn measure_text(&mut self, text: &str, font: Option<&Font>, size: f32) -> f32 {
        measure_text(text, font, size as u16, 1.0).width
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, font: Option<&Font>, size: f32, color: Color) {
        // macroquad positions text by its baseline
        let dims = measure_text(text, font, size as u16, 1.0);
        draw_text_ex(
            text,
            x,
            y + dims.offset_y,
            TextParams {
                font,
                font_size: size as u16,
                color,
                ..Default::default()
            },
        );
    }

    fn create_texture(&mut self, width: u16, height: u16, rgba: &[u8]) -> Texture2D {
        let texture = Texture2D::from_rgba8(width, height, rgba);
        texture.set_filter(FilterMode::Nearest);
        texture
    }

    fn update_texture(&mut self, texture: &Texture2D, width: u16, height: u16, rgba: &[u8]) {
        texture.update_from_bytes(width as u32, height as u32, rgba);
    }

    fn create_render_target(&mut self, width: u32, height: u32) -> RenderTarget {
        let target = render_target(width.max(1), height.max(1));
        target.texture.set_filter(FilterMode::Linear);
        target
    }

    fn begin_scene(&mut self, target: &RenderTarget, camera: &Camera3D) {
        set_camera(&Camera3D {
            position: camera.position,
            target: camera.target,
            up: camera.up,
            fovy: camera.fovy,
            aspect: camera.aspect,
            projection: camera.projection,
            render_target: Some(target.clone()),
            viewport: camera.viewport,
            z_near: camera.z_near,
            z_far: camera.z_far,
        });
        clear_background(Color::from_rgba(20, 20, 24, 255));
    }

    fn end_scene(&mut self) {
        set_default_camera();
    }

    fn set_cursor_captured(&mut self, captured: bool) {
        if captured != self.cursor_captured {
            set_cursor_grab(captured);
            show_mouse(!captured);
            self.cursor_captured = captured;
        }
    }
}

// =============================================================================
// Test double
// =============================================================================

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    /// One recorded draw call
    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCmd {
        Fill(Rect),
        Stroke(Rect),
        Gradient(Rect),
        Text(String),
        Texture(Rect),
        CursorCaptured(bool),
    }

    /// Canvas that records calls instead of drawing. GPU resources can't
    /// be created without a window, so tests never draw image or camera
    /// widgets through it.
    #[derive(Debug, Default)]
    pub struct RecordingCanvas {
        pub commands: Vec<DrawCmd>,
    }

    impl RecordingCanvas {
        pub fn texts(&self) -> Vec<&str> {
            self.commands
                .iter()
                .filter_map(|c| match c {
                    DrawCmd::Text(t) => Some(t.as_str()),
                    _ => None,
                })
                .collect()
        }

        pub fn drew_text(&self, text: &str) -> bool {
            self.texts().contains(&text)
        }
    }

    impl Canvas for RecordingCanvas {
        fn fill_rect(&mut self, rect: Rect, _color: Color) {
            self.commands.push(DrawCmd::Fill(rect));
        }

        fn stroke_rect(&mut self, rect: Rect, _thickness: f32, _color: Color) {
            self.commands.push(DrawCmd::Stroke(rect));
        }

        fn gradient_rect(&mut self, rect: Rect, _direction: Gradient, _from: Color, _to: Color) {
            self.commands.push(DrawCmd::Gradient(rect));
        }

        fn draw_texture(&mut self, _texture: &Texture2D, rect: Rect, _flip_y: bool) {
            self.commands.push(DrawCmd::Texture(rect));
        }

        fn measure_text(&mut self, text: &str, _font: Option<&Font>, size: f32) -> f32 {
            text.chars().count() as f32 * size * 0.5
        }

        fn draw_text(&mut self, text: &str, _x: f32, _y: f32, _font: Option<&Font>, _size: f32, _color: Color) {
            self.commands.push(DrawCmd::Text(text.to_string()));
        }

        fn create_texture(&mut self, _width: u16, _height: u16, _rgba: &[u8]) -> Texture2D {
            panic!("RecordingCanvas can't allocate textures");
        }

        fn update_texture(&mut self, _texture: &Texture2D, _width: u16, _height: u16, _rgba: &[u8]) {}

        fn create_render_target(&mut self, _width: u32, _height: u32) -> RenderTarget {
            panic!("RecordingCanvas can't allocate render targets");
        }

        fn begin_scene(&mut self, _target: &RenderTarget, _camera: &Camera3D) {}

        fn end_scene(&mut self) {}

        fn set_cursor_captured(&mut self, captured: bool) {
            self.commands.push(DrawCmd::CursorCaptured(captured));
        }
    }
}
