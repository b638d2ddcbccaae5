//! Embedded 3D viewports rendered offscreen and blitted into a panel
//!
//! The offscreen target can only be sized once the owning panel has laid
//! the widget out, so a view starts `Uninitialized` and records its final
//! size on the first update tick. The target itself is allocated through
//! the canvas on the first draw after that.

use macroquad::prelude::*;

use super::{Canvas, ElementBase, FrameInput, Theme};

/// How a camera view is sized by its panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportFit {
    /// Square, as wide as the column
    Square,
    /// Everything below the insertion point
    Fill,
    /// Like `Fill`, outlined in the accent color
    FillBorder,
}

/// Offscreen target lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportState {
    Uninitialized,
    Ready { width: u32, height: u32 },
}

/// Interactive free-look 3D view
pub struct CameraView {
    pub base: ElementBase,
    pub fit: ViewportFit,
    pub camera: Camera3D,
    scene: Box<dyn FnMut(&Camera3D)>,
    state: ViewportState,
    target: Option<RenderTarget>,
    captured: bool,
    /// Capture state last pushed to the canvas
    cursor_applied: bool,
    yaw: f32,
    pitch: f32,
    pub look_sensitivity: f32,
    pub move_speed: f32,
}

impl CameraView {
    pub fn new(camera: Camera3D, scene: impl FnMut(&Camera3D) + 'static) -> Self {
        Self::with_fit(ViewportFit::Square, camera, scene)
    }

    pub fn fill(camera: Camera3D, scene: impl FnMut(&Camera3D) + 'static) -> Self {
        Self::with_fit(ViewportFit::Fill, camera, scene)
    }

    pub fn fill_border(camera: Camera3D, scene: impl FnMut(&Camera3D) + 'static) -> Self {
        Self::with_fit(ViewportFit::FillBorder, camera, scene)
    }

    pub fn with_fit(fit: ViewportFit, camera: Camera3D, scene: impl FnMut(&Camera3D) + 'static) -> Self {
        let (yaw, pitch) = look_angles(&camera);
        Self {
            base: ElementBase::new(""),
            fit,
            camera,
            scene: Box::new(scene),
            state: ViewportState::Uninitialized,
            target: None,
            captured: false,
            cursor_applied: false,
            yaw,
            pitch,
            look_sensitivity: 0.005,
            move_speed: 0.15,
        }
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn update(&mut self, input: &FrameInput) {
        if self.state == ViewportState::Uninitialized {
            self.state = ViewportState::Ready {
                width: self.base.rect.w.max(1.0) as u32,
                height: self.base.rect.h.max(1.0) as u32,
            };
        }

        if !self.captured {
            if input.mouse.clicked(&self.base.rect) {
                self.captured = true;
                (self.yaw, self.pitch) = look_angles(&self.camera);
            }
            return;
        }

        if input.escape() {
            self.captured = false;
            return;
        }

        // Inverted Y to match screen-down coordinates
        self.yaw += input.mouse.dx * self.look_sensitivity;
        self.pitch = (self.pitch - input.mouse.dy * self.look_sensitivity).clamp(-1.5, 1.5);

        let forward = vec3(
            self.pitch.cos() * self.yaw.cos(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.sin(),
        );
        let right = forward.cross(self.camera.up).normalize_or_zero();
        let up = self.camera.up.normalize_or_zero();

        let mut motion = Vec3::ZERO;
        if input.key_down(KeyCode::W) { motion += forward; }
        if input.key_down(KeyCode::S) { motion -= forward; }
        if input.key_down(KeyCode::D) { motion += right; }
        if input.key_down(KeyCode::A) { motion -= right; }
        if input.key_down(KeyCode::E) { motion += up; }
        if input.key_down(KeyCode::Q) { motion -= up; }
        self.camera.position += motion * self.move_speed;

        let distance = (self.camera.target - self.camera.position).length().max(1.0);
        self.camera.target = self.camera.position + forward * distance;
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas, theme: &Theme) {
        if self.captured != self.cursor_applied {
            canvas.set_cursor_captured(self.captured);
            self.cursor_applied = self.captured;
        }

        let ViewportState::Ready { width, height } = self.state else {
            return;
        };
        let target = match &self.target {
            Some(target) => target.clone(),
            None => {
                let target = canvas.create_render_target(width, height);
                tracing::debug!(width, height, "allocated viewport target");
                self.target = Some(target.clone());
                target
            }
        };

        canvas.begin_scene(&target, &self.camera);
        (self.scene)(&self.camera);
        canvas.end_scene();

        // Render targets are stored bottom-up
        canvas.draw_texture(&target.texture, self.base.rect, true);

        if self.fit == ViewportFit::FillBorder || self.captured {
            canvas.stroke_rect(self.base.rect, 1.0, theme.accent.to_color());
        }
    }
}

/// Yaw and pitch of the camera's current viewing direction
fn look_angles(camera: &Camera3D) -> (f32, f32) {
    let dir = (camera.target - camera.position).normalize_or_zero();
    if dir == Vec3::ZERO {
        return (0.0, 0.0);
    }
    (dir.z.atan2(dir.x), dir.y.clamp(-1.0, 1.0).asin())
}
