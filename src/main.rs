//! panelkit demo: a handful of panels showing every widget kind
//!
//! Optional `theme.ron` in the working directory overrides the default look.
//! Set `RUST_LOG=panelkit=debug` to watch panel and asset events.

use std::path::Path;

use macroquad::prelude::*;
use panelkit::ui::{
    shared, AnimatedImage, Billboard, Bound, Button, CameraView, CheckBox, ColorPicker, Comment, DropDown, Gui,
    InputBox, InputTracker, MacroquadCanvas, Panel, Rgba, Slider, SliderF, Theme, Thumbnail,
};
use panelkit::VERSION;
use tracing_subscriber::EnvFilter;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("panelkit demo v{}", VERSION),
        window_width: 1280,
        window_height: 800,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn load_theme() -> Theme {
    let path = Path::new("theme.ron");
    if !path.exists() {
        return Theme::default();
    }
    match Theme::load(path) {
        Ok(theme) => theme,
        Err(e) => {
            tracing::warn!("failed to load {}: {}, using defaults", path.display(), e);
            Theme::default()
        }
    }
}

/// Checkerboard used when no image assets are around
fn checker_texture(size: u16, a: Rgba, b: Rgba) -> Texture2D {
    let mut bytes = Vec::with_capacity(size as usize * size as usize * 4);
    for y in 0..size {
        for x in 0..size {
            let c = if (x / 8 + y / 8) % 2 == 0 { a } else { b };
            bytes.extend_from_slice(&c.channels());
        }
    }
    let texture = Texture2D::from_rgba8(size, size, &bytes);
    texture.set_filter(FilterMode::Nearest);
    texture
}

/// Two-frame blink used when `assets/demo.gif` is missing
fn fallback_animation() -> Option<AnimatedImage> {
    let frame = |c: Rgba| c.channels().repeat(16 * 16);
    AnimatedImage::from_frames(16, 16, vec![frame(Rgba::rgb(230, 80, 60)), frame(Rgba::rgb(60, 120, 230))], 20).ok()
}

fn demo_scene(show_grid: bool) {
    if show_grid {
        draw_grid(20, 1.0, DARKGRAY, GRAY);
    }
    draw_cube(vec3(0.0, 0.5, 0.0), vec3(1.0, 1.0, 1.0), None, ORANGE);
    draw_cube_wires(vec3(0.0, 0.5, 0.0), vec3(1.0, 1.0, 1.0), BLACK);
    draw_sphere(vec3(2.5, 0.75, 1.0), 0.75, None, SKYBLUE);
}

fn orbit_camera(position: Vec3) -> Camera3D {
    Camera3D {
        position,
        target: vec3(0.0, 0.5, 0.0),
        up: vec3(0.0, 1.0, 0.0),
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let theme = load_theme();

    // Application-owned state the widgets bind to
    let wireframe = shared(false);
    let show_grid = shared(true);
    let count = shared(50);
    let speed = shared(1.5f32);
    let name = shared(String::from("cube_01"));
    let background = shared(Rgba::rgb(30, 30, 36));
    let tint = shared(Rgba::new(255, 160, 40, 255));
    let saves = shared(0u32);

    let saves_clicked = saves.clone();
    let mut settings = Panel::new("Settings", (1, 1), (16, 14), theme.clone()).sections(2);
    settings.add_element(Button::new("SAVE", move || {
        *saves_clicked.borrow_mut() += 1;
        tracing::info!(saves = *saves_clicked.borrow(), "save pressed");
    }).accent(true));
    settings.add_element(CheckBox::new("Wireframe", Bound::new(&wireframe)));
    settings.add_element(Slider::new("Count", Bound::new(&count), 1).range(0, 500));
    settings.add_element(SliderF::new("Speed", Bound::new(&speed), 0.1).range(0.0, 10.0));
    settings.add_element(InputBox::new("Name", Bound::new(&name)));
    settings.add_element(Comment::new("Right-drag header to move"));
    for i in 0..8 {
        settings.add_element(Comment::new(format!("Scroll row {}", i + 1)));
    }
    let mut options = DropDown::new("Options", 3)
        .with(CheckBox::new("Show grid", Bound::new(&show_grid)))
        .with(Comment::new("Dropdown content"));
    options.add_element(Button::new("Reset count", {
        let count = count.clone();
        move || *count.borrow_mut() = 50
    }));
    settings.add_element(options);
    let settings = settings.into_handle();

    let mut colors = Panel::new("Colors", (18, 1), (12, 14), theme.clone());
    colors.add_element(ColorPicker::new("Background", Bound::new(&background)));
    colors.add_element(ColorPicker::new("Tint", Bound::new(&tint)));
    let colors = colors.into_handle();

    let checker = checker_texture(64, Rgba::rgb(200, 200, 200), Rgba::rgb(90, 90, 90));
    let mut images = Panel::new("Images", (31, 1), (14, 24), theme.clone());
    images.add_element(Thumbnail::new("Checker", checker.clone(), "Select", || {
        tracing::info!("checker selected");
    }));
    images.add_element(Billboard::new(checker));
    let animation = match AnimatedImage::load(Path::new("assets/demo.gif"), 6) {
        Ok(anim) => Some(anim),
        Err(e) => {
            tracing::warn!("assets/demo.gif unavailable ({}), using a generated animation", e);
            fallback_animation()
        }
    };
    if let Some(anim) = animation {
        images.add_element(Billboard::new(anim));
    }
    let images = images.into_handle();

    let mut views = Panel::new("Viewports", (1, 16), (16, 22), theme.clone()).sections(2);
    let scene = |grid: &panelkit::ui::Shared<bool>| {
        let grid = grid.clone();
        move |_: &Camera3D| demo_scene(*grid.borrow())
    };
    views.add_element(CameraView::new(orbit_camera(vec3(-5.0, 4.0, -5.0)), scene(&show_grid)));
    views.add_element(CameraView::fill_border(orbit_camera(vec3(5.0, 3.0, 6.0)), scene(&show_grid)));
    let views = views.into_handle();

    let mut gui = Gui::new();
    for panel in [&settings, &colors, &images, &views] {
        gui.add_panel(panel);
    }

    let mut input = InputTracker::new();
    let mut canvas = MacroquadCanvas::new();

    loop {
        let frame = input.poll();
        gui.update(&frame);

        clear_background(background.borrow().to_color());
        gui.draw(&mut canvas);

        if *wireframe.borrow() {
            draw_text("wireframe", screen_width() - 90.0, screen_height() - 10.0, 16.0, tint.borrow().to_color());
        }

        next_frame().await;
    }
}
