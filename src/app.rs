//! Native shell: window, input and the per-frame loop.

use crate::keyboard::{action_for_logical_key, Action};
use crate::renderer::GpuState;
use crate::wish::{WishBackend, WishDesk, WishService};
use std::sync::Arc;
use tree_core::{FrameClock, FrameInput, Mode, ModeController, Scene};
use winit::{
    dpi::{LogicalSize, PhysicalPosition},
    event::*,
    event_loop::EventLoop,
    window::WindowBuilder,
};

pub const WINDOW_TITLE: &str = "MERRY CHRISTMAS!";

/// Everything the shell drives except the GPU.
pub struct App<B: WishBackend + 'static> {
    scene: Scene,
    controller: ModeController,
    wish_service: Arc<WishService<B>>,
    wish: WishDesk,
}

impl<B: WishBackend + 'static> App<B> {
    pub fn new(scene: Scene, wish_service: Arc<WishService<B>>) -> Self {
        Self {
            scene,
            controller: ModeController::new(),
            wish_service,
            wish: WishDesk::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    pub fn wish(&self) -> &WishDesk {
        &self.wish
    }

    /// Apply a user action; returns false when the app should exit.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::ToggleMode => {
                self.controller.toggle();
            }
            Action::RequestWish => {
                if !self.wish.request(self.controller.mode(), &self.wish_service) {
                    log::debug!("[wish] ignored (mode {:?}, loading {})", self.mode(), self.wish.is_loading());
                }
            }
            Action::Quit => return false,
        }
        true
    }

    /// Advance the scene one frame and pick up any finished wish.
    pub fn update(&mut self, frame: &FrameInput) {
        self.scene.tick(frame);
        self.wish.poll();
    }

    pub fn title(&self) -> String {
        let mode = self.controller.mode();
        let mut title = format!("{WINDOW_TITLE}  |  [Space] {}", mode.toggle_label());
        if self.controller.allows_wish() && !self.wish.is_loading() {
            title.push_str("  |  [W] Make a Wish");
        }
        if let Some(status) = self.wish.status_line() {
            title.push_str("  |  ");
            title.push_str(&status);
        }
        title
    }
}

pub fn run<B: WishBackend + 'static>(mut app: App<B>) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(app.title())
            .with_inner_size(LogicalSize::new(1280.0, 800.0))
            .build(&event_loop)?,
    );

    let background = app.scene().lighting().background;
    let mut state = pollster::block_on(GpuState::new(Arc::clone(&window), background))?;
    let mut clock = FrameClock::new();
    let mut title = app.title();
    let mut dragging = false;
    let mut cursor: Option<PhysicalPosition<f64>> = None;

    log::info!(
        "[app] {} particles across {} groups",
        app.scene().particle_count(),
        app.scene().groups().count()
    );

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => state.resize(size),
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed && !event.repeat => {
                if let Some(action) = action_for_logical_key(&event.logical_key) {
                    if !app.apply(action) {
                        elwt.exit();
                    }
                }
            }
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => dragging = button_state == ElementState::Pressed,
            WindowEvent::CursorMoved { position, .. } => {
                if let (true, Some(last)) = (dragging, cursor) {
                    state
                        .camera
                        .drag((position.x - last.x) as f32, (position.y - last.y) as f32);
                }
                cursor = Some(position);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => (p.y / 40.0) as f32,
                };
                state.camera.zoom(steps);
            }
            _ => {}
        },
        Event::AboutToWait => {
            let frame = clock.tick(app.mode());
            app.update(&frame);
            app.scene().emit(&mut state);

            let next_title = app.title();
            if next_title != title {
                state.window.set_title(&next_title);
                title = next_title;
            }

            match state.render() {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    state.resize(state.window.inner_size())
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("[gpu] out of memory");
                    elwt.exit()
                }
                Err(e) => log::warn!("[gpu] frame skipped: {e}"),
            }
        }
        _ => {}
    })?;
    Ok(())
}
