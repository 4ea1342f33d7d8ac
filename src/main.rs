//! Glyph Rain - full-window digital rain
//!
//! Startup wires atlas -> material -> quad -> pipeline once; afterwards the
//! only work per display refresh is writing the time uniform and drawing.

mod gpu;
mod render;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use rain_config::Config;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Fullscreen, Window, WindowId},
};

use gpu::GpuState;
use render::{RainScene, render_frame};

/// Redraw pacing; Fifo presentation already waits on vsync, this keeps the
/// Poll loop from queueing frames faster than that
const TARGET_FRAME_TIME: Duration = Duration::from_micros(16_666);

/// Bootstrap milestones from the workspace crates show up by default
const DEFAULT_LOG_FILTER: &str = "warn,glyph_rain=info,rain_renderer=info,rain_config=info";

struct RainWindow {
    window: Arc<Window>,
    gpu: GpuState,
    scene: RainScene,
}

struct App {
    config: Config,
    state: Option<RainWindow>,
    last_frame_time: Instant,
    /// First fatal bootstrap error, reported after the loop exits
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
            last_frame_time: Instant::now(),
            error: None,
        }
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<RainWindow> {
        let window_config = &self.config.window;
        let mut attrs = Window::default_attributes()
            .with_title(&window_config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                window_config.width,
                window_config.height,
            ));
        if window_config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(event_loop.create_window(attrs).context("Failed to create window")?);

        // Sized once; the quad is not re-laid-out on resize
        let size = window.inner_size();
        log::info!("Canvas size {}x{}", size.width, size.height);

        let gpu = GpuState::new(window.clone(), size.width, size.height)?;
        let scene = RainScene::new(&gpu, &self.config)?;

        Ok(RainWindow { window, gpu, scene })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match self.create_window(event_loop) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("Startup failed: {:#}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(state) = self.state.as_mut() else { return };
        if state.window.id() != id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window closed");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                state.gpu.resize(size.width, size.height);
                log::debug!(
                    "Surface resized to {}x{}, quad stays laid out for {}x{} at scale {}",
                    size.width,
                    size.height,
                    state.scene.canvas_size.0,
                    state.scene.canvas_size.1,
                    state.scene.placement.scale
                );
            }

            WindowEvent::RedrawRequested => {
                render_frame(&state.gpu, &mut state.scene);
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let Some(state) = self.state.as_ref() else { return };

        if self.last_frame_time.elapsed() >= TARGET_FRAME_TIME {
            self.last_frame_time = Instant::now();
            state.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();
    log::info!("Glyph Rain starting");

    let config = Config::load();

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app).context("Event loop failed")?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_shows_bootstrap_milestones() {
        let directives: Vec<&str> = DEFAULT_LOG_FILTER.split(',').collect();
        for target in ["glyph_rain", "rain_renderer", "rain_config"] {
            assert!(directives.contains(&format!("{}=info", target).as_str()));
        }
        assert_eq!(directives[0], "warn");
    }
}
