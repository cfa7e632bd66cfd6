use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window as WinitWindow, WindowId};

use shadow_showcase::cli::Cli;
use shadow_showcase::config::Config;
use shadow_showcase::core::clock::{SystemClock, TimeSource};
use shadow_showcase::core::input_adapter::WinitInput;
use shadow_showcase::error::StartupError;
use shadow_showcase::loaders::EnvironmentMap;
use shadow_showcase::renderer::Renderer;
use shadow_showcase::session::Session;
use shadow_showcase::traits::FrameScheduler;
use shadow_showcase::window::Window;

// === Application ===

struct Running {
    window: Window,
    renderer: Renderer,
    session: Session,
}

struct App {
    config: Config,
    env_map: Rc<EnvironmentMap>,
    input: WinitInput,
    input_clock: SystemClock,
    running: Option<Running>,
    startup_error: Option<StartupError>,
}

impl App {
    fn new(config: Config, env_map: Rc<EnvironmentMap>) -> Self {
        Self {
            config,
            env_map,
            input: WinitInput::new(),
            input_clock: SystemClock::new(),
            running: None,
            startup_error: None,
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> Result<Running, StartupError> {
        let attributes = WinitWindow::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(self.config.width, self.config.height));
        let inner = Arc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| StartupError::Window(e.to_string()))?,
        );

        let mut renderer = pollster::block_on(Renderer::new(
            inner.clone(),
            Some(self.env_map.as_ref()),
            self.config.shadow_map_size,
        ))?;

        let window = Window::new(inner);
        let session = Session::start(
            &self.config,
            Some(self.env_map.clone()),
            SystemClock::new(),
            &window,
            &mut renderer,
        )?;

        Ok(Running {
            window,
            renderer,
            session,
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(mut running) => {
                running.window.request_frame();
                self.running = Some(running);
            }
            Err(e) => {
                error!("Startup failed: {}", e);
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(running) = &mut self.running else {
            return;
        };

        // Let egui handle the event first
        if running.renderer.handle_event(&event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                running
                    .session
                    .on_resize(size.width, size.height, &mut running.renderer);
            }
            WindowEvent::RedrawRequested => {
                running
                    .session
                    .tick(&mut running.renderer, &mut running.window);
            }
            other => {
                let now = self.input_clock.elapsed();
                if let Some(action) = self.input.process_event(&other, now) {
                    running.session.on_input(action, &mut running.window);
                }
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::resolve(&cli).context("invalid configuration")?;
    let env_map = EnvironmentMap::load(&config.env_map_dir).with_context(|| {
        format!(
            "failed to load environment map from {}",
            config.env_map_dir.display()
        )
    })?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, Rc::new(env_map));

    info!("Drag to orbit, right-drag to pan, wheel to zoom, double-click for fullscreen");
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.startup_error.take() {
        return Err(e).context("session failed to start");
    }
    Ok(())
}
