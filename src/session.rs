use std::rc::Rc;

use glam::Vec3;
use log::{debug, info, warn};

use crate::animation::Animator;
use crate::camera::{OrbitControls, PerspectiveCamera};
use crate::config::Config;
use crate::core::clock::{AnimationClock, FrameInfo, SystemClock, TimeSource};
use crate::core::input_adapter::InputAction;
use crate::core::timer::FpsCounter;
use crate::error::StartupError;
use crate::lights::LightRig;
use crate::loaders::EnvironmentMap;
use crate::panel::ParameterPanel;
use crate::registry::Catalog;
use crate::scene::Scene;
use crate::scenes::create_showcase_scene;
use crate::traits::{DisplayHost, FrameScheduler, RenderTarget, SceneRenderer};
use crate::viewport::{FullscreenChange, ViewportController};

/// Everything one running showcase owns, from start until the host drops it
///
/// The host drives it: [`tick`](Self::tick) once per display frame, and the
/// `on_*` handlers as window events arrive. All of them run on one thread.
#[derive(Debug)]
pub struct Session<C: TimeSource = SystemClock> {
    clock: AnimationClock<C>,
    viewport: ViewportController,
    scene: Scene,
    animator: Animator,
    controls: OrbitControls,
    panel: ParameterPanel,
    fps: FpsCounter,
    failed_renders: u64,
}

impl<C: TimeSource> Session<C> {
    /// Build the scene and size it to the host display
    ///
    /// Invalid shadow volumes and a zero-sized display abort here, before
    /// the first frame is scheduled.
    pub fn start(
        config: &Config,
        env_map: Option<Rc<EnvironmentMap>>,
        time: C,
        host: &dyn DisplayHost,
        target: &mut dyn RenderTarget,
    ) -> Result<Self, StartupError> {
        let lights = LightRig::new(config.shadow_map_size)?;
        let catalog = Catalog::new(env_map);

        let mut camera = PerspectiveCamera::default();
        let viewport = ViewportController::new(host, &mut camera, target)?;
        let showcase = create_showcase_scene(&catalog, lights, camera)?;

        let controls = OrbitControls::new(Vec3::ZERO).with_damping_factor(config.damping_factor);
        let panel = ParameterPanel::new(showcase.material).with_visible(config.show_panel);

        info!("Session started");
        Ok(Self {
            clock: AnimationClock::new(time),
            viewport,
            scene: showcase.scene,
            animator: showcase.animator,
            controls,
            panel,
            fps: FpsCounter::new(),
            failed_renders: 0,
        })
    }

    /// One frame: animate, step the controls, render once, schedule the next frame
    pub fn tick(
        &mut self,
        renderer: &mut dyn SceneRenderer,
        scheduler: &mut dyn FrameScheduler,
    ) -> FrameInfo {
        let frame = self.clock.tick();

        if let Err(e) = self.animator.apply(&mut self.scene, frame.time) {
            warn!("Animation skipped: {}", e);
        }
        self.controls.update(self.scene.camera_mut());
        self.scene.sync_anchors();

        if let Err(e) = renderer.render(&self.scene, frame.time, &mut self.panel) {
            self.failed_renders += 1;
            warn!("Frame {} not rendered: {}", frame.number, e);
        }
        // Helper switches flipped during this frame show from the next one
        self.panel.apply_to(self.scene.lights_mut());

        if let Some(fps) = self.fps.record(frame.delta) {
            debug!("FPS: {:.1}", fps);
            self.panel.set_fps(fps);
        }

        scheduler.request_frame();
        frame
    }

    pub fn on_resize(&mut self, width: u32, height: u32, target: &mut dyn RenderTarget) -> bool {
        self.viewport.on_resize(width, height, self.scene.camera_mut(), target)
    }

    pub fn on_double_click(&mut self, host: &mut dyn DisplayHost) -> FullscreenChange {
        self.viewport.toggle_fullscreen(host)
    }

    pub fn on_input(&mut self, action: InputAction, host: &mut dyn DisplayHost) {
        let (_, height) = self.viewport.size();
        match action {
            InputAction::Rotate { dx, dy } => self.controls.rotate(dx, dy, height),
            InputAction::Pan { dx, dy } => self.controls.pan(dx, dy, self.scene.camera(), height),
            InputAction::Dolly(delta) => self.controls.dolly(delta),
            InputAction::DoubleClick => {
                self.on_double_click(host);
            }
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn panel(&self) -> &ParameterPanel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut ParameterPanel {
        &mut self.panel
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    /// Time of the latest frame
    pub fn time(&self) -> f32 {
        self.clock.time()
    }

    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    pub fn failed_renders(&self) -> u64 {
        self.failed_renders
    }
}
