use log::{debug, info};

use crate::camera::PerspectiveCamera;
use crate::error::StartupError;
use crate::traits::{DisplayHost, RenderTarget};

/// Outcome of a fullscreen toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenChange {
    Entered,
    Exited,
    /// The host declined; nothing changed
    Refused,
}

/// Keeps the camera projection and the render target in step with the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportController {
    width: u32,
    height: u32,
}

impl ViewportController {
    /// Read the display size and apply it to `camera` and `target`
    pub fn new(
        host: &dyn DisplayHost,
        camera: &mut PerspectiveCamera,
        target: &mut dyn RenderTarget,
    ) -> Result<Self, StartupError> {
        let (width, height) = host.inner_size();
        if width == 0 || height == 0 {
            return Err(StartupError::ZeroViewport { width, height });
        }
        let mut viewport = Self { width, height };
        viewport.apply(camera, target);
        info!("Viewport {}x{}", width, height);
        Ok(viewport)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Re-apply a reported size; zero-area sizes keep the last valid state
    pub fn on_resize(
        &mut self,
        width: u32,
        height: u32,
        camera: &mut PerspectiveCamera,
        target: &mut dyn RenderTarget,
    ) -> bool {
        if width == 0 || height == 0 {
            debug!("Ignoring zero-area resize {}x{}", width, height);
            return false;
        }
        self.width = width;
        self.height = height;
        self.apply(camera, target);
        debug!("Viewport resized to {}x{}", width, height);
        true
    }

    /// Re-read the host's size after a resize notification
    pub fn sync(
        &mut self,
        host: &dyn DisplayHost,
        camera: &mut PerspectiveCamera,
        target: &mut dyn RenderTarget,
    ) -> bool {
        let (width, height) = host.inner_size();
        self.on_resize(width, height, camera, target)
    }

    /// Double-activation handler: enter fullscreen, or leave it when already there
    pub fn toggle_fullscreen(&self, host: &mut dyn DisplayHost) -> FullscreenChange {
        let (result, change) = if host.is_fullscreen() {
            (host.exit_fullscreen(), FullscreenChange::Exited)
        } else {
            (host.request_fullscreen(), FullscreenChange::Entered)
        };
        match result {
            Ok(()) => change,
            Err(e) => {
                debug!("Fullscreen toggle ignored: {}", e);
                FullscreenChange::Refused
            }
        }
    }

    fn apply(&mut self, camera: &mut PerspectiveCamera, target: &mut dyn RenderTarget) {
        camera.set_viewport(self.width, self.height);
        target.set_size(self.width, self.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FullscreenError;

    struct Host {
        size: (u32, u32),
        fullscreen: bool,
        refuse: bool,
    }

    impl DisplayHost for Host {
        fn inner_size(&self) -> (u32, u32) {
            self.size
        }

        fn is_fullscreen(&self) -> bool {
            self.fullscreen
        }

        fn request_fullscreen(&mut self) -> Result<(), FullscreenError> {
            if self.refuse {
                return Err(FullscreenError::Refused("test".into()));
            }
            self.fullscreen = true;
            Ok(())
        }

        fn exit_fullscreen(&mut self) -> Result<(), FullscreenError> {
            self.fullscreen = false;
            Ok(())
        }
    }

    #[derive(Default)]
    struct Target(u32, u32);

    impl RenderTarget for Target {
        fn set_size(&mut self, width: u32, height: u32) {
            self.0 = width;
            self.1 = height;
        }

        fn size(&self) -> (u32, u32) {
            (self.0, self.1)
        }
    }

    fn host(width: u32, height: u32) -> Host {
        Host {
            size: (width, height),
            fullscreen: false,
            refuse: false,
        }
    }

    #[test]
    fn test_construction_applies_display_size() {
        let mut camera = PerspectiveCamera::default();
        let mut target = Target::default();
        let viewport = ViewportController::new(&host(800, 600), &mut camera, &mut target).unwrap();
        assert_eq!(viewport.size(), (800, 600));
        assert_eq!(target.size(), (800, 600));
        assert!((camera.aspect() - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_display_rejected_at_start() {
        let mut camera = PerspectiveCamera::default();
        let mut target = Target::default();
        let err = ViewportController::new(&host(0, 600), &mut camera, &mut target).unwrap_err();
        assert!(matches!(err, StartupError::ZeroViewport { width: 0, height: 600 }));
    }

    #[test]
    fn test_resize_reapplies_both() {
        let mut camera = PerspectiveCamera::default();
        let mut target = Target::default();
        let mut display = host(800, 600);
        let mut viewport = ViewportController::new(&display, &mut camera, &mut target).unwrap();

        display.size = (1920, 1080);
        assert!(viewport.sync(&display, &mut camera, &mut target));
        assert_eq!(target.size(), (1920, 1080));
        assert!((camera.aspect() - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn test_minimised_resize_keeps_last_state() {
        let mut camera = PerspectiveCamera::default();
        let mut target = Target::default();
        let mut viewport =
            ViewportController::new(&host(800, 600), &mut camera, &mut target).unwrap();
        assert!(!viewport.on_resize(0, 0, &mut camera, &mut target));
        assert_eq!(viewport.size(), (800, 600));
        assert_eq!(target.size(), (800, 600));
    }

    #[test]
    fn test_toggle_twice_returns_to_windowed() {
        let mut camera = PerspectiveCamera::default();
        let mut target = Target::default();
        let mut display = host(800, 600);
        let viewport = ViewportController::new(&display, &mut camera, &mut target).unwrap();

        assert_eq!(viewport.toggle_fullscreen(&mut display), FullscreenChange::Entered);
        assert!(display.is_fullscreen());
        assert_eq!(viewport.toggle_fullscreen(&mut display), FullscreenChange::Exited);
        assert!(!display.is_fullscreen());
    }

    #[test]
    fn test_refusal_is_not_an_error() {
        let mut camera = PerspectiveCamera::default();
        let mut target = Target::default();
        let mut display = host(800, 600);
        display.refuse = true;
        let viewport = ViewportController::new(&display, &mut camera, &mut target).unwrap();
        assert_eq!(viewport.toggle_fullscreen(&mut display), FullscreenChange::Refused);
        assert!(!display.is_fullscreen());
    }
}
