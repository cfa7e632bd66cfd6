use std::sync::Arc;

use winit::window::{Fullscreen, Window as WinitWindow};

use crate::error::FullscreenError;
use crate::traits::{DisplayHost, FrameScheduler};

/// Wrapper around winit Window acting as the session's display host and frame scheduler
#[derive(Clone)]
pub struct Window {
    inner: Arc<WinitWindow>,
}

impl Window {
    pub fn new(window: Arc<WinitWindow>) -> Self {
        Self { inner: window }
    }

    pub fn inner(&self) -> &Arc<WinitWindow> {
        &self.inner
    }
}

impl DisplayHost for Window {
    fn inner_size(&self) -> (u32, u32) {
        let size = self.inner.inner_size();
        (size.width, size.height)
    }

    fn is_fullscreen(&self) -> bool {
        self.inner.fullscreen().is_some()
    }

    fn request_fullscreen(&mut self) -> Result<(), FullscreenError> {
        let monitor = self.inner.current_monitor().ok_or(FullscreenError::NoMonitor)?;
        self.inner
            .set_fullscreen(Some(Fullscreen::Borderless(Some(monitor))));
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), FullscreenError> {
        self.inner.set_fullscreen(None);
        Ok(())
    }
}

impl FrameScheduler for Window {
    fn request_frame(&mut self) {
        self.inner.request_redraw();
    }
}
