use crate::error::FullscreenError;

/// The window or display surface hosting the viewport
pub trait DisplayHost {
    /// Inner size in physical pixels
    fn inner_size(&self) -> (u32, u32);

    fn is_fullscreen(&self) -> bool;

    /// Ask for fullscreen; the host may refuse
    fn request_fullscreen(&mut self) -> Result<(), FullscreenError>;

    fn exit_fullscreen(&mut self) -> Result<(), FullscreenError>;
}

/// Display-synchronized frame callback registration
pub trait FrameScheduler {
    /// Schedule one more frame callback
    fn request_frame(&mut self);
}
