use crate::error::RenderError;
use crate::scene::Scene;

/// Anything with a pixel-sized drawing area that follows the viewport
pub trait RenderTarget {
    fn set_size(&mut self, width: u32, height: u32);

    fn size(&self) -> (u32, u32);
}

/// UI drawn on top of the scene each frame
pub trait Overlay {
    fn show(&mut self, ctx: &egui::Context);
}

/// Renders the scene from its camera, shadow passes included
pub trait SceneRenderer: RenderTarget {
    fn render(
        &mut self,
        scene: &Scene,
        time: f32,
        overlay: &mut dyn Overlay,
    ) -> Result<(), RenderError>;
}
