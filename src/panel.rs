use log::debug;

use crate::lights::{LightKind, LightRig};
use crate::material::{MaterialParam, SharedMaterial};
use crate::traits::Overlay;

pub const SLIDER_MIN: f32 = 0.0;
pub const SLIDER_MAX: f32 = 1.0;
pub const SLIDER_STEP: f32 = 1e-4;

/// Snap a control value onto the slider grid inside [min, max]
pub fn quantize(value: f32) -> f32 {
    if value.is_nan() {
        return SLIDER_MIN;
    }
    let clamped = value.clamp(SLIDER_MIN, SLIDER_MAX);
    let steps = ((clamped - SLIDER_MIN) / SLIDER_STEP).round();
    (SLIDER_MIN + steps * SLIDER_STEP).clamp(SLIDER_MIN, SLIDER_MAX)
}

/// Material sliders and shadow-helper switches bound to live scene state
#[derive(Debug)]
pub struct ParameterPanel {
    material: SharedMaterial,
    helpers: [(LightKind, bool); 3],
    visible: bool,
    fps: f32,
}

impl ParameterPanel {
    pub fn new(material: SharedMaterial) -> Self {
        Self {
            material,
            helpers: LightKind::SHADOW_CASTERS.map(|kind| (kind, false)),
            visible: true,
            fps: 0.0,
        }
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn value(&self, param: MaterialParam) -> f32 {
        self.material.borrow().get(param)
    }

    /// Control write: quantized, clamped, stored straight into the shared material
    pub fn set(&mut self, param: MaterialParam, value: f32) {
        let value = quantize(value);
        debug!("{} -> {}", param.label(), value);
        self.material.borrow_mut().set(param, value);
    }

    pub fn helper(&self, light: LightKind) -> bool {
        self.helpers
            .iter()
            .find(|(kind, _)| *kind == light)
            .is_some_and(|(_, on)| *on)
    }

    pub fn set_helper(&mut self, light: LightKind, on: bool) {
        if let Some(entry) = self.helpers.iter_mut().find(|(kind, _)| *kind == light) {
            entry.1 = on;
        }
    }

    /// Push the helper switches into the rig
    pub fn apply_to(&self, rig: &mut LightRig) {
        for (kind, on) in self.helpers {
            rig.set_helper_visible(kind, on);
        }
    }

    pub fn set_fps(&mut self, fps: f32) {
        self.fps = fps;
    }
}

impl Overlay for ParameterPanel {
    fn show(&mut self, ctx: &egui::Context) {
        if !self.visible {
            return;
        }

        egui::Window::new("Material")
            .resizable(false)
            .default_pos(egui::pos2(10.0, 10.0))
            .show(ctx, |ui| {
                for param in MaterialParam::ALL {
                    let mut value = self.value(param);
                    let slider = egui::Slider::new(&mut value, SLIDER_MIN..=SLIDER_MAX)
                        .step_by(SLIDER_STEP as f64)
                        .text(param.label());
                    if ui.add(slider).changed() {
                        self.set(param, value);
                    }
                }

                ui.separator();
                for (kind, on) in self.helpers.iter_mut() {
                    ui.checkbox(on, format!("{} shadow frustum", kind.label()));
                }

                ui.separator();
                ui.label(
                    egui::RichText::new(format!("{:.0} FPS", self.fps))
                        .size(12.0)
                        .color(egui::Color32::GRAY),
                );
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lights::DEFAULT_SHADOW_MAP_SIZE;
    use crate::material::Material;

    fn panel() -> ParameterPanel {
        ParameterPanel::new(
            Material::standard("shared")
                .with_metalness(0.7)
                .with_roughness(0.2)
                .into_shared(),
        )
    }

    #[test]
    fn test_quantize() {
        assert_eq!(quantize(1.5), 1.0);
        assert_eq!(quantize(-3.0), 0.0);
        assert_eq!(quantize(f32::NAN), 0.0);
        assert!((quantize(0.123456) - 0.1235).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_write_clamps() {
        let mut panel = panel();
        panel.set(MaterialParam::Metalness, 2.0);
        assert_eq!(panel.value(MaterialParam::Metalness), 1.0);
        panel.set(MaterialParam::Roughness, -0.5);
        assert_eq!(panel.value(MaterialParam::Roughness), 0.0);
    }

    #[test]
    fn test_writes_reach_shared_material() {
        let material = Material::standard("shared").into_shared();
        let mut panel = ParameterPanel::new(material.clone());
        panel.set(MaterialParam::Roughness, 0.5);
        assert_eq!(material.borrow().roughness(), 0.5);
    }

    #[test]
    fn test_helper_switches_apply_to_rig() {
        let mut rig = LightRig::new(DEFAULT_SHADOW_MAP_SIZE).unwrap();
        let mut panel = panel();
        assert!(LightKind::SHADOW_CASTERS.iter().all(|k| !panel.helper(*k)));

        panel.set_helper(LightKind::Spot, true);
        panel.apply_to(&mut rig);
        assert!(rig.helper_visible(LightKind::Spot));
        assert!(!rig.helper_visible(LightKind::Point));
    }

    #[test]
    fn test_show_runs_headless() {
        let ctx = egui::Context::default();
        let mut panel = panel();
        let _ = ctx.run(egui::RawInput::default(), |ctx| panel.show(ctx));
        // Showing without interaction leaves the material alone
        assert!((panel.value(MaterialParam::Metalness) - 0.7).abs() < 1e-6);
    }
}
