use log::info;

use crate::animation::{Animator, Spin};
use crate::camera::PerspectiveCamera;
use crate::error::SceneError;
use crate::lights::{LightKind, LightRig};
use crate::material::SharedMaterial;
use crate::math::Transform;
use crate::registry::Catalog;
use crate::scene::{NodeContent, Scene, SceneNode};

/// The assembled scene plus the handles the frame loop needs
#[derive(Debug)]
pub struct Showcase {
    pub scene: Scene,
    pub animator: Animator,
    /// Material edited by the parameter panel
    pub material: SharedMaterial,
}

/// Sphere, torus and ground plane under four lights, each shadow light
/// carrying a hidden frustum helper as its child
pub fn create_showcase_scene(
    catalog: &Catalog,
    lights: LightRig,
    camera: PerspectiveCamera,
) -> Result<Showcase, SceneError> {
    let camera_position = camera.position;
    let mut scene = Scene::new(camera, lights);
    let mut animator = Animator::new(Spin::SHOWCASE);

    for renderable in catalog.entries() {
        let id = scene.add(SceneNode::from(renderable));
        if renderable.animated {
            animator.track(id);
        }
    }

    let light_nodes: Vec<_> = scene
        .lights()
        .lights()
        .iter()
        .map(|light| (light.kind, light.position))
        .collect();
    for (kind, position) in light_nodes {
        let node = scene.add(
            SceneNode::new(format!("{} light", kind.label()), NodeContent::Light(kind))
                .with_transform(Transform::from_position(position)),
        );
        if LightKind::SHADOW_CASTERS.contains(&kind) {
            scene.add_child(
                node,
                SceneNode::new(
                    format!("{} shadow helper", kind.label()),
                    NodeContent::ShadowHelper(kind),
                ),
            )?;
        }
    }

    scene.add(
        SceneNode::new("camera", NodeContent::Camera)
            .with_transform(Transform::from_position(camera_position)),
    );

    info!(
        "Scene ready: {} nodes, {} animated, {} shadow views",
        scene.len(),
        animator.nodes().len(),
        scene.lights().shadow_view_count()
    );

    Ok(Showcase {
        scene,
        animator,
        material: catalog.shared_material(),
    })
}
