use glam::Mat4;

use crate::camera::PerspectiveCamera;
use crate::error::SceneError;
use crate::geometry::Geometry;
use crate::lights::{LightKind, LightRig};
use crate::material::SharedMaterial;
use crate::math::Transform;
use crate::registry::Renderable;

/// Index of a node inside its [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Drawable payload of a mesh node
#[derive(Debug, Clone)]
pub struct MeshNode {
    pub geometry: Geometry,
    pub material: SharedMaterial,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

#[derive(Debug, Clone)]
pub enum NodeContent {
    Group,
    Mesh(MeshNode),
    /// Marker for a light owned by the scene's [`LightRig`]
    Light(LightKind),
    /// Debug frustum for a shadow-casting light
    ShadowHelper(LightKind),
    /// Anchor for the scene's [`PerspectiveCamera`]
    Camera,
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub content: NodeContent,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, content: NodeContent) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            content,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeContent::Group)
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn as_mesh(&self) -> Option<&MeshNode> {
        match &self.content {
            NodeContent::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }
}

impl From<&Renderable> for SceneNode {
    fn from(renderable: &Renderable) -> Self {
        SceneNode::new(
            renderable.name,
            NodeContent::Mesh(MeshNode {
                geometry: renderable.geometry,
                material: renderable.material.clone(),
                cast_shadow: renderable.cast_shadow,
                receive_shadow: renderable.receive_shadow,
            }),
        )
        .with_transform(renderable.transform)
    }
}

/// One mesh ready to draw this frame
#[derive(Debug, Clone)]
pub struct DrawItem {
    pub node: NodeId,
    pub geometry: Geometry,
    pub material: SharedMaterial,
    pub world: Mat4,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

/// Node tree plus the camera and the lights it shows
///
/// Nodes live in an arena and are only ever appended, so a node's parent
/// always has a smaller index and the tree cannot contain cycles.
#[derive(Debug)]
pub struct Scene {
    nodes: Vec<SceneNode>,
    roots: Vec<NodeId>,
    camera: PerspectiveCamera,
    lights: LightRig,
}

impl Scene {
    pub fn new(camera: PerspectiveCamera, lights: LightRig) -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            camera,
            lights,
        }
    }

    /// Attach a node to the scene root
    pub fn add(&mut self, mut node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = None;
        node.children.clear();
        self.nodes.push(node);
        self.roots.push(id);
        id
    }

    pub fn add_child(&mut self, parent: NodeId, mut node: SceneNode) -> Result<NodeId, SceneError> {
        if parent.0 >= self.nodes.len() {
            return Err(SceneError::UnknownNode(parent.0));
        }
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }

    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    pub fn lights_mut(&mut self) -> &mut LightRig {
        &mut self.lights
    }

    /// Move camera and light nodes to where the camera and the rig actually are
    pub fn sync_anchors(&mut self) {
        let camera_world = self.camera.world_transform().matrix();
        for i in 0..self.nodes.len() {
            let world = match self.nodes[i].content {
                NodeContent::Camera => camera_world,
                NodeContent::Light(kind) => Mat4::from_translation(self.lights.get(kind).position),
                _ => continue,
            };
            let local = match self.nodes[i].parent {
                Some(parent) => self.world_of(parent).inverse() * world,
                None => world,
            };
            self.nodes[i].transform = Transform::from_rigid(&local);
        }
    }

    fn world_of(&self, id: NodeId) -> Mat4 {
        let mut node = &self.nodes[id.0];
        let mut world = node.transform.matrix();
        while let Some(parent) = node.parent {
            node = &self.nodes[parent.0];
            world = node.transform.matrix() * world;
        }
        world
    }

    /// Depth-first, parents before children
    pub fn traverse(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        order
    }

    pub fn world_matrix(&self, id: NodeId) -> Result<Mat4, SceneError> {
        if id.0 >= self.nodes.len() {
            return Err(SceneError::UnknownNode(id.0));
        }
        Ok(self.world_of(id))
    }

    /// World matrices of every node, indexed by [`NodeId::index`]
    pub fn world_matrices(&self) -> Vec<Mat4> {
        let mut worlds = vec![Mat4::IDENTITY; self.nodes.len()];
        // Parents precede children in the arena
        for (i, node) in self.nodes.iter().enumerate() {
            let local = node.transform.matrix();
            worlds[i] = match node.parent {
                Some(parent) => worlds[parent.0] * local,
                None => local,
            };
        }
        worlds
    }

    pub fn draw_list(&self) -> Vec<DrawItem> {
        let worlds = self.world_matrices();
        self.traverse()
            .into_iter()
            .filter_map(|id| {
                self.nodes[id.0].as_mesh().map(|mesh| DrawItem {
                    node: id,
                    geometry: mesh.geometry,
                    material: mesh.material.clone(),
                    world: worlds[id.0],
                    cast_shadow: mesh.cast_shadow,
                    receive_shadow: mesh.receive_shadow,
                })
            })
            .collect()
    }
}
