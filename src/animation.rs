use glam::Vec3;

use crate::error::SceneError;
use crate::scene::{NodeId, Scene};

/// Constant-rate spin about X and Y, in radians per second
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub x_rate: f32,
    pub y_rate: f32,
}

impl Spin {
    pub const SHOWCASE: Spin = Spin {
        x_rate: 0.15,
        y_rate: 0.1,
    };

    /// Absolute X/Y rotation at `time` seconds
    pub fn angles_at(&self, time: f32) -> (f32, f32) {
        (self.x_rate * time, self.y_rate * time)
    }
}

/// Nodes spun from the elapsed time each frame
///
/// Rotation is derived from time alone, so it does not depend on frame rate.
/// X and Y overwrite the node's rotation, Z is left untouched.
#[derive(Debug, Clone)]
pub struct Animator {
    spin: Spin,
    nodes: Vec<NodeId>,
}

impl Animator {
    pub fn new(spin: Spin) -> Self {
        Self {
            spin,
            nodes: Vec::new(),
        }
    }

    pub fn track(&mut self, node: NodeId) {
        if !self.nodes.contains(&node) {
            self.nodes.push(node);
        }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn apply(&self, scene: &mut Scene, time: f32) -> Result<(), SceneError> {
        let (x, y) = self.spin.angles_at(time);
        for &id in &self.nodes {
            let node = scene.node_mut(id).ok_or(SceneError::UnknownNode(id.index()))?;
            let z = node.transform.rotation.z;
            node.transform.rotation = Vec3::new(x, y, z);
        }
        Ok(())
    }
}
