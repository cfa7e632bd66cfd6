use glam::Vec3;

use crate::lights::LightRig;
use crate::math::hex_to_rgb;
use crate::types::LineVertex;

/// Frustum edge colour of the debug helpers
pub const HELPER_COLOR: u32 = 0xffaa00;

/// Corner index pairs differing in exactly one bit: the 12 edges of a box
const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

pub fn frustum_lines(corners: &[Vec3; 8], color: [f32; 3], out: &mut Vec<LineVertex>) {
    for (a, b) in EDGES {
        out.push(LineVertex {
            position: corners[a].to_array(),
            color,
        });
        out.push(LineVertex {
            position: corners[b].to_array(),
            color,
        });
    }
}

/// Line list for every helper currently switched on
pub fn helper_lines(rig: &LightRig) -> Vec<LineVertex> {
    let color = hex_to_rgb(HELPER_COLOR);
    let mut lines = Vec::new();
    for helper in rig.helpers().iter().filter(|h| h.visible) {
        for corners in rig.get(helper.light).shadow_frustum_corners() {
            frustum_lines(&corners, color, &mut lines);
        }
    }
    lines
}
