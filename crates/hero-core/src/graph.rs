//! Flat scene graph of plain data nodes.
//!
//! Nodes are stored parent-before-child, so one forward pass in
//! [`SceneGraph::update_world`] resolves every world matrix.

use crate::error::{invalid, Result};
use crate::float::{GeometryKind, Material};
use glam::{EulerRot, Mat4, Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Group,
    Points { size: f32, opacity: f32 },
    Mesh {
        geometry: GeometryKind,
        material: Material,
    },
}

/// Translation, XYZ euler rotation (radians) and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let q = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, q, self.translation)
    }
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: &'static str,
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
    pub local: Transform,
    world: Mat4,
}

impl SceneNode {
    pub fn world(&self) -> Mat4 {
        self.world
    }
}

#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        name: &'static str,
        parent: Option<NodeId>,
        kind: NodeKind,
        local: Transform,
    ) -> Result<NodeId> {
        if let Some(p) = parent {
            if p.0 >= self.nodes.len() {
                return Err(invalid(format!(
                    "node `{name}` refers to unknown parent {}",
                    p.0
                )));
            }
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode {
            name,
            parent,
            kind,
            local,
            world: local.matrix(),
        });
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0]
    }

    pub fn local_mut(&mut self, id: NodeId) -> &mut Transform {
        &mut self.nodes[id.0].local
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

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn update_world(&mut self) {
        for i in 0..self.nodes.len() {
            let local = self.nodes[i].local.matrix();
            let world = match self.nodes[i].parent {
                Some(p) => self.nodes[p.0].world * local,
                None => local,
            };
            self.nodes[i].world = world;
        }
    }

    /// World-space position of a node's origin.
    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.nodes[id.0].world.w_axis.truncate()
    }
}
