//! Hero scene composition: builds the graph, owns the per-frame state and
//! wires each animator into the [`FrameScheduler`].

use crate::camera::{Camera, CameraRig};
use crate::constants::*;
use crate::error::{invalid, Result, SceneError};
use crate::float::{
    default_bodies, float_pose, FloatParams, FloatingBodyAnimator, FloatingBodySpec,
    GeometryKind, Material,
};
use crate::graph::{NodeId, NodeKind, SceneGraph, Transform};
use crate::particles::{FieldSpec, ParticleField};
use crate::scheduler::{AnimatorId, FrameScheduler, FrameTick};
use crate::sphere::{sphere_pose, SphereSpec};
use glam::{Vec2, Vec3};
use rand::prelude::*;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub field: FieldSpec,
    /// Fixed seed for reproducible particles and float phases.
    pub seed: Option<u64>,
    pub bodies: Vec<FloatingBodySpec>,
    pub sphere: SphereSpec,
    pub sphere_float: FloatParams,
    pub camera: CameraRig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            field: FieldSpec::default(),
            seed: None,
            bodies: default_bodies(),
            sphere: SphereSpec::default(),
            sphere_float: FloatParams::new(
                SPHERE_FLOAT_SPEED,
                SPHERE_FLOAT_ROTATION_INTENSITY,
                SPHERE_FLOAT_INTENSITY,
            ),
            camera: CameraRig::default(),
        }
    }
}

fn check_float(name: &str, p: &FloatParams) -> Result<()> {
    let all = [p.speed, p.rotation_intensity, p.float_intensity, p.phase];
    if all.iter().any(|v| !v.is_finite()) {
        return Err(invalid(format!("float parameters of `{name}` must be finite")));
    }
    Ok(())
}

impl SceneConfig {
    pub fn validate(&self) -> Result<()> {
        self.field.validate()?;
        for b in &self.bodies {
            check_float(b.name, &b.float)?;
        }
        check_float("sphere", &self.sphere_float)?;
        if !(self.sphere.radius > 0.0 && self.sphere.shell_radius >= self.sphere.radius) {
            return Err(invalid(format!(
                "sphere radius {} / shell {} are invalid",
                self.sphere.radius, self.sphere.shell_radius
            )));
        }
        self.camera.validate()
    }
}

#[derive(Clone, Debug)]
struct SceneNodes {
    field: NodeId,
    bodies: Vec<NodeId>,
    sphere_float: NodeId,
    sphere: NodeId,
}

/// Everything the frame animators write.
pub struct SceneState {
    pub field: ParticleField,
    pub graph: SceneGraph,
    pub camera: Camera,
    pub elapsed: f32,
    nodes: SceneNodes,
}

/// Per-node world matrix, column-major.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeFrame {
    pub name: &'static str,
    pub world: [f32; 16],
}

/// What the renderer consumes each frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutput {
    pub elapsed: f32,
    pub field_rotation: Vec2,
    pub camera_eye: Vec3,
    pub camera_target: Vec3,
    /// Column-major view-projection matrix of the scene camera.
    pub view_projection: [f32; 16],
    pub nodes: Vec<NodeFrame>,
}

pub struct HeroScene {
    state: Rc<RefCell<SceneState>>,
    node_names: Vec<&'static str>,
    bodies: Rc<FloatingBodyAnimator>,
    sphere_float: FloatParams,
    rig: CameraRig,
}

/// Animators registered by [`HeroScene::mount`]; hand back to release them.
#[must_use]
pub struct SceneMount {
    ids: Vec<AnimatorId>,
}

impl SceneMount {
    pub fn animator_ids(&self) -> &[AnimatorId] {
        &self.ids
    }

    pub fn release(self, scheduler: &mut FrameScheduler) {
        for id in self.ids {
            scheduler.deregister(id);
        }
    }
}

fn read_state<'a>(
    state: &'a RefCell<SceneState>,
    what: &'static str,
) -> Result<Ref<'a, SceneState>> {
    state.try_borrow().map_err(|_| SceneError::StateBusy(what))
}

fn borrow_state<'a>(
    state: &'a RefCell<SceneState>,
    animator: &'static str,
) -> Result<RefMut<'a, SceneState>> {
    state
        .try_borrow_mut()
        .map_err(|_| SceneError::AnimatorUnavailable(animator))
}

impl HeroScene {
    pub fn new(config: SceneConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let field = ParticleField::new(&config.field, &mut rng)?;

        // Seeded phases keep bodies out of lockstep while staying a static parameter
        let mut bodies = config.bodies;
        for b in &mut bodies {
            b.float.phase = rng.gen::<f32>() * FLOAT_PHASE_MAX;
        }

        let mut graph = SceneGraph::new();
        let root = graph.add("scene", None, NodeKind::Group, Transform::default())?;
        let field_node = graph.add(
            "particles",
            Some(root),
            NodeKind::Points {
                size: PARTICLE_SIZE,
                opacity: PARTICLE_OPACITY,
            },
            Transform::default(),
        )?;
        let group = graph.add("floating-bodies", Some(root), NodeKind::Group, Transform::default())?;
        let body_nodes = bodies
            .iter()
            .map(|b| {
                graph.add(
                    b.name,
                    Some(group),
                    NodeKind::Mesh {
                        geometry: b.geometry,
                        material: b.material,
                    },
                    Transform::from_translation(b.base_position),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        let sphere_float = graph.add("sphere-float", Some(root), NodeKind::Group, Transform::default())?;
        let sphere = graph.add(
            "sphere",
            Some(sphere_float),
            NodeKind::Mesh {
                geometry: GeometryKind::Sphere {
                    radius: config.sphere.radius,
                },
                material: Material {
                    opacity: 0.8,
                    ..Material::standard(0xffffff, 0.9, 0.1, 0x000000)
                },
            },
            Transform::default(),
        )?;
        graph.add(
            "sphere-shell",
            Some(sphere),
            NodeKind::Mesh {
                geometry: GeometryKind::Sphere {
                    radius: config.sphere.shell_radius,
                },
                material: Material {
                    opacity: SPHERE_SHELL_OPACITY,
                    wireframe: true,
                    emissive_intensity: 0.0,
                    ..Material::standard(0x3b82f6, 0.0, 1.0, 0x000000)
                },
            },
            Transform::default(),
        )?;
        graph.update_world();
        log::info!(
            "[scene] built {} nodes, {} floating bodies, {} particles",
            graph.len(),
            body_nodes.len(),
            field.len()
        );

        let node_names = graph.nodes().iter().map(|n| n.name).collect();
        let state = SceneState {
            field,
            graph,
            camera: Camera::default(),
            elapsed: 0.0,
            nodes: SceneNodes {
                field: field_node,
                bodies: body_nodes,
                sphere_float,
                sphere,
            },
        };
        Ok(Self {
            state: Rc::new(RefCell::new(state)),
            node_names,
            bodies: Rc::new(FloatingBodyAnimator::new(bodies)),
            sphere_float: config.sphere_float,
            rig: config.camera,
        })
    }

    pub fn state(&self) -> Rc<RefCell<SceneState>> {
        self.state.clone()
    }

    /// Node names in graph order, matching [`FrameOutput::nodes`]. The graph
    /// is fixed after construction, so this never touches the frame state.
    pub fn node_names(&self) -> &[&'static str] {
        &self.node_names
    }

    pub fn bodies(&self) -> &[FloatingBodySpec] {
        self.bodies.bodies()
    }

    /// Register the frame animators. The graph traversal goes last so it sees
    /// every local transform written this tick.
    pub fn mount(&self, scheduler: &mut FrameScheduler) -> SceneMount {
        let mut ids = Vec::with_capacity(5);

        let state = self.state.clone();
        ids.push(scheduler.register("particle-field", move |tick: &FrameTick| {
            let mut s = borrow_state(&state, "particle-field")?;
            s.field.update(tick.elapsed);
            let rot = s.field.rotation;
            let node = s.nodes.field;
            s.graph.local_mut(node).rotation = Vec3::new(rot.x, rot.y, 0.0);
            Ok(())
        }));

        let state = self.state.clone();
        let bodies = self.bodies.clone();
        ids.push(scheduler.register("floating-bodies", move |tick: &FrameTick| {
            let mut s = borrow_state(&state, "floating-bodies")?;
            let s = &mut *s;
            for ((spec, pose), node) in bodies
                .bodies()
                .iter()
                .zip(bodies.poses(tick.elapsed))
                .zip(s.nodes.bodies.iter())
            {
                let local = s.graph.local_mut(*node);
                local.translation = spec.base_position + Vec3::Y * pose.offset_y;
                local.rotation = pose.rotation;
            }
            Ok(())
        }));

        let state = self.state.clone();
        let wrapper = self.sphere_float;
        ids.push(scheduler.register("focal-sphere", move |tick: &FrameTick| {
            let mut s = borrow_state(&state, "focal-sphere")?;
            let (float_node, sphere_node) = (s.nodes.sphere_float, s.nodes.sphere);
            let outer = float_pose(&wrapper, tick.elapsed);
            let float_local = s.graph.local_mut(float_node);
            float_local.translation.y = outer.offset_y;
            float_local.rotation = outer.rotation;
            let pose = sphere_pose(tick.elapsed);
            let local = s.graph.local_mut(sphere_node);
            local.rotation = Vec3::new(pose.rotation.x, pose.rotation.y, 0.0);
            local.translation.y = pose.offset_y;
            Ok(())
        }));

        let state = self.state.clone();
        let rig = self.rig;
        ids.push(scheduler.register("camera-orbit", move |tick: &FrameTick| {
            let mut s = borrow_state(&state, "camera-orbit")?;
            let target = s.camera.target;
            s.camera.eye = rig.eye_at(tick.elapsed, target);
            Ok(())
        }));

        let state = self.state.clone();
        ids.push(scheduler.register("scene-graph", move |tick: &FrameTick| {
            let mut s = borrow_state(&state, "scene-graph")?;
            s.elapsed = tick.elapsed;
            s.graph.update_world();
            Ok(())
        }));

        log::info!("[scene] mounted {} animators", ids.len());
        SceneMount { ids }
    }

    pub fn frame_output(&self) -> Result<FrameOutput> {
        let s = read_state(&self.state, "frame output")?;
        Ok(FrameOutput {
            elapsed: s.elapsed,
            field_rotation: s.field.rotation,
            camera_eye: s.camera.eye,
            camera_target: s.camera.target,
            view_projection: s.camera.view_projection().to_cols_array(),
            nodes: s
                .graph
                .nodes()
                .iter()
                .map(|n| NodeFrame {
                    name: n.name,
                    world: n.world().to_cols_array(),
                })
                .collect(),
        })
    }

    /// World-space position of a named node; `Ok(None)` for unknown names.
    pub fn node_position(&self, name: &str) -> Result<Option<Vec3>> {
        let s = read_state(&self.state, "node position")?;
        Ok(s.graph.find(name).map(|id| s.graph.world_position(id)))
    }

    /// Interleaved particle vertices, copied out for upload.
    pub fn particle_vertices(&self) -> Result<Vec<f32>> {
        let s = read_state(&self.state, "particle vertices")?;
        Ok(s.field.vertex_floats().to_vec())
    }
}
