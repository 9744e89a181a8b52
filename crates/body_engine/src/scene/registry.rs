//! Scene component registry
//!
//! Maps body-part labels to live scene nodes and decides, per part and per
//! frame, whether to build a new node or mutate the existing one in place.

use std::collections::HashMap;

use crate::core::{BodyConfig, GeometryConfig, LimbConfig, TorsoPolicy};
use crate::foundation::math::Transform;
use crate::pose::{HeadParams, LimbParams};
use crate::render::material::Material;
use crate::render::primitives::Mesh;
use crate::rig;
use super::geometry::{self, GeometryError, TorsoShape};
use super::{BodyPart, NodeKey, NodeKind, Scene, SceneNode, Shape, StaticMesh};

/// Which path `resolve` took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A new node was built and registered
    Created(NodeKey),
    /// The registered node was mutated in place
    Updated(NodeKey),
}

impl Resolution {
    /// Key of the resolved node
    pub const fn key(self) -> NodeKey {
        match self {
            Self::Created(key) | Self::Updated(key) => key,
        }
    }
    
    /// Whether a new node was built
    pub const fn is_created(self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Per-part input to [`ComponentRegistry::resolve`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartParams {
    /// Validated torso dimensions
    Torso(TorsoShape),
    /// Head centre and radius
    Head(HeadParams),
    /// Joints of one limb; the part must be an arm or a leg
    Limb(BodyPart, LimbParams),
}

impl PartParams {
    /// Part these parameters describe
    pub const fn part(&self) -> BodyPart {
        match self {
            Self::Torso(_) => BodyPart::Torso,
            Self::Head(_) => BodyPart::Head,
            Self::Limb(part, _) => *part,
        }
    }
}

/// Label → node store owned by a single body
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    components: HashMap<BodyPart, NodeKey>,
    /// Torso nodes superseded under `TorsoPolicy::Replace`, still in the scene
    retired: Vec<NodeKey>,
    geometry: GeometryConfig,
    limb: LimbConfig,
    torso_policy: TorsoPolicy,
}

impl ComponentRegistry {
    /// Create an empty registry using the build settings of `config`
    pub fn new(config: &BodyConfig) -> Self {
        Self {
            components: HashMap::new(),
            retired: Vec::new(),
            geometry: config.geometry.clone(),
            limb: config.limb.clone(),
            torso_policy: config.torso_policy,
        }
    }
    
    /// Key registered for `part`
    pub fn get(&self, part: BodyPart) -> Option<NodeKey> {
        self.components.get(&part).copied()
    }
    
    /// Number of registered parts
    pub fn len(&self) -> usize {
        self.components.len()
    }
    
    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
    
    /// Superseded torso nodes still present in the scene
    pub fn retired(&self) -> &[NodeKey] {
        &self.retired
    }
    
    /// Torso create-vs-update behaviour
    pub const fn torso_policy(&self) -> TorsoPolicy {
        self.torso_policy
    }
    
    /// Create or update the node for one part
    ///
    /// Head and limbs are built on first sight and mutated afterwards. The
    /// torso follows the configured [`TorsoPolicy`]: `Replace` always builds a
    /// new node and leaves the previous one in the scene.
    pub fn resolve(&mut self, scene: &mut Scene, params: PartParams) -> Result<Resolution, GeometryError> {
        let part = params.part();
        let existing = self.get(part).filter(|key| {
            let live = scene.contains(*key);
            if !live {
                log::warn!("Registered {} node {:?} is gone from the scene, rebuilding", part, key);
            }
            live
        });
        
        let replace_torso = part == BodyPart::Torso && self.torso_policy == TorsoPolicy::Replace;
        if let Some(key) = existing.filter(|_| !replace_torso) {
            let updated = match scene.get_mut(key) {
                Some(node) => self.update_node(node, &params)?,
                None => false,
            };
            if updated {
                log::trace!("Updated {} in place", part);
                return Ok(Resolution::Updated(key));
            }
            
            log::warn!("Registered {} node {:?} does not match its parameters, rebuilding", part, key);
            scene.remove(key);
            self.components.remove(&part);
        }
        
        let node = self.build_node(&params)?;
        let key = scene.add(node);
        if let Some(previous) = self.components.insert(part, key) {
            if scene.contains(previous) {
                self.retired.push(previous);
            }
        }
        log::info!("Created {} node {:?}", part, key);
        Ok(Resolution::Created(key))
    }
    
    /// Remove every node this registry created from `scene`
    ///
    /// Returns the number of nodes removed.
    pub fn teardown(&mut self, scene: &mut Scene) -> usize {
        let removed = self
            .components
            .drain()
            .map(|(_, key)| key)
            .chain(self.retired.drain(..))
            .filter(|key| scene.remove(*key).is_some())
            .count();
        log::info!("Registry teardown removed {} nodes", removed);
        removed
    }
    
    fn material(&self) -> Material {
        Material::lambert(self.geometry.material_color)
    }
    
    fn build_node(&self, params: &PartParams) -> Result<SceneNode, GeometryError> {
        let part = params.part();
        let (transform, kind) = match params {
            PartParams::Torso(shape) => {
                let (mesh, shape_params) = self.torso_mesh(shape);
                (Transform::from_position(shape.center), NodeKind::StaticMesh(StaticMesh { mesh, shape: shape_params }))
            }
            PartParams::Head(head) => {
                let radius = geometry::head_radius(head)?;
                let mesh = geometry::head_mesh(radius, &self.geometry)?;
                (
                    Transform::from_position(head.center),
                    NodeKind::StaticMesh(StaticMesh { mesh, shape: Shape::Sphere { radius } }),
                )
            }
            PartParams::Limb(_, joints) => {
                let (skinned, transform) = rig::build_limb(joints, &self.limb);
                (transform, NodeKind::SkinnedLimb(skinned))
            }
        };
        
        Ok(SceneNode::new(part.label(), transform, self.material(), kind))
    }
    
    /// Mutate `node` in place; `false` if its kind cannot take `params`
    fn update_node(&self, node: &mut SceneNode, params: &PartParams) -> Result<bool, GeometryError> {
        match (params, &mut node.kind) {
            (PartParams::Torso(shape), NodeKind::StaticMesh(static_mesh)) => {
                let (mesh, shape_params) = self.torso_mesh(shape);
                static_mesh.mesh = mesh;
                static_mesh.shape = shape_params;
                node.transform.position = shape.center;
            }
            (PartParams::Head(head), NodeKind::StaticMesh(static_mesh)) => {
                let radius = geometry::head_radius(head)?;
                let Shape::Sphere { radius: creation_radius } = static_mesh.shape else {
                    return Ok(false);
                };
                node.transform.scale = geometry::head_scale(radius, creation_radius);
                node.transform.position = head.center;
            }
            (PartParams::Limb(_, joints), NodeKind::SkinnedLimb(skinned)) => {
                skinned.skeleton.set_positions(joints.joints());
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
    
    fn torso_mesh(&self, shape: &TorsoShape) -> (Mesh, Shape) {
        let cylinder = geometry::torso_cylinder(shape, &self.geometry);
        (Mesh::cylinder(cylinder), Shape::Cylinder(cylinder))
    }
}
