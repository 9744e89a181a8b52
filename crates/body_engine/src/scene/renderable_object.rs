//! Renderable scene nodes

use crate::foundation::math::{Mat4, Transform};
use crate::render::material::Material;
use crate::render::primitives::{CylinderParams, Mesh};
use crate::rig::SkinnedMesh;

/// Parameters a static mesh was generated from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// UV sphere
    Sphere {
        /// Radius at creation time
        radius: f32,
    },
    /// Tapered cylinder
    Cylinder(CylinderParams),
}

/// Rigid geometry positioned by the node transform
#[derive(Debug, Clone, PartialEq)]
pub struct StaticMesh {
    /// Geometry
    pub mesh: Mesh,
    /// What the geometry was generated from
    pub shape: Shape,
}

/// What a node draws
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Head or torso
    StaticMesh(StaticMesh),
    /// Arm or leg
    SkinnedLimb(SkinnedMesh),
}

/// A labelled renderable in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Body part label this node was created for
    pub label: String,
    /// Local-to-world transform
    pub transform: Transform,
    /// Surface material
    pub material: Material,
    /// Geometry
    pub kind: NodeKind,
    /// Hidden nodes are skipped by the renderer
    pub visible: bool,
}

impl SceneNode {
    /// Create a visible node
    pub fn new(label: impl Into<String>, transform: Transform, material: Material, kind: NodeKind) -> Self {
        Self {
            label: label.into(),
            transform,
            material,
            kind,
            visible: true,
        }
    }
    
    /// Model matrix
    pub fn world_matrix(&self) -> Mat4 {
        self.transform.to_matrix()
    }
    
    /// Undeformed geometry of the node
    pub fn mesh(&self) -> &Mesh {
        match &self.kind {
            NodeKind::StaticMesh(static_mesh) => &static_mesh.mesh,
            NodeKind::SkinnedLimb(skinned) => &skinned.mesh,
        }
    }
    
    /// Static mesh data, if this is a head or torso
    pub fn as_static(&self) -> Option<&StaticMesh> {
        match &self.kind {
            NodeKind::StaticMesh(static_mesh) => Some(static_mesh),
            NodeKind::SkinnedLimb(_) => None,
        }
    }
    
    /// Skinned mesh data, if this is a limb
    pub fn as_skinned(&self) -> Option<&SkinnedMesh> {
        match &self.kind {
            NodeKind::SkinnedLimb(skinned) => Some(skinned),
            NodeKind::StaticMesh(_) => None,
        }
    }
}
