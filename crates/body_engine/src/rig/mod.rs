//! # Procedural Rigging
//!
//! Builds skinned limbs from three joint positions: a canonical cylinder mesh,
//! per-vertex skin weights along its axis, and a three-bone chain bound to it.
//!
//! Weights and bind matrices are computed once when a limb is built. Later
//! frames only move bones, see [`Skeleton::set_positions`].

pub mod skeleton;
pub mod skinning;

pub use skeleton::{Bone, Skeleton, BONE_COUNT};
pub use skinning::{SkinWeight, SkinnedMesh, compute_skin_weights};

use crate::core::LimbConfig;
use crate::foundation::math::Transform;
use crate::pose::LimbParams;
use crate::render::primitives::{CylinderParams, Mesh};

/// Build the canonical limb cylinder described by `config`
pub fn limb_mesh(config: &LimbConfig) -> Mesh {
    Mesh::cylinder(CylinderParams {
        radius_top: config.radius,
        radius_bottom: config.radius,
        height: config.height(),
        radial_segments: config.radial_segments,
        height_segments: config.height_segments,
        open_ended: config.open_ended,
    })
}

/// Build and bind a skinned limb
///
/// Returns the skinned mesh together with the transform of the scene node that
/// owns it. The node sits at the proximal joint and the skeleton is bound in
/// that pose, so the freshly built limb renders undeformed.
pub fn build_limb(joints: &LimbParams, config: &LimbConfig) -> (SkinnedMesh, Transform) {
    let mesh = limb_mesh(config);
    let weights = compute_skin_weights(&mesh, config);
    let skeleton = Skeleton::chain(joints.joints());
    
    let transform = Transform::from_position(joints.near);
    let mut skinned = SkinnedMesh::new(mesh, weights, skeleton);
    skinned.bind(&transform.to_matrix());
    
    log::debug!(
        "Built limb rig: {} vertices, {} bones, root at {:?}",
        skinned.mesh.vertices.len(),
        skinned.skeleton.len(),
        joints.near
    );
    
    (skinned, transform)
}
