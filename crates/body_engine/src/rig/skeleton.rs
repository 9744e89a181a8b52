//! Bone chains stored as an index arena
//!
//! A limb skeleton is exactly three bones: `0` proximal, `1` mid, `2` distal.
//! Each bone names its parent by index and parents always precede children,
//! so world matrices resolve in a single forward pass.

use crate::foundation::math::{Mat4, Vec3};

/// Number of bones in every limb skeleton
pub const BONE_COUNT: usize = 3;

/// A single bone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bone {
    /// Translation relative to the parent's frame
    ///
    /// Limb builders store the joint's absolute landmark position here, not the
    /// offset from the parent joint. Deformation is measured against the bind
    /// pose, so this only matters once bones move.
    pub local_offset: Vec3,
    /// Index of the parent bone; `None` for the root
    pub parent: Option<usize>,
}

impl Bone {
    fn local_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.local_offset)
    }
}

/// Three-bone limb skeleton with its inverse bind matrices
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    bones: [Bone; BONE_COUNT],
    bone_inverses: [Mat4; BONE_COUNT],
}

impl Skeleton {
    /// Chain three joints proximal → mid → distal
    pub fn chain(joints: [Vec3; BONE_COUNT]) -> Self {
        let bones = std::array::from_fn(|i| Bone {
            local_offset: joints[i],
            parent: i.checked_sub(1),
        });
        
        Self {
            bones,
            bone_inverses: [Mat4::identity(); BONE_COUNT],
        }
    }
    
    /// Bones in chain order
    pub fn bones(&self) -> &[Bone; BONE_COUNT] {
        &self.bones
    }
    
    /// Number of bones, always [`BONE_COUNT`]
    pub const fn len(&self) -> usize {
        BONE_COUNT
    }
    
    /// A skeleton is never empty
    pub const fn is_empty(&self) -> bool {
        false
    }
    
    /// Index of the root bone
    pub const fn root(&self) -> usize {
        0
    }
    
    /// Move the bones to new joint positions
    ///
    /// Parents and inverse bind matrices stay untouched.
    pub fn set_positions(&mut self, joints: [Vec3; BONE_COUNT]) {
        for (bone, joint) in self.bones.iter_mut().zip(joints) {
            bone.local_offset = joint;
        }
    }
    
    /// World matrix of every bone given the matrix of the node the root hangs from
    pub fn world_matrices(&self, root: &Mat4) -> [Mat4; BONE_COUNT] {
        let mut world = [Mat4::identity(); BONE_COUNT];
        for (i, bone) in self.bones.iter().enumerate() {
            let parent = bone.parent.map_or(*root, |p| world[p]);
            world[i] = parent * bone.local_matrix();
        }
        world
    }
    
    /// Record the current pose as the bind pose
    pub fn calculate_inverses(&mut self, root: &Mat4) {
        let world = self.world_matrices(root);
        for (inverse, matrix) in self.bone_inverses.iter_mut().zip(world) {
            // Bone matrices are pure translations, always invertible
            *inverse = matrix.try_inverse().unwrap_or_else(Mat4::identity);
        }
    }
    
    /// Inverse bind matrices
    pub fn bone_inverses(&self) -> &[Mat4; BONE_COUNT] {
        &self.bone_inverses
    }
    
    /// Per-bone skinning matrices: current world × inverse bind
    pub fn skinning_matrices(&self, root: &Mat4) -> [Mat4; BONE_COUNT] {
        let world = self.world_matrices(root);
        std::array::from_fn(|i| world[i] * self.bone_inverses[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn joints() -> [Vec3; BONE_COUNT] {
        [
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(20.0, 0.0, 0.0),
            Vec3::new(30.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_chain_parents() {
        let skeleton = Skeleton::chain(joints());
        let parents: Vec<_> = skeleton.bones().iter().map(|b| b.parent).collect();
        assert_eq!(parents, vec![None, Some(0), Some(1)]);
        assert_eq!(skeleton.root(), 0);
    }

    #[test]
    fn test_world_matrices_accumulate_offsets() {
        let skeleton = Skeleton::chain(joints());
        let world = skeleton.world_matrices(&Mat4::identity());
        assert_relative_eq!(world[2].column(3).xyz(), Vec3::new(60.0, 0.0, 0.0));
    }

    #[test]
    fn test_bind_pose_skinning_is_identity() {
        let root = Mat4::new_translation(&Vec3::new(5.0, 5.0, 0.0));
        let mut skeleton = Skeleton::chain(joints());
        skeleton.calculate_inverses(&root);
        for matrix in skeleton.skinning_matrices(&root) {
            assert_relative_eq!(matrix, Mat4::identity(), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_set_positions_moves_only_offsets() {
        let mut skeleton = Skeleton::chain(joints());
        skeleton.calculate_inverses(&Mat4::identity());
        let inverses = *skeleton.bone_inverses();
        
        skeleton.set_positions([Vec3::new(11.0, 0.0, 0.0), Vec3::new(20.0, 1.0, 0.0), Vec3::zeros()]);
        assert_eq!(skeleton.bones()[0].local_offset, Vec3::new(11.0, 0.0, 0.0));
        assert_eq!(skeleton.bones()[2].parent, Some(1));
        assert_eq!(*skeleton.bone_inverses(), inverses);
        
        let skin = skeleton.skinning_matrices(&Mat4::identity());
        assert_relative_eq!(skin[0].column(3).xyz(), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-5);
    }
}
