//! Skin weights and linear blend skinning

use crate::core::LimbConfig;
use crate::foundation::math::{utils, Mat4, Vec3};
use crate::render::primitives::Mesh;
use super::skeleton::{Skeleton, BONE_COUNT};

/// Bone influences of one vertex
///
/// At most two bones influence a vertex and the weights sum to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkinWeight {
    /// Influencing bone indices
    pub indices: [u16; 2],
    /// Matching blend weights
    pub weights: [f32; 2],
}

impl SkinWeight {
    /// Weight a vertex entirely to one bone
    pub fn single(bone: u16) -> Self {
        Self {
            indices: [bone, bone],
            weights: [1.0, 0.0],
        }
    }
    
    /// Sum of the weights
    pub fn total(&self) -> f32 {
        self.weights[0] + self.weights[1]
    }
}

/// Compute skin weights for a limb cylinder
///
/// Each vertex's axial position is re-based so the limb's near end sits at
/// `y = 0`. With `segment = floor(y / h)` and `blend = (y mod h) / h` the vertex
/// is weighted `1 - blend` to bone `segment` and `blend` to bone `segment + 1`.
/// Vertices at or past the last bone are bound to it alone.
pub fn compute_skin_weights(mesh: &Mesh, config: &LimbConfig) -> Vec<SkinWeight> {
    let segment_height = config.segment_height;
    let half_height = config.height() / 2.0;
    let last = (BONE_COUNT - 1) as u16;
    
    mesh.vertices
        .iter()
        .map(|vertex| {
            let y = (vertex.position[1] + half_height).max(0.0);
            let segment = (y / segment_height).floor();
            if segment >= f32::from(last) {
                return SkinWeight::single(last);
            }
            
            let blend = utils::floor_mod(y, segment_height) / segment_height;
            // segment is in [0, last) here
            let segment = segment as u16;
            SkinWeight {
                indices: [segment, segment + 1],
                weights: [1.0 - blend, blend],
            }
        })
        .collect()
}

/// A mesh deformed by a bound skeleton
#[derive(Debug, Clone, PartialEq)]
pub struct SkinnedMesh {
    /// Undeformed geometry
    pub mesh: Mesh,
    /// One entry per vertex, fixed at construction
    pub weights: Vec<SkinWeight>,
    /// Bones driving the mesh
    pub skeleton: Skeleton,
    bind_matrix: Mat4,
    bind_matrix_inverse: Mat4,
}

impl SkinnedMesh {
    /// Pair a mesh with its weights and skeleton; call [`SkinnedMesh::bind`] before drawing
    pub fn new(mesh: Mesh, weights: Vec<SkinWeight>, skeleton: Skeleton) -> Self {
        debug_assert_eq!(mesh.vertices.len(), weights.len());
        Self {
            mesh,
            weights,
            skeleton,
            bind_matrix: Mat4::identity(),
            bind_matrix_inverse: Mat4::identity(),
        }
    }
    
    /// Bind the skeleton in its current pose
    ///
    /// `node_matrix` is the world matrix of the scene node that owns the mesh
    /// and hosts the root bone.
    pub fn bind(&mut self, node_matrix: &Mat4) {
        self.bind_matrix = *node_matrix;
        self.bind_matrix_inverse = node_matrix.try_inverse().unwrap_or_else(Mat4::identity);
        self.skeleton.calculate_inverses(node_matrix);
    }
    
    /// Matrix the mesh was bound with
    pub fn bind_matrix(&self) -> &Mat4 {
        &self.bind_matrix
    }
    
    /// Blend matrix of every bone, in mesh space
    fn blend_matrices(&self, node_matrix: &Mat4) -> [Mat4; BONE_COUNT] {
        self.skeleton
            .skinning_matrices(node_matrix)
            .map(|skin| self.bind_matrix_inverse * skin * self.bind_matrix)
    }
    
    fn blended(&self, matrices: &[Mat4; BONE_COUNT], weight: &SkinWeight) -> Mat4 {
        matrices[usize::from(weight.indices[0])] * weight.weights[0]
            + matrices[usize::from(weight.indices[1])] * weight.weights[1]
    }
    
    /// Vertex positions after skinning, in mesh space
    pub fn deformed_positions(&self, node_matrix: &Mat4) -> Vec<Vec3> {
        let matrices = self.blend_matrices(node_matrix);
        self.mesh
            .vertices
            .iter()
            .zip(&self.weights)
            .map(|(vertex, weight)| {
                let point = nalgebra::Point3::from(vertex.position);
                self.blended(&matrices, weight).transform_point(&point).coords
            })
            .collect()
    }
    
    /// Vertex positions and normals after skinning, in mesh space
    pub fn deformed_vertices(&self, node_matrix: &Mat4) -> Vec<(Vec3, Vec3)> {
        let matrices = self.blend_matrices(node_matrix);
        self.mesh
            .vertices
            .iter()
            .zip(&self.weights)
            .map(|(vertex, weight)| {
                let matrix = self.blended(&matrices, weight);
                let position = matrix.transform_point(&nalgebra::Point3::from(vertex.position)).coords;
                let normal = matrix.transform_vector(&Vec3::from(vertex.normal));
                (position, normal)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rig::limb_mesh;
    use approx::assert_relative_eq;

    #[test]
    fn test_weights_are_normalized_and_in_range() {
        let config = LimbConfig::default();
        let mesh = limb_mesh(&config);
        let weights = compute_skin_weights(&mesh, &config);
        
        assert_eq!(weights.len(), mesh.vertices.len());
        for weight in &weights {
            assert!((weight.total() - 1.0).abs() < 1e-6, "weights sum to {}", weight.total());
            assert!(weight.indices.iter().all(|&i| (i as usize) < BONE_COUNT));
            assert!(weight.weights.iter().all(|&w| (0.0..=1.0).contains(&w)));
        }
    }

    #[test]
    fn test_weights_follow_axial_position() {
        let config = LimbConfig::default();
        let mesh = limb_mesh(&config);
        let weights = compute_skin_weights(&mesh, &config);
        
        for (vertex, weight) in mesh.vertices.iter().zip(&weights) {
            let y = vertex.position[1] + config.height() / 2.0;
            if y < 1e-4 {
                // Near end: entirely on the proximal bone
                assert_eq!(weight.indices[0], 0);
                assert_relative_eq!(weight.weights[0], 1.0, epsilon = 1e-5);
            } else if (y - config.height()).abs() < 1e-4 {
                assert_eq!(weight, &SkinWeight::single(2));
            }
        }
    }

    #[test]
    fn test_midpoint_of_first_segment_blends_evenly() {
        let config = LimbConfig::default();
        let y = config.segment_height / 2.0 - config.height() / 2.0;
        let mesh = Mesh::new(vec![crate::render::Vertex::new([0.0, y, 5.0], [0.0, 0.0, 1.0], [0.0, 0.0])], vec![]);
        let weights = compute_skin_weights(&mesh, &config);
        
        assert_eq!(weights[0].indices, [0, 1]);
        assert_relative_eq!(weights[0].weights[0], 0.5, epsilon = 1e-6);
        assert_relative_eq!(weights[0].weights[1], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_vertices_past_last_bone_clamp() {
        let config = LimbConfig::default();
        let y = config.height();
        let mesh = Mesh::new(vec![crate::render::Vertex::new([0.0, y, 5.0], [0.0, 0.0, 1.0], [0.0, 0.0])], vec![]);
        let weights = compute_skin_weights(&mesh, &config);
        assert_eq!(weights[0], SkinWeight::single(2));
    }

    #[test]
    fn test_moving_distal_bone_moves_only_weighted_vertices() {
        let config = LimbConfig::default();
        let mesh = limb_mesh(&config);
        let weights = compute_skin_weights(&mesh, &config);
        let joints = [Vec3::zeros(), Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, 20.0, 0.0)];
        let mut skinned = SkinnedMesh::new(mesh, weights, Skeleton::chain(joints));
        let node = Mat4::identity();
        skinned.bind(&node);
        
        skinned.skeleton.set_positions([joints[0], joints[1], Vec3::new(7.0, 20.0, 0.0)]);
        let deformed = skinned.deformed_positions(&node);
        
        for ((vertex, weight), position) in skinned.mesh.vertices.iter().zip(&skinned.weights).zip(&deformed) {
            let bone2: f32 = weight
                .indices
                .iter()
                .zip(weight.weights)
                .filter(|(i, _)| **i == 2)
                .map(|(_, w)| w)
                .sum();
            assert_relative_eq!(position.x - vertex.position[0], 7.0 * bone2, epsilon = 1e-4);
        }
    }
}
