//! Mesh representation for procedural body geometry
//!
//! Every body part is built from two parametric primitives: a UV sphere for
//! the head and a (possibly tapered) cylinder for the torso and limbs. Both are
//! centred on the origin with Y up, so callers position them through the
//! owning scene node's transform.
//!
//! Vertex order is row-major from the top: row `0` is the `+Y` end of the
//! primitive. The skinning builder relies on vertex positions only, never on
//! this ordering.

use crate::foundation::math::constants::{PI, TAU};

/// 3D vertex data structure for rendering
///
/// The `#[repr(C)]` attribute keeps a stable layout so vertex slices can be
/// handed to a surface as raw bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in 3D space
    pub position: [f32; 3],
    
    /// Normal vector
    pub normal: [f32; 3],
    
    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Cylinder construction parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderParams {
    /// Radius at the `+Y` end
    pub radius_top: f32,
    /// Radius at the `-Y` end
    pub radius_bottom: f32,
    /// Length along Y
    pub height: f32,
    /// Subdivisions around the axis
    pub radial_segments: u32,
    /// Subdivisions along the axis
    pub height_segments: u32,
    /// Omit the end caps
    pub open_ended: bool,
}

impl CylinderParams {
    /// Single-ring tapered cylinder with caps
    pub fn tapered(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        Self {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
            height_segments: 1,
            open_ended: false,
        }
    }
}

/// 3D mesh containing vertices and indices for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,
    
    /// Index data for triangles
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new mesh
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }
    
    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
    
    /// Create a UV sphere
    ///
    /// Generates `(width_segments + 1) * (height_segments + 1)` vertices; the
    /// seam column and the pole rows are duplicated so texture coordinates stay
    /// continuous. Degenerate pole triangles are skipped.
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);
        let row = width_segments + 1;
        
        let mut vertices = Vec::with_capacity((row * (height_segments + 1)) as usize);
        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let theta = v * PI;
            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let phi = u * TAU;
                let normal = [
                    -phi.cos() * theta.sin(),
                    theta.cos(),
                    phi.sin() * theta.sin(),
                ];
                let position = [normal[0] * radius, normal[1] * radius, normal[2] * radius];
                vertices.push(Vertex::new(position, normal, [u, 1.0 - v]));
            }
        }
        
        let mut indices = Vec::new();
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;
                
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }
        
        Self::new(vertices, indices)
    }
    
    /// Create a cylinder, optionally tapered and capped
    ///
    /// The side surface linearly interpolates the radius from `radius_top` at
    /// `y = height / 2` to `radius_bottom` at `y = -height / 2`.
    pub fn cylinder(params: CylinderParams) -> Self {
        let CylinderParams {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
            height_segments,
            open_ended,
        } = params;
        let radial_segments = radial_segments.max(3);
        let height_segments = height_segments.max(1);
        let half_height = height / 2.0;
        let row = radial_segments + 1;
        
        // Normal tilt for tapered sides
        let slope = if height > 0.0 { (radius_bottom - radius_top) / height } else { 0.0 };
        
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        
        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let radius = v * (radius_bottom - radius_top) + radius_top;
            let y = -v * height + half_height;
            for ix in 0..=radial_segments {
                let u = ix as f32 / radial_segments as f32;
                let (sin, cos) = (u * TAU).sin_cos();
                let normal = normalize([sin, slope, cos]);
                vertices.push(Vertex::new([radius * sin, y, radius * cos], normal, [u, 1.0 - v]));
            }
        }
        
        for iy in 0..height_segments {
            for ix in 0..radial_segments {
                let a = iy * row + ix;
                let b = (iy + 1) * row + ix;
                let c = (iy + 1) * row + ix + 1;
                let d = iy * row + ix + 1;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        
        if !open_ended {
            if radius_top > 0.0 {
                push_cap(&mut vertices, &mut indices, radius_top, half_height, radial_segments, true);
            }
            if radius_bottom > 0.0 {
                push_cap(&mut vertices, &mut indices, radius_bottom, -half_height, radial_segments, false);
            }
        }
        
        Self::new(vertices, indices)
    }
}

fn push_cap(
    vertices: &mut Vec<Vertex>,
    indices: &mut Vec<u32>,
    radius: f32,
    y: f32,
    radial_segments: u32,
    top: bool,
) {
    let sign = if top { 1.0 } else { -1.0 };
    let center = vertices.len() as u32;
    vertices.push(Vertex::new([0.0, y, 0.0], [0.0, sign, 0.0], [0.5, 0.5]));
    
    for ix in 0..=radial_segments {
        let u = ix as f32 / radial_segments as f32;
        let (sin, cos) = (u * TAU).sin_cos();
        vertices.push(Vertex::new(
            [radius * sin, y, radius * cos],
            [0.0, sign, 0.0],
            [cos * 0.5 + 0.5, sin * 0.5 * sign + 0.5],
        ));
    }
    
    for ix in 0..radial_segments {
        let current = center + 1 + ix;
        let next = current + 1;
        // Counter-clockwise seen from outside the cap
        if top {
            indices.extend_from_slice(&[center, current, next]);
        } else {
            indices.extend_from_slice(&[center, next, current]);
        }
    }
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if length > 0.0 {
        [v[0] / length, v[1] / length, v[2] / length]
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_indices_in_bounds(mesh: &Mesh) {
        for &idx in &mesh.indices {
            assert!((idx as usize) < mesh.vertices.len(), "Index {} is out of bounds", idx);
        }
        assert_eq!(mesh.indices.len() % 3, 0, "Indices must form whole triangles");
    }

    #[test]
    fn test_sphere_structure() {
        let sphere = Mesh::sphere(20.0, 32, 32);
        assert_eq!(sphere.vertices.len(), 33 * 33);
        // Pole rows contribute one triangle per segment, the rest two
        assert_eq!(sphere.triangle_count(), 32 * 2 * 32 - 2 * 32);
        assert_indices_in_bounds(&sphere);
    }

    #[test]
    fn test_sphere_vertices_lie_on_radius() {
        let sphere = Mesh::sphere(20.0, 16, 8);
        for vertex in &sphere.vertices {
            let p = vertex.position;
            let distance = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert_relative_eq!(distance, 20.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_tapered_cylinder_radii() {
        let cylinder = Mesh::cylinder(CylinderParams::tapered(100.0, 80.0, 200.0, 32));
        assert_indices_in_bounds(&cylinder);
        
        let top = cylinder.vertices[0].position;
        assert_relative_eq!(top[1], 100.0);
        assert_relative_eq!((top[0] * top[0] + top[2] * top[2]).sqrt(), 100.0, epsilon = 1e-3);
        
        let bottom = cylinder.vertices[33].position;
        assert_relative_eq!(bottom[1], -100.0);
        assert_relative_eq!((bottom[0] * bottom[0] + bottom[2] * bottom[2]).sqrt(), 80.0, epsilon = 1e-3);
    }

    #[test]
    fn test_open_cylinder_has_no_caps() {
        let params = CylinderParams {
            radius_top: 5.0,
            radius_bottom: 5.0,
            height: 5.0,
            radial_segments: 5,
            height_segments: 15,
            open_ended: true,
        };
        let open = Mesh::cylinder(params);
        assert_eq!(open.vertices.len(), 16 * 6);
        assert_eq!(open.triangle_count(), 15 * 5 * 2);
        
        let capped = Mesh::cylinder(CylinderParams { open_ended: false, ..params });
        assert_eq!(capped.vertices.len(), 16 * 6 + 2 * 7);
        assert_eq!(capped.triangle_count(), 15 * 5 * 2 + 2 * 5);
        assert_indices_in_bounds(&capped);
    }

    #[test]
    fn test_vertex_is_plain_bytes() {
        let mesh = Mesh::sphere(1.0, 3, 2);
        let bytes: &[u8] = bytemuck::cast_slice(&mesh.vertices);
        assert_eq!(bytes.len(), mesh.vertices.len() * std::mem::size_of::<Vertex>());
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
    }
}
