//! Scene renderer
//!
//! The renderer is stateless apart from the surface it presents to: every call
//! to [`Renderer::render`] rebuilds the frame from the scene, camera and
//! lighting it is given.

use crate::core::RendererConfig;
use crate::foundation::math::{Mat4, Vec3, Vec4};
use crate::scene::{NodeKind, Scene, SceneNode};
use super::lighting::LightingEnvironment;
use super::primitives::Camera;
use super::surface::RenderSurface;
use super::RenderResult;

/// A projected, shaded vertex ready for rasterization
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawVertex {
    /// Clip-space position (before the perspective divide)
    pub clip_position: [f32; 4],
    /// Lit colour with alpha
    pub color: [f32; 4],
}

/// Draw data of one scene node
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    /// Label of the node
    pub label: String,
    /// Projected vertices
    pub vertices: Vec<DrawVertex>,
    /// Triangle list indices into `vertices`
    pub indices: Vec<u32>,
}

impl DrawItem {
    /// Vertex data as raw bytes for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
    
    /// Index data as raw bytes for upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Everything a surface needs to show one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    /// Sequence number, starting at 1
    pub number: u64,
    /// Physical width
    pub width: u32,
    /// Physical height
    pub height: u32,
    /// Background colour with alpha
    pub clear_color: [f32; 4],
    /// One item per visible node
    pub items: Vec<DrawItem>,
}

impl RenderFrame {
    /// Find the draw item of a labelled node
    pub fn item(&self, label: &str) -> Option<&DrawItem> {
        self.items.iter().find(|item| item.label == label)
    }
    
    /// Total triangles in the frame
    pub fn triangle_count(&self) -> usize {
        self.items.iter().map(|item| item.indices.len() / 3).sum()
    }
}

/// Draws a scene to a [`RenderSurface`]
pub struct Renderer {
    surface: Box<dyn RenderSurface>,
    config: RendererConfig,
    frame_count: u64,
}

impl Renderer {
    /// Wrap an output surface
    pub fn new(surface: Box<dyn RenderSurface>, config: RendererConfig) -> Self {
        Self {
            surface,
            config,
            frame_count: 0,
        }
    }
    
    /// Resize the output surface; `width` and `height` are logical pixels
    pub fn set_size(&mut self, width: u32, height: u32) {
        let physical = |logical: u32| (logical as f32 * self.config.pixel_ratio).round() as u32;
        let (physical_width, physical_height) = (physical(width), physical(height));
        self.surface.set_size(physical_width, physical_height);
        log::debug!(
            "Surface resized to {}x{} ({}x{} physical)",
            width, height, physical_width, physical_height
        );
    }
    
    /// The output surface
    pub fn surface(&self) -> &dyn RenderSurface {
        self.surface.as_ref()
    }
    
    /// Frames rendered so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
    
    /// Draw the scene and present it
    pub fn render(&mut self, scene: &Scene, camera: &Camera, lighting: &LightingEnvironment) -> RenderResult<()> {
        let view_projection = camera.get_view_projection_matrix();
        let items: Vec<DrawItem> = scene
            .iter()
            .filter(|(_, node)| node.visible)
            .map(|(_, node)| draw_node(node, &view_projection, lighting))
            .collect();
        
        let (width, height) = self.surface.size();
        let alpha = if self.config.transparent { 0.0 } else { 1.0 };
        let frame = RenderFrame {
            number: self.frame_count + 1,
            width,
            height,
            clear_color: [0.0, 0.0, 0.0, alpha],
            items,
        };
        
        log::trace!(
            "Rendering frame {}: {} items, {} triangles",
            frame.number,
            frame.items.len(),
            frame.triangle_count()
        );
        self.surface.present(frame)?;
        self.frame_count += 1;
        Ok(())
    }
}

fn draw_node(node: &SceneNode, view_projection: &Mat4, lighting: &LightingEnvironment) -> DrawItem {
    let model = node.world_matrix();
    let normal_matrix = model.try_inverse().map_or_else(Mat4::identity, |inverse| inverse.transpose());
    
    // Mesh-space positions and normals, skinned for limbs
    let local: Vec<(Vec3, Vec3)> = match &node.kind {
        NodeKind::StaticMesh(static_mesh) => static_mesh
            .mesh
            .vertices
            .iter()
            .map(|vertex| (Vec3::from(vertex.position), Vec3::from(vertex.normal)))
            .collect(),
        NodeKind::SkinnedLimb(skinned) => skinned.deformed_vertices(&model),
    };
    
    let albedo = node.material.base_color;
    let vertices = local
        .into_iter()
        .map(|(position, normal)| {
            let world = model * Vec4::new(position.x, position.y, position.z, 1.0);
            let world_normal = normal_matrix.transform_vector(&normal);
            let lit = lighting.shade(world.xyz(), world_normal, albedo);
            let clip = view_projection * world;
            DrawVertex {
                clip_position: [clip.x, clip.y, clip.z, clip.w],
                color: [lit.x, lit.y, lit.z, node.material.alpha],
            }
        })
        .collect();
    
    DrawItem {
        label: node.label.clone(),
        vertices,
        indices: node.mesh().indices.clone(),
    }
}
