//! # Body
//!
//! The per-instance facade: owns the scene, camera, lights, component registry
//! and renderer, and turns each incoming pose frame into one rendered frame.
//!
//! ```no_run
//! use body_engine::prelude::*;
//!
//! # fn run(frames: Vec<PoseFrame>) -> BodyResult<()> {
//! let mut body = Body::new(HeadlessSurface::new(800, 600), BodyConfig::default())?;
//! for frame in &frames {
//!     body.update(frame)?;
//! }
//! body.handle_resize(1024, 768)?;
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

use crate::config::ConfigError;
use crate::core::BodyConfig;
use crate::pose::{FrameParams, PoseError, PoseFrame};
use crate::render::{Camera, LightingEnvironment, RenderError, RenderSurface, Renderer};
use crate::scene::geometry::{self, GeometryError};
use crate::scene::{BodyPart, ComponentRegistry, PartParams, Resolution, Scene, SceneNode};

/// Errors surfaced by [`Body`]
#[derive(Error, Debug)]
pub enum BodyError {
    /// The pose frame is incomplete
    #[error(transparent)]
    Pose(#[from] PoseError),

    /// Derived parameters would produce degenerate geometry
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Drawing or presenting failed
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The configuration is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for [`Body`] operations
pub type BodyResult<T> = Result<T, BodyError>;

/// Which path each part took during one [`Body::update`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    resolutions: Vec<(BodyPart, Resolution)>,
}

impl UpdateReport {
    /// Resolution of `part`
    pub fn resolution(&self, part: BodyPart) -> Option<Resolution> {
        self.resolutions
            .iter()
            .find(|(resolved, _)| *resolved == part)
            .map(|(_, resolution)| *resolution)
    }

    /// Resolutions in the order they were applied
    pub fn iter(&self) -> impl Iterator<Item = &(BodyPart, Resolution)> {
        self.resolutions.iter()
    }

    /// Number of parts that got a new node
    pub fn created(&self) -> usize {
        self.resolutions.iter().filter(|(_, resolution)| resolution.is_created()).count()
    }

    /// Number of parts mutated in place
    pub fn updated(&self) -> usize {
        self.resolutions.len() - self.created()
    }
}

/// A rendered body driven by pose frames
pub struct Body {
    scene: Scene,
    camera: Camera,
    lighting: LightingEnvironment,
    registry: ComponentRegistry,
    renderer: Renderer,
    config: BodyConfig,
}

impl Body {
    /// Set up the scene, camera, lights and renderer on `surface`
    ///
    /// The camera aspect is taken from the surface size. If the surface has a
    /// non-zero size the empty scene is rendered once.
    pub fn new(surface: impl RenderSurface + 'static, config: BodyConfig) -> BodyResult<Self> {
        config.validate()?;

        let (width, height) = surface.size();
        let mut renderer = Renderer::new(Box::new(surface), config.renderer.clone());
        let camera = Camera::from_config(&config.camera, aspect_ratio(width, height));
        let lighting = LightingEnvironment::from_config(&config.lighting);
        let registry = ComponentRegistry::new(&config);
        let scene = Scene::new();

        if width > 0 && height > 0 {
            renderer.render(&scene, &camera, &lighting)?;
        }

        log::info!(
            "Body ready: {}x{} surface, {} point lights, torso policy {:?}",
            width,
            height,
            lighting.lights.len(),
            config.torso_policy
        );

        Ok(Self {
            scene,
            camera,
            lighting,
            registry,
            renderer,
            config,
        })
    }

    /// Apply one pose frame and render it
    ///
    /// Either every part is resolved and the frame is presented, or the scene
    /// and registry are left exactly as they were. Parameters are derived and
    /// checked before the scene is touched. If presenting fails afterwards the
    /// resolved parts are rolled back. Parts are resolved in the order of
    /// [`BodyPart::ALL`], then the scene is rendered exactly once.
    pub fn update(&mut self, frame: &PoseFrame) -> BodyResult<UpdateReport> {
        let plan = self.plan(frame).map_err(|err| {
            log::debug!("Rejected pose frame: {}", err);
            err
        })?;

        let scene = self.scene.clone();
        let registry = self.registry.clone();
        match self.apply(plan) {
            Ok(resolutions) => Ok(UpdateReport { resolutions }),
            Err(err) => {
                log::warn!("Frame update failed, restoring previous scene: {}", err);
                self.scene = scene;
                self.registry = registry;
                Err(err)
            }
        }
    }

    /// Resolve every part, then present
    fn apply(&mut self, plan: [PartParams; 6]) -> BodyResult<Vec<(BodyPart, Resolution)>> {
        let mut resolutions = Vec::with_capacity(plan.len());
        for params in plan {
            let resolution = self.registry.resolve(&mut self.scene, params)?;
            resolutions.push((params.part(), resolution));
        }

        self.render()?;
        Ok(resolutions)
    }

    /// Derive and validate the parameters of every part
    fn plan(&self, frame: &PoseFrame) -> BodyResult<[PartParams; 6]> {
        let (width, height) = self.renderer.surface().size();
        if width == 0 || height == 0 {
            return Err(RenderError::RenderingFailed(format!(
                "cannot update a body on a {}x{} surface",
                width, height
            ))
            .into());
        }

        let params = FrameParams::derive(frame)?;
        let torso = geometry::torso_shape(&params.torso, &self.config.geometry, self.config.handedness)?;
        geometry::head_radius(&params.head)?;

        Ok([
            PartParams::Torso(torso),
            PartParams::Head(params.head),
            PartParams::Limb(BodyPart::LeftArm, params.left_arm),
            PartParams::Limb(BodyPart::RightArm, params.right_arm),
            PartParams::Limb(BodyPart::LeftLeg, params.left_leg),
            PartParams::Limb(BodyPart::RightLeg, params.right_leg),
        ])
    }

    /// Follow a change of the output surface size
    ///
    /// `width` and `height` are logical pixels. Only the camera and the surface
    /// change; a zero-sized surface is resized but not drawn.
    pub fn handle_resize(&mut self, width: u32, height: u32) -> BodyResult<()> {
        self.camera.set_aspect_ratio(aspect_ratio(width, height));
        self.renderer.set_size(width, height);

        if width == 0 || height == 0 {
            log::debug!("Surface collapsed to {}x{}, skipping render", width, height);
            return Ok(());
        }
        self.render()
    }

    /// Draw the current scene
    pub fn render(&mut self) -> BodyResult<()> {
        self.renderer.render(&self.scene, &self.camera, &self.lighting)?;
        Ok(())
    }

    /// Remove every component from the scene and empty the registry
    ///
    /// Returns the number of scene nodes removed. The body stays usable; the
    /// next update builds every part again.
    pub fn teardown(&mut self) -> usize {
        self.registry.teardown(&mut self.scene)
    }

    /// The scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The lights
    pub fn lighting(&self) -> &LightingEnvironment {
        &self.lighting
    }

    /// The component registry
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// The renderer and its surface
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// The configuration the body was built with
    pub fn config(&self) -> &BodyConfig {
        &self.config
    }

    /// Scene node currently registered for `part`
    pub fn component(&self, part: BodyPart) -> Option<&SceneNode> {
        self.registry.get(part).and_then(|key| self.scene.get(key))
    }

    /// Frames rendered so far
    pub fn frame_count(&self) -> u64 {
        self.renderer.frame_count()
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}
