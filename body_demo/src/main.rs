//! Body demo application
//!
//! Drives a body on a headless surface with a synthetic swaying pose and logs
//! what every frame did to the scene. Pass a `.toml` or `.ron` file to
//! override the default configuration.

use body_engine::prelude::*;
use body_engine::foundation::math::constants::TAU;

const FRAMES: u32 = 120;
const RESIZE_AT: u32 = 60;

/// Demo state
pub struct DemoApp {
    body: Body,
    frame_index: u32,
}

impl DemoApp {
    /// Build the body on an 800x600 headless surface
    pub fn new(config: BodyConfig) -> Result<Self, BodyError> {
        log::info!("Creating body demo...");
        let body = Body::new(HeadlessSurface::new(800, 600), config)?;
        Ok(Self { body, frame_index: 0 })
    }
    
    /// Synthetic pose for the current frame: arms wave, hips sway
    fn pose(&self) -> PoseFrame {
        let phase = self.frame_index as f32 / FRAMES as f32 * TAU;
        let sway = 20.0 * phase.sin();
        let wave = 60.0 * (2.0 * phase).sin();
        
        PoseFrame::new()
            .with_point(LandmarkName::Nose, sway, 260.0)
            .with_point(LandmarkName::LeftEye, sway - 8.0, 268.0)
            .with_point(LandmarkName::RightEye, sway + 8.0, 268.0)
            .with_point(LandmarkName::LeftEar, sway - 20.0, 262.0)
            .with_point(LandmarkName::RightEar, sway + 20.0 + 0.2 * wave, 262.0)
            .with_point(LandmarkName::LeftShoulder, -50.0 + sway, 200.0)
            .with_point(LandmarkName::RightShoulder, 50.0 + sway, 200.0)
            .with_point(LandmarkName::LeftElbow, -90.0 + sway, 150.0 + wave)
            .with_point(LandmarkName::RightElbow, 90.0 + sway, 150.0 - wave)
            .with_point(LandmarkName::LeftWrist, -110.0 + sway, 100.0 + 2.0 * wave)
            .with_point(LandmarkName::RightWrist, 110.0 + sway, 100.0 - 2.0 * wave)
            .with_point(LandmarkName::LeftHip, -40.0 + 0.5 * sway, 0.0)
            .with_point(LandmarkName::RightHip, 40.0 + 0.5 * sway, 0.0)
            .with_point(LandmarkName::LeftKnee, -45.0, -100.0)
            .with_point(LandmarkName::RightKnee, 45.0, -100.0)
            .with_point(LandmarkName::LeftAnkle, -45.0, -200.0)
            .with_point(LandmarkName::RightAnkle, 45.0, -200.0)
    }
    
    /// Run the frame loop
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        while self.frame_index < FRAMES {
            if self.frame_index == RESIZE_AT {
                log::info!("Resizing surface to 1280x720");
                self.body.handle_resize(1280, 720)?;
            }
            
            let frame = self.pose();
            match self.body.update(&frame) {
                Ok(report) => log::debug!(
                    "Frame {}: {} created, {} updated, {} scene nodes",
                    self.frame_index,
                    report.created(),
                    report.updated(),
                    self.body.scene().len()
                ),
                // A bad frame is skipped; the scene keeps the last good pose
                Err(err @ (BodyError::Pose(_) | BodyError::Geometry(_))) => {
                    log::warn!("Frame {} skipped: {}", self.frame_index, err);
                }
                Err(err) => return Err(err.into()),
            }
            
            self.frame_index += 1;
        }
        
        self.report();
        Ok(())
    }
    
    fn report(&self) {
        let surface = self.body.renderer().surface();
        if let Some(headless) = surface.as_any().downcast_ref::<HeadlessSurface>() {
            if let Some(frame) = headless.last_frame() {
                log::info!(
                    "Last frame #{}: {}x{}, {} draw items, {} triangles",
                    frame.number,
                    frame.width,
                    frame.height,
                    frame.items.len(),
                    frame.triangle_count()
                );
            }
        }
        log::info!(
            "Rendered {} frames, {} components, {} retired torsos",
            self.body.frame_count(),
            self.body.registry().len(),
            self.body.registry().retired().len()
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => BodyConfig::load_from_file(&path)?,
        None => BodyConfig::default(),
    };
    
    body_engine::foundation::logging::init_with_level(&config.engine.log_level);
    log::info!("Starting body demo");
    
    let mut app = DemoApp::new(config)?;
    app.run()?;
    
    let removed = app.body.teardown();
    log::info!("Teardown removed {} nodes", removed);
    Ok(())
}
