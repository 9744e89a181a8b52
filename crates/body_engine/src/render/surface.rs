//! Output surfaces
//!
//! A surface receives finished frames. Window-system backends implement
//! [`RenderSurface`] to upload and present; [`HeadlessSurface`] keeps frames in
//! memory for tests and offline runs.

use std::any::Any;

use super::{RenderError, RenderFrame, RenderResult};

/// Destination of rendered frames
pub trait RenderSurface {
    /// Current size in physical pixels
    fn size(&self) -> (u32, u32);
    
    /// Resize the surface, in physical pixels
    fn set_size(&mut self, width: u32, height: u32);
    
    /// Present a finished frame
    fn present(&mut self, frame: RenderFrame) -> RenderResult<()>;
    
    /// Downcast to the concrete surface type
    fn as_any(&self) -> &dyn Any;
}

/// In-memory surface that records the most recent frame
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    width: u32,
    height: u32,
    last_frame: Option<RenderFrame>,
    presented: u64,
}

impl HeadlessSurface {
    /// Create a surface of the given physical size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            last_frame: None,
            presented: 0,
        }
    }
    
    /// Most recently presented frame
    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }
    
    /// Number of frames presented so far
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl RenderSurface for HeadlessSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
    
    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
    
    fn present(&mut self, frame: RenderFrame) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::RenderingFailed(format!(
                "cannot present to a {}x{} surface",
                self.width, self.height
            )));
        }
        self.presented += 1;
        self.last_frame = Some(frame);
        Ok(())
    }
    
    fn as_any(&self) -> &dyn Any {
        self
    }
}
