//! Built-in processors.
//!
//! Both are placeholders: they pass frames through untouched and never
//! fail. Real implementations must keep the same [`Processor`] shape.

use crate::{
    error::Result,
    pipeline::Processor,
    video::types::Frame,
};

pub const EDGE: &str = "edge";
pub const FPS: &str = "fps";

/// Edge detector (placeholder)
#[derive(Debug, Default)]
pub struct EdgeDetector;

impl EdgeDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Processor for EdgeDetector {
    fn name(&self) -> &str {
        EDGE
    }

    fn process(&mut self, frame: Frame) -> Result<Frame> {
        Ok(frame)
    }
}

/// Frame-rate overlay (placeholder)
#[derive(Debug, Default)]
pub struct FpsOverlay;

impl FpsOverlay {
    pub fn new() -> Self {
        Self
    }
}

impl Processor for FpsOverlay {
    fn name(&self) -> &str {
        FPS
    }

    fn process(&mut self, frame: Frame) -> Result<Frame> {
        Ok(frame)
    }
}
