use std::time::Instant;

use crate::{
    capture::Source,
    config::CaptureConfig,
    error::{CaptureError, Result},
    video::types::Frame,
};

/// Seconds of frames produced when no frame cap is configured
pub const DEFAULT_DURATION_SECS: u32 = 5;

pub const BACKGROUND_COLOR: [u8; 3] = [30, 30, 30];
pub const BAR_COLOR: [u8; 3] = [200, 50, 50];

/// Built-in test-pattern source
///
/// Produces frames of a flat background with a vertical bar sweeping
/// left to right, driven by wall-clock time since construction. The bar
/// starts fully off-frame on the left and wraps after leaving on the right.
pub struct SyntheticSource {
    config: CaptureConfig,
    budget: usize,
    frame: usize,
    closed: bool,
    start: Instant,
}

impl SyntheticSource {
    /// Create a source whose frame budget is `max_frames`, or
    /// `fps * DEFAULT_DURATION_SECS` when `max_frames` is zero.
    pub fn new(config: CaptureConfig) -> Self {
        let budget = if config.max_frames > 0 {
            config.max_frames as usize
        } else {
            config.fps as usize * DEFAULT_DURATION_SECS as usize
        };

        Self {
            config,
            budget,
            frame: 0,
            closed: false,
            start: Instant::now(),
        }
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Total number of frames this source will produce
    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn frames_produced(&self) -> usize {
        self.frame
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Draw the pattern as it looks `elapsed_ms` after construction
    pub fn render_at(&self, elapsed_ms: u64) -> Frame {
        let CaptureConfig { width, height, .. } = self.config;
        let mut frame = Frame::new_filled(width, height, BACKGROUND_COLOR);

        let x = bar_offset(elapsed_ms, width);
        frame.fill_rect(x, 0, bar_width(width), height, BAR_COLOR);
        frame
    }
}

impl Source for SyntheticSource {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        if self.closed {
            return Err(CaptureError::Closed.into());
        }
        if self.frame >= self.budget {
            return Ok(None);
        }

        let frame = self.render_at(self.start.elapsed().as_millis() as u64);
        self.frame += 1;
        Ok(Some(frame))
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}

pub fn bar_width(width: u32) -> u32 {
    width / 8
}

/// Left edge of the bar after `elapsed_ms` milliseconds
///
/// Ranges over `-bar_width..width`, so the bar is partially or fully
/// outside the frame near both ends of its sweep.
pub fn bar_offset(elapsed_ms: u64, width: u32) -> i64 {
    let bar = u64::from(bar_width(width));
    let period = u64::from(width) + bar;
    if period == 0 {
        return 0;
    }
    (elapsed_ms % period) as i64 - bar as i64
}
