//! # Vision Pipeline
//!
//! Pull frames from a pluggable source, run them through a chain of
//! processors, count what comes out.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vision_pipeline::{capture::{self, CaptureOption}, Pipeline};
//!
//! let source = capture::open("", &[CaptureOption::Width(320), CaptureOption::Height(180)])?;
//! let frames = Pipeline::new().with_fps().with_edge_detector().run(source)?;
//! println!("processed {} frames", frames);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`capture`] - Frame sources, the scheme registry and [`capture::open`]
//! - [`pipeline`] - Processors, the processor registry and the [`Pipeline`] driver
//! - [`video`] - The [`Frame`](video::Frame) buffer type
//! - [`config`] - Capture options and TOML configuration
//!
//! ## Plugging In a Backend
//!
//! Backends register a factory for a URI scheme. Any URI with that scheme
//! passed to [`capture::open`] is then built by the factory:
//!
//! ```rust,no_run
//! use vision_pipeline::capture::{self, CaptureConfig, Source, SyntheticSource};
//! use vision_pipeline::Result;
//!
//! capture::register("camera", |_uri: &str, config: CaptureConfig| -> Result<Box<dyn Source>> {
//!     // Open the device here
//!     Ok(Box::new(SyntheticSource::new(config)))
//! });
//! ```

pub mod capture;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod video;

mod registry;

/// Crate version, following SemVer
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export commonly used types for convenience
pub use crate::{
    capture::{open, Source},
    config::{CaptureConfig, CaptureOption, Config},
    error::{Result, RunError, VisionError},
    pipeline::{Pipeline, Processor},
    video::Frame,
};
