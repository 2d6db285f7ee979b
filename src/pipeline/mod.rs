//! # Processing Pipeline
//!
//! A [`Pipeline`] pulls frames from a [`Source`](crate::capture::Source),
//! runs each frame through an ordered chain of [`Processor`]s and counts the
//! frames that made it through.
//!
//! Processors are registered by name in a process-wide registry so that
//! heavier implementations (GPU, ML inference) can live in other crates and
//! plug in at startup.
//!
//! ## Built-in Processors
//!
//! - **edge**: edge detector (placeholder, passes frames through)
//! - **fps**: frame-rate overlay (placeholder, passes frames through)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vision_pipeline::{capture, pipeline::Pipeline};
//!
//! let source = capture::open("", &[])?;
//! let frames = Pipeline::new()
//!     .with_fps()
//!     .with_edge_detector()
//!     .run(source)?;
//! println!("processed {} frames", frames);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builtin;
pub mod engine;
pub mod registry;
pub mod traits;

pub use builtin::{EdgeDetector, FpsOverlay};
pub use engine::Pipeline;
pub use registry::{
    get_processor, register_processor, registered_processors, unregister_processor,
    ProcessorFactory,
};
pub use traits::{Processor, ProcessorFn};
