//! # Frames
//!
//! The pixel buffer type that flows from sources through processors.

pub mod types;

pub use types::Frame;
