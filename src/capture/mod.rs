//! # Frame Sources
//!
//! Sources feed frames to a [`Pipeline`](crate::pipeline::Pipeline).
//!
//! [`open`] picks the source for a URI: when the URI's scheme has a
//! registered factory, that factory builds the source; otherwise the
//! built-in [`SyntheticSource`] is used.
//!
//! Backends (camera hardware, files, RTSP, GPU decoders) live outside this
//! crate and plug in through [`register`]:
//!
//! ```rust,no_run
//! use vision_pipeline::capture::{self, CaptureOption, SyntheticSource, Source};
//! use vision_pipeline::config::CaptureConfig;
//! use vision_pipeline::Result;
//!
//! capture::register("test", |_uri: &str, config: CaptureConfig| -> Result<Box<dyn Source>> {
//!     Ok(Box::new(SyntheticSource::new(config)))
//! });
//!
//! let source = capture::open("test://pattern", &[CaptureOption::MaxFrames(10)])?;
//! # Ok::<(), vision_pipeline::VisionError>(())
//! ```

pub mod registry;
pub mod synthetic;
pub mod traits;

use tracing::debug;

pub use crate::config::{CaptureConfig, CaptureOption};
pub use registry::{register, registered_schemes, resolve, scheme_of, unregister, SourceFactory};
pub use synthetic::SyntheticSource;
pub use traits::Source;

use crate::error::Result;

/// Open a source for `uri` with the given options applied over the defaults
///
/// An empty `uri`, or one whose scheme has no registered factory, yields a
/// [`SyntheticSource`]. A registered factory's result is returned as is.
pub fn open(uri: &str, options: &[CaptureOption]) -> Result<Box<dyn Source>> {
    let config = CaptureConfig::resolve(options);

    if let Some(factory) = resolve(uri) {
        debug!("opening '{}' through registered factory", uri);
        return factory(uri, config);
    }

    debug!(
        "opening synthetic source {}x{} @ {} fps",
        config.width, config.height, config.fps
    );
    Ok(Box::new(SyntheticSource::new(config)))
}
