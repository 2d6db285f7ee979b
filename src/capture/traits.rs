use crate::{error::Result, video::types::Frame};

/// Core trait that every frame source implements
///
/// Sources are pulled synchronously by a pipeline. A source may block in
/// `next_frame` (e.g. on network I/O); that is opaque to the caller.
pub trait Source: Send {
    /// Produce the next frame
    ///
    /// # Returns
    ///
    /// * `Ok(Some(frame))` - the next frame
    /// * `Ok(None)` - end of stream; the source has nothing more to produce
    /// * `Err(_)` - operational failure. Reading a closed source must fail
    ///   with [`CaptureError::Closed`](crate::error::CaptureError::Closed).
    fn next_frame(&mut self) -> Result<Option<Frame>>;

    /// Release the resources held by this source
    ///
    /// Must be safe to call more than once.
    fn close(&mut self) -> Result<()>;

    /// Short identifier used in diagnostics
    fn name(&self) -> &str {
        "source"
    }
}
