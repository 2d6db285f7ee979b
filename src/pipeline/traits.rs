use crate::{error::Result, video::types::Frame};

/// Core trait that all frame processors must implement
pub trait Processor: Send {
    /// Returns the name this processor is registered under
    fn name(&self) -> &str;

    /// Transform one frame
    ///
    /// Called once per frame, in stream order. Returning an error aborts
    /// the pipeline run; it is not retried.
    fn process(&mut self, frame: Frame) -> Result<Frame>;
}

/// Adapts a closure into a [`Processor`]
///
/// ```rust
/// use vision_pipeline::pipeline::{Processor, ProcessorFn};
/// use vision_pipeline::video::Frame;
///
/// let mut invert = ProcessorFn::new("invert", |mut frame: Frame| {
///     frame.as_image_mut().pixels_mut().for_each(|p| p.0 = p.0.map(|c| 255 - c));
///     Ok(frame)
/// });
/// let out = invert.process(Frame::new_black(2, 2)).unwrap();
/// assert_eq!(out.get_pixel(0, 0), [255, 255, 255]);
/// ```
pub struct ProcessorFn<F> {
    name: String,
    f: F,
}

impl<F> ProcessorFn<F>
where
    F: FnMut(Frame) -> Result<Frame> + Send,
{
    pub fn new<N: Into<String>>(name: N, f: F) -> Self {
        Self { name: name.into(), f }
    }
}

impl<F> Processor for ProcessorFn<F>
where
    F: FnMut(Frame) -> Result<Frame> + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&mut self, frame: Frame) -> Result<Frame> {
        (self.f)(frame)
    }
}
