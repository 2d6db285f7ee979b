use tracing::{debug, trace};

use crate::{
    capture::Source,
    error::RunError,
    pipeline::{
        builtin::{EDGE, FPS},
        get_processor, Processor,
    },
};

/// Drives frames from a [`Source`] through an ordered chain of processors
///
/// Built by value: every `with_*` call consumes the pipeline and returns
/// it with the chain extended. [`Pipeline::run`] consumes it again, so a
/// pipeline drives exactly one source.
#[derive(Default)]
pub struct Pipeline {
    processors: Vec<Box<dyn Processor>>,
}

impl Pipeline {
    /// Create a pipeline with an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instance of the processor registered under `name`
    ///
    /// Unknown names leave the chain unchanged.
    pub fn with_named(self, name: &str) -> Self {
        match get_processor(name) {
            Some(factory) => self.with_boxed(factory()),
            None => {
                debug!("processor '{}' not registered, skipping", name);
                self
            }
        }
    }

    /// Append the frame-rate overlay
    pub fn with_fps(self) -> Self {
        self.with_named(FPS)
    }

    /// Append the edge detector
    pub fn with_edge_detector(self) -> Self {
        self.with_named(EDGE)
    }

    /// Append a processor instance directly, bypassing the registry
    pub fn with_processor<P: Processor + 'static>(self, processor: P) -> Self {
        self.with_boxed(Box::new(processor))
    }

    /// Append an already boxed processor, e.g. one built by a registry factory
    pub fn with_boxed(mut self, processor: Box<dyn Processor>) -> Self {
        self.processors.push(processor);
        self
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Names of the chained processors, in execution order
    pub fn processor_names(&self) -> Vec<&str> {
        self.processors.iter().map(|p| p.name()).collect()
    }

    /// Pull frames until end of stream, applying every processor in order
    ///
    /// Returns the number of frames that went through the whole chain. On a
    /// source or processor error the run stops and the error carries the
    /// count so far; the frame that failed is not counted. The source is
    /// closed exactly once before this returns, whatever the outcome.
    pub fn run(mut self, source: Box<dyn Source>) -> Result<usize, RunError> {
        let mut source = CloseOnDrop(source);
        let mut frames = 0;

        debug!(
            "running {} with {} processor(s): {:?}",
            source.0.name(),
            self.processors.len(),
            self.processor_names()
        );

        loop {
            let mut frame = match source.0.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => break,
                Err(error) => return Err(RunError { frames, error }),
            };

            for processor in self.processors.iter_mut() {
                frame = processor
                    .process(frame)
                    .map_err(|error| RunError { frames, error })?;
            }

            frames += 1;
            trace!("frame {} done", frames);
        }

        debug!("end of stream after {} frames", frames);
        Ok(frames)
    }
}

/// Owns the source for the duration of a run and closes it when dropped
struct CloseOnDrop(Box<dyn Source>);

impl Drop for CloseOnDrop {
    fn drop(&mut self) {
        if let Err(e) = self.0.close() {
            debug!("closing {} failed: {}", self.0.name(), e);
        }
    }
}
