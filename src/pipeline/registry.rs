use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::{
    pipeline::{
        builtin::{EdgeDetector, FpsOverlay, EDGE, FPS},
        Processor,
    },
    registry::FactoryRegistry,
};

/// Creates a fresh [`Processor`] instance
pub type ProcessorFactory = Arc<dyn Fn() -> Box<dyn Processor> + Send + Sync>;

fn processors() -> &'static FactoryRegistry<ProcessorFactory> {
    static PROCESSORS: OnceLock<FactoryRegistry<ProcessorFactory>> = OnceLock::new();
    PROCESSORS.get_or_init(|| {
        let registry = FactoryRegistry::new("pipeline");

        let edge: ProcessorFactory = Arc::new(|| -> Box<dyn Processor> {
            Box::new(EdgeDetector::new())
        });
        let fps: ProcessorFactory = Arc::new(|| -> Box<dyn Processor> {
            Box::new(FpsOverlay::new())
        });
        registry.register(EDGE, edge);
        registry.register(FPS, fps);
        registry
    })
}

/// Register a named processor factory
///
/// # Panics
///
/// Panics if the name is empty or already registered, including the
/// built-in `"edge"` and `"fps"`.
pub fn register_processor<F>(name: &str, factory: F)
where
    F: Fn() -> Box<dyn Processor> + Send + Sync + 'static,
{
    processors().register(name, Arc::new(factory));
    debug!("registered processor '{}'", name);
}

/// Remove a processor; a no-op when it is not registered
pub fn unregister_processor(name: &str) {
    if processors().unregister(name) {
        debug!("unregistered processor '{}'", name);
    }
}

/// Look up a processor factory by name
pub fn get_processor(name: &str) -> Option<ProcessorFactory> {
    processors().get(name)
}

/// All registered processor names, sorted
pub fn registered_processors() -> Vec<String> {
    processors().keys()
}
