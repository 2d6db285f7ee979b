use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::{
    capture::Source,
    config::CaptureConfig,
    error::Result,
    registry::FactoryRegistry,
};

/// Creates a [`Source`] for a URI and resolved capture config
///
/// Factories should be cheap and avoid side effects until the source is read.
pub type SourceFactory = Arc<dyn Fn(&str, CaptureConfig) -> Result<Box<dyn Source>> + Send + Sync>;

fn sources() -> &'static FactoryRegistry<SourceFactory> {
    static SOURCES: OnceLock<FactoryRegistry<SourceFactory>> = OnceLock::new();
    SOURCES.get_or_init(|| FactoryRegistry::new("capture"))
}

/// Associate a scheme (e.g. "file", "rtsp", "camera") with a factory
///
/// # Panics
///
/// Panics if the scheme is empty or already registered. Both are wiring
/// mistakes that should surface at startup.
pub fn register<F>(scheme: &str, factory: F)
where
    F: Fn(&str, CaptureConfig) -> Result<Box<dyn Source>> + Send + Sync + 'static,
{
    sources().register(scheme, Arc::new(factory));
    debug!("registered source scheme '{}'", scheme);
}

/// Remove a scheme; a no-op when it is not registered
pub fn unregister(scheme: &str) {
    if sources().unregister(scheme) {
        debug!("unregistered source scheme '{}'", scheme);
    }
}

/// Extract the scheme prefix of `uri`
///
/// `scheme://rest` is tried first, then `scheme:rest`. A delimiter at the
/// very start does not count, so `"://x"` and `":x"` have no scheme.
pub fn scheme_of(uri: &str) -> Option<&str> {
    match uri.find("://") {
        Some(i) if i > 0 => Some(&uri[..i]),
        _ => match uri.find(':') {
            Some(i) if i > 0 => Some(&uri[..i]),
            _ => None,
        },
    }
}

/// Find the factory registered for the scheme of `uri`
pub fn resolve(uri: &str) -> Option<SourceFactory> {
    let scheme = scheme_of(uri)?;
    let factory = sources().get(scheme);
    debug!(
        "resolve '{}': scheme '{}' {}",
        uri,
        scheme,
        if factory.is_some() { "bound" } else { "unbound" }
    );
    factory
}

/// All registered schemes, sorted
pub fn registered_schemes() -> Vec<String> {
    sources().keys()
}
