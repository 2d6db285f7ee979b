use thiserror::Error;

/// Main error type for the vision pipeline library
#[derive(Error, Debug)]
pub enum VisionError {
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Processor error: {0}")]
    Processor(#[from] ProcessorError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Errors raised by frame sources
#[derive(Error, Debug)]
pub enum CaptureError {
    /// `next_frame` was called after `close`
    #[error("capture: closed")]
    Closed,

    #[error("Backend '{scheme}' failed: {reason}")]
    Backend { scheme: String, reason: String },

    #[error("Invalid capture parameters: {details}")]
    InvalidParameters { details: String },
}

/// Errors raised by frame processors
#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Processor '{name}' failed: {reason}")]
    Failed { name: String, reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// A pipeline run that stopped before end of stream.
///
/// `frames` counts the frames that made it through every processor before
/// the failure; the failing frame is not included.
#[derive(Error, Debug)]
#[error("pipeline stopped after {frames} frames: {error}")]
pub struct RunError {
    pub frames: usize,
    #[source]
    pub error: VisionError,
}

/// Convenience type alias for Results using VisionError
pub type Result<T> = std::result::Result<T, VisionError>;

impl VisionError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// True when the error comes from reading a source that was already closed
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Capture(CaptureError::Closed))
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Capture(CaptureError::Backend { scheme, reason }) => {
                format!("The '{}' source backend reported an error: {}", scheme, reason)
            }
            Self::Processor(ProcessorError::Failed { name, reason }) => {
                format!("Processor '{}' rejected a frame: {}", name, reason)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}

impl ProcessorError {
    pub fn failed<N: Into<String>, R: Into<String>>(name: N, reason: R) -> Self {
        Self::Failed {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
