use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Largest frame side accepted from a configuration file
pub const MAX_FRAME_SIDE: u32 = 16384;

/// Resolved capture parameters handed to a source at open time
///
/// `max_frames == 0` means "use the source's default budget".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub max_frames: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            fps: 30,
            max_frames: 0,
        }
    }
}

impl CaptureConfig {
    /// Start from the defaults and apply `options` in order.
    pub fn resolve(options: &[CaptureOption]) -> Self {
        let mut config = Self::default();
        for option in options {
            option.apply(&mut config);
        }
        config
    }

    /// The options that reproduce this config's fields on top of the defaults.
    ///
    /// Zero fields produce options that are ignored when applied.
    pub fn options(&self) -> Vec<CaptureOption> {
        vec![
            CaptureOption::Width(self.width),
            CaptureOption::Height(self.height),
            CaptureOption::Fps(self.fps),
            CaptureOption::MaxFrames(self.max_frames),
        ]
    }
}

/// A single capture setting override
///
/// Applying an option with a zero value leaves the field unchanged, so
/// callers can merge option lists from several places without validating
/// each one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOption {
    Width(u32),
    Height(u32),
    Fps(u32),
    /// Cap the number of frames produced (synthetic sources only for now)
    MaxFrames(u32),
}

impl CaptureOption {
    pub fn apply(&self, config: &mut CaptureConfig) {
        match *self {
            CaptureOption::Width(w) if w > 0 => config.width = w,
            CaptureOption::Height(h) if h > 0 => config.height = h,
            CaptureOption::Fps(f) if f > 0 => config.fps = f,
            CaptureOption::MaxFrames(n) if n > 0 => config.max_frames = n,
            _ => {}
        }
    }
}

/// Main configuration for the vision tools
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source URI; empty selects the synthetic source
    pub source: String,

    /// Capture settings
    pub capture: CaptureConfig,

    /// Processing chain settings
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let sides = [
            ("capture.width", self.capture.width),
            ("capture.height", self.capture.height),
        ];
        for (key, value) in sides {
            if value > MAX_FRAME_SIDE {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                }.into());
            }
        }
        self.pipeline.validate()?;
        Ok(())
    }

    /// Capture options derived from the `[capture]` table, in field order
    pub fn capture_options(&self) -> Vec<CaptureOption> {
        self.capture.options()
    }
}

/// Processing chain configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Processor names, in the order they are applied
    pub processors: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            processors: vec!["fps".to_string(), "edge".to_string()],
        }
    }
}

impl PipelineConfig {
    fn validate(&self) -> Result<()> {
        if let Some(index) = self.processors.iter().position(|name| name.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: format!("pipeline.processors[{}]", index),
                value: String::new(),
            }.into());
        }
        Ok(())
    }
}
