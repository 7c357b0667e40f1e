//! Editor configuration
//!
//! Settings are plain serde structs loadable from TOML or RON, picked by
//! file extension. Every field has a default so a missing or partial file
//! still yields a usable configuration.

pub use serde::{Deserialize, Serialize};

/// Configuration trait: serde struct with format-dispatched file IO
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a TOML or RON file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to a TOML or RON file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Top-level editor settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Scene update settings
    pub scene: SceneSettings,

    /// Animation playback settings
    pub playback: PlaybackSettings,

    /// Asset search settings
    pub assets: AssetSettings,
}

impl Config for EditorConfig {}

/// Settings for the per-frame scene update
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Run frustum culling each frame
    pub enable_culling: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            enable_culling: true,
        }
    }
}

/// Settings for animation playback
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Playback speed multiplier applied to wall-clock time
    pub speed: f32,

    /// Clip index activated for newly loaded animated models
    pub default_clip: usize,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            speed: 1.0,
            default_clip: 0,
        }
    }
}

/// Settings for asset loading
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Directories searched for scene files, in order
    pub search_paths: Vec<String>,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            search_paths: vec!["assets".to_string()],
        }
    }
}
