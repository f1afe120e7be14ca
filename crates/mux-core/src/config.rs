// ABOUTME: Application configuration handling.
// ABOUTME: Loads and saves layout bounds and storage settings from TOML config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default lower bound for any divider ratio
pub const DEFAULT_MIN_POSITION: f32 = 0.15;
/// Default upper bound for any divider ratio
pub const DEFAULT_MAX_POSITION: f32 = 0.85;
/// Quiet period before a layout change is written out
pub const DEFAULT_PERSIST_DEBOUNCE_MS: u64 = 500;

/// Divider limits and persistence timing for the panel layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Smallest ratio a divider may be dragged to
    pub min_position: f32,
    /// Largest ratio a divider may be dragged to
    pub max_position: f32,
    /// Milliseconds of inactivity before layout changes are persisted
    pub persist_debounce_ms: u64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            min_position: DEFAULT_MIN_POSITION,
            max_position: DEFAULT_MAX_POSITION,
            persist_debounce_ms: DEFAULT_PERSIST_DEBOUNCE_MS,
        }
    }
}

impl LayoutSettings {
    /// Bounds are usable when they are finite, ordered, and leave room for 0.5
    pub fn is_valid(&self) -> bool {
        self.min_position.is_finite()
            && self.max_position.is_finite()
            && self.min_position > 0.0
            && self.max_position < 1.0
            && self.min_position <= 0.5
            && self.max_position >= 0.5
    }

    /// Returns these settings, or the defaults if the bounds are unusable
    pub fn validated(self) -> Self {
        if self.is_valid() {
            self
        } else {
            tracing::warn!(
                "Ignoring invalid layout bounds [{}, {}], using defaults",
                self.min_position,
                self.max_position
            );
            Self {
                persist_debounce_ms: self.persist_debounce_ms,
                ..Self::default()
            }
        }
    }

    pub fn persist_debounce(&self) -> Duration {
        Duration::from_millis(self.persist_debounce_ms)
    }
}

/// Where persisted UI preferences live
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Override for the preference directory (defaults to ~/.config/muxdeck/prefs)
    pub directory: Option<PathBuf>,
}

impl StorageSettings {
    /// Resolve the preference directory, honoring the override
    pub fn resolve_directory(&self) -> Option<PathBuf> {
        self.directory
            .clone()
            .or_else(|| dirs::config_dir().map(|p| p.join("muxdeck").join("prefs")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Panel divider settings
    pub layout: LayoutSettings,

    /// Preference storage settings
    pub storage: StorageSettings,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

impl AppConfig {
    /// Get the default config file path (~/.config/muxdeck/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("muxdeck").join("config.toml"))
    }

    /// Load config from a path
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.layout = config.layout.validated();
        Ok(config)
    }

    /// Load config from default path, or return default config if not found
    pub fn load_or_default() -> Self {
        Self::default_path()
            .and_then(|path| match Self::load(&path) {
                Ok(config) => Some(config),
                Err(ConfigError::ReadError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                    None
                }
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Save config to a path
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
