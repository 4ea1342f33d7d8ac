//! Rain Configuration Management
//!
//! Loads configuration from ~/.config/glyph-rain/config.toml. Every field has
//! a default, so the file is optional and may set any subset of keys.

use std::path::{Path, PathBuf};

use rain_core::params::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_RAIN_COLOR, DEFAULT_SCALE, DEFAULT_TEXTURE_SIZE,
};
use rain_core::{DEFAULT_QUAD_SCALE, RainParams};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Configuration directory name under ~/.config
const CONFIG_DIR_NAME: &str = "glyph-rain";
/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Initial inner width in logical pixels
    pub width: u32,
    /// Initial inner height in logical pixels
    pub height: u32,
    /// Start borderless fullscreen on the current monitor
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "glyph-rain".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
        }
    }
}

/// Glyph atlas configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Atlas image, relative paths resolve against the working directory
    pub path: PathBuf,
    /// Logical atlas size in texels as seen by the shader
    pub texture_size: [f32; 2],
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("captureFont.png"),
            texture_size: DEFAULT_TEXTURE_SIZE,
        }
    }
}

/// Effect look and motion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    /// RGBA color of lit glyphs
    pub rain_color: [f32; 4],
    /// RGBA color behind the glyphs
    pub background_color: [f32; 4],
    /// Texture-coordinate scale
    pub scale: f32,
    /// Minimum quad scale in pixels per local unit
    pub quad_scale: f32,
    /// Pin the trail divisor instead of drawing it at startup
    pub trail: Option<f32>,
    /// Pin the fall speed instead of drawing it at startup
    pub speed: Option<f32>,
    /// Seed for the startup draw; unseeded runs differ every launch
    pub seed: Option<u64>,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            rain_color: DEFAULT_RAIN_COLOR,
            background_color: DEFAULT_BACKGROUND_COLOR,
            scale: DEFAULT_SCALE,
            quad_scale: DEFAULT_QUAD_SCALE,
            trail: None,
            speed: None,
            seed: None,
        }
    }
}

impl EffectConfig {
    /// Random source for the startup draw
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub atlas: AtlasConfig,
    pub effect: EffectConfig,
}

impl Config {
    /// Get the config directory path (~/.config/glyph-rain)
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR_NAME))
    }

    /// Get the config file path (~/.config/glyph-rain/config.toml)
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join(CONFIG_FILE_NAME))
    }

    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            log::info!("Could not determine config path, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {:?}", path);
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse config {:?}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read config {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Build the effect parameters, drawing trail and speed unless pinned
    pub fn rain_params(&self) -> RainParams {
        let mut rng = self.effect.rng();
        let drawn = RainParams::randomized(&mut rng);

        RainParams {
            texture_size: self.atlas.texture_size,
            rain_color: self.effect.rain_color,
            background_color: self.effect.background_color,
            scale: self.effect.scale,
            trail: self.effect.trail.unwrap_or(drawn.trail),
            speed: self.effect.speed.unwrap_or(drawn.speed),
        }
    }
}
