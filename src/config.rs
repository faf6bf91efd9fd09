//! Configuration persistence for skycurator settings

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::{Size, View};

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl MapColor {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same color with a different alpha
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Convert to RGBA bytes (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

/// Colors used to draw the sky map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: MapColor,
    pub star: MapColor,
    pub anomaly: MapColor,
    pub highlight: MapColor,
    pub selection: MapColor,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Deep space blue-black
            background: MapColor::rgb(0.02, 0.03, 0.07),
            star: MapColor::rgb(1.0, 1.0, 1.0),
            // #00ffaa
            anomaly: MapColor::rgb(0.0, 1.0, 170.0 / 255.0),
            // #ffeb3b
            highlight: MapColor::rgb(1.0, 235.0 / 255.0, 59.0 / 255.0),
            selection: MapColor::rgb(0.0, 1.0, 170.0 / 255.0).with_alpha(0.8),
        }
    }
}

/// Pixel dimensions as stored in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl From<Dimensions> for Size {
    fn from(d: Dimensions) -> Self {
        Size::new(d.width as f64, d.height as f64)
    }
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyMapConfig {
    /// Base URL of the scan backend
    pub backend_url: String,
    /// Maximum number of anomalies requested per scan
    pub scan_limit: u32,
    /// View scanned on startup
    pub initial_view: View,
    /// Size of the drawing surface
    pub surface_size: Dimensions,
    /// Size of the viewport that hosts the surface and tooltips
    pub viewport_size: Dimensions,
    /// Where the rendered map is written as PNG
    pub snapshot_path: PathBuf,
    /// Colors
    pub theme: Theme,
}

impl SkyMapConfig {
    /// Application directory name under the user config dir
    pub const ID: &'static str = "skycurator";

    /// Default location of the config file
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("Could not locate config directory, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::path().context("Could not locate config directory")?;
        self.save_to(&path)
    }

    /// Save configuration to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}

impl Default for SkyMapConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            scan_limit: 10,
            initial_view: View::default(),
            surface_size: Dimensions {
                width: 800,
                height: 600,
            },
            viewport_size: Dimensions {
                width: 1280,
                height: 800,
            },
            snapshot_path: PathBuf::from("skymap.png"),
            theme: Theme::default(),
        }
    }
}
