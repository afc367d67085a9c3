//! Engine configuration.
//!
//! Everything has a default, so an empty file (or no file at all) gives the
//! stock 800×400 demo. Partial TOML files only override what they name:
//!
//! ```toml
//! tick_rate = 30
//!
//! [camera]
//! fovy_degrees = 75.0
//!
//! [world]
//! seed = 7
//! generator = { kind = "heightmap", smoothness = 20 }
//! ```

use std::{path::Path, path::PathBuf, time::Duration};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub movement: MovementConfig,
    pub world: WorldConfig,
    /// Simulation ticks per second.
    pub tick_rate: u32,
    pub clear_colour: [f64; 3],
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            movement: MovementConfig::default(),
            world: WorldConfig::default(),
            tick_rate: 60,
            clear_colour: [0.2, 0.2, 0.23],
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text)?;
        anyhow::ensure!(config.tick_rate > 0, "tick_rate must be positive");
        anyhow::ensure!(
            config.camera.znear > 0.0 && config.camera.zfar > config.camera.znear,
            "camera clip planes must satisfy 0 < znear < zfar"
        );
        Ok(config)
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate.max(1) as f64)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Cinnamon".to_string(),
            width: 800,
            height: 400,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Radians per pointer unit.
    pub mouse_sensitivity: f32,
    pub start_position: [f32; 3],
    pub start_captured: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fovy_degrees: 90.0,
            znear: 0.01,
            zfar: 100.0,
            mouse_sensitivity: 0.01,
            start_position: [0.0, 0.0, 2.0],
            start_captured: true,
        }
    }
}

/// Parameters of the discrete-step collision resolver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Distance moved per tick per active group.
    pub step: f32,
    /// Half the edge length of the player's collision cube.
    pub half_size: f32,
    pub walkback_steps: u32,
    pub walkback_increment: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            step: 0.1,
            half_size: 0.2,
            walkback_steps: 10,
            walkback_increment: 0.01,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Generator {
    /// Each cell is solid with probability `1 / one_in`.
    Scatter { one_in: u32 },
    /// Smoothed 2D noise turned into layered columns.
    Heightmap { smoothness: u32 },
}

impl Default for Generator {
    fn default() -> Self {
        Generator::Scatter { one_in: 5 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub seed: u64,
    pub generator: Generator,
    /// Image file replacing the built-in block atlas.
    pub atlas: Option<PathBuf>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            generator: Generator::default(),
            atlas: None,
        }
    }
}
