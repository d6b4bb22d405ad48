//! Runner configuration, loaded from JSON. Missing fields take defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use blue_core::constants::TICK_RATE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Frames per second of the game loop.
    pub tick_rate: u32,
    /// Seed for scenes and random input. Same seed = same run.
    pub seed: u64,
    /// Built-in model for the 3D demo when `--model` is not given.
    pub model: String,
    pub wireframe: bool,
    /// Spin the 3D model about Y as it moves.
    pub rotate_model: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            seed: 42,
            model: "cube".into(),
            wireframe: false,
            rotate_model: true,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        anyhow::ensure!(config.tick_rate > 0, "tick_rate must be positive");
        Ok(config)
    }
}
