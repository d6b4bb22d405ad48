//! Events emitted by scenes and components for logging and frame dumps.

use serde::{Deserialize, Serialize};

use crate::vector::Fix16Vec2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SceneEvent {
    ObjectSpawned { object: u32, name: String },
    ObjectDestroyed { object: u32, name: String },
    CoinSpawned { position: Fix16Vec2, value: u16 },
    CoinCollected { value: u32, total: u32 },
    CoinExpired { position: Fix16Vec2, value: u16 },
}
