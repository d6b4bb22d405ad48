//! Coin manager: a bounded pool of collectible coins owned by one object.
//!
//! Coins bob vertically, expire after `COIN_LIFETIME_FRAMES`, and are removed
//! by `collect_within`. Spawn and collect requests made between frames are
//! reported as events on the next update.

use std::fmt;

use heapless::Vec as BoundedVec;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use blue_core::constants::{
    COIN_BOB_AMPLITUDE, COIN_LIFETIME_FRAMES, COIN_POOL_CAPACITY, COIN_SPRITE_SIZE,
};
use blue_core::draw::{DrawCommand, DrawListError, DrawMode};
use blue_core::events::SceneEvent;
use blue_core::{Angle, Fix16, Fix16Vec2};

use crate::component::{Component, ComponentContext, DrawContext};

/// Bob phase advance per frame (64 frames per cycle).
const BOB_STEP: u16 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinError {
    PoolFull,
}

impl fmt::Display for CoinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinError::PoolFull => write!(f, "coin pool full ({COIN_POOL_CAPACITY} coins)"),
        }
    }
}

impl std::error::Error for CoinError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Coin {
    pub position: Fix16Vec2,
    pub value: u16,
    /// Frames since the coin was first updated.
    pub age: u32,
    /// Assigned from the scene RNG on the coin's first update.
    phase: Option<Angle>,
}

impl Coin {
    /// Position including the vertical bob.
    pub fn display_position(&self) -> Fix16Vec2 {
        match self.phase {
            Some(phase) => {
                let step = Angle::from_raw((self.age as u16).wrapping_mul(BOB_STEP));
                let bob = (phase + step).sin() * COIN_BOB_AMPLITUDE;
                Fix16Vec2::new(self.position.x, self.position.y + bob)
            }
            None => self.position,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CoinManager {
    /// Live coins.
    pub coins: u32,
    /// Running total of collected coin value.
    pub collected: u32,
    pool: BoundedVec<Coin, COIN_POOL_CAPACITY>,
    outbox: Vec<SceneEvent>,
}

impl CoinManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a coin at world position (`x`, `y`).
    pub fn spawn(&mut self, x: Fix16, y: Fix16, value: u16) -> Result<(), CoinError> {
        let coin = Coin {
            position: Fix16Vec2::new(x, y),
            value,
            age: 0,
            phase: None,
        };
        if self.pool.push(coin).is_err() {
            warn!(value, "coin rejected, pool full");
            return Err(CoinError::PoolFull);
        }
        self.coins = self.pool.len() as u32;
        Ok(())
    }

    /// Remove every coin within `radius` of `point` and return their total value.
    pub fn collect_within(&mut self, point: &Fix16Vec2, radius: Fix16) -> u32 {
        let mut value = 0u32;
        self.pool.retain(|coin| {
            if coin.display_position().distance_to(point) <= radius {
                value += u32::from(coin.value);
                false
            } else {
                true
            }
        });

        if value > 0 {
            self.collected = self.collected.saturating_add(value);
            self.coins = self.pool.len() as u32;
            self.outbox.push(SceneEvent::CoinCollected {
                value,
                total: self.collected,
            });
        }
        value
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.pool.iter()
    }

    fn reset(&mut self) {
        self.pool.clear();
        self.outbox.clear();
        self.coins = 0;
    }
}

impl Component for CoinManager {
    fn name(&self) -> &'static str {
        "coin_mgr"
    }

    fn on_init(&mut self, _ctx: &mut ComponentContext<'_>) {
        self.reset();
        self.collected = 0;
    }

    fn on_update(&mut self, ctx: &mut ComponentContext<'_>) {
        for event in self.outbox.drain(..) {
            ctx.emit(event);
        }

        for coin in self.pool.iter_mut() {
            if coin.phase.is_none() {
                coin.phase = Some(Angle::from_raw(ctx.rng.gen()));
                ctx.emit(SceneEvent::CoinSpawned {
                    position: coin.position,
                    value: coin.value,
                });
            }
            coin.age += 1;
        }

        let before = self.pool.len();
        self.pool.retain(|coin| {
            if coin.age >= COIN_LIFETIME_FRAMES {
                ctx.emit(SceneEvent::CoinExpired {
                    position: coin.position,
                    value: coin.value,
                });
                false
            } else {
                true
            }
        });
        if self.pool.len() != before {
            debug!(
                object = %ctx.object,
                expired = before - self.pool.len(),
                "coins expired"
            );
        }
        self.coins = self.pool.len() as u32;
    }

    fn on_draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), DrawListError> {
        let half = Fix16::from_int(i32::from(COIN_SPRITE_SIZE / 2));
        for coin in &self.pool {
            let corner = coin.display_position() - Fix16Vec2::new(half, half);
            ctx.submit(DrawCommand::Sprite {
                char_offset: 0,
                width: COIN_SPRITE_SIZE,
                height: COIN_SPRITE_SIZE,
                position: corner.to_screen(),
                color_bank: 0,
                mode: DrawMode::empty(),
            })?;
        }
        Ok(())
    }

    fn on_destroy(&mut self, _ctx: &mut ComponentContext<'_>) {
        self.reset();
    }
}
