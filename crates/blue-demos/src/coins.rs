//! Coins playground: a rigid-body player pushed around by the pad, picking up
//! coins from a coin manager. Runs on the component framework.

use tracing::{debug, warn};

use blue_core::constants::DRAW_LIST_CAPACITY;
use blue_core::draw::{DrawCommand, DrawList, DrawListError, DrawMode};
use blue_core::events::SceneEvent;
use blue_core::input::{DigitalButtons, DigitalPad};
use blue_core::{Fix16, Fix16Vec2, Int16Vec2, Rgb1555};
use blue_engine::components::{CoinError, CoinManager, RigidBody};
use blue_engine::{Component, DrawContext, ObjectBuilder, ObjectId, Scene, SceneConfig, Transform};

use crate::{Demo, DemoError, Frame};

pub const SCREEN_WIDTH: i16 = 320;
pub const SCREEN_HEIGHT: i16 = 240;

/// Player's resting height (y grows downward).
pub const FLOOR_Y: Fix16 = Fix16::from_int(200);

pub const GRAVITY: Fix16Vec2 = Fix16Vec2::new(Fix16::ZERO, Fix16::from_int(240));
pub const PUSH_FORCE: Fix16 = Fix16::from_int(180);

/// Coins within this distance of the player are collected.
pub const COLLECT_RADIUS: Fix16 = Fix16::from_int(16);

/// Distance ahead of the player at which A drops a coin.
pub const COIN_DROP_AHEAD: Fix16 = Fix16::from_int(48);

const PLAYER_HALF_SIZE: i16 = 4;
const PLAYER_COLOR: Rgb1555 = Rgb1555::new(1, 31, 31, 0);

/// Draws the player as a filled square on its transform.
struct PlayerMarker;

impl Component for PlayerMarker {
    fn name(&self) -> &'static str {
        "player_marker"
    }

    fn on_draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), DrawListError> {
        let Int16Vec2 { x, y } = ctx.transform.position.to_screen();
        let s = PLAYER_HALF_SIZE;
        ctx.submit(DrawCommand::Polygon {
            points: [
                Int16Vec2::new(x + s - 1, y - s),
                Int16Vec2::new(x + s - 1, y + s - 1),
                Int16Vec2::new(x - s, y + s - 1),
                Int16Vec2::new(x - s, y - s),
            ],
            color: PLAYER_COLOR,
            mode: DrawMode::empty(),
        })
    }
}

pub struct CoinsDemo {
    scene: Scene,
    player: ObjectId,
    coins: ObjectId,
    events: Vec<SceneEvent>,
}

impl CoinsDemo {
    pub fn new(seed: u64) -> Result<Self, DemoError> {
        let mut scene = Scene::new(SceneConfig {
            seed,
            ..Default::default()
        });

        let start = Fix16Vec2::new(Fix16::from_int(i32::from(SCREEN_WIDTH / 2)), FLOOR_Y);
        // On screen horizontally, standing on the floor.
        let body = RigidBody::new().with_bounds(
            Fix16Vec2::new(Fix16::ZERO, Fix16::MIN),
            Fix16Vec2::new(Fix16::from_int(i32::from(SCREEN_WIDTH)), FLOOR_Y),
        );
        let player = scene.spawn(
            ObjectBuilder::new("player")
                .with_transform(Transform::at(start))
                .with(body)
                .with(PlayerMarker),
        );

        let coins = scene.spawn(ObjectBuilder::new("coins").with(CoinManager::new()));

        Ok(Self {
            scene,
            player,
            coins,
            events: Vec::new(),
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn player(&self) -> ObjectId {
        self.player
    }

    pub fn coins(&self) -> ObjectId {
        self.coins
    }

    /// Scene events raised during the last frame.
    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    fn push_forces(&mut self, pad: &DigitalPad) -> Result<(), DemoError> {
        let mut forces = vec![GRAVITY];
        if pad.is_pressed(DigitalButtons::LEFT) {
            forces.push(Fix16Vec2::new(-PUSH_FORCE, Fix16::ZERO));
        }
        if pad.is_pressed(DigitalButtons::RIGHT) {
            forces.push(Fix16Vec2::new(PUSH_FORCE, Fix16::ZERO));
        }

        self.scene
            .with_component_mut::<RigidBody, _>(self.player, |body| {
                forces.iter().try_for_each(|force| body.forces_add(force))
            })??;
        Ok(())
    }
}

impl Demo for CoinsDemo {
    fn name(&self) -> &'static str {
        "coins"
    }

    fn frame(&mut self, pad: &DigitalPad, frame_time_ms: Fix16) -> Result<Frame, DemoError> {
        self.push_forces(pad)?;

        let position = self.scene.transform(self.player)?.position;
        if pad.is_just_pressed(DigitalButtons::A) {
            let screen = Fix16::from_int(i32::from(SCREEN_WIDTH));
            let mut x = position.x + COIN_DROP_AHEAD;
            if x > screen {
                x -= screen;
            }
            let dropped = self
                .scene
                .with_component_mut::<CoinManager, _>(self.coins, |mgr| mgr.spawn(x, position.y, 1))?;
            if let Err(CoinError::PoolFull) = dropped {
                warn!("no room for another coin");
            }
        }

        let value = self
            .scene
            .with_component_mut::<CoinManager, _>(self.coins, |mgr| {
                mgr.collect_within(&position, COLLECT_RADIUS)
            })?;
        if value > 0 {
            debug!(value, "coins collected");
        }

        let report = self.scene.tick()?;
        self.events = report.events;
        let (live, total) = self
            .scene
            .with_component::<CoinManager, _>(self.coins, |mgr| (mgr.coins, mgr.collected))?;

        let mut draw = DrawList::with_capacity(DRAW_LIST_CAPACITY);
        draw.push(DrawCommand::SystemClip {
            extent: Int16Vec2::new(SCREEN_WIDTH - 1, SCREEN_HEIGHT - 1),
        })?;
        draw.push(DrawCommand::LocalCoords {
            origin: Int16Vec2::ZERO,
        })?;
        draw.extend(report.draw_list.iter().cloned())?;
        draw.terminate()?;

        Ok(Frame {
            draw,
            debug_text: format!("coins {live} collected {total} {frame_time_ms:.2}ms"),
        })
    }
}
