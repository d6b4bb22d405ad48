//! Tests for the scene, component lifecycle, rigid body, and coin manager.

use std::sync::{Arc, Mutex};

use approx::assert_relative_eq;

use blue_core::constants::{COIN_LIFETIME_FRAMES, COIN_POOL_CAPACITY, DT, RIGID_BODY_FORCES_MAX};
use blue_core::draw::{DrawCommand, DrawListError, DrawMode};
use blue_core::events::SceneEvent;
use blue_core::{Fix16, Fix16Vec2, Int16Vec2, Rgb1555};

use crate::component::{Component, ComponentContext, DrawContext};
use crate::components::{CoinError, CoinManager, RigidBody, RigidBodyError};
use crate::object::{ObjectBuilder, Transform};
use crate::scene::{Scene, SceneConfig, SceneError};

type Log = Arc<Mutex<Vec<String>>>;

/// Appends "<tag>:<hook>" to a shared log on every hook.
struct Recorder {
    tag: &'static str,
    log: Log,
}

impl Recorder {
    fn new(tag: &'static str, log: &Log) -> Self {
        Self {
            tag,
            log: Arc::clone(log),
        }
    }

    fn record(&self, hook: &str) {
        self.log.lock().unwrap().push(format!("{}:{}", self.tag, hook));
    }
}

impl Component for Recorder {
    fn name(&self) -> &'static str {
        "recorder"
    }

    fn on_init(&mut self, _ctx: &mut ComponentContext<'_>) {
        self.record("init");
    }

    fn on_update(&mut self, _ctx: &mut ComponentContext<'_>) {
        self.record("update");
    }

    fn on_draw(&self, _ctx: &mut DrawContext<'_>) -> Result<(), DrawListError> {
        self.record("draw");
        Ok(())
    }

    fn on_destroy(&mut self, _ctx: &mut ComponentContext<'_>) {
        self.record("destroy");
    }
}

/// Despawns its own object after a number of updates.
struct SelfDestruct {
    frames_left: u32,
}

impl Component for SelfDestruct {
    fn name(&self) -> &'static str {
        "self_destruct"
    }

    fn on_update(&mut self, ctx: &mut ComponentContext<'_>) {
        if self.frames_left == 0 {
            ctx.despawn_self();
            ctx.despawn_self();
        } else {
            self.frames_left -= 1;
        }
    }
}

/// Submits one polygon per frame.
struct Quad;

impl Component for Quad {
    fn name(&self) -> &'static str {
        "quad"
    }

    fn on_draw(&self, ctx: &mut DrawContext<'_>) -> Result<(), DrawListError> {
        let p = ctx.transform.position.to_screen();
        ctx.submit(DrawCommand::Polygon {
            points: [p, p, p, p],
            color: Rgb1555::WHITE,
            mode: DrawMode::empty(),
        })
    }
}

fn take_log(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.lock().unwrap())
}

fn vec2(x: f64, y: f64) -> Fix16Vec2 {
    Fix16Vec2::from_f64(x, y)
}

// ---- Lifecycle ----

#[test]
fn test_init_runs_once_in_insertion_order() {
    let log = Log::default();
    let mut scene = Scene::default();
    scene.spawn(
        ObjectBuilder::new("a")
            .with(Recorder::new("first", &log))
            .with(Recorder::new("second", &log)),
    );

    assert_eq!(take_log(&log), vec!["first:init", "second:init"]);
}

#[test]
fn test_frame_runs_updates_before_draws() {
    let log = Log::default();
    let mut scene = Scene::default();
    scene.spawn(
        ObjectBuilder::new("a")
            .with(Recorder::new("first", &log))
            .with(Recorder::new("second", &log)),
    );
    take_log(&log);

    scene.tick().unwrap();
    assert_eq!(
        take_log(&log),
        vec!["first:update", "second:update", "first:draw", "second:draw"]
    );
}

#[test]
fn test_despawn_runs_destroy_once_and_stops_hooks() {
    let log = Log::default();
    let mut scene = Scene::default();
    let id = scene.spawn(
        ObjectBuilder::new("a")
            .with(Recorder::new("first", &log))
            .with(Recorder::new("second", &log)),
    );
    take_log(&log);

    scene.despawn(id).unwrap();
    assert_eq!(take_log(&log), vec!["first:destroy", "second:destroy"]);

    scene.tick().unwrap();
    assert!(take_log(&log).is_empty());
    assert_eq!(scene.despawn(id), Err(SceneError::NoSuchObject(id)));
}

#[test]
fn test_inactive_component_skips_update_and_draw_but_is_destroyed() {
    let log = Log::default();
    let mut scene = Scene::default();
    let id = scene.spawn(ObjectBuilder::new("a").with(Recorder::new("r", &log)));
    take_log(&log);

    scene.set_active::<Recorder>(id, false).unwrap();
    assert_eq!(scene.is_active::<Recorder>(id), Ok(false));
    scene.tick().unwrap();
    assert!(take_log(&log).is_empty());

    scene.despawn(id).unwrap();
    assert_eq!(take_log(&log), vec!["r:destroy"]);
}

#[test]
fn test_deferred_despawn_applies_at_end_of_frame() {
    let log = Log::default();
    let mut scene = Scene::default();
    scene.spawn(
        ObjectBuilder::new("doomed")
            .with(SelfDestruct { frames_left: 1 })
            .with(Recorder::new("r", &log)),
    );
    take_log(&log);

    scene.tick().unwrap();
    assert_eq!(scene.object_count(), 1);
    take_log(&log);

    // Update still completes, then destroy runs once, and no draw follows.
    let report = scene.tick().unwrap();
    assert_eq!(take_log(&log), vec!["r:update", "r:destroy"]);
    assert_eq!(report.objects, 0);
    assert!(report
        .events
        .iter()
        .any(|e| matches!(e, SceneEvent::ObjectDestroyed { name, .. } if name == "doomed")));
}

#[test]
fn test_spawn_event_and_find_by_name() {
    let mut scene = Scene::default();
    let id = scene.spawn(ObjectBuilder::new("player"));

    assert_eq!(scene.find_by_name("player"), Some(id));
    assert_eq!(scene.find_by_name("nobody"), None);
    let events = scene.drain_events();
    assert_eq!(
        events,
        vec![SceneEvent::ObjectSpawned {
            object: id.index(),
            name: "player".into(),
        }]
    );
    assert!(scene.drain_events().is_empty());
}

#[test]
fn test_missing_component_error() {
    let mut scene = Scene::default();
    let id = scene.spawn(ObjectBuilder::new("empty"));

    let err = scene.with_component::<RigidBody, _>(id, |_| ()).unwrap_err();
    assert!(matches!(err, SceneError::MissingComponent { .. }));
    assert!(err.to_string().contains("RigidBody"));
}

#[test]
fn test_draw_list_full_is_reported() {
    let mut scene = Scene::new(SceneConfig {
        draw_capacity: 1,
        ..Default::default()
    });
    scene.spawn(ObjectBuilder::new("a").with(Quad));
    scene.spawn(ObjectBuilder::new("b").with(Quad));

    assert_eq!(
        scene.tick(),
        Err(SceneError::Draw(DrawListError::Full { capacity: 1 }))
    );
}

#[test]
fn test_failed_draw_still_ends_the_frame() {
    let mut scene = Scene::new(SceneConfig {
        draw_capacity: 1,
        ..Default::default()
    });
    scene.spawn(ObjectBuilder::new("a").with(Quad));
    let b = scene.spawn(ObjectBuilder::new("b").with(Quad));

    assert!(scene.tick().is_err());
    assert_eq!(scene.frame(), 1);

    scene.despawn(b).unwrap();
    let report = scene.tick().unwrap();
    assert_eq!(report.frame, 1);
    assert_eq!(report.draw_list.len(), 1);
    assert!(
        report
            .events
            .iter()
            .all(|e| matches!(e, SceneEvent::ObjectDestroyed { .. })),
        "stale events carried over: {:?}",
        report.events
    );
    assert_eq!(report.events.len(), 1);
}

#[test]
fn test_draw_pass_uses_transform() {
    let mut scene = Scene::default();
    scene.spawn(ObjectBuilder::new("a").at(Fix16Vec2::from_int(10, -4)).with(Quad));

    let report = scene.tick().unwrap();
    assert_eq!(report.frame, 0);
    assert_eq!(report.draw_list.len(), 1);
    match report.draw_list.get(0) {
        Some(DrawCommand::Polygon { points, .. }) => {
            assert_eq!(points[0], Int16Vec2::new(10, -4))
        }
        other => panic!("expected polygon, got {other:?}"),
    }
    assert_eq!(scene.frame(), 1);
}

// ---- Rigid body ----

#[test]
fn test_forces_sum_is_exact() {
    let mut body = RigidBody::new();
    let forces = [vec2(1.5, -2.0), vec2(0.25, 0.125), vec2(-3.0, 7.75)];
    for force in &forces {
        body.forces_add(force).unwrap();
    }

    assert_eq!(body.forces_count(), 3);
    assert_eq!(body.forces_sum(), vec2(-1.25, 5.875));
}

#[test]
fn test_forces_sum_survives_out_of_range_partial_sums() {
    let mut body = RigidBody::new();
    for x in [30_000, 30_000, -30_000] {
        body.forces_add(&Fix16Vec2::from_int(x, 0)).unwrap();
    }
    assert_eq!(body.forces_sum(), Fix16Vec2::from_int(30_000, 0));

    // Order doesn't matter either.
    let mut reversed = RigidBody::new();
    for x in [-30_000, 30_000, 30_000] {
        reversed.forces_add(&Fix16Vec2::from_int(x, 0)).unwrap();
    }
    assert_eq!(reversed.forces_sum(), body.forces_sum());
}

#[test]
fn test_forces_sum_saturates_only_the_total() {
    let mut body = RigidBody::new();
    for _ in 0..3 {
        body.forces_add(&Fix16Vec2::from_int(30_000, -30_000)).unwrap();
    }
    assert_eq!(body.forces_sum(), Fix16Vec2::new(Fix16::MAX, Fix16::MIN));
}

#[test]
fn test_forces_clear_resets_sum() {
    let mut body = RigidBody::new();
    assert_eq!(body.forces_sum(), Fix16Vec2::ZERO);

    body.forces_add(&vec2(1.0, 1.0)).unwrap();
    body.forces_clear();
    assert_eq!(body.forces_count(), 0);
    assert_eq!(body.forces_sum(), Fix16Vec2::ZERO);
}

#[test]
fn test_forces_add_beyond_capacity_fails_without_mutating() {
    let mut body = RigidBody::new();
    for i in 0..RIGID_BODY_FORCES_MAX {
        body.forces_add(&Fix16Vec2::from_int(i as i32, 1)).unwrap();
    }
    let before = body.forces_sum();

    assert_eq!(
        body.forces_add(&Fix16Vec2::from_int(100, 100)),
        Err(RigidBodyError::ForceListFull)
    );
    assert_eq!(body.forces_count(), RIGID_BODY_FORCES_MAX);
    assert_eq!(body.forces_sum(), before);
}

#[test]
fn test_set_mass_rejects_non_positive() {
    let mut body = RigidBody::new();
    assert_eq!(body.mass(), Fix16::ONE);
    assert!(body.set_mass(Fix16::ZERO).is_err());
    assert!(body.set_mass(Fix16::from_int(-2)).is_err());
    body.set_mass(Fix16::from_int(4)).unwrap();
    assert_eq!(body.mass(), Fix16::from_int(4));
}

#[test]
fn test_rigid_body_init_resets_state() {
    let mut body = RigidBody::new();
    body.set_mass(Fix16::from_int(3)).unwrap();
    body.velocity = vec2(1.0, 1.0);
    body.forces_add(&vec2(1.0, 0.0)).unwrap();

    let mut scene = Scene::default();
    let id = scene.spawn(ObjectBuilder::new("body").with(body));
    scene
        .with_component::<RigidBody, _>(id, |body| {
            assert_eq!(body.mass(), Fix16::ONE);
            assert_eq!(body.velocity, Fix16Vec2::ZERO);
            assert_eq!(body.displacement, Fix16Vec2::ZERO);
            assert_eq!(body.forces_count(), 0);
        })
        .unwrap();
}

#[test]
fn test_rigid_body_keeps_spawn_position() {
    let start = Fix16Vec2::from_int(100, 50);
    let mut scene = Scene::default();
    let id = scene.spawn(ObjectBuilder::new("body").at(start).with(RigidBody::new()));

    let displacement = scene.with_component::<RigidBody, _>(id, |b| b.displacement).unwrap();
    assert_eq!(displacement, start);

    scene.tick().unwrap();
    assert_eq!(scene.transform(id).unwrap().position, start);
    assert_eq!(scene.transform(id).unwrap().position.to_screen(), Int16Vec2::new(100, 50));
}

#[test]
fn test_rigid_body_integrates_and_moves_transform() {
    let mut scene = Scene::default();
    let id = scene.spawn(ObjectBuilder::new("body").with(RigidBody::new()));

    // One frame of 60 units/s² along x for one step of DT.
    scene
        .with_component_mut::<RigidBody, _>(id, |body| body.forces_add(&Fix16Vec2::from_int(60, 0)))
        .unwrap()
        .unwrap();
    scene.tick().unwrap();

    let (velocity, displacement, forces) = scene
        .with_component::<RigidBody, _>(id, |body| {
            (body.velocity, body.displacement, body.forces_count())
        })
        .unwrap();
    assert_eq!(forces, 0);
    assert_eq!(velocity.x, Fix16::from_int(60) * DT);
    assert_eq!(displacement.x, velocity.x * DT);
    assert_eq!(scene.transform(id).unwrap().position, displacement);
    assert_relative_eq!(velocity.x.to_f64(), 1.0, epsilon = 0.01);
}

#[test]
fn test_rigid_body_bounds_confine_and_stop() {
    let mut body = RigidBody::new().with_bounds(Fix16Vec2::ZERO, Fix16Vec2::from_int(10, 10));
    body.velocity = Fix16Vec2::from_int(-120, 30);
    body.step(DT);

    assert_eq!(body.displacement.x, Fix16::ZERO);
    assert_eq!(body.velocity.x, Fix16::ZERO);
    assert_eq!(body.velocity.y, Fix16::from_int(30));
    assert!(body.displacement.y > Fix16::ZERO);
}

#[test]
fn test_rigid_body_integration_can_be_disabled() {
    let mut body = RigidBody::new();
    body.integrate = false;

    let mut scene = Scene::default();
    let id = scene.spawn(ObjectBuilder::new("static").at(Fix16Vec2::from_int(5, 5)).with(body));
    scene
        .with_component_mut::<RigidBody, _>(id, |body| body.forces_add(&vec2(9.0, 9.0)))
        .unwrap()
        .unwrap();
    scene.tick().unwrap();

    assert_eq!(scene.transform(id).unwrap(), Transform::at(Fix16Vec2::from_int(5, 5)));
    let forces = scene.with_component::<RigidBody, _>(id, |b| b.forces_count()).unwrap();
    assert_eq!(forces, 1);
}

// ---- Coin manager ----

#[test]
fn test_coin_pool_capacity() {
    let mut coins = CoinManager::new();
    for i in 0..COIN_POOL_CAPACITY {
        coins.spawn(Fix16::from_int(i as i32), Fix16::ZERO, 1).unwrap();
    }
    assert_eq!(coins.coins, COIN_POOL_CAPACITY as u32);
    assert_eq!(coins.spawn(Fix16::ZERO, Fix16::ZERO, 1), Err(CoinError::PoolFull));
    assert_eq!(coins.coins, COIN_POOL_CAPACITY as u32);
}

#[test]
fn test_coin_spawn_event_on_next_update() {
    let mut scene = Scene::default();
    let id = scene.spawn(ObjectBuilder::new("coins").with(CoinManager::new()));
    scene.drain_events();

    scene
        .with_component_mut::<CoinManager, _>(id, |mgr| mgr.spawn(Fix16::from_int(3), Fix16::from_int(4), 5))
        .unwrap()
        .unwrap();
    let report = scene.tick().unwrap();

    assert_eq!(
        report.events,
        vec![SceneEvent::CoinSpawned {
            position: Fix16Vec2::from_int(3, 4),
            value: 5,
        }]
    );
    assert_eq!(report.draw_list.len(), 1);
}

#[test]
fn test_collect_within_sums_and_removes() {
    let mut coins = CoinManager::new();
    coins.spawn(Fix16::from_int(0), Fix16::ZERO, 3).unwrap();
    coins.spawn(Fix16::from_int(10), Fix16::ZERO, 4).unwrap();
    coins.spawn(Fix16::from_int(100), Fix16::ZERO, 50).unwrap();

    let value = coins.collect_within(&Fix16Vec2::ZERO, Fix16::from_int(16));
    assert_eq!(value, 7);
    assert_eq!(coins.collected, 7);
    assert_eq!(coins.coins, 1);

    assert_eq!(coins.collect_within(&Fix16Vec2::ZERO, Fix16::from_int(16)), 0);
    assert_eq!(coins.collected, 7);
}

#[test]
fn test_coins_expire_after_lifetime() {
    let mut scene = Scene::default();
    let id = scene.spawn(ObjectBuilder::new("coins").with(CoinManager::new()));
    scene
        .with_component_mut::<CoinManager, _>(id, |mgr| mgr.spawn(Fix16::ZERO, Fix16::ZERO, 1))
        .unwrap()
        .unwrap();

    let mut expired = Vec::new();
    for _ in 0..COIN_LIFETIME_FRAMES {
        let report = scene.tick().unwrap();
        expired.extend(
            report
                .events
                .into_iter()
                .filter(|e| matches!(e, SceneEvent::CoinExpired { .. })),
        );
    }

    assert_eq!(expired.len(), 1);
    let live = scene.with_component::<CoinManager, _>(id, |mgr| mgr.coins).unwrap();
    assert_eq!(live, 0);
}

#[test]
fn test_coin_destroy_clears_pool() {
    let mut scene = Scene::default();
    let id = scene.spawn(ObjectBuilder::new("coins").with(CoinManager::new()));
    scene
        .with_component_mut::<CoinManager, _>(id, |mgr| mgr.spawn(Fix16::ZERO, Fix16::ZERO, 1))
        .unwrap()
        .unwrap();
    scene.despawn(id).unwrap();
    assert_eq!(scene.object_count(), 0);
}

// ---- Determinism ----

fn run_coin_scene(seed: u64) -> Vec<String> {
    let mut scene = Scene::new(SceneConfig {
        seed,
        ..Default::default()
    });
    let id = scene.spawn(ObjectBuilder::new("coins").with(CoinManager::new()));
    let mut frames = Vec::new();
    for i in 0..40 {
        scene
            .with_component_mut::<CoinManager, _>(id, |mgr| {
                mgr.spawn(Fix16::from_int(i), Fix16::ZERO, 1)
            })
            .unwrap()
            .unwrap_or(());
        let report = scene.tick().unwrap();
        frames.push(serde_json::to_string(&report.draw_list).unwrap());
    }
    frames
}

#[test]
fn test_determinism_same_seed() {
    assert_eq!(run_coin_scene(7), run_coin_scene(7));
}

#[test]
fn test_determinism_different_seeds() {
    assert_ne!(run_coin_scene(1), run_coin_scene(2));
}
