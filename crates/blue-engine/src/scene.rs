//! The scene: owns the hecs world of game objects and drives their
//! component lifecycles one frame at a time.
//!
//! A frame is: update pass, deferred commands (despawns), draw pass. The
//! scene is headless and deterministic for a given seed and input sequence.

use std::any::type_name;
use std::fmt;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use blue_core::constants::{DRAW_LIST_CAPACITY, DT};
use blue_core::draw::{DrawList, DrawListError};
use blue_core::events::SceneEvent;
use blue_core::Fix16;

use crate::component::{Component, SceneCommand};
use crate::object::{Components, ObjectBuilder, ObjectId, ObjectName, Transform};
use crate::systems::lifecycle::{self, HookEnv};
use crate::systems::cleanup;

/// Configuration for a new scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneConfig {
    /// RNG seed. Same seed and inputs give the same frames.
    pub seed: u64,
    /// Fixed time step handed to every update hook.
    pub dt: Fix16,
    /// Command capacity of each frame's draw list.
    pub draw_capacity: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            dt: DT,
            draw_capacity: DRAW_LIST_CAPACITY,
        }
    }
}

/// Output of one `Scene::tick`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub draw_list: DrawList,
    pub events: Vec<SceneEvent>,
    /// Live objects after the frame's despawns.
    pub objects: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    NoSuchObject(ObjectId),
    MissingComponent {
        object: ObjectId,
        component: &'static str,
    },
    Draw(DrawListError),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::NoSuchObject(object) => write!(f, "no such object {object}"),
            SceneError::MissingComponent { object, component } => {
                write!(f, "object {object} has no component {component}")
            }
            SceneError::Draw(err) => write!(f, "draw pass failed: {err}"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Draw(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DrawListError> for SceneError {
    fn from(err: DrawListError) -> Self {
        SceneError::Draw(err)
    }
}

pub struct Scene {
    world: World,
    frame: u64,
    dt: Fix16,
    draw_capacity: usize,
    rng: ChaCha8Rng,
    commands: Vec<SceneCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<SceneEvent>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            world: World::new(),
            frame: 0,
            dt: config.dt,
            draw_capacity: config.draw_capacity,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            commands: Vec::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Add an object and run its components' `on_init` hooks.
    pub fn spawn(&mut self, builder: ObjectBuilder) -> ObjectId {
        let ObjectBuilder {
            name,
            transform,
            components,
        } = builder;

        let entity = self
            .world
            .spawn((transform, Components::new(components), ObjectName(name.clone())));
        let object = ObjectId(entity);

        debug!(%object, name = %name, frame = self.frame, "spawn");
        self.events.push(SceneEvent::ObjectSpawned {
            object: object.index(),
            name,
        });

        if let Ok((transform, components)) = self
            .world
            .query_one_mut::<(&mut Transform, &mut Components)>(entity)
        {
            let mut env = HookEnv {
                frame: self.frame,
                dt: self.dt,
                rng: &mut self.rng,
                events: &mut self.events,
                commands: &mut self.commands,
            };
            lifecycle::init(object, transform, components, &mut env);
        }

        object
    }

    /// Run the object's `on_destroy` hooks and remove it immediately.
    pub fn despawn(&mut self, object: ObjectId) -> Result<(), SceneError> {
        let name = match self
            .world
            .query_one_mut::<(&mut Transform, &mut Components, &ObjectName)>(object.0)
        {
            Ok((transform, components, name)) => {
                let mut env = HookEnv {
                    frame: self.frame,
                    dt: self.dt,
                    rng: &mut self.rng,
                    events: &mut self.events,
                    commands: &mut self.commands,
                };
                lifecycle::destroy(object, transform, components, &mut env);
                name.0.clone()
            }
            Err(_) => return Err(SceneError::NoSuchObject(object)),
        };

        self.world
            .despawn(object.0)
            .map_err(|_| SceneError::NoSuchObject(object))?;

        debug!(%object, name = %name, frame = self.frame, "despawn");
        self.events.push(SceneEvent::ObjectDestroyed {
            object: object.index(),
            name,
        });
        Ok(())
    }

    /// Advance one frame: update, deferred despawns, then draw.
    pub fn tick(&mut self) -> Result<FrameReport, SceneError> {
        {
            let mut env = HookEnv {
                frame: self.frame,
                dt: self.dt,
                rng: &mut self.rng,
                events: &mut self.events,
                commands: &mut self.commands,
            };
            lifecycle::update(&mut self.world, &mut env);
        }

        self.apply_commands();

        let mut draw_list = DrawList::with_capacity(self.draw_capacity);
        if let Err(err) = lifecycle::draw(&self.world, self.frame, &mut draw_list) {
            // The frame still happened; its events go with it.
            let dropped = std::mem::take(&mut self.events).len();
            warn!(frame = self.frame, error = %err, dropped, "draw pass aborted");
            self.frame += 1;
            return Err(err.into());
        }

        let report = FrameReport {
            frame: self.frame,
            draw_list,
            events: std::mem::take(&mut self.events),
            objects: self.object_count(),
        };
        self.frame += 1;
        Ok(report)
    }

    /// Resolve queued despawns. Destroy hooks may queue more; those run in
    /// the same frame.
    fn apply_commands(&mut self) {
        while !self.commands.is_empty() {
            cleanup::collect(&self.world, &mut self.commands, &mut self.despawn_buffer);
            let buffer = std::mem::take(&mut self.despawn_buffer);
            for &entity in &buffer {
                if let Err(err) = self.despawn(ObjectId(entity)) {
                    warn!(error = %err, "deferred despawn skipped");
                }
            }
            self.despawn_buffer = buffer;
        }
    }

    /// Borrow the first component of type `T` on `object`.
    pub fn with_component<T, R>(
        &self,
        object: ObjectId,
        f: impl FnOnce(&T) -> R,
    ) -> Result<R, SceneError>
    where
        T: Component,
    {
        let components = self
            .world
            .get::<&Components>(object.0)
            .map_err(|_| SceneError::NoSuchObject(object))?;
        let component = components
            .get::<T>()
            .ok_or(SceneError::MissingComponent {
                object,
                component: type_name::<T>(),
            })?;
        Ok(f(component))
    }

    pub fn with_component_mut<T, R>(
        &mut self,
        object: ObjectId,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R, SceneError>
    where
        T: Component,
    {
        let components = self
            .world
            .query_one_mut::<&mut Components>(object.0)
            .map_err(|_| SceneError::NoSuchObject(object))?;
        let component = components
            .get_mut::<T>()
            .ok_or(SceneError::MissingComponent {
                object,
                component: type_name::<T>(),
            })?;
        Ok(f(component))
    }

    /// Enable or disable the first component of type `T` on `object`.
    pub fn set_active<T: Component>(&mut self, object: ObjectId, active: bool) -> Result<(), SceneError> {
        let components = self
            .world
            .query_one_mut::<&mut Components>(object.0)
            .map_err(|_| SceneError::NoSuchObject(object))?;
        if components.set_active::<T>(active) {
            Ok(())
        } else {
            Err(SceneError::MissingComponent {
                object,
                component: type_name::<T>(),
            })
        }
    }

    pub fn is_active<T: Component>(&self, object: ObjectId) -> Result<bool, SceneError> {
        let components = self
            .world
            .get::<&Components>(object.0)
            .map_err(|_| SceneError::NoSuchObject(object))?;
        components.is_active::<T>().ok_or(SceneError::MissingComponent {
            object,
            component: type_name::<T>(),
        })
    }

    pub fn transform(&self, object: ObjectId) -> Result<Transform, SceneError> {
        self.world
            .get::<&Transform>(object.0)
            .map(|transform| *transform)
            .map_err(|_| SceneError::NoSuchObject(object))
    }

    pub fn set_transform(&mut self, object: ObjectId, transform: Transform) -> Result<(), SceneError> {
        let current = self
            .world
            .query_one_mut::<&mut Transform>(object.0)
            .map_err(|_| SceneError::NoSuchObject(object))?;
        *current = transform;
        Ok(())
    }

    pub fn contains(&self, object: ObjectId) -> bool {
        self.world.contains(object.0)
    }

    /// First live object with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        let mut query = self.world.query::<&ObjectName>();
        query
            .iter()
            .find(|(_, object_name)| object_name.0 == name)
            .map(|(entity, _)| ObjectId(entity))
    }

    pub fn object_count(&self) -> usize {
        self.world.len() as usize
    }

    /// Number of the next frame to run.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn dt(&self) -> Fix16 {
        self.dt
    }

    /// Events raised outside `tick` (spawns and despawns between frames).
    /// Events raised during a frame are returned in its `FrameReport`.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }
}
