//! The component contract.
//!
//! A component is a unit of behaviour attached to a game object. The scene
//! dispatches four lifecycle hooks through the trait object:
//!
//! - `on_init` once, when the object is spawned
//! - `on_update` once per frame while the component is active
//! - `on_draw` after the frame's update pass while the component is active
//! - `on_destroy` once, when the object is despawned
//!
//! Hooks of one object run in the order its components were added.

use blue_core::draw::{DrawCommand, DrawList, DrawListError};
use blue_core::events::SceneEvent;
use blue_core::Fix16;
use rand_chacha::ChaCha8Rng;

use crate::object::{ObjectId, Transform};

pub trait Component: std::any::Any + Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    fn on_init(&mut self, _ctx: &mut ComponentContext<'_>) {}

    fn on_update(&mut self, _ctx: &mut ComponentContext<'_>) {}

    fn on_draw(&self, _ctx: &mut DrawContext<'_>) -> Result<(), DrawListError> {
        Ok(())
    }

    fn on_destroy(&mut self, _ctx: &mut ComponentContext<'_>) {}
}

/// Deferred scene mutations requested from inside a hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    Despawn(ObjectId),
}

/// What a lifecycle hook may see and touch.
pub struct ComponentContext<'a> {
    pub object: ObjectId,
    pub transform: &'a mut Transform,
    pub frame: u64,
    pub dt: Fix16,
    pub rng: &'a mut ChaCha8Rng,
    events: &'a mut Vec<SceneEvent>,
    commands: &'a mut Vec<SceneCommand>,
}

impl<'a> ComponentContext<'a> {
    pub(crate) fn new(
        object: ObjectId,
        transform: &'a mut Transform,
        frame: u64,
        dt: Fix16,
        rng: &'a mut ChaCha8Rng,
        events: &'a mut Vec<SceneEvent>,
        commands: &'a mut Vec<SceneCommand>,
    ) -> Self {
        Self {
            object,
            transform,
            frame,
            dt,
            rng,
            events,
            commands,
        }
    }

    pub fn emit(&mut self, event: SceneEvent) {
        self.events.push(event);
    }

    /// Despawn the owning object at the end of the current frame.
    pub fn despawn_self(&mut self) {
        self.commands.push(SceneCommand::Despawn(self.object));
    }

    /// Despawn another object at the end of the current frame.
    pub fn despawn(&mut self, object: ObjectId) {
        self.commands.push(SceneCommand::Despawn(object));
    }
}

/// What `on_draw` may see and touch.
pub struct DrawContext<'a> {
    pub object: ObjectId,
    pub transform: &'a Transform,
    pub frame: u64,
    draw_list: &'a mut DrawList,
}

impl<'a> DrawContext<'a> {
    pub(crate) fn new(
        object: ObjectId,
        transform: &'a Transform,
        frame: u64,
        draw_list: &'a mut DrawList,
    ) -> Self {
        Self {
            object,
            transform,
            frame,
            draw_list,
        }
    }

    pub fn submit(&mut self, command: DrawCommand) -> Result<(), DrawListError> {
        self.draw_list.push(command).map(|_| ())
    }
}
