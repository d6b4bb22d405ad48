//! Lifecycle dispatch: walks objects and calls component hooks.
//!
//! Within one object, hooks run in component insertion order. Inactive
//! components are skipped by update and draw but still see init and destroy.

use blue_core::draw::{DrawList, DrawListError};
use blue_core::events::SceneEvent;
use blue_core::Fix16;
use hecs::World;
use rand_chacha::ChaCha8Rng;

use crate::component::{ComponentContext, DrawContext, SceneCommand};
use crate::object::{Components, ObjectId, Transform};

/// Scene state lent to hooks for the duration of one pass.
pub(crate) struct HookEnv<'a> {
    pub frame: u64,
    pub dt: Fix16,
    pub rng: &'a mut ChaCha8Rng,
    pub events: &'a mut Vec<SceneEvent>,
    pub commands: &'a mut Vec<SceneCommand>,
}

impl HookEnv<'_> {
    fn context<'b>(&'b mut self, object: ObjectId, transform: &'b mut Transform) -> ComponentContext<'b> {
        ComponentContext::new(
            object,
            transform,
            self.frame,
            self.dt,
            &mut *self.rng,
            &mut *self.events,
            &mut *self.commands,
        )
    }
}

pub(crate) fn init(
    object: ObjectId,
    transform: &mut Transform,
    components: &mut Components,
    env: &mut HookEnv<'_>,
) {
    let mut ctx = env.context(object, transform);
    for slot in &mut components.slots {
        slot.component.on_init(&mut ctx);
    }
}

/// Run `on_update` for every active component of every object.
pub(crate) fn update(world: &mut World, env: &mut HookEnv<'_>) {
    for (entity, (transform, components)) in world.query_mut::<(&mut Transform, &mut Components)>() {
        let mut ctx = env.context(ObjectId(entity), transform);
        for slot in components.slots.iter_mut().filter(|slot| slot.active) {
            slot.component.on_update(&mut ctx);
        }
    }
}

/// Run `on_draw` for every active component, appending to `draw_list`.
pub(crate) fn draw(world: &World, frame: u64, draw_list: &mut DrawList) -> Result<(), DrawListError> {
    let mut query = world.query::<(&Transform, &Components)>();
    for (entity, (transform, components)) in query.iter() {
        let mut ctx = DrawContext::new(ObjectId(entity), transform, frame, &mut *draw_list);
        for slot in components.slots.iter().filter(|slot| slot.active) {
            slot.component.on_draw(&mut ctx)?;
        }
    }
    Ok(())
}

pub(crate) fn destroy(
    object: ObjectId,
    transform: &mut Transform,
    components: &mut Components,
    env: &mut HookEnv<'_>,
) {
    let mut ctx = env.context(object, transform);
    for slot in &mut components.slots {
        slot.component.on_destroy(&mut ctx);
    }
}
