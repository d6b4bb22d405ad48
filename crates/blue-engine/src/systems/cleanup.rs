//! Cleanup system: resolves deferred despawn requests made during a frame.

use hecs::{Entity, World};

use crate::component::SceneCommand;

/// Move every live, not-yet-queued despawn target into `despawn_buffer`.
/// Requests for objects that are already gone are dropped.
pub(crate) fn collect(world: &World, commands: &mut Vec<SceneCommand>, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for command in commands.drain(..) {
        match command {
            SceneCommand::Despawn(object) => {
                let entity = object.0;
                if world.contains(entity) && !despawn_buffer.contains(&entity) {
                    despawn_buffer.push(entity);
                }
            }
        }
    }
}
