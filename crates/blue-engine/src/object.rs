//! Game objects: an ECS entity carrying a transform, a name, and an ordered
//! set of lifecycle components.

use std::any::Any;
use std::fmt;

use blue_core::{Angle, Fix16, Fix16Vec2};
use serde::{Deserialize, Serialize};

use crate::component::Component;

/// Handle to an object in a `Scene`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub(crate) hecs::Entity);

impl ObjectId {
    /// Entity index, stable for the object's lifetime (reused after despawn).
    pub fn index(&self) -> u32 {
        self.0.id()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "O{}", self.0.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Fix16Vec2,
    pub rotation: Angle,
    pub scale: Fix16,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Fix16Vec2::ZERO,
            rotation: Angle::ZERO,
            scale: Fix16::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Fix16Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectName(pub String);

pub(crate) struct ComponentSlot {
    pub(crate) component: Box<dyn Component>,
    pub(crate) active: bool,
}

impl ComponentSlot {
    fn is<T: Component>(&self) -> bool {
        let component: &dyn Component = &*self.component;
        let any: &dyn Any = component;
        any.is::<T>()
    }
}

/// Components owned by one object, in insertion order.
pub struct Components {
    pub(crate) slots: Vec<ComponentSlot>,
}

impl Components {
    pub(crate) fn new(components: Vec<Box<dyn Component>>) -> Self {
        Self {
            slots: components
                .into_iter()
                .map(|component| ComponentSlot {
                    component,
                    active: true,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots.iter().map(|slot| slot.component.name())
    }

    /// First component of type `T`.
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.slots.iter().find_map(|slot| {
            let component: &dyn Component = &*slot.component;
            let any: &dyn Any = component;
            any.downcast_ref::<T>()
        })
    }

    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.slots.iter_mut().find_map(|slot| {
            let component: &mut dyn Component = &mut *slot.component;
            let any: &mut dyn Any = component;
            any.downcast_mut::<T>()
        })
    }

    pub fn is_active<T: Component>(&self) -> Option<bool> {
        self.slots.iter().find_map(|slot| {
            slot.is::<T>().then_some(slot.active)
        })
    }

    /// Toggle the first component of type `T`. Returns false if absent.
    pub fn set_active<T: Component>(&mut self, active: bool) -> bool {
        for slot in &mut self.slots {
            if slot.is::<T>() {
                slot.active = active;
                return true;
            }
        }
        false
    }
}

/// Everything needed to spawn an object.
pub struct ObjectBuilder {
    pub(crate) name: String,
    pub(crate) transform: Transform,
    pub(crate) components: Vec<Box<dyn Component>>,
}

impl ObjectBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            components: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn at(mut self, position: Fix16Vec2) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with(mut self, component: impl Component) -> Self {
        self.components.push(Box::new(component));
        self
    }

    pub fn with_boxed(mut self, component: Box<dyn Component>) -> Self {
        self.components.push(component);
        self
    }
}
