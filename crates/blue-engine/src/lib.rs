//! Game-object engine for BLUE.
//!
//! Owns the hecs ECS world through `Scene`, dispatches component lifecycle
//! hooks at a fixed frame rate, and produces a draw list per frame.
//! Completely headless, enabling deterministic testing.

pub mod component;
pub mod components;
pub mod object;
pub mod scene;
mod systems;

pub use blue_core as core;
pub use component::{Component, ComponentContext, DrawContext};
pub use object::{ObjectBuilder, ObjectId, Transform};
pub use scene::{FrameReport, Scene, SceneConfig, SceneError};

#[cfg(test)]
mod tests;
