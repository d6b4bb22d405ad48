//! Core types and definitions for the BLUE engine and demos.
//!
//! This crate defines the vocabulary shared across all other crates:
//! fixed-point math, colours, pad input, draw lists, events, and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod angle;
pub mod color;
pub mod constants;
pub mod draw;
pub mod events;
pub mod fixed;
pub mod input;
pub mod matrix;
pub mod vector;

pub use angle::Angle;
pub use color::Rgb1555;
pub use fixed::Fix16;
pub use vector::{Fix16Vec2, Fix16Vec3, Int16Vec2};

#[cfg(test)]
mod tests;
