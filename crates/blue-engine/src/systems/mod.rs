//! Systems that drive the scene each frame.
//!
//! Systems are plain functions over the hecs `World`; they do not own state.

pub(crate) mod cleanup;
pub(crate) mod lifecycle;
