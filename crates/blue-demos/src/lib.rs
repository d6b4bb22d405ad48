//! Demo programs for BLUE.
//!
//! Each demo is a frame-stepping state machine: it takes the pad state and
//! the previous frame's measured time, and returns the frame's draw list plus
//! a line of debug text. No I/O happens inside a frame.

pub mod assets;
pub mod coins;
pub mod error;
pub mod frame_timer;
pub mod sega3d;
pub mod zoom_sprite;

use serde::Serialize;

use blue_core::draw::DrawList;
use blue_core::input::DigitalPad;
use blue_core::Fix16;

pub use blue_core as core;
pub use coins::CoinsDemo;
pub use error::DemoError;
pub use frame_timer::FrameTimer;
pub use sega3d::Sega3dDemo;
pub use zoom_sprite::ZoomSpriteDemo;

/// Output of one demo frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub draw: DrawList,
    pub debug_text: String,
}

pub trait Demo {
    fn name(&self) -> &'static str;

    /// Advance one frame.
    fn frame(&mut self, pad: &DigitalPad, frame_time_ms: Fix16) -> Result<Frame, DemoError>;
}
