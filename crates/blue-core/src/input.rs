//! Digital pad state.
//!
//! The pad is sampled once per frame. `pressed` is the level, `just_pressed`
//! and `just_released` are the edges relative to the previous sample.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Buttons of the digital pad, in the pad's native bit order.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct DigitalButtons: u16 {
        const RIGHT = 1 << 15;
        const LEFT = 1 << 14;
        const DOWN = 1 << 13;
        const UP = 1 << 12;
        const START = 1 << 11;
        const A = 1 << 10;
        const C = 1 << 9;
        const B = 1 << 8;
        const R = 1 << 7;
        const X = 1 << 6;
        const Y = 1 << 5;
        const Z = 1 << 4;
        const L = 1 << 3;

        const DIRECTIONS = Self::RIGHT.bits() | Self::LEFT.bits() | Self::DOWN.bits() | Self::UP.bits();
    }
}

impl DigitalButtons {
    /// Parse a single button name, case-insensitively (`"up"`, `"A"`).
    pub fn parse_name(name: &str) -> Option<DigitalButtons> {
        DigitalButtons::from_name(&name.trim().to_ascii_uppercase())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitalPad {
    pub pressed: DigitalButtons,
    pub just_pressed: DigitalButtons,
    pub just_released: DigitalButtons,
}

impl DigitalPad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch a new sample and recompute the edges.
    pub fn update(&mut self, sample: DigitalButtons) {
        let previous = self.pressed;
        self.pressed = sample;
        self.just_pressed = sample & !previous;
        self.just_released = previous & !sample;
    }

    pub fn is_pressed(&self, buttons: DigitalButtons) -> bool {
        self.pressed.intersects(buttons)
    }

    pub fn is_just_pressed(&self, buttons: DigitalButtons) -> bool {
        self.just_pressed.intersects(buttons)
    }

    pub fn directions_pressed(&self) -> bool {
        self.pressed.intersects(DigitalButtons::DIRECTIONS)
    }
}
