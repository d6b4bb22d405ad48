//! Zoom anchor selection state machine.
//!
//! Pure state over plain data: one `step` per frame with the pad state.
//! The sprite's display extent is the inclusive last pixel, so the
//! unscaled sprite is `(SPRITE_WIDTH - 1, SPRITE_HEIGHT - 1)`.

use serde::{Deserialize, Serialize};

use blue_core::draw::ZoomAnchor;
use blue_core::input::{DigitalButtons, DigitalPad};
use blue_core::{Int16Vec2, Rgb1555};

use super::boundary::get_boundary;
use super::{SPRITE_HEIGHT, SPRITE_WIDTH, WAIT_FRAMES};

pub const COLOR_SELECT: Rgb1555 = Rgb1555::new(1, 0, 0, 31);
pub const COLOR_WAIT: Rgb1555 = Rgb1555::new(1, 31, 0, 0);
pub const COLOR_HIGHLIGHT: Rgb1555 = Rgb1555::new(1, 0, 31, 0);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomState {
    /// Pointer at the centre, unscaled sprite.
    #[default]
    MoveOrigin,
    /// A direction is held; debounce before moving the pointer.
    Wait,
    /// Pointer follows the held direction and picks an anchor.
    MoveAnchor,
    /// Anchor locked; waiting for the directions to be released.
    ReleaseButtons,
    /// Directions resize the sprite around the locked anchor.
    SelectAnchor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomFsm {
    pub state: ZoomState,
    pub display: Int16Vec2,
    pub anchor: ZoomAnchor,
    /// Sprite-relative position of the anchor.
    pub zoom_point: Int16Vec2,
    pub pointer: Int16Vec2,
    pub pointer_color: Rgb1555,
    pub delay_frames: u32,
}

impl Default for ZoomFsm {
    fn default() -> Self {
        Self {
            state: ZoomState::MoveOrigin,
            display: Int16Vec2::new(SPRITE_WIDTH, SPRITE_HEIGHT),
            anchor: ZoomAnchor::Center,
            zoom_point: Int16Vec2::ZERO,
            pointer: Int16Vec2::ZERO,
            pointer_color: COLOR_SELECT,
            delay_frames: 0,
        }
    }
}

impl ZoomFsm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the current state once. Returns the new state if it changed.
    pub fn step(&mut self, pad: &DigitalPad) -> Option<ZoomState> {
        let before = self.state;
        match self.state {
            ZoomState::MoveOrigin => self.move_origin(pad),
            ZoomState::Wait => self.wait(pad),
            ZoomState::MoveAnchor => self.move_anchor(pad),
            ZoomState::ReleaseButtons => self.release_buttons(pad),
            ZoomState::SelectAnchor => self.select_anchor(pad),
        }
        (self.state != before).then_some(self.state)
    }

    fn move_origin(&mut self, pad: &DigitalPad) {
        self.pointer = Int16Vec2::ZERO;
        self.display = Int16Vec2::new(SPRITE_WIDTH - 1, SPRITE_HEIGHT - 1);
        self.anchor = ZoomAnchor::Center;
        self.zoom_point = Int16Vec2::ZERO;
        self.pointer_color = COLOR_SELECT;
        self.delay_frames = 0;

        if pad.directions_pressed() {
            self.state = ZoomState::Wait;
        } else if pad.is_just_pressed(DigitalButtons::A) {
            self.state = ZoomState::ReleaseButtons;
        }
    }

    fn wait(&mut self, pad: &DigitalPad) {
        self.delay_frames += 1;

        if self.delay_frames > WAIT_FRAMES {
            self.delay_frames = 0;
            self.state = ZoomState::MoveAnchor;
        } else if !pad.directions_pressed() {
            self.delay_frames = 0;
            self.state = ZoomState::MoveOrigin;
        }
    }

    fn move_anchor(&mut self, pad: &DigitalPad) {
        let mut pointer = Int16Vec2::ZERO;
        if pad.is_pressed(DigitalButtons::LEFT) {
            pointer.x = -self.display.x / 2;
        }
        if pad.is_pressed(DigitalButtons::RIGHT) {
            pointer.x = self.display.x / 2;
        }
        if pad.is_pressed(DigitalButtons::UP) {
            pointer.y = -self.display.y / 2;
        }
        if pad.is_pressed(DigitalButtons::DOWN) {
            pointer.y = self.display.y / 2;
        }
        self.pointer = pointer;

        let column = pointer.x.signum() as i8;
        let row = pointer.y.signum() as i8;
        self.anchor = anchor_at(column, row);
        self.zoom_point = zoom_point(column, row);

        if !pad.directions_pressed() {
            self.state = ZoomState::MoveOrigin;
        } else if pad.is_just_pressed(DigitalButtons::A) {
            self.state = ZoomState::ReleaseButtons;
        }
    }

    fn release_buttons(&mut self, pad: &DigitalPad) {
        self.pointer_color = COLOR_WAIT;

        if !pad.directions_pressed() {
            self.state = ZoomState::SelectAnchor;
        }
    }

    fn select_anchor(&mut self, pad: &DigitalPad) {
        self.pointer_color = COLOR_HIGHLIGHT;

        let bounds = get_boundary(self.anchor);
        let dw = bounds.w_dir;
        let dh = bounds.h_dir;

        if pad.is_pressed(DigitalButtons::UP) && bounds.contains_height(self.display.y + dh) {
            self.display.y += dh;
        }
        if pad.is_pressed(DigitalButtons::DOWN) && bounds.contains_height(self.display.y - dh) {
            self.display.y -= dh;
        }
        if pad.is_pressed(DigitalButtons::LEFT) && bounds.contains_width(self.display.x - dw) {
            self.display.x -= dw;
        }
        if pad.is_pressed(DigitalButtons::RIGHT) && bounds.contains_width(self.display.x + dw) {
            self.display.x += dw;
        }

        if pad.is_just_pressed(DigitalButtons::B) {
            self.state = ZoomState::MoveOrigin;
        }
    }
}

/// Anchor for a pointer octant (`column`/`row` in -1..=1).
pub fn anchor_at(column: i8, row: i8) -> ZoomAnchor {
    match (column, row) {
        (-1, -1) => ZoomAnchor::UpperLeft,
        (0, -1) => ZoomAnchor::UpperCenter,
        (1, -1) => ZoomAnchor::UpperRight,
        (-1, 0) => ZoomAnchor::CenterLeft,
        (1, 0) => ZoomAnchor::CenterRight,
        (-1, 1) => ZoomAnchor::LowerLeft,
        (0, 1) => ZoomAnchor::LowerCenter,
        (1, 1) => ZoomAnchor::LowerRight,
        _ => ZoomAnchor::Center,
    }
}

/// Sprite-relative anchor position for a pointer octant.
pub fn zoom_point(column: i8, row: i8) -> Int16Vec2 {
    let x = match column {
        c if c < 0 => -(SPRITE_WIDTH / 2 - 1),
        c if c > 0 => SPRITE_WIDTH / 2,
        _ => 0,
    };
    let y = match row {
        r if r < 0 => -(SPRITE_HEIGHT / 2 - 1),
        r if r > 0 => SPRITE_HEIGHT / 2,
        _ => 0,
    };
    Int16Vec2::new(x, y)
}
