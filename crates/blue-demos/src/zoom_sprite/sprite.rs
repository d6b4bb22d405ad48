//! Sprite animation and the pointer quad.

use blue_core::Int16Vec2;

use super::{ANIMATION_FRAME_COUNT, ANIMATION_FRAME_DURATION, POINTER_SIZE, SPRITE_HEIGHT, SPRITE_WIDTH};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpriteAnimator {
    pub frame: u16,
    pub counter: u16,
}

impl SpriteAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture offset of the current frame, in bytes.
    pub fn char_offset(&self) -> u32 {
        u32::from(self.frame) * SPRITE_WIDTH as u32 * SPRITE_HEIGHT as u32
    }

    /// Return the current frame's offset, then count down toward the next
    /// frame.
    pub fn advance(&mut self) -> u32 {
        let offset = self.char_offset();
        if self.counter == 0 {
            self.counter = ANIMATION_FRAME_DURATION;
            self.frame += 1;
            if self.frame >= ANIMATION_FRAME_COUNT {
                self.frame = 0;
            }
        } else {
            self.counter -= 1;
        }
        offset
    }
}

/// Corners of the square marker centred on `position`, clockwise from the
/// upper right.
pub fn pointer_quad(position: Int16Vec2) -> [Int16Vec2; 4] {
    let s = POINTER_SIZE;
    let Int16Vec2 { x, y } = position;
    [
        Int16Vec2::new(s + x - 1, -s + y),
        Int16Vec2::new(s + x - 1, s + y - 1),
        Int16Vec2::new(-s + x, s + y - 1),
        Int16Vec2::new(-s + x, -s + y),
    ]
}
