//! Zoom sprite demo: an animated scaled sprite whose zoom anchor and display
//! extent are picked with the pad.
//!
//! Move the pointer with the directions, lock an anchor with A, then resize
//! with the directions. B returns to the origin.

pub mod boundary;
pub mod fsm;
pub mod sprite;

use tracing::debug;

use blue_core::constants::DRAW_LIST_CAPACITY;
use blue_core::draw::{DrawCommand, DrawList, DrawMode};
use blue_core::input::DigitalPad;
use blue_core::{Fix16, Int16Vec2};

use crate::assets::SpriteSheet;
use crate::{Demo, DemoError, Frame};

pub use fsm::{ZoomFsm, ZoomState};
pub use sprite::{pointer_quad, SpriteAnimator};

pub const SCREEN_WIDTH: i16 = 320;
pub const SCREEN_HEIGHT: i16 = 240;

pub const SPRITE_WIDTH: i16 = 64;
pub const SPRITE_HEIGHT: i16 = 102;

/// Half edge of the pointer marker.
pub const POINTER_SIZE: i16 = 3;

pub const ANIMATION_FRAME_COUNT: u16 = 14;
/// Counter reload between animation frames.
pub const ANIMATION_FRAME_DURATION: u16 = 3;

/// Frames a direction must be held before the pointer moves.
pub const WAIT_FRAMES: u32 = 9;

/// 16-colour bank the sprite's palette occupies.
pub const SPRITE_COLOR_BANK: u16 = 0x0100;

pub struct ZoomSpriteDemo {
    fsm: ZoomFsm,
    animator: SpriteAnimator,
    sheet: SpriteSheet,
}

impl ZoomSpriteDemo {
    pub fn new(sheet: SpriteSheet) -> Self {
        Self {
            fsm: ZoomFsm::new(),
            animator: SpriteAnimator::new(),
            sheet,
        }
    }

    pub fn fsm(&self) -> &ZoomFsm {
        &self.fsm
    }

    pub fn animator(&self) -> &SpriteAnimator {
        &self.animator
    }

    pub fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }

    fn sprite_command(&mut self) -> DrawCommand {
        DrawCommand::ScaledSprite {
            char_offset: self.animator.advance(),
            width: SPRITE_WIDTH as u16,
            height: SPRITE_HEIGHT as u16,
            anchor: self.fsm.anchor,
            point: self.fsm.zoom_point,
            display: self.fsm.display,
            color_bank: SPRITE_COLOR_BANK,
            mode: DrawMode::TRANS_PIXEL_DISABLE
                | DrawMode::PRE_CLIPPING_DISABLE
                | DrawMode::END_CODE_DISABLE,
        }
    }

    fn pointer_command(&self) -> DrawCommand {
        DrawCommand::Polygon {
            points: pointer_quad(self.fsm.pointer),
            color: self.fsm.pointer_color,
            mode: DrawMode::PRE_CLIPPING_DISABLE,
        }
    }
}

impl Default for ZoomSpriteDemo {
    fn default() -> Self {
        Self::new(SpriteSheet::generated())
    }
}

impl Demo for ZoomSpriteDemo {
    fn name(&self) -> &'static str {
        "zoom-sprite"
    }

    fn frame(&mut self, pad: &DigitalPad, frame_time_ms: Fix16) -> Result<Frame, DemoError> {
        if let Some(state) = self.fsm.step(pad) {
            debug!(?state, anchor = ?self.fsm.anchor, "zoom state changed");
        }

        let mut draw = DrawList::with_capacity(DRAW_LIST_CAPACITY);
        draw.push(DrawCommand::SystemClip {
            extent: Int16Vec2::new(SCREEN_WIDTH - 1, SCREEN_HEIGHT - 1),
        })?;
        draw.push(DrawCommand::LocalCoords {
            origin: Int16Vec2::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2),
        })?;
        let sprite = self.sprite_command();
        draw.push(sprite)?;
        draw.push(self.pointer_command())?;
        draw.terminate()?;

        Ok(Frame {
            draw,
            debug_text: format!("{frame_time_ms:.7}ms"),
        })
    }
}
