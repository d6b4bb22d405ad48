//! 3D object demo: one model pushed away from the eye and transformed through
//! the matrix stack each frame. Up moves it away, Down brings it closer.

pub mod model;
pub mod object;

use tracing::debug;

use blue_core::constants::DRAW_LIST_CAPACITY;
use blue_core::draw::{DrawCommand, DrawList};
use blue_core::input::{DigitalButtons, DigitalPad};
use blue_core::matrix::{MatrixStack, PushMode};
use blue_core::{Angle, Fix16, Int16Vec2};

use crate::{Demo, DemoError, Frame};

pub use model::{ModelError, PolygonData};
pub use object::{Object3d, ObjectFlags};

pub const SCREEN_WIDTH: i16 = 320;
pub const SCREEN_HEIGHT: i16 = 224;

/// Commands ahead of the object's: system clip, user clip, local coords.
pub const PREAMBLE_COUNT: usize = 3;

/// Starting distance from the eye.
pub const START_DEPTH: Fix16 = Fix16::from_int(100);

pub struct Sega3dDemo {
    object: Object3d,
    stack: MatrixStack,
    angle: Angle,
    depth: Fix16,
    rotate: bool,
}

impl Sega3dDemo {
    /// Prepare `model` for drawing.
    pub fn new(model: PolygonData, flags: ObjectFlags) -> Result<Self, DemoError> {
        let mut object = Object3d::new(model, PREAMBLE_COUNT, flags);
        object.prepare()?;
        debug!(polygons = object.polygon_count(), ?flags, "object prepared");
        Ok(Self {
            object,
            stack: MatrixStack::new(),
            angle: Angle::ZERO,
            depth: START_DEPTH,
            rotate: false,
        })
    }

    /// Also spin the object about Y by the same angle the depth tracks.
    pub fn with_rotation(mut self, rotate: bool) -> Self {
        self.rotate = rotate;
        self
    }

    pub fn object(&self) -> &Object3d {
        &self.object
    }

    pub fn object_mut(&mut self) -> &mut Object3d {
        &mut self.object
    }

    pub fn depth(&self) -> Fix16 {
        self.depth
    }

    pub fn angle(&self) -> Angle {
        self.angle
    }

    fn transform_object(&mut self) -> Result<(), DemoError> {
        self.stack.push(PushMode::Push)?;
        self.stack.translate(Fix16::ZERO, Fix16::ZERO, self.depth);
        if self.rotate {
            self.stack.rotate_y(self.angle);
        }
        let transformed = self.object.transform(&self.stack);
        self.stack.pop()?;
        transformed?;
        Ok(())
    }
}

impl Demo for Sega3dDemo {
    fn name(&self) -> &'static str {
        "sega3d"
    }

    fn frame(&mut self, pad: &DigitalPad, _frame_time_ms: Fix16) -> Result<Frame, DemoError> {
        self.transform_object()?;
        self.object.iterate();

        if pad.is_pressed(DigitalButtons::UP) {
            self.angle += Angle::from_degrees(1.0);
            self.depth += Fix16::ONE;
        } else if pad.is_pressed(DigitalButtons::DOWN) {
            self.angle -= Angle::from_degrees(1.0);
            self.depth -= Fix16::ONE;
        }

        let extent = Int16Vec2::new(SCREEN_WIDTH - 1, SCREEN_HEIGHT - 1);
        let mut draw = DrawList::with_capacity(DRAW_LIST_CAPACITY);
        draw.push(DrawCommand::SystemClip { extent })?;
        draw.push(DrawCommand::UserClip {
            upper_left: Int16Vec2::ZERO,
            lower_right: extent,
        })?;
        draw.push(DrawCommand::LocalCoords {
            origin: Int16Vec2::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2),
        })?;
        debug_assert_eq!(draw.len(), self.object.offset);
        draw.extend(self.object.commands().iter().cloned())?;
        draw.terminate()?;

        Ok(Frame {
            draw,
            debug_text: format!(
                "{} commands, depth {:.1}",
                self.object.count, self.depth
            ),
        })
    }
}
