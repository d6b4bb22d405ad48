//! Draw list: the ordered commands a frame submits to the sprite/polygon
//! processor. Commands are typed values, not packed command tables.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::color::Rgb1555;
use crate::vector::Int16Vec2;

bitflags! {
    /// Per-command draw mode switches.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct DrawMode: u16 {
        const MESH = 1 << 8;
        const END_CODE_DISABLE = 1 << 7;
        const TRANS_PIXEL_DISABLE = 1 << 6;
        const PRE_CLIPPING_DISABLE = 1 << 11;
    }
}

/// The fixed point of a scaled sprite while its display extent changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoomAnchor {
    UpperLeft,
    UpperCenter,
    UpperRight,
    CenterLeft,
    #[default]
    Center,
    CenterRight,
    LowerLeft,
    LowerCenter,
    LowerRight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DrawCommand {
    /// Clip rectangle for all following commands, from (0,0) to `extent`.
    SystemClip { extent: Int16Vec2 },
    UserClip {
        upper_left: Int16Vec2,
        lower_right: Int16Vec2,
    },
    /// Origin added to every following vertex.
    LocalCoords { origin: Int16Vec2 },
    Polygon {
        points: [Int16Vec2; 4],
        color: Rgb1555,
        mode: DrawMode,
    },
    PolyLine {
        points: [Int16Vec2; 4],
        color: Rgb1555,
        mode: DrawMode,
    },
    /// Sprite whose character data starts `char_offset` bytes into the
    /// texture area, scaled to `display` around `anchor` placed at `point`.
    ScaledSprite {
        char_offset: u32,
        width: u16,
        height: u16,
        anchor: ZoomAnchor,
        point: Int16Vec2,
        display: Int16Vec2,
        color_bank: u16,
        mode: DrawMode,
    },
    Sprite {
        char_offset: u32,
        width: u16,
        height: u16,
        position: Int16Vec2,
        color_bank: u16,
        mode: DrawMode,
    },
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawListError {
    Full { capacity: usize },
    SlotOutOfRange { slot: usize, len: usize },
}

impl fmt::Display for DrawListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawListError::Full { capacity } => {
                write!(f, "draw list full ({capacity} commands)")
            }
            DrawListError::SlotOutOfRange { slot, len } => {
                write!(f, "draw list slot {slot} out of range (len {len})")
            }
        }
    }
}

impl std::error::Error for DrawListError {}

/// Bounded, ordered list of draw commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    capacity: usize,
}

impl DrawList {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity.min(256)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Append a command and return its slot.
    pub fn push(&mut self, command: DrawCommand) -> Result<usize, DrawListError> {
        if self.commands.len() >= self.capacity {
            return Err(DrawListError::Full {
                capacity: self.capacity,
            });
        }
        self.commands.push(command);
        Ok(self.commands.len() - 1)
    }

    pub fn extend<I>(&mut self, commands: I) -> Result<(), DrawListError>
    where
        I: IntoIterator<Item = DrawCommand>,
    {
        for command in commands {
            self.push(command)?;
        }
        Ok(())
    }

    pub fn set(&mut self, slot: usize, command: DrawCommand) -> Result<(), DrawListError> {
        let len = self.commands.len();
        match self.commands.get_mut(slot) {
            Some(existing) => {
                *existing = command;
                Ok(())
            }
            None => Err(DrawListError::SlotOutOfRange { slot, len }),
        }
    }

    pub fn get(&self, slot: usize) -> Option<&DrawCommand> {
        self.commands.get(slot)
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.commands.last(), Some(DrawCommand::End))
    }

    /// Append `End` unless the list already ends with it.
    pub fn terminate(&mut self) -> Result<(), DrawListError> {
        if !self.is_terminated() {
            self.push(DrawCommand::End)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCommand> {
        self.commands.iter()
    }

    pub fn as_slice(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
