//! 15-bit colour with a most-significant flag bit.

use serde::{Deserialize, Serialize};

/// Packed as `msb << 15 | b << 10 | g << 5 | r`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb1555(u16);

impl Rgb1555 {
    pub const BLACK: Rgb1555 = Rgb1555::new(1, 0, 0, 0);
    pub const WHITE: Rgb1555 = Rgb1555::new(1, 31, 31, 31);

    /// Channels above 31 clamp to 31; any non-zero `msb` sets the flag bit.
    pub const fn new(msb: u8, r: u8, g: u8, b: u8) -> Self {
        let msb = if msb != 0 { 1u16 } else { 0 };
        Rgb1555(msb << 15 | (clamp5(b) << 10) | (clamp5(g) << 5) | clamp5(r))
    }

    pub const fn from_raw(raw: u16) -> Self {
        Rgb1555(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn r(self) -> u8 {
        (self.0 & 0x1F) as u8
    }

    pub const fn g(self) -> u8 {
        ((self.0 >> 5) & 0x1F) as u8
    }

    pub const fn b(self) -> u8 {
        ((self.0 >> 10) & 0x1F) as u8
    }

    pub const fn msb(self) -> bool {
        self.0 & 0x8000 != 0
    }
}

const fn clamp5(channel: u8) -> u16 {
    if channel > 31 {
        31
    } else {
        channel as u16
    }
}
