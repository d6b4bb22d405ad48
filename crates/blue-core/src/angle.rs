//! Binary angles: a full turn is 65536 units and arithmetic wraps.

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::fixed::Fix16;

/// Angle units per full turn.
pub const ANGLE_UNITS_PER_TURN: u32 = 1 << 16;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle(u16);

impl Angle {
    pub const ZERO: Angle = Angle(0);
    pub const QUARTER: Angle = Angle(0x4000);
    pub const HALF: Angle = Angle(0x8000);

    pub const fn from_raw(raw: u16) -> Self {
        Angle(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Degrees to angle units, truncating toward zero (1° = 182 units).
    pub fn from_degrees(degrees: f64) -> Self {
        let units = degrees * f64::from(ANGLE_UNITS_PER_TURN) / 360.0;
        Angle((units as i64).rem_euclid(i64::from(ANGLE_UNITS_PER_TURN)) as u16)
    }

    pub fn to_degrees(self) -> f64 {
        f64::from(self.0) * 360.0 / f64::from(ANGLE_UNITS_PER_TURN)
    }

    pub fn to_radians(self) -> f64 {
        f64::from(self.0) * std::f64::consts::TAU / f64::from(ANGLE_UNITS_PER_TURN)
    }

    pub fn sin(self) -> Fix16 {
        Fix16::from_f64(self.to_radians().sin())
    }

    pub fn cos(self) -> Fix16 {
        Fix16::from_f64(self.to_radians().cos())
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0.wrapping_add(rhs.0))
    }
}

impl AddAssign for Angle {
    fn add_assign(&mut self, rhs: Angle) {
        *self = *self + rhs;
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0.wrapping_sub(rhs.0))
    }
}

impl SubAssign for Angle {
    fn sub_assign(&mut self, rhs: Angle) {
        *self = *self - rhs;
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle(self.0.wrapping_neg())
    }
}
