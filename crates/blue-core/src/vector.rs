//! Fixed-point and screen-space vectors.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::fixed::Fix16;

/// 2D fixed-point vector (world space, forces, velocities).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fix16Vec2 {
    pub x: Fix16,
    pub y: Fix16,
}

/// 3D fixed-point vector (model and view space).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fix16Vec3 {
    pub x: Fix16,
    pub y: Fix16,
    pub z: Fix16,
}

/// Integer screen coordinate, relative to the current local origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Int16Vec2 {
    pub x: i16,
    pub y: i16,
}

impl Fix16Vec2 {
    pub const ZERO: Fix16Vec2 = Fix16Vec2 {
        x: Fix16::ZERO,
        y: Fix16::ZERO,
    };

    pub const fn new(x: Fix16, y: Fix16) -> Self {
        Self { x, y }
    }

    pub fn from_f64(x: f64, y: f64) -> Self {
        Self::new(Fix16::from_f64(x), Fix16::from_f64(y))
    }

    pub const fn from_int(x: i32, y: i32) -> Self {
        Self::new(Fix16::from_int(x), Fix16::from_int(y))
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn dot(&self, other: &Fix16Vec2) -> Fix16 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(&self) -> Fix16 {
        self.dot(self).sqrt()
    }

    /// Distance to another point.
    pub fn distance_to(&self, other: &Fix16Vec2) -> Fix16 {
        (*other - *self).length()
    }

    /// Rounded screen coordinate, saturating to the `i16` range.
    pub fn to_screen(&self) -> Int16Vec2 {
        Int16Vec2::new(clamp_i16(self.x.to_int()), clamp_i16(self.y.to_int()))
    }

    pub fn to_glam(&self) -> glam::Vec2 {
        glam::Vec2::new(self.x.to_f32(), self.y.to_f32())
    }
}

impl Fix16Vec3 {
    pub const ZERO: Fix16Vec3 = Fix16Vec3 {
        x: Fix16::ZERO,
        y: Fix16::ZERO,
        z: Fix16::ZERO,
    };

    pub const fn new(x: Fix16, y: Fix16, z: Fix16) -> Self {
        Self { x, y, z }
    }

    pub fn from_f64(x: f64, y: f64, z: f64) -> Self {
        Self::new(Fix16::from_f64(x), Fix16::from_f64(y), Fix16::from_f64(z))
    }

    pub const fn from_int(x: i32, y: i32, z: i32) -> Self {
        Self::new(Fix16::from_int(x), Fix16::from_int(y), Fix16::from_int(z))
    }

    pub fn dot(&self, other: &Fix16Vec3) -> Fix16 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Fix16Vec3) -> Fix16Vec3 {
        Fix16Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length(&self) -> Fix16 {
        self.dot(self).sqrt()
    }

    pub fn to_glam(&self) -> glam::Vec3 {
        glam::Vec3::new(self.x.to_f32(), self.y.to_f32(), self.z.to_f32())
    }
}

impl Int16Vec2 {
    pub const ZERO: Int16Vec2 = Int16Vec2 { x: 0, y: 0 };

    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

fn clamp_i16(value: i32) -> i16 {
    value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

macro_rules! impl_vector_ops {
    ($ty:ident { $($field:ident),+ }) => {
        impl Add for $ty {
            type Output = $ty;

            fn add(self, rhs: $ty) -> $ty {
                $ty { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl AddAssign for $ty {
            fn add_assign(&mut self, rhs: $ty) {
                *self = *self + rhs;
            }
        }

        impl Sub for $ty {
            type Output = $ty;

            fn sub(self, rhs: $ty) -> $ty {
                $ty { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl SubAssign for $ty {
            fn sub_assign(&mut self, rhs: $ty) {
                *self = *self - rhs;
            }
        }

        impl Neg for $ty {
            type Output = $ty;

            fn neg(self) -> $ty {
                $ty { $($field: -self.$field),+ }
            }
        }

        impl Mul<Fix16> for $ty {
            type Output = $ty;

            fn mul(self, rhs: Fix16) -> $ty {
                $ty { $($field: self.$field * rhs),+ }
            }
        }

        impl Div<Fix16> for $ty {
            type Output = $ty;

            fn div(self, rhs: Fix16) -> $ty {
                $ty { $($field: self.$field / rhs),+ }
            }
        }

        impl std::iter::Sum for $ty {
            fn sum<I: Iterator<Item = $ty>>(iter: I) -> $ty {
                iter.fold($ty::ZERO, |acc, v| acc + v)
            }
        }
    };
}

impl_vector_ops!(Fix16Vec2 { x, y });
impl_vector_ops!(Fix16Vec3 { x, y, z });
