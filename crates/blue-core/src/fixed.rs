//! Signed 16.16 fixed-point scalar on top of `fixed::types::I16F16`.
//!
//! Rounding follows libfixmath: products and quotients round to nearest with
//! ties away from zero, and division by zero through the operator yields
//! `MIN`. Out-of-range results saturate instead of wrapping.

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use fixed::types::I16F16;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fix16(I16F16);

impl Fix16 {
    pub const FRAC_BITS: u32 = 16;
    pub const ZERO: Fix16 = Fix16::from_raw(0);
    pub const ONE: Fix16 = Fix16::from_raw(1 << 16);
    pub const HALF: Fix16 = Fix16::from_raw(1 << 15);
    pub const MAX: Fix16 = Fix16(I16F16::MAX);
    pub const MIN: Fix16 = Fix16(I16F16::MIN);
    /// Smallest representable step (1/65536).
    pub const EPSILON: Fix16 = Fix16(I16F16::DELTA);

    pub const fn from_raw(raw: i32) -> Self {
        Fix16(I16F16::from_bits(raw))
    }

    pub const fn raw(self) -> i32 {
        self.0.to_bits()
    }

    /// Integer to fixed point, saturating outside ±32767.
    pub const fn from_int(value: i32) -> Self {
        Fix16::from_raw(value.saturating_mul(1 << 16))
    }

    /// Nearest fixed-point value, ties away from zero. NaN maps to zero.
    pub fn from_f64(value: f64) -> Self {
        // `as` saturates at the i32 bounds
        Fix16::from_raw((value * 65536.0).round() as i32)
    }

    pub fn from_f32(value: f32) -> Self {
        Self::from_f64(f64::from(value))
    }

    pub fn to_f64(self) -> f64 {
        self.0.to_num::<f64>()
    }

    pub fn to_f32(self) -> f32 {
        self.0.to_num::<f32>()
    }

    /// Round to the nearest integer, ties away from zero.
    pub fn to_int(self) -> i32 {
        self.0.saturating_round().to_num::<i32>()
    }

    /// Largest integer not greater than `self`.
    pub fn floor(self) -> i32 {
        self.0.to_num::<i32>()
    }

    /// Fractional part, always non-negative.
    pub fn frac(self) -> Fix16 {
        Fix16(self.0.frac())
    }

    pub fn is_negative(self) -> bool {
        self.0.is_negative()
    }

    pub fn abs(self) -> Fix16 {
        Fix16(self.0.saturating_abs())
    }

    pub fn checked_mul(self, rhs: Fix16) -> Option<Fix16> {
        i32::try_from(mul_rounded(self.raw(), rhs.raw()))
            .ok()
            .map(Fix16::from_raw)
    }

    pub fn saturating_mul(self, rhs: Fix16) -> Fix16 {
        saturate(mul_rounded(self.raw(), rhs.raw()))
    }

    pub fn checked_div(self, rhs: Fix16) -> Option<Fix16> {
        if rhs == Fix16::ZERO {
            return None;
        }
        i32::try_from(div_rounded(self.raw(), rhs.raw()))
            .ok()
            .map(Fix16::from_raw)
    }

    /// Division that saturates on overflow and returns `MIN` for a zero divisor.
    pub fn saturating_div(self, rhs: Fix16) -> Fix16 {
        if rhs == Fix16::ZERO {
            return Fix16::MIN;
        }
        saturate(div_rounded(self.raw(), rhs.raw()))
    }

    /// Square root. Negative inputs have no real root and yield zero.
    pub fn sqrt(self) -> Fix16 {
        if self.0 <= I16F16::ZERO {
            return Fix16::ZERO;
        }
        Fix16(self.0.sqrt())
    }

    pub fn min(self, other: Fix16) -> Fix16 {
        Ord::min(self, other)
    }

    pub fn max(self, other: Fix16) -> Fix16 {
        Ord::max(self, other)
    }

    pub fn clamp(self, lo: Fix16, hi: Fix16) -> Fix16 {
        Ord::clamp(self, lo, hi)
    }

    /// Sum with a single saturation at the end, so out-of-range partial sums
    /// don't change the result.
    pub fn exact_sum<I: IntoIterator<Item = Fix16>>(values: I) -> Fix16 {
        saturate(values.into_iter().map(|v| i64::from(v.raw())).sum())
    }
}

fn mul_rounded(a: i32, b: i32) -> i64 {
    let mut product = i64::from(a) * i64::from(b);
    if product < 0 {
        // keeps -1/2 ulp rounding symmetric with +1/2 ulp
        product -= 1;
    }
    (product >> 16) + ((product & 0x8000) >> 15)
}

fn div_rounded(a: i32, b: i32) -> i64 {
    let numerator = i64::from(a) << 16;
    let denominator = i64::from(b);
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.abs() * 2 >= denominator.abs() {
        if (numerator < 0) == (denominator < 0) {
            quotient + 1
        } else {
            quotient - 1
        }
    } else {
        quotient
    }
}

fn saturate(value: i64) -> Fix16 {
    Fix16::from_raw(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

/// Serialized as the raw 16.16 integer.
impl Serialize for Fix16 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.raw())
    }
}

impl<'de> Deserialize<'de> for Fix16 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i32::deserialize(deserializer).map(Fix16::from_raw)
    }
}

impl From<i16> for Fix16 {
    fn from(value: i16) -> Self {
        Fix16::from_int(i32::from(value))
    }
}

impl Add for Fix16 {
    type Output = Fix16;

    fn add(self, rhs: Fix16) -> Fix16 {
        Fix16(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Fix16 {
    fn add_assign(&mut self, rhs: Fix16) {
        *self = *self + rhs;
    }
}

impl Sub for Fix16 {
    type Output = Fix16;

    fn sub(self, rhs: Fix16) -> Fix16 {
        Fix16(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Fix16 {
    fn sub_assign(&mut self, rhs: Fix16) {
        *self = *self - rhs;
    }
}

impl Mul for Fix16 {
    type Output = Fix16;

    fn mul(self, rhs: Fix16) -> Fix16 {
        self.saturating_mul(rhs)
    }
}

impl MulAssign for Fix16 {
    fn mul_assign(&mut self, rhs: Fix16) {
        *self = *self * rhs;
    }
}

impl Div for Fix16 {
    type Output = Fix16;

    fn div(self, rhs: Fix16) -> Fix16 {
        self.saturating_div(rhs)
    }
}

impl DivAssign for Fix16 {
    fn div_assign(&mut self, rhs: Fix16) {
        *self = *self / rhs;
    }
}

impl Neg for Fix16 {
    type Output = Fix16;

    fn neg(self) -> Fix16 {
        Fix16(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Fix16 {
    fn sum<I: Iterator<Item = Fix16>>(iter: I) -> Fix16 {
        Fix16::exact_sum(iter)
    }
}

/// Decimal rendering, half-up on the last digit. Precision defaults to 5
/// digits and is capped at 10.
impl fmt::Display for Fix16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(5).min(10);
        let magnitude = self.0.unsigned_abs();

        let mut int_part = u64::from(magnitude.to_num::<u32>());
        let frac = u64::from(magnitude.frac().to_bits());
        let scale = 10u64.pow(precision as u32);
        let mut frac_digits = (frac * scale + 0x8000) >> 16;
        if frac_digits >= scale {
            int_part += 1;
            frac_digits -= scale;
        }

        let sign = if self.is_negative() && (int_part != 0 || frac_digits != 0) {
            "-"
        } else {
            ""
        };
        if precision == 0 {
            write!(f, "{sign}{int_part}")
        } else {
            write!(f, "{sign}{int_part}.{frac_digits:0width$}", width = precision)
        }
    }
}
