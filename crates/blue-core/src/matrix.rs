//! 3×4 fixed-point affine matrices and the bounded matrix stack used by the
//! 3D object transform.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::angle::Angle;
use crate::constants::MATRIX_STACK_DEPTH;
use crate::fixed::Fix16;
use crate::vector::Fix16Vec3;

/// Row-major 3×4 matrix. Column 3 holds the translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix16Mat43 {
    pub rows: [[Fix16; 4]; 3],
}

impl Default for Fix16Mat43 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Fix16Mat43 {
    pub const IDENTITY: Fix16Mat43 = Fix16Mat43 {
        rows: [
            [Fix16::ONE, Fix16::ZERO, Fix16::ZERO, Fix16::ZERO],
            [Fix16::ZERO, Fix16::ONE, Fix16::ZERO, Fix16::ZERO],
            [Fix16::ZERO, Fix16::ZERO, Fix16::ONE, Fix16::ZERO],
        ],
    };

    pub fn from_translation(t: Fix16Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.rows[0][3] = t.x;
        m.rows[1][3] = t.y;
        m.rows[2][3] = t.z;
        m
    }

    pub fn from_rotation_x(angle: Angle) -> Self {
        let (s, c) = (angle.sin(), angle.cos());
        Fix16Mat43 {
            rows: [
                [Fix16::ONE, Fix16::ZERO, Fix16::ZERO, Fix16::ZERO],
                [Fix16::ZERO, c, -s, Fix16::ZERO],
                [Fix16::ZERO, s, c, Fix16::ZERO],
            ],
        }
    }

    pub fn from_rotation_y(angle: Angle) -> Self {
        let (s, c) = (angle.sin(), angle.cos());
        Fix16Mat43 {
            rows: [
                [c, Fix16::ZERO, s, Fix16::ZERO],
                [Fix16::ZERO, Fix16::ONE, Fix16::ZERO, Fix16::ZERO],
                [-s, Fix16::ZERO, c, Fix16::ZERO],
            ],
        }
    }

    pub fn from_rotation_z(angle: Angle) -> Self {
        let (s, c) = (angle.sin(), angle.cos());
        Fix16Mat43 {
            rows: [
                [c, -s, Fix16::ZERO, Fix16::ZERO],
                [s, c, Fix16::ZERO, Fix16::ZERO],
                [Fix16::ZERO, Fix16::ZERO, Fix16::ONE, Fix16::ZERO],
            ],
        }
    }

    pub fn translation(&self) -> Fix16Vec3 {
        Fix16Vec3::new(self.rows[0][3], self.rows[1][3], self.rows[2][3])
    }

    /// `self * rhs`: `rhs` is applied to points first.
    pub fn mul(&self, rhs: &Fix16Mat43) -> Fix16Mat43 {
        let mut out = Fix16Mat43::IDENTITY;
        for r in 0..3 {
            for c in 0..4 {
                let mut acc = Fix16::ZERO;
                for k in 0..3 {
                    acc += self.rows[r][k] * rhs.rows[k][c];
                }
                if c == 3 {
                    acc += self.rows[r][3];
                }
                out.rows[r][c] = acc;
            }
        }
        out
    }

    pub fn transform_point(&self, p: &Fix16Vec3) -> Fix16Vec3 {
        let row = |r: usize| {
            let m = &self.rows[r];
            m[0] * p.x + m[1] * p.y + m[2] * p.z + m[3]
        };
        Fix16Vec3::new(row(0), row(1), row(2))
    }

    /// Rotate a direction (ignores translation).
    pub fn transform_vector(&self, v: &Fix16Vec3) -> Fix16Vec3 {
        let row = |r: usize| {
            let m = &self.rows[r];
            m[0] * v.x + m[1] * v.y + m[2] * v.z
        };
        Fix16Vec3::new(row(0), row(1), row(2))
    }

    pub fn to_glam(&self) -> glam::Mat4 {
        let r = &self.rows;
        glam::Mat4::from_cols_array_2d(&[
            [r[0][0].to_f32(), r[1][0].to_f32(), r[2][0].to_f32(), 0.0],
            [r[0][1].to_f32(), r[1][1].to_f32(), r[2][1].to_f32(), 0.0],
            [r[0][2].to_f32(), r[1][2].to_f32(), r[2][2].to_f32(), 0.0],
            [r[0][3].to_f32(), r[1][3].to_f32(), r[2][3].to_f32(), 1.0],
        ])
    }
}

/// How `MatrixStack::push` seeds the new top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PushMode {
    /// Duplicate the current top.
    Push,
    /// Start the new level from identity.
    MovePointer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixStackError {
    Overflow { depth: usize },
    Underflow,
}

impl fmt::Display for MatrixStackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixStackError::Overflow { depth } => {
                write!(f, "matrix stack overflow (depth limit {depth})")
            }
            MatrixStackError::Underflow => write!(f, "cannot pop the base matrix"),
        }
    }
}

impl std::error::Error for MatrixStackError {}

/// Stack of matrices. The base level always exists and cannot be popped.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    levels: Vec<Fix16Mat43>,
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixStack {
    pub fn new() -> Self {
        let mut levels = Vec::with_capacity(MATRIX_STACK_DEPTH);
        levels.push(Fix16Mat43::IDENTITY);
        Self { levels }
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn top(&self) -> &Fix16Mat43 {
        // levels is never empty
        &self.levels[self.levels.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Fix16Mat43 {
        let last = self.levels.len() - 1;
        &mut self.levels[last]
    }

    pub fn push(&mut self, mode: PushMode) -> Result<(), MatrixStackError> {
        if self.levels.len() >= MATRIX_STACK_DEPTH {
            return Err(MatrixStackError::Overflow {
                depth: MATRIX_STACK_DEPTH,
            });
        }
        let seed = match mode {
            PushMode::Push => *self.top(),
            PushMode::MovePointer => Fix16Mat43::IDENTITY,
        };
        self.levels.push(seed);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<(), MatrixStackError> {
        if self.levels.len() <= 1 {
            return Err(MatrixStackError::Underflow);
        }
        self.levels.pop();
        Ok(())
    }

    pub fn load_identity(&mut self) {
        *self.top_mut() = Fix16Mat43::IDENTITY;
    }

    pub fn translate(&mut self, x: Fix16, y: Fix16, z: Fix16) {
        let t = Fix16Mat43::from_translation(Fix16Vec3::new(x, y, z));
        self.post_multiply(&t);
    }

    pub fn rotate_x(&mut self, angle: Angle) {
        self.post_multiply(&Fix16Mat43::from_rotation_x(angle));
    }

    pub fn rotate_y(&mut self, angle: Angle) {
        self.post_multiply(&Fix16Mat43::from_rotation_y(angle));
    }

    pub fn rotate_z(&mut self, angle: Angle) {
        self.post_multiply(&Fix16Mat43::from_rotation_z(angle));
    }

    fn post_multiply(&mut self, rhs: &Fix16Mat43) {
        let top = self.top_mut();
        *top = top.mul(rhs);
    }
}
