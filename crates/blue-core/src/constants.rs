//! Engine constants and tuning parameters.

use crate::fixed::Fix16;

/// Frame rate of the main loop (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per frame as 16.16 (65536 / 60, truncated).
pub const DT: Fix16 = Fix16::from_raw(65536 / TICK_RATE as i32);

// --- Rigid body ---

/// Forces a rigid body can accumulate between clears.
pub const RIGID_BODY_FORCES_MAX: usize = 16;

/// Mass assigned on init.
pub const RIGID_BODY_DEFAULT_MASS: Fix16 = Fix16::ONE;

// --- Coins ---

/// Live coins a single coin manager can hold.
pub const COIN_POOL_CAPACITY: usize = 32;

/// Frames a coin stays alive before expiring.
pub const COIN_LIFETIME_FRAMES: u32 = 600;

/// Peak vertical bob offset of a coin (world units).
pub const COIN_BOB_AMPLITUDE: Fix16 = Fix16::from_int(2);

/// Coin sprite edge length (pixels).
pub const COIN_SPRITE_SIZE: u16 = 8;

// --- Rendering ---

/// Upper bound on commands in one frame's draw list.
pub const DRAW_LIST_CAPACITY: usize = 8192;

/// Levels in the 3D matrix stack, including the base level.
pub const MATRIX_STACK_DEPTH: usize = 20;
