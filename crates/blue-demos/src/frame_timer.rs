//! Frame time measurement from a free-running 16-bit timer.
//!
//! The timer ticks 839 times per millisecond (NTSC, 320-pixel mode, clock
//! divided by 32). Conversion keeps the hardware divider's reduced precision:
//! the quotient is in sixteenths of a millisecond.

use std::time::Duration;

use blue_core::Fix16;

/// Timer counts per millisecond.
pub const FRT_COUNTS_PER_MS: u32 = 839;

/// Milliseconds represented by `count` timer ticks.
pub fn counts_to_ms(count: u16) -> Fix16 {
    let delta = u32::from(count) << 4;
    let divisor = FRT_COUNTS_PER_MS << 4;
    let quotient = (delta << 4) / divisor;
    Fix16::from_raw((quotient << 12) as i32)
}

/// Timer counts elapsed over `elapsed`, saturating at the counter width.
pub fn duration_to_counts(elapsed: Duration) -> u16 {
    let counts = elapsed.as_micros() * u128::from(FRT_COUNTS_PER_MS) / 1000;
    u16::try_from(counts).unwrap_or(u16::MAX)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameTimer {
    last: u16,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the previous lap. `count` is the current value of
    /// the free-running counter; wrap-around is handled.
    pub fn lap(&mut self, count: u16) -> Fix16 {
        let elapsed = count.wrapping_sub(self.last);
        self.last = count;
        counts_to_ms(elapsed)
    }
}
