//! Game loop: samples the pad, steps the demo one frame, and keeps the tick
//! rate when running in real time.
//!
//! Headless runs report the nominal tick as the frame time so that output is
//! reproducible. Real-time runs measure each frame with the free-running
//! timer, the way the hardware demos do.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, trace};

use blue_core::draw::DrawList;
use blue_core::input::{DigitalButtons, DigitalPad};
use blue_core::Fix16;
use blue_demos::frame_timer::{counts_to_ms, duration_to_counts, FRT_COUNTS_PER_MS};
use blue_demos::{Demo, DemoError, FrameTimer};

use crate::input::InputSource;

/// Nominal duration of one tick at `tick_rate` Hz.
pub fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOptions {
    pub frames: u64,
    pub tick_rate: u32,
    /// Sleep to hold the tick rate and measure real frame times.
    pub realtime: bool,
    /// Keep every frame's summary, draw list included. Otherwise only the
    /// last frame is kept.
    pub record: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            frames: 600,
            tick_rate: blue_core::constants::TICK_RATE,
            realtime: false,
            record: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSummary {
    pub frame: u64,
    pub buttons: DigitalButtons,
    pub debug_text: String,
    pub commands: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draw: Option<DrawList>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    pub frames_run: u64,
    pub last: Option<FrameSummary>,
    /// Every frame, when recording.
    pub summaries: Vec<FrameSummary>,
}

/// Reading of the free-running timer: counts since `epoch`, wrapping at 16 bits.
fn timer_count(epoch: Instant) -> u16 {
    let counts = epoch.elapsed().as_micros() * u128::from(FRT_COUNTS_PER_MS) / 1000;
    (counts & 0xFFFF) as u16
}

/// Run `demo` for `options.frames` frames.
pub fn run(
    demo: &mut dyn Demo,
    input: &mut dyn InputSource,
    options: &LoopOptions,
) -> Result<RunReport, DemoError> {
    let tick = tick_duration(options.tick_rate);
    let nominal_ms = counts_to_ms(duration_to_counts(tick));

    let epoch = Instant::now();
    let mut timer = FrameTimer::new();
    timer.lap(timer_count(epoch));
    let mut frame_time_ms = if options.realtime { Fix16::ZERO } else { nominal_ms };

    let mut pad = DigitalPad::new();
    let mut report = RunReport::default();
    let mut next_tick_time = Instant::now();

    for frame in 0..options.frames {
        let buttons = input.sample(frame);
        pad.update(buttons);

        let out = demo.frame(&pad, frame_time_ms)?;
        trace!(frame, commands = out.draw.len(), "frame");
        if frame % u64::from(options.tick_rate.max(1)) == 0 {
            debug!(demo = demo.name(), frame, "{}", out.debug_text);
        }

        let summary = FrameSummary {
            frame,
            buttons,
            commands: out.draw.len(),
            debug_text: out.debug_text,
            draw: options.record.then_some(out.draw),
        };
        if options.record {
            report.summaries.push(summary);
        } else {
            report.last = Some(summary);
        }
        report.frames_run += 1;

        if options.realtime {
            frame_time_ms = timer.lap(timer_count(epoch));

            next_tick_time += tick;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > tick * 2 {
                // Too far behind, don't try to catch up
                next_tick_time = now;
            }
        }
    }

    if options.record {
        report.last = report.summaries.last().cloned();
    }
    Ok(report)
}
