//! Pad input sources for the runner.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use blue_core::input::DigitalButtons;

use crate::script::InputScript;

/// Produces the raw pad sample for each frame.
pub trait InputSource {
    fn sample(&mut self, frame: u64) -> DigitalButtons;
}

/// Nothing pressed, ever.
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl InputSource for Idle {
    fn sample(&mut self, _frame: u64) -> DigitalButtons {
        DigitalButtons::empty()
    }
}

impl InputSource for InputScript {
    fn sample(&mut self, frame: u64) -> DigitalButtons {
        self.buttons_at(frame)
    }
}

/// Frames a random sample is held before a new one is drawn.
pub const RANDOM_HOLD_FRAMES: u64 = 8;

/// Seeded button mashing. Picks one direction (or none) and a random face
/// button set, holding each choice for a few frames.
#[derive(Debug, Clone)]
pub struct RandomInput {
    rng: ChaCha8Rng,
    held: DigitalButtons,
}

impl RandomInput {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            held: DigitalButtons::empty(),
        }
    }
}

const DIRECTION_CHOICES: [DigitalButtons; 5] = [
    DigitalButtons::empty(),
    DigitalButtons::UP,
    DigitalButtons::DOWN,
    DigitalButtons::LEFT,
    DigitalButtons::RIGHT,
];

impl InputSource for RandomInput {
    fn sample(&mut self, frame: u64) -> DigitalButtons {
        if frame % RANDOM_HOLD_FRAMES == 0 {
            let direction = DIRECTION_CHOICES[self.rng.gen_range(0..DIRECTION_CHOICES.len())];
            let mut held = direction;
            if self.rng.gen_bool(0.25) {
                held |= DigitalButtons::A;
            }
            if self.rng.gen_bool(0.1) {
                held |= DigitalButtons::B;
            }
            self.held = held;
        }
        self.held
    }
}
