//! Headless runner for the BLUE demos.
//!
//! Feeds a demo scripted, random, or idle pad input at a fixed tick rate and
//! collects per-frame summaries for logging and JSON dumps.

pub mod config;
pub mod game_loop;
pub mod input;
pub mod script;
