//! Built-in components.

pub mod coin_mgr;
pub mod rigid_body;

pub use coin_mgr::{Coin, CoinError, CoinManager};
pub use rigid_body::{RigidBody, RigidBodyError};
