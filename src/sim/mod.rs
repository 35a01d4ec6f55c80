//! Simulation module
//!
//! All gameplay logic lives here. This module stays free of platform calls:
//! - One call to `tick` per 60 Hz frame
//! - Randomness only through the caller's RNG
//! - Sound cues are raised as `GameEvent`s for the platform to play

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{HitBox, first_star_hit};
pub use state::{DenseZone, GameEvent, GameState, Particle, Player, Scene, Star, TrailPoint};
pub use tick::{TickInput, tick};
