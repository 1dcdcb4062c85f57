//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected RNG only
//! - Fixed update and collision order
//! - No rendering or platform dependencies

pub mod agent;
pub mod delay;
pub mod game;
pub mod particle;
pub mod wall;

pub use agent::{Action, Agent, Emotion, RelativeState, Side};
pub use delay::DelayScreen;
pub use game::{Game, GameSnapshot};
pub use particle::{Body, BoundsOutcome, Particle};
pub use wall::Wall;
