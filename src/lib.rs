//! Slime Volley - A deterministic 2D volleyball physics core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (particles, agents, collisions, scoring)
//! - `config`: Serializable physics tuning
//! - `display`: Screen mapping for an external renderer
//! - `error`: Error types

pub mod config;
pub mod display;
pub mod error;
pub mod sim;

pub use config::PhysicsConfig;
pub use display::{DisplayConfig, DisplayMode, Rgb};
pub use error::{Result, SimError};
pub use sim::{
    Action, Agent, BoundsOutcome, Body, DelayScreen, Emotion, Game, GameSnapshot, Particle,
    RelativeState, Side, Wall,
};

/// Game configuration constants
pub mod consts {
    /// Court width
    pub const REF_W: f64 = 24.0 * 2.0;
    /// Court height (ceiling)
    pub const REF_H: f64 = REF_W;
    /// Ground height
    pub const REF_U: f64 = 1.5;
    /// Fence width
    pub const REF_WALL_WIDTH: f64 = 1.0;
    /// Fence height
    pub const REF_WALL_HEIGHT: f64 = 3.5;

    /// Agent horizontal speed
    pub const PLAYER_SPEED_X: f64 = 10.0 * 1.75;
    /// Agent jump speed
    pub const PLAYER_SPEED_Y: f64 = 10.0 * 1.35;
    /// Maximum ball speed
    pub const MAX_BALL_SPEED: f64 = 15.0 * 1.5;

    /// Fixed simulation timestep (30 Hz)
    pub const TIMESTEP: f64 = 1.0 / 30.0;
    /// Positional correction step used when separating bodies
    pub const NUDGE: f64 = 0.1;
    /// Velocity scale on boundary hits (1.0 = perfectly elastic)
    pub const FRICTION: f64 = 1.0;
    /// Ticks the ball is held still at the start of each rally
    pub const INIT_DELAY_FRAMES: u32 = 30;
    /// Downward acceleration
    pub const GRAVITY: f64 = -9.8 * 2.0 * 1.5;

    /// Rallies an agent may lose before the match ends
    pub const MAX_LIVES: u32 = 5;

    /// Ball defaults
    pub const BALL_RADIUS: f64 = 0.5;
    pub const BALL_VX_RANGE: (f64, f64) = (-20.0, 20.0);
    pub const BALL_VY_RANGE: (f64, f64) = (10.0, 25.0);

    /// Agent defaults
    pub const AGENT_RADIUS: f64 = 1.5;
    pub const AGENT_START_Y: f64 = 1.5;

    /// Observation vectors are divided by this before leaving the core
    pub const OBSERVATION_SCALE: f64 = 10.0;

    /// Upper bound on separation steps inside a single bounce
    pub const MAX_NUDGE_ITERATIONS: u32 = 10_000;
}
