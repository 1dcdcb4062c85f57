//! Physics configuration
//!
//! Every tunable of the court, bodies and integrator. Defaults reproduce the
//! reference game; partial JSON documents fill the rest from defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};

/// Physics tuning shared by every entity in a [`Game`](crate::Game)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // === Court ===
    /// Court width (centered on x = 0)
    pub court_width: f64,
    /// Ceiling height
    pub court_height: f64,
    /// Ground height
    pub ground_height: f64,
    /// Fence width
    pub fence_width: f64,
    /// Fence height (top of the fence stub center)
    pub fence_height: f64,

    // === Integration ===
    /// Fixed timestep per tick
    pub timestep: f64,
    /// Vertical acceleration applied to ball and agents
    pub gravity: f64,
    /// Positional correction step
    pub nudge: f64,
    /// Boundary restitution (1.0 = no energy loss)
    pub friction: f64,
    /// Separation step cap inside `bounce`
    pub max_nudge_iterations: u32,

    // === Agents ===
    pub agent_radius: f64,
    pub agent_start_y: f64,
    pub player_speed_x: f64,
    pub player_speed_y: f64,
    pub max_lives: u32,

    // === Ball ===
    pub ball_radius: f64,
    pub max_ball_speed: f64,
    /// Spawn horizontal velocity range `[low, high)`
    pub ball_vx_range: (f64, f64),
    /// Spawn vertical velocity range `[low, high)`
    pub ball_vy_range: (f64, f64),
    /// Ticks the ball stays frozen at the start of a rally
    pub init_delay_frames: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            court_width: REF_W,
            court_height: REF_H,
            ground_height: REF_U,
            fence_width: REF_WALL_WIDTH,
            fence_height: REF_WALL_HEIGHT,

            timestep: TIMESTEP,
            gravity: GRAVITY,
            nudge: NUDGE,
            friction: FRICTION,
            max_nudge_iterations: MAX_NUDGE_ITERATIONS,

            agent_radius: AGENT_RADIUS,
            agent_start_y: AGENT_START_Y,
            player_speed_x: PLAYER_SPEED_X,
            player_speed_y: PLAYER_SPEED_Y,
            max_lives: MAX_LIVES,

            ball_radius: BALL_RADIUS,
            max_ball_speed: MAX_BALL_SPEED,
            ball_vx_range: BALL_VX_RANGE,
            ball_vy_range: BALL_VY_RANGE,
            init_delay_frames: INIT_DELAY_FRAMES,
        }
    }
}

impl PhysicsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the integrator cannot work with
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("court_width", self.court_width),
            ("court_height", self.court_height),
            ("ground_height", self.ground_height),
            ("fence_width", self.fence_width),
            ("fence_height", self.fence_height),
            ("timestep", self.timestep),
            ("gravity", self.gravity),
            ("nudge", self.nudge),
            ("friction", self.friction),
            ("agent_radius", self.agent_radius),
            ("agent_start_y", self.agent_start_y),
            ("player_speed_x", self.player_speed_x),
            ("player_speed_y", self.player_speed_y),
            ("ball_radius", self.ball_radius),
            ("max_ball_speed", self.max_ball_speed),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SimError::InvalidConfig(format!("{name} must be finite")));
        }

        let positive = [
            ("court_width", self.court_width),
            ("court_height", self.court_height),
            ("fence_width", self.fence_width),
            ("timestep", self.timestep),
            ("nudge", self.nudge),
            ("agent_radius", self.agent_radius),
            ("ball_radius", self.ball_radius),
            ("max_ball_speed", self.max_ball_speed),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(SimError::InvalidConfig(format!("{name} must be positive")));
        }

        if !(0.0..=1.0).contains(&self.friction) {
            return Err(SimError::InvalidConfig(format!(
                "friction must be within [0, 1], got {}",
                self.friction
            )));
        }
        if self.max_nudge_iterations == 0 {
            return Err(SimError::InvalidConfig(
                "max_nudge_iterations must be at least 1".into(),
            ));
        }
        for (name, (low, high)) in [
            ("ball_vx_range", self.ball_vx_range),
            ("ball_vy_range", self.ball_vy_range),
        ] {
            if !low.is_finite() || !high.is_finite() || low >= high {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must be a non-empty finite range, got [{low}, {high})"
                )));
            }
        }
        Ok(())
    }

    /// Lowest y the ball center may reach before it counts as landed
    #[inline]
    pub fn ball_floor(&self) -> f64 {
        self.ground_height + self.ball_radius
    }

    /// Closest an agent center may get to the fence (as |x|)
    #[inline]
    pub fn agent_inner_limit(&self) -> f64 {
        self.fence_width / 2.0 + self.agent_radius
    }

    /// Farthest an agent center may get from the fence (as |x|)
    #[inline]
    pub fn agent_outer_limit(&self) -> f64 {
        self.court_width / 2.0 - self.agent_radius
    }
}
