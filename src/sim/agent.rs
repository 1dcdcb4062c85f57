//! Player bodies
//!
//! An agent is a half-disc sitting on the ground of its own court. It never
//! bounces; the ball bounces off it. Movement is expressed relative to the
//! fence so both sides share one action vocabulary.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::particle::{Body, Particle};
use crate::config::PhysicsConfig;
use crate::consts::OBSERVATION_SCALE;
use crate::error::{Result, SimError};

/// Which half of the court an agent defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Sign convention: -1 on the left, +1 on the right
    #[inline]
    pub fn dir(self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Cosmetic mood shown by renderers (no effect on physics)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Emotion {
    #[default]
    Happy,
    Sad,
}

/// Movement intents for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Action {
    /// Move toward the fence
    pub forward: bool,
    /// Move away from the fence
    pub backward: bool,
    pub jump: bool,
}

/// Discrete action table: NOOP, forward, forward+jump, jump, backward+jump, backward
const DISCRETE_ACTIONS: [Action; 6] = [
    Action::new(false, false, false),
    Action::new(true, false, false),
    Action::new(true, false, true),
    Action::new(false, false, true),
    Action::new(false, true, true),
    Action::new(false, true, false),
];

impl Action {
    pub const IDLE: Action = Action::new(false, false, false);

    pub const fn new(forward: bool, backward: bool, jump: bool) -> Self {
        Self {
            forward,
            backward,
            jump,
        }
    }

    /// Threshold three numeric channels at zero (any value > 0 is "on")
    pub fn from_slice(channels: &[f64]) -> Result<Self> {
        match channels {
            [forward, backward, jump] => Ok(Self::new(*forward > 0.0, *backward > 0.0, *jump > 0.0)),
            _ => Err(SimError::ActionLength {
                len: channels.len(),
            }),
        }
    }

    /// Look up one of the six discrete actions
    pub fn from_discrete(index: usize) -> Result<Self> {
        DISCRETE_ACTIONS
            .get(index)
            .copied()
            .ok_or(SimError::DiscreteAction(index))
    }

    pub fn discrete_count() -> usize {
        DISCRETE_ACTIONS.len()
    }
}

/// One agent's view of the court, mirrored so that its own side always
/// reads as positive x
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RelativeState {
    pub pos: DVec2,
    pub vel: DVec2,
    pub ball_pos: DVec2,
    pub ball_vel: DVec2,
    pub opponent_pos: DVec2,
    pub opponent_vel: DVec2,
}

impl RelativeState {
    pub const LEN: usize = 12;

    /// Observation vector: self, ball, opponent (x, y, vx, vy each), scaled down by 10
    pub fn observation(&self) -> [f64; Self::LEN] {
        let raw = [
            self.pos.x,
            self.pos.y,
            self.vel.x,
            self.vel.y,
            self.ball_pos.x,
            self.ball_pos.y,
            self.ball_vel.x,
            self.ball_vel.y,
            self.opponent_pos.x,
            self.opponent_pos.y,
            self.opponent_vel.x,
            self.opponent_vel.y,
        ];
        raw.map(|v| v / OBSERVATION_SCALE)
    }
}

#[inline]
fn mirror(v: DVec2, dir: f64) -> DVec2 {
    DVec2::new(v.x * dir, v.y)
}

/// A player body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    side: Side,
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
    /// Velocity requested by the last action (x relative to the fence)
    pub desired_vel: DVec2,
    lives: u32,
    pub emotion: Emotion,
    state: RelativeState,
}

impl Body for Agent {
    fn position(&self) -> DVec2 {
        self.pos
    }

    fn velocity(&self) -> DVec2 {
        self.vel
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

impl Agent {
    /// Create an agent standing at the middle of its own half
    pub fn new(side: Side, config: &PhysicsConfig) -> Self {
        Self {
            side,
            pos: DVec2::new(side.dir() * config.court_width / 4.0, config.agent_start_y),
            vel: DVec2::ZERO,
            radius: config.agent_radius,
            desired_vel: DVec2::ZERO,
            lives: config.max_lives,
            emotion: Emotion::Happy,
            state: RelativeState::default(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn dir(&self) -> f64 {
        self.side.dir()
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    pub fn emotion(&self) -> Emotion {
        self.emotion
    }

    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    pub fn state(&self) -> &RelativeState {
        &self.state
    }

    pub fn observation(&self) -> [f64; RelativeState::LEN] {
        self.state.observation()
    }

    /// Turn intents into a desired velocity. Forward and backward cancel out.
    pub fn set_action(&mut self, action: Action, config: &PhysicsConfig) {
        self.desired_vel.x = match (action.forward, action.backward) {
            (true, false) => -config.player_speed_x,
            (false, true) => config.player_speed_x,
            _ => 0.0,
        };
        self.desired_vel.y = if action.jump {
            config.player_speed_y
        } else {
            0.0
        };
    }

    /// Advance one tick: gravity, intents, integration, then clamping to the
    /// ground and to the agent's own half
    pub fn update(&mut self, config: &PhysicsConfig) {
        let dt = config.timestep;
        let dir = self.dir();

        self.vel.y += config.gravity * dt;

        // Jumps only start from the ground
        if self.pos.y <= config.ground_height + config.nudge * dt {
            self.vel.y = self.desired_vel.y;
        }
        self.vel.x = self.desired_vel.x * dir;

        self.pos += self.vel * dt;

        if self.pos.y <= config.ground_height {
            self.pos.y = config.ground_height;
            self.vel.y = 0.0;
        }

        let inner = config.agent_inner_limit();
        if self.pos.x * dir <= inner {
            self.vel.x = 0.0;
            self.pos.x = dir * inner;
        }
        let outer = config.agent_outer_limit();
        if self.pos.x * dir >= outer {
            self.vel.x = 0.0;
            self.pos.x = dir * outer;
        }
    }

    /// Rebuild the relative state from the authoritative bodies
    pub fn update_state(&mut self, ball: &Particle, opponent: &Agent) {
        let dir = self.dir();
        self.state = RelativeState {
            pos: mirror(self.pos, dir),
            vel: mirror(self.vel, dir),
            ball_pos: mirror(ball.pos, dir),
            ball_vel: mirror(ball.vel, dir),
            opponent_pos: mirror(opponent.pos, -dir),
            opponent_vel: mirror(opponent.vel, -dir),
        };
    }
}
