//! Point-mass circles: the ball and the stub on top of the fence
//!
//! Explicit Euler integration, court boundary reflection with a
//! partial-height fence, and circle-circle collision response.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::PhysicsConfig;
use crate::error::{Result, SimError};

/// Anything with a circular collision shape
pub trait Body {
    fn position(&self) -> DVec2;
    fn velocity(&self) -> DVec2;
    fn radius(&self) -> f64;
}

/// Result of a boundary check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundsOutcome {
    /// Ball is still in play
    NoScore,
    /// Ball touched the ground on the left half (right side wins the point)
    LandedLeft,
    /// Ball touched the ground on the right half (left side wins the point)
    LandedRight,
}

impl BoundsOutcome {
    /// Raw signed outcome: -1 landed left, +1 landed right, 0 otherwise
    pub fn signum(self) -> i32 {
        match self {
            BoundsOutcome::NoScore => 0,
            BoundsOutcome::LandedLeft => -1,
            BoundsOutcome::LandedRight => 1,
        }
    }

    pub fn is_score(self) -> bool {
        self != BoundsOutcome::NoScore
    }
}

/// A moving (or static) circle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: DVec2,
    /// Position before the most recent `advance`
    pub prev_pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
}

impl Body for Particle {
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

impl Particle {
    pub fn new(pos: DVec2, vel: DVec2, radius: f64) -> Self {
        debug_assert!(radius > 0.0, "particle radius must be positive");
        Self {
            pos,
            prev_pos: pos,
            vel,
            radius,
        }
    }

    /// Fresh rally ball above the right court with a random launch velocity
    pub fn spawn_ball<R: Rng + ?Sized>(config: &PhysicsConfig, rng: &mut R) -> Self {
        let (vx_low, vx_high) = config.ball_vx_range;
        let (vy_low, vy_high) = config.ball_vy_range;
        let vx = rng.random_range(vx_low..vx_high);
        let vy = rng.random_range(vy_low..vy_high);
        Self::new(
            DVec2::new(0.0, config.court_width / 4.0),
            DVec2::new(vx, vy),
            config.ball_radius,
        )
    }

    /// The round cap sitting on top of the fence
    pub fn fence_stub(config: &PhysicsConfig) -> Self {
        Self::new(
            DVec2::new(0.0, config.fence_height),
            DVec2::ZERO,
            config.fence_width / 2.0,
        )
    }

    /// Remember the current position, then integrate it by one timestep
    pub fn advance(&mut self, dt: f64) {
        self.prev_pos = self.pos;
        self.pos += self.vel * dt;
    }

    pub fn apply_acceleration(&mut self, accel: DVec2, dt: f64) {
        self.vel += accel * dt;
    }

    /// Reflect off the court edges, ceiling, ground and fence.
    ///
    /// Only the ground scores. The fence is a partial-height wall: it only
    /// reflects a ball that crossed its face during this tick (judged from
    /// `prev_pos`) while below the fence top.
    pub fn check_bounds(&mut self, config: &PhysicsConfig) -> BoundsOutcome {
        let r = self.radius;
        let half_w = config.court_width / 2.0;
        let friction = config.friction;
        let eps = config.nudge * config.timestep;

        // Side edges
        if self.pos.x <= r - half_w {
            self.vel.x *= -friction;
            self.pos.x = r - half_w + eps;
        }
        if self.pos.x >= half_w - r {
            self.vel.x *= -friction;
            self.pos.x = half_w - r - eps;
        }

        // Ground (scores) and ceiling
        if self.pos.y <= r + config.ground_height {
            self.vel.y *= -friction;
            self.pos.y = r + config.ground_height + eps;
            return if self.pos.x <= 0.0 {
                BoundsOutcome::LandedLeft
            } else {
                BoundsOutcome::LandedRight
            };
        }
        if self.pos.y >= config.court_height - r {
            self.vel.y *= -friction;
            self.pos.y = config.court_height - r - eps;
        }

        // Fence faces
        let face = config.fence_width / 2.0 + r;
        if self.pos.x <= face && self.prev_pos.x > face && self.pos.y <= config.fence_height {
            self.vel.x *= -friction;
            self.pos.x = face + eps;
        }
        if self.pos.x >= -face && self.prev_pos.x < -face && self.pos.y <= config.fence_height {
            self.vel.x *= -friction;
            self.pos.x = -face - eps;
        }

        BoundsOutcome::NoScore
    }

    pub fn distance_squared<B: Body + ?Sized>(&self, other: &B) -> f64 {
        self.pos.distance_squared(other.position())
    }

    /// Circles overlap (touching does not count)
    pub fn is_colliding<B: Body + ?Sized>(&self, other: &B) -> bool {
        let r = self.radius + other.radius();
        r * r > self.distance_squared(other)
    }

    /// Push `self` out of `other` along the contact normal and return that normal
    fn separate<B: Body + ?Sized>(&mut self, other: &B, config: &PhysicsConfig) -> Result<DVec2> {
        let delta = self.pos - other.position();
        let distance = delta.length();
        if distance == 0.0 || !distance.is_finite() {
            log::warn!("bounce with coincident centers at {:?}", self.pos);
            return Err(SimError::CoincidentCenters);
        }
        let normal = delta / distance;

        // Each step strictly increases the center distance by `nudge`
        let step = normal * config.nudge;
        let mut iterations = 0;
        while self.is_colliding(other) {
            if iterations >= config.max_nudge_iterations {
                log::warn!(
                    "overlap unresolved after {} steps (pos {:?}, other {:?})",
                    iterations,
                    self.pos,
                    other.position()
                );
                return Err(SimError::OverlapUnresolved { iterations });
            }
            self.pos += step;
            iterations += 1;
        }
        Ok(normal)
    }

    /// Bounce off a body whose motion is unaffected by the contact.
    ///
    /// The relative velocity is mirrored about the contact normal:
    /// `v' = (u - 2(u·n)n) + v_other` with `u = v - v_other`.
    pub fn bounce<B: Body + ?Sized>(&mut self, other: &B, config: &PhysicsConfig) -> Result<()> {
        let normal = self.separate(other, config)?;

        let other_vel = other.velocity();
        let relative = self.vel - other_vel;
        let impulse = normal * (relative.dot(normal) * 2.0);
        self.vel = relative - impulse + other_vel;
        Ok(())
    }

    /// Equal-mass elastic exchange between two free particles.
    ///
    /// Both velocities change; total momentum and kinetic energy are kept.
    pub fn collide(&mut self, other: &mut Particle, config: &PhysicsConfig) -> Result<()> {
        let normal = self.separate(&*other, config)?;

        let exchange = normal * (self.vel - other.vel).dot(normal);
        self.vel -= exchange;
        other.vel += exchange;
        Ok(())
    }

    /// Clamp speed into `[min_speed, max_speed]`, keeping direction.
    ///
    /// A stationary particle has no direction and is left at rest.
    pub fn limit_speed(&mut self, min_speed: f64, max_speed: f64) {
        let mag2 = self.vel.length_squared();
        if mag2 == 0.0 {
            return;
        }
        if mag2 > max_speed * max_speed {
            self.vel = self.vel / mag2.sqrt() * max_speed;
        }
        if mag2 < min_speed * min_speed {
            self.vel = self.vel / mag2.sqrt() * min_speed;
        }
    }
}
