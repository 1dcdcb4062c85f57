//! Static rectangles: the ground strip and the fence body
//!
//! Pure geometry for renderers and bounds queries. The fence body has no
//! collision of its own; the ball reacts to the fence through
//! `Particle::check_bounds` and the fence stub.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::PhysicsConfig;

/// Axis-aligned rectangle given by center and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub center: DVec2,
    pub size: DVec2,
}

impl Wall {
    pub fn new(center: DVec2, size: DVec2) -> Self {
        Self { center, size }
    }

    /// Ground strip spanning the whole court
    pub fn ground(config: &PhysicsConfig) -> Self {
        Self::new(
            DVec2::new(0.0, config.ground_height / 2.0),
            DVec2::new(config.court_width, config.ground_height),
        )
    }

    /// Fence body between the ground and the fence stub
    pub fn fence(config: &PhysicsConfig) -> Self {
        Self::new(
            DVec2::new(0.0, config.ground_height / 2.0 + config.fence_height / 2.0),
            DVec2::new(config.fence_width, config.fence_height - config.ground_height),
        )
    }

    pub fn min(&self) -> DVec2 {
        self.center - self.size * 0.5
    }

    pub fn max(&self) -> DVec2 {
        self.center + self.size * 0.5
    }

    pub fn top(&self) -> f64 {
        self.max().y
    }

    pub fn contains(&self, point: DVec2) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}
