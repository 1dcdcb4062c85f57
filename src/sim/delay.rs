//! Serve delay
//!
//! Holds the ball still for a fixed number of ticks at the start of each
//! rally so both agents can settle.

use serde::{Deserialize, Serialize};

/// Countdown gating ball motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayScreen {
    life: u32,
    frames: u32,
}

impl DelayScreen {
    pub fn new(frames: u32) -> Self {
        Self {
            life: frames,
            frames,
        }
    }

    /// Restart the countdown for a new rally
    pub fn reset(&mut self) {
        self.life = self.frames;
    }

    /// Returns true once the ball may move. While counting down, each call
    /// consumes one tick and returns false.
    pub fn status(&mut self) -> bool {
        if self.life == 0 {
            return true;
        }
        self.life -= 1;
        false
    }

    /// Ticks left before the ball is released
    pub fn remaining(&self) -> u32 {
        self.life
    }

    pub fn is_active(&self) -> bool {
        self.life > 0
    }
}
