//! Fixed timestep game loop
//!
//! Owns every entity on the court and advances them one tick at a time.
//! Rewards are reported from the right agent's point of view: +1 when the
//! right side wins a point, -1 when the left side does.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::agent::{Action, Agent, Emotion, Side};
use super::delay::DelayScreen;
use super::particle::Particle;
use super::wall::Wall;
use crate::config::PhysicsConfig;
use crate::error::Result;

/// Plain-data copy of the court for renderers and replay logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub tick: u64,
    pub ball: Particle,
    pub fence_stub: Particle,
    pub agent_left: Agent,
    pub agent_right: Agent,
    pub delay_remaining: u32,
}

/// The slime volleyball match
pub struct Game<R = Pcg32> {
    config: PhysicsConfig,
    rng: R,
    ball: Particle,
    fence_stub: Particle,
    ground: Wall,
    fence: Wall,
    agent_left: Agent,
    agent_right: Agent,
    delay: DelayScreen,
    tick: u64,
}

impl Game<Pcg32> {
    /// Game with the default physics and a seeded PCG stream
    pub fn from_seed(seed: u64) -> Self {
        Self::new(Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Game with the default physics drawing randomness from `rng`
    pub fn new(rng: R) -> Self {
        Self::build(PhysicsConfig::default(), rng)
    }

    /// Game with custom physics; the configuration is validated first
    pub fn with_config(config: PhysicsConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, rng))
    }

    fn build(config: PhysicsConfig, mut rng: R) -> Self {
        let ball = Particle::spawn_ball(&config, &mut rng);
        let mut game = Self {
            fence_stub: Particle::fence_stub(&config),
            ground: Wall::ground(&config),
            fence: Wall::fence(&config),
            agent_left: Agent::new(Side::Left, &config),
            agent_right: Agent::new(Side::Right, &config),
            delay: DelayScreen::new(config.init_delay_frames),
            ball,
            config,
            rng,
            tick: 0,
        };
        game.update_agent_states();
        game
    }

    /// Put every entity back in its starting layout with full lives
    pub fn reset(&mut self) {
        self.ground = Wall::ground(&self.config);
        self.fence = Wall::fence(&self.config);
        self.fence_stub = Particle::fence_stub(&self.config);
        self.ball = Particle::spawn_ball(&self.config, &mut self.rng);
        self.agent_left = Agent::new(Side::Left, &self.config);
        self.agent_right = Agent::new(Side::Right, &self.config);
        self.delay = DelayScreen::new(self.config.init_delay_frames);
        self.tick = 0;
        self.update_agent_states();
        log::info!(
            "Game reset: ball launch velocity ({:.3}, {:.3})",
            self.ball.vel.x,
            self.ball.vel.y
        );
    }

    /// Start the next rally after a point: new ball, fresh serve delay
    pub fn new_rally(&mut self) {
        self.ball = Particle::spawn_ball(&self.config, &mut self.rng);
        self.delay.reset();
        log::debug!(
            "New rally: ball launch velocity ({:.3}, {:.3})",
            self.ball.vel.x,
            self.ball.vel.y
        );
    }

    /// Record an agent's intents for the next tick
    pub fn set_action(&mut self, side: Side, action: Action) {
        let config = &self.config;
        match side {
            Side::Left => self.agent_left.set_action(action, config),
            Side::Right => self.agent_right.set_action(action, config),
        }
    }

    /// Apply both actions, then advance one tick
    pub fn step(&mut self, left: Action, right: Action) -> Result<i32> {
        self.set_action(Side::Left, left);
        self.set_action(Side::Right, right);
        self.tick()
    }

    /// Advance one tick with the intents already set.
    ///
    /// Returns +1 if the right agent scored, -1 if the left agent scored and
    /// 0 while the rally continues. Agent relative states are only rebuilt on
    /// ticks without a point.
    pub fn tick(&mut self) -> Result<i32> {
        self.tick += 1;

        self.between_rally_control();

        self.agent_left.update(&self.config);
        self.agent_right.update(&self.config);

        if self.delay.status() {
            let dt = self.config.timestep;
            self.ball
                .apply_acceleration(DVec2::new(0.0, self.config.gravity), dt);
            self.ball.limit_speed(0.0, self.config.max_ball_speed);
            self.ball.advance(dt);
        }

        self.handle_collisions()?;

        let reward = -self.ball.check_bounds(&self.config).signum();
        if reward != 0 {
            self.handle_point(reward);
            return Ok(reward);
        }

        self.update_agent_states();
        Ok(0)
    }

    /// Hook run before physics each tick. Once the serve delay is over both
    /// agents cheer up again.
    fn between_rally_control(&mut self) {
        if !self.delay.is_active() {
            self.agent_left.emotion = Emotion::Happy;
            self.agent_right.emotion = Emotion::Happy;
        }
    }

    fn handle_collisions(&mut self) -> Result<()> {
        if self.ball.is_colliding(&self.agent_left) {
            log::trace!("tick {}: ball hit left agent", self.tick);
            self.ball.bounce(&self.agent_left, &self.config)?;
        }
        if self.ball.is_colliding(&self.agent_right) {
            log::trace!("tick {}: ball hit right agent", self.tick);
            self.ball.bounce(&self.agent_right, &self.config)?;
        }
        if self.ball.is_colliding(&self.fence_stub) {
            log::trace!("tick {}: ball hit fence stub", self.tick);
            self.ball.bounce(&self.fence_stub, &self.config)?;
        }
        Ok(())
    }

    fn handle_point(&mut self, reward: i32) {
        self.new_rally();
        let (winner, loser) = if reward > 0 {
            (Side::Right, Side::Left)
        } else {
            (Side::Left, Side::Right)
        };
        self.agent_mut(winner).emotion = Emotion::Happy;
        let loser = self.agent_mut(loser);
        loser.emotion = Emotion::Sad;
        loser.lose_life();
        log::info!(
            "{:?} agent scores at tick {} (lives: left {}, right {})",
            winner,
            self.tick,
            self.agent_left.lives(),
            self.agent_right.lives()
        );
    }

    fn agent_mut(&mut self, side: Side) -> &mut Agent {
        match side {
            Side::Left => &mut self.agent_left,
            Side::Right => &mut self.agent_right,
        }
    }

    fn update_agent_states(&mut self) {
        self.agent_left.update_state(&self.ball, &self.agent_right);
        self.agent_right.update_state(&self.ball, &self.agent_left);
    }

    /// Replace the ball (scenario setup and tests)
    pub fn place_ball(&mut self, pos: DVec2, vel: DVec2) {
        self.ball = Particle::new(pos, vel, self.config.ball_radius);
    }

    /// Either agent has run out of lives
    pub fn is_over(&self) -> bool {
        !self.agent_left.is_alive() || !self.agent_right.is_alive()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            tick: self.tick,
            ball: self.ball.clone(),
            fence_stub: self.fence_stub.clone(),
            agent_left: self.agent_left.clone(),
            agent_right: self.agent_right.clone(),
            delay_remaining: self.delay.remaining(),
        }
    }
}

impl<R> Game<R> {
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn ball(&self) -> &Particle {
        &self.ball
    }

    pub fn fence_stub(&self) -> &Particle {
        &self.fence_stub
    }

    pub fn ground(&self) -> &Wall {
        &self.ground
    }

    pub fn fence(&self) -> &Wall {
        &self.fence
    }

    pub fn agent(&self, side: Side) -> &Agent {
        match side {
            Side::Left => &self.agent_left,
            Side::Right => &self.agent_right,
        }
    }

    pub fn agent_left(&self) -> &Agent {
        &self.agent_left
    }

    pub fn agent_right(&self) -> &Agent {
        &self.agent_right
    }

    pub fn delay(&self) -> &DelayScreen {
        &self.delay
    }

    /// Ticks since the last reset
    pub fn ticks(&self) -> u64 {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Body;

    const IDLE: Action = Action::IDLE;

    #[test]
    fn test_new_game_layout() {
        let game = Game::from_seed(1);
        assert_eq!(game.ball().pos, DVec2::new(0.0, 12.0));
        assert_eq!(game.agent_left().pos, DVec2::new(-12.0, 1.5));
        assert_eq!(game.agent_right().pos, DVec2::new(12.0, 1.5));
        assert_eq!(game.fence_stub().pos, DVec2::new(0.0, 3.5));
        assert_eq!(game.ground().top(), 1.5);
        assert_eq!(game.fence().top(), 3.5);
        assert_eq!(game.delay().remaining(), 30);
        assert_eq!(game.agent(Side::Left).lives(), 5);
        assert_eq!(game.agent(Side::Right).side(), Side::Right);
        assert_eq!(game.config().max_lives, 5);
        assert!(!game.is_over());
    }

    #[test]
    fn test_initial_states_are_computed() {
        let game = Game::from_seed(1);
        let obs = game.agent_right().observation();
        assert_eq!(obs[0], 1.2);
        assert_eq!(obs[5], 1.2);
    }

    #[test]
    fn test_ball_frozen_during_delay() {
        let mut game = Game::from_seed(3);
        let start = game.ball().clone();
        for _ in 0..30 {
            assert_eq!(game.step(IDLE, IDLE).unwrap(), 0);
            assert_eq!(game.ball().pos, start.pos);
            assert_eq!(game.ball().vel, start.vel);
        }
        game.step(IDLE, IDLE).unwrap();
        assert_ne!(game.ball().pos, start.pos);
    }

    #[test]
    fn test_agents_move_during_delay() {
        let mut game = Game::from_seed(3);
        game.step(Action::new(true, false, false), IDLE).unwrap();
        assert!(game.agent_left().pos.x > -12.0);
        assert!(game.delay().is_active());
    }

    #[test]
    fn test_landing_left_rewards_right() {
        let mut game = Game::from_seed(5);
        game.place_ball(DVec2::new(-1.0, 1.0), DVec2::ZERO);

        assert_eq!(game.step(IDLE, IDLE).unwrap(), 1);
        assert_eq!(game.agent_left().lives(), 4);
        assert_eq!(game.agent_right().lives(), 5);
        assert_eq!(game.agent_left().emotion(), Emotion::Sad);
        assert_eq!(game.agent_right().emotion(), Emotion::Happy);
    }

    #[test]
    fn test_landing_right_rewards_left() {
        let mut game = Game::from_seed(5);
        game.place_ball(DVec2::new(1.0, 1.0), DVec2::ZERO);

        assert_eq!(game.step(IDLE, IDLE).unwrap(), -1);
        assert_eq!(game.agent_left().lives(), 5);
        assert_eq!(game.agent_right().lives(), 4);
        assert_eq!(game.agent_right().emotion(), Emotion::Sad);
    }

    #[test]
    fn test_point_starts_new_rally() {
        let mut game = Game::from_seed(9);
        for _ in 0..10 {
            game.step(IDLE, IDLE).unwrap();
        }
        game.place_ball(DVec2::new(-5.0, 1.0), DVec2::ZERO);
        game.step(IDLE, IDLE).unwrap();

        assert_eq!(game.ball().pos, DVec2::new(0.0, 12.0));
        assert_eq!(game.delay().remaining(), 30);
    }

    #[test]
    fn test_states_not_refreshed_on_scoring_tick() {
        let mut game = Game::from_seed(9);
        let before = *game.agent_left().state();
        game.place_ball(DVec2::new(-5.0, 1.0), DVec2::ZERO);
        game.step(IDLE, IDLE).unwrap();
        assert_eq!(*game.agent_left().state(), before);

        game.step(IDLE, IDLE).unwrap();
        assert_eq!(game.agent_left().state().ball_pos, DVec2::new(0.0, 12.0));
    }

    #[test]
    fn test_emotions_recover_after_delay() {
        let mut game = Game::from_seed(11);
        game.place_ball(DVec2::new(-5.0, 1.0), DVec2::ZERO);
        game.step(IDLE, IDLE).unwrap();
        assert_eq!(game.agent_left().emotion(), Emotion::Sad);

        for _ in 0..30 {
            game.step(IDLE, IDLE).unwrap();
        }
        assert_eq!(game.agent_left().emotion(), Emotion::Sad);
        game.step(IDLE, IDLE).unwrap();
        assert_eq!(game.agent_left().emotion(), Emotion::Happy);
    }

    #[test]
    fn test_ball_bounces_off_agent() {
        let mut game = Game::from_seed(13);
        let agent_pos = game.agent_left().position();
        game.place_ball(agent_pos + DVec2::new(0.0, 1.9), DVec2::new(0.0, -5.0));

        assert_eq!(game.step(IDLE, IDLE).unwrap(), 0);

        assert!(game.ball().vel.y > 0.0);
        assert!(!game.ball().is_colliding(game.agent_left()));
    }

    #[test]
    fn test_ball_bounces_off_fence_stub() {
        let mut game = Game::from_seed(13);
        game.place_ball(DVec2::new(0.0, 4.3), DVec2::new(0.0, -5.0));

        game.step(IDLE, IDLE).unwrap();

        assert!(game.ball().vel.y > 0.0);
        assert!(!game.ball().is_colliding(game.fence_stub()));
    }

    #[test]
    fn test_coincident_ball_is_an_error() {
        let mut game = Game::from_seed(13);
        game.place_ball(DVec2::new(0.0, 3.5), DVec2::ZERO);
        assert!(game.step(IDLE, IDLE).is_err());
    }

    #[test]
    fn test_game_over_after_five_points() {
        let mut game = Game::from_seed(17);
        for _ in 0..5 {
            assert!(!game.is_over());
            game.place_ball(DVec2::new(6.0, 1.0), DVec2::ZERO);
            assert_eq!(game.step(IDLE, IDLE).unwrap(), -1);
        }
        assert_eq!(game.agent_right().lives(), 0);
        assert!(game.is_over());
    }

    #[test]
    fn test_reset_restores_lives_and_layout() {
        let mut game = Game::from_seed(19);
        game.place_ball(DVec2::new(-6.0, 1.0), DVec2::ZERO);
        game.step(IDLE, IDLE).unwrap();
        game.step(Action::new(false, true, true), IDLE).unwrap();

        game.reset();

        assert_eq!(game.agent_left().lives(), 5);
        assert_eq!(game.agent_left().pos, DVec2::new(-12.0, 1.5));
        assert_eq!(game.delay().remaining(), 30);
        assert_eq!(game.ticks(), 0);
    }

    #[test]
    fn test_with_config_validates() {
        let config = PhysicsConfig {
            timestep: 0.0,
            ..Default::default()
        };
        assert!(Game::with_config(config, Pcg32::seed_from_u64(1)).is_err());

        let config = PhysicsConfig {
            init_delay_frames: 0,
            ..Default::default()
        };
        let mut game = Game::with_config(config, Pcg32::seed_from_u64(1)).unwrap();
        let start = game.ball().pos;
        game.step(IDLE, IDLE).unwrap();
        assert_ne!(game.ball().pos, start);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut game = Game::from_seed(23);
        game.step(IDLE, IDLE).unwrap();
        let snapshot = game.snapshot();
        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.delay_remaining, 29);

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
