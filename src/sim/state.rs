//! Game state and core simulation types
//!
//! Everything `reset()` touches lives here. The RNG is owned by the caller so
//! drawing can share it without borrowing the state mutably.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scene {
    /// Title card, waiting for a click
    #[default]
    Title,
    /// Active ascent
    Playing,
    /// Damage reached the limit
    GameOver,
    /// Reached the top
    Complete,
}

impl Scene {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scene::Title => "TITLE",
            Scene::Playing => "PLAYING",
            Scene::GameOver => "GAMEOVER",
            Scene::Complete => "COMPLETE",
        }
    }

    /// True for the two end screens
    pub fn is_finished(&self) -> bool {
        matches!(self, Scene::GameOver | Scene::Complete)
    }
}

/// Something the platform should react to (sound cues)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A star hit the player
    Damaged,
    /// Damage reached the limit
    GameOver,
    /// Height reached zero
    Complete,
}

/// The player's dot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// `y` doubles as the remaining height to climb
    pub pos: Vec2,
    /// Horizontal velocity (inertia toward the pointer)
    pub vx: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_INITIAL_X, PLAYER_INITIAL_Y),
            vx: 0.0,
        }
    }
}

impl Player {
    /// Accelerate toward `target_x` with damping, then clamp to the screen
    pub fn steer_toward(&mut self, target_x: f32) {
        let acceleration = (target_x - self.pos.x) * PLAYER_ACCEL;
        self.vx += acceleration;
        self.vx *= PLAYER_DAMPING;
        self.pos.x = (self.pos.x + self.vx).clamp(0.0, SCREEN_WIDTH as f32 - 1.0);
    }

    /// Climb by a fraction of the current scroll speed
    pub fn ascend(&mut self, scroll_speed: f32) {
        self.pos.y -= ASCENT_FACTOR * scroll_speed;
    }
}

/// Past player position, scrolled down with the field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
}

/// A colored star in the scrolling field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    /// Palette index
    pub color: u8,
    /// Multiplier on the scroll speed
    pub speed: f32,
}

impl Star {
    /// A fresh star somewhere in the screen-tall band above the top edge
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(0.0..SCREEN_WIDTH as f32),
                rng.random_range(-(SCREEN_HEIGHT as f32)..=0.0),
            ),
            color: rng.random_range(STAR_COLOR_MIN..=STAR_COLOR_MAX),
            speed: rng.random_range(STAR_SPEED_MIN..=STAR_SPEED_MAX),
        }
    }

    /// Scroll down; past the bottom edge, move back up above the screen
    pub fn scroll(&mut self, scroll_speed: f32, rng: &mut impl Rng) {
        self.pos.y += self.speed * scroll_speed;
        if self.pos.y >= SCREEN_HEIGHT as f32 {
            self.pos.y -= SCREEN_HEIGHT as f32 * STAR_WRAP_FACTOR;
            self.pos.x = rng.random_range(0.0..SCREEN_WIDTH as f32);
        }
    }

    /// Move out of play below the screen; the next scroll recycles it
    pub fn park(&mut self) {
        self.pos.y = SCREEN_HEIGHT as f32 + STAR_PARK_OFFSET;
    }
}

/// A short-lived spark from a hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames left; removed when it reaches zero
    pub life: u32,
    pub color: u8,
}

impl Particle {
    pub fn random(origin: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            pos: origin,
            vel: Vec2::new(
                rng.random_range(-PARTICLE_SPEED..=PARTICLE_SPEED),
                rng.random_range(-PARTICLE_SPEED..=PARTICLE_SPEED),
            ),
            life: rng.random_range(PARTICLE_LIFE_MIN..=PARTICLE_LIFE_MAX),
            color: PARTICLE_COLORS.choose(rng).copied().unwrap_or(COLOR_PLAYER),
        }
    }

    /// Move, fall, age by one frame
    pub fn step(&mut self) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.life = self.life.saturating_sub(1);
    }
}

/// Bands of quadrupled star density along the ascent
///
/// Heights shrink as the player climbs, so "reached" means `y <= threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseZone {
    pub active: bool,
    /// Height at which the next band starts
    pub next_trigger_y: f32,
    /// Height at which the current band ends
    pub end_y: f32,
}

impl DenseZone {
    pub fn new(start_y: f32) -> Self {
        Self {
            active: false,
            next_trigger_y: start_y - DENSE_ZONE_SPACING,
            end_y: 0.0,
        }
    }

    /// Enter a band if the player reached the next trigger
    pub fn try_enter(&mut self, player_y: f32) -> bool {
        if self.active || player_y > self.next_trigger_y {
            return false;
        }
        self.active = true;
        self.end_y = self.next_trigger_y - DENSE_ZONE_SPACING;
        self.next_trigger_y = self.end_y - DENSE_ZONE_SPACING;
        true
    }

    /// Leave the current band if the player reached its end
    pub fn try_exit(&mut self, player_y: f32) -> bool {
        if !self.active || player_y > self.end_y {
            return false;
        }
        self.active = false;
        true
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current screen
    pub scene: Scene,
    pub player: Player,
    /// Oldest first
    pub trail: Vec<TrailPoint>,
    /// Base stars first; dense-zone extras are always the tail
    pub stars: Vec<Star>,
    pub particles: Vec<Particle>,
    pub scroll_speed: f32,
    /// Playing frames since the last reset
    pub frame_count: u64,
    pub damage: u32,
    pub dense_zone: DenseZone,
    /// Events raised this tick, drained by the game loop
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh state on the title screen
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut state = Self {
            scene: Scene::Title,
            player: Player::default(),
            trail: Vec::new(),
            stars: Vec::with_capacity(DENSE_STAR_COUNT),
            particles: Vec::new(),
            scroll_speed: SCROLL_SPEED_BASE,
            frame_count: 0,
            damage: 0,
            dense_zone: DenseZone::new(PLAYER_INITIAL_Y),
            events: Vec::new(),
        };
        state.reset(rng);
        state
    }

    /// Reinitialize every simulation field; the scene is left to the caller
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.player = Player::default();
        self.trail.clear();
        self.stars.clear();
        self.add_stars(STAR_COUNT, rng);
        self.particles.clear();
        self.scroll_speed = SCROLL_SPEED_BASE;
        self.frame_count = 0;
        self.damage = 0;
        self.dense_zone = DenseZone::new(self.player.pos.y);
        self.events.clear();
    }

    /// Append `count` random stars to the pool
    pub fn add_stars(&mut self, count: usize, rng: &mut impl Rng) {
        self.stars.extend((0..count).map(|_| Star::random(rng)));
    }

    /// Spawn a burst of sparks at `origin`
    pub fn spawn_particles(&mut self, origin: Vec2, rng: &mut impl Rng) {
        self.particles
            .extend((0..PARTICLE_COUNT).map(|_| Particle::random(origin, rng)));
    }

    /// Height still to climb, as shown on the HUD
    pub fn remaining_height(&self) -> i32 {
        self.player.pos.y as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_new_state_defaults() {
        let mut rng = Pcg32::seed_from_u64(1);
        let state = GameState::new(&mut rng);
        assert_eq!(state.scene, Scene::Title);
        assert_eq!(state.player.pos, Vec2::new(160.0, 200.0));
        assert_eq!(state.player.vx, 0.0);
        assert_eq!(state.stars.len(), STAR_COUNT);
        assert!(state.trail.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.scroll_speed, 0.8);
        assert_eq!(state.damage, 0);
        assert!(!state.dense_zone.active);
        assert_eq!(state.dense_zone.next_trigger_y, 150.0);
    }

    #[test]
    fn test_stars_spawn_above_screen() {
        let mut rng = Pcg32::seed_from_u64(2);
        let state = GameState::new(&mut rng);
        for star in &state.stars {
            assert!((0.0..320.0).contains(&star.pos.x));
            assert!((-240.0..=0.0).contains(&star.pos.y));
            assert!((8..=14).contains(&star.color));
            assert!((0.7..=1.5).contains(&star.speed));
        }
    }

    #[test]
    fn test_reset_is_repeatable_for_same_seed() {
        let mut rng_a = Pcg32::seed_from_u64(42);
        let mut rng_b = Pcg32::seed_from_u64(42);
        let mut a = GameState::new(&mut rng_a);
        let mut b = GameState::new(&mut rng_b);

        a.damage = 55;
        a.frame_count = 900;
        a.reset(&mut rng_a);
        b.reset(&mut rng_b);
        assert_eq!(a, b);

        a.reset(&mut rng_a);
        b.reset(&mut rng_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_star_wraps_above_screen() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut star = Star {
            pos: Vec2::new(10.0, 239.5),
            color: 9,
            speed: 1.0,
        };
        star.scroll(1.0, &mut rng);
        assert!((star.pos.y - (240.5 - 360.0)).abs() < 1e-4);
        assert!((0.0..320.0).contains(&star.pos.x));
    }

    #[test]
    fn test_parked_star_recycles_next_scroll() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut star = Star::random(&mut rng);
        star.park();
        assert_eq!(star.pos.y, 250.0);
        star.scroll(0.0, &mut rng);
        assert!(star.pos.y < 0.0);
    }

    #[test]
    fn test_particle_gravity_and_life() {
        let mut p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, -1.0),
            life: 2,
            color: 8,
        };
        p.step();
        assert_eq!(p.pos, Vec2::new(1.0, -1.0));
        assert!((p.vel.y - (-0.9)).abs() < 1e-6);
        assert_eq!(p.life, 1);
        p.step();
        assert_eq!(p.life, 0);
    }

    #[test]
    fn test_dense_zone_bands() {
        let mut zone = DenseZone::new(200.0);
        assert!(!zone.try_enter(150.1));
        assert!(zone.try_enter(150.0));
        assert_eq!(zone.end_y, 100.0);
        assert_eq!(zone.next_trigger_y, 50.0);
        // Already inside
        assert!(!zone.try_enter(10.0));
        assert!(!zone.try_exit(100.5));
        assert!(zone.try_exit(100.0));
        assert!(!zone.active);
        assert!(zone.try_enter(50.0));
        assert_eq!(zone.end_y, 0.0);
    }

    #[test]
    fn test_player_clamped_to_screen() {
        let mut player = Player::default();
        for _ in 0..200 {
            player.steer_toward(10_000.0);
        }
        assert_eq!(player.pos.x, 319.0);
        for _ in 0..200 {
            player.steer_toward(-10_000.0);
        }
        assert_eq!(player.pos.x, 0.0);
    }
}
