//! Milky Way - steer a dot up through a scrolling field of rainbow stars
//!
//! Core modules:
//! - `sim`: Simulation (player, stars, particles, dense zones, scene changes)
//! - `game`: The owned game loop aggregate wiring sim, UI and services together
//! - `ui`: Per-scene drawing onto a `Display`
//! - `platform`: Display/input/audio service traits and the software framebuffer
//! - `renderer`: WebGPU presentation of the framebuffer
//! - `settings`: Presentation and audio preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use error::Error;
pub use game::GameLoop;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical screen size in pixels
    pub const SCREEN_WIDTH: u32 = 320;
    pub const SCREEN_HEIGHT: u32 = 240;
    /// Target frame rate; one update + one draw per frame
    pub const FPS: u32 = 60;
    /// Fixed frame step in seconds
    pub const FRAME_DT: f32 = 1.0 / FPS as f32;
    /// Maximum frames caught up per animation callback
    pub const MAX_SUBSTEPS: u32 = 4;

    pub const WINDOW_TITLE: &str = "Ten ni Amaneku Milky Way";

    /// Star pool size outside and inside a dense zone
    pub const STAR_COUNT: usize = 100;
    pub const DENSE_STAR_COUNT: usize = 400;
    /// Star palette range (inclusive) and per-star speed range
    pub const STAR_COLOR_MIN: u8 = 8;
    pub const STAR_COLOR_MAX: u8 = 14;
    pub const STAR_SPEED_MIN: f32 = 0.7;
    pub const STAR_SPEED_MAX: f32 = 1.5;
    /// A star that leaves the bottom edge reappears this far above it
    pub const STAR_WRAP_FACTOR: f32 = 1.5;
    /// Where a hit star is parked (below the screen, wraps on the next frame)
    pub const STAR_PARK_OFFSET: f32 = 10.0;
    /// One star in this many renders in the highlight color each frame
    pub const SPARKLE_ODDS: u32 = 30;

    /// Player start position
    pub const PLAYER_INITIAL_X: f32 = SCREEN_WIDTH as f32 / 2.0;
    pub const PLAYER_INITIAL_Y: f32 = 200.0;
    /// Horizontal steering toward the pointer
    pub const PLAYER_ACCEL: f32 = 0.02;
    pub const PLAYER_DAMPING: f32 = 0.9;
    /// Height lost per frame is this times the scroll speed
    pub const ASCENT_FACTOR: f32 = 0.02;
    /// Half-size of the player's square hit box
    pub const PLAYER_HIT_HALF: f32 = 1.0;

    /// Scroll speed ramp: base + frames / divisor (unbounded)
    pub const SCROLL_SPEED_BASE: f32 = 0.8;
    pub const SCROLL_RAMP_FRAMES: f32 = 900.0;

    /// Dense zones: each band and each gap between bands is this tall
    pub const DENSE_ZONE_SPACING: f32 = 50.0;

    /// Damage per collision and the game-over threshold
    pub const DAMAGE_PER_HIT: u32 = 5;
    pub const DAMAGE_LIMIT: u32 = 100;

    /// Particle burst spawned on each hit
    pub const PARTICLE_COUNT: usize = 15;
    pub const PARTICLE_SPEED: f32 = 1.5;
    pub const PARTICLE_LIFE_MIN: u32 = 20;
    pub const PARTICLE_LIFE_MAX: u32 = 40;
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    pub const PARTICLE_COLORS: [u8; 3] = [7, 8, 10];

    /// Palette indices
    pub const COLOR_BACKGROUND: u8 = 0;
    pub const COLOR_TRAIL: u8 = 6;
    pub const COLOR_PLAYER: u8 = 7;
    pub const COLOR_TEXT: u8 = 7;
    pub const COLOR_DAMAGE: u8 = 8;
    pub const COLOR_COMPLETE: u8 = 11;

    /// Sound channel and cue ids
    pub const SFX_CHANNEL: u8 = 3;
    pub const SFX_DAMAGE: u8 = 7;
    pub const SFX_GAME_OVER: u8 = 8;
    pub const SFX_COMPLETE: u8 = 14;
}

/// Current scroll speed after `frames` playing frames
#[inline]
pub fn scroll_speed_at(frames: u64) -> f32 {
    consts::SCROLL_SPEED_BASE + frames as f32 / consts::SCROLL_RAMP_FRAMES
}

/// X coordinate that horizontally centers `text` on the screen
#[inline]
pub fn centered_text_x(text: &str) -> f32 {
    (consts::SCREEN_WIDTH as f32 - text.chars().count() as f32 * platform::font::CHAR_ADVANCE as f32)
        / 2.0
}
