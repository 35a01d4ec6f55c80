//! Platform abstraction layer
//!
//! The game core talks to three services each frame:
//! - `Display`: pixels, text and the global frame counter
//! - `Input`: pointer x and the left-button press edge
//! - `Audio`: numbered sound cues on a channel
//!
//! The browser front end implements them over a canvas and Web Audio; the
//! headless native run uses `Framebuffer` and a recording audio sink.

pub mod font;
pub mod framebuffer;
pub mod palette;

pub use framebuffer::Framebuffer;

use crate::consts::{SFX_COMPLETE, SFX_DAMAGE, SFX_GAME_OVER};
use crate::sim::GameEvent;

/// Pixel and text output
pub trait Display {
    /// Fill the whole screen with one palette color
    fn clear(&mut self, color: u8);
    /// Plot one pixel; out-of-bounds coordinates are ignored
    fn set_pixel(&mut self, x: i32, y: i32, color: u8);
    /// Draw `text` with its top-left corner at (x, y)
    fn text(&mut self, x: i32, y: i32, text: &str, color: u8);
    /// Frames presented since start-up (drives blinking)
    fn frame_count(&self) -> u64;
}

/// Pointer input sampled once per frame
pub trait Input {
    /// Pointer x in screen coordinates
    fn pointer_x(&self) -> f32;
    /// True only on the frame the left button went down
    fn left_pressed(&self) -> bool;
}

/// Sound effect playback
pub trait Audio {
    fn play(&mut self, channel: u8, cue: SoundCue);
}

/// Sound effects the game asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum SoundCue {
    /// Star hit the player
    Damage,
    /// Damage limit reached
    GameOver,
    /// Reached the top
    Complete,
}

impl SoundCue {
    /// Numeric sound id
    pub fn id(&self) -> u8 {
        match self {
            SoundCue::Damage => SFX_DAMAGE,
            SoundCue::GameOver => SFX_GAME_OVER,
            SoundCue::Complete => SFX_COMPLETE,
        }
    }
}

impl From<GameEvent> for SoundCue {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Damaged => SoundCue::Damage,
            GameEvent::GameOver => SoundCue::GameOver,
            GameEvent::Complete => SoundCue::Complete,
        }
    }
}

/// Audio sink that only remembers what was played
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<(u8, SoundCue)>,
}

impl Audio for RecordingAudio {
    fn play(&mut self, channel: u8, cue: SoundCue) {
        log::debug!("sfx {} on channel {}", cue.id(), channel);
        self.played.push((channel, cue));
    }
}

/// Input with fixed values, for scripted and headless runs
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    pub pointer_x: f32,
    pub pressed: bool,
}

impl Input for ScriptedInput {
    fn pointer_x(&self) -> f32 {
        self.pointer_x
    }

    fn left_pressed(&self) -> bool {
        self.pressed
    }
}
