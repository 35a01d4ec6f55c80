//! The game loop aggregate
//!
//! Owns the simulation state, the one RNG shared by simulation and drawing,
//! and the player's settings. The platform calls `update` then `draw` once
//! per frame.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::SFX_CHANNEL;
use crate::platform::{Audio, Display, Input, SoundCue};
use crate::settings::Settings;
use crate::sim::{GameState, Scene, TickInput, tick};
use crate::ui::{self, DrawOptions};

pub struct GameLoop {
    state: GameState,
    rng: Pcg32,
    settings: Settings,
}

impl GameLoop {
    /// New game on the title screen
    pub fn new(seed: u64, settings: Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = GameState::new(&mut rng);
        log::info!("Game created (seed {})", seed);
        Self {
            state,
            rng,
            settings,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scene(&self) -> Scene {
        self.state.scene
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Toggle demo mode; returns the new value
    pub fn toggle_autopilot(&mut self) -> bool {
        self.settings.autopilot = !self.settings.autopilot;
        log::info!("Autopilot: {}", self.settings.autopilot);
        self.settings.autopilot
    }

    /// Reinitialize the simulation without changing the scene
    pub fn reset(&mut self) {
        self.state.reset(&mut self.rng);
    }

    /// Advance one frame and play any sound cues it raised
    pub fn update(&mut self, input: &impl Input, audio: &mut impl Audio) {
        let tick_input = TickInput {
            pointer_x: input.pointer_x(),
            click: input.left_pressed(),
            autopilot: self.settings.autopilot,
        };
        tick(&mut self.state, &tick_input, &mut self.rng);

        for event in self.state.events.drain(..) {
            audio.play(SFX_CHANNEL, SoundCue::from(event));
        }
    }

    /// Draw the current frame
    pub fn draw(&mut self, display: &mut impl Display) {
        let opts = DrawOptions {
            reduced_motion: self.settings.reduced_motion,
        };
        ui::draw(&self.state, display, &mut self.rng, opts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Framebuffer, RecordingAudio, ScriptedInput};
    use crate::sim::Star;
    use glam::Vec2;

    fn press() -> ScriptedInput {
        ScriptedInput {
            pointer_x: 160.0,
            pressed: true,
        }
    }

    fn hold() -> ScriptedInput {
        ScriptedInput {
            pointer_x: 160.0,
            pressed: false,
        }
    }

    #[test]
    fn test_scene_cycle_with_sound_cues() {
        let mut game = GameLoop::new(5, Settings::default());
        let mut audio = RecordingAudio::default();

        game.update(&press(), &mut audio);
        assert_eq!(game.scene(), Scene::Playing);

        // Force a losing hit on the next frame
        game.state.stars.clear();
        game.state.damage = 95;
        let speed = crate::scroll_speed_at(game.state.frame_count + 1);
        let y = game.state.player.pos.y - crate::consts::ASCENT_FACTOR * speed - speed;
        game.state.stars.push(Star {
            pos: Vec2::new(160.0, y),
            color: 10,
            speed: 1.0,
        });
        game.update(&hold(), &mut audio);

        assert_eq!(game.scene(), Scene::GameOver);
        assert_eq!(
            audio.played,
            vec![(3, SoundCue::Damage), (3, SoundCue::GameOver)]
        );
        assert!(game.state.events.is_empty());

        game.update(&press(), &mut audio);
        assert_eq!(game.scene(), Scene::Title);
        assert_eq!(game.state.damage, 0);
    }

    #[test]
    fn test_reset_keeps_scene() {
        let mut game = GameLoop::new(6, Settings::default());
        game.update(&press(), &mut RecordingAudio::default());
        game.state.damage = 40;
        game.reset();
        assert_eq!(game.scene(), Scene::Playing);
        assert_eq!(game.state.damage, 0);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = GameLoop::new(99, Settings::default());
        let mut b = GameLoop::new(99, Settings::default());
        let mut audio = RecordingAudio::default();
        let mut fb_a = Framebuffer::new();
        let mut fb_b = Framebuffer::new();

        a.update(&press(), &mut audio);
        b.update(&press(), &mut audio);
        for i in 0..200 {
            let input = ScriptedInput {
                pointer_x: (i * 7 % 320) as f32,
                pressed: false,
            };
            a.update(&input, &mut audio);
            b.update(&input, &mut audio);
            a.draw(&mut fb_a);
            b.draw(&mut fb_b);
        }
        assert_eq!(a.state, b.state);
        assert_eq!(fb_a.pixels(), fb_b.pixels());
    }

    #[test]
    fn test_autopilot_setting_drives_input() {
        let mut game = GameLoop::new(7, Settings::default());
        assert!(game.toggle_autopilot());
        game.update(&hold(), &mut RecordingAudio::default());
        assert_eq!(game.scene(), Scene::Playing);
    }
}
