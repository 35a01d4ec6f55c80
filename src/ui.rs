//! Scene drawing
//!
//! Reads game state and writes pixels; never changes the state. The only
//! thing advanced here is the shared RNG, for the star sparkle.

use rand::Rng;

use crate::centered_text_x;
use crate::consts::*;
use crate::platform::Display;
use crate::platform::font::CHAR_ADVANCE;
use crate::sim::{GameState, Scene};

/// Presentation switches that don't affect gameplay
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawOptions {
    /// No sparkle, no color cycling
    pub reduced_motion: bool,
}

/// Draw one full frame
pub fn draw(state: &GameState, display: &mut impl Display, rng: &mut impl Rng, opts: DrawOptions) {
    display.clear(COLOR_BACKGROUND);
    draw_stars(state, display, rng, opts);
    draw_particles(state, display);

    match state.scene {
        Scene::Title => draw_title(display, opts),
        Scene::Playing => draw_playing(state, display, opts),
        Scene::GameOver => draw_game_over(display),
        Scene::Complete => draw_complete(state, display),
    }
}

fn plot(display: &mut impl Display, x: f32, y: f32, color: u8) {
    display.set_pixel(x.floor() as i32, y.floor() as i32, color);
}

fn text(display: &mut impl Display, x: f32, y: f32, s: &str, color: u8) {
    display.text(x.floor() as i32, y.floor() as i32, s, color);
}

fn centered(display: &mut impl Display, y: f32, s: &str, color: u8) {
    text(display, centered_text_x(s), y, s, color);
}

/// Right-aligned with a 5 pixel margin
fn right_aligned(display: &mut impl Display, y: f32, s: &str, color: u8) {
    let x = SCREEN_WIDTH as f32 - (s.chars().count() as i32 * CHAR_ADVANCE) as f32 - 5.0;
    text(display, x, y, s, color);
}

/// Color cycling through the whole palette, one step per frame
fn blink_color(display: &impl Display, opts: DrawOptions) -> u8 {
    if opts.reduced_motion {
        COLOR_TEXT
    } else {
        (display.frame_count() % 16) as u8
    }
}

fn draw_stars(state: &GameState, display: &mut impl Display, rng: &mut impl Rng, opts: DrawOptions) {
    for star in &state.stars {
        let sparkle = !opts.reduced_motion && rng.random_range(0..SPARKLE_ODDS) == 0;
        let color = if sparkle { COLOR_PLAYER } else { star.color };
        plot(display, star.pos.x, star.pos.y, color);
    }
}

fn draw_particles(state: &GameState, display: &mut impl Display) {
    for p in &state.particles {
        plot(display, p.pos.x, p.pos.y, p.color);
    }
}

fn draw_title(display: &mut impl Display, opts: DrawOptions) {
    centered(display, 100.0, "TEN NI AMANEKU MILKY WAY", COLOR_TEXT);
    let color = blink_color(display, opts);
    centered(display, 140.0, "- CLICK TO START -", color);
}

fn draw_hud(display: &mut impl Display, damage: u32, rest: i32) {
    text(display, 5.0, 5.0, &format!("DAMAGE: {}", damage), COLOR_DAMAGE);
    right_aligned(display, 5.0, &format!("REST: {}", rest), COLOR_TEXT);
}

fn draw_playing(state: &GameState, display: &mut impl Display, opts: DrawOptions) {
    for point in &state.trail {
        plot(display, point.pos.x, point.pos.y, COLOR_TRAIL);
    }
    plot(display, state.player.pos.x, state.player.pos.y, COLOR_PLAYER);

    if state.dense_zone.active {
        let color = blink_color(display, opts);
        centered(display, 5.0, "DENSE ZONE", color);
    }

    draw_hud(display, state.damage, state.remaining_height());
}

fn draw_game_over(display: &mut impl Display) {
    centered(display, 110.0, "GAME OVER", COLOR_DAMAGE);
    centered(display, 140.0, "- CLICK TO RESTART -", COLOR_TEXT);
}

fn draw_complete(state: &GameState, display: &mut impl Display) {
    draw_hud(display, state.damage, state.remaining_height().max(0));
    centered(display, 110.0, "COMPLETE!", COLOR_COMPLETE);
    centered(display, 140.0, "- CLICK TO RESTART -", COLOR_TEXT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Framebuffer;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Display that records text calls
    #[derive(Default)]
    struct TextLog {
        frame: u64,
        texts: Vec<(i32, i32, String, u8)>,
        pixels: usize,
    }

    impl Display for TextLog {
        fn clear(&mut self, _color: u8) {
            self.texts.clear();
            self.pixels = 0;
        }
        fn set_pixel(&mut self, _x: i32, _y: i32, _color: u8) {
            self.pixels += 1;
        }
        fn text(&mut self, x: i32, y: i32, text: &str, color: u8) {
            self.texts.push((x, y, text.to_string(), color));
        }
        fn frame_count(&self) -> u64 {
            self.frame
        }
    }

    fn state(scene: Scene) -> (GameState, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut state = GameState::new(&mut rng);
        state.scene = scene;
        (state, rng)
    }

    #[test]
    fn test_title_text_centered_and_blinking() {
        let (state, mut rng) = state(Scene::Title);
        let mut log = TextLog {
            frame: 19,
            ..Default::default()
        };
        draw(&state, &mut log, &mut rng, DrawOptions::default());

        assert_eq!(log.texts[0], (112, 100, "TEN NI AMANEKU MILKY WAY".into(), 7));
        assert_eq!(log.texts[1], (124, 140, "- CLICK TO START -".into(), 3));
        assert_eq!(log.pixels, STAR_COUNT);
    }

    #[test]
    fn test_reduced_motion_holds_text_color() {
        let (state, mut rng) = state(Scene::Title);
        let mut log = TextLog {
            frame: 19,
            ..Default::default()
        };
        let opts = DrawOptions {
            reduced_motion: true,
        };
        draw(&state, &mut log, &mut rng, opts);
        assert_eq!(log.texts[1].3, COLOR_TEXT);
    }

    #[test]
    fn test_playing_hud() {
        let (mut state, mut rng) = state(Scene::Playing);
        state.damage = 35;
        state.player.pos.y = 123.9;
        let mut log = TextLog::default();
        draw(&state, &mut log, &mut rng, DrawOptions::default());

        assert_eq!(log.texts[0], (5, 5, "DAMAGE: 35".into(), 8));
        // "REST: 123" is 9 chars: 320 - 36 - 5
        assert_eq!(log.texts[1], (279, 5, "REST: 123".into(), 7));
        assert_eq!(log.texts.len(), 2);
    }

    #[test]
    fn test_dense_zone_banner() {
        let (mut state, mut rng) = state(Scene::Playing);
        state.dense_zone.active = true;
        let mut log = TextLog::default();
        draw(&state, &mut log, &mut rng, DrawOptions::default());
        assert!(log.texts.iter().any(|t| t.2 == "DENSE ZONE" && t.0 == 140));
    }

    #[test]
    fn test_complete_clamps_rest() {
        let (mut state, mut rng) = state(Scene::Complete);
        state.player.pos.y = -3.7;
        let mut log = TextLog::default();
        draw(&state, &mut log, &mut rng, DrawOptions::default());
        assert!(log.texts.iter().any(|t| t.2 == "REST: 0"));
        assert!(log.texts.iter().any(|t| t.2 == "COMPLETE!" && t.3 == 11));
    }

    #[test]
    fn test_game_over_text() {
        let (state, mut rng) = state(Scene::GameOver);
        let mut log = TextLog::default();
        draw(&state, &mut log, &mut rng, DrawOptions::default());
        assert_eq!(log.texts[0], (142, 110, "GAME OVER".into(), 8));
        assert_eq!(log.texts[1], (120, 140, "- CLICK TO RESTART -".into(), 7));
    }

    #[test]
    fn test_player_and_trail_pixels() {
        let (mut state, mut rng) = state(Scene::Playing);
        state.stars.clear();
        state.player.pos = Vec2::new(10.5, 20.9);
        state.trail.push(crate::sim::TrailPoint {
            pos: Vec2::new(10.5, 30.2),
        });
        let mut fb = Framebuffer::new();
        draw(&state, &mut fb, &mut rng, DrawOptions::default());
        assert_eq!(fb.get(10, 20), Some(COLOR_PLAYER));
        assert_eq!(fb.get(10, 30), Some(COLOR_TRAIL));
    }

    #[test]
    fn test_draw_leaves_state_untouched() {
        let (mut state, mut rng) = state(Scene::Playing);
        state.dense_zone.active = true;
        let before = state.clone();
        let mut fb = Framebuffer::new();
        for _ in 0..60 {
            draw(&state, &mut fb, &mut rng, DrawOptions::default());
            fb.advance_frame();
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_sparkle_only_recolors_stars() {
        let (mut state, mut rng) = state(Scene::Title);
        state.stars.iter_mut().enumerate().for_each(|(i, s)| {
            s.pos = Vec2::new((i * 3) as f32, 60.0);
            s.color = 9;
        });
        let mut fb = Framebuffer::new();
        let mut sparkles = 0;
        for _ in 0..30 {
            draw(&state, &mut fb, &mut rng, DrawOptions::default());
            for s in &state.stars {
                let c = fb.get(s.pos.x as i32, 60);
                assert!(c == Some(9) || c == Some(COLOR_PLAYER));
                sparkles += usize::from(c == Some(COLOR_PLAYER));
            }
        }
        // 3000 draws at 1-in-30
        assert!(sparkles > 30 && sparkles < 200);

        let opts = DrawOptions {
            reduced_motion: true,
        };
        draw(&state, &mut fb, &mut rng, opts);
        assert!(state.stars.iter().all(|s| fb.get(s.pos.x as i32, 60) == Some(9)));
    }
}
