//! Per-frame simulation update
//!
//! One call advances the game by exactly one 60 Hz frame. The playing update
//! runs its steps in a fixed order; later steps read what earlier ones wrote.

use rand::Rng;

use super::autopilot;
use super::collision::first_star_hit;
use super::state::{GameEvent, GameState, Scene};
use crate::consts::*;
use crate::scroll_speed_at;

/// Input sampled for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer x in screen coordinates
    pub pointer_x: f32,
    /// Left button went down this frame (edge, not level)
    pub click: bool,
    /// Demo mode - steer and click automatically
    pub autopilot: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, rng: &mut impl Rng) {
    let mut input = input.clone();
    if input.autopilot {
        if state.scene == Scene::Playing {
            input.pointer_x = autopilot::steer(state);
        } else {
            input.click = true;
        }
    }

    match state.scene {
        Scene::Title => update_title(state, &input),
        Scene::Playing => update_playing(state, &input, rng),
        Scene::GameOver | Scene::Complete => update_end(state, &input, rng),
    }
}

fn update_title(state: &mut GameState, input: &TickInput) {
    if input.click {
        log::info!("Ascent started");
        state.scene = Scene::Playing;
    }
}

fn update_end(state: &mut GameState, input: &TickInput, rng: &mut impl Rng) {
    if input.click {
        state.reset(rng);
        state.scene = Scene::Title;
        log::info!("Back to title");
    }
}

fn update_playing(state: &mut GameState, input: &TickInput, rng: &mut impl Rng) {
    state.frame_count += 1;

    // Dense zones: extras go on the tail so truncation drops exactly them
    if state.dense_zone.try_enter(state.player.pos.y) {
        state.add_stars(DENSE_STAR_COUNT - STAR_COUNT, rng);
        log::debug!(
            "Dense zone entered at y={:.2} (ends at {})",
            state.player.pos.y,
            state.dense_zone.end_y
        );
    }
    if state.dense_zone.try_exit(state.player.pos.y) {
        state.stars.truncate(STAR_COUNT);
        log::debug!(
            "Dense zone left at y={:.2} (next at {})",
            state.player.pos.y,
            state.dense_zone.next_trigger_y
        );
    }

    state.player.steer_toward(input.pointer_x);

    state.scroll_speed = scroll_speed_at(state.frame_count);
    state.player.ascend(state.scroll_speed);

    let scroll = state.scroll_speed;
    for point in &mut state.trail {
        point.pos.y += scroll;
    }
    state.trail.push(super::state::TrailPoint {
        pos: state.player.pos,
    });
    state.trail.retain(|p| p.pos.y < SCREEN_HEIGHT as f32);

    for star in &mut state.stars {
        star.scroll(scroll, rng);
    }

    for particle in &mut state.particles {
        particle.step();
    }
    state.particles.retain(|p| p.life > 0);

    // At most one hit per frame
    if let Some(index) = first_star_hit(state.player.pos, &state.stars) {
        state.damage += DAMAGE_PER_HIT;
        let origin = state.player.pos;
        state.spawn_particles(origin, rng);
        state.events.push(GameEvent::Damaged);
        state.stars[index].park();
        log::debug!("Hit star {} at frame {}, damage {}", index, state.frame_count, state.damage);

        if state.damage >= DAMAGE_LIMIT {
            state.scene = Scene::GameOver;
            state.events.push(GameEvent::GameOver);
            log::info!(
                "Game over at frame {} with {} left to climb",
                state.frame_count,
                state.remaining_height()
            );
            return;
        }
    }

    if state.player.pos.y <= 0.0 {
        state.scene = Scene::Complete;
        state.events.push(GameEvent::Complete);
        log::info!(
            "Ascent complete at frame {} with damage {}",
            state.frame_count,
            state.damage
        );
    }
}
