//! Demo-mode steering
//!
//! Picks a pointer target for the attract/idle mode: scan candidate lanes
//! across the screen and head for the one with the least upcoming star
//! traffic, preferring lanes close to where the player already is.

use super::state::GameState;
use crate::consts::SCREEN_WIDTH;

/// How far above the player stars are considered
const LOOKAHEAD: f32 = 48.0;
/// Stars closer than this horizontally threaten a lane
const LANE_HALF_WIDTH: f32 = 6.0;
/// Spacing between candidate lanes
const LANE_STEP: f32 = 4.0;
/// Cost per pixel of travel
const TRAVEL_COST: f32 = 0.01;

/// Pointer x the autopilot wants this frame
pub fn steer(state: &GameState) -> f32 {
    let player = state.player.pos;
    let threats: Vec<(f32, f32)> = state
        .stars
        .iter()
        .filter_map(|star| {
            let dy = player.y - star.pos.y;
            (-2.0..LOOKAHEAD).contains(&dy).then_some((star.pos.x, dy))
        })
        .collect();

    if threats.is_empty() {
        return player.x;
    }

    let lane_cost = |x: f32| -> f32 {
        let danger: f32 = threats
            .iter()
            .map(|&(sx, dy)| {
                let dx = (sx - x).abs();
                if dx >= LANE_HALF_WIDTH {
                    0.0
                } else {
                    let urgency = (LOOKAHEAD - dy.max(0.0)) / LOOKAHEAD;
                    urgency * (LANE_HALF_WIDTH - dx)
                }
            })
            .sum();
        danger + (x - player.x).abs() * TRAVEL_COST
    };

    let lanes = (0..)
        .map(|i| 2.0 + i as f32 * LANE_STEP)
        .take_while(|&x| x < SCREEN_WIDTH as f32 - 1.0);

    std::iter::once(player.x)
        .chain(lanes)
        .map(|x| (x, lane_cost(x)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(x, _)| x)
        .unwrap_or(player.x)
}
