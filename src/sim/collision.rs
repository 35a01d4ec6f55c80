//! Collision detection between the player and stars
//!
//! The player is a 2x2 box centered on its position. A star is a point and
//! counts as a hit only strictly inside the box, so a star sitting exactly on
//! an edge is a miss.

use glam::Vec2;

use super::state::Star;
use crate::consts::PLAYER_HIT_HALF;

/// Axis-aligned hit box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitBox {
    pub min: Vec2,
    pub size: Vec2,
}

impl HitBox {
    /// The player's box around `center`
    pub fn around(center: Vec2) -> Self {
        Self {
            min: center - Vec2::splat(PLAYER_HIT_HALF),
            size: Vec2::splat(PLAYER_HIT_HALF * 2.0),
        }
    }

    /// Strict interior test for a point
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.min + self.size;
        self.min.x < point.x && point.x < max.x && self.min.y < point.y && point.y < max.y
    }
}

/// Index of the first star (in pool order) inside the player's box
pub fn first_star_hit(player: Vec2, stars: &[Star]) -> Option<usize> {
    let hitbox = HitBox::around(player);
    stars.iter().position(|star| hitbox.contains(star.pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star_at(x: f32, y: f32) -> Star {
        Star {
            pos: Vec2::new(x, y),
            color: 8,
            speed: 1.0,
        }
    }

    #[test]
    fn test_hitbox_interior() {
        let hitbox = HitBox::around(Vec2::new(100.0, 100.0));
        assert!(hitbox.contains(Vec2::new(100.0, 100.0)));
        assert!(hitbox.contains(Vec2::new(99.1, 100.9)));
    }

    #[test]
    fn test_hitbox_edges_are_misses() {
        let hitbox = HitBox::around(Vec2::new(100.0, 100.0));
        assert!(!hitbox.contains(Vec2::new(99.0, 100.0)));
        assert!(!hitbox.contains(Vec2::new(101.0, 100.0)));
        assert!(!hitbox.contains(Vec2::new(100.0, 99.0)));
        assert!(!hitbox.contains(Vec2::new(100.0, 101.0)));
    }

    #[test]
    fn test_first_star_hit_uses_pool_order() {
        let stars = [
            star_at(0.0, 0.0),
            star_at(50.2, 50.0),
            star_at(49.8, 50.0),
        ];
        assert_eq!(first_star_hit(Vec2::new(50.0, 50.0), &stars), Some(1));
        assert_eq!(first_star_hit(Vec2::new(200.0, 50.0), &stars), None);
    }
}
