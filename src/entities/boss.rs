use crate::constants::{BOSS_H_WALK, BOSS_HEALTH, BOSS_HEIGHT, BOSS_V_WALK, BOSS_WIDTH};
use crate::entities::{Body, Bolt};

/// The boss alien that appears once the grid is cleared. Takes several
/// hits to destroy and is discarded the moment its hit-points run out.
#[derive(Debug, Clone)]
pub struct BossAlien {
    x: f32,
    y: f32,
    health: u32,
}

impl BossAlien {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            health: BOSS_HEALTH,
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    /// Registers one hit. Returns true iff this hit destroyed the boss;
    /// the caller discards the boss immediately on true.
    pub fn absorb_hit(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        self.health == 0
    }

    pub fn step_right(&mut self) {
        self.x += BOSS_H_WALK;
    }

    pub fn step_left(&mut self) {
        self.x -= BOSS_H_WALK;
    }

    pub fn step_down(&mut self) {
        self.y -= BOSS_V_WALK;
    }

    pub fn collides_with_player_bolt(&self, bolt: &Bolt) -> bool {
        bolt.owned_by_player() && bolt.corner_points().iter().any(|&p| self.contains(p))
    }
}

impl Body for BossAlien {
    fn x(&self) -> f32 {
        self.x
    }

    fn y(&self) -> f32 {
        self.y
    }

    fn width(&self) -> f32 {
        BOSS_WIDTH
    }

    fn height(&self) -> f32 {
        BOSS_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boss_starts_with_full_health() {
        let boss = BossAlien::new(400.0, 600.0);
        assert_eq!(boss.health(), BOSS_HEALTH);
    }

    #[test]
    fn test_absorb_hit_destroys_on_last_point() {
        let mut boss = BossAlien::new(400.0, 600.0);
        for _ in 0..BOSS_HEALTH - 1 {
            assert!(!boss.absorb_hit());
        }
        assert!(boss.absorb_hit());
        assert_eq!(boss.health(), 0);
    }

    #[test]
    fn test_health_never_goes_negative() {
        let mut boss = BossAlien::new(400.0, 600.0);
        for _ in 0..BOSS_HEALTH + 5 {
            boss.absorb_hit();
        }
        assert_eq!(boss.health(), 0);
    }

    #[test]
    fn test_boss_collision_uses_boss_box() {
        let boss = BossAlien::new(400.0, 600.0);
        // Inside the boss box but outside an alien-sized box
        let bolt = Bolt::player(400.0 + BOSS_WIDTH / 2.0 - 4.0, 600.0);
        assert!(boss.collides_with_player_bolt(&bolt));
        assert!(!boss.collides_with_player_bolt(&Bolt::alien(400.0, 600.0)));
    }
}
