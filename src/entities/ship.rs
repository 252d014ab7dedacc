use crate::constants::{GAME_WIDTH, SHIP_BOTTOM, SHIP_HEIGHT, SHIP_MOVEMENT, SHIP_WIDTH};
use crate::entities::{Body, Bolt};

/// The player ship. Sits at a fixed height just above the playfield floor
/// and only moves horizontally, clamped so its box never leaves the
/// playfield.
#[derive(Debug, Clone)]
pub struct Ship {
    x: f32,
    y: f32,
}

impl Ship {
    pub fn new() -> Self {
        Self {
            x: GAME_WIDTH / 2.0,
            y: SHIP_BOTTOM + SHIP_HEIGHT / 2.0,
        }
    }

    pub fn move_left(&mut self) {
        self.x = (self.x - SHIP_MOVEMENT).max(SHIP_WIDTH / 2.0);
    }

    pub fn move_right(&mut self) {
        self.x = (self.x + SHIP_MOVEMENT).min(GAME_WIDTH - SHIP_WIDTH / 2.0);
    }

    /// Puts the ship back at the horizontal center, used when a wave
    /// resumes after a hit.
    pub fn recenter(&mut self) {
        self.x = GAME_WIDTH / 2.0;
    }

    /// Where player bolts spawn: the top-center of the ship.
    pub fn nose(&self) -> (f32, f32) {
        (self.x, self.top())
    }

    /// True if an alien-owned bolt has a corner inside the ship's box.
    /// Player bolts never hit the ship.
    pub fn collides_with_alien_bolt(&self, bolt: &Bolt) -> bool {
        !bolt.owned_by_player() && bolt.corner_points().iter().any(|&p| self.contains(p))
    }
}

impl Default for Ship {
    fn default() -> Self {
        Self::new()
    }
}

impl Body for Ship {
    fn x(&self) -> f32 {
        self.x
    }

    fn y(&self) -> f32 {
        self.y
    }

    fn width(&self) -> f32 {
        SHIP_WIDTH
    }

    fn height(&self) -> f32 {
        SHIP_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ship_starts_centered() {
        let ship = Ship::new();
        assert_eq!(ship.x(), GAME_WIDTH / 2.0);
        assert_eq!(ship.bottom(), SHIP_BOTTOM);
    }

    #[test]
    fn test_move_clamps_at_right_edge() {
        let mut ship = Ship::new();
        for _ in 0..1000 {
            ship.move_right();
        }
        assert_eq!(ship.right(), GAME_WIDTH);
        // Further moves are silent no-ops
        ship.move_right();
        assert_eq!(ship.right(), GAME_WIDTH);
    }

    #[test]
    fn test_move_clamps_at_left_edge() {
        let mut ship = Ship::new();
        for _ in 0..1000 {
            ship.move_left();
        }
        assert_eq!(ship.left(), 0.0);
    }

    #[test]
    fn test_alien_bolt_corner_inside_ship_hits() {
        let ship = Ship::new();
        let bolt = Bolt::alien(ship.x(), ship.y());
        assert!(ship.collides_with_alien_bolt(&bolt));
    }

    #[test]
    fn test_player_bolt_never_hits_own_ship() {
        let ship = Ship::new();
        let bolt = Bolt::player(ship.x(), ship.y());
        assert!(!ship.collides_with_alien_bolt(&bolt));
    }

    #[test]
    fn test_far_bolt_misses() {
        let ship = Ship::new();
        let bolt = Bolt::alien(ship.x() + 200.0, ship.y());
        assert!(!ship.collides_with_alien_bolt(&bolt));
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_ship_never_leaves_playfield(
                moves in proptest::collection::vec(proptest::bool::ANY, 0..500)
            ) {
                let mut ship = Ship::new();
                for move_right in moves {
                    if move_right {
                        ship.move_right();
                    } else {
                        ship.move_left();
                    }
                    prop_assert!(ship.left() >= 0.0);
                    prop_assert!(ship.right() <= GAME_WIDTH);
                }
            }
        }
    }
}
