use crate::constants::{BOLT_HEIGHT, BOLT_SPEED, BOLT_WIDTH, GAME_HEIGHT};
use crate::entities::Body;

/// A laser bolt. The sign of the velocity encodes ownership: positive
/// velocity means player-fired (moving up), negative means alien- or
/// boss-fired (moving down). Velocity is fixed at construction.
#[derive(Debug, Clone)]
pub struct Bolt {
    x: f32,
    y: f32,
    velocity: f32,
}

impl Bolt {
    /// A player bolt moving up the screen.
    pub fn player(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            velocity: BOLT_SPEED,
        }
    }

    /// An alien or boss bolt moving down the screen.
    pub fn alien(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            velocity: -BOLT_SPEED,
        }
    }

    pub fn owned_by_player(&self) -> bool {
        self.velocity > 0.0
    }

    /// Moves the bolt one frame along its velocity.
    pub fn advance(&mut self) {
        self.y += self.velocity;
    }

    /// The four corner points used for collision checks, in the order
    /// top-right, top-left, bottom-right, bottom-left.
    pub fn corner_points(&self) -> [(f32, f32); 4] {
        [
            (self.right(), self.top()),
            (self.left(), self.top()),
            (self.right(), self.bottom()),
            (self.left(), self.bottom()),
        ]
    }

    /// True once the bolt has fully left the playfield vertically: a player
    /// bolt when its bottom edge passes above the top, an alien bolt when
    /// its top edge passes below the bottom.
    pub fn offscreen(&self) -> bool {
        if self.owned_by_player() {
            self.bottom() > GAME_HEIGHT
        } else {
            self.top() < 0.0
        }
    }
}

impl Body for Bolt {
    fn x(&self) -> f32 {
        self.x
    }

    fn y(&self) -> f32 {
        self.y
    }

    fn width(&self) -> f32 {
        BOLT_WIDTH
    }

    fn height(&self) -> f32 {
        BOLT_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_bolt_moves_up() {
        let mut bolt = Bolt::player(100.0, 100.0);
        bolt.advance();
        assert_eq!(bolt.y(), 100.0 + BOLT_SPEED);
    }

    #[test]
    fn test_alien_bolt_moves_down() {
        let mut bolt = Bolt::alien(100.0, 100.0);
        bolt.advance();
        assert_eq!(bolt.y(), 100.0 - BOLT_SPEED);
    }

    #[test]
    fn test_ownership_from_velocity_sign() {
        assert!(Bolt::player(0.0, 0.0).owned_by_player());
        assert!(!Bolt::alien(0.0, 0.0).owned_by_player());
    }

    #[test]
    fn test_corner_point_order() {
        let bolt = Bolt::player(100.0, 200.0);
        let [tr, tl, br, bl] = bolt.corner_points();
        assert_eq!(tr, (100.0 + BOLT_WIDTH / 2.0, 200.0 + BOLT_HEIGHT / 2.0));
        assert_eq!(tl, (100.0 - BOLT_WIDTH / 2.0, 200.0 + BOLT_HEIGHT / 2.0));
        assert_eq!(br, (100.0 + BOLT_WIDTH / 2.0, 200.0 - BOLT_HEIGHT / 2.0));
        assert_eq!(bl, (100.0 - BOLT_WIDTH / 2.0, 200.0 - BOLT_HEIGHT / 2.0));
    }

    #[test]
    fn test_player_bolt_culled_exactly_when_bottom_clears_top() {
        // Bottom edge sits on the boundary after one advance, strictly past
        // it after two; removal happens on that second frame, not earlier.
        let mut bolt = Bolt::player(100.0, GAME_HEIGHT - BOLT_SPEED + BOLT_HEIGHT / 2.0);
        assert!(!bolt.offscreen());
        bolt.advance();
        assert!(!bolt.offscreen());
        bolt.advance();
        assert!(bolt.offscreen());
    }

    #[test]
    fn test_alien_bolt_culled_below_floor() {
        let mut bolt = Bolt::alien(100.0, BOLT_SPEED - BOLT_HEIGHT / 2.0);
        assert!(!bolt.offscreen());
        bolt.advance();
        assert!(!bolt.offscreen());
        bolt.advance();
        assert!(bolt.offscreen());
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_ownership_never_changes(
                x in 0f32..800.0,
                y in 0f32..700.0,
                player_owned in proptest::bool::ANY,
                advances in 0usize..200
            ) {
                let mut bolt = if player_owned {
                    Bolt::player(x, y)
                } else {
                    Bolt::alien(x, y)
                };
                for _ in 0..advances {
                    bolt.advance();
                }
                prop_assert_eq!(bolt.owned_by_player(), player_owned);
            }
        }
    }
}
