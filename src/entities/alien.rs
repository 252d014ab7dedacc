use crate::constants::{ALIEN_H_WALK, ALIEN_HEIGHT, ALIEN_TIER_INDEX, ALIEN_V_WALK, ALIEN_WIDTH};
use crate::entities::{Body, Bolt};

/// One alien in the formation grid. The image identifier is an opaque
/// string passed through to the presentation layer; the digit after
/// "alien" encodes the point tier.
#[derive(Debug, Clone)]
pub struct Alien {
    x: f32,
    y: f32,
    image: &'static str,
}

impl Alien {
    pub fn new(x: f32, y: f32, image: &'static str) -> Self {
        Self { x, y, image }
    }

    pub fn image(&self) -> &'static str {
        self.image
    }

    /// Point value decoded from the tier digit of the image identifier.
    /// An identifier without a recognized tier digit is a programmer error.
    pub fn points(&self) -> u32 {
        match self.image.as_bytes().get(ALIEN_TIER_INDEX) {
            Some(b'1') => 10,
            Some(b'2') => 7,
            Some(b'3') => 5,
            _ => panic!("alien image {:?} has no tier digit", self.image),
        }
    }

    pub fn step_right(&mut self) {
        self.x += ALIEN_H_WALK;
    }

    pub fn step_left(&mut self) {
        self.x -= ALIEN_H_WALK;
    }

    pub fn step_down(&mut self) {
        self.y -= ALIEN_V_WALK;
    }

    /// True if a player-owned bolt has a corner inside the alien's box.
    /// Alien bolts never hit aliens.
    pub fn collides_with_player_bolt(&self, bolt: &Bolt) -> bool {
        bolt.owned_by_player() && bolt.corner_points().iter().any(|&p| self.contains(p))
    }
}

impl Body for Alien {
    fn x(&self) -> f32 {
        self.x
    }

    fn y(&self) -> f32 {
        self.y
    }

    fn width(&self) -> f32 {
        ALIEN_WIDTH
    }

    fn height(&self) -> f32 {
        ALIEN_HEIGHT
    }
}
