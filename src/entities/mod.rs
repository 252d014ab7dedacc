mod alien;
mod bolt;
mod boss;
mod formation;
mod ship;

// Re-export all public types
pub use alien::Alien;
pub use bolt::Bolt;
pub use boss::BossAlien;
pub use formation::{Formation, MarchDirection};
pub use ship::Ship;

/// A positioned axis-aligned box. Every game entity is one of these;
/// coordinates are centers, y increases upward.
pub trait Body {
    fn x(&self) -> f32;
    fn y(&self) -> f32;
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn left(&self) -> f32 {
        self.x() - self.width() / 2.0
    }

    fn right(&self) -> f32 {
        self.x() + self.width() / 2.0
    }

    fn top(&self) -> f32 {
        self.y() + self.height() / 2.0
    }

    fn bottom(&self) -> f32 {
        self.y() - self.height() / 2.0
    }

    /// True if the point lies strictly inside this box. Edge contact does
    /// not count, matching the collision convention used throughout.
    fn contains(&self, point: (f32, f32)) -> bool {
        (point.0 - self.x()).abs() < self.width() / 2.0
            && (point.1 - self.y()).abs() < self.height() / 2.0
    }
}
