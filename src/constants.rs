//! Fixed simulation constants.
//!
//! The playfield uses abstract world units with y increasing upward; the
//! renderer is responsible for mapping world coordinates onto terminal
//! cells. All gameplay tuning lives here, nothing is computed.

/// Playfield width in world units.
pub const GAME_WIDTH: f32 = 800.0;
/// Playfield height in world units.
pub const GAME_HEIGHT: f32 = 700.0;

pub const SHIP_WIDTH: f32 = 44.0;
pub const SHIP_HEIGHT: f32 = 44.0;
/// Gap between the bottom of the ship and the bottom of the playfield.
pub const SHIP_BOTTOM: f32 = 32.0;
/// Horizontal distance the ship travels per frame while a key is held.
pub const SHIP_MOVEMENT: f32 = 5.0;
pub const SHIP_LIVES: u32 = 3;

/// Height of the defense line; any alien or boss reaching it ends the wave.
pub const DEFENSE_LINE: f32 = 100.0;

pub const ALIEN_WIDTH: f32 = 33.0;
pub const ALIEN_HEIGHT: f32 = 33.0;
/// Horizontal gap between grid columns, also the edge padding the
/// formation keeps from the playfield sides.
pub const ALIEN_H_SEP: f32 = 16.0;
/// Vertical gap between grid rows.
pub const ALIEN_V_SEP: f32 = 16.0;
/// Horizontal distance of one march step.
pub const ALIEN_H_WALK: f32 = 12.0;
/// Vertical drop when the formation flips direction.
pub const ALIEN_V_WALK: f32 = 36.0;
/// Gap between the top row of the formation and the top of the playfield.
pub const ALIEN_CEILING: f32 = 100.0;
pub const ALIEN_ROWS: usize = 5;
pub const ALIENS_IN_ROW: usize = 12;
/// Seconds between march ticks at wave start.
pub const ALIEN_SPEED: f32 = 1.0;
/// March interval multiplier applied for every alien killed.
pub const ALIEN_SPEED_FACTOR: f32 = 0.97;
/// Alien image identifiers, ordered highest tier first. The digit after
/// "alien" encodes the point tier.
pub const ALIEN_IMAGES: [&str; 3] = ["alien1.png", "alien2.png", "alien3.png"];
/// Byte offset of the tier digit inside an alien image identifier.
pub const ALIEN_TIER_INDEX: usize = 5;

pub const BOLT_WIDTH: f32 = 4.0;
pub const BOLT_HEIGHT: f32 = 16.0;
/// Vertical distance a bolt travels per frame.
pub const BOLT_SPEED: f32 = 10.0;
/// An alien fires after a random number of march ticks in [1, BOLT_RATE].
pub const BOLT_RATE: u32 = 5;

pub const BOSS_WIDTH: f32 = 66.0;
pub const BOSS_HEIGHT: f32 = 44.0;
pub const BOSS_HEALTH: u32 = 8;
/// Score bonus for destroying the boss.
pub const BOSS_POINTS: u32 = 50;
/// Seconds between boss movement steps.
pub const BOSS_STEP_INTERVAL: f32 = 0.4;
pub const BOSS_H_WALK: f32 = 24.0;
pub const BOSS_V_WALK: f32 = 20.0;
/// Seconds between boss volleys.
pub const BOSS_FIRE_COOLDOWN: f32 = 2.0;
/// Bolts fired per boss volley.
pub const BOSS_VOLLEY: u32 = 3;
/// Seconds between bolts inside one volley.
pub const BOSS_VOLLEY_GAP: f32 = 0.2;
