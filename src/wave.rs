use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{
    ALIEN_H_SEP, ALIEN_SPEED, ALIEN_SPEED_FACTOR, BOLT_HEIGHT, BOLT_RATE, BOSS_FIRE_COOLDOWN,
    BOSS_H_WALK, BOSS_HEIGHT, BOSS_POINTS, BOSS_STEP_INTERVAL, BOSS_VOLLEY, BOSS_VOLLEY_GAP,
    DEFENSE_LINE, GAME_HEIGHT, GAME_WIDTH, SHIP_LIVES,
};
use crate::entities::{Body, Bolt, BossAlien, Formation, MarchDirection, Ship};
use crate::input::{InputSource, Key};

/// One playthrough of a fixed alien formation plus optional boss. Owns the
/// ship, the grid, the bolts, lives and score; all mutation happens inside
/// a single `update` call per frame, in a fixed order. The owning phase
/// machine only reads the exposed status accessors.
#[derive(Debug)]
pub struct Wave {
    ship: Option<Ship>,
    formation: Formation,
    boss: Option<BossAlien>,
    bolts: Vec<Bolt>,
    lives: u32,
    score: u32,
    /// Accumulates dt towards the next march tick.
    march_timer: f32,
    /// Seconds between march ticks; shrinks as aliens die.
    step_interval: f32,
    /// March ticks since the last alien shot.
    steps_since_shot: u32,
    /// Pre-rolled tick count in [1, BOLT_RATE] that triggers the next shot.
    fire_threshold: u32,
    /// Set when the ship takes a hit; cleared by the phase machine.
    ship_hit: bool,
    boss_spawned: bool,
    boss_direction: MarchDirection,
    boss_move_timer: f32,
    boss_fire_timer: f32,
    /// Bolts already fired in the current boss volley.
    boss_volley_fired: u32,
    rng: StdRng,
}

impl Wave {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// A wave with a deterministic random sequence, for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: StdRng) -> Self {
        let fire_threshold = rng.random_range(1..=BOLT_RATE);
        Self {
            ship: Some(Ship::new()),
            formation: Formation::new(),
            boss: None,
            bolts: Vec::new(),
            lives: SHIP_LIVES,
            score: 0,
            march_timer: 0.0,
            step_interval: ALIEN_SPEED,
            steps_since_shot: 0,
            fire_threshold,
            ship_hit: false,
            boss_spawned: false,
            boss_direction: MarchDirection::Right,
            boss_move_timer: 0.0,
            boss_fire_timer: 0.0,
            boss_volley_fired: 0,
            rng,
        }
    }

    /// Runs one frame of simulation. `dt` is the elapsed time in seconds
    /// and must be finite and positive; anything else is a programmer
    /// error. The step order is load-bearing: alien firing is checked
    /// before the march resets the tick counter, bolts move before any
    /// collision is resolved, and the boss acts last.
    pub fn update(&mut self, dt: f32, input: &dyn InputSource) {
        assert!(dt.is_finite() && dt > 0.0, "dt must be positive, got {dt}");

        self.control_ship(input);
        self.check_alien_fire();
        self.march_formation(dt);
        self.advance_bolts();
        self.resolve_alien_hits();
        self.resolve_ship_hits();
        self.spawn_boss();
        self.step_boss(dt);
        self.resolve_boss_hits();
        self.boss_volley(dt);
    }

    // Step 1: bounded movement plus rate-limited firing. At most one
    // player bolt is in flight at a time.
    fn control_ship(&mut self, input: &dyn InputSource) {
        let reloaded = !self.has_player_bolt();
        if let Some(ship) = self.ship.as_mut() {
            if input.is_key_down(Key::Right) {
                ship.move_right();
            }
            if input.is_key_down(Key::Left) {
                ship.move_left();
            }
            if input.is_key_down(Key::Fire) && reloaded {
                let (x, y) = ship.nose();
                self.bolts.push(Bolt::player(x, y + BOLT_HEIGHT / 2.0));
            }
        }
    }

    // Step 2: when the tick counter reaches the rolled threshold, the
    // lowest alien of a random occupied column fires, and the threshold is
    // re-rolled.
    fn check_alien_fire(&mut self) {
        if self.formation.is_empty() || self.steps_since_shot != self.fire_threshold {
            return;
        }

        if let Some((row, col)) = self.formation.firing_slot(&mut self.rng)
            && let Some(alien) = self.formation.cell(row, col)
        {
            self.bolts
                .push(Bolt::alien(alien.x(), alien.bottom() - BOLT_HEIGHT / 2.0));
        }
        self.steps_since_shot = 0;
        self.fire_threshold = self.rng.random_range(1..=BOLT_RATE);
    }

    // Step 3: the timer gates discrete march ticks against the current
    // interval. Skipped entirely once the grid is empty.
    fn march_formation(&mut self, dt: f32) {
        if self.formation.is_empty() {
            return;
        }

        self.march_timer += dt;
        if self.march_timer > self.step_interval {
            self.march_timer = 0.0;
            self.steps_since_shot += 1;
            self.formation.march();
        }
    }

    // Step 4: kinematics, then garbage collection of bolts that fully left
    // the playfield.
    fn advance_bolts(&mut self) {
        for bolt in &mut self.bolts {
            bolt.advance();
        }
        self.bolts.retain(|bolt| !bolt.offscreen());
    }

    // Step 5: player bolts against the grid. Each kill empties the cell,
    // awards the alien's tier points and permanently shortens the march
    // interval.
    fn resolve_alien_hits(&mut self) {
        let mut spent = Vec::new();
        for (idx, bolt) in self.bolts.iter().enumerate() {
            if !bolt.owned_by_player() {
                continue;
            }
            if let Some((row, col)) = self.formation.first_hit(bolt) {
                if let Some(alien) = self.formation.kill(row, col) {
                    self.score += alien.points();
                    self.step_interval *= ALIEN_SPEED_FACTOR;
                }
                spent.push(idx);
            }
        }
        for idx in spent.into_iter().rev() {
            self.bolts.remove(idx);
        }
    }

    // Step 6: alien bolts against the ship. Every hit costs a life; losing
    // the last one removes the ship.
    fn resolve_ship_hits(&mut self) {
        let mut spent = Vec::new();
        if let Some(ship) = &self.ship {
            for (idx, bolt) in self.bolts.iter().enumerate() {
                if ship.collides_with_alien_bolt(bolt) {
                    spent.push(idx);
                }
            }
        }
        if spent.is_empty() {
            return;
        }

        for idx in spent.iter().rev() {
            self.bolts.remove(*idx);
        }
        for _ in &spent {
            if self.lives > 0 {
                self.lives -= 1;
            }
        }
        self.ship_hit = true;
        if self.lives == 0 {
            self.ship = None;
        }
    }

    // Step 7: the boss appears exactly once, when the grid runs out.
    fn spawn_boss(&mut self) {
        if self.formation.is_empty() && !self.boss_spawned {
            self.boss = Some(BossAlien::new(GAME_WIDTH / 2.0, GAME_HEIGHT - BOSS_HEIGHT));
            self.boss_spawned = true;
        }
    }

    // Step 8a: boss ping-pong on its own cadence, dropping a row on each
    // direction flip.
    fn step_boss(&mut self, dt: f32) {
        let Some(boss) = self.boss.as_mut() else {
            return;
        };

        self.boss_move_timer += dt;
        if self.boss_move_timer > BOSS_STEP_INTERVAL {
            self.boss_move_timer = 0.0;
            match self.boss_direction {
                MarchDirection::Right => {
                    if boss.right() + BOSS_H_WALK <= GAME_WIDTH - ALIEN_H_SEP {
                        boss.step_right();
                    } else {
                        boss.step_down();
                        self.boss_direction = MarchDirection::Left;
                    }
                }
                MarchDirection::Left => {
                    if boss.left() - BOSS_H_WALK >= ALIEN_H_SEP {
                        boss.step_left();
                    } else {
                        boss.step_down();
                        self.boss_direction = MarchDirection::Right;
                    }
                }
            }
        }
    }

    // Step 8b: every colliding player bolt is consumed; destruction is a
    // separate check so simultaneous hits in one frame each count.
    fn resolve_boss_hits(&mut self) {
        let mut destroyed = false;
        let mut spent = Vec::new();
        if let Some(boss) = self.boss.as_mut() {
            for (idx, bolt) in self.bolts.iter().enumerate() {
                if boss.collides_with_player_bolt(bolt) {
                    spent.push(idx);
                    if boss.absorb_hit() {
                        destroyed = true;
                    }
                }
            }
        }
        for idx in spent.into_iter().rev() {
            self.bolts.remove(idx);
        }
        if destroyed {
            self.score += BOSS_POINTS;
            self.boss = None;
        }
    }

    // Step 8c: a burst of BOSS_VOLLEY bolts per cooldown window, spaced by
    // the volley gap; the counter resets each cycle.
    fn boss_volley(&mut self, dt: f32) {
        if self.boss.is_none() {
            return;
        }

        self.boss_fire_timer += dt;
        if self.boss_fire_timer >= BOSS_FIRE_COOLDOWN + self.boss_volley_fired as f32 * BOSS_VOLLEY_GAP
        {
            if self.boss_volley_fired < BOSS_VOLLEY {
                if let Some(boss) = &self.boss {
                    self.bolts
                        .push(Bolt::alien(boss.x(), boss.bottom() - BOLT_HEIGHT / 2.0));
                }
                self.boss_volley_fired += 1;
            } else {
                self.boss_fire_timer = 0.0;
                self.boss_volley_fired = 0;
            }
        }
    }

    pub fn ship(&self) -> Option<&Ship> {
        self.ship.as_ref()
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn boss(&self) -> Option<&BossAlien> {
        self.boss.as_ref()
    }

    pub fn bolts(&self) -> &[Bolt] {
        &self.bolts
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Seconds between march ticks; monotonically non-increasing over the
    /// wave's lifetime.
    pub fn step_interval(&self) -> f32 {
        self.step_interval
    }

    pub fn has_player_bolt(&self) -> bool {
        self.bolts.iter().any(Bolt::owned_by_player)
    }

    /// The ship took a hit this frame. The phase machine clears the flag
    /// when it reacts to it.
    pub fn ship_hit(&self) -> bool {
        self.ship_hit
    }

    pub fn clear_ship_hit(&mut self) {
        self.ship_hit = false;
    }

    /// Recenters the ship for a resumed wave. The ship is repositioned,
    /// never recreated.
    pub fn recenter_ship(&mut self) {
        if let Some(ship) = self.ship.as_mut() {
            ship.recenter();
        }
    }

    /// Both the grid and the boss are gone: the wave was won.
    pub fn is_cleared(&self) -> bool {
        self.boss_spawned && self.formation.is_empty() && self.boss.is_none()
    }

    /// An alien or the boss reached the defense line, ending the wave.
    pub fn defense_breached(&self) -> bool {
        let grid = self
            .formation
            .lowest_edge()
            .is_some_and(|edge| edge <= DEFENSE_LINE);
        let boss = self.boss.as_ref().is_some_and(|b| b.bottom() <= DEFENSE_LINE);
        grid || boss
    }
}

impl Default for Wave {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Alien;
    use crate::input::InputFrame;

    // A dt small enough that no march tick or boss timer can fire during a
    // scenario, isolating bolt kinematics.
    const TINY_DT: f32 = 1e-4;

    fn single_alien_wave(image: &'static str) -> Wave {
        let mut wave = Wave::with_seed(1);
        wave.formation =
            Formation::from_cells(vec![vec![Some(Alien::new(400.0, 300.0, image))]]);
        wave
    }

    #[test]
    fn test_aligned_shot_clears_tier_three_alien_for_five_points() {
        let mut wave = single_alien_wave("alien3.png");
        let fire = InputFrame {
            fire: true,
            ..Default::default()
        };

        for _ in 0..60 {
            wave.update(TINY_DT, &fire);
        }

        assert!(wave.formation().is_empty());
        assert_eq!(wave.score(), 5);
    }

    #[test]
    fn test_kill_shortens_march_interval() {
        let mut wave = single_alien_wave("alien3.png");
        let fire = InputFrame {
            fire: true,
            ..Default::default()
        };
        for _ in 0..60 {
            wave.update(TINY_DT, &fire);
        }
        assert!((wave.step_interval() - ALIEN_SPEED * ALIEN_SPEED_FACTOR).abs() < 1e-6);
    }

    #[test]
    fn test_last_life_hit_is_terminal() {
        let mut wave = Wave::with_seed(1);
        wave.lives = 1;
        // An alien bolt right on the ship's position
        wave.bolts.push(Bolt::alien(400.0, 60.0));

        wave.update(TINY_DT, &InputFrame::default());

        assert_eq!(wave.lives(), 0);
        assert!(wave.ship_hit());
        assert!(wave.ship().is_none());
    }

    #[test]
    fn test_hit_with_lives_remaining_decrements_and_flags() {
        let mut wave = Wave::with_seed(1);
        wave.bolts.push(Bolt::alien(400.0, 60.0));

        wave.update(TINY_DT, &InputFrame::default());

        assert_eq!(wave.lives(), SHIP_LIVES - 1);
        assert!(wave.ship_hit());
        assert!(wave.ship().is_some());
        wave.clear_ship_hit();
        assert!(!wave.ship_hit());
    }

    #[test]
    fn test_boss_spawns_once_grid_is_empty_and_only_once() {
        let mut wave = Wave::with_seed(1);
        wave.formation = Formation::from_cells(vec![vec![None]]);
        assert!(wave.boss().is_none());

        wave.update(TINY_DT, &InputFrame::default());
        assert!(wave.boss().is_some());
        assert!(!wave.is_cleared());

        // Once the boss is gone it never respawns; the wave is won
        wave.boss = None;
        wave.update(TINY_DT, &InputFrame::default());
        assert!(wave.boss().is_none());
        assert!(wave.is_cleared());
    }

    #[test]
    fn test_simultaneous_boss_hits_each_consume_bolt_and_hit_point() {
        let mut wave = Wave::with_seed(1);
        wave.formation = Formation::from_cells(vec![vec![None]]);
        wave.update(TINY_DT, &InputFrame::default());
        let boss_y = wave.boss().unwrap().y();

        // Two player bolts that both reach the boss this frame
        wave.bolts.push(Bolt::player(390.0, boss_y - 10.0));
        wave.bolts.push(Bolt::player(410.0, boss_y - 10.0));
        wave.update(TINY_DT, &InputFrame::default());

        assert!(wave.bolts().is_empty());
        assert_eq!(wave.boss().unwrap().health(), crate::constants::BOSS_HEALTH - 2);
    }

    #[test]
    fn test_boss_volley_fires_burst_after_cooldown() {
        let mut wave = Wave::with_seed(1);
        wave.formation = Formation::from_cells(vec![vec![None]]);
        wave.update(TINY_DT, &InputFrame::default());

        // 0.5s steps: cooldown of 2.0s elapses on the 4th, then one bolt
        // per gap until the volley of three is out
        for _ in 0..6 {
            wave.update(0.5, &InputFrame::default());
        }
        let alien_bolts = wave.bolts().iter().filter(|b| !b.owned_by_player()).count();
        assert_eq!(alien_bolts, BOSS_VOLLEY as usize);
    }

    #[test]
    fn test_at_most_one_player_bolt_in_flight() {
        let mut wave = Wave::with_seed(3);
        let fire = InputFrame {
            fire: true,
            ..Default::default()
        };
        for _ in 0..300 {
            wave.update(0.016, &fire);
            let player_bolts = wave.bolts().iter().filter(|b| b.owned_by_player()).count();
            assert!(player_bolts <= 1);
        }
    }

    #[test]
    fn test_score_and_interval_are_monotone_over_play() {
        let mut wave = Wave::with_seed(42);
        let fire = InputFrame {
            fire: true,
            ..Default::default()
        };
        let mut last_score = wave.score();
        let mut last_interval = wave.step_interval();

        for _ in 0..600 {
            wave.update(0.05, &fire);
            assert!(wave.score() >= last_score);
            assert!(wave.step_interval() <= last_interval);
            last_score = wave.score();
            last_interval = wave.step_interval();
        }
    }

    #[test]
    fn test_no_bolt_overlaps_live_alien_after_resolution() {
        let mut wave = Wave::with_seed(7);
        let fire = InputFrame {
            fire: true,
            ..Default::default()
        };
        for _ in 0..400 {
            wave.update(0.03, &fire);
            for bolt in wave.bolts().iter().filter(|b| b.owned_by_player()) {
                assert!(wave.formation().first_hit(bolt).is_none());
            }
        }
    }

    #[test]
    fn test_defense_breach_detected_at_line() {
        let mut wave = Wave::with_seed(1);
        assert!(!wave.defense_breached());
        wave.formation = Formation::from_cells(vec![vec![Some(Alien::new(
            400.0,
            DEFENSE_LINE + crate::constants::ALIEN_HEIGHT / 2.0,
            "alien3.png",
        ))]]);
        assert!(wave.defense_breached());
    }

    #[test]
    #[should_panic(expected = "dt must be positive")]
    fn test_zero_dt_rejected() {
        Wave::with_seed(1).update(0.0, &InputFrame::default());
    }

    #[test]
    #[should_panic(expected = "dt must be positive")]
    fn test_nan_dt_rejected() {
        Wave::with_seed(1).update(f32::NAN, &InputFrame::default());
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_lives_never_increase_and_never_go_negative(
                seed in 0u64..1000,
                frames in 1usize..200
            ) {
                let mut wave = Wave::with_seed(seed);
                let fire = InputFrame { fire: true, ..Default::default() };
                let mut last_lives = wave.lives();
                for _ in 0..frames {
                    wave.update(0.05, &fire);
                    prop_assert!(wave.lives() <= last_lives);
                    last_lives = wave.lives();
                }
            }
        }
    }
}
