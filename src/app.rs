use color_eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};

use crate::audio::AudioManager;
use crate::input::{InputManager, InputSource, Key};
use crate::renderer::{GameRenderer, RenderView};
use crate::wave::Wave;

/// Application phase. A Wave instance exists exactly while the phase is
/// one of NewWave/Active/Paused/Continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Inactive,
    NewWave,
    Active,
    Paused,
    Continue,
    Complete,
}

/// How a finished wave ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Cleared,
    Destroyed,
}

/// Why the active phase ends, in priority order. A hit that spends the
/// last life is a loss, not a pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveExit {
    Loss,
    Win,
    Hit,
}

fn active_exit(lives: u32, breached: bool, cleared: bool, hit: bool) -> Option<ActiveExit> {
    if lives == 0 || breached {
        Some(ActiveExit::Loss)
    } else if cleared {
        Some(ActiveExit::Win)
    } else if hit {
        Some(ActiveExit::Hit)
    } else {
        None
    }
}

/// The main application: sequences the phases and delegates gameplay
/// frames to the Wave.
pub struct App {
    running: bool,
    phase: Phase,
    wave: Option<Wave>,
    outcome: Option<Outcome>,
    final_score: u32,
    /// Whether a player bolt was in flight last frame, for the fire cue.
    had_player_bolt: bool,
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            phase: Phase::Inactive,
            wave: None,
            outcome: None,
            final_score: 0,
            had_player_bolt: false,
            input_manager: InputManager::new(),
            renderer: GameRenderer::new(),
            audio_manager: AudioManager::new(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        let mut last_frame = Instant::now();

        while self.running {
            terminal.draw(|frame| {
                let view = RenderView {
                    phase: self.phase,
                    wave: self.wave.as_ref(),
                    outcome: self.outcome,
                    final_score: self.final_score,
                    area: frame.area(),
                };
                self.renderer.render(frame, &view);
            })?;

            self.input_manager.poll_events()?;
            if self.input_manager.quit_requested() {
                self.running = false;
                continue;
            }
            let frame_input = self.input_manager.snapshot();

            let now = Instant::now();
            let dt = now.duration_since(last_frame).as_secs_f32().max(1e-3);
            last_frame = now;

            self.step(dt, &frame_input);

            // Small sleep to maintain ~60 FPS and prevent CPU spinning
            std::thread::sleep(Duration::from_millis(16));
        }
        Ok(())
    }

    /// Advances the phase machine by one frame. Transitions are a
    /// deterministic function of the current phase, this frame's input and
    /// the wave's exposed status.
    pub fn step(&mut self, dt: f32, input: &dyn InputSource) {
        match self.phase {
            Phase::Inactive => {
                if input.was_key_pressed(Key::Start) {
                    self.wave = Some(Wave::new());
                    self.outcome = None;
                    self.had_player_bolt = false;
                    self.phase = Phase::NewWave;
                }
            }
            // One-frame pass-through so the first active frame starts clean
            Phase::NewWave => self.phase = Phase::Active,
            Phase::Active => self.step_active(dt, input),
            Phase::Paused => {
                if input.was_key_pressed(Key::Start) {
                    self.phase = Phase::Continue;
                }
            }
            // One-frame pass-through so the resumed frame cannot re-process
            // a stale hit
            Phase::Continue => {
                if let Some(wave) = self.wave.as_mut() {
                    wave.recenter_ship();
                }
                self.phase = Phase::Active;
            }
            Phase::Complete => {
                if input.was_key_pressed(Key::Start) {
                    self.phase = Phase::Inactive;
                }
            }
        }
    }

    fn step_active(&mut self, dt: f32, input: &dyn InputSource) {
        let Some(wave) = self.wave.as_mut() else {
            // No wave means nothing to play; fall back to the title screen
            self.phase = Phase::Inactive;
            return;
        };

        wave.update(dt, input);

        let lives = wave.lives();
        let breached = wave.defense_breached();
        let cleared = wave.is_cleared();
        let hit = wave.ship_hit();
        let has_bolt = wave.has_player_bolt();
        if matches!(active_exit(lives, breached, cleared, hit), Some(ActiveExit::Hit)) {
            wave.clear_ship_hit();
        }

        if has_bolt && !self.had_player_bolt {
            self.audio_manager.play_fire();
        }
        self.had_player_bolt = has_bolt;
        if hit {
            self.audio_manager.play_hit();
        }

        match active_exit(lives, breached, cleared, hit) {
            Some(ActiveExit::Loss) => self.finish(Outcome::Destroyed),
            Some(ActiveExit::Win) => self.finish(Outcome::Cleared),
            Some(ActiveExit::Hit) => self.phase = Phase::Paused,
            None => {}
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.final_score = self.wave.as_ref().map_or(0, Wave::score);
        self.outcome = Some(outcome);
        // No wave exists outside the playing phases
        self.wave = None;
        self.phase = Phase::Complete;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn wave(&self) -> Option<&Wave> {
        self.wave.as_ref()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn final_score(&self) -> u32 {
        self.final_score
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
