use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Logical keys the simulation core understands. `Fire` is the "up" key of
/// the original layout; `Start` doubles as the resume key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Fire,
    Start,
}

/// Input capability consumed by the simulation core and the phase machine.
/// `is_key_down` is level-triggered and polled every frame for movement and
/// firing; `was_key_pressed` is edge-triggered and used for start/resume.
pub trait InputSource {
    fn is_key_down(&self, key: Key) -> bool;
    fn was_key_pressed(&self, key: Key) -> bool;
}

/// One frame's worth of input, snapshotted from the [`InputManager`].
/// Tests build these by hand to drive frames deterministically.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputFrame {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Start was pressed during this frame (edge, not level).
    pub start: bool,
}

impl InputSource for InputFrame {
    fn is_key_down(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Fire => self.fire,
            Key::Start => false,
        }
    }

    fn was_key_pressed(&self, key: Key) -> bool {
        key == Key::Start && self.start
    }
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    left: bool,
    right: bool,
    fire: bool,
}

/// Polls crossterm events and translates raw key events into per-frame
/// [`InputFrame`] snapshots. Held state relies on key-release events, which
/// need the keyboard enhancement flags pushed in `main`.
#[derive(Debug, Default)]
pub struct InputManager {
    key_state: KeyState,
    start_pressed: bool,
    quit: bool,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains all pending input events. Should be called once per frame
    /// before taking a snapshot.
    pub fn poll_events(&mut self) -> color_eyre::Result<()> {
        // Edges only live for one frame
        self.start_pressed = false;

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key_event) => self.handle_key_event(key_event),
                Event::Mouse(_) => {
                    // Mouse events currently ignored
                }
                Event::Resize(_, _) => {
                    // Resize events handled by the renderer
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event),
            KeyEventKind::Release => self.handle_key_release(key_event.code),
            _ => {}
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent) {
        // Quit keys work in any state
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.quit = true;
            return;
        }

        match key_event.code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = true;
                self.key_state.right = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = true;
                self.key_state.left = false;
            }
            KeyCode::Char(' ') | KeyCode::Up => {
                self.key_state.fire = true;
            }
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Enter => {
                self.start_pressed = true;
            }
            _ => {}
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = false;
            }
            KeyCode::Char(' ') | KeyCode::Up => {
                self.key_state.fire = false;
            }
            _ => {}
        }
    }

    /// The input state for this frame. Must be called after `poll_events`.
    pub fn snapshot(&self) -> InputFrame {
        InputFrame {
            left: self.key_state.left,
            right: self.key_state.right,
            fire: self.key_state.fire,
            start: self.start_pressed,
        }
    }

    /// True once a quit key was seen.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}
