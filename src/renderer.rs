use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{Outcome, Phase};
use crate::constants::{DEFENSE_LINE, GAME_HEIGHT, GAME_WIDTH};
use crate::entities::Body;
use crate::wave::Wave;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub phase: Phase,
    pub wave: Option<&'a Wave>,
    pub outcome: Option<Outcome>,
    pub final_score: u32,
    pub area: Rect,
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {
    // Future: could add theme/config fields here
}

impl GameRenderer {
    /// Creates a new GameRenderer
    pub fn new() -> Self {
        Self {}
    }

    /// Main render method that dispatches to phase-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.phase {
            Phase::Inactive => self.render_title(frame, view),
            Phase::NewWave | Phase::Active | Phase::Continue => self.render_game(frame, view),
            Phase::Paused => self.render_paused(frame, view),
            Phase::Complete => self.render_complete(frame, view),
        }
    }

    /// Renders the title screen
    fn render_title(&self, frame: &mut Frame, view: &RenderView) {
        let title_text = vec![
            Line::from(""),
            Line::from("I N V A D E R S").centered().green().bold(),
            Line::from(""),
            Line::from("Defend the line. Clear the wave. Beat the boss.")
                .centered()
                .white(),
            Line::from(""),
            Line::from("[A/D or ←/→: Move] [Space/↑: Fire]")
                .centered()
                .dark_gray(),
            Line::from(""),
            Line::from("Press S to start").centered().yellow().bold(),
            Line::from("Press Q to quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(title_text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            view.area,
        );
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let Some(wave) = view.wave else {
            return;
        };
        let area = view.area;
        // One header row and one footer row stay outside the playfield
        let game_area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(2),
        };

        let buffer = frame.buffer_mut();

        // Defense line across the whole playfield
        let (_, line_row) = project(game_area, 0.0, DEFENSE_LINE);
        buffer.set_string(
            game_area.x,
            line_row,
            "─".repeat(game_area.width as usize),
            Style::default().fg(Color::DarkGray),
        );

        // Alien grid, colored and shaped by point tier
        for (_, _, alien) in wave.formation().slots() {
            let (glyph, color) = match alien.points() {
                10 => ("{@@}", Color::Red),
                7 => ("<**>", Color::Magenta),
                _ => ("/MM\\", Color::Yellow),
            };
            draw_centered(buffer, game_area, alien.x(), alien.y(), glyph, color);
        }

        // Boss
        if let Some(boss) = wave.boss() {
            draw_centered(
                buffer,
                game_area,
                boss.x(),
                boss.y(),
                "<[####]>",
                Color::LightRed,
            );
        }

        // Ship
        if let Some(ship) = wave.ship() {
            draw_centered(buffer, game_area, ship.x(), ship.y(), "<=A=>", Color::Green);
        }

        // Bolts with direct buffer access
        for bolt in wave.bolts() {
            let (glyph, color) = if bolt.owned_by_player() {
                ('|', Color::Yellow)
            } else {
                ('!', Color::Magenta)
            };
            let (col, row) = project(game_area, bolt.x(), bolt.y());
            buffer.set_string(col, row, glyph.to_string(), Style::default().fg(color));
        }

        // Stats overlay at the top
        let mut stats = vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", wave.score()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Lives: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                "♥ ".repeat(wave.lives() as usize),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Aliens: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", wave.formation().alien_count()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(boss) = wave.boss() {
            stats.push(Span::styled(
                "  Boss HP: ",
                Style::default().fg(Color::DarkGray),
            ));
            stats.push(Span::styled(
                format!("{}", boss.health()),
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(Line::from(stats)), stats_area);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[A/D or ←/→: Move] [Space/↑: Fire] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);

        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Renders the pause screen with overlay
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        // First render the game screen
        self.render_game(frame, view);

        let area = view.area;
        let pause_text = vec![
            Line::from(""),
            Line::from("SHIP HIT").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press S to continue").centered().white(),
        ];

        let pause_area = Rect {
            x: area.width / 2 - 15,
            y: area.height / 2 - 3,
            width: 30,
            height: 6,
        };

        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }

    /// Renders the wave-over screen
    fn render_complete(&self, frame: &mut Frame, view: &RenderView) {
        let (banner, style_color) = match view.outcome {
            Some(Outcome::Cleared) => ("WAVE CLEARED!", Color::Green),
            _ => ("GAME OVER", Color::Red),
        };

        let complete_text = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").style(Style::default().fg(style_color)),
            Line::from(format!("║ {banner:^25} ║"))
                .style(Style::default().fg(style_color).add_modifier(Modifier::BOLD)),
            Line::from("╚═══════════════════════════╝").style(Style::default().fg(style_color)),
            Line::from(""),
            Line::from(format!("Final Score: {}", view.final_score))
                .centered()
                .yellow()
                .bold(),
            Line::from(""),
            Line::from("Press S to return to title").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(complete_text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            view.area,
        );
    }
}

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a playfield point to a terminal cell. The playfield's y axis grows
/// upward, terminal rows grow downward, so the row is flipped. Points on
/// the playfield edge clamp to the last cell.
fn project(area: Rect, x: f32, y: f32) -> (u16, u16) {
    let last_col = area.width.saturating_sub(1);
    let last_row = area.height.saturating_sub(1);
    let col = ((x / GAME_WIDTH) * last_col as f32).round() as u16;
    let row = (((GAME_HEIGHT - y) / GAME_HEIGHT) * last_row as f32).round() as u16;
    (area.x + col.min(last_col), area.y + row.min(last_row))
}

fn draw_centered(
    buffer: &mut ratatui::buffer::Buffer,
    area: Rect,
    x: f32,
    y: f32,
    glyph: &str,
    color: Color,
) {
    let (col, row) = project(area, x, y);
    let half = (glyph.chars().count() / 2) as u16;
    let col = col.saturating_sub(half).max(area.x);
    buffer.set_string(
        col,
        row,
        glyph,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    );
}
