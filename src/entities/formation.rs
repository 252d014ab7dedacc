use rand::Rng;

use crate::constants::{
    ALIEN_CEILING, ALIEN_H_SEP, ALIEN_H_WALK, ALIEN_HEIGHT, ALIEN_IMAGES, ALIEN_ROWS, ALIEN_V_SEP,
    ALIEN_WIDTH, ALIENS_IN_ROW, GAME_HEIGHT, GAME_WIDTH,
};
use crate::entities::{Alien, Body, Bolt};

/// Current horizontal marching direction of the formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarchDirection {
    Left,
    Right,
}

/// The alien grid. The grid keeps its rectangular shape for the whole
/// wave; destroying an alien empties its cell but never removes the slot,
/// so row/column addressing stays valid for firing selection.
///
/// Row 0 is the top row; higher row indices sit lower on the screen.
#[derive(Debug, Clone)]
pub struct Formation {
    cells: Vec<Vec<Option<Alien>>>,
    direction: MarchDirection,
}

impl Formation {
    /// Builds the full starting grid, marching right. Rows are assigned
    /// point tiers from the bottom up: the two frontmost rows are tier 3,
    /// the next two tier 2, the top row tier 1.
    pub fn new() -> Self {
        let top = GAME_HEIGHT - ALIEN_CEILING - ALIEN_HEIGHT / 2.0;
        let cells = (0..ALIEN_ROWS)
            .map(|row| {
                let y = top - row as f32 * (ALIEN_HEIGHT + ALIEN_V_SEP);
                (0..ALIENS_IN_ROW)
                    .map(|col| {
                        let x = ALIEN_H_SEP + ALIEN_WIDTH / 2.0
                            + col as f32 * (ALIEN_WIDTH + ALIEN_H_SEP);
                        Some(Alien::new(x, y, Self::image_for_row(row)))
                    })
                    .collect()
            })
            .collect();

        Self {
            cells,
            direction: MarchDirection::Right,
        }
    }

    fn image_for_row(row: usize) -> &'static str {
        let rows_from_bottom = ALIEN_ROWS - 1 - row;
        ALIEN_IMAGES[2 - (rows_from_bottom / 2).min(2)]
    }

    #[cfg(test)]
    pub(crate) fn from_cells(cells: Vec<Vec<Option<Alien>>>) -> Self {
        Self {
            cells,
            direction: MarchDirection::Right,
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// The alien in the given slot, if still alive. Out-of-range indices
    /// are a programmer error.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Alien> {
        self.cells[row][col].as_ref()
    }

    pub fn direction(&self) -> MarchDirection {
        self.direction
    }

    pub fn alien_count(&self) -> usize {
        self.live().count()
    }

    pub fn is_empty(&self) -> bool {
        self.live().next().is_none()
    }

    /// All live aliens in row-major order.
    pub fn live(&self) -> impl Iterator<Item = &Alien> {
        self.cells.iter().flatten().filter_map(Option::as_ref)
    }

    /// Live aliens with their grid slots, row-major.
    pub fn slots(&self) -> impl Iterator<Item = (usize, usize, &Alien)> {
        self.cells.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.as_ref().map(|alien| (row, col, alien)))
        })
    }

    fn live_mut(&mut self) -> impl Iterator<Item = &mut Alien> {
        self.cells.iter_mut().flatten().filter_map(Option::as_mut)
    }

    /// Leftmost and rightmost edges over all live aliens.
    fn extent(&self) -> Option<(f32, f32)> {
        let mut live = self.live();
        let first = live.next()?;
        let mut min_left = first.left();
        let mut max_right = first.right();
        for alien in live {
            min_left = min_left.min(alien.left());
            max_right = max_right.max(alien.right());
        }
        Some((min_left, max_right))
    }

    /// Bottom edge of the frontmost live alien; None when the grid is
    /// empty. Used for the defense-line check.
    pub fn lowest_edge(&self) -> Option<f32> {
        self.live().map(|a| a.bottom()).reduce(f32::min)
    }

    /// Performs one discrete march tick: a horizontal shift while the
    /// formation's own bounding extremes stay within the padded playfield,
    /// otherwise a one-row drop plus direction flip. No-op on an empty
    /// grid.
    pub fn march(&mut self) {
        let Some((min_left, max_right)) = self.extent() else {
            return;
        };

        match self.direction {
            MarchDirection::Right => {
                if max_right + ALIEN_H_WALK <= GAME_WIDTH - ALIEN_H_SEP {
                    for alien in self.live_mut() {
                        alien.step_right();
                    }
                } else {
                    for alien in self.live_mut() {
                        alien.step_down();
                    }
                    self.direction = MarchDirection::Left;
                }
            }
            MarchDirection::Left => {
                if min_left - ALIEN_H_WALK >= ALIEN_H_SEP {
                    for alien in self.live_mut() {
                        alien.step_left();
                    }
                } else {
                    for alien in self.live_mut() {
                        alien.step_down();
                    }
                    self.direction = MarchDirection::Right;
                }
            }
        }
    }

    /// Picks the slot that fires next: a uniformly random occupied column,
    /// then the lowest live alien in it. None when the grid is empty.
    pub fn firing_slot(&self, rng: &mut impl Rng) -> Option<(usize, usize)> {
        let occupied: Vec<usize> = (0..self.cols())
            .filter(|&col| self.cells.iter().any(|row| row[col].is_some()))
            .collect();
        if occupied.is_empty() {
            return None;
        }

        let col = occupied[rng.random_range(0..occupied.len())];
        // Lowest alien in the column is the one with the highest row index
        let row = (0..self.rows()).rev().find(|&row| self.cells[row][col].is_some())?;
        Some((row, col))
    }

    /// The first live alien (row-major) with a corner of the bolt inside
    /// its box. Only player bolts can hit aliens.
    pub fn first_hit(&self, bolt: &Bolt) -> Option<(usize, usize)> {
        self.slots()
            .find(|(_, _, alien)| alien.collides_with_player_bolt(bolt))
            .map(|(row, col, _)| (row, col))
    }

    /// Empties a grid cell, returning the alien that was in it. The slot
    /// itself survives so the grid stays rectangular.
    pub fn kill(&mut self, row: usize, col: usize) -> Option<Alien> {
        self.cells[row][col].take()
    }
}

impl Default for Formation {
    fn default() -> Self {
        Self::new()
    }
}
