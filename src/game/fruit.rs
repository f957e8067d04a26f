use super::grid::Grid;
use super::Renderable;
use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use ratatui::{layout::Position, style::Color};
use std::collections::HashSet;

/// Number of random cells `Fruit::randomize_avoiding` tries before falling
/// back to scanning the grid
const PLACEMENT_ATTEMPTS: usize = 32;

/// The fruit that the snake is trying to eat
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Fruit {
    pub(super) position: Position,
}

impl Fruit {
    /// Create a fruit at a random position within `grid`
    pub(super) fn new<R: Rng>(grid: Grid, rng: &mut R) -> Fruit {
        let mut fruit = Fruit {
            position: Position::ORIGIN,
        };
        fruit.randomize_position(grid, rng);
        fruit
    }

    pub(super) fn position(&self) -> Position {
        self.position
    }

    /// Move the fruit to a uniformly random cell of `grid`.  The new cell may
    /// be occupied by the snake.
    pub(super) fn randomize_position<R: Rng>(&mut self, grid: Grid, rng: &mut R) {
        self.position = Position::new(
            rng.random_range(0..grid.width()),
            rng.random_range(0..grid.height()),
        );
    }

    /// Move the fruit to a uniformly random cell of `grid` that is not in
    /// `occupied`.  If every cell is occupied, any cell may be chosen.
    ///
    /// A few random cells are tried first; only if they all land on the snake
    /// is the whole grid scanned for free cells.
    pub(super) fn randomize_avoiding<R: Rng>(
        &mut self,
        grid: Grid,
        rng: &mut R,
        occupied: &HashSet<Position>,
    ) {
        for _ in 0..PLACEMENT_ATTEMPTS {
            self.randomize_position(grid, rng);
            if !occupied.contains(&self.position) {
                return;
            }
        }
        match grid
            .positions()
            .filter(|p| !occupied.contains(p))
            .choose(rng)
        {
            Some(pos) => self.position = pos,
            None => self.randomize_position(grid, rng),
        }
    }
}

impl Renderable for Fruit {
    fn cell(&self) -> Position {
        self.position
    }

    fn color(&self) -> Color {
        consts::FRUIT_COLOR
    }
}
