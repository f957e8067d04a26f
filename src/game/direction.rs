use super::grid::Grid;
use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the cell one step from `pos` in this direction, wrapping around
    /// the edges of `grid`
    pub(crate) fn advance(self, pos: Position, grid: Grid) -> Position {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::Up => y = wrapping_decrement(y, grid.height()),
            Direction::Down => y = wrapping_increment(y, grid.height()),
            Direction::Left => x = wrapping_decrement(x, grid.width()),
            Direction::Right => x = wrapping_increment(x, grid.width()),
        }
        Position { x, y }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

fn wrapping_decrement(x: u16, max: u16) -> u16 {
    x.checked_sub(1).unwrap_or(max.saturating_sub(1))
}

fn wrapping_increment(x: u16, max: u16) -> u16 {
    x.checked_add(1).filter(|&xx| xx < max).unwrap_or(0)
}
