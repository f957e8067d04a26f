use crate::consts;
use ratatui::layout::{Position, Positions, Rect, Size};
use serde::Deserialize;
use thiserror::Error;

/// The dimensions of the playing field, in cells.  The field is toroidal:
/// moving off of one edge re-enters at the opposite edge.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "RawGrid")]
pub(crate) struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    /// Create a new `Grid`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either dimension is zero.
    pub(crate) fn new(width: u16, height: u16) -> Result<Grid, GridError> {
        if width == 0 || height == 0 {
            Err(GridError { width, height })
        } else {
            Ok(Grid { width, height })
        }
    }

    pub(crate) fn width(self) -> u16 {
        self.width
    }

    pub(crate) fn height(self) -> u16 {
        self.height
    }

    pub(crate) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// The cell at which a fresh snake's head is placed
    pub(crate) fn center(self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub(crate) fn contains(self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Iterate over every cell in the grid in row-major order
    pub(crate) fn positions(self) -> Positions {
        Rect::from((Position::ORIGIN, self.size())).positions()
    }
}

impl Default for Grid {
    fn default() -> Grid {
        Grid {
            width: consts::DEFAULT_GRID_SIZE.width,
            height: consts::DEFAULT_GRID_SIZE.height,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
struct RawGrid {
    width: u16,
    height: u16,
}

impl Default for RawGrid {
    fn default() -> RawGrid {
        RawGrid {
            width: consts::DEFAULT_GRID_SIZE.width,
            height: consts::DEFAULT_GRID_SIZE.height,
        }
    }
}

impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    fn try_from(value: RawGrid) -> Result<Grid, GridError> {
        Grid::new(value.width, value.height)
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("grid dimensions must be nonzero, got {width}x{height}")]
pub(crate) struct GridError {
    width: u16,
    height: u16,
}
