//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier},
};
use std::num::NonZeroU32;

/// Size of the grid when not set in the configuration file
pub(crate) const DEFAULT_GRID_SIZE: Size = Size {
    width: 32,
    height: 24,
};

/// Number of times per second the snake moves when not set in the
/// configuration file
pub(crate) const DEFAULT_TICKS_PER_SECOND: NonZeroU32 = match NonZeroU32::new(20) {
    Some(n) => n,
    None => panic!("DEFAULT_TICKS_PER_SECOND must be nonzero"),
};

/// Filter used for the log file when `RUST_LOG` is not set
pub(crate) const DEFAULT_LOG_FILTER: &str = "info";

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the fruit
pub(crate) const FRUIT_SYMBOL: char = '●';

/// Color of the snake's head and body
pub(crate) const SNAKE_COLOR: Color = Color::Green;

/// Color of the fruit
pub(crate) const FRUIT_COLOR: Color = Color::LightRed;

/// Added to the snake's color when drawing its head
pub(crate) const SNAKE_HEAD_MODIFIER: Modifier = Modifier::BOLD;
