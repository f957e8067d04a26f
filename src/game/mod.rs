mod direction;
mod fruit;
mod grid;
mod snake;
pub(crate) use self::grid::Grid;
use self::direction::Direction;
use self::fruit::Fruit;
use self::snake::Snake;
use crate::app::Screen;
use crate::command::Command;
use crate::config::Config;
use crate::consts;
use crate::pacer::FramePacer;
use crate::util::center_rect;
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect},
    style::{Color, Style},
    text::Span,
    widgets::Widget,
    Frame,
};
use std::collections::HashSet;
use tracing::{debug, info, trace};

/// Something drawn on the board in a single color, located by one cell
pub(super) trait Renderable {
    /// The cell that locates the item; for the snake, this is its head
    fn cell(&self) -> Position;

    fn color(&self) -> Color;

    fn style(&self) -> Style {
        Style::new().fg(self.color())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    grid: Grid,
    snake: Snake,
    fruit: Fruit,
    fruit_avoids_snake: bool,
    stats: Stats,
    state: GameState,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(config: &Config) -> Self {
        Game::new_with_rng(config, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(config: &Config, mut rng: R) -> Game<R> {
        let grid = config.grid;
        let snake = Snake::new(grid.center());
        let fruit = Fruit::new(grid, &mut rng);
        info!(
            width = grid.width(),
            height = grid.height(),
            start = ?snake.head(),
            fruit = ?fruit.position(),
            "Starting new game"
        );
        Game {
            rng,
            grid,
            snake,
            fruit,
            fruit_avoids_snake: config.fruit_avoids_snake,
            stats: Stats::default(),
            state: GameState::Running,
        }
    }

    /// Wait for either the next tick or an input event, whichever comes
    /// first, and handle it.
    pub(crate) fn process_input(
        &mut self,
        pacer: &mut FramePacer,
    ) -> std::io::Result<Option<Screen>> {
        if self.running() {
            let wait = pacer.remaining();
            if wait.is_zero() || !poll(wait)? {
                self.tick();
                pacer.rearm();
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            // Don't count time spent paused towards the next tick
            pacer.rearm();
            Ok(self.handle_event(read()?))
        }
    }

    /// Run one step of the simulation: move the snake, let it eat the fruit
    /// if it's reached it, and start the snake over if it ran into itself.
    fn tick(&mut self) {
        let head = self.snake.advance(self.grid);
        debug_assert!(self.grid.contains(head), "snake left the grid");
        trace!(head = ?head, direction = ?self.snake.direction(), "Snake advanced");
        if head == self.fruit.position() {
            self.snake.consume();
            self.respawn_fruit();
            self.stats.eaten += 1;
            debug!(
                target_len = self.snake.target_len(),
                fruit = ?self.fruit.position(),
                "Fruit eaten"
            );
        }
        self.stats.best_len = self.stats.best_len.max(self.snake.len());
        if self.snake.check_self_collision() {
            info!(
                length = self.snake.len(),
                eaten = self.stats.eaten,
                "Snake ran into itself; starting over"
            );
            self.snake.reset();
            self.stats.resets += 1;
        }
    }

    fn respawn_fruit(&mut self) {
        if self.fruit_avoids_snake {
            let occupied = self.snake.segments().collect::<HashSet<_>>();
            self.fruit
                .randomize_avoiding(self.grid, &mut self.rng, &occupied);
        } else {
            self.fruit.randomize_position(self.grid, &mut self.rng);
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match (
            self.state,
            Command::from_key_event(event.as_key_press_event()?)?,
        ) {
            (_, Command::Quit) => return Some(Screen::Quit),
            (_, Command::Pause) => self.toggle_pause(),
            (GameState::Running, Command::Up) => self.snake.request_direction(Direction::Up),
            (GameState::Running, Command::Down) => self.snake.request_direction(Direction::Down),
            (GameState::Running, Command::Left) => self.snake.request_direction(Direction::Left),
            (GameState::Running, Command::Right) => {
                self.snake.request_direction(Direction::Right);
            }
            (GameState::Paused, _) => (),
        }
        None
    }

    fn running(&self) -> bool {
        self.state == GameState::Running
    }

    fn toggle_pause(&mut self) {
        self.state = match self.state {
            GameState::Running => GameState::Paused,
            GameState::Paused => GameState::Running,
        };
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [status_area, board_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);
        Span::from(format!(
            " Length: {}  Best: {}  Resets: {}",
            self.snake.len(),
            self.stats.best_len,
            self.stats.resets
        ))
        .render(status_area, buf);

        let mut block_size = self.grid.size();
        block_size.width = block_size.width.saturating_add(2);
        block_size.height = block_size.height.saturating_add(2);
        let block_area = center_rect(board_area, block_size);
        // The grid wraps around, so its edge is drawn as a dotted line
        DottedBorder.render(block_area, buf);

        let mut board = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        if let Some(pos) = self.snake.last_vacated() {
            board.clear_cell(pos);
        }
        board.draw_cell(self.fruit.cell(), consts::FRUIT_SYMBOL, self.fruit.style());
        for pos in self.snake.body() {
            board.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, self.snake.style());
        }
        // Draw the head last so that it stays visible if a fruit lands under
        // it
        board.draw_cell(
            self.snake.cell(),
            self.snake.head_symbol(),
            self.snake.style().add_modifier(consts::SNAKE_HEAD_MODIFIER),
        );

        let help = match self.state {
            GameState::Running => " p: pause  q: quit",
            GameState::Paused => " PAUSED  p: resume  q: quit",
        };
        Span::from(help).render(help_area, buf);
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn cell_mut(&mut self, pos: Position) -> Option<&mut ratatui::buffer::Cell> {
        if pos.x >= self.area.width || pos.y >= self.area.height {
            return None;
        }
        let x = self.area.x.checked_add(pos.x)?;
        let y = self.area.y.checked_add(pos.y)?;
        self.buf.cell_mut((x, y))
    }

    fn draw_char(&mut self, pos: Position, symbol: char) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.set_char(symbol);
        }
    }

    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }

    fn clear_cell(&mut self, pos: Position) {
        self.draw_cell(pos, ' ', Style::reset());
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let size = area.as_size();
        let max_x = size.width.saturating_sub(1);
        let max_y = size.height.saturating_sub(1);
        let mut canvas = Canvas { area, buf };
        canvas.draw_char(Position::ORIGIN, '·');
        canvas.draw_char(Position::new(max_x, 0), '·');
        canvas.draw_char(Position::new(max_x, max_y), '·');
        canvas.draw_char(Position::new(0, max_y), '·');
        for x in 1..max_x {
            canvas.draw_char(Position::new(x, 0), '⋯');
            canvas.draw_char(Position::new(x, max_y), '⋯');
        }
        for y in 1..max_y {
            canvas.draw_char(Position::new(0, y), '⋮');
            canvas.draw_char(Position::new(max_x, y), '⋮');
        }
    }
}

/// Per-session counters shown in the status line.  These are not saved.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Stats {
    eaten: u32,
    resets: u32,
    best_len: usize,
}

impl Default for Stats {
    fn default() -> Stats {
        Stats {
            eaten: 0,
            resets: 0,
            best_len: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    Paused,
}
