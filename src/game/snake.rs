use super::direction::Direction;
use super::grid::Grid;
use super::Renderable;
use crate::consts;
use ratatui::{layout::Position, style::Color};
use std::collections::VecDeque;

/// Snake state.  Snate.
///
/// All positions are relative to the top-left corner of the grid the snake is
/// on.  The head and the body together form the snake's segments, head
/// first.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The position of the snake's head
    head: Position,

    /// The positions of the cells in the snake's body, starting with the cell
    /// just behind the head and ending with the tail
    body: VecDeque<Position>,

    /// The direction in which the snake last moved (or will move, if it
    /// hasn't moved yet)
    direction: Direction,

    /// A turn requested since the last move, applied at the start of the
    /// next one
    pending: Option<Direction>,

    /// The length the snake is working its way towards; never less than the
    /// actual number of segments
    target_len: usize,

    /// Set for the one move after eating a fruit, during which the tail is
    /// left in place
    growing: bool,

    /// The tail cell as it was before the most recent move
    last_vacated: Option<Position>,

    /// Where the head is placed on creation & on reset
    start: Position,
}

impl Snake {
    /// Create a new snake consisting of just a head at `start`, facing right
    pub(super) fn new(start: Position) -> Snake {
        Snake {
            head: start,
            body: VecDeque::new(),
            direction: Direction::Right,
            pending: None,
            target_len: 1,
            growing: false,
            last_vacated: None,
            start,
        }
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> Position {
        self.head
    }

    /// Return the positions of the cells in the snake's body, not including
    /// the head
    pub(super) fn body(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Return the positions of all of the snake's segments, head first
    pub(super) fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.body())
    }

    /// Return the number of segments
    pub(super) fn len(&self) -> usize {
        self.body.len() + 1
    }

    pub(super) fn target_len(&self) -> usize {
        self.target_len
    }

    pub(super) fn direction(&self) -> Direction {
        self.direction
    }

    /// Return the cell the tail occupied before the most recent move, so
    /// that it can be erased from the display
    pub(super) fn last_vacated(&self) -> Option<Position> {
        self.last_vacated
    }

    /// Return the glyph to use for drawing the snake's head
    pub(super) fn head_symbol(&self) -> char {
        match self.direction {
            Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
            Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
            Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
            Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
        }
    }

    /// Ask the snake to turn to face `direction` on its next move.
    ///
    /// Requests to reverse the direction of the most recent move are ignored;
    /// otherwise, the request replaces any earlier request not yet acted on.
    pub(super) fn request_direction(&mut self, direction: Direction) {
        if direction != self.direction.reverse() {
            self.pending = Some(direction);
        }
    }

    /// Move the snake forwards one cell within `grid`, turning first if a
    /// turn was requested.  Returns the new position of the head.
    pub(super) fn advance(&mut self, grid: Grid) -> Position {
        if let Some(direction) = self.pending.take() {
            self.direction = direction;
        }
        let new_head = self.direction.advance(self.head, grid);
        self.last_vacated = Some(self.tail());
        self.body.push_front(self.head);
        self.head = new_head;
        if self.growing {
            self.growing = false;
        } else {
            let _ = self.body.pop_back();
        }
        new_head
    }

    /// Returns `true` if the head occupies the same cell as any part of the
    /// body
    pub(super) fn check_self_collision(&self) -> bool {
        self.body.contains(&self.head)
    }

    /// Lengthen the snake in response to eating a fruit.  The new segment
    /// appears on the next move.
    pub(super) fn consume(&mut self) {
        self.target_len += 1;
        self.growing = true;
    }

    /// Restore the snake to the state it was in when created
    pub(super) fn reset(&mut self) {
        *self = Snake::new(self.start);
    }

    fn tail(&self) -> Position {
        self.body.back().copied().unwrap_or(self.head)
    }
}

impl Renderable for Snake {
    fn cell(&self) -> Position {
        self.head
    }

    fn color(&self) -> Color {
        consts::SNAKE_COLOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn big_grid() -> Grid {
        Grid::new(200, 200).unwrap()
    }

    fn snake_from(segments: &[Position], target_len: usize) -> Snake {
        let mut snake = Snake::new(segments[0]);
        snake.body = segments[1..].iter().copied().collect();
        snake.target_len = target_len;
        snake
    }

    #[test]
    fn new_snake() {
        let snake = Snake::new(Position::new(16, 12));
        assert_eq!(snake.segments().collect::<Vec<_>>(), [Position::new(16, 12)]);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.target_len(), 1);
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.last_vacated(), None);
        assert!(!snake.check_self_collision());
    }

    #[test]
    fn advance_moves_head_and_drops_tail() {
        let mut snake = Snake::new(Position::new(100, 100));
        assert_eq!(snake.advance(big_grid()), Position::new(101, 100));
        assert_eq!(snake.segments().collect::<Vec<_>>(), [Position::new(101, 100)]);
        assert_eq!(snake.last_vacated(), Some(Position::new(100, 100)));
    }

    #[test]
    fn wraps_at_right_edge() {
        let grid = Grid::new(32, 24).unwrap();
        let mut snake = Snake::new(Position::new(31, 5));
        assert_eq!(snake.advance(grid), Position::new(0, 5));
        assert_eq!(snake.head(), Position::new(0, 5));
    }

    #[test]
    fn growth_is_deferred_one_move() {
        let mut snake = Snake::new(Position::new(100, 100));
        snake.consume();
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.target_len(), 2);
        snake.advance(big_grid());
        assert_eq!(snake.len(), 2);
        assert_eq!(
            snake.segments().collect::<Vec<_>>(),
            [Position::new(101, 100), Position::new(100, 100)]
        );
        assert_eq!(snake.last_vacated(), Some(Position::new(100, 100)));
        snake.advance(big_grid());
        assert_eq!(
            snake.segments().collect::<Vec<_>>(),
            [Position::new(102, 100), Position::new(101, 100)]
        );
        assert_eq!(snake.last_vacated(), Some(Position::new(100, 100)));
    }

    #[test]
    fn length_never_exceeds_target() {
        let grid = Grid::new(7, 5).unwrap();
        let mut snake = Snake::new(grid.center());
        let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];
        for i in 0..200 {
            if i % 3 == 0 {
                snake.consume();
            }
            if i % 4 == 0 {
                snake.request_direction(turns[(i / 4) % turns.len()]);
            }
            snake.advance(grid);
            assert!(snake.len() <= snake.target_len());
            assert!(grid.contains(snake.head()));
            if let Some(neck) = snake.body().next() {
                // The snake never faces back into its own neck
                assert_eq!(neck, snake.direction().reverse().advance(snake.head(), grid));
            }
            if snake.check_self_collision() {
                snake.reset();
            }
        }
    }

    #[test]
    fn length_catches_up_after_consumption() {
        let mut snake = Snake::new(Position::new(10, 10));
        for _ in 0..5 {
            snake.consume();
            snake.advance(big_grid());
            assert_eq!(snake.len(), snake.target_len());
        }
        assert_eq!(snake.len(), 6);
    }

    #[rstest]
    #[case(Direction::Right, Direction::Left)]
    #[case(Direction::Left, Direction::Right)]
    #[case(Direction::Up, Direction::Down)]
    #[case(Direction::Down, Direction::Up)]
    fn reverse_request_ignored(#[case] current: Direction, #[case] request: Direction) {
        let mut snake = Snake::new(Position::new(100, 100));
        snake.direction = current;
        snake.request_direction(request);
        snake.advance(big_grid());
        assert_eq!(snake.direction(), current);
    }

    #[test]
    fn reverse_checked_against_committed_direction() {
        // Right, then Up, then Left before any move: Left would reverse the
        // committed direction, so the Up request stands.
        let mut snake = Snake::new(Position::new(100, 100));
        snake.request_direction(Direction::Up);
        snake.request_direction(Direction::Left);
        assert_eq!(snake.advance(big_grid()), Position::new(100, 99));
        assert_eq!(snake.direction(), Direction::Up);
        snake.request_direction(Direction::Left);
        assert_eq!(snake.advance(big_grid()), Position::new(99, 99));
        assert_eq!(snake.direction(), Direction::Left);
    }

    #[test]
    fn newer_request_overwrites_older() {
        let mut snake = Snake::new(Position::new(100, 100));
        snake.request_direction(Direction::Up);
        snake.request_direction(Direction::Down);
        assert_eq!(snake.advance(big_grid()), Position::new(100, 101));
        assert_eq!(snake.direction(), Direction::Down);
    }

    #[test]
    fn pending_request_applies_once() {
        let mut snake = Snake::new(Position::new(100, 100));
        snake.request_direction(Direction::Down);
        snake.advance(big_grid());
        snake.advance(big_grid());
        assert_eq!(snake.head(), Position::new(100, 102));
        assert_eq!(snake.pending, None);
    }

    #[test]
    fn requesting_current_direction_is_noop() {
        let mut requested = snake_from(
            &[
                Position::new(50, 50),
                Position::new(49, 50),
                Position::new(48, 50),
            ],
            3,
        );
        let mut plain = requested.clone();
        for _ in 0..10 {
            requested.request_direction(requested.direction());
            requested.advance(big_grid());
            plain.advance(big_grid());
            assert_eq!(requested, plain);
        }
    }

    #[test]
    fn self_collision_and_reset() {
        let mut snake = snake_from(
            &[Position::new(0, 0), Position::new(20, 0), Position::new(0, 0)],
            3,
        );
        assert!(snake.check_self_collision());
        snake.reset();
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.target_len(), 1);
        assert_eq!(snake.head(), Position::new(0, 0));
        assert_eq!(snake.direction(), Direction::Right);
        assert!(!snake.check_self_collision());
    }

    #[test]
    fn reset_returns_to_start() {
        let mut snake = Snake::new(Position::new(16, 12));
        snake.request_direction(Direction::Down);
        snake.consume();
        snake.advance(big_grid());
        snake.consume();
        snake.request_direction(Direction::Left);
        snake.reset();
        assert_eq!(snake, Snake::new(Position::new(16, 12)));
    }

    #[test]
    fn runs_into_own_body() {
        let mut snake = snake_from(
            &[
                Position::new(5, 5),
                Position::new(4, 5),
                Position::new(4, 6),
                Position::new(5, 6),
                Position::new(6, 6),
            ],
            5,
        );
        snake.request_direction(Direction::Down);
        assert_eq!(snake.advance(big_grid()), Position::new(5, 6));
        assert!(snake.check_self_collision());
    }

    #[test]
    fn chasing_own_tail_is_not_a_collision() {
        let mut snake = snake_from(
            &[
                Position::new(5, 5),
                Position::new(4, 5),
                Position::new(4, 6),
                Position::new(5, 6),
            ],
            4,
        );
        snake.request_direction(Direction::Down);
        assert_eq!(snake.advance(big_grid()), Position::new(5, 6));
        assert!(!snake.check_self_collision());
    }

    #[rstest]
    #[case(Direction::Up, consts::SNAKE_HEAD_UP_SYMBOL)]
    #[case(Direction::Down, consts::SNAKE_HEAD_DOWN_SYMBOL)]
    #[case(Direction::Left, consts::SNAKE_HEAD_LEFT_SYMBOL)]
    #[case(Direction::Right, consts::SNAKE_HEAD_RIGHT_SYMBOL)]
    fn head_symbol_follows_direction(#[case] d: Direction, #[case] symbol: char) {
        let mut snake = Snake::new(Position::new(3, 3));
        snake.direction = d;
        assert_eq!(snake.head_symbol(), symbol);
    }
}
