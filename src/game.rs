use crate::pos::Pos;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IteratorRandom;
use std::collections::VecDeque;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_GRID_SIZE: u16 = 20;
/// Smallest grid that still leaves a free cell for food next to a one-cell snake.
pub const MIN_GRID_SIZE: u16 = 2;
pub const FOOD_REWARD: u32 = 10;
pub const BASE_INTERVAL_MS: u64 = 150;
pub const INTERVAL_STEP_MS: u64 = 2;
pub const MIN_INTERVAL_MS: u64 = 80;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameState {
    #[default]
    Idle,
    Running,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continued,
    AteFood,
    GameOver,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("grid size {0} is too small (minimum {MIN_GRID_SIZE})")]
    GridTooSmall(u16),
    #[error("cannot {action} while the game is {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: GameState,
    },
}

/// Read-only copy of the engine state handed to the renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub snake: Vec<Pos>,
    pub food: Option<Pos>,
    pub grid_size: u16,
    pub score: u32,
    pub heading: Dir,
    pub state: GameState,
    pub interval_ms: u64,
}

/// One snake run on an N×N grid.
///
/// The only randomness is food placement, drawn from `R`, so a seeded
/// generator makes a whole run reproducible.
pub struct Game<R = ThreadRng> {
    grid_size: u16,
    snake: VecDeque<Pos>,
    // Heading applied on the last tick; reversal checks compare against this.
    dir: Dir,
    pending: Dir,
    food: Option<Pos>,
    state: GameState,
    score: u32,
    interval_ms: u64,
    rng: R,
}

impl Game<ThreadRng> {
    pub fn new(grid_size: u16) -> Result<Self, EngineError> {
        Self::new_with_rng(grid_size, rand::thread_rng())
    }
}

impl<R: Rng> Game<R> {
    pub fn new_with_rng(grid_size: u16, rng: R) -> Result<Self, EngineError> {
        if grid_size < MIN_GRID_SIZE {
            return Err(EngineError::GridTooSmall(grid_size));
        }
        let mut game = Self {
            grid_size,
            snake: VecDeque::new(),
            dir: Dir::Right,
            pending: Dir::Right,
            food: None,
            state: GameState::Idle,
            score: 0,
            interval_ms: BASE_INTERVAL_MS,
            rng,
        };
        game.reset();
        Ok(game)
    }

    /// Back to a one-cell snake in the centre heading right, in `Idle`.
    pub fn reset(&mut self) {
        let center = i32::from(self.grid_size / 2);
        self.snake.clear();
        self.snake.push_back(Pos::new(center, center));
        self.dir = Dir::Right;
        self.pending = Dir::Right;
        self.score = 0;
        self.interval_ms = BASE_INTERVAL_MS;
        self.state = GameState::Idle;
        self.place_food();
    }

    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.state != GameState::Idle {
            return Err(EngineError::InvalidTransition {
                action: "start",
                state: self.state,
            });
        }
        self.state = GameState::Running;
        Ok(())
    }

    /// Returns `false` when the turn would reverse the current heading.
    pub fn request_direction(&mut self, dir: Dir) -> bool {
        if dir == self.dir.opposite() {
            return false;
        }
        self.pending = dir;
        true
    }

    pub fn tick(&mut self) -> Result<TickOutcome, EngineError> {
        if self.state != GameState::Running {
            return Err(EngineError::InvalidTransition {
                action: "tick",
                state: self.state,
            });
        }

        let new_head = self.head().step(self.pending);
        if !new_head.in_bounds(self.grid_size) || self.snake_contains(new_head) {
            self.state = GameState::GameOver;
            return Ok(TickOutcome::GameOver);
        }

        self.dir = self.pending;
        self.snake.push_front(new_head);
        if self.food == Some(new_head) {
            self.score += FOOD_REWARD;
            self.interval_ms = self
                .interval_ms
                .saturating_sub(INTERVAL_STEP_MS)
                .max(MIN_INTERVAL_MS);
            self.place_food();
            return Ok(TickOutcome::AteFood);
        }
        self.snake.pop_back();
        Ok(TickOutcome::Continued)
    }

    /// Rejection-samples a free cell. A nearly full board falls back to
    /// picking among the free cells directly; a full board leaves no food.
    fn place_food(&mut self) {
        let n = i32::from(self.grid_size);
        let attempts = usize::from(self.grid_size) * usize::from(self.grid_size) * 4;
        for _ in 0..attempts {
            let p = Pos::new(self.rng.gen_range(0..n), self.rng.gen_range(0..n));
            if !self.snake_contains(p) {
                self.food = Some(p);
                return;
            }
        }
        let snake = &self.snake;
        self.food = (0..n)
            .flat_map(|y| (0..n).map(move |x| Pos::new(x, y)))
            .filter(|p| !snake.contains(p))
            .choose(&mut self.rng);
    }

    pub fn snake_contains(&self, p: Pos) -> bool {
        self.snake.iter().any(|&s| s == p)
    }

    pub fn head(&self) -> Pos {
        // Never empty: reset seeds one segment and ticks only ever grow or shift.
        self.snake[0]
    }

    pub fn snake(&self) -> &VecDeque<Pos> {
        &self.snake
    }

    pub fn grid_size(&self) -> u16 {
        self.grid_size
    }

    pub fn dir(&self) -> Dir {
        self.dir
    }

    pub fn pending_dir(&self) -> Dir {
        self.pending
    }

    pub fn food(&self) -> Option<Pos> {
        self.food
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.iter().copied().collect(),
            food: self.food,
            grid_size: self.grid_size,
            score: self.score,
            heading: self.dir,
            state: self.state,
            interval_ms: self.interval_ms,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    /// Builds a running game with a hand-placed body, heading and food.
    pub(crate) fn arranged(cells: &[(i32, i32)], dir: Dir, food: (i32, i32)) -> Game<SmallRng> {
        let mut game = Game::new_with_rng(DEFAULT_GRID_SIZE, SmallRng::seed_from_u64(7)).unwrap();
        game.snake = cells.iter().map(|&(x, y)| Pos::new(x, y)).collect();
        game.dir = dir;
        game.pending = dir;
        game.food = Some(Pos::new(food.0, food.1));
        game.start().unwrap();
        game
    }

    pub(crate) fn with_score(game: &mut Game<SmallRng>, score: u32) {
        game.score = score;
    }

    #[test]
    fn reset_places_single_segment_in_center() {
        let game = Game::new_with_rng(20, SmallRng::seed_from_u64(1)).unwrap();
        assert_eq!(game.snake().len(), 1);
        assert_eq!(game.head(), Pos::new(10, 10));
        assert_eq!(game.dir(), Dir::Right);
        assert_eq!(game.state(), GameState::Idle);
        assert_eq!(game.score(), 0);
        assert_eq!(game.interval(), Duration::from_millis(BASE_INTERVAL_MS));
        let food = game.food().unwrap();
        assert!(food.in_bounds(20));
        assert_ne!(food, game.head());
    }

    #[test]
    fn tiny_grid_is_rejected() {
        assert_eq!(
            Game::new_with_rng(1, SmallRng::seed_from_u64(1)).err(),
            Some(EngineError::GridTooSmall(1))
        );
    }

    #[test]
    fn tick_requires_running() {
        let mut game = Game::new_with_rng(20, SmallRng::seed_from_u64(1)).unwrap();
        assert_eq!(
            game.tick(),
            Err(EngineError::InvalidTransition {
                action: "tick",
                state: GameState::Idle
            })
        );
        assert_eq!(game.head(), Pos::new(10, 10));
    }

    #[test]
    fn start_only_from_idle() {
        let mut game = Game::new_with_rng(20, SmallRng::seed_from_u64(1)).unwrap();
        game.start().unwrap();
        assert!(game.start().is_err());
    }

    #[test]
    fn eats_food_after_five_ticks() {
        let mut game = arranged(&[(10, 10)], Dir::Right, (15, 10));
        for _ in 0..4 {
            assert_eq!(game.tick(), Ok(TickOutcome::Continued));
        }
        assert_eq!(game.tick(), Ok(TickOutcome::AteFood));
        assert_eq!(game.head(), Pos::new(15, 10));
        assert_eq!(game.score(), 10);
        assert_eq!(game.snake().len(), 2);
        assert_eq!(game.snake()[1], Pos::new(14, 10));
        let food = game.food().unwrap();
        assert_ne!(food, Pos::new(15, 10));
        assert_ne!(food, Pos::new(14, 10));
        assert_eq!(game.interval(), Duration::from_millis(148));
    }

    #[test]
    fn reversal_is_ignored() {
        let mut game = arranged(&[(10, 10), (9, 10), (8, 10)], Dir::Right, (0, 0));
        assert!(!game.request_direction(Dir::Left));
        assert_eq!(game.pending_dir(), Dir::Right);
        assert_eq!(game.tick(), Ok(TickOutcome::Continued));
        assert_eq!(game.head(), Pos::new(11, 10));
    }

    #[test]
    fn reversal_is_checked_against_applied_heading() {
        let mut game = arranged(&[(10, 10), (9, 10), (8, 10)], Dir::Up, (0, 0));
        assert!(game.request_direction(Dir::Left));
        // Still heading up until the next tick, so down stays forbidden.
        assert!(!game.request_direction(Dir::Down));
        assert!(game.request_direction(Dir::Up));
        assert_eq!(game.pending_dir(), Dir::Up);
    }

    #[test]
    fn non_reversing_turns_are_always_honoured() {
        for current in Dir::ALL {
            for wanted in Dir::ALL {
                let mut game = arranged(&[(10, 10)], current, (0, 0));
                let accepted = game.request_direction(wanted);
                assert_eq!(accepted, wanted != current.opposite());
                let expected = if accepted { wanted } else { current };
                assert_eq!(game.pending_dir(), expected);
            }
        }
    }

    #[test]
    fn wall_ends_the_run_without_touching_score() {
        let mut game = arranged(&[(19, 10)], Dir::Right, (0, 0));
        game.score = 30;
        game.interval_ms = 144;
        assert_eq!(game.tick(), Ok(TickOutcome::GameOver));
        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.score(), 30);
        assert_eq!(game.interval(), Duration::from_millis(144));
        assert_eq!(game.head(), Pos::new(19, 10));
    }

    #[test]
    fn turn_into_wall_is_not_predicted() {
        let mut game = arranged(&[(5, 1)], Dir::Right, (0, 5));
        assert!(game.request_direction(Dir::Up));
        assert_eq!(game.tick(), Ok(TickOutcome::Continued));
        assert_eq!(game.head(), Pos::new(5, 0));
        assert_eq!(game.tick(), Ok(TickOutcome::GameOver));
    }

    #[test]
    fn running_into_own_body_ends_the_run() {
        // Head at (5,5) heading up with the body curled round its left side.
        let mut game = arranged(
            &[(5, 5), (5, 6), (4, 6), (4, 5), (4, 4), (5, 4), (6, 4)],
            Dir::Up,
            (0, 0),
        );
        let before = game.snake().clone();
        assert!(game.request_direction(Dir::Left));
        assert_eq!(game.tick(), Ok(TickOutcome::GameOver));
        assert_eq!(game.snake(), &before);
    }

    #[test]
    fn hitting_the_tail_is_fatal() {
        // A 2x2 loop: the tail cell is still occupied when the head arrives.
        let mut game = arranged(&[(5, 5), (6, 5), (6, 6), (5, 6)], Dir::Left, (0, 0));
        assert!(game.request_direction(Dir::Down));
        assert_eq!(game.tick(), Ok(TickOutcome::GameOver));
    }

    #[test]
    fn no_growth_without_food() {
        let mut game = arranged(&[(10, 10), (9, 10), (8, 10)], Dir::Right, (0, 0));
        assert_eq!(game.tick(), Ok(TickOutcome::Continued));
        let body: Vec<_> = game.snake().iter().copied().collect();
        assert_eq!(body, vec![Pos::new(11, 10), Pos::new(10, 10), Pos::new(9, 10)]);
    }

    #[test]
    fn interval_is_floored() {
        let mut game = arranged(&[(10, 10)], Dir::Right, (11, 10));
        game.interval_ms = MIN_INTERVAL_MS + 1;
        assert_eq!(game.tick(), Ok(TickOutcome::AteFood));
        assert_eq!(game.interval(), Duration::from_millis(MIN_INTERVAL_MS));

        game.food = Some(Pos::new(12, 10));
        assert_eq!(game.tick(), Ok(TickOutcome::AteFood));
        assert_eq!(game.interval(), Duration::from_millis(MIN_INTERVAL_MS));
    }

    #[test]
    fn reset_restores_base_values() {
        let mut game = arranged(&[(10, 10)], Dir::Right, (11, 10));
        game.tick().unwrap();
        game.reset();
        assert_eq!(game.score(), 0);
        assert_eq!(game.interval(), Duration::from_millis(BASE_INTERVAL_MS));
        assert_eq!(game.state(), GameState::Idle);
        assert_eq!(game.snake().len(), 1);
    }

    #[test]
    fn food_lands_on_the_only_free_cell() {
        let mut game = Game::new_with_rng(2, SmallRng::seed_from_u64(3)).unwrap();
        game.snake = [(1, 1), (0, 1), (0, 0)]
            .iter()
            .map(|&(x, y)| Pos::new(x, y))
            .collect();
        game.place_food();
        assert_eq!(game.food(), Some(Pos::new(1, 0)));
    }

    #[test]
    fn full_board_leaves_no_food() {
        let mut game = Game::new_with_rng(2, SmallRng::seed_from_u64(3)).unwrap();
        game.snake = [(1, 0), (1, 1), (0, 1), (0, 0)]
            .iter()
            .map(|&(x, y)| Pos::new(x, y))
            .collect();
        game.place_food();
        assert_eq!(game.food(), None);
    }

    #[test]
    fn same_seed_same_food() {
        let a = Game::new_with_rng(20, SmallRng::seed_from_u64(42)).unwrap();
        let b = Game::new_with_rng(20, SmallRng::seed_from_u64(42)).unwrap();
        assert_eq!(a.food(), b.food());
    }
}
