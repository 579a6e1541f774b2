//! Grid snake: a pure simulation engine, a timer-driven driver around it and a
//! pixel front end with a persistent high score.

pub mod app;
pub mod config;
pub mod draw;
pub mod driver;
pub mod game;
pub mod grade;
pub mod high_score;
pub mod input;
pub mod layout;
pub mod pos;
pub mod screen;
pub mod timer;

pub use driver::{Driver, Frontend, Scheduler, UiEvent};
pub use game::{Dir, EngineError, Game, GameState, Snapshot, TickOutcome};
pub use grade::{GameOverReport, Grade};
pub use high_score::{HighScoreStore, JsonFileStore, MemoryStore};
pub use pos::Pos;
