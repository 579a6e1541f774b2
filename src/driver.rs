use crate::game::{Dir, Game, GameState, Snapshot, TickOutcome};
use crate::grade::GameOverReport;
use crate::high_score::{self, HighScoreStore};
use rand::Rng;
use rand::rngs::ThreadRng;
use std::time::Duration;
use tracing::{debug, info, warn};

/// A single cancellable repeating timer.
pub trait Scheduler {
    /// Arms the timer; any previous arming is replaced.
    fn arm(&mut self, interval: Duration);
    fn cancel(&mut self);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    ScoreChanged(u32),
    HighScoreChanged(u32),
    StateChanged(GameState),
    GameOver(GameOverReport),
}

/// Render and UI boundary.
pub trait Frontend {
    fn render(&mut self, snapshot: &Snapshot);
    fn notify(&mut self, event: UiEvent);
}

/// Runs a [`Game`] in real time: owns the timer, buffers intents and applies
/// the high-score policy when a run ends.
pub struct Driver<S, R = ThreadRng> {
    game: Game<R>,
    scheduler: S,
    store: Box<dyn HighScoreStore>,
    intent: Option<Dir>,
    high_score: u32,
}

impl<S: Scheduler, R: Rng> Driver<S, R> {
    pub fn new(game: Game<R>, scheduler: S, store: Box<dyn HighScoreStore>) -> Self {
        let high_score = high_score::read_or_default(store.as_ref());
        Self {
            game,
            scheduler,
            store,
            intent: None,
            high_score,
        }
    }

    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    pub fn state(&self) -> GameState {
        self.game.state()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn store(&self) -> &dyn HighScoreStore {
        self.store.as_ref()
    }

    /// Pushes the full current picture to a freshly attached frontend.
    pub fn present(&self, out: &mut dyn Frontend) {
        out.render(&self.game.snapshot());
        out.notify(UiEvent::ScoreChanged(self.game.score()));
        out.notify(UiEvent::HighScoreChanged(self.high_score));
        out.notify(UiEvent::StateChanged(self.game.state()));
    }

    /// Begins a run. From `GameOver` the board is reset first.
    pub fn start(&mut self, out: &mut dyn Frontend) -> bool {
        match self.game.state() {
            GameState::Running => return false,
            GameState::GameOver => {
                self.scheduler.cancel();
                self.game.reset();
                self.intent = None;
                out.render(&self.game.snapshot());
                out.notify(UiEvent::ScoreChanged(0));
            }
            GameState::Idle => {}
        }
        if let Err(err) = self.game.start() {
            warn!(%err, "start refused");
            return false;
        }
        self.scheduler.arm(self.game.interval());
        info!(interval_ms = self.game.interval().as_millis() as u64, "run started");
        out.notify(UiEvent::StateChanged(GameState::Running));
        true
    }

    /// Aborts or clears the current run and returns to `Idle`.
    pub fn reset(&mut self, out: &mut dyn Frontend) {
        self.scheduler.cancel();
        self.game.reset();
        self.intent = None;
        out.render(&self.game.snapshot());
        out.notify(UiEvent::ScoreChanged(0));
        out.notify(UiEvent::StateChanged(GameState::Idle));
    }

    /// Buffers a turn for the next tick; only the latest one survives.
    pub fn push_intent(&mut self, dir: Dir) -> bool {
        if self.game.state() != GameState::Running {
            return false;
        }
        self.intent = Some(dir);
        true
    }

    /// One timer firing. Returns `None` if no run is in progress.
    pub fn on_timer(&mut self, out: &mut dyn Frontend) -> Option<TickOutcome> {
        if self.game.state() != GameState::Running {
            return None;
        }
        if let Some(dir) = self.intent.take() {
            self.game.request_direction(dir);
        }

        let interval = self.game.interval();
        let outcome = match self.game.tick() {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(%err, "tick refused");
                return None;
            }
        };

        match outcome {
            TickOutcome::Continued => out.render(&self.game.snapshot()),
            TickOutcome::AteFood => {
                out.render(&self.game.snapshot());
                out.notify(UiEvent::ScoreChanged(self.game.score()));
                let next = self.game.interval();
                if next != interval {
                    self.scheduler.cancel();
                    self.scheduler.arm(next);
                    debug!(score = self.game.score(), interval_ms = next.as_millis() as u64, "speed up");
                }
            }
            TickOutcome::GameOver => self.finish_run(out),
        }
        Some(outcome)
    }

    /// Teardown: no tick may fire after this returns.
    pub fn shutdown(&mut self) {
        self.scheduler.cancel();
        self.intent = None;
    }

    fn finish_run(&mut self, out: &mut dyn Frontend) {
        self.scheduler.cancel();
        self.intent = None;

        let score = self.game.score();
        let stored = high_score::read_or_default(self.store.as_ref());
        let record = score > stored;
        if record {
            high_score::save_best_effort(self.store.as_mut(), score);
            self.high_score = score;
        } else {
            self.high_score = stored;
        }

        let report = GameOverReport::new(score);
        info!(score, grade = report.grade.label(), record, "run over");
        out.render(&self.game.snapshot());
        if record {
            out.notify(UiEvent::HighScoreChanged(score));
        }
        out.notify(UiEvent::GameOver(report));
        out.notify(UiEvent::StateChanged(GameState::GameOver));
    }
}
