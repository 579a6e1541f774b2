use crate::driver::{Frontend, UiEvent};
use crate::game::{GameState, Snapshot};
use crate::grade::GameOverReport;

/// What the window currently shows, fed by the driver.
#[derive(Debug, Default)]
pub struct Screen {
    snapshot: Option<Snapshot>,
    score: u32,
    high_score: u32,
    state: GameState,
    report: Option<GameOverReport>,
    dirty: bool,
}

impl Screen {
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Banner contents; only set while the game-over panel is visible.
    pub fn report(&self) -> Option<&GameOverReport> {
        self.report.as_ref()
    }

    pub fn button_label(&self) -> Option<&'static str> {
        match self.state {
            GameState::Idle => Some("START"),
            GameState::Running => None,
            GameState::GameOver => Some("RESET"),
        }
    }

    /// Whether anything changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl Frontend for Screen {
    fn render(&mut self, snapshot: &Snapshot) {
        self.snapshot = Some(snapshot.clone());
        self.dirty = true;
    }

    fn notify(&mut self, event: UiEvent) {
        match event {
            UiEvent::ScoreChanged(score) => self.score = score,
            UiEvent::HighScoreChanged(best) => self.high_score = best,
            UiEvent::StateChanged(state) => {
                self.state = state;
                if state != GameState::GameOver {
                    self.report = None;
                }
            }
            UiEvent::GameOver(report) => self.report = Some(report),
        }
        self.dirty = true;
    }
}
