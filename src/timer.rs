use crate::driver::Scheduler;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug)]
struct Armed {
    interval: Duration,
    next: Instant,
}

/// Repeating timer polled from the window event loop.
#[derive(Debug, Default)]
pub struct FrameTimer {
    armed: Option<Armed>,
}

impl FrameTimer {
    pub fn arm_at(&mut self, now: Instant, interval: Duration) {
        self.armed = Some(Armed {
            interval,
            next: now + interval,
        });
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.armed.map(|a| a.next)
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// True at most once per call. A late poll fires once and restarts the
    /// period from `now` instead of replaying the missed firings.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(armed) = self.armed.as_mut() else {
            return false;
        };
        if now < armed.next {
            return false;
        }
        armed.next += armed.interval;
        if armed.next <= now {
            armed.next = now + armed.interval;
        }
        true
    }
}

impl Scheduler for FrameTimer {
    fn arm(&mut self, interval: Duration) {
        self.arm_at(Instant::now(), interval);
    }

    fn cancel(&mut self) {
        self.armed = None;
    }
}
