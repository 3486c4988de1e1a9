use std::time::{Duration, Instant};

/// Monotonic elapsed-time source used for wpm
pub trait Clock {
    /// Start measuring. Has no effect once started.
    fn start(&mut self);
    /// Freeze the elapsed reading
    fn stop(&mut self);
    fn is_running(&self) -> bool;
    fn elapsed(&self) -> Duration;
}

/// Wall-clock stopwatch backed by `Instant`
#[derive(Clone, Copy, Debug, Default)]
pub struct Stopwatch {
    started_at: Option<Instant>,
    frozen: Option<Duration>,
}

impl Clock for Stopwatch {
    fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    fn stop(&mut self) {
        if self.frozen.is_none() {
            self.frozen = Some(self.elapsed());
        }
    }

    fn is_running(&self) -> bool {
        self.started_at.is_some() && self.frozen.is_none()
    }

    fn elapsed(&self) -> Duration {
        match (self.frozen, self.started_at) {
            (Some(frozen), _) => frozen,
            (None, Some(started_at)) => started_at.elapsed(),
            (None, None) => Duration::ZERO,
        }
    }
}

/// Clock advanced by hand, for tests and headless runs
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualClock {
    started: bool,
    stopped: bool,
    elapsed: Duration,
}

impl ManualClock {
    /// Moves time forward only while running
    pub fn advance(&mut self, by: Duration) {
        if self.is_running() {
            self.elapsed += by;
        }
    }
}

impl Clock for ManualClock {
    fn start(&mut self) {
        self.started = true;
    }

    fn stop(&mut self) {
        if self.started {
            self.stopped = true;
        }
    }

    fn is_running(&self) -> bool {
        self.started && !self.stopped
    }

    fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
