use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }
}

/// Elapsed time shown as `MM:SS` on the control strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameClock {
    pub minutes: u64,
    pub seconds: u64,
}

impl GameClock {
    pub fn from_secs(total: u64) -> Self {
        Self {
            minutes: total / 60,
            seconds: total % 60,
        }
    }
}

impl std::fmt::Display for GameClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes % 100, self.seconds)
    }
}

/// Wall-clock timer that excludes paused intervals.
#[derive(Debug, Clone)]
pub struct Timer<C: Clock = SystemClock> {
    clock: C,
    start: Instant,
    paused_total: Duration,
    paused_at: Option<Instant>,
}

impl<C: Clock> Timer<C> {
    pub fn start(clock: C) -> Self {
        let start = clock.now();
        Self {
            clock,
            start,
            paused_total: Duration::ZERO,
            paused_at: None,
        }
    }

    /// Starts counting from zero again, unpaused.
    pub fn restart(&mut self) {
        self.start = self.clock.now();
        self.paused_total = Duration::ZERO;
        self.paused_at = None;
    }

    /// Returns false if the timer was already paused.
    pub fn pause(&mut self) -> bool {
        if self.paused_at.is_some() {
            return false;
        }
        self.paused_at = Some(self.clock.now());
        true
    }

    /// Returns false if the timer was not paused.
    pub fn resume(&mut self) -> bool {
        let Some(paused_at) = self.paused_at.take() else {
            return false;
        };
        self.paused_total += self.clock.now().saturating_duration_since(paused_at);
        true
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Running time minus all paused time. Frozen while paused.
    pub fn elapsed(&self) -> Duration {
        let until = self.paused_at.unwrap_or_else(|| self.clock.now());
        until
            .saturating_duration_since(self.start)
            .saturating_sub(self.paused_total)
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed().as_secs()
    }

    pub fn game_clock(&self) -> GameClock {
        GameClock::from_secs(self.elapsed_secs())
    }
}
