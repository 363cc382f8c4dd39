use std::time::{Duration, Instant};

/// Where a [`Timer`] takes its frame deltas from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockMode {
    /// Every tick advances by the same step; deterministic.
    Fixed(Duration),
    /// Ticks measure wall-clock time since the previous tick.
    Realtime,
}

/// Frame clock driving [`Book::update`](crate::book::Book::update).
///
/// ```rust,ignore
/// let mut timer = Timer::fixed(Duration::from_secs_f64(1.0 / 60.0));
/// loop {
///     book.update(timer.tick());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Timer {
    mode: ClockMode,
    last_tick: Instant,
    /// Delta produced by the last tick.
    pub delta: Duration,
    /// Sum of every delta so far.
    pub elapsed: Duration,
    pub frame_count: u64,
    /// Upper bound on a real-time delta; a stalled frame must not fling
    /// pages across the book or skip whole progression steps.
    pub max_delta: Duration,
}

impl Timer {
    #[must_use]
    pub fn fixed(step: Duration) -> Self {
        Self::with_mode(ClockMode::Fixed(step))
    }

    #[must_use]
    pub fn realtime() -> Self {
        Self::with_mode(ClockMode::Realtime)
    }

    fn with_mode(mode: ClockMode) -> Self {
        Self {
            mode,
            last_tick: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            max_delta: Duration::from_millis(100),
        }
    }

    /// Advances one frame and returns its delta.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        self.delta = match self.mode {
            ClockMode::Fixed(step) => step,
            ClockMode::Realtime => (now - self.last_tick).min(self.max_delta),
        };
        self.last_tick = now;
        self.elapsed += self.delta;
        self.frame_count += 1;
        self.delta
    }
}
