use std::{thread::sleep, time::{Duration, Instant}};

/// Paces the game loop at a fixed frame rate.
pub struct ClockContext {
    last_tick: Instant,
}

impl ClockContext {
    pub fn new() -> Self {
        ClockContext { last_tick: Instant::now() }
    }

    /// Blocks until one frame interval has passed since the previous tick,
    /// then returns the time actually elapsed since that tick.
    pub fn tick(&mut self, fps: u32) -> Duration {
        let frame = Duration::from_secs(1) / fps.max(1);
        let deadline = self.last_tick + frame;

        let now = Instant::now();
        if deadline > now {
            sleep(deadline - now);
        }

        let now = Instant::now();
        let elapsed = now - self.last_tick;
        self.last_tick = now;
        elapsed
    }
}

impl Default for ClockContext {
    fn default() -> Self {
        Self::new()
    }
}
