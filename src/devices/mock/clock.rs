//! Virtual clock mock

use crate::hal::Clock;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Clock whose `sleep` advances virtual time instantly
///
/// `now()` starts at construction time and moves forward only through
/// `sleep`, so tests of blocking maneuvers run in microseconds while still
/// observing exact delay sequences.
#[derive(Debug)]
pub struct MockClock {
    now: Mutex<Instant>,
    sleeps: Mutex<Vec<Duration>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    /// Every `sleep` duration requested, in order
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }

    /// Total virtual time spent sleeping
    pub fn total_slept(&self) -> Duration {
        self.sleeps.lock().unwrap().iter().sum()
    }

    /// Forget the recorded sleeps (virtual time keeps its position)
    pub fn clear_sleeps(&self) {
        self.sleeps.lock().unwrap().clear();
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap()
    }

    fn sleep(&self, duration: Duration) {
        *self.now.lock().unwrap() += duration;
        self.sleeps.lock().unwrap().push(duration);
    }
}
