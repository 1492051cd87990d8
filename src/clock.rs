use instant::{Duration, Instant};

/// Monotonic clock measuring time since the render loop started.
#[derive(Debug, Clone)]
pub struct Clock {
    start: Instant,
    last: Instant,
}

/// Time information handed to flows once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Time since the clock started.
    pub elapsed: Duration,
    /// Time since the previous frame.
    pub delta: Duration,
}

impl FrameTime {
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

impl Clock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }

    /// Sample the clock. Call once per frame.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let time = FrameTime {
            elapsed: now - self.start,
            delta: now - self.last,
        };
        self.last = now;
        time
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
