use instant::Instant;

/// Monotonic seconds since construction.
///
/// The popup APIs all take plain `f64` timestamps so tests can fabricate
/// time; real consumers sample one of these once per tick.
pub struct Clock {
    origin: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
