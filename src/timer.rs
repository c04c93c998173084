use tracing::debug;

/// Cancelable repeating trigger driven by the frame clock.
///
/// The owner polls [`TimerLoop::update`] every frame and performs its
/// periodic action when it returns `true`. A stopped loop never reports a
/// firing, so nothing scheduled before a `stop` can act after it.
#[derive(Debug, Clone, Default)]
pub struct TimerLoop {
    interval: f32,
    elapsed: f32,
    running: bool,
}

impl TimerLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any live schedule and starts a fresh one with a full period
    /// before the first firing. A non-positive interval leaves the loop
    /// stopped.
    pub fn start(&mut self, interval: f32) {
        self.stop();
        if interval <= 0.0 {
            debug!(interval, "refusing to start timer with non-positive interval");
            return;
        }
        self.interval = interval;
        self.running = true;
    }

    /// Safe to call when already stopped.
    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Advances the loop. Returns `true` when a period completed during this
    /// tick. At most one firing is reported per tick; a long stall does not
    /// queue a burst of catch-up firings.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.interval {
            self.elapsed = (self.elapsed - self.interval).min(self.interval);
            if self.elapsed >= self.interval {
                self.elapsed = 0.0;
            }
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_period() {
        let mut timer = TimerLoop::new();
        timer.start(1.0);
        assert!(!timer.update(0.5));
        assert!(timer.update(0.5));
        assert!(!timer.update(0.5));
        assert!(timer.update(0.5));
    }

    #[test]
    fn stop_is_idempotent_and_silences_firings() {
        let mut timer = TimerLoop::new();
        timer.stop();
        timer.start(1.0);
        timer.update(0.75);
        timer.stop();
        timer.stop();
        assert!(!timer.is_running());
        assert!(!timer.update(5.0));
    }

    #[test]
    fn restart_resets_the_phase() {
        let mut timer = TimerLoop::new();
        timer.start(1.0);
        timer.update(0.75);
        timer.start(1.0);
        assert!(!timer.update(0.5));
        assert!(timer.update(0.5));
    }

    #[test]
    fn long_stall_reports_a_single_firing() {
        let mut timer = TimerLoop::new();
        timer.start(1.0);
        assert!(timer.update(10.0));
        assert!(timer.update(1.0));
        assert!(!timer.update(0.25));
    }

    #[test]
    fn non_positive_interval_does_not_run() {
        let mut timer = TimerLoop::new();
        timer.start(0.0);
        assert!(!timer.is_running());
    }
}
