/// Reentrancy guard for a visual transition.
///
/// Taken when a transition starts and released by [`AnimationLock::update`]
/// once `settle` seconds have elapsed. The settle time must be the same value
/// the presentation layer uses for the visual transition.
#[derive(Debug, Clone)]
pub struct AnimationLock {
    settle: f32,
    animation_timer: f32,
    is_animating: bool,
}

impl AnimationLock {
    pub fn new(settle: f32) -> Self {
        Self {
            settle: settle.max(0.0),
            animation_timer: 0.0,
            is_animating: false,
        }
    }

    /// Takes the lock. Returns `false`, leaving the lock untouched, if a
    /// transition is already in flight.
    pub fn try_acquire(&mut self) -> bool {
        if self.is_animating {
            return false;
        }
        self.animation_timer = 0.0;
        self.is_animating = true;
        true
    }

    pub fn is_locked(&self) -> bool {
        self.is_animating
    }

    pub fn settle(&self) -> f32 {
        self.settle
    }

    /// Fraction of the settle window already elapsed, 0.0 when idle.
    pub fn progress(&self) -> f32 {
        if !self.is_animating || self.settle <= 0.0 {
            return 0.0;
        }
        (self.animation_timer / self.settle).min(1.0)
    }

    /// Advances the settle clock. Returns `true` on the tick that releases
    /// the lock.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.is_animating {
            return false;
        }
        self.animation_timer += dt;
        if self.animation_timer >= self.settle {
            self.animation_timer = 0.0;
            self.is_animating = false;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_is_refused_until_settled() {
        let mut lock = AnimationLock::new(0.5);
        assert!(lock.try_acquire());
        assert!(!lock.try_acquire());

        assert!(!lock.update(0.25));
        assert!(lock.is_locked());
        assert!(!lock.try_acquire());

        assert!(lock.update(0.25));
        assert!(!lock.is_locked());
        assert!(lock.try_acquire());
    }

    #[test]
    fn idle_lock_ignores_updates() {
        let mut lock = AnimationLock::new(0.5);
        assert!(!lock.update(10.0));
        assert_eq!(lock.progress(), 0.0);
    }

    #[test]
    fn progress_tracks_settle_window() {
        let mut lock = AnimationLock::new(1.0);
        lock.try_acquire();
        lock.update(0.25);
        assert_eq!(lock.progress(), 0.25);
    }
}
