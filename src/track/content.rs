/// Index-keyed caption shown beside the active slide, swapped in two
/// stages: the old content stays up for a fade-out window, then the new
/// content is written.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentStage {
    displayed: usize,
    pending: Option<usize>,
    fade: f32,
    fade_timer: f32,
}

impl ContentStage {
    pub fn new(displayed: usize, fade: f32) -> Self {
        Self {
            displayed,
            pending: None,
            fade: fade.max(0.0),
            fade_timer: 0.0,
        }
    }

    /// Content currently on screen.
    pub fn displayed(&self) -> usize {
        self.displayed
    }

    pub fn is_fading_out(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedules `index` to replace the displayed content. A request made
    /// during a fade retargets it and restarts the window.
    pub fn request(&mut self, index: usize) {
        if self.fade <= 0.0 {
            self.displayed = index;
            self.pending = None;
            return;
        }
        self.pending = Some(index);
        self.fade_timer = 0.0;
    }

    /// Returns the newly displayed index on the tick that performs the swap.
    pub fn update(&mut self, dt: f32) -> Option<usize> {
        let target = self.pending?;
        self.fade_timer += dt;
        if self.fade_timer < self.fade {
            return None;
        }
        self.displayed = target;
        self.pending = None;
        self.fade_timer = 0.0;
        Some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn old_content_stays_until_fade_completes() {
        let mut stage = ContentStage::new(0, 0.5);
        stage.request(1);
        assert_eq!(stage.displayed(), 0);
        assert!(stage.is_fading_out());

        assert_eq!(stage.update(0.25), None);
        assert_eq!(stage.displayed(), 0);
        assert_eq!(stage.update(0.25), Some(1));
        assert_eq!(stage.displayed(), 1);
        assert!(!stage.is_fading_out());
    }

    #[test]
    fn retarget_restarts_the_window() {
        let mut stage = ContentStage::new(0, 0.5);
        stage.request(1);
        stage.update(0.25);
        stage.request(2);
        assert_eq!(stage.update(0.25), None);
        assert_eq!(stage.update(0.25), Some(2));
    }

    #[test]
    fn zero_fade_swaps_immediately() {
        let mut stage = ContentStage::new(0, 0.0);
        stage.request(3);
        assert_eq!(stage.displayed(), 3);
        assert_eq!(stage.update(1.0), None);
    }
}
