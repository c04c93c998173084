use crate::gate::RunGate;
use crate::state::PlayState;
use crate::timer::TimerLoop;

/// Auto-advance driver shared by every self-advancing widget: a
/// [`TimerLoop`] whose running state always equals its [`RunGate`] verdict.
///
/// Signal handlers only flip gate flags; [`Playback::sync`] is the single
/// place the timer is started or stopped.
#[derive(Debug, Clone)]
pub struct Playback {
    timer: TimerLoop,
    gate: RunGate,
    interval: f32,
    enabled: bool,
}

impl Playback {
    pub fn new(interval: f32, pause_on_hover: bool, viewport_gated: bool) -> Self {
        Self {
            timer: TimerLoop::new(),
            gate: RunGate::new(pause_on_hover, viewport_gated),
            interval,
            enabled: true,
        }
    }

    /// Playback that never runs, for widgets with nothing to cycle through.
    pub fn disabled(interval: f32) -> Self {
        let mut playback = Self::new(interval, false, false);
        playback.enabled = false;
        playback
    }

    pub fn gate(&self) -> &RunGate {
        &self.gate
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Whether the timer is allowed to run right now. After every call into
    /// this type it equals [`Playback::is_running`].
    pub fn may_run(&self) -> bool {
        self.enabled && self.gate.may_run()
    }

    pub fn is_user_paused(&self) -> bool {
        self.gate.user_paused
    }

    pub fn play_state(&self) -> PlayState {
        if self.gate.user_paused {
            PlayState::UserPaused
        } else if self.timer.is_running() {
            PlayState::Playing
        } else {
            PlayState::Stopped
        }
    }

    /// Starts or stops the timer to match the gate. A timer that is already
    /// running keeps its phase.
    pub fn sync(&mut self) {
        if self.enabled && self.gate.may_run() {
            if !self.timer.is_running() {
                self.timer.start(self.interval);
            }
        } else {
            self.timer.stop();
        }
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.gate.hidden = hidden;
        self.sync();
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.gate.hovered = hovered;
        self.sync();
    }

    pub fn set_in_viewport(&mut self, in_viewport: bool) {
        self.gate.in_viewport = in_viewport;
        self.sync();
    }

    /// Flips the user pause and returns the new value.
    pub fn toggle_user_pause(&mut self) -> bool {
        self.gate.user_paused = !self.gate.user_paused;
        self.sync();
        self.gate.user_paused
    }

    /// Restarts the period after a manual navigation so the next automatic
    /// step is a full interval away.
    pub fn restart_if_playing(&mut self) {
        if self.timer.is_running() && !self.gate.user_paused {
            self.timer.start(self.interval);
        }
    }

    pub fn update(&mut self, dt: f32) -> bool {
        self.timer.update(dt)
    }

    /// Cancels the timer for good.
    pub fn shutdown(&mut self) {
        self.enabled = false;
        self.timer.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_does_not_touch_user_pause() {
        let mut playback = Playback::new(1.0, false, false);
        playback.sync();
        assert_eq!(playback.play_state(), PlayState::Playing);

        playback.set_hidden(true);
        assert_eq!(playback.play_state(), PlayState::Stopped);
        assert!(!playback.is_user_paused());

        playback.set_hidden(false);
        assert_eq!(playback.play_state(), PlayState::Playing);
    }

    #[test]
    fn user_pause_survives_visibility_restore() {
        let mut playback = Playback::new(1.0, false, false);
        playback.sync();
        assert!(playback.toggle_user_pause());
        playback.set_hidden(true);
        playback.set_hidden(false);
        assert!(!playback.is_running());
        assert_eq!(playback.play_state(), PlayState::UserPaused);

        assert!(!playback.toggle_user_pause());
        assert!(playback.is_running());
    }

    #[test]
    fn hover_leave_resumes_only_when_nothing_else_vetoes() {
        let mut playback = Playback::new(1.0, true, false);
        playback.sync();
        playback.set_hidden(true);
        playback.set_hovered(true);
        playback.set_hovered(false);
        assert!(!playback.is_running());
        playback.set_hidden(false);
        assert!(playback.is_running());
    }

    #[test]
    fn disabled_playback_never_runs() {
        let mut playback = Playback::disabled(1.0);
        playback.sync();
        playback.set_in_viewport(true);
        assert!(!playback.is_running());
        assert!(!playback.update(5.0));
    }

    #[test]
    fn shutdown_closes_the_gate() {
        let mut playback = Playback::new(1.0, false, false);
        playback.sync();
        assert!(playback.may_run());
        playback.shutdown();
        assert!(!playback.may_run());
        playback.set_hidden(false);
        assert!(!playback.is_running());
    }

    #[test]
    fn restart_keeps_stopped_timers_stopped() {
        let mut playback = Playback::new(1.0, false, true);
        playback.restart_if_playing();
        assert!(!playback.is_running());
    }
}
