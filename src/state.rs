use serde::Serialize;

/// Play/pause affordance reported to the presentation layer.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayState {
    Playing,    // Auto-advance timer is live
    Stopped,    // Suspended by hover, visibility or viewport
    UserPaused, // Explicitly paused; only a user toggle resumes
}
