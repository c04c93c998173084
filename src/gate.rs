/// The "may this widget's timer run" decision, one flag per pause source.
///
/// Sources combine by logical AND, so each can be flipped independently
/// without knowing the others:
///
/// runs = !user_paused && !hidden && !(pause_on_hover && hovered)
///        && (in_viewport || !viewport_gated)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunGate {
    pub user_paused: bool,
    pub hidden: bool,
    pub hovered: bool,
    pub in_viewport: bool,
    pub pause_on_hover: bool,
    pub viewport_gated: bool,
}

impl RunGate {
    pub fn new(pause_on_hover: bool, viewport_gated: bool) -> Self {
        Self {
            user_paused: false,
            hidden: false,
            hovered: false,
            in_viewport: false,
            pause_on_hover,
            viewport_gated,
        }
    }

    pub fn may_run(&self) -> bool {
        !self.user_paused
            && !self.hidden
            && !(self.pause_on_hover && self.hovered)
            && (self.in_viewport || !self.viewport_gated)
    }
}
