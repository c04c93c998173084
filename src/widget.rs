/// Keys a focused widget reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
}

/// Common signal surface of every widget on the page.
///
/// Handlers a widget has no use for default to no-ops. After
/// [`Widget::destroy`] every method must leave state untouched.
pub trait Widget {
    fn name(&self) -> &str;

    /// Advances timers and pending transitions by `dt` seconds.
    fn update(&mut self, dt: f32);

    /// Document visibility broadcast (`hidden == true` when backgrounded).
    fn on_visibility(&mut self, _hidden: bool) {}

    /// Pointer entered (`true`) or left (`false`) the widget container.
    fn on_pointer(&mut self, _inside: bool) {}

    /// The widget container entered or left the viewport.
    fn on_intersection(&mut self, _intersecting: bool) {}

    fn on_key(&mut self, _key: Key) {}

    /// Viewport width changed (pixels).
    fn on_resize(&mut self, _width: f32) {}

    /// Cancels timers and freezes all state.
    fn destroy(&mut self);

    fn is_destroyed(&self) -> bool;
}

/// Clickable parts of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Prev,
    Next,
    Indicator(usize),
    /// The widget body outside arrows and indicators.
    Body,
}
