//! Multi-item-per-page slider with clamped, non-wrapping bounds.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::PagedConfig;
use crate::error::{CarouselError, Result};
use crate::widget::{Control, Key, Widget};

/// Read-only snapshot of a paged carousel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagedStatus {
    pub name: String,
    pub current_index: usize,
    pub max_index: usize,
    pub item_count: usize,
    pub visible_count: usize,
    pub can_prev: bool,
    pub can_next: bool,
    pub offset: f32,
}

pub struct PagedCarousel {
    name: String,
    item_count: usize,
    items_to_show: usize,
    visible_count: usize,
    item_width: f32,
    item_gap: f32,
    animation: f32,
    current_index: usize,
    max_index: usize,
    degenerate: bool,
    destroyed: bool,
}

/// How many whole items fit into `width` pixels, between 1 and
/// `items_to_show`.
pub fn visible_count_for_width(width: f32, item_width: f32, item_gap: f32, items_to_show: usize) -> usize {
    let stride = item_width + item_gap;
    let fits = if stride > 0.0 && width > 0.0 {
        ((width + item_gap) / stride).floor() as usize
    } else {
        items_to_show
    };
    fits.clamp(1, items_to_show.max(1))
}

impl PagedCarousel {
    pub fn new(config: &PagedConfig) -> Result<Self> {
        if !config.has_track {
            warn!(widget = %config.name, "slider track not found, carousel disabled");
            return Err(CarouselError::MissingCollaborator {
                widget: config.name.clone(),
                part: "track",
            });
        }

        let visible_count = config.items_to_show.max(1);
        let degenerate = config.item_count <= visible_count;
        if degenerate {
            debug!(widget = %config.name, items = config.item_count, "everything fits, controls hidden");
        }

        Ok(Self {
            name: config.name.clone(),
            item_count: config.item_count,
            items_to_show: visible_count,
            visible_count,
            item_width: config.item_width,
            item_gap: config.item_gap,
            animation: config.animation.max(0.0),
            current_index: 0,
            max_index: config.item_count.saturating_sub(visible_count),
            degenerate,
            destroyed: false,
        })
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn max_index(&self) -> usize {
        self.max_index
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn item_width(&self) -> f32 {
        self.item_width
    }

    pub fn item_gap(&self) -> f32 {
        self.item_gap
    }

    /// Seconds the track takes to glide to a new offset.
    pub fn animation(&self) -> f32 {
        self.animation
    }

    /// Everything fit on one page at mount time; no control ever works.
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    pub fn controls_visible(&self) -> bool {
        !self.degenerate
    }

    pub fn can_prev(&self) -> bool {
        !self.degenerate && self.current_index > 0
    }

    pub fn can_next(&self) -> bool {
        !self.degenerate && self.current_index < self.max_index
    }

    /// Track translation in pixels (to the left).
    pub fn offset(&self) -> f32 {
        (self.item_width + self.item_gap) * self.current_index as f32
    }

    /// Whether item `index` is inside the visible page.
    pub fn is_visible(&self, index: usize) -> bool {
        index >= self.current_index && index < self.current_index + self.visible_count
    }

    pub fn next(&mut self) -> bool {
        if self.destroyed || !self.can_next() {
            return false;
        }
        self.current_index += 1;
        true
    }

    pub fn prev(&mut self) -> bool {
        if self.destroyed || !self.can_prev() {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// Moves to `index` clamped into `[0, max_index]`.
    pub fn go_to(&mut self, index: usize) -> bool {
        if self.destroyed || self.degenerate {
            return false;
        }
        let target = index.min(self.max_index);
        let moved = target != self.current_index;
        self.current_index = target;
        moved
    }

    pub fn click(&mut self, control: Control) {
        match control {
            Control::Prev => {
                self.prev();
            }
            Control::Next => {
                self.next();
            }
            Control::Indicator(index) => {
                self.go_to(index);
            }
            Control::Body => {}
        }
    }

    /// Recomputes the page bound for a new visible count and pulls the
    /// index back inside it.
    pub fn set_visible_count(&mut self, visible_count: usize) {
        if self.destroyed || self.degenerate {
            return;
        }
        self.visible_count = visible_count.max(1);
        self.max_index = self.item_count.saturating_sub(self.visible_count);
        self.current_index = self.current_index.min(self.max_index);
        debug!(
            widget = %self.name,
            visible = self.visible_count,
            max = self.max_index,
            "paged bounds recomputed"
        );
    }

    pub fn status(&self) -> PagedStatus {
        PagedStatus {
            name: self.name.clone(),
            current_index: self.current_index,
            max_index: self.max_index,
            item_count: self.item_count,
            visible_count: self.visible_count,
            can_prev: self.can_prev(),
            can_next: self.can_next(),
            offset: self.offset(),
        }
    }
}

impl Widget for PagedCarousel {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, _dt: f32) {}

    fn on_key(&mut self, key: Key) {
        match key {
            Key::ArrowLeft => {
                self.prev();
            }
            Key::ArrowRight => {
                self.next();
            }
            Key::Space => {}
        }
    }

    fn on_resize(&mut self, width: f32) {
        let visible = visible_count_for_width(width, self.item_width, self.item_gap, self.items_to_show);
        self.set_visible_count(visible);
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(item_count: usize, items_to_show: usize) -> PagedCarousel {
        PagedCarousel::new(&PagedConfig {
            name: "products".to_string(),
            item_count,
            items_to_show,
            ..PagedConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn next_clamps_at_the_last_page() {
        let mut carousel = carousel(10, 4);
        assert_eq!(carousel.max_index(), 6);
        for _ in 0..10 {
            carousel.next();
        }
        assert_eq!(carousel.current_index(), 6);
        assert!(!carousel.can_next());
        assert!(carousel.can_prev());
    }

    #[test]
    fn prev_at_start_is_ignored() {
        let mut carousel = carousel(10, 4);
        assert!(!carousel.can_prev());
        assert!(!carousel.prev());
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn too_few_items_disable_everything() {
        let mut carousel = carousel(3, 4);
        assert!(carousel.is_degenerate());
        assert!(!carousel.controls_visible());
        for _ in 0..3 {
            assert!(!carousel.next());
            assert!(!carousel.prev());
            assert!(!carousel.go_to(2));
        }
        carousel.on_resize(320.0);
        assert!(!carousel.next());
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn go_to_clamps_instead_of_rejecting() {
        let mut carousel = carousel(10, 4);
        carousel.go_to(42);
        assert_eq!(carousel.current_index(), 6);
        carousel.go_to(2);
        assert_eq!(carousel.current_index(), 2);
        assert_eq!(carousel.offset(), 2.0 * (313.0 + 23.0));
    }

    #[test]
    fn resize_reclamps_the_index() {
        let mut carousel = carousel(10, 4);
        carousel.on_resize(700.0);
        assert_eq!(carousel.visible_count(), 2);
        assert_eq!(carousel.max_index(), 8);
        carousel.go_to(8);

        carousel.on_resize(2000.0);
        assert_eq!(carousel.visible_count(), 4);
        assert_eq!(carousel.max_index(), 6);
        assert_eq!(carousel.current_index(), 6);
    }

    #[test]
    fn configured_geometry_drives_the_offset() {
        let mut carousel = PagedCarousel::new(&PagedConfig {
            item_count: 8,
            item_width: 200.0,
            item_gap: 10.0,
            animation: 0.3,
            ..PagedConfig::default()
        })
        .unwrap();
        assert_eq!(carousel.item_width(), 200.0);
        assert_eq!(carousel.item_gap(), 10.0);
        assert_eq!(carousel.animation(), 0.3);

        carousel.next();
        carousel.next();
        assert_eq!(carousel.offset(), 2.0 * (200.0 + 10.0));
        assert_eq!(carousel.status().offset, 420.0);
    }

    #[test]
    fn width_maps_to_whole_items() {
        assert_eq!(visible_count_for_width(1321.0, 313.0, 23.0, 4), 4);
        assert_eq!(visible_count_for_width(1320.0, 313.0, 23.0, 4), 3);
        assert_eq!(visible_count_for_width(100.0, 313.0, 23.0, 4), 1);
        assert_eq!(visible_count_for_width(5000.0, 313.0, 23.0, 4), 4);
    }

    #[test]
    fn visible_window_follows_index() {
        let mut carousel = carousel(10, 4);
        carousel.next();
        assert!(!carousel.is_visible(0));
        assert!(carousel.is_visible(4));
        assert!(!carousel.is_visible(5));
    }

    #[test]
    fn missing_track_is_reported() {
        let config = PagedConfig {
            has_track: false,
            ..PagedConfig::default()
        };
        assert!(PagedCarousel::new(&config).is_err());
    }

    #[test]
    fn destroyed_carousel_ignores_input() {
        let mut carousel = carousel(10, 4);
        carousel.destroy();
        carousel.click(Control::Next);
        carousel.on_key(Key::ArrowRight);
        assert_eq!(carousel.current_index(), 0);
    }
}
