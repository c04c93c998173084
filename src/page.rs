//! Every widget of the page, assembled from a [`PageConfig`] and driven by
//! a single stream of [`Signal`]s.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::assets::{AssetLoader, load_sorted_image_paths};
use crate::config::{ImageSliderConfig, PageConfig};
use crate::deck::{DeckStatus, RotatingDeck};
use crate::paged::{PagedCarousel, PagedStatus};
use crate::track::slide::Slide;
use crate::track::{SingleTrackSlider, TrackOptions, TrackStatus};
use crate::widget::{Control, Key, Widget};

/// Addresses one widget of the page. Indices follow the configuration
/// order, whether or not that widget managed to mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetId {
    Banner,
    Stack,
    ImageSlider(usize),
    Paged(usize),
}

/// Inbound events from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    Click(WidgetId, Control),
    Key(WidgetId, Key),
    PointerEnter(WidgetId),
    PointerLeave(WidgetId),
    /// Pointer entered one card of the stack.
    CardEnter(usize),
    CardLeave,
    Visibility { hidden: bool },
    Intersection(WidgetId, bool),
    Resize { width: f32 },
}

/// Snapshot of the whole page for debugging and integration tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageStatus {
    pub banner: Option<TrackStatus>,
    pub stack: Option<DeckStatus>,
    pub image_sliders: Vec<Option<TrackStatus>>,
    pub paged: Vec<Option<PagedStatus>>,
    pub mounted: usize,
    pub destroyed: bool,
}

pub struct Page {
    banner: Option<SingleTrackSlider>,
    stack: Option<RotatingDeck>,
    image_sliders: Vec<Option<SingleTrackSlider>>,
    paged: Vec<Option<PagedCarousel>>,
    destroyed: bool,
}

impl Page {
    /// Mounts every configured widget. A widget that cannot mount is logged
    /// and left out; the others are unaffected. `loader` supplies an asset
    /// loader to each lazy slider.
    pub fn build<F>(config: &PageConfig, mut loader: F) -> Self
    where
        F: FnMut() -> Box<dyn AssetLoader>,
    {
        let banner = if config.banner.enabled {
            let banner = &config.banner;
            let slides = banner
                .slides_or_default()
                .into_iter()
                .map(|s| Slide::new(s.background, Some(s.content)))
                .collect();
            let options = TrackOptions {
                interval: banner.interval,
                content_fade: banner.content_fade,
                crossfade: 0.0,
                pause_on_hover: banner.pause_on_hover,
                viewport_gated: false,
                indicators: true,
                restart_on_navigate: true,
                click_toggles: true,
            };
            let loader = banner.lazy.then(&mut loader);
            SingleTrackSlider::new("banner", slides, options, loader).ok()
        } else {
            None
        };

        let stack = if config.stack.enabled {
            RotatingDeck::new("stack", &config.stack).ok()
        } else {
            None
        };

        let image_sliders = config
            .image_sliders
            .iter()
            .map(|slider| {
                let slides = collect_images(slider)
                    .into_iter()
                    .map(|path| Slide::new(Some(path), None))
                    .collect();
                let options = TrackOptions {
                    interval: slider.effective_interval(),
                    content_fade: 0.0,
                    crossfade: slider.fade.max(0.0),
                    pause_on_hover: slider.pause_on_hover,
                    viewport_gated: true,
                    indicators: false,
                    restart_on_navigate: false,
                    click_toggles: false,
                };
                let loader = slider.lazy.then(&mut loader);
                SingleTrackSlider::new(slider.name.clone(), slides, options, loader).ok()
            })
            .collect();

        let paged = config
            .paged
            .iter()
            .map(|paged| PagedCarousel::new(paged).ok())
            .collect();

        let page = Self {
            banner,
            stack,
            image_sliders,
            paged,
            destroyed: false,
        };
        info!(
            mounted = page.mounted(),
            configured = page.configured(),
            "page initialized"
        );
        page
    }

    pub fn banner(&self) -> Option<&SingleTrackSlider> {
        self.banner.as_ref()
    }

    pub fn stack(&self) -> Option<&RotatingDeck> {
        self.stack.as_ref()
    }

    pub fn image_slider(&self, index: usize) -> Option<&SingleTrackSlider> {
        self.image_sliders.get(index)?.as_ref()
    }

    pub fn paged(&self, index: usize) -> Option<&PagedCarousel> {
        self.paged.get(index)?.as_ref()
    }

    pub fn image_slider_count(&self) -> usize {
        self.image_sliders.len()
    }

    pub fn paged_count(&self) -> usize {
        self.paged.len()
    }

    /// Ids of every configured widget, mounted or not.
    pub fn widget_ids(&self) -> Vec<WidgetId> {
        let mut ids = vec![WidgetId::Banner, WidgetId::Stack];
        ids.extend((0..self.image_sliders.len()).map(WidgetId::ImageSlider));
        ids.extend((0..self.paged.len()).map(WidgetId::Paged));
        ids
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn configured(&self) -> usize {
        2 + self.image_sliders.len() + self.paged.len()
    }

    fn mounted(&self) -> usize {
        self.widgets().count()
    }

    fn widgets(&self) -> impl Iterator<Item = &dyn Widget> {
        let banner = self.banner.iter().map(|w| w as &dyn Widget);
        let stack = self.stack.iter().map(|w| w as &dyn Widget);
        let sliders = self.image_sliders.iter().flatten().map(|w| w as &dyn Widget);
        let paged = self.paged.iter().flatten().map(|w| w as &dyn Widget);
        banner.chain(stack).chain(sliders).chain(paged)
    }

    fn widgets_mut(&mut self) -> impl Iterator<Item = &mut dyn Widget> {
        let banner = self.banner.iter_mut().map(|w| w as &mut dyn Widget);
        let stack = self.stack.iter_mut().map(|w| w as &mut dyn Widget);
        let sliders = self
            .image_sliders
            .iter_mut()
            .flatten()
            .map(|w| w as &mut dyn Widget);
        let paged = self.paged.iter_mut().flatten().map(|w| w as &mut dyn Widget);
        banner.chain(stack).chain(sliders).chain(paged)
    }

    fn widget_mut(&mut self, id: WidgetId) -> Option<&mut dyn Widget> {
        match id {
            WidgetId::Banner => self.banner.as_mut().map(|w| w as &mut dyn Widget),
            WidgetId::Stack => self.stack.as_mut().map(|w| w as &mut dyn Widget),
            WidgetId::ImageSlider(i) => self
                .image_sliders
                .get_mut(i)?
                .as_mut()
                .map(|w| w as &mut dyn Widget),
            WidgetId::Paged(i) => self.paged.get_mut(i)?.as_mut().map(|w| w as &mut dyn Widget),
        }
    }

    /// Routes one signal. Signals aimed at a widget that is not mounted are
    /// dropped.
    pub fn handle(&mut self, signal: Signal) {
        if self.destroyed {
            return;
        }
        match signal {
            Signal::Click(id, control) => self.click(id, control),
            Signal::Key(id, key) => {
                if let Some(widget) = self.widget_mut(id) {
                    widget.on_key(key);
                }
            }
            Signal::PointerEnter(id) => {
                if let Some(widget) = self.widget_mut(id) {
                    widget.on_pointer(true);
                }
            }
            Signal::PointerLeave(id) => {
                if let Some(widget) = self.widget_mut(id) {
                    widget.on_pointer(false);
                }
            }
            Signal::CardEnter(item) => {
                if let Some(stack) = self.stack.as_mut() {
                    stack.hover_card(item);
                }
            }
            Signal::CardLeave => {
                if let Some(stack) = self.stack.as_mut() {
                    stack.leave_card();
                }
            }
            Signal::Visibility { hidden } => {
                debug!(hidden, "document visibility changed");
                for widget in self.widgets_mut() {
                    widget.on_visibility(hidden);
                }
            }
            Signal::Intersection(id, intersecting) => {
                if let Some(widget) = self.widget_mut(id) {
                    widget.on_intersection(intersecting);
                }
            }
            Signal::Resize { width } => {
                for widget in self.widgets_mut() {
                    widget.on_resize(width);
                }
            }
        }
    }

    fn click(&mut self, id: WidgetId, control: Control) {
        match id {
            WidgetId::Banner => {
                if let Some(banner) = self.banner.as_mut() {
                    banner.click(control);
                }
            }
            WidgetId::Stack => {
                if let Some(stack) = self.stack.as_mut() {
                    match control {
                        Control::Prev => {
                            stack.retreat();
                        }
                        Control::Next => {
                            stack.advance();
                        }
                        Control::Indicator(_) | Control::Body => {}
                    }
                }
            }
            WidgetId::ImageSlider(i) => {
                if let Some(Some(slider)) = self.image_sliders.get_mut(i) {
                    slider.click(control);
                }
            }
            WidgetId::Paged(i) => {
                if let Some(Some(paged)) = self.paged.get_mut(i) {
                    paged.click(control);
                }
            }
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.destroyed {
            return;
        }
        for widget in self.widgets_mut() {
            widget.update(dt);
        }
    }

    /// Tears every widget down. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        for widget in self.widgets_mut() {
            widget.destroy();
        }
        self.destroyed = true;
        info!("page destroyed");
    }

    pub fn status(&self) -> PageStatus {
        PageStatus {
            banner: self.banner.as_ref().map(SingleTrackSlider::status),
            stack: self.stack.as_ref().map(RotatingDeck::status),
            image_sliders: self
                .image_sliders
                .iter()
                .map(|s| s.as_ref().map(SingleTrackSlider::status))
                .collect(),
            paged: self
                .paged
                .iter()
                .map(|p| p.as_ref().map(PagedCarousel::status))
                .collect(),
            mounted: self.mounted(),
            destroyed: self.destroyed,
        }
    }
}

fn collect_images(config: &ImageSliderConfig) -> Vec<std::path::PathBuf> {
    let mut images = config.images.clone();
    if let Some(dir) = &config.image_dir {
        match load_sorted_image_paths(dir) {
            Ok(found) => images.extend(found),
            Err(e) => warn!(widget = %config.name, error = %e, "image directory unavailable"),
        }
    }
    images
}
