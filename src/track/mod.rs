//! Single-active-slide cyclic sliders: the banner and the image sliders.

pub mod content;
pub mod slide;

use serde::Serialize;
use tracing::{debug, warn};

use crate::assets::AssetLoader;
use crate::cyclic;
use crate::error::{CarouselError, Result};
use crate::playback::Playback;
use crate::state::PlayState;
use crate::track::content::ContentStage;
use crate::track::slide::{Slide, SlideContent};
use crate::widget::{Control, Key, Widget};

/// Behaviour switches distinguishing the banner from the image sliders.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackOptions {
    pub interval: f32,
    pub content_fade: f32,
    /// Seconds the outgoing image takes to fade under the incoming one.
    pub crossfade: f32,
    pub pause_on_hover: bool,
    pub viewport_gated: bool,
    pub indicators: bool,
    pub restart_on_navigate: bool,
    pub click_toggles: bool,
}

/// Read-only snapshot of a slider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackStatus {
    pub name: String,
    pub current_index: usize,
    pub slide_count: usize,
    pub indicator: Option<usize>,
    pub play_state: PlayState,
    pub gate_open: bool,
    pub displayed_content: Option<usize>,
    pub content_fading: bool,
    pub loaded: Vec<bool>,
}

pub struct SingleTrackSlider {
    name: String,
    slides: Vec<Slide>,
    current_index: usize,
    options: TrackOptions,
    content: Option<ContentStage>,
    playback: Playback,
    loader: Option<Box<dyn AssetLoader>>,
    pending_prefetch: Option<usize>,
    destroyed: bool,
}

impl SingleTrackSlider {
    /// Builds the slider and activates slide 0. With a `loader` the slider
    /// is lazy: assets load on demand and the next one is prefetched at
    /// idle; without one every slide counts as loaded up front.
    pub fn new(
        name: impl Into<String>,
        slides: Vec<Slide>,
        options: TrackOptions,
        loader: Option<Box<dyn AssetLoader>>,
    ) -> Result<Self> {
        let name = name.into();
        if slides.is_empty() {
            warn!(widget = %name, "no slides found, slider disabled");
            return Err(CarouselError::MissingCollaborator {
                widget: name,
                part: "slides",
            });
        }

        let content = slides
            .iter()
            .any(|s| s.content.is_some())
            .then(|| ContentStage::new(0, options.content_fade));
        let playback = if slides.len() > 1 {
            Playback::new(options.interval, options.pause_on_hover, options.viewport_gated)
        } else {
            Playback::disabled(options.interval)
        };

        let mut slider = Self {
            name,
            slides,
            current_index: 0,
            options,
            content,
            playback,
            loader,
            pending_prefetch: None,
            destroyed: false,
        };

        if slider.loader.is_none() {
            for slide in &mut slider.slides {
                slide.mark_loaded(None);
            }
        }
        slider.load(0, false);
        slider.slides[0].active = true;
        slider.queue_prefetch();
        slider.playback.sync();
        Ok(slider)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.slides.get(index).is_some_and(|s| s.active)
    }

    /// Active dot, mirroring the current index.
    pub fn indicator(&self) -> Option<usize> {
        self.options.indicators.then_some(self.current_index)
    }

    pub fn play_state(&self) -> PlayState {
        self.playback.play_state()
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn options(&self) -> &TrackOptions {
        &self.options
    }

    /// Caption on screen, which lags the current index during a fade-out.
    pub fn content(&self) -> Option<&SlideContent> {
        let stage = self.content.as_ref()?;
        self.slides.get(stage.displayed())?.content.as_ref()
    }

    pub fn is_content_fading(&self) -> bool {
        self.content.as_ref().is_some_and(ContentStage::is_fading_out)
    }

    /// Activates slide `index`. Out-of-range indices and single-slide
    /// sliders ignore the request.
    pub fn go_to(&mut self, index: usize) -> bool {
        if self.destroyed || self.slides.len() <= 1 {
            return false;
        }
        if index >= self.slides.len() {
            debug!(widget = %self.name, index, "ignoring out-of-range slide index");
            return false;
        }

        self.load(index, false);

        self.slides[self.current_index].active = false;
        self.current_index = index;
        self.slides[index].active = true;

        if let Some(stage) = self.content.as_mut() {
            stage.request(index);
        }
        self.queue_prefetch();
        debug!(widget = %self.name, index, "slide activated");
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to(cyclic::advance(self.current_index, self.slides.len()))
    }

    pub fn prev(&mut self) -> bool {
        self.go_to(cyclic::retreat(self.current_index, self.slides.len()))
    }

    /// Explicit user play/pause. Pausing is sticky across visibility,
    /// hover and viewport changes until toggled again.
    pub fn toggle_play(&mut self) {
        if self.destroyed {
            return;
        }
        let paused = self.playback.toggle_user_pause();
        debug!(widget = %self.name, paused, "user toggled playback");
    }

    /// User click on one of the slider's controls.
    pub fn click(&mut self, control: Control) {
        let moved = match control {
            Control::Prev => self.prev(),
            Control::Next => self.next(),
            Control::Indicator(index) => self.options.indicators && self.go_to(index),
            Control::Body => {
                if self.options.click_toggles {
                    self.toggle_play();
                }
                false
            }
        };
        if moved && self.options.restart_on_navigate {
            self.playback.restart_if_playing();
        }
    }

    fn queue_prefetch(&mut self) {
        if self.loader.is_some() && self.slides.len() > 1 {
            self.pending_prefetch = Some(cyclic::advance(self.current_index, self.slides.len()));
        }
    }

    // `quiet` loads are best-effort prefetches: failures never surface.
    fn load(&mut self, index: usize, quiet: bool) {
        let Some(loader) = self.loader.as_mut() else {
            return;
        };
        let slide = &mut self.slides[index];
        if slide.is_loaded() {
            return;
        }
        let Some(path) = slide.asset.clone() else {
            slide.mark_loaded(None);
            return;
        };

        match loader.load(&path) {
            Ok(asset) => slide.mark_loaded(Some(asset)),
            Err(e) => {
                if slide.mark_failed() && !quiet {
                    warn!(widget = %self.name, index, error = %e, "slide asset failed to load");
                } else {
                    debug!(widget = %self.name, index, error = %e, "slide asset still unavailable");
                }
            }
        }
    }

    pub fn status(&self) -> TrackStatus {
        TrackStatus {
            name: self.name.clone(),
            current_index: self.current_index,
            slide_count: self.slides.len(),
            indicator: self.indicator(),
            play_state: self.play_state(),
            gate_open: self.playback.may_run(),
            displayed_content: self.content.as_ref().map(ContentStage::displayed),
            content_fading: self.is_content_fading(),
            loaded: self.slides.iter().map(Slide::is_loaded).collect(),
        }
    }
}

impl Widget for SingleTrackSlider {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, dt: f32) {
        if self.destroyed {
            return;
        }
        if let Some(stage) = self.content.as_mut() {
            if let Some(index) = stage.update(dt) {
                debug!(widget = %self.name, index, "content swapped");
            }
        }
        if let Some(index) = self.pending_prefetch.take() {
            self.load(index, true);
        }
        if self.playback.update(dt) {
            self.next();
        }
    }

    fn on_visibility(&mut self, hidden: bool) {
        if !self.destroyed {
            self.playback.set_hidden(hidden);
        }
    }

    fn on_pointer(&mut self, inside: bool) {
        if !self.destroyed {
            self.playback.set_hovered(inside);
        }
    }

    fn on_intersection(&mut self, intersecting: bool) {
        if self.destroyed {
            return;
        }
        let was_running = self.playback.is_running();
        self.playback.set_in_viewport(intersecting);
        if !was_running && self.playback.is_running() {
            let next = cyclic::advance(self.current_index, self.slides.len());
            self.load(next, true);
        }
    }

    fn on_key(&mut self, key: Key) {
        match key {
            Key::ArrowLeft => {
                self.prev();
            }
            Key::ArrowRight => {
                self.next();
            }
            Key::Space => self.toggle_play(),
        }
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.playback.shutdown();
        self.pending_prefetch = None;
        self.destroyed = true;
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::assets::LoadedAsset;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<PathBuf>,
        failing: HashSet<PathBuf>,
    }

    struct MockLoader(Rc<RefCell<Recorder>>);

    impl AssetLoader for MockLoader {
        fn load(&mut self, path: &Path) -> Result<LoadedAsset> {
            let mut recorder = self.0.borrow_mut();
            recorder.calls.push(path.to_path_buf());
            if recorder.failing.contains(path) {
                return Err(CarouselError::Asset {
                    path: path.to_path_buf(),
                    reason: "offline".to_string(),
                });
            }
            Ok(LoadedAsset {
                path: path.to_path_buf(),
                byte_len: 1,
                orientation: 1,
            })
        }
    }

    fn banner_options() -> TrackOptions {
        TrackOptions {
            interval: 3.0,
            content_fade: 0.25,
            crossfade: 0.0,
            pause_on_hover: false,
            viewport_gated: false,
            indicators: true,
            restart_on_navigate: true,
            click_toggles: true,
        }
    }

    fn captioned(count: usize) -> Vec<Slide> {
        (0..count)
            .map(|i| {
                Slide::new(
                    Some(PathBuf::from(format!("b{i}.webp"))),
                    Some(SlideContent {
                        title: format!("title {i}"),
                        subtitle: format!("subtitle {i}"),
                        description: format!("description {i}"),
                    }),
                )
            })
            .collect()
    }

    fn banner(count: usize) -> SingleTrackSlider {
        SingleTrackSlider::new("banner", captioned(count), banner_options(), None).unwrap()
    }

    fn lazy_banner(count: usize) -> (SingleTrackSlider, Rc<RefCell<Recorder>>) {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let loader = MockLoader(Rc::clone(&recorder));
        let slider =
            SingleTrackSlider::new("banner", captioned(count), banner_options(), Some(Box::new(loader)))
                .unwrap();
        (slider, recorder)
    }

    #[test]
    fn three_steps_land_on_slide_three_with_its_caption() {
        let mut slider = banner(5);
        for _ in 0..3 {
            slider.next();
        }
        assert_eq!(slider.current_index(), 3);
        assert_eq!(slider.indicator(), Some(3));
        assert_eq!(slider.content().unwrap().title, "title 0");

        slider.update(0.3);
        assert_eq!(slider.content().unwrap().title, "title 3");
        assert!(!slider.is_content_fading());
    }

    #[test]
    fn exactly_one_slide_is_active() {
        let mut slider = banner(5);
        slider.prev();
        assert_eq!(slider.current_index(), 4);
        let active: Vec<_> = (0..5).filter(|&i| slider.is_active(i)).collect();
        assert_eq!(active, vec![4]);
    }

    #[test]
    fn out_of_range_go_to_is_ignored() {
        let mut slider = banner(5);
        slider.go_to(2);
        assert!(!slider.go_to(5));
        assert_eq!(slider.current_index(), 2);
    }

    #[test]
    fn user_pause_survives_visibility_round_trip() {
        let mut slider = banner(5);
        assert_eq!(slider.play_state(), PlayState::Playing);

        slider.toggle_play();
        slider.on_visibility(true);
        slider.on_visibility(false);
        assert_eq!(slider.play_state(), PlayState::UserPaused);
        slider.update(10.0);
        assert_eq!(slider.current_index(), 0);

        slider.toggle_play();
        slider.on_visibility(true);
        assert_eq!(slider.play_state(), PlayState::Stopped);
        slider.on_visibility(false);
        assert_eq!(slider.play_state(), PlayState::Playing);
    }

    #[test]
    fn timer_advances_the_slide() {
        let mut slider = banner(5);
        slider.update(1.5);
        slider.update(1.5);
        assert_eq!(slider.current_index(), 1);
    }

    #[test]
    fn manual_navigation_restarts_the_period() {
        let mut slider = banner(5);
        slider.update(2.5);
        slider.click(Control::Next);
        slider.update(1.0);
        assert_eq!(slider.current_index(), 1);
        slider.update(2.0);
        assert_eq!(slider.current_index(), 2);
    }

    #[test]
    fn body_click_and_space_toggle_play() {
        let mut slider = banner(3);
        slider.click(Control::Body);
        assert_eq!(slider.play_state(), PlayState::UserPaused);
        slider.on_key(Key::Space);
        assert_eq!(slider.play_state(), PlayState::Playing);
        slider.on_key(Key::ArrowLeft);
        assert_eq!(slider.current_index(), 2);
    }

    #[test]
    fn indicator_click_jumps() {
        let mut slider = banner(5);
        slider.click(Control::Indicator(4));
        assert_eq!(slider.current_index(), 4);
        slider.click(Control::Indicator(9));
        assert_eq!(slider.current_index(), 4);
    }

    #[test]
    fn lazy_slider_loads_first_and_prefetches_next_at_idle() {
        let (mut slider, recorder) = lazy_banner(5);
        assert_eq!(recorder.borrow().calls, vec![PathBuf::from("b0.webp")]);
        assert!(!slider.slides()[1].is_loaded());

        slider.update(0.01);
        assert!(slider.slides()[1].is_loaded());
        let asset = slider.slides()[1].loaded.as_ref().unwrap();
        assert_eq!(asset.path, PathBuf::from("b1.webp"));
        assert_eq!(asset.rotation_degrees(), 0.0);

        slider.go_to(3);
        assert!(slider.slides()[3].is_loaded());
        assert!(!slider.slides()[4].is_loaded());
        slider.update(0.01);
        assert!(slider.slides()[4].is_loaded());
    }

    #[test]
    fn failed_prefetch_never_blocks_activation() {
        let (mut slider, recorder) = lazy_banner(3);
        recorder.borrow_mut().failing.insert(PathBuf::from("b1.webp"));

        slider.update(0.01);
        assert!(!slider.slides()[1].is_loaded());
        assert!(slider.slides()[1].load_failed());

        assert!(slider.next());
        assert_eq!(slider.current_index(), 1);
        assert!(slider.is_active(1));

        recorder.borrow_mut().failing.clear();
        slider.go_to(2);
        slider.go_to(1);
        assert!(slider.slides()[1].is_loaded());
    }

    #[test]
    fn eager_slider_counts_everything_loaded() {
        let slider = banner(4);
        assert!(slider.status().loaded.iter().all(|&l| l));
    }

    #[test]
    fn single_slide_is_shown_and_frozen() {
        let mut slider = banner(1);
        assert!(slider.is_active(0));
        assert_eq!(slider.play_state(), PlayState::Stopped);
        assert!(!slider.next());
        slider.update(10.0);
        assert_eq!(slider.current_index(), 0);
    }

    #[test]
    fn no_slides_is_a_missing_collaborator() {
        assert!(matches!(
            SingleTrackSlider::new("banner", Vec::new(), banner_options(), None),
            Err(CarouselError::MissingCollaborator { part: "slides", .. })
        ));
    }

    #[test]
    fn destroy_freezes_pending_work() {
        let (mut slider, recorder) = lazy_banner(5);
        slider.next();
        slider.destroy();
        let frozen = slider.status();
        let calls = recorder.borrow().calls.len();

        slider.update(10.0);
        slider.on_visibility(false);
        slider.click(Control::Next);
        slider.toggle_play();
        assert_eq!(slider.status(), frozen);
        assert_eq!(recorder.borrow().calls.len(), calls);
    }

    #[test]
    fn viewport_gated_slider_preloads_on_entry() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let options = TrackOptions {
            pause_on_hover: true,
            viewport_gated: true,
            indicators: false,
            restart_on_navigate: false,
            click_toggles: false,
            ..banner_options()
        };
        let slides = (0..3)
            .map(|i| Slide::new(Some(PathBuf::from(format!("img{i}.jpg"))), None))
            .collect();
        let mut slider = SingleTrackSlider::new(
            "gallery",
            slides,
            options,
            Some(Box::new(MockLoader(Rc::clone(&recorder)))),
        )
        .unwrap();
        assert_eq!(slider.play_state(), PlayState::Stopped);
        assert!(slider.content().is_none());

        slider.on_intersection(true);
        assert_eq!(slider.play_state(), PlayState::Playing);
        assert!(slider.slides()[1].is_loaded());

        slider.on_pointer(true);
        assert_eq!(slider.play_state(), PlayState::Stopped);
        slider.on_pointer(false);
        slider.on_intersection(false);
        assert_eq!(slider.play_state(), PlayState::Stopped);
    }

    #[test]
    fn timer_runs_exactly_when_the_gate_allows() {
        let options = TrackOptions {
            pause_on_hover: true,
            viewport_gated: true,
            ..banner_options()
        };
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut slider =
                SingleTrackSlider::new("gallery", captioned(4), options.clone(), None).unwrap();
            for step in 0..2_000 {
                match rng.random_range(0..9) {
                    0 => slider.on_visibility(rng.random_bool(0.5)),
                    1 => slider.on_pointer(rng.random_bool(0.5)),
                    2 => slider.on_intersection(rng.random_bool(0.5)),
                    3 => slider.toggle_play(),
                    4 => slider.click(Control::Next),
                    5 => slider.click(Control::Indicator(rng.random_range(0..6))),
                    6 => slider.on_key(Key::ArrowLeft),
                    7 if step > 1_900 => slider.destroy(),
                    _ => slider.update(rng.random_range(0.0..2.0)),
                }
                let playback = slider.playback();
                assert_eq!(playback.is_running(), playback.may_run(), "seed {seed} step {step}");
                assert!(!playback.is_running() || playback.gate().may_run());
                assert_eq!(
                    slider.play_state() == PlayState::UserPaused,
                    playback.gate().user_paused
                );
                assert_eq!(slider.status().gate_open, playback.is_running());
            }
        }
    }
}
