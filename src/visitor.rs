//! Scripted stand-in for a person browsing the page, used by the headless
//! runner and the randomized tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::STACK_CARD_COUNT;
use crate::page::{Signal, WidgetId};
use crate::widget::{Control, Key};

pub struct Visitor {
    rng: StdRng,
    ids: Vec<WidgetId>,
    hovered: Option<WidgetId>,
    hidden: bool,
    activity: f64,
}

impl Visitor {
    /// `activity` is the chance of producing a signal on any given frame.
    pub fn new(seed: u64, ids: Vec<WidgetId>, activity: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ids,
            hovered: None,
            hidden: false,
            activity: activity.clamp(0.0, 1.0),
        }
    }

    fn pick_widget(&mut self) -> Option<WidgetId> {
        if self.ids.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..self.ids.len());
        Some(self.ids[index])
    }

    /// Signal for this frame, if the visitor does anything.
    pub fn next_signal(&mut self) -> Option<Signal> {
        if !self.rng.random_bool(self.activity) {
            return None;
        }
        let signal = match self.rng.random_range(0..9) {
            0 => {
                let id = self.pick_widget()?;
                let control = match self.rng.random_range(0..4) {
                    0 => Control::Prev,
                    1 => Control::Next,
                    2 => Control::Indicator(self.rng.random_range(0..8)),
                    _ => Control::Body,
                };
                Signal::Click(id, control)
            }
            1 => {
                let id = self.pick_widget()?;
                let key = match self.rng.random_range(0..3) {
                    0 => Key::ArrowLeft,
                    1 => Key::ArrowRight,
                    _ => Key::Space,
                };
                Signal::Key(id, key)
            }
            2 | 3 => match self.hovered.take() {
                Some(id) => Signal::PointerLeave(id),
                None => {
                    let id = self.pick_widget()?;
                    self.hovered = Some(id);
                    Signal::PointerEnter(id)
                }
            },
            4 => Signal::CardEnter(self.rng.random_range(0..STACK_CARD_COUNT)),
            5 => Signal::CardLeave,
            6 => {
                self.hidden = !self.hidden;
                Signal::Visibility { hidden: self.hidden }
            }
            7 => {
                let id = self.pick_widget()?;
                Signal::Intersection(id, self.rng.random_bool(0.5))
            }
            _ => Signal::Resize {
                width: self.rng.random_range(320.0..1920.0),
            },
        };
        Some(signal)
    }
}
