//! The rotating "stack" of cards: one focal card flanked by the others,
//! rotated one step at a time under an animation lock.

pub mod card;
pub mod permutation;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::StackConfig;
use crate::deck::card::Card;
use crate::deck::permutation::Permutation;
use crate::error::{CarouselError, Result};
use crate::lock::AnimationLock;
use crate::playback::Playback;
use crate::state::PlayState;
use crate::widget::{Key, Widget};

/// Read-only snapshot of a deck.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckStatus {
    pub name: String,
    pub order: Vec<usize>,
    pub focal: Option<usize>,
    pub is_animating: bool,
    pub play_state: PlayState,
    pub gate_open: bool,
    pub card_count: usize,
    pub dimmed: Vec<usize>,
}

pub struct RotatingDeck {
    name: String,
    order: Permutation,
    cards: Vec<Card>,
    lock: AnimationLock,
    playback: Playback,
    destroyed: bool,
}

impl RotatingDeck {
    pub fn new(name: impl Into<String>, config: &StackConfig) -> Result<Self> {
        let name = name.into();
        if config.card_count == 0 {
            warn!(widget = %name, "no cards found, deck disabled");
            return Err(CarouselError::MissingCollaborator {
                widget: name,
                part: "cards",
            });
        }

        // Auto-rotation starts on the first viewport entry, never on load.
        let playback = if config.card_count > 1 {
            Playback::new(config.interval, config.pause_on_hover, true)
        } else {
            Playback::disabled(config.interval)
        };

        let mut deck = Self {
            name,
            order: Permutation::identity(config.card_count),
            cards: (0..config.card_count).map(Card::new).collect(),
            lock: AnimationLock::new(config.transition),
            playback,
            destroyed: false,
        };
        deck.apply_slots();
        Ok(deck)
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn focal_identity(&self) -> Option<usize> {
        self.order.focal()
    }

    pub fn order(&self) -> &[usize] {
        self.order.as_slice()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn slot_of(&self, item: usize) -> Option<usize> {
        self.order.slot_of(item)
    }

    pub fn is_active(&self, item: usize) -> bool {
        self.focal_identity() == Some(item)
    }

    pub fn is_animating(&self) -> bool {
        self.lock.is_locked()
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    /// Settle time of one rotation, shared with the visual transition.
    pub fn transition(&self) -> f32 {
        self.lock.settle()
    }

    /// Fraction of the current rotation already settled, 0.0 when idle.
    pub fn transition_progress(&self) -> f32 {
        self.lock.progress()
    }

    pub fn play_state(&self) -> PlayState {
        self.playback.play_state()
    }

    /// Rotates the left neighbour into focus. Dropped while a rotation is
    /// still settling.
    pub fn advance(&mut self) -> bool {
        self.rotate(Permutation::advance)
    }

    /// Rotates the right neighbour into focus.
    pub fn retreat(&mut self) -> bool {
        self.rotate(Permutation::retreat)
    }

    fn rotate(&mut self, step: fn(&mut Permutation)) -> bool {
        if self.destroyed || self.cards.len() <= 1 {
            return false;
        }
        if self.lock.is_locked() {
            debug!(widget = %self.name, "rotation dropped, previous one still settling");
            return false;
        }

        let mut next = self.order.clone();
        step(&mut next);
        self.order = next;
        self.clear_dim();
        self.apply_slots();

        self.lock.try_acquire();
        for card in &mut self.cards {
            card.transitioning = true;
        }
        debug!(widget = %self.name, order = ?self.order.as_slice(), "deck rotated");
        true
    }

    fn apply_slots(&mut self) {
        for (slot, &item) in self.order.as_slice().iter().enumerate() {
            let side = self.order.side_of_slot(slot);
            let card = &mut self.cards[item];
            card.slot = slot;
            card.side = side;
        }
    }

    /// Pointer entered a card. Hovering the focal card dims every other
    /// card; hovering any other card changes nothing.
    pub fn hover_card(&mut self, item: usize) {
        if self.destroyed || !self.is_active(item) {
            return;
        }
        for card in &mut self.cards {
            card.dimmed = card.item != item;
        }
    }

    /// Pointer left a card.
    pub fn leave_card(&mut self) {
        if self.destroyed {
            return;
        }
        self.clear_dim();
    }

    fn clear_dim(&mut self) {
        for card in &mut self.cards {
            card.dimmed = false;
        }
    }

    pub fn status(&self) -> DeckStatus {
        DeckStatus {
            name: self.name.clone(),
            order: self.order.as_slice().to_vec(),
            focal: self.focal_identity(),
            is_animating: self.is_animating(),
            play_state: self.play_state(),
            gate_open: self.playback.may_run(),
            card_count: self.cards.len(),
            dimmed: self.cards.iter().filter(|c| c.dimmed).map(|c| c.item).collect(),
        }
    }
}

impl Widget for RotatingDeck {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, dt: f32) {
        if self.destroyed {
            return;
        }
        if self.lock.update(dt) {
            for card in &mut self.cards {
                card.transitioning = false;
            }
        }
        if self.playback.update(dt) {
            self.advance();
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
        if !self.destroyed {
            self.playback.set_in_viewport(intersecting);
        }
    }

    fn on_key(&mut self, key: Key) {
        match key {
            Key::ArrowLeft => {
                self.retreat();
            }
            Key::ArrowRight => {
                self.advance();
            }
            Key::Space => {}
        }
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.playback.shutdown();
        self.clear_dim();
        self.destroyed = true;
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}
