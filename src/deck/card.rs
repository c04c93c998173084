use serde::Serialize;

use crate::deck::permutation::Side;

/// Presentation flags of one card in the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Card {
    pub item: usize,
    pub slot: usize,
    pub side: Side,
    pub dimmed: bool,
    pub transitioning: bool,
}

impl Card {
    pub fn new(item: usize) -> Self {
        Self {
            item,
            slot: item,
            side: Side::Focal,
            dimmed: false,
            transitioning: false,
        }
    }

    pub fn is_focal(&self) -> bool {
        self.slot == 0
    }
}
