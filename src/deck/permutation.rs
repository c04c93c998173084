//! Item-to-slot assignment of the rotating deck.
//!
//! Slot 0 is the focal slot. Slots `1..=k` (with `k = count / 2`) fan out to
//! the right, innermost first; the remaining slots fan out to the left,
//! innermost first. Walking the slots left to right gives the visual ring,
//! and a rotation moves every item one step along it.

use serde::Serialize;

/// Where a slot sits relative to the focal slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Focal,
    Right(usize), // depth from the focal slot, 1 = adjacent
    Left(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    order: Vec<usize>,
    ring: Vec<usize>,
}

impl Permutation {
    /// Item `i` in slot `i`.
    pub fn identity(count: usize) -> Self {
        Self {
            order: (0..count).collect(),
            ring: ring_order(count),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Items by slot: `as_slice()[slot] == item`.
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    pub fn focal(&self) -> Option<usize> {
        self.order.first().copied()
    }

    pub fn slot_of(&self, item: usize) -> Option<usize> {
        self.order.iter().position(|&i| i == item)
    }

    pub fn side_of_slot(&self, slot: usize) -> Side {
        let right = self.len() / 2;
        match slot {
            0 => Side::Focal,
            s if s <= right => Side::Right(s),
            s => Side::Left(s - right),
        }
    }

    /// Every item moves one slot to the right; the outermost right item
    /// wraps around to the outermost left slot. For five slots this is
    /// `[o3, o0, o1, o4, o2]`.
    pub fn advance(&mut self) {
        if self.len() <= 1 {
            return;
        }
        let old = self.order.clone();
        let last = self.ring.len() - 1;
        for j in 0..last {
            self.order[self.ring[j + 1]] = old[self.ring[j]];
        }
        self.order[self.ring[0]] = old[self.ring[last]];
    }

    /// Inverse of [`Permutation::advance`].
    pub fn retreat(&mut self) {
        if self.len() <= 1 {
            return;
        }
        let old = self.order.clone();
        let last = self.ring.len() - 1;
        for j in 0..last {
            self.order[self.ring[j]] = old[self.ring[j + 1]];
        }
        self.order[self.ring[last]] = old[self.ring[0]];
    }

    pub fn is_bijection(&self) -> bool {
        let mut seen = vec![false; self.len()];
        for &item in &self.order {
            if item >= seen.len() || seen[item] {
                return false;
            }
            seen[item] = true;
        }
        true
    }
}

// Slots listed left to right: outer left .. inner left, focal, inner right .. outer right.
fn ring_order(count: usize) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }
    let right = count / 2;
    let mut ring: Vec<usize> = (right + 1..count).rev().collect();
    ring.push(0);
    ring.extend(1..=right);
    ring
}
