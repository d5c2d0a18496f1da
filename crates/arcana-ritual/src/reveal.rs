//! Reveal coordination for the three-card spread.
//!
//! Each slot carries a one-shot reveal subscription. Revealing a slot takes
//! the subscription, so the slot can never be revealed again in this cycle;
//! leaving the reveal phase drops whatever subscriptions remain.

use arcana_core::{CardFace, CoreError, CoreResult, DrawnCard, SPREAD_SIZE, SpreadPosition};

use crate::error::{RitualError, RitualResult};

/// Proof that a slot may still be revealed. Consumed on use.
#[derive(Debug)]
struct RevealSubscription;

/// One position of the spread with its card.
#[derive(Debug)]
pub struct RevealSlot {
    position: SpreadPosition,
    card: DrawnCard,
    subscription: Option<RevealSubscription>,
    face: Option<CardFace>,
}

impl RevealSlot {
    /// The spread position.
    pub fn position(&self) -> SpreadPosition {
        self.position
    }

    /// The card in this slot.
    pub fn card(&self) -> &DrawnCard {
        &self.card
    }

    /// The revealed face, if any.
    pub fn face(&self) -> Option<&CardFace> {
        self.face.as_ref()
    }

    /// Whether the slot still accepts a reveal.
    pub fn is_armed(&self) -> bool {
        self.subscription.is_some()
    }
}

/// Binds a drawn batch to the spread slots and applies reveals.
#[derive(Debug, Default)]
pub struct RevealCoordinator {
    slots: Vec<RevealSlot>,
}

impl RevealCoordinator {
    /// Lay a freshly drawn batch into the spread, every slot armed.
    pub fn bind(cards: Vec<DrawnCard>) -> CoreResult<Self> {
        if cards.len() != SPREAD_SIZE {
            return Err(CoreError::DeckTooSmall {
                needed: SPREAD_SIZE,
                available: cards.len(),
            });
        }
        let slots = SpreadPosition::ALL
            .into_iter()
            .zip(cards)
            .map(|(position, card)| RevealSlot {
                position,
                card,
                subscription: Some(RevealSubscription),
                face: None,
            })
            .collect();
        Ok(Self { slots })
    }

    /// All slots in spread order.
    pub fn slots(&self) -> &[RevealSlot] {
        &self.slots
    }

    /// The drawn cards in spread order.
    pub fn cards(&self) -> impl Iterator<Item = &DrawnCard> {
        self.slots.iter().map(|s| &s.card)
    }

    /// Whether a spread is bound.
    pub fn is_bound(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Reveal a zero-based slot. A second reveal of the same slot is
    /// rejected and changes nothing.
    pub fn reveal(&mut self, index: usize) -> RitualResult<&RevealSlot> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(RitualError::InvalidSlot(index + 1))?;
        if slot.subscription.take().is_none() {
            return Err(if slot.card.is_revealed() {
                RitualError::AlreadyRevealed(index + 1)
            } else {
                RitualError::SlotClosed(index + 1)
            });
        }
        slot.card.reveal();
        slot.face = slot.card.face();
        Ok(slot)
    }

    /// Number of slots still face down.
    pub fn remaining(&self) -> usize {
        self.slots.iter().filter(|s| !s.card.is_revealed()).count()
    }

    /// Whether a full spread is bound and every card is face up.
    pub fn all_revealed(&self) -> bool {
        self.slots.len() == SPREAD_SIZE && self.remaining() == 0
    }

    /// Drop every remaining subscription.
    pub fn disarm(&mut self) {
        for slot in &mut self.slots {
            slot.subscription = None;
        }
    }
}
