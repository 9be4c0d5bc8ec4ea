//! Card pool.
//!
//! Holds generated cards that no player has picked yet, plus a fingerprint
//! index covering both pooled and assigned cards. No two live cards ever share
//! a fingerprint.

use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use super::card::Scorecard;
use super::error::{Result, SessionError};

/// Unassigned cards and the content index of every live card.
#[derive(Debug, Default)]
pub struct CardPool {
    /// Pooled cards by card id
    cards: HashMap<String, Scorecard>,

    /// Fingerprints of pooled cards
    pooled: HashSet<String>,

    /// Fingerprints of cards held by players
    assigned: HashSet<String>,
}

impl CardPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate cards until the pool holds at least `target`.
    ///
    /// Candidates whose content matches a live card are discarded. Fails after
    /// `max_attempts` consecutive discards, which only happens when the phrase
    /// source cannot produce enough distinct cards. Returns how many were added.
    pub fn fill<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        phrases: &[String],
        target: usize,
        max_attempts: usize,
    ) -> Result<usize> {
        let mut added = 0;
        let mut collisions = 0;

        while self.cards.len() < target {
            let candidate = Scorecard::generate(rng, phrases)?;
            let fingerprint = candidate.fingerprint();

            if self.is_live(&fingerprint) {
                collisions += 1;
                warn!(
                    card_id = candidate.id(),
                    collisions, "Discarded generated card with duplicate content"
                );
                if collisions >= max_attempts {
                    return Err(SessionError::argument(format!(
                        "Unable to generate a distinct scorecard after {} attempts",
                        collisions
                    )));
                }
                continue;
            }

            collisions = 0;
            self.pooled.insert(fingerprint);
            self.cards.insert(candidate.id().to_string(), candidate);
            added += 1;
        }

        if added > 0 {
            debug!(added, pool_size = self.cards.len(), "Refilled card pool");
        }
        Ok(added)
    }

    /// Pick `count` random pooled cards. Nothing is reserved.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<Scorecard> {
        let mut cards: Vec<&Scorecard> = self.cards.values().collect();
        cards.shuffle(rng);
        cards.into_iter().take(count).cloned().collect()
    }

    /// Remove a card from the pool and index it as assigned.
    pub fn take(&mut self, card_id: &str) -> Option<Scorecard> {
        let card = self.cards.remove(card_id)?;
        let fingerprint = card.fingerprint();
        self.pooled.remove(&fingerprint);
        self.assigned.insert(fingerprint);
        Some(card)
    }

    /// Forget an assigned card's content so it may be generated again.
    pub fn release(&mut self, card: &Scorecard) {
        self.assigned.remove(&card.fingerprint());
    }

    /// Drop every pooled card and the whole fingerprint index.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.pooled.clear();
        self.assigned.clear();
    }

    /// Check if any live card (pooled or assigned) has this content.
    pub fn is_live(&self, fingerprint: &str) -> bool {
        self.pooled.contains(fingerprint) || self.assigned.contains(fingerprint)
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.cards.contains_key(card_id)
    }

    /// Pooled cards in no particular order.
    pub fn cards(&self) -> impl Iterator<Item = &Scorecard> {
        self.cards.values()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Count of cards currently held by players.
    pub fn assigned_count(&self) -> usize {
        self.assigned.len()
    }
}
