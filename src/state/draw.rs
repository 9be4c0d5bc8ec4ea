//! Draw queue and called phrases.
//!
//! The queue is a full shuffle of the phrase source, fixed for the round and
//! consumed from the front. Drawn phrases land in the called set, which keeps
//! draw order for display.

use std::collections::{HashSet, VecDeque};

use rand::seq::SliceRandom;
use rand::Rng;

/// Phrases still to be called this round.
#[derive(Debug, Clone, Default)]
pub struct DrawQueue {
    queue: VecDeque<String>,
}

impl DrawQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue with a fresh shuffle of `phrases`.
    pub fn refill<R: Rng + ?Sized>(&mut self, rng: &mut R, phrases: &[String]) {
        let mut shuffled = phrases.to_vec();
        shuffled.shuffle(rng);
        self.queue = shuffled.into();
    }

    /// Pop the next phrase. Irreversible within a round.
    pub fn pop(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Phrases drawn so far, in draw order.
#[derive(Debug, Clone, Default)]
pub struct CalledSet {
    order: Vec<String>,
    index: HashSet<String>,
}

impl CalledSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a drawn phrase. Returns false if it was already called.
    pub fn insert(&mut self, phrase: String) -> bool {
        if !self.index.insert(phrase.clone()) {
            return false;
        }
        self.order.push(phrase);
        true
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.index.contains(phrase)
    }

    /// Called phrases in draw order.
    pub fn phrases(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.index.clear();
    }
}
