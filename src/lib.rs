//! Bingo State Library
//!
//! This crate provides session state management for a live phrase bingo game.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Session State Machine** - Waiting for host, in progress, complete, with
//!   reset back to waiting from anywhere.
//!
//! - **Card Pool** - Lazily generated 5x5 scorecards with a FREE center. No two
//!   live cards (pooled or held by a player) ever share content.
//!
//! - **Draw Queue** - A full shuffle of the phrase list per round, each phrase
//!   called at most once.
//!
//! - **Claim Evaluation** - Row, column, diagonal and full-card patterns, with
//!   duplicate, capacity and first/second/third ranking rules.
//!
//! # Design Principles
//!
//! 1. **One lock** - All state sits behind a single mutex; every operation is
//!    atomic with respect to every other.
//!
//! 2. **Rejections are values** - A failed claim is ordinary gameplay and comes
//!    back as a `ClaimEvaluation`, not an error.
//!
//! 3. **No networking** - This crate is pure state, no HTTP or persistence.
//!
//! 4. **Serialization-ready** - Client-facing types render to JSON.
//!
//! # Example
//!
//! ```rust
//! use bingo_state::{ClaimType, PhraseSource, Session, SessionConfig, SessionStatus};
//!
//! let phrases = PhraseSource::new((0..30).map(|i| format!("Phrase {}", i))).unwrap();
//! let session = Session::new(phrases, SessionConfig::default());
//!
//! // Join and pick a card
//! let alice = session.register_player(None, "Alice");
//! let cards = session.preview_scorecards(3).unwrap();
//! session.assign_scorecard(alice.id(), cards[0].id()).unwrap();
//!
//! // Host runs the round
//! session.start();
//! let snapshot = session.draw_next().unwrap();
//! assert_eq!(snapshot.called_phrases.len(), 1);
//!
//! // One phrase is not enough for a row
//! let result = session.claim_win(alice.id(), ClaimType::Row).unwrap();
//! assert!(!result.accepted);
//! assert_eq!(session.snapshot().status, SessionStatus::InProgress);
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
