//! State management module for phrase bingo.
//!
//! This module provides the core state types:
//!
//! - `error` - Session error type
//! - `config` - Tunables and TOML loading
//! - `phrases` - The validated phrase list
//! - `card` - Scorecards, the FREE cell and content fingerprints
//! - `pool` - Unassigned cards and the live-content index
//! - `draw` - Draw queue and called phrases
//! - `player` - Players and the player registry
//! - `claim` - Win patterns, ranking rules and winners
//! - `session` - The session state machine and its lock
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                     Session (one Mutex)                              │
//! │                                                                      │
//! │  ┌──────────────────────────────────────────────────────────────┐   │
//! │  │                      SessionState                             │   │
//! │  │                                                               │   │
//! │  │  ┌────────────────┐  ┌────────────────┐  ┌────────────────┐  │   │
//! │  │  │ PlayerRegistry │  │   CardPool     │  │   DrawQueue    │  │   │
//! │  │  │                │  │                │  │                │  │   │
//! │  │  │ player_id →    │  │ card_id →      │  │ phrases to be  │  │   │
//! │  │  │   Player       │  │   Scorecard    │  │   called       │  │   │
//! │  │  │   (+ card)     │  │                │  │                │  │   │
//! │  │  │                │  │ fingerprints   │  │ CalledSet      │  │   │
//! │  │  │                │  │ (pool+assigned)│  │ (draw order)   │  │   │
//! │  │  └────────────────┘  └────────────────┘  └────────────────┘  │   │
//! │  │                                                               │   │
//! │  │  winners ◀── ClaimEvaluator(card, called, winners)            │   │
//! │  │                                                               │   │
//! │  │  WaitingForHost ──▶ InProgress ──▶ Complete                   │   │
//! │  │        ▲─────────────── reset ─────────┘                      │   │
//! │  └──────────────────────────────────────────────────────────────┘   │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use bingo_state::state::{PhraseSource, Session, SessionConfig, ClaimType};
//!
//! let phrases = PhraseSource::from_file("keywords.txt")?;
//! let session = Session::new(phrases, SessionConfig::default());
//!
//! let player = session.register_player(None, "Alice");
//! let cards = session.preview_scorecards(6)?;
//! session.assign_scorecard(player.id(), cards[0].id())?;
//!
//! session.start();
//! session.draw_next()?;
//! let result = session.claim_win(player.id(), ClaimType::Row)?;
//! ```

pub mod card;
pub mod claim;
pub mod config;
pub mod draw;
pub mod error;
pub mod phrases;
pub mod player;
pub mod pool;
pub mod session;

// Re-export commonly used types
pub use card::{is_free, Grid, Scorecard, CENTER, FREE_SPACE, GRID_SIZE};
pub use claim::{ClaimEvaluation, ClaimEvaluator, ClaimType, UnknownClaimType, Verdict, Winner};
pub use config::{ConfigError, SessionConfig};
pub use draw::{CalledSet, DrawQueue};
pub use error::{Result, SessionError};
pub use phrases::{PhraseSource, PhraseSourceError, MIN_PHRASES};
pub use player::{DirectoryEntry, Player, PlayerId, PlayerRegistry};
pub use pool::CardPool;
pub use session::{Session, SessionState, SessionStatus, Snapshot};
