//! Session state machine.
//!
//! # State Diagram
//!
//! ```text
//! ┌────────────────┐  start   ┌────────────┐  queue empty /  ┌──────────┐
//! │ WaitingForHost │─────────▶│ InProgress │────────────────▶│ Complete │
//! └────────────────┘          └────────────┘   final claim   └──────────┘
//!         ▲                                                       │
//!         │                  reset (from any state)               │
//!         └───────────────────────────────────────────────────────┘
//!
//! start from Complete begins a new round.
//! ```
//!
//! [`SessionState`] holds every map and index and is the only thing that mutates
//! them. [`Session`] puts the whole state behind one lock so each operation is
//! atomic with respect to every other: pool membership, the fingerprint index,
//! player cards, the called set and the winners list are always read and
//! updated together.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::card::Scorecard;
use super::claim::{ClaimEvaluation, ClaimEvaluator, ClaimType, Verdict, Winner};
use super::config::SessionConfig;
use super::draw::{CalledSet, DrawQueue};
use super::error::{Result, SessionError};
use super::phrases::PhraseSource;
use super::player::{DirectoryEntry, Player, PlayerId, PlayerRegistry};
use super::pool::CardPool;

/// Session lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// Players pick cards, nothing drawn yet
    #[default]
    WaitingForHost,
    /// Host is drawing, claims are live
    InProgress,
    /// Queue exhausted or final full-card awarded
    Complete,
}

impl SessionStatus {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WaitingForHost => "WAITING_FOR_HOST",
            Self::InProgress => "IN_PROGRESS",
            Self::Complete => "COMPLETE",
        }
    }

    /// Check if draws are permitted.
    pub fn is_started(&self) -> bool {
        !matches!(self, Self::WaitingForHost)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable view of the session at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub status: SessionStatus,
    pub current_call: Option<String>,
    /// Called phrases in draw order
    pub called_phrases: Vec<String>,
    pub remaining_calls: usize,
    pub player_count: usize,
    pub winners: Vec<Winner>,
    pub started_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Value {
        let winners: Vec<serde_json::Value> = self.winners.iter().map(Winner::to_json).collect();
        serde_json::json!({
            "status": self.status.as_str(),
            "currentCall": self.current_call,
            "calledPhrases": self.called_phrases,
            "remainingCalls": self.remaining_calls,
            "playerCount": self.player_count,
            "winners": winners,
            "startedAt": self.started_at.map(|t| t.to_rfc3339())
        })
    }
}

/// All game data for one session. Not synchronized; see [`Session`].
#[derive(Debug)]
pub struct SessionState {
    config: SessionConfig,
    phrases: PhraseSource,
    rng: StdRng,

    status: SessionStatus,
    current_call: Option<String>,
    started_at: Option<DateTime<Utc>>,

    players: PlayerRegistry,
    pool: CardPool,
    queue: DrawQueue,
    called: CalledSet,
    winners: Vec<Winner>,
}

impl SessionState {
    /// Create a session waiting for the host, with a shuffled draw queue.
    pub fn new(phrases: PhraseSource, config: SessionConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut state = Self {
            config,
            phrases,
            rng,
            status: SessionStatus::WaitingForHost,
            current_call: None,
            started_at: None,
            players: PlayerRegistry::new(),
            pool: CardPool::new(),
            queue: DrawQueue::new(),
            called: CalledSet::new(),
            winners: Vec::new(),
        };
        state.reset(true);
        state
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Register a player, or return the existing one unchanged.
    ///
    /// `requested_id` lets the caller keep a client-minted identity; without it
    /// a fresh id is generated.
    pub fn register_player(&mut self, requested_id: Option<PlayerId>, requested_name: &str) -> Player {
        let id = requested_id.unwrap_or_else(|| self.fresh_id());
        let (player, created) = self.players.get_or_register(id, requested_name);
        if created {
            info!(player_id = %player.id(), display_name = player.display_name(), "Player registered");
        }
        player.clone()
    }

    pub fn get_player(&self, player_id: PlayerId) -> Result<Player> {
        self.players
            .get(player_id)
            .cloned()
            .ok_or(SessionError::PlayerNotFound(player_id))
    }

    /// Players sorted by display name.
    pub fn player_directory(&self) -> Vec<DirectoryEntry> {
        self.players.directory()
    }

    /// Random selection of pooled cards. A preview is not a reservation.
    ///
    /// Tops the pool up to `max(count, pool_target)` first. Two callers may be
    /// shown the same card; only the first to assign it gets it.
    pub fn preview_scorecards(&mut self, count: usize) -> Result<Vec<Scorecard>> {
        let count = count.max(1);
        let target = count.max(self.config.pool_target);
        self.pool.fill(
            &mut self.rng,
            self.phrases.phrases(),
            target,
            self.config.max_generation_attempts,
        )?;

        let cards = self.pool.sample(&mut self.rng, count);
        debug!(count = cards.len(), pool_size = self.pool.len(), "Previewed scorecards");
        Ok(cards)
    }

    /// Give a pooled card to a player, releasing the card they held before.
    ///
    /// Locked once the round is in progress and the player already has a card.
    pub fn assign_scorecard(&mut self, player_id: PlayerId, card_id: &str) -> Result<Player> {
        let player = self
            .players
            .get(player_id)
            .ok_or(SessionError::PlayerNotFound(player_id))?;

        if self.status == SessionStatus::InProgress && player.has_scorecard() {
            return Err(SessionError::state(
                "The round already started, scorecards are locked",
            ));
        }

        let card = self
            .pool
            .take(card_id)
            .ok_or_else(|| SessionError::argument("Scorecard already taken, please pick another"))?;

        let player = self
            .players
            .get_mut(player_id)
            .ok_or(SessionError::PlayerNotFound(player_id))?;
        if let Some(previous) = player.set_scorecard(Some(card)) {
            self.pool.release(&previous);
        }

        info!(%player_id, card_id, "Scorecard assigned");
        Ok(player.clone())
    }

    /// Begin a round. No-op while a round is already in progress.
    pub fn start(&mut self) -> Snapshot {
        if self.status == SessionStatus::InProgress {
            return self.snapshot();
        }

        if self.queue.is_empty() {
            self.queue.refill(&mut self.rng, self.phrases.phrases());
        }
        self.status = SessionStatus::InProgress;
        self.started_at = Some(Utc::now());
        self.current_call = None;
        self.called.clear();
        self.winners.clear();

        info!(remaining = self.queue.remaining(), "Round started");
        self.snapshot()
    }

    /// Back to waiting for the host with a fresh queue and an empty pool.
    ///
    /// With `drop_players` the registry is emptied; otherwise players stay
    /// registered without cards.
    pub fn reset(&mut self, drop_players: bool) -> Snapshot {
        self.status = SessionStatus::WaitingForHost;
        self.current_call = None;
        self.started_at = None;
        self.called.clear();
        self.winners.clear();
        self.pool.clear();
        self.queue.refill(&mut self.rng, self.phrases.phrases());

        if drop_players {
            self.players.clear();
        } else {
            self.players.clear_scorecards();
        }

        info!(drop_players, players = self.players.count(), "Session reset");
        self.snapshot()
    }

    /// Call the next phrase.
    pub fn draw_next(&mut self) -> Result<Snapshot> {
        if !self.status.is_started() {
            return Err(SessionError::state("Start the game before drawing"));
        }

        let Some(phrase) = self.queue.pop() else {
            self.complete();
            return Ok(self.snapshot());
        };

        debug!(phrase = %phrase, remaining = self.queue.remaining(), "Drew phrase");
        self.called.insert(phrase.clone());
        self.current_call = Some(phrase);

        if self.queue.is_empty() {
            self.complete();
        }
        Ok(self.snapshot())
    }

    /// Evaluate a win claim. Rejections are returned, not raised.
    pub fn claim_win(&mut self, player_id: PlayerId, claim: ClaimType) -> Result<ClaimEvaluation> {
        let player = self
            .players
            .get(player_id)
            .ok_or(SessionError::PlayerNotFound(player_id))?;

        let verdict = ClaimEvaluator::new(
            &self.called,
            &self.winners,
            self.config.max_full_card_winners,
        )
        .evaluate(player_id, player.scorecard(), claim);

        match verdict {
            Verdict::Reject(message) => {
                debug!(%player_id, %claim, reason = %message, "Claim rejected");
                Ok(ClaimEvaluation::rejected(message, &self.winners))
            }
            Verdict::Accept { completes_round } => {
                let winner = Winner::new(player_id, player.display_name().to_string(), claim);
                info!(%player_id, display_name = %winner.display_name, %claim, "Claim accepted");
                self.winners.push(winner);
                if completes_round {
                    self.complete();
                }
                Ok(ClaimEvaluation::accepted(&self.winners))
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status,
            current_call: self.current_call.clone(),
            called_phrases: self.called.phrases().to_vec(),
            remaining_calls: self.queue.remaining(),
            player_count: self.players.count(),
            winners: self.winners.clone(),
            started_at: self.started_at,
        }
    }

    /// Cards waiting in the pool.
    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    /// Check if any live card has this fingerprint.
    pub fn is_fingerprint_live(&self, fingerprint: &str) -> bool {
        self.pool.is_live(fingerprint)
    }

    /// Fingerprints of every live card, pooled then assigned. Repeats mean
    /// two live cards share content.
    pub fn live_fingerprints(&self) -> Vec<String> {
        let pooled = self.pool.cards().map(Scorecard::fingerprint);
        let assigned = self
            .players
            .players()
            .filter_map(|p| p.scorecard().map(Scorecard::fingerprint));
        pooled.chain(assigned).collect()
    }

    fn complete(&mut self) {
        if self.status != SessionStatus::Complete {
            info!(
                called = self.called.len(),
                winners = self.winners.len(),
                "Round complete"
            );
        }
        self.status = SessionStatus::Complete;
    }

    fn fresh_id(&mut self) -> PlayerId {
        let mut bytes = [0u8; 16];
        rand::Rng::fill(&mut self.rng, &mut bytes);
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }
}

/// Thread-safe handle to the single live session.
///
/// Every operation takes the one lock, runs to completion and returns an owned
/// value, so callers never observe a half-applied change. Share it with
/// `Arc<Session>`.
#[derive(Debug)]
pub struct Session {
    state: Mutex<SessionState>,
}

impl Session {
    /// Build and bootstrap a session.
    pub fn new(phrases: PhraseSource, config: SessionConfig) -> Self {
        Self {
            state: Mutex::new(SessionState::new(phrases, config)),
        }
    }

    pub fn register_player(&self, requested_id: Option<PlayerId>, requested_name: &str) -> Player {
        self.state.lock().register_player(requested_id, requested_name)
    }

    pub fn get_player(&self, player_id: PlayerId) -> Result<Player> {
        self.state.lock().get_player(player_id)
    }

    pub fn player_directory(&self) -> Vec<DirectoryEntry> {
        self.state.lock().player_directory()
    }

    pub fn preview_scorecards(&self, count: usize) -> Result<Vec<Scorecard>> {
        self.state.lock().preview_scorecards(count)
    }

    pub fn assign_scorecard(&self, player_id: PlayerId, card_id: &str) -> Result<Player> {
        self.state.lock().assign_scorecard(player_id, card_id)
    }

    pub fn start(&self) -> Snapshot {
        self.state.lock().start()
    }

    pub fn reset(&self, drop_players: bool) -> Snapshot {
        self.state.lock().reset(drop_players)
    }

    pub fn draw_next(&self) -> Result<Snapshot> {
        self.state.lock().draw_next()
    }

    pub fn claim_win(&self, player_id: PlayerId, claim: ClaimType) -> Result<ClaimEvaluation> {
        self.state.lock().claim_win(player_id, claim)
    }

    /// Current state for polling clients.
    pub fn snapshot(&self) -> Snapshot {
        self.state.lock().snapshot()
    }

    /// Run a read-only closure against the locked state.
    pub fn inspect<T>(&self, f: impl FnOnce(&SessionState) -> T) -> T {
        f(&*self.state.lock())
    }
}
