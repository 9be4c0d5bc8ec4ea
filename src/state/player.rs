//! Players and the player registry.
//!
//! A player is created on first registration and keeps its display name for
//! the life of the session. The scorecard is the only thing that changes: set
//! by card selection, cleared by reset.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::card::Scorecard;

/// Opaque player identity.
pub type PlayerId = Uuid;

/// A registered player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    display_name: String,
    joined_at: DateTime<Utc>,
    scorecard: Option<Scorecard>,
}

impl Player {
    /// Create a player. A blank name becomes a `Player-XXXX` placeholder.
    pub fn new(id: PlayerId, requested_name: &str) -> Self {
        let trimmed = requested_name.trim();
        let display_name = if trimmed.is_empty() {
            placeholder_name(&id)
        } else {
            trimmed.to_string()
        };

        Self {
            id,
            display_name,
            joined_at: Utc::now(),
            scorecard: None,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    pub fn scorecard(&self) -> Option<&Scorecard> {
        self.scorecard.as_ref()
    }

    pub fn has_scorecard(&self) -> bool {
        self.scorecard.is_some()
    }

    /// Store a card, returning the one previously held.
    pub fn set_scorecard(&mut self, card: Option<Scorecard>) -> Option<Scorecard> {
        std::mem::replace(&mut self.scorecard, card)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "playerId": self.id,
            "displayName": self.display_name,
            "joinedAt": self.joined_at.to_rfc3339(),
            "scorecard": self.scorecard.as_ref().map(Scorecard::to_json)
        })
    }
}

fn placeholder_name(id: &PlayerId) -> String {
    let simple = id.simple().to_string();
    format!("Player-{}", simple[..4].to_uppercase())
}

/// Row of the player directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub player_id: PlayerId,
    pub display_name: String,
    pub has_scorecard: bool,
}

impl DirectoryEntry {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "playerId": self.player_id,
            "displayName": self.display_name,
            "hasScorecard": self.has_scorecard
        })
    }
}

/// Registered players indexed by id.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    players: HashMap<PlayerId, Player>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the player with this id, creating it if needed.
    ///
    /// Returns the player and whether it was newly created. An existing
    /// player is returned unchanged; `requested_name` only applies on creation.
    pub fn get_or_register(&mut self, id: PlayerId, requested_name: &str) -> (&Player, bool) {
        let mut created = false;
        let player = self.players.entry(id).or_insert_with(|| {
            created = true;
            Player::new(id, requested_name)
        });
        (player, created)
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Clear every player's card, keeping registrations.
    pub fn clear_scorecards(&mut self) {
        for player in self.players.values_mut() {
            player.set_scorecard(None);
        }
    }

    /// Remove all players.
    pub fn clear(&mut self) {
        self.players.clear();
    }

    pub fn count(&self) -> usize {
        self.players.len()
    }

    /// Directory listing sorted by display name, then id.
    pub fn directory(&self) -> Vec<DirectoryEntry> {
        let mut entries: Vec<DirectoryEntry> = self
            .players
            .values()
            .map(|p| DirectoryEntry {
                player_id: p.id,
                display_name: p.display_name.clone(),
                has_scorecard: p.has_scorecard(),
            })
            .collect();
        entries.sort_by(|a, b| {
            a.display_name
                .cmp(&b.display_name)
                .then(a.player_id.cmp(&b.player_id))
        });
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Grid, FREE_SPACE};

    fn make_card(id: &str) -> Scorecard {
        let rows: Grid = std::array::from_fn(|r| {
            std::array::from_fn(|c| {
                if r == 2 && c == 2 {
                    FREE_SPACE.to_string()
                } else {
                    format!("{}-{}{}", id, r, c)
                }
            })
        });
        Scorecard::new(id.to_string(), rows)
    }

    #[test]
    fn test_player_name_trimmed() {
        let player = Player::new(Uuid::new_v4(), "  Alice  ");
        assert_eq!(player.display_name(), "Alice");
        assert!(!player.has_scorecard());
    }

    #[test]
    fn test_blank_name_gets_placeholder() {
        let id = Uuid::parse_str("abcdef01-2345-6789-abcd-ef0123456789").unwrap();
        let player = Player::new(id, "   ");
        assert_eq!(player.display_name(), "Player-ABCD");
    }

    #[test]
    fn test_set_scorecard_returns_previous() {
        let mut player = Player::new(Uuid::new_v4(), "Bob");
        assert!(player.set_scorecard(Some(make_card("one"))).is_none());
        let previous = player.set_scorecard(Some(make_card("two")));
        assert_eq!(previous.map(|c| c.id().to_string()), Some("one".to_string()));
        assert_eq!(player.scorecard().map(Scorecard::id), Some("two"));
    }

    #[test]
    fn test_registry_idempotent() {
        let mut registry = PlayerRegistry::new();
        let id = Uuid::new_v4();

        let (player, created) = registry.get_or_register(id, "Carol");
        assert!(created);
        assert_eq!(player.display_name(), "Carol");

        let (player, created) = registry.get_or_register(id, "Someone Else");
        assert!(!created);
        assert_eq!(player.display_name(), "Carol");
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_clear_scorecards_keeps_players() {
        let mut registry = PlayerRegistry::new();
        let id = Uuid::new_v4();
        registry.get_or_register(id, "Dan");
        registry
            .get_mut(id)
            .unwrap()
            .set_scorecard(Some(make_card("c")));

        assert_eq!(registry.players().filter(|p| p.has_scorecard()).count(), 1);

        registry.clear_scorecards();
        assert_eq!(registry.count(), 1);
        assert!(registry.players().all(|p| !p.has_scorecard()));
        assert!(!registry.get(id).unwrap().has_scorecard());

        registry.clear();
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_directory_sorted() {
        let mut registry = PlayerRegistry::new();
        let zed = Uuid::new_v4();
        let amy = Uuid::new_v4();
        registry.get_or_register(zed, "Zed");
        registry.get_or_register(amy, "Amy");
        registry
            .get_mut(zed)
            .unwrap()
            .set_scorecard(Some(make_card("z")));

        let directory = registry.directory();
        assert_eq!(directory.len(), 2);
        assert_eq!(directory[0].display_name, "Amy");
        assert!(!directory[0].has_scorecard);
        assert_eq!(directory[1].player_id, zed);
        assert!(directory[1].has_scorecard);
    }

    #[test]
    fn test_to_json() {
        let mut player = Player::new(Uuid::new_v4(), "Eve");
        assert!(player.to_json()["scorecard"].is_null());

        player.set_scorecard(Some(make_card("e")));
        let json = player.to_json();
        assert_eq!(json["displayName"], "Eve");
        assert_eq!(json["scorecard"]["id"], "e");
        assert_eq!(json["playerId"], player.id().to_string());
        assert_eq!(json["joinedAt"], player.joined_at().to_rfc3339());
    }
}
