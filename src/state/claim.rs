//! Win claims.
//!
//! A claim names a pattern. The evaluator checks the pattern against the
//! player's card and the called phrases, then applies the duplicate, capacity
//! and ranking rules against the winners recorded so far.
//!
//! Rules, in order:
//!
//! 1. No card: rejected.
//! 2. Pattern incomplete: rejected.
//! 3. Same player already holds a win of the same type: rejected.
//! 4. Generic full card: at most `max_full_card_winners` per round.
//! 5. Ranked full card: first, then second, then third, each once.
//!
//! Rejections are ordinary results, not errors.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::card::{is_free, Scorecard};
use super::draw::CalledSet;
use super::player::PlayerId;

/// Win patterns a player can claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimType {
    /// Any complete row
    Row,
    /// Any complete column
    Column,
    /// First column (index 0)
    #[serde(rename = "COLUMN_1")]
    Column1,
    #[serde(rename = "COLUMN_2")]
    Column2,
    #[serde(rename = "COLUMN_3")]
    Column3,
    /// Either full diagonal
    Diagonal,
    /// Every cell, up to the round's full-card capacity
    FullCard,
    FullCardFirst,
    FullCardSecond,
    FullCardThird,
}

impl ClaimType {
    pub const ALL: [ClaimType; 10] = [
        Self::Row,
        Self::Column,
        Self::Column1,
        Self::Column2,
        Self::Column3,
        Self::Diagonal,
        Self::FullCard,
        Self::FullCardFirst,
        Self::FullCardSecond,
        Self::FullCardThird,
    ];

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Row => "ROW",
            Self::Column => "COLUMN",
            Self::Column1 => "COLUMN_1",
            Self::Column2 => "COLUMN_2",
            Self::Column3 => "COLUMN_3",
            Self::Diagonal => "DIAGONAL",
            Self::FullCard => "FULL_CARD",
            Self::FullCardFirst => "FULL_CARD_FIRST",
            Self::FullCardSecond => "FULL_CARD_SECOND",
            Self::FullCardThird => "FULL_CARD_THIRD",
        }
    }

    /// Human-readable pattern name used in rejection messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Row => "row",
            Self::Column => "column",
            Self::Column1 => "first column",
            Self::Column2 => "second column",
            Self::Column3 => "third column",
            Self::Diagonal => "diagonal",
            Self::FullCard => "full card",
            Self::FullCardFirst => "full card (first winner)",
            Self::FullCardSecond => "full card (second winner)",
            Self::FullCardThird => "full card (third winner)",
        }
    }

    /// Check if this is one of the ordered full-card ranks.
    pub fn is_ranked_full_card(&self) -> bool {
        matches!(
            self,
            Self::FullCardFirst | Self::FullCardSecond | Self::FullCardThird
        )
    }

    /// Check whether the pattern is complete on `card`.
    pub fn matches(&self, card: &Scorecard, called: &CalledSet) -> bool {
        let marks = Marks { card, called };
        match self {
            Self::Row => marks.any_row(),
            Self::Column => marks.any_column(),
            Self::Column1 => marks.column(0),
            Self::Column2 => marks.column(1),
            Self::Column3 => marks.column(2),
            Self::Diagonal => marks.any_diagonal(),
            Self::FullCard | Self::FullCardFirst | Self::FullCardSecond | Self::FullCardThird => {
                marks.full_card()
            }
        }
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a claim type wire name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown claim type: {0}")]
pub struct UnknownClaimType(pub String);

impl FromStr for ClaimType {
    type Err = UnknownClaimType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownClaimType(s.to_string()))
    }
}

/// Marked-cell view of a card: FREE or already called.
struct Marks<'a> {
    card: &'a Scorecard,
    called: &'a CalledSet,
}

impl Marks<'_> {
    fn is_marked(&self, row: usize, col: usize) -> bool {
        self.card
            .value(row, col)
            .is_some_and(|v| is_free(v) || self.called.contains(v))
    }

    fn row(&self, row: usize) -> bool {
        (0..self.card.size()).all(|col| self.is_marked(row, col))
    }

    fn any_row(&self) -> bool {
        (0..self.card.size()).any(|row| self.row(row))
    }

    /// Out-of-range columns never match.
    fn column(&self, col: usize) -> bool {
        col < self.card.size() && (0..self.card.size()).all(|row| self.is_marked(row, col))
    }

    fn any_column(&self) -> bool {
        (0..self.card.size()).any(|col| self.column(col))
    }

    fn any_diagonal(&self) -> bool {
        let size = self.card.size();
        let down = (0..size).all(|i| self.is_marked(i, i));
        let up = (0..size).all(|i| self.is_marked(i, size - i - 1));
        down || up
    }

    fn full_card(&self) -> bool {
        self.card
            .cells()
            .all(|v| is_free(v) || self.called.contains(v))
    }
}

/// A recorded win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Winner {
    pub player_id: PlayerId,
    /// Display name at claim time
    pub display_name: String,
    pub claim_type: ClaimType,
    pub timestamp: DateTime<Utc>,
}

impl Winner {
    pub fn new(player_id: PlayerId, display_name: String, claim_type: ClaimType) -> Self {
        Self {
            player_id,
            display_name,
            claim_type,
            timestamp: Utc::now(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "playerId": self.player_id,
            "displayName": self.display_name,
            "claimType": self.claim_type.as_str(),
            "timestamp": self.timestamp.to_rfc3339()
        })
    }
}

/// Result of a claim, accepted or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimEvaluation {
    pub accepted: bool,
    pub message: String,
    /// Copy of the winners list after evaluation
    pub winners: Vec<Winner>,
}

impl ClaimEvaluation {
    pub fn accepted(winners: &[Winner]) -> Self {
        Self {
            accepted: true,
            message: "Claim accepted".to_string(),
            winners: winners.to_vec(),
        }
    }

    pub fn rejected(message: impl Into<String>, winners: &[Winner]) -> Self {
        Self {
            accepted: false,
            message: message.into(),
            winners: winners.to_vec(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let winners: Vec<serde_json::Value> = self.winners.iter().map(Winner::to_json).collect();
        serde_json::json!({
            "accepted": self.accepted,
            "message": self.message,
            "winners": winners
        })
    }
}

/// Verdict before anything is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Record the win. `completes_round` means the session should end.
    Accept { completes_round: bool },
    Reject(String),
}

/// Applies the claim rules against one round's called phrases and winners.
#[derive(Debug, Clone, Copy)]
pub struct ClaimEvaluator<'a> {
    called: &'a CalledSet,
    winners: &'a [Winner],
    max_full_card_winners: usize,
}

impl<'a> ClaimEvaluator<'a> {
    pub fn new(called: &'a CalledSet, winners: &'a [Winner], max_full_card_winners: usize) -> Self {
        Self {
            called,
            winners,
            max_full_card_winners,
        }
    }

    /// Decide a claim by `player_id` holding `card`.
    pub fn evaluate(
        &self,
        player_id: PlayerId,
        card: Option<&Scorecard>,
        claim: ClaimType,
    ) -> Verdict {
        let Some(card) = card else {
            return Verdict::Reject("Select a scorecard before claiming".to_string());
        };

        if !claim.matches(card, self.called) {
            return Verdict::Reject(format!(
                "Squares not complete for the {} pattern",
                claim.describe()
            ));
        }

        let duplicate = self
            .winners
            .iter()
            .any(|w| w.player_id == player_id && w.claim_type == claim);
        if duplicate {
            return Verdict::Reject("Claim already recorded".to_string());
        }

        match claim {
            ClaimType::FullCard => {
                let awarded = self.count(ClaimType::FullCard);
                if awarded >= self.max_full_card_winners {
                    return Verdict::Reject(format!(
                        "{} full-card winners already recorded",
                        capitalized_count(self.max_full_card_winners)
                    ));
                }
                Verdict::Accept {
                    completes_round: awarded + 1 >= self.max_full_card_winners,
                }
            }
            ClaimType::FullCardFirst | ClaimType::FullCardSecond | ClaimType::FullCardThird => {
                match self.rank_violation(claim) {
                    Some(reason) => Verdict::Reject(reason.to_string()),
                    None => Verdict::Accept {
                        completes_round: claim == ClaimType::FullCardThird,
                    },
                }
            }
            ClaimType::Row
            | ClaimType::Column
            | ClaimType::Column1
            | ClaimType::Column2
            | ClaimType::Column3
            | ClaimType::Diagonal => Verdict::Accept {
                completes_round: false,
            },
        }
    }

    fn count(&self, claim: ClaimType) -> usize {
        self.winners.iter().filter(|w| w.claim_type == claim).count()
    }

    fn recorded(&self, claim: ClaimType) -> bool {
        self.winners.iter().any(|w| w.claim_type == claim)
    }

    fn rank_violation(&self, claim: ClaimType) -> Option<&'static str> {
        let first = self.recorded(ClaimType::FullCardFirst);
        let second = self.recorded(ClaimType::FullCardSecond);
        let third = self.recorded(ClaimType::FullCardThird);

        match claim {
            ClaimType::FullCardFirst if first => Some("First full-card winner already recorded"),
            ClaimType::FullCardSecond if !first => {
                Some("Record the first full-card winner before the second")
            }
            ClaimType::FullCardSecond if second => Some("Second full-card winner already recorded"),
            ClaimType::FullCardThird if !first || !second => {
                Some("Record the first and second full-card winners before the third")
            }
            ClaimType::FullCardThird if third => Some("Third full-card winner already recorded"),
            _ => None,
        }
    }
}

fn capitalized_count(n: usize) -> String {
    match n {
        1 => "One".to_string(),
        2 => "Two".to_string(),
        3 => "Three".to_string(),
        4 => "Four".to_string(),
        5 => "Five".to_string(),
        n => n.to_string(),
    }
}
