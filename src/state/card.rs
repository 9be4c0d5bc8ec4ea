//! Scorecards.
//!
//! A scorecard is an immutable 5x5 grid of phrases with a FREE cell in the
//! center. Cards are compared by content through their fingerprint, never by id.

use rand::seq::SliceRandom;
use rand::Rng;

use super::error::{Result, SessionError};
use super::phrases::MIN_PHRASES;

/// Grid dimensions.
pub const GRID_SIZE: usize = 5;

/// Row and column of the FREE cell.
pub const CENTER: usize = GRID_SIZE / 2;

/// Reserved value of the center cell. Always counts as marked.
pub const FREE_SPACE: &str = "FREE SPACE";

/// ASCII unit separator. Phrase text never contains control characters.
const FINGERPRINT_SEPARATOR: &str = "\u{1f}";

/// 5x5 grid of cell values, row-major.
pub type Grid = [[String; GRID_SIZE]; GRID_SIZE];

/// Check if a cell value is the FREE marker.
pub fn is_free(value: &str) -> bool {
    value == FREE_SPACE
}

/// An immutable bingo card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scorecard {
    id: String,
    rows: Grid,
}

impl Scorecard {
    pub fn new(id: String, rows: Grid) -> Self {
        Self { id, rows }
    }

    /// Generate a card from at least [`MIN_PHRASES`] phrases.
    ///
    /// Takes 24 phrases with an unbiased partial shuffle, lays them out row-major
    /// and puts [`FREE_SPACE`] in the center. Content uniqueness across live cards
    /// is the caller's job (see [`crate::pool::CardPool`]).
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, phrases: &[String]) -> Result<Self> {
        if phrases.len() < MIN_PHRASES {
            return Err(SessionError::argument(format!(
                "At least {} phrases required to build a scorecard",
                MIN_PHRASES
            )));
        }

        let mut pool: Vec<&String> = phrases.iter().collect();
        let (selection, _) = pool.partial_shuffle(rng, MIN_PHRASES);
        let mut picks = selection.iter();

        let rows: Grid = std::array::from_fn(|row| {
            std::array::from_fn(|col| {
                if row == CENTER && col == CENTER {
                    FREE_SPACE.to_string()
                } else {
                    // 24 picks for 24 non-center cells
                    picks.next().map(|p| p.to_string()).unwrap_or_default()
                }
            })
        });

        let mut id_bytes = [0u8; 16];
        rng.fill(&mut id_bytes);
        let id = uuid::Builder::from_random_bytes(id_bytes)
            .into_uuid()
            .to_string();

        Ok(Self::new(id, rows))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rows(&self) -> &Grid {
        &self.rows
    }

    pub fn size(&self) -> usize {
        GRID_SIZE
    }

    /// Get a cell value. `None` outside the grid.
    pub fn value(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// All cell values, row-major.
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(String::as_str)
    }

    /// Row-major content key. Two cards with equal fingerprints are duplicates.
    pub fn fingerprint(&self) -> String {
        self.cells().collect::<Vec<_>>().join(FINGERPRINT_SEPARATOR)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "rows": self.rows
        })
    }
}

impl std::fmt::Display for Scorecard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Scorecard({})", self.id)
    }
}
