//! Phrase source.
//!
//! The read-only list of phrases that cards are built from and that the host
//! draws. Loaded once at startup, one phrase per line.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use super::card::is_free;

/// Phrases needed to fill every non-FREE cell of a card.
pub const MIN_PHRASES: usize = 24;

/// Validated, de-duplicated phrase list. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseSource {
    phrases: Arc<[String]>,
}

impl PhraseSource {
    /// Build from a list, trimming entries and dropping blanks and repeats.
    ///
    /// The FREE marker is reserved for the center cell and never counts as a
    /// phrase.
    pub fn new<I, S>(phrases: I) -> Result<Self, PhraseSourceError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let phrases: Vec<String> = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty() && !is_free(p))
            .filter(|p| seen.insert(p.clone()))
            .collect();

        if phrases.len() < MIN_PHRASES {
            return Err(PhraseSourceError::TooFew {
                found: phrases.len(),
            });
        }

        Ok(Self {
            phrases: phrases.into(),
        })
    }

    /// Parse the keyword-file format: one phrase per line.
    pub fn from_lines(text: &str) -> Result<Self, PhraseSourceError> {
        Self::new(text.lines())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PhraseSourceError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_lines(&text)
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.phrases.iter().any(|p| p == phrase)
    }
}

#[derive(Debug, Error)]
pub enum PhraseSourceError {
    #[error("Unable to load phrases: {0}")]
    Io(#[from] std::io::Error),

    #[error("At least {} phrases required, found {found}", MIN_PHRASES)]
    TooFew { found: usize },
}
