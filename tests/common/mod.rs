//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Once;

use bingo_state::{is_free, PhraseSource, Scorecard, Session, SessionConfig};
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Install a test log subscriber once.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then `warn`.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub fn phrases(n: usize) -> PhraseSource {
    PhraseSource::new((0..n).map(|i| format!("Phrase {}", i))).unwrap()
}

/// Logged session over `n` numbered phrases with a fixed seed.
pub fn session(n: usize) -> Session {
    init_logging();
    Session::new(phrases(n), SessionConfig::default().with_seed(99))
}

/// Non-FREE phrases on a card.
pub fn card_phrases(card: &Scorecard) -> HashSet<String> {
    card.cells()
        .filter(|c| !is_free(c))
        .map(str::to_string)
        .collect()
}
