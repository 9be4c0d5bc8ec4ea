//! End-to-end rounds through the public `Session` API.

mod common;

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use bingo_state::{ClaimType, Session, SessionConfig, SessionStatus};
use common::{card_phrases, phrases, session};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_thirty_draws_complete_the_round() {
    let session = session(30);
    session.start();

    for i in 1..=30 {
        let snap = session.draw_next().unwrap();
        assert_eq!(snap.remaining_calls, 30 - i);
        if i < 30 {
            assert_eq!(snap.status, SessionStatus::InProgress);
        }
    }

    let state = session.snapshot();
    assert_eq!(state.status, SessionStatus::Complete);
    assert_eq!(state.remaining_calls, 0);

    let distinct: HashSet<&String> = state.called_phrases.iter().collect();
    assert_eq!(distinct.len(), 30);

    // draws after exhaustion are stable
    for _ in 0..3 {
        let snap = session.draw_next().unwrap();
        assert_eq!(snap.status, SessionStatus::Complete);
        assert_eq!(snap.remaining_calls, 0);
        assert_eq!(snap.called_phrases.len(), 30);
    }
}

#[test]
fn test_single_player_full_card() {
    let session = session(30);
    let alice = session.register_player(None, "Alice");
    let card = session.preview_scorecards(1).unwrap().remove(0);
    let alice = session.assign_scorecard(alice.id(), card.id()).unwrap();
    assert_eq!(alice.scorecard(), Some(&card));

    session.start();
    let needed = card_phrases(&card);
    loop {
        let snap = session.draw_next().unwrap();
        let called: HashSet<String> = snap.called_phrases.into_iter().collect();
        if needed.is_subset(&called) {
            break;
        }
    }

    let result = session.claim_win(alice.id(), ClaimType::FullCard).unwrap();
    assert!(result.accepted, "{}", result.message);
    assert_eq!(result.winners.len(), 1);
    assert_eq!(result.winners[0].player_id, alice.id());
    assert_eq!(session.snapshot().winners, result.winners);
}

#[test]
fn test_claim_before_any_draw_is_incomplete() {
    let session = session(30);
    let alice = session.register_player(None, "Alice");
    let card_id = session.preview_scorecards(1).unwrap()[0].id().to_string();
    session.assign_scorecard(alice.id(), &card_id).unwrap();

    let result = session.claim_win(alice.id(), ClaimType::Diagonal).unwrap();
    assert!(!result.accepted);
    assert_eq!(result.message, "Squares not complete for the diagonal pattern");
}

#[test]
fn test_reset_keeps_players() {
    let session = session(30);
    let ids: Vec<_> = ["Alice", "Bob", "Carol"]
        .iter()
        .map(|name| {
            let player = session.register_player(None, name);
            let card_id = session.preview_scorecards(1).unwrap()[0].id().to_string();
            session.assign_scorecard(player.id(), &card_id).unwrap();
            player.id()
        })
        .collect();
    session.start();
    session.draw_next().unwrap();

    let snap = session.reset(false);
    assert_eq!(snap.player_count, 3);
    assert_eq!(snap.status, SessionStatus::WaitingForHost);
    for id in &ids {
        assert!(session.get_player(*id).unwrap().scorecard().is_none());
    }
    assert_eq!(session.inspect(|s| s.pool_size()), 0);

    // pool refills lazily
    assert_eq!(session.preview_scorecards(2).unwrap().len(), 2);
    assert_eq!(session.inspect(|s| s.pool_size()), 20);
}

#[test]
fn test_selection_locked_after_start() {
    let session = session(30);
    let alice = session.register_player(None, "Alice");
    let cards = session.preview_scorecards(2).unwrap();
    session.assign_scorecard(alice.id(), cards[0].id()).unwrap();

    // free to switch before the round
    session.assign_scorecard(alice.id(), cards[1].id()).unwrap();

    session.start();
    let next = session.preview_scorecards(1).unwrap().remove(0);
    let err = session.assign_scorecard(alice.id(), next.id()).unwrap_err();
    assert!(err.is_state());
}

#[test]
fn test_preview_race_only_one_assign_wins() {
    let session = session(30);
    let alice = session.register_player(None, "Alice");
    let bob = session.register_player(None, "Bob");

    // both previewed the same card
    let card = session.preview_scorecards(1).unwrap().remove(0);

    assert!(session.assign_scorecard(alice.id(), card.id()).is_ok());
    let err = session.assign_scorecard(bob.id(), card.id()).unwrap_err();
    assert!(err.is_argument());
    assert!(!session.get_player(bob.id()).unwrap().has_scorecard());
}

#[test]
fn test_concurrent_full_card_claims_respect_capacity() {
    let session = Arc::new(session(24));
    let players: Vec<_> = (0..8)
        .map(|i| {
            let player = session.register_player(None, &format!("P{}", i));
            let card_id = session.preview_scorecards(1).unwrap()[0].id().to_string();
            session.assign_scorecard(player.id(), &card_id).unwrap();
            player.id()
        })
        .collect();

    // 24 phrases: every card is complete once everything is drawn
    session.start();
    while session.snapshot().remaining_calls > 0 {
        session.draw_next().unwrap();
    }

    let handles: Vec<_> = players
        .into_iter()
        .map(|id| {
            let session = Arc::clone(&session);
            thread::spawn(move || session.claim_win(id, ClaimType::FullCard).unwrap())
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results.iter().filter(|r| r.accepted).count(), 3);
    assert!(results
        .iter()
        .filter(|r| !r.accepted)
        .all(|r| r.message == "Three full-card winners already recorded"));
    assert_eq!(session.snapshot().winners.len(), 3);
}

#[test]
fn test_player_directory_and_json() {
    let session = session(30);
    let bob = session.register_player(None, "Bob");
    session.register_player(None, "Alice");
    let card_id = session.preview_scorecards(1).unwrap()[0].id().to_string();
    session.assign_scorecard(bob.id(), &card_id).unwrap();

    let directory = session.player_directory();
    let names: Vec<&str> = directory.iter().map(|e| e.display_name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
    assert_eq!(directory[1].to_json()["hasScorecard"], true);

    let json = session.snapshot().to_json();
    assert_eq!(json["status"], "WAITING_FOR_HOST");
    assert_eq!(json["playerCount"], 2);
    assert!(json["currentCall"].is_null());
}

#[derive(Debug, Clone)]
enum Op {
    Register,
    Preview(usize),
    Assign { player: usize, card: usize },
    Start,
    Draw,
    Reset(bool),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Register),
        (1usize..8).prop_map(Op::Preview),
        (0usize..6, 0usize..8).prop_map(|(player, card)| Op::Assign { player, card }),
        Just(Op::Start),
        Just(Op::Draw),
        any::<bool>().prop_map(Op::Reset),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// No two live cards, pooled or assigned, ever share a fingerprint.
    #[test]
    fn prop_live_cards_have_unique_content(seed in any::<u64>(), ops in prop::collection::vec(op(), 1..40)) {
        let config = SessionConfig { pool_target: 4, ..SessionConfig::default() }.with_seed(seed);
        let session = Session::new(phrases(24), config);
        let mut players = Vec::new();
        let mut last_preview = Vec::new();

        for op in ops {
            match op {
                Op::Register => players.push(session.register_player(None, "p").id()),
                Op::Preview(n) => last_preview = session.preview_scorecards(n).unwrap(),
                Op::Assign { player, card } => {
                    if let (Some(id), Some(card)) = (players.get(player), last_preview.get(card)) {
                        let _ = session.assign_scorecard(*id, card.id());
                    }
                }
                Op::Start => { session.start(); }
                Op::Draw => { let _ = session.draw_next(); }
                Op::Reset(drop_players) => {
                    session.reset(drop_players);
                    if drop_players {
                        players.clear();
                    }
                }
            }

            let assigned: Vec<String> = players
                .iter()
                .filter_map(|id| session.get_player(*id).ok())
                .filter_map(|p| p.scorecard().map(|c| c.fingerprint()))
                .collect();
            prop_assert!(assigned.iter().all(|f| session.inspect(|s| s.is_fingerprint_live(f))));

            // pooled and assigned together, no repeats
            let live = session.inspect(|s| s.live_fingerprints());
            let distinct: HashSet<&String> = live.iter().collect();
            prop_assert_eq!(distinct.len(), live.len());
            prop_assert_eq!(live.len(), session.inspect(|s| s.pool_size()) + assigned.len());
        }
    }
}
