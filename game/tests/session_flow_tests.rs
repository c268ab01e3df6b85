use std::time::Duration;

use cozy_chess::Square;
use game::board::BoardState;
use game::dice::{RngDice, ScriptedDice};
use game::effects::{CHEAT_LINE, EffectKind};
use game::session::{GameSession, Phase, SessionEvent, Turn};
use game::sfx::Cue;
use game::variant::Variant;
use pretty_assertions::assert_eq;

const FRAME: Duration = Duration::from_millis(16);
const SCHOLARS_MATE_IN_ONE: &str =
    "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";

#[test]
fn empty_and_enemy_squares_never_become_selected() {
    let mut session = GameSession::with_duration(Variant::Cursed, Duration::from_secs(60));
    let mut dice = ScriptedDice::new();
    for square in [Square::A3, Square::D5, Square::H6, Square::A7, Square::E8] {
        session.click(square, &mut dice);
        assert_eq!(session.selected(), None, "clicked {square}");
    }
}

#[test]
fn rejected_pair_leaves_board_and_clears_selection() {
    let mut session = GameSession::with_duration(Variant::Classic, Duration::from_secs(60));
    let mut dice = ScriptedDice::new();
    let fen = session.board().fen();

    // Knight to an unreachable square, then a pawn onto its own piece.
    for (from, to) in [(Square::B1, Square::B3), (Square::E2, Square::D1)] {
        session.click(from, &mut dice);
        assert_eq!(session.selected(), Some(from));
        session.click(to, &mut dice);
        assert_eq!(session.selected(), None);
        assert_eq!(session.board().fen(), fen);
        assert_eq!(session.turn(), Turn::Player);
    }
}

#[test]
fn turns_alternate_over_a_seeded_game() {
    let mut session = GameSession::with_duration(Variant::Classic, Duration::from_secs(600));
    let mut dice = RngDice::from_seed(Some(2024));

    let mut player_moves = 0;
    let mut frames = 0;
    while player_moves < 6 && frames < 10_000 {
        frames += 1;
        if *session.phase() != Phase::Playing {
            break;
        }
        if session.turn() == Turn::Player && session.effect_kind().is_none() {
            let before = session.board().history_len();
            let mv = session.board().legal_moves()[0];
            session.click(mv.from, &mut dice);
            session.click(mv.to, &mut dice);
            assert_eq!(session.board().history_len(), before + 1);
            assert!(matches!(session.turn(), Turn::Ai { .. }));
            player_moves += 1;
        }
        session.tick(FRAME, &mut dice);
    }

    assert!(player_moves > 0);
    // Every player move has been answered or is still pending.
    let plies = session.board().history_len();
    assert!(plies == player_moves * 2 || plies == player_moves * 2 - 1);
}

#[test]
fn remaining_time_never_increases_and_stops_at_zero() {
    let mut session = GameSession::with_duration(Variant::Classic, Duration::from_secs(1));
    let mut dice = ScriptedDice::new();
    let mut last = session.timer().map(|t| t.remaining()).unwrap();
    let mut exited = false;

    for _ in 0..400 {
        let events = session.tick(FRAME, &mut dice);
        exited |= events.contains(&SessionEvent::Exit);
        let now = session.timer().map(|t| t.remaining()).unwrap();
        assert!(now <= last);
        last = now;
    }

    assert_eq!(last, Duration::ZERO);
    assert_eq!(session.phase(), &Phase::TimeExpired);
    assert!(exited);
}

#[test]
fn prompt_defaults_and_parses() {
    for (typed, expected) in [("abc", 180), ("45", 45)] {
        let mut session = GameSession::new(Variant::Classic);
        for ch in typed.chars() {
            session.type_char(ch);
        }
        assert_eq!(session.submit_duration(), Some(Duration::from_secs(expected)));
    }
}

#[test]
fn cursed_cheat_on_a_mated_board_takes_back_the_mate() {
    let board = BoardState::from_fen(SCHOLARS_MATE_IN_ONE).unwrap();
    let mut session = GameSession::with_board(Variant::Cursed, board);
    session.submit_duration();

    // No glitch after the player's move, then the AI cheats.
    let mut dice = ScriptedDice::new().roll(false).roll(true);
    session.click(Square::H5, &mut dice);
    session.click(Square::F7, &mut dice);
    assert!(session.board().legal_moves().is_empty());
    assert_eq!(session.phase(), &Phase::Playing);

    let events = session.tick(Duration::from_secs(1), &mut dice);
    assert_eq!(
        events,
        vec![
            SessionEvent::Cue(Cue::Laugh),
            SessionEvent::Say(CHEAT_LINE.to_string()),
        ]
    );
    assert_eq!(session.board().fen(), SCHOLARS_MATE_IN_ONE);
    assert_eq!(session.board().history_len(), 0);
    assert_eq!(session.effect_kind(), Some(EffectKind::CheatTaunt));
    assert_eq!(session.turn(), Turn::Player);

    // The caption holds the board for a second.
    session.click(Square::H5, &mut dice);
    assert_eq!(session.selected(), None);
    session.tick(Duration::from_secs(1), &mut dice);
    session.click(Square::H5, &mut dice);
    assert_eq!(session.selected(), Some(Square::H5));
}

#[test]
fn cursed_time_up_glitches_speaks_and_crashes() {
    let mut session = GameSession::with_duration(Variant::Cursed, Duration::from_millis(100));
    let mut dice = ScriptedDice::new();
    let mut events = Vec::new();
    let mut kinds = Vec::new();
    for _ in 0..1_000 {
        events.extend(session.tick(FRAME, &mut dice));
        kinds.push(session.effect_kind());
        if events.contains(&SessionEvent::Exit) {
            break;
        }
    }

    assert!(kinds.contains(&Some(EffectKind::TimeUp)));
    assert_eq!(events.first(), Some(&SessionEvent::Cue(Cue::Ambience1)));
    assert!(events.contains(&SessionEvent::Cue(Cue::Error)));
    assert_eq!(events.last(), Some(&SessionEvent::Exit));
}
