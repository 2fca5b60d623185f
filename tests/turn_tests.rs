//! Human turn flow through the session: placement, confirm, expiry,
//! regret, draw-two-choose-one, and winning.

use std::time::{Duration, Instant};

use rust_rummikub::core::{
    GameConfig, GameEvent, GameOverReason, PlayerId, RummyError, SeatConfig, TileColor, TileId,
    TurnTimeLimit, TOTAL_TILES,
};
use rust_rummikub::game::{GameBuilder, Intent, Phase, PoolChoice, Session};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

fn red(number: u8) -> TileId {
    TileId::numbered(TileColor::Red, number, 0)
}

fn blue(number: u8) -> TileId {
    TileId::numbered(TileColor::Blue, number, 0)
}

/// Default table, but bots wait a second so human-turn effects are visible.
fn config() -> GameConfig {
    GameConfig::default().with_bot_delay_ms(1_000)
}

fn start(builder: GameBuilder, t0: Instant) -> Session {
    let mut session = builder.build(42).unwrap();
    session.handle(Intent::Start, t0).unwrap();
    session
}

fn place(session: &mut Session, tile: TileId, slot: usize, now: Instant) {
    session.handle(Intent::SelectHandTile(tile), now).unwrap();
    session.handle(Intent::SelectBoardSlot(slot), now).unwrap();
}

fn count_events(session: &Session, matcher: impl Fn(&GameEvent) -> bool) -> usize {
    session
        .state()
        .history()
        .iter()
        .filter(|r| matcher(&r.event))
        .count()
}

// =============================================================================
// Committing a Turn
// =============================================================================

/// A 33-point run on the first turn, confirmed early, ends the turn with no
/// draw and opens the game for everyone.
#[test]
fn test_first_turn_meld_commits() {
    let t0 = Instant::now();
    let mut session = start(
        GameBuilder::new()
            .config(config())
            .preset_hand(P0, vec![red(9), red(11), red(13), blue(1)]),
        t0,
    );
    let pool_before = session.state().pool.len();

    place(&mut session, red(9), 0, t0);
    place(&mut session, red(11), 1, t0);
    place(&mut session, red(13), 2, t0);
    session.handle(Intent::Confirm, t0).unwrap();

    // Confirm only expires the clock; nothing is committed until the tick.
    assert_eq!(session.phase(), Phase::HumanTurnActive);
    session.tick(t0);

    assert_eq!(session.phase(), Phase::BotTurnActive);
    assert_eq!(session.state().active_player, P1);
    assert!(!session.state().meld_threshold_pending());
    assert_eq!(session.state().hand(P0).tiles(), &[blue(1)]);
    assert_eq!(session.state().pool.len(), pool_before);
    assert_eq!(count_events(&session, |e| matches!(e, GameEvent::DrawOffered { .. })), 0);
    assert_eq!(
        count_events(&session, |e| *e == GameEvent::BoardCommitted { opened: true }),
        1
    );
}

/// Once anyone has opened, a second human's small run no longer needs 30.
#[test]
fn test_meld_flag_is_game_wide() {
    let t0 = Instant::now();
    let p1_run = [
        TileId::numbered(TileColor::Green, 1, 0),
        TileId::numbered(TileColor::Green, 3, 0),
        TileId::numbered(TileColor::Green, 5, 0),
    ];
    let mut session = start(
        GameBuilder::new()
            .config(config().with_seats(vec![SeatConfig::human("A"), SeatConfig::human("B")]))
            .preset_hand(P0, vec![red(9), red(11), red(13), blue(1)])
            .preset_hand(P1, vec![p1_run[0], p1_run[1], p1_run[2], blue(2)]),
        t0,
    );

    for (slot, tile) in [red(9), red(11), red(13)].into_iter().enumerate() {
        place(&mut session, tile, slot, t0);
    }
    session.handle(Intent::Confirm, t0).unwrap();
    session.tick(t0);
    assert_eq!(session.state().active_player, P1);
    assert_eq!(session.phase(), Phase::HumanTurnActive);

    for (i, tile) in p1_run.into_iter().enumerate() {
        place(&mut session, tile, 30 + i, t0);
    }
    session.handle(Intent::Confirm, t0).unwrap();
    session.tick(t0);

    assert_eq!(session.state().active_player, P0);
    assert_eq!(session.state().board.occupied_count(), 6);
    assert_eq!(session.state().hand(P1).tiles(), &[blue(2)]);
    assert_eq!(
        count_events(&session, |e| *e == GameEvent::BoardCommitted { opened: false }),
        1
    );
}

// =============================================================================
// Expiry Without a Legal Play
// =============================================================================

/// Letting the clock run out with nothing placed offers two tiles; the turn
/// only ends once one is chosen.
#[test]
fn test_expiry_without_placement_forces_draw() {
    let t0 = Instant::now();
    let mut session = start(GameBuilder::new().config(config()), t0);
    let pool_before = session.state().pool.len();

    session.tick(t0 + Duration::from_secs(14));
    assert_eq!(session.phase(), Phase::HumanTurnActive);

    session.tick(t0 + Duration::from_secs(15));
    assert_eq!(session.phase(), Phase::HumanChoosing);
    let [first, _second] = session.pending_choice().unwrap();
    assert_eq!(session.state().pool.len(), pool_before - 2);

    // The offered pair is held by the session, outside pool and hands.
    assert_eq!(session.state().tile_total(), TOTAL_TILES - 2);
    assert_eq!(session.tile_total(), TOTAL_TILES);

    // No amount of waiting ends a pending choice.
    session.tick(t0 + Duration::from_secs(600));
    assert_eq!(session.phase(), Phase::HumanChoosing);
    assert_eq!(session.state().active_player, P0);

    session
        .handle(Intent::ChoosePoolTile(PoolChoice::First), t0 + Duration::from_secs(600))
        .unwrap();
    assert_eq!(session.phase(), Phase::BotTurnActive);
    assert_eq!(session.state().hand(P0).len(), 15);
    assert!(session.state().hand(P0).contains(first));
    assert_eq!(session.state().pool.len(), pool_before - 1);
    assert_eq!(session.state().tile_total(), TOTAL_TILES);
}

/// An illegal board at expiry is rolled back before the forced draw.
#[test]
fn test_invalid_board_rolls_back_then_draws() {
    let t0 = Instant::now();
    let hand = vec![red(9), red(12), blue(1)];
    let mut session = start(
        GameBuilder::new()
            .config(config())
            .preset_hand(P0, hand.clone()),
        t0,
    );

    place(&mut session, red(9), 0, t0);
    place(&mut session, red(12), 1, t0);
    session.handle(Intent::Confirm, t0).unwrap();
    session.tick(t0);

    assert_eq!(session.phase(), Phase::HumanChoosing);
    assert!(session.state().board.is_empty());
    assert_eq!(session.state().hand(P0).tiles(), hand.as_slice());
    assert_eq!(count_events(&session, |e| *e == GameEvent::BoardRejected), 1);
}

/// A legal run worth less than the opening threshold is rejected too.
#[test]
fn test_opening_below_threshold_rejected() {
    let t0 = Instant::now();
    let mut session = start(
        GameBuilder::new()
            .config(config())
            .preset_hand(P0, vec![red(1), red(3), red(5)]),
        t0,
    );

    place(&mut session, red(1), 0, t0);
    place(&mut session, red(3), 1, t0);
    place(&mut session, red(5), 2, t0);
    session.tick(t0 + Duration::from_secs(15));

    assert_eq!(session.phase(), Phase::HumanChoosing);
    assert!(session.state().board.is_empty());
    assert!(session.state().meld_threshold_pending());
}

/// Ticks after expiry never re-run the rollback or draw again.
#[test]
fn test_expiry_branch_runs_once() {
    let t0 = Instant::now();
    let mut session = start(
        GameBuilder::new()
            .config(config())
            .preset_hand(P0, vec![red(9), blue(4)]),
        t0,
    );
    place(&mut session, red(9), 3, t0);

    for secs in [15, 16, 17, 40] {
        session.tick(t0 + Duration::from_secs(secs));
    }

    assert_eq!(count_events(&session, |e| matches!(e, GameEvent::DrawOffered { .. })), 1);
    assert_eq!(count_events(&session, |e| *e == GameEvent::BoardRejected), 1);
    assert_eq!(session.state().tile_total(), TOTAL_TILES);
}

// =============================================================================
// Regret and Voluntary Draw
// =============================================================================

#[test]
fn test_regret_then_draw() {
    let t0 = Instant::now();
    let mut session = start(
        GameBuilder::new()
            .config(config())
            .preset_hand(P0, vec![red(9), blue(4)]),
        t0,
    );

    place(&mut session, red(9), 3, t0);
    assert_eq!(session.handle(Intent::RequestDraw, t0), Err(RummyError::PendingPlacement));

    session.handle(Intent::Regret, t0).unwrap();
    assert!(session.state().board.is_empty());

    session.handle(Intent::RequestDraw, t0).unwrap();
    assert_eq!(session.phase(), Phase::HumanChoosing);
    let [_, second] = session.pending_choice().unwrap();

    session.handle(Intent::ChoosePoolTile(PoolChoice::Second), t0).unwrap();
    assert_eq!(session.state().hand(P0).tiles(), &[red(9), blue(4), second]);
    assert_eq!(session.phase(), Phase::BotTurnActive);
}

#[test]
fn test_regret_rejected_after_expiry() {
    let t0 = Instant::now();
    let mut session = start(
        GameBuilder::new()
            .config(config())
            .preset_hand(P0, vec![red(9), blue(4)]),
        t0,
    );
    place(&mut session, red(9), 3, t0);

    let late = t0 + Duration::from_secs(15);
    assert_eq!(session.handle(Intent::Regret, late), Err(RummyError::TimerExpired));
    assert_eq!(session.state().board.get(3), Some(red(9)));
}

// =============================================================================
// Rejected Intents Change Nothing
// =============================================================================

#[test]
fn test_intents_rejected_during_bot_turn() {
    let t0 = Instant::now();
    let mut session = start(GameBuilder::new().config(config()), t0);
    session.handle(Intent::RequestDraw, t0).unwrap();
    session.handle(Intent::ChoosePoolTile(PoolChoice::First), t0).unwrap();
    assert_eq!(session.phase(), Phase::BotTurnActive);

    let tile = session.state().hand(P0).tiles()[0];
    let board_before = session.state().board.clone();
    assert_eq!(
        session.handle(Intent::SelectHandTile(tile), t0),
        Err(RummyError::NotActivePlayer(P0))
    );
    assert_eq!(
        session.handle(Intent::SelectBoardSlot(0), t0),
        Err(RummyError::NotActivePlayer(P0))
    );
    assert_eq!(session.state().board, board_before);
    assert_eq!(session.selection(), None);
}

/// A tile id outside the set is refused, and the error still formats.
#[test]
fn test_unknown_tile_rejected() {
    let t0 = Instant::now();
    let mut session = start(GameBuilder::new().config(config()), t0);

    let err = session
        .handle(Intent::SelectHandTile(TileId(9999)), t0)
        .unwrap_err();
    assert_eq!(err, RummyError::TileNotInHand(TileId(9999)));
    assert_eq!(err.to_string(), "#9999 is not in the hand");
    assert_eq!(session.selection(), None);

    // Off the wire the same intent never decodes.
    assert!(serde_json::from_str::<Intent>(r#"{"SelectHandTile":9999}"#).is_err());
    let ok: Intent = serde_json::from_str(r#"{"SelectHandTile":12}"#).unwrap();
    assert_eq!(ok, Intent::SelectHandTile(TileId(12)));
}

#[test]
fn test_slot_out_of_range() {
    let t0 = Instant::now();
    let mut session = start(
        GameBuilder::new()
            .config(config())
            .preset_hand(P0, vec![red(9)]),
        t0,
    );
    session.handle(Intent::SelectHandTile(red(9)), t0).unwrap();

    assert_eq!(
        session.handle(Intent::SelectBoardSlot(450), t0),
        Err(RummyError::SlotOutOfRange { slot: 450, len: 450 })
    );
    assert!(session.state().hand(P0).contains(red(9)));
}

// =============================================================================
// Time Limit
// =============================================================================

#[test]
fn test_selected_time_limit_applies() {
    let t0 = Instant::now();
    let mut session = GameBuilder::new().config(config()).build(42).unwrap();
    session
        .handle(Intent::SelectTimeLimit(TurnTimeLimit::Thirty), t0)
        .unwrap();
    session.handle(Intent::Start, t0).unwrap();

    session.tick(t0 + Duration::from_secs(29));
    assert_eq!(session.phase(), Phase::HumanTurnActive);
    session.tick(t0 + Duration::from_secs(30));
    assert_eq!(session.phase(), Phase::HumanChoosing);
}

// =============================================================================
// Winning
// =============================================================================

/// Emptying the hand ends the game and collects every opponent's hand value.
#[test]
fn test_emptying_hand_wins() {
    let t0 = Instant::now();
    let mut session = start(
        GameBuilder::new()
            .config(config())
            .preset_hand(P0, vec![red(9), red(11), red(13)])
            .preset_hand(P1, vec![blue(2), TileId::joker(0)]),
        t0,
    );

    place(&mut session, red(9), 0, t0);
    place(&mut session, red(11), 1, t0);
    place(&mut session, red(13), 2, t0);
    session.handle(Intent::Confirm, t0).unwrap();
    session.tick(t0);

    assert_eq!(session.phase(), Phase::GameOver);
    let scores = session.scores().unwrap();
    assert_eq!(scores.reason, GameOverReason::HandEmptied(P0));
    assert_eq!(scores.score(P0), 32);
    assert_eq!(scores.score(P1), -32);
    assert_eq!(scores.entries()[0].name, "Human Player");

    // Nothing moves after the game is over.
    assert!(matches!(
        session.handle(Intent::Regret, t0),
        Err(RummyError::InvalidPhase { phase: "game_over", .. })
    ));
    session.tick(t0 + Duration::from_secs(100));
    assert_eq!(session.phase(), Phase::GameOver);
}
