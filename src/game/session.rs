//! The turn state machine.
//!
//! A `Session` owns the game and consumes two kinds of input:
//!
//! - `handle(intent, now)`: a discrete UI action. Returns `Err` without
//!   touching the game if the action is not allowed right now.
//! - `tick(now)`: the periodic update. Fires turn expiry, runs bot turns,
//!   and detects the end of the game.
//!
//! ## Phases
//!
//! ```text
//! Idle --start--> HumanTurnActive --expiry--> (commit) --> next seat
//!                        |                 \
//!                        |                  (reject / no play) --> HumanChoosing --choice--> next seat
//!                        +--request_draw--------------------------^
//! BotTurnActive --delay--> place or draw --> next seat
//! any turn --hand empty / pool empty--> GameOver
//! ```
//!
//! Expiry is evaluated at most once per turn. `confirm` only expires the
//! clock early; validation still happens on the following tick.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::bot::{GreedyExtension, PlacementPolicy, SearchStats};
use crate::core::config::{GameConfig, TurnTimeLimit};
use crate::core::error::{Result, RummyError};
use crate::core::event::{GameEvent, GameOverReason};
use crate::core::player::{PlayerId, PlayerKind, PlayerMap};
use crate::core::rng::GameRng;
use crate::core::state::{GameState, TurnSnapshot};
use crate::core::tile::TileId;
use crate::rules::{RuleValidator, ScoreTable};
use crate::zones::SortOrder;

use super::intent::{Intent, PoolChoice};
use super::timer::TurnTimer;
use super::view::GameView;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Built but not started. Time limit can still change.
    Idle,
    HumanTurnActive,
    /// Draw-two-choose-one is waiting for a pick. The clock is stopped.
    HumanChoosing,
    BotTurnActive,
    GameOver,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::HumanTurnActive => "human_turn",
            Phase::HumanChoosing => "human_choosing",
            Phase::BotTurnActive => "bot_turn",
            Phase::GameOver => "game_over",
        }
    }
}

/// What the active human currently has picked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    Hand(TileId),
    /// A board slot, for rearranging.
    Board(usize),
}

pub struct Session {
    config: GameConfig,
    state: GameState,
    validator: RuleValidator,
    phase: Phase,

    /// Human turn clock.
    timer: TurnTimer,
    /// Delay before a bot seat acts.
    bot_timer: TurnTimer,

    snapshot: Option<TurnSnapshot>,
    selection: Option<Selection>,
    /// A hand tile went onto the board this turn.
    tile_placed: bool,
    /// A board tile was moved this turn.
    board_moved: bool,
    /// Expiry (or a requested draw) already handled this turn.
    turn_resolved: bool,
    pending_choice: Option<[TileId; 2]>,

    /// Seats whose hands were preset and skip the deal.
    preset_seats: PlayerMap<bool>,

    paused: bool,
    show_pool: bool,
    show_opponent_hands: bool,

    scores: Option<ScoreTable>,
    bot: Box<dyn PlacementPolicy>,
}

impl Session {
    // === Accessors ===

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn validator(&self) -> &RuleValidator {
        &self.validator
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// The two tiles offered by a draw, while a choice is pending.
    pub fn pending_choice(&self) -> Option<[TileId; 2]> {
        self.pending_choice
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn shows_pool(&self) -> bool {
        self.show_pool
    }

    pub fn shows_opponent_hands(&self) -> bool {
        self.show_opponent_hands
    }

    /// Final scores, once the game is over.
    #[must_use]
    pub fn scores(&self) -> Option<&ScoreTable> {
        self.scores.as_ref()
    }

    pub fn bot_stats(&self) -> &SearchStats {
        self.bot.stats()
    }

    pub fn tile_placed_this_turn(&self) -> bool {
        self.tile_placed
    }

    /// Tiles in play, counting a pending draw-two offer. Always 379.
    pub fn tile_total(&self) -> usize {
        self.state.tile_total() + self.pending_choice.map_or(0, |offer| offer.len())
    }

    /// Time left on the human clock, zero outside a human turn.
    pub fn time_left(&self, now: Instant) -> std::time::Duration {
        self.timer.time_left(now)
    }

    /// The seat a UI should show: the active seat if human, otherwise the
    /// first human seat.
    pub fn focus_player(&self) -> Option<PlayerId> {
        let active = self.state.active_player;
        if self.state.seat(active).kind == PlayerKind::Human {
            return Some(active);
        }
        self.state
            .seats()
            .iter()
            .find(|(_, seat)| seat.kind == PlayerKind::Human)
            .map(|(player, _)| player)
    }

    #[must_use]
    pub fn view(&self, now: Instant) -> GameView {
        GameView::capture(self, now)
    }

    // === Input ===

    /// Apply one UI intent.
    pub fn handle(&mut self, intent: Intent, now: Instant) -> Result<()> {
        if self.paused && intent != Intent::TogglePause {
            return Err(RummyError::Paused);
        }

        match intent {
            Intent::SelectHandTile(tile) => self.select_hand_tile(tile, now),
            Intent::SelectBoardSlot(slot) => self.select_board_slot(slot, now),
            Intent::Confirm => {
                self.require_human_turn(intent, now)?;
                self.timer.expire_now();
                Ok(())
            }
            Intent::Regret => self.regret(now),
            Intent::RequestDraw => self.request_draw(now),
            Intent::ChoosePoolTile(choice) => self.choose_pool_tile(choice, now),
            Intent::SortHand(order) => self.sort_hand(order),
            Intent::Start => self.start(now),
            Intent::SelectTimeLimit(limit) => self.select_time_limit(limit),
            Intent::TogglePause => self.toggle_pause(now),
            Intent::TogglePoolView => {
                self.show_pool = !self.show_pool;
                Ok(())
            }
            Intent::ToggleOpponentHands => {
                self.show_opponent_hands = !self.show_opponent_hands;
                Ok(())
            }
            Intent::Restart => {
                self.restart();
                Ok(())
            }
        }
    }

    /// Advance the game to `now`.
    pub fn tick(&mut self, now: Instant) {
        if self.paused {
            return;
        }
        match self.phase {
            Phase::HumanTurnActive | Phase::BotTurnActive => {
                // A hand emptied onto an uncommitted board does not count yet.
                if !self.tile_placed && self.check_game_over() {
                    return;
                }
            }
            Phase::Idle | Phase::HumanChoosing | Phase::GameOver => return,
        }

        if self.phase == Phase::HumanTurnActive && !self.turn_resolved && self.timer.is_expired(now) {
            self.resolve_human_turn(now);
        }

        while self.phase == Phase::BotTurnActive && self.bot_timer.is_expired(now) {
            self.play_bot_turn(now);
        }
    }

    fn phase_error(&self, intent: Intent) -> RummyError {
        RummyError::InvalidPhase {
            phase: self.phase.name(),
            intent: intent.name(),
        }
    }

    /// The active seat, if it is a human mid-turn with time left.
    fn require_human_turn(&self, intent: Intent, now: Instant) -> Result<PlayerId> {
        match self.phase {
            Phase::HumanTurnActive => {}
            Phase::BotTurnActive => {
                return Err(match self.focus_player() {
                    Some(player) => RummyError::NotActivePlayer(player),
                    None => self.phase_error(intent),
                });
            }
            _ => return Err(self.phase_error(intent)),
        }
        if self.turn_resolved || self.timer.is_expired(now) {
            return Err(RummyError::TimerExpired);
        }
        Ok(self.state.active_player)
    }

    fn select_hand_tile(&mut self, tile: TileId, now: Instant) -> Result<()> {
        let player = self.require_human_turn(Intent::SelectHandTile(tile), now)?;
        if !self.state.hand(player).contains(tile) {
            return Err(RummyError::TileNotInHand(tile));
        }
        self.selection = match self.selection {
            Some(Selection::Hand(current)) if current == tile => None,
            _ => Some(Selection::Hand(tile)),
        };
        Ok(())
    }

    fn select_board_slot(&mut self, slot: usize, now: Instant) -> Result<()> {
        let player = self.require_human_turn(Intent::SelectBoardSlot(slot), now)?;
        let len = self.state.board.len();
        if slot >= len {
            return Err(RummyError::SlotOutOfRange { slot, len });
        }

        match self.selection {
            Some(Selection::Hand(tile)) => {
                self.state.place_from_hand(player, tile, slot)?;
                self.tile_placed = true;
                self.selection = None;
                self.state.record(player, GameEvent::TilePlaced { tile, slot });
            }
            Some(Selection::Board(from)) if from == slot => self.selection = None,
            Some(Selection::Board(from)) => {
                self.state.board.move_tile(from, slot)?;
                self.board_moved = true;
                self.selection = None;
                self.state.record(player, GameEvent::TileMoved { from, to: slot });
            }
            None => {
                if self.state.board.get(slot).is_none() {
                    return Err(RummyError::EmptySlot { slot });
                }
                self.selection = Some(Selection::Board(slot));
            }
        }
        Ok(())
    }

    fn regret(&mut self, now: Instant) -> Result<()> {
        let player = self.require_human_turn(Intent::Regret, now)?;
        self.rollback();
        self.state.record(player, GameEvent::Regretted);
        Ok(())
    }

    fn request_draw(&mut self, now: Instant) -> Result<()> {
        self.require_human_turn(Intent::RequestDraw, now)?;
        let untouched = self
            .snapshot
            .as_ref()
            .map_or(true, |snapshot| self.state.board.matches(snapshot.board()));
        if self.tile_placed || self.board_moved || !untouched {
            return Err(RummyError::PendingPlacement);
        }
        self.turn_resolved = true;
        self.selection = None;
        self.offer_draw(now);
        Ok(())
    }

    fn choose_pool_tile(&mut self, choice: PoolChoice, now: Instant) -> Result<()> {
        let intent = Intent::ChoosePoolTile(choice);
        if self.phase != Phase::HumanChoosing {
            return Err(self.phase_error(intent));
        }
        let candidates = self.pending_choice.take().ok_or_else(|| self.phase_error(intent))?;

        let player = self.state.active_player;
        let kept = candidates[choice.index()];
        let returned = candidates[1 - choice.index()];
        self.state.hand_mut(player).push(kept);
        self.state.pool.add_back(returned, &mut self.state.rng);
        self.state.record(player, GameEvent::TileChosen { kept, returned });

        self.end_turn(now);
        Ok(())
    }

    fn sort_hand(&mut self, order: SortOrder) -> Result<()> {
        if self.phase == Phase::GameOver {
            return Err(self.phase_error(Intent::SortHand(order)));
        }
        let player = self
            .focus_player()
            .ok_or_else(|| self.phase_error(Intent::SortHand(order)))?;
        self.state.hand_mut(player).sort(order);
        Ok(())
    }

    fn start(&mut self, now: Instant) -> Result<()> {
        if self.phase != Phase::Idle {
            return Err(self.phase_error(Intent::Start));
        }
        let to_deal: Vec<PlayerId> = self
            .preset_seats
            .iter()
            .filter(|(_, preset)| !**preset)
            .map(|(player, _)| player)
            .collect();
        self.state.deal(&to_deal, self.config.initial_hand_size);
        self.begin_turn(now);
        Ok(())
    }

    fn select_time_limit(&mut self, limit: TurnTimeLimit) -> Result<()> {
        if self.phase != Phase::Idle {
            return Err(self.phase_error(Intent::SelectTimeLimit(limit)));
        }
        self.config.turn_time_limit = limit;
        self.timer.set_limit(limit.duration());
        Ok(())
    }

    fn toggle_pause(&mut self, now: Instant) -> Result<()> {
        if self.phase == Phase::GameOver {
            return Err(self.phase_error(Intent::TogglePause));
        }
        let player = self.state.active_player;
        if self.paused {
            self.timer.resume(now);
            self.bot_timer.resume(now);
            self.state.record(player, GameEvent::Resumed);
        } else {
            self.timer.pause(now);
            self.bot_timer.pause(now);
            self.state.record(player, GameEvent::Paused);
        }
        self.paused = !self.paused;
        Ok(())
    }

    /// Throw the game away and deal a new one from the same config.
    fn restart(&mut self) {
        let rng = self.state.rng.fork();
        self.state = GameState::new(&self.config, rng);
        self.phase = Phase::Idle;
        self.timer.reset();
        self.bot_timer.reset();
        self.snapshot = None;
        self.clear_turn_flags();
        self.preset_seats = PlayerMap::with_value(self.state.player_count(), false);
        self.paused = false;
        self.show_pool = false;
        self.show_opponent_hands = false;
        self.scores = None;
    }

    // === Turn flow ===

    fn clear_turn_flags(&mut self) {
        self.selection = None;
        self.tile_placed = false;
        self.board_moved = false;
        self.turn_resolved = false;
        self.pending_choice = None;
    }

    fn begin_turn(&mut self, now: Instant) {
        let player = self.state.active_player;
        self.clear_turn_flags();
        self.snapshot = Some(self.state.snapshot_turn(player));
        self.state.record(player, GameEvent::TurnStarted);

        match self.state.seat(player).kind {
            PlayerKind::Human => {
                self.timer.start(now);
                self.phase = Phase::HumanTurnActive;
            }
            PlayerKind::Bot => {
                self.bot_timer.start(now);
                self.phase = Phase::BotTurnActive;
            }
        }
    }

    fn end_turn(&mut self, now: Instant) {
        self.timer.reset();
        self.bot_timer.reset();
        self.selection = None;
        self.pending_choice = None;

        if self.check_game_over() {
            return;
        }
        let next = self.state.next_player();
        self.state.advance_turn(next);
        self.begin_turn(now);
    }

    /// Restore the turn-start hand and board.
    fn rollback(&mut self) {
        if let Some(snapshot) = &self.snapshot {
            self.state.restore_turn(snapshot);
        }
        self.selection = None;
        self.tile_placed = false;
        self.board_moved = false;
    }

    /// The expiry branch. Runs once per human turn.
    fn resolve_human_turn(&mut self, now: Instant) {
        self.turn_resolved = true;
        self.selection = None;
        let player = self.state.active_player;

        if self.tile_placed {
            let enforce = self.state.meld_threshold_pending();
            if self.validator.is_valid_board(&self.state.board, enforce) {
                let opened = self.state.clear_meld_threshold();
                self.state.record(player, GameEvent::BoardCommitted { opened });
                self.end_turn(now);
                return;
            }
            self.state.record(player, GameEvent::BoardRejected);
        }

        if self.tile_placed || self.board_moved {
            self.rollback();
        }
        self.offer_draw(now);
    }

    /// Pop two tiles for the active human to choose from.
    ///
    /// With fewer than two in the pool the draw is skipped and the turn ends.
    fn offer_draw(&mut self, now: Instant) {
        let player = self.state.active_player;
        match self.state.pool.pop_two() {
            Ok(candidates) => {
                self.timer.reset();
                self.pending_choice = Some(candidates);
                self.phase = Phase::HumanChoosing;
                self.state.record(player, GameEvent::DrawOffered { candidates });
            }
            Err(_) => {
                let available = self.state.pool.len();
                self.state.record(player, GameEvent::DrawSkipped { available });
                self.end_turn(now);
            }
        }
    }

    fn play_bot_turn(&mut self, now: Instant) {
        let player = self.state.active_player;
        let hand = self.state.hand(player).clone();
        let enforce = self.state.meld_threshold_pending();

        let placement =
            self.bot
                .find_placement(&mut self.state.board, &hand, &self.validator, enforce);

        let placed = match placement {
            Some(p) => self.state.place_from_hand(player, p.tile, p.slot).is_ok().then_some(p),
            None => None,
        };

        if let Some(p) = placed {
            self.state.record(player, GameEvent::BotPlaced { tile: p.tile, slot: p.slot });
            let opened = self.state.clear_meld_threshold();
            self.state.record(player, GameEvent::BoardCommitted { opened });
        } else {
            match self.state.draw_to_hand(player) {
                Some(tile) => self.state.record(player, GameEvent::BotDrew { tile }),
                None => self.state.record(player, GameEvent::DrawSkipped { available: 0 }),
            }
        }

        self.end_turn(now);
    }

    /// Enter `GameOver` if a hand is empty or the pool is exhausted.
    fn check_game_over(&mut self) -> bool {
        let reason = if let Some(player) = self.state.empty_hand() {
            GameOverReason::HandEmptied(player)
        } else if self.state.pool.is_empty() {
            GameOverReason::PoolExhausted
        } else {
            return false;
        };

        self.timer.reset();
        self.bot_timer.reset();
        self.clear_turn_flags();
        self.scores = Some(ScoreTable::compute(
            self.state.seats(),
            self.config.joker_value,
            reason,
        ));
        let player = self.state.active_player;
        self.state.record(player, GameEvent::GameOver(reason));
        self.phase = Phase::GameOver;
        true
    }
}

/// Builds a `Session` in `Idle`.
///
/// ```
/// use rust_rummikub::core::{PlayerId, TileColor, TileId};
/// use rust_rummikub::game::{GameBuilder, Phase};
///
/// let red5 = TileId::numbered(TileColor::Red, 5, 0);
/// let session = GameBuilder::new()
///     .preset_hand(PlayerId::new(0), vec![red5])
///     .build(42)
///     .unwrap();
///
/// assert_eq!(session.phase(), Phase::Idle);
/// assert_eq!(session.state().hand(PlayerId::new(0)).tiles(), &[red5]);
/// ```
pub struct GameBuilder {
    config: GameConfig,
    hands: Vec<(PlayerId, Vec<TileId>)>,
    board: Vec<(usize, TileId)>,
    bot: Option<Box<dyn PlacementPolicy>>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            hands: Vec::new(),
            board: Vec::new(),
            bot: None,
        }
    }
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Give a seat exactly these tiles instead of a dealt hand.
    pub fn preset_hand(mut self, player: PlayerId, tiles: Vec<TileId>) -> Self {
        self.hands.push((player, tiles));
        self
    }

    /// Start the game with a tile already on the board.
    pub fn preset_board(mut self, slot: usize, tile: TileId) -> Self {
        self.board.push((slot, tile));
        self
    }

    /// Replace the bot placement search.
    pub fn bot_policy<P: PlacementPolicy + 'static>(mut self, policy: P) -> Self {
        self.bot = Some(Box::new(policy));
        self
    }

    /// Build the session. Preset tiles are taken out of the shuffled pool.
    pub fn build(self, seed: u64) -> Result<Session> {
        self.config.validate()?;

        let mut state = GameState::new(&self.config, GameRng::new(seed));
        let player_count = state.player_count();
        let mut preset_seats = PlayerMap::with_value(player_count, false);

        for (player, tiles) in &self.hands {
            if player.index() >= player_count {
                return Err(RummyError::InvalidConfig(format!(
                    "{player} does not exist at a {player_count}-seat table"
                )));
            }
            if state.give_from_pool(*player, tiles) != tiles.len() {
                return Err(RummyError::InvalidConfig(format!(
                    "preset hand for {player} uses a tile twice"
                )));
            }
            preset_seats[*player] = true;
        }

        for &(slot, tile) in &self.board {
            let tile = state.pool.take(tile).ok_or_else(|| {
                RummyError::InvalidConfig(format!("preset board tile {tile} is already in use"))
            })?;
            state.board.place(tile, slot)?;
        }

        let limit = self.config.turn_time_limit.duration();
        Ok(Session {
            validator: RuleValidator::from_config(&self.config),
            timer: TurnTimer::new(limit),
            bot_timer: TurnTimer::new(self.config.bot_delay()),
            config: self.config,
            state,
            phase: Phase::Idle,
            snapshot: None,
            selection: None,
            tile_placed: false,
            board_moved: false,
            turn_resolved: false,
            pending_choice: None,
            preset_seats,
            paused: false,
            show_pool: false,
            show_opponent_hands: false,
            scores: None,
            bot: self.bot.unwrap_or_else(|| Box::new(GreedyExtension::new())),
        })
    }
}
