//! Game state: every tile location plus the bookkeeping the turn loop needs.
//!
//! ## GameState
//!
//! - Board, pool, and one `Seat` (name, kind, hand) per player
//! - The one-shot opening meld flag
//! - Active seat, turn number, per-turn sequence counter
//! - Event journal (`im::Vector`, cheap to clone into a view)
//! - RNG
//!
//! ## TurnSnapshot
//!
//! Value copy of the active hand and the board, taken at turn start and
//! restored on regret or on a rejected commit.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::GameConfig;
use super::error::{Result, RummyError};
use super::event::{EventRecord, GameEvent};
use super::player::{PlayerId, PlayerKind, PlayerMap};
use super::rng::GameRng;
use super::tile::TileId;
use crate::zones::{Board, BoardSnapshot, Hand, Pool};

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub name: String,
    pub kind: PlayerKind,
    pub hand: Hand,
}

impl Seat {
    pub fn is_bot(&self) -> bool {
        self.kind == PlayerKind::Bot
    }
}

/// Undo point for one turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    player: PlayerId,
    hand: Hand,
    board: BoardSnapshot,
}

impl TurnSnapshot {
    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn board(&self) -> &BoardSnapshot {
        &self.board
    }
}

#[derive(Clone, Debug)]
pub struct GameState {
    pub board: Board,

    pub pool: Pool,

    seats: PlayerMap<Seat>,

    /// True until the first valid commit of the game.
    meld_threshold_pending: bool,

    /// Seat whose turn it is.
    pub active_player: PlayerId,

    /// Turn number (starts at 1).
    pub turn_number: u32,

    /// Event sequence within the turn.
    sequence: u32,

    history: Vector<EventRecord>,

    pub rng: GameRng,
}

impl GameState {
    /// Fresh state: empty board, shuffled full pool, empty hands.
    ///
    /// Nothing is dealt yet; see `deal`.
    #[must_use]
    pub fn new(config: &GameConfig, mut rng: GameRng) -> Self {
        let seats = PlayerMap::from_vec(
            config
                .seats
                .iter()
                .map(|seat| Seat {
                    name: seat.name.clone(),
                    kind: seat.kind,
                    hand: Hand::new(),
                })
                .collect(),
        );

        let mut pool = Pool::full();
        pool.shuffle(&mut rng);

        Self {
            board: Board::from_geometry(&config.board),
            pool,
            seats,
            meld_threshold_pending: true,
            active_player: PlayerId::new(0),
            turn_number: 1,
            sequence: 0,
            history: Vector::new(),
            rng,
        }
    }

    pub fn player_count(&self) -> usize {
        self.seats.player_count()
    }

    pub fn seat(&self, player: PlayerId) -> &Seat {
        &self.seats[player]
    }

    pub fn seats(&self) -> &PlayerMap<Seat> {
        &self.seats
    }

    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.seats[player].hand
    }

    pub fn hand_mut(&mut self, player: PlayerId) -> &mut Hand {
        &mut self.seats[player].hand
    }

    // === Opening meld ===

    pub fn meld_threshold_pending(&self) -> bool {
        self.meld_threshold_pending
    }

    /// Clear the opening meld flag. Returns true if this call cleared it.
    pub fn clear_meld_threshold(&mut self) -> bool {
        std::mem::replace(&mut self.meld_threshold_pending, false)
    }

    // === Tile movement ===

    /// Deal `count` tiles to each of `players`, one at a time in the given
    /// order.
    ///
    /// Stops early if the pool runs dry.
    pub fn deal(&mut self, players: &[PlayerId], count: usize) {
        for _ in 0..count {
            for &player in players {
                if self.draw_to_hand(player).is_none() {
                    return;
                }
            }
        }
    }

    /// Move the next pool tile into a hand.
    pub fn draw_to_hand(&mut self, player: PlayerId) -> Option<TileId> {
        let tile = self.pool.draw()?;
        self.seats[player].hand.push(tile);
        Some(tile)
    }

    /// Move a tile from a hand onto an empty slot.
    pub fn place_from_hand(&mut self, player: PlayerId, tile: TileId, slot: usize) -> Result<()> {
        if !self.seats[player].hand.contains(tile) {
            return Err(RummyError::TileNotInHand(tile));
        }
        self.board.place(tile, slot)?;
        self.seats[player].hand.remove(tile)
    }

    /// Pull specific tiles out of the pool into a hand.
    ///
    /// Tiles not in the pool are skipped; returns how many moved.
    pub fn give_from_pool(&mut self, player: PlayerId, tiles: &[TileId]) -> usize {
        let mut moved = 0;
        for &tile in tiles {
            if let Some(tile) = self.pool.take(tile) {
                self.seats[player].hand.push(tile);
                moved += 1;
            }
        }
        moved
    }

    /// Total tiles across pool, hands and board. Two short while a
    /// draw-two offer is held by the session.
    pub fn tile_total(&self) -> usize {
        let in_hands: usize = self.seats.iter().map(|(_, seat)| seat.hand.len()).sum();
        self.pool.len() + in_hands + self.board.occupied_count()
    }

    // === Undo ===

    pub fn snapshot_turn(&self, player: PlayerId) -> TurnSnapshot {
        TurnSnapshot {
            player,
            hand: self.seats[player].hand.clone(),
            board: self.board.snapshot(),
        }
    }

    /// Put the snapshotted hand and board back.
    pub fn restore_turn(&mut self, snapshot: &TurnSnapshot) {
        self.seats[snapshot.player].hand = snapshot.hand.clone();
        self.board.restore(&snapshot.board);
    }

    /// True if neither the hand nor the board changed since the snapshot.
    pub fn matches_turn(&self, snapshot: &TurnSnapshot) -> bool {
        self.board.matches(&snapshot.board) && self.seats[snapshot.player].hand == snapshot.hand
    }

    // === Turn advancement ===

    /// Hand the turn to `next` and bump the turn number.
    pub fn advance_turn(&mut self, next: PlayerId) {
        self.active_player = next;
        self.turn_number += 1;
        self.sequence = 0;
    }

    /// Seat after the active one, in rotation order.
    pub fn next_player(&self) -> PlayerId {
        self.active_player.next(self.player_count())
    }

    /// First seat with an empty hand, if any.
    pub fn empty_hand(&self) -> Option<PlayerId> {
        self.seats
            .iter()
            .find(|(_, seat)| seat.hand.is_empty())
            .map(|(player, _)| player)
    }

    // === Journal ===

    /// Append an event for `player` at the current turn.
    pub fn record(&mut self, player: PlayerId, event: GameEvent) {
        let sequence = self.next_sequence();
        self.history
            .push_back(EventRecord::new(player, event, self.turn_number, sequence));
    }

    fn next_sequence(&mut self) -> u32 {
        let seq = self.sequence;
        self.sequence += 1;
        seq
    }

    pub fn history(&self) -> &Vector<EventRecord> {
        &self.history
    }
}
