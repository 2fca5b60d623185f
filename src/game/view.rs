//! Read-only snapshot of a session for rendering.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::core::player::{PlayerId, PlayerKind};
use crate::core::tile::TileId;
use crate::rules::ScoreTable;

use super::session::{Phase, Selection, Session};

/// One seat as the UI may show it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub player: PlayerId,
    pub name: String,
    pub kind: PlayerKind,
    pub hand_size: usize,
    /// Only for the focus seat, or for every seat while opponent hands are
    /// revealed.
    pub hand: Option<Vec<TileId>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    pub phase: Phase,
    pub active_player: PlayerId,
    pub turn_number: u32,

    pub board_cols: usize,
    /// Slot contents, row-major.
    pub board: Vec<Option<TileId>>,

    /// Seat whose hand is shown.
    pub focus: Option<PlayerId>,
    /// Focus hand in display order.
    pub hand: Vec<TileId>,
    pub selection: Option<Selection>,

    pub time_left: Duration,
    pub pending_choice: Option<[TileId; 2]>,
    pub paused: bool,
    pub meld_threshold_pending: bool,

    pub pool_size: usize,
    /// Census lines while the pool view is on.
    pub pool_census: Option<Vec<String>>,

    pub seats: Vec<SeatView>,
    pub scores: Option<ScoreTable>,

    /// Journal length, for spotting new events between frames.
    pub event_count: usize,
}

impl GameView {
    pub fn capture(session: &Session, now: Instant) -> Self {
        let state = session.state();
        let focus = session.focus_player();
        let reveal = session.shows_opponent_hands();

        let seats = state
            .seats()
            .iter()
            .map(|(player, seat)| SeatView {
                player,
                name: seat.name.clone(),
                kind: seat.kind,
                hand_size: seat.hand.len(),
                hand: (reveal || Some(player) == focus).then(|| seat.hand.tiles().to_vec()),
            })
            .collect();

        Self {
            phase: session.phase(),
            active_player: state.active_player,
            turn_number: state.turn_number,
            board_cols: state.board.cols(),
            board: state.board.slots().to_vec(),
            focus,
            hand: focus.map_or_else(Vec::new, |p| state.hand(p).tiles().to_vec()),
            selection: session.selection(),
            time_left: session.time_left(now),
            pending_choice: session.pending_choice(),
            paused: session.is_paused(),
            meld_threshold_pending: state.meld_threshold_pending(),
            pool_size: state.pool.len(),
            pool_census: session.shows_pool().then(|| state.pool.census().lines()),
            seats,
            scores: session.scores().cloned(),
            event_count: state.history().len(),
        }
    }

    /// Tiles in one board row, or `None` past the last row.
    pub fn board_row(&self, row: usize) -> Option<&[Option<TileId>]> {
        let start = row.checked_mul(self.board_cols)?;
        self.board.get(start..start.checked_add(self.board_cols)?)
    }
}
