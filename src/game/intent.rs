//! Discrete inputs from the UI.
//!
//! Intents carry no seat: they always act on behalf of the active human,
//! or on the session itself (start, pause, toggles, restart).

use serde::{Deserialize, Serialize};

use crate::core::config::TurnTimeLimit;
use crate::core::tile::TileId;
use crate::zones::SortOrder;

/// Which of the two offered pool tiles to keep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolChoice {
    First,
    Second,
}

impl PoolChoice {
    pub fn index(self) -> usize {
        match self {
            PoolChoice::First => 0,
            PoolChoice::Second => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    // === Turn play ===
    /// Select (or unselect) a tile in the active hand.
    SelectHandTile(TileId),
    /// Click a board slot: place the selected hand tile, select a board
    /// tile, or move the selected board tile.
    SelectBoardSlot(usize),
    /// End the turn now by expiring the clock.
    Confirm,
    /// Roll the turn back to its start.
    Regret,
    /// Draw two, keep one, instead of playing.
    RequestDraw,
    ChoosePoolTile(PoolChoice),
    SortHand(SortOrder),

    // === Session ===
    Start,
    SelectTimeLimit(TurnTimeLimit),
    TogglePause,
    TogglePoolView,
    ToggleOpponentHands,
    Restart,
}

impl Intent {
    /// Short name, used in phase errors.
    pub fn name(&self) -> &'static str {
        match self {
            Intent::SelectHandTile(_) => "select_hand_tile",
            Intent::SelectBoardSlot(_) => "select_board_slot",
            Intent::Confirm => "confirm",
            Intent::Regret => "regret",
            Intent::RequestDraw => "request_draw",
            Intent::ChoosePoolTile(_) => "choose_pool_tile",
            Intent::SortHand(_) => "sort_hand",
            Intent::Start => "start",
            Intent::SelectTimeLimit(_) => "select_time_limit",
            Intent::TogglePause => "toggle_pause",
            Intent::TogglePoolView => "toggle_pool_view",
            Intent::ToggleOpponentHands => "toggle_opponent_hands",
            Intent::Restart => "restart",
        }
    }
}
