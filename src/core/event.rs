//! Game event journal entries.
//!
//! Every transition the session makes is recorded as an `EventRecord` on
//! `GameState`. The journal doubles as the game's log: a UI or test can
//! replay it to see exactly what happened and in which order.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::tile::TileId;

/// Why the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// A seat emptied its hand.
    HandEmptied(PlayerId),
    /// The pool ran dry with every hand still holding tiles.
    PoolExhausted,
}

/// Something that happened in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    TurnStarted,
    TilePlaced { tile: TileId, slot: usize },
    TileMoved { from: usize, to: usize },
    Regretted,
    /// Board passed validation at turn end. `opened` is true when this
    /// commit cleared the opening meld threshold.
    BoardCommitted { opened: bool },
    /// Board failed validation at turn end and was rolled back.
    BoardRejected,
    DrawOffered { candidates: [TileId; 2] },
    TileChosen { kept: TileId, returned: TileId },
    /// A draw was due but the pool was too small.
    DrawSkipped { available: usize },
    BotPlaced { tile: TileId, slot: usize },
    BotDrew { tile: TileId },
    Paused,
    Resumed,
    GameOver(GameOverReason),
}

/// A journal entry with ordering metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Seat the event concerns (the active seat for turn events).
    pub player: PlayerId,

    pub event: GameEvent,

    /// Turn number when the event happened (starts at 1).
    pub turn: u32,

    /// Sequence number within the turn.
    pub sequence: u32,
}

impl EventRecord {
    #[must_use]
    pub fn new(player: PlayerId, event: GameEvent, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            event,
            turn,
            sequence,
        }
    }
}
