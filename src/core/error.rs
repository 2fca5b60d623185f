//! Error taxonomy.
//!
//! Every error is a local rejection: the operation that returns it has left
//! the game untouched. An illegal board at turn expiry is not an error at
//! all; the session rolls back and forces a draw instead.

use thiserror::Error;

use super::player::PlayerId;
use super::tile::TileId;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RummyError {
    #[error("slot {slot} is already occupied")]
    IllegalPlacement { slot: usize },
    #[error("slot {slot} is outside a board of {len} slots")]
    SlotOutOfRange { slot: usize, len: usize },
    #[error("slot {slot} is empty")]
    EmptySlot { slot: usize },
    #[error("{0} is not the active player")]
    NotActivePlayer(PlayerId),
    #[error("{0} is not in the hand")]
    TileNotInHand(TileId),
    #[error("tile id {0} is outside the tile set")]
    UnknownTile(u16),
    #[error("pool holds {available} tile(s), {needed} needed")]
    InsufficientPool { needed: usize, available: usize },
    #[error("{intent} is not allowed during {phase}")]
    InvalidPhase { phase: &'static str, intent: &'static str },
    #[error("tiles were placed or moved this turn")]
    PendingPlacement,
    #[error("turn timer already expired")]
    TimerExpired,
    #[error("game is paused")]
    Paused,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, RummyError>;
