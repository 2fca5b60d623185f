//! Core types: tiles, seats, state, events, RNG, configuration, errors.
//!
//! Everything else in the crate is built on these. Nothing here knows about
//! phases or intents; that lives in `game`.

pub mod config;
pub mod error;
pub mod event;
pub mod player;
pub mod rng;
pub mod state;
pub mod tile;

pub use config::{BoardGeometry, GameConfig, SeatConfig, TurnTimeLimit};
pub use error::{Result, RummyError};
pub use event::{EventRecord, GameEvent, GameOverReason};
pub use player::{PlayerId, PlayerKind, PlayerMap};
pub use rng::GameRng;
pub use state::{GameState, Seat, TurnSnapshot};
pub use tile::{Tile, TileColor, TileId, JOKER_COUNT, TOTAL_TILES};
