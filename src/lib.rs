//! # rust-rummikub
//!
//! Rules core for a Rummikub variant: five colors, numbers 1-15, runs that
//! step by two within one parity, four jokers, and a 30-point opening meld.
//!
//! ## Design Principles
//!
//! 1. **Intents In, Views Out**: the UI sends `Intent`s and reads a
//!    `GameView`. Nothing in the core holds callbacks or renders.
//!
//! 2. **Polled Time**: every time-dependent call takes an `Instant`. The
//!    core never reads the clock on its own, so tests step time by hand.
//!
//! 3. **Tiles Are Moved, Never Copied**: board, pool and hands hold
//!    `TileId`s out of one 379-tile arena. Undo is a value snapshot.
//!
//! ## Modules
//!
//! - `core`: tiles, seats, state, events, RNG, configuration, errors
//! - `zones`: board grid, draw pool, hands
//! - `rules`: run/row/board validation and scoring
//! - `bot`: greedy single-tile placement search
//! - `game`: turn state machine, timer, intents, view
//! - `python` (feature `python`): PyO3 bindings

pub mod bot;
pub mod core;
pub mod game;
pub mod rules;
pub mod zones;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    BoardGeometry, EventRecord, GameConfig, GameEvent, GameOverReason, GameRng, GameState,
    PlayerId, PlayerKind, PlayerMap, Result, RummyError, SeatConfig, Tile, TileColor, TileId,
    TurnTimeLimit,
};

pub use crate::zones::{Board, BoardSnapshot, Hand, Pool, PoolCensus, SortOrder};

pub use crate::rules::{is_valid_combination, is_valid_run, RuleValidator, ScoreTable};

pub use crate::bot::{GreedyExtension, Placement, PlacementPolicy, SearchStats};

pub use crate::game::{GameBuilder, GameView, Intent, Phase, PoolChoice, Session};
