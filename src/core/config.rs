//! Game configuration.
//!
//! - `BoardGeometry`: board and tile dimensions, which fix the slot grid
//! - `TurnTimeLimit`: the human turn clock (15s default, 30/60/90 selectable)
//! - `SeatConfig`: who sits where, in rotation order
//! - `GameConfig`: everything combined, plus scoring constants

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{Result, RummyError};
use super::player::PlayerKind;
use super::tile::TOTAL_TILES;

/// Board dimensions in layout units.
///
/// A row holds `board_width / tile_width` slots and the board has
/// `board_height / tile_height` rows. Remainders are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardGeometry {
    pub board_width: u32,
    pub board_height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self {
            board_width: 900,
            board_height: 600,
            tile_width: 30,
            tile_height: 40,
        }
    }
}

impl BoardGeometry {
    /// Geometry with exactly `cols` x `rows` unit-sized slots.
    pub const fn grid(cols: u32, rows: u32) -> Self {
        Self {
            board_width: cols,
            board_height: rows,
            tile_width: 1,
            tile_height: 1,
        }
    }

    /// Slots per row.
    pub const fn cols(&self) -> usize {
        (self.board_width / self.tile_width) as usize
    }

    /// Number of rows.
    pub const fn rows(&self) -> usize {
        (self.board_height / self.tile_height) as usize
    }
}

/// Human turn clock, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnTimeLimit {
    #[default]
    Fifteen,
    Thirty,
    Sixty,
    Ninety,
}

impl TurnTimeLimit {
    pub const ALL: [TurnTimeLimit; 4] = [
        TurnTimeLimit::Fifteen,
        TurnTimeLimit::Thirty,
        TurnTimeLimit::Sixty,
        TurnTimeLimit::Ninety,
    ];

    pub const fn seconds(self) -> u64 {
        match self {
            TurnTimeLimit::Fifteen => 15,
            TurnTimeLimit::Thirty => 30,
            TurnTimeLimit::Sixty => 60,
            TurnTimeLimit::Ninety => 90,
        }
    }

    pub const fn duration(self) -> Duration {
        Duration::from_secs(self.seconds())
    }

    /// Look up the limit for a seconds value, if it is one of the options.
    #[must_use]
    pub fn from_seconds(seconds: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|limit| limit.seconds() == seconds)
    }
}

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    pub name: String,
    pub kind: PlayerKind,
}

impl SeatConfig {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Human,
        }
    }

    pub fn bot(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Bot,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub board: BoardGeometry,

    pub turn_time_limit: TurnTimeLimit,

    /// Delay before a bot seat acts, in milliseconds. 0 = act on entry.
    pub bot_delay_ms: u64,

    /// Tiles dealt to every seat at the start.
    pub initial_hand_size: usize,

    /// Minimum board value for the first commit of the game.
    pub meld_threshold: u32,

    /// Point value of a joker, on the board and in hands.
    pub joker_value: u32,

    /// Seats in rotation order. Seat 0 moves first.
    pub seats: Vec<SeatConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardGeometry::default(),
            turn_time_limit: TurnTimeLimit::default(),
            bot_delay_ms: 0,
            initial_hand_size: 14,
            meld_threshold: 30,
            joker_value: 30,
            seats: vec![SeatConfig::human("Human Player"), SeatConfig::bot("Bot Player1")],
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_board(mut self, board: BoardGeometry) -> Self {
        self.board = board;
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, limit: TurnTimeLimit) -> Self {
        self.turn_time_limit = limit;
        self
    }

    #[must_use]
    pub fn with_bot_delay_ms(mut self, delay: u64) -> Self {
        self.bot_delay_ms = delay;
        self
    }

    #[must_use]
    pub fn with_initial_hand_size(mut self, size: usize) -> Self {
        self.initial_hand_size = size;
        self
    }

    #[must_use]
    pub fn with_seats(mut self, seats: Vec<SeatConfig>) -> Self {
        self.seats = seats;
        self
    }

    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    pub fn bot_delay(&self) -> Duration {
        Duration::from_millis(self.bot_delay_ms)
    }

    /// Check the config can actually be played.
    pub fn validate(&self) -> Result<()> {
        let b = &self.board;
        if b.tile_width == 0 || b.tile_height == 0 {
            return Err(RummyError::InvalidConfig("tile dimensions must be non-zero".into()));
        }
        if b.cols() == 0 || b.rows() == 0 {
            return Err(RummyError::InvalidConfig("board must hold at least one slot".into()));
        }
        if !(2..=8).contains(&self.seats.len()) {
            return Err(RummyError::InvalidConfig(format!(
                "seat count must be 2-8, got {}",
                self.seats.len()
            )));
        }
        if self.seats.len() * self.initial_hand_size > TOTAL_TILES {
            return Err(RummyError::InvalidConfig(format!(
                "{} seats x {} tiles exceeds the {TOTAL_TILES}-tile set",
                self.seats.len(),
                self.initial_hand_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let geometry = BoardGeometry::default();
        assert_eq!(geometry.cols(), 30);
        assert_eq!(geometry.rows(), 15);
    }

    #[test]
    fn test_grid_geometry() {
        let geometry = BoardGeometry::grid(7, 2);
        assert_eq!(geometry.cols(), 7);
        assert_eq!(geometry.rows(), 2);
    }

    #[test]
    fn test_time_limits() {
        assert_eq!(TurnTimeLimit::default().seconds(), 15);
        assert_eq!(TurnTimeLimit::from_seconds(60), Some(TurnTimeLimit::Sixty));
        assert_eq!(TurnTimeLimit::from_seconds(45), None);
        assert_eq!(TurnTimeLimit::Ninety.duration(), Duration::from_secs(90));
    }

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.player_count(), 2);
        assert_eq!(config.seats[0].kind, PlayerKind::Human);
        assert_eq!(config.seats[1].kind, PlayerKind::Bot);
        assert_eq!(config.initial_hand_size, 14);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        let one_seat = GameConfig::default().with_seats(vec![SeatConfig::human("solo")]);
        assert!(matches!(one_seat.validate(), Err(RummyError::InvalidConfig(_))));

        let huge_hands = GameConfig::default().with_initial_hand_size(200);
        assert!(matches!(huge_hands.validate(), Err(RummyError::InvalidConfig(_))));

        let mut zero_tile = GameConfig::default();
        zero_tile.board.tile_width = 0;
        assert!(matches!(zero_tile.validate(), Err(RummyError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_serialization() {
        let config = GameConfig::default().with_time_limit(TurnTimeLimit::Thirty);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
