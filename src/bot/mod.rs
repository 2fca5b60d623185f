//! Bot seats: a greedy single-tile placement search.
//!
//! ## Usage
//!
//! ```rust
//! use rust_rummikub::bot::{GreedyExtension, PlacementPolicy};
//! use rust_rummikub::core::{TileColor, TileId};
//! use rust_rummikub::rules::RuleValidator;
//! use rust_rummikub::zones::{Board, Hand};
//!
//! let mut board = Board::new(6, 1);
//! for (slot, n) in [(0, 2), (1, 4), (2, 6)] {
//!     board.place(TileId::numbered(TileColor::Blue, n, 0), slot).unwrap();
//! }
//! let hand = Hand::from_tiles(vec![TileId::numbered(TileColor::Blue, 8, 0)]);
//!
//! let mut bot = GreedyExtension::new();
//! let placement = bot.find_placement(&mut board, &hand, &RuleValidator::default(), false);
//! assert_eq!(placement.map(|p| p.slot), Some(3));
//! ```

pub mod search;
pub mod stats;

pub use search::{find_combinations, Combination, GreedyExtension, Placement, PlacementPolicy};
pub use stats::SearchStats;
