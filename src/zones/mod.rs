//! Where tiles live: the shared board, the draw pool, and seat hands.
//!
//! A tile is in exactly one of these at any time. Moving a tile is always a
//! remove-then-insert between two zones, never a copy.
//!
//! ## Key Types
//!
//! - `Board`: fixed grid of optional slots, with snapshot/restore
//! - `Pool`: draw bag with shuffle, draw, add-back and pop-two
//! - `Hand`: a seat's rack, sortable for display

pub mod board;
pub mod hand;
pub mod pool;

pub use board::{Board, BoardSnapshot};
pub use hand::{Hand, SortOrder};
pub use pool::{Pool, PoolCensus};
