//! Board legality.
//!
//! All checks are pure reads. The unit of validation is the row: a row is
//! split into maximal runs of occupied slots, and every such segment must be
//! a valid run on its own.
//!
//! ## Runs
//!
//! A run is three or more tiles of one color whose numbers step by two
//! (all odd or all even): `blue 3, 5, 7` or `red 6, 8, 10`. A joker stands
//! for the next expected number. The walk starts from the number of the
//! first non-joker tile and advances by two per slot, jokers included, so a
//! joker placed before the first numbered tile shifts everything after it.
//!
//! ## Opening meld
//!
//! Until the first successful commit of the game, the whole board must also
//! be worth at least `meld_threshold` points.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::config::GameConfig;
use crate::core::tile::Tile;
use crate::zones::Board;

/// Minimum run length.
pub const MIN_RUN_LEN: usize = 3;

/// Tiles of one segment, inline for typical run lengths.
pub type SegmentTiles = SmallVec<[Tile; 16]>;

/// Check whether an ordered tile sequence forms a run.
///
/// ```
/// use rust_rummikub::core::{Tile, TileColor::Red};
/// use rust_rummikub::rules::is_valid_run;
///
/// let r = |n| Tile::numbered(Red, n);
/// assert!(is_valid_run(&[r(3), r(5), r(7)]));
/// assert!(is_valid_run(&[r(3), Tile::Joker, r(7)]));
/// assert!(!is_valid_run(&[r(3), r(4), r(5)]));
/// ```
#[must_use]
pub fn is_valid_run(tiles: &[Tile]) -> bool {
    if tiles.len() < MIN_RUN_LEN {
        return false;
    }

    let Some((color, base)) = tiles.iter().find_map(|t| match *t {
        Tile::Numbered { color, number } => Some((color, number)),
        Tile::Joker => None,
    }) else {
        // All jokers.
        return true;
    };

    let parity = base % 2;
    let mut expected = u32::from(base);

    for tile in tiles {
        match *tile {
            Tile::Joker => {}
            Tile::Numbered { color: c, number } => {
                if c != color || u32::from(number) != expected || number % 2 != parity {
                    return false;
                }
            }
        }
        expected += 2;
    }

    true
}

/// Same check as `is_valid_run`, for a tile list taken from anywhere.
///
/// Used by the bot to decide which board segments are worth extending.
#[must_use]
pub fn is_valid_combination(tiles: &[Tile]) -> bool {
    is_valid_run(tiles)
}

/// A maximal block of occupied slots within one row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowSegment {
    /// First flat slot index.
    pub start: usize,
    pub len: usize,
}

impl RowSegment {
    /// One past the last slot.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Faces of the segment, left to right.
    pub fn tiles(&self, board: &Board) -> SegmentTiles {
        (self.start..self.end())
            .filter_map(|slot| board.get(slot))
            .map(|id| id.tile())
            .collect()
    }
}

/// Split a row into maximal occupied segments.
pub fn row_segments(board: &Board, row: usize) -> SmallVec<[RowSegment; 8]> {
    let range = board.row_range(row);
    let mut segments = SmallVec::new();
    let mut open: Option<usize> = None;

    for slot in range.clone() {
        match (board.get(slot), open) {
            (Some(_), None) => open = Some(slot),
            (None, Some(start)) => {
                segments.push(RowSegment { start, len: slot - start });
                open = None;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        segments.push(RowSegment { start, len: range.end - start });
    }

    segments
}

/// Check that every segment of a row is a valid run. Empty rows pass.
#[must_use]
pub fn is_valid_row(board: &Board, row: usize) -> bool {
    row_segments(board, row)
        .iter()
        .all(|segment| is_valid_run(&segment.tiles(board)))
}

/// Whole-board rules: row validity plus the opening meld threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleValidator {
    pub meld_threshold: u32,
    pub joker_value: u32,
}

impl Default for RuleValidator {
    fn default() -> Self {
        Self {
            meld_threshold: 30,
            joker_value: 30,
        }
    }
}

impl RuleValidator {
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            meld_threshold: config.meld_threshold,
            joker_value: config.joker_value,
        }
    }

    /// Sum of every placed tile's value.
    pub fn board_value(&self, board: &Board) -> u32 {
        board
            .occupied()
            .map(|(_, id)| id.tile().value(self.joker_value))
            .sum()
    }

    /// Every row valid, and, while `enforce_meld_threshold` holds, a total
    /// board value of at least `meld_threshold`.
    #[must_use]
    pub fn is_valid_board(&self, board: &Board, enforce_meld_threshold: bool) -> bool {
        if !(0..board.rows()).all(|row| is_valid_row(board, row)) {
            return false;
        }
        !enforce_meld_threshold || self.board_value(board) >= self.meld_threshold
    }
}
