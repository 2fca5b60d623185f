//! Greedy placement search for bot seats.
//!
//! One pass per turn, deterministic given hand order:
//!
//! 1. Collect every maximal row segment that already forms a valid run.
//! 2. For each hand tile, in hand order, and each such combination, try the
//!    slot just before its start and then the slot just after its end, when
//!    that slot is inside the same row and empty.
//! 3. A trial placement is kept only if the whole board still validates
//!    under the current opening meld flag. The first success wins.
//!
//! The search only ever extends existing runs by a single tile. It never
//! builds a new run from the hand and never rearranges the board.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::tile::TileId;
use crate::rules::validator::{is_valid_combination, row_segments, RowSegment, RuleValidator};
use crate::zones::{Board, Hand};

use super::stats::SearchStats;

/// A board segment that is already a valid run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    pub row: usize,
    pub start: usize,
    pub len: usize,
}

impl Combination {
    /// Candidate slots for extending this run, left end first.
    fn ends(&self, board: &Board) -> SmallVec<[usize; 2]> {
        let range = board.row_range(self.row);
        let mut ends = SmallVec::new();
        if self.start > range.start {
            ends.push(self.start - 1);
        }
        if self.start + self.len < range.end {
            ends.push(self.start + self.len);
        }
        ends
    }
}

/// Every valid run on the board, scanning rows top to bottom.
pub fn find_combinations(board: &Board) -> SmallVec<[Combination; 16]> {
    (0..board.rows())
        .flat_map(|row| {
            row_segments(board, row)
                .into_iter()
                .filter(|segment: &RowSegment| is_valid_combination(&segment.tiles(board)))
                .map(move |segment| Combination {
                    row,
                    start: segment.start,
                    len: segment.len,
                })
        })
        .collect()
}

/// A tile to move from the bot's hand onto the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub tile: TileId,
    pub slot: usize,
}

/// Decides what a bot seat plays.
///
/// Implementations may place trial tiles on `board` but must leave it as
/// they found it. The caller applies the returned placement.
pub trait PlacementPolicy {
    fn find_placement(
        &mut self,
        board: &mut Board,
        hand: &Hand,
        validator: &RuleValidator,
        enforce_meld_threshold: bool,
    ) -> Option<Placement>;

    /// Counters accumulated over every search so far.
    fn stats(&self) -> &SearchStats;
}

/// The single-tile run extension search.
#[derive(Clone, Debug, Default)]
pub struct GreedyExtension {
    stats: SearchStats,
}

impl GreedyExtension {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `tile` at `slot`, validate, and take it back off.
    fn try_slot(
        &mut self,
        board: &mut Board,
        tile: TileId,
        slot: usize,
        validator: &RuleValidator,
        enforce_meld_threshold: bool,
    ) -> bool {
        if board.place(tile, slot).is_err() {
            return false;
        }
        self.stats.candidates_tried += 1;
        let valid = validator.is_valid_board(board, enforce_meld_threshold);
        board.remove(slot);
        valid
    }
}

impl PlacementPolicy for GreedyExtension {
    fn find_placement(
        &mut self,
        board: &mut Board,
        hand: &Hand,
        validator: &RuleValidator,
        enforce_meld_threshold: bool,
    ) -> Option<Placement> {
        let start = Instant::now();
        self.stats.searches += 1;

        let combinations = find_combinations(board);
        self.stats.combinations_seen += combinations.len() as u32;

        let mut found = None;
        'search: for &tile in hand.tiles() {
            for combination in &combinations {
                for slot in combination.ends(board) {
                    if self.try_slot(board, tile, slot, validator, enforce_meld_threshold) {
                        found = Some(Placement { tile, slot });
                        break 'search;
                    }
                }
            }
        }

        if found.is_some() {
            self.stats.placements += 1;
        }
        self.stats.time_us += start.elapsed().as_micros() as u64;
        found
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}
