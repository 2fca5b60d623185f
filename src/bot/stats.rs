//! Bot search statistics.

use serde::{Deserialize, Serialize};

/// Counters collected across bot searches.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Searches run (one per bot turn).
    pub searches: u32,

    /// Extendable combinations found on the board, summed over searches.
    pub combinations_seen: u32,

    /// Trial placements validated.
    pub candidates_tried: u32,

    /// Searches that found a placement.
    pub placements: u32,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fraction of searches that placed a tile.
    pub fn placement_rate(&self) -> f64 {
        if self.searches == 0 {
            0.0
        } else {
            f64::from(self.placements) / f64::from(self.searches)
        }
    }

    /// Average trial placements per search.
    pub fn avg_candidates_per_search(&self) -> f64 {
        if self.searches == 0 {
            0.0
        } else {
            f64::from(self.candidates_tried) / f64::from(self.searches)
        }
    }
}
