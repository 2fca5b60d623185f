//! The draw pool: an unordered multiset of the tiles nobody holds.
//!
//! Order inside the `Vec` only matters as the draw sequence after a shuffle.
//! A tile handed back is reinserted at a random position so it is not
//! simply the next one drawn.

use rustc_hash::FxHashMap;

use crate::core::error::{Result, RummyError};
use crate::core::rng::GameRng;
use crate::core::tile::{Tile, TileColor, TileId, MAX_NUMBER};

/// Remaining tiles, counted by face.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolCensus {
    pub total: usize,
    pub jokers: usize,
    counts: FxHashMap<(TileColor, u8), usize>,
}

impl PoolCensus {
    /// Copies of one numbered face left in the pool.
    pub fn count(&self, color: TileColor, number: u8) -> usize {
        self.counts.get(&(color, number)).copied().unwrap_or(0)
    }

    /// One line per number, listing the colors still available.
    ///
    /// Format: `number 3: red(2), blue(5)`, then a final `joker(n)` line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(MAX_NUMBER as usize + 2);
        lines.push(format!("tiles in pool: {}", self.total));
        for number in 1..=MAX_NUMBER {
            let colors: Vec<String> = TileColor::ALL
                .into_iter()
                .filter_map(|color| match self.count(color, number) {
                    0 => None,
                    n => Some(format!("{color}({n})")),
                })
                .collect();
            lines.push(format!("number {number}: {}", colors.join(", ")));
        }
        lines.push(format!("joker({})", self.jokers));
        lines
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pool {
    tiles: Vec<TileId>,
}

impl Pool {
    /// The complete 379-tile set, unshuffled.
    pub fn full() -> Self {
        Self {
            tiles: TileId::all().collect(),
        }
    }

    #[must_use]
    pub fn from_tiles(tiles: Vec<TileId>) -> Self {
        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    pub fn contains(&self, tile: TileId) -> bool {
        self.tiles.contains(&tile)
    }

    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.tiles);
    }

    /// Remove one tile.
    pub fn draw(&mut self) -> Option<TileId> {
        self.tiles.pop()
    }

    /// Remove a specific tile, if present.
    pub fn take(&mut self, tile: TileId) -> Option<TileId> {
        let pos = self.tiles.iter().position(|&t| t == tile)?;
        Some(self.tiles.swap_remove(pos))
    }

    /// Return a tile to the pool at a random position.
    pub fn add_back(&mut self, tile: TileId, rng: &mut GameRng) {
        let index = rng.gen_range_usize(0..self.tiles.len() + 1);
        self.tiles.insert(index, tile);
    }

    /// Remove two tiles for a draw-two-choose-one.
    ///
    /// Fails without touching the pool if fewer than two remain.
    pub fn pop_two(&mut self) -> Result<[TileId; 2]> {
        if self.tiles.len() < 2 {
            return Err(RummyError::InsufficientPool {
                needed: 2,
                available: self.tiles.len(),
            });
        }
        let len = self.tiles.len();
        let pair = [self.tiles[len - 1], self.tiles[len - 2]];
        self.tiles.truncate(len - 2);
        Ok(pair)
    }

    pub fn census(&self) -> PoolCensus {
        let mut census = PoolCensus {
            total: self.tiles.len(),
            ..PoolCensus::default()
        };
        for id in &self.tiles {
            match id.tile() {
                Tile::Joker => census.jokers += 1,
                Tile::Numbered { color, number } => {
                    *census.counts.entry((color, number)).or_insert(0) += 1;
                }
            }
        }
        census
    }
}
