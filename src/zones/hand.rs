//! A seat's rack of tiles.
//!
//! Order is display-only. Sorting never changes which tiles a hand holds,
//! and validation never looks at hand order.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, RummyError};
use crate::core::tile::{TileColor, TileId};

/// Hand sort orders offered to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Jokers first, then by color name alphabetically, then by number.
    ByColor,
    /// Jokers first, then by number.
    ByNumber,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    tiles: Vec<TileId>,
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
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

    /// Tiles in display order.
    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    pub fn contains(&self, tile: TileId) -> bool {
        self.tiles.contains(&tile)
    }

    pub fn push(&mut self, tile: TileId) {
        self.tiles.push(tile);
    }

    /// Remove a tile, keeping the order of the rest.
    pub fn remove(&mut self, tile: TileId) -> Result<()> {
        let pos = self
            .tiles
            .iter()
            .position(|&t| t == tile)
            .ok_or(RummyError::TileNotInHand(tile))?;
        self.tiles.remove(pos);
        Ok(())
    }

    /// Stable sort for display.
    pub fn sort(&mut self, order: SortOrder) {
        match order {
            SortOrder::ByColor => self.tiles.sort_by_key(|id| {
                let tile = id.tile();
                (tile.color().map(TileColor::name), tile.number())
            }),
            SortOrder::ByNumber => self.tiles.sort_by_key(|id| id.tile().number()),
        }
    }

    /// Sum of tile values, jokers counting `joker_value`.
    pub fn value(&self, joker_value: u32) -> u32 {
        self.tiles.iter().map(|id| id.tile().value(joker_value)).sum()
    }
}
