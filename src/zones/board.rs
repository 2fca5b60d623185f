//! The shared board: a fixed grid of optional tile slots.
//!
//! Slots are addressed by a flat index, row-major. The board performs no
//! rule checks: half-built, illegal-looking arrangements are allowed while a
//! player is still moving tiles around. Legality is `rules::validator`'s job.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::core::config::BoardGeometry;
use crate::core::error::{Result, RummyError};
use crate::core::tile::TileId;

/// Plain copy of every slot, taken for undo.
///
/// Independent of the live board: mutating one never touches the other.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    slots: Vec<Option<TileId>>,
}

impl BoardSnapshot {
    pub fn slots(&self) -> &[Option<TileId>] {
        &self.slots
    }
}

/// Grid of `rows x cols` slots, each holding at most one tile.
///
/// ```
/// use rust_rummikub::core::{TileColor, TileId};
/// use rust_rummikub::zones::Board;
///
/// let mut board = Board::new(5, 2);
/// let tile = TileId::numbered(TileColor::Red, 3, 0);
/// board.place(tile, 6).unwrap();
///
/// assert_eq!(board.get(6), Some(tile));
/// assert_eq!(board.row_of(6), 1);
/// assert!(board.place(tile, 6).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cols: usize,
    rows: usize,
    slots: Vec<Option<TileId>>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new(cols: usize, rows: usize) -> Self {
        assert!(cols > 0 && rows > 0, "Board must have at least one slot");
        Self {
            cols,
            rows,
            slots: vec![None; cols * rows],
        }
    }

    #[must_use]
    pub fn from_geometry(geometry: &BoardGeometry) -> Self {
        Self::new(geometry.cols(), geometry.rows())
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total slot count.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Tile in a slot, `None` if empty or out of range.
    pub fn get(&self, slot: usize) -> Option<TileId> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn slots(&self) -> &[Option<TileId>] {
        &self.slots
    }

    /// Row a slot belongs to.
    pub fn row_of(&self, slot: usize) -> usize {
        slot / self.cols
    }

    /// Flat slot range covered by a row.
    pub fn row_range(&self, row: usize) -> Range<usize> {
        let start = row * self.cols;
        start..start + self.cols
    }

    /// Occupied slots with their tiles.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, TileId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, tile)| tile.map(|t| (slot, t)))
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn contains(&self, tile: TileId) -> bool {
        self.slots.contains(&Some(tile))
    }

    fn check_slot(&self, slot: usize) -> Result<()> {
        if slot >= self.slots.len() {
            return Err(RummyError::SlotOutOfRange {
                slot,
                len: self.slots.len(),
            });
        }
        Ok(())
    }

    /// Put a tile into an empty slot.
    pub fn place(&mut self, tile: TileId, slot: usize) -> Result<()> {
        self.check_slot(slot)?;
        if self.slots[slot].is_some() {
            return Err(RummyError::IllegalPlacement { slot });
        }
        self.slots[slot] = Some(tile);
        Ok(())
    }

    /// Take the tile out of a slot, if any.
    pub fn remove(&mut self, slot: usize) -> Option<TileId> {
        self.slots.get_mut(slot)?.take()
    }

    /// Move a tile from one slot to an empty one.
    pub fn move_tile(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_slot(from)?;
        self.check_slot(to)?;
        if self.slots[to].is_some() {
            return Err(RummyError::IllegalPlacement { slot: to });
        }
        let tile = self.slots[from].take().ok_or(RummyError::EmptySlot { slot: from })?;
        self.slots[to] = Some(tile);
        Ok(())
    }

    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            slots: self.slots.clone(),
        }
    }

    /// Overwrite every slot from a snapshot of this board.
    pub fn restore(&mut self, snapshot: &BoardSnapshot) {
        assert_eq!(
            snapshot.slots.len(),
            self.slots.len(),
            "Snapshot was taken from a board of a different size"
        );
        self.slots.clone_from(&snapshot.slots);
    }

    /// True if the board holds exactly what the snapshot recorded.
    pub fn matches(&self, snapshot: &BoardSnapshot) -> bool {
        self.slots == snapshot.slots
    }
}
