//! Tiles and the fixed physical tile set.
//!
//! ## Tile vs TileId
//!
//! `Tile` is a value object: two tiles with the same color and number are
//! interchangeable for rule purposes. `TileId` names one *physical* tile out
//! of the 379 in the box, so duplicates stay distinct in hands, pool and board.
//!
//! ## ID Layout
//!
//! - `0..375`: numbered tiles, color-major, then number, then copy
//!   (`Red 1` copies are `0..5`, `Red 2` copies are `5..10`, ...)
//! - `375..379`: jokers
//!
//! The face of a tile is a pure function of its ID, so the board and hands
//! only ever store `TileId`s.

use serde::{Deserialize, Serialize};

use super::error::RummyError;

/// Highest tile number.
pub const MAX_NUMBER: u8 = 15;

/// Copies of every numbered tile.
pub const COPIES_PER_TILE: usize = 5;

/// Jokers in the set.
pub const JOKER_COUNT: usize = 4;

/// Numbered tiles in the set (5 colors x 15 numbers x 5 copies).
pub const NUMBERED_TILE_COUNT: usize = TileColor::ALL.len() * MAX_NUMBER as usize * COPIES_PER_TILE;

/// Every tile in the game. Pool + hands + board sum to this, except while a
/// draw-two offer is pending; `Session::tile_total` counts that too.
pub const TOTAL_TILES: usize = NUMBERED_TILE_COUNT + JOKER_COUNT;

/// Tile color. Declaration order is the ID layout order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TileColor {
    Red,
    Green,
    Blue,
    Alpha,
    Yellow,
}

impl TileColor {
    /// All colors, in layout order.
    pub const ALL: [TileColor; 5] = [
        TileColor::Red,
        TileColor::Green,
        TileColor::Blue,
        TileColor::Alpha,
        TileColor::Yellow,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            TileColor::Red => "red",
            TileColor::Green => "green",
            TileColor::Blue => "blue",
            TileColor::Alpha => "alpha",
            TileColor::Yellow => "yellow",
        }
    }
}

impl std::fmt::Display for TileColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A tile face.
///
/// A joker carries no color and reports number 0; a numbered tile always has
/// a color and a number in `1..=15`. The enum makes the two impossible to mix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Numbered { color: TileColor, number: u8 },
    Joker,
}

impl Tile {
    /// Create a numbered tile.
    ///
    /// Panics if `number` is outside `1..=15`.
    #[must_use]
    pub fn numbered(color: TileColor, number: u8) -> Self {
        assert!(
            (1..=MAX_NUMBER).contains(&number),
            "Tile number must be in 1..=15, got {number}"
        );
        Tile::Numbered { color, number }
    }

    /// Face number, 0 for a joker.
    pub const fn number(self) -> u8 {
        match self {
            Tile::Numbered { number, .. } => number,
            Tile::Joker => 0,
        }
    }

    /// Face color, `None` for a joker.
    pub const fn color(self) -> Option<TileColor> {
        match self {
            Tile::Numbered { color, .. } => Some(color),
            Tile::Joker => None,
        }
    }

    pub const fn is_joker(self) -> bool {
        matches!(self, Tile::Joker)
    }

    /// Point value: the face number, or `joker_value` for a joker.
    pub const fn value(self, joker_value: u32) -> u32 {
        match self {
            Tile::Numbered { number, .. } => number as u32,
            Tile::Joker => joker_value,
        }
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tile::Numbered { color, number } => write!(f, "{color} {number}"),
            Tile::Joker => f.write_str("joker"),
        }
    }
}

/// Identifier of one physical tile.
///
/// Deserializing rejects IDs outside the set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct TileId(pub u16);

impl TryFrom<u16> for TileId {
    type Error = RummyError;

    fn try_from(raw: u16) -> Result<Self, Self::Error> {
        if usize::from(raw) < TOTAL_TILES {
            Ok(Self(raw))
        } else {
            Err(RummyError::UnknownTile(raw))
        }
    }
}

impl From<TileId> for u16 {
    fn from(id: TileId) -> Self {
        id.0
    }
}

impl TileId {
    /// ID of copy `copy` of a numbered tile.
    ///
    /// ```
    /// use rust_rummikub::core::{Tile, TileColor, TileId};
    ///
    /// let id = TileId::numbered(TileColor::Blue, 7, 2);
    /// assert_eq!(id.tile(), Tile::numbered(TileColor::Blue, 7));
    /// ```
    #[must_use]
    pub fn numbered(color: TileColor, number: u8, copy: u8) -> Self {
        assert!((1..=MAX_NUMBER).contains(&number), "Tile number must be in 1..=15");
        assert!((copy as usize) < COPIES_PER_TILE, "At most 5 copies per tile");
        let per_color = MAX_NUMBER as usize * COPIES_PER_TILE;
        let raw = color.index() * per_color + (number as usize - 1) * COPIES_PER_TILE + copy as usize;
        Self(raw as u16)
    }

    /// ID of joker `copy` (0..4).
    #[must_use]
    pub fn joker(copy: u8) -> Self {
        assert!((copy as usize) < JOKER_COUNT, "Only 4 jokers exist");
        Self((NUMBERED_TILE_COUNT + copy as usize) as u16)
    }

    /// Iterate over the whole set in layout order.
    pub fn all() -> impl Iterator<Item = TileId> {
        (0..TOTAL_TILES as u16).map(TileId)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Face of this tile.
    ///
    /// Panics if the ID is outside the set.
    pub fn tile(self) -> Tile {
        let raw = self.index();
        assert!(raw < TOTAL_TILES, "TileId {raw} is outside the tile set");
        if raw >= NUMBERED_TILE_COUNT {
            return Tile::Joker;
        }
        let per_color = MAX_NUMBER as usize * COPIES_PER_TILE;
        let color = TileColor::ALL[raw / per_color];
        let number = ((raw % per_color) / COPIES_PER_TILE) as u8 + 1;
        Tile::Numbered { color, number }
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.index() < TOTAL_TILES {
            write!(f, "{} (#{})", self.tile(), self.0)
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_size() {
        assert_eq!(NUMBERED_TILE_COUNT, 375);
        assert_eq!(TOTAL_TILES, 379);
        assert_eq!(TileId::all().count(), 379);
    }

    #[test]
    fn test_layout() {
        assert_eq!(TileId(0).tile(), Tile::numbered(TileColor::Red, 1));
        assert_eq!(TileId(4).tile(), Tile::numbered(TileColor::Red, 1));
        assert_eq!(TileId(5).tile(), Tile::numbered(TileColor::Red, 2));
        assert_eq!(TileId(75).tile(), Tile::numbered(TileColor::Green, 1));
        assert_eq!(TileId(374).tile(), Tile::numbered(TileColor::Yellow, 15));
        assert_eq!(TileId(375).tile(), Tile::Joker);
        assert_eq!(TileId(378).tile(), Tile::Joker);
    }

    #[test]
    fn test_numbered_id_matches_face() {
        for color in TileColor::ALL {
            for number in 1..=MAX_NUMBER {
                for copy in 0..COPIES_PER_TILE as u8 {
                    let id = TileId::numbered(color, number, copy);
                    assert_eq!(id.tile(), Tile::numbered(color, number));
                }
            }
        }
    }

    #[test]
    fn test_joker_invariant() {
        let jokers = TileId::all().filter(|id| id.tile().is_joker()).count();
        assert_eq!(jokers, JOKER_COUNT);

        for id in TileId::all() {
            let tile = id.tile();
            assert_eq!(tile.number() == 0, tile.is_joker());
            assert_eq!(tile.color().is_none(), tile.is_joker());
        }
    }

    #[test]
    fn test_value() {
        assert_eq!(Tile::numbered(TileColor::Blue, 9).value(30), 9);
        assert_eq!(Tile::Joker.value(30), 30);
    }

    #[test]
    fn test_display() {
        assert_eq!(Tile::numbered(TileColor::Alpha, 12).to_string(), "alpha 12");
        assert_eq!(Tile::Joker.to_string(), "joker");
    }

    #[test]
    fn test_display_outside_set() {
        assert_eq!(TileId(9999).to_string(), "#9999");
        assert_eq!(
            RummyError::TileNotInHand(TileId(9999)).to_string(),
            "#9999 is not in the hand"
        );
        assert_eq!(TileId(375).to_string(), "joker (#375)");
    }

    #[test]
    fn test_deserialize_rejects_unknown_id() {
        let id: TileId = serde_json::from_str("378").unwrap();
        assert_eq!(id, TileId::joker(3));
        assert!(serde_json::from_str::<TileId>("379").is_err());
        assert!(serde_json::from_str::<TileId>("9999").is_err());
        assert_eq!(serde_json::to_string(&TileId(12)).unwrap(), "12");
    }

    #[test]
    #[should_panic(expected = "Tile number must be in 1..=15")]
    fn test_number_out_of_range() {
        let _ = Tile::numbered(TileColor::Red, 16);
    }

    #[test]
    fn test_serialization() {
        let tile = Tile::numbered(TileColor::Yellow, 3);
        let json = serde_json::to_string(&tile).unwrap();
        let deserialized: Tile = serde_json::from_str(&json).unwrap();
        assert_eq!(tile, deserialized);
    }
}
