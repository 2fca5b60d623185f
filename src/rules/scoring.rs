//! End-of-game scoring.
//!
//! A seat with an empty hand scores the total hand value of every other
//! seat. Every other seat scores minus its own hand value. The same formula
//! runs when the game ends on an exhausted pool, in which case nobody takes
//! the positive branch and the table sums to a negative number.

use serde::{Deserialize, Serialize};

use crate::core::event::GameOverReason;
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::state::Seat;

/// Final score of one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player: PlayerId,
    pub name: String,
    pub score: i64,
}

/// Final per-seat scores, computed once at game over.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    pub reason: GameOverReason,
    entries: Vec<ScoreEntry>,
}

impl ScoreTable {
    /// Score every seat from its remaining hand.
    pub fn compute(seats: &PlayerMap<Seat>, joker_value: u32, reason: GameOverReason) -> Self {
        let values: Vec<i64> = seats
            .iter()
            .map(|(_, seat)| i64::from(seat.hand.value(joker_value)))
            .collect();
        let total: i64 = values.iter().sum();

        let entries = seats
            .iter()
            .zip(values)
            .map(|((player, seat), own)| ScoreEntry {
                player,
                name: seat.name.clone(),
                score: if seat.hand.is_empty() { total - own } else { -own },
            })
            .collect();

        Self { reason, entries }
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    #[must_use]
    pub fn score(&self, player: PlayerId) -> i64 {
        self.entries
            .iter()
            .find(|e| e.player == player)
            .map_or(0, |e| e.score)
    }

    /// The seat that emptied its hand, if the game ended that way.
    pub fn winner(&self) -> Option<PlayerId> {
        match self.reason {
            GameOverReason::HandEmptied(player) => Some(player),
            GameOverReason::PoolExhausted => None,
        }
    }

    /// Sum of all scores. Zero only when somebody went out.
    pub fn total(&self) -> i64 {
        self.entries.iter().map(|e| e.score).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::PlayerKind;
    use crate::core::tile::{TileColor, TileId};
    use crate::zones::Hand;

    fn seat(name: &str, tiles: Vec<TileId>) -> Seat {
        Seat {
            name: name.to_string(),
            kind: PlayerKind::Bot,
            hand: Hand::from_tiles(tiles),
        }
    }

    #[test]
    fn test_winner_collects_opponent_values() {
        let seats = PlayerMap::from_vec(vec![
            seat("a", vec![]),
            seat("b", vec![TileId::numbered(TileColor::Red, 7, 0), TileId::joker(0)]),
            seat("c", vec![TileId::numbered(TileColor::Blue, 2, 1)]),
        ]);
        let table = ScoreTable::compute(&seats, 30, GameOverReason::HandEmptied(PlayerId::new(0)));

        assert_eq!(table.score(PlayerId::new(0)), 39);
        assert_eq!(table.score(PlayerId::new(1)), -37);
        assert_eq!(table.score(PlayerId::new(2)), -2);
        assert_eq!(table.total(), 0);
        assert_eq!(table.winner(), Some(PlayerId::new(0)));
        assert_eq!(table.entries()[1].name, "b");
    }

    #[test]
    fn test_pool_exhaustion_is_all_negative() {
        let seats = PlayerMap::from_vec(vec![
            seat("a", vec![TileId::numbered(TileColor::Green, 4, 0)]),
            seat("b", vec![TileId::numbered(TileColor::Yellow, 9, 0)]),
        ]);
        let table = ScoreTable::compute(&seats, 30, GameOverReason::PoolExhausted);

        assert_eq!(table.score(PlayerId::new(0)), -4);
        assert_eq!(table.score(PlayerId::new(1)), -9);
        assert_eq!(table.total(), -13);
        assert_eq!(table.winner(), None);
    }

    #[test]
    fn test_score_table_serialization() {
        let seats = PlayerMap::from_vec(vec![seat("a", vec![]), seat("b", vec![TileId::joker(1)])]);
        let table = ScoreTable::compute(&seats, 30, GameOverReason::HandEmptied(PlayerId::new(0)));

        let json = serde_json::to_string(&table).unwrap();
        let deserialized: ScoreTable = serde_json::from_str(&json).unwrap();
        assert_eq!(table, deserialized);
    }
}
