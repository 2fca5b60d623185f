//! Rules: board legality and end-of-game scoring.
//!
//! Both are pure reads over zones. The session decides when to call them.

pub mod scoring;
pub mod validator;

pub use scoring::{ScoreEntry, ScoreTable};
pub use validator::{
    is_valid_combination, is_valid_row, is_valid_run, row_segments, RowSegment, RuleValidator,
    MIN_RUN_LEN,
};
