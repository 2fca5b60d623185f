//! Playing a game: the session state machine and its UI surface.
//!
//! ## Usage
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use rust_rummikub::game::{GameBuilder, Intent, Phase, PoolChoice};
//!
//! let t0 = Instant::now();
//! let mut session = GameBuilder::new().build(42).unwrap();
//! session.handle(Intent::Start, t0).unwrap();
//!
//! // Let the clock run out without playing: a draw is offered.
//! session.tick(t0 + Duration::from_secs(15));
//! assert_eq!(session.phase(), Phase::HumanChoosing);
//!
//! // Keeping a tile ends the turn; the bot plays on the next tick.
//! session.handle(Intent::ChoosePoolTile(PoolChoice::First), t0).unwrap();
//! session.tick(t0 + Duration::from_secs(16));
//! assert_eq!(session.phase(), Phase::HumanTurnActive);
//! ```

pub mod intent;
pub mod session;
pub mod timer;
pub mod view;

pub use intent::{Intent, PoolChoice};
pub use session::{GameBuilder, Phase, Selection, Session};
pub use timer::TurnTimer;
pub use view::{GameView, SeatView};
