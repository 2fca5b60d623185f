//! Python bindings for the rust-rummikub engine.
//!
//! # Quick Start
//!
//! ```python
//! import rust_rummikub as rk
//!
//! game = rk.RummyGame(bots=1, time_limit=15, seed=42)
//! game.start(0.0)
//!
//! # Let the clock run out, keep the first offered tile.
//! game.tick(15.0)
//! game.choose_pool_tile(0, 15.0)
//! game.tick(16.0)
//! print(game.phase, game.pool_size)
//! ```

use pyo3::prelude::*;

mod py_core;
mod py_games;

pub use py_core::*;
pub use py_games::*;

/// rust-rummikub: turn engine, rule validator and bot for a Rummikub variant.
#[pymodule]
fn rust_rummikub(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPlayerId>()?;
    m.add_class::<PyTile>()?;
    m.add_class::<PyRummyGame>()?;
    Ok(())
}
