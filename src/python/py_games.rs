//! Game bindings for Python.
//!
//! Python drives time explicitly: every call that needs a clock takes
//! `elapsed`, seconds since the game object was created.

use std::time::{Duration, Instant};

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::config::{GameConfig, TurnTimeLimit};
use crate::core::RummyError;
use crate::game::{GameBuilder, Intent, Phase, PoolChoice, Session};
use crate::zones::SortOrder;

use super::py_core::{PyPlayerId, PyTile};

fn to_py_err(err: RummyError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Python wrapper for a game session.
#[pyclass(name = "RummyGame", unsendable)]
pub struct PyRummyGame {
    session: Session,
    origin: Instant,
}

impl PyRummyGame {
    fn at(&self, elapsed: f64) -> Instant {
        self.origin + Duration::from_secs_f64(elapsed.max(0.0))
    }

    fn send(&mut self, intent: Intent, elapsed: f64) -> PyResult<()> {
        let now = self.at(elapsed);
        self.session.handle(intent, now).map_err(to_py_err)
    }
}

#[pymethods]
impl PyRummyGame {
    /// Create a game with one human seat and `bots` bot seats.
    ///
    /// # Arguments
    /// - bots: Number of bot seats (1-7)
    /// - time_limit: Human turn clock in seconds (15, 30, 60 or 90)
    /// - seed: RNG seed for deterministic games
    #[new]
    #[pyo3(signature = (bots = 1, time_limit = 15, seed = 42))]
    fn new(bots: usize, time_limit: u64, seed: u64) -> PyResult<Self> {
        let limit = TurnTimeLimit::from_seconds(time_limit)
            .ok_or_else(|| PyValueError::new_err(format!("unsupported time limit {time_limit}")))?;

        let mut seats = vec![crate::core::SeatConfig::human("Human Player")];
        seats.extend((1..=bots).map(|i| crate::core::SeatConfig::bot(format!("Bot Player{i}"))));
        let config = GameConfig::default().with_seats(seats).with_time_limit(limit);

        let session = GameBuilder::new().config(config).build(seed).map_err(to_py_err)?;
        Ok(Self {
            session,
            origin: Instant::now(),
        })
    }

    fn start(&mut self, elapsed: f64) -> PyResult<()> {
        self.send(Intent::Start, elapsed)
    }

    fn tick(&mut self, elapsed: f64) {
        let now = self.at(elapsed);
        self.session.tick(now);
    }

    fn select_hand_tile(&mut self, tile: &PyTile, elapsed: f64) -> PyResult<()> {
        self.send(Intent::SelectHandTile(tile.0), elapsed)
    }

    fn select_board_slot(&mut self, slot: usize, elapsed: f64) -> PyResult<()> {
        self.send(Intent::SelectBoardSlot(slot), elapsed)
    }

    fn confirm(&mut self, elapsed: f64) -> PyResult<()> {
        self.send(Intent::Confirm, elapsed)
    }

    fn regret(&mut self, elapsed: f64) -> PyResult<()> {
        self.send(Intent::Regret, elapsed)
    }

    fn request_draw(&mut self, elapsed: f64) -> PyResult<()> {
        self.send(Intent::RequestDraw, elapsed)
    }

    /// Keep candidate 0 or 1 of a pending draw.
    fn choose_pool_tile(&mut self, which: usize, elapsed: f64) -> PyResult<()> {
        let choice = match which {
            0 => PoolChoice::First,
            1 => PoolChoice::Second,
            _ => return Err(PyValueError::new_err("choice must be 0 or 1")),
        };
        self.send(Intent::ChoosePoolTile(choice), elapsed)
    }

    /// Sort the shown hand by "color" or "number".
    fn sort_hand(&mut self, by: &str, elapsed: f64) -> PyResult<()> {
        let order = match by {
            "color" => SortOrder::ByColor,
            "number" => SortOrder::ByNumber,
            _ => return Err(PyValueError::new_err("sort by 'color' or 'number'")),
        };
        self.send(Intent::SortHand(order), elapsed)
    }

    fn toggle_pause(&mut self, elapsed: f64) -> PyResult<()> {
        self.send(Intent::TogglePause, elapsed)
    }

    fn restart(&mut self, elapsed: f64) -> PyResult<()> {
        self.send(Intent::Restart, elapsed)
    }

    #[getter]
    fn phase(&self) -> &'static str {
        self.session.phase().name()
    }

    #[getter]
    fn is_over(&self) -> bool {
        self.session.phase() == Phase::GameOver
    }

    #[getter]
    fn active_player(&self) -> PyPlayerId {
        PyPlayerId(self.session.state().active_player)
    }

    #[getter]
    fn turn_number(&self) -> u32 {
        self.session.state().turn_number
    }

    #[getter]
    fn pool_size(&self) -> usize {
        self.session.state().pool.len()
    }

    /// Board slots, row-major; `None` for empty.
    fn board(&self) -> Vec<Option<PyTile>> {
        self.session
            .state()
            .board
            .slots()
            .iter()
            .map(|slot| slot.map(PyTile))
            .collect()
    }

    fn hand(&self, player: &PyPlayerId) -> Vec<PyTile> {
        self.session
            .state()
            .hand(player.0)
            .tiles()
            .iter()
            .map(|&t| PyTile(t))
            .collect()
    }

    fn pending_choice(&self) -> Option<(PyTile, PyTile)> {
        self.session
            .pending_choice()
            .map(|[a, b]| (PyTile(a), PyTile(b)))
    }

    fn time_left(&self, elapsed: f64) -> f64 {
        self.session.time_left(self.at(elapsed)).as_secs_f64()
    }

    /// Final (name, score) pairs once the game is over.
    fn scores(&self) -> Option<Vec<(String, i64)>> {
        self.session.scores().map(|table| {
            table
                .entries()
                .iter()
                .map(|e| (e.name.clone(), e.score))
                .collect()
        })
    }

    fn __repr__(&self) -> String {
        format!(
            "RummyGame(turn={}, active={}, phase={})",
            self.session.state().turn_number,
            self.session.state().active_player,
            self.session.phase().name()
        )
    }
}
