//! Core type bindings for Python.

use pyo3::prelude::*;

use crate::core::{PlayerId, Tile, TileId};

/// Python wrapper for PlayerId.
#[pyclass(name = "PlayerId")]
#[derive(Clone, Debug)]
pub struct PyPlayerId(pub PlayerId);

#[pymethods]
impl PyPlayerId {
    #[new]
    fn new(id: u8) -> Self {
        Self(PlayerId::new(id))
    }

    /// Seat index (0-based).
    fn index(&self) -> usize {
        self.0.index()
    }

    fn __repr__(&self) -> String {
        format!("PlayerId({})", self.0 .0)
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        u64::from(self.0 .0)
    }
}

/// Python wrapper for a tile in the 379-tile set.
#[pyclass(name = "Tile")]
#[derive(Clone, Debug)]
pub struct PyTile(pub TileId);

#[pymethods]
impl PyTile {
    #[new]
    fn new(id: u16) -> PyResult<Self> {
        if usize::from(id) >= crate::core::TOTAL_TILES {
            return Err(pyo3::exceptions::PyValueError::new_err(format!(
                "tile id {id} is out of range"
            )));
        }
        Ok(Self(TileId(id)))
    }

    #[getter]
    fn id(&self) -> u16 {
        self.0 .0
    }

    /// Face number, 0 for a joker.
    #[getter]
    fn number(&self) -> u8 {
        self.0.tile().number()
    }

    /// Color name, or "joker".
    #[getter]
    fn color(&self) -> &'static str {
        match self.0.tile() {
            Tile::Numbered { color, .. } => color.name(),
            Tile::Joker => "joker",
        }
    }

    fn __repr__(&self) -> String {
        format!("Tile({})", self.0.tile())
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        u64::from(self.0 .0)
    }
}
