//! Saves the history.

use crate::{cells::State, error::Error, grid::Grid, history::History};
use serde::{Deserialize, Serialize};

/// A representation of the history which can be easily serialized.
///
/// The frames are stored as row-major lists of states.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySer {
    /// Number of rows of every frame.
    pub rows: usize,

    /// Number of columns of every frame.
    pub columns: usize,

    /// The frames.
    pub frames: Vec<Vec<State>>,
}

impl HistorySer {
    /// Restores the history from the `HistorySer`.
    ///
    /// Every frame must have exactly `rows × columns` cells.
    pub fn history(&self) -> Result<History, Error> {
        let mut history = History::new(self.rows, self.columns);
        for states in &self.frames {
            let grid = Grid::from_states(self.rows, self.columns, states.clone())?;
            history.push(&grid)?;
        }
        Ok(history)
    }
}

impl History {
    /// Saves the history as a `HistorySer`.
    pub fn ser(&self) -> HistorySer {
        let (rows, columns) = self.dims();
        HistorySer {
            rows,
            columns,
            frames: self.iter().map(|grid| grid.states().to_vec()).collect(),
        }
    }
}
