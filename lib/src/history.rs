//! Recorded history of a simulation.

use crate::{error::Error, grid::Grid};
use std::slice;

/// An append-only sequence of grids, one for each recorded generation.
///
/// Each frame is an independent copy, so changing the grid after it is
/// recorded never changes the history. All frames have the same dimensions.
///
/// Memory grows with the number of frames times the size of the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct History {
    rows: usize,
    columns: usize,
    frames: Vec<Grid>,
}

impl History {
    /// An empty history for grids of the given dimensions.
    pub fn new(rows: usize, columns: usize) -> Self {
        History {
            rows,
            columns,
            frames: Vec::new(),
        }
    }

    /// An empty history for grids of the same dimensions as `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.rows(), grid.columns())
    }

    /// `(rows, columns)` of every frame.
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// Checks that a grid can be recorded in or replayed against this history.
    pub fn check_grid(&self, grid: &Grid) -> Result<(), Error> {
        if grid.dims() == self.dims() {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                expected: self.dims(),
                found: grid.dims(),
            })
        }
    }

    /// Records a copy of the grid as the last frame.
    pub fn push(&mut self, grid: &Grid) -> Result<(), Error> {
        self.check_grid(grid)?;
        self.frames.push(grid.clone());
        Ok(())
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether there is no frame.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The frame at some index.
    pub fn get(&self, index: usize) -> Option<&Grid> {
        self.frames.get(index)
    }

    /// The last frame.
    pub fn last(&self) -> Option<&Grid> {
        self.frames.last()
    }

    /// All frames, in the order they were recorded.
    pub fn frames(&self) -> &[Grid] {
        &self.frames
    }

    /// Iterates over the frames.
    pub fn iter(&self) -> slice::Iter<'_, Grid> {
        self.frames.iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Grid;
    type IntoIter = slice::Iter<'a, Grid>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
